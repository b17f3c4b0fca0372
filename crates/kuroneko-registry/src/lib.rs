//! Singleton registry and lifecycle variants for KURONEKO.
//!
//! `SingletonRegistry` is the one table of live game-wide services, keyed by
//! type. Two lifecycles feed it:
//!
//! - [`PlainSingleton`]: owned by application code, lazily constructed on
//!   first access, destroyed explicitly.
//! - [`ManagedSingleton`]: owned by the engine's object graph; attached and
//!   detached through [`ObjectGraph`] hooks.
//!
//! Each registration carries its own destroy function, so teardown never
//! needs to know which variant produced an entry.

pub mod error;
pub mod lifecycle;
pub mod managed;
pub mod plain;
pub mod registry;

pub use error::SingletonError;
pub use lifecycle::{DetachHook, ObjectGraph, Singleton};
pub use managed::{AttachOutcome, ManagedSingleton};
pub use plain::PlainSingleton;
pub use registry::{DestroyFn, SingletonRegistry, TeardownReport, UnregisterMode};
