//! Registry error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SingletonError {
    /// The lifecycle cell that registered this entry no longer exists.
    #[error("lifecycle cell for {0} was dropped before teardown")]
    Released(&'static str),
    /// The object owning a managed singleton was already gone.
    #[error("object owning {0} is no longer in the object graph")]
    ObjectMissing(&'static str),
    #[error("destroy path for {name} failed: {reason}")]
    DestroyFailed { name: &'static str, reason: String },
}
