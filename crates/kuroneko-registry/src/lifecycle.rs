//! Lifecycle hooks and the object-graph seam.

use std::fmt::Debug;
use std::sync::Arc;

/// A game-wide service with at most one live instance per type.
///
/// Hooks take `&self`; services keep mutable state behind atomics or locks.
/// `on_initialize` runs before the instance becomes reachable through the
/// registry, `on_cleanup` runs before it is removed.
pub trait Singleton: Send + Sync + 'static {
    fn on_initialize(&self) {}
    fn on_cleanup(&self) {}
}

/// Callback run by an [`ObjectGraph`] when an object is destroyed.
pub type DetachHook = Box<dyn FnOnce() + Send + Sync>;

/// The engine-side owner of managed objects.
///
/// Implementors own object lifetime; they must run every hook registered
/// through [`ObjectGraph::on_detach`] when the object is destroyed, whether
/// the destruction was explicit or part of a scene unload.
pub trait ObjectGraph {
    type Object: Copy + Eq + Debug + Send + Sync + 'static;

    /// First live object carrying a `T` component.
    fn find_component<T: Send + Sync + 'static>(&self) -> Option<(Self::Object, Arc<T>)>;

    /// Create a new named object carrying `component`.
    fn spawn_object<T: Send + Sync + 'static>(&mut self, name: &str, component: Arc<T>) -> Self::Object;

    /// Destroy an object, running its detach hooks first.
    /// Returns `false` if the object was not alive.
    fn destroy_object(&mut self, object: Self::Object) -> bool;

    /// Keep the object alive across scene unloads.
    fn set_persistent(&mut self, object: Self::Object);

    fn on_detach(&mut self, object: Self::Object, hook: DetachHook);
}

/// Last path segment of a type name, for log lines.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
