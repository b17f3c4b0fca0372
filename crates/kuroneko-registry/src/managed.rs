//! Singletons whose object lifetime belongs to the engine's object graph.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};
use parking_lot::Mutex;

use crate::error::SingletonError;
use crate::lifecycle::{short_type_name, ObjectGraph, Singleton};
use crate::registry::{DestroyFn, SingletonRegistry};

/// Result of offering an object to a [`ManagedSingleton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// The object became the instance.
    Attached,
    /// The object already is the instance.
    AlreadyAttached,
    /// Another object, or another cell, already holds the instance; the
    /// offered one was destroyed.
    Duplicate,
}

struct Bound<T, O> {
    object: O,
    instance: Arc<T>,
}

/// Lifecycle cell for a managed singleton.
///
/// The cell never destroys its instance directly. Destruction goes through
/// the object graph, which runs the detach hook installed on attach; the
/// hook performs cleanup and keep-instance unregistration.
pub struct ManagedSingleton<T: Singleton, G: ObjectGraph + 'static> {
    slot: Mutex<Option<Bound<T, G::Object>>>,
    initialized: AtomicBool,
    persistent: bool,
    registry: Arc<SingletonRegistry<G>>,
    ctor: fn() -> T,
}

impl<T: Singleton + Default, G: ObjectGraph + 'static> ManagedSingleton<T, G> {
    pub fn with_default(registry: Arc<SingletonRegistry<G>>, persistent: bool) -> Arc<Self> {
        Self::new(registry, persistent, T::default)
    }
}

impl<T: Singleton, G: ObjectGraph + 'static> ManagedSingleton<T, G> {
    /// `persistent` marks the owning object to survive scene unloads.
    pub fn new(registry: Arc<SingletonRegistry<G>>, persistent: bool, ctor: fn() -> T) -> Arc<Self> {
        Arc::new(Self {
            slot: Mutex::new(None),
            initialized: AtomicBool::new(false),
            persistent,
            registry,
            ctor,
        })
    }

    /// The live instance. Adopts an existing component found in the graph,
    /// otherwise spawns a new object carrying a freshly constructed one.
    pub fn instance(self: &Arc<Self>, graph: &mut G) -> Arc<T> {
        if let Some(current) = self.get() {
            return current;
        }
        // Another cell already owns this type
        if let Some(registered) = self.registry.get::<T>() {
            warn!("{} is owned by another cell, reusing it", short_type_name::<T>());
            return registered;
        }

        let (object, component) = match graph.find_component::<T>() {
            Some(found) => {
                info!("adopting existing {} on {:?}", short_type_name::<T>(), found.0);
                found
            }
            None => {
                let component = Arc::new((self.ctor)());
                let object = graph.spawn_object(short_type_name::<T>(), Arc::clone(&component));
                (object, component)
            }
        };

        self.attach(graph, object, Arc::clone(&component));
        self.get().unwrap_or(component)
    }

    /// Attach protocol, run when an object carrying `T` comes alive.
    pub fn attach(self: &Arc<Self>, graph: &mut G, object: G::Object, component: Arc<T>) -> AttachOutcome {
        let name = short_type_name::<T>();
        {
            let mut slot = self.slot.lock();
            let current = slot.as_ref().map(|bound| bound.object);
            match current {
                Some(existing) if existing == object => return AttachOutcome::AlreadyAttached,
                Some(existing) => {
                    drop(slot);
                    warn!(
                        "duplicate singleton instance of type {name} on {object:?} (live on {existing:?}), destroying duplicate"
                    );
                    graph.destroy_object(object);
                    return AttachOutcome::Duplicate;
                }
                None => match self.registry.get::<T>() {
                    Some(registered) if Arc::ptr_eq(&registered, &component) => {
                        return AttachOutcome::AlreadyAttached;
                    }
                    Some(_) => {
                        drop(slot);
                        warn!("{name} is owned by another cell, destroying duplicate on {object:?}");
                        graph.destroy_object(object);
                        return AttachOutcome::Duplicate;
                    }
                    None => {
                        *slot = Some(Bound {
                            object,
                            instance: Arc::clone(&component),
                        });
                    }
                },
            }
        }

        if self.persistent {
            graph.set_persistent(object);
        }
        component.on_initialize();
        self.initialized.store(true, Ordering::Release);

        let cell = Arc::downgrade(self);
        graph.on_detach(
            object,
            Box::new(move || {
                if let Some(cell) = cell.upgrade() {
                    cell.detach(object);
                }
            }),
        );

        if !self.registry.register(Arc::clone(&component), self.destroy_fn()) {
            // Another cell registered in between; roll back and self-destruct
            self.initialized.store(false, Ordering::Release);
            component.on_cleanup();
            *self.slot.lock() = None;
            graph.destroy_object(object);
            return AttachOutcome::Duplicate;
        }
        info!("managed singleton attached: {name} on {object:?}");
        AttachOutcome::Attached
    }

    /// Detach protocol, run when `object` is destroyed. Objects other than
    /// the current instance are ignored.
    pub fn detach(&self, object: G::Object) {
        let mut slot = self.slot.lock();
        let Some(bound) = slot.as_ref() else {
            return;
        };
        if bound.object != object {
            return;
        }
        self.initialized.store(false, Ordering::Release);
        bound.instance.on_cleanup();
        self.registry.remove_instance(&bound.instance);
        *slot = None;
        info!("managed singleton {} destroyed", short_type_name::<T>());
    }

    /// Ask the graph to destroy the owning object; the detach hook does the rest.
    pub fn destroy_instance(&self, graph: &mut G) -> Result<(), SingletonError> {
        let Some(object) = self.object() else {
            return Ok(());
        };
        if graph.destroy_object(object) {
            return Ok(());
        }
        // The graph lost the object without telling us
        self.detach(object);
        Err(SingletonError::ObjectMissing(short_type_name::<T>()))
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.lock().as_ref().map(|bound| Arc::clone(&bound.instance))
    }

    /// The object currently holding the instance.
    pub fn object(&self) -> Option<G::Object> {
        self.slot.lock().as_ref().map(|bound| bound.object)
    }

    fn destroy_fn(self: &Arc<Self>) -> DestroyFn<G> {
        let cell = Arc::downgrade(self);
        let registry = Arc::downgrade(&self.registry);
        Arc::new(move |graph: &mut G| match cell.upgrade() {
            Some(cell) => cell.destroy_instance(graph),
            None => {
                if let Some(registry) = registry.upgrade() {
                    registry.remove::<T>();
                }
                Err(SingletonError::Released(short_type_name::<T>()))
            }
        })
    }
}
