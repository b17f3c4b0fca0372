//! Lazily constructed singletons owned by application code.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use log::{info, warn};
use parking_lot::Mutex;

use crate::error::SingletonError;
use crate::lifecycle::{short_type_name, Singleton};
use crate::registry::{DestroyFn, SingletonRegistry};

/// Lifecycle cell for a plain singleton.
///
/// The first call to [`PlainSingleton::instance`] constructs the value and
/// registers it; concurrent first calls construct exactly once. After
/// [`PlainSingleton::destroy`] the next access constructs a fresh instance.
/// When another cell has already registered a `T`, access returns that
/// instance and this cell stays empty.
///
/// Lock order is cell slot, then registry. Lifecycle hooks run under the
/// slot lock and must not call back into the same cell.
pub struct PlainSingleton<T: Singleton, C: 'static = ()> {
    slot: Mutex<Option<Arc<T>>>,
    initialized: AtomicBool,
    registry: Arc<SingletonRegistry<C>>,
    ctor: fn() -> T,
}

impl<T: Singleton + Default, C: 'static> PlainSingleton<T, C> {
    pub fn with_default(registry: Arc<SingletonRegistry<C>>) -> Arc<Self> {
        Self::new(registry, T::default)
    }
}

impl<T: Singleton, C: 'static> PlainSingleton<T, C> {
    pub fn new(registry: Arc<SingletonRegistry<C>>, ctor: fn() -> T) -> Arc<Self> {
        Arc::new(Self {
            slot: Mutex::new(None),
            initialized: AtomicBool::new(false),
            registry,
            ctor,
        })
    }

    /// The live instance, constructing and registering it on first access.
    pub fn instance(self: &Arc<Self>) -> Arc<T> {
        let mut slot = self.slot.lock();
        if let Some(existing) = slot.as_ref() {
            return Arc::clone(existing);
        }

        // Another cell already owns this type
        if let Some(registered) = self.registry.get::<T>() {
            warn!("{} is owned by another cell, reusing it", short_type_name::<T>());
            return registered;
        }

        let instance = Arc::new((self.ctor)());
        instance.on_initialize();
        self.initialized.store(true, Ordering::Release);

        if !self.registry.register(Arc::clone(&instance), self.destroy_fn()) {
            // Lost a race with another cell
            self.initialized.store(false, Ordering::Release);
            instance.on_cleanup();
            return self.registry.get::<T>().unwrap_or(instance);
        }
        *slot = Some(Arc::clone(&instance));
        info!("plain singleton created: {}", short_type_name::<T>());
        instance
    }

    /// Clear the instance, run its cleanup hook and unregister it.
    /// Returns `false` when there was nothing to destroy.
    pub fn destroy(&self) -> bool {
        let mut slot = self.slot.lock();
        let Some(instance) = slot.take() else {
            return false;
        };
        self.initialized.store(false, Ordering::Release);
        instance.on_cleanup();
        self.registry.remove_instance(&instance);
        info!("plain singleton destroyed: {}", short_type_name::<T>());
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// The live instance without constructing one.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.lock().clone()
    }

    fn destroy_fn(self: &Arc<Self>) -> DestroyFn<C> {
        let cell: Weak<Self> = Arc::downgrade(self);
        let registry = Arc::downgrade(&self.registry);
        Arc::new(move |_ctx: &mut C| match cell.upgrade() {
            Some(cell) => {
                cell.destroy();
                Ok(())
            }
            None => {
                if let Some(registry) = registry.upgrade() {
                    registry.remove::<T>();
                }
                Err(SingletonError::Released(short_type_name::<T>()))
            }
        })
    }
}
