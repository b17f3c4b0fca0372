//! The singleton registry: one live instance per type, with per-entry destroy paths.
//!
//! All mutation goes through `register` / `unregister` / `remove`; the table
//! itself is never exposed. The lock is never held while a destroy path runs,
//! so destroy paths are free to call back into the registry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use log::{error, info, warn};
use parking_lot::Mutex;

use crate::error::SingletonError;
use crate::lifecycle::short_type_name;

/// Variant-specific teardown supplied at registration time.
///
/// `C` is the teardown context handed through by whoever drives teardown
/// (for managed singletons, the object graph that owns them).
pub type DestroyFn<C> = Arc<dyn Fn(&mut C) -> Result<(), SingletonError> + Send + Sync>;

/// How `unregister` treats the instance behind the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnregisterMode {
    /// Drop the registry entry only; the owner keeps the instance alive.
    KeepInstance,
    /// Run the entry's destroy path, then drop the entry.
    DestroyInstance,
}

struct Entry<C> {
    name: &'static str,
    /// Registration sequence number; teardown runs newest first.
    order: u64,
    instance: Arc<dyn Any + Send + Sync>,
    destroy: DestroyFn<C>,
}

struct Table<C> {
    entries: HashMap<TypeId, Entry<C>>,
    next_order: u64,
}

/// Outcome of [`SingletonRegistry::destroy_all`].
#[derive(Debug, Default)]
pub struct TeardownReport {
    /// Types whose destroy path completed, in teardown order.
    pub destroyed: Vec<&'static str>,
    /// Types whose destroy path reported an error.
    pub failures: Vec<(&'static str, SingletonError)>,
}

/// Process- or session-scoped table of live singletons keyed by type.
pub struct SingletonRegistry<C: 'static = ()> {
    table: Mutex<Table<C>>,
}

impl<C: 'static> Default for SingletonRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> SingletonRegistry<C> {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table {
                entries: HashMap::new(),
                next_order: 0,
            }),
        }
    }

    /// Insert `instance` under `T`. A second registration of the same type
    /// is a warning-level no-op and leaves the original entry in place.
    /// Returns whether the entry was inserted.
    pub fn register<T: Send + Sync + 'static>(&self, instance: Arc<T>, destroy: DestroyFn<C>) -> bool {
        let name = short_type_name::<T>();
        let mut table = self.table.lock();
        if table.entries.contains_key(&TypeId::of::<T>()) {
            warn!("singleton of type {name} already registered");
            return false;
        }
        let order = table.next_order;
        table.next_order += 1;
        table.entries.insert(
            TypeId::of::<T>(),
            Entry {
                name,
                order,
                instance,
                destroy,
            },
        );
        info!("singleton registered: {name}");
        true
    }

    /// Remove the entry for `T`. In `DestroyInstance` mode the entry's
    /// destroy path runs first; the entry is removed even if it fails.
    /// Returns `Ok(false)` when nothing was registered.
    pub fn unregister<T: 'static>(&self, mode: UnregisterMode, ctx: &mut C) -> Result<bool, SingletonError> {
        match mode {
            UnregisterMode::KeepInstance => Ok(self.remove::<T>()),
            UnregisterMode::DestroyInstance => {
                let Some((name, destroy)) = self.destroy_path(TypeId::of::<T>()) else {
                    return Ok(false);
                };
                let result = destroy(ctx);
                self.remove_type(TypeId::of::<T>());
                if let Err(e) = &result {
                    error!("error destroying singleton {name}: {e}");
                }
                result.map(|()| true)
            }
        }
    }

    /// Keep-instance unregistration. Returns whether an entry was removed.
    pub fn remove<T: 'static>(&self) -> bool {
        self.remove_type(TypeId::of::<T>())
    }

    /// Keep-instance unregistration that only removes the entry when it
    /// still holds `instance`. Returns whether an entry was removed.
    pub fn remove_instance<T: 'static>(&self, instance: &Arc<T>) -> bool {
        let removed = {
            let mut table = self.table.lock();
            let owned = table.entries.get(&TypeId::of::<T>()).is_some_and(|e| {
                Arc::as_ptr(&e.instance) as *const () == Arc::as_ptr(instance) as *const ()
            });
            if !owned {
                return false;
            }
            table.entries.remove(&TypeId::of::<T>())
        };
        if let Some(entry) = removed {
            info!("singleton unregistered: {}", entry.name);
        }
        true
    }

    /// The registered instance of `T`, if any.
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        let instance = {
            let table = self.table.lock();
            table.entries.get(&TypeId::of::<T>())?.instance.clone()
        };
        instance.downcast::<T>().ok()
    }

    pub fn has<T: 'static>(&self) -> bool {
        self.table.lock().entries.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.table.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of all registered types, oldest registration first.
    pub fn registered_names(&self) -> Vec<&'static str> {
        let table = self.table.lock();
        let mut entries: Vec<(u64, &'static str)> =
            table.entries.values().map(|e| (e.order, e.name)).collect();
        entries.sort_unstable_by_key(|(order, _)| *order);
        entries.into_iter().map(|(_, name)| name).collect()
    }

    /// Run every entry's destroy path, newest registration first.
    ///
    /// Failures are logged and collected; the sweep always visits every
    /// entry. An entry still present afterwards is a broken destroy path
    /// and panics.
    pub fn destroy_all(&self, ctx: &mut C) -> TeardownReport {
        let mut snapshot: Vec<(TypeId, u64, &'static str, DestroyFn<C>)> = {
            let table = self.table.lock();
            table
                .entries
                .iter()
                .map(|(id, e)| (*id, e.order, e.name, e.destroy.clone()))
                .collect()
        };
        snapshot.sort_unstable_by(|a, b| b.1.cmp(&a.1));

        let mut report = TeardownReport::default();
        for (type_id, _, name, destroy) in snapshot {
            // An earlier destroy path may have taken this one down with it
            if !self.table.lock().entries.contains_key(&type_id) {
                continue;
            }
            match destroy(ctx) {
                Ok(()) => report.destroyed.push(name),
                Err(e) => {
                    error!("error destroying singleton {name}: {e}");
                    report.failures.push((name, e));
                }
            }
        }

        let residual = self.registered_names();
        if !residual.is_empty() {
            panic!("singleton registry not empty after teardown: {residual:?}");
        }
        info!("all singletons destroyed and registry cleared");
        report
    }

    fn destroy_path(&self, type_id: TypeId) -> Option<(&'static str, DestroyFn<C>)> {
        let table = self.table.lock();
        table
            .entries
            .get(&type_id)
            .map(|e| (e.name, e.destroy.clone()))
    }

    fn remove_type(&self, type_id: TypeId) -> bool {
        let removed = self.table.lock().entries.remove(&type_id);
        match removed {
            Some(entry) => {
                info!("singleton unregistered: {}", entry.name);
                true
            }
            None => false,
        }
    }
}
