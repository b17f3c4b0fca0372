//! Polled trigger volume with enter/stay/exit events.

use std::collections::HashSet;
use std::hash::Hash;

use glam::Vec3;

use kuroneko_core::collab::SpatialQuery;
use kuroneko_core::constants::PROXIMITY_MAX_RESULTS;
use kuroneko_core::types::LayerMask;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityEvent<H> {
    Enter(H),
    Stay(H),
    Exit(H),
}

/// Sphere that diffs its overlap set against the previous tick.
///
/// For each member in query order an `Enter` (if new) then a `Stay` is
/// emitted; `Exit`s for members that left follow, in the order they were
/// present last tick. The previous membership is replaced wholesale after
/// each poll.
#[derive(Debug, Clone)]
pub struct ProximityWatcher<H> {
    pub radius: f32,
    pub filter: LayerMask,
    pub max_results: usize,
    previous: Vec<H>,
}

impl<H: Copy + Eq + Hash> ProximityWatcher<H> {
    pub fn new(radius: f32, filter: LayerMask) -> Self {
        Self {
            radius,
            filter,
            max_results: PROXIMITY_MAX_RESULTS,
            previous: Vec::new(),
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Members seen on the last poll.
    pub fn members(&self) -> &[H] {
        &self.previous
    }

    /// Forget previous membership; the next poll reports everything as new.
    pub fn clear(&mut self) {
        self.previous.clear();
    }

    pub fn detect<S>(&mut self, spatial: &S, origin: Vec3) -> Vec<ProximityEvent<H>>
    where
        S: SpatialQuery<Handle = H> + ?Sized,
    {
        let mut hits = spatial.query_overlap(origin, self.radius, self.filter);
        hits.truncate(self.max_results);

        let before: HashSet<H> = self.previous.iter().copied().collect();
        let mut seen: HashSet<H> = HashSet::with_capacity(hits.len());
        let mut current = Vec::with_capacity(hits.len());
        let mut events = Vec::new();

        for handle in hits {
            if !seen.insert(handle) {
                continue;
            }
            current.push(handle);
            if !before.contains(&handle) {
                events.push(ProximityEvent::Enter(handle));
            }
            events.push(ProximityEvent::Stay(handle));
        }

        for handle in &self.previous {
            if !seen.contains(handle) {
                events.push(ProximityEvent::Exit(*handle));
            }
        }

        self.previous = current;
        events
    }
}
