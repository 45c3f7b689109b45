//! Entity reconciliation: fetched snapshots against rendered visuals.
//!
//! The reconciler owns the `id → RenderedEntity` maps for vehicles and stops
//! and is the only component that creates or destroys visuals. Vehicles are
//! diffed by stable id; surviving ids are refreshed destroy-then-recreate,
//! so at any instant exactly one marker/label pair exists per live id and
//! none for an id absent from the latest snapshot. Stops have a separate
//! identity space and are fully replaced on every successful stop fetch.
//!
//! An empty vehicle list is deliberately a no-op, not a clear-all: feeds
//! report "no data yet" that way, and wiping the last good render on it
//! would flicker the map empty once a minute.

mod visuals;

pub use visuals::UNKNOWN_STOP;

use std::collections::{HashMap, HashSet};

use crate::model::{StopSnapshot, VehicleSnapshot};
use crate::surface::{MapSurface, VisualHandle};

use visuals::{stop_visuals, vehicle_visuals};

/// The marker/label handle pair rendered for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedEntity {
    /// The positional marker.
    pub primary: VisualHandle,
    /// The text annotation.
    pub label: VisualHandle,
}

/// Counts of operations one reconciliation performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Entities newly rendered.
    pub created: usize,
    /// Entities re-rendered in place (same id, fresh visuals).
    pub updated: usize,
    /// Entities removed from the surface.
    pub removed: usize,
}

/// Diff engine mapping fetched entity sets onto surface visuals.
#[derive(Debug, Default)]
pub struct EntityReconciler {
    vehicles: HashMap<String, RenderedEntity>,
    stops: HashMap<String, RenderedEntity>,
}

impl EntityReconciler {
    /// Create a reconciler with nothing rendered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the vehicle layer against a fresh snapshot.
    ///
    /// An empty snapshot leaves the previous render untouched (see module
    /// docs). Otherwise ids absent from the snapshot are removed, new ids
    /// created, and surviving ids recreated with fresh geometry — old
    /// visuals are destroyed before their replacements are added.
    pub fn reconcile_vehicles<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        snapshot: &[VehicleSnapshot],
    ) -> ReconcileOutcome {
        let mut outcome = ReconcileOutcome::default();
        if snapshot.is_empty() {
            return outcome;
        }

        let fresh_ids: HashSet<&str> = snapshot.iter().map(|v| v.vehicle_id.as_str()).collect();
        let stale: Vec<String> = self
            .vehicles
            .keys()
            .filter(|id| !fresh_ids.contains(id.as_str()))
            .cloned()
            .collect();
        for id in stale {
            if let Some(entity) = self.vehicles.remove(&id) {
                destroy(surface, entity);
                outcome.removed += 1;
            }
        }

        for vehicle in snapshot {
            if let Some(previous) = self.vehicles.remove(&vehicle.vehicle_id) {
                destroy(surface, previous);
                outcome.updated += 1;
            } else {
                outcome.created += 1;
            }
            let (marker, label) = vehicle_visuals(vehicle);
            let entity = RenderedEntity {
                primary: surface.add_visual(marker),
                label: surface.add_visual(label),
            };
            self.vehicles.insert(vehicle.vehicle_id.clone(), entity);
        }

        outcome
    }

    /// Replace the whole stop layer with a fresh snapshot.
    ///
    /// Stop sets are small and change only with viewport or zoom, so no
    /// incremental diff is kept: everything rendered is destroyed, then the
    /// new set is drawn.
    pub fn replace_stops<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        snapshot: &[StopSnapshot],
    ) -> ReconcileOutcome {
        let removed = self.clear_stops(surface);
        let mut outcome = ReconcileOutcome {
            removed,
            ..Default::default()
        };
        for stop in snapshot {
            let (marker, label) = stop_visuals(stop);
            let entity = RenderedEntity {
                primary: surface.add_visual(marker),
                label: surface.add_visual(label),
            };
            // Last record wins on duplicate ids.
            if let Some(previous) = self.stops.insert(stop.stop_id.clone(), entity) {
                destroy(surface, previous);
            } else {
                outcome.created += 1;
            }
        }
        outcome
    }

    /// Remove every rendered stop. Used when zoom crosses below the stop
    /// gate, independent of any in-flight fetch.
    pub fn clear_stops<S: MapSurface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let removed = self.stops.len();
        for (_, entity) in self.stops.drain() {
            destroy(surface, entity);
        }
        removed
    }

    /// Full teardown: destroy everything rendered, both layers.
    pub fn teardown<S: MapSurface + ?Sized>(&mut self, surface: &mut S) {
        for (_, entity) in self.vehicles.drain() {
            destroy(surface, entity);
        }
        self.clear_stops(surface);
    }

    /// Ids of currently rendered vehicles, sorted.
    pub fn vehicle_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.vehicles.keys().map(|id| id.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of rendered vehicles.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Number of rendered stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}

fn destroy<S: MapSurface + ?Sized>(surface: &mut S, entity: RenderedEntity) {
    surface.remove_visual(entity.primary);
    surface.remove_visual(entity.label);
}
