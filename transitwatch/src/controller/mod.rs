//! View-state controller: the top-level control loop.
//!
//! Binds viewport, selection, scheduler, and reconciler to the external
//! map surface and transit data service. All state is owned by one
//! [`ViewStateController`] instance with an explicit lifecycle — no
//! process-wide statics — so multiple map instances and test harnesses can
//! coexist.
//!
//! # Architecture
//!
//! ```text
//! selector UI / host ──ControllerEvent──► ┌──────────────────────┐
//! 1 Hz timer ──tick──────────────────────►│ ViewStateController  │
//!                                         │  SelectionHierarchy  │
//!   spawned fetch tasks ◄──requests───────│  RefreshScheduler    │
//!         │                               │  EntityReconciler    │──► MapSurface
//!         └────FetchOutcome (channel)────►└──────────────────────┘
//! ```
//!
//! Fetches run as spawned tasks and report back through an internal channel,
//! so the loop stays responsive while a request is outstanding. The
//! per-kind in-flight gate guarantees at most one request per data kind, so
//! "most recent completion" and "most recently started" coincide and stale
//! responses cannot overwrite fresh ones. Everything else runs on the
//! controller's task; the rendered-entity maps never need a lock.
//!
//! # Driving the loop
//!
//! Hosts that own a runtime hand the controller an event channel and call
//! [`ViewStateController::run`]. Hosts with their own event loop (a GUI or
//! wasm embedding) call [`ViewStateController::start`] once, then forward
//! events to [`on_event`](ViewStateController::on_event), ticks to
//! [`on_tick`](ViewStateController::on_tick), and drain completed fetches
//! with [`pump_fetches`](ViewStateController::pump_fetches).

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::geo::LatLon;
use crate::model::{sort_route_ids, CityInfo, StopSnapshot, VehiclePositionsResult};
use crate::reconcile::EntityReconciler;
use crate::scheduler::{
    stops_allowed, FetchKind, RefreshScheduler, Trigger, DEFAULT_INTERVAL_SECONDS,
};
use crate::selection::{Selection, SelectionChange, SelectionHierarchy};
use crate::service::{ServiceError, TransitDataService};
use crate::store::SelectionStore;
use crate::surface::MapSurface;

/// Events fed into the controller by the host (selector UI, map gestures).
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// The map viewport settled after a pan or zoom.
    ViewportSettled,
    /// A country was chosen in the selector.
    SelectCountry(String),
    /// A dataset was chosen in the selector.
    SelectDataset(String),
    /// A route checkbox was toggled.
    ToggleRoute {
        /// The route id.
        route_id: String,
        /// Checked or unchecked.
        selected: bool,
    },
    /// The user asked for an immediate refresh.
    ManualRefresh,
    /// A selector overlay opened; map gestures are suppressed.
    OverlayOpened,
    /// The selector overlay closed; map gestures resume.
    OverlayClosed,
}

/// Completed fetch, delivered back into the control loop.
#[derive(Debug)]
enum FetchOutcome {
    Vehicles(Result<VehiclePositionsResult, ServiceError>),
    Stops(Result<Vec<StopSnapshot>, ServiceError>),
}

/// Controller tuning knobs.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Refresh countdown interval in seconds.
    pub interval_seconds: u32,
    /// Zoom applied when recentering on a freshly selected dataset.
    pub dataset_zoom: u8,
    /// View used when no selection could be restored.
    pub fallback_center: LatLon,
    /// Zoom for the fallback view.
    pub fallback_zoom: u8,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            dataset_zoom: 12,
            // Rome, like the reference deployment.
            fallback_center: LatLon::new(41.9028, 12.4964),
            fallback_zoom: 12,
        }
    }
}

/// The top-level control loop. See the module docs.
pub struct ViewStateController<S: MapSurface, P: SelectionStore> {
    surface: S,
    service: Arc<dyn TransitDataService>,
    hierarchy: SelectionHierarchy<P>,
    scheduler: RefreshScheduler,
    reconciler: EntityReconciler,
    config: ControllerConfig,

    /// Option lists backing the selector UI.
    countries: Vec<String>,
    cities: Vec<CityInfo>,
    available_routes: Vec<String>,

    /// Zoom at the last settle, for detecting stop-gate crossings.
    last_zoom: u8,

    fetch_tx: mpsc::UnboundedSender<FetchOutcome>,
    fetch_rx: Option<mpsc::UnboundedReceiver<FetchOutcome>>,
}

impl<S: MapSurface, P: SelectionStore> ViewStateController<S, P> {
    /// Create a controller over the given collaborators.
    pub fn new(
        surface: S,
        service: Arc<dyn TransitDataService>,
        store: P,
        config: ControllerConfig,
    ) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let last_zoom = surface.zoom();
        Self {
            surface,
            service,
            hierarchy: SelectionHierarchy::new(store),
            scheduler: RefreshScheduler::new(config.interval_seconds),
            reconciler: EntityReconciler::new(),
            config,
            countries: Vec::new(),
            cities: Vec::new(),
            available_routes: Vec::new(),
            last_zoom,
            fetch_tx,
            fetch_rx: Some(fetch_rx),
        }
    }

    /// Load option lists and restore the persisted selection.
    ///
    /// Restoration walks country, then dataset, then routes, because each
    /// level's option list depends on its parent. A persisted id that no
    /// longer appears in the freshly fetched list is dropped silently and
    /// that level falls back to "none selected".
    pub async fn start(&mut self) {
        match self.service.list_countries().await {
            Ok(countries) => self.countries = countries,
            Err(e) => warn!(error = %e, "Country list fetch failed"),
        }

        let mut restored_view = false;
        if let Some(country) = self.hierarchy.persisted_country() {
            if self.countries.contains(&country) {
                self.hierarchy.restore_country(country.clone());
                self.load_cities(&country).await;
                restored_view = self.restore_dataset_level().await;
            } else {
                debug!(country = %country, "Persisted country no longer available, dropping");
                self.hierarchy.drop_persisted_country();
            }
        }

        if !restored_view {
            self.surface
                .set_view(self.config.fallback_center, self.config.fallback_zoom);
            self.last_zoom = self.config.fallback_zoom;
        }
        info!(
            countries = self.countries.len(),
            restored = restored_view,
            "Controller started"
        );
    }

    async fn restore_dataset_level(&mut self) -> bool {
        let Some(dataset_id) = self.hierarchy.persisted_dataset() else {
            return false;
        };
        if self.cities.iter().any(|city| city.id == dataset_id) {
            self.hierarchy.restore_dataset(dataset_id);
            self.on_dataset_changed(true).await;
            true
        } else {
            debug!(dataset = %dataset_id, "Persisted dataset no longer available, dropping");
            self.hierarchy.drop_persisted_dataset();
            false
        }
    }

    /// Run the control loop until the token is cancelled, then tear down
    /// all rendered visuals.
    pub async fn run(
        mut self,
        mut events: mpsc::UnboundedReceiver<ControllerEvent>,
        shutdown: CancellationToken,
    ) {
        self.start().await;

        let Some(mut fetch_rx) = self.fetch_rx.take() else {
            warn!("Controller already running");
            return;
        };
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(1));

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => self.on_tick().await,
                Some(event) = events.recv() => self.on_event(event).await,
                Some(outcome) = fetch_rx.recv() => self.on_fetch_outcome(outcome).await,
            }
        }

        self.reconciler.teardown(&mut self.surface);
        info!("Controller stopped");
    }

    /// Advance the refresh countdown one second.
    pub async fn on_tick(&mut self) {
        if self.scheduler.tick() {
            self.trigger_refresh(Trigger::Countdown).await;
        }
    }

    /// Handle one host event.
    pub async fn on_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::ViewportSettled => self.on_viewport_settled().await,
            ControllerEvent::SelectCountry(country) => self.on_select_country(country).await,
            ControllerEvent::SelectDataset(dataset_id) => {
                self.on_select_dataset(dataset_id).await
            }
            ControllerEvent::ToggleRoute { route_id, selected } => {
                if self.hierarchy.toggle_route(&route_id, selected) == SelectionChange::Routes {
                    self.trigger_refresh(Trigger::SelectionChanged).await;
                }
            }
            ControllerEvent::ManualRefresh => {
                self.scheduler.reset_countdown();
                self.trigger_refresh(Trigger::Manual).await;
            }
            ControllerEvent::OverlayOpened => self.surface.set_interactive(false),
            ControllerEvent::OverlayClosed => self.surface.set_interactive(true),
        }
    }

    /// Drain and apply every fetch outcome that has already completed.
    ///
    /// Only needed by hosts driving the controller manually; `run` does
    /// this as part of its select loop.
    pub async fn pump_fetches(&mut self) {
        loop {
            let outcome = match self.fetch_rx.as_mut().and_then(|rx| rx.try_recv().ok()) {
                Some(outcome) => outcome,
                None => break,
            };
            self.on_fetch_outcome(outcome).await;
        }
    }

    async fn on_viewport_settled(&mut self) {
        let zoom = self.surface.zoom();
        if stops_allowed(self.last_zoom) && !stops_allowed(zoom) {
            // Crossing below the gate clears stops immediately, without
            // waiting for any network round-trip.
            let removed = self.reconciler.clear_stops(&mut self.surface);
            debug!(removed, zoom, "Stop layer suppressed below zoom gate");
        }
        self.last_zoom = zoom;
        self.trigger_refresh(Trigger::ViewportSettled).await;
    }

    async fn on_select_country(&mut self, country: String) {
        self.hierarchy.select_country(&country);
        // The old dataset's entities are meaningless under the new country.
        self.reconciler.teardown(&mut self.surface);
        self.available_routes.clear();
        self.load_cities(&country).await;
    }

    async fn on_select_dataset(&mut self, dataset_id: String) {
        if self.hierarchy.select_dataset(&dataset_id) != SelectionChange::Dataset {
            return;
        }
        self.reconciler.teardown(&mut self.surface);
        self.on_dataset_changed(false).await;
    }

    async fn load_cities(&mut self, country: &str) {
        match self.service.list_cities(country).await {
            Ok(cities) => self.cities = cities,
            Err(e) => {
                warn!(country = %country, error = %e, "City list fetch failed");
                self.cities = Vec::new();
            }
        }
    }

    /// Dataset-change work: route info, selector repopulation, persisted
    /// route re-application, recentering, and an initial refresh.
    ///
    /// `restoring` keeps the persisted route set; on a fresh user selection
    /// the cascade has already cleared it.
    async fn on_dataset_changed(&mut self, restoring: bool) {
        let Some(dataset_id) = self.hierarchy.selection().dataset_id.clone() else {
            return;
        };

        match self.service.route_info(&dataset_id).await {
            Ok(info) => {
                let mut route_ids = info.route_ids.clone();
                sort_route_ids(&mut route_ids);
                self.available_routes = route_ids;

                if restoring {
                    let surviving: BTreeSet<String> = self
                        .hierarchy
                        .persisted_routes()
                        .into_iter()
                        .filter(|id| self.available_routes.contains(id))
                        .collect();
                    self.hierarchy.restore_routes(surviving);
                }

                let center = info.bounding_box().center();
                self.surface.set_view(center, self.config.dataset_zoom);
                self.last_zoom = self.config.dataset_zoom;
                info!(
                    dataset = %dataset_id,
                    routes = self.available_routes.len(),
                    center = %center,
                    "Dataset ready"
                );
            }
            Err(e) => warn!(dataset = %dataset_id, error = %e, "Route info fetch failed"),
        }

        self.trigger_refresh(Trigger::SelectionChanged).await;
    }

    /// Issue the fetches a trigger calls for. Without a selected dataset
    /// this is a no-op, not an error.
    async fn trigger_refresh(&mut self, trigger: Trigger) {
        let Some(dataset_id) = self.hierarchy.selection().dataset_id.clone() else {
            return;
        };
        debug!(?trigger, dataset = %dataset_id, "Refresh triggered");

        self.request_fetch(FetchKind::Vehicles, &dataset_id);
        if stops_allowed(self.surface.zoom()) {
            self.request_fetch(FetchKind::Stops, &dataset_id);
        }
    }

    fn request_fetch(&mut self, kind: FetchKind, dataset_id: &str) {
        if !self.scheduler.try_begin(kind) {
            debug!(kind = kind.as_str(), "Fetch in flight, trigger coalesced");
            return;
        }

        let service = Arc::clone(&self.service);
        let tx = self.fetch_tx.clone();
        let dataset_id = dataset_id.to_string();
        let viewport = self.surface.viewport();
        let route_ids: Vec<String> = self
            .hierarchy
            .selection()
            .route_ids
            .iter()
            .cloned()
            .collect();

        tokio::spawn(async move {
            let outcome = match kind {
                FetchKind::Vehicles => FetchOutcome::Vehicles(
                    service
                        .vehicle_positions(&dataset_id, viewport, &route_ids)
                        .await,
                ),
                FetchKind::Stops => FetchOutcome::Stops(
                    service.stops_info(&dataset_id, viewport, &route_ids).await,
                ),
            };
            // The controller dropping mid-flight is a normal shutdown race.
            let _ = tx.send(outcome);
        });
    }

    async fn on_fetch_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Vehicles(result) => {
                let owed = self.scheduler.finish(FetchKind::Vehicles);
                match result {
                    Ok(VehiclePositionsResult::NoDataYet) => {
                        self.scheduler.reset_countdown();
                        debug!("Vehicle feed has no data yet");
                    }
                    Ok(VehiclePositionsResult::Feed(feed)) => {
                        self.scheduler.reset_countdown();
                        let applied =
                            self.reconciler.reconcile_vehicles(&mut self.surface, &feed.vehicles);
                        debug!(
                            vehicles = feed.vehicles.len(),
                            created = applied.created,
                            updated = applied.updated,
                            removed = applied.removed,
                            feed_updated = %feed.last_update_display(),
                            "Vehicles reconciled"
                        );
                    }
                    Err(e) => warn!(error = %e, "Vehicle fetch failed"),
                }
                if owed {
                    if let Some(dataset_id) = self.hierarchy.selection().dataset_id.clone() {
                        self.request_fetch(FetchKind::Vehicles, &dataset_id);
                    }
                }
            }
            FetchOutcome::Stops(result) => {
                let owed = self.scheduler.finish(FetchKind::Stops);
                match result {
                    Ok(stops) => {
                        // Zoom may have crossed below the gate while the
                        // fetch was in flight; a late result must not
                        // resurrect the layer.
                        if stops_allowed(self.surface.zoom()) {
                            let applied =
                                self.reconciler.replace_stops(&mut self.surface, &stops);
                            self.scheduler.reset_countdown();
                            debug!(
                                stops = stops.len(),
                                removed = applied.removed,
                                "Stops replaced"
                            );
                        } else {
                            debug!("Discarding stop fetch completed below zoom gate");
                        }
                    }
                    Err(e) => warn!(error = %e, "Stop fetch failed"),
                }
                if owed && stops_allowed(self.surface.zoom()) {
                    if let Some(dataset_id) = self.hierarchy.selection().dataset_id.clone() {
                        self.request_fetch(FetchKind::Stops, &dataset_id);
                    }
                }
            }
        }
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        self.hierarchy.selection()
    }

    /// Countries backing the country selector.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Datasets backing the city selector for the selected country.
    pub fn cities(&self) -> &[CityInfo] {
        &self.cities
    }

    /// Route ids backing the route selector, in display order.
    pub fn available_routes(&self) -> &[String] {
        &self.available_routes
    }

    /// The refresh scheduler (countdown and in-flight state).
    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    /// The entity reconciler (rendered-entity bookkeeping).
    pub fn reconciler(&self) -> &EntityReconciler {
        &self.reconciler
    }

    /// The map surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access, for hosts that move the view themselves.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
