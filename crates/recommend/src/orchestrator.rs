//! The recommendation view state machine.
//!
//! A load runs in three steps:
//!
//! 1. [`RecommendationOrchestrator::begin_load`] checks the session and
//!    issues a [`LoadTicket`] carrying a fresh generation number.
//! 2. [`LoadTicket::fetch`] does the list and detail I/O without touching
//!    the view. [`LoadTicket::locate`] starts the geolocation request as a
//!    separate task; nothing waits on it.
//! 3. [`RecommendationOrchestrator::apply`] installs the outcome, unless a
//!    newer ticket has been issued in the meantime.
//!
//! The position arrives on its own schedule through
//! [`RecommendationOrchestrator::location_resolved`], which recomputes
//! distances from the cached cafe coordinates.
//!
//! [`RecommendationOrchestrator::load`] chains the three steps and hands back
//! the [`PendingLocation`]; [`RecommendationOrchestrator::load_with_location`]
//! also waits for it.

use crate::enrich::{assemble, settle_all, Settled};
use crate::error::ViewError;
use crate::sources::{LocateError, Sources};
use kopi_api_client::{ApiError, CafeDetail, ClientConfig, RecommendationRecord};
use kopi_geo::Coordinate;
use kopi_ranking::{locate_all, CafeEntry, FilterEditor, RankingEngine, DEFAULT_TOP_N};
use serde::Serialize;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Tunables for a recommendation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Bounded wait for each upstream call, client retries included.
    ///
    /// Size it with [`ClientConfig::call_budget`]; a shorter bound caps retries.
    pub timeout: Duration,
    /// Number of cafes shown
    pub top_n: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            timeout: ClientConfig::default().call_budget(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Where the user is, as far as the view knows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "coordinate", rename_all = "snake_case")]
pub enum LocationState {
    /// Not requested yet, or the request is still in flight
    #[default]
    Pending,
    /// A usable position
    Known(Coordinate),
    /// The request failed; distance sorting is disabled
    Unavailable,
}

impl LocationState {
    fn from_result(result: Result<Coordinate, LocateError>) -> Self {
        match result {
            Ok(coordinate) if coordinate.is_finite() => Self::Known(coordinate),
            Ok(coordinate) => {
                warn!(?coordinate, "Geolocation returned an unusable position");
                Self::Unavailable
            }
            Err(err) => {
                warn!(error = %err, "Geolocation failed, distances unavailable");
                Self::Unavailable
            }
        }
    }

    /// The position, when known.
    #[must_use]
    pub fn coordinate(&self) -> Option<&Coordinate> {
        match self {
            Self::Known(coordinate) => Some(coordinate),
            Self::Pending | Self::Unavailable => None,
        }
    }

    /// True when a usable position is available.
    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

/// Lifecycle of the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    /// Nothing loaded yet
    #[default]
    Idle,
    /// A ticket is outstanding
    Loading,
    /// Entries are available
    Ready,
    /// The last load ended in a [`ViewError`]
    Failed,
}

/// Permission to run one load, tagged with its generation.
#[derive(Clone)]
pub struct LoadTicket {
    generation: u64,
    user_id: String,
    sources: Sources,
    limit: Duration,
}

impl LoadTicket {
    /// Generation this ticket was issued for.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// User the load is for.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Starts the geolocation request in the background.
    ///
    /// The request is bounded by the same limit as the fetch; running out of
    /// time resolves to [`LocateError::Unavailable`].
    #[must_use]
    pub fn locate(&self) -> PendingLocation {
        let location = self.sources.location.clone();
        let limit = self.limit;
        let handle = tokio::spawn(async move {
            timeout(limit, location.locate())
                .await
                .unwrap_or_else(|_| Err(LocateError::Unavailable(format!("timed out after {}ms", limit.as_millis()))))
        });
        PendingLocation { handle }
    }

    /// Fetches the list and enriches every entry.
    ///
    /// Never fails: a list failure is carried in the outcome and surfaces
    /// from [`RecommendationOrchestrator::apply`].
    pub async fn fetch(self) -> LoadOutcome {
        let Self {
            generation,
            user_id,
            sources,
            limit,
        } = self;

        let list_then_enrich = async {
            let records = match timeout(limit, sources.recommendations.recommendations(&user_id)).await {
                Ok(Ok(records)) => records,
                Ok(Err(err)) => return Err(err),
                Err(_) => return Err(ApiError::Timeout(limit)),
            };
            debug!(generation, count = records.len(), "Recommendation list arrived, enriching");

            let details = settle_all(
                records.iter().map(|r| sources.details.cafe_detail(&r.cafe_id)),
                limit,
            )
            .await;
            Ok((records, details))
        };

        let fetched = list_then_enrich.await;

        LoadOutcome {
            generation,
            user_id,
            fetched,
        }
    }
}

/// A geolocation request running in the background.
#[derive(Debug)]
pub struct PendingLocation {
    handle: JoinHandle<Result<Coordinate, LocateError>>,
}

impl PendingLocation {
    /// True once the request has settled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the request to settle.
    pub async fn resolved(self) -> Result<Coordinate, LocateError> {
        self.handle
            .await
            .unwrap_or_else(|err| Err(LocateError::Unavailable(format!("geolocation task failed: {err}"))))
    }
}

/// Everything a finished fetch produced.
#[derive(Debug)]
pub struct LoadOutcome {
    generation: u64,
    user_id: String,
    fetched: Result<(Vec<RecommendationRecord>, Vec<Settled<CafeDetail>>), ApiError>,
}

impl LoadOutcome {
    /// Generation of the ticket that produced this outcome.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Folds a new location result into the current state.
///
/// A failed or pending result never replaces a known position.
fn merge_location(current: LocationState, next: LocationState) -> LocationState {
    match (current, next) {
        (LocationState::Known(_), LocationState::Unavailable | LocationState::Pending) => current,
        (_, next) => next,
    }
}

/// Drives the recommendation view: session check, fetch, enrichment,
/// location, filters and ranking.
pub struct RecommendationOrchestrator {
    sources: Sources,
    config: OrchestratorConfig,
    engine: RankingEngine,
    editor: FilterEditor,
    generation: u64,
    status: ViewStatus,
    user_id: Option<String>,
    records: Vec<RecommendationRecord>,
    details: Vec<CafeDetail>,
    entries: Vec<CafeEntry>,
    degraded: usize,
    location: LocationState,
}

impl RecommendationOrchestrator {
    /// Creates an idle view.
    #[must_use]
    pub fn new(sources: Sources, config: OrchestratorConfig) -> Self {
        Self {
            sources,
            engine: RankingEngine::new(config.top_n),
            config,
            editor: FilterEditor::default(),
            generation: 0,
            status: ViewStatus::Idle,
            user_id: None,
            records: Vec::new(),
            details: Vec::new(),
            entries: Vec::new(),
            degraded: 0,
            location: LocationState::Pending,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> ViewStatus {
        self.status
    }

    /// Current location knowledge.
    #[must_use]
    pub fn location(&self) -> LocationState {
        self.location
    }

    /// User whose recommendations are loaded.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Latest issued generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Every enriched entry, in list order and unfiltered.
    #[must_use]
    pub fn entries(&self) -> &[CafeEntry] {
        &self.entries
    }

    /// Number of entries whose detail lookup failed in the last load.
    #[must_use]
    pub fn degraded_count(&self) -> usize {
        self.degraded
    }

    /// The filter state.
    #[must_use]
    pub fn editor(&self) -> &FilterEditor {
        &self.editor
    }

    /// Mutable filter state; ranking follows the applied selection only.
    pub fn editor_mut(&mut self) -> &mut FilterEditor {
        &mut self.editor
    }

    fn fail(&mut self, err: ViewError) -> ViewError {
        self.status = ViewStatus::Failed;
        self.records.clear();
        self.details.clear();
        self.entries.clear();
        self.degraded = 0;
        err
    }

    /// Checks the session and issues a ticket for a new load.
    ///
    /// Any ticket issued earlier becomes stale.
    ///
    /// # Errors
    /// [`ViewError::MissingIdentity`] when nobody is signed in. The view is
    /// cleared and no request is made.
    pub fn begin_load(&mut self) -> Result<LoadTicket, ViewError> {
        self.generation += 1;

        let Some(user_id) = self.sources.identity.current_user() else {
            warn!("No signed-in user, recommendations not loaded");
            self.user_id = None;
            return Err(self.fail(ViewError::MissingIdentity));
        };

        debug!(generation = self.generation, user_id = %user_id, "Starting recommendation load");
        self.status = ViewStatus::Loading;

        Ok(LoadTicket {
            generation: self.generation,
            user_id,
            sources: self.sources.clone(),
            limit: self.config.timeout,
        })
    }

    /// Installs a fetch outcome.
    ///
    /// Returns `Ok(false)` when the outcome belongs to a superseded ticket;
    /// the view is left untouched in that case.
    ///
    /// # Errors
    /// [`ViewError::RecommendationFetch`] when the list could not be fetched.
    pub fn apply(&mut self, outcome: LoadOutcome) -> Result<bool, ViewError> {
        if outcome.generation != self.generation {
            debug!(
                stale = outcome.generation,
                current = self.generation,
                "Discarding stale recommendation result"
            );
            return Ok(false);
        }

        self.user_id = Some(outcome.user_id);

        let (records, settled) = match outcome.fetched {
            Ok(fetched) => fetched,
            Err(err) => {
                warn!(error = %err, "Recommendation list fetch failed");
                return Err(self.fail(ViewError::RecommendationFetch(err)));
            }
        };

        self.degraded = 0;
        self.details = records
            .iter()
            .zip(settled)
            .map(|(record, detail)| {
                if let Settled::Degraded(reason) = &detail {
                    warn!(cafe_id = %record.cafe_id, reason = %reason, "Cafe detail unavailable, using empty detail");
                    self.degraded += 1;
                }
                detail.into_value()
            })
            .collect();
        self.records = records;
        self.rebuild();
        self.status = ViewStatus::Ready;

        info!(
            count = self.entries.len(),
            degraded = self.degraded,
            location_known = self.location.is_known(),
            "Recommendations loaded"
        );
        Ok(true)
    }

    /// Runs a load without waiting for the user's position.
    ///
    /// The view is ready as soon as the list and details are in; distances
    /// stay unavailable until the returned [`PendingLocation`] is passed to
    /// [`location_resolved`](Self::location_resolved).
    ///
    /// # Errors
    /// See [`begin_load`](Self::begin_load) and [`apply`](Self::apply).
    pub async fn load(&mut self) -> Result<PendingLocation, ViewError> {
        let ticket = self.begin_load()?;
        let pending = ticket.locate();
        let outcome = ticket.fetch().await;
        self.apply(outcome)?;
        Ok(pending)
    }

    /// Runs a load, then waits for the position and applies it.
    ///
    /// # Errors
    /// As for [`load`](Self::load).
    pub async fn load_with_location(&mut self) -> Result<(), ViewError> {
        let pending = self.load().await?;
        let result = pending.resolved().await;
        self.location_resolved(result);
        Ok(())
    }

    /// Reloads when the signed-in user differs from the loaded one.
    ///
    /// Returns the pending position request when a reload happened.
    ///
    /// # Errors
    /// As for [`load`](Self::load).
    pub async fn identity_changed(&mut self) -> Result<Option<PendingLocation>, ViewError> {
        let current = self.sources.identity.current_user();
        if current.is_some() && current == self.user_id && self.status == ViewStatus::Ready {
            return Ok(None);
        }
        info!(user_id = ?current, "Session changed, reloading recommendations");
        self.load().await.map(Some)
    }

    /// Applies a geolocation result.
    ///
    /// Distances are recomputed from the cached cafe coordinates whenever
    /// the known position changes; nothing is re-fetched. A failure after a
    /// successful fix keeps that fix. Returns true when distances were
    /// recomputed.
    pub fn location_resolved(&mut self, result: Result<Coordinate, LocateError>) -> bool {
        let next = merge_location(self.location, LocationState::from_result(result));
        let changed = next.coordinate() != self.location.coordinate();
        self.location = next;
        if changed {
            self.rebuild();
            debug!(location_known = self.location.is_known(), "Recomputed distances");
        }
        changed
    }

    fn rebuild(&mut self) {
        let mut entries: Vec<CafeEntry> = self
            .records
            .iter()
            .zip(&self.details)
            .map(|(record, detail)| assemble(record, detail))
            .collect();
        locate_all(&mut entries, self.location.coordinate());
        self.entries = entries;
    }

    /// The top cafes for the applied selection.
    #[must_use]
    pub fn ranked(&self) -> Vec<CafeEntry> {
        self.engine
            .rank(&self.entries, self.editor.applied(), self.location.is_known())
    }

    /// Distinct facility labels across the loaded cafes, for the filter menu.
    #[must_use]
    pub fn facility_vocabulary(&self) -> Vec<String> {
        let lists: Vec<&[String]> = self.entries.iter().map(|e| e.facilities.as_slice()).collect();
        kopi_search::facility_vocabulary(&lists)
    }
}
