//! Recommendation view orchestration.
//!
//! Ties the upstream collaborators (session, recommendation list, cafe
//! details, geolocation) to the ranking engine:
//!
//! - [`sources`]: collaborator traits and their HTTP and fixed-value implementations
//! - [`enrich`]: all-settled detail gathering and entry assembly
//! - [`orchestrator`]: generation-checked loads, location policy, filter state

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod enrich;
pub mod error;
pub mod orchestrator;
pub mod sources;

pub use enrich::Settled;
pub use error::ViewError;
pub use orchestrator::{
    LoadOutcome, LoadTicket, LocationState, OrchestratorConfig, PendingLocation, RecommendationOrchestrator,
    ViewStatus,
};
pub use sources::{
    CafeDetailSource, FixedLocation, GeolocationSource, LocateError, RecommendationSource, SessionIdentity,
    Sources, StaticIdentity,
};
