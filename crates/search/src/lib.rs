//! Facility matching for cafe filtering.
//!
//! This crate provides:
//! - Parsing of comma-separated facility strings
//! - A normalised set of required facilities
//! - Case-insensitive substring matching of requirements against a cafe
//! - Vocabulary extraction for building filter menus

mod facility;
mod vocabulary;

pub use facility::{matches_facilities, parse_facilities, FacilityMatcher, FacilitySet};
pub use vocabulary::facility_vocabulary;
