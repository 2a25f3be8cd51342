//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one backend resource.
//!
//! | Module | Route | Description |
//! |--------|-------|-------------|
//! | `recommendations` | `GET /recommendations/{user_id}` | Personalised cafe list |
//! | `cafes` | `GET /cafes/{cafe_id}` | Facilities, location and rating of one cafe |

pub mod cafes;
pub mod recommendations;

pub use cafes::CafesApi;
pub use recommendations::RecommendationsApi;
