//! Configuration loading and schema definitions
//!
//! Settings shared by the Kopi crates and the `kopi` binary.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
