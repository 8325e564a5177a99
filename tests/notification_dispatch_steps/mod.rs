//! Step definitions for notification dispatch scenarios.

mod given;
mod then;
mod when;
pub mod world;
