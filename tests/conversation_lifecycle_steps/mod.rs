//! Step definitions for conversation lifecycle scenarios.

mod given;
mod then;
mod when;
pub mod world;
