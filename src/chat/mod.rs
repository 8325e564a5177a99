//! Chat bounded context: users, conversations, memberships, messages, and
//! attachments.
//!
//! Records live in a document store whose wire shapes are mapped to
//! immutable domain values by [`adapters::mapping`]. Services orchestrate
//! the store and file-storage ports.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
