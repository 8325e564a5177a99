//! `FlexChat`: chat domain core and push-notification dispatch.
//!
//! This crate provides credential validation, the chat record model with
//! its document-store mapping, and the trigger-side service that turns new
//! messages and calls into topic broadcasts.
//!
//! # Architecture
//!
//! `FlexChat` follows hexagonal architecture principles:
//!
//! - **Domain**: Immutable records and pure rules with no infrastructure
//!   dependencies
//! - **Ports**: Async trait interfaces for the document store, file
//!   storage, and push messaging
//! - **Adapters**: Wire records, mappers, and in-memory or dry-run port
//!   implementations
//!
//! # Modules
//!
//! - [`auth`]: Email and password validation
//! - [`chat`]: Users, conversations, members, messages, and attachments
//! - [`notification`]: Push payloads and the notification dispatcher
//! - [`config`]: Environment-driven process configuration
//! - [`telemetry`]: `tracing` subscriber set-up

pub mod auth;
pub mod chat;
pub mod config;
pub mod notification;
pub mod telemetry;
