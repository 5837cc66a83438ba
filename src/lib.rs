//! Prospect API Library
//!
//! Receives prospect records over HTTP and creates matching customer records
//! in NetSuite through the REST record API, signing each call with OAuth 1.0a
//! token-based authentication.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core business logic.
//! - `integrations`: External service integrations.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and router.
//! - `models`: Inbound prospect and NetSuite customer models.
//! - `netsuite_client`: NetSuite client and prospect submitter.
//! - `prospect`: Prospect → customer mapping.
//! - `signer`: OAuth 1.0a request signing.

pub mod api;
pub mod core;
pub mod integrations;

// Re-export primary modules for shared use in tests and the binary
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod netsuite_client;
pub mod prospect;
pub mod signer;
