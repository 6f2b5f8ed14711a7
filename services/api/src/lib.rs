//! VOSCE API Library Crate
//!
//! This library contains the logic for the VOSCE web service: application
//! state, API handlers and routing around the `vosce-core` session
//! controller. The `api` binary is a thin wrapper around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
