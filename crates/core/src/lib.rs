//! Core logic for VOSCE, a virtual clinical-interview simulator.
//!
//! A medical student questions a virtual patient and receives a heuristic
//! coverage score at the end. The patient is played by an LLM backend when a
//! credential is configured, and by a deterministic keyword table otherwise.
//! This crate owns the session state machine, the dialogue turn protocol and
//! the scoring rubric; rendering and configuration live in the service that
//! embeds it.

pub mod backend;
pub mod case;
pub mod engine;
pub mod fallback;
pub mod scorer;
pub mod session;
pub mod transcript;
