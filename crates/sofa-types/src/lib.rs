//! Foundation types for SOFA.
//!
//! This crate holds the platform-agnostic vocabulary shared by every SOFA
//! crate: logical remote signals and device key maps, the focus target
//! model, inbound surface events, configuration, and the error type.

pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod target;
