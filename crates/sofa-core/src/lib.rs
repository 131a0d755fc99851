//! SOFA core.
//!
//! Platform-agnostic engine for a remote-controlled media front end: asset
//! classification, directional focus, region state, the resume cache and
//! the session that ties them to a [`platform::Shell`]. This crate has no
//! platform dependencies.

// Re-exports from sofa-types (foundation types).
pub use sofa_types::config;
pub use sofa_types::error;
pub use sofa_types::event;
pub use sofa_types::input;
pub use sofa_types::target;

pub use sofa_platform as platform;

pub mod address;
pub mod classify;
pub mod focus;
pub mod playback;
pub mod prefs;
pub mod region;
pub mod resume;
pub mod session;

#[cfg(test)]
pub(crate) mod test_utils;

pub use classify::{AssetClassifier, AssetKind, AssetReference};
pub use region::{Dispatch, RegionCoordinator};
pub use session::Session;
