//! Platform service traits and std implementations for SOFA.
//!
//! The core engine talks to the outside world only through the traits in
//! [`services`] and [`store`]. [`desktop`] provides an in-process shell used
//! by the desktop harness.

pub mod desktop;
pub mod services;
pub mod store;

pub use desktop::{DesktopShell, FrameContent, ListingDocument};
pub use services::{
    DisplayService, EmbeddedService, FocusService, MediaService, ObservableSubdocument, Shell,
};
pub use store::{FileStore, KeyValueStore, MemoryStore};
