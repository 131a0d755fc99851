//! Inbound events delivered by the platform's media and document layers.
//!
//! Events are discrete notifications, never awaited. Address-carrying
//! events name the asset they were raised for so handlers can drop the ones
//! that refer to an asset that is no longer current.

/// An event from the media engine or the embedded frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// Media metadata is available; `duration` is in seconds.
    MetadataReady { address: String, duration: f64 },
    /// Playback position advanced to `offset` seconds.
    TimeAdvanced { address: String, offset: f64 },
    /// Playback started or resumed.
    PlayStarted,
    /// Playback paused.
    Paused,
    /// The video surface lost input focus.
    VideoFocusLost,
    /// The embedded frame finished loading `address`.
    LoadCompleted { address: String },
}

