//! Platform service traits.

use sofa_types::error::Result;
use sofa_types::target::{FocusableTarget, Region, TargetId};

// ---------------------------------------------------------------------------
// Display service
// ---------------------------------------------------------------------------

/// Region visibility, immersive presentation, and the toolbar's address
/// field.
pub trait DisplayService {
    /// Show or hide a content region.
    fn set_region_visible(&mut self, region: Region, visible: bool) -> Result<()>;

    /// Give the video surface the whole screen and conceal the toolbar.
    fn enter_immersive(&mut self) -> Result<()>;

    /// Leave immersive presentation and surface the toolbar.
    fn exit_immersive(&mut self) -> Result<()>;

    /// Replace the address field's text.
    fn set_address_text(&mut self, text: &str) -> Result<()>;

    /// Current address field text.
    fn address_text(&self) -> String;

    /// Start editing the address field (on-screen keyboard on TVs).
    fn begin_address_edit(&mut self) -> Result<()>;

    /// Show a transient message to the user.
    fn notify(&mut self, message: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Focus service
// ---------------------------------------------------------------------------

/// Focus queries and moves within the top-level document.
pub trait FocusService {
    /// Interactive elements of the top-level document that belong to
    /// `region`, in document order, with their current visibility and
    /// enabled state. For [`Region::Embedded`] this is the frame container
    /// only; elements inside the sub-document come from
    /// [`ObservableSubdocument::targets`].
    fn targets(&self, region: Region) -> Vec<FocusableTarget>;

    /// The element holding input focus in the top-level document. While
    /// focus is anywhere inside the embedded sub-document this is
    /// [`TargetId::Frame`].
    fn focused(&self) -> Option<TargetId>;

    /// Move input focus to a top-level element.
    fn focus(&mut self, target: &TargetId) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Media service
// ---------------------------------------------------------------------------

/// The platform media engine behind the video surface.
pub trait MediaService {
    /// Set the active media address.
    fn load(&mut self, address: &str) -> Result<()>;

    /// Reload the active media from its address.
    fn reload(&mut self) -> Result<()>;

    /// Stop playback and release the active media.
    fn unload(&mut self) -> Result<()>;

    /// Seek to `offset` seconds.
    fn seek(&mut self, offset: f64) -> Result<()>;

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// Whether the media element is paused right now. True with no media.
    fn is_paused(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Embedded frame
// ---------------------------------------------------------------------------

/// The embedded frame that hosts the remote file listing.
pub trait EmbeddedService {
    /// Point the frame at `address`. An empty address shows a blank
    /// document.
    fn navigate(&mut self, address: &str) -> Result<()>;

    /// Try to open the loaded sub-document for introspection. Fails when
    /// the document is cross-origin or not loaded.
    fn probe(&mut self) -> Result<Box<dyn ObservableSubdocument>>;
}

/// A sub-document whose structure can be enumerated and driven.
pub trait ObservableSubdocument {
    /// Current location of the sub-document (changes on in-frame
    /// navigation).
    fn location(&self) -> String;

    /// Interactive elements (links, buttons, fields) in document order.
    fn targets(&self) -> Vec<FocusableTarget>;

    /// The element focused inside the sub-document, or `None` when focus
    /// rests on its root.
    fn active(&self) -> Option<TargetId>;

    /// Focus an element inside the sub-document.
    fn focus(&mut self, target: &TargetId) -> Result<()>;

    /// Synthesize an activation (click) on an element.
    fn activate(&mut self, target: &TargetId) -> Result<()>;

    /// The raw `href` of a link element, if `target` is a link.
    fn link_href(&self, target: &TargetId) -> Option<String>;
}

// ---------------------------------------------------------------------------
// Unified shell trait
// ---------------------------------------------------------------------------

/// Aggregate trait providing every service the session drives.
pub trait Shell: DisplayService + FocusService + MediaService + EmbeddedService {}
