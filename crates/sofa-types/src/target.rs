//! Focus target model: regions, toolbar controls, and target handles.

use std::fmt;

/// A partition of the screen with its own focus ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Toolbar,
    Video,
    Embedded,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toolbar => write!(f, "toolbar"),
            Self::Video => write!(f, "video"),
            Self::Embedded => write!(f, "embedded"),
        }
    }
}

/// The controls of the toolbar, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarControl {
    /// Text field holding the current address.
    AddressInput,
    /// Submits the address field.
    Save,
    /// Reloads the current media and restores its position.
    Reload,
    /// Returns the embedded region to the home address.
    Back,
}

impl ToolbarControl {
    /// Document order.
    pub const ALL: [ToolbarControl; 4] = [
        ToolbarControl::AddressInput,
        ToolbarControl::Save,
        ToolbarControl::Reload,
        ToolbarControl::Back,
    ];
}

/// Opaque handle to an interactive element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetId {
    /// A toolbar control.
    Control(ToolbarControl),
    /// The video surface.
    VideoSurface,
    /// Root container of the embedded sub-document, as seen from the
    /// top-level document.
    Frame,
    /// An element inside the embedded sub-document, named by the
    /// sub-document adapter.
    Element(String),
}

impl TargetId {
    /// Region the target belongs to.
    pub fn region(&self) -> Region {
        match self {
            Self::Control(_) => Region::Toolbar,
            Self::VideoSurface => Region::Video,
            Self::Frame | Self::Element(_) => Region::Embedded,
        }
    }

    /// Shorthand for an embedded element handle.
    pub fn element(name: impl Into<String>) -> Self {
        Self::Element(name.into())
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Control(c) => write!(f, "toolbar:{c:?}"),
            Self::VideoSurface => write!(f, "video"),
            Self::Frame => write!(f, "frame"),
            Self::Element(name) => write!(f, "element:{name}"),
        }
    }
}

/// A rendered element as enumerated by the platform at query time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusableTarget {
    pub id: TargetId,
    /// Occupies non-zero screen area.
    pub visible: bool,
    /// Accepts interaction.
    pub enabled: bool,
}

impl FocusableTarget {
    /// A visible, enabled target.
    pub fn new(id: TargetId) -> Self {
        Self {
            id,
            visible: true,
            enabled: true,
        }
    }

    /// Eligible to receive directional focus.
    pub fn is_focusable(&self) -> bool {
        self.visible && self.enabled
    }
}
