//! In-process desktop shell.
//!
//! Keeps the top-level document, the media element and the embedded frame
//! as plain state and logs every outbound call. The frame content is
//! supplied by the caller, either as a list of links (an introspectable
//! listing) or as an opaque document that refuses probing.
//!
//! Like a browser, the shell raises media events of its own and follows
//! activated listing links; the host drains both with
//! [`DesktopShell::take_events`] and [`DesktopShell::take_followed_link`].

use std::cell::RefCell;
use std::rc::Rc;

use sofa_types::error::{Result, SofaError};
use sofa_types::event::SurfaceEvent;
use sofa_types::target::{FocusableTarget, Region, TargetId, ToolbarControl};

use crate::services::{
    DisplayService, EmbeddedService, FocusService, MediaService, ObservableSubdocument, Shell,
};

/// What the embedded frame serves once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameContent {
    /// A same-origin listing made of these link `href`s.
    Listing(Vec<String>),
    /// A cross-origin document.
    Opaque,
}

/// Desktop implementation of [`Shell`].
#[derive(Debug)]
pub struct DesktopShell {
    video_visible: bool,
    embedded_visible: bool,
    immersive: bool,
    address_text: String,
    editing: bool,
    focused: Option<TargetId>,
    notices: Vec<String>,
    media_source: Option<String>,
    paused: bool,
    position: f64,
    frame_address: String,
    frame_content: FrameContent,
    events: Vec<SurfaceEvent>,
    /// Raw `href` of the last link activated in the listing.
    followed: Rc<RefCell<Option<String>>>,
}

impl DesktopShell {
    pub fn new() -> Self {
        Self {
            video_visible: false,
            embedded_visible: true,
            immersive: false,
            address_text: String::new(),
            editing: false,
            focused: None,
            notices: Vec::new(),
            media_source: None,
            paused: true,
            position: 0.0,
            frame_address: String::new(),
            frame_content: FrameContent::Listing(Vec::new()),
            events: Vec::new(),
            followed: Rc::new(RefCell::new(None)),
        }
    }

    /// Replace what the frame serves on its next probe.
    pub fn set_frame_content(&mut self, content: FrameContent) {
        self.frame_content = content;
    }

    pub fn frame_address(&self) -> &str {
        &self.frame_address
    }

    pub fn media_source(&self) -> Option<&str> {
        self.media_source.as_deref()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_immersive(&self) -> bool {
        self.immersive
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_visible(&self, region: Region) -> bool {
        match region {
            Region::Toolbar => !self.immersive,
            Region::Video => self.video_visible,
            Region::Embedded => self.embedded_visible,
        }
    }

    /// Messages shown to the user so far.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Media events raised since the last call.
    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    /// The `href` of a listing link activated since the last call. The
    /// host resolves it against [`Self::frame_address`] and navigates.
    pub fn take_followed_link(&mut self) -> Option<String> {
        self.followed.borrow_mut().take()
    }
}

impl Default for DesktopShell {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayService for DesktopShell {
    fn set_region_visible(&mut self, region: Region, visible: bool) -> Result<()> {
        match region {
            Region::Video => self.video_visible = visible,
            Region::Embedded => self.embedded_visible = visible,
            Region::Toolbar => {
                return Err(SofaError::Display(
                    "toolbar visibility follows immersive presentation".into(),
                ));
            },
        }
        log::debug!("{region} region {}", if visible { "shown" } else { "hidden" });
        Ok(())
    }

    fn enter_immersive(&mut self) -> Result<()> {
        self.immersive = true;
        log::info!("Immersive presentation on");
        Ok(())
    }

    fn exit_immersive(&mut self) -> Result<()> {
        self.immersive = false;
        log::info!("Immersive presentation off");
        Ok(())
    }

    fn set_address_text(&mut self, text: &str) -> Result<()> {
        self.address_text = text.to_string();
        self.editing = false;
        Ok(())
    }

    fn address_text(&self) -> String {
        self.address_text.clone()
    }

    fn begin_address_edit(&mut self) -> Result<()> {
        self.editing = true;
        log::info!("Editing address: {}", self.address_text);
        Ok(())
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        log::info!("Notice: {message}");
        self.notices.push(message.to_string());
        Ok(())
    }
}

impl FocusService for DesktopShell {
    fn targets(&self, region: Region) -> Vec<FocusableTarget> {
        match region {
            Region::Toolbar => ToolbarControl::ALL
                .iter()
                .map(|&c| FocusableTarget {
                    id: TargetId::Control(c),
                    visible: !self.immersive,
                    enabled: true,
                })
                .collect(),
            Region::Video => vec![FocusableTarget {
                id: TargetId::VideoSurface,
                visible: self.video_visible,
                enabled: self.media_source.is_some(),
            }],
            Region::Embedded => vec![FocusableTarget {
                id: TargetId::Frame,
                visible: self.embedded_visible,
                enabled: true,
            }],
        }
    }

    fn focused(&self) -> Option<TargetId> {
        self.focused.clone()
    }

    fn focus(&mut self, target: &TargetId) -> Result<()> {
        if let TargetId::Element(_) = target {
            return Err(SofaError::Display(format!(
                "{target} lives inside the sub-document"
            )));
        }
        log::debug!("Focus -> {target}");
        self.focused = Some(target.clone());
        Ok(())
    }
}

impl MediaService for DesktopShell {
    fn load(&mut self, address: &str) -> Result<()> {
        log::info!("Media load {address}");
        self.media_source = Some(address.to_string());
        self.paused = true;
        self.position = 0.0;
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        let source = self
            .media_source
            .clone()
            .ok_or_else(|| SofaError::Media("nothing to reload".into()))?;
        self.load(&source)
    }

    fn unload(&mut self) -> Result<()> {
        if let Some(source) = self.media_source.take() {
            log::info!("Media unload {source}");
        }
        self.paused = true;
        self.position = 0.0;
        Ok(())
    }

    fn seek(&mut self, offset: f64) -> Result<()> {
        if self.media_source.is_none() {
            return Err(SofaError::Media("seek without media".into()));
        }
        log::info!("Media seek {offset}s");
        self.position = offset;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.media_source.is_none() {
            return Err(SofaError::Media("play without media".into()));
        }
        if self.paused {
            self.paused = false;
            self.events.push(SurfaceEvent::PlayStarted);
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        if !self.paused {
            self.paused = true;
            self.events.push(SurfaceEvent::Paused);
        }
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

impl EmbeddedService for DesktopShell {
    fn navigate(&mut self, address: &str) -> Result<()> {
        log::info!(
            "Frame navigate {}",
            if address.is_empty() { "about:blank" } else { address }
        );
        self.frame_address = address.to_string();
        Ok(())
    }

    fn probe(&mut self) -> Result<Box<dyn ObservableSubdocument>> {
        match &self.frame_content {
            FrameContent::Opaque => Err(SofaError::Subdocument(format!(
                "cross-origin document at {}",
                self.frame_address
            ))),
            FrameContent::Listing(_) if self.frame_address.is_empty() => {
                Err(SofaError::Subdocument("frame is blank".into()))
            },
            FrameContent::Listing(links) => Ok(Box::new(ListingDocument {
                followed: Rc::clone(&self.followed),
                ..ListingDocument::new(&self.frame_address, links.clone())
            })),
        }
    }
}

impl Shell for DesktopShell {}

// ---------------------------------------------------------------------------
// Listing document
// ---------------------------------------------------------------------------

/// A same-origin listing made of links, one focusable element per link.
#[derive(Debug, Clone)]
pub struct ListingDocument {
    location: String,
    links: Vec<String>,
    active: Option<usize>,
    followed: Rc<RefCell<Option<String>>>,
}

impl ListingDocument {
    pub fn new(location: &str, links: Vec<String>) -> Self {
        Self {
            location: location.to_string(),
            links,
            active: None,
            followed: Rc::new(RefCell::new(None)),
        }
    }

    fn element_id(index: usize) -> TargetId {
        TargetId::Element(format!("link-{index}"))
    }

    fn index_of(&self, target: &TargetId) -> Option<usize> {
        let TargetId::Element(name) = target else {
            return None;
        };
        let index = name.strip_prefix("link-")?.parse::<usize>().ok()?;
        (index < self.links.len()).then_some(index)
    }
}

impl ObservableSubdocument for ListingDocument {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn targets(&self) -> Vec<FocusableTarget> {
        (0..self.links.len())
            .map(|i| FocusableTarget::new(Self::element_id(i)))
            .collect()
    }

    fn active(&self) -> Option<TargetId> {
        self.active.map(Self::element_id)
    }

    fn focus(&mut self, target: &TargetId) -> Result<()> {
        let index = self
            .index_of(target)
            .ok_or_else(|| SofaError::Subdocument(format!("no element {target}")))?;
        self.active = Some(index);
        Ok(())
    }

    fn activate(&mut self, target: &TargetId) -> Result<()> {
        let index = self
            .index_of(target)
            .ok_or_else(|| SofaError::Subdocument(format!("no element {target}")))?;
        let href = self.links[index].clone();
        log::info!("Listing follows {href}");
        *self.followed.borrow_mut() = Some(href);
        Ok(())
    }

    fn link_href(&self, target: &TargetId) -> Option<String> {
        self.index_of(target).map(|i| self.links[i].clone())
    }
}
