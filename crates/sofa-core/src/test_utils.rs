//! Shared test helpers: a recording shell, a scriptable sub-document and a
//! store whose reads and writes can be made to fail.

use std::cell::RefCell;
use std::rc::Rc;

use sofa_platform::services::{
    DisplayService, EmbeddedService, FocusService, MediaService, ObservableSubdocument, Shell,
};
use sofa_platform::store::{KeyValueStore, MemoryStore};
use sofa_types::error::{Result, SofaError};
use sofa_types::target::{FocusableTarget, Region, TargetId, ToolbarControl};

/// One outbound platform call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Visible(Region, bool),
    EnterImmersive,
    ExitImmersive,
    AddressText(String),
    EditAddress,
    Notify(String),
    Focus(TargetId),
    Load(String),
    Reload,
    Unload,
    Seek(f64),
    Play,
    Pause,
    Navigate(String),
    Probe,
}

// ---------------------------------------------------------------------------
// Mock sub-document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MockElement {
    pub name: String,
    pub href: Option<String>,
    pub visible: bool,
}

/// Sub-document state shared between the test and the adapter the
/// coordinator holds.
#[derive(Debug, Default)]
pub struct DocState {
    pub location: String,
    pub elements: Vec<MockElement>,
    pub active: Option<TargetId>,
    pub activated: Vec<TargetId>,
}

impl DocState {
    pub fn listing(location: &str, hrefs: &[&str]) -> Self {
        Self {
            location: location.to_string(),
            elements: hrefs
                .iter()
                .enumerate()
                .map(|(i, href)| MockElement {
                    name: format!("a{i}"),
                    href: Some(href.to_string()),
                    visible: true,
                })
                .collect(),
            ..Self::default()
        }
    }
}

pub struct MockDocument {
    state: Rc<RefCell<DocState>>,
}

impl ObservableSubdocument for MockDocument {
    fn location(&self) -> String {
        self.state.borrow().location.clone()
    }

    fn targets(&self) -> Vec<FocusableTarget> {
        self.state
            .borrow()
            .elements
            .iter()
            .map(|e| FocusableTarget {
                id: TargetId::element(e.name.as_str()),
                visible: e.visible,
                enabled: true,
            })
            .collect()
    }

    fn active(&self) -> Option<TargetId> {
        self.state.borrow().active.clone()
    }

    fn focus(&mut self, target: &TargetId) -> Result<()> {
        self.state.borrow_mut().active = Some(target.clone());
        Ok(())
    }

    fn activate(&mut self, target: &TargetId) -> Result<()> {
        self.state.borrow_mut().activated.push(target.clone());
        Ok(())
    }

    fn link_href(&self, target: &TargetId) -> Option<String> {
        let TargetId::Element(name) = target else {
            return None;
        };
        self.state
            .borrow()
            .elements
            .iter()
            .find(|e| &e.name == name)
            .and_then(|e| e.href.clone())
    }
}

// ---------------------------------------------------------------------------
// Mock shell
// ---------------------------------------------------------------------------

/// Records every call and keeps just enough state to answer queries.
#[derive(Default)]
pub struct MockShell {
    pub calls: Vec<Call>,
    pub focused: Option<TargetId>,
    pub hidden_controls: Vec<ToolbarControl>,
    pub immersive: bool,
    pub video_visible: bool,
    pub embedded_visible: bool,
    pub media: Option<String>,
    pub paused: bool,
    pub address_text: String,
    /// `None` makes every probe fail (cross-origin document).
    pub document: Option<Rc<RefCell<DocState>>>,
}

impl MockShell {
    pub fn new() -> Self {
        Self {
            embedded_visible: true,
            paused: true,
            ..Self::default()
        }
    }

    /// Serve an observable listing on the next probe and return its state.
    pub fn serve(&mut self, doc: DocState) -> Rc<RefCell<DocState>> {
        let state = Rc::new(RefCell::new(doc));
        self.document = Some(Rc::clone(&state));
        state
    }

    pub fn serve_opaque(&mut self) {
        self.document = None;
    }

    pub fn made(&self, call: &Call) -> bool {
        self.calls.contains(call)
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl DisplayService for MockShell {
    fn set_region_visible(&mut self, region: Region, visible: bool) -> Result<()> {
        self.calls.push(Call::Visible(region, visible));
        match region {
            Region::Video => self.video_visible = visible,
            Region::Embedded => self.embedded_visible = visible,
            Region::Toolbar => self.immersive = !visible,
        }
        Ok(())
    }

    fn enter_immersive(&mut self) -> Result<()> {
        self.calls.push(Call::EnterImmersive);
        self.immersive = true;
        Ok(())
    }

    fn exit_immersive(&mut self) -> Result<()> {
        self.calls.push(Call::ExitImmersive);
        self.immersive = false;
        Ok(())
    }

    fn set_address_text(&mut self, text: &str) -> Result<()> {
        self.calls.push(Call::AddressText(text.to_string()));
        self.address_text = text.to_string();
        Ok(())
    }

    fn address_text(&self) -> String {
        self.address_text.clone()
    }

    fn begin_address_edit(&mut self) -> Result<()> {
        self.calls.push(Call::EditAddress);
        Ok(())
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        self.calls.push(Call::Notify(message.to_string()));
        Ok(())
    }
}

impl FocusService for MockShell {
    fn targets(&self, region: Region) -> Vec<FocusableTarget> {
        match region {
            Region::Toolbar => ToolbarControl::ALL
                .iter()
                .map(|&c| FocusableTarget {
                    id: TargetId::Control(c),
                    visible: !self.immersive && !self.hidden_controls.contains(&c),
                    enabled: true,
                })
                .collect(),
            Region::Video => vec![FocusableTarget {
                id: TargetId::VideoSurface,
                visible: self.video_visible,
                enabled: self.media.is_some(),
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
            return Err(SofaError::Display(format!("{target} is not top-level")));
        }
        self.calls.push(Call::Focus(target.clone()));
        self.focused = Some(target.clone());
        Ok(())
    }
}

impl MediaService for MockShell {
    fn load(&mut self, address: &str) -> Result<()> {
        self.calls.push(Call::Load(address.to_string()));
        self.media = Some(address.to_string());
        self.paused = true;
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        self.calls.push(Call::Reload);
        Ok(())
    }

    fn unload(&mut self) -> Result<()> {
        self.calls.push(Call::Unload);
        self.media = None;
        self.paused = true;
        Ok(())
    }

    fn seek(&mut self, offset: f64) -> Result<()> {
        self.calls.push(Call::Seek(offset));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.calls.push(Call::Play);
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.calls.push(Call::Pause);
        self.paused = true;
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

impl EmbeddedService for MockShell {
    fn navigate(&mut self, address: &str) -> Result<()> {
        self.calls.push(Call::Navigate(address.to_string()));
        Ok(())
    }

    fn probe(&mut self) -> Result<Box<dyn ObservableSubdocument>> {
        self.calls.push(Call::Probe);
        match &self.document {
            Some(state) => Ok(Box::new(MockDocument {
                state: Rc::clone(state),
            })),
            None => Err(SofaError::Subdocument("cross-origin".into())),
        }
    }
}

impl Shell for MockShell {}

// ---------------------------------------------------------------------------
// Failing store
// ---------------------------------------------------------------------------

/// A [`MemoryStore`] whose reads or writes can be switched to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(SofaError::Store(format!("read {key} failed")));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(SofaError::Store(format!("write {key} failed")));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.fail_writes {
            return Err(SofaError::Store(format!("remove {key} failed")));
        }
        self.inner.remove(key)
    }
}
