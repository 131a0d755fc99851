//! Region coordination.
//!
//! The screen has three regions: the toolbar, the video surface and the
//! embedded frame. [`RegionCoordinator`] decides which region receives each
//! remote signal, routes focus inside it with the [`crate::focus`] engine,
//! and hands focus across region boundaries. Visibility changes go through
//! the [`transition`] table.

pub mod transition;

use std::fmt;

use sofa_platform::services::{ObservableSubdocument, Shell};
use sofa_types::input::{Direction, Signal};
use sofa_types::target::{Region, TargetId, ToolbarControl};

use crate::classify::{AssetClassifier, AssetReference};
use crate::focus::{self, Navigation};

pub use transition::{Effect, RegionState, Trigger};

// ---------------------------------------------------------------------------
// Sub-document adapter
// ---------------------------------------------------------------------------

/// What is known about the document in the embedded frame.
#[derive(Default)]
pub enum Subdocument {
    /// Nothing loaded yet, or a navigation is in flight.
    #[default]
    Unloaded,
    /// Loaded but not introspectable; native navigation only.
    Opaque,
    /// Loaded and introspectable.
    Observable(Box<dyn ObservableSubdocument>),
}

impl Subdocument {
    pub fn is_observable(&self) -> bool {
        matches!(self, Self::Observable(_))
    }

    /// Current location of an observable document.
    pub fn location(&self) -> Option<String> {
        match self {
            Self::Observable(doc) => Some(doc.location()),
            Self::Unloaded | Self::Opaque => None,
        }
    }
}

impl fmt::Debug for Subdocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unloaded => f.write_str("Unloaded"),
            Self::Opaque => f.write_str("Opaque"),
            Self::Observable(doc) => write!(f, "Observable({})", doc.location()),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch outcome
// ---------------------------------------------------------------------------

/// What a signal did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Focus moved within the active region.
    Moved(TargetId),
    /// Focus crossed from one region into another.
    HandedOff { from: Region, to: TargetId },
    /// Confirm on a toolbar control; the session runs its action.
    Control(ToolbarControl),
    /// Confirm on a playable link inside the sub-document.
    Open(AssetReference),
    /// Confirm on a sub-document element was turned into an activation.
    Activated(TargetId),
    /// The back key; the session goes home.
    Back,
    /// Handled with no further action.
    Consumed,
    /// Left to the platform's native handling.
    PassThrough,
}

// ---------------------------------------------------------------------------
// RegionCoordinator
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RegionCoordinator {
    state: RegionState,
    subdocument: Subdocument,
    /// Address of the frame navigation in flight, if any.
    pending_load: Option<String>,
    classifier: AssetClassifier,
}

impl RegionCoordinator {
    pub fn new(classifier: AssetClassifier) -> Self {
        Self {
            state: RegionState::default(),
            subdocument: Subdocument::Unloaded,
            pending_load: None,
            classifier,
        }
    }

    pub fn state(&self) -> RegionState {
        self.state
    }

    pub fn active(&self) -> Region {
        self.state.active
    }

    pub fn subdocument(&self) -> &Subdocument {
        &self.subdocument
    }

    /// Apply a transition and its effects. Failed effects are logged.
    pub fn fire(&mut self, trigger: Trigger, shell: &mut dyn Shell) {
        let (next, effects) = transition::transition(self.state, trigger);
        if next != self.state {
            log::debug!("{trigger:?}: {:?} -> {next:?}", self.state);
        }
        self.state = next;
        for effect in effects {
            let result = match &effect {
                Effect::ShowRegion(region) => shell.set_region_visible(*region, true),
                Effect::HideRegion(region) => shell.set_region_visible(*region, false),
                Effect::StopPlayback => shell.pause().and_then(|()| shell.unload()),
                Effect::EnterImmersive => shell.enter_immersive(),
                Effect::ExitImmersive => shell.exit_immersive(),
                Effect::Focus(target) => shell.focus(target),
            };
            if let Err(e) = result {
                log::warn!("{effect:?} failed: {e}");
            }
        }
    }

    /// The frame is about to load `address`; forget the old document.
    pub fn frame_navigating(&mut self, address: &str) {
        self.subdocument = Subdocument::Unloaded;
        self.pending_load = Some(address.to_string());
    }

    /// The frame finished loading `address`. Runs the probe that picks the
    /// sub-document adapter. Returns `false` when the event is stale.
    pub fn load_completed(&mut self, address: &str, shell: &mut dyn Shell) -> bool {
        if self.state.content != Region::Embedded {
            log::debug!("Dropping load of {address} in player mode");
            return false;
        }
        if self.pending_load.as_deref().is_some_and(|p| p != address) {
            log::debug!("Dropping stale load of {address}");
            return false;
        }
        self.pending_load = None;

        self.subdocument = match shell.probe() {
            Ok(doc) => {
                log::info!("Sub-document {} is observable", doc.location());
                Subdocument::Observable(doc)
            },
            Err(e) => {
                log::warn!("Sub-document {address} is opaque, native navigation only: {e}");
                Subdocument::Opaque
            },
        };

        if !self.subdocument.is_observable() && shell.focused() == Some(TargetId::Frame) {
            let input = TargetId::Control(ToolbarControl::AddressInput);
            if let Err(e) = shell.focus(&input) {
                log::warn!("Cannot move focus to the address field: {e}");
            } else {
                self.fire(Trigger::FocusEntered(Region::Toolbar), shell);
            }
        }
        true
    }

    /// Route one remote signal.
    pub fn dispatch(&mut self, signal: Signal, shell: &mut dyn Shell) -> Dispatch {
        if signal == Signal::Back {
            self.fire(Trigger::BackSignal, shell);
            return Dispatch::Back;
        }

        let region = self.reconcile(shell);
        let outcome = match (region, signal.direction()) {
            (Region::Video, Some(direction)) => self.video_direction(direction, shell),
            (Region::Video, None) => self.toggle_playback(shell),
            (Region::Embedded, Some(direction)) => self.embedded_direction(direction, shell),
            (Region::Embedded, None) => self.embedded_confirm(),
            (Region::Toolbar, Some(direction)) => self.toolbar_direction(direction, shell),
            (Region::Toolbar, None) => match shell.focused() {
                Some(TargetId::Control(control)) => Dispatch::Control(control),
                _ => Dispatch::Consumed,
            },
        };
        log::debug!("{signal:?} in {region} -> {outcome:?}");
        outcome
    }

    /// Derive the input region from live focus.
    fn reconcile(&mut self, shell: &mut dyn Shell) -> Region {
        let content = self.state.content;
        // Focus left behind in a hidden content region does not count.
        let from_focus = shell
            .focused()
            .map(|target| target.region())
            .filter(|&region| region == Region::Toolbar || region == content);
        let region = from_focus
            .or_else(|| match &self.subdocument {
                Subdocument::Observable(doc)
                    if content == Region::Embedded && doc.active().is_some() =>
                {
                    Some(Region::Embedded)
                },
                _ => None,
            })
            .unwrap_or(self.state.active);

        if region != self.state.active {
            self.fire(Trigger::FocusEntered(region), shell);
        }
        region
    }

    // -- Video ------------------------------------------------------------

    fn video_direction(&mut self, direction: Direction, shell: &mut dyn Shell) -> Dispatch {
        match direction {
            Direction::Up => {
                self.fire(Trigger::VideoUp, shell);
                Dispatch::HandedOff {
                    from: Region::Video,
                    to: TargetId::Control(ToolbarControl::AddressInput),
                }
            },
            Direction::Down => {
                self.fire(Trigger::VideoDown, shell);
                Dispatch::Consumed
            },
            // Native seek.
            Direction::Left | Direction::Right => Dispatch::PassThrough,
        }
    }

    fn toggle_playback(&mut self, shell: &mut dyn Shell) -> Dispatch {
        let result = if shell.is_paused() {
            shell.play()
        } else {
            shell.pause()
        };
        if let Err(e) = result {
            log::warn!("Cannot toggle playback: {e}");
        }
        Dispatch::Consumed
    }

    // -- Embedded ---------------------------------------------------------

    fn embedded_direction(&mut self, direction: Direction, shell: &mut dyn Shell) -> Dispatch {
        let Subdocument::Observable(doc) = &mut self.subdocument else {
            return Dispatch::PassThrough;
        };
        let targets = focus::focusable(doc.targets());
        let current = doc.active();
        match focus::next(&targets, current.as_ref(), direction) {
            Navigation::Idle => Dispatch::Consumed,
            Navigation::Move(target) => {
                let id = target.id.clone();
                if let Err(e) = doc.focus(&id) {
                    log::warn!("Cannot focus {id}: {e}");
                }
                Dispatch::Moved(id)
            },
            Navigation::BoundaryExceeded => {
                let control = if direction.is_forward() {
                    ToolbarControl::Save
                } else {
                    ToolbarControl::AddressInput
                };
                let id = TargetId::Control(control);
                if let Err(e) = shell.focus(&id) {
                    log::warn!("Cannot focus {id}: {e}");
                }
                Dispatch::HandedOff {
                    from: Region::Embedded,
                    to: id,
                }
            },
        }
    }

    fn embedded_confirm(&mut self) -> Dispatch {
        let Subdocument::Observable(doc) = &mut self.subdocument else {
            return Dispatch::PassThrough;
        };
        let Some(active) = doc.active() else {
            return Dispatch::Consumed;
        };
        if let Some(href) = doc.link_href(&active) {
            let location = doc.location();
            let reference = self.classifier.classify(&href, Some(location.as_str()));
            if reference.is_playable() {
                log::info!("Intercepted playable link {}", reference.address);
                return Dispatch::Open(reference);
            }
        }
        if let Err(e) = doc.activate(&active) {
            log::warn!("Cannot activate {active}: {e}");
        }
        Dispatch::Activated(active)
    }

    // -- Toolbar ----------------------------------------------------------

    fn toolbar_direction(&mut self, direction: Direction, shell: &mut dyn Shell) -> Dispatch {
        let targets = focus::focusable(shell.targets(Region::Toolbar));
        let current = shell.focused();
        match focus::next(&targets, current.as_ref(), direction) {
            Navigation::Idle => Dispatch::Consumed,
            Navigation::Move(target) => {
                let id = target.id.clone();
                if let Err(e) = shell.focus(&id) {
                    log::warn!("Cannot focus {id}: {e}");
                }
                Dispatch::Moved(id)
            },
            Navigation::BoundaryExceeded => self.enter_content(shell),
        }
    }

    /// Hand focus from the toolbar to the content region's first target.
    fn enter_content(&mut self, shell: &mut dyn Shell) -> Dispatch {
        let content = self.state.content;
        let landing = match (&mut self.subdocument, content) {
            (_, Region::Video) => focus::focusable(shell.targets(Region::Video))
                .into_iter()
                .next()
                .map(|t| t.id)
                .filter(|id| shell.focus(id).is_ok()),
            (Subdocument::Observable(doc), _) => {
                match focus::focusable(doc.targets()).into_iter().next() {
                    Some(first) => {
                        if let Err(e) = shell.focus(&TargetId::Frame) {
                            log::warn!("Cannot focus the frame: {e}");
                        }
                        match doc.focus(&first.id) {
                            Ok(()) => Some(first.id),
                            Err(e) => {
                                log::warn!("Cannot focus {}: {e}", first.id);
                                None
                            },
                        }
                    },
                    None => None,
                }
            },
            (Subdocument::Opaque | Subdocument::Unloaded, _) => {
                focus::focusable(shell.targets(Region::Embedded))
                    .into_iter()
                    .next()
                    .map(|t| t.id)
                    .filter(|id| shell.focus(id).is_ok())
            },
        };

        match landing {
            Some(to) => {
                self.fire(Trigger::FocusEntered(content), shell);
                Dispatch::HandedOff {
                    from: Region::Toolbar,
                    to,
                }
            },
            None => Dispatch::Consumed,
        }
    }
}
