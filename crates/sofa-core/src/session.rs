//! The application session.
//!
//! [`Session`] owns the shell, the store and the engine parts, and turns
//! key codes, remote signals and surface events into engine calls.

use sofa_platform::services::Shell;
use sofa_platform::store::KeyValueStore;
use sofa_types::config::SofaConfig;
use sofa_types::event::SurfaceEvent;
use sofa_types::input::{KeyMap, Signal};
use sofa_types::target::ToolbarControl;

use crate::address::directory_of;
use crate::classify::{AssetClassifier, AssetReference};
use crate::playback::PlaybackView;
use crate::prefs::Preferences;
use crate::region::{Dispatch, RegionCoordinator, Trigger};
use crate::resume::ResumeCache;

pub struct Session<P: Shell, S: KeyValueStore> {
    shell: P,
    store: S,
    keys: KeyMap,
    classifier: AssetClassifier,
    coordinator: RegionCoordinator,
    view: PlaybackView,
    /// Home address from configuration; empty when unset.
    configured_home: String,
    /// Home address resolved at launch.
    home: String,
}

impl<P: Shell, S: KeyValueStore> Session<P, S> {
    pub fn new(config: &SofaConfig, shell: P, store: S) -> Self {
        let classifier = AssetClassifier::from_config(config);
        Self {
            shell,
            store,
            keys: config.key_map(),
            coordinator: RegionCoordinator::new(classifier.clone()),
            classifier,
            view: PlaybackView::new(),
            configured_home: config.home_address.clone(),
            home: String::new(),
        }
    }

    pub fn shell(&self) -> &P {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut P {
        &mut self.shell
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn coordinator(&self) -> &RegionCoordinator {
        &self.coordinator
    }

    /// The asset on screen.
    pub fn current(&self) -> Option<&AssetReference> {
        self.view.current()
    }

    /// Home address resolved by [`Session::launch`].
    pub fn home_address(&self) -> &str {
        &self.home
    }

    /// Number of saved resume positions.
    pub fn resume_entries(&mut self) -> usize {
        ResumeCache::new(&mut self.store).len()
    }

    /// Resolve the home address and show the last opened address (or home).
    pub fn launch(&mut self) {
        let prefs = Preferences::new(&mut self.store);
        let current = prefs.current_address();
        let stored_home = prefs.home_address();

        let home = if !self.configured_home.is_empty() {
            self.configured_home.clone()
        } else if let Some(dir) = current.as_deref().and_then(directory_of) {
            dir
        } else {
            stored_home.unwrap_or_default()
        };
        Preferences::new(&mut self.store).set_home_address(&home);
        self.home = home;

        let start = current.unwrap_or_else(|| self.home.clone());
        log::info!("Launching at {start:?} (home {:?})", self.home);
        let reference = self.classifier.classify(&start, None);
        self.view.show(reference, &mut self.coordinator, &mut self.shell);
    }

    /// Translate a raw device key code. Unmapped codes are ignored.
    pub fn handle_key(&mut self, code: u32) -> Option<Dispatch> {
        match self.keys.signal(code) {
            Some(signal) => Some(self.handle_signal(signal)),
            None => {
                log::debug!("Ignoring unmapped key {code}");
                None
            },
        }
    }

    pub fn handle_signal(&mut self, signal: Signal) -> Dispatch {
        let outcome = self.coordinator.dispatch(signal, &mut self.shell);
        match &outcome {
            Dispatch::Back => self.go_back(),
            Dispatch::Control(control) => self.run_control(*control),
            Dispatch::Open(reference) => self.open_discovered(reference.clone()),
            Dispatch::Moved(_)
            | Dispatch::HandedOff { .. }
            | Dispatch::Activated(_)
            | Dispatch::Consumed
            | Dispatch::PassThrough => {},
        }
        outcome
    }

    pub fn handle_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::MetadataReady { address, duration } => {
                self.view
                    .on_metadata(&address, duration, &mut self.store, &mut self.shell);
            },
            SurfaceEvent::TimeAdvanced { address, offset } => {
                self.view.on_time(&address, offset, &mut self.store);
            },
            SurfaceEvent::PlayStarted => {
                self.coordinator.fire(Trigger::PlayStarted, &mut self.shell);
            },
            SurfaceEvent::Paused => self.coordinator.fire(Trigger::Paused, &mut self.shell),
            SurfaceEvent::VideoFocusLost => {
                self.coordinator.fire(Trigger::VideoFocusLost, &mut self.shell);
            },
            SurfaceEvent::LoadCompleted { address } => {
                self.coordinator.load_completed(&address, &mut self.shell);
            },
        }
    }

    fn run_control(&mut self, control: ToolbarControl) {
        match control {
            ToolbarControl::AddressInput => {
                if let Err(e) = self.shell.begin_address_edit() {
                    log::warn!("Cannot edit the address: {e}");
                }
            },
            ToolbarControl::Save => {
                let text = self.shell.address_text();
                self.submit_address(&text);
            },
            ToolbarControl::Reload => self.view.reload(&mut self.coordinator, &mut self.shell),
            ToolbarControl::Back => self.go_back(),
        }
    }

    /// Location relative addresses resolve against: the playing media, else
    /// the sub-document's location when observable, else the current asset.
    /// The sub-document outlives a switch to the player, so it is only
    /// consulted while the listing is on screen.
    fn page_location(&self) -> Option<String> {
        let current = self.view.current();
        if let Some(media) = current.filter(|r| r.is_playable()) {
            return Some(media.address.clone());
        }
        self.coordinator
            .subdocument()
            .location()
            .or_else(|| current.map(|r| r.address.clone()))
    }

    /// Open an address the user typed. Starts the resume cache afresh.
    pub fn submit_address(&mut self, text: &str) -> AssetReference {
        let base = self.page_location();
        let reference = self.classifier.classify(text, base.as_deref());
        log::info!("Submitted {text:?} -> {} {}", reference.kind, reference.address);

        Preferences::new(&mut self.store).set_current_address(&reference.address);
        ResumeCache::new(&mut self.store).clear();
        self.view
            .show(reference.clone(), &mut self.coordinator, &mut self.shell);

        if !reference.is_playable() && !reference.address.is_empty() {
            let supported: Vec<String> = self
                .classifier
                .extensions()
                .iter()
                .map(|e| format!(".{e}"))
                .collect();
            let message = format!(
                "{} is not a supported video ({}); showing it in the browser",
                reference.address,
                supported.join(", ")
            );
            if let Err(e) = self.shell.notify(&message) {
                log::warn!("Cannot show notice: {e}");
            }
        }
        reference
    }

    /// Open an address found by following a link. Keeps saved positions.
    pub fn open_discovered(&mut self, reference: AssetReference) {
        log::info!("Opening discovered {}", reference.address);
        Preferences::new(&mut self.store).set_current_address(&reference.address);
        self.view.show(reference, &mut self.coordinator, &mut self.shell);
    }

    /// Stop playback and show the home listing. The home address is not
    /// saved as the current address.
    pub fn go_back(&mut self) {
        let home = Preferences::new(&mut self.store)
            .home_address()
            .unwrap_or_else(|| self.home.clone());
        log::info!("Going back to {home:?}");
        self.view.go_home(&home, &mut self.coordinator, &mut self.shell);
    }
}
