//! Playback view controller.
//!
//! Presents an [`AssetReference`] in the matching region and keeps the
//! resume cache in step with the media element's metadata and time events.

use sofa_platform::services::Shell;
use sofa_platform::store::KeyValueStore;

use crate::classify::AssetReference;
use crate::region::{RegionCoordinator, Trigger};
use crate::resume::{Fingerprint, ResumeCache};

#[derive(Debug, Default)]
pub struct PlaybackView {
    current: Option<AssetReference>,
    /// Fingerprint of the current media, known once metadata arrives.
    fingerprint: Option<Fingerprint>,
}

impl PlaybackView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&AssetReference> {
        self.current.as_ref()
    }

    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }

    /// Show `reference`: playable assets in the video region, everything
    /// else in the embedded frame.
    pub fn show(
        &mut self,
        reference: AssetReference,
        coordinator: &mut RegionCoordinator,
        shell: &mut dyn Shell,
    ) {
        let trigger = if reference.is_playable() {
            Trigger::AssetPlayable
        } else {
            Trigger::AssetBrowsable
        };
        self.present(reference, trigger, coordinator, shell);
    }

    /// Show the home listing and stop any playback.
    pub fn go_home(
        &mut self,
        home: &str,
        coordinator: &mut RegionCoordinator,
        shell: &mut dyn Shell,
    ) {
        self.present(AssetReference::browsable(home), Trigger::GoBack, coordinator, shell);
    }

    fn present(
        &mut self,
        reference: AssetReference,
        trigger: Trigger,
        coordinator: &mut RegionCoordinator,
        shell: &mut dyn Shell,
    ) {
        log::info!("Showing {} asset {:?}", reference.kind, reference.address);
        if let Err(e) = shell.set_address_text(&reference.address) {
            log::warn!("Cannot update the address field: {e}");
        }
        self.fingerprint = None;

        if reference.is_playable() {
            if let Err(e) = shell.load(&reference.address) {
                log::error!("Cannot load {}: {e}", reference.address);
            }
            coordinator.fire(trigger, shell);
        } else {
            coordinator.fire(trigger, shell);
            coordinator.frame_navigating(&reference.address);
            if let Err(e) = shell.navigate(&reference.address) {
                log::error!("Cannot navigate the frame to {}: {e}", reference.address);
            }
        }
        self.current = Some(reference);
    }

    fn is_current_media(&self, address: &str) -> bool {
        self.current
            .as_ref()
            .is_some_and(|r| r.is_playable() && r.address == address)
    }

    /// Media metadata arrived: fingerprint the asset and seek to its saved
    /// position.
    pub fn on_metadata(
        &mut self,
        address: &str,
        duration: f64,
        store: &mut dyn KeyValueStore,
        shell: &mut dyn Shell,
    ) {
        if !self.is_current_media(address) {
            log::debug!("Dropping metadata for {address}, not the current media");
            return;
        }
        let Some(fingerprint) = Fingerprint::from_duration(duration) else {
            log::debug!("No resume support for duration {duration}");
            self.fingerprint = None;
            return;
        };
        if let Some(offset) = ResumeCache::new(store).restore(&fingerprint) {
            log::info!("Resuming {address} at {offset}s");
            if let Err(e) = shell.seek(offset) {
                log::warn!("Cannot seek to {offset}s: {e}");
            }
        }
        self.fingerprint = Some(fingerprint);
    }

    /// Playback position advanced: remember it.
    pub fn on_time(&mut self, address: &str, offset: f64, store: &mut dyn KeyValueStore) {
        if !self.is_current_media(address) {
            log::debug!("Dropping time update for {address}");
            return;
        }
        if let Some(fingerprint) = &self.fingerprint {
            ResumeCache::new(store).save(fingerprint, offset);
        }
    }

    /// Reload the current asset. Media restores its position on the next
    /// metadata event; a listing reloads the frame's current location.
    pub fn reload(&mut self, coordinator: &mut RegionCoordinator, shell: &mut dyn Shell) {
        let Some(current) = &self.current else {
            log::debug!("Nothing to reload");
            return;
        };
        if current.is_playable() {
            log::info!("Reloading {}", current.address);
            self.fingerprint = None;
            if let Err(e) = shell.reload() {
                log::warn!("Cannot reload media: {e}");
            }
        } else {
            let address = coordinator
                .subdocument()
                .location()
                .unwrap_or_else(|| current.address.clone());
            log::info!("Reloading listing {address}");
            coordinator.frame_navigating(&address);
            if let Err(e) = shell.navigate(&address) {
                log::warn!("Cannot reload the frame: {e}");
            }
        }
    }
}
