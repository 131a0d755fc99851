//! Region transition table.
//!
//! Every change to region visibility, immersive presentation and the active
//! region goes through [`transition`]. The function is pure: it returns the
//! next state plus the platform effects to apply, in order.

use sofa_types::target::{Region, TargetId, ToolbarControl};

/// Observable region state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionState {
    /// Region that receives directional signals.
    pub active: Region,
    /// Content region on screen, [`Region::Video`] or [`Region::Embedded`].
    pub content: Region,
    pub media_playing: bool,
    /// Toolbar concealed, video surface takes the whole screen.
    pub immersive: bool,
}

impl Default for RegionState {
    fn default() -> Self {
        Self {
            active: Region::Embedded,
            content: Region::Embedded,
            media_playing: false,
            immersive: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A playable asset was shown.
    AssetPlayable,
    /// A browsable asset was shown.
    AssetBrowsable,
    /// The user went back to the home address.
    GoBack,
    /// The remote's back key.
    BackSignal,
    PlayStarted,
    Paused,
    VideoFocusLost,
    /// Up pressed on the video surface.
    VideoUp,
    /// Down pressed on the video surface.
    VideoDown,
    /// Focus moved into a region by other means.
    FocusEntered(Region),
}

/// A platform side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ShowRegion(Region),
    HideRegion(Region),
    /// Pause and release the active media.
    StopPlayback,
    EnterImmersive,
    ExitImmersive,
    Focus(TargetId),
}

/// Apply `trigger` to `state`.
pub fn transition(state: RegionState, trigger: Trigger) -> (RegionState, Vec<Effect>) {
    let mut next = state;
    let mut effects = Vec::new();

    match trigger {
        Trigger::AssetPlayable => {
            next.active = Region::Video;
            next.content = Region::Video;
            // Fresh media starts paused.
            next.media_playing = false;
            surface_toolbar(&mut next, &mut effects);
            effects.push(Effect::HideRegion(Region::Embedded));
            effects.push(Effect::ShowRegion(Region::Video));
            effects.push(Effect::Focus(TargetId::VideoSurface));
        },
        Trigger::AssetBrowsable | Trigger::GoBack => {
            next.active = Region::Embedded;
            next.content = Region::Embedded;
            next.media_playing = false;
            effects.push(Effect::StopPlayback);
            surface_toolbar(&mut next, &mut effects);
            effects.push(Effect::HideRegion(Region::Video));
            effects.push(Effect::ShowRegion(Region::Embedded));
            effects.push(Effect::Focus(TargetId::Frame));
        },
        Trigger::BackSignal | Trigger::VideoFocusLost => {
            surface_toolbar(&mut next, &mut effects);
        },
        Trigger::PlayStarted => {
            // Late events from media that is no longer on screen.
            if state.content == Region::Video {
                next.media_playing = true;
                if !next.immersive {
                    next.immersive = true;
                    effects.push(Effect::EnterImmersive);
                }
            }
        },
        Trigger::Paused => {
            next.media_playing = false;
            surface_toolbar(&mut next, &mut effects);
        },
        Trigger::VideoUp => {
            next.active = Region::Toolbar;
            if next.media_playing {
                surface_toolbar(&mut next, &mut effects);
            }
            effects.push(Effect::Focus(TargetId::Control(ToolbarControl::AddressInput)));
        },
        Trigger::VideoDown => {
            if next.media_playing && !next.immersive {
                next.immersive = true;
                effects.push(Effect::EnterImmersive);
            }
        },
        Trigger::FocusEntered(region) => {
            next.active = region;
        },
    }

    (next, effects)
}

fn surface_toolbar(state: &mut RegionState, effects: &mut Vec<Effect>) {
    if state.immersive {
        state.immersive = false;
        effects.push(Effect::ExitImmersive);
    }
}
