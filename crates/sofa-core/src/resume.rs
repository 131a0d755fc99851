//! Resume positions.
//!
//! Playback offsets are persisted as one JSON object under
//! [`RESUME_KEY`], keyed by a [`Fingerprint`] of the media duration. The
//! duration is a weak key: two assets with the same duration share an
//! entry.

use std::collections::BTreeMap;
use std::fmt;

use sofa_platform::store::KeyValueStore;

/// Store key of the resume map.
pub const RESUME_KEY: &str = "resumePositions";

/// Identity of a media asset: the shortest decimal form of its duration in
/// seconds (`120.5` → `"120.5"`, `120.0` → `"120"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// `None` for durations that are not finite or are negative (live
    /// streams report an infinite duration).
    pub fn from_duration(duration: f64) -> Option<Self> {
        if !duration.is_finite() || duration < 0.0 {
            return None;
        }
        // Normalizes -0.0.
        let duration = if duration == 0.0 { 0.0 } else { duration };
        Some(Self(format!("{duration}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

enum Stored {
    Positions(BTreeMap<String, f64>),
    Corrupt,
    Unreadable,
}

/// A view over the store's resume map. Never fails: problems are logged and
/// degrade to "no saved position".
pub struct ResumeCache<'s> {
    store: &'s mut dyn KeyValueStore,
}

impl<'s> ResumeCache<'s> {
    pub fn new(store: &'s mut dyn KeyValueStore) -> Self {
        Self { store }
    }

    fn load(&self) -> Stored {
        let text = match self.store.get(RESUME_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return Stored::Positions(BTreeMap::new()),
            Err(e) => {
                log::warn!("Cannot read resume positions: {e}");
                return Stored::Unreadable;
            },
        };
        match serde_json::from_str(&text) {
            Ok(positions) => Stored::Positions(positions),
            Err(e) => {
                log::warn!("Ignoring corrupt resume positions: {e}");
                Stored::Corrupt
            },
        }
    }

    /// The persisted map. `None` when it cannot be read or is corrupt.
    fn positions(&self) -> Option<BTreeMap<String, f64>> {
        match self.load() {
            Stored::Positions(positions) => Some(positions),
            Stored::Corrupt | Stored::Unreadable => None,
        }
    }

    /// Saved offset for `fingerprint`, in seconds.
    pub fn restore(&self, fingerprint: &Fingerprint) -> Option<f64> {
        self.positions()?
            .get(fingerprint.as_str())
            .copied()
            .filter(|offset| offset.is_finite() && *offset >= 0.0)
    }

    /// Record `offset` for `fingerprint`. A corrupt map is replaced; a map
    /// that cannot be read is left alone.
    pub fn save(&mut self, fingerprint: &Fingerprint, offset: f64) {
        if !offset.is_finite() || offset < 0.0 {
            log::debug!("Ignoring offset {offset} for {fingerprint}");
            return;
        }
        let mut positions = match self.load() {
            Stored::Positions(positions) => positions,
            Stored::Corrupt => BTreeMap::new(),
            Stored::Unreadable => {
                log::warn!("Not saving resume position for {fingerprint}");
                return;
            },
        };
        positions.insert(fingerprint.as_str().to_string(), offset);
        let text = match serde_json::to_string(&positions) {
            Ok(text) => text,
            Err(e) => {
                log::error!("Cannot encode resume positions: {e}");
                return;
            },
        };
        if let Err(e) = self.store.set(RESUME_KEY, &text) {
            log::warn!("Cannot save resume position for {fingerprint}: {e}");
        }
    }

    /// Forget every saved position.
    pub fn clear(&mut self) {
        match self.store.remove(RESUME_KEY) {
            Ok(()) => log::info!("Resume positions cleared"),
            Err(e) => log::warn!("Cannot clear resume positions: {e}"),
        }
    }

    /// Number of saved positions; 0 when the map is unreadable.
    pub fn len(&self) -> usize {
        self.positions().map_or(0, |p| p.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
