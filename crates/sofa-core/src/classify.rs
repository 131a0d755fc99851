//! Asset classification.
//!
//! An address is [`AssetKind::Playable`] when its path ends in one of the
//! configured media extensions (case-insensitive); everything else, including
//! input that does not resolve to an address at all, is browsable.

use std::fmt;

use sofa_types::config::SofaConfig;

use crate::address::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Direct media the video region can play.
    Playable,
    /// Anything else; shown in the embedded region.
    Browsable,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Playable => f.write_str("playable"),
            AssetKind::Browsable => f.write_str("browsable"),
        }
    }
}

/// A classified address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    /// Absolute address, or the trimmed input when it did not resolve.
    pub address: String,
    pub kind: AssetKind,
}

impl AssetReference {
    pub fn is_playable(&self) -> bool {
        self.kind == AssetKind::Playable
    }

    pub fn browsable(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            kind: AssetKind::Browsable,
        }
    }
}

/// Classifies candidate addresses against a set of playable extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetClassifier {
    extensions: Vec<String>,
}

impl AssetClassifier {
    /// Extensions are matched without their leading dot, case-insensitively.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { extensions }
    }

    pub fn from_config(config: &SofaConfig) -> Self {
        Self::new(&config.playable_extensions)
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Resolve `candidate` to an absolute address, relative to `base` when
    /// it is not absolute itself.
    pub fn resolve(&self, candidate: &str, base: Option<&str>) -> Option<Address> {
        Address::parse(candidate).or_else(|| Address::parse(base?)?.resolve(candidate))
    }

    pub fn is_playable(&self, address: &Address) -> bool {
        let path = address.path.to_ascii_lowercase();
        self.extensions
            .iter()
            .any(|ext| path.strip_suffix(ext.as_str()).is_some_and(|p| p.ends_with('.')))
    }

    /// Classify `candidate`. Unresolvable input is browsable and keeps its
    /// trimmed text as the address.
    pub fn classify(&self, candidate: &str, base: Option<&str>) -> AssetReference {
        match self.resolve(candidate, base) {
            Some(address) => AssetReference {
                kind: if self.is_playable(&address) {
                    AssetKind::Playable
                } else {
                    AssetKind::Browsable
                },
                address: address.to_string(),
            },
            None => {
                log::debug!("Unresolvable address {candidate:?}, treating as browsable");
                AssetReference::browsable(candidate.trim())
            },
        }
    }
}

impl Default for AssetClassifier {
    fn default() -> Self {
        Self::from_config(&SofaConfig::default())
    }
}

/// Classify with the default extensions (`mp4`, `webm`, `ogg`).
pub fn classify(candidate: &str, base: Option<&str>) -> AssetReference {
    AssetClassifier::default().classify(candidate, base)
}
