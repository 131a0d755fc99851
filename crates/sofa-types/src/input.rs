//! Logical remote signals and device key maps.
//!
//! Every device maps its raw key codes to the six [`Signal`]s through a
//! [`KeyMap`]. The core never sees raw codes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One of the six logical signals a remote can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Left,
    Up,
    Right,
    Down,
    Confirm,
    Back,
}

impl Signal {
    /// All signals, in key-map precedence order.
    pub const ALL: [Signal; 6] = [
        Signal::Left,
        Signal::Up,
        Signal::Right,
        Signal::Down,
        Signal::Confirm,
        Signal::Back,
    ];

    /// The navigation direction carried by this signal, if any.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Signal::Left => Some(Direction::Left),
            Signal::Up => Some(Direction::Up),
            Signal::Right => Some(Direction::Right),
            Signal::Down => Some(Direction::Down),
            Signal::Confirm | Signal::Back => None,
        }
    }

    /// Parse a lowercase signal name (`"left"`, `"confirm"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Signal::Left),
            "up" => Some(Signal::Up),
            "right" => Some(Signal::Right),
            "down" => Some(Signal::Down),
            "confirm" | "enter" | "ok" => Some(Signal::Confirm),
            "back" => Some(Signal::Back),
            _ => None,
        }
    }
}

/// A directional signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Right and down advance through a focus ring; left and up retreat.
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// Raw key codes bound to each signal (the `[keys]` config table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<u32>,
    pub up: Vec<u32>,
    pub right: Vec<u32>,
    pub down: Vec<u32>,
    pub confirm: Vec<u32>,
    pub back: Vec<u32>,
}

impl Default for KeyBindings {
    /// LG webOS remote codes, plus Escape as an extra back key.
    fn default() -> Self {
        Self {
            left: vec![37],
            up: vec![38],
            right: vec![39],
            down: vec![40],
            confirm: vec![13],
            back: vec![461, 27],
        }
    }
}

impl KeyBindings {
    fn codes(&self, signal: Signal) -> &[u32] {
        match signal {
            Signal::Left => &self.left,
            Signal::Up => &self.up,
            Signal::Right => &self.right,
            Signal::Down => &self.down,
            Signal::Confirm => &self.confirm,
            Signal::Back => &self.back,
        }
    }
}

/// Lookup table from raw device key codes to signals.
#[derive(Debug, Clone)]
pub struct KeyMap {
    codes: HashMap<u32, Signal>,
}

impl KeyMap {
    /// Build a key map from configured bindings.
    ///
    /// A code bound to several signals resolves to the last one in
    /// [`Signal::ALL`] order.
    pub fn new(bindings: &KeyBindings) -> Self {
        let mut codes = HashMap::new();
        for signal in Signal::ALL {
            for &code in bindings.codes(signal) {
                if let Some(previous) = codes.insert(code, signal) {
                    log::warn!("key code {code} bound to both {previous:?} and {signal:?}");
                }
            }
        }
        Self { codes }
    }

    /// Translate a raw key code.
    pub fn signal(&self, code: u32) -> Option<Signal> {
        self.codes.get(&code).copied()
    }

    /// Number of bound codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns `true` when no code is bound.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new(&KeyBindings::default())
    }
}
