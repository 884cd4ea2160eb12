//! Lexical lookup tables for drum notation.
//!
//! Built once on first use and never mutated afterwards, so concurrent
//! parses share them freely.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::kit::GM_KIT;
use crate::track::{Velocity, TICKS_PER_QUARTER};

/// Suffix that turns a duration into its triplet variant
pub const TRIPLET_MARK: char = '>';

/// Instrument identifier to MIDI key.
///
/// Holds "1" through "255" mapped to themselves plus every kit alias.
pub static INSTRUMENTS: LazyLock<HashMap<String, u8>> = LazyLock::new(|| {
    let mut instruments: HashMap<String, u8> =
        (1..=u8::MAX).map(|n| (n.to_string(), n)).collect();
    for (name, key) in GM_KIT {
        instruments.insert((*name).to_string(), *key);
    }
    instruments
});

/// Velocity suffix to velocity level
pub static VELOCITIES: LazyLock<HashMap<&'static str, Velocity>> =
    LazyLock::new(|| Velocity::all().into_iter().map(|v| (v.suffix(), v)).collect());

/// Duration suffix to ticks, including the triplet variants.
pub static DURATIONS: LazyLock<HashMap<String, u32>> = LazyLock::new(|| {
    let quarter = TICKS_PER_QUARTER as u32;
    let base = [
        ("~~", quarter * 4),
        ("~", quarter * 2),
        ("", quarter),
        (".", quarter / 2),
        ("..", quarter / 4),
        ("...", quarter / 8),
        ("....", quarter / 16),
        (".....", quarter / 32),
    ];

    let mut durations = HashMap::new();
    for (suffix, ticks) in base {
        durations.insert(suffix.to_string(), ticks);
        durations.insert(format!("{suffix}{TRIPLET_MARK}"), ticks * 2 / 3);
    }
    durations
});

/// Resolve an instrument identifier; unknown names yield `None`.
pub fn instrument(id: &str) -> Option<u8> {
    INSTRUMENTS.get(id).copied()
}

pub fn velocity(suffix: &str) -> Option<Velocity> {
    VELOCITIES.get(suffix).copied()
}

/// Resolve a duration suffix to ticks. The empty suffix is a quarter note.
pub fn duration(suffix: &str) -> Option<u32> {
    DURATIONS.get(suffix).copied()
}
