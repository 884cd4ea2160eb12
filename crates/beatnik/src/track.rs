//! Track model produced by the parser and consumed by the MIDI encoder.

use serde::{Deserialize, Serialize};

/// MIDI ticks per quarter note. Fixed for every file we write.
pub const TICKS_PER_QUARTER: u16 = 96;

/// Tempo used when a track never sets one.
pub const DEFAULT_BPM: u32 = 120;

/// Accepted range for a track tempo.
pub const MIN_BPM: u32 = 1;
pub const MAX_BPM: u32 = 500;

/// A complete drum track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Hits in playback order
    pub hits: Vec<Hit>,
    /// Beats per minute, 0 when unset
    pub bpm: u32,
}

impl Track {
    pub fn new() -> Self {
        Track::default()
    }

    /// Fill in a tempo for tracks that never set one.
    pub fn with_default_bpm(mut self, bpm: u32) -> Self {
        if self.bpm == 0 {
            self.bpm = bpm;
        }
        self
    }

    /// The tempo the encoder writes for this track.
    pub fn effective_bpm(&self) -> u32 {
        if self.bpm == 0 {
            DEFAULT_BPM
        } else {
            self.bpm
        }
    }

    /// Length of the whole track in ticks
    pub fn total_ticks(&self) -> u64 {
        self.hits.iter().map(|h| h.ticks as u64).sum()
    }

    pub fn last_hit_mut(&mut self) -> Option<&mut Hit> {
        self.hits.last_mut()
    }
}

/// A set of drums struck at the same time, sharing one duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub notes: Vec<Note>,
    /// Duration in ticks (96 is a quarter note)
    pub ticks: u32,
}

impl Hit {
    pub fn new(ticks: u32) -> Self {
        Hit {
            notes: Vec::new(),
            ticks,
        }
    }

    /// Builder-style note insertion, mostly for tests.
    pub fn with_note(mut self, instrument: u8, velocity: Velocity) -> Self {
        self.strike(instrument, velocity);
        self
    }

    /// Add an instrument to the hit.
    ///
    /// Striking an instrument that is already part of the hit keeps its
    /// position and replaces its velocity.
    pub fn strike(&mut self, instrument: u8, velocity: Velocity) {
        match self.notes.iter_mut().find(|n| n.instrument == instrument) {
            Some(existing) => existing.velocity = velocity,
            None => self.notes.push(Note {
                instrument,
                velocity,
            }),
        }
    }
}

/// One instrument within a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI key on the percussion channel
    pub instrument: u8,
    pub velocity: Velocity,
}

/// Strike intensity of a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Velocity {
    Pianississimo,
    Pianissimo,
    Piano,
    MezzoPiano,
    MezzoForte,
    #[default]
    Forte,
    Fortissimo,
    Fortississimo,
}

impl Velocity {
    /// MIDI velocity byte
    pub fn to_midi(&self) -> u8 {
        match self {
            Velocity::Pianississimo => 16,
            Velocity::Pianissimo => 32,
            Velocity::Piano => 48,
            Velocity::MezzoPiano => 64,
            Velocity::MezzoForte => 80,
            Velocity::Forte => 96,
            Velocity::Fortissimo => 112,
            Velocity::Fortississimo => 127,
        }
    }

    /// All levels from softest to loudest
    pub fn all() -> [Velocity; 8] {
        [
            Velocity::Pianississimo,
            Velocity::Pianissimo,
            Velocity::Piano,
            Velocity::MezzoPiano,
            Velocity::MezzoForte,
            Velocity::Forte,
            Velocity::Fortissimo,
            Velocity::Fortississimo,
        ]
    }

    /// The `+`/`-` suffix that selects this level in notation
    pub fn suffix(&self) -> &'static str {
        match self {
            Velocity::Pianississimo => "-----",
            Velocity::Pianissimo => "----",
            Velocity::Piano => "---",
            Velocity::MezzoPiano => "--",
            Velocity::MezzoForte => "-",
            Velocity::Forte => "",
            Velocity::Fortissimo => "+",
            Velocity::Fortississimo => "++",
        }
    }
}
