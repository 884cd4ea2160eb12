//! Drum notation parser and MIDI generator.
//!
//! This crate parses a compact text notation for drum patterns into a
//! [`Track`], and converts that track to a Standard MIDI File.
//!
//! # Notation
//!
//! Tokens are separated by whitespace; `#` starts a comment.
//!
//! - `36`, `K,HH`: a hit on one or more drums (MIDI key or kit alias)
//! - `36+`, `HH--`: velocity up (`+`, `++`) or down (`-` to `-----`)
//! - `36.`, `36~`, `36.>`: eighth, half, eighth triplet; no suffix is a quarter
//! - `..`: a bare duration stretches the previous hit
//! - `(38.)`: a grace note, taking its time from the previous hit
//! - `bpm:90`: set the tempo
//!
//! # Example
//!
//! ```
//! use beatnik::{parse, to_midi};
//!
//! let beat = r#"
//! bpm:100
//! K,HH. HH. S,HH. HH.   # kick, hat, snare, hat
//! "#;
//!
//! let track = parse(beat).expect("valid notation");
//! assert_eq!(track.hits.len(), 4);
//!
//! let midi_bytes = to_midi(&track);
//! assert_eq!(&midi_bytes[0..4], b"MThd");
//! ```

pub mod error;
pub mod kit;
pub mod midi;
pub mod parser;
pub mod tables;
pub mod track;
pub mod vlq;

pub use error::{DirectiveError, ParseError, ParseErrorKind};
pub use track::*;

/// Parse drum notation into a Track.
///
/// Stops at the first bad token; no partial track is returned.
pub fn parse(input: &str) -> Result<Track, ParseError> {
    parser::parse(input)
}

/// Convert a parsed Track to MIDI bytes (SMF format 1).
///
/// A track with no tempo is written at [`DEFAULT_BPM`].
pub fn to_midi(track: &Track) -> Vec<u8> {
    midi::encode(track)
}
