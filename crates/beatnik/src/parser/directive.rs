//! Directive handlers.
//!
//! A directive is a `name:value` token that changes the track itself rather
//! than adding a hit. Handlers validate the value before touching the track.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{DirectiveError, ParseErrorKind};
use crate::track::{Track, MAX_BPM, MIN_BPM};

/// A function that alters a track according to a directive value.
pub type DirectiveFn = fn(&mut Track, &str) -> Result<(), DirectiveError>;

/// Directive name (as written in notation) to its handler.
pub static DIRECTIVES: LazyLock<HashMap<&'static str, DirectiveFn>> = LazyLock::new(|| {
    let mut directives: HashMap<&'static str, DirectiveFn> = HashMap::new();
    directives.insert("bpm", bpm);
    directives
});

/// Run the handler registered under `name`.
pub fn apply(track: &mut Track, name: &str, value: &str) -> Result<(), ParseErrorKind> {
    let handler = DIRECTIVES
        .get(name)
        .ok_or_else(|| ParseErrorKind::UnknownDirective(name.to_string()))?;
    handler(track, value)?;
    Ok(())
}

/// `bpm:N` sets the track tempo.
pub fn bpm(track: &mut Track, value: &str) -> Result<(), DirectiveError> {
    let bpm: i64 = value.parse().map_err(|_| DirectiveError::NotANumber {
        value: value.to_string(),
    })?;
    if bpm < MIN_BPM as i64 || bpm > MAX_BPM as i64 {
        return Err(DirectiveError::BpmOutOfRange(bpm));
    }
    track.bpm = bpm as u32;
    Ok(())
}
