//! Drum notation parser.
//!
//! Tokens are handled strictly in order and the first bad token aborts the
//! parse. Hits append to the track, waits stretch the last hit, grace notes
//! borrow time from the last hit, and directives change track metadata.

pub mod directive;
pub mod hit;
pub mod token;

use crate::error::{ParseError, ParseErrorKind};
use crate::track::Track;
use crate::vlq;

use hit::{HitShape, Shape};
use token::Token;

/// Parse drum notation into a Track.
pub fn parse(input: &str) -> Result<Track, ParseError> {
    let mut track = Track::new();

    for token in token::tokenize(input) {
        apply_token(&mut track, &token)
            .map_err(|kind| ParseError::new(token.index, token.text, kind))?;
    }

    Ok(track)
}

/// Apply a single token to the track being built.
fn apply_token(track: &mut Track, token: &Token<'_>) -> Result<(), ParseErrorKind> {
    match hit::classify(token.text) {
        Some(Shape::Hit(shape)) => apply_hit(track, &shape),
        Some(Shape::Wait(marks)) => apply_wait(track, marks),
        Some(Shape::Directive { name, value }) => directive::apply(track, name, value),
        None => Err(ParseErrorKind::UnrecognizedToken),
    }
}

fn apply_hit(track: &mut Track, shape: &HitShape<'_>) -> Result<(), ParseErrorKind> {
    if shape.is_half_parenthesized() {
        return Err(ParseErrorKind::UnbalancedGrace);
    }

    let hit = hit::resolve_hit(shape)?;

    // A grace note takes its time out of the hit before it
    if shape.is_grace() {
        if let Some(host) = track.last_hit_mut() {
            if host.ticks <= hit.ticks {
                return Err(ParseErrorKind::GraceTooLong {
                    grace: hit.ticks,
                    host: host.ticks,
                });
            }
            host.ticks -= hit.ticks;
        }
    }

    track.hits.push(hit);
    Ok(())
}

fn apply_wait(track: &mut Track, marks: &str) -> Result<(), ParseErrorKind> {
    let ticks = hit::resolve_duration(marks)?;
    let last = track
        .last_hit_mut()
        .ok_or(ParseErrorKind::WaitWithoutHit)?;

    // Must still fit a note-off delta
    let total = u64::from(last.ticks) + u64::from(ticks);
    last.ticks = u32::try_from(total)
        .ok()
        .filter(|t| *t <= vlq::MAX)
        .ok_or(ParseErrorKind::DurationTooLong { ticks: total })?;
    Ok(())
}
