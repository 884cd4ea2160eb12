//! Token shapes and hit parsing using winnow combinators.
//!
//! Classification only looks at the structure of a token. Checking the
//! pieces against the lexical tables happens afterwards so each failure
//! gets its own error.

use winnow::combinator::{alt, opt, separated, separated_pair};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::error::ParseErrorKind;
use crate::tables::{self, TRIPLET_MARK};
use crate::track::Hit;

type PResult<T> = winnow::ModalResult<T>;

/// What a token looks like, before any table lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape<'s> {
    Hit(HitShape<'s>),
    /// A bare duration suffix
    Wait(&'s str),
    Directive { name: &'s str, value: &'s str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitShape<'s> {
    pub open: bool,
    pub close: bool,
    pub notes: Vec<NoteSpec<'s>>,
    pub duration: &'s str,
}

impl HitShape<'_> {
    /// Parenthesized on both sides
    pub fn is_grace(&self) -> bool {
        self.open && self.close
    }

    /// Parenthesized on one side only
    pub fn is_half_parenthesized(&self) -> bool {
        self.open != self.close
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteSpec<'s> {
    pub instrument: &'s str,
    pub velocity: &'s str,
}

/// Classify a token by shape: hit, then wait, then directive.
pub fn classify(token: &str) -> Option<Shape<'_>> {
    if let Ok(shape) = parse_hit.parse(token) {
        return Some(Shape::Hit(shape));
    }
    if let Ok(marks) = parse_duration_suffix.parse(token) {
        return Some(Shape::Wait(marks));
    }
    parse_directive
        .parse(token)
        .ok()
        .map(|(name, value)| Shape::Directive { name, value })
}

/// Parse an instrument identifier: digits and upper-case letters
pub fn parse_instrument_id<'s>(input: &mut &'s str) -> PResult<&'s str> {
    take_while(1.., |c: char| c.is_ascii_digit() || c.is_ascii_uppercase()).parse_next(input)
}

/// Parse a velocity suffix: all `+` or all `-`, possibly empty
pub fn parse_velocity_suffix<'s>(input: &mut &'s str) -> PResult<&'s str> {
    alt((take_while(1.., '+'), take_while(0.., '-'))).parse_next(input)
}

/// Parse a duration suffix: all `.` or all `~`, then an optional triplet mark
pub fn parse_duration_suffix<'s>(input: &mut &'s str) -> PResult<&'s str> {
    (
        alt((take_while(1.., '.'), take_while(0.., '~'))),
        opt(TRIPLET_MARK),
    )
        .take()
        .parse_next(input)
}

/// Parse one `instrument[velocity]` piece of a hit
pub fn parse_note_spec<'s>(input: &mut &'s str) -> PResult<NoteSpec<'s>> {
    (parse_instrument_id, parse_velocity_suffix)
        .map(|(instrument, velocity)| NoteSpec {
            instrument,
            velocity,
        })
        .parse_next(input)
}

/// Parse a hit, optionally wrapped in grace-note parentheses
pub fn parse_hit<'s>(input: &mut &'s str) -> PResult<HitShape<'s>> {
    let open = opt('(').parse_next(input)?.is_some();
    let notes: Vec<NoteSpec<'s>> = separated(1.., parse_note_spec, ',').parse_next(input)?;
    let duration = parse_duration_suffix(input)?;
    let close = opt(')').parse_next(input)?.is_some();

    Ok(HitShape {
        open,
        close,
        notes,
        duration,
    })
}

/// Parse a `name:value` directive. The name never contains a colon.
pub fn parse_directive<'s>(input: &mut &'s str) -> PResult<(&'s str, &'s str)> {
    separated_pair(
        take_while(1.., |c: char| c != ':'),
        ':',
        take_while(0.., |_: char| true),
    )
    .parse_next(input)
}

/// Resolve a duration suffix against the duration table.
pub fn resolve_duration(suffix: &str) -> Result<u32, ParseErrorKind> {
    tables::duration(suffix).ok_or_else(|| ParseErrorKind::BadDuration(suffix.to_string()))
}

/// Turn a hit shape into a hit, checking every part against the tables.
pub fn resolve_hit(shape: &HitShape<'_>) -> Result<Hit, ParseErrorKind> {
    let mut hit = Hit::new(0);

    for spec in &shape.notes {
        let instrument = tables::instrument(spec.instrument)
            .ok_or_else(|| ParseErrorKind::BadInstrument(spec.instrument.to_string()))?;
        let velocity = tables::velocity(spec.velocity)
            .ok_or_else(|| ParseErrorKind::BadVelocity(spec.velocity.to_string()))?;
        hit.strike(instrument, velocity);
    }

    hit.ticks = resolve_duration(shape.duration)?;
    Ok(hit)
}
