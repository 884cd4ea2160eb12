//! MIDI generation from a parsed Track.
//!
//! Generates Standard MIDI File (SMF) format 1 with two tracks: a metadata
//! track (time signature, tempo) and a note track on the percussion channel.

use crate::track::{Hit, Track, TICKS_PER_QUARTER};
use crate::vlq;

/// MIDI channel 10, zero-based
pub const PERCUSSION_CHANNEL: u8 = 9;

/// Release velocity written on every note-off
pub const NOTE_OFF_VELOCITY: u8 = 64;

/// Largest tempo value a 3-byte tempo meta event can hold
pub const MAX_TEMPO: u32 = 0xFF_FFFF;

const META_TIME_SIGNATURE: u8 = 0x58;
const META_TEMPO: u8 = 0x51;
const META_END_OF_TRACK: u8 = 0x2F;

const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;

/// Standard MIDI File format 1: simultaneous tracks
const FORMAT_PARALLEL: u16 = 1;

/// Generate MIDI bytes from a track.
///
/// Never fails. A hit longer than [`vlq::MAX`] ticks is cut to that length;
/// parsed tracks never contain one.
pub fn encode(track: &Track) -> Vec<u8> {
    let mut meta = ChunkWriter::default();
    meta.time_signature(4, 4);
    meta.tempo(track.effective_bpm());

    let mut drums = ChunkWriter::default();
    for hit in &track.hits {
        drums.hit(hit);
    }

    let chunks = [meta.finish(), drums.finish()];

    let mut out = Vec::new();
    out.extend_from_slice(b"MThd");
    out.extend_from_slice(&6u32.to_be_bytes());
    out.extend_from_slice(&FORMAT_PARALLEL.to_be_bytes());
    out.extend_from_slice(&(chunks.len() as u16).to_be_bytes());
    out.extend_from_slice(&TICKS_PER_QUARTER.to_be_bytes());
    for body in &chunks {
        out.extend_from_slice(b"MTrk");
        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
        out.extend_from_slice(body);
    }
    out
}

/// Microseconds per beat for a tempo, rounded and clamped to 24 bits.
pub fn microseconds_per_beat(bpm: u32) -> u32 {
    let bpm = bpm.max(1);
    ((60_000_000 + bpm / 2) / bpm).min(MAX_TEMPO)
}

/// Body of one MTrk chunk, written event by event.
///
/// Time passes with [`ChunkWriter::rest`] and is written as the delta of the
/// next event, so no absolute tick is ever kept.
#[derive(Default)]
struct ChunkWriter {
    body: Vec<u8>,
    pending: u32,
}

impl ChunkWriter {
    fn time_signature(&mut self, numerator: u8, denominator: u8) {
        let denom_pow = denominator.trailing_zeros() as u8;
        // 24 MIDI clocks per metronome click, 8 32nd notes per quarter
        self.meta_event(META_TIME_SIGNATURE, &[numerator, denom_pow, 24, 8]);
    }

    fn tempo(&mut self, bpm: u32) {
        let [_, hi, mid, lo] = microseconds_per_beat(bpm).to_be_bytes();
        self.meta_event(META_TEMPO, &[hi, mid, lo]);
    }

    /// Strike every note of the hit, hold for its duration, release them all.
    fn hit(&mut self, hit: &Hit) {
        for note in &hit.notes {
            let velocity = note.velocity.to_midi();
            self.event(&[NOTE_ON | PERCUSSION_CHANNEL, note.instrument, velocity]);
        }
        self.rest(hit.ticks);
        for note in &hit.notes {
            let key = note.instrument;
            self.event(&[NOTE_OFF | PERCUSSION_CHANNEL, key, NOTE_OFF_VELOCITY]);
        }
    }

    fn rest(&mut self, ticks: u32) {
        self.pending = self.pending.saturating_add(ticks).min(vlq::MAX);
    }

    fn meta_event(&mut self, kind: u8, data: &[u8]) {
        let mut event = vec![0xFF, kind];
        vlq::write(&mut event, data.len() as u32);
        event.extend_from_slice(data);
        self.event(&event);
    }

    fn event(&mut self, data: &[u8]) {
        vlq::write(&mut self.body, self.pending);
        self.pending = 0;
        self.body.extend_from_slice(data);
    }

    fn finish(mut self) -> Vec<u8> {
        self.meta_event(META_END_OF_TRACK, &[]);
        self.body
    }
}
