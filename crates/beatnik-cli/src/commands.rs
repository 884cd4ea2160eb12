//! Subcommand implementations.
//!
//! These only move bytes around; parsing and encoding live in the beatnik
//! library.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;

use beatnik::Track;

/// Where notation came from, for messages
fn describe(path: Option<&Path>) -> String {
    match path {
        Some(p) if p != Path::new("-") => p.display().to_string(),
        _ => "<stdin>".to_string(),
    }
}

/// Read notation from a file, or stdin when the path is absent or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            fs::read_to_string(p).with_context(|| format!("Failed to read {}", p.display()))
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read notation from stdin")?;
            Ok(text)
        }
    }
}

/// Write bytes to a file, or stdout when the path is absent or `-`.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(p) if p != Path::new("-") => {
            fs::write(p, bytes).with_context(|| format!("Failed to write {}", p.display()))
        }
        _ => {
            let mut stdout = io::stdout().lock();
            if stdout.is_terminal() {
                tracing::warn!("Writing binary MIDI data to a terminal; use -o to pick a file");
            }
            stdout
                .write_all(bytes)
                .and_then(|_| stdout.flush())
                .context("Failed to write MIDI data to stdout")
        }
    }
}

/// Read and parse notation.
pub fn load_track(input: Option<&Path>) -> Result<Track> {
    let name = describe(input);
    let text = read_input(input)?;
    tracing::debug!("Read {} bytes of notation from {}", text.len(), name);

    let track = beatnik::parse(&text).with_context(|| format!("Failed to parse {}", name))?;
    tracing::info!(
        hits = track.hits.len(),
        ticks = track.total_ticks(),
        bpm = track.bpm,
        "Parsed {}",
        name
    );
    Ok(track)
}

/// Convert notation to a MIDI file.
pub fn convert(input: Option<&Path>, output: Option<&Path>, default_bpm: u32) -> Result<()> {
    let track = load_track(input)?;
    if track.bpm == 0 {
        tracing::debug!("No bpm directive, using {}", default_bpm);
    }
    let track = track.with_default_bpm(default_bpm);

    let bytes = beatnik::to_midi(&track);
    write_output(output, &bytes)?;

    tracing::info!("Wrote {} bytes of MIDI to {}", bytes.len(), match output {
        Some(p) if p != Path::new("-") => p.display().to_string(),
        _ => "<stdout>".to_string(),
    });
    Ok(())
}

/// Parse notation and report what it contains.
pub fn check(input: Option<&Path>, default_bpm: u32) -> Result<String> {
    let track = load_track(input)?;
    Ok(summarize(&track, default_bpm))
}

/// One-line description of a parsed track
pub fn summarize(track: &Track, default_bpm: u32) -> String {
    let notes: usize = track.hits.iter().map(|h| h.notes.len()).sum();
    let quarters = track.total_ticks() as f64 / beatnik::TICKS_PER_QUARTER as f64;
    let tempo = if track.bpm == 0 {
        format!("{} bpm (default)", default_bpm)
    } else {
        format!("{} bpm", track.bpm)
    };
    format!(
        "{} hits, {} notes, {} ticks ({} quarter notes), {}",
        track.hits.len(),
        notes,
        track.total_ticks(),
        quarters,
        tempo
    )
}
