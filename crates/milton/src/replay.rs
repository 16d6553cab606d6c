//! JSON-lines scripts of input frames, one `MiltonInput` per line.

use std::io::{BufRead, Write};

use crate::{MiltonError, MiltonInput, MiltonState};

pub fn write_jsonl_frame(writer: &mut dyn Write, input: &MiltonInput) -> Result<(), std::io::Error> {
    serde_json::to_writer(&mut *writer, input).map_err(|error| {
        std::io::Error::other(format!("serialize input frame as JSON failed: {error}"))
    })?;
    writer.write_all(b"\n")
}

pub fn read_jsonl_frames(reader: &mut dyn BufRead) -> Result<Vec<MiltonInput>, std::io::Error> {
    let mut frames = Vec::new();
    let mut line_buffer = String::new();
    let mut line_number = 0usize;
    loop {
        line_buffer.clear();
        let bytes = reader.read_line(&mut line_buffer)?;
        if bytes == 0 {
            break;
        }
        line_number += 1;
        if line_buffer.trim().is_empty() {
            continue;
        }
        let frame = serde_json::from_str::<MiltonInput>(&line_buffer).map_err(|error| {
            std::io::Error::other(format!(
                "parse input frame JSON at line {line_number} failed: {error}"
            ))
        })?;
        frames.push(frame);
    }
    Ok(frames)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub rejected_frames: usize,
    pub stored_strokes: usize,
    pub live_points: usize,
}

/// Feeds every frame through `update`. Capacity rejections are counted,
/// any other error stops the replay.
pub fn replay_frames(
    state: &mut MiltonState,
    frames: &[MiltonInput],
) -> Result<ReplaySummary, MiltonError> {
    let mut summary = ReplaySummary::default();
    for frame in frames {
        match state.update(frame) {
            Ok(_) => {}
            Err(MiltonError::History(error)) => {
                tracing::warn!("[replay] frame={} rejected: {}", summary.frames, error);
                summary.rejected_frames += 1;
            }
            Err(error) => return Err(error),
        }
        summary.frames += 1;
    }
    summary.stored_strokes = state.history().num_stored_strokes();
    summary.live_points = state.history().in_progress_points().len();
    Ok(summary)
}
