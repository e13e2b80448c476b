//! Landmark sources feeding the decoder.
//!
//! A [`LandmarkProvider`] hands out one [`LandmarkFrame`] per sensor frame.
//! [`ReplayProvider`] reads recorded frames from JSON Lines, one object per
//! line:
//!
//! ```text
//! {"t": 0.033, "left": [[x, y], ...6], "right": [[x, y], ...6]}
//! {"t": 0.066, "mesh": [[x, y], ...]}
//! {"t": 0.100}
//! ```
//!
//! The first form carries pre-selected eye points, the second a full face
//! mesh from which the eyes are picked by index, the third means no face.

use crate::{
    constants::{EYE_LANDMARK_COUNT, LEFT_EYE_INDICES, RIGHT_EYE_INDICES},
    geometry::{EyeLandmarkSet, EyePair, Point2},
    Error, Result,
};
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// One sensor frame
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    /// Capture time in seconds on a monotonic clock
    pub timestamp: f64,
    /// Eyes of the tracked face, `None` if no face was found
    pub face: Option<EyePair>,
}

/// Source of landmark frames
pub trait LandmarkProvider {
    /// Next frame, or `None` once the source is exhausted
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails or yields a malformed frame
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>>;
}

/// Mesh indices selecting each eye's six points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeIndices {
    /// Left eye indices
    pub left: [usize; EYE_LANDMARK_COUNT],
    /// Right eye indices
    pub right: [usize; EYE_LANDMARK_COUNT],
}

impl Default for EyeIndices {
    fn default() -> Self {
        Self {
            left: LEFT_EYE_INDICES,
            right: RIGHT_EYE_INDICES,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FrameRecord {
    t: f64,
    #[serde(default)]
    left: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    right: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    mesh: Option<Vec<[f64; 2]>>,
}

fn eye_from_points(points: &[[f64; 2]], line: usize, side: &str) -> Result<EyeLandmarkSet> {
    if points.len() != EYE_LANDMARK_COUNT {
        return Err(Error::LandmarkError {
            line,
            reason: format!("{side} eye has {} points, expected {EYE_LANDMARK_COUNT}", points.len()),
        });
    }
    let mut set = [Point2::default(); EYE_LANDMARK_COUNT];
    for (slot, &point) in set.iter_mut().zip(points) {
        *slot = Point2::from(point);
    }
    Ok(EyeLandmarkSet::new(set))
}

/// Parse one JSON Lines record into a frame
///
/// # Errors
///
/// Returns [`Error::LandmarkError`] describing what is wrong with the record
pub fn parse_frame(raw: &str, line: usize, indices: &EyeIndices) -> Result<LandmarkFrame> {
    let record: FrameRecord = serde_json::from_str(raw).map_err(|e| Error::LandmarkError {
        line,
        reason: e.to_string(),
    })?;

    if !record.t.is_finite() {
        return Err(Error::LandmarkError {
            line,
            reason: format!("timestamp {} is not finite", record.t),
        });
    }

    let face = match (record.left, record.right, record.mesh) {
        (Some(left), Some(right), None) => Some(EyePair::new(
            eye_from_points(&left, line, "left")?,
            eye_from_points(&right, line, "right")?,
        )),
        (None, None, Some(mesh)) => {
            let mesh: Vec<Point2> = mesh.into_iter().map(Point2::from).collect();
            let pair = EyePair::from_mesh(&mesh, &indices.left, &indices.right).map_err(|e| {
                Error::LandmarkError {
                    line,
                    reason: e.to_string(),
                }
            })?;
            Some(pair)
        }
        (None, None, None) => None,
        _ => {
            return Err(Error::LandmarkError {
                line,
                reason: "expected both 'left' and 'right', or 'mesh', or neither".to_string(),
            })
        }
    };

    Ok(LandmarkFrame {
        timestamp: record.t,
        face,
    })
}

/// Replays recorded landmark frames from a JSON Lines stream
pub struct ReplayProvider<R> {
    reader: R,
    indices: EyeIndices,
    line: usize,
    buffer: Vec<u8>,
}

impl ReplayProvider<BufReader<File>> {
    /// Open a recording on disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened
    pub fn open<P: AsRef<Path>>(path: P, indices: EyeIndices) -> Result<Self> {
        log::info!("Replaying landmarks from {}", path.as_ref().display());
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), indices))
    }
}

impl<R: BufRead> ReplayProvider<R> {
    /// Replay from any buffered reader
    pub fn new(reader: R, indices: EyeIndices) -> Self {
        Self {
            reader,
            indices,
            line: 0,
            buffer: Vec::new(),
        }
    }
}

impl<R: BufRead> LandmarkProvider for ReplayProvider<R> {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        loop {
            self.buffer.clear();
            if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = std::str::from_utf8(&self.buffer).map_err(|e| Error::LandmarkError {
                line: self.line,
                reason: format!("not valid UTF-8: {e}"),
            })?;
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return parse_frame(trimmed, self.line, &self.indices).map(Some);
        }
    }
}
