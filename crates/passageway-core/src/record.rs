//! Raw passage records — the reader → model hand-off.
//!
//! Readers produce these without looking at Harlowe markup; link extraction
//! and validation happen when the model is built.

use serde::Serialize;

/// Editor-layout coordinates from a `position="x,y"` attribute.
///
/// Layout metadata only — nothing downstream depends on it, so anything that
/// doesn't parse as `x,y` is treated as absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Parse a `"x,y"` attribute value.
    pub fn parse(s: &str) -> Option<Position> {
        let (x, y) = s.split_once(',')?;
        Some(Position {
            x: x.trim().parse().ok()?,
            y: y.trim().parse().ok()?,
        })
    }
}

/// How the source file designates the entry passage.
///
/// Compiled HTML points at a passage by pid (the `startnode` attribute);
/// Twee's `StoryData` block points at it by name. [`Story::build`] resolves
/// either form to an actual passage or fails the load.
///
/// [`Story::build`]: crate::Story::build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartRef {
    Pid(u32),
    Name(String),
}

/// Story-level metadata, read once before the passage sequence.
#[derive(Debug, Clone)]
pub struct StoryMeta {
    pub title: String,
    pub start: StartRef,
}

/// One passage as it appears in the source file, body unparsed.
#[derive(Debug, Clone)]
pub struct RawPassage {
    /// Twine's numeric passage id. Absent in Twee input.
    pub pid: Option<u32>,
    pub name: String,
    /// Tags in source order (space-delimited in the file).
    pub tags: Vec<String>,
    pub position: Option<Position>,
    /// Raw Harlowe source for the passage.
    pub body: String,
}
