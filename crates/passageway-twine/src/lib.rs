//! Story file readers for Twine/Harlowe stories.
//!
//! Twine ships a story two ways: a compiled HTML file with embedded
//! `<tw-storydata>` markup, and the Twee 3 plain-text export. Both reduce
//! to the same thing — story metadata plus a sequence of raw passage
//! records — which `passageway-core` assembles into the queryable
//! [`Story`] graph.
//!
//! The usual entry point is [`read_story_file`]; the per-format readers in
//! [`html`] and [`twee`] are public for callers that already hold the text.

pub mod html;
pub mod twee;

use std::fs;
use std::path::Path;

use log::debug;
use passageway_core::{Story, StoryError};

/// Read a story file from disk and build its passage graph.
///
/// The format is auto-detected: a `<tw-storydata` container anywhere in
/// the file means compiled HTML, anything else is treated as Twee 3.
/// Bytes must be valid UTF-8.
pub fn read_story_file(path: impl AsRef<Path>) -> Result<Story, StoryError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let text = std::str::from_utf8(&bytes)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    read_story_str(text)
}

/// Build a story from file content already in memory.
pub fn read_story_str(text: &str) -> Result<Story, StoryError> {
    if text.contains("<tw-storydata") {
        let file = html::HtmlStoryFile::parse(text)?;
        let meta = file.meta().clone();
        Story::build(meta, file.into_records())
    } else {
        let file = twee::TweeStoryFile::parse(text)?;
        let meta = file.meta().clone();
        Story::build(meta, file.into_records())
    }
}
