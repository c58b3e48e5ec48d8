//! Error type shared by the readers and the model.

use thiserror::Error;

/// Everything that can abort a story load.
///
/// File-level failures (`MalformedStoryFile`, `Encoding`, `Io`) come from the
/// readers; construction-level failures (`DuplicatePassageName`,
/// `MissingStartPassage`) come from [`Story::build`](crate::Story::build).
/// Either way the whole load fails — no partial model is ever exposed.
///
/// Query misses are *not* errors: lookups return `Option`, and broken links
/// are regular query output.
#[derive(Debug, Error)]
pub enum StoryError {
    /// The expected container structure is absent or unusable — e.g. no
    /// `<tw-storydata>` element in an HTML file, or no `::` passage headers
    /// in a Twee file.
    #[error("malformed story file: {reason}")]
    MalformedStoryFile { reason: String },

    /// The file's bytes are not valid UTF-8.
    #[error("story file is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// Reading the input file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Two passage records share a name. Names are the graph's keys, so
    /// this is never silently resolved by overwriting.
    #[error("duplicate passage name {name:?}")]
    DuplicatePassageName { name: String },

    /// The story's start reference (a `startnode` pid or a passage name)
    /// matches no passage record.
    #[error("start passage reference {reference:?} does not match any passage")]
    MissingStartPassage { reference: String },
}
