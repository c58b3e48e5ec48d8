//! Passage-graph model for Twine stories written in Harlowe.
//!
//! A story file (compiled HTML or Twee export) is reduced by a reader to
//! story metadata plus a sequence of raw passage records. This crate turns
//! that sequence into an immutable [`Story`]: passages keyed by name, with
//! Harlowe `[[link]]` markup extracted from each body, answering lookup,
//! iteration, and reachability queries for downstream tools (text dumpers,
//! room-map builders).
//!
//! The model is load-then-query: construction validates everything fatal
//! (duplicate names, unresolvable start passage) up front, and broken links
//! — targets with no matching passage — are ordinary query output, never
//! errors. Authors leave dangling links in drafts all the time.

pub mod error;
pub mod link;
pub mod record;
pub mod story;

pub use error::StoryError;
pub use link::{extract_links, Link};
pub use record::{Position, RawPassage, StartRef, StoryMeta};
pub use story::{BrokenLink, OutgoingLink, Passage, Reachability, Story};
