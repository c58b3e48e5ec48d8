//! Twee 3 plain-text story parsing.
//!
//! Twee is Twine's text export. Each passage starts with a `::` header
//! line carrying the name, optional `[tag tag]` list, and optional `{...}`
//! JSON metadata (editor position and size); everything until the next
//! header is the body. `StoryTitle` and `StoryData` are special passages
//! holding story-level metadata — they feed the meta block and never
//! become passage records.

use log::debug;
use passageway_core::{Position, RawPassage, StartRef, StoryError, StoryMeta};
use serde::Deserialize;

/// The pieces of a `StoryData` JSON block the graph cares about.
#[derive(Debug, Deserialize)]
struct StoryDataBlock {
    start: Option<String>,
}

/// Per-passage header metadata, e.g. `{"position":"600,400","size":"100,100"}`.
#[derive(Debug, Deserialize)]
struct PassageMetadata {
    position: Option<String>,
}

/// A Twee 3 story file: metadata plus extracted passage records.
#[derive(Debug)]
pub struct TweeStoryFile {
    meta: StoryMeta,
    records: Vec<RawPassage>,
}

struct Header {
    name: String,
    tags: Vec<String>,
    position: Option<Position>,
}

impl TweeStoryFile {
    /// Parse Twee 3 text into metadata and passage records.
    ///
    /// Text before the first header is ignored. A file with no `::`
    /// headers at all is malformed. When `StoryData` names no start
    /// passage, the conventional default name `Start` is used (as the
    /// Twee compilers do); whether that resolves is the model's call.
    pub fn parse(text: &str) -> Result<TweeStoryFile, StoryError> {
        let mut title = String::new();
        let mut start_name: Option<String> = None;
        let mut records: Vec<RawPassage> = Vec::new();
        let mut current: Option<(Header, Vec<&str>)> = None;

        let mut flush = |header: Header, body_lines: Vec<&str>| {
            let body = body_lines.join("\n").trim_end().to_string();
            match header.name.as_str() {
                "StoryTitle" => title = body.trim().to_string(),
                "StoryData" => match serde_json::from_str::<StoryDataBlock>(&body) {
                    Ok(data) => start_name = data.start,
                    Err(e) => debug!("ignoring unparseable StoryData block: {e}"),
                },
                // Stylesheet/script passages carry no story content.
                "StoryStylesheet" | "StoryScript" => {}
                _ => records.push(RawPassage {
                    pid: None,
                    name: header.name,
                    tags: header.tags,
                    position: header.position,
                    body,
                }),
            }
        };

        for line in text.lines() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if let Some(rest) = line.strip_prefix("::") {
                if let Some((header, body_lines)) = current.take() {
                    flush(header, body_lines);
                }
                current = Some((parse_header(rest), Vec::new()));
            } else if let Some((_, body_lines)) = current.as_mut() {
                // `\::` at line start escapes a literal double colon.
                if line.starts_with("\\::") {
                    body_lines.push(&line[1..]);
                } else {
                    body_lines.push(line);
                }
            }
        }
        if let Some((header, body_lines)) = current.take() {
            flush(header, body_lines);
        }

        if records.is_empty() {
            return Err(StoryError::MalformedStoryFile {
                reason: "no :: passage headers found".into(),
            });
        }

        let start = start_name.unwrap_or_else(|| "Start".to_string());
        debug!(
            "parsed {} passage records from Twee story {:?}",
            records.len(),
            title
        );

        Ok(TweeStoryFile {
            meta: StoryMeta {
                title,
                start: StartRef::Name(start),
            },
            records,
        })
    }

    /// Story-level metadata, available before consuming the records.
    pub fn meta(&self) -> &StoryMeta {
        &self.meta
    }

    /// Consume the file, yielding records in source order. Forward-only.
    pub fn into_records(self) -> impl Iterator<Item = RawPassage> {
        self.records.into_iter()
    }
}

/// Split a header line (after the `::`) into name, tags, and metadata.
fn parse_header(rest: &str) -> Header {
    let mut rest = rest.trim();
    let mut position = None;

    if rest.ends_with('}') {
        if let Some(idx) = find_unescaped(rest, '{') {
            if let Ok(meta) = serde_json::from_str::<PassageMetadata>(&rest[idx..]) {
                position = meta.position.as_deref().and_then(Position::parse);
            }
            rest = rest[..idx].trim_end();
        }
    }

    let mut tags = Vec::new();
    if rest.ends_with(']') && !rest.ends_with("\\]") {
        if let Some(idx) = find_unescaped(rest, '[') {
            tags = rest[idx + 1..rest.len() - 1]
                .split_whitespace()
                .map(String::from)
                .collect();
            rest = rest[..idx].trim_end();
        }
    }

    Header {
        name: unescape_name(rest.trim()),
        tags,
        position,
    }
}

/// Rightmost occurrence of `c` not preceded by a backslash.
fn find_unescaped(s: &str, c: char) -> Option<usize> {
    let mut search = s;
    while let Some(idx) = search.rfind(c) {
        if !search[..idx].ends_with('\\') {
            return Some(idx);
        }
        search = &search[..idx];
    }
    None
}

/// Strip the backslash from `\[`, `\]`, `\{`, `\}` escapes in passage names.
fn unescape_name(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && matches!(chars.peek(), Some('[' | ']' | '{' | '}')) {
            continue;
        }
        out.push(c);
    }
    out
}
