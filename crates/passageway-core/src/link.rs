//! Harlowe link extraction.
//!
//! Harlowe has three link forms:
//!
//! - `[[text->target]]` — display text on the left
//! - `[[target<-text]]` — display text on the right
//! - `[[target]]` — display text is the target name
//!
//! Extraction is a single left-to-right scan collecting non-overlapping
//! bracket sequences. It deliberately knows nothing about the rest of the
//! macro language: hooks, changers, and `(link-goto:)`-style macros are out
//! of scope for the graph.

use serde::Serialize;

/// One outgoing link: display text plus target passage name.
///
/// For `[[target]]` links the text *is* the target. Neither side is
/// whitespace-trimmed; Harlowe keeps the spaces too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub target: String,
}

impl Link {
    fn new(text: &str, target: &str) -> Link {
        Link {
            text: text.to_string(),
            target: target.to_string(),
        }
    }
}

/// Scan a passage body for `[[...]]` link markup, in source order.
///
/// Matches Harlowe's own tokenizer where it matters for graph building:
///
/// - an opener is exactly `[[` — three or more brackets open nested hooks,
///   not links, and the whole run is skipped;
/// - contents run to the first `]`, which must be followed by a second `]`;
///   unterminated or mis-closed sequences are skipped, never fatal;
/// - the *last* `->` splits text from target (`[[a->b->c->d]]` targets `d`),
///   otherwise the *first* `<-` does (`[[d<-c<-b<-a]]` targets `d`), with
///   both sides required non-empty — otherwise the whole contents are a
///   plain `[[target]]` link.
pub fn extract_links(body: &str) -> Vec<Link> {
    let mut links = Vec::new();
    let mut rest = body;

    while let Some(open) = rest.find("[[") {
        let after = &rest[open + 2..];

        if after.starts_with('[') {
            // Bracket run of three or more: nested hook syntax, so the run
            // itself never opens a link. Scanning resumes right after the
            // run; hook contents are treated as plain body text and any
            // bracket pairs they form are deliberately not graph links.
            let run = after.len() - after.trim_start_matches('[').len();
            rest = &after[run..];
            continue;
        }

        let Some(close) = after.find(']') else {
            break; // unterminated, nothing more to find
        };
        if !after[close + 1..].starts_with(']') {
            // Single `]` — not a link; resume past it.
            rest = &after[close + 1..];
            continue;
        }

        if let Some(link) = split_link(&after[..close]) {
            links.push(link);
        }
        rest = &after[close + 2..];
    }

    links
}

/// Split link contents into (text, target) per Harlowe's arrow rules.
fn split_link(contents: &str) -> Option<Link> {
    if contents.is_empty() {
        return None;
    }

    // Rightmost `->` with non-empty sides wins.
    let mut hi = contents.len();
    while let Some(idx) = contents[..hi].rfind("->") {
        let (text, target) = (&contents[..idx], &contents[idx + 2..]);
        if !text.is_empty() && !target.is_empty() {
            return Some(Link::new(text, target));
        }
        hi = idx + 1;
    }

    // Leftmost `<-` with non-empty sides.
    let mut lo = 0;
    while let Some(off) = contents[lo..].find("<-") {
        let idx = lo + off;
        let (target, text) = (&contents[..idx], &contents[idx + 2..]);
        if !target.is_empty() && !text.is_empty() {
            return Some(Link::new(text, target));
        }
        lo = idx + 1;
    }

    Some(Link::new(contents, contents))
}
