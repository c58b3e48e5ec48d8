//! The assembled story graph and its query surface.

use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;
use serde::Serialize;

use crate::error::StoryError;
use crate::link::{extract_links, Link};
use crate::record::{Position, RawPassage, StartRef, StoryMeta};

/// One unit of story content, with links already extracted from its body.
#[derive(Debug, Clone, Serialize)]
pub struct Passage {
    /// Twine's numeric passage id, when the source file had one.
    pub pid: Option<u32>,
    pub name: String,
    pub tags: Vec<String>,
    pub position: Option<Position>,
    /// Raw Harlowe source.
    pub body: String,
    /// Outgoing links in left-to-right body order. Targets are not
    /// guaranteed to exist — see [`Story::outgoing_links`].
    pub links: Vec<Link>,
}

/// An immutable story: passages keyed by name, plus title and entry point.
///
/// Built once from a reader's record sequence, queried any number of times.
/// Passage iteration order is the source file's order, so repeated
/// traversals are deterministic.
#[derive(Debug, Serialize)]
pub struct Story {
    title: String,
    /// Name of the entry passage. Always resolvable; validated at build.
    start: String,
    passages: Vec<Passage>,
    #[serde(skip)]
    by_name: HashMap<String, usize>,
}

/// One entry of [`Story::outgoing_links`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutgoingLink<'a> {
    pub target: &'a str,
    pub text: &'a str,
    /// False when no passage has the target's name — a broken link.
    pub resolved: bool,
}

/// Result of [`Story::reachable_from`]: which passages the graph walk hit,
/// and which it could never hit (dead content). Both in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reachability {
    pub reachable: Vec<String>,
    pub unreachable: Vec<String>,
}

/// A link whose target name matches no passage, with its source passage.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BrokenLink<'a> {
    pub from: &'a str,
    pub link: &'a Link,
}

impl Story {
    /// Materialize a record sequence into a story graph.
    ///
    /// Records are consumed in order; that order becomes the iteration
    /// order of [`Story::passages`]. Fails on a duplicate passage name or a
    /// start reference that matches no record. Broken body links are fine —
    /// they're recorded and surfaced by the queries, not rejected here.
    pub fn build(
        meta: StoryMeta,
        records: impl IntoIterator<Item = RawPassage>,
    ) -> Result<Story, StoryError> {
        let mut passages = Vec::new();
        let mut by_name = HashMap::new();

        for rec in records {
            if by_name.contains_key(&rec.name) {
                return Err(StoryError::DuplicatePassageName { name: rec.name });
            }
            let links = extract_links(&rec.body);
            by_name.insert(rec.name.clone(), passages.len());
            passages.push(Passage {
                pid: rec.pid,
                name: rec.name,
                tags: rec.tags,
                position: rec.position,
                body: rec.body,
                links,
            });
        }

        let start = match &meta.start {
            StartRef::Pid(pid) => passages
                .iter()
                .find(|p| p.pid == Some(*pid))
                .map(|p| p.name.clone())
                .ok_or_else(|| StoryError::MissingStartPassage {
                    reference: format!("pid {pid}"),
                })?,
            StartRef::Name(name) => {
                if !by_name.contains_key(name) {
                    return Err(StoryError::MissingStartPassage {
                        reference: name.clone(),
                    });
                }
                name.clone()
            }
        };

        debug!(
            "built story {:?}: {} passages, start {:?}",
            meta.title,
            passages.len(),
            start
        );

        Ok(Story {
            title: meta.title,
            start,
            passages,
            by_name,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Name of the entry passage.
    pub fn start_name(&self) -> &str {
        &self.start
    }

    /// The entry passage itself.
    pub fn start(&self) -> &Passage {
        &self.passages[self.by_name[&self.start]]
    }

    /// Look up a passage by name.
    pub fn passage(&self, name: &str) -> Option<&Passage> {
        self.by_name.get(name).map(|&i| &self.passages[i])
    }

    /// Iterate all passages in source order. Restartable — call as often
    /// as you like, the order never changes.
    pub fn passages(&self) -> impl Iterator<Item = &Passage> {
        self.passages.iter()
    }

    pub fn passage_count(&self) -> usize {
        self.passages.len()
    }

    /// The outgoing links of `name`, each flagged with whether its target
    /// resolves to a passage. `None` when `name` itself is unknown.
    pub fn outgoing_links(&self, name: &str) -> Option<Vec<OutgoingLink<'_>>> {
        let passage = self.passage(name)?;
        Some(
            passage
                .links
                .iter()
                .map(|l| OutgoingLink {
                    target: &l.target,
                    text: &l.text,
                    resolved: self.by_name.contains_key(&l.target),
                })
                .collect(),
        )
    }

    /// Breadth-first walk from `name`, following only resolvable links.
    ///
    /// A visited set guards against cycles, and broken links simply lead
    /// nowhere. The unreachable half is what a room map wants to flag as
    /// dead content. `None` when `name` is unknown.
    pub fn reachable_from(&self, name: &str) -> Option<Reachability> {
        self.passage(name)?;

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        visited.insert(name);
        queue.push_back(name);

        while let Some(current) = queue.pop_front() {
            for link in &self.passages[self.by_name[current]].links {
                if self.by_name.contains_key(&link.target) && visited.insert(&link.target) {
                    queue.push_back(&link.target);
                }
            }
        }

        // Report both halves in source order, not traversal order.
        let mut reachable = Vec::new();
        let mut unreachable = Vec::new();
        for p in &self.passages {
            if visited.contains(p.name.as_str()) {
                reachable.push(p.name.clone());
            } else {
                unreachable.push(p.name.clone());
            }
        }

        Some(Reachability {
            reachable,
            unreachable,
        })
    }

    /// Every link in the story whose target matches no passage.
    pub fn broken_links(&self) -> Vec<BrokenLink<'_>> {
        let mut broken = Vec::new();
        for passage in &self.passages {
            for link in &passage.links {
                if !self.by_name.contains_key(&link.target) {
                    broken.push(BrokenLink {
                        from: &passage.name,
                        link,
                    });
                }
            }
        }
        if !broken.is_empty() {
            debug!("story {:?} has {} broken links", self.title, broken.len());
        }
        broken
    }
}
