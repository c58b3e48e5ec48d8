//! Twine 2 compiled-HTML extraction.
//!
//! A published Twine story is one HTML file with an embedded
//! `<tw-storydata>` element holding a `<tw-passagedata>` child per passage.
//! This module locates that container and reads the raw records out of it.
//! Passage bodies stay unparsed — Harlowe link extraction is the model
//! layer's job.

use log::debug;
use passageway_core::{Position, RawPassage, StartRef, StoryError, StoryMeta};
use scraper::{Html, Selector};

/// A compiled-HTML story file: metadata plus extracted passage records.
#[derive(Debug)]
pub struct HtmlStoryFile {
    meta: StoryMeta,
    records: Vec<RawPassage>,
}

impl HtmlStoryFile {
    /// Parse the `<tw-storydata>` container out of an HTML document.
    ///
    /// Story attributes (`name`, `startnode`) are read off the container;
    /// each `<tw-passagedata>` child becomes one record, entity references
    /// in bodies decoded. Attribute order doesn't matter and missing
    /// optional attributes are tolerated, but a document with no container
    /// or no passages is malformed.
    pub fn parse(html: &str) -> Result<HtmlStoryFile, StoryError> {
        let document = Html::parse_document(html);

        let story_sel = Selector::parse("tw-storydata").unwrap();
        let sd = document
            .select(&story_sel)
            .next()
            .ok_or_else(|| StoryError::MalformedStoryFile {
                reason: "no <tw-storydata> element found".into(),
            })?;

        let title = sd.attr("name").unwrap_or_default().to_string();
        // Twine writes startnode on every published story; 1 is its own
        // fallback for ancient exports that omit it.
        let start_pid: u32 = sd
            .attr("startnode")
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        let passage_sel = Selector::parse("tw-passagedata").unwrap();
        let records: Vec<RawPassage> = document
            .select(&passage_sel)
            .map(|pd| {
                let pid = pd.attr("pid").and_then(|v| v.parse().ok());
                let name = pd.attr("name").unwrap_or_default().to_string();
                let tags = pd
                    .attr("tags")
                    .map(|t| t.split_whitespace().map(String::from).collect())
                    .unwrap_or_default();
                let position = pd.attr("position").and_then(Position::parse);
                let body: String = pd.text().collect();
                RawPassage {
                    pid,
                    name,
                    tags,
                    position,
                    body,
                }
            })
            .collect();

        if records.is_empty() {
            return Err(StoryError::MalformedStoryFile {
                reason: "story data contains no passages".into(),
            });
        }

        debug!(
            "extracted {} passage records from story {:?}",
            records.len(),
            title
        );

        Ok(HtmlStoryFile {
            meta: StoryMeta {
                title,
                start: StartRef::Pid(start_pid),
            },
            records,
        })
    }

    /// Story-level metadata, available before consuming the records.
    pub fn meta(&self) -> &StoryMeta {
        &self.meta
    }

    /// Consume the file, yielding records in document order. Forward-only;
    /// re-parse if you need the sequence again.
    pub fn into_records(self) -> impl Iterator<Item = RawPassage> {
        self.records.into_iter()
    }
}
