//! End-to-end reads: file content in, queryable story graph out.

use passageway_core::{Story, StoryError};
use passageway_twine::{read_story_file, read_story_str};

const HTML_STORY: &str = r#"
<!DOCTYPE html>
<html><head><title>The Garden</title></head><body>
<tw-storydata name="The Garden" startnode="1" format="Harlowe" format-version="3.3.9" ifid="C0FFEE00-1111-2222-3333-444455556666" hidden>
<style role="stylesheet" id="twine-user-stylesheet" type="text/twine-css"></style>
<script role="script" id="twine-user-script" type="text/twine-javascript"></script>
<tw-passagedata pid="1" name="Gate" tags="" position="100,100" size="100,100">A wrought-iron gate. [[Push it open-&gt;Path]] or [[Look back]]</tw-passagedata>
<tw-passagedata pid="2" name="Path" tags="outdoors" position="250,100" size="100,100">Gravel crunches. [[Pond&lt;-Follow the sound of water]] [[Gate]]</tw-passagedata>
<tw-passagedata pid="3" name="Pond" tags="outdoors water" position="400,100" size="100,100">Still water. [[Secret grotto]]</tw-passagedata>
<tw-passagedata pid="4" name="Look back" tags="" position="100,250" size="100,100">The road is gone.</tw-passagedata>
<tw-passagedata pid="5" name="Shed" tags="" position="400,250" size="100,100">Nobody links here.</tw-passagedata>
</tw-storydata>
</body></html>
"#;

const TWEE_STORY: &str = r#":: StoryTitle
The Garden

:: StoryData
{
    "ifid": "C0FFEE00-1111-2222-3333-444455556666",
    "format": "Harlowe",
    "format-version": "3.3.9",
    "start": "Gate"
}

:: Gate {"position":"100,100","size":"100,100"}
A wrought-iron gate. [[Push it open->Path]] or [[Look back]]

:: Path [outdoors] {"position":"250,100","size":"100,100"}
Gravel crunches. [[Pond<-Follow the sound of water]] [[Gate]]

:: Pond [outdoors water]
Still water. [[Secret grotto]]

:: Look back
The road is gone.

:: Shed
Nobody links here.
"#;

fn assert_garden(story: &Story) {
    assert_eq!(story.title(), "The Garden");
    assert_eq!(story.start_name(), "Gate");
    assert_eq!(story.passage_count(), 5);

    // Iteration is source-ordered and restartable.
    let names: Vec<&str> = story.passages().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Gate", "Path", "Pond", "Look back", "Shed"]);
    let again: Vec<&str> = story.passages().map(|p| p.name.as_str()).collect();
    assert_eq!(names, again);

    // Display text vs target, both arrow directions.
    let gate_links = story.outgoing_links("Gate").unwrap();
    assert_eq!(gate_links[0].text, "Push it open");
    assert_eq!(gate_links[0].target, "Path");
    assert!(gate_links[0].resolved);
    assert_eq!(gate_links[1].target, "Look back");

    let path_links = story.outgoing_links("Path").unwrap();
    assert_eq!(path_links[0].text, "Follow the sound of water");
    assert_eq!(path_links[0].target, "Pond");

    // The dangling draft link is data, not an error.
    let pond_links = story.outgoing_links("Pond").unwrap();
    assert!(!pond_links[0].resolved);
    let broken = story.broken_links();
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].from, "Pond");
    assert_eq!(broken[0].link.target, "Secret grotto");

    // Shed is dead content.
    let r = story.reachable_from("Gate").unwrap();
    assert_eq!(r.reachable, vec!["Gate", "Path", "Pond", "Look back"]);
    assert_eq!(r.unreachable, vec!["Shed"]);
}

#[test]
fn html_story_builds_the_full_graph() {
    let story = read_story_str(HTML_STORY).unwrap();
    assert_garden(&story);
    assert_eq!(story.passage("Path").unwrap().tags, vec!["outdoors"]);
}

#[test]
fn twee_story_builds_the_same_graph() {
    let story = read_story_str(TWEE_STORY).unwrap();
    assert_garden(&story);
    assert_eq!(story.passage("Path").unwrap().tags, vec!["outdoors"]);
}

#[test]
fn duplicate_passages_fail_not_overwrite() {
    let html = r#"
<tw-storydata name="Dup" startnode="1">
<tw-passagedata pid="1" name="Start">one</tw-passagedata>
<tw-passagedata pid="2" name="Start">two</tw-passagedata>
</tw-storydata>
"#;
    let err = read_story_str(html).unwrap_err();
    assert!(matches!(
        err,
        StoryError::DuplicatePassageName { name } if name == "Start"
    ));
}

#[test]
fn startnode_pointing_nowhere_fails() {
    let html = r#"
<tw-storydata name="Lost" startnode="9">
<tw-passagedata pid="1" name="Start">hi</tw-passagedata>
</tw-storydata>
"#;
    let err = read_story_str(html).unwrap_err();
    assert!(matches!(err, StoryError::MissingStartPassage { .. }));
}

#[test]
fn plain_prose_is_malformed() {
    let err = read_story_str("Once upon a time, without any markup.").unwrap_err();
    assert!(matches!(err, StoryError::MalformedStoryFile { .. }));
}

/// Scratch file that cleans up after itself, named per process so
/// concurrent suite runs don't collide in the shared temp dir.
struct ScratchFile(std::path::PathBuf);

impl ScratchFile {
    fn write(name: &str, contents: impl AsRef<[u8]>) -> ScratchFile {
        let path = std::env::temp_dir().join(format!("{}-{}", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        ScratchFile(path)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        std::fs::remove_file(&self.0).ok();
    }
}

#[test]
fn reads_from_disk() {
    let file = ScratchFile::write("passageway-read-test.twee", TWEE_STORY);
    let story = read_story_file(&file.0).unwrap();
    assert_garden(&story);
}

#[test]
fn invalid_utf8_is_an_encoding_error() {
    let file = ScratchFile::write(
        "passageway-bad-utf8-test.twee",
        [0x3a, 0x3a, 0xff, 0xfe, 0x0a],
    );
    let err = read_story_file(&file.0).unwrap_err();
    assert!(matches!(err, StoryError::Encoding(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = read_story_file("/no/such/story.html").unwrap_err();
    assert!(matches!(err, StoryError::Io(_)));
}

#[test]
fn model_serializes_for_external_map_builders() {
    let story = read_story_str(TWEE_STORY).unwrap();
    let json = serde_json::to_value(&story).unwrap();
    assert_eq!(json["title"], "The Garden");
    assert_eq!(json["start"], "Gate");
    assert_eq!(json["passages"].as_array().unwrap().len(), 5);
    assert_eq!(json["passages"][0]["links"][0]["target"], "Path");
}
