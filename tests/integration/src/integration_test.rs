//! End-to-end integration tests
//!
//! These tests exercise the complete flow: export file -> parse -> per-entry
//! post extraction -> rendered content files on disk.

use mtexport_hugo::{ConvertConfig, Converter, Post, front_matter};
use mtexport_parser::{EntryStmt, MultilineKeys, SectionStmt, parse, parse_str};
use pretty_assertions::assert_eq;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::thread;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/exports")
        .join(name)
}

/// Build an export with `count` well-formed entries.
fn generated_export(count: usize) -> String {
    let mut export = String::new();
    for i in 0..count {
        export.push_str(&format!(
            "TITLE: Post {i}\nBASENAME: post-{i}\nSTATUS: {}\nDATE: 01/{:02}/2020 10:00:00\n\
             CATEGORY: batch\nCATEGORY: n{i}\n-----\nBODY:\nBody of post {i}.\n-----\n--------\n",
            if i % 2 == 0 { "Publish" } else { "Draft" },
            i % 28 + 1,
        ));
    }
    export
}

fn split_front_matter(content: &str) -> (toml::Table, &str) {
    let rest = content.strip_prefix("+++\n").unwrap();
    let (front, body) = rest.split_once("+++\n").unwrap();
    (front.parse().unwrap(), body)
}

#[test]
fn test_fixture_structure() {
    let file = File::open(fixture("sample.txt")).unwrap();
    let keys = MultilineKeys::builtin().with_extra(["IMAGE"]);
    let entries = parse(file, &keys).unwrap();

    assert_eq!(entries.len(), 4);
    let kinds: Vec<Vec<&str>> = entries
        .iter()
        .map(|entry| {
            entry
                .sections
                .iter()
                .map(|section| match section {
                    SectionStmt::Normal(_) => "fields",
                    SectionStmt::Multiline(block) => block.key.as_str(),
                })
                .collect()
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            vec!["fields", "BODY", "EXTENDED BODY", "EXCERPT", "KEYWORDS", "COMMENT"],
            vec!["fields", "BODY"],
            vec!["fields", "BODY", "IMAGE"],
            vec!["fields", "BODY"],
        ]
    );
}

#[test]
fn test_large_export_round_trip() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("export.txt");
    fs::write(&input, generated_export(200)).unwrap();

    let converter = Converter::new(ConvertConfig {
        output_dir: temp.path().join("content"),
        timezone: "UTC".to_string(),
        ..Default::default()
    })
    .unwrap();
    let report = converter.convert_file(&input).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.written().count(), 200);

    let content = fs::read_to_string(temp.path().join("content/post-7.md")).unwrap();
    let (front, body) = split_front_matter(&content);
    assert_eq!(front["title"].as_str(), Some("Post 7"));
    assert_eq!(front["draft"].as_bool(), Some(true));
    assert_eq!(front["date"].as_str(), Some("2020-01-08T10:00:00+00:00"));
    let tags: Vec<&str> = front["tags"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t.as_str())
        .collect();
    assert_eq!(tags, vec!["batch", "n7"]);
    assert_eq!(body, "Body of post 7.\n");
}

#[test]
fn test_entries_convert_independently_across_threads() {
    let temp = TempDir::new().unwrap();
    let entries: Vec<EntryStmt> =
        parse_str(&generated_export(16), &MultilineKeys::builtin()).unwrap();
    let converter = Converter::new(ConvertConfig {
        output_dir: temp.path().to_path_buf(),
        timezone: "UTC".to_string(),
        ..Default::default()
    })
    .unwrap();

    let converter = &converter;
    let paths: Vec<PathBuf> = thread::scope(|scope| {
        let handles: Vec<_> = entries
            .iter()
            .map(|entry| scope.spawn(move || converter.convert_entry(entry).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(paths.len(), 16);
    for (i, path) in paths.iter().enumerate() {
        assert_eq!(path, &temp.path().join(format!("post-{i}.md")));
        assert!(path.exists());
    }
}

#[test]
fn test_render_matches_library_pipeline() {
    let temp = TempDir::new().unwrap();
    let config = ConvertConfig {
        output_dir: temp.path().to_path_buf(),
        ..Default::default()
    };
    let converter = Converter::new(config.clone()).unwrap();
    converter.convert_file(&fixture("sample.txt")).unwrap();

    let entries = parse(
        File::open(fixture("sample.txt")).unwrap(),
        &config.multiline_keys(),
    )
    .unwrap();
    let context = mtexport_hugo::PostContext::new(
        config.time_zone().unwrap(),
        config.ignored_sections.iter().cloned(),
    );
    let post = Post::from_entry(&entries[0], &context).unwrap();

    let on_disk = fs::read_to_string(temp.path().join("hello-world.md")).unwrap();
    assert_eq!(on_disk, front_matter::render(&post).unwrap());
}
