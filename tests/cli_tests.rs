//! Integration tests for the spritegrid CLI
//!
//! These tests run the built binary inside temporary directories and check
//! exit codes and the files it writes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use spritegrid::output::load_raster;
use spritegrid::parser::parse_document;
use tempfile::TempDir;

const TRIANGLE: &str = r##"[{"grid": ["..R..", ".RRR.", "RRRRR"], "palette": {".": "transparent", "R": "#FF0000"}}]"##;

const PAIR: &str = r##"[
  {"sprite_name": "red", "grid": ["RR", "RR"], "palette": {"R": "#FF0000"}},
  {"sprite_name": "blue", "grid": ["B.", ".B"], "palette": {"B": "#0000FF", ".": "transparent"}}
]"##;

/// Run the binary with `dir` as working directory.
fn spritegrid(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_spritegrid"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run spritegrid binary")
}

/// Log lines from both streams; the logger may write to either.
fn logs(out: &Output) -> String {
    format!("{}{}", String::from_utf8_lossy(&out.stdout), String::from_utf8_lossy(&out.stderr))
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_render_single_file() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "tri.json", TRIANGLE);

    let out = spritegrid(temp.path(), &["render", "tri.json", "-o", "out", "--pixel-size", "4"]);
    assert!(out.status.success(), "logs: {}", logs(&out));

    let image = load_raster(&temp.path().join("out/tri.png")).unwrap();
    assert_eq!(image.dimensions(), (20, 12));
}

#[test]
fn test_render_uses_config_defaults() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "pair.json", PAIR);
    write(
        temp.path(),
        "spritegrid.toml",
        "[render]\npixel_size = 3\npadding = 1\n\n[output]\ndir = \"sheets\"\n",
    );

    let out = spritegrid(temp.path(), &["render", "pair.json"]);
    assert!(out.status.success(), "logs: {}", logs(&out));

    let image = load_raster(&temp.path().join("sheets/pair.png")).unwrap();
    assert_eq!(image.dimensions(), (2 * 3 + 1 + 2 * 3, 2 * 3));

    // Flags win over the config file
    let out = spritegrid(temp.path(), &["render", "pair.json", "--padding", "0"]);
    assert!(out.status.success());
    let image = load_raster(&temp.path().join("sheets/pair.png")).unwrap();
    assert_eq!(image.width(), 12);
}

#[test]
fn test_render_folder_mirrors_tree_and_continues() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "in/tri.json", TRIANGLE);
    write(temp.path(), "in/chars/pair.json", PAIR);
    write(temp.path(), "in/chars/broken.json", r##"{"grid": ["AB", "A"], "palette": {"A": "#000000", "B": "#FFFFFF"}}"##);

    let out = spritegrid(temp.path(), &["render", "in", "-o", "out", "-j", "2"]);
    assert_eq!(out.status.code(), Some(1));

    assert!(temp.path().join("out/tri.png").is_file());
    assert!(temp.path().join("out/chars/pair.png").is_file());
    assert!(!temp.path().join("out/chars/broken.png").exists());

    let text = logs(&out);
    assert!(text.contains("broken.json"), "logs: {}", text);
}

#[test]
fn test_render_empty_folder_succeeds() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("empty")).unwrap();

    let out = spritegrid(temp.path(), &["render", "empty", "-o", "out"]);
    assert!(out.status.success());
    let text = logs(&out);
    assert!(text.contains("No .json files found"), "logs: {}", text);
}

#[test]
fn test_missing_input_is_invalid_args() {
    let temp = TempDir::new().unwrap();
    let out = spritegrid(temp.path(), &["render", "nope.json"]);
    assert_eq!(out.status.code(), Some(2));

    let out = spritegrid(temp.path(), &["split", "nope.png", "--width", "8", "--height", "8"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_wrong_extension_is_invalid_args() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "tri.txt", TRIANGLE);

    let out = spritegrid(temp.path(), &["render", "tri.txt"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!temp.path().join("output/tri.png").exists());

    let out = spritegrid(temp.path(), &["import", "tri.txt"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!temp.path().join("output/tri.json").exists());

    let out = spritegrid(temp.path(), &["split", "tri.txt", "--width", "8", "--height", "8"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_unknown_symbol_is_processing_error() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "bad.json", r##"{"grid": ["RX"], "palette": {"R": "#FF0000"}}"##);

    let out = spritegrid(temp.path(), &["render", "bad.json"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!temp.path().join("output/bad.png").exists());
}

#[test]
fn test_import_round_trip() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "tri.json", TRIANGLE);

    let out = spritegrid(temp.path(), &["render", "tri.json", "-o", "png", "--pixel-size", "8"]);
    assert!(out.status.success());

    let out = spritegrid(
        temp.path(),
        &["import", "png/tri.png", "-o", "json", "--pixel-size", "auto", "--compact"],
    );
    assert!(out.status.success(), "logs: {}", logs(&out));

    let text = fs::read_to_string(temp.path().join("json/tri.json")).unwrap();
    assert_eq!(text.lines().count(), 1);
    let sprites = parse_document(&text).unwrap();
    assert_eq!(sprites.len(), 1);
    assert_eq!(sprites[0].name.as_deref(), Some("tri"));
    assert_eq!(sprites[0].grid, vec!["AABAA", "ABBBA", "BBBBB"]);
}

#[test]
fn test_import_folder() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/a.json", TRIANGLE);
    write(temp.path(), "src/nested/b.json", PAIR);

    let out = spritegrid(temp.path(), &["render", "src", "-o", "png", "--pixel-size", "2"]);
    assert!(out.status.success());

    let out = spritegrid(temp.path(), &["import", "png", "-o", "back", "--pixel-size", "2"]);
    assert!(out.status.success(), "logs: {}", logs(&out));

    let a = parse_document(&fs::read_to_string(temp.path().join("back/a.json")).unwrap()).unwrap();
    assert_eq!(a[0].grid, vec!["AABAA", "ABBBA", "BBBBB"]);
    assert!(temp.path().join("back/nested/b.json").is_file());
}

#[test]
fn test_split_sheet() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "pair.json", PAIR);

    let out = spritegrid(
        temp.path(),
        &["render", "pair.json", "-o", ".", "--pixel-size", "4", "--padding", "4"],
    );
    assert!(out.status.success());

    let out = spritegrid(
        temp.path(),
        &[
            "split", "pair.png", "--width", "8", "--height", "8", "--padding", "4",
            "--pixel-size", "4", "-o", "frames",
        ],
    );
    assert!(out.status.success(), "logs: {}", logs(&out));

    let first = parse_document(&fs::read_to_string(temp.path().join("frames/sprite_000.json")).unwrap()).unwrap();
    let second = parse_document(&fs::read_to_string(temp.path().join("frames/sprite_001.json")).unwrap()).unwrap();
    assert_eq!(first[0].name.as_deref(), Some("pair_sprite_0"));
    assert_eq!(first[0].grid, vec!["AA", "AA"]);
    assert_eq!(second[0].name.as_deref(), Some("pair_sprite_1"));
    assert_eq!(second[0].grid, vec!["AB", "BA"]);
    assert_eq!(second[0].palette[&'A'], "#0000FF");
    assert_eq!(second[0].palette[&'B'], "transparent");
}

#[test]
fn test_split_bad_layout_fails() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "pair.json", PAIR);
    spritegrid(temp.path(), &["render", "pair.json", "-o", ".", "--pixel-size", "4", "--padding", "4"]);

    let out = spritegrid(temp.path(), &["split", "pair.png", "--width", "7", "--height", "8"]);
    assert_eq!(out.status.code(), Some(1));
}
