#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::Value;
use usdj_am::utils::Document;

pub const STEMS: [&str; 4] = [
    "Ball.shadingVariants",
    "helloWorld",
    "relativeReference",
    "usdPhysicsBoxOnBox",
];

pub const NESTED_STEMS: [&str; 3] = ["a-cube", "two-cubes", "cube-island"];

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|err| panic!("can't read fixture {name}: {err}"))
}

pub fn fixture_json(name: &str) -> Value {
    serde_json::from_str(&read_fixture(name))
        .unwrap_or_else(|err| panic!("fixture {name} isn't JSON: {err}"))
}

/// Authors a document from `<stem>.usda.json` and round-trips it through
/// the binary encoding, so tests read what a loaded file holds.
pub fn usda_document(stem: &str) -> Document {
    let json = fixture_json(&format!("{stem}.usda.json"));
    let authored = Document::from_json(&json, 131_072);
    Document::from_binary(&authored.to_binary()).expect("authored document must decode")
}

pub fn nested_document(stem: &str) -> Document {
    let json = fixture_json(&format!("nested/{stem}.json"));
    let authored = Document::from_json(&json, 262_144);
    Document::from_binary(&authored.to_binary()).expect("authored document must decode")
}
