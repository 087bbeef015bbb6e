mod common;

use common::{fixture_json, nested_document, read_fixture, usda_document, NESTED_STEMS, STEMS};
use serde_json::Value;
use usdj_am::utils::{Indenter, JsonWriter};
use usdj_am::{Accept, File};

#[test]
fn files_serialize_to_their_usda_json() {
    for stem in STEMS {
        let document = usda_document(stem);
        let file = File::from_root(&document).unwrap();
        let mut writer = JsonWriter::new(Indenter::new(' ', 2));
        file.accept(&mut writer).unwrap();
        let output: Value = serde_json::from_str(&writer.to_string()).unwrap();
        assert_eq!(
            output,
            fixture_json(&format!("{stem}.usda.json")),
            "JSON mismatch for {stem}"
        );
    }
}

#[test]
fn hello_world_serializes_byte_for_byte() {
    let document = usda_document("helloWorld");
    let file = File::from_root(&document).unwrap();
    let mut writer = JsonWriter::new(Indenter::new(' ', 2));
    file.accept(&mut writer).unwrap();
    assert_eq!(
        writer.to_string(),
        read_fixture("helloWorld.usda.json").trim_end()
    );
}

#[test]
fn nested_files_serialize_to_their_canonical_form() {
    for stem in NESTED_STEMS {
        let document = nested_document(stem);
        let item = document.get_item_at("/data/scene").unwrap();
        let file = File::new(&document, item).unwrap();
        let mut writer = JsonWriter::default();
        file.accept(&mut writer).unwrap();
        let output: Value = serde_json::from_str(&writer.to_string()).unwrap();
        assert_eq!(
            output,
            fixture_json(&format!("nested/{stem}.usda.json")),
            "JSON mismatch for {stem}"
        );
    }
}

#[test]
fn owned_and_borrowed_visits_agree() {
    for stem in STEMS {
        let document = usda_document(stem);
        let file = File::from_root(&document).unwrap();
        let mut borrowed = JsonWriter::default();
        file.accept(&mut borrowed).unwrap();
        let mut owned = JsonWriter::default();
        file.accept_owned(&mut owned).unwrap();
        assert_eq!(borrowed.to_string(), owned.to_string(), "mismatch for {stem}");
    }
}
