mod common;

use common::nested_document;
use usdj_am::descriptor::Assignments;
use usdj_am::{AstNode, Assignment, Error};

#[test]
fn root_path_resolves_to_the_root() {
    let document = nested_document("a-cube");
    assert_eq!(document.get_item_at(""), Err(Error::EmptyItemPath));
    let root = document.get_item().unwrap();
    assert_eq!(document.get_item_at("/"), Ok(root));
    assert_eq!(root.object_id(), document.model().root.unwrap());
}

#[test]
fn key_leaf_paths_match_joined_items() {
    let document = nested_document("a-cube");
    let joined = document
        .get_item()
        .and_then(|item| item.join("data"))
        .and_then(|item| item.join("scene"))
        .and_then(|item| item.join("descriptor"))
        .and_then(|item| item.join("assignments"))
        .unwrap();
    assert!(matches!(
        document.get_item_at("data/scene/descriptor/assignments"),
        Err(Error::RelativeItemPath(_))
    ));
    let parsed = document
        .get_item_at("/data/scene/descriptor/assignments")
        .unwrap();
    assert_eq!(parsed, joined);

    let from_joined = Assignments::new(&document, joined).unwrap();
    let from_parsed = Assignments::new(&document, parsed).unwrap();
    assert!(std::ptr::eq(from_joined.get_document(), from_parsed.get_document()));
    assert_eq!(from_joined.get_object_id(), from_parsed.get_object_id());
}

#[test]
fn position_leaf_paths_match_joined_items() {
    let document = nested_document("a-cube");
    let joined = document
        .get_item()
        .and_then(|item| item.get("data"))
        .and_then(|item| item.get("scene"))
        .and_then(|item| item.get("descriptor"))
        .and_then(|item| item.get("assignments"))
        .and_then(|item| item.at(0))
        .unwrap();
    assert!(Assignments::new(&document, joined).is_err());
    assert!(document
        .get_item_at("data/scene/descriptor/assignments/0")
        .is_err());
    assert!(matches!(
        document.get_item_at("/data/scene/descriptor/assignments/zero"),
        Err(Error::NotIndexable { .. })
    ));
    let parsed = document
        .get_item_at("/data/scene/descriptor/assignments/0")
        .unwrap();
    assert_eq!(parsed, joined);

    let from_joined = Assignment::new(&document, joined).unwrap();
    let from_parsed = Assignment::new(&document, parsed).unwrap();
    assert!(std::ptr::eq(from_joined.get_document(), from_parsed.get_document()));
    assert_eq!(from_joined.get_object_id(), from_parsed.get_object_id());
    assert_eq!(from_parsed.get_field(), Ok("upAxis"));
}

#[test]
fn unresolvable_paths_fail() {
    let document = nested_document("two-cubes");
    assert_eq!(
        document.get_item_at("/data/missing"),
        Err(Error::NoSuchKey("missing".to_string()))
    );
    assert_eq!(
        document.get_item_at("/data/scene/statements/2"),
        Err(Error::NoSuchPosition { pos: 2, len: 2 })
    );
    assert!(matches!(
        document.get_item_at("/data/name/0"),
        Err(Error::NotIndexable { .. })
    ));
    assert!(matches!(
        document.get_item_at("/data//scene"),
        Err(Error::EmptySegment(_))
    ));
}
