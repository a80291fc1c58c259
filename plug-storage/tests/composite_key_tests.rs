use plug_storage::{StorageError, create_composite_key, split_composite_key};
use pretty_assertions::assert_eq;

#[test]
fn layout_uses_nul_separators() {
    let key = create_composite_key("tag", &["rust"]).unwrap();
    assert_eq!(key, "\u{0}tag\u{0}rust\u{0}");
}

#[test]
fn object_type_only() {
    assert_eq!(create_composite_key("post", &[]).unwrap(), "\u{0}post\u{0}");
}

#[test]
fn split_inverts_create() {
    let key = create_composite_key("vote", &["h1", "alice"]).unwrap();
    let (object_type, attrs) = split_composite_key(&key).unwrap();
    assert_eq!(object_type, "vote");
    assert_eq!(attrs, vec!["h1".to_string(), "alice".to_string()]);
}

#[test]
fn reserved_runes_rejected() {
    assert!(matches!(
        create_composite_key("tag", &["a\u{0}b"]),
        Err(StorageError::InvalidKey(_))
    ));
    assert!(matches!(
        create_composite_key("t\u{10FFFF}", &[]),
        Err(StorageError::InvalidKey(_))
    ));
}

#[test]
fn split_rejects_simple_keys() {
    assert!(split_composite_key("tag1").is_err());
}
