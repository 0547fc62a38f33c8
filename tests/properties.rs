use spx_lite::language::is_well_formed;
use spx_lite::properties::{PropertyBag, PropertyId, PropertyKey};

#[test]
fn test_bag_last_write_wins() {
    let mut bag = PropertyBag::new();
    assert!(bag.is_empty());
    assert_eq!(None, bag.set("key", "one"));
    assert_eq!(Some("one".to_owned()), bag.set("key", "two"));
    assert_eq!(Some("two"), bag.get("key", None));
    assert_eq!(1, bag.len());
}

#[test]
fn test_bag_default_and_clear() {
    let mut bag = PropertyBag::new();
    assert_eq!(Some("default"), bag.get(PropertyId::SpeechSessionId, Some("default")));

    bag.set(PropertyId::SpeechSessionId, "session");
    assert!(bag.contains("Speech_SessionId"));
    assert_eq!(Some("session".to_owned()), bag.set(PropertyId::SpeechSessionId, None));
    assert!(!bag.contains(PropertyId::SpeechSessionId));
    assert_eq!(None, bag.remove("Speech_SessionId"));
}

#[test]
fn test_bag_iterates_in_key_order() {
    let mut bag = PropertyBag::new();
    bag.set("b", "2");
    bag.set(String::from("a"), "1");
    bag.set(PropertyKey::from("c"), "3");
    let entries: Vec<(&str, &str)> = bag.iter().collect();
    assert_eq!(vec![("a", "1"), ("b", "2"), ("c", "3")], entries);
}

#[test]
fn test_language_tags() {
    for tag in &["en", "en-US", "en-EN", "zh-Hans-CN", "de-CH-1901", "yue-HK"] {
        assert!(is_well_formed(tag), "{} should be accepted", tag);
    }
    for tag in &[
        "",
        "e",
        "null",
        "illegal",
        "illegal-illegal",
        "en_US",
        "en-",
        "en-toolongsubtag",
    ] {
        assert!(!is_well_formed(tag), "{} should be rejected", tag);
    }
}
