/*!
 * Tests for the locale document tree model
 */

use mptranslate::document::{DocumentFormat, DocumentNode};

/// Test that JSON object key order survives a full parse/serialize cycle
#[test]
fn test_jsonRoundTrip_withUnsortedKeys_shouldPreserveOrder() {
    let json = r#"{
  "zulu": "last alphabetically",
  "alpha": "first alphabetically",
  "mike": {
    "nested_z": 1,
    "nested_a": 2
  }
}"#;

    let doc = DocumentNode::parse(json, DocumentFormat::Json).unwrap();
    let out = doc.serialize(DocumentFormat::Json).unwrap();

    let zulu = out.find("zulu").unwrap();
    let alpha = out.find("alpha").unwrap();
    let nested_z = out.find("nested_z").unwrap();
    let nested_a = out.find("nested_a").unwrap();
    assert!(zulu < alpha, "top-level key order was not preserved");
    assert!(nested_z < nested_a, "nested key order was not preserved");
}

/// Test YAML parsing of a realistic plugin locale fragment
#[test]
fn test_yamlParse_withPluginLocale_shouldModelEveryValueKind() {
    let yaml = r#"menu_title: "&8Server Shop"
open_command: shop
size: 54
update_interval: 2.5
register_command: true
fallback: ~
items:
  - "first line"
  - "second line"
"#;

    let doc = DocumentNode::parse(yaml, DocumentFormat::Yaml).unwrap();
    let DocumentNode::Mapping(pairs) = &doc else { panic!("expected mapping") };

    assert_eq!(pairs[0].1, DocumentNode::Text("&8Server Shop".to_string()));
    assert_eq!(pairs[2].1, DocumentNode::Int(54));
    assert_eq!(pairs[3].1, DocumentNode::Float(2.5));
    assert_eq!(pairs[4].1, DocumentNode::Bool(true));
    assert_eq!(pairs[5].1, DocumentNode::Null);
    let DocumentNode::Sequence(items) = &pairs[6].1 else { panic!("expected sequence") };
    assert_eq!(items.len(), 2);
}

/// Test that a YAML document can be emitted as JSON and back
#[test]
fn test_crossFormat_withSameTree_shouldStayEquivalent() {
    let yaml = "greeting: hello\ncount: 2\nflags:\n  - true\n  - false\n";
    let doc = DocumentNode::parse(yaml, DocumentFormat::Yaml).unwrap();

    let json = doc.serialize(DocumentFormat::Json).unwrap();
    let reparsed = DocumentNode::parse(&json, DocumentFormat::Json).unwrap();
    assert_eq!(doc, reparsed);
}

/// Test serialized JSON ends with a newline so files stay diff-friendly
#[test]
fn test_jsonSerialize_shouldEndWithNewline() {
    let doc = DocumentNode::Mapping(vec![
        ("key".to_string(), DocumentNode::Text("value".to_string())),
    ]);
    let out = doc.serialize(DocumentFormat::Json).unwrap();
    assert!(out.ends_with('\n'));
}

/// Test format detection is case-insensitive on the extension
#[test]
fn test_formatDetection_withUppercaseExtension_shouldStillDetect() {
    assert_eq!(DocumentFormat::from_path("MESSAGES.YML"), Some(DocumentFormat::Yaml));
    assert_eq!(DocumentFormat::from_path("en_US.JSON"), Some(DocumentFormat::Json));
}
