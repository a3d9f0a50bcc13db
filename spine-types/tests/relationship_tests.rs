use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Value, json};
use spine_types::{Dictionary, Error, RelationshipData, ResourceIdentifier};

fn dict(value: Value) -> Dictionary {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture is not an object: {other}"),
    }
}

fn link(raw: &str) -> String {
    raw.to_string()
}

// ── Decode ───────────────────────────────────────────────────────

#[test]
fn decode_data_only() {
    let source = dict(json!({"data": [{"type": "people", "id": "9"}]}));
    let rel = RelationshipData::from_dictionary(&source).unwrap();

    assert_eq!(rel.self_link, None);
    assert_eq!(rel.related_link, None);
    assert_eq!(rel.identifiers, Some(vec![ResourceIdentifier::new("people", "9")]));

    let encoded = rel.to_dictionary();
    assert_eq!(encoded.keys().collect::<Vec<_>>(), vec!["data"]);
    assert_eq!(encoded, source);
}

#[test]
fn decode_links_only() {
    let source = dict(json!({
        "selfURL": "https://api.example.com/articles/1/relationships/author",
        "relatedURL": "https://api.example.com/articles/1/author"
    }));
    let rel = RelationshipData::from_dictionary(&source).unwrap();

    assert_eq!(
        rel.self_link,
        Some(link("https://api.example.com/articles/1/relationships/author"))
    );
    assert_eq!(rel.related_link, Some(link("https://api.example.com/articles/1/author")));
    assert_eq!(rel.identifiers, None);
    assert_eq!(rel.to_dictionary(), source);
}

#[test]
fn decode_empty_dictionary() {
    let rel = RelationshipData::from_dictionary(&Dictionary::new()).unwrap();
    assert!(rel.is_empty());
    assert!(rel.to_dictionary().is_empty());
}

#[test]
fn decode_drops_malformed_entries() {
    let source = dict(json!({"data": [
        {"type": "people", "id": "9"},
        {"type": "people"},
        "garbage",
        {"type": "people", "id": 10},
        {"type": "people", "id": "11"}
    ]}));
    let rel = RelationshipData::from_dictionary(&source).unwrap();
    assert_eq!(
        rel.identifiers,
        Some(vec![
            ResourceIdentifier::new("people", "9"),
            ResourceIdentifier::new("people", "11"),
        ])
    );
}

#[test]
fn decode_all_entries_malformed_yields_empty_list() {
    let source = dict(json!({"data": [{"id": "1"}, 42]}));
    let rel = RelationshipData::from_dictionary(&source).unwrap();
    assert_eq!(rel.identifiers, Some(vec![]));
}

#[test]
fn decode_empty_list_is_distinct_from_absent() {
    let empty = RelationshipData::from_dictionary(&dict(json!({"data": []}))).unwrap();
    let absent = RelationshipData::from_dictionary(&dict(json!({}))).unwrap();
    assert_eq!(empty.identifiers, Some(vec![]));
    assert_eq!(absent.identifiers, None);
    assert_ne!(empty, absent);
    assert!(empty.to_dictionary().contains_key("data"));
    assert!(!absent.to_dictionary().contains_key("data"));
}

#[test]
fn decode_null_data_is_empty_linkage() {
    let rel = RelationshipData::from_dictionary(&dict(json!({"data": null}))).unwrap();
    assert_eq!(rel.identifiers, Some(vec![]));
}

#[test]
fn decode_single_object_data_as_one_element_list() {
    let rel =
        RelationshipData::from_dictionary(&dict(json!({"data": {"type": "people", "id": "9"}})))
            .unwrap();
    assert_eq!(rel.identifiers, Some(vec![ResourceIdentifier::new("people", "9")]));
}

#[test]
fn decode_null_link_is_absent() {
    let rel = RelationshipData::from_dictionary(&dict(json!({"selfURL": null}))).unwrap();
    assert_eq!(rel.self_link, None);
}

#[test]
fn decode_relative_link_keeps_linkage() {
    let source = dict(json!({
        "selfURL": "/articles/1/relationships/author",
        "data": [{"type": "people", "id": "9"}]
    }));
    let rel = RelationshipData::from_dictionary(&source).unwrap();
    assert_eq!(rel.self_link, Some(link("/articles/1/relationships/author")));
    assert_eq!(rel.identifiers, Some(vec![ResourceIdentifier::new("people", "9")]));
    assert_eq!(rel.to_dictionary(), source);
}

#[test]
fn decode_keeps_link_text_verbatim() {
    let source = dict(json!({
        "selfURL": "http://api.example.com",
        "relatedURL": "HTTP://API.Example.com:80/a/../b"
    }));
    let rel = RelationshipData::from_dictionary(&source).unwrap();
    assert_eq!(rel.self_link, Some(link("http://api.example.com")));
    assert_eq!(rel.to_dictionary(), source);
}

#[test]
fn decode_non_string_link_is_malformed() {
    let err = RelationshipData::from_dictionary(&dict(json!({"selfURL": 5}))).unwrap_err();
    assert!(matches!(err, Error::MalformedRelationship(_)));
}

#[test]
fn decode_scalar_data_is_malformed() {
    let err = RelationshipData::from_dictionary(&dict(json!({"data": "people/9"}))).unwrap_err();
    assert!(matches!(err, Error::MalformedRelationship(_)));
}

#[test]
fn from_value_rejects_non_object() {
    let err = RelationshipData::from_value(&json!([])).unwrap_err();
    assert!(matches!(err, Error::MalformedRelationship(_)));
}

// ── Sparse encode ────────────────────────────────────────────────

#[test]
fn encode_omits_absent_related_link() {
    let rel = RelationshipData::new(
        Some(link("https://api.example.com/a/1/relationships/b")),
        None,
        Some(vec![]),
    );
    let encoded = rel.to_dictionary();
    assert!(!encoded.contains_key("relatedURL"));
    assert_eq!(
        Value::Object(encoded),
        json!({
            "selfURL": "https://api.example.com/a/1/relationships/b",
            "data": []
        })
    );
}

// ── Properties ───────────────────────────────────────────────────

fn link_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        "[a-z]{1,8}".prop_map(|segment| format!("https://api.example.com/{segment}")),
        "[a-z]{1,8}".prop_map(|segment| format!("/{segment}/1/relationships/b")),
        "[a-zA-Z0-9:/. ]{0,16}",
    ])
}

fn identifiers_strategy() -> impl Strategy<Value = Option<Vec<ResourceIdentifier>>> {
    prop::option::of(prop::collection::vec(
        ("[a-z]{1,6}", "[0-9]{1,4}").prop_map(|(t, id)| ResourceIdentifier::new(t, id)),
        0..4,
    ))
}

proptest! {
    /// decode(encode(x)) == x across every present/absent combination.
    #[test]
    fn dictionary_roundtrip(
        self_link in link_strategy(),
        related_link in link_strategy(),
        identifiers in identifiers_strategy(),
    ) {
        let rel = RelationshipData::new(self_link, related_link, identifiers);
        let encoded = rel.to_dictionary();
        let decoded = RelationshipData::from_dictionary(&encoded).unwrap();

        prop_assert_eq!(encoded.contains_key("selfURL"), rel.self_link.is_some());
        prop_assert_eq!(encoded.contains_key("relatedURL"), rel.related_link.is_some());
        prop_assert_eq!(encoded.contains_key("data"), rel.identifiers.is_some());
        prop_assert_eq!(decoded.to_dictionary(), encoded);
        prop_assert_eq!(decoded, rel);
    }
}

// ── Logging ──────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl std::io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn decode_with_warn_log(source: &Dictionary) -> String {
    let log = CapturedLog::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(log.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        RelationshipData::from_dictionary(source).unwrap();
    });
    log.contents()
}

#[test]
fn dropped_list_entry_logs_warning() {
    let output = decode_with_warn_log(&dict(json!({"data": [{"type": "people"}]})));
    assert!(output.contains("WARN"), "{output}");
    assert!(output.contains("Dropping relationship linkage entry"), "{output}");
}

#[test]
fn dropped_single_entry_logs_warning() {
    let output = decode_with_warn_log(&dict(json!({"data": {"id": "9"}})));
    assert!(output.contains("Dropping relationship linkage entry"), "{output}");
}

#[test]
fn well_formed_linkage_logs_nothing() {
    let output = decode_with_warn_log(&dict(json!({"data": [{"type": "people", "id": "9"}]})));
    assert!(output.is_empty(), "{output}");
}
