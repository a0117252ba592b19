//! Integration tests for the result-tree flattener.

use opendataloader_pdf::{flatten_str, Error, Record};

#[test]
fn test_preorder_over_deeply_nested_tree() {
    // Each level carries text of its own, so the emission order documents
    // the parent-before-children rule at every depth.
    let json = r#"{"kids": [
        {"type": "section", "page number": 1, "content": "1", "kids": [
            {"type": "section", "content": "1.1", "kids": [
                {"type": "paragraph", "content": "1.1.1"}
            ]},
            {"type": "section", "content": "1.2"}
        ]},
        {"type": "section", "page number": 2, "content": "2"}
    ]}"#;

    let texts: Vec<String> = flatten_str(json, "doc.pdf")
        .unwrap()
        .map(|r| r.text)
        .collect();
    assert_eq!(texts, vec!["1", "1.1", "1.1.1", "1.2", "2"]);
}

#[test]
fn test_page_inheritance_across_depths() {
    let json = r#"{"kids": [
        {"type": "page", "page number": 9, "kids": [
            {"type": "table", "kids": [
                {"type": "table row", "kids": [
                    {"type": "table cell", "content": "deep cell"}
                ]}
            ]}
        ]}
    ]}"#;

    let records: Vec<Record> = flatten_str(json, "doc.pdf").unwrap().collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].metadata.page, Some(9));
    assert_eq!(records[0].metadata.node_type.as_deref(), Some("table cell"));
}

#[test]
fn test_sibling_pages_do_not_leak() {
    // A page attribute inherits downward only, never across siblings.
    let json = r#"{"kids": [
        {"type": "page", "page number": 1, "kids": [
            {"type": "paragraph", "content": "on one"}
        ]},
        {"type": "paragraph", "content": "unpaged sibling"}
    ]}"#;

    let pages: Vec<Option<u32>> = flatten_str(json, "doc.pdf")
        .unwrap()
        .map(|r| r.metadata.page)
        .collect();
    assert_eq!(pages, vec![Some(1), None]);
}

#[test]
fn test_nodes_with_empty_text_are_skipped() {
    let json = r#"{"kids": [
        {"type": "paragraph", "content": ""},
        {"type": "paragraph", "content": "kept"},
        {"type": "image"}
    ]}"#;

    let records: Vec<Record> = flatten_str(json, "doc.pdf").unwrap().collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text, "kept");
}

#[test]
fn test_every_record_traces_to_the_source() {
    let json = r#"{"kids": [
        {"type": "paragraph", "content": "a"},
        {"type": "paragraph", "content": "b"}
    ]}"#;

    let records: Vec<Record> = flatten_str(json, "reports/q3.pdf").unwrap().collect();
    assert!(records
        .iter()
        .all(|r| r.metadata.source == "reports/q3.pdf"));
}

#[test]
fn test_two_runs_are_byte_identical() {
    let json = r#"{"kids": [
        {"type": "page", "page number": 1, "kids": [
            {"type": "heading", "content": "Title"},
            {"type": "paragraph", "content": "Body text."},
            {"type": "list", "kids": [
                {"type": "list item", "content": "first"},
                {"type": "list item", "content": "second"}
            ]}
        ]}
    ]}"#;

    let run = || -> Vec<u8> {
        let records: Vec<Record> = flatten_str(json, "doc.pdf").unwrap().collect();
        serde_json::to_vec(&records).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_wrong_shape_fails_with_malformed_result() {
    for payload in ["[1, 2, 3]", r#"{"kids": {"content": "x"}}"#, "null"] {
        let result = flatten_str(payload, "doc.pdf");
        assert!(
            matches!(result, Err(Error::MalformedResult(_))),
            "payload {payload:?} should be rejected"
        );
    }
}
