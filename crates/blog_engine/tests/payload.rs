use blog_core::{blocks_to_html, ArticleBody};
use blog_engine::{format_payload, parse_articles_payload, validate_payload, PayloadError};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[test]
fn validate_counts_articles() {
    assert_eq!(validate_payload("[]").unwrap(), 0);
    assert_eq!(
        validate_payload(r#"[{"slug": "a", "title": "A"}, {"slug": "b", "title": "B"}]"#).unwrap(),
        2
    );
    assert_eq!(validate_payload(r#"{"result": [{"slug": "a"}]}"#).unwrap(), 1);
}

#[test]
fn validate_rejects_broken_json() {
    let err = validate_payload("[{\"slug\": \"a\",]").unwrap_err();
    assert!(matches!(err, PayloadError::Json(_)));
}

#[test]
fn validate_rejects_wrong_shape() {
    assert!(validate_payload(r#"{"articles": []}"#).is_err());
    assert!(validate_payload("42").is_err());
}

#[test]
fn format_uses_two_space_indent() {
    let articles = parse_articles_payload(br#"[{"slug":"a","title":"A","content":"x"}]"#).unwrap();
    let text = format_payload(&articles).unwrap();
    assert_eq!(
        text,
        "[\n  {\n    \"slug\": \"a\",\n    \"title\": \"A\",\n    \"content\": \"x\"\n  }\n]\n"
    );
}

#[test]
fn malformed_body_still_loads() {
    let articles = parse_articles_payload(
        br#"[{"slug": "odd", "title": "Odd", "body": {"not": "a list"}}]"#,
    )
    .unwrap();
    match &articles[0].body {
        ArticleBody::Document(document) => assert_eq!(blocks_to_html(document), ""),
        other => panic!("expected document body, got {other:?}"),
    }
}

#[test]
fn format_keeps_fields_the_reader_ignores() {
    let source = json!([{
        "_id": "abc",
        "author": {"name": "Huda"},
        "slug": "a",
        "title": "A",
        "publishedAt": "2024-03-05T10:00:00Z",
        "mainImage": "images/a.jpg",
        "body": [
            {
                "_type": "block",
                "_key": "k1",
                "style": "normal",
                "markDefs": [],
                "children": [{"_type": "span", "_key": "s1", "text": "Hi", "marks": ["strong"]}]
            },
            {"_type": "image", "_key": "k2", "asset": {"_ref": "image-1"}}
        ]
    }]);
    let articles = parse_articles_payload(source.to_string().as_bytes()).unwrap();
    let formatted = format_payload(&articles).unwrap();
    let back: Value = serde_json::from_str(&formatted).unwrap();
    assert_eq!(back, source);
}

#[test]
fn format_keeps_key_order_of_unknown_fields() {
    let text = r#"[{"slug":"a","title":"A","content":"x","zeta":1,"alpha":2}]"#;
    let formatted = format_payload(&parse_articles_payload(text.as_bytes()).unwrap()).unwrap();
    let zeta = formatted.find("zeta").unwrap();
    let alpha = formatted.find("alpha").unwrap();
    assert!(zeta < alpha, "{formatted}");
}

#[test]
fn wrongly_typed_fields_do_not_reject_the_payload() {
    let articles =
        parse_articles_payload(br#"[{"slug":"a","title":"A"},{"slug":"b","title":null}]"#)
            .unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[1].slug, "b");
    assert_eq!(articles[1].title, "");
}

#[test]
fn bad_element_error_points_at_it() {
    let err = validate_payload("[\n  {\"slug\": \"a\"},\n  7\n]").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("invalid type"), "unexpected message: {message}");
    assert!(message.contains("line 3"), "unexpected message: {message}");

    let err = validate_payload(r#"{"result": "nope"}"#).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("column"), "unexpected message: {message}");
    assert!(!message.contains("line 0"), "unexpected message: {message}");
}
