use super::*;

const SOURCE: &str = r#"
id = /home
supporting =
    classA
    classB
    classC

[server.http]
    port = 8080
    keys =
        keyOne
        keyTwo

[map.texts]
    hello = Hey there !
    last.key = dotted

[map.redirects]
    ^abc/def$ = efg
    ^bed/bye$ += lko
    MUST_APPPEND

[map.Press | ABC]
    logo = smh.png
    keywords =
        apples

[map.Press | XYZ]
    logo = brw.png
"#;

#[test]
fn test_parse_document() {
    let doc = Document::parse(SOURCE).unwrap();
    assert_eq!(doc.get("Id").and_then(Value::as_str), Some("/home"));
    assert_eq!(
        doc.get("Supporting").and_then(Value::as_list),
        Some(&["classA".to_string(), "classB".into(), "classC".into()][..])
    );
    assert_eq!(
        doc.get("ServerHttp.Port").and_then(Value::as_str),
        Some("8080")
    );
    assert_eq!(doc.get_item("ServerHttp.Keys[1]"), Some("keyTwo"));
    assert_eq!(doc.get_item("ServerHttp.Keys[2]"), None);
    assert_eq!(
        doc.get("Texts.hello").and_then(Value::as_str),
        Some("Hey there !")
    );
    assert_eq!(
        doc.get("Texts[last.key]").and_then(Value::as_str),
        Some("dotted")
    );
    assert_eq!(
        doc.get("Redirects[^bed/bye$]").and_then(Value::as_str),
        Some("lko MUST_APPPEND")
    );
    assert_eq!(
        doc.get("Press.ABC.keywords").and_then(Value::as_str),
        Some("")
    );
    assert_eq!(
        doc.get("Press.XYZ.logo").and_then(Value::as_str),
        Some("brw.png")
    );
}

#[test]
fn test_root_order_follows_input() {
    let doc = Document::parse(SOURCE).unwrap();
    let keys: Vec<_> = doc.root.keys().collect();
    insta::assert_snapshot!(keys.join("\n"), @r"
    Id
    Supporting
    ServerHttp
    Texts
    Redirects
    Press
    ");
}

#[test]
fn test_from_reader_returns_skipped_lines() {
    let (doc, skipped) = Document::from_reader(SOURCE.as_bytes(), &ParseOptions::default()).unwrap();
    assert_eq!(doc.get("Press").map(Value::shape), Some(skini_parse::Shape::SubMap));
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].line.text, "apples");
}

#[test]
fn test_parse_empty() {
    let err = Document::parse("").unwrap_err();
    assert!(matches!(err.kind(), ParseErrorKind::EmptyInput));
}

#[test]
fn test_shape_conflict_is_binding_error() {
    let err = Document::parse("[map.press | ABC]\nlogo = a\n[map.press]\nABC = b\n").unwrap_err();
    let ParseErrorKind::Binding(bind) = err.kind() else {
        panic!("expected a binding error, got {err}");
    };
    assert_eq!(bind.path, "Press");
    assert_eq!(bind.key, "ABC");
    assert_eq!(err.span().map(|s| s.start), Some(39));
}

#[test]
fn test_get_empty_path() {
    let doc = Document::parse("id = 1").unwrap();
    assert!(doc.get("").is_none());
}
