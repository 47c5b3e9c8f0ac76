use super::{compile, InvalidPatternError};

#[test]
fn test_root_pattern() {
    let p = compile("/").unwrap();
    assert!(p.is_match("/"));
    assert!(!p.is_match("/a"));
    assert!(p.params().is_empty());
}

#[test]
fn test_literal_pattern() {
    let p = compile("/pets/all").unwrap();
    assert!(p.is_match("/pets/all"));
    assert!(p.is_match("/pets/all/"));
    assert!(!p.is_match("/pets"));
    assert!(!p.is_match("/pets/all/extra"));
}

#[test]
fn test_variable_pattern() {
    let p = compile("/pets/:id").unwrap();
    assert!(p.is_match("/pets/123"));
    assert_eq!(p.params().len(), 1);
    assert_eq!(p.params()[0].as_ref(), "id");
}

#[test]
fn test_dot_is_literal() {
    let p = compile("/files/app.js").unwrap();
    assert!(p.is_match("/files/app.js"));
    assert!(!p.is_match("/files/appxjs"));
}

#[test]
fn test_wildcard_spans_segments() {
    let p = compile("/static/*").unwrap();
    assert!(p.is_match("/static/"));
    assert!(p.is_match("/static/css/site.css"));
    assert!(!p.is_match("/static"));
}

#[test]
fn test_variable_rejects_slash() {
    let p = compile("/pets/:id").unwrap();
    assert!(!p.is_match("/pets/1/2"));
}

#[test]
fn test_embedded_wildcard_rejected() {
    assert!(matches!(
        compile("/a*"),
        Err(InvalidPatternError::EmbeddedWildcard { .. })
    ));
}

#[test]
fn test_wildcard_must_be_last() {
    assert!(matches!(
        compile("/*/x"),
        Err(InvalidPatternError::WildcardNotLast { .. })
    ));
}

#[test]
fn test_error_names_the_pattern() {
    let err = compile("//a").unwrap_err();
    assert!(err.to_string().contains("//a"));
}
