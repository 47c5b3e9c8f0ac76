use wayfinder::pattern::{compile, InvalidPatternError};

#[test]
fn test_variable_names_in_occurrence_order() {
    let p = compile("/users/:userId/posts/:postId").unwrap();
    let names: Vec<&str> = p.params().iter().map(|n| n.as_ref()).collect();
    assert_eq!(names, vec!["userId", "postId"]);
    assert_eq!(p.regex().captures_len() - 1, p.params().len());
}

#[test]
fn test_trailing_slash_on_pattern_is_optional() {
    let with = compile("/pets/:id/").unwrap();
    let without = compile("/pets/:id").unwrap();
    for path in ["/pets/1", "/pets/1/"] {
        assert!(with.is_match(path), "'{path}' should match '/pets/:id/'");
        assert!(without.is_match(path), "'{path}' should match '/pets/:id'");
    }
}

#[test]
fn test_match_is_anchored_not_prefix() {
    let p = compile("/a/:x/b").unwrap();
    assert!(p.is_match("/a/123/b"));
    assert!(p.is_match("/a/123/b/"));
    assert!(!p.is_match("/a/123/b/extra"));
    assert!(!p.is_match("/prefix/a/123/b"));
}

#[test]
fn test_wildcard_requires_preceding_slash() {
    let p = compile("/x/*").unwrap();
    assert!(p.is_match("/x/"));
    assert!(p.is_match("/x/anything/here"));
    assert!(compile("/x*").is_err());
}

#[test]
fn test_percent_encoded_values_match_variables() {
    let p = compile("/files/:name").unwrap();
    assert!(p.is_match("/files/report%202024.txt"));
}

#[test]
fn test_invalid_patterns_rejected_at_compile_time() {
    for bad in ["*", "//a", "/a//b", "/a*", "/a/**"] {
        let err = compile(bad);
        assert!(err.is_err(), "pattern '{bad}' should be rejected");
    }
}

#[test]
fn test_invalid_pattern_variants() {
    assert!(matches!(
        compile("*"),
        Err(InvalidPatternError::MissingLeadingSlash { .. })
    ));
    assert!(matches!(
        compile("//a"),
        Err(InvalidPatternError::EmptySegment { .. })
    ));
    assert!(matches!(
        compile("/a//b"),
        Err(InvalidPatternError::EmptySegment { .. })
    ));
    assert!(matches!(
        compile("/a*"),
        Err(InvalidPatternError::EmbeddedWildcard { .. })
    ));
    assert!(matches!(
        compile("/a/**"),
        Err(InvalidPatternError::ConsecutiveWildcards { .. })
    ));
    assert!(matches!(
        compile("/a/:"),
        Err(InvalidPatternError::EmptyVariableName { .. })
    ));
    assert!(matches!(
        compile("/a/:x-y"),
        Err(InvalidPatternError::InvalidVariableName { .. })
    ));
    assert!(matches!(
        compile("/a b"),
        Err(InvalidPatternError::InvalidLiteral { .. })
    ));
}
