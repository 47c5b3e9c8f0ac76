//! Pattern compiler core - turns route specification strings into matchers.

use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Marker character introducing a named variable segment (`/pets/:id`).
pub const VARIABLE_MARKER: char = ':';

/// Marker character for the trailing catch-all segment (`/static/*`).
pub const WILDCARD_MARKER: char = '*';

/// Character class matched by a variable segment. `%` is included so
/// percent-encoded octets survive matching untouched.
const VARIABLE_CLASS: &str = "([A-Za-z0-9%_.-]+)";

/// Character class matched by the trailing wildcard. Same set as a variable
/// plus `/`, so the wildcard spans any number of remaining segments.
const WILDCARD_CLASS: &str = "[A-Za-z0-9%_./-]*";

/// A compiled route specification.
///
/// Produced by [`compile`] at registration time and immutable thereafter.
/// Holds the original specification string, the anchored match predicate, and
/// the variable names in left-to-right occurrence order.
///
/// Invariant: the number of capturing groups in `regex` always equals
/// `params.len()`. The resolver re-checks this at extraction time and treats
/// a mismatch as an internal consistency fault.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    regex: Regex,
    params: Vec<Arc<str>>,
}

impl RoutePattern {
    /// The specification string this pattern was compiled from.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The anchored predicate. Matches the whole request path, never a prefix.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Variable names in occurrence order, one per capturing group.
    #[must_use]
    pub fn params(&self) -> &[Arc<str>] {
        &self.params
    }

    /// Test a concrete request path against this pattern.
    ///
    /// Path matching is case-sensitive; a single trailing slash on the request
    /// path is tolerated.
    #[inline]
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Error raised when a route specification does not conform to the grammar.
///
/// Raised synchronously at registration time, never at request time. Every
/// variant names the offending pattern so startup failures are actionable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidPatternError {
    /// The pattern does not start with `/`.
    MissingLeadingSlash { pattern: String },
    /// The pattern contains consecutive slashes (an empty segment).
    EmptySegment { pattern: String },
    /// A wildcard segment appears anywhere but last.
    WildcardNotLast { pattern: String },
    /// Two or more wildcard markers in a row (`/a/**`).
    ConsecutiveWildcards { pattern: String },
    /// A wildcard marker concatenated to other segment text (`/a*`).
    EmbeddedWildcard { pattern: String, segment: String },
    /// A variable marker with no name (`/a/:`).
    EmptyVariableName { pattern: String },
    /// A variable name containing non-alphanumeric characters.
    InvalidVariableName { pattern: String, segment: String },
    /// A literal segment containing characters outside `[A-Za-z0-9._-]`.
    InvalidLiteral { pattern: String, segment: String },
}

impl fmt::Display for InvalidPatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPatternError::MissingLeadingSlash { pattern } => {
                write!(f, "invalid route pattern '{pattern}': must start with '/'")
            }
            InvalidPatternError::EmptySegment { pattern } => {
                write!(
                    f,
                    "invalid route pattern '{pattern}': empty segment (consecutive slashes)"
                )
            }
            InvalidPatternError::WildcardNotLast { pattern } => {
                write!(
                    f,
                    "invalid route pattern '{pattern}': wildcard '*' is only allowed as the final segment"
                )
            }
            InvalidPatternError::ConsecutiveWildcards { pattern } => {
                write!(
                    f,
                    "invalid route pattern '{pattern}': consecutive wildcard markers"
                )
            }
            InvalidPatternError::EmbeddedWildcard { pattern, segment } => {
                write!(
                    f,
                    "invalid route pattern '{pattern}': wildcard marker embedded in segment '{segment}'; \
                    a wildcard must form a complete segment preceded by '/'"
                )
            }
            InvalidPatternError::EmptyVariableName { pattern } => {
                write!(
                    f,
                    "invalid route pattern '{pattern}': variable marker ':' with no name"
                )
            }
            InvalidPatternError::InvalidVariableName { pattern, segment } => {
                write!(
                    f,
                    "invalid route pattern '{pattern}': variable name in '{segment}' must be alphanumeric"
                )
            }
            InvalidPatternError::InvalidLiteral { pattern, segment } => {
                write!(
                    f,
                    "invalid route pattern '{pattern}': literal segment '{segment}' may only contain \
                    letters, digits, '-', '_' and '.'"
                )
            }
        }
    }
}

impl std::error::Error for InvalidPatternError {}

/// Compile a route specification string into a [`RoutePattern`].
///
/// Grammar: `/`-separated segments, each either a literal (`[A-Za-z0-9._-]+`),
/// a variable (`:` followed by an alphanumeric name), or a single trailing
/// wildcard `*`. One optional trailing slash is accepted and is semantically
/// equivalent to the same pattern without it.
///
/// The resulting predicate is anchored at both ends and accepts an optional
/// trailing slash on the request path, so `/a/:x/b` matches both `/a/1/b` and
/// `/a/1/b/`.
pub fn compile(pattern: &str) -> Result<RoutePattern, InvalidPatternError> {
    if !pattern.starts_with('/') {
        return Err(InvalidPatternError::MissingLeadingSlash {
            pattern: pattern.to_string(),
        });
    }
    if pattern.contains("//") {
        return Err(InvalidPatternError::EmptySegment {
            pattern: pattern.to_string(),
        });
    }

    // A single trailing slash is optional; normalize it away before
    // segmenting. "//" and friends were rejected above.
    let trimmed = if pattern.len() > 1 && pattern.ends_with('/') {
        &pattern[..pattern.len() - 1]
    } else {
        pattern
    };

    let mut params: Vec<Arc<str>> = Vec::new();
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');

    if trimmed == "/" {
        source.push('/');
        source.push('$');
    } else {
        let segments: Vec<&str> = trimmed[1..].split('/').collect();
        let last = segments.len() - 1;
        for (idx, segment) in segments.iter().enumerate() {
            if *segment == "*" {
                if idx != last {
                    return Err(InvalidPatternError::WildcardNotLast {
                        pattern: pattern.to_string(),
                    });
                }
                source.push('/');
                source.push_str(WILDCARD_CLASS);
            } else if let Some(name) = segment.strip_prefix(VARIABLE_MARKER) {
                if name.is_empty() {
                    return Err(InvalidPatternError::EmptyVariableName {
                        pattern: pattern.to_string(),
                    });
                }
                if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(InvalidPatternError::InvalidVariableName {
                        pattern: pattern.to_string(),
                        segment: (*segment).to_string(),
                    });
                }
                source.push('/');
                source.push_str(VARIABLE_CLASS);
                params.push(Arc::from(name));
            } else if segment.contains(WILDCARD_MARKER) {
                if segment.chars().all(|c| c == WILDCARD_MARKER) {
                    return Err(InvalidPatternError::ConsecutiveWildcards {
                        pattern: pattern.to_string(),
                    });
                }
                return Err(InvalidPatternError::EmbeddedWildcard {
                    pattern: pattern.to_string(),
                    segment: (*segment).to_string(),
                });
            } else {
                if !segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
                {
                    return Err(InvalidPatternError::InvalidLiteral {
                        pattern: pattern.to_string(),
                        segment: (*segment).to_string(),
                    });
                }
                source.push('/');
                for c in segment.chars() {
                    if c == '.' {
                        source.push('\\');
                    }
                    source.push(c);
                }
            }
        }
        source.push_str("/?$");
    }

    let regex = Regex::new(&source).expect("failed to compile route pattern regex");
    debug_assert_eq!(regex.captures_len() - 1, params.len());

    Ok(RoutePattern {
        raw: pattern.to_string(),
        regex,
        params,
    })
}
