//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse route path patterns (`/`, `/users/:id`, `/docs/:rest*`)
//! - Match a requested path against a pattern, extracting params
//! - Build a concrete path from a pattern and params
//!
//! # Design Decisions
//! - Segment-wise matching, no regex
//! - Static segments compare ASCII case-insensitively unless `sensitive`
//! - A single trailing slash is tolerated unless `strict`
//! - Params are percent-decoded on match and percent-encoded on build

use std::borrow::Cow;
use std::collections::HashSet;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use crate::routing::types::{Params, TableError};

/// Characters escaped when writing a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Table-wide matching options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Require the trailing slash of the path to agree with the pattern.
    pub strict: bool,

    /// Compare static segments case-sensitively.
    pub sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    Optional(String),
    Rest(String),
}

/// A parsed route path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
    trailing_slash: bool,
}

impl PathPattern {
    /// Parse a pattern. Patterns must be absolute.
    pub fn parse(source: &str) -> Result<Self, TableError> {
        let invalid = |reason: &str| TableError::InvalidPattern {
            pattern: source.to_string(),
            reason: reason.to_string(),
        };

        let body = source
            .strip_prefix('/')
            .ok_or_else(|| invalid("must start with '/'"))?;
        if body.starts_with('/') {
            return Err(invalid("empty segment"));
        }
        let (body, trailing_slash) = match body.strip_suffix('/') {
            Some(b) => (b, true),
            None => (body, false),
        };

        let mut segments = Vec::new();
        let mut seen = HashSet::new();
        if !body.is_empty() {
            let raw: Vec<&str> = body.split('/').collect();
            for (i, part) in raw.iter().enumerate() {
                if part.is_empty() {
                    return Err(invalid("empty segment"));
                }
                let segment = match part.strip_prefix(':') {
                    None => {
                        let decoded = decode(part);
                        if is_dot_segment(&decoded) {
                            return Err(invalid("dot segments never match"));
                        }
                        Segment::Static(decoded.into_owned())
                    }
                    Some(param) => {
                        let (name, segment): (&str, fn(String) -> Segment) =
                            if let Some(n) = param.strip_suffix('?') {
                                (n, Segment::Optional)
                            } else if let Some(n) = param.strip_suffix('*') {
                                (n, Segment::Rest)
                            } else {
                                (param, Segment::Param)
                            };
                        if name.is_empty()
                            || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                        {
                            return Err(invalid("param names must be non-empty [A-Za-z0-9_]"));
                        }
                        if !seen.insert(name) {
                            return Err(invalid("duplicate param name"));
                        }
                        segment(name.to_string())
                    }
                };
                if matches!(segment, Segment::Rest(_)) && i + 1 != raw.len() {
                    return Err(invalid("rest param must be the last segment"));
                }
                segments.push(segment);
            }
        }

        Ok(Self {
            source: source.to_string(),
            segments,
            trailing_slash,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// True when the pattern has no params at all.
    pub fn is_static(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Static(_)))
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Static(_) => None,
            Segment::Param(n) | Segment::Optional(n) | Segment::Rest(n) => Some(n.as_str()),
        })
    }

    /// Match an absolute, percent-encoded path. Returns the extracted params.
    pub fn matches(&self, path: &str, options: MatchOptions) -> Option<Params> {
        let body = path.strip_prefix('/')?;
        let (body, trailing_slash) = match body.strip_suffix('/') {
            Some(b) => (b, true),
            None => (body, false),
        };
        if options.strict && trailing_slash != self.trailing_slash {
            return None;
        }

        let parts: Vec<Cow<'_, str>> = if body.is_empty() {
            Vec::new()
        } else {
            body.split('/').map(decode).collect()
        };

        let mut captured = Vec::new();
        if match_segments(&self.segments, &parts, options.sensitive, &mut captured) {
            Some(captured.into_iter().collect())
        } else {
            None
        }
    }

    /// Build a percent-encoded path from `params`.
    pub fn build(&self, params: &Params) -> Result<String, BuildError> {
        let mut out: Vec<String> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Static(s) => out.push(encode(s)),
                Segment::Param(n) => match params.get(n).filter(|v| !v.is_empty()) {
                    Some(v) => out.push(encode_param(n, v)?),
                    None => return Err(BuildError::Missing(n.clone())),
                },
                Segment::Optional(n) => {
                    if let Some(v) = params.get(n).filter(|v| !v.is_empty()) {
                        out.push(encode_param(n, v)?);
                    }
                }
                Segment::Rest(n) => {
                    if let Some(v) = params.get(n) {
                        for part in v.split('/').filter(|p| !p.is_empty()) {
                            out.push(encode_param(n, part)?);
                        }
                    }
                }
            }
        }

        let mut path = format!("/{}", out.join("/"));
        if self.trailing_slash && !out.is_empty() {
            path.push('/');
        }
        Ok(path)
    }

    /// Canonical form used to detect patterns that match the same paths:
    /// static segments decoded and re-encoded, case folded unless
    /// `sensitive`, trailing slash kept only when `strict`.
    pub fn key(&self, options: MatchOptions) -> String {
        let mut key = String::new();
        for segment in &self.segments {
            key.push('/');
            match segment {
                Segment::Static(s) => {
                    let encoded = encode(s);
                    let encoded = match encoded.strip_prefix(':') {
                        Some(rest) => format!("%3A{}", rest),
                        None => encoded,
                    };
                    if options.sensitive {
                        key.push_str(&encoded);
                    } else {
                        key.push_str(&encoded.to_ascii_lowercase());
                    }
                }
                Segment::Param(n) => key.push_str(&format!(":{}", n)),
                Segment::Optional(n) => key.push_str(&format!(":{}?", n)),
                Segment::Rest(n) => key.push_str(&format!(":{}*", n)),
            }
        }
        if key.is_empty() {
            key.push('/');
        } else if options.strict && self.trailing_slash {
            key.push('/');
        }
        key
    }
}

/// Why a path could not be built from params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A required param was absent or empty.
    Missing(String),
    /// A param value was `.` or `..`, which URL parsing folds away.
    DotSegment { param: String, value: String },
}

fn match_segments(
    segments: &[Segment],
    parts: &[Cow<'_, str>],
    sensitive: bool,
    captured: &mut Vec<(String, String)>,
) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return parts.is_empty();
    };

    match segment {
        Segment::Static(s) => match parts.split_first() {
            Some((part, tail)) if static_eq(s, part, sensitive) => {
                match_segments(rest, tail, sensitive, captured)
            }
            _ => false,
        },
        Segment::Param(n) => match parts.split_first() {
            Some((part, tail)) if !part.is_empty() => {
                captured.push((n.clone(), part.to_string()));
                if match_segments(rest, tail, sensitive, captured) {
                    return true;
                }
                captured.pop();
                false
            }
            _ => false,
        },
        Segment::Optional(n) => {
            if let Some((part, tail)) = parts.split_first() {
                if !part.is_empty() {
                    captured.push((n.clone(), part.to_string()));
                    if match_segments(rest, tail, sensitive, captured) {
                        return true;
                    }
                    captured.pop();
                }
            }
            match_segments(rest, parts, sensitive, captured)
        }
        Segment::Rest(n) => {
            if parts.iter().any(|p| p.is_empty()) {
                return false;
            }
            if !parts.is_empty() {
                captured.push((n.clone(), parts.join("/")));
            }
            true
        }
    }
}

fn static_eq(expected: &str, actual: &str, sensitive: bool) -> bool {
    if sensitive {
        expected == actual
    } else {
        expected.eq_ignore_ascii_case(actual)
    }
}

fn decode(segment: &str) -> Cow<'_, str> {
    percent_decode_str(segment).decode_utf8_lossy()
}

fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

fn encode_param(name: &str, value: &str) -> Result<String, BuildError> {
    if is_dot_segment(value) {
        return Err(BuildError::DotSegment {
            param: name.to_string(),
            value: value.to_string(),
        });
    }
    Ok(encode(value))
}

/// `%2E` is folded like a literal dot by URL parsing, so both spellings count.
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}
