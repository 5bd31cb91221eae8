//! Requested locations.
//!
//! An href is split into path, query and hash. Only the path takes part in
//! route matching; query and hash are carried through unchanged.
//!
//! Parsing goes through `url` against a fixed origin so that relative hrefs,
//! dot segments and absolute URLs all normalize to an absolute path.

use serde::Serialize;
use url::{form_urlencoded, Url};

const ORIGIN: &str = "http://router.local/";

/// A parsed navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    path: String,
    query: Option<String>,
    hash: Option<String>,
}

impl Location {
    /// Parse an href such as `/users/7?tab=posts#top`.
    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        let origin = Url::parse(ORIGIN)?;
        let url = origin.join(href.trim())?;

        Ok(Self {
            path: url.path().to_string(),
            query: url.query().filter(|q| !q.is_empty()).map(str::to_string),
            hash: url.fragment().filter(|h| !h.is_empty()).map(str::to_string),
        })
    }

    /// Build a location from an already encoded path and decoded query pairs.
    pub(crate) fn from_parts<'a, I>(path: String, query: I, hash: Option<&str>) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in query {
            serializer.append_pair(k, v);
        }
        let query = serializer.finish();

        Self {
            path,
            query: (!query.is_empty()).then_some(query),
            hash: hash.filter(|h| !h.is_empty()).map(str::to_string),
        }
    }

    /// Percent-encoded absolute path, always starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query string without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Decoded query pairs in order of appearance.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub fn href(&self) -> String {
        let mut href = self.path.clone();
        if let Some(q) = &self.query {
            href.push('?');
            href.push_str(q);
        }
        if let Some(h) = &self.hash {
            href.push('#');
            href.push_str(h);
        }
        href
    }
}
