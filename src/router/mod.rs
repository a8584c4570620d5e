//! Page routing for the chat explorer front end.
//!
//! Two routes exist: `/` shows the upload page and `/chat/:id` shows the
//! dashboard for one chat, with `id` handed to the page as a string prop.
//! Navigation is history based (plain paths, no `#` fragments).

mod history;

pub use history::History;

use std::collections::BTreeMap;
use std::fmt;

/// Page-level components the router can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Chat export upload page.
    ChatUpload,
    /// Messages, statistics, search and clusters for one chat.
    ChatDashboard,
}

impl Page {
    /// Returns the component name.
    pub fn name(self) -> &'static str {
        match self {
            Page::ChatUpload => "ChatUpload",
            Page::ChatDashboard => "ChatDashboard",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// One entry of the route table.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pattern: String,
    segments: Vec<Segment>,
    page: Page,
    props: bool,
}

impl RouteRecord {
    /// Creates a record. Segments of `pattern` starting with `:` are params.
    pub fn new(pattern: impl Into<String>, page: Page) -> Self {
        let pattern = pattern.into();
        let segments = split_path(&pattern)
            .into_iter()
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Static(segment.to_string()),
            })
            .collect();

        Self {
            pattern,
            segments,
            page,
            props: false,
        }
    }

    /// Passes matched params to the page as props.
    pub fn with_props(mut self) -> Self {
        self.props = true;
        self
    }

    /// Returns the pattern, e.g. `/chat/:id`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the page this record selects.
    pub fn page(&self) -> Page {
        self.page
    }

    fn matches(&self, segments: &[&str]) -> Option<BTreeMap<String, String>> {
        if segments.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, actual) in self.segments.iter().zip(segments) {
            match expected {
                Segment::Static(name) => {
                    if !name.eq_ignore_ascii_case(actual) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if actual.is_empty() {
                        return None;
                    }
                    let value = urlencoding::decode(actual)
                        .map_or_else(|_| (*actual).to_string(), |decoded| decoded.into_owned());
                    params.insert(name.clone(), value);
                }
            }
        }

        Some(params)
    }
}

/// Result of resolving a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Selected page.
    pub page: Page,
    /// Path part of the resolved location.
    pub path: String,
    /// Decoded path params.
    pub params: BTreeMap<String, String>,
    /// Input properties handed to the page; empty unless the record
    /// passes params as props.
    pub props: BTreeMap<String, String>,
}

impl RouteMatch {
    /// Returns a prop by name.
    pub fn prop(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }
}

/// Path-to-page route table.
#[derive(Debug, Clone)]
pub struct Router {
    records: Vec<RouteRecord>,
}

impl Router {
    /// Creates the application's route table.
    pub fn new() -> Self {
        Self::with_routes(vec![
            RouteRecord::new("/", Page::ChatUpload),
            RouteRecord::new("/chat/:id", Page::ChatDashboard).with_props(),
        ])
    }

    /// Creates a router over an explicit table; first match wins.
    pub fn with_routes(records: Vec<RouteRecord>) -> Self {
        Self { records }
    }

    /// Returns the route table.
    pub fn routes(&self) -> &[RouteRecord] {
        &self.records
    }

    /// Resolves a location (`/chat/42?tab=stats#top`) to a page.
    ///
    /// The query string and fragment are ignored. Returns `None` when no
    /// route matches; there is no catch-all.
    pub fn resolve(&self, location: &str) -> Option<RouteMatch> {
        let path = strip_query_and_fragment(location);
        let segments = split_path(path);

        self.records.iter().find_map(|record| {
            record.matches(&segments).map(|params| RouteMatch {
                page: record.page,
                path: normalize_path(path),
                props: if record.props {
                    params.clone()
                } else {
                    BTreeMap::new()
                },
                params,
            })
        })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed view of the application routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Upload,
    /// `/chat/:id`
    Dashboard {
        /// Chat identifier from the path.
        id: String,
    },
}

impl Route {
    /// Builds the location for this route, percent-encoding the id.
    pub fn path(&self) -> String {
        match self {
            Route::Upload => "/".to_string(),
            Route::Dashboard { id } => format!("/chat/{}", urlencoding::encode(id)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl TryFrom<&RouteMatch> for Route {
    type Error = String;

    fn try_from(matched: &RouteMatch) -> Result<Self, Self::Error> {
        match matched.page {
            Page::ChatUpload => Ok(Route::Upload),
            Page::ChatDashboard => matched
                .prop("id")
                .map(|id| Route::Dashboard { id: id.to_string() })
                .ok_or_else(|| format!("route '{}' has no id prop", matched.path)),
        }
    }
}

fn strip_query_and_fragment(location: &str) -> &str {
    location
        .split_once(|c: char| c == '?' || c == '#')
        .map_or(location, |(path, _)| path)
}

/// Splits `/a/b/` into `["a", "b"]`. One trailing slash is tolerated;
/// `/` yields no segments.
fn split_path(path: &str) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);

    if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').collect()
    }
}

fn normalize_path(path: &str) -> String {
    let segments = split_path(path);
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_root_resolves_to_upload_without_props() {
        let matched = Router::new().resolve("/").unwrap();

        assert_eq!(matched.page, Page::ChatUpload);
        assert!(matched.props.is_empty());
        assert!(matched.params.is_empty());
    }

    #[test]
    fn test_chat_resolves_to_dashboard_with_string_id() {
        let matched = Router::new().resolve("/chat/abc123").unwrap();

        assert_eq!(matched.page, Page::ChatDashboard);
        assert_eq!(matched.prop("id"), Some("abc123"));
        assert_eq!(matched.props.len(), 1);
    }

    #[test]
    fn test_numeric_id_stays_a_string() {
        let matched = Router::new().resolve("/chat/00042").unwrap();
        assert_eq!(matched.prop("id"), Some("00042"));
    }

    #[test_case("/chat/abc/" ; "trailing slash")]
    #[test_case("/chat/abc?tab=stats" ; "query string")]
    #[test_case("/chat/abc#top" ; "fragment")]
    #[test_case("/CHAT/abc" ; "static segment case")]
    fn test_dashboard_variants(location: &str) {
        let matched = Router::new().resolve(location).unwrap();
        assert_eq!(matched.page, Page::ChatDashboard);
        assert_eq!(matched.prop("id"), Some("abc"));
    }

    #[test_case("/chat" ; "missing id")]
    #[test_case("/chat/" ; "empty id")]
    #[test_case("/chat/a/b" ; "extra segment")]
    #[test_case("/settings" ; "unknown path")]
    fn test_unmatched(location: &str) {
        assert_eq!(Router::new().resolve(location), None);
    }

    #[test]
    fn test_param_is_percent_decoded() {
        let matched = Router::new().resolve("/chat/family%20group").unwrap();
        assert_eq!(matched.prop("id"), Some("family group"));
    }

    #[test]
    fn test_route_path_round_trip() {
        let router = Router::new();
        let route = Route::Dashboard {
            id: "family group".to_string(),
        };

        assert_eq!(route.path(), "/chat/family%20group");
        let matched = router.resolve(&route.path()).unwrap();
        assert_eq!(Route::try_from(&matched).unwrap(), route);
        assert_eq!(Route::Upload.path(), "/");
    }

    #[test]
    fn test_custom_table_without_props() {
        let router = Router::with_routes(vec![RouteRecord::new("/chat/:id", Page::ChatDashboard)]);
        let matched = router.resolve("/chat/x").unwrap();

        assert_eq!(matched.params.get("id").map(String::as_str), Some("x"));
        assert!(matched.props.is_empty());
        assert!(Route::try_from(&matched).is_err());
    }
}
