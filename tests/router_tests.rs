//! Integration tests for page routing and history navigation.

use chat_explorer_client::router::RouteRecord;
use chat_explorer_client::{History, Page, Route, Router};
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test]
fn test_route_table_has_two_entries() {
    let router = Router::new();
    let patterns: Vec<&str> = router.routes().iter().map(RouteRecord::pattern).collect();

    assert_eq!(patterns, vec!["/", "/chat/:id"]);
}

#[test_case("/", Page::ChatUpload, None ; "upload page")]
#[test_case("/chat/abc123", Page::ChatDashboard, Some("abc123") ; "dashboard page")]
#[test_case("/chat/12", Page::ChatDashboard, Some("12") ; "numeric id stays text")]
fn test_resolution(location: &str, page: Page, id: Option<&str>) {
    let matched = Router::new().resolve(location).unwrap();

    assert_eq!(matched.page, page);
    assert_eq!(matched.prop("id"), id);
    if id.is_none() {
        assert!(matched.props.is_empty());
    }
}

#[test]
fn test_unknown_path_has_no_route() {
    assert!(Router::new().resolve("/chats").is_none());
}

#[test]
fn test_navigation_from_upload_to_dashboard_and_back() {
    let mut history = History::new(Router::new(), "/");

    let dashboard = history.push(&Route::Dashboard { id: "42".into() }.path()).unwrap();
    assert_eq!(Route::try_from(&dashboard).unwrap(), Route::Dashboard { id: "42".into() });

    assert!(history.back());
    let upload = history.current().unwrap();
    assert_eq!(Route::try_from(&upload).unwrap(), Route::Upload);
}
