//! Integration test: the curl session against a local HTTP server.

mod common;

use jsroute_core::fetch::{Accept, CurlSession, FetchError, Fetcher};
use jsroute_core::links::discover_script_links;
use jsroute_core::storage::save_script;
use std::time::Duration;
use tempfile::tempdir;

const PAGE: &[u8] = br#"<html><head>
<script src="/static/app.js"></script>
<script type="text/javascript" src="vendor.js?v=2"></script>
<script src="vendor.js?v=3"></script>
</head><body></body></html>"#;

#[test]
fn page_fetch_discovers_absolute_script_links() {
    let site = common::site_server::start(&[("/index.html", "text/html", PAGE)]);
    let mut session = CurlSession::new("jsroute-test/1.0").unwrap();

    let links = discover_script_links(&mut session, &site.url("index.html"));
    assert_eq!(
        links,
        vec![site.url("static/app.js"), site.url("vendor.js?v=2")]
    );
    let seen = site.requests();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].user_agent.as_deref(), Some("jsroute-test/1.0"));
    assert!(seen[0].referer.is_none());
}

#[test]
fn non_200_is_an_http_error() {
    let site = common::site_server::start(&[]);
    let mut session = CurlSession::new("jsroute-test").unwrap();
    let err = session
        .get(&site.url("missing"), None, None, Accept::Page)
        .unwrap_err();
    assert!(matches!(err, FetchError::Http(404)));
    assert!(discover_script_links(&mut session, &site.url("missing")).is_empty());
}

#[test]
fn script_download_sends_referer_and_keeps_bytes() {
    let body: Vec<u8> = b"var s = '\xff\xfe';\npath: \"/api\"\n".to_vec();
    let site = common::site_server::start(&[("/static/app.js", "application/javascript", body.as_slice())]);
    let mut session = CurlSession::new("jsroute-test").unwrap();
    let dir = tempdir().unwrap();

    let referer = site.url("index.html");
    let first = save_script(
        &mut session,
        &site.url("static/app.js"),
        dir.path(),
        &referer,
        Duration::from_secs(10),
    )
    .expect("saved");
    let second = save_script(
        &mut session,
        &site.url("static/app.js"),
        dir.path(),
        &referer,
        Duration::from_secs(10),
    )
    .expect("saved again");

    assert_eq!(first, dir.path().join("app.js"));
    assert_eq!(second, dir.path().join("app_1.js"));
    assert_eq!(std::fs::read(&first).unwrap(), body);
    assert_eq!(std::fs::read(&second).unwrap(), body);
    assert!(site
        .requests()
        .iter()
        .all(|r| r.referer.as_deref() == Some(referer.as_str())));
}
