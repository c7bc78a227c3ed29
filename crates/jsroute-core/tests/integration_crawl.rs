//! Integration test: full crawl against a local two-page site.
//!
//! `/` links app.js, which declares the `/dashboard` route and a GET call.
//! `/dashboard` links dash.js, which declares a POST route through the
//! `url:`/`method:` idiom. The hash-routed candidates fetch `/` again.

mod common;

use jsroute_core::config::JsrouteConfig;
use jsroute_core::fetch::CurlSession;
use jsroute_core::pipeline::{run_crawl, CrawlSettings};
use std::fs;
use tempfile::tempdir;

const INDEX: &[u8] = br#"<html><script src="/static/app.js"></script></html>"#;
const DASHBOARD: &[u8] = br#"<html><script src="/static/dash.js"></script></html>"#;
const APP_JS: &[u8] = br#"const routes = [{ path: "/dashboard" }]; api.get("/api/login");"#;
const DASH_JS: &[u8] = br#"request({ url: "/api/pay", method: "post" }); const r = { path: "dashboard/" };"#;

fn site() -> common::site_server::Site {
    common::site_server::start(&[
        ("/", "text/html", INDEX),
        ("/dashboard", "text/html", DASHBOARD),
        ("/static/app.js", "application/javascript", APP_JS),
        ("/static/dash.js", "application/javascript", DASH_JS),
    ])
}

fn settings(site: &common::site_server::Site, out: &std::path::Path) -> CrawlSettings {
    let mut cfg = JsrouteConfig::default();
    cfg.output_dir = out.to_path_buf();
    cfg.request_delay_ms = 0;
    CrawlSettings::from_config(&site.base, &cfg)
}

#[test]
fn crawl_converges_and_writes_report() {
    let site = site();
    let out = tempdir().unwrap();
    let js_dir = out.path().join("js");
    let mut session = CurlSession::new("jsroute-test").unwrap();

    let summary = run_crawl(&mut session, &settings(&site, &js_dir)).expect("crawl");

    assert_eq!(summary.initial_links, 1);
    assert_eq!(summary.initial_files, vec![js_dir.join("app.js")]);
    assert_eq!(summary.iterations, 2);
    assert!(summary.converged);
    assert_eq!(summary.final_paths, 2);
    assert_eq!(summary.new_files.len(), 4);
    assert_eq!(summary.files_processed, 5);

    let report = fs::read_to_string(js_dir.join("path.txt")).unwrap();
    assert!(report.contains("===== GET Matches =====\n/api/login  \t[get_double_quotes]\n\n"));
    assert!(report.contains("===== POST Matches =====\n/api/pay  \t[url_method_post]\n\n"));
    assert!(report.contains("===== 统计信息 =====\n"));
    assert!(report.contains("分析文件数: 5\n"));
    assert_eq!(summary.report_lines, report.lines().filter(|l| l.contains("\t[")).count());

    let pages: Vec<String> = site
        .requests()
        .into_iter()
        .map(|r| r.path)
        .filter(|p| !p.ends_with(".js"))
        .collect();
    assert_eq!(pages[0], "/");
    assert!(pages.contains(&"/dashboard".to_string()));
    assert!(pages.contains(&"/api/pay".to_string()));
}

#[test]
fn rerun_reuses_existing_directory() {
    let site = site();
    let out = tempdir().unwrap();
    let js_dir = out.path().join("js");
    fs::create_dir_all(&js_dir).unwrap();
    fs::write(js_dir.join("app.js"), b"// from an earlier run").unwrap();
    let mut session = CurlSession::new("jsroute-test").unwrap();

    let summary = run_crawl(&mut session, &settings(&site, &js_dir)).expect("crawl");
    assert_eq!(summary.initial_files, vec![js_dir.join("app_1.js")]);
    assert_eq!(
        fs::read_to_string(js_dir.join("app.js")).unwrap(),
        "// from an earlier run"
    );
}

#[test]
fn unreachable_target_still_writes_empty_report() {
    let out = tempdir().unwrap();
    let js_dir = out.path().join("js");
    let mut cfg = JsrouteConfig::default();
    cfg.output_dir = js_dir.clone();
    cfg.request_delay_ms = 0;
    let settings = CrawlSettings::from_config("http://127.0.0.1:1/", &cfg);
    let mut session = CurlSession::new("jsroute-test").unwrap();

    let summary = run_crawl(&mut session, &settings).expect("crawl runs");
    assert_eq!(summary.initial_links, 0);
    assert_eq!(summary.iterations, 0);
    assert_eq!(summary.report_lines, 0);
    assert!(fs::read_to_string(js_dir.join("path.txt"))
        .unwrap()
        .starts_with("===== 统计信息 =====\n总提取路径数: 0\n"));
}
