//! Built-in pattern tables.

use super::{Pattern, PatternGroup, PatternTable};
use regex::Error;

pub const PAGE_PATH_GROUP: &str = "PagePath Matches";
pub const PATH_GROUP: &str = "Path Matches";
pub const GET_GROUP: &str = "GET Matches";
pub const POST_GROUP: &str = "POST Matches";
pub const OBJECT_GROUP: &str = "Object";

/// Double- or single-quoted string with backslash escapes, lazily matched.
/// Captures the inside in group 1 (double) or 2 (single).
fn escaped_quoted(min: &str) -> String {
    format!(r#"(?:"((?:[^"\\]|\\.){min}?)"|'((?:[^'\\]|\\.){min}?)')"#)
}

/// `url: "<value>", method: "<verb>"` with the value in group 1.
fn url_method(verb: &str) -> String {
    format!(r#"(?i)url:\s*["']([^"']+)["'],\s*method:\s*["']{verb}["']"#)
}

fn group(name: &str, patterns: Vec<Pattern>) -> PatternGroup {
    PatternGroup {
        name: name.to_string(),
        patterns,
    }
}

fn page_path_group() -> Result<PatternGroup, Error> {
    Ok(group(
        PAGE_PATH_GROUP,
        vec![
            Pattern::capture(r#"pagePath:\s*"(.*?)""#, "pagePath_double_quotes")?,
            Pattern::capture(r"pagePath:\s*'(.*?)'", "pagePath_single_quotes")?,
        ],
    ))
}

fn path_group() -> Result<PatternGroup, Error> {
    Ok(group(
        PATH_GROUP,
        vec![
            Pattern::capture(r#"path:\s*"(.*?)""#, "path_double_quotes")?,
            Pattern::capture(r"path:\s*'(.*?)'", "path_single_quotes")?,
            Pattern::capture(r#"url:\s*"([^"]+)""#, "url_double_quotes")?,
            Pattern::capture(r"url:\s*'([^']+)'", "url_single_quotes")?,
        ],
    ))
}

/// `verb(...)` without nested parentheses. Each quote style only fires when
/// it is the first quote in the argument, so a call yields one record.
fn simple_call_group(name: &str, verb: &str) -> Result<PatternGroup, Error> {
    let call = format!(r"(?i){verb}\(([^()]*)\)");
    Ok(group(
        name,
        vec![
            Pattern::call(&call, r#"^[^"']*"([^"]*)""#, &format!("{verb}_double_quotes"))?,
            Pattern::call(&call, r#"^[^"']*'([^']*)'"#, &format!("{verb}_single_quotes"))?,
            Pattern::capture(&url_method(verb), &format!("url_method_{verb}"))?,
        ],
    ))
}

/// `verb(...)` tolerating one level of nested parentheses, first quoted argument.
fn strict_call_group(name: &str, verb: &str) -> Result<PatternGroup, Error> {
    let call = format!(r"(?i){verb}\(((?:[^()]|\([^()]*\))*)\)");
    Ok(group(
        name,
        vec![
            Pattern::call(&call, &escaped_quoted("*"), verb)?,
            Pattern::capture(&url_method(verb), &format!("url_method_{verb}"))?,
        ],
    ))
}

fn strict_key(key: &str, min: &str) -> Result<Pattern, Error> {
    Pattern::capture(&format!(r"(?i){key}:\s*{}", escaped_quoted(min)), key)
}

impl PatternTable {
    /// Table for the final crawl report: case-sensitive keys, no escape
    /// handling, no nested call arguments.
    pub fn report() -> Result<Self, Error> {
        Ok(Self {
            groups: vec![
                page_path_group()?,
                path_group()?,
                simple_call_group(GET_GROUP, "get")?,
                simple_call_group(POST_GROUP, "post")?,
            ],
        })
    }

    /// Key-token groups only; the values become the discovery loop's path set.
    pub fn discovery() -> Result<Self, Error> {
        Ok(Self {
            groups: vec![page_path_group()?, path_group()?],
        })
    }

    /// Directory-scan table: case-insensitive keys, escaped quotes tolerated,
    /// one nesting level in call arguments, plus `name:` and object literals.
    pub fn strict() -> Result<Self, Error> {
        Ok(Self {
            groups: vec![
                group(PAGE_PATH_GROUP, vec![strict_key("pagePath", "*")?]),
                group(
                    PATH_GROUP,
                    vec![
                        strict_key("path", "*")?,
                        strict_key("url", "+")?,
                        strict_key("name", "+")?,
                    ],
                ),
                strict_call_group(GET_GROUP, "get")?,
                strict_call_group(POST_GROUP, "post")?,
                group(
                    OBJECT_GROUP,
                    vec![Pattern::whole(
                        r#"\b[a-zA-Z][a-zA-Z0-9]*\b:\[\{\s*\b[a-zA-Z][a-zA-Z0-9]*\b:"""#,
                        "object",
                    )?],
                ),
            ],
        })
    }
}
