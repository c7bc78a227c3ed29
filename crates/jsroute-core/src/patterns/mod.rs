//! Route pattern extraction.
//!
//! A [`PatternTable`] is an ordered list of named groups, each an ordered
//! list of labelled regexes. Running a table over a text yields every
//! non-overlapping match of every pattern as a [`MatchRecord`], grouped in
//! table order. Nothing is deduplicated here; the report does that.

mod matches;
mod tables;

pub use matches::{MatchGroup, MatchRecord, MatchSet};
pub use tables::{GET_GROUP, OBJECT_GROUP, PAGE_PATH_GROUP, PATH_GROUP, POST_GROUP};

use regex::{Captures, Regex};

/// How the value is pulled out of a regex match.
#[derive(Debug, Clone)]
pub enum Extraction {
    /// First capture group that participated in the match.
    Capture,
    /// Group 1 is a call's argument text; the value is the first quoted
    /// string inside it, found with this secondary regex.
    CallArgument(Regex),
    /// The whole match.
    Whole,
}

#[derive(Debug, Clone)]
pub struct Pattern {
    pub regex: Regex,
    pub label: String,
    pub extraction: Extraction,
}

impl Pattern {
    pub fn new(regex: &str, label: &str, extraction: Extraction) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(regex)?,
            label: label.to_string(),
            extraction,
        })
    }

    pub fn capture(regex: &str, label: &str) -> Result<Self, regex::Error> {
        Self::new(regex, label, Extraction::Capture)
    }

    pub fn call(regex: &str, quoted: &str, label: &str) -> Result<Self, regex::Error> {
        Self::new(regex, label, Extraction::CallArgument(Regex::new(quoted)?))
    }

    pub fn whole(regex: &str, label: &str) -> Result<Self, regex::Error> {
        Self::new(regex, label, Extraction::Whole)
    }

    /// Trimmed values of every match in `text`; matches with nothing to extract are skipped.
    pub fn values<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.regex
            .captures_iter(text)
            .filter_map(move |caps| self.extract(&caps))
            .map(str::trim)
    }

    fn extract<'t>(&self, caps: &Captures<'t>) -> Option<&'t str> {
        match &self.extraction {
            Extraction::Capture => first_group(caps),
            Extraction::Whole => caps.get(0).map(|m| m.as_str()),
            Extraction::CallArgument(quoted) => {
                let argument = caps.get(1)?.as_str();
                first_group(&quoted.captures(argument)?)
            }
        }
    }
}

fn first_group<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    caps.iter().skip(1).flatten().next().map(|m| m.as_str())
}

#[derive(Debug, Clone)]
pub struct PatternGroup {
    pub name: String,
    pub patterns: Vec<Pattern>,
}

#[derive(Debug, Clone)]
pub struct PatternTable {
    pub groups: Vec<PatternGroup>,
}

impl PatternTable {
    /// An empty match set with one group per table group, in table order.
    pub fn empty_matches(&self) -> MatchSet {
        MatchSet::with_groups(self.groups.iter().map(|g| g.name.as_str()))
    }

    /// Runs every pattern over `text`, appending records to `out`.
    /// `file` is attached to each record when given.
    pub fn extract_into(&self, text: &str, file: Option<&str>, out: &mut MatchSet) {
        for group in &self.groups {
            for pattern in &group.patterns {
                for value in pattern.values(text) {
                    out.push(
                        &group.name,
                        MatchRecord::new(value, &pattern.label, file.map(str::to_string)),
                    );
                }
            }
        }
    }

    pub fn extract(&self, text: &str, file: Option<&str>) -> MatchSet {
        let mut out = self.empty_matches();
        self.extract_into(text, file, &mut out);
        out
    }

    /// All extracted values, ignoring groups and labels.
    pub fn values<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.groups
            .iter()
            .flat_map(|g| g.patterns.iter())
            .flat_map(move |p| p.values(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_finds_all_non_overlapping() {
        let p = Pattern::capture(r#"path:\s*"(.*?)""#, "path").unwrap();
        let text = "path: \"/a\", x, path:\"/b\"\npath: \" /c \"";
        assert_eq!(p.values(text).collect::<Vec<_>>(), vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn capture_takes_first_participating_group() {
        let p = Pattern::capture(r#"k:(?:"([^"]*)"|'([^']*)')"#, "k").unwrap();
        assert_eq!(p.values("k:'x' k:\"y\"").collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn call_argument_uses_first_quoted_string() {
        let p = Pattern::call(r"(?i)get\(([^()]*)\)", r#""([^"]*)""#, "get").unwrap();
        let text = r#"http.GET(base, "/api/a", "/ignored"); get(noQuotes); get("/api/b")"#;
        assert_eq!(p.values(text).collect::<Vec<_>>(), vec!["/api/a", "/api/b"]);
    }

    #[test]
    fn whole_match_value() {
        let p = Pattern::whole(r"[a-z]+:\d+", "pair").unwrap();
        assert_eq!(p.values("a:1 b:2").collect::<Vec<_>>(), vec!["a:1", "b:2"]);
    }

    #[test]
    fn extract_attaches_file_and_keeps_table_order() {
        let table = PatternTable {
            groups: vec![
                PatternGroup {
                    name: "First".into(),
                    patterns: vec![Pattern::capture(r"a=(\w+)", "a").unwrap()],
                },
                PatternGroup {
                    name: "Second".into(),
                    patterns: vec![Pattern::capture(r"b=(\w+)", "b").unwrap()],
                },
            ],
        };
        let set = table.extract("b=2 a=1 a=1", Some("x.js"));
        let names: Vec<_> = set.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(set.groups[0].records.len(), 2);
        assert_eq!(set.groups[0].records[0].file.as_deref(), Some("x.js"));
        assert_eq!(set.groups[1].records[0].value, "2");
    }
}
