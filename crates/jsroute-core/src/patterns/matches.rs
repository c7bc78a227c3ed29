//! Match records grouped by category.

/// One extracted value. Field order is the report's sort order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchRecord {
    pub value: String,
    pub file: Option<String>,
    pub label: String,
}

impl MatchRecord {
    pub fn new(value: &str, label: &str, file: Option<String>) -> Self {
        Self {
            value: value.to_string(),
            file,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    pub name: String,
    pub records: Vec<MatchRecord>,
}

/// Records per group name, groups kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    pub groups: Vec<MatchGroup>,
}

impl MatchSet {
    pub fn with_groups<'a, I: IntoIterator<Item = &'a str>>(names: I) -> Self {
        Self {
            groups: names
                .into_iter()
                .map(|n| MatchGroup {
                    name: n.to_string(),
                    records: Vec::new(),
                })
                .collect(),
        }
    }

    /// Appends to the named group, creating it at the end if missing.
    pub fn push(&mut self, group: &str, record: MatchRecord) {
        match self.groups.iter_mut().find(|g| g.name == group) {
            Some(g) => g.records.push(record),
            None => self.groups.push(MatchGroup {
                name: group.to_string(),
                records: vec![record],
            }),
        }
    }

    pub fn group(&self, name: &str) -> Option<&MatchGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn total_records(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }
}
