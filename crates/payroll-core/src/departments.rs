//! Department vocabulary and the lookup tables that map export values to it

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Normalized department tag written to the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Department {
    Bartend,
    Tserver,
    Server,
    Steward,
    Pizza,
    Line,
    Prep,
    Host,
    Saute,
    Runner,
    Event,
}

impl Department {
    /// Every tag, in declaration order
    pub const ALL: [Department; 11] = [
        Department::Bartend,
        Department::Tserver,
        Department::Server,
        Department::Steward,
        Department::Pizza,
        Department::Line,
        Department::Prep,
        Department::Host,
        Department::Saute,
        Department::Runner,
        Department::Event,
    ];

    /// Tag as written in the output file
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Bartend => "BARTEND",
            Department::Tserver => "TSERVER",
            Department::Server => "SERVER",
            Department::Steward => "STEWARD",
            Department::Pizza => "PIZZA",
            Department::Line => "LINE",
            Department::Prep => "PREP",
            Department::Host => "HOST",
            Department::Saute => "SAUTE",
            Department::Runner => "RUNNER",
            Department::Event => "EVENT",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact-match table from an export value to a department
///
/// Keys are compared after trimming the looked-up value; keys themselves
/// are stored as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentMap {
    entries: BTreeMap<String, Department>,
}

impl DepartmentMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Job code table used for the labor export
    pub fn labor_job_codes() -> Self {
        [
            ("212", Department::Bartend),
            ("311", Department::Tserver),
            ("211", Department::Server),
            ("227", Department::Steward),
            ("225", Department::Pizza),
            ("224", Department::Line),
            ("226", Department::Prep),
            ("213", Department::Host),
            ("223", Department::Saute),
            ("214", Department::Runner),
            ("37", Department::Event),
        ]
        .into_iter()
        .collect()
    }

    /// Job title table used for the tips export
    pub fn tips_job_titles() -> Self {
        [
            ("Food Runner", Department::Runner),
            ("Server", Department::Server),
            ("Bartender", Department::Bartend),
            ("Host", Department::Host),
            ("Steward", Department::Steward),
            ("Training Server", Department::Tserver),
        ]
        .into_iter()
        .collect()
    }

    /// Add or replace an entry
    pub fn insert(&mut self, key: impl Into<String>, department: Department) {
        self.entries.insert(key.into(), department);
    }

    /// Look up a value
    pub fn get(&self, value: &str) -> Option<Department> {
        self.entries.get(value.trim()).copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by key
    pub fn iter(&self) -> impl Iterator<Item = (&str, Department)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), *d))
    }
}

impl<K: Into<String>> FromIterator<(K, Department)> for DepartmentMap {
    fn from_iter<I: IntoIterator<Item = (K, Department)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, d)| (k.into(), d)).collect(),
        }
    }
}
