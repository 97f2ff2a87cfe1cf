use crate::error::EstatError;
use crate::processor::text::clean_description;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Classification type code used by e-Stat for the industry classification.
pub const JSIC_CLASSIFICATION_TYPE: &str = "10";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyLevel {
    Division,
    MajorGroup,
    Group,
    Class,
}

impl HierarchyLevel {
    pub fn depth(self) -> u8 {
        match self {
            HierarchyLevel::Division => 1,
            HierarchyLevel::MajorGroup => 2,
            HierarchyLevel::Group => 3,
            HierarchyLevel::Class => 4,
        }
    }

    /// Length of the numeric code prefix a class code shares with this level.
    /// Divisions are letters and have no numeric prefix.
    pub fn prefix_len(self) -> Option<usize> {
        match self {
            HierarchyLevel::Division => None,
            HierarchyLevel::MajorGroup => Some(2),
            HierarchyLevel::Group => Some(3),
            HierarchyLevel::Class => Some(4),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HierarchyLevel::Division => "division",
            HierarchyLevel::MajorGroup => "major group",
            HierarchyLevel::Group => "group",
            HierarchyLevel::Class => "class",
        }
    }
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRow {
    pub code: String,
    pub code_name: String,
    pub desc: Option<String>,
}

impl ClassificationRow {
    pub fn new(code: &str, code_name: &str, desc: Option<&str>) -> Self {
        Self {
            code: code.to_string(),
            code_name: code_name.to_string(),
            desc: desc.map(ToString::to_string),
        }
    }

    pub fn cleaned(&self) -> Self {
        Self {
            code: self.code.clone(),
            code_name: self.code_name.clone(),
            desc: clean_description(self.desc.as_deref()),
        }
    }
}

/// Rows of one classification revision, in download order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<ClassificationRow>,
}

impl RawTable {
    pub fn new(rows: Vec<ClassificationRow>) -> Result<Self, EstatError> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            if !seen.insert(row.code.as_str()) {
                return Err(EstatError::DuplicateCode {
                    code: row.code.clone(),
                });
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ClassificationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cleaned(&self) -> Self {
        Self {
            rows: self.rows.iter().map(ClassificationRow::cleaned).collect(),
        }
    }
}

/// One class-level code with every ancestor level joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatMasterRow {
    pub class_code: String,
    pub class_code_name: String,
    pub class_desc: Option<String>,
    pub group_code: String,
    pub group_code_name: String,
    pub group_desc: Option<String>,
    pub major_group_code: String,
    pub major_group_code_name: String,
    pub major_group_desc: Option<String>,
    pub division_code: String,
    pub division_code_name: String,
    pub division_desc: Option<String>,
}

pub const FLAT_MASTER_COLUMNS: [&str; 12] = [
    "class_code",
    "class_code_name",
    "class_desc",
    "group_code",
    "group_code_name",
    "group_desc",
    "major_group_code",
    "major_group_code_name",
    "major_group_desc",
    "division_code",
    "division_code_name",
    "division_desc",
];

pub const EXAMPLE_COLUMNS: [&str; 4] = ["code", "example", "unsuitable_example", "release_date"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleRecord {
    pub code: String,
    pub example: Option<String>,
    pub unsuitable_example: Option<String>,
    pub release_date: String,
}

/// Revision code (e.g. "04") to ISO release date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionMapping(BTreeMap<String, String>);

impl RevisionMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, revision_code: &str, release_date: &str) {
        self.0
            .insert(revision_code.to_string(), release_date.to_string());
    }

    pub fn release_date(&self, revision_code: &str) -> Result<&str, EstatError> {
        self.0
            .get(revision_code)
            .map(String::as_str)
            .ok_or_else(|| EstatError::UnknownRevision {
                revision_code: revision_code.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RevisionMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
