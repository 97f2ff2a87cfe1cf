use crate::error::EstatError;
use crate::processor::hierarchy::{ancestor_prefix, determine_hierarchy};
use crate::processor::text::clean_description;
use crate::types::{ClassificationRow, FlatMasterRow, HierarchyLevel, RawTable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Inclusive span of major-group codes covered by one division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionRange {
    pub division_code: String,
    pub first_major_group: String,
    pub last_major_group: String,
}

impl DivisionRange {
    pub fn new(division_code: &str, first_major_group: &str, last_major_group: &str) -> Self {
        Self {
            division_code: division_code.to_string(),
            first_major_group: first_major_group.to_string(),
            last_major_group: last_major_group.to_string(),
        }
    }

    fn contains(&self, major_group_code: &str) -> bool {
        // Both bounds are two-digit codes, so string order is numeric order.
        self.first_major_group.as_str() <= major_group_code
            && major_group_code <= self.last_major_group.as_str()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DivisionRanges {
    ranges: Vec<DivisionRange>,
}

impl DivisionRanges {
    pub fn new(mut ranges: Vec<DivisionRange>) -> Result<Self, EstatError> {
        for range in &ranges {
            validate_range(range)?;
        }

        ranges.sort_by(|a, b| a.first_major_group.cmp(&b.first_major_group));
        for pair in ranges.windows(2) {
            if pair[1].first_major_group <= pair[0].last_major_group {
                return Err(EstatError::InvalidDivisionRanges {
                    reason: format!(
                        "division {} ({}-{}) overlaps division {} ({}-{})",
                        pair[0].division_code,
                        pair[0].first_major_group,
                        pair[0].last_major_group,
                        pair[1].division_code,
                        pair[1].first_major_group,
                        pair[1].last_major_group,
                    ),
                });
            }
        }

        Ok(Self { ranges })
    }

    /// Derives each division's span from row order: a major group belongs to
    /// the nearest division row listed before it.
    pub fn from_input_order(raw: &RawTable) -> Result<Self, EstatError> {
        let mut spans: Vec<DivisionRange> = Vec::new();
        let mut current: Option<usize> = None;

        for row in raw.rows() {
            match determine_hierarchy(&row.code)? {
                HierarchyLevel::Division => {
                    spans.push(DivisionRange::new(&row.code, "", ""));
                    current = Some(spans.len() - 1);
                }
                HierarchyLevel::MajorGroup => {
                    let Some(index) = current else {
                        return Err(EstatError::UnresolvedDivision {
                            major_group_code: row.code.clone(),
                        });
                    };
                    let span = &mut spans[index];
                    if span.first_major_group.is_empty() || row.code < span.first_major_group {
                        span.first_major_group = row.code.clone();
                    }
                    if row.code > span.last_major_group {
                        span.last_major_group = row.code.clone();
                    }
                }
                HierarchyLevel::Group | HierarchyLevel::Class => {}
            }
        }

        // Divisions without any listed major group cover nothing.
        spans.retain(|span| !span.first_major_group.is_empty());
        Self::new(spans)
    }

    pub fn division_for(&self, major_group_code: &str) -> Option<&str> {
        self.ranges
            .iter()
            .find(|range| range.contains(major_group_code))
            .map(|range| range.division_code.as_str())
    }

    pub fn ranges(&self) -> &[DivisionRange] {
        &self.ranges
    }
}

fn validate_range(range: &DivisionRange) -> Result<(), EstatError> {
    let invalid = |reason: String| EstatError::InvalidDivisionRanges { reason };

    if !matches!(
        determine_hierarchy(&range.division_code),
        Ok(HierarchyLevel::Division)
    ) {
        return Err(invalid(format!(
            "{:?} is not a division code",
            range.division_code
        )));
    }
    for bound in [&range.first_major_group, &range.last_major_group] {
        if !matches!(determine_hierarchy(bound), Ok(HierarchyLevel::MajorGroup)) {
            return Err(invalid(format!(
                "{bound:?} in division {} is not a major group code",
                range.division_code
            )));
        }
    }
    if range.first_major_group > range.last_major_group {
        return Err(invalid(format!(
            "division {} starts at {} after its end {}",
            range.division_code, range.first_major_group, range.last_major_group
        )));
    }
    Ok(())
}

struct LevelIndex<'a> {
    divisions: HashMap<&'a str, &'a ClassificationRow>,
    major_groups: HashMap<&'a str, &'a ClassificationRow>,
    groups: HashMap<&'a str, &'a ClassificationRow>,
    classes: Vec<&'a ClassificationRow>,
}

impl<'a> LevelIndex<'a> {
    fn build(raw: &'a RawTable) -> Result<Self, EstatError> {
        let mut index = LevelIndex {
            divisions: HashMap::new(),
            major_groups: HashMap::new(),
            groups: HashMap::new(),
            classes: Vec::new(),
        };

        for row in raw.rows() {
            let code = row.code.as_str();
            match determine_hierarchy(code)? {
                HierarchyLevel::Division => {
                    index.divisions.insert(code, row);
                }
                HierarchyLevel::MajorGroup => {
                    index.major_groups.insert(code, row);
                }
                HierarchyLevel::Group => {
                    index.groups.insert(code, row);
                }
                HierarchyLevel::Class => index.classes.push(row),
            }
        }

        Ok(index)
    }
}

fn lookup<'a>(
    table: &HashMap<&str, &'a ClassificationRow>,
    class_code: &str,
    level: HierarchyLevel,
    ancestor_code: &str,
) -> Result<&'a ClassificationRow, EstatError> {
    table
        .get(ancestor_code)
        .copied()
        .ok_or_else(|| missing(class_code, level, ancestor_code))
}

fn missing(class_code: &str, level: HierarchyLevel, ancestor_code: &str) -> EstatError {
    EstatError::MissingAncestor {
        class_code: class_code.to_string(),
        level,
        ancestor_code: ancestor_code.to_string(),
    }
}

/// Joins every class-level row to its group, major group and division.
///
/// Output keeps the input order of class rows. Any class whose ancestor
/// cannot be resolved fails the whole table.
pub fn create_flat_master_table(
    raw: &RawTable,
    divisions: &DivisionRanges,
) -> Result<Vec<FlatMasterRow>, EstatError> {
    let index = LevelIndex::build(raw)?;
    let mut flat = Vec::with_capacity(index.classes.len());

    for class in &index.classes {
        let class_code = class.code.as_str();

        let group_code = ancestor_prefix(class_code, HierarchyLevel::Group)
            .ok_or_else(|| missing(class_code, HierarchyLevel::Group, class_code))?;
        let group = lookup(&index.groups, class_code, HierarchyLevel::Group, group_code)?;

        let major_group_code = ancestor_prefix(class_code, HierarchyLevel::MajorGroup)
            .ok_or_else(|| missing(class_code, HierarchyLevel::MajorGroup, class_code))?;
        let major_group = lookup(
            &index.major_groups,
            class_code,
            HierarchyLevel::MajorGroup,
            major_group_code,
        )?;

        let division_code = divisions
            .division_for(major_group_code)
            .ok_or_else(|| EstatError::UnresolvedDivision {
                major_group_code: major_group_code.to_string(),
            })?;
        let division = lookup(
            &index.divisions,
            class_code,
            HierarchyLevel::Division,
            division_code,
        )?;

        flat.push(FlatMasterRow {
            class_code: class.code.clone(),
            class_code_name: class.code_name.clone(),
            class_desc: clean_description(class.desc.as_deref()),
            group_code: group.code.clone(),
            group_code_name: group.code_name.clone(),
            group_desc: clean_description(group.desc.as_deref()),
            major_group_code: major_group.code.clone(),
            major_group_code_name: major_group.code_name.clone(),
            major_group_desc: clean_description(major_group.desc.as_deref()),
            division_code: division.code.clone(),
            division_code_name: division.code_name.clone(),
            division_desc: clean_description(division.desc.as_deref()),
        });
    }

    Ok(flat)
}

/// Same as [`create_flat_master_table`], with division spans taken from the
/// row order of `raw`.
pub fn create_flat_master_table_from_input_order(
    raw: &RawTable,
) -> Result<Vec<FlatMasterRow>, EstatError> {
    let divisions = DivisionRanges::from_input_order(raw)?;
    create_flat_master_table(raw, &divisions)
}
