use crate::error::EstatError;
use crate::types::HierarchyLevel;

/// Derives the hierarchy level of a classification code from its shape alone.
///
/// A single uppercase letter is a division; 2, 3 and 4 digit codes are major
/// groups, groups and classes. Every other shape is rejected.
pub fn determine_hierarchy(code: &str) -> Result<HierarchyLevel, EstatError> {
    let bytes = code.as_bytes();
    if bytes.len() == 1 && bytes[0].is_ascii_uppercase() {
        return Ok(HierarchyLevel::Division);
    }
    if !bytes.is_empty() && bytes.iter().all(u8::is_ascii_digit) {
        match bytes.len() {
            2 => return Ok(HierarchyLevel::MajorGroup),
            3 => return Ok(HierarchyLevel::Group),
            4 => return Ok(HierarchyLevel::Class),
            _ => {}
        }
    }
    Err(EstatError::MalformedCode {
        code: code.to_string(),
    })
}

/// Code of the ancestor at `level` for a numeric code, by prefix.
pub(crate) fn ancestor_prefix(code: &str, level: HierarchyLevel) -> Option<&str> {
    let len = level.prefix_len()?;
    code.get(..len)
}
