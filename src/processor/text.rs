/// Collapses line breaks and whitespace runs in a description to single spaces.
///
/// Absent input stays absent. Splitting on whitespace also trims the outer
/// edges, so the result is stable under repeated application.
pub fn clean_description(desc: Option<&str>) -> Option<String> {
    let desc = desc?;
    let unbroken = desc.replace("\r\n", " ").replace(['\n', '\r'], " ");
    Some(collapse_whitespace(&unbroken))
}

fn collapse_whitespace(s: &str) -> String {
    let mut normalized = String::with_capacity(s.len());
    for segment in s.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
