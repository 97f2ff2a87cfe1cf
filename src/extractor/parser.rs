use crate::types::ClassificationRow;
use regex::Regex;
use std::sync::LazyLock;
use tl::VDom;

/// Title, header and note lines that precede the data rows of a master CSV.
pub const MASTER_PREAMBLE_LINES: usize = 3;

pub const EXAMPLE_LABEL: &str = "事例";
pub const UNSUITABLE_EXAMPLE_LABEL: &str = "不適合事例";

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleCells {
    pub example: Option<String>,
    pub unsuitable_example: Option<String>,
}

#[derive(Clone, Copy)]
enum ExampleField {
    Example,
    UnsuitableExample,
}

/// Parses the body of a master download into rows of `(code, code_name, desc)`.
///
/// The first [`MASTER_PREAMBLE_LINES`] lines are skipped. An empty description
/// field is read as absent.
pub fn parse_master_csv(text: &str) -> Result<Vec<ClassificationRow>, String> {
    let body = skip_lines(text, MASTER_PREAMBLE_LINES);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| format!("Malformed CSV record: {e}"))?;
        let line = record.position().map_or(0, |pos| pos.line()) as usize + MASTER_PREAMBLE_LINES;
        let code = record.get(0).map(str::trim).unwrap_or_default();
        if code.is_empty() && record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if code.is_empty() {
            return Err(format!("Missing code on line {line}"));
        }
        let Some(code_name) = record.get(1) else {
            return Err(format!("Missing code_name for code {code} on line {line}"));
        };
        let desc = record.get(2).filter(|field| !field.trim().is_empty());
        rows.push(ClassificationRow::new(code, code_name, desc));
    }

    Ok(rows)
}

fn skip_lines(text: &str, count: usize) -> &str {
    let mut rest = text;
    for _ in 0..count {
        match rest.find('\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return "",
        }
    }
    rest
}

/// Pairs each labelled header cell of a terms page with the data cell that
/// follows it. Missing or blank cells stay `None`.
pub fn parse_example_table(html: &str) -> Result<ExampleCells, String> {
    let dom = parse_dom(html)?;
    let parser = dom.parser();
    let mut cells = ExampleCells::default();
    let mut pending: Option<ExampleField> = None;

    for node in dom.nodes().iter() {
        let Some(tag) = node.as_tag() else {
            continue;
        };
        match tag.name().as_utf8_str().as_ref() {
            "th" => {
                pending = match normalize_text(&tag.inner_text(parser)).as_str() {
                    EXAMPLE_LABEL => Some(ExampleField::Example),
                    UNSUITABLE_EXAMPLE_LABEL => Some(ExampleField::UnsuitableExample),
                    _ => None,
                };
            }
            "td" => {
                let Some(field) = pending.take() else {
                    continue;
                };
                let text = normalize_text(&tag.inner_text(parser));
                let value = (!text.is_empty()).then_some(text);
                match field {
                    ExampleField::Example => cells.example = value,
                    ExampleField::UnsuitableExample => cells.unsuitable_example = value,
                }
            }
            _ => {}
        }
    }

    Ok(cells)
}

/// Decodes character references and collapses whitespace in scraped text.
pub fn normalize_text(input: &str) -> String {
    let decoded = html_escape::decode_html_entities(input).replace('\u{00A0}', " ");
    WHITESPACE_RE
        .replace_all(decoded.trim(), " ")
        .trim()
        .to_string()
}

fn parse_dom(html: &str) -> Result<VDom<'_>, String> {
    tl::parse(html, tl::ParserOptions::default())
        .map_err(|e| format!("Failed to parse HTML document: {e}"))
}
