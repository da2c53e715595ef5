/* src/description.rs */

use serde::Serialize;

pub const SPECIFICATIONS_MARKER: &str = "[Specifications]";
pub const DESCRIPTION_MARKER: &str = "[Description]";
pub const SUMMARY_LEN: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Specification {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedDescription {
    pub description: String,
    pub specifications: Vec<Specification>,
    pub summary: String,
}

/// Splits a product description into a specifications table and the prose
/// body. Text lacking either marker is returned as the description.
pub fn parse_description(text: &str) -> ParsedDescription {
    let split = if text.contains(SPECIFICATIONS_MARKER) {
        text.split_once(DESCRIPTION_MARKER)
    } else {
        None
    };

    let Some((specs_part, body)) = split else {
        let description = text.trim().to_string();
        return ParsedDescription {
            summary: summarize(&description),
            description,
            specifications: Vec::new(),
        };
    };

    let specifications = specs_part
        .replace(SPECIFICATIONS_MARKER, "")
        .lines()
        .filter_map(|line| {
            let (label, value) = line.split_once(':')?;
            Some(Specification {
                label: label.trim().to_string(),
                value: value.trim().to_string(),
            })
        })
        .collect();

    let description = body.trim().to_string();
    ParsedDescription {
        summary: summarize(&description),
        description,
        specifications,
    }
}

fn summarize(text: &str) -> String {
    match text.char_indices().nth(SUMMARY_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
