//! Legacy comma-joined attribute list format.
//!
//! Older model files (and the CLI `--attributes` argument) carry Satellite
//! attributes as a single string of `name:type` pairs separated by commas,
//! e.g. `"age:integer, email:string, nickname"`. The canonical in-memory
//! representation is the ordered `Attribute` list; this adapter isolates
//! parsing and formatting of the string form.

use super::Attribute;

/// Parse a comma-joined `name:type` list into ordered attributes.
///
/// Entries without a `:` get the string type. Empty entries are skipped,
/// surrounding whitespace is trimmed. Only the first `:` splits, so a
/// stray colon in the type tag stays with the tag.
pub fn parse_attribute_list(raw: &str) -> Vec<Attribute> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((name, tag)) => Attribute::new(name.trim(), tag.trim()),
            None => Attribute::new(entry, "string"),
        })
        .collect()
}

/// Format attributes back into the comma-joined `name:type` string form
pub fn format_attribute_list(attributes: &[Attribute]) -> String {
    attributes
        .iter()
        .map(|a| format!("{}:{}", a.name, a.type_tag))
        .collect::<Vec<_>>()
        .join(", ")
}
