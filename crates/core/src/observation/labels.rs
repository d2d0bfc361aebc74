//! Display label resolution for categorical values.
//!
//! Known vocabularies live in a lookup table keyed by field and raw
//! value, so a new code is a data change rather than a logic change.
//! Unmatched values fall back to a humanized form of the raw code.

/// `(field, value, label)` rows. An empty field matches any field,
/// used for vocabularies that can appear under more than one key.
const LABEL_TABLE: &[(&str, &str, &str)] = &[
    // Modified Eichhorn-Lorenz phenological stages.
    ("", "el_4", "Budburst"),
    ("", "el_9", "2-3 leaves separated"),
    ("", "el_12", "Inflorescence clear, 5 leaves separated"),
    ("", "el_15", "8 leaves separated"),
    ("", "el_19", "Flowering begins"),
    ("", "el_23", "Full flowering"),
    ("", "el_27", "Fruit set"),
    ("", "el_31", "Berries pea-size"),
    ("", "el_35", "Veraison"),
    ("", "el_38", "Berries harvest-ripe"),
];

/// Resolve the display label for a categorical value.
pub fn resolve(field: &str, value: &str) -> String {
    LABEL_TABLE
        .iter()
        .find(|(f, v, _)| (f.is_empty() || *f == field) && *v == value)
        .map(|(_, _, label)| (*label).to_string())
        .unwrap_or_else(|| humanize(value))
}

/// Fallback label: underscores to spaces, title case per word.
pub fn humanize(value: &str) -> String {
    value
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
