//! Notes digest extractor.

use serde::Serialize;

use crate::types::DbId;

use super::context::Spot;
use super::field_value::FieldValue;

/// Reserved free-text key on spot data.
pub const NOTES_FIELD: &str = "notes";

/// One spot's free-text note.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NoteEntry {
    pub spot_id: DbId,
    pub text: String,
}

/// Every spot whose `notes` value is a non-empty string after
/// trimming. `None` when no spot carries notes, so the digest key is
/// omitted from the summary.
pub fn digest(spots: &[Spot]) -> Option<Vec<NoteEntry>> {
    let notes: Vec<NoteEntry> = spots
        .iter()
        .filter_map(|spot| match spot.field(NOTES_FIELD) {
            FieldValue::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| NoteEntry {
                    spot_id: spot.id,
                    text: trimmed.to_string(),
                })
            }
            _ => None,
        })
        .collect();
    (!notes.is_empty()).then_some(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spot(id: i64, note: Option<serde_json::Value>) -> Spot {
        let mut data = serde_json::Map::new();
        if let Some(n) = note {
            data.insert("notes".to_string(), n);
        }
        Spot { id, block_id: None, row_id: None, observed_at: None, data }
    }

    #[test]
    fn collects_trimmed_notes_in_spot_order() {
        let spots = vec![
            spot(1, Some(json!("  leaf curl on row 3  "))),
            spot(2, Some(json!(""))),
            spot(3, None),
            spot(4, Some(json!("   "))),
            spot(5, Some(json!("net damage near post 12"))),
        ];
        let digest = digest(&spots).unwrap();
        assert_eq!(digest.len(), 2);
        assert_eq!(digest[0].spot_id, 1);
        assert_eq!(digest[0].text, "leaf curl on row 3");
        assert_eq!(digest[1].spot_id, 5);
    }

    #[test]
    fn non_text_notes_are_ignored() {
        let spots = vec![spot(1, Some(json!(42)))];
        assert_eq!(digest(&spots), None);
    }

    #[test]
    fn absent_notes_omit_the_digest() {
        assert_eq!(digest(&[spot(1, None)]), None);
        assert_eq!(digest(&[]), None);
    }
}
