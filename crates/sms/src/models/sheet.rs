//! Spreadsheet models used by the bulk composer

use serde::{Deserialize, Serialize};

/// A spreadsheet the server can read contacts from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRef {
    pub id: String,
    pub name: String,
}

/// Header row and data rows of the first tab of a sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetPreview {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub data: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows() {
        let preview: SheetPreview = serde_json::from_str(
            r#"{"headers": ["Name", "Phone"], "data": [["Al", "555"], ["Bo"]]}"#,
        )
        .unwrap();

        assert_eq!(preview.headers, vec!["Name", "Phone"]);
        assert_eq!(preview.data[1], vec!["Bo"]);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let preview: SheetPreview = serde_json::from_str("{}").unwrap();
        assert_eq!(preview, SheetPreview::default());
    }
}
