//! Column conversion helpers shared by the query modules.

use jiff::{Timestamp, civil::Date};
use rusqlite::{Row, types::Type};

/// Reads an RFC 3339 timestamp column.
pub(crate) fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads an ISO 8601 calendar date column.
pub(crate) fn date_column(row: &Row, idx: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(idx)?
        .parse::<Date>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a nullable ISO 8601 calendar date column.
pub(crate) fn optional_date_column(row: &Row, idx: usize) -> rusqlite::Result<Option<Date>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Date>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Case-insensitive substring match using full Unicode lowercasing.
///
/// SQLite's `LIKE` folds ASCII only.
pub(crate) fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::name_matches;

    #[test]
    fn test_name_matches_folds_unicode_case() {
        assert!(name_matches("Île de Ré", "île"));
        assert!(name_matches("ÖSTERREICH", "österreich"));
        assert!(name_matches("100% Tasmania", "100%"));
        assert!(!name_matches("Tasmania", "100%"));
        assert!(!name_matches("Tokyo", "Kyoto"));
    }
}
