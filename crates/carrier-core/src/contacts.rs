use crate::{Error, Result};
use std::path::Path;

/// Header the contact file must carry for recipient phone numbers.
pub const PHONE_COLUMN: &str = "Phone";

/// Load the ordered recipient list from a CSV contact file.
///
/// Returns one entry per data row, in file order, taken verbatim from the
/// `Phone` column. No deduplication, filtering, or number-format validation
/// happens here; a malformed value is only caught later, if at all, by the
/// messaging client itself.
pub fn load_contacts(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let phone_index = headers
        .iter()
        .position(|header| header == PHONE_COLUMN)
        .ok_or_else(|| Error::MissingColumn {
            path: path.to_path_buf(),
            column: PHONE_COLUMN,
        })?;

    let mut contacts = Vec::new();
    for record in reader.records() {
        let record = record?;
        contacts.push(record.get(phone_index).unwrap_or_default().to_string());
    }

    tracing::debug!(
        "Loaded {} contacts from {}",
        contacts.len(),
        path.display()
    );

    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_contacts_preserves_order_and_length() {
        let file = write_csv(
            "Name,Phone\n\
             Alice,+15551230001\n\
             Bob,+15551230002\n\
             Carol,+15551230003\n",
        );

        let contacts = load_contacts(file.path()).unwrap();

        assert_eq!(contacts.len(), 3);
        assert_eq!(
            contacts,
            vec!["+15551230001", "+15551230002", "+15551230003"]
        );
    }

    #[test]
    fn test_load_contacts_passes_values_through_verbatim() {
        // Spacing, punctuation, and even empty cells survive untouched
        let file = write_csv(
            "Name,Phone\n\
             Dana,+44 7700 900123\n\
             Eve,(555) 123-4567\n\
             Frank,\n",
        );

        let contacts = load_contacts(file.path()).unwrap();

        assert_eq!(contacts, vec!["+44 7700 900123", "(555) 123-4567", ""]);
    }

    #[test]
    fn test_load_contacts_fails_without_phone_column() {
        let file = write_csv("Name,Number\nAlice,+15551230001\n");

        let result = load_contacts(file.path());

        assert!(matches!(
            result,
            Err(Error::MissingColumn { column: PHONE_COLUMN, .. })
        ));
    }

    #[test]
    fn test_load_contacts_fails_for_missing_file() {
        let result = load_contacts(Path::new("/nonexistent/contacts.csv"));

        assert!(result.is_err());
    }

    #[test]
    fn test_load_contacts_column_match_is_exact() {
        let file = write_csv("phone\n+15551230001\n");

        let result = load_contacts(file.path());

        assert!(matches!(result, Err(Error::MissingColumn { .. })));
    }
}
