//! Roster sheet intake.
//!
//! Agencies keep their workers in spreadsheets with wildly inconsistent
//! column names. This module reads an exported CSV, maps recognized headers
//! onto the canonical bulk-upload field names, and produces the same raw
//! rows the HTTP endpoint accepts. Cell contents are passed through as
//! strings; the bulk validator owns all coercion and rejection.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use serde_json::Value;

use crate::workflows::profiles::bulk::RawProfileRecord;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster sheet: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawProfileRecord>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RawProfileRecord>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let fields: Vec<Option<&'static str>> = csv_reader
            .headers()?
            .iter()
            .map(|header| field_for_header(&normalize_header(header)))
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut raw = RawProfileRecord::default();

            for (index, cell) in record.iter().enumerate() {
                let field = match fields.get(index) {
                    Some(Some(field)) => *field,
                    _ => continue,
                };
                let cell = cell.trim();
                if cell.is_empty() {
                    continue;
                }
                raw.insert(field, cell_value(field, cell));
            }

            // Trailing blank lines are sheet noise, not empty submissions.
            if !raw.is_empty() {
                rows.push(raw);
            }
        }

        Ok(rows)
    }
}

fn cell_value(field: &str, cell: &str) -> Value {
    if matches!(field, "skills" | "languages") {
        let items = cell
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect();
        return Value::Array(items);
    }
    Value::String(cell.to_string())
}

fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

static HEADER_MAP: OnceLock<HashMap<String, &'static str>> = OnceLock::new();

fn field_for_header(normalized: &str) -> Option<&'static str> {
    header_map().get(normalized).copied()
}

fn header_map() -> &'static HashMap<String, &'static str> {
    HEADER_MAP.get_or_init(|| {
        const HEADER_TO_FIELD: &[(&str, &str)] = &[
            ("full name", "fullName"),
            ("fullname", "fullName"),
            ("full_name", "fullName"),
            ("name", "fullName"),
            ("date of birth", "dateOfBirth"),
            ("dateofbirth", "dateOfBirth"),
            ("date_of_birth", "dateOfBirth"),
            ("dob", "dateOfBirth"),
            ("birth date", "dateOfBirth"),
            ("phone", "phone"),
            ("phone number", "phone"),
            ("phone_number", "phone"),
            ("mobile", "phone"),
            ("email", "email"),
            ("e-mail", "email"),
            ("email address", "email"),
            ("nationality", "nationality"),
            ("skills", "skills"),
            ("languages", "languages"),
            ("marital status", "maritalStatus"),
            ("marital_status", "maritalStatus"),
            ("maritalstatus", "maritalStatus"),
            ("children", "childrenCount"),
            ("children count", "childrenCount"),
            ("children_count", "childrenCount"),
            ("childrencount", "childrenCount"),
            ("experience", "experienceYears"),
            ("experience years", "experienceYears"),
            ("experience_years", "experienceYears"),
            ("experienceyears", "experienceYears"),
            ("years of experience", "experienceYears"),
            ("preferred salary min", "preferredSalaryMin"),
            ("preferred_salary_min", "preferredSalaryMin"),
            ("preferredsalarymin", "preferredSalaryMin"),
            ("salary min", "preferredSalaryMin"),
            ("minimum salary", "preferredSalaryMin"),
            ("preferred salary max", "preferredSalaryMax"),
            ("preferred_salary_max", "preferredSalaryMax"),
            ("preferredsalarymax", "preferredSalaryMax"),
            ("salary max", "preferredSalaryMax"),
            ("maximum salary", "preferredSalaryMax"),
            ("preferred currency", "preferredCurrency"),
            ("preferred_currency", "preferredCurrency"),
            ("preferredcurrency", "preferredCurrency"),
            ("currency", "preferredCurrency"),
            ("passport expiry", "passportExpiry"),
            ("passport_expiry", "passportExpiry"),
            ("passportexpiry", "passportExpiry"),
            ("passport expiry date", "passportExpiry"),
            ("available from", "availableFrom"),
            ("available_from", "availableFrom"),
            ("availablefrom", "availableFrom"),
            ("availability", "availabilityStatus"),
            ("availability status", "availabilityStatus"),
            ("availability_status", "availabilityStatus"),
            ("availabilitystatus", "availabilityStatus"),
            ("verification", "verificationStatus"),
            ("verification status", "verificationStatus"),
            ("verification_status", "verificationStatus"),
            ("verificationstatus", "verificationStatus"),
            ("live in", "liveInPreference"),
            ("live-in", "liveInPreference"),
            ("live in preference", "liveInPreference"),
            ("live_in_preference", "liveInPreference"),
            ("liveinpreference", "liveInPreference"),
        ];

        let mut map = HashMap::with_capacity(HEADER_TO_FIELD.len());
        for (header, field) in HEADER_TO_FIELD {
            map.insert((*header).to_string(), *field);
        }
        map
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn maps_headers_across_naming_styles() {
        let spaced = RosterImporter::from_reader(Cursor::new(
            "\u{feff}Full Name,Date of Birth,Phone\nAmina Bekele,1995-04-12,+251911234567\n",
        ))
        .expect("parse spaced headers");
        let snake = RosterImporter::from_reader(Cursor::new(
            "full_name,date_of_birth,phone\nAmina Bekele,1995-04-12,+251911234567\n",
        ))
        .expect("parse snake headers");

        assert_eq!(spaced, snake);
        let row = &spaced[0];
        assert_eq!(
            row.get("fullName"),
            Some(&Value::String("Amina Bekele".to_string()))
        );
        assert_eq!(
            row.get("dateOfBirth"),
            Some(&Value::String("1995-04-12".to_string()))
        );
        assert_eq!(
            row.get("phone"),
            Some(&Value::String("+251911234567".to_string()))
        );
    }

    #[test]
    fn splits_list_cells_on_semicolons() {
        let rows = RosterImporter::from_reader(Cursor::new(
            "Full Name,Skills,Languages\nSara,cooking; childcare ;,amharic;english\n",
        ))
        .expect("parse");

        let row = &rows[0];
        assert_eq!(
            row.get("skills"),
            Some(&serde_json::json!(["cooking", "childcare"]))
        );
        assert_eq!(
            row.get("languages"),
            Some(&serde_json::json!(["amharic", "english"]))
        );
    }

    #[test]
    fn ignores_unknown_columns_and_blank_rows() {
        let rows = RosterImporter::from_reader(Cursor::new(
            "Full Name,Internal Notes\nAmina,call back later\n,\n",
        ))
        .expect("parse");

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].get("fullName"),
            Some(&Value::String("Amina".to_string()))
        );
        assert_eq!(rows[0].get("Internal Notes"), None);
    }

    #[test]
    fn blank_cells_stay_absent() {
        let rows = RosterImporter::from_reader(Cursor::new(
            "Full Name,Email\nAmina,\nSara,sara@example.com\n",
        ))
        .expect("parse");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("email"), None);
        assert_eq!(
            rows[1].get("email"),
            Some(&Value::String("sara@example.com".to_string()))
        );
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error =
            RosterImporter::from_path("./does-not-exist.csv").expect_err("expected io error");

        match error {
            RosterImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
