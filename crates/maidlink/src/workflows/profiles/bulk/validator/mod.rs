//! Field-level validation for raw worker-profile rows.
//!
//! A row arrives as loosely typed key/value data (JSON body or a parsed
//! roster sheet). [`ProfileValidator::validate`] checks every field rule,
//! collects all violations rather than stopping at the first, and on
//! success produces a [`WorkerProfile`] with marketplace defaults applied.
//! Agency ownership is deliberately left unset here; the batch processor
//! stamps it from the authenticated request.

mod rules;

use chrono::NaiveDate;
use thiserror::Error;

use self::rules::RawField;
use super::domain::RawProfileRecord;
use crate::workflows::profiles::domain::{
    AvailabilityStatus, MaritalStatus, ProfileStatus, VerificationStatus, WorkerProfile,
};

pub const MIN_WORKER_AGE: i32 = 18;
pub const MAX_WORKER_AGE: i32 = 65;
pub const MAX_EXPERIENCE_YEARS: i64 = 50;
pub const MAX_CHILDREN_COUNT: i64 = 20;

const DEFAULT_NATIONALITY: &str = "ET";
const DEFAULT_CURRENCY: &str = "USD";

/// All field violations found in one row, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .field_errors.join(", "))]
pub struct ProfileValidationError {
    pub field_errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileValidator;

impl ProfileValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validates one raw row against every field rule, judging ages and
    /// expiry dates as of `today`.
    pub fn validate(
        &self,
        raw: &RawProfileRecord,
        today: NaiveDate,
    ) -> Result<WorkerProfile, ProfileValidationError> {
        let mut errors = Vec::new();

        let full_name = match rules::text_field(raw, "fullName") {
            RawField::Value(name) => Some(name),
            RawField::Missing | RawField::Invalid => {
                errors.push("Full name is required".to_string());
                None
            }
        };

        let date_of_birth = match rules::date_field(raw, "dateOfBirth") {
            RawField::Value(dob) => {
                if dob > rules::years_before(today, MIN_WORKER_AGE) {
                    errors.push(format!("Worker must be at least {MIN_WORKER_AGE} years old"));
                } else if dob < rules::years_before(today, MAX_WORKER_AGE) {
                    errors.push(format!("Worker must be at most {MAX_WORKER_AGE} years old"));
                }
                Some(dob)
            }
            RawField::Invalid => {
                errors.push("Date of birth must be a valid date".to_string());
                None
            }
            RawField::Missing => {
                errors.push("Date of birth is required".to_string());
                None
            }
        };

        let phone = match rules::text_or_number_field(raw, "phone") {
            RawField::Value(value) if rules::phone_pattern().is_match(&value) => Some(value),
            RawField::Value(_) | RawField::Invalid => {
                errors.push("Phone number format is invalid".to_string());
                None
            }
            RawField::Missing => None,
        };

        let email = match rules::text_field(raw, "email") {
            RawField::Value(value) if rules::email_pattern().is_match(&value) => Some(value),
            RawField::Value(_) | RawField::Invalid => {
                errors.push("Email format is invalid".to_string());
                None
            }
            RawField::Missing => None,
        };

        let skills = match rules::list_field(raw, "skills") {
            RawField::Value(items) if !items.is_empty() => items,
            RawField::Missing => Vec::new(),
            RawField::Value(_) => {
                errors.push("Skills must be a non-empty list".to_string());
                Vec::new()
            }
            RawField::Invalid => {
                errors.push("Skills must be a list of strings".to_string());
                Vec::new()
            }
        };

        let languages = match rules::list_field(raw, "languages") {
            RawField::Value(items) if !items.is_empty() => items,
            RawField::Missing => Vec::new(),
            RawField::Value(_) => {
                errors.push("Languages must be a non-empty list".to_string());
                Vec::new()
            }
            RawField::Invalid => {
                errors.push("Languages must be a list of strings".to_string());
                Vec::new()
            }
        };

        let marital_status = match rules::text_field(raw, "maritalStatus") {
            RawField::Value(value) => match MaritalStatus::parse(&value) {
                Some(status) => Some(status),
                None => {
                    errors.push(
                        "Marital status must be one of: single, married, divorced, widowed"
                            .to_string(),
                    );
                    None
                }
            },
            RawField::Invalid => {
                errors.push(
                    "Marital status must be one of: single, married, divorced, widowed".to_string(),
                );
                None
            }
            RawField::Missing => None,
        };

        let children_count = match rules::integer_field(raw, "childrenCount") {
            RawField::Value(value) if (0..=MAX_CHILDREN_COUNT).contains(&value) => value as u8,
            RawField::Missing => 0,
            RawField::Value(_) | RawField::Invalid => {
                errors.push(format!(
                    "Children count must be an integer between 0 and {MAX_CHILDREN_COUNT}"
                ));
                0
            }
        };

        let experience_years = match rules::integer_field(raw, "experienceYears") {
            RawField::Value(value) if (0..=MAX_EXPERIENCE_YEARS).contains(&value) => value as u8,
            RawField::Missing => 0,
            RawField::Value(_) | RawField::Invalid => {
                errors.push(format!(
                    "Experience years must be an integer between 0 and {MAX_EXPERIENCE_YEARS}"
                ));
                0
            }
        };

        let preferred_salary_min = match rules::integer_field(raw, "preferredSalaryMin") {
            RawField::Value(value) if u32::try_from(value).is_ok() => Some(value as u32),
            RawField::Missing => None,
            RawField::Value(_) | RawField::Invalid => {
                errors.push("Minimum salary must be a non-negative integer".to_string());
                None
            }
        };

        let preferred_salary_max = match rules::integer_field(raw, "preferredSalaryMax") {
            RawField::Value(value) if u32::try_from(value).is_ok() => Some(value as u32),
            RawField::Missing => None,
            RawField::Value(_) | RawField::Invalid => {
                errors.push("Maximum salary must be a non-negative integer".to_string());
                None
            }
        };

        if let (Some(min), Some(max)) = (preferred_salary_min, preferred_salary_max) {
            if max < min {
                errors.push("Maximum salary cannot be less than minimum salary".to_string());
            }
        }

        let passport_expiry = match rules::date_field(raw, "passportExpiry") {
            RawField::Value(date) => {
                if date < today {
                    errors.push("Passport expiry cannot be in the past".to_string());
                }
                Some(date)
            }
            RawField::Invalid => {
                errors.push("Passport expiry must be a valid date".to_string());
                None
            }
            RawField::Missing => None,
        };

        let available_from = match rules::date_field(raw, "availableFrom") {
            RawField::Value(date) => Some(date),
            RawField::Invalid => {
                errors.push("Available from must be a valid date".to_string());
                None
            }
            RawField::Missing => None,
        };

        let availability_status = match rules::text_field(raw, "availabilityStatus") {
            RawField::Value(value) => match AvailabilityStatus::parse(&value) {
                Some(status) => Some(status),
                None => {
                    errors.push(
                        "Availability status must be one of: available, busy, hired, inactive"
                            .to_string(),
                    );
                    None
                }
            },
            RawField::Invalid => {
                errors.push(
                    "Availability status must be one of: available, busy, hired, inactive"
                        .to_string(),
                );
                None
            }
            RawField::Missing => None,
        };

        let verification_status = match rules::text_field(raw, "verificationStatus") {
            RawField::Value(value) => match VerificationStatus::parse(&value) {
                Some(status) => Some(status),
                None => {
                    errors.push(
                        "Verification status must be one of: pending, verified, rejected"
                            .to_string(),
                    );
                    None
                }
            },
            RawField::Invalid => {
                errors.push(
                    "Verification status must be one of: pending, verified, rejected".to_string(),
                );
                None
            }
            RawField::Missing => None,
        };

        let nationality = match rules::text_field(raw, "nationality") {
            RawField::Value(value) => value,
            RawField::Missing | RawField::Invalid => DEFAULT_NATIONALITY.to_string(),
        };

        let preferred_currency = match rules::text_field(raw, "preferredCurrency") {
            RawField::Value(value) => value,
            RawField::Missing | RawField::Invalid => DEFAULT_CURRENCY.to_string(),
        };

        let live_in_preference = match rules::bool_field(raw, "liveInPreference") {
            RawField::Value(value) => value,
            RawField::Missing | RawField::Invalid => true,
        };

        match (full_name, date_of_birth) {
            (Some(full_name), Some(date_of_birth)) if errors.is_empty() => Ok(WorkerProfile {
                full_name,
                date_of_birth,
                nationality,
                phone,
                email,
                skills,
                languages,
                marital_status,
                children_count,
                experience_years,
                preferred_salary_min,
                preferred_salary_max,
                preferred_currency,
                passport_expiry,
                available_from,
                availability_status: availability_status.unwrap_or(AvailabilityStatus::Available),
                verification_status: verification_status.unwrap_or(VerificationStatus::Pending),
                live_in_preference,
                rating: 0.0,
                view_count: 0,
                application_count: 0,
                identity_verified: false,
                medical_clearance: false,
                police_clearance: false,
                status: ProfileStatus::Draft,
                agency_id: None,
                agency_approved: false,
            }),
            _ => Err(ProfileValidationError {
                field_errors: errors,
            }),
        }
    }
}

#[cfg(test)]
pub(crate) use self::rules::parse_date_for_tests;
