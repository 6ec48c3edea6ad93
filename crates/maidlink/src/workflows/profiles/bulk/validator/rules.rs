use chrono::{DateTime, Datelike, NaiveDate};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use super::super::domain::RawProfileRecord;

/// Three-way reading of one raw field: absent, present-but-unusable, or a
/// coerced value. Blank strings and JSON nulls count as absent.
pub(crate) enum RawField<T> {
    Missing,
    Invalid,
    Value(T),
}

pub(crate) fn text_field(raw: &RawProfileRecord, field: &str) -> RawField<String> {
    match raw.get(field) {
        None | Some(Value::Null) => RawField::Missing,
        Some(Value::String(value)) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                RawField::Missing
            } else {
                RawField::Value(trimmed.to_string())
            }
        }
        Some(_) => RawField::Invalid,
    }
}

/// Like [`text_field`] but accepts bare numbers, which spreadsheets love to
/// produce for phone columns.
pub(crate) fn text_or_number_field(raw: &RawProfileRecord, field: &str) -> RawField<String> {
    if let Some(Value::Number(number)) = raw.get(field) {
        return RawField::Value(number.to_string());
    }
    text_field(raw, field)
}

pub(crate) fn integer_field(raw: &RawProfileRecord, field: &str) -> RawField<i64> {
    match raw.get(field) {
        None | Some(Value::Null) => RawField::Missing,
        Some(Value::Number(number)) => match number.as_i64() {
            Some(value) => RawField::Value(value),
            None => match number.as_f64() {
                Some(value) if value.fract() == 0.0 => RawField::Value(value as i64),
                _ => RawField::Invalid,
            },
        },
        Some(Value::String(value)) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                RawField::Missing
            } else {
                match trimmed.parse::<i64>() {
                    Ok(value) => RawField::Value(value),
                    Err(_) => RawField::Invalid,
                }
            }
        }
        Some(_) => RawField::Invalid,
    }
}

pub(crate) fn date_field(raw: &RawProfileRecord, field: &str) -> RawField<NaiveDate> {
    match text_field(raw, field) {
        RawField::Missing => RawField::Missing,
        RawField::Invalid => RawField::Invalid,
        RawField::Value(value) => match parse_date(&value) {
            Some(date) => RawField::Value(date),
            None => RawField::Invalid,
        },
    }
}

pub(crate) fn list_field(raw: &RawProfileRecord, field: &str) -> RawField<Vec<String>> {
    match raw.get(field) {
        None | Some(Value::Null) => RawField::Missing,
        Some(Value::Array(items)) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(value) => {
                        let trimmed = value.trim();
                        if !trimmed.is_empty() {
                            values.push(trimmed.to_string());
                        }
                    }
                    _ => return RawField::Invalid,
                }
            }
            RawField::Value(values)
        }
        Some(_) => RawField::Invalid,
    }
}

pub(crate) fn bool_field(raw: &RawProfileRecord, field: &str) -> RawField<bool> {
    match raw.get(field) {
        None | Some(Value::Null) => RawField::Missing,
        Some(Value::Bool(value)) => RawField::Value(*value),
        Some(Value::String(value)) => match value.trim().to_ascii_lowercase().as_str() {
            "true" => RawField::Value(true),
            "false" => RawField::Value(false),
            "" => RawField::Missing,
            _ => RawField::Invalid,
        },
        Some(_) => RawField::Invalid,
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    None
}

/// The calendar date `years` before `date`, with Feb 29 anniversaries
/// clamped to Feb 28.
pub(crate) fn years_before(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() - years;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date)
}

static PHONE_PATTERN: OnceLock<Regex> = OnceLock::new();
static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Permissive international phone shape: digits with an optional leading
/// `+`, allowing spaces, hyphens, and parentheses.
pub(crate) fn phone_pattern() -> &'static Regex {
    PHONE_PATTERN
        .get_or_init(|| Regex::new(r"^\+?[0-9\s\-()]{7,20}$").expect("hardcoded pattern compiles"))
}

/// Loose `local@domain.tld` shape.
pub(crate) fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hardcoded pattern compiles")
    })
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}
