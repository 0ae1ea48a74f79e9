//! Payload validation.
//!
//! Runs before a payload reaches the store. The store itself accepts any
//! payload; these checks belong to whoever decodes caller input.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::ContactPayload;

/// Longest accepted first or last name, in characters.
pub const MAX_NAME_CHARS: usize = 50;
/// Accepted phone length, separators included.
pub const PHONE_CHARS: std::ops::RangeInclusive<usize> = 7..=20;
/// Accepted number of digits in a phone number.
pub const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    EmptyName { field: &'static str },

    #[error("{field} too long: {len} characters (max: {max})")]
    NameTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("invalid email address: '{email}'")]
    InvalidEmail { email: String },

    #[error("invalid phone number: '{phone}'")]
    InvalidPhone { phone: String },

    #[error("date of birth {date} is in the future (today is {today})")]
    BirthInFuture { date: NaiveDate, today: NaiveDate },
}

impl ContactPayload {
    /// Check every field, reporting the first problem found.
    ///
    /// `today` bounds the date of birth; pass the same clock the service
    /// uses so tests stay deterministic.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        validate_name("first_name", &self.first_name)?;
        validate_name("last_name", &self.last_name)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        if self.date_of_birth > today {
            return Err(ValidationError::BirthInFuture {
                date: self.date_of_birth,
                today,
            });
        }
        Ok(())
    }
}

fn validate_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyName { field });
    }
    let len = value.chars().count();
    if len > MAX_NAME_CHARS {
        return Err(ValidationError::NameTooLong {
            field,
            len,
            max: MAX_NAME_CHARS,
        });
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidEmail {
        email: email.to_string(),
    };
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    // "example.com" passes, ".com", "example." and "example" do not
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidPhone {
        phone: phone.to_string(),
    };
    if !PHONE_CHARS.contains(&phone.chars().count()) {
        return Err(invalid());
    }
    let body = phone.strip_prefix('+').unwrap_or(phone);
    let mut digits = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' => {}
            _ => return Err(invalid()),
        }
    }
    if !PHONE_DIGITS.contains(&digits) {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn payload() -> ContactPayload {
        ContactPayload {
            first_name: "Buster".to_string(),
            last_name: "Johns".to_string(),
            email: "buster@meta.ua".to_string(),
            phone: "+35428421424".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 10, 8).unwrap(),
        }
    }

    #[test]
    fn test_valid_payload() {
        assert_eq!(payload().validate(today()), Ok(()));
    }

    #[test]
    fn test_blank_first_name() {
        let mut p = payload();
        p.first_name = "   ".to_string();
        assert_eq!(
            p.validate(today()),
            Err(ValidationError::EmptyName {
                field: "first_name"
            })
        );
    }

    #[test]
    fn test_last_name_too_long() {
        let mut p = payload();
        p.last_name = "x".repeat(51);
        assert!(matches!(
            p.validate(today()),
            Err(ValidationError::NameTooLong { len: 51, .. })
        ));
    }

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("a@x").is_err());
        assert!(validate_email("a@.com").is_err());
        assert!(validate_email("a@x.").is_err());
        assert!(validate_email("a@b@x.com").is_err());
        assert!(validate_email("a b@x.com").is_err());
    }

    #[test]
    fn test_phone_shapes() {
        assert!(validate_phone("+35428421424").is_ok());
        assert!(validate_phone("555-123-4567").is_ok());
        assert!(validate_phone("(050) 123 45 67").is_ok());
        assert!(validate_phone("555").is_err());
        assert!(validate_phone("555-CALL-NOW").is_err());
        assert!(validate_phone("++35428421424").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn test_birth_in_future() {
        let mut p = payload();
        p.date_of_birth = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        assert!(matches!(
            p.validate(today()),
            Err(ValidationError::BirthInFuture { .. })
        ));

        p.date_of_birth = today();
        assert_eq!(p.validate(today()), Ok(()));
    }
}
