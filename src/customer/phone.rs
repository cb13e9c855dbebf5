use crate::customer::error::AuthError;
use regex::Regex;
use std::fmt;

pub const NATIONAL_NUMBER_DIGITS: usize = 10;

pub const DEFAULT_COUNTRY_CODE: &str = "+91";

/// Strip every character that is not an ASCII digit.
#[must_use]
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

pub fn valid_national_number(digits: &str) -> bool {
    Regex::new(r"^\d{10}$").is_ok_and(|re| re.is_match(digits))
}

pub fn valid_country_code(code: &str) -> bool {
    Regex::new(r"^\+\d{1,3}$").is_ok_and(|re| re.is_match(code))
}

/// A validated mobile number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    digits: String,
    e164: String,
}

impl PhoneNumber {
    /// Normalize `input` and prefix it with `country_code`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] unless exactly 10 digits remain after
    /// stripping separators.
    pub fn parse(input: &str, country_code: &str) -> Result<Self, AuthError> {
        let digits = digits_only(input);

        if !valid_national_number(&digits) {
            return Err(AuthError::Validation(format!(
                "Mobile number must be exactly {NATIONAL_NUMBER_DIGITS} digits"
            )));
        }

        let e164 = format!("{country_code}{digits}");

        Ok(Self { digits, e164 })
    }

    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Country code plus national number, also the identity provider username.
    #[must_use]
    pub fn e164(&self) -> &str {
        &self.e164
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.e164)
    }
}
