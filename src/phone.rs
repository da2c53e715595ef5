/* src/phone.rs */

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Country code assumed for numbers written in national form.
pub const DEFAULT_COUNTRY_CODE: &str = "880";

const MAX_DIGITS: usize = 15;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-.()]").expect("static regex"));
static DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+|00)?([0-9]{10,15})$").expect("static regex"));
static COUNTRY_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]{0,2}$").expect("static regex"));

/// Customer phone number in international form, stored as bare digits.
///
/// Local and international spellings of one subscriber produce the same
/// value, so it can key per-phone limits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parses with [`DEFAULT_COUNTRY_CODE`] for national numbers.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::parse_with_country(raw, DEFAULT_COUNTRY_CODE)
    }

    /// Accepts 10 to 15 digits, optionally after a `+` or `00` prefix.
    /// Spaces, dashes, dots and parentheses are ignored.
    ///
    /// Prefixed numbers are taken as international. Otherwise a leading
    /// trunk `0` is dropped and `country_code` is prepended, unless the
    /// digits already start with it.
    pub fn parse_with_country(raw: &str, country_code: &str) -> Result<Self> {
        let invalid = || Error::InvalidPhone(raw.trim().to_string());

        if !is_valid_country_code(country_code) {
            return Err(Error::Config(format!("Invalid country code: {}", country_code)));
        }

        let compact = SEPARATORS.replace_all(raw.trim(), "");
        let caps = DIGITS.captures(&compact).ok_or_else(invalid)?;
        let international = caps.get(1).is_some();
        let digits = caps.get(2).map(|m| m.as_str()).ok_or_else(invalid)?;

        let canonical = if international || digits.starts_with(country_code) {
            digits.to_string()
        } else if let Some(national) = digits.strip_prefix('0') {
            format!("{}{}", country_code, national)
        } else {
            format!("{}{}", country_code, digits)
        };

        if canonical.len() > MAX_DIGITS {
            return Err(invalid());
        }

        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn is_valid_country_code(code: &str) -> bool {
    COUNTRY_CODE.is_match(code)
}

impl FromStr for PhoneNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_separators_and_prefixes() {
        assert_eq!(PhoneNumber::parse("+880 1711-000000").unwrap().as_str(), "8801711000000");
        assert_eq!(PhoneNumber::parse("00880.1711.000000").unwrap().as_str(), "8801711000000");
        assert_eq!(PhoneNumber::parse("(017) 1100 0000").unwrap().as_str(), "8801711000000");
    }

    #[test]
    fn test_spellings_of_one_subscriber_agree() {
        let spellings = [
            "+8801711000000",
            "01711000000",
            "+880 1711 000000",
            "01711-000000",
            "8801711000000",
            "1711000000",
        ];
        for raw in spellings {
            assert_eq!(
                PhoneNumber::parse(raw).unwrap().as_str(),
                "8801711000000",
                "{} should normalize to the international form",
                raw
            );
        }
    }

    #[test]
    fn test_other_country_code() {
        let phone = PhoneNumber::parse_with_country("0300 1234567", "92").unwrap();
        assert_eq!(phone.as_str(), "923001234567");

        // An explicit prefix wins over the configured country.
        let phone = PhoneNumber::parse_with_country("+8801711000000", "92").unwrap();
        assert_eq!(phone.as_str(), "8801711000000");

        let err = PhoneNumber::parse_with_country("01711000000", "+880").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        for raw in [
            "",
            "12345",
            "+1234567890123456",
            "01711-00000a",
            "++8801711000000",
            // National form that grows past 15 digits with the country code.
            "012345678901234",
        ] {
            let err = PhoneNumber::parse(raw).unwrap_err();
            assert!(matches!(err, Error::InvalidPhone(_)), "{} should be rejected", raw);
        }
    }

    #[test]
    fn test_displays_with_plus() {
        let phone: PhoneNumber = "8801711000000".parse().unwrap();
        assert_eq!(phone.to_string(), "+8801711000000");
    }
}
