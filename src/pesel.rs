//! PESEL national identifier codec
//!
//! Encodes a date of birth and a sequential number into the fixed
//! `YYMMDDSSSSC` layout of 11 decimal digits and parses such strings back,
//! verifying the weighted check digit.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::sex::Sex;

/// Weights applied to the ten payload digits when computing the check digit
const CHECKSUM_WEIGHTS: [u32; 10] = [1, 3, 7, 9, 1, 3, 7, 9, 1, 3];

/// Offset added to the month field, keyed by `year / 100 - 18`
const MONTH_OFFSETS: [u32; 5] = [80, 0, 20, 40, 60];

/// Century selected by `month_field / 20` when parsing; ordered by month
/// offset, so the 1800s (offset 80) come last
const CENTURIES: [i32; 5] = [19, 20, 21, 22, 18];

/// Largest sequential number that fits the four-digit field
const MAX_SEQUENTIAL: u16 = 9999;

/// Earliest encodable date of birth
static MIN_DATE: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(1800, 1, 1).expect("valid calendar date"));

/// Latest encodable date of birth
static MAX_DATE: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2299, 12, 31).expect("valid calendar date"));

/// An immutable PESEL value
///
/// Construct with [`Pesel::from_parts`] or parse an existing string with
/// [`Pesel::parse`]; every field is fixed once the value exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pesel {
    date_of_birth: NaiveDate,
    sequential_number: u16,
    sex: Sex,
    checksum: u8,
    canonical: String,
}

impl Pesel {
    /// Encode a date of birth and sequential number into a PESEL value
    ///
    /// # Arguments
    /// * `date_of_birth` - Date between 1800-01-01 and 2299-12-31
    /// * `sequential_number` - Number between 0 and 9999
    ///
    /// # Returns
    /// * `Result<Pesel, Error>` - New value, or `InvalidData` if either input
    ///   is outside its range
    pub fn from_parts(date_of_birth: NaiveDate, sequential_number: u16) -> Result<Self> {
        if date_of_birth < *MIN_DATE || date_of_birth > *MAX_DATE {
            return Err(Error::InvalidData(format!(
                "date of birth {date_of_birth} is outside {}..={}",
                *MIN_DATE, *MAX_DATE
            )));
        }
        if sequential_number > MAX_SEQUENTIAL {
            return Err(Error::InvalidData(format!(
                "sequential number {sequential_number} exceeds {MAX_SEQUENTIAL}"
            )));
        }

        let year = date_of_birth.year();
        let month_field = MONTH_OFFSETS[(year / 100 - 18) as usize] + date_of_birth.month();
        let payload = format!(
            "{:02}{:02}{:02}{:04}",
            year % 100,
            month_field,
            date_of_birth.day(),
            sequential_number
        );
        let checksum = check_digit(&payload);

        Ok(Self {
            date_of_birth,
            sequential_number,
            sex: if sequential_number % 2 == 0 {
                Sex::Female
            } else {
                Sex::Male
            },
            checksum,
            canonical: format!("{payload}{checksum}"),
        })
    }

    /// Parse a canonical 11-digit PESEL string
    ///
    /// The check digit is verified before the embedded date is examined, so a
    /// mistyped string reports `InvalidChecksum` rather than a date error.
    ///
    /// # Returns
    /// * `Result<Pesel, Error>` - Parsed value, `InvalidFormat` if the string
    ///   is not 11 decimal digits or encodes an impossible calendar date, or
    ///   `InvalidChecksum` if the check digit disagrees with the payload
    pub fn parse(input: &str) -> Result<Self> {
        if input.len() != 11 || !input.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(Error::InvalidFormat(format!(
                "'{input}' is not a string of 11 decimal digits"
            )));
        }
        let digit = |index: usize| u32::from(input.as_bytes()[index] - b'0');

        let expected = check_digit(&input[..10]);
        let found = digit(10) as u8;
        if found != expected {
            return Err(Error::InvalidChecksum {
                expected: (b'0' + expected) as char,
                found: (b'0' + found) as char,
            });
        }

        let month_field = digit(2) * 10 + digit(3);
        let year = CENTURIES[(month_field / 20) as usize] * 100 + (digit(0) * 10 + digit(1)) as i32;
        let month = month_field % 20;
        let day = digit(4) * 10 + digit(5);
        let date_of_birth = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            Error::InvalidFormat(format!("'{input}' does not encode a real calendar date"))
        })?;

        Ok(Self {
            date_of_birth,
            sequential_number: (digit(6) * 1000 + digit(7) * 100 + digit(8) * 10 + digit(9)) as u16,
            sex: if digit(9) % 2 == 0 {
                Sex::Female
            } else {
                Sex::Male
            },
            checksum: expected,
            canonical: input.to_owned(),
        })
    }

    /// Date of birth encoded in this value
    #[inline(always)]
    pub const fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    /// Sequential number encoded in this value
    #[inline(always)]
    pub const fn sequential_number(&self) -> u16 {
        self.sequential_number
    }

    /// Sex derived from the sequential number's parity
    #[inline(always)]
    pub const fn sex(&self) -> Sex {
        self.sex
    }

    /// Check digit of the canonical string
    #[inline(always)]
    pub const fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Canonical 11-digit string
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for Pesel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for Pesel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Weighted check digit over the ten payload digits
///
/// Callers guarantee `payload` holds exactly 10 ASCII decimal digits.
fn check_digit(payload: &str) -> u8 {
    let sum: u32 = payload
        .bytes()
        .zip(CHECKSUM_WEIGHTS)
        .map(|(digit, weight)| u32::from(digit - b'0') * weight)
        .sum();
    match sum % 10 {
        0 => 0,
        rest => (10 - rest) as u8,
    }
}
