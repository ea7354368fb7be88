//! Hyphenated base-36 identifier codec
//!
//! Encodes a date of birth (as days since 1800-01-01) and a sequential
//! number into the `DDDD-SSC` layout over the `0-9a-z` alphabet, closed by a
//! weighted base-36 check character. Values can also be derived from a
//! parsed [`Pesel`], whose domain is a strict subset of this one.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::pesel::Pesel;
use crate::radix::RadixConverter;
use crate::sex::Sex;

/// Digit symbols of the base-36 numeral system
const BASE36_ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// Shared converter used for every base-36 field of the identifier
static BASE36: Lazy<RadixConverter> =
    Lazy::new(|| RadixConverter::new(BASE36_ALPHABET).expect("base-36 alphabet is well-formed"));

/// Day zero of the date field
static EPOCH: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(1800, 1, 1).expect("valid calendar date"));

/// Number of dates representable in the four-character day field
const DAY_FIELD_CAPACITY: u64 = 36u64.pow(4);

/// Largest accepted sequential number (three base-36 digits)
const MAX_SEQUENTIAL: u32 = 36u32.pow(3) - 1;

/// Positional weights for the check character; the hyphen at index 4 weighs
/// 0, and the eighth entry covers a three-character sequential field
const CHECKSUM_WEIGHTS: [u64; 8] = [1, 3, 7, 9, 0, 1, 3, 7];

/// An immutable hyphenated identifier value
///
/// Construct with [`IdNumber::from_parts`], parse an existing string with
/// [`IdNumber::parse`], or derive one from a PESEL with
/// [`IdNumber::from_pesel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdNumber {
    date_of_birth: NaiveDate,
    sequential_number: u32,
    sex: Sex,
    checksum: char,
    canonical: String,
}

impl IdNumber {
    /// Encode a date of birth and sequential number into an identifier
    ///
    /// Sequential numbers above `36² - 1 = 1295` are accepted but widen the
    /// sequential field to three characters; the resulting canonical string
    /// is 9 characters long and [`IdNumber::parse`] will not accept it.
    ///
    /// # Arguments
    /// * `date_of_birth` - Date between 1800-01-01 and 6398-08-19
    /// * `sequential_number` - Number between 0 and 46655
    ///
    /// # Returns
    /// * `Result<IdNumber, Error>` - New value, or `InvalidData` if either
    ///   input is outside its range
    pub fn from_parts(date_of_birth: NaiveDate, sequential_number: u32) -> Result<Self> {
        if sequential_number > MAX_SEQUENTIAL {
            return Err(Error::InvalidData(format!(
                "sequential number {sequential_number} exceeds {MAX_SEQUENTIAL}"
            )));
        }
        let offset_days = (date_of_birth - *EPOCH).num_days();
        if offset_days < 0 || offset_days as u64 >= DAY_FIELD_CAPACITY {
            return Err(Error::InvalidData(format!(
                "date of birth {date_of_birth} is outside the four-character day field"
            )));
        }

        Ok(Self::assemble(
            date_of_birth,
            offset_days as u64,
            sequential_number,
        ))
    }

    /// Parse a canonical `DDDD-SSC` string
    ///
    /// The recovered date and sequential number are re-encoded and the
    /// result compared against the input, so a corrupted check character
    /// reports `InvalidChecksum` and any other divergence `InvalidFormat`.
    ///
    /// # Returns
    /// * `Result<IdNumber, Error>` - Parsed value, `InvalidFormat` if the
    ///   string does not match the 8-character layout or fails the re-encode
    ///   comparison, or `InvalidChecksum` if only the check character differs
    pub fn parse(input: &str) -> Result<Self> {
        let bytes = input.as_bytes();
        let well_formed = bytes.len() == 8
            && bytes[4] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(index, &byte)| index == 4 || byte.is_ascii_digit() || byte.is_ascii_lowercase());
        if !well_formed {
            return Err(Error::InvalidFormat(format!(
                "'{input}' does not match the DDDD-SSC layout"
            )));
        }

        let offset_days = BASE36.decode(&input[..4])?;
        let sequential_number = BASE36.decode(&input[5..7])? as u32;
        let date_of_birth = EPOCH
            .checked_add_days(Days::new(offset_days))
            .ok_or_else(|| {
                Error::InvalidFormat(format!("'{input}' encodes a date beyond the calendar"))
            })?;

        let derived = Self::assemble(date_of_birth, offset_days, sequential_number);
        let found = bytes[7] as char;
        if derived.checksum != found {
            return Err(Error::InvalidChecksum {
                expected: derived.checksum,
                found,
            });
        }
        if derived.canonical != input {
            return Err(Error::InvalidFormat(format!(
                "'{input}' does not round-trip to its canonical form"
            )));
        }

        Ok(derived)
    }

    /// Derive an identifier from a parsed PESEL value
    ///
    /// The date of birth and sequential number carry over unchanged; the
    /// PESEL domain is a strict subset of this codec's, so no validation can
    /// fail.
    pub fn from_pesel(pesel: &Pesel) -> Self {
        let offset_days = (pesel.date_of_birth() - *EPOCH).num_days() as u64;
        Self::assemble(
            pesel.date_of_birth(),
            offset_days,
            u32::from(pesel.sequential_number()),
        )
    }

    /// Build the value from range-checked inputs
    fn assemble(date_of_birth: NaiveDate, offset_days: u64, sequential_number: u32) -> Self {
        // '0' is the zero symbol of the alphabet, so text padding matches
        // numeral padding
        let payload = format!(
            "{:0>4}-{:0>2}",
            BASE36.encode(offset_days),
            BASE36.encode(u64::from(sequential_number))
        );
        let checksum = check_char(&payload);

        Self {
            date_of_birth,
            sequential_number,
            sex: if (sequential_number % 100) / 10 % 2 == 0 {
                Sex::Female
            } else {
                Sex::Male
            },
            checksum,
            canonical: format!("{payload}{checksum}"),
        }
    }

    /// Date of birth encoded in this value
    #[inline(always)]
    pub const fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    /// Sequential number encoded in this value
    #[inline(always)]
    pub const fn sequential_number(&self) -> u32 {
        self.sequential_number
    }

    /// Sex derived from the tens digit of the sequential number
    #[inline(always)]
    pub const fn sex(&self) -> Sex {
        self.sex
    }

    /// Check character of the canonical string
    #[inline(always)]
    pub const fn checksum(&self) -> char {
        self.checksum
    }

    /// Canonical hyphenated string
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for IdNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for IdNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Weighted base-36 check character over the assembled payload
///
/// Callers guarantee `payload` holds base-36 symbols and the hyphen.
fn check_char(payload: &str) -> char {
    let sum: u64 = payload
        .chars()
        .zip(CHECKSUM_WEIGHTS)
        .filter(|&(symbol, _)| symbol != '-')
        .map(|(symbol, weight)| {
            BASE36
                .digit_value(symbol)
                .expect("payload symbols come from the base-36 alphabet")
                * weight
        })
        .sum();
    let check = (36 - sum % 36) % 36;
    BASE36_ALPHABET.as_bytes()[check as usize] as char
}
