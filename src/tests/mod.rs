//! Test suite for the identifier codecs
//!
//! Split into themed files:
//! - `radix_tests` - positional converter behavior
//! - `pesel_tests` - national identifier encoding and parsing
//! - `idnum_tests` - hyphenated identifier encoding, parsing and import
//! - `roundtrip_tests` - cross-codec round-trip properties

mod idnum_tests;
