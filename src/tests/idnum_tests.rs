//! Hyphenated identifier encoding, parsing and import tests

#[cfg(test)]
mod tests {
    use crate::tests::test_utils::ymd;
    use crate::{Error, IdNumber, Pesel, Sex};

    #[test]
    fn test_epoch_vector() {
        let id = IdNumber::from_parts(ymd(1800, 1, 1), 0).unwrap();
        assert_eq!(id.as_str(), "0000-000");
        assert_eq!(id.sex(), Sex::Female);

        let parsed = IdNumber::parse("0000-000").unwrap();
        assert_eq!(parsed.date_of_birth(), ymd(1800, 1, 1));
        assert_eq!(parsed.sequential_number(), 0);
    }

    #[test]
    fn test_known_vector() {
        let id = IdNumber::from_parts(ymd(1999, 9, 9), 1234).unwrap();
        assert_eq!(id.as_str(), "1k9y-yaa");
        assert_eq!(id.checksum(), 'a');

        let parsed = IdNumber::parse("1k9y-yaa").unwrap();
        assert_eq!(parsed.date_of_birth(), ymd(1999, 9, 9));
        assert_eq!(parsed.sequential_number(), 1234);
    }

    #[test]
    fn test_last_encodable_date() {
        // "zzzz" is the largest four-character day offset
        let id = IdNumber::from_parts(ymd(6398, 8, 19), 0).unwrap();
        assert_eq!(id.as_str(), "zzzz-00k");

        let parsed = IdNumber::parse("zzzz-00k").unwrap();
        assert_eq!(parsed.date_of_birth(), ymd(6398, 8, 19));
    }

    #[test]
    fn test_altered_check_character_is_detected() {
        let err = IdNumber::parse("1k9y-yab").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidChecksum {
                expected: 'a',
                found: 'b',
            }
        );
    }

    #[test]
    fn test_altered_payload_character_is_detected() {
        // sequential field changed from "ya" to "yb" without fixing the
        // check character
        assert!(matches!(
            IdNumber::parse("1k9y-yba"),
            Err(Error::InvalidChecksum { .. })
        ));
    }

    #[test]
    fn test_malformed_strings_are_rejected() {
        for input in [
            "",
            "1k9yyaa",   // hyphen missing
            "1k9y-ya",   // too short
            "1k9y-yaaa", // too long
            "1K9Y-YAA",  // uppercase is outside the alphabet
            "1k9!-yaa",  // foreign symbol
            "1k9-yyaa",  // hyphen in the wrong column
        ] {
            assert!(
                matches!(IdNumber::parse(input), Err(Error::InvalidFormat(_))),
                "'{input}' should be rejected as malformed"
            );
        }
    }

    #[test]
    fn test_sequential_number_above_domain_is_rejected() {
        assert!(matches!(
            IdNumber::from_parts(ymd(1990, 1, 1), 46656),
            Err(Error::InvalidData(_))
        ));
        assert!(IdNumber::from_parts(ymd(1990, 1, 1), 46655).is_ok());
    }

    #[test]
    fn test_wide_sequential_field_is_not_parseable() {
        // 1296 needs three base-36 digits, widening the canonical string to
        // 9 characters; encoding succeeds but the strict 8-character parse
        // rejects the result
        let id = IdNumber::from_parts(ymd(1800, 1, 1), 1296).unwrap();
        assert_eq!(id.as_str(), "0000-100z");
        assert_eq!(id.as_str().len(), 9);
        assert!(matches!(
            IdNumber::parse(id.as_str()),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_import_from_pesel() {
        let pesel = Pesel::from_parts(ymd(1999, 9, 9), 1234).unwrap();
        let id = IdNumber::from_pesel(&pesel);
        assert_eq!(id.as_str(), "1k9y-yaa");

        let parsed = IdNumber::parse(id.as_str()).unwrap();
        assert_eq!(parsed.date_of_birth(), pesel.date_of_birth());
        assert_eq!(
            parsed.sequential_number(),
            u32::from(pesel.sequential_number())
        );
    }

    #[test]
    fn test_import_accepts_the_full_pesel_domain() {
        // every PESEL-encodable pair converts, including sequential numbers
        // too wide for the two-character field
        let pesel = Pesel::from_parts(ymd(2299, 12, 31), 9999).unwrap();
        let id = IdNumber::from_pesel(&pesel);
        assert_eq!(id.date_of_birth(), pesel.date_of_birth());
        assert_eq!(id.sequential_number(), 9999);
        assert_eq!(id.as_str().len(), 9);
    }

    #[test]
    fn test_sex_follows_the_tens_digit() {
        let base = ymd(1990, 1, 1);
        assert_eq!(IdNumber::from_parts(base, 5).unwrap().sex(), Sex::Female);
        assert_eq!(IdNumber::from_parts(base, 15).unwrap().sex(), Sex::Male);
        assert_eq!(IdNumber::from_parts(base, 1234).unwrap().sex(), Sex::Male);
        assert_eq!(IdNumber::from_parts(base, 205).unwrap().sex(), Sex::Female);
    }
}
