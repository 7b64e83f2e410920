// ✅ Validators - Admission rules for identifiers, addresses and dates
// Pure predicates over raw strings. Each `validate_*` has a `check_*` twin
// that reports the first rule the input broke.

use crate::calendar;
use crate::rejection::Rejection;
use chrono::NaiveDate;

// ============================================================================
// CONSTANTS
// ============================================================================

pub const IDENTIFIER_LENGTH: usize = 10;
pub const MIN_SPECIAL_CHARACTERS: usize = 2;

pub const ADDRESS_SEPARATOR: char = '|';
pub const ADDRESS_SEGMENTS: usize = 5;
pub const REQUIRED_STATE: &str = "Victoria";
pub const REQUIRED_COUNTRY: &str = "Australia";

// ============================================================================
// IDENTIFIER
// ============================================================================

/// Identifier rules, all of which must hold:
/// - exactly 10 characters
/// - characters 0 and 1 are decimal digits
/// - at least 2 characters anywhere are neither letters nor digits
/// - characters 8 and 9 are uppercase A-Z
pub fn check_identifier(id: &str) -> Result<(), Rejection> {
    let chars: Vec<char> = id.chars().collect();

    if chars.len() != IDENTIFIER_LENGTH {
        return Err(Rejection::IdentifierLength(chars.len()));
    }

    if !(chars[0].is_ascii_digit() && chars[1].is_ascii_digit()) {
        return Err(Rejection::IdentifierPrefix);
    }

    let special = chars.iter().filter(|c| is_special(**c)).count();
    if special < MIN_SPECIAL_CHARACTERS {
        return Err(Rejection::IdentifierSpecialCharacters(special));
    }

    if !(chars[8].is_ascii_uppercase() && chars[9].is_ascii_uppercase()) {
        return Err(Rejection::IdentifierSuffix);
    }

    Ok(())
}

/// Neither a letter nor a decimal digit 0-9. Numerics such as '²' that are
/// not decimal digits count as special.
fn is_special(c: char) -> bool {
    !(c.is_alphabetic() || c.is_ascii_digit())
}

pub fn validate_identifier(id: &str) -> bool {
    check_identifier(id).is_ok()
}

/// True when the first character is one of 1, 3, 5, 7, 9
pub fn starts_with_odd_digit(id: &str) -> bool {
    id.chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .map_or(false, |d| d % 2 == 1)
}

// ============================================================================
// ADDRESS
// ============================================================================

/// "street number|street|city|state|country"
///
/// The street number is free text; only the segment count, non-emptiness,
/// state and country are enforced.
pub fn check_address(address: &str) -> Result<(), Rejection> {
    let segments: Vec<&str> = address.split(ADDRESS_SEPARATOR).collect();

    if segments.len() != ADDRESS_SEGMENTS {
        return Err(Rejection::AddressSegmentCount(segments.len()));
    }

    if let Some(index) = segments.iter().position(|s| s.is_empty()) {
        return Err(Rejection::AddressEmptySegment(index));
    }

    if segments[3] != REQUIRED_STATE {
        return Err(Rejection::AddressState(segments[3].to_string()));
    }

    if segments[4] != REQUIRED_COUNTRY {
        return Err(Rejection::AddressCountry(segments[4].to_string()));
    }

    Ok(())
}

pub fn validate_address(address: &str) -> bool {
    check_address(address).is_ok()
}

// ============================================================================
// DATE
// ============================================================================

/// Parse a "dd-MM-yyyy" date or say why it is not one
pub fn check_date(text: &str) -> Result<NaiveDate, Rejection> {
    calendar::parse_date(text).ok_or_else(|| Rejection::DateFormat(text.to_string()))
}

pub fn validate_date(text: &str) -> bool {
    check_date(text).is_ok()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_valid() {
        assert!(validate_identifier("25%_d&ABXY"));
        assert!(validate_identifier("56_ada&fAB"));
        assert!(validate_identifier("35#%ABXYZY"));
    }

    #[test]
    fn test_identifier_wrong_length() {
        for id in ["", "29!_%ABCD", "25%_d&ABXYZ", "2", "25%_d&ABXYZZZZZ"] {
            assert_eq!(
                check_identifier(id),
                Err(Rejection::IdentifierLength(id.chars().count())),
                "{id}"
            );
        }
    }

    #[test]
    fn test_identifier_lowercase_suffix() {
        assert!(!validate_identifier("29%_d&Abc9"));
        assert_eq!(check_identifier("29%_d&Abc9"), Err(Rejection::IdentifierSuffix));
    }

    #[test]
    fn test_identifier_needs_two_digit_prefix() {
        assert_eq!(check_identifier("2a%_d&ABXY"), Err(Rejection::IdentifierPrefix));
        assert_eq!(check_identifier("%5%_d&ABXY"), Err(Rejection::IdentifierPrefix));
    }

    #[test]
    fn test_identifier_special_characters_counted_everywhere() {
        assert_eq!(
            check_identifier("25a_dbcdXY"),
            Err(Rejection::IdentifierSpecialCharacters(1))
        );
        // Specials may sit anywhere between the fixed positions
        assert!(validate_identifier("12abcd!?XY"));
        // Positions 0-1 and 8-9 are fixed, so specials there make the id invalid anyway
        assert_eq!(check_identifier("12abcdef!?"), Err(Rejection::IdentifierSuffix));
    }

    #[test]
    fn test_identifier_other_numerics_are_special() {
        // Superscripts are numeric but not decimal digits
        assert!(validate_identifier("25²³d&ABXY"));
        assert_eq!(
            check_identifier("25²bcdefXY"),
            Err(Rejection::IdentifierSpecialCharacters(1))
        );
    }

    #[test]
    fn test_identifier_multibyte_counts_characters() {
        // 10 characters, 11+ bytes
        assert!(validate_identifier("25é%_&abXY"));
    }

    #[test]
    fn test_odd_first_digit() {
        assert!(starts_with_odd_digit("35%_&ABXYZ"));
        assert!(starts_with_odd_digit("9"));
        assert!(!starts_with_odd_digit("24%_!ABCDY"));
        assert!(!starts_with_odd_digit("0"));
        assert!(!starts_with_odd_digit("a1"));
        assert!(!starts_with_odd_digit(""));
    }

    #[test]
    fn test_address_valid() {
        assert!(validate_address("32|Highland Street|Melbourne|Victoria|Australia"));
        // Street number is free text
        assert!(validate_address("Unit 4B|Highland Street|Melbourne|Victoria|Australia"));
    }

    #[test]
    fn test_address_wrong_state_or_country() {
        assert_eq!(
            check_address("32|Highland Street|Melbourne|NewSouthWales|Australia"),
            Err(Rejection::AddressState("NewSouthWales".to_string()))
        );
        assert_eq!(
            check_address("32|Highland Street|Melbourne|Victoria|New Zealand"),
            Err(Rejection::AddressCountry("New Zealand".to_string()))
        );
        assert!(!validate_address("32|Highland Street|Melbourne|victoria|Australia"));
    }

    #[test]
    fn test_address_segment_count() {
        assert_eq!(
            check_address("Highland Street|Melbourne|Victoria|Australia"),
            Err(Rejection::AddressSegmentCount(4))
        );
        assert_eq!(
            check_address("32|Highland Street|Melbourne|Victoria|Australia|"),
            Err(Rejection::AddressSegmentCount(6))
        );
        assert_eq!(check_address(""), Err(Rejection::AddressSegmentCount(1)));
    }

    #[test]
    fn test_address_empty_segment() {
        assert_eq!(
            check_address("32||Melbourne|Victoria|Australia"),
            Err(Rejection::AddressEmptySegment(1))
        );
        assert_eq!(
            check_address("|Highland Street|Melbourne|Victoria|Australia"),
            Err(Rejection::AddressEmptySegment(0))
        );
    }

    #[test]
    fn test_date_validation() {
        assert!(validate_date("15-11-1990"));
        assert!(!validate_date("1990-11-15"));
        assert!(!validate_date("32-13-2024"));
        assert_eq!(
            check_date("2024/01/01"),
            Err(Rejection::DateFormat("2024/01/01".to_string()))
        );
    }
}
