// 🚫 Rejections - Why a registration, update or accrual was refused
// Rejections are ordinary values: the record stays usable after any of them

use thiserror::Error;

/// The first validation or permission gate that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    // ========================================================================
    // IDENTIFIER
    // ========================================================================
    #[error("identifier must be exactly 10 characters, got {0}")]
    IdentifierLength(usize),

    #[error("identifier must start with two decimal digits")]
    IdentifierPrefix,

    #[error("identifier needs at least 2 special characters, found {0}")]
    IdentifierSpecialCharacters(usize),

    #[error("identifier must end with two uppercase letters A-Z")]
    IdentifierSuffix,

    // ========================================================================
    // ADDRESS
    // ========================================================================
    #[error("address must have exactly 5 '|'-separated segments, got {0}")]
    AddressSegmentCount(usize),

    #[error("address segment {0} is empty")]
    AddressEmptySegment(usize),

    #[error("address state must be Victoria, got {0:?}")]
    AddressState(String),

    #[error("address country must be Australia, got {0:?}")]
    AddressCountry(String),

    // ========================================================================
    // DATES
    // ========================================================================
    #[error("date {0:?} is not a real dd-MM-yyyy date")]
    DateFormat(String),

    // ========================================================================
    // UPDATE PERMISSIONS
    // ========================================================================
    #[error("no record has been registered yet")]
    NotRegistered,

    #[error("birth date can only change when every other field is unchanged")]
    BirthDateWithOtherChanges,

    #[error("address change requires age {required} or over, driver is {age}")]
    UnderageAddressChange { age: i32, required: i32 },

    #[error("identifier starting with {0:?} may not be changed (first digit is not odd)")]
    IdentifierChangeNotPermitted(char),

    #[error("new identifier must start with an odd digit, got {0:?}")]
    NewIdentifierNotOdd(char),

    // ========================================================================
    // INFRACTIONS
    // ========================================================================
    #[error("demerit points must be between 1 and 6, got {0}")]
    PointsOutOfRange(i32),
}

impl Rejection {
    /// Short machine-friendly name for the failed gate
    pub fn gate(&self) -> &'static str {
        match self {
            Rejection::IdentifierLength(_)
            | Rejection::IdentifierPrefix
            | Rejection::IdentifierSpecialCharacters(_)
            | Rejection::IdentifierSuffix => "identifier",
            Rejection::AddressSegmentCount(_)
            | Rejection::AddressEmptySegment(_)
            | Rejection::AddressState(_)
            | Rejection::AddressCountry(_) => "address",
            Rejection::DateFormat(_) => "date",
            Rejection::NotRegistered => "registration",
            Rejection::BirthDateWithOtherChanges => "birth_date_exclusivity",
            Rejection::UnderageAddressChange { .. } => "address_age",
            Rejection::IdentifierChangeNotPermitted(_) | Rejection::NewIdentifierNotOdd(_) => {
                "identifier_parity"
            }
            Rejection::PointsOutOfRange(_) => "points",
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
