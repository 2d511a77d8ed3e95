// ABOUTME: SMPP source/destination address with TON/NPI length rules
// ABOUTME: Alphanumeric senders are capped at 11 chars and international E.164 numbers at 15

use crate::datatypes::{NumericPlanIndicator, TypeOfNumber};
use std::fmt;
use thiserror::Error;

/// Longest alphanumeric sender id a handset can display.
pub const MAX_ALPHANUMERIC_LEN: usize = 11;

/// Longest E.164 number (country code + subscriber number).
pub const MAX_E164_LEN: usize = 15;

/// An SMPP address: the value plus its Type of Number and Numbering Plan.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Address {
    value: String,
    ton: TypeOfNumber,
    npi: NumericPlanIndicator,
}

impl Address {
    /// Creates an address, validating its length against the TON/NPI pair.
    pub fn new(
        value: impl Into<String>,
        ton: TypeOfNumber,
        npi: NumericPlanIndicator,
    ) -> Result<Self, AddressError> {
        let value = value.into();
        let len = value.len();

        if ton == TypeOfNumber::Alphanumeric && len > MAX_ALPHANUMERIC_LEN {
            return Err(AddressError::TooLong {
                ton,
                max_len: MAX_ALPHANUMERIC_LEN,
                actual_len: len,
            });
        }

        if ton == TypeOfNumber::International
            && npi == NumericPlanIndicator::E164
            && len > MAX_E164_LEN
        {
            return Err(AddressError::TooLong {
                ton,
                max_len: MAX_E164_LEN,
                actual_len: len,
            });
        }

        Ok(Self { value, ton, npi })
    }

    /// International E.164 number, e.g. `"4512345678"`.
    pub fn international(number: impl Into<String>) -> Result<Self, AddressError> {
        Self::new(
            number,
            TypeOfNumber::International,
            NumericPlanIndicator::E164,
        )
    }

    /// Alphanumeric sender id, e.g. `"MyBrand"`.
    pub fn alphanumeric(name: impl Into<String>) -> Result<Self, AddressError> {
        Self::new(
            name,
            TypeOfNumber::Alphanumeric,
            NumericPlanIndicator::Unknown,
        )
    }

    /// Builds an address from decoded wire fields without length checks.
    ///
    /// Inbound addresses are whatever the SMSC sent; rejecting them would drop
    /// the whole deliver_sm.
    pub(crate) fn from_wire(value: String, ton: u8, npi: u8) -> Self {
        Self {
            value,
            ton: TypeOfNumber::from(ton),
            npi: NumericPlanIndicator::from(npi),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn ton(&self) -> TypeOfNumber {
        self.ton
    }

    pub fn npi(&self) -> NumericPlanIndicator {
        self.npi
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({:?}, {:?}, {:?})", self.value, self.ton, self.npi)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address too long for {ton:?}: {actual_len} characters (max {max_len})")]
    TooLong {
        ton: TypeOfNumber,
        max_len: usize,
        actual_len: usize,
    },
}
