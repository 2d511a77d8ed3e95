use num_enum::FromPrimitive;

/// Type of Number (TON) of an SME address, SMPP v3.4 §5.2.5.
#[derive(FromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeOfNumber {
    Unknown = 0b0000_0000,
    International = 0b0000_0001,
    National = 0b0000_0010,
    NetworkSpecific = 0b0000_0011,
    SubscriberNumber = 0b0000_0100,
    Alphanumeric = 0b0000_0101,
    Abbreviated = 0b0000_0110,
    /// Values the SMSC sends that v3.4 leaves reserved
    #[num_enum(catch_all)]
    Reserved(u8),
}

impl From<TypeOfNumber> for u8 {
    fn from(ton: TypeOfNumber) -> Self {
        match ton {
            TypeOfNumber::Unknown => 0b0000_0000,
            TypeOfNumber::International => 0b0000_0001,
            TypeOfNumber::National => 0b0000_0010,
            TypeOfNumber::NetworkSpecific => 0b0000_0011,
            TypeOfNumber::SubscriberNumber => 0b0000_0100,
            TypeOfNumber::Alphanumeric => 0b0000_0101,
            TypeOfNumber::Abbreviated => 0b0000_0110,
            TypeOfNumber::Reserved(value) => value,
        }
    }
}

impl Default for TypeOfNumber {
    fn default() -> Self {
        TypeOfNumber::Unknown
    }
}
