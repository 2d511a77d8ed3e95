use num_enum::FromPrimitive;

/// Numbering Plan Indicator (NPI) of an SME address, SMPP v3.4 §5.2.6.
#[derive(FromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumericPlanIndicator {
    Unknown = 0b0000_0000,
    /// ISDN (E163/E164)
    Isdn = 0b0000_0001,
    Data = 0b0000_0011,
    Telex = 0b0000_0100,
    LandMobile = 0b0000_0110,
    National = 0b0000_1000,
    Private = 0b0000_1001,
    Ermes = 0b0000_1010,
    Internet = 0b0000_1110,
    WapClientId = 0b0001_0010,
    #[num_enum(catch_all)]
    Reserved(u8),
}

impl NumericPlanIndicator {
    /// E.164 numbers share the ISDN plan value.
    pub const E164: NumericPlanIndicator = NumericPlanIndicator::Isdn;
}

impl From<NumericPlanIndicator> for u8 {
    fn from(npi: NumericPlanIndicator) -> Self {
        match npi {
            NumericPlanIndicator::Unknown => 0b0000_0000,
            NumericPlanIndicator::Isdn => 0b0000_0001,
            NumericPlanIndicator::Data => 0b0000_0011,
            NumericPlanIndicator::Telex => 0b0000_0100,
            NumericPlanIndicator::LandMobile => 0b0000_0110,
            NumericPlanIndicator::National => 0b0000_1000,
            NumericPlanIndicator::Private => 0b0000_1001,
            NumericPlanIndicator::Ermes => 0b0000_1010,
            NumericPlanIndicator::Internet => 0b0000_1110,
            NumericPlanIndicator::WapClientId => 0b0001_0010,
            NumericPlanIndicator::Reserved(value) => value,
        }
    }
}

impl Default for NumericPlanIndicator {
    fn default() -> Self {
        NumericPlanIndicator::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_values_survive_a_round_trip() {
        let npi = NumericPlanIndicator::from(0x07);
        assert_eq!(npi, NumericPlanIndicator::Reserved(0x07));
        assert_eq!(u8::from(npi), 0x07);
        assert_eq!(NumericPlanIndicator::from(1), NumericPlanIndicator::E164);
    }
}
