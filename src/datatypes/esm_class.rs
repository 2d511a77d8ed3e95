// ABOUTME: ESM class bitfield used on submitted parts and inspected on delivered messages
// ABOUTME: Only the bits this client acts on are modelled

/// esm_class bitfield (SMPP v3.4 §5.2.12).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct EsmClass(u8);

impl EsmClass {
    /// Bits 5-2 = 0001: the deliver_sm carries an SMSC delivery receipt
    pub const SMSC_DELIVERY_RECEIPT: u8 = 0x04;
    /// Bit 6: short_message starts with a User Data Header
    pub const UDHI: u8 = 0x40;
    /// Bit 7: reply path
    pub const REPLY_PATH: u8 = 0x80;

    pub fn from_byte(value: u8) -> Self {
        EsmClass(value)
    }

    pub fn to_byte(&self) -> u8 {
        self.0
    }

    /// Adds UDHI (User Data Header Indicator) feature
    pub fn with_udhi(self) -> Self {
        EsmClass(self.0 | Self::UDHI)
    }

    pub fn has_udhi(&self) -> bool {
        self.0 & Self::UDHI != 0
    }

    pub fn is_delivery_receipt(&self) -> bool {
        self.0 & Self::SMSC_DELIVERY_RECEIPT != 0
    }
}

impl From<u8> for EsmClass {
    fn from(value: u8) -> Self {
        EsmClass(value)
    }
}

impl From<EsmClass> for u8 {
    fn from(esm: EsmClass) -> Self {
        esm.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn udhi_is_added_without_losing_other_bits() {
        let esm = EsmClass::from_byte(0x03).with_udhi();
        assert_eq!(esm.to_byte(), 0x43);
        assert!(esm.has_udhi());
        assert!(!esm.is_delivery_receipt());
    }

    #[test]
    fn receipt_bit_is_detected() {
        assert!(EsmClass::from(0x04).is_delivery_receipt());
        assert!(EsmClass::from(0x44).is_delivery_receipt());
        assert!(!EsmClass::from(0x08).is_delivery_receipt());
    }
}
