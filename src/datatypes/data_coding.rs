// ABOUTME: SMPP data_coding scheme values with the segmentation class each one falls into
// ABOUTME: Only the SMSC default alphabet and UCS-2 have concatenation split widths

use std::fmt;

/// Data coding scheme of a short message (SMPP v3.4 §5.2.19).
///
/// The session treats message bytes as already encoded; the coding only
/// decides byte budgets and how a long message may be split.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataCoding {
    /// SMSC Default Alphabet (typically GSM 03.38, sent as octets)
    #[default]
    SmscDefault,
    /// IA5 (CCITT T.50)/ASCII encoding
    Ascii,
    /// 8-bit binary data (no encoding)
    Binary,
    /// Latin-1 (ISO-8859-1) character set
    Latin1,
    /// UCS-2 (ISO/IEC-10646) big-endian
    Ucs2,
    /// Any other value, passed through untouched
    Custom(u8),
}

impl DataCoding {
    /// Creates a DataCoding from a raw u8 value
    pub fn from_byte(value: u8) -> Self {
        match value {
            0x00 => DataCoding::SmscDefault,
            0x01 => DataCoding::Ascii,
            0x02 => DataCoding::Binary,
            0x03 => DataCoding::Latin1,
            0x08 => DataCoding::Ucs2,
            _ => DataCoding::Custom(value),
        }
    }

    /// Returns the raw u8 value for wire protocol
    pub fn to_byte(&self) -> u8 {
        match self {
            DataCoding::SmscDefault => 0x00,
            DataCoding::Ascii => 0x01,
            DataCoding::Binary => 0x02,
            DataCoding::Latin1 => 0x03,
            DataCoding::Ucs2 => 0x08,
            DataCoding::Custom(value) => *value,
        }
    }

    /// True for the GSM 03.38 default alphabet, where 0x1B escapes the next byte
    pub fn is_default_alphabet(&self) -> bool {
        matches!(self, DataCoding::SmscDefault)
    }

    /// True for UCS-2, where characters are two octets wide
    pub fn is_ucs2(&self) -> bool {
        matches!(self, DataCoding::Ucs2)
    }
}

impl From<u8> for DataCoding {
    fn from(value: u8) -> Self {
        DataCoding::from_byte(value)
    }
}

impl From<DataCoding> for u8 {
    fn from(coding: DataCoding) -> Self {
        coding.to_byte()
    }
}

impl fmt::Debug for DataCoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataCoding::SmscDefault => write!(f, "SmscDefault(0x00)"),
            DataCoding::Ascii => write!(f, "Ascii(0x01)"),
            DataCoding::Binary => write!(f, "Binary(0x02)"),
            DataCoding::Latin1 => write!(f, "Latin1(0x03)"),
            DataCoding::Ucs2 => write!(f, "Ucs2(0x08)"),
            DataCoding::Custom(value) => write!(f, "Custom({value:#04x})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_are_preserved() {
        for value in [0x00u8, 0x01, 0x02, 0x03, 0x08, 0x04, 0xF0] {
            assert_eq!(DataCoding::from_byte(value).to_byte(), value);
        }
        assert_eq!(DataCoding::from(0x04), DataCoding::Custom(0x04));
    }

    #[test]
    fn segmentation_classes() {
        assert!(DataCoding::SmscDefault.is_default_alphabet());
        assert!(!DataCoding::Ascii.is_default_alphabet());
        assert!(DataCoding::Ucs2.is_ucs2());
        assert!(!DataCoding::Custom(0x18).is_ucs2());
    }
}
