// ABOUTME: Tag-Length-Value optional parameters appended after the mandatory PDU fields
// ABOUTME: Length is always derived from the value so the two can never disagree

use crate::codec::CodecError;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;
use thiserror::Error;

/// Optional parameter tags used by this client (SMPP v3.4 §5.3.2).
pub mod tags {
    pub const USER_MESSAGE_REFERENCE: u16 = 0x0204;
    pub const SAR_MSG_REF_NUM: u16 = 0x020C;
    pub const SAR_TOTAL_SEGMENTS: u16 = 0x020E;
    pub const SAR_SEGMENT_SEQNUM: u16 = 0x020F;
    pub const MESSAGE_PAYLOAD: u16 = 0x0424;
    pub const RECEIPTED_MESSAGE_ID: u16 = 0x001E;
    pub const MESSAGE_STATE: u16 = 0x0427;
    pub const NETWORK_ERROR_CODE: u16 = 0x0423;
}

/// Size of the tag and length fields preceding every value.
pub const TLV_HEADER_SIZE: usize = 4;

#[derive(Clone, PartialEq, Eq)]
pub struct Tlv {
    /// The Tag field is used to uniquely identify the particular optional parameter in question.
    pub tag: u16,

    /// The Length field indicates the length of the Value field in octets.
    /// Note that this length does not include the length of the Tag and Length fields.
    length: u16,

    /// The Value field contains the actual data for the optional parameter in question.
    value: Bytes,
}

impl Tlv {
    pub fn new(tag: u16, value: impl Into<Bytes>) -> Result<Self, TlvError> {
        let value = value.into();
        let length = u16::try_from(value.len()).map_err(|_| TlvError::ValueTooLong {
            tag,
            actual_len: value.len(),
        })?;
        Ok(Self { tag, length, value })
    }

    /// Creates a TLV with an explicitly declared length, which must match the value.
    pub fn with_length(tag: u16, length: u16, value: impl Into<Bytes>) -> Result<Self, TlvError> {
        let value = value.into();
        if usize::from(length) != value.len() {
            return Err(TlvError::LengthMismatch {
                tag,
                declared: length,
                actual: value.len(),
            });
        }
        Ok(Self { tag, length, value })
    }

    pub fn u8(tag: u16, value: u8) -> Self {
        Self {
            tag,
            length: 1,
            value: Bytes::copy_from_slice(&[value]),
        }
    }

    pub fn u16(tag: u16, value: u16) -> Self {
        Self {
            tag,
            length: 2,
            value: Bytes::copy_from_slice(&value.to_be_bytes()),
        }
    }

    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn value(&self) -> &Bytes {
        &self.value
    }

    /// Value read as a big-endian integer of 1, 2 or 4 octets.
    pub fn as_uint(&self) -> Option<u32> {
        let mut value = self.value.clone();
        match value.len() {
            1 => Some(u32::from(value.get_u8())),
            2 => Some(u32::from(value.get_u16())),
            4 => Some(value.get_u32()),
            _ => None,
        }
    }

    pub fn encoded_len(&self) -> usize {
        TLV_HEADER_SIZE + self.value.len()
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u16(self.tag);
        buf.put_u16(self.length);
        buf.put_slice(&self.value);
    }

    /// Decodes every TLV remaining in `buf`.
    ///
    /// Zero-tag zero-length entries and a zero-filled tail shorter than a TLV
    /// header are padding some SMSCs emit and are skipped.
    pub fn decode_all(buf: &mut Bytes) -> Result<Vec<Tlv>, CodecError> {
        let mut tlvs = Vec::new();

        while buf.has_remaining() {
            if buf.remaining() < TLV_HEADER_SIZE {
                if buf.iter().all(|&b| b == 0) {
                    buf.advance(buf.remaining());
                    break;
                }
                return Err(CodecError::TlvError(format!(
                    "{} trailing bytes cannot hold a TLV header",
                    buf.remaining()
                )));
            }

            let tag = buf.get_u16();
            let length = buf.get_u16();

            if tag == 0 && length == 0 {
                continue;
            }

            if buf.remaining() < usize::from(length) {
                return Err(CodecError::TlvError(format!(
                    "tag {tag:#06x} declares {length} bytes but only {} remain",
                    buf.remaining()
                )));
            }

            let value = buf.split_to(usize::from(length));
            tlvs.push(Tlv { tag, length, value });
        }

        Ok(tlvs)
    }
}

impl fmt::Debug for Tlv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tlv(tag={:#06x}, len={}, value={})",
            self.tag,
            self.length,
            hex::encode(&self.value)
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TlvError {
    #[error("TLV {tag:#06x} value of {actual_len} bytes exceeds 65535")]
    ValueTooLong { tag: u16, actual_len: usize },

    #[error("TLV {tag:#06x} declares length {declared} but value has {actual} bytes")]
    LengthMismatch {
        tag: u16,
        declared: u16,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_must_match_value() {
        assert!(Tlv::with_length(tags::MESSAGE_PAYLOAD, 3, &b"abc"[..]).is_ok());
        assert_eq!(
            Tlv::with_length(tags::MESSAGE_PAYLOAD, 4, &b"abc"[..]),
            Err(TlvError::LengthMismatch {
                tag: 0x0424,
                declared: 4,
                actual: 3
            })
        );
        assert!(matches!(
            Tlv::new(tags::MESSAGE_PAYLOAD, vec![0u8; 65536]),
            Err(TlvError::ValueTooLong { .. })
        ));
    }

    #[test]
    fn encode_layout() {
        let mut buf = BytesMut::new();
        Tlv::u16(tags::SAR_MSG_REF_NUM, 0x1234).encode(&mut buf);
        Tlv::u8(tags::SAR_TOTAL_SEGMENTS, 3).encode(&mut buf);
        assert_eq!(
            &buf[..],
            &[0x02, 0x0C, 0x00, 0x02, 0x12, 0x34, 0x02, 0x0E, 0x00, 0x01, 0x03]
        );
    }

    #[test]
    fn decode_skips_padding() {
        let mut body = Bytes::from_static(&[
            0x00, 0x00, 0x00, 0x00, // padding entry
            0x04, 0x27, 0x00, 0x01, 0x02, // message_state = DELIVERED
            0x00, 0x00, // short zero tail
        ]);
        let tlvs = Tlv::decode_all(&mut body).unwrap();
        assert_eq!(tlvs.len(), 1);
        assert_eq!(tlvs[0].tag, tags::MESSAGE_STATE);
        assert_eq!(tlvs[0].as_uint(), Some(2));
    }

    #[test]
    fn decode_rejects_truncated_value() {
        let mut body = Bytes::from_static(&[0x00, 0x1E, 0x00, 0x08, b'a', b'b']);
        assert!(Tlv::decode_all(&mut body).is_err());

        let mut body = Bytes::from_static(&[0x00, 0x1E, 0x01]);
        assert!(Tlv::decode_all(&mut body).is_err());
    }
}
