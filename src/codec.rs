// SMPP v3.4 Codec - wire format for PDUs and their mandatory fields
//
// A PDU is kept as its header plus an undecoded body. Commands are packed
// field by field with the `encode_*` helpers, and bodies are read back
// sequentially with the `decode_*` helpers, leaving the tail for TLVs.

use crate::datatypes::{CommandId, CommandStatus, SmppDateTime};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;
use thiserror::Error;

/// Maximum allowed PDU size to prevent memory exhaustion attacks
pub const MAX_PDU_SIZE: u32 = 65536; // 64KB

/// SMPP v3.4 PDU Header (16 bytes, common to all PDUs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduHeader {
    pub command_length: u32,
    pub command_id: u32,
    pub command_status: u32,
    pub sequence_number: u32,
}

impl PduHeader {
    pub const SIZE: usize = 16;

    /// Decode PDU header from buffer with validation
    pub fn decode(buf: &mut impl Buf) -> Result<Self, CodecError> {
        if buf.remaining() < Self::SIZE {
            return Err(CodecError::Incomplete);
        }

        let header = PduHeader {
            command_length: buf.get_u32(),
            command_id: buf.get_u32(),
            command_status: buf.get_u32(),
            sequence_number: buf.get_u32(),
        };

        if header.command_length > MAX_PDU_SIZE {
            return Err(CodecError::InvalidPduLength {
                length: header.command_length,
                max: MAX_PDU_SIZE,
            });
        }

        Ok(header)
    }

    /// Number of body bytes following the header; zero when the declared
    /// length does not even cover the header.
    pub fn body_len(&self) -> usize {
        (self.command_length as usize).saturating_sub(Self::SIZE)
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u32(self.command_length);
        buf.put_u32(self.command_id);
        buf.put_u32(self.command_status);
        buf.put_u32(self.sequence_number);
    }
}

/// One SMPP protocol data unit with an undecoded body.
///
/// `sequence_number` is `None` only for a generic_nack carrying sequence 0,
/// which an SMSC sends when it could not read the offending request's header.
#[derive(Clone, PartialEq, Eq)]
pub struct Pdu {
    pub command_id: u32,
    pub command_status: u32,
    pub sequence_number: Option<u32>,
    pub body: Bytes,
}

impl Pdu {
    /// A request with status 0.
    pub fn new(command_id: impl Into<u32>, sequence_number: u32, body: impl Into<Bytes>) -> Self {
        Self {
            command_id: command_id.into(),
            command_status: 0,
            sequence_number: Some(sequence_number),
            body: body.into(),
        }
    }

    /// The successful response to `request`, echoing its sequence number.
    pub fn response_to(request: &Pdu, body: impl Into<Bytes>) -> Self {
        Self {
            command_id: request.command_id | crate::datatypes::RESPONSE_MASK,
            command_status: 0,
            sequence_number: request.sequence_number,
            body: body.into(),
        }
    }

    pub fn from_header(header: PduHeader, body: Bytes) -> Self {
        let sequence_number = if header.command_id == CommandId::GenericNack as u32
            && header.sequence_number == 0
        {
            None
        } else {
            Some(header.sequence_number)
        };

        Self {
            command_id: header.command_id,
            command_status: header.command_status,
            sequence_number,
            body,
        }
    }

    /// The known command, if this id is one of SMPP v3.4's.
    pub fn command(&self) -> Option<CommandId> {
        CommandId::try_from(self.command_id).ok()
    }

    pub fn is(&self, command_id: CommandId) -> bool {
        self.command_id == command_id as u32
    }

    pub fn is_ok(&self) -> bool {
        self.command_status == CommandStatus::Ok as u32
    }

    /// True when this PDU answers a `command_id` request sent with `sequence_number`.
    pub fn answers(&self, command_id: u32, sequence_number: u32) -> bool {
        let nack = CommandId::GenericNack as u32;
        match self.sequence_number {
            Some(seq) => {
                seq == sequence_number
                    && (self.command_id == command_id | crate::datatypes::RESPONSE_MASK
                        || self.command_id == nack)
            }
            None => self.command_id == nack,
        }
    }

    pub fn header(&self) -> PduHeader {
        PduHeader {
            command_length: (PduHeader::SIZE + self.body.len()) as u32,
            command_id: self.command_id,
            command_status: self.command_status,
            sequence_number: self.sequence_number.unwrap_or(0),
        }
    }

    pub fn encoded_len(&self) -> usize {
        PduHeader::SIZE + self.body.len()
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.header().encode(&mut buf);
        buf.put_slice(&self.body);
        buf.freeze()
    }

    /// Decodes one complete PDU from the front of `buf`.
    pub fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        let header = PduHeader::decode(buf)?;
        let body_len = header.body_len();

        if buf.remaining() < body_len {
            return Err(CodecError::Truncated {
                expected: body_len,
                actual: buf.remaining(),
            });
        }

        Ok(Self::from_header(header, buf.split_to(body_len)))
    }
}

impl fmt::Debug for Pdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.command() {
            Some(id) => format!("{id:?}"),
            None => format!("{:#010x}", self.command_id),
        };
        f.debug_struct("Pdu")
            .field("command", &name)
            .field("status", &format_args!("{:#x}", self.command_status))
            .field("sequence_number", &self.sequence_number)
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// Codec errors with detailed context for debugging
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Incomplete PDU: need more data")]
    Incomplete,

    #[error("PDU body truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("Invalid PDU length: {length}, must be at most {max}")]
    InvalidPduLength { length: u32, max: u32 },

    #[error("Field '{field}' validation failed: {reason}")]
    FieldValidation { field: &'static str, reason: String },

    #[error("TLV parsing error: {0}")]
    TlvError(String),

    #[error("UTF-8 decoding error in field '{field}': {source}")]
    Utf8Error {
        field: &'static str,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Reads a NUL-terminated string of at most `max_len` bytes including the NUL.
pub fn decode_cstring(
    buf: &mut Bytes,
    max_len: usize,
    field_name: &'static str,
) -> Result<String, CodecError> {
    let window = buf.len().min(max_len);
    let end = buf[..window]
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| CodecError::FieldValidation {
            field: field_name,
            reason: format!("no NUL terminator within {max_len} bytes"),
        })?;

    let value = buf.split_to(end);
    buf.advance(1);

    String::from_utf8(value.to_vec()).map_err(|e| CodecError::Utf8Error {
        field: field_name,
        source: e,
    })
}

/// Decode a single byte
pub fn decode_u8(buf: &mut Bytes) -> Result<u8, CodecError> {
    if buf.remaining() < 1 {
        return Err(CodecError::Incomplete);
    }
    Ok(buf.get_u8())
}

/// Decode a 16-bit big-endian integer
pub fn decode_u16(buf: &mut Bytes) -> Result<u16, CodecError> {
    if buf.remaining() < 2 {
        return Err(CodecError::Incomplete);
    }
    Ok(buf.get_u16())
}

/// Exactly `len` raw octets.
pub fn decode_octets(
    buf: &mut Bytes,
    len: usize,
    field_name: &'static str,
) -> Result<Bytes, CodecError> {
    if buf.remaining() < len {
        return Err(CodecError::FieldValidation {
            field: field_name,
            reason: format!("declared {len} bytes but only {} remain", buf.remaining()),
        });
    }
    Ok(buf.split_to(len))
}

/// Writes `value` followed by a NUL terminator.
pub fn encode_cstring(buf: &mut BytesMut, value: &str) {
    buf.put_slice(value.as_bytes());
    buf.put_u8(0);
}

/// Writes raw octets, NUL-terminated only when asked to.
pub fn encode_octets(buf: &mut BytesMut, value: &[u8], null_terminate: bool) {
    buf.put_slice(value);
    if null_terminate {
        buf.put_u8(0);
    }
}

/// Writes a schedule/validity field: 16 characters plus NUL, or a lone NUL.
pub fn encode_time(buf: &mut BytesMut, value: Option<&SmppDateTime>) {
    match value {
        Some(time) => encode_cstring(buf, time.as_str()),
        None => buf.put_u8(0),
    }
}

/// Encode a single byte
pub fn encode_u8(buf: &mut BytesMut, value: u8) {
    buf.put_u8(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_header_layout() {
        let pdu = Pdu::new(CommandId::EnquireLink, 7, Bytes::new());
        let bytes = pdu.encode();
        assert_eq!(
            &bytes[..],
            &[
                0x00, 0x00, 0x00, 0x10, // length
                0x00, 0x00, 0x00, 0x15, // enquire_link
                0x00, 0x00, 0x00, 0x00, // status
                0x00, 0x00, 0x00, 0x07, // sequence
            ]
        );
    }

    #[test]
    fn decode_full_pdu() {
        let mut wire = Bytes::from_static(&[
            0x00, 0x00, 0x00, 0x13, 0x80, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x02, b'a', b'b', 0x00,
        ]);
        let pdu = Pdu::decode(&mut wire).unwrap();
        assert_eq!(pdu.command(), Some(CommandId::SubmitSmResp));
        assert_eq!(pdu.sequence_number, Some(2));
        assert_eq!(&pdu.body[..], b"ab\0");
        assert!(wire.is_empty());
        assert!(pdu.answers(CommandId::SubmitSm as u32, 2));
        assert!(!pdu.answers(CommandId::SubmitSm as u32, 3));
    }

    #[test]
    fn short_body_is_a_framing_error() {
        let mut wire = Bytes::from_static(&[
            0x00, 0x00, 0x00, 0x20, 0x80, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x02, b'a',
        ]);
        assert!(matches!(
            Pdu::decode(&mut wire),
            Err(CodecError::Truncated {
                expected: 16,
                actual: 1
            })
        ));
    }

    #[test]
    fn length_below_header_means_no_body() {
        let mut wire = Bytes::from_static(&[
            0x00, 0x00, 0x00, 0x08, 0x80, 0x00, 0x00, 0x15, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x09,
        ]);
        let pdu = Pdu::decode(&mut wire).unwrap();
        assert!(pdu.body.is_empty());
    }

    #[test]
    fn generic_nack_with_zero_sequence() {
        let header = PduHeader {
            command_length: 16,
            command_id: CommandId::GenericNack as u32,
            command_status: CommandStatus::InvalidCommandId as u32,
            sequence_number: 0,
        };
        let nack = Pdu::from_header(header, Bytes::new());
        assert_eq!(nack.sequence_number, None);
        assert!(nack.answers(CommandId::QuerySm as u32, 41));
        assert_eq!(nack.encode()[12..16], [0, 0, 0, 0]);

        // sequence 0 on anything else is kept as-is
        let header = PduHeader {
            command_id: CommandId::EnquireLinkResp as u32,
            ..header
        };
        assert_eq!(Pdu::from_header(header, Bytes::new()).sequence_number, Some(0));
    }

    #[test]
    fn response_echoes_sequence() {
        let request = Pdu::new(CommandId::DeliverSm, 99, Bytes::from_static(b"x"));
        let resp = Pdu::response_to(&request, Bytes::from_static(&[0]));
        assert_eq!(resp.command(), Some(CommandId::DeliverSmResp));
        assert_eq!(resp.sequence_number, Some(99));
    }

    #[test]
    fn field_packing() {
        let mut buf = BytesMut::new();
        encode_cstring(&mut buf, "CMT");
        encode_octets(&mut buf, b"hi", false);
        encode_octets(&mut buf, b"hi", true);
        encode_time(&mut buf, None);
        assert_eq!(&buf[..], b"CMT\0hihi\0\0");
    }

    #[test]
    fn cstring_bounds() {
        let mut body = Bytes::from_static(b"abc\0rest");
        assert_eq!(decode_cstring(&mut body, 6, "service_type").unwrap(), "abc");
        assert_eq!(&body[..], b"rest");

        let mut body = Bytes::from_static(b"abcdefgh\0");
        assert!(matches!(
            decode_cstring(&mut body, 6, "service_type"),
            Err(CodecError::FieldValidation {
                field: "service_type",
                ..
            })
        ));
    }
}
