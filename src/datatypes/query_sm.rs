// ABOUTME: Implements SMPP v3.4 query_sm request packing and query_sm_resp decoding
// ABOUTME: Reports the SMSC's view of a previously submitted message (Section 4.8)

use crate::codec::{CodecError, decode_cstring, decode_u8, encode_cstring, encode_u8};
use crate::datatypes::{Address, SmppTime, parse_smpp_time};
use bytes::{Bytes, BytesMut};
use num_enum::TryFromPrimitive;

const MAX_MESSAGE_ID_LENGTH: usize = 65;
const MAX_FINAL_DATE_LENGTH: usize = 17;

/// SMPP v3.4 message_state values (Section 5.2.28)
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageState {
    Enroute = 1,
    Delivered = 2,
    Expired = 3,
    Deleted = 4,
    Undeliverable = 5,
    Accepted = 6,
    Unknown = 7,
    Rejected = 8,
}

impl MessageState {
    /// True once the SMSC will no longer change the state.
    pub fn is_final(&self) -> bool {
        !matches!(self, MessageState::Enroute | MessageState::Accepted | MessageState::Unknown)
    }
}

/// Body of a query_sm for `message_id` as originally submitted from `source`.
pub fn encode_query_sm(message_id: &str, source: &Address) -> Bytes {
    let mut buf = BytesMut::with_capacity(message_id.len() + source.len() + 4);
    encode_cstring(&mut buf, message_id);
    encode_u8(&mut buf, source.ton().into());
    encode_u8(&mut buf, source.npi().into());
    encode_cstring(&mut buf, source.value());
    buf.freeze()
}

/// Decoded query_sm_resp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryStatus {
    pub message_id: String,
    /// When the message reached its final state; `None` while still pending.
    pub final_date: Option<SmppTime>,
    pub message_state: u8,
    pub error_code: u8,
}

impl QueryStatus {
    pub fn decode(body: &Bytes) -> Result<Self, CodecError> {
        let mut buf = body.clone();
        let message_id = decode_cstring(&mut buf, MAX_MESSAGE_ID_LENGTH, "message_id")?;
        let final_date = decode_cstring(&mut buf, MAX_FINAL_DATE_LENGTH, "final_date")?;
        let message_state = decode_u8(&mut buf)?;
        let error_code = decode_u8(&mut buf)?;

        Ok(QueryStatus {
            message_id,
            final_date: if final_date.is_empty() {
                None
            } else {
                parse_smpp_time(&final_date)
            },
            message_state,
            error_code,
        })
    }

    pub fn state(&self) -> Option<MessageState> {
        MessageState::try_from(self.message_state).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{NumericPlanIndicator, TypeOfNumber};

    #[test]
    fn query_sm_layout() {
        let source = Address::new("12345", TypeOfNumber::National, NumericPlanIndicator::Isdn)
            .unwrap();
        let body = encode_query_sm("abc", &source);
        assert_eq!(&body[..], b"abc\0\x02\x0112345\0");
    }

    #[test]
    fn decode_pending_and_final() {
        let pending = QueryStatus::decode(&Bytes::from_static(b"abc\0\0\x01\x00")).unwrap();
        assert_eq!(pending.final_date, None);
        assert_eq!(pending.state(), Some(MessageState::Enroute));
        assert!(!MessageState::Enroute.is_final());

        let done = QueryStatus::decode(&Bytes::from_static(
            b"abc\0111019080000704+\0\x02\x00",
        ))
        .unwrap();
        assert!(matches!(done.final_date, Some(SmppTime::Absolute(_))));
        assert_eq!(done.state(), Some(MessageState::Delivered));
        assert!(MessageState::Delivered.is_final());
    }

    #[test]
    fn truncated_reply_fails() {
        assert!(QueryStatus::decode(&Bytes::from_static(b"abc\0\0\x02")).is_err());
    }
}
