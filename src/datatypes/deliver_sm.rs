use crate::client::error::{SmppError, SmppResult};
use crate::codec::{Pdu, decode_cstring, decode_octets, decode_u8};
use crate::datatypes::tlv::{Tlv, tags};
use crate::datatypes::{Address, CommandId, DataCoding, DeliveryReceipt, EsmClass};
use bytes::Bytes;
use tracing::trace;

// SMPP v3.4 field length limits (including null terminator)
const MAX_SERVICE_TYPE_LENGTH: usize = 6;
const MAX_ADDR_LENGTH: usize = 21;
const MAX_TIME_LENGTH: usize = 17;

/// A message delivered by the SMSC: either mobile originated text or, when
/// esm_class carries the SMSC delivery receipt bit, a receipt for an earlier
/// submission.
#[derive(Clone, Debug, PartialEq)]
pub struct InboundMessage {
    pub command_id: u32,
    pub command_status: u32,
    pub sequence_number: Option<u32>,

    /// 4.6.1 service_type: Max length 6 octets including the NUL.
    pub service_type: String,

    /// 4.6.1 source_addr with its TON/NPI.
    pub source: Address,

    /// 4.6.1 destination_addr with its TON/NPI.
    pub destination: Address,

    pub esm_class: EsmClass,
    pub protocol_id: u8,
    pub priority_flag: u8,

    /// Normally empty on deliver_sm.
    pub schedule_delivery_time: String,
    pub validity_period: String,

    pub registered_delivery: u8,
    pub data_coding: DataCoding,

    /// Exactly sm_length octets of short_message, in `data_coding`.
    pub message: Bytes,

    /// Optional parameters in the order received.
    pub tags: Vec<Tlv>,

    /// The undecoded PDU body, kept for diagnostics.
    pub body: Bytes,

    pub receipt: Option<DeliveryReceipt>,
}

impl InboundMessage {
    /// Decode a deliver_sm PDU, including its delivery receipt if flagged.
    pub fn parse(pdu: &Pdu) -> SmppResult<Self> {
        if !pdu.is(CommandId::DeliverSm) {
            return Err(SmppError::Validation(format!(
                "expected deliver_sm, got command {:#010x}",
                pdu.command_id
            )));
        }

        let mut buf = pdu.body.clone();

        let service_type = decode_cstring(&mut buf, MAX_SERVICE_TYPE_LENGTH, "service_type")?;
        let source_ton = decode_u8(&mut buf)?;
        let source_npi = decode_u8(&mut buf)?;
        let source_addr = decode_cstring(&mut buf, MAX_ADDR_LENGTH, "source_addr")?;
        let dest_ton = decode_u8(&mut buf)?;
        let dest_npi = decode_u8(&mut buf)?;
        let dest_addr = decode_cstring(&mut buf, MAX_ADDR_LENGTH, "destination_addr")?;
        let esm_class = EsmClass::from_byte(decode_u8(&mut buf)?);
        let protocol_id = decode_u8(&mut buf)?;
        let priority_flag = decode_u8(&mut buf)?;
        let schedule_delivery_time =
            decode_cstring(&mut buf, MAX_TIME_LENGTH, "schedule_delivery_time")?;
        let validity_period = decode_cstring(&mut buf, MAX_TIME_LENGTH, "validity_period")?;
        let registered_delivery = decode_u8(&mut buf)?;
        let _replace_if_present = decode_u8(&mut buf)?;
        let data_coding = DataCoding::from_byte(decode_u8(&mut buf)?);
        let _sm_default_msg_id = decode_u8(&mut buf)?;
        let sm_length = decode_u8(&mut buf)?;
        let message = decode_octets(&mut buf, usize::from(sm_length), "short_message")?;

        let tags = Tlv::decode_all(&mut buf)?;
        for tlv in &tags {
            trace!("deliver_sm tag {:?}", tlv);
        }

        let mut inbound = InboundMessage {
            command_id: pdu.command_id,
            command_status: pdu.command_status,
            sequence_number: pdu.sequence_number,
            service_type,
            source: Address::from_wire(source_addr, source_ton, source_npi),
            destination: Address::from_wire(dest_addr, dest_ton, dest_npi),
            esm_class,
            protocol_id,
            priority_flag,
            schedule_delivery_time,
            validity_period,
            registered_delivery,
            data_coding,
            message,
            tags,
            body: pdu.body.clone(),
            receipt: None,
        };

        if esm_class.is_delivery_receipt() {
            let receipt = DeliveryReceipt::parse(inbound.content()).ok_or_else(|| {
                SmppError::Parse {
                    message: "Could not parse delivery receipt".to_string(),
                    body_hex: hex::encode(&pdu.body),
                }
            })?;
            inbound.receipt = Some(receipt);
        }

        Ok(inbound)
    }

    /// The short message, or the message_payload value when short_message is empty.
    pub fn content(&self) -> &[u8] {
        if self.message.is_empty() {
            if let Some(payload) = self.tag(tags::MESSAGE_PAYLOAD) {
                return payload.value();
            }
        }
        &self.message
    }

    pub fn tag(&self, tag: u16) -> Option<&Tlv> {
        self.tags.iter().find(|tlv| tlv.tag == tag)
    }

    pub fn is_receipt(&self) -> bool {
        self.receipt.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{NumericPlanIndicator, TypeOfNumber};
    use bytes::{BufMut, BytesMut};

    fn deliver_sm_body(esm_class: u8, message: &[u8], tlvs: &[u8]) -> Bytes {
        let mut buf = BytesMut::new();
        buf.put_slice(b"\0"); // service_type
        buf.put_u8(0x01);
        buf.put_u8(0x01);
        buf.put_slice(b"4512345678\0");
        buf.put_u8(0x05);
        buf.put_u8(0x00);
        buf.put_slice(b"Brand\0");
        buf.put_u8(esm_class);
        buf.put_u8(0x00); // protocol_id
        buf.put_u8(0x01); // priority_flag
        buf.put_slice(b"\0\0"); // schedule, validity
        buf.put_u8(0x00); // registered_delivery
        buf.put_u8(0x00); // replace_if_present
        buf.put_u8(0x08); // data_coding
        buf.put_u8(0x00); // sm_default_msg_id
        buf.put_u8(message.len() as u8);
        buf.put_slice(message);
        buf.put_slice(tlvs);
        buf.freeze()
    }

    #[test]
    fn parse_mobile_originated_message() {
        // binary payload containing a NUL must come through whole
        let text = [0x00, 0x48, 0x00, 0x69];
        let body = deliver_sm_body(0x00, &text, &[0x02, 0x04, 0x00, 0x02, 0x00, 0x07]);
        let pdu = Pdu::new(CommandId::DeliverSm, 12, body);

        let msg = InboundMessage::parse(&pdu).unwrap();
        assert_eq!(msg.sequence_number, Some(12));
        assert_eq!(msg.source.value(), "4512345678");
        assert_eq!(msg.source.ton(), TypeOfNumber::International);
        assert_eq!(msg.source.npi(), NumericPlanIndicator::Isdn);
        assert_eq!(msg.destination.ton(), TypeOfNumber::Alphanumeric);
        assert_eq!(msg.priority_flag, 1);
        assert_eq!(msg.data_coding, DataCoding::Ucs2);
        assert_eq!(&msg.message[..], &text);
        assert_eq!(msg.tags.len(), 1);
        assert_eq!(
            msg.tag(tags::USER_MESSAGE_REFERENCE).and_then(Tlv::as_uint),
            Some(7)
        );
        assert!(!msg.is_receipt());
    }

    #[test]
    fn parse_delivery_receipt() {
        let text = b"id:0123456789 sub:001 dlvrd:001 submit date:2503041200 done date:2503041201 stat:DELIVRD err:000 text:Hello";
        let pdu = Pdu::new(CommandId::DeliverSm, 3, deliver_sm_body(0x04, text, &[]));

        let msg = InboundMessage::parse(&pdu).unwrap();
        let receipt = msg.receipt.expect("receipt");
        assert_eq!(receipt.id, "0123456789");
        assert_eq!(receipt.stat, "DELIVRD");
    }

    #[test]
    fn malformed_receipt_carries_body_hex() {
        let pdu = Pdu::new(CommandId::DeliverSm, 3, deliver_sm_body(0x04, b"garbage", &[]));
        match InboundMessage::parse(&pdu) {
            Err(SmppError::Parse { body_hex, .. }) => {
                assert_eq!(body_hex, hex::encode(&pdu.body))
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_command_is_rejected() {
        let pdu = Pdu::new(CommandId::SubmitSm, 1, Bytes::new());
        assert!(matches!(
            InboundMessage::parse(&pdu),
            Err(SmppError::Validation(_))
        ));
    }

    #[test]
    fn truncated_message_is_a_framing_error() {
        let mut body = BytesMut::from(&deliver_sm_body(0x00, b"hello", &[])[..]);
        body.truncate(body.len() - 2);
        let pdu = Pdu::new(CommandId::DeliverSm, 1, body.freeze());
        assert!(matches!(
            InboundMessage::parse(&pdu),
            Err(SmppError::Framing(_))
        ));
    }
}
