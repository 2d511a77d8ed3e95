// ABOUTME: Splits oversized short messages into concatenated SMS parts (CSMS)
// ABOUTME: Supports message_payload, 8-bit reference UDH and SAR TLV concatenation

use crate::client::error::{SmppError, SmppResult};
use crate::datatypes::tlv::tags;
use crate::datatypes::{DataCoding, EsmClass, Tlv};
use bytes::{BufMut, Bytes, BytesMut};
use rand::Rng;

/// Octets a single default-alphabet message may carry (sent as octets, packed to septets by the SMSC).
pub const SINGLE_DEFAULT_LIMIT: usize = 160;
pub const SINGLE_UCS2_LIMIT: usize = 160;
/// Largest short_message the protocol allows.
pub const SINGLE_OCTET_LIMIT: usize = 254;

pub const SPLIT_DEFAULT: usize = 152;
pub const SPLIT_DEFAULT_UDH: usize = 153;
/// 133 octets fit next to the UDH, but an odd width would cut a UCS-2 character in half.
pub const SPLIT_UCS2: usize = 132;

/// GSM 03.38 escape: the next octet selects from the extension table.
const GSM_ESCAPE: u8 = 0x1B;

/// How a message too long for one submit_sm is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsmsMethod {
    /// One submit_sm with the whole text in a message_payload TLV.
    Payload,
    /// One submit_sm per part, each prefixed with a 6 octet User Data Header.
    Udh8Bit,
    /// One submit_sm per part, tagged with the sar_* TLVs.
    #[default]
    SarTags,
}

impl CsmsMethod {
    /// Largest reference number this method can carry.
    pub fn reference_limit(&self) -> u16 {
        match self {
            CsmsMethod::Udh8Bit => u16::from(u8::MAX),
            CsmsMethod::Payload | CsmsMethod::SarTags => u16::MAX,
        }
    }
}

/// Octets that fit in one unsegmented submit_sm.
pub fn single_part_limit(coding: DataCoding) -> usize {
    match coding {
        DataCoding::SmscDefault => SINGLE_DEFAULT_LIMIT,
        DataCoding::Ucs2 => SINGLE_UCS2_LIMIT,
        _ => SINGLE_OCTET_LIMIT,
    }
}

/// Octets of text per part, or `None` when the coding cannot be split safely.
pub fn split_width(coding: DataCoding, method: CsmsMethod) -> Option<usize> {
    match (coding, method) {
        (DataCoding::SmscDefault, CsmsMethod::Udh8Bit) => Some(SPLIT_DEFAULT_UDH),
        (DataCoding::SmscDefault, _) => Some(SPLIT_DEFAULT),
        (DataCoding::Ucs2, _) => Some(SPLIT_UCS2),
        _ => None,
    }
}

/// Split `message` into chunks of at most `width` octets.
///
/// In the default alphabet an escape octet and the octet it escapes must stay
/// in the same part, so a part is closed one octet early whenever its last
/// slot would hold an escape.
pub fn split_message(message: &[u8], width: usize, coding: DataCoding) -> Vec<Bytes> {
    if width == 0 || message.is_empty() {
        return vec![Bytes::copy_from_slice(message)];
    }

    let boundary_escape = coding.is_default_alphabet()
        && (1..message.len().div_ceil(width))
            .any(|part| message[part * width - 1] == GSM_ESCAPE);

    if !boundary_escape {
        return message.chunks(width).map(Bytes::copy_from_slice).collect();
    }

    let mut parts = Vec::new();
    let mut part = BytesMut::with_capacity(width);
    for &octet in message {
        if part.len() == width || (part.len() == width - 1 && octet == GSM_ESCAPE) {
            parts.push(part.split().freeze());
        }
        part.put_u8(octet);
    }
    parts.push(part.freeze());
    parts
}

/// Concatenation reference numbers for one session.
///
/// Seeded at random on first use, then incremented on every use and wrapped
/// to 0 past the method's limit.
#[derive(Debug, Clone)]
pub struct CsmsReference {
    limit: u16,
    current: Option<u16>,
}

impl CsmsReference {
    pub fn new(method: CsmsMethod) -> Self {
        Self {
            limit: method.reference_limit(),
            current: None,
        }
    }

    /// A counter whose first reference is `seed + 1`.
    pub fn seeded(method: CsmsMethod, seed: u16) -> Self {
        let limit = method.reference_limit();
        Self {
            limit,
            current: Some(seed.min(limit)),
        }
    }

    pub fn next(&mut self) -> u16 {
        let limit = self.limit;
        let current = *self
            .current
            .get_or_insert_with(|| rand::thread_rng().gen_range(0..=limit));
        let next = if current >= limit { 0 } else { current + 1 };
        self.current = Some(next);
        next
    }
}

/// One submit_sm worth of a (possibly segmented) message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPart {
    pub short_message: Bytes,
    pub esm_class: EsmClass,
    pub tags: Vec<Tlv>,
}

/// Lay out `message` as the submit_sm parts needed to deliver it.
///
/// Never returns an empty list. Caller tags come first on every part, ahead
/// of any concatenation tags.
pub fn plan(
    message: &[u8],
    coding: DataCoding,
    esm_class: EsmClass,
    caller_tags: &[Tlv],
    method: CsmsMethod,
    reference: &mut CsmsReference,
) -> SmppResult<Vec<SubmitPart>> {
    if message.len() <= single_part_limit(coding) {
        return Ok(vec![SubmitPart {
            short_message: Bytes::copy_from_slice(message),
            esm_class,
            tags: caller_tags.to_vec(),
        }]);
    }

    if method == CsmsMethod::Payload {
        let mut part_tags = caller_tags.to_vec();
        part_tags.push(Tlv::new(
            tags::MESSAGE_PAYLOAD,
            Bytes::copy_from_slice(message),
        )?);
        return Ok(vec![SubmitPart {
            short_message: Bytes::new(),
            esm_class,
            tags: part_tags,
        }]);
    }

    let width = split_width(coding, method).ok_or_else(|| {
        SmppError::Validation(format!(
            "{} octet message in {:?} exceeds {} octets and cannot be segmented",
            message.len(),
            coding,
            single_part_limit(coding)
        ))
    })?;

    let chunks = split_message(message, width, coding);
    let total = u8::try_from(chunks.len()).map_err(|_| {
        SmppError::Validation(format!(
            "message needs {} parts, at most 255 can be concatenated",
            chunks.len()
        ))
    })?;
    let reference = reference.next();

    let parts = chunks
        .into_iter()
        .zip(1..=total)
        .map(|(chunk, seqnum)| match method {
            CsmsMethod::Udh8Bit => {
                let mut short_message = BytesMut::with_capacity(6 + chunk.len());
                // IEI 0x00: concatenated short messages, 8-bit reference
                short_message.put_slice(&[0x05, 0x00, 0x03, reference as u8, total, seqnum]);
                short_message.put_slice(&chunk);
                SubmitPart {
                    short_message: short_message.freeze(),
                    esm_class: esm_class.with_udhi(),
                    tags: caller_tags.to_vec(),
                }
            }
            _ => {
                let mut part_tags = caller_tags.to_vec();
                part_tags.push(Tlv::u16(tags::SAR_MSG_REF_NUM, reference));
                part_tags.push(Tlv::u8(tags::SAR_TOTAL_SEGMENTS, total));
                part_tags.push(Tlv::u8(tags::SAR_SEGMENT_SEQNUM, seqnum));
                SubmitPart {
                    short_message: chunk,
                    esm_class,
                    tags: part_tags,
                }
            }
        })
        .collect();

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(len: usize) -> Vec<u8> {
        (0..len).map(|i| b'a' + (i % 26) as u8).collect()
    }

    #[test]
    fn fits_in_one_part() {
        let mut reference = CsmsReference::seeded(CsmsMethod::SarTags, 0);
        let caller = vec![Tlv::u16(tags::USER_MESSAGE_REFERENCE, 9)];
        let parts = plan(
            &text(160),
            DataCoding::SmscDefault,
            EsmClass::default(),
            &caller,
            CsmsMethod::SarTags,
            &mut reference,
        )
        .unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].short_message.len(), 160);
        assert_eq!(parts[0].tags, caller);

        let parts = plan(
            &text(254),
            DataCoding::Binary,
            EsmClass::default(),
            &[],
            CsmsMethod::SarTags,
            &mut reference,
        )
        .unwrap();
        assert_eq!(parts.len(), 1);
    }

    #[test]
    fn sar_tags_on_every_part() {
        let mut reference = CsmsReference::seeded(CsmsMethod::SarTags, 41);
        let caller = vec![Tlv::u16(tags::USER_MESSAGE_REFERENCE, 9)];
        let parts = plan(
            &text(400),
            DataCoding::SmscDefault,
            EsmClass::default(),
            &caller,
            CsmsMethod::SarTags,
            &mut reference,
        )
        .unwrap();

        let lens: Vec<_> = parts.iter().map(|p| p.short_message.len()).collect();
        assert_eq!(lens, vec![152, 152, 96]);
        for (i, part) in parts.iter().enumerate() {
            assert_eq!(part.tags[0], caller[0]);
            assert_eq!(part.tags[1], Tlv::u16(tags::SAR_MSG_REF_NUM, 42));
            assert_eq!(part.tags[2], Tlv::u8(tags::SAR_TOTAL_SEGMENTS, 3));
            assert_eq!(part.tags[3], Tlv::u8(tags::SAR_SEGMENT_SEQNUM, i as u8 + 1));
            assert!(!part.esm_class.has_udhi());
        }
    }

    #[test]
    fn udh_parts() {
        let mut reference = CsmsReference::seeded(CsmsMethod::Udh8Bit, 255);
        let parts = plan(
            &text(200),
            DataCoding::SmscDefault,
            EsmClass::from_byte(0x03),
            &[],
            CsmsMethod::Udh8Bit,
            &mut reference,
        )
        .unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(&parts[0].short_message[..6], &[0x05, 0x00, 0x03, 0x00, 0x02, 0x01]);
        assert_eq!(parts[0].short_message.len(), 6 + 153);
        assert_eq!(&parts[1].short_message[..6], &[0x05, 0x00, 0x03, 0x00, 0x02, 0x02]);
        assert_eq!(parts[1].short_message.len(), 6 + 47);
        assert_eq!(parts[1].esm_class.to_byte(), 0x43);
        assert!(parts[1].tags.is_empty());
    }

    #[test]
    fn payload_is_a_single_submit() {
        let mut reference = CsmsReference::new(CsmsMethod::Payload);
        let message = text(1000);
        let parts = plan(
            &message,
            DataCoding::Latin1,
            EsmClass::default(),
            &[Tlv::u8(0x1401, 1)],
            CsmsMethod::Payload,
            &mut reference,
        )
        .unwrap();

        assert_eq!(parts.len(), 1);
        assert!(parts[0].short_message.is_empty());
        assert_eq!(parts[0].tags.len(), 2);
        assert_eq!(parts[0].tags[1].tag, tags::MESSAGE_PAYLOAD);
        assert_eq!(&parts[0].tags[1].value()[..], &message[..]);
    }

    #[test]
    fn unsplittable_coding_is_rejected() {
        let mut reference = CsmsReference::new(CsmsMethod::SarTags);
        let result = plan(
            &text(255),
            DataCoding::Binary,
            EsmClass::default(),
            &[],
            CsmsMethod::SarTags,
            &mut reference,
        );
        assert!(matches!(result, Err(SmppError::Validation(_))));
    }

    #[test]
    fn ucs2_splits_on_even_boundaries() {
        let parts = split_message(&text(300), SPLIT_UCS2, DataCoding::Ucs2);
        let lens: Vec<_> = parts.iter().map(Bytes::len).collect();
        assert_eq!(lens, vec![132, 132, 36]);
    }

    #[test]
    fn escape_never_ends_a_part() {
        let mut message = text(320);
        message[151] = GSM_ESCAPE;
        message[152] = b'e';

        let parts = split_message(&message, SPLIT_DEFAULT, DataCoding::SmscDefault);
        let lens: Vec<_> = parts.iter().map(Bytes::len).collect();
        assert_eq!(lens, vec![151, 152, 17]);
        assert_eq!(&parts[1][..2], &[GSM_ESCAPE, b'e']);
        assert_eq!(parts.concat(), message);

        // the same bytes in UCS-2 are chunked blindly
        let parts = split_message(&message, SPLIT_DEFAULT, DataCoding::Ucs2);
        assert_eq!(parts[0].len(), 152);
    }

    #[test]
    fn reference_wraps_past_limit() {
        let mut reference = CsmsReference::seeded(CsmsMethod::Udh8Bit, 254);
        assert_eq!(reference.next(), 255);
        assert_eq!(reference.next(), 0);
        assert_eq!(reference.next(), 1);

        let mut reference = CsmsReference::seeded(CsmsMethod::SarTags, u16::MAX);
        assert_eq!(reference.next(), 0);

        let mut reference = CsmsReference::new(CsmsMethod::Udh8Bit);
        let first = reference.next();
        let second = reference.next();
        assert_eq!(second, if first == 255 { 0 } else { first + 1 });
    }
}
