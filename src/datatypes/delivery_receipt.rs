// ABOUTME: SMSC delivery receipt text carried in a deliver_sm (SMPP v3.4 Appendix B)
// ABOUTME: Extracts id, counters, dates, final state and error code from the receipt text

use crate::datatypes::MessageState;
use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::bytes::Regex;

lazy_static! {
    static ref RECEIPT: Regex = Regex::new(
        r"(?si)^id:([^ ]+) sub:(\d{1,3}) dlvrd:(\d{3}) submit date:(\d{10,12}) done date:(\d{10,12}) stat:([A-Z ]{7}) err:(\d{2,3}) text:(.*)$"
    )
    .expect("valid delivery receipt regex");
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// The message id the SMSC returned from submit_sm.
    pub id: String,
    /// Number of short messages originally submitted.
    pub sub: u16,
    /// Number of short messages delivered.
    pub dlvrd: u16,
    pub submit_date: Option<DateTime<Utc>>,
    pub done_date: Option<DateTime<Utc>>,
    /// Final message state, e.g. `DELIVRD` or `UNDELIV`.
    pub stat: String,
    /// Network specific error code, as sent (e.g. `000`).
    pub err: String,
    /// First characters of the original message.
    pub text: String,
}

impl DeliveryReceipt {
    /// Parse receipt text; `None` if it does not follow the receipt layout.
    pub fn parse(content: &[u8]) -> Option<Self> {
        let caps = RECEIPT.captures(content)?;
        let text = |i: usize| {
            caps.get(i)
                .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
        };
        let number = |i: usize| text(i).and_then(|s| s.parse::<u16>().ok());

        Some(DeliveryReceipt {
            id: text(1)?,
            sub: number(2)?,
            dlvrd: number(3)?,
            submit_date: text(4).as_deref().and_then(parse_receipt_date),
            done_date: text(5).as_deref().and_then(parse_receipt_date),
            stat: text(6)?,
            err: text(7)?,
            text: text(8).unwrap_or_default(),
        })
    }

    /// The final state named by `stat`, if it is one of the standard values.
    pub fn state(&self) -> Option<MessageState> {
        let state = match self.stat.trim().to_ascii_uppercase().as_str() {
            "ENROUTE" => MessageState::Enroute,
            "DELIVRD" => MessageState::Delivered,
            "EXPIRED" => MessageState::Expired,
            "DELETED" => MessageState::Deleted,
            "UNDELIV" => MessageState::Undeliverable,
            "ACCEPTD" => MessageState::Accepted,
            "UNKNOWN" => MessageState::Unknown,
            "REJECTD" => MessageState::Rejected,
            _ => return None,
        };
        Some(state)
    }

    pub fn error_code(&self) -> Option<u16> {
        self.err.parse().ok()
    }

    pub fn is_delivered(&self) -> bool {
        self.state() == Some(MessageState::Delivered)
    }
}

/// `YYMMDDhhmm` or `YYMMDDhhmmss` in UTC, years counted from 2000.
pub fn parse_receipt_date(value: &str) -> Option<DateTime<Utc>> {
    if !matches!(value.len(), 10 | 12) || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let field = |at: usize| value.get(at..at + 2).and_then(|s| s.parse::<u32>().ok());
    let second = if value.len() == 12 { field(10)? } else { 0 };

    let at = NaiveDate::from_ymd_opt(2000 + field(0)? as i32, field(2)?, field(4)?)?
        .and_hms_opt(field(6)?, field(8)?, second)?;
    Some(at.and_utc())
}
