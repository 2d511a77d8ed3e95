// ABOUTME: Supporting types for SMPP client operations including credentials and message builders
// ABOUTME: Provides simplified interfaces for common SMPP operations with sensible defaults

use crate::client::error::{SmppError, SmppResult};
use crate::datatypes::{Address, CommandId, DataCoding, PriorityFlag, SmppDateTime, Tlv};
use bytes::Bytes;
use std::fmt;

/// SMPP bind operation credentials
///
/// Kept by the session after a successful bind so it can rebind on its own
/// when sequence numbers run out.
#[derive(Clone, PartialEq, Eq)]
pub struct BindCredentials {
    /// System identifier for authentication
    pub system_id: String,
    /// Password for authentication
    pub password: String,
}

impl BindCredentials {
    pub fn new(system_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            system_id: system_id.into(),
            password: password.into(),
        }
    }
}

// never print the password
impl fmt::Debug for BindCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindCredentials")
            .field("system_id", &self.system_id)
            .field("password", &"********")
            .finish()
    }
}

/// Bind state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindMode {
    #[default]
    Unbound,
    /// Bound as receiver (can receive deliver_sm)
    Receiver,
    /// Bound as transmitter (can send submit_sm)
    Transmitter,
}

impl BindMode {
    /// The bind command that enters this mode.
    pub fn bind_command(&self) -> Option<CommandId> {
        match self {
            BindMode::Unbound => None,
            BindMode::Receiver => Some(CommandId::BindReceiver),
            BindMode::Transmitter => Some(CommandId::BindTransmitter),
        }
    }

    pub fn is_bound(&self) -> bool {
        *self != BindMode::Unbound
    }
}

/// A short message ready to be submitted.
///
/// `message` is sent as-is: it must already be encoded in `options.data_coding`
/// (GSM 03.38 octets, UCS-2BE, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct SmsMessage {
    /// Source address
    pub from: Address,
    /// Destination address
    pub to: Address,
    /// Encoded message octets
    pub message: Bytes,
    /// Additional message options
    pub options: SmsOptions,
}

impl SmsMessage {
    /// Create a new SMS message with default options
    pub fn new(from: Address, to: Address, message: impl Into<Bytes>) -> Self {
        Self {
            from,
            to,
            message: message.into(),
            options: SmsOptions::default(),
        }
    }

    /// Create a builder for constructing SMS messages
    pub fn builder() -> SmsMessageBuilder {
        SmsMessageBuilder::default()
    }
}

/// Per-message settings, applied to every part of a segmented message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmsOptions {
    /// Optional parameters sent ahead of any concatenation tags
    pub tags: Vec<Tlv>,
    /// Data coding scheme
    pub data_coding: DataCoding,
    /// Message priority level
    pub priority: PriorityFlag,
    pub schedule_delivery_time: Option<SmppDateTime>,
    pub validity_period: Option<SmppDateTime>,
    /// Overrides the session's registered_delivery default
    pub registered_delivery: Option<u8>,
}

/// Builder for constructing SMS messages with fluent API
#[derive(Debug, Default)]
pub struct SmsMessageBuilder {
    to: Option<Address>,
    from: Option<Address>,
    message: Option<Bytes>,
    options: SmsOptions,
}

impl SmsMessageBuilder {
    /// Set destination address
    pub fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    /// Set source address
    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Set the already encoded message octets
    pub fn message(mut self, message: impl Into<Bytes>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set message text (ASCII/GSM-compatible text, sent as its UTF-8 octets)
    pub fn text(self, text: &str) -> Self {
        self.message(Bytes::copy_from_slice(text.as_bytes()))
    }

    /// Set message priority
    pub fn priority(mut self, priority: PriorityFlag) -> Self {
        self.options.priority = priority;
        self
    }

    /// Set data coding scheme
    pub fn data_coding(mut self, data_coding: DataCoding) -> Self {
        self.options.data_coding = data_coding;
        self
    }

    /// Append an optional parameter
    pub fn tag(mut self, tlv: Tlv) -> Self {
        self.options.tags.push(tlv);
        self
    }

    pub fn schedule_delivery_time(mut self, at: SmppDateTime) -> Self {
        self.options.schedule_delivery_time = Some(at);
        self
    }

    pub fn validity_period(mut self, until: SmppDateTime) -> Self {
        self.options.validity_period = Some(until);
        self
    }

    /// Request an SMSC delivery receipt
    pub fn with_delivery_receipt(mut self) -> Self {
        self.options.registered_delivery = Some(1);
        self
    }

    /// Build the SMS message
    pub fn build(self) -> SmppResult<SmsMessage> {
        let to = self
            .to
            .ok_or_else(|| SmppError::Validation("Destination address is required".into()))?;
        let from = self
            .from
            .ok_or_else(|| SmppError::Validation("Source address is required".into()))?;
        let message = self
            .message
            .ok_or_else(|| SmppError::Validation("Message text is required".into()))?;

        Ok(SmsMessage {
            from,
            to,
            message,
            options: self.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_addresses() {
        let err = SmsMessage::builder().text("hi").build().unwrap_err();
        assert!(matches!(err, SmppError::Validation(_)));
    }

    #[test]
    fn builder_collects_options() {
        let sms = SmsMessage::builder()
            .from(Address::alphanumeric("Shop").unwrap())
            .to(Address::international("4512345678").unwrap())
            .text("Your order shipped")
            .priority(PriorityFlag::Level2)
            .with_delivery_receipt()
            .build()
            .unwrap();

        assert_eq!(&sms.message[..], b"Your order shipped");
        assert_eq!(sms.options.priority, PriorityFlag::Level2);
        assert_eq!(sms.options.registered_delivery, Some(1));
        assert_eq!(sms.options.data_coding, DataCoding::SmscDefault);
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = BindCredentials::new("esme", "s3cret");
        assert!(!format!("{creds:?}").contains("s3cret"));
    }
}
