// ABOUTME: Session configuration and convenience constructors for TCP sessions
// ABOUTME: ClientOptions holds bind and submit defaults; ClientBuilder connects and binds in one call

use crate::client::error::SmppResult;
use crate::client::session::Session;
use crate::connection::{TcpConnection, Transport};
use crate::datatypes::{InterfaceVersion, NumericPlanIndicator, TypeOfNumber};
use crate::segmenter::CsmsMethod;
use std::time::Duration;

/// Immutable settings of one session.
///
/// Bind fields go into every bind_receiver/bind_transmitter; submit fields
/// into every submit_sm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub system_type: String,
    pub interface_version: InterfaceVersion,
    pub addr_ton: TypeOfNumber,
    pub addr_npi: NumericPlanIndicator,
    pub address_range: String,

    pub service_type: String,
    pub esm_class: u8,
    pub protocol_id: u8,
    pub registered_delivery: u8,
    pub replace_if_present: u8,
    pub sm_default_msg_id: u8,

    /// How messages longer than one submit_sm are delivered
    pub csms_method: CsmsMethod,
    /// Append a NUL after short_message (not counted in sm_length)
    pub null_terminate_octets: bool,
    /// Pause between closing and reopening when sequence numbers run out
    pub reconnect_delay: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            system_type: "WWW".to_string(),
            interface_version: InterfaceVersion::SmppV34,
            addr_ton: TypeOfNumber::Unknown,
            addr_npi: NumericPlanIndicator::Unknown,
            address_range: String::new(),
            service_type: String::new(),
            esm_class: 0x00,
            protocol_id: 0x00,
            registered_delivery: 0x00,
            replace_if_present: 0x00,
            sm_default_msg_id: 0x00,
            csms_method: CsmsMethod::SarTags,
            null_terminate_octets: true,
            reconnect_delay: Duration::from_secs(1),
        }
    }
}

impl ClientOptions {
    /// Create new client options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_type(mut self, system_type: impl Into<String>) -> Self {
        self.system_type = system_type.into();
        self
    }

    pub fn with_interface_version(mut self, version: InterfaceVersion) -> Self {
        self.interface_version = version;
        self
    }

    /// TON/NPI and address range the SMSC should route to a receiver bind
    pub fn with_address_range(
        mut self,
        ton: TypeOfNumber,
        npi: NumericPlanIndicator,
        range: impl Into<String>,
    ) -> Self {
        self.addr_ton = ton;
        self.addr_npi = npi;
        self.address_range = range.into();
        self
    }

    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    pub fn with_esm_class(mut self, esm_class: u8) -> Self {
        self.esm_class = esm_class;
        self
    }

    pub fn with_protocol_id(mut self, protocol_id: u8) -> Self {
        self.protocol_id = protocol_id;
        self
    }

    pub fn with_registered_delivery(mut self, registered_delivery: u8) -> Self {
        self.registered_delivery = registered_delivery;
        self
    }

    pub fn with_replace_if_present(mut self, replace_if_present: u8) -> Self {
        self.replace_if_present = replace_if_present;
        self
    }

    pub fn with_sm_default_msg_id(mut self, sm_default_msg_id: u8) -> Self {
        self.sm_default_msg_id = sm_default_msg_id;
        self
    }

    pub fn with_csms_method(mut self, method: CsmsMethod) -> Self {
        self.csms_method = method;
        self
    }

    pub fn with_null_terminate_octets(mut self, enabled: bool) -> Self {
        self.null_terminate_octets = enabled;
        self
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }
}

/// Factory for TCP sessions
///
/// Opens the connection and, for the bind helpers, binds in a single call.
pub struct ClientBuilder;

impl ClientBuilder {
    /// Open a TCP session without binding
    pub async fn connect(
        connection: TcpConnection,
        options: ClientOptions,
    ) -> SmppResult<Session<TcpConnection>> {
        let mut connection = connection;
        connection.open().await?;
        Ok(Session::new(connection, options))
    }

    /// Connect to `host:port` and bind as transmitter (can send SMS)
    pub async fn transmitter(
        host: impl Into<String>,
        port: u16,
        system_id: &str,
        password: &str,
        options: ClientOptions,
    ) -> SmppResult<Session<TcpConnection>> {
        let mut session = Self::connect(TcpConnection::new(host, port), options).await?;
        session.bind_transmitter(system_id, password).await?;
        Ok(session)
    }

    /// Connect to `host:port` and bind as receiver (can read SMS and receipts)
    pub async fn receiver(
        host: impl Into<String>,
        port: u16,
        system_id: &str,
        password: &str,
        options: ClientOptions,
    ) -> SmppResult<Session<TcpConnection>> {
        let mut session = Self::connect(TcpConnection::new(host, port), options).await?;
        session.bind_receiver(system_id, password).await?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ClientOptions::default();
        assert_eq!(options.system_type, "WWW");
        assert_eq!(options.interface_version, InterfaceVersion::SmppV34);
        assert_eq!(options.csms_method, CsmsMethod::SarTags);
        assert!(options.null_terminate_octets);
        assert_eq!(options.reconnect_delay, Duration::from_secs(1));
    }

    #[test]
    fn with_methods_override() {
        let options = ClientOptions::new()
            .with_system_type("")
            .with_csms_method(CsmsMethod::Udh8Bit)
            .with_null_terminate_octets(false)
            .with_address_range(TypeOfNumber::International, NumericPlanIndicator::Isdn, "^45");
        assert_eq!(options.system_type, "");
        assert_eq!(options.csms_method, CsmsMethod::Udh8Bit);
        assert!(!options.null_terminate_octets);
        assert_eq!(options.address_range, "^45");
        assert_eq!(options.addr_ton, TypeOfNumber::International);
    }
}
