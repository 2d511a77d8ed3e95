// ABOUTME: One SMPP session: bind state, sequence numbers, pending frames and the public operations
// ABOUTME: Rebinds transparently when the sequence number space is exhausted

use crate::client::builder::ClientOptions;
use crate::client::error::{SmppError, SmppResult};
use crate::client::types::{BindCredentials, BindMode, SmsMessage};
use crate::codec::{Pdu, decode_cstring, encode_cstring, encode_octets, encode_time, encode_u8};
use crate::connection::Transport;
use crate::datatypes::{
    Address, CommandId, EsmClass, InboundMessage, QueryStatus, encode_query_sm,
};
use crate::segmenter::{self, CsmsReference, SubmitPart};
use bytes::{Bytes, BytesMut};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Sequence numbers at or above this value force a reconnect.
pub const MAX_SEQUENCE_NUMBER: u32 = 0x7FFF_FFFF;

const MAX_MESSAGE_ID_LENGTH: usize = 65;

/// An ESME session with an SMSC over transport `T`.
///
/// Every operation takes `&mut self`: a session is driven by one task at a
/// time and each call runs its request/response exchange to completion.
pub struct Session<T: Transport> {
    pub(crate) transport: T,
    pub(super) options: ClientOptions,
    pub(super) mode: BindMode,
    pub(crate) sequence_number: u32,
    /// Frames read while waiting for something else, oldest first.
    pub(super) pending: VecDeque<Pdu>,
    pub(super) csms_reference: CsmsReference,
    pub(super) credentials: Option<BindCredentials>,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, options: ClientOptions) -> Self {
        let csms_reference = CsmsReference::new(options.csms_method);
        Self {
            transport,
            options,
            mode: BindMode::Unbound,
            sequence_number: 1,
            pending: VecDeque::new(),
            csms_reference,
            credentials: None,
        }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn mode(&self) -> BindMode {
        self.mode
    }

    /// Sequence number the next command will carry.
    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    /// Number of received frames not yet consumed.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Bind as receiver. `Ok(false)` if the transport is not open.
    pub async fn bind_receiver(&mut self, system_id: &str, password: &str) -> SmppResult<bool> {
        self.bind(BindMode::Receiver, BindCredentials::new(system_id, password))
            .await
    }

    /// Bind as transmitter. `Ok(false)` if the transport is not open.
    pub async fn bind_transmitter(&mut self, system_id: &str, password: &str) -> SmppResult<bool> {
        self.bind(BindMode::Transmitter, BindCredentials::new(system_id, password))
            .await
    }

    async fn bind(&mut self, mode: BindMode, credentials: BindCredentials) -> SmppResult<bool> {
        let bound = self.bind_as(mode, credentials).await;
        self.renew_if_exhausted().await?;
        bound
    }

    async fn bind_as(&mut self, mode: BindMode, credentials: BindCredentials) -> SmppResult<bool> {
        if !self.transport.is_open() {
            return Ok(false);
        }
        if self.mode.is_bound() {
            return Err(SmppError::InvalidState(format!(
                "already bound as {:?}",
                self.mode
            )));
        }
        let Some(command_id) = mode.bind_command() else {
            return Err(SmppError::InvalidState("cannot bind as Unbound".into()));
        };

        let mut body = BytesMut::new();
        encode_cstring(&mut body, &credentials.system_id);
        encode_cstring(&mut body, &credentials.password);
        encode_cstring(&mut body, &self.options.system_type);
        encode_u8(&mut body, self.options.interface_version as u8);
        encode_u8(&mut body, self.options.addr_ton.into());
        encode_u8(&mut body, self.options.addr_npi.into());
        encode_cstring(&mut body, &self.options.address_range);

        match self.exchange(command_id, body.freeze()).await {
            Ok(_) => {}
            Err(SmppError::Command { status, .. }) => return Err(SmppError::Bind { status }),
            Err(e) => return Err(e),
        }

        debug!("Bound as {:?} with system_id {}", mode, credentials.system_id);
        self.mode = mode;
        self.credentials = Some(credentials);
        Ok(true)
    }

    /// Unbind (best effort) and close the transport.
    pub async fn close(&mut self) -> SmppResult<()> {
        if !self.transport.is_open() {
            self.mode = BindMode::Unbound;
            return Ok(());
        }

        if let Err(e) = self.exchange(CommandId::Unbind, Bytes::new()).await {
            warn!("Unbind failed, closing anyway: {}", e);
        } else {
            debug!("Unbound");
        }

        // unacknowledged frames go with the old session
        self.pending.clear();
        self.mode = BindMode::Unbound;
        if self.sequence_number >= MAX_SEQUENCE_NUMBER {
            self.sequence_number = 1;
        }
        self.transport.close().await?;
        Ok(())
    }

    /// Close, wait, reopen and rebind with the stored credentials.
    ///
    /// Frames still pending are dropped with the old session.
    pub(super) async fn reconnect(&mut self) -> SmppResult<()> {
        let mode = self.mode;
        let credentials = self.credentials.clone();
        debug!(
            "Sequence number {} exhausted, reconnecting as {:?}",
            self.sequence_number, mode
        );

        self.close().await?;
        tokio::time::sleep(self.options.reconnect_delay).await;
        self.transport.open().await?;
        self.sequence_number = 1;

        if let Some(credentials) = credentials.filter(|_| mode.is_bound()) {
            self.bind_as(mode, credentials).await?;
        }
        Ok(())
    }

    /// Submit `sms`, segmenting it when needed.
    ///
    /// Returns the message id the SMSC assigned to the last part.
    pub async fn send_sms(&mut self, sms: &SmsMessage) -> SmppResult<String> {
        let esm_class = EsmClass::from_byte(self.options.esm_class);
        let parts = segmenter::plan(
            &sms.message,
            sms.options.data_coding,
            esm_class,
            &sms.options.tags,
            self.options.csms_method,
            &mut self.csms_reference,
        )?;

        if parts.len() > 1 {
            debug!("Sending message to {} in {} parts", sms.to, parts.len());
        }

        let mut message_id = String::new();
        for part in &parts {
            let body = self.submit_body(sms, part)?;
            let response = self.send_command(CommandId::SubmitSm, body).await?;
            message_id = if response.body.is_empty() {
                String::new()
            } else {
                decode_cstring(&mut response.body.clone(), MAX_MESSAGE_ID_LENGTH, "message_id")?
            };
        }
        Ok(message_id)
    }

    fn submit_body(&self, sms: &SmsMessage, part: &SubmitPart) -> SmppResult<Bytes> {
        let options = &self.options;
        let sm_length = u8::try_from(part.short_message.len()).map_err(|_| {
            SmppError::Validation(format!(
                "short_message of {} octets exceeds 255",
                part.short_message.len()
            ))
        })?;

        let mut body = BytesMut::with_capacity(64 + part.short_message.len());
        encode_cstring(&mut body, &options.service_type);
        encode_address(&mut body, &sms.from);
        encode_address(&mut body, &sms.to);
        encode_u8(&mut body, part.esm_class.to_byte());
        encode_u8(&mut body, options.protocol_id);
        encode_u8(&mut body, sms.options.priority as u8);
        encode_time(&mut body, sms.options.schedule_delivery_time.as_ref());
        encode_time(&mut body, sms.options.validity_period.as_ref());
        encode_u8(
            &mut body,
            sms.options
                .registered_delivery
                .unwrap_or(options.registered_delivery),
        );
        encode_u8(&mut body, options.replace_if_present);
        encode_u8(&mut body, sms.options.data_coding.to_byte());
        encode_u8(&mut body, options.sm_default_msg_id);
        encode_u8(&mut body, sm_length);
        encode_octets(&mut body, &part.short_message, options.null_terminate_octets);
        for tlv in &part.tags {
            tlv.encode(&mut body);
        }
        Ok(body.freeze())
    }

    /// Ask the SMSC for the state of a submitted message.
    ///
    /// `source` must match the source address of the original submission.
    /// `Ok(None)` if the transport is not open.
    pub async fn query_status(
        &mut self,
        message_id: &str,
        source: &Address,
    ) -> SmppResult<Option<QueryStatus>> {
        if !self.transport.is_open() {
            return Ok(None);
        }
        let body = encode_query_sm(message_id, source);
        let response = self.send_command(CommandId::QuerySm, body).await?;
        Ok(Some(QueryStatus::decode(&response.body)?))
    }

    /// Wait for the next deliver_sm, parse it and acknowledge it.
    ///
    /// Keep-alives arriving meanwhile are answered; other frames are queued.
    /// `Ok(None)` when the transport yields nothing before its timeout.
    pub async fn read_sms(&mut self) -> SmppResult<Option<InboundMessage>> {
        let pdu = match self.take_pending(|pdu| pdu.is(CommandId::DeliverSm)) {
            Some(pdu) => pdu,
            None => loop {
                match self.read_frame().await? {
                    None => return Ok(None),
                    Some(pdu) if pdu.is(CommandId::DeliverSm) => break pdu,
                    Some(pdu) if pdu.is(CommandId::EnquireLink) => self.acknowledge(&pdu).await?,
                    Some(pdu) => self.queue(pdu),
                }
            },
        };

        let message = InboundMessage::parse(&pdu)?;
        self.acknowledge(&pdu).await?;
        Ok(Some(message))
    }
}

fn encode_address(buf: &mut BytesMut, address: &Address) {
    encode_u8(buf, address.ton().into());
    encode_u8(buf, address.npi().into());
    encode_cstring(buf, address.value());
}
