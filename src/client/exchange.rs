// ABOUTME: Request/response correlation and keep-alive handling for a session
// ABOUTME: Frames that arrive out of turn are parked in the pending queue, oldest first

use crate::client::error::{SmppError, SmppResult};
use crate::client::session::{MAX_SEQUENCE_NUMBER, Session};
use crate::codec::Pdu;
use crate::connection::Transport;
use crate::datatypes::CommandId;
use crate::frame::{read_pdu, write_pdu};
use bytes::Bytes;
use tracing::{debug, trace, warn};

/// Body of the responses this client sends for keep-alives and deliveries.
const ACK_BODY: &[u8] = &[0x00];

impl<T: Transport> Session<T> {
    /// Send a command and wait for its response, reconnecting afterwards if
    /// the sequence numbers have run out.
    ///
    /// The check runs whether or not the SMSC accepted the command, so an
    /// error reply can never carry the counter past [`MAX_SEQUENCE_NUMBER`].
    pub(super) async fn send_command(
        &mut self,
        command_id: CommandId,
        body: Bytes,
    ) -> SmppResult<Pdu> {
        let result = self.exchange(command_id, body).await;
        self.renew_if_exhausted().await?;
        result
    }

    pub(super) async fn renew_if_exhausted(&mut self) -> SmppResult<()> {
        if self.sequence_number >= MAX_SEQUENCE_NUMBER {
            self.reconnect().await?;
        }
        Ok(())
    }

    /// Send a command at the current sequence number and wait for its response.
    ///
    /// The sequence number advances once a response has been correlated,
    /// whatever its status. Never reconnects: the reconnect itself is built
    /// on this.
    pub(super) async fn exchange(&mut self, command_id: CommandId, body: Bytes) -> SmppResult<Pdu> {
        if !self.transport.is_open() {
            return Err(SmppError::Transport(format!(
                "cannot send {command_id:?}: transport is not open"
            )));
        }

        let sequence_number = self.sequence_number;
        let request = Pdu::new(command_id, sequence_number, body);
        write_pdu(&mut self.transport, &request).await?;

        let response = self
            .await_response(command_id as u32, sequence_number)
            .await?;
        self.sequence_number = self.sequence_number.wrapping_add(1);

        if !response.is_ok() {
            return Err(SmppError::Command {
                command_id: command_id as u32,
                status: response.command_status,
            });
        }
        Ok(response)
    }

    async fn await_response(&mut self, command_id: u32, sequence_number: u32) -> SmppResult<Pdu> {
        if let Some(pdu) = self.take_pending(|pdu| pdu.answers(command_id, sequence_number)) {
            return Ok(pdu);
        }

        loop {
            match self.read_frame().await? {
                Some(pdu) if pdu.answers(command_id, sequence_number) => return Ok(pdu),
                Some(pdu) => self.queue(pdu),
                None => {
                    return Err(SmppError::Transport(format!(
                        "no response to command {command_id:#010x} (sequence {sequence_number})"
                    )));
                }
            }
        }
    }

    /// Send enquire_link and wait for the SMSC to answer it.
    pub async fn enquire_link(&mut self) -> SmppResult<Pdu> {
        self.send_command(CommandId::EnquireLink, Bytes::new()).await
    }

    /// Answer every enquire_link the SMSC has sent.
    ///
    /// Queued enquire_links are answered first; then, if the transport has
    /// data waiting, one more frame is read and answered or queued.
    pub async fn respond_enquire_link(&mut self) -> SmppResult<()> {
        while let Some(request) = self.take_pending(|pdu| pdu.is(CommandId::EnquireLink)) {
            self.acknowledge(&request).await?;
        }

        if self.transport.has_data().await? {
            match self.read_frame().await? {
                Some(pdu) if pdu.is(CommandId::EnquireLink) => self.acknowledge(&pdu).await?,
                Some(pdu) => self.queue(pdu),
                None => {}
            }
        }
        Ok(())
    }

    pub(super) async fn read_frame(&mut self) -> SmppResult<Option<Pdu>> {
        read_pdu(&mut self.transport).await
    }

    /// Send the successful response to `request`.
    pub(super) async fn acknowledge(&mut self, request: &Pdu) -> SmppResult<()> {
        let response = Pdu::response_to(request, Bytes::from_static(ACK_BODY));
        trace!("Acknowledging {:?}", request);
        write_pdu(&mut self.transport, &response).await
    }

    /// Remove and return the oldest pending frame matching `predicate`.
    pub(super) fn take_pending(&mut self, predicate: impl Fn(&Pdu) -> bool) -> Option<Pdu> {
        let position = self.pending.iter().position(predicate)?;
        self.pending.remove(position)
    }

    pub(super) fn queue(&mut self, pdu: Pdu) {
        match pdu.command() {
            Some(id) if !id.is_response() => debug!("Queued {:?} for later", pdu),
            _ => warn!("Queued unsolicited {:?}", pdu),
        }
        self.pending.push_back(pdu);
    }
}
