//! SMPP v3.4 framing over a [`Transport`]
//!
//! A frame is read in three steps: the 4-byte command_length, the remaining
//! 12 header bytes, then `command_length - 16` body bytes. Only a missing
//! length prefix counts as "no frame"; once a frame has started, a short read
//! is an error. A header declaring more than [`MAX_PDU_SIZE`] closes the
//! transport.
//!
//! [`MAX_PDU_SIZE`]: crate::codec::MAX_PDU_SIZE

use crate::client::error::{SmppError, SmppResult};
use crate::codec::{CodecError, Pdu, PduHeader};
use crate::connection::Transport;
use bytes::{BufMut, Bytes, BytesMut};
use std::io;
use tracing::{trace, warn};

/// Read one PDU, or `None` if nothing arrived before the transport gave up.
pub async fn read_pdu<T: Transport>(transport: &mut T) -> SmppResult<Option<Pdu>> {
    let Some(length) = transport.read(4).await? else {
        return Ok(None);
    };

    let rest = transport
        .read_all(PduHeader::SIZE - 4)
        .await
        .map_err(short_read)?;

    let mut header = BytesMut::with_capacity(PduHeader::SIZE);
    header.put_slice(&length);
    header.put_slice(&rest);
    let header = match PduHeader::decode(&mut header.freeze()) {
        Ok(header) => header,
        Err(e) => {
            // the declared body is still unread, so the stream can no longer be framed
            warn!("Closing transport on unreadable header: {}", e);
            transport.close().await?;
            return Err(e.into());
        }
    };

    let body = match header.body_len() {
        0 => Bytes::new(),
        len => transport.read_all(len).await.map_err(short_read)?,
    };

    let pdu = Pdu::from_header(header, body);
    trace!("<< {:?} body={}", pdu, hex::encode(&pdu.body));
    Ok(Some(pdu))
}

/// Encode and transmit one PDU.
pub async fn write_pdu<T: Transport>(transport: &mut T, pdu: &Pdu) -> SmppResult<()> {
    trace!(">> {:?} body={}", pdu, hex::encode(&pdu.body));
    transport.write(&pdu.encode()).await?;
    Ok(())
}

fn short_read(err: io::Error) -> SmppError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        SmppError::Framing(CodecError::Incomplete)
    } else {
        SmppError::Connection(err)
    }
}
