// ABOUTME: Byte-stream transport consumed by the SMPP session, plus its TCP implementation
// ABOUTME: Timeouts live here; the session only sees "data" or "no data"

use bytes::{Bytes, BytesMut};
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// A reliable, ordered byte stream to an SMSC.
///
/// `read` reports "nothing arrived before the receive timeout" and "peer
/// closed the stream" alike as `Ok(None)`; `read_all` turns either into an
/// `UnexpectedEof` error for callers that cannot tolerate a short read.
pub trait Transport: Send {
    fn is_open(&self) -> bool;

    fn open(&mut self) -> impl Future<Output = io::Result<()>> + Send;

    fn close(&mut self) -> impl Future<Output = io::Result<()>> + Send;

    /// Whether bytes can be read right now without waiting.
    fn has_data(&mut self) -> impl Future<Output = io::Result<bool>> + Send;

    /// Exactly `len` bytes, or `None` on timeout or end of stream.
    fn read(&mut self, len: usize) -> impl Future<Output = io::Result<Option<Bytes>>> + Send;

    /// Exactly `len` bytes, failing if they do not all arrive.
    fn read_all(&mut self, len: usize) -> impl Future<Output = io::Result<Bytes>> + Send {
        async move {
            self.read(len).await?.ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("stream ended before {len} bytes arrived"),
                )
            })
        }
    }

    fn write(&mut self, buf: &[u8]) -> impl Future<Output = io::Result<()>> + Send;
}

/// TCP transport with connect, send and receive timeouts.
#[derive(Debug)]
pub struct TcpConnection {
    host: String,
    port: u16,
    connect_timeout: Duration,
    send_timeout: Duration,
    recv_timeout: Duration,

    // The `TcpStream`, decorated with a `BufWriter` for write level
    // buffering. `None` while closed.
    stream: Option<BufWriter<TcpStream>>,

    // Bytes received but not yet handed out by `read`.
    buffer: BytesMut,
}

impl TcpConnection {
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create an unopened connection to `host:port` with default timeouts.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            send_timeout: Self::DEFAULT_SEND_TIMEOUT,
            recv_timeout: Self::DEFAULT_RECV_TIMEOUT,
            stream: None,
            buffer: BytesMut::with_capacity(4 * 1024),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    pub fn with_recv_timeout(mut self, timeout: Duration) -> Self {
        self.recv_timeout = timeout;
        self
    }

    pub fn recv_timeout(&self) -> Duration {
        self.recv_timeout
    }
}

impl Transport for TcpConnection {
    fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    async fn open(&mut self) -> io::Result<()> {
        let addr = (self.host.as_str(), self.port);
        let socket = timeout(self.connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| {
                io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("connect to {}:{} timed out", self.host, self.port),
                )
            })??;
        socket.set_nodelay(true)?;

        debug!("Connected to {}:{}", self.host, self.port);
        self.stream = Some(BufWriter::new(socket));
        self.buffer.clear();
        Ok(())
    }

    async fn close(&mut self) -> io::Result<()> {
        self.buffer.clear();
        match self.stream.take() {
            Some(mut stream) => {
                debug!("Closing connection to {}:{}", self.host, self.port);
                stream.shutdown().await
            }
            None => Ok(()),
        }
    }

    async fn has_data(&mut self) -> io::Result<bool> {
        if !self.buffer.is_empty() {
            return Ok(true);
        }
        let Some(stream) = self.stream.as_mut() else {
            return Ok(false);
        };

        match stream.get_ref().try_read_buf(&mut self.buffer) {
            Ok(0) => {
                // peer closed the stream
                self.stream = None;
                Ok(false)
            }
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn read(&mut self, len: usize) -> io::Result<Option<Bytes>> {
        while self.buffer.len() < len {
            let Some(stream) = self.stream.as_mut() else {
                return Ok(None);
            };

            let received = timeout(self.recv_timeout, stream.read_buf(&mut self.buffer)).await;
            match received {
                Err(_elapsed) => return Ok(None),
                Ok(Ok(0)) => {
                    debug!("Connection closed by {}:{}", self.host, self.port);
                    self.stream = None;
                    return Ok(None);
                }
                Ok(Ok(_)) => {}
                Ok(Err(e)) => return Err(e),
            }
        }

        Ok(Some(self.buffer.split_to(len).freeze()))
    }

    async fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "connection is not open",
            ));
        };

        let send = async {
            stream.write_all(buf).await?;
            stream.flush().await
        };

        timeout(self.send_timeout, send).await.map_err(|_| {
            io::Error::new(io::ErrorKind::TimedOut, "send timed out")
        })?
    }
}
