//! SMPP v3.4 ESME client.
//!
//! Binds to an SMSC as receiver or transmitter, submits (and transparently
//! segments) short messages, reads inbound messages and delivery receipts,
//! queries message state and keeps the link alive.
//!
//! ```rust,no_run
//! use smpp_esme::client::{ClientOptions, Session};
//! use smpp_esme::connection::{TcpConnection, Transport};
//! use std::time::Duration;
//!
//! # async fn example() -> smpp_esme::SmppResult<()> {
//! let mut connection = TcpConnection::new("smsc.example.com", 2775)
//!     .with_recv_timeout(Duration::from_secs(30));
//! connection.open().await?;
//!
//! let mut session = Session::new(connection, ClientOptions::default());
//! session.bind_receiver("system_id", "password").await?;
//!
//! while let Some(message) = session.read_sms().await? {
//!     match &message.receipt {
//!         Some(receipt) => println!("{} is {}", receipt.id, receipt.stat),
//!         None => println!("{} says {:?}", message.source, message.message),
//!     }
//! }
//! session.close().await
//! # }
//! ```

pub mod client;
pub mod codec;
pub mod connection;
pub mod datatypes;
pub mod frame;
pub mod segmenter;


// Re-export codec types for direct access
pub use codec::{CodecError, Pdu, PduHeader};

// Re-export the main client API for easy access
pub use client::{
    BindCredentials, BindMode, ClientBuilder, ClientOptions, Session, SmppError, SmppResult,
    SmsMessage,
};
pub use connection::{TcpConnection, Transport};
pub use segmenter::CsmsMethod;
