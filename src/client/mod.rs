// ABOUTME: SMPP ESME client module: session state machine, PDU exchange and configuration
// ABOUTME: Exports the session, its options, error types and message builders

//! SMPP Client Module
//!
//! A [`Session`] drives one SMPP v3.4 session over any [`Transport`]:
//!
//! * **Bind** as receiver or transmitter with [`ClientOptions`] defaults
//! * **Send** short messages, segmented transparently when too long
//! * **Receive** mobile originated messages and delivery receipts
//! * **Keep alive** by sending and answering enquire_link
//! * **Reconnect** inline when sequence numbers are exhausted
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use smpp_esme::client::{ClientBuilder, ClientOptions, SmsMessage};
//! use smpp_esme::datatypes::Address;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = ClientBuilder::transmitter(
//!     "localhost",
//!     2775,
//!     "system_id",
//!     "password",
//!     ClientOptions::default(),
//! )
//! .await?;
//!
//! let sms = SmsMessage::new(
//!     Address::alphanumeric("MyBrand")?,
//!     Address::international("4512345678")?,
//!     &b"Hello!"[..],
//! );
//! let message_id = session.send_sms(&sms).await?;
//! println!("submitted as {message_id}");
//!
//! session.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`Transport`]: crate::connection::Transport

pub mod builder;
pub mod error;
mod exchange;
pub mod session;
pub mod types;

// Re-export the main types for easy access
pub use builder::{ClientBuilder, ClientOptions};
pub use error::{SmppError, SmppResult};
pub use session::{MAX_SEQUENCE_NUMBER, Session};
pub use types::{BindCredentials, BindMode, SmsMessage, SmsMessageBuilder, SmsOptions};
