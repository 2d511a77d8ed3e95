// ABOUTME: SMPP client error types for comprehensive error handling across all client operations
// ABOUTME: Provides structured error reporting with automatic conversion from underlying I/O and protocol errors

use crate::codec::CodecError;
use crate::datatypes::{AddressError, CommandStatus, DateTimeError, TlvError};
use std::io;
use thiserror::Error;

/// Comprehensive error type for SMPP client operations
///
/// Status-carrying variants render the SMPP description of the status code,
/// so `to_string()` on a rejected bind reads e.g. "Bind failed: Invalid Password (0xe)".
#[derive(Debug, Error)]
pub enum SmppError {
    /// I/O error during network operations (connection, read, write)
    #[error("Connection error: {0}")]
    Connection(#[from] io::Error),

    /// Data validation error (oversized message, malformed address, bad TLV, etc.)
    #[error("Invalid data: {0}")]
    Validation(String),

    /// The bytes on the wire do not form a valid PDU
    #[error("Framing error: {0}")]
    Framing(#[from] CodecError),

    #[error("Bind failed: {} ({status:#x})", status_text(.status))]
    Bind { status: u32 },

    #[error("Command {command_id:#010x} failed: {} ({status:#x})", status_text(.status))]
    Command { command_id: u32, status: u32 },

    /// The peer went quiet or hung up while a response was awaited
    #[error("Transport error: {0}")]
    Transport(String),

    /// An inbound message could not be understood; `body_hex` is the raw PDU body
    #[error("Parse error: {message} (body: {body_hex})")]
    Parse { message: String, body_hex: String },

    /// Client not in correct state for operation
    #[error("Invalid client state: {0}")]
    InvalidState(String),
}

impl SmppError {
    /// The SMPP command_status carried by this error, if any.
    pub fn status(&self) -> Option<u32> {
        match self {
            SmppError::Bind { status } | SmppError::Command { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<AddressError> for SmppError {
    fn from(err: AddressError) -> Self {
        SmppError::Validation(err.to_string())
    }
}

impl From<DateTimeError> for SmppError {
    fn from(err: DateTimeError) -> Self {
        SmppError::Validation(err.to_string())
    }
}

impl From<TlvError> for SmppError {
    fn from(err: TlvError) -> Self {
        SmppError::Validation(err.to_string())
    }
}

fn status_text(status: &u32) -> &'static str {
    CommandStatus::describe(*status)
}

/// Result type alias for SMPP operations
pub type SmppResult<T> = Result<T, SmppError>;
