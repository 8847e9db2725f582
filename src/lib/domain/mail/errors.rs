//! Mail dispatch errors

use std::io;
use std::path::PathBuf;

use lettre::address::AddressError;
use lettre::error::Error as MessageError;
use lettre::message::header::ContentTypeErr;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while resolving options or sending a message
#[derive(Debug, Error)]
pub enum SendMailError {
    /// A required option was blank after merging defaults
    #[error("'{0}' must not be blank")]
    MissingField(&'static str),

    /// An address field could not be parsed
    #[error("invalid email address")]
    InvalidAddress,

    /// An unrecognized transport name in caller input or defaults
    #[error("unknown transport '{0}'")]
    UnknownTransport(String),

    /// An unrecognized MIME type name in caller input or defaults
    #[error("unknown mime type '{0}'")]
    UnknownMimeType(String),

    /// A configured port outside the valid range
    #[error("port {0} is out of range")]
    InvalidPort(i64),

    /// An attachment path could not be read
    #[error("could not read attachment '{}'", .path.display())]
    Attachment {
        /// The attachment path that failed
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A failure while constructing or submitting the message
    #[error("could not send the email")]
    Transport(#[source] anyhow::Error),
}

impl From<anyhow::Error> for SendMailError {
    fn from(err: anyhow::Error) -> Self {
        SendMailError::Transport(err)
    }
}

impl From<AddressError> for SendMailError {
    fn from(_err: AddressError) -> Self {
        debug!("AddressError -> SendMailError");

        SendMailError::InvalidAddress
    }
}

impl From<MessageError> for SendMailError {
    fn from(err: MessageError) -> Self {
        debug!("lettre message error -> SendMailError");

        SendMailError::Transport(err.into())
    }
}

impl From<ContentTypeErr> for SendMailError {
    fn from(err: ContentTypeErr) -> Self {
        SendMailError::Transport(err.into())
    }
}
