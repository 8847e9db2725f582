//! Mail dispatch module.

mod defaults;
mod dispatcher;
mod errors;
mod merge;
mod message;
mod options;
mod transport;

pub use defaults::{DefaultSource, NAMESPACE};
pub use dispatcher::{MailDispatcher, MailHandler};
pub use errors::SendMailError;
pub use merge::merge;
pub use message::build_message;
pub use options::{
    MailOptions, MailOptionsBuilder, MimeType, Transport, DEFAULT_MAILER, DEFAULT_PORT,
};
pub use transport::MailTransport;
