//! Mail dispatcher

use std::sync::Arc;

use tracing::debug;

use super::defaults::DefaultSource;
use super::errors::SendMailError;
use super::merge::merge;
use super::message::build_message;
use super::options::MailOptions;
use super::transport::MailTransport;

/// Entry point for sending mail.
pub trait MailHandler: Send + Sync {
    /// Resolves `options` against the configured defaults and sends the
    /// resulting message.
    ///
    /// Blocking: the call suspends for the duration of the transport round
    /// trip. Errors surface synchronously; there is no retry and no
    /// partial success.
    fn send_mail(&self, options: &MailOptions) -> Result<(), SendMailError>;
}

/// Dispatcher resolving per-call options against a [`DefaultSource`] and
/// delivering through a [`MailTransport`].
///
/// The default source is only ever read, so a dispatcher can be shared
/// across threads; each send owns its message and transport session
/// exclusively.
#[derive(Debug, Clone)]
pub struct MailDispatcher<D, T>
where
    D: DefaultSource,
    T: MailTransport,
{
    defaults: Arc<D>,
    transport: Arc<T>,
}

impl<D, T> MailDispatcher<D, T>
where
    D: DefaultSource,
    T: MailTransport,
{
    /// Creates a new dispatcher.
    pub fn new(defaults: Arc<D>, transport: Arc<T>) -> Self {
        Self {
            defaults,
            transport,
        }
    }
}

impl<D, T> MailHandler for MailDispatcher<D, T>
where
    D: DefaultSource,
    T: MailTransport,
{
    fn send_mail(&self, options: &MailOptions) -> Result<(), SendMailError> {
        let resolved = merge(options, self.defaults.as_ref())?;

        if resolved.host().is_none() {
            return Err(SendMailError::MissingField("host"));
        }
        if resolved.to().is_none() {
            return Err(SendMailError::MissingField("to"));
        }

        let message = build_message(&resolved)?;

        debug!(
            transport = resolved.transport().scheme(),
            port = resolved.port(),
            "dispatching mail"
        );

        self.transport.send_message(&resolved, &message)
    }
}
