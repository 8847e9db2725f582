//! Transport seam

use lettre::Message;

#[cfg(test)]
use mockall::mock;

use super::errors::SendMailError;
use super::options::MailOptions;

/// Delivers a constructed message using the connection parameters carried
/// by a resolved set of options.
///
/// One call means one connect and one submission; implementations do not
/// retry. `options` is fully resolved, so `host`, `port` and `auth` (plus
/// credentials when auth is enabled) are authoritative.
pub trait MailTransport: Send + Sync + 'static {
    /// Connects and submits `message` to all of its recipients.
    fn send_message(&self, options: &MailOptions, message: &Message)
        -> Result<(), SendMailError>;
}

#[cfg(test)]
mock! {
    pub MailTransport {}

    impl MailTransport for MailTransport {
        fn send_message(&self, options: &MailOptions, message: &Message)
            -> Result<(), SendMailError>;
    }
}
