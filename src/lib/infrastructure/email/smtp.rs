//! SMTP transport backed by lettre

use std::collections::BTreeMap;
use std::time::Duration;

use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport as _};
use serde_json::Value;
use tracing::debug;

use crate::domain::mail::{MailOptions, MailTransport, SendMailError, Transport};

/// [`MailTransport`] implementation delivering over SMTP.
///
/// A fresh `SmtpTransport` is built per call from the resolved options, so
/// nothing is staged through shared state between concurrent sends.
#[derive(Debug, Default, Clone)]
pub struct SmtpMailer;

impl SmtpMailer {
    /// Creates a new SMTP mailer.
    pub fn new() -> Self {
        Self
    }

    /// Builds the transport for one send from a resolved set of options.
    ///
    /// `smtps` connects over implicit TLS; plain `smtp` upgrades via
    /// STARTTLS when the `mail.smtp.starttls.enable` property is true and
    /// otherwise connects in the clear. Credentials are attached only when
    /// auth is enabled. A `mail.<scheme>.timeout` property (milliseconds)
    /// bounds the connection.
    fn transport(&self, options: &MailOptions) -> Result<SmtpTransport, SendMailError> {
        let host = options
            .host()
            .ok_or(SendMailError::MissingField("host"))?;
        let props = options.mail_properties();
        let scheme = options.transport().scheme();

        let mut builder = match options.transport() {
            Transport::Smtps => SmtpTransport::relay(host)
                .map_err(|e| SendMailError::Transport(e.into()))?,
            Transport::Smtp
                if prop_is_true(&props, &format!("mail.{scheme}.starttls.enable")) =>
            {
                SmtpTransport::starttls_relay(host)
                    .map_err(|e| SendMailError::Transport(e.into()))?
            }
            Transport::Smtp => SmtpTransport::builder_dangerous(host),
        };

        builder = builder.port(options.port());

        if options.auth() {
            builder = builder.credentials(Credentials::new(
                options.username().unwrap_or_default().to_string(),
                options.password().unwrap_or_default().to_string(),
            ));
        }

        if let Some(ms) = props
            .get(&format!("mail.{scheme}.timeout"))
            .and_then(Value::as_u64)
        {
            builder = builder.timeout(Some(Duration::from_millis(ms)));
        }

        Ok(builder.build())
    }
}

impl MailTransport for SmtpMailer {
    fn send_message(
        &self,
        options: &MailOptions,
        message: &Message,
    ) -> Result<(), SendMailError> {
        let transport = self.transport(options)?;

        debug!(port = options.port(), "connecting to mail host");

        transport
            .send(message)
            .map(|_| ())
            .map_err(|e| SendMailError::Transport(e.into()))
    }
}

fn prop_is_true(props: &BTreeMap<String, Value>, key: &str) -> bool {
    match props.get(key) {
        Some(Value::Bool(enabled)) => *enabled,
        Some(Value::String(raw)) => raw.eq_ignore_ascii_case("true"),
        _ => false,
    }
}
