//! Mail option values

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::SendMailError;

/// Mailer identity used when none is configured
pub const DEFAULT_MAILER: &str = "Mail Dispatch Service";

/// Port used when none is configured
pub const DEFAULT_PORT: u16 = 25;

/// The mechanism used to deliver a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Plain SMTP
    Smtp,

    /// SMTP over implicit TLS
    Smtps,
}

impl Transport {
    /// Returns the lowercased transport name used as the
    /// transport-properties namespace (e.g. `mail.smtp.host`).
    pub fn scheme(&self) -> &'static str {
        match self {
            Transport::Smtp => "smtp",
            Transport::Smtps => "smtps",
        }
    }
}

impl FromStr for Transport {
    type Err = SendMailError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "smtp" => Ok(Transport::Smtp),
            "smtps" => Ok(Transport::Smtps),
            _ => Err(SendMailError::UnknownTransport(raw.to_string())),
        }
    }
}

/// MIME type of the message's text part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MimeType {
    /// `text/plain`
    Text,

    /// `text/html`
    Html,
}

impl MimeType {
    /// Returns the MIME content-type code for this type.
    pub fn code(&self) -> &'static str {
        match self {
            MimeType::Text => "text/plain",
            MimeType::Html => "text/html",
        }
    }
}

impl FromStr for MimeType {
    type Err = SendMailError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "text" => Ok(MimeType::Text),
            "html" => Ok(MimeType::Html),
            _ => Err(SendMailError::UnknownMimeType(raw.to_string())),
        }
    }
}

/// One mail-send request, fully or partially specified.
///
/// Immutable once built; fields that carry a hard-coded default resolve it
/// through their accessor, while the merge engine still sees which fields
/// were never set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailOptions {
    pub(crate) mailer: Option<String>,
    pub(crate) transport: Option<Transport>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) auth: Option<bool>,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) from: Option<String>,
    pub(crate) to: Option<String>,
    pub(crate) cc: Option<String>,
    pub(crate) bcc: Option<String>,
    pub(crate) subject: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) mime_type: Option<MimeType>,
    pub(crate) attachments: Vec<PathBuf>,
    pub(crate) props: BTreeMap<String, Value>,
}

impl MailOptions {
    /// Returns a builder for a new set of options.
    pub fn builder() -> MailOptionsBuilder {
        MailOptionsBuilder::default()
    }

    /// The identity written into the outgoing `X-Mailer` header.
    pub fn mailer(&self) -> &str {
        self.mailer.as_deref().unwrap_or(DEFAULT_MAILER)
    }

    /// The transport kind used to deliver the message.
    pub fn transport(&self) -> Transport {
        self.transport.unwrap_or(Transport::Smtp)
    }

    /// The mail host, if one was set.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The mail host port.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Whether the transport should authenticate when connecting.
    pub fn auth(&self) -> bool {
        self.auth.unwrap_or(false)
    }

    /// The username presented when [`auth`](Self::auth) is enabled.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The password presented when [`auth`](Self::auth) is enabled.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// The sender address.
    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    /// The recipient address(es), comma-separated.
    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    /// The carbon-copy address(es), comma-separated.
    pub fn cc(&self) -> Option<&str> {
        self.cc.as_deref()
    }

    /// The blind-carbon-copy address(es), comma-separated.
    pub fn bcc(&self) -> Option<&str> {
        self.bcc.as_deref()
    }

    /// The message subject.
    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("")
    }

    /// The message body text.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// The MIME type of the message body.
    pub fn mime_type(&self) -> MimeType {
        self.mime_type.unwrap_or(MimeType::Text)
    }

    /// Filesystem paths attached to the message, in order.
    pub fn attachments(&self) -> &[PathBuf] {
        &self.attachments
    }

    /// Free-form transport properties.
    pub fn props(&self) -> &BTreeMap<String, Value> {
        &self.props
    }

    /// Returns the transport properties for these options: the free-form
    /// props overlaid with the `mail.<scheme>.host`, `mail.<scheme>.port`
    /// and, when auth is enabled, `mail.<scheme>.auth` connection keys.
    pub fn mail_properties(&self) -> BTreeMap<String, Value> {
        let scheme = self.transport().scheme();
        let mut props = self.props.clone();

        if let Some(host) = self.host() {
            props.insert(format!("mail.{scheme}.host"), Value::from(host));
        }
        props.insert(format!("mail.{scheme}.port"), Value::from(self.port()));
        if self.auth() {
            props.insert(format!("mail.{scheme}.auth"), Value::from("true"));
        }

        props
    }
}

/// Fluent builder for [`MailOptions`].
///
/// Performs no validation; a blank `to` or `host` is only rejected by the
/// dispatcher once defaults have been merged in.
#[derive(Debug, Clone, Default)]
pub struct MailOptionsBuilder {
    options: MailOptions,
}

impl MailOptionsBuilder {
    /// Sets the `X-Mailer` identity.
    pub fn mailer(mut self, mailer: impl Into<String>) -> Self {
        self.options.mailer = Some(mailer.into());
        self
    }

    /// Sets the transport kind.
    pub fn transport(mut self, transport: Transport) -> Self {
        self.options.transport = Some(transport);
        self
    }

    /// Sets the mail host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.options.host = Some(host.into());
        self
    }

    /// Sets the mail host port.
    pub fn port(mut self, port: u16) -> Self {
        self.options.port = Some(port);
        self
    }

    /// Enables or disables transport authentication.
    pub fn auth(mut self, auth: bool) -> Self {
        self.options.auth = Some(auth);
        self
    }

    /// Sets the username used when authenticating.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.options.username = Some(username.into());
        self
    }

    /// Sets the password used when authenticating.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.options.password = Some(password.into());
        self
    }

    /// Sets the sender address.
    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.options.from = Some(from.into());
        self
    }

    /// Sets the recipient address(es), comma-separated.
    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.options.to = Some(to.into());
        self
    }

    /// Sets the carbon-copy address(es), comma-separated.
    pub fn cc(mut self, cc: impl Into<String>) -> Self {
        self.options.cc = Some(cc.into());
        self
    }

    /// Sets the blind-carbon-copy address(es), comma-separated.
    pub fn bcc(mut self, bcc: impl Into<String>) -> Self {
        self.options.bcc = Some(bcc.into());
        self
    }

    /// Sets the message subject.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.options.subject = Some(subject.into());
        self
    }

    /// Sets the message body text.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.options.content = Some(content.into());
        self
    }

    /// Sets the MIME type of the message body.
    pub fn mime_type(mut self, mime_type: MimeType) -> Self {
        self.options.mime_type = Some(mime_type);
        self
    }

    /// Replaces the attachment list wholesale.
    pub fn attachments(mut self, attachments: Vec<PathBuf>) -> Self {
        self.options.attachments = attachments;
        self
    }

    /// Appends a single attachment path.
    pub fn attachment(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.attachments.push(path.into());
        self
    }

    /// Sets one free-form transport property, overwriting any previous
    /// value for the same key.
    pub fn prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.props.insert(key.into(), value);
        self
    }

    /// Merges a map of free-form transport properties on top of the ones
    /// accumulated so far.
    pub fn props(mut self, props: BTreeMap<String, Value>) -> Self {
        self.options.props.extend(props);
        self
    }

    /// Builds the immutable options value.
    pub fn build(self) -> MailOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn unset_fields_resolve_to_defaults() {
        let options = MailOptions::builder().build();

        assert_eq!(DEFAULT_MAILER, options.mailer());
        assert_eq!(Transport::Smtp, options.transport());
        assert_eq!(DEFAULT_PORT, options.port());
        assert!(!options.auth());
        assert_eq!("", options.subject());
        assert_eq!(MimeType::Text, options.mime_type());
        assert!(options.host().is_none());
        assert!(options.to().is_none());
        assert!(options.attachments().is_empty());
        assert!(options.props().is_empty());
    }

    #[test]
    fn builder_chains_and_preserves_values() {
        let options = MailOptions::builder()
            .host("smtp.example.com")
            .port(2525)
            .auth(true)
            .username("user")
            .password("secret")
            .from("sender@example.com")
            .to("first@example.com, second@example.com")
            .subject("greetings")
            .content("hello")
            .mime_type(MimeType::Html)
            .build();

        assert_eq!(Some("smtp.example.com"), options.host());
        assert_eq!(2525, options.port());
        assert!(options.auth());
        assert_eq!(Some("user"), options.username());
        assert_eq!(Some("secret"), options.password());
        assert_eq!(Some("sender@example.com"), options.from());
        assert_eq!(
            Some("first@example.com, second@example.com"),
            options.to()
        );
        assert_eq!("greetings", options.subject());
        assert_eq!(Some("hello"), options.content());
        assert_eq!(MimeType::Html, options.mime_type());
    }

    #[test]
    fn props_accumulate_with_same_key_overwriting() {
        let options = MailOptions::builder()
            .prop("mail.smtp.timeout", json!(5000))
            .props(BTreeMap::from([
                ("mail.smtp.timeout".to_string(), json!(10_000)),
                ("mail.smtp.starttls.enable".to_string(), json!("true")),
            ]))
            .build();

        assert_eq!(2, options.props().len());
        assert_eq!(Some(&json!(10_000)), options.props().get("mail.smtp.timeout"));
        assert_eq!(
            Some(&json!("true")),
            options.props().get("mail.smtp.starttls.enable")
        );
    }

    #[test]
    fn attachments_replace_wholesale_but_attachment_appends() {
        let options = MailOptions::builder()
            .attachment("/tmp/ignored.txt")
            .attachments(vec![PathBuf::from("/tmp/report.pdf")])
            .attachment("/tmp/notes.txt")
            .build();

        assert_eq!(
            vec![PathBuf::from("/tmp/report.pdf"), PathBuf::from("/tmp/notes.txt")],
            options.attachments().to_vec()
        );
    }

    #[test]
    fn mail_properties_namespaced_under_transport() {
        let options = MailOptions::builder().host("smtp.example.com").build();

        let props = options.mail_properties();

        assert_eq!(Some(&json!("smtp.example.com")), props.get("mail.smtp.host"));
        assert_eq!(Some(&json!(25)), props.get("mail.smtp.port"));
        assert!(!props.contains_key("mail.smtp.auth"));
    }

    #[test]
    fn mail_properties_include_auth_only_when_enabled() {
        let options = MailOptions::builder()
            .host("smtp.example.com")
            .auth(true)
            .build();

        let props = options.mail_properties();

        assert_eq!(Some(&json!("true")), props.get("mail.smtp.auth"));
    }

    #[test]
    fn mail_properties_layer_connection_keys_over_free_form_props() {
        let options = MailOptions::builder()
            .host("smtp.example.com")
            .prop("mail.smtp.timeout", json!(5000))
            .build();

        let props = options.mail_properties();

        assert_eq!(Some(&json!(5000)), props.get("mail.smtp.timeout"));
        assert_eq!(Some(&json!("smtp.example.com")), props.get("mail.smtp.host"));
    }

    #[test]
    fn transport_parses_case_insensitively() -> TestResult {
        assert_eq!(Transport::Smtp, "smtp".parse()?);
        assert_eq!(Transport::Smtp, "SMTP".parse()?);
        assert_eq!(Transport::Smtps, "Smtps".parse()?);

        Ok(())
    }

    #[test]
    fn unknown_transport_fails_loudly() {
        let result = "imap".parse::<Transport>();

        assert!(matches!(result, Err(SendMailError::UnknownTransport(t)) if t == "imap"));
    }

    #[test]
    fn mime_type_parses_case_insensitively() -> TestResult {
        assert_eq!(MimeType::Text, "text".parse()?);
        assert_eq!(MimeType::Html, "HTML".parse()?);

        Ok(())
    }

    #[test]
    fn unknown_mime_type_fails_loudly() {
        let result = "pdf".parse::<MimeType>();

        assert!(matches!(result, Err(SendMailError::UnknownMimeType(m)) if m == "pdf"));
    }

    #[test]
    fn mime_type_codes() {
        assert_eq!("text/plain", MimeType::Text.code());
        assert_eq!("text/html", MimeType::Html.code());
    }
}
