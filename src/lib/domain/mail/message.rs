//! Transport message construction

use std::fs;

use lettre::message::header::{ContentType, Header, HeaderName, HeaderValue};
use lettre::message::{Attachment, Mailboxes, MultiPart, SinglePart};
use lettre::Message;

use super::errors::SendMailError;
use super::options::MailOptions;

/// The header carrying the mailer identity.
#[derive(Debug, Clone)]
struct XMailer(String);

impl Header for XMailer {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("X-Mailer")
    }

    fn parse(s: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self(s.to_string()))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.clone())
    }
}

/// Builds the transport message for a resolved set of options.
///
/// The body is a single multipart: one text part at the declared MIME type
/// followed by one part per attachment path, each named after the path's
/// base file name. Address fields are comma-separated mailbox lists; fields
/// absent from the options are omitted. Attachment bytes are read eagerly,
/// so an unreadable path aborts message construction.
pub fn build_message(options: &MailOptions) -> Result<Message, SendMailError> {
    let mut builder = Message::builder()
        .subject(options.subject().to_string())
        .header(XMailer(options.mailer().to_string()))
        .date_now();

    if let Some(from) = options.from() {
        builder = builder.from(from.parse()?);
    }
    if let Some(to) = options.to() {
        for mailbox in to.parse::<Mailboxes>()? {
            builder = builder.to(mailbox);
        }
    }
    if let Some(cc) = options.cc() {
        for mailbox in cc.parse::<Mailboxes>()? {
            builder = builder.cc(mailbox);
        }
    }
    if let Some(bcc) = options.bcc() {
        for mailbox in bcc.parse::<Mailboxes>()? {
            builder = builder.bcc(mailbox);
        }
    }

    let text_part = SinglePart::builder()
        .header(ContentType::parse(options.mime_type().code())?)
        .body(options.content().unwrap_or_default().to_string());

    let mut body = MultiPart::mixed().singlepart(text_part);

    for path in options.attachments() {
        let bytes = fs::read(path).map_err(|source| SendMailError::Attachment {
            path: path.clone(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let part =
            Attachment::new(filename).body(bytes, ContentType::parse("application/octet-stream")?);

        body = body.singlepart(part);
    }

    Ok(builder.multipart(body)?)
}
