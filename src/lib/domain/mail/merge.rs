//! Option merge engine
//!
//! Resolves caller-supplied [`MailOptions`] against a [`DefaultSource`]
//! with a strict three-tier precedence: a non-blank caller value wins,
//! then a non-blank default, then a hard-coded constant. Blank strings
//! (empty or whitespace-only) are treated as absent at every tier and
//! normalize to `None` in the resolved value.

use std::str::FromStr;

use super::defaults::DefaultSource;
use super::errors::SendMailError;
use super::options::{MailOptions, MimeType, Transport, DEFAULT_MAILER, DEFAULT_PORT};

/// Resolves `options` against `defaults` into a fully-populated value.
///
/// `to` is the one field with no fallback: it is passed through from the
/// caller (blank normalized to absent) and never read from the defaults.
/// `props` is not tiered; the defaults' props are applied first and the
/// caller's entries override same-named keys. Attachments pass through
/// from the caller untouched.
pub fn merge<D>(options: &MailOptions, defaults: &D) -> Result<MailOptions, SendMailError>
where
    D: DefaultSource,
{
    let mut props = defaults.get_props("props").unwrap_or_default();
    props.extend(options.props.clone());

    Ok(MailOptions {
        mailer: merge_string(
            options.mailer.as_deref(),
            defaults.get_string("mailer"),
            DEFAULT_MAILER,
        ),
        transport: Some(merge_parsed(
            options.transport,
            defaults.get_string("transport"),
            Transport::Smtp,
        )?),
        host: merge_string(options.host.as_deref(), defaults.get_string("host"), ""),
        port: Some(merge_port(options.port, defaults.get_int("port"))?),
        auth: Some(options.auth.or_else(|| defaults.get_bool("auth")).unwrap_or(false)),
        username: merge_string(
            options.username.as_deref(),
            defaults.get_string("username"),
            "",
        ),
        password: merge_string(
            options.password.as_deref(),
            defaults.get_string("password"),
            "",
        ),
        from: merge_string(options.from.as_deref(), defaults.get_string("from"), ""),
        to: options.to.as_deref().filter(|to| !is_blank(to)).map(String::from),
        cc: merge_string(options.cc.as_deref(), defaults.get_string("cc"), ""),
        bcc: merge_string(options.bcc.as_deref(), defaults.get_string("bcc"), ""),
        subject: merge_string(
            options.subject.as_deref(),
            defaults.get_string("subject"),
            "",
        ),
        content: merge_string(
            options.content.as_deref(),
            defaults.get_string("content"),
            "",
        ),
        mime_type: Some(merge_parsed(
            options.mime_type,
            defaults.get_string("mime-type"),
            MimeType::Text,
        )?),
        attachments: options.attachments.clone(),
        props,
    })
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn merge_string(
    caller: Option<&str>,
    default: Option<String>,
    fallback: &str,
) -> Option<String> {
    if let Some(value) = caller.filter(|v| !is_blank(v)) {
        return Some(value.to_string());
    }
    if let Some(value) = default.filter(|v| !is_blank(v)) {
        return Some(value);
    }

    Some(fallback.to_string()).filter(|v| !is_blank(v))
}

fn merge_parsed<T>(
    caller: Option<T>,
    default: Option<String>,
    fallback: T,
) -> Result<T, SendMailError>
where
    T: FromStr<Err = SendMailError>,
{
    if let Some(value) = caller {
        return Ok(value);
    }
    if let Some(raw) = default.filter(|v| !is_blank(v)) {
        return raw.parse();
    }

    Ok(fallback)
}

fn merge_port(caller: Option<u16>, default: Option<i64>) -> Result<u16, SendMailError> {
    if let Some(port) = caller {
        return Ok(port);
    }
    if let Some(port) = default {
        return u16::try_from(port).map_err(|_| SendMailError::InvalidPort(port));
    }

    Ok(DEFAULT_PORT)
}
