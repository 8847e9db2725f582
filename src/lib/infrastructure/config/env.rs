//! Environment-variable default source

use std::collections::BTreeMap;

use clap::Parser;
use serde_json::Value;

use crate::domain::mail::DefaultSource;

/// [`DefaultSource`] populated from `MAIL_OPTIONS_*` environment variables
/// (or the matching command-line flags).
///
/// Every field is optional; anything left unset simply supplies no
/// default. `MAIL_OPTIONS_PROPS` takes a JSON object string for the
/// free-form transport properties.
#[derive(Debug, Clone, Default, Parser)]
pub struct EnvDefaults {
    /// The `X-Mailer` identity
    #[clap(long = "mail-mailer", env = "MAIL_OPTIONS_MAILER")]
    pub mailer: Option<String>,

    /// The transport kind (`smtp` or `smtps`)
    #[clap(long = "mail-transport", env = "MAIL_OPTIONS_TRANSPORT")]
    pub transport: Option<String>,

    /// The mail host
    #[clap(long = "mail-host", env = "MAIL_OPTIONS_HOST")]
    pub host: Option<String>,

    /// The mail host port
    #[clap(long = "mail-port", env = "MAIL_OPTIONS_PORT")]
    pub port: Option<i64>,

    /// Whether the transport should authenticate
    #[clap(long = "mail-auth", env = "MAIL_OPTIONS_AUTH")]
    pub auth: Option<bool>,

    /// The username used when authenticating
    #[clap(long = "mail-username", env = "MAIL_OPTIONS_USERNAME")]
    pub username: Option<String>,

    /// The password used when authenticating
    #[clap(long = "mail-password", env = "MAIL_OPTIONS_PASSWORD")]
    pub password: Option<String>,

    /// The sender address
    #[clap(long = "mail-from", env = "MAIL_OPTIONS_FROM")]
    pub from: Option<String>,

    /// The carbon-copy address(es), comma-separated
    #[clap(long = "mail-cc", env = "MAIL_OPTIONS_CC")]
    pub cc: Option<String>,

    /// The blind-carbon-copy address(es), comma-separated
    #[clap(long = "mail-bcc", env = "MAIL_OPTIONS_BCC")]
    pub bcc: Option<String>,

    /// The message subject
    #[clap(long = "mail-subject", env = "MAIL_OPTIONS_SUBJECT")]
    pub subject: Option<String>,

    /// The message body text
    #[clap(long = "mail-content", env = "MAIL_OPTIONS_CONTENT")]
    pub content: Option<String>,

    /// The MIME type of the message body (`text` or `html`)
    #[clap(long = "mail-mime-type", env = "MAIL_OPTIONS_MIME_TYPE")]
    pub mime_type: Option<String>,

    /// Free-form transport properties as a JSON object
    #[clap(long = "mail-props", env = "MAIL_OPTIONS_PROPS", value_parser = parse_props)]
    pub props: Option<BTreeMap<String, Value>>,
}

fn parse_props(raw: &str) -> Result<BTreeMap<String, Value>, String> {
    let value: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;

    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err("expected a JSON object".to_string()),
    }
}

impl DefaultSource for EnvDefaults {
    fn get_string(&self, key: &str) -> Option<String> {
        match key {
            "mailer" => self.mailer.clone(),
            "transport" => self.transport.clone(),
            "host" => self.host.clone(),
            "username" => self.username.clone(),
            "password" => self.password.clone(),
            "from" => self.from.clone(),
            "cc" => self.cc.clone(),
            "bcc" => self.bcc.clone(),
            "subject" => self.subject.clone(),
            "content" => self.content.clone(),
            "mime-type" => self.mime_type.clone(),
            _ => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match key {
            "port" => self.port,
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match key {
            "auth" => self.auth,
            _ => None,
        }
    }

    fn get_props(&self, key: &str) -> Option<BTreeMap<String, Value>> {
        match key {
            "props" => self.props.clone(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_defaults_from_flags() -> TestResult {
        let defaults = EnvDefaults::try_parse_from([
            "test",
            "--mail-host",
            "smtp.example.com",
            "--mail-port",
            "587",
            "--mail-auth",
            "true",
            "--mail-props",
            r#"{"mail.smtp.timeout":5000}"#,
        ])?;

        assert_eq!(Some("smtp.example.com".to_string()), defaults.get_string("host"));
        assert_eq!(Some(587), defaults.get_int("port"));
        assert_eq!(Some(true), defaults.get_bool("auth"));
        assert_eq!(
            Some(&json!(5000)),
            defaults.get_props("props").unwrap().get("mail.smtp.timeout")
        );

        Ok(())
    }

    #[test]
    fn unset_fields_supply_no_default() -> TestResult {
        let defaults = EnvDefaults::try_parse_from(["test"])?;

        assert_eq!(None, defaults.get_string("host"));
        assert_eq!(None, defaults.get_int("port"));
        assert_eq!(None, defaults.get_bool("auth"));
        assert_eq!(None, defaults.get_props("props"));

        Ok(())
    }

    #[test]
    fn props_must_be_a_json_object() {
        let result = EnvDefaults::try_parse_from(["test", "--mail-props", "[1,2,3]"]);

        assert!(result.is_err());
    }
}
