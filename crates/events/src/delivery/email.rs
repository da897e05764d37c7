//! Email delivery via SendGrid or SMTP.
//!
//! [`EmailConfig::from_env`] picks the provider: SendGrid when
//! `SENDGRID_API_KEY` is set and `EMAIL_ENABLED=true`, otherwise SMTP when
//! `SMTP_HOST` is set. With neither, email delivery is skipped entirely.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{EmailChannel, OutboundEmail};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// The HTTP request to the email API failed.
    #[error("Email API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The email API answered with a non-2xx status.
    #[error("Email API error ({status}): {body}")]
    Api { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "noreply@ascendcoaching.in";
const DEFAULT_FROM_NAME: &str = "Ascend Career Coaching";
const DEFAULT_SENDGRID_URL: &str = "https://api.sendgrid.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// SendGrid v3 API settings.
#[derive(Debug, Clone)]
pub struct SendGridConfig {
    pub api_key: String,
    /// Base URL without trailing slash.
    pub api_url: String,
    pub from_address: String,
    pub from_name: String,
}

impl SendGridConfig {
    pub fn new(api_key: impl Into<String>, from_address: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_SENDGRID_URL.to_string(),
            from_address: from_address.into(),
            from_name: DEFAULT_FROM_NAME.to_string(),
        }
    }
}

/// SMTP relay settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub from_name: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

/// Which email provider to use.
#[derive(Debug, Clone)]
pub enum EmailConfig {
    SendGrid(SendGridConfig),
    Smtp(SmtpConfig),
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable           | Used by  | Default                       |
    /// |--------------------|----------|-------------------------------|
    /// | `EMAIL_ENABLED`    | SendGrid | must be `true`                |
    /// | `SENDGRID_API_KEY` | SendGrid | -                             |
    /// | `SENDGRID_API_URL` | SendGrid | `https://api.sendgrid.com`    |
    /// | `SMTP_HOST`        | SMTP     | -                             |
    /// | `SMTP_PORT`        | SMTP     | `587`                         |
    /// | `SMTP_USER`        | SMTP     | -                             |
    /// | `SMTP_PASSWORD`    | SMTP     | -                             |
    /// | `EMAIL_FROM`       | both     | `noreply@ascendcoaching.in`   |
    /// | `EMAIL_FROM_NAME`  | both     | `Ascend Career Coaching`      |
    pub fn from_env() -> Option<Self> {
        let from_address =
            env_non_empty("EMAIL_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string());
        let from_name =
            env_non_empty("EMAIL_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string());
        let enabled = std::env::var("EMAIL_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        if let (true, Some(api_key)) = (enabled, env_non_empty("SENDGRID_API_KEY")) {
            let mut config = SendGridConfig::new(api_key, from_address);
            config.from_name = from_name;
            if let Some(url) = env_non_empty("SENDGRID_API_URL") {
                config.api_url = url.trim_end_matches('/').to_string();
            }
            return Some(Self::SendGrid(config));
        }

        let smtp_host = env_non_empty("SMTP_HOST")?;
        Some(Self::Smtp(SmtpConfig {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address,
            from_name,
            smtp_user: env_non_empty("SMTP_USER"),
            smtp_password: env_non_empty("SMTP_PASSWORD"),
        }))
    }

    /// Construct the configured channel.
    pub fn into_channel(self) -> Result<Arc<dyn EmailChannel>, EmailError> {
        Ok(match self {
            Self::SendGrid(config) => Arc::new(SendGridEmail::new(config)?),
            Self::Smtp(config) => Arc::new(SmtpEmail::new(config)?),
        })
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// SendGrid
// ---------------------------------------------------------------------------

/// Sends mail through the SendGrid v3 `mail/send` endpoint.
pub struct SendGridEmail {
    client: reqwest::Client,
    config: SendGridConfig,
}

impl SendGridEmail {
    pub fn new(config: SendGridConfig) -> Result<Self, EmailError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn payload(&self, email: &OutboundEmail) -> serde_json::Value {
        serde_json::json!({
            "personalizations": [{ "to": [{ "email": email.to }] }],
            "from": { "email": self.config.from_address, "name": self.config.from_name },
            "subject": email.subject,
            "content": [
                { "type": "text/plain", "value": email.text },
                { "type": "text/html", "value": email.html },
            ],
        })
    }
}

#[async_trait]
impl EmailChannel for SendGridEmail {
    fn name(&self) -> &'static str {
        "sendgrid"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError> {
        let response = self
            .client
            .post(format!("{}/v3/mail/send", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&self.payload(email))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(to = %email.to, provider = "sendgrid", "Notification email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SMTP
// ---------------------------------------------------------------------------

/// Sends multipart (text + HTML) mail over an SMTP relay with STARTTLS.
pub struct SmtpEmail {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmail {
    pub fn new(config: SmtpConfig) -> Result<Self, EmailError> {
        let from = Mailbox::new(Some(config.from_name), config.from_address.parse()?);

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);
        if let (Some(user), Some(pass)) = (config.smtp_user, config.smtp_password) {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            mailer: builder.build(),
            from,
        })
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<Message, EmailError> {
        Message::builder()
            .from(self.from.clone())
            .to(email.to.parse()?)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .map_err(|e| EmailError::Build(e.to_string()))
    }
}

#[async_trait]
impl EmailChannel for SmtpEmail {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError> {
        let message = self.build_message(email)?;
        self.mailer.send(message).await?;
        tracing::info!(to = %email.to, provider = "smtp", "Notification email sent");
        Ok(())
    }
}
