use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

/// One call is one best-effort delivery attempt: all recipients in a single
/// transport session, no retry inside. Retry happens by the undelivered row
/// surviving to the next dispatcher tick.
#[async_trait]
pub trait ReminderMailer: Send + Sync {
    async fn send_reminder(
        &self,
        recipients: &[String],
        event_name: &str,
        event_time_text: &str,
    ) -> Result<(), MailError>;
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

impl SmtpConfig {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("SMTP_HOST").expect("SMTP_HOST must be set"),
            port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .expect("SMTP_PORT must be a number"),
            username: std::env::var("SMTP_USER").expect("SMTP_USER must be set"),
            password: std::env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD must be set"),
            from_address: std::env::var("SMTP_FROM").expect("SMTP_FROM must be set"),
        }
    }
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(config.username, config.password))
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address,
        })
    }
}

fn build_reminder(
    from_address: &str,
    recipients: &[String],
    event_name: &str,
    event_time_text: &str,
) -> Result<Message, MailError> {
    if recipients.is_empty() {
        return Err(MailError::Build("no recipients".to_string()));
    }

    let mut builder = Message::builder()
        .from(from_address.parse()?)
        .subject("Upcoming event reminder")
        .header(ContentType::TEXT_PLAIN);

    for recipient in recipients {
        builder = builder.to(recipient.parse()?);
    }

    let body = format!(
        "Hello! {} is happening on {}. Don't forget!",
        event_name, event_time_text
    );

    builder.body(body).map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl ReminderMailer for SmtpMailer {
    async fn send_reminder(
        &self,
        recipients: &[String],
        event_name: &str,
        event_time_text: &str,
    ) -> Result<(), MailError> {
        let email = build_reminder(&self.from_address, recipients, event_name, event_time_text)?;

        self.transport.send(email).await?;

        tracing::info!(
            recipients = recipients.len(),
            event_name,
            "Reminder email sent"
        );
        Ok(())
    }
}
