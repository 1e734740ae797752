// src/notification/smtp.rs
use crate::config::{Credentials, MailConfig};
use crate::domain::errors::{NotificationError, NotificationResult};
use crate::domain::models::CrossSignal;
use crate::notification::{compose_message, Notifier};
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Sends alerts through an authenticated STARTTLS relay
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn new(mail: &MailConfig, credentials: &Credentials) -> NotificationResult<Self> {
        let from: Mailbox = credentials.account.parse().map_err(|e| {
            NotificationError::Config(format!("Invalid sender address: {}", e))
        })?;

        let to: Mailbox = match &mail.recipient {
            Some(recipient) => recipient.parse().map_err(|e| {
                NotificationError::Config(format!("Invalid recipient address: {}", e))
            })?,
            None => from.clone(),
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&mail.smtp_host)
            .map_err(|e| NotificationError::Smtp(format!("SMTP transport error: {}", e)))?
            .port(mail.smtp_port)
            .credentials(SmtpCredentials::new(
                credentials.account.clone(),
                credentials.app_password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from,
            to,
        })
    }

    pub fn recipient(&self) -> &Mailbox {
        &self.to
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, signal: &CrossSignal) -> NotificationResult<()> {
        let alert = compose_message(signal);

        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(alert.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(alert.body)
            .map_err(|e| NotificationError::Message(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| NotificationError::Smtp(format!("Failed to send email: {}", e)))?;

        log::info!("Sent {} alert for {} to {}", signal.kind, signal.symbol, self.to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(account: &str) -> Credentials {
        Credentials {
            account: account.to_string(),
            app_password: "abcd efgh ijkl mnop".to_string(),
        }
    }

    fn mail(recipient: Option<&str>) -> MailConfig {
        MailConfig {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            recipient: recipient.map(str::to_string),
        }
    }

    #[test]
    fn test_recipient_defaults_to_account() {
        let notifier = SmtpNotifier::new(&mail(None), &credentials("me@example.com")).unwrap();
        assert_eq!(notifier.recipient().email.to_string(), "me@example.com");
    }

    #[test]
    fn test_explicit_recipient() {
        let notifier = SmtpNotifier::new(
            &mail(Some("alerts@example.com")),
            &credentials("me@example.com"),
        )
        .unwrap();
        assert_eq!(notifier.recipient().email.to_string(), "alerts@example.com");
    }

    #[test]
    fn test_invalid_sender_is_config_error() {
        assert!(matches!(
            SmtpNotifier::new(&mail(None), &credentials("not an address")),
            Err(NotificationError::Config(_))
        ));
    }
}
