use async_trait::async_trait;
use lettre::{
    message::Message,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};

use crate::{
    config::MailerConfig,
    error::{AppError, Result},
    integrations::{Integration, IntegrationEvent},
};

/// SMTP side channel for acceptance mail and urgent-notice fan-out.
/// Constructed only when the mailer is enabled and fully configured.
pub struct AcceptanceMailer {
    config: MailerConfig,
    school_name: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl AcceptanceMailer {
    pub fn new(config: MailerConfig, school_name: String) -> Option<Self> {
        if !config.enabled {
            return None;
        }

        let host = config.smtp_host.clone()?;
        let mut builder = match AsyncSmtpTransport::<Tokio1Executor>::relay(&host) {
            Ok(builder) => builder,
            Err(e) => {
                tracing::warn!("Mailer disabled, invalid SMTP relay {}: {}", host, e);
                return None;
            }
        };

        if let Some(port) = config.smtp_port {
            builder = builder.port(port);
        }
        if let (Some(username), Some(password)) = (config.username.clone(), config.password.clone())
        {
            builder = builder.credentials(Credentials::new(username, password));
        }

        Some(Self {
            transport: builder.build(),
            config,
            school_name,
        })
    }

    async fn send_acceptance(&self, parent_email: &str, parent_name: &str, child_name: &str, login_email: &str, login_password: &str) -> Result<()> {
        let from = self
            .config
            .from_address
            .as_deref()
            .ok_or_else(|| AppError::External("Mailer from_address not configured".to_string()))?;

        let email = Message::builder()
            .from(from.parse().map_err(|e| {
                AppError::External(format!("Invalid from address: {}", e))
            })?)
            .to(parent_email.parse().map_err(|e| {
                AppError::External(format!("Invalid recipient address: {}", e))
            })?)
            .subject(format!("Admission to {}", self.school_name))
            .body(format!(
                "Dear {},\n\n{} has been offered admission to {}.\n\n\
                 Parent portal login:\n  Email: {}\n  Password: {}\n\n\
                 Please change the password after your first login.\n",
                parent_name, child_name, self.school_name, login_email, login_password
            ))
            .map_err(|e| AppError::External(format!("Failed to build email: {}", e)))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| AppError::External(format!("SMTP send failed: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl Integration for AcceptanceMailer {
    fn name(&self) -> &str {
        "AcceptanceMailer"
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    async fn health_check(&self) -> Result<()> {
        if self.config.from_address.is_none() {
            return Err(AppError::External(
                "Mailer from_address not configured".to_string(),
            ));
        }
        Ok(())
    }

    async fn handle_event(&self, event: &IntegrationEvent) -> Result<()> {
        match event {
            IntegrationEvent::ApplicationAccepted { application, student } => {
                let login_email = application.login_email.as_deref().unwrap_or_default();
                let login_password = application.login_password.as_deref().unwrap_or_default();
                tracing::info!("Sending acceptance email to: {}", application.email);
                self.send_acceptance(
                    &application.email,
                    &application.parent_name,
                    &student.name,
                    login_email,
                    login_password,
                )
                .await
            }
            IntegrationEvent::UrgentNoticePosted(notice) => {
                // The production channel would fan this out to every parent
                // over email/SMS; the hosted deployment only records it.
                tracing::info!("Urgent notice posted: {} (id {})", notice.title, notice.id);
                Ok(())
            }
        }
    }
}
