//! SES implementation of the mailer.

use async_trait::async_trait;
use aws_sdk_sesv2::config::Region;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client;
use pipeline_core::{Error, Result};
use tracing::debug;

use crate::{MailConfig, Mailer, OutboundEmail};

/// Mailer backed by SES.
pub struct SesMailer {
    client: Client,
}

impl SesMailer {
    /// Creates a mailer from the shared SDK config, pinned to the
    /// configured SES region.
    pub fn new(sdk_config: &aws_config::SdkConfig, config: &MailConfig) -> Self {
        let mut builder = aws_sdk_sesv2::config::Builder::from(sdk_config)
            .region(Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }

    /// Create from a pre-built client (for testing).
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let destination = Destination::builder()
            .set_to_addresses(Some(email.to.clone()))
            .build();

        let subject = Content::builder()
            .data(&email.subject)
            .build()
            .map_err(|e| Error::mail(format!("invalid subject: {}", e)))?;

        let body_text = Content::builder()
            .data(&email.body_text)
            .build()
            .map_err(|e| Error::mail(format!("invalid body: {}", e)))?;

        let message = Message::builder()
            .subject(subject)
            .body(Body::builder().text(body_text).build())
            .build();

        self.client
            .send_email()
            .from_email_address(&email.from)
            .destination(destination)
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| Error::mail(format!("send_email failed: {}", e)))?;

        debug!(
            to = ?email.to,
            subject = %email.subject,
            "Sent notification email"
        );

        Ok(())
    }
}
