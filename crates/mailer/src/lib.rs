//! SES notification mailer for the lead pipeline.
//!
//! Fire-and-forget plain-text email; no delivery confirmation is tracked.

pub mod config;
pub mod ses;

pub use config::MailConfig;
pub use ses::SesMailer;

use async_trait::async_trait;
use pipeline_core::Result;

/// A plain-text outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body_text: String,
}

/// A transactional email sender.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}
