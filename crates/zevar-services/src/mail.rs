//! # Email
//!
//! Outbound mail over an SMTP relay, used by the `/send-email` endpoint and
//! to deliver invoice PDFs to customers.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use tracing::{info, instrument};

use zevar_core::{CollaboratorError, Invoice, InvoiceDelivery, RenderedDocument};

use crate::config::{SmtpConfig, StoreProfile};
use crate::error::{ServiceError, ServiceResult};
use crate::invoice_html::render_invoice_html;

/// A file attached to an outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// An HTML email with optional attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub attachments: Vec<EmailAttachment>,
}

/// Sends [`OutgoingEmail`]s.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> ServiceResult<()>;
}

// =============================================================================
// SMTP
// =============================================================================

/// [`Mailer`] over SMTP with STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds the relay transport. The sender is `<store name> <username>`.
    ///
    /// ## Errors
    /// * `ServiceError::NotConfigured` - No credentials
    /// * `ServiceError::InvalidAddress` - Username is not an email address
    pub fn new(config: &SmtpConfig, sender_name: &str) -> ServiceResult<Self> {
        if !config.is_configured() {
            return Err(ServiceError::NotConfigured("SMTP"));
        }

        let from = sender_mailbox(sender_name, &config.username)?;
        let creds = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| ServiceError::Smtp(format!("Failed to create SMTP relay: {}", e)))?
            .port(config.port)
            .credentials(creds)
            .timeout(Some(config.timeout()))
            .build();

        info!(host = %config.host, port = config.port, "SMTP mailer initialized");

        Ok(SmtpMailer { transport, from })
    }

    pub fn sender(&self) -> &Mailbox {
        &self.from
    }
}

fn sender_mailbox(name: &str, address: &str) -> ServiceResult<Mailbox> {
    let address = address.trim();
    let email = address
        .parse()
        .map_err(|e: lettre::address::AddressError| ServiceError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })?;
    Ok(Mailbox::new(Some(name.to_string()), email))
}

/// Assembles the MIME message: HTML body, then one part per attachment.
pub fn build_message(from: &Mailbox, email: &OutgoingEmail) -> ServiceResult<Message> {
    let to: Mailbox = email
        .to
        .trim()
        .parse()
        .map_err(|e: lettre::address::AddressError| ServiceError::InvalidAddress {
            address: email.to.clone(),
            reason: e.to_string(),
        })?;

    let builder = Message::builder()
        .from(from.clone())
        .to(to)
        .subject(email.subject.clone());

    let html_part = SinglePart::builder()
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone());

    let message = if email.attachments.is_empty() {
        builder.singlepart(html_part)
    } else {
        let mut mixed = MultiPart::mixed().singlepart(html_part);
        for attachment in &email.attachments {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| ServiceError::MessageBuild(e.to_string()))?;
            mixed = mixed.singlepart(
                Attachment::new(attachment.filename.clone())
                    .body(attachment.bytes.clone(), content_type),
            );
        }
        builder.multipart(mixed)
    };

    message.map_err(|e| ServiceError::MessageBuild(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, email), fields(to = %email.to, subject = %email.subject))]
    async fn send(&self, email: &OutgoingEmail) -> ServiceResult<()> {
        let message = build_message(&self.from, email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| ServiceError::Smtp(e.to_string()))?;

        info!(attachments = email.attachments.len(), "Email sent");
        Ok(())
    }
}

// =============================================================================
// Invoice Delivery
// =============================================================================

/// Emails the invoice to the customer with the PDF attached.
#[derive(Clone)]
pub struct EmailDelivery {
    mailer: Arc<dyn Mailer>,
    store: StoreProfile,
}

impl EmailDelivery {
    pub fn new(mailer: Arc<dyn Mailer>, store: StoreProfile) -> Self {
        EmailDelivery { mailer, store }
    }

    /// The email sent for an invoice.
    pub fn compose(
        &self,
        invoice: &Invoice,
        document: &RenderedDocument,
        destination: &str,
    ) -> ServiceResult<OutgoingEmail> {
        Ok(OutgoingEmail {
            to: destination.to_string(),
            subject: format!("Your {} invoice {}", self.store.name, invoice.number),
            html: render_invoice_html(invoice, &self.store)?,
            attachments: vec![EmailAttachment {
                filename: document.filename.clone(),
                content_type: document.content_type.clone(),
                bytes: document.bytes.clone(),
            }],
        })
    }
}

#[async_trait]
impl InvoiceDelivery for EmailDelivery {
    async fn deliver(
        &self,
        invoice: &Invoice,
        document: &RenderedDocument,
        destination: &str,
    ) -> Result<(), CollaboratorError> {
        let email = self.compose(invoice, document, destination)?;
        self.mailer.send(&email).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
