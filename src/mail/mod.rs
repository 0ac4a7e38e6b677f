//! Mail delivery capability.
//!
//! Delivery is a platform service from this tool's point of view: the
//! `Mailer` trait is the seam, and the workspace implementation spools
//! messages into an outbox directory for an external transport to pick up.

mod outbox;

pub use outbox::OutboxMailer;

use crate::error::Result;

/// An attachment on an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Filename shown to the recipient.
    pub filename: String,

    /// MIME type of the content.
    pub mime_type: String,

    /// Raw content bytes.
    pub bytes: Vec<u8>,
}

/// An outgoing mail message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Recipient address.
    pub to: String,

    /// Display name of the sender.
    pub sender_name: String,

    /// Subject line.
    pub subject: String,

    /// Body text.
    pub body: String,

    /// Attachments, in order.
    pub attachments: Vec<Attachment>,
}

/// Capability over the platform's mail delivery service.
pub trait Mailer {
    /// Hand a message over for delivery.
    ///
    /// Delivery failure is fatal for the invocation; there are no retries.
    fn send(&self, mail: &OutgoingMail) -> Result<()>;
}
