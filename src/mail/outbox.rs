//! Outbox mailer: spool-directory mail delivery.
//!
//! Each sent message becomes its own directory under the outbox:
//! `message.json` with the envelope and body, plus one file per attachment.
//! Directory names combine a timestamp with the recipient so the spool
//! stays human-readable; collisions get a numeric suffix.

use crate::error::{Result, TagError};
use crate::fs::atomic_write;
use crate::mail::{Mailer, OutgoingMail};
use chrono::Utc;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// Mailer spooling messages into a directory.
#[derive(Debug, Clone)]
pub struct OutboxMailer {
    outbox_dir: PathBuf,
}

impl OutboxMailer {
    /// Create a mailer spooling into `outbox_dir`.
    pub fn new<P: AsRef<Path>>(outbox_dir: P) -> Self {
        Self {
            outbox_dir: outbox_dir.as_ref().to_path_buf(),
        }
    }

    /// Spool directory of this mailer.
    pub fn outbox_dir(&self) -> &Path {
        &self.outbox_dir
    }

    fn message_dir(&self, to: &str) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%d-%H%M%S");
        let slug = slugify(to);
        let mut dir = self.outbox_dir.join(format!("{}-{}", stamp, slug));
        let mut n = 1;
        while dir.exists() {
            dir = self.outbox_dir.join(format!("{}-{} ({})", stamp, slug, n));
            n += 1;
        }
        dir
    }
}

impl Mailer for OutboxMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<()> {
        if mail.to.trim().is_empty() {
            return Err(TagError::MailError(
                "refusing to send mail without a recipient".to_string(),
            ));
        }

        let dir = self.message_dir(&mail.to);
        fs::create_dir_all(&dir).map_err(|e| {
            TagError::MailError(format!(
                "failed to create outbox entry '{}': {}",
                dir.display(),
                e
            ))
        })?;

        let envelope = json!({
            "ts": Utc::now().to_rfc3339(),
            "to": mail.to,
            "sender_name": mail.sender_name,
            "subject": mail.subject,
            "body": mail.body,
            "attachments": mail
                .attachments
                .iter()
                .map(|a| {
                    json!({
                        "filename": a.filename,
                        "mime_type": a.mime_type,
                        "size_bytes": a.bytes.len(),
                    })
                })
                .collect::<Vec<_>>(),
        });
        let metadata = serde_json::to_string_pretty(&envelope)
            .map_err(|e| TagError::MailError(format!("failed to serialize envelope: {}", e)))?;

        atomic_write(dir.join("message.json"), metadata.as_bytes())
            .map_err(|e| TagError::MailError(e.to_string()))?;

        for attachment in &mail.attachments {
            atomic_write(dir.join(&attachment.filename), &attachment.bytes)
                .map_err(|e| TagError::MailError(e.to_string()))?;
        }

        Ok(())
    }
}

/// Reduce an address to filesystem-safe characters.
fn slugify(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::Attachment;
    use tempfile::TempDir;

    fn make_mail() -> OutgoingMail {
        OutgoingMail {
            to: "ada@example.com".to_string(),
            sender_name: "Prototype Tag".to_string(),
            subject: "Your new tag".to_string(),
            body: "Here's your prototype tag.".to_string(),
            attachments: vec![Attachment {
                filename: "Prototype Tag.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                bytes: b"%PDF-fake".to_vec(),
            }],
        }
    }

    fn spooled_dirs(outbox: &Path) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = fs::read_dir(outbox)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        dirs.sort();
        dirs
    }

    #[test]
    fn send_spools_envelope_and_attachment() {
        let temp = TempDir::new().unwrap();
        let mailer = OutboxMailer::new(temp.path());

        mailer.send(&make_mail()).unwrap();

        let dirs = spooled_dirs(temp.path());
        assert_eq!(dirs.len(), 1);

        let metadata = fs::read_to_string(dirs[0].join("message.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&metadata).unwrap();
        assert_eq!(parsed["to"], "ada@example.com");
        assert_eq!(parsed["subject"], "Your new tag");
        assert_eq!(parsed["attachments"][0]["filename"], "Prototype Tag.pdf");
        assert_eq!(parsed["attachments"][0]["mime_type"], "application/pdf");

        let attachment = fs::read(dirs[0].join("Prototype Tag.pdf")).unwrap();
        assert_eq!(attachment, b"%PDF-fake");
    }

    #[test]
    fn send_rejects_empty_recipient() {
        let temp = TempDir::new().unwrap();
        let mailer = OutboxMailer::new(temp.path());

        let mut mail = make_mail();
        mail.to = "  ".to_string();

        let err = mailer.send(&mail).unwrap_err();
        assert!(matches!(err, TagError::MailError(_)));
        // Nothing spooled
        assert!(spooled_dirs(temp.path()).is_empty());
    }

    #[test]
    fn send_twice_creates_distinct_entries() {
        let temp = TempDir::new().unwrap();
        let mailer = OutboxMailer::new(temp.path());

        mailer.send(&make_mail()).unwrap();
        mailer.send(&make_mail()).unwrap();

        assert_eq!(spooled_dirs(temp.path()).len(), 2);
    }

    #[test]
    fn slugify_keeps_address_characters() {
        assert_eq!(slugify("ada@example.com"), "ada_example.com");
        assert_eq!(slugify("a b/c"), "a_b_c");
    }
}
