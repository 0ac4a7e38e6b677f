//! PDF export of filled tag documents.
//!
//! Renders the filled text line by line: blank lines become vertical breaks,
//! everything else becomes a paragraph. The font family is loaded from the
//! workspace fonts directory, trying Arial first and falling back to
//! LiberationSans.

use crate::error::{Result, TagError};
use crate::template::filler::ArtifactExporter;
use genpdf::elements::{Break, Paragraph};
use genpdf::{fonts, Document, SimplePageDecorator};
use std::path::{Path, PathBuf};

/// MIME type of exported artifacts.
pub const PDF_MIME_TYPE: &str = "application/pdf";

const FONT_SIZE_PT: u8 = 11;

/// Exporter rendering filled text to PDF bytes via genpdf.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    fonts_dir: PathBuf,
}

impl PdfExporter {
    /// Create an exporter loading fonts from `fonts_dir`.
    pub fn new<P: AsRef<Path>>(fonts_dir: P) -> Self {
        Self {
            fonts_dir: fonts_dir.as_ref().to_path_buf(),
        }
    }

    fn load_font(&self) -> Result<fonts::FontFamily<fonts::FontData>> {
        if let Ok(family) = fonts::from_files(&self.fonts_dir, "Arial", None) {
            return Ok(family);
        }
        fonts::from_files(&self.fonts_dir, "LiberationSans", None).map_err(|e| {
            TagError::ExportError(format!(
                "failed to load a font family from '{}': {}",
                self.fonts_dir.display(),
                e
            ))
        })
    }
}

impl ArtifactExporter for PdfExporter {
    fn export(&self, text: &str, title: &str) -> Result<Vec<u8>> {
        let font_family = self.load_font()?;
        let mut doc = Document::new(font_family);
        doc.set_title(title);
        doc.set_font_size(FONT_SIZE_PT);
        doc.set_line_spacing(1.0);

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // Preserve empty lines as vertical space; do not trim content lines.
        for line in text.lines() {
            if line.is_empty() {
                doc.push(Break::new(1));
            } else {
                doc.push(Paragraph::new(line));
            }
        }

        let mut bytes = Vec::new();
        doc.render(&mut bytes)
            .map_err(|e| TagError::ExportError(format!("PDF rendering failed: {}", e)))?;
        Ok(bytes)
    }

    fn mime_type(&self) -> &'static str {
        PDF_MIME_TYPE
    }
}
