//! Multi-page chart document
//!
//! One `DocumentWriter` owns the PDF for a whole run. Pages are appended in
//! order and each gets its own drawing backend; the file is written once in
//! `finish`, so a failed run never leaves a partial document behind.

use super::error::{ReportError, Result};
use super::pdf_backend::{PageFonts, PdfBackend};
use printpdf::{BuiltinFont, Mm, PdfDocument, PdfDocumentReference};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Points per inch; backend pixels are points
pub const POINTS_PER_INCH: f32 = 72.0;

/// Page dimensions in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_in: f32,
    pub height_in: f32,
}

impl PageSize {
    pub const fn from_inches(width_in: f32, height_in: f32) -> Self {
        Self {
            width_in,
            height_in,
        }
    }

    /// Backend size in points
    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width_in * POINTS_PER_INCH).round() as u32,
            (self.height_in * POINTS_PER_INCH).round() as u32,
        )
    }

    fn to_mm(self) -> (Mm, Mm) {
        (Mm(self.width_in * 25.4), Mm(self.height_in * 25.4))
    }
}

/// Accumulates chart pages and writes them as one PDF
pub struct DocumentWriter {
    title: String,
    doc: Option<PdfDocumentReference>,
    fonts: Option<PageFonts>,
    pages: Vec<String>,
}

impl DocumentWriter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            doc: None,
            fonts: None,
            pages: Vec::new(),
        }
    }

    /// Append a page and return a backend to draw it with
    ///
    /// The PDF document is created together with its first page.
    pub fn add_page(&mut self, name: &str, size: PageSize) -> Result<PdfBackend> {
        let (width, height) = size.to_mm();

        let layer = if let Some(doc) = self.doc.as_ref() {
            let (page, layer) = doc.add_page(width, height, "Layer 1");
            doc.get_page(page).get_layer(layer)
        } else {
            let (doc, page, layer) = PdfDocument::new(&self.title, width, height, "Layer 1");
            let layer_ref = doc.get_page(page).get_layer(layer);
            self.fonts = Some(builtin_fonts(&doc)?);
            self.doc = Some(doc);
            layer_ref
        };

        let fonts = self
            .fonts
            .clone()
            .ok_or_else(|| ReportError::Document("fonts not registered".to_string()))?;

        self.pages.push(name.to_string());
        tracing::debug!(page = self.pages.len(), name, ?size, "added page");

        Ok(PdfBackend::new(layer, fonts, size.pixels()))
    }

    /// Number of pages added so far
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Write the document to `path`, replacing any existing file
    ///
    /// Returns the number of pages written.
    pub fn finish(self, path: &Path) -> Result<usize> {
        let count = self.page_count();
        let doc = self
            .doc
            .ok_or_else(|| ReportError::EmptyResult("document pages".to_string()))?;

        let mut writer = BufWriter::new(File::create(path)?);
        doc.save(&mut writer)
            .map_err(|e| ReportError::Document(format!("{:?}", e)))?;

        tracing::info!(path = %path.display(), pages = ?self.pages, "wrote document");
        Ok(count)
    }
}

fn builtin_fonts(doc: &PdfDocumentReference) -> Result<PageFonts> {
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Document(format!("{:?}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Document(format!("{:?}", e)))?;
    Ok(PageFonts { regular, bold })
}
