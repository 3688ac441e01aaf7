//! PDF construction: one full-bleed page image per page.
//!
//! Uses printpdf 0.8 Op-based page construction. Every appended image is
//! stretched to fill the page canvas exactly, matching how the reader site
//! presents its scans (no aspect-ratio preservation, no margins).

use std::path::Path;

use printpdf::{Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, RawImage, XObjectTransform};
use tracing::trace;

use super::Orientation;
use super::error::AssembleError;

/// printpdf places raw images at this nominal resolution; used to compute the
/// stretch factors that make an image span the whole canvas.
const IMAGE_DPI: f32 = 96.0;

/// Millimetres per pixel at [`IMAGE_DPI`].
const MM_PER_PX: f32 = 25.4 / IMAGE_DPI;

/// An accumulating, append-only PDF of full-page images.
///
/// Pages are appended in call order and serialized exactly once by
/// [`BookPdf::save`]; nothing touches the file system before that.
pub struct BookPdf {
    doc: PdfDocument,
    pages: Vec<PdfPage>,
    width: Mm,
    height: Mm,
}

impl BookPdf {
    /// Creates an empty document with an A4 canvas in the given orientation.
    #[must_use]
    pub fn new(title: &str, orientation: Orientation) -> Self {
        let (width, height) = orientation.page_size();
        Self {
            doc: PdfDocument::new(title),
            pages: Vec::new(),
            width,
            height,
        }
    }

    /// Number of pages appended so far.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Decodes `bytes` (JPEG or PNG) and appends it as a new page, stretched
    /// to fill the canvas exactly.
    ///
    /// `url` is only used for error context.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::ImageDecode`] when the bytes cannot be
    /// decoded as an image.
    pub fn append_page_image(&mut self, bytes: &[u8], url: &str) -> Result<(), AssembleError> {
        let mut warnings = Vec::new();
        let image = RawImage::decode_from_bytes(bytes, &mut warnings)
            .map_err(|e| AssembleError::image_decode(url, e.to_string()))?;

        #[allow(clippy::cast_precision_loss)]
        let (px_w, px_h) = (image.width as f32, image.height as f32);
        let image_id = self.doc.add_image(&image);

        // Stretch factors that map the image's native size at IMAGE_DPI onto
        // the full canvas, independently per axis.
        let scale_x = self.width.0 / (px_w * MM_PER_PX);
        let scale_y = self.height.0 / (px_h * MM_PER_PX);
        trace!(px_w, px_h, scale_x, scale_y, "page image decoded");

        let ops = vec![Op::UseXobject {
            id: image_id,
            transform: XObjectTransform {
                translate_x: Some(Mm(0.0).into()),
                translate_y: Some(Mm(0.0).into()),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        }];
        self.pages.push(PdfPage::new(self.width, self.height, ops));
        Ok(())
    }

    /// Serializes the document and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::Io`] when the file cannot be written.
    pub fn save(mut self, path: &Path) -> Result<(), AssembleError> {
        let mut warnings = Vec::new();
        let bytes = self
            .doc
            .with_pages(self.pages)
            .save(&PdfSaveOptions::default(), &mut warnings);
        std::fs::write(path, bytes).map_err(|source| AssembleError::io(path, source))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// A tiny in-memory PNG for decoding tests.
    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let mut out = std::io::Cursor::new(Vec::new());
        let img = image::RgbImage::from_pixel(w, h, image::Rgb([200, 120, 40]));
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_new_document_is_empty() {
        let pdf = BookPdf::new("P1LPM", Orientation::Portrait);
        assert_eq!(pdf.page_count(), 0);
    }

    #[test]
    fn test_append_page_image_grows_document() {
        let mut pdf = BookPdf::new("P1LPM", Orientation::Portrait);
        pdf.append_page_image(&png_bytes(4, 6), "mem://000.png").unwrap();
        pdf.append_page_image(&png_bytes(4, 6), "mem://001.png").unwrap();
        assert_eq!(pdf.page_count(), 2);
    }

    #[test]
    fn test_append_rejects_non_image_bytes() {
        let mut pdf = BookPdf::new("P1LPM", Orientation::Landscape);
        let err = pdf
            .append_page_image(b"<html>not found</html>", "mem://000.jpg")
            .unwrap_err();
        assert!(matches!(err, AssembleError::ImageDecode { .. }));
        assert_eq!(pdf.page_count(), 0, "failed append must not add a page");
    }

    #[test]
    fn test_save_writes_pdf_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("P1LPM.pdf");

        let mut pdf = BookPdf::new("P1LPM", Orientation::Portrait);
        pdf.append_page_image(&png_bytes(4, 6), "mem://000.png").unwrap();
        pdf.save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "output must be a PDF file");

        let doc = lopdf::Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_save_to_unwritable_path_is_io_error() {
        let mut pdf = BookPdf::new("P1LPM", Orientation::Portrait);
        pdf.append_page_image(&png_bytes(2, 2), "mem://000.png").unwrap();
        let err = pdf
            .save(Path::new("/nonexistent-dir/P1LPM.pdf"))
            .unwrap_err();
        assert!(matches!(err, AssembleError::Io { .. }));
    }
}
