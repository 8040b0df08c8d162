//! # Export Adapter
//!
//! Turns pages into a PNG or a multi-page PDF using external rendering
//! capabilities.
//!
//! The region to export is captured synchronously when the export is
//! requested: a [`RegionHandle`] owns a copy of the page and the text style.
//! Rasterization happens later, asynchronously, and only ever sees that
//! copy, so switching or editing pages while an export is in flight does
//! not change what gets exported.

use crate::config::ExportSettings;
use async_trait::async_trait;
use std::future::Future;
use std::io::Cursor;
use std::sync::Arc;
use thiserror::Error;
use writify_editor::{EditSession, Page, TextStyle};

pub const PNG_MIME_TYPE: &str = "image/png";
pub const PDF_MIME_TYPE: &str = "application/pdf";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export: the page is empty")]
    NothingToExport,

    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    #[error("PDF assembly failed: {0}")]
    Assemble(String),

    /// `expected` is `None` when the dimensions overflow `usize`
    #[error("Bitmap of {width}x{height} needs {expected:?} bytes, got {actual}")]
    InvalidBitmap {
        width: u32,
        height: u32,
        expected: Option<usize>,
        actual: usize,
    },

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Snapshot of the on-screen region of one page
#[derive(Debug, Clone, PartialEq)]
pub struct RegionHandle {
    pub page_index: usize,
    pub page: Page,
    pub text_style: TextStyle,
}

impl RegionHandle {
    pub fn capture(session: &EditSession, page_index: usize) -> Self {
        Self {
            page_index,
            page: session.pages().page(page_index).clone(),
            text_style: session.text_style().clone(),
        }
    }

    /// Inline style of the text area
    pub fn css(&self) -> String {
        self.text_style.to_css()
    }

    pub fn is_blank(&self) -> bool {
        self.page.is_blank()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    pub scale: f64,
    pub transparent_background: bool,
    pub use_cors: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        RasterOptions::from(&ExportSettings::default())
    }
}

impl From<&ExportSettings> for RasterOptions {
    fn from(settings: &ExportSettings) -> Self {
        Self {
            scale: settings.scale,
            transparent_background: settings.transparent_background,
            use_cors: settings.use_cors,
        }
    }
}

/// RGBA8 bitmap produced by a rasterizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ExportError> {
        match rgba_len(width, height) {
            Some(expected) if expected == rgba.len() => {}
            expected => {
                return Err(ExportError::InvalidBitmap {
                    width,
                    height,
                    expected,
                    actual: rgba.len(),
                });
            }
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let buffer = image::RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
            .ok_or(ExportError::InvalidBitmap {
                width: self.width,
                height: self.height,
                expected: rgba_len(self.width, self.height),
                actual: self.rgba.len(),
            })?;

        let mut bytes = Vec::new();
        buffer.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Byte length of an RGBA8 bitmap, `None` on overflow
fn rgba_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
}

/// Renders a captured region to a bitmap
///
/// May fail, e.g. when a cross-origin background taints the canvas.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(
        &self,
        region: &RegionHandle,
        options: &RasterOptions,
    ) -> Result<RasterImage, ExportError>;
}

/// Builds a PDF with one page per bitmap, in order
#[async_trait]
pub trait PdfAssembler: Send + Sync {
    async fn assemble_pdf(&self, pages: Vec<RasterImage>) -> Result<Vec<u8>, ExportError>;
}

/// A finished download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct Exporter {
    rasterizer: Arc<dyn Rasterizer>,
    assembler: Arc<dyn PdfAssembler>,
    settings: ExportSettings,
}

impl Exporter {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, assembler: Arc<dyn PdfAssembler>) -> Self {
        Self::with_settings(rasterizer, assembler, ExportSettings::default())
    }

    pub fn with_settings(
        rasterizer: Arc<dyn Rasterizer>,
        assembler: Arc<dyn PdfAssembler>,
        settings: ExportSettings,
    ) -> Self {
        Self {
            rasterizer,
            assembler,
            settings,
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn capture_current(&self, session: &EditSession) -> RegionHandle {
        RegionHandle::capture(session, session.current_index())
    }

    pub fn capture_all(&self, session: &EditSession) -> Vec<RegionHandle> {
        (0..session.page_count())
            .map(|index| RegionHandle::capture(session, index))
            .collect()
    }

    /// Export the current page as PNG
    ///
    /// The page is captured before this returns; the future does not borrow
    /// the session.
    pub fn export_image(
        &self,
        session: &EditSession,
    ) -> impl Future<Output = Result<ExportArtifact, ExportError>> + '_ {
        let region = self.capture_current(session);
        self.export_region_image(region)
    }

    /// Export every page, in order, as one PDF
    pub fn export_pdf(
        &self,
        session: &EditSession,
    ) -> impl Future<Output = Result<ExportArtifact, ExportError>> + '_ {
        let regions = self.capture_all(session);
        self.export_regions_pdf(regions)
    }

    pub async fn export_region_image(
        &self,
        region: RegionHandle,
    ) -> Result<ExportArtifact, ExportError> {
        if region.is_blank() {
            return Err(ExportError::NothingToExport);
        }

        let options = RasterOptions::from(&self.settings);
        let bitmap = self.rasterizer.rasterize(&region, &options).await?;
        let bytes = bitmap.encode_png()?;

        tracing::info!(
            page = region.page_index,
            width = bitmap.width(),
            height = bitmap.height(),
            "exported page image"
        );

        Ok(ExportArtifact {
            file_name: self.settings.file_name.clone(),
            mime_type: PNG_MIME_TYPE,
            bytes,
        })
    }

    pub async fn export_regions_pdf(
        &self,
        regions: Vec<RegionHandle>,
    ) -> Result<ExportArtifact, ExportError> {
        let options = RasterOptions::from(&self.settings);
        let mut bitmaps = Vec::with_capacity(regions.len());
        for region in &regions {
            bitmaps.push(self.rasterizer.rasterize(region, &options).await?);
        }

        let bytes = self.assembler.assemble_pdf(bitmaps).await?;
        tracing::info!(pages = regions.len(), "exported notebook PDF");

        Ok(ExportArtifact {
            file_name: self.settings.pdf_file_name.clone(),
            mime_type: PDF_MIME_TYPE,
            bytes,
        })
    }
}
