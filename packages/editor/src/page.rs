//! # Page Records
//!
//! A page is the unit the notebook renders and exports: its text plus the
//! paper it is written on. Pages have no identity beyond their position
//! in the [`PageStore`](crate::PageStore).

use serde::{Deserialize, Serialize};

/// Paper background drawn behind the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualStyle {
    Plain,
    /// Blue-lined notebook paper (the default look)
    #[default]
    Ruled,
    Dotted,
    Grid,
    Parchment,
    /// User-supplied background image, see [`Page::background_image`]
    Custom,
}

/// Opaque reference to an image owned by the host (data URL, object URL, path)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Placement of the background image inside the page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundAdjustment {
    pub scale: f64,
    pub rotation_degrees: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for BackgroundAdjustment {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation_degrees: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// One notebook page
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Page content, may contain newlines
    pub text: String,

    pub visual_style: VisualStyle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<ImageRef>,

    #[serde(default)]
    pub background_adjustment: BackgroundAdjustment,
}

impl Page {
    /// Empty page with the default paper
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this page has nothing worth exporting
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Background image to draw, only when the page uses a custom background
    pub fn effective_background(&self) -> Option<&ImageRef> {
        match self.visual_style {
            VisualStyle::Custom => self.background_image.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn apply_field(&mut self, field: PageField) {
        match field {
            PageField::VisualStyle(style) => self.visual_style = style,
            PageField::BackgroundImage(image) => {
                // Picking an image implies the custom paper
                if image.is_some() {
                    self.visual_style = VisualStyle::Custom;
                }
                self.background_image = image;
            }
            PageField::BackgroundAdjustment(adjustment) => {
                self.background_adjustment = adjustment;
            }
        }
    }
}

/// Non-text page field, written through [`PageStore::set_page_field`](crate::PageStore::set_page_field)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum PageField {
    VisualStyle(VisualStyle),
    BackgroundImage(Option<ImageRef>),
    BackgroundAdjustment(BackgroundAdjustment),
}
