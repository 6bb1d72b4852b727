use std::path::PathBuf;

use crate::geometry::PageGeometry;

pub const DEFAULT_FOOTER: &str = "22UCS202 - C Programming";
pub const DEFAULT_WATERMARK: &str = "download.png";

/// Environment variable overriding the watermark image location.
pub const WATERMARK_ENV: &str = "LAB_RECORD_WATERMARK";

#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Image drawn faintly in the middle of every page. A path that does not
    /// exist is skipped without error.
    pub watermark: Option<PathBuf>,
    pub footer_label: String,
    pub geometry: PageGeometry,
}

impl RenderOptions {
    pub fn without_watermark() -> Self {
        Self {
            watermark: None,
            ..Self::default()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        let watermark = std::env::var_os(WATERMARK_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WATERMARK));
        Self {
            watermark: Some(watermark),
            footer_label: DEFAULT_FOOTER.to_string(),
            geometry: PageGeometry::a4(),
        }
    }
}
