pub const INCH: f32 = 72.0;

pub const A4_WIDTH: f32 = 595.2756;
pub const A4_HEIGHT: f32 = 841.8898;

/// Fixed page layout shared by every page of a document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Inner padding of the content frame, on every side.
    pub frame_padding: f32,
    /// Horizontal inset of the decorations (header text, border, footer).
    pub decoration_inset: f32,
}

impl PageGeometry {
    pub fn a4() -> Self {
        let margin_x = 0.5 * INCH;
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin_top: 0.8 * INCH,
            margin_bottom: 0.8 * INCH,
            margin_left: margin_x + 0.1 * INCH,
            margin_right: margin_x + 0.1 * INCH,
            frame_padding: 6.0,
            decoration_inset: margin_x,
        }
    }

    /// Width between the left and right margins.
    pub fn text_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    pub fn frame_x(&self) -> f32 {
        self.margin_left + self.frame_padding
    }

    pub fn frame_width(&self) -> f32 {
        self.text_width() - 2.0 * self.frame_padding
    }

    pub fn frame_top(&self) -> f32 {
        self.page_height - self.margin_top - self.frame_padding
    }

    pub fn frame_bottom(&self) -> f32 {
        self.margin_bottom + self.frame_padding
    }

    pub fn frame_height(&self) -> f32 {
        self.frame_top() - self.frame_bottom()
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}
