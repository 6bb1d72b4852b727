use crate::fonts::StandardFont;
use crate::model::Alignment;

#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphStyle {
    pub name: &'static str,
    pub font: StandardFont,
    pub font_size: f32,
    /// Baseline-to-baseline distance in points.
    pub leading: f32,
    pub alignment: Alignment,
    pub color: Option<[u8; 3]>, // None = black
    pub back_color: Option<[u8; 3]>,
    /// Background box extends this far beyond the text block on every side.
    pub border_padding: f32,
    pub indent_left: f32,
    pub indent_right: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub uppercase: bool,
}

impl ParagraphStyle {
    fn base(name: &'static str, font: StandardFont, font_size: f32, leading: f32) -> Self {
        Self {
            name,
            font,
            font_size,
            leading,
            alignment: Alignment::Left,
            color: None,
            back_color: None,
            border_padding: 0.0,
            indent_left: 0.0,
            indent_right: 0.0,
            space_before: 0.0,
            space_after: 0.0,
            uppercase: false,
        }
    }
}

/// The fixed set of styles every lab record is rendered with.
///
/// Built once per render and shared read-only by every block that refers to it.
#[derive(Clone, Debug)]
pub struct StyleSheet {
    pub heading: ParagraphStyle,
    pub body: ParagraphStyle,
    pub terminal: ParagraphStyle,
    pub table_label: ParagraphStyle,
    pub table_title: ParagraphStyle,
}

impl StyleSheet {
    pub fn new() -> Self {
        let heading = ParagraphStyle {
            space_before: 18.0,
            space_after: 12.0,
            uppercase: true,
            ..ParagraphStyle::base("heading", StandardFont::HelveticaBold, 12.0, 18.0)
        };
        let body = ParagraphStyle {
            space_after: 12.0,
            ..ParagraphStyle::base("body", StandardFont::Helvetica, 11.0, 22.0)
        };
        // Turbo C console look: light grey on black with a padded box.
        let terminal = ParagraphStyle {
            color: Some([0xCC, 0xCC, 0xCC]),
            back_color: Some([0, 0, 0]),
            border_padding: 5.0,
            indent_left: 5.0,
            indent_right: 5.0,
            space_before: 10.0,
            space_after: 20.0,
            ..ParagraphStyle::base("terminal", StandardFont::CourierBold, 10.5, 16.0)
        };
        let table_label =
            ParagraphStyle::base("table_label", StandardFont::HelveticaBold, 10.5, 16.0);
        let table_title = ParagraphStyle {
            alignment: Alignment::Center,
            uppercase: true,
            ..ParagraphStyle::base("table_title", StandardFont::HelveticaBold, 12.0, 18.0)
        };
        Self {
            heading,
            body,
            terminal,
            table_label,
            table_title,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParagraphStyle> {
        [
            &self.heading,
            &self.body,
            &self.terminal,
            &self.table_label,
            &self.table_title,
        ]
        .into_iter()
        .find(|s| s.name == name)
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new()
    }
}
