use pdf_writer::{Content, Name, Str};

use crate::fonts::{StandardFont, to_winansi_bytes};
use crate::geometry::{INCH, PageGeometry};
use crate::record::Record;

pub const WATERMARK_SIZE: f32 = 5.0 * INCH;
pub const WATERMARK_ALPHA: f32 = 0.1;

/// Resource names shared with the page resource dictionaries.
pub(crate) const WATERMARK_XOBJECT: &str = "Im1";
pub(crate) const WATERMARK_GSTATE: &str = "GsWm";

/// One drawing command of the per-page chrome.
#[derive(Clone, Debug, PartialEq)]
pub enum PageMark {
    /// Text with its baseline starting at (`x`, `y`).
    Text {
        font: StandardFont,
        size: f32,
        x: f32,
        y: f32,
        text: String,
    },
    /// Stroked rectangle.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        alpha: f32,
    },
}

fn right_aligned(font: StandardFont, size: f32, right: f32, y: f32, text: String) -> PageMark {
    PageMark::Text {
        font,
        size,
        x: right - font.word_width(&text, size),
        y,
        text,
    }
}

/// The chrome drawn on every page: student name and register number above
/// the border, the border itself, the footer label and the watermark.
///
/// Depends only on the record and the geometry, so every page of a document
/// gets the same marks.
pub fn page_marks(
    record: &Record,
    geometry: &PageGeometry,
    footer_label: &str,
    watermark: bool,
) -> Vec<PageMark> {
    let inset = geometry.decoration_inset;
    let right = geometry.page_width - inset;
    let header_y = geometry.page_height - 0.5 * INCH;
    let bold = StandardFont::HelveticaBold;

    let box_bottom = 0.7 * INCH;
    let box_top = geometry.page_height - 0.65 * INCH;

    let mut marks = vec![
        PageMark::Text {
            font: bold,
            size: 10.5,
            x: inset,
            y: header_y,
            text: format!("Name : {}", record.name),
        },
        right_aligned(bold, 10.5, right, header_y, format!("Reg no : {}", record.reg_no)),
        PageMark::Rect {
            x: inset,
            y: box_bottom,
            width: geometry.page_width - 2.0 * inset,
            height: box_top - box_bottom,
            line_width: 1.0,
        },
        right_aligned(
            StandardFont::Helvetica,
            10.0,
            right,
            0.45 * INCH,
            footer_label.to_string(),
        ),
    ];

    if watermark {
        marks.push(PageMark::Image {
            x: (geometry.page_width - WATERMARK_SIZE) / 2.0,
            y: (geometry.page_height - WATERMARK_SIZE) / 2.0,
            width: WATERMARK_SIZE,
            height: WATERMARK_SIZE,
            alpha: WATERMARK_ALPHA,
        });
    }
    marks
}

/// Emit content operators for `marks`.
pub(crate) fn paint(content: &mut Content, marks: &[PageMark]) {
    content.save_state();
    for mark in marks {
        match mark {
            PageMark::Text {
                font,
                size,
                x,
                y,
                text,
            } => {
                content.set_fill_gray(0.0);
                content.begin_text();
                content.set_font(Name(font.pdf_name().as_bytes()), *size);
                content.next_line(*x, *y);
                content.show(Str(&to_winansi_bytes(text)));
                content.end_text();
            }
            PageMark::Rect {
                x,
                y,
                width,
                height,
                line_width,
            } => {
                content.set_stroke_gray(0.0);
                content.set_line_width(*line_width);
                content.rect(*x, *y, *width, *height);
                content.stroke();
            }
            PageMark::Image {
                x,
                y,
                width,
                height,
                ..
            } => {
                // The alpha lives in the page's ExtGState resource.
                content.save_state();
                content.set_parameters(Name(WATERMARK_GSTATE.as_bytes()));
                content.transform([*width, 0.0, 0.0, *height, *x, *y]);
                content.x_object(Name(WATERMARK_XOBJECT.as_bytes()));
                content.restore_state();
            }
        }
    }
    content.restore_state();
}
