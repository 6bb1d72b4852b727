mod common;

use lab_record_pdf::{
    DEFAULT_FOOTER, PageGeometry, PageMark, StandardFont, WATERMARK_ALPHA, WATERMARK_SIZE,
    page_marks,
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

fn texts(marks: &[PageMark]) -> Vec<(&str, f32, f32)> {
    marks
        .iter()
        .filter_map(|m| match m {
            PageMark::Text { text, x, y, .. } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
        .collect()
}

#[test]
fn header_border_and_footer_positions() {
    let geometry = PageGeometry::a4();
    let record = common::record("t");
    let marks = page_marks(&record, &geometry, DEFAULT_FOOTER, false);
    assert_eq!(marks.len(), 4);

    let texts = texts(&marks);
    let (name, x, y) = texts[0];
    assert_eq!(name, "Name : Alice");
    assert!(approx(x, 36.0));
    assert!(approx(y, geometry.page_height - 36.0));

    let (reg, x, y) = texts[1];
    assert_eq!(reg, "Reg no : 21CS042");
    assert!(approx(y, geometry.page_height - 36.0));
    let reg_width = StandardFont::HelveticaBold.word_width(reg, 10.5);
    assert!(approx(x + reg_width, geometry.page_width - 36.0));

    let (footer, x, y) = texts[2];
    assert_eq!(footer, "22UCS202 - C Programming");
    assert!(approx(y, 32.4));
    let footer_width = StandardFont::Helvetica.word_width(footer, 10.0);
    assert!(approx(x + footer_width, geometry.page_width - 36.0));

    let border = marks
        .iter()
        .find_map(|m| match m {
            PageMark::Rect {
                x,
                y,
                width,
                height,
                line_width,
            } => Some((*x, *y, *width, *height, *line_width)),
            _ => None,
        })
        .expect("border rectangle");
    assert!(approx(border.0, 36.0));
    assert!(approx(border.1, 50.4));
    assert!(approx(border.2, geometry.page_width - 72.0));
    assert!(approx(border.1 + border.3, geometry.page_height - 46.8));
    assert!(approx(border.4, 1.0));
}

#[test]
fn border_encloses_the_content_frame() {
    let geometry = PageGeometry::a4();
    let marks = page_marks(&common::record("t"), &geometry, "", false);
    let Some(PageMark::Rect {
        x,
        y,
        width,
        height,
        ..
    }) = marks.iter().find(|m| matches!(m, PageMark::Rect { .. }))
    else {
        panic!("no border");
    };
    assert!(*x < geometry.frame_x());
    assert!(*y < geometry.frame_bottom());
    assert!(x + width > geometry.frame_x() + geometry.frame_width());
    assert!(y + height > geometry.frame_top());
}

#[test]
fn watermark_is_centered_and_faint() {
    let geometry = PageGeometry::a4();
    let marks = page_marks(&common::record("t"), &geometry, DEFAULT_FOOTER, true);
    assert_eq!(marks.len(), 5);

    let Some(PageMark::Image {
        x,
        y,
        width,
        height,
        alpha,
    }) = marks.last()
    else {
        panic!("watermark must be drawn last");
    };
    assert!(approx(*width, 360.0));
    assert!(approx(*height, WATERMARK_SIZE));
    assert!(approx(*x, (geometry.page_width - 360.0) / 2.0));
    assert!(approx(*y, (geometry.page_height - 360.0) / 2.0));
    assert!(approx(*alpha, WATERMARK_ALPHA));
    assert!(approx(*alpha, 0.1));
}

#[test]
fn empty_fields_keep_their_labels() {
    let geometry = PageGeometry::a4();
    let record = lab_record_pdf::Record::default();
    let marks = page_marks(&record, &geometry, "Custom footer", false);
    let texts = texts(&marks);
    assert_eq!(texts[0].0, "Name : ");
    assert_eq!(texts[1].0, "Reg no : ");
    assert_eq!(texts[2].0, "Custom footer");
}

#[test]
fn marks_do_not_depend_on_content() {
    let geometry = PageGeometry::a4();
    let mut long = common::record("t");
    long.program = common::numbered_lines("line", 200);
    assert_eq!(
        page_marks(&long, &geometry, DEFAULT_FOOTER, true),
        page_marks(&common::record("other"), &geometry, DEFAULT_FOOTER, true)
    );
}
