mod algorithm;
mod config;
mod error;
mod fonts;
mod geometry;
mod model;
mod pdf;
mod record;
mod sections;
mod style;

pub use algorithm::{START_STEP, STOP_STEP, algorithm_steps, normalize_algorithm};
pub use config::{DEFAULT_FOOTER, DEFAULT_WATERMARK, RenderOptions, WATERMARK_ENV};
pub use error::Error;
pub use fonts::StandardFont;
pub use geometry::{A4_HEIGHT, A4_WIDTH, INCH, PageGeometry};
pub use model::{
    Alignment, Block, CellPadding, CellVAlign, Paragraph, Table, TableCell, TableRow, VMerge,
};
pub use pdf::{
    BottomPinSpacer, Flowable, PIN_SAFETY_MARGIN, PageLayout, PageMark, Placement, PlacementKind,
    WATERMARK_ALPHA, WATERMARK_SIZE, layout_record, page_marks, paginate, render, stack_height,
};
pub use record::Record;
pub use sections::{DEFAULT_TITLE, KEEP_PROGRAM_LINES, build_sections};
pub use style::{ParagraphStyle, StyleSheet};

use std::path::Path;
use std::time::Instant;

use base64::Engine;

/// Render `record` and encode the PDF as standard base64, for transports that
/// cannot carry raw binary.
pub fn render_base64(record: &Record, options: &RenderOptions) -> Result<String, Error> {
    let bytes = render(record, options)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

pub fn render_to_file(record: &Record, options: &RenderOptions, output: &Path) -> Result<(), Error> {
    let t0 = Instant::now();

    let bytes = render(record, options)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}

pub fn render_json_file(input: &Path, options: &RenderOptions, output: &Path) -> Result<(), Error> {
    let data = std::fs::read(input).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, input.display())),
        ),
        _ => Error::Io(e),
    })?;
    let record = Record::from_json(&data)?;
    render_to_file(&record, options, output)
}
