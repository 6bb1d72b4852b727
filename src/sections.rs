//! Turns a [`Record`] into the ordered block sequence of the document body.

use crate::algorithm::normalize_algorithm;
use crate::geometry::{INCH, PageGeometry};
use crate::model::{Block, CellPadding, CellVAlign, Paragraph, Table, TableCell, TableRow, VMerge};
use crate::record::Record;
use crate::style::StyleSheet;

const NBSP: char = '\u{a0}';

/// Programs shorter than this many lines are kept on one page with their heading.
pub const KEEP_PROGRAM_LINES: usize = 15;

pub const DEFAULT_TITLE: &str = "EXPERIMENT";

fn nbsp(n: usize) -> String {
    std::iter::repeat_n(NBSP, n).collect()
}

/// Strip a leading `output` label (any case, then any run of `:`, `-`, `.`).
fn strip_output_label(raw: &str) -> &str {
    let text = raw.trim();
    let Some(prefix) = text.get(..6) else {
        return text;
    };
    if !prefix.eq_ignore_ascii_case("output") {
        return text;
    }
    text[6..]
        .trim_start()
        .trim_start_matches([':', '-', '.'])
        .trim_start()
}

fn header_table<'s>(record: &Record, styles: &'s StyleSheet, geometry: &PageGeometry) -> Table<'s> {
    let date = match record.date.trim() {
        "" => nbsp(10),
        d => d.to_string(),
    };
    let title = match record.title.trim() {
        "" => DEFAULT_TITLE,
        t => t,
    };

    let label = |text: String| TableCell {
        paragraph: Some(Paragraph::new(&styles.table_label, &text)),
        v_merge: VMerge::None,
        v_align: CellVAlign::Center,
    };

    let col1 = 1.5 * INCH;
    let col2 = geometry.text_width() - col1;

    Table {
        col_widths: vec![col1, col2],
        rows: vec![
            TableRow {
                cells: vec![
                    label(format!("Exp.no : {}", record.exp_no)),
                    TableCell {
                        paragraph: Some(Paragraph::new(&styles.table_title, title)),
                        v_merge: VMerge::Restart,
                        v_align: CellVAlign::Center,
                    },
                ],
            },
            TableRow {
                cells: vec![
                    label(format!("Date {}: {date}", nbsp(3))),
                    TableCell {
                        paragraph: None,
                        v_merge: VMerge::Continue,
                        v_align: CellVAlign::Center,
                    },
                ],
            },
        ],
        padding: CellPadding {
            top: 5.0,
            bottom: 5.0,
            ..CellPadding::default()
        },
        grid_width: 1.0,
    }
}

/// Build the body of the document for `record`.
///
/// The header table and the algorithm are always present; the aim, program,
/// output and result sections only appear when their field is non-empty. The
/// result pair is handed to the bottom-pin controller.
pub fn build_sections<'s>(
    record: &Record,
    styles: &'s StyleSheet,
    geometry: &PageGeometry,
) -> Vec<Block<'s>> {
    let heading = |text: &str| Block::paragraph(&styles.heading, text);
    let mut blocks = vec![
        Block::Table(header_table(record, styles, geometry)),
        Block::Spacer(0.2 * INCH),
    ];

    if !record.aim.is_empty() {
        blocks.push(heading("AIM :"));
        blocks.push(Block::paragraph(&styles.body, &format!("{}{}", nbsp(5), record.aim)));
    }

    blocks.push(heading("ALGORITHM :"));
    blocks.push(Block::paragraph(&styles.body, &normalize_algorithm(&record.algorithm)));

    if !record.program.is_empty() {
        let program = vec![heading("PROGRAM :"), Block::paragraph(&styles.body, &record.program)];
        let line_count = record.program.split('\n').count();
        if line_count < KEEP_PROGRAM_LINES {
            blocks.push(Block::KeepTogether(program));
        } else {
            log::debug!("program has {line_count} lines; allowing it to span pages");
            blocks.extend(program);
        }
    }

    if !record.output.is_empty() {
        blocks.push(heading("OUTPUT :"));
        blocks.push(Block::paragraph(&styles.terminal, strip_output_label(&record.output)));
    }

    if !record.result.is_empty() {
        blocks.push(Block::PinToBottom(vec![
            heading("RESULT :"),
            Block::paragraph(&styles.body, &format!("{}{}", nbsp(5), record.result)),
        ]));
    }

    blocks
}
