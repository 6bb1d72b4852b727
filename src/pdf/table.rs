use pdf_writer::Content;

use crate::model::{CellVAlign, Table, VMerge};

use super::flow::Flowable;
use super::layout::{TextLine, render_paragraph_lines};

/// Number of rows the cell at (`row`, `col`) covers, counting the vertical
/// merge continuations below it.
fn row_span(table: &Table, row: usize, col: usize) -> usize {
    1 + table.rows[row + 1..]
        .iter()
        .take_while(|r| r.cells.get(col).is_some_and(|c| c.v_merge == VMerge::Continue))
        .count()
}

struct CellLayout {
    lines: Vec<TextLine>,
    content_h: f32,
}

struct TableLayout {
    row_heights: Vec<f32>,
    cells: Vec<Vec<Option<CellLayout>>>, // None for merge continuations and empty cells
}

fn compute_layout(table: &Table) -> TableLayout {
    let pad = &table.padding;
    let mut row_heights = vec![0.0f32; table.rows.len()];
    let mut spanning: Vec<(usize, usize, f32)> = Vec::new(); // (first row, span, needed height)

    let cells: Vec<Vec<Option<CellLayout>>> = table
        .rows
        .iter()
        .enumerate()
        .map(|(ri, row)| {
            row.cells
                .iter()
                .enumerate()
                .map(|(ci, cell)| {
                    if cell.v_merge == VMerge::Continue {
                        return None;
                    }
                    let col_w = table.col_widths.get(ci).copied().unwrap_or(0.0);
                    let text_w = (col_w - pad.left - pad.right).max(1.0);
                    let para = cell.paragraph.as_ref()?;
                    let lines = para.layout(text_w);
                    let content_h = lines.len() as f32 * para.style.leading;
                    let needed = content_h + pad.top + pad.bottom;
                    let span = row_span(table, ri, ci);
                    if span > 1 {
                        spanning.push((ri, span, needed));
                    } else {
                        row_heights[ri] = row_heights[ri].max(needed);
                    }
                    Some(CellLayout { lines, content_h })
                })
                .collect()
        })
        .collect();

    // A merged cell taller than the rows it covers grows its last row.
    for (first, span, needed) in spanning {
        let covered: f32 = row_heights[first..first + span].iter().sum();
        if needed > covered {
            row_heights[first + span - 1] += needed - covered;
        }
    }

    TableLayout { row_heights, cells }
}

impl Table<'_> {
    pub fn width(&self) -> f32 {
        self.col_widths.iter().sum()
    }
}

impl Flowable for Table<'_> {
    fn wrap(&self, _avail_width: f32, _avail_height: f32) -> f32 {
        compute_layout(self).row_heights.iter().sum()
    }

    fn draw(&self, content: &mut Content, x: f32, top: f32, avail_width: f32) {
        let layout = compute_layout(self);
        let pad = &self.padding;
        // Centered on the frame; may overhang the frame padding.
        let table_left = x + (avail_width - self.width()) / 2.0;

        let mut row_top = top;
        for (ri, row) in self.rows.iter().enumerate() {
            let mut cell_x = table_left;
            for (ci, cell) in row.cells.iter().enumerate() {
                let col_w = self.col_widths.get(ci).copied().unwrap_or(0.0);
                if cell.v_merge == VMerge::Continue {
                    cell_x += col_w;
                    continue;
                }
                let span = row_span(self, ri, ci);
                let cell_h: f32 = layout.row_heights[ri..ri + span].iter().sum();

                if let (Some(cl), Some(para)) = (&layout.cells[ri][ci], &cell.paragraph) {
                    let avail = cell_h - pad.top - pad.bottom;
                    let offset = match cell.v_align {
                        CellVAlign::Top => 0.0,
                        CellVAlign::Center => ((avail - cl.content_h) / 2.0).max(0.0),
                        CellVAlign::Bottom => (avail - cl.content_h).max(0.0),
                    };
                    render_paragraph_lines(
                        content,
                        para.style,
                        &cl.lines,
                        cell_x + pad.left,
                        col_w - pad.left - pad.right,
                        row_top - pad.top - offset,
                    );
                }

                content.save_state();
                content.set_line_width(self.grid_width);
                content.set_stroke_gray(0.0);
                content.rect(cell_x, row_top - cell_h, col_w, cell_h);
                content.stroke();
                content.restore_state();

                cell_x += col_w;
            }
            log::debug!("TABLE row={} row_h={:.2} top={:.2}", ri, layout.row_heights[ri], row_top);
            row_top -= layout.row_heights[ri];
        }
    }
}
