//! Two-phase block placement: every block reports the height it would take at
//! a given width (`wrap`) before it is drawn (`draw`). The pagination driver
//! walks the block list once, starting a new page whenever a block does not
//! fit in the space left on the current one.

use pdf_writer::Content;

use crate::error::Error;
use crate::geometry::{INCH, PageGeometry};
use crate::model::{Block, Paragraph, Table};

use super::layout::render_paragraph_lines;

/// Extra room reserved below a bottom-pinned group so rounding can never push
/// it onto the next page.
pub const PIN_SAFETY_MARGIN: f32 = 0.05 * INCH;

/// How far past the available height a spacer reports when its group does
/// not fit, which makes the paginator break the page.
const PIN_OVERFLOW: f32 = 10.0;

const EPSILON: f32 = 0.01;

pub trait Flowable {
    /// Height the block occupies when laid out `avail_width` wide. Must not draw.
    fn wrap(&self, avail_width: f32, avail_height: f32) -> f32;

    fn space_before(&self) -> f32 {
        0.0
    }

    fn space_after(&self) -> f32 {
        0.0
    }

    /// Draw with the block's top edge at `top`.
    fn draw(&self, content: &mut Content, x: f32, top: f32, avail_width: f32);
}

/// Height of `blocks` stacked one after another, including the gaps between
/// them but not the space before the first or after the last.
pub fn stack_height(blocks: &[Block], avail_width: f32, avail_height: f32) -> f32 {
    let mut total = 0.0f32;
    let mut prev_after: Option<f32> = None;
    for block in blocks {
        if let Some(after) = prev_after {
            total += after.max(block.space_before());
        }
        total += block.wrap(avail_width, avail_height);
        prev_after = Some(block.space_after());
    }
    total
}

impl Flowable for Block<'_> {
    fn wrap(&self, avail_width: f32, avail_height: f32) -> f32 {
        match self {
            Block::Paragraph(p) => p.wrap(avail_width, avail_height),
            Block::Table(t) => t.wrap(avail_width, avail_height),
            Block::Spacer(h) => *h,
            Block::KeepTogether(blocks) | Block::PinToBottom(blocks) => {
                stack_height(blocks, avail_width, avail_height)
            }
        }
    }

    fn space_before(&self) -> f32 {
        match self {
            Block::Paragraph(p) => p.space_before(),
            Block::Table(t) => t.space_before(),
            Block::Spacer(_) => 0.0,
            Block::KeepTogether(blocks) | Block::PinToBottom(blocks) => {
                blocks.first().map_or(0.0, |b| b.space_before())
            }
        }
    }

    fn space_after(&self) -> f32 {
        match self {
            Block::Paragraph(p) => p.space_after(),
            Block::Table(t) => t.space_after(),
            Block::Spacer(_) => 0.0,
            Block::KeepTogether(blocks) | Block::PinToBottom(blocks) => {
                blocks.last().map_or(0.0, |b| b.space_after())
            }
        }
    }

    fn draw(&self, content: &mut Content, x: f32, top: f32, avail_width: f32) {
        match self {
            Block::Paragraph(p) => p.draw(content, x, top, avail_width),
            Block::Table(t) => t.draw(content, x, top, avail_width),
            Block::Spacer(_) => {}
            Block::KeepTogether(blocks) | Block::PinToBottom(blocks) => {
                let mut y = top;
                let mut prev_after: Option<f32> = None;
                for block in blocks {
                    if let Some(after) = prev_after {
                        y -= after.max(block.space_before());
                    }
                    block.draw(content, x, y, avail_width);
                    y -= block.wrap(avail_width, f32::INFINITY);
                    prev_after = Some(block.space_after());
                }
            }
        }
    }
}

/// Invisible spacer that consumes exactly enough of the page for `targets`
/// to end at the bottom margin.
///
/// If the targets do not fit in the available height the spacer asks for more
/// than is available, which makes the paginator move on to a fresh page where
/// the spacer is measured again.
pub struct BottomPinSpacer<'a, 's> {
    targets: &'a [Block<'s>],
}

impl<'a, 's> BottomPinSpacer<'a, 's> {
    pub fn new(targets: &'a [Block<'s>]) -> Self {
        Self { targets }
    }

    /// Height the targets need, safety margin included.
    pub fn required_height(&self, avail_width: f32, avail_height: f32) -> f32 {
        stack_height(self.targets, avail_width, avail_height) + PIN_SAFETY_MARGIN
    }
}

impl Flowable for BottomPinSpacer<'_, '_> {
    fn wrap(&self, avail_width: f32, avail_height: f32) -> f32 {
        let needed = self.required_height(avail_width, avail_height);
        if avail_height < needed {
            avail_height + PIN_OVERFLOW
        } else {
            avail_height - needed
        }
    }

    fn draw(&self, _content: &mut Content, _x: f32, _top: f32, _avail_width: f32) {}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlacementKind {
    Paragraph { style: &'static str },
    Table,
    Spacer,
    PinSpacer,
}

/// Where a block (or a page-sized slice of a paragraph) ended up.
#[derive(Clone, Debug)]
pub struct Placement {
    pub kind: PlacementKind,
    pub text: String,
    pub page: usize,
    pub top: f32,
    pub bottom: f32,
}

pub struct PageLayout {
    pub(crate) content: Content,
    pub placements: Vec<Placement>,
}

struct Paginator<'g> {
    geometry: &'g PageGeometry,
    pages: Vec<PageLayout>,
    content: Content,
    placements: Vec<Placement>,
    cursor: f32,
    prev_space_after: f32,
    /// Set after a bottom-pin spacer: the next block sits directly below it.
    suppress_gap: bool,
}

impl<'g> Paginator<'g> {
    fn new(geometry: &'g PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            content: Content::new(),
            placements: Vec::new(),
            cursor: geometry.frame_top(),
            prev_space_after: 0.0,
            suppress_gap: false,
        }
    }

    fn width(&self) -> f32 {
        self.geometry.frame_width()
    }

    fn at_top(&self) -> bool {
        (self.cursor - self.geometry.frame_top()).abs() < EPSILON
    }

    fn available(&self) -> f32 {
        self.cursor - self.geometry.frame_bottom()
    }

    fn page_index(&self) -> usize {
        self.pages.len()
    }

    /// Gap above a block with the given space-before. Space before is dropped
    /// at the top of a page.
    fn gap(&self, space_before: f32) -> f32 {
        if self.at_top() || self.suppress_gap {
            0.0
        } else {
            self.prev_space_after.max(space_before)
        }
    }

    fn new_page(&mut self) {
        log::debug!(
            "page {} full at y={:.2}, starting page {}",
            self.page_index() + 1,
            self.cursor,
            self.page_index() + 2
        );
        self.pages.push(PageLayout {
            content: std::mem::replace(&mut self.content, Content::new()),
            placements: std::mem::take(&mut self.placements),
        });
        self.cursor = self.geometry.frame_top();
        self.prev_space_after = 0.0;
        self.suppress_gap = false;
    }

    fn record(&mut self, kind: PlacementKind, text: String, top: f32, bottom: f32) {
        self.placements.push(Placement {
            kind,
            text,
            page: self.page_index(),
            top,
            bottom,
        });
    }

    fn place(&mut self, block: &Block) -> Result<(), Error> {
        match block {
            Block::Paragraph(p) => self.place_paragraph(p),
            Block::Table(t) => self.place_table(t),
            Block::Spacer(h) => {
                let gap = self.gap(0.0);
                if gap + h > self.available() {
                    // A spacer that would cross the page boundary is dropped.
                    self.new_page();
                    return Ok(());
                }
                let top = self.cursor - gap;
                self.cursor = top - h;
                self.record(PlacementKind::Spacer, String::new(), top, self.cursor);
                self.prev_space_after = 0.0;
                self.suppress_gap = false;
                Ok(())
            }
            Block::KeepTogether(blocks) => self.place_together(blocks),
            Block::PinToBottom(blocks) => self.place_pinned(blocks),
        }
    }

    /// Tables are never split; one that does not fit starts a new page.
    fn place_table(&mut self, table: &Table) -> Result<(), Error> {
        loop {
            let gap = self.gap(table.space_before());
            let h = table.wrap(self.width(), self.available() - gap);
            if gap + h <= self.available() + EPSILON {
                let top = self.cursor - gap;
                let (x, width) = (self.geometry.frame_x(), self.width());
                table.draw(&mut self.content, x, top, width);
                self.cursor = top - h;
                let text = table
                    .rows
                    .iter()
                    .flat_map(|row| row.cells.iter())
                    .filter_map(|cell| cell.paragraph.as_ref())
                    .map(|p| p.text())
                    .collect::<Vec<_>>()
                    .join("\n");
                self.record(PlacementKind::Table, text, top, self.cursor);
                self.prev_space_after = table.space_after();
                self.suppress_gap = false;
                return Ok(());
            }
            if self.at_top() {
                return Err(Error::Layout(format!(
                    "table of height {h:.1}pt does not fit on an empty page ({:.1}pt)",
                    self.geometry.frame_height()
                )));
            }
            self.new_page();
        }
    }

    /// Place a paragraph, splitting it between lines when it runs past the
    /// bottom of the page.
    fn place_paragraph(&mut self, para: &Paragraph) -> Result<(), Error> {
        let style = para.style;
        let lines = para.layout(self.width());
        let mut start = 0usize;

        while start < lines.len() {
            let gap = self.gap(style.space_before);
            let room = self.available() - gap;
            let remaining = lines.len() - start;
            let fit = (((room + EPSILON) / style.leading).floor().max(0.0) as usize).min(remaining);

            if fit == 0 {
                if self.at_top() {
                    return Err(Error::Layout(format!(
                        "line of {:.1}pt in style '{}' does not fit on an empty page",
                        style.leading, style.name
                    )));
                }
                self.new_page();
                continue;
            }

            let slice = &lines[start..start + fit];
            let top = self.cursor - gap;
            let (x, width) = (self.geometry.frame_x(), self.width());
            render_paragraph_lines(&mut self.content, style, slice, x, width, top);
            self.cursor = top - fit as f32 * style.leading;
            let text = slice.iter().map(|l| l.text()).collect::<Vec<_>>().join("\n");
            self.record(
                PlacementKind::Paragraph { style: style.name },
                text,
                top,
                self.cursor,
            );
            self.prev_space_after = style.space_after;
            self.suppress_gap = false;
            start += fit;

            if start < lines.len() {
                log::debug!(
                    "paragraph '{}' split after {} of {} lines",
                    style.name,
                    start,
                    lines.len()
                );
                self.new_page();
            }
        }
        Ok(())
    }

    /// Place a group on one page, moving it to a fresh page first when it does
    /// not fit. A group taller than a whole page flows normally.
    fn place_together(&mut self, blocks: &[Block]) -> Result<(), Error> {
        let space_before = blocks.first().map_or(0.0, |b| b.space_before());
        let gap = self.gap(space_before);
        let h = stack_height(blocks, self.width(), self.available());
        if gap + h > self.available() + EPSILON && !self.at_top() {
            log::debug!("group of {h:.2}pt moved to next page");
            self.new_page();
        }
        for block in blocks {
            self.place(block)?;
        }
        Ok(())
    }

    fn place_pinned(&mut self, blocks: &[Block]) -> Result<(), Error> {
        let spacer = BottomPinSpacer::new(blocks);
        loop {
            let gap = if self.at_top() { 0.0 } else { self.prev_space_after };
            let avail = self.available() - gap;
            let h = spacer.wrap(self.width(), avail);
            if h <= avail {
                let top = self.cursor - gap;
                let (x, width) = (self.geometry.frame_x(), self.width());
                spacer.draw(&mut self.content, x, top, width);
                self.cursor = top - h;
                self.record(PlacementKind::PinSpacer, String::new(), top, self.cursor);
                self.prev_space_after = 0.0;
                self.suppress_gap = true;
                return self.place_together(blocks);
            }
            if self.at_top() {
                log::warn!(
                    "bottom-pinned group needs {:.1}pt, more than a full page; placing it unpinned",
                    spacer.required_height(self.width(), avail)
                );
                return self.place_together(blocks);
            }
            self.new_page();
        }
    }

    fn finish(mut self) -> Vec<PageLayout> {
        self.pages.push(PageLayout {
            content: self.content,
            placements: self.placements,
        });
        self.pages
    }
}

/// Lay out `blocks` on as many pages as they need.
pub fn paginate(blocks: &[Block], geometry: &PageGeometry) -> Result<Vec<PageLayout>, Error> {
    let mut paginator = Paginator::new(geometry);
    for block in blocks {
        paginator.place(block)?;
    }
    let pages = paginator.finish();
    log::debug!("paginated {} blocks onto {} pages", blocks.len(), pages.len());
    Ok(pages)
}
