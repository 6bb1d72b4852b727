use crate::style::ParagraphStyle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VMerge {
    None,
    Restart,
    Continue,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellVAlign {
    Top,
    Center,
    Bottom,
}

/// A run of text in a single style. Hard line breaks are kept as separate
/// entries in `lines`; nothing inside the text is ever interpreted as markup.
#[derive(Clone, Debug)]
pub struct Paragraph<'s> {
    pub style: &'s ParagraphStyle,
    pub lines: Vec<String>,
}

impl<'s> Paragraph<'s> {
    pub fn new(style: &'s ParagraphStyle, text: &str) -> Self {
        let text = text.replace("\r\n", "\n");
        Self {
            style,
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    /// The paragraph text with hard breaks rendered back as `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CellPadding {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Default for CellPadding {
    fn default() -> Self {
        Self {
            top: 3.0,
            left: 6.0,
            bottom: 3.0,
            right: 6.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TableCell<'s> {
    pub paragraph: Option<Paragraph<'s>>,
    pub v_merge: VMerge,
    pub v_align: CellVAlign,
}

#[derive(Clone, Debug)]
pub struct TableRow<'s> {
    pub cells: Vec<TableCell<'s>>,
}

/// A grid table; every cell border is drawn with `grid_width`.
#[derive(Clone, Debug)]
pub struct Table<'s> {
    pub col_widths: Vec<f32>, // points
    pub rows: Vec<TableRow<'s>>,
    pub padding: CellPadding,
    pub grid_width: f32,
}

#[derive(Clone, Debug)]
pub enum Block<'s> {
    Paragraph(Paragraph<'s>),
    Table(Table<'s>),
    /// Fixed vertical gap.
    Spacer(f32),
    /// Placed on one page; moved to the next page as a whole if it does not fit.
    KeepTogether(Vec<Block<'s>>),
    /// Kept together and pushed down so it ends at the bottom margin.
    PinToBottom(Vec<Block<'s>>),
}

impl<'s> Block<'s> {
    pub fn paragraph(style: &'s ParagraphStyle, text: &str) -> Self {
        Block::Paragraph(Paragraph::new(style, text))
    }

    /// Every paragraph in this block, descending into groups.
    pub fn paragraphs(&self) -> Vec<&Paragraph<'s>> {
        match self {
            Block::Paragraph(p) => vec![p],
            Block::Table(t) => t
                .rows
                .iter()
                .flat_map(|row| row.cells.iter())
                .filter_map(|cell| cell.paragraph.as_ref())
                .collect(),
            Block::Spacer(_) => Vec::new(),
            Block::KeepTogether(blocks) | Block::PinToBottom(blocks) => {
                blocks.iter().flat_map(|b| b.paragraphs()).collect()
            }
        }
    }
}
