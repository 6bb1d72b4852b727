use pdf_writer::{Content, Name, Str};

use crate::fonts::to_winansi_bytes;
use crate::model::{Alignment, Paragraph};
use crate::style::ParagraphStyle;

use super::flow::Flowable;

pub(super) struct WordChunk {
    pub(super) text: String,
    pub(super) x_offset: f32, // x relative to line start
    pub(super) width: f32,
}

pub(crate) struct TextLine {
    pub(super) chunks: Vec<WordChunk>,
    pub(super) total_width: f32,
}

impl TextLine {
    /// The words of the line joined by single spaces.
    pub(crate) fn text(&self) -> String {
        self.chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn finish_line(chunks: &mut Vec<WordChunk>) -> TextLine {
    let total_width = chunks.last().map(|c| c.x_offset + c.width).unwrap_or(0.0);
    TextLine {
        chunks: std::mem::take(chunks),
        total_width,
    }
}

/// Words are separated by breaking whitespace only; non-breaking spaces stay
/// inside the word so indentation runs survive.
fn words(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() && c != '\u{a0}')
        .filter(|w| !w.is_empty())
}

/// Cut a word wider than the line into pieces that fit, character by character.
fn break_long_word(word: &str, style: &ParagraphStyle, max_width: f32) -> Vec<(String, f32)> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_w = 0.0f32;
    for ch in word.chars() {
        let cw = style.font.char_width_1000(ch) * style.font_size / 1000.0;
        if !current.is_empty() && current_w + cw > max_width {
            pieces.push((std::mem::take(&mut current), current_w));
            current_w = 0.0;
        }
        current.push(ch);
        current_w += cw;
    }
    if !current.is_empty() {
        pieces.push((current, current_w));
    }
    pieces
}

/// Layout a paragraph into wrapped lines. Each hard break starts a new line;
/// an empty hard line still produces an (empty) output line.
pub(crate) fn build_paragraph_lines(para: &Paragraph, max_width: f32) -> Vec<TextLine> {
    let style = para.style;
    let space_w = style.font.space_width(style.font_size);
    let mut lines: Vec<TextLine> = Vec::new();

    for hard_line in &para.lines {
        let text = if style.uppercase {
            hard_line.to_uppercase()
        } else {
            hard_line.clone()
        };
        let mut current_chunks: Vec<WordChunk> = Vec::new();
        let mut current_x: f32 = 0.0;

        for word in words(&text) {
            let ww = style.font.word_width(word, style.font_size);
            let pieces = if ww > max_width {
                break_long_word(word, style, max_width)
            } else {
                vec![(word.to_string(), ww)]
            };

            for (piece, pw) in pieces {
                let proposed_x = if current_chunks.is_empty() {
                    current_x
                } else {
                    current_x + space_w
                };
                if !current_chunks.is_empty() && proposed_x + pw > max_width {
                    lines.push(finish_line(&mut current_chunks));
                    current_x = 0.0;
                } else {
                    current_x = proposed_x;
                }
                current_chunks.push(WordChunk {
                    text: piece,
                    x_offset: current_x,
                    width: pw,
                });
                current_x += pw;
            }
        }
        lines.push(finish_line(&mut current_chunks));
    }

    if lines.is_empty() {
        lines.push(TextLine {
            chunks: vec![],
            total_width: 0.0,
        });
    }
    lines
}

fn set_fill(content: &mut Content, color: Option<[u8; 3]>) {
    match color {
        Some([r, g, b]) => {
            content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        }
        None => {
            content.set_fill_gray(0.0);
        }
    }
}

/// Draw pre-built lines of one paragraph (or a page-sized slice of it) with
/// the top of the first line at `top`. `x` and `width` describe the column
/// the paragraph flows in; style indents are applied here.
pub(crate) fn render_paragraph_lines(
    content: &mut Content,
    style: &ParagraphStyle,
    lines: &[TextLine],
    x: f32,
    width: f32,
    top: f32,
) {
    if lines.is_empty() {
        return;
    }
    let text_x = x + style.indent_left;
    let text_width = (width - style.indent_left - style.indent_right).max(1.0);
    let block_h = lines.len() as f32 * style.leading;

    if let Some(bg) = style.back_color {
        let p = style.border_padding;
        content.save_state();
        set_fill(content, Some(bg));
        content.rect(text_x - p, top - block_h - p, text_width + 2.0 * p, block_h + 2.0 * p);
        content.fill_nonzero();
        content.restore_state();
    }

    if lines.iter().all(|l| l.chunks.is_empty()) {
        return;
    }

    let first_baseline = top - style.font_size * style.font.ascender_ratio();
    content.save_state();
    set_fill(content, style.color);
    content.begin_text();
    content.set_font(Name(style.font.pdf_name().as_bytes()), style.font_size);
    let mut td_x = 0.0_f32;
    let mut td_y = 0.0_f32;

    for (line_num, line) in lines.iter().enumerate() {
        let y = first_baseline - line_num as f32 * style.leading;
        let line_start_x = match style.alignment {
            Alignment::Center => text_x + (text_width - line.total_width) / 2.0,
            Alignment::Left => text_x,
        };
        for chunk in &line.chunks {
            let cx = line_start_x + chunk.x_offset;
            content.next_line(cx - td_x, y - td_y);
            td_x = cx;
            td_y = y;
            content.show(Str(&to_winansi_bytes(&chunk.text)));
        }
    }
    content.end_text();
    content.restore_state();
}

impl Flowable for Paragraph<'_> {
    fn wrap(&self, avail_width: f32, _avail_height: f32) -> f32 {
        self.layout(avail_width).len() as f32 * self.style.leading
    }

    fn space_before(&self) -> f32 {
        self.style.space_before
    }

    fn space_after(&self) -> f32 {
        self.style.space_after
    }

    fn draw(&self, content: &mut Content, x: f32, top: f32, avail_width: f32) {
        let lines = self.layout(avail_width);
        render_paragraph_lines(content, self.style, &lines, x, avail_width, top);
    }
}

impl Paragraph<'_> {
    /// Wrapped lines for a column `avail_width` wide (style indents applied).
    pub(crate) fn layout(&self, avail_width: f32) -> Vec<TextLine> {
        let text_width =
            (avail_width - self.style.indent_left - self.style.indent_right).max(1.0);
        build_paragraph_lines(self, text_width)
    }
}
