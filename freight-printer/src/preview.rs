//! Receipt preview
//!
//! Rebuilds styled text lines from an ESC/POS stream so the screen can show
//! what the printer will produce. Only the command subset the receipt
//! encoder emits is interpreted; everything else is literal text.
//!
//! The same [`LineAccumulator`] backs both [`parse`] and
//! [`crate::escpos::to_lines`], so previewing a directive list and
//! previewing its serialized stream produce identical lines.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::escpos::{ESC, GS};

/// Text shown where the paper is cut
pub const CUT_LINE_TEXT: &str = "✂️ ─────────────────────────────";

/// Horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// `ESC a n` argument
    pub fn code(&self) -> u8 {
        match self {
            Align::Left => 0x00,
            Align::Center => 0x01,
            Align::Right => 0x02,
        }
    }

    /// Anything but 1 or 2 is left
    pub fn from_code(code: u32) -> Self {
        match code {
            0x01 => Align::Center,
            0x02 => Align::Right,
            _ => Align::Left,
        }
    }

    fn css(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Style active when a line was flushed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub bold: bool,
    pub double_height: bool,
    pub align: Align,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_cut: bool,
}

/// One rendered line of the preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLine {
    pub text: String,
    pub style: LineStyle,
}

impl ParsedLine {
    fn cut() -> Self {
        Self {
            text: CUT_LINE_TEXT.to_string(),
            style: LineStyle {
                align: Align::Center,
                bold: false,
                double_height: false,
                is_cut: true,
            },
        }
    }
}

/// Current style plus the text of the line being built
///
/// Style-only changes (bold, size) never break a line; alignment changes,
/// resets and cuts flush pending text first.
#[derive(Debug, Default)]
pub(crate) struct LineAccumulator {
    style: LineStyle,
    buffer: String,
    lines: Vec<ParsedLine>,
}

impl LineAccumulator {
    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            self.lines.push(ParsedLine {
                text: std::mem::take(&mut self.buffer),
                style: self.style,
            });
        }
    }

    pub(crate) fn reset(&mut self) {
        self.flush();
        self.style = LineStyle::default();
    }

    pub(crate) fn set_bold(&mut self, bold: bool) {
        self.style.bold = bold;
    }

    pub(crate) fn set_double_height(&mut self, double_height: bool) {
        self.style.double_height = double_height;
    }

    pub(crate) fn set_align(&mut self, align: Align) {
        self.flush();
        self.style.align = align;
    }

    pub(crate) fn cut(&mut self) {
        self.flush();
        self.lines.push(ParsedLine::cut());
    }

    /// Blank lines become a single space to keep their height
    pub(crate) fn line_feed(&mut self) {
        let text = if self.buffer.is_empty() {
            " ".to_string()
        } else {
            std::mem::take(&mut self.buffer)
        };
        self.lines.push(ParsedLine {
            text,
            style: self.style,
        });
    }

    pub(crate) fn push_char(&mut self, c: char) {
        if c == '\n' {
            self.line_feed();
        } else {
            self.buffer.push(c);
        }
    }

    pub(crate) fn finish(mut self) -> Vec<ParsedLine> {
        self.flush();
        self.lines
    }
}

/// Parse an ESC/POS stream into preview lines
///
/// Total over any input: a truncated command reads its missing argument
/// as 0, and the scan simply stops at the end of the stream.
#[instrument(skip(stream), fields(chars = stream.len()))]
pub fn parse(stream: &str) -> Vec<ParsedLine> {
    let chars: Vec<char> = stream.chars().collect();
    let arg = |at: usize| chars.get(at).map(|c| *c as u32).unwrap_or(0);

    let mut acc = LineAccumulator::default();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match (c, next) {
            // ESC @ - initialize
            (ESC, Some('@')) => {
                acc.reset();
                i += 2;
            }
            // ESC ! n - print mode
            (ESC, Some('!')) => {
                let n = arg(i + 2);
                acc.set_bold(n == 0x10 || n == 0x30);
                acc.set_double_height(n == 0x30);
                i += 3;
            }
            // ESC E n - emphasis
            (ESC, Some('E')) => {
                acc.set_bold(arg(i + 2) != 0);
                i += 3;
            }
            // ESC a n - justification
            (ESC, Some('a')) => {
                acc.set_align(Align::from_code(arg(i + 2)));
                i += 3;
            }
            // ESC M n - font select, no visual effect in preview
            (ESC, Some('M')) => {
                i += 3;
            }
            // GS ! n - character size, width multiplier is not shown
            (GS, Some('!')) => {
                acc.set_double_height(arg(i + 2) & 0x0F != 0);
                i += 3;
            }
            // GS V m n - cut
            (GS, Some('V')) => {
                acc.cut();
                i += 4;
            }
            _ => {
                acc.push_char(c);
                i += 1;
            }
        }
    }

    acc.finish()
}

// ============================================================================
// HTML rendering
// ============================================================================

const BASE_FONT_PX: u32 = 12;
const BASE_LINE_PX: u32 = 16;
/// 80mm paper at 96 dpi, less margins
const PAPER_WIDTH_PX: u32 = 302;
const PAPER_BACKGROUND: &str = "#ffffff";
const INK: &str = "#000000";
const CUT_INK: &str = "#9e9e9e";

/// Render preview lines as an HTML fragment
///
/// Always paper-white with black ink, whatever the host theme: the preview
/// shows the printout, not the app.
pub fn render_html(lines: &[ParsedLine]) -> String {
    let mut html = format!(
        "<div class=\"receipt-preview\" style=\"background:{};color:{};font-family:'Courier New',monospace;width:{}px;padding:8px\">",
        PAPER_BACKGROUND, INK, PAPER_WIDTH_PX
    );

    for line in lines {
        let scale = if line.style.double_height { 2 } else { 1 };
        let weight = if line.style.bold { "bold" } else { "normal" };
        let color = if line.style.is_cut { CUT_INK } else { INK };
        html.push_str(&format!(
            "<div style=\"text-align:{};font-weight:{};font-size:{}px;line-height:{}px;color:{};white-space:pre\">{}</div>",
            line.style.align.css(),
            weight,
            BASE_FONT_PX * scale,
            BASE_LINE_PX * scale,
            color,
            escape_html(&line.text)
        ));
    }

    html.push_str("</div>");
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
