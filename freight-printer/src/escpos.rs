//! ESC/POS directives
//!
//! A receipt is built as a list of [`Directive`]s and then serialized
//! one of two ways:
//! - [`to_escpos`]: the control-code stream sent to a printer
//! - [`to_lines`]: preview lines, without a serialize/re-parse round trip
//!
//! The directive set is exactly what [`crate::preview::parse`] understands,
//! so a stream produced here always previews correctly.

use tracing::instrument;

use crate::preview::{Align, LineAccumulator, ParsedLine};

pub const ESC: char = '\x1B';
pub const GS: char = '\x1D';
pub const LF: char = '\n';

/// Lines fed before the cutter engages
const CUT_FEED_LINES: u8 = 3;

/// Character magnification (1 or 2 on receipt printers, up to 8 on some)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSize {
    pub width: u8,
    pub height: u8,
}

impl CharSize {
    pub const NORMAL: CharSize = CharSize { width: 1, height: 1 };
    pub const DOUBLE: CharSize = CharSize { width: 2, height: 2 };
    pub const DOUBLE_WIDTH: CharSize = CharSize { width: 2, height: 1 };
    pub const DOUBLE_HEIGHT: CharSize = CharSize { width: 1, height: 2 };

    /// `GS ! n` argument: width-1 in the high nibble, height-1 in the low
    pub fn code(&self) -> u8 {
        let w = self.width.clamp(1, 8) - 1;
        let h = self.height.clamp(1, 8) - 1;
        (w << 4) | h
    }
}

/// One printer instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// ESC @ - initialize printer, style back to defaults
    Reset,
    /// ESC E n
    Bold(bool),
    /// GS ! n
    Size(CharSize),
    /// ESC a n
    Align(Align),
    /// Literal text under the current style
    Text(String),
    /// LF
    LineFeed,
    /// GS V 66 n - feed then full cut
    Cut,
}

/// ESC/POS receipt builder
///
/// Accumulates directives; call [`EscPosTextBuilder::finalize`] and hand the
/// result to [`to_escpos`] or [`to_lines`].
pub struct EscPosTextBuilder {
    directives: Vec<Directive>,
    width: usize,
}

impl EscPosTextBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// The width only sizes separators; text is never reflowed.
    pub fn new(width: usize) -> Self {
        Self {
            directives: Vec::with_capacity(128),
            width,
        }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write raw text
    pub fn write(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            self.directives.push(Directive::Text(s.to_string()));
        }
        self
    }

    /// Write text followed by newline
    pub fn write_line(&mut self, s: &str) -> &mut Self {
        self.write(s);
        self.newline()
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.directives.push(Directive::LineFeed);
        self
    }

    // === Alignment ===

    pub fn align_center(&mut self) -> &mut Self {
        self.directives.push(Directive::Align(Align::Center));
        self
    }

    pub fn align_left(&mut self) -> &mut Self {
        self.directives.push(Directive::Align(Align::Left));
        self
    }

    pub fn align_right(&mut self) -> &mut Self {
        self.directives.push(Directive::Align(Align::Right));
        self
    }

    // === Text Style ===

    pub fn bold_on(&mut self) -> &mut Self {
        self.directives.push(Directive::Bold(true));
        self
    }

    pub fn bold_off(&mut self) -> &mut Self {
        self.directives.push(Directive::Bold(false));
        self
    }

    /// Double width and height
    pub fn size_double(&mut self) -> &mut Self {
        self.directives.push(Directive::Size(CharSize::DOUBLE));
        self
    }

    /// Double height only
    pub fn size_double_height(&mut self) -> &mut Self {
        self.directives.push(Directive::Size(CharSize::DOUBLE_HEIGHT));
        self
    }

    /// Double width only
    pub fn size_double_width(&mut self) -> &mut Self {
        self.directives.push(Directive::Size(CharSize::DOUBLE_WIDTH));
        self
    }

    /// Reset to normal size
    pub fn size_reset(&mut self) -> &mut Self {
        self.directives.push(Directive::Size(CharSize::NORMAL));
        self
    }

    // === Separators ===

    /// Print a line of '-' characters
    pub fn dash_sep(&mut self) -> &mut Self {
        let sep = "-".repeat(self.width);
        self.write_line(&sep)
    }

    // === Paper Control ===

    /// Initialize printer (ESC @)
    pub fn reset(&mut self) -> &mut Self {
        self.directives.push(Directive::Reset);
        self
    }

    /// Feed and cut paper
    pub fn cut(&mut self) -> &mut Self {
        self.directives.push(Directive::Cut);
        self
    }

    // === Build ===

    /// Finalize and return the accumulated directives
    pub fn finalize(self) -> Vec<Directive> {
        self.directives
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }
}

impl Default for EscPosTextBuilder {
    fn default() -> Self {
        Self::new(44)
    }
}

/// Serialize directives to the ESC/POS control-code stream
#[instrument(skip(directives), fields(count = directives.len()))]
pub fn to_escpos(directives: &[Directive]) -> String {
    let mut out = String::with_capacity(directives.len() * 16);

    for directive in directives {
        match directive {
            Directive::Reset => {
                out.push(ESC);
                out.push('@');
            }
            Directive::Bold(on) => {
                out.push(ESC);
                out.push('E');
                out.push(if *on { '\x01' } else { '\x00' });
            }
            Directive::Size(size) => {
                out.push(GS);
                out.push('!');
                out.push(char::from(size.code()));
            }
            Directive::Align(align) => {
                out.push(ESC);
                out.push('a');
                out.push(char::from(align.code()));
            }
            Directive::Text(text) => out.push_str(text),
            Directive::LineFeed => out.push(LF),
            Directive::Cut => {
                out.push(GS);
                out.push('V');
                out.push('\x42');
                out.push(char::from(CUT_FEED_LINES));
            }
        }
    }

    out
}

/// Serialize directives straight to preview lines
pub fn to_lines(directives: &[Directive]) -> Vec<ParsedLine> {
    let mut acc = LineAccumulator::default();

    for directive in directives {
        match directive {
            Directive::Reset => acc.reset(),
            Directive::Bold(on) => acc.set_bold(*on),
            Directive::Size(size) => acc.set_double_height(size.height > 1),
            Directive::Align(align) => acc.set_align(*align),
            Directive::Text(text) => text.chars().for_each(|c| acc.push_char(c)),
            Directive::LineFeed => acc.line_feed(),
            Directive::Cut => acc.cut(),
        }
    }

    acc.finish()
}
