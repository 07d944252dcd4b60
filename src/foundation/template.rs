//! printf-style templates with a single integer argument (the item serial).
//!
//! Supported conversions are `%d`, `%i` and `%u`, optionally with `0` or `-` flags, a width and
//! an `l`/`ll` length modifier (`%04d`, `%-6ld`). `%%` emits a literal percent sign. Every
//! conversion in a template receives the same serial.

/// Largest field width a conversion may request.
pub const MAX_TEMPLATE_WIDTH: usize = u16::MAX as usize;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Serial { pad: Pad, width: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pad {
    Spaces,
    Zeros,
    Left,
}

/// Parse failure for a [`SerialTemplate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template ends in the middle of a conversion specification.
    #[error("template '{template}' ends inside a conversion at byte {offset}")]
    Dangling {
        /// Source template.
        template: String,
        /// Byte offset of the opening `%`.
        offset: usize,
    },

    /// A conversion other than an integer one was used.
    #[error("template '{template}' uses unsupported conversion '%{conversion}' at byte {offset}")]
    Unsupported {
        /// Source template.
        template: String,
        /// The offending conversion character.
        conversion: char,
        /// Byte offset of the opening `%`.
        offset: usize,
    },

    /// A conversion requests a field width above [`MAX_TEMPLATE_WIDTH`].
    #[error(
        "template '{template}' requests a width above {max} at byte {offset}",
        max = MAX_TEMPLATE_WIDTH
    )]
    WidthTooLarge {
        /// Source template.
        template: String,
        /// Byte offset of the opening `%`.
        offset: usize,
    },
}

/// A pre-parsed template that formats an item serial into a string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerialTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl SerialTemplate {
    /// Parse `source`, rejecting conversions that cannot take an integer.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            let dangling = || TemplateError::Dangling {
                template: source.to_string(),
                offset,
            };

            if let Some((_, '%')) = chars.peek() {
                chars.next();
                literal.push('%');
                continue;
            }

            let mut pad = Pad::Spaces;
            while let Some(&(_, flag)) = chars.peek() {
                match flag {
                    '0' if pad != Pad::Left => pad = Pad::Zeros,
                    '0' => {}
                    '-' => pad = Pad::Left,
                    _ => break,
                }
                chars.next();
            }

            let mut width = 0usize;
            while let Some(&(_, d)) = chars.peek() {
                let Some(v) = d.to_digit(10) else { break };
                width = width * 10 + v as usize;
                if width > MAX_TEMPLATE_WIDTH {
                    return Err(TemplateError::WidthTooLarge {
                        template: source.to_string(),
                        offset,
                    });
                }
                chars.next();
            }

            while let Some(&(_, 'l')) = chars.peek() {
                chars.next();
            }

            match chars.next() {
                Some((_, 'd' | 'i' | 'u')) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Serial { pad, width });
                }
                Some((_, conversion)) => {
                    return Err(TemplateError::Unsupported {
                        template: source.to_string(),
                        conversion,
                        offset,
                    });
                }
                None => return Err(dangling()),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The template as written in configuration.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute `serial` into every conversion.
    pub fn format(&self, serial: u64) -> String {
        let mut out = String::with_capacity(self.source.len() + 8);
        for seg in &self.segments {
            match seg {
                Segment::Literal(s) => out.push_str(s),
                Segment::Serial { pad, width } => {
                    let width = *width;
                    match pad {
                        Pad::Spaces => out.push_str(&format!("{serial:>width$}")),
                        Pad::Zeros => out.push_str(&format!("{serial:0>width$}")),
                        Pad::Left => out.push_str(&format!("{serial:<width$}")),
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/template.rs"]
mod tests;
