//! Naming templates for generated files and document titles.
//!
//! Templates substitute `{key}` placeholders; `{{` and `}}` produce literal braces. Keys
//! are checked when the template is created, so a typo is reported before anything is
//! generated.

use crate::error::SheetError;

/// Placeholder for a sheet's nib width, in millimetres
pub const NIB_WIDTH_KEY: &str = "nibwidth";

/// Placeholder for a page spec's nickname
pub const PAPER_SIZE_KEY: &str = "papersize";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Key(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    pieces: Vec<Piece>,
}

impl Template {
    /// Parse `source`, accepting only placeholders named in `keys`
    pub fn new(source: &str, keys: &[&str]) -> Result<Template, SheetError> {
        let error = |key: &str| SheetError::Template {
            template: source.to_string(),
            key: key.to_string(),
        };

        let mut pieces = Vec::new();
        let mut text = String::new();
        let mut chars = source.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut key = String::new();
                    let mut closed = false;
                    for ch in chars.by_ref() {
                        if ch == '}' {
                            closed = true;
                            break;
                        }
                        key.push(ch);
                    }
                    if !closed || !keys.contains(&key.as_str()) {
                        return Err(error(&key));
                    }
                    if !text.is_empty() {
                        pieces.push(Piece::Text(std::mem::take(&mut text)));
                    }
                    pieces.push(Piece::Key(key));
                }
                '}' => return Err(error("}")),
                _ => text.push(ch),
            }
        }
        if !text.is_empty() {
            pieces.push(Piece::Text(text));
        }

        Ok(Template {
            source: source.to_string(),
            pieces,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute `values`; keys without a value expand to nothing
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut out = String::new();
        for piece in self.pieces.iter() {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Key(key) => {
                    if let Some((_, value)) = values.iter().find(|(k, _)| *k == key.as_str()) {
                        out.push_str(value);
                    }
                }
            }
        }
        out
    }
}
