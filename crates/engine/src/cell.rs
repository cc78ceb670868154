use serde::{Deserialize, Serialize};

/// Content of a single cell.
///
/// Formula text is opaque to the engine: it is stored verbatim and echoed
/// back, never parsed or evaluated. Evaluation belongs to an external
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellContent {
    Empty,
    Text(String),
    Number(f64),
    /// Raw formula text; `source` always begins with `=`.
    Formula { source: String },
}

impl Default for CellContent {
    fn default() -> Self {
        CellContent::Empty
    }
}

impl CellContent {
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return CellContent::Empty;
        }

        if trimmed.starts_with('=') {
            return CellContent::Formula {
                source: trimmed.to_string(),
            };
        }

        if let Ok(num) = trimmed.parse::<f64>() {
            return CellContent::Number(num);
        }

        CellContent::Text(trimmed.to_string())
    }

    /// The editable text for this content: literal text, a number rendered
    /// back to digits, or the formula source. Since the engine never
    /// evaluates, this is also what display and export show.
    pub fn raw_display(&self) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Text(s) => s.clone(),
            CellContent::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellContent::Formula { source } => source.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Empty)
    }
}

/// The style flags a toolbar can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleFlag {
    Bold,
    Italic,
}

/// Cell formatting options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    pub bold: bool,
    pub italic: bool,
    pub color: Option<String>,
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub content: CellContent,
    pub style: CellStyle,
    pub comment: Option<String>,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cell from raw input text with default style and no comment.
    pub fn from_input(input: &str) -> Self {
        Self {
            content: CellContent::from_input(input),
            ..Self::default()
        }
    }

    /// Replace the content from raw input. Style and comment survive edits.
    pub fn set(&mut self, input: &str) {
        self.content = CellContent::from_input(input);
    }

    /// Flip one style flag, defaulting false -> true on first toggle.
    pub fn toggle(&mut self, flag: StyleFlag) {
        match flag {
            StyleFlag::Bold => self.style.bold = !self.style.bold,
            StyleFlag::Italic => self.style.italic = !self.style.italic,
        }
    }
}
