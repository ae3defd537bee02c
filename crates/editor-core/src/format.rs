use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub const ALL: [Alignment; 4] = [
        Alignment::Left,
        Alignment::Center,
        Alignment::Right,
        Alignment::Justify,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    #[default]
    P,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 7] = [
        HeadingLevel::P,
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
        HeadingLevel::H5,
        HeadingLevel::H6,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::P => "p",
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HeadingLevel::P => "Normal text",
            HeadingLevel::H1 => "Heading 1",
            HeadingLevel::H2 => "Heading 2",
            HeadingLevel::H3 => "Heading 3",
            HeadingLevel::H4 => "Heading 4",
            HeadingLevel::H5 => "Heading 5",
            HeadingLevel::H6 => "Heading 6",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    #[default]
    P,
    Blockquote,
    Pre,
    Div,
}

impl BlockType {
    pub const ALL: [BlockType; 4] = [
        BlockType::P,
        BlockType::Blockquote,
        BlockType::Pre,
        BlockType::Div,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::P => "p",
            BlockType::Blockquote => "blockquote",
            BlockType::Pre => "pre",
            BlockType::Div => "div",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BlockType::P => "Paragraph",
            BlockType::Blockquote => "Quote",
            BlockType::Pre => "Code Block",
            BlockType::Div => "Normal Block",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFormatError {
    kind: &'static str,
    value: String,
}

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for ParseFormatError {}

macro_rules! impl_from_str {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = ParseFormatError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| ParseFormatError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_from_str!(Alignment, "alignment");
impl_from_str!(HeadingLevel, "heading level");
impl_from_str!(BlockType, "block type");

pub const DEFAULT_FONT_SIZE: &str = "16";
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#ffffff";

pub const FONT_SIZES: [&str; 16] = [
    "8", "9", "10", "11", "12", "14", "16", "18", "20", "24", "30", "36", "48", "60", "72", "96",
];
pub const FONT_FAMILIES: [&str; 3] = ["Arial", "Times New Roman", "Courier New"];

/// Visual attributes applied to the caret/selection context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font_size: String,
    pub font_family: String,
    pub text_color: String,
    pub highlight_color: String,
    pub alignment: Alignment,
    pub bullet_list: bool,
    pub numbered_list: bool,
    pub indent_level: u32,
    pub heading_level: HeadingLevel,
    pub block_type: BlockType,
}

impl Default for FormattingState {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            font_size: DEFAULT_FONT_SIZE.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            alignment: Alignment::default(),
            bullet_list: false,
            numbered_list: false,
            indent_level: 0,
            heading_level: HeadingLevel::default(),
            block_type: BlockType::default(),
        }
    }
}
