//! Accent color utilities
//!
//! Tiles are tinted with a color from a fixed palette. Colors are packed
//! as 0xAARRGGBB so they can be handed to any platform color API as-is.

use thiserror::Error;

/// Material-ish palette used when the config doesn't provide one
const DEFAULT_ACCENTS: [u32; 8] = [
    0xFFF44336, // red
    0xFFE91E63, // pink
    0xFF9C27B0, // purple
    0xFF3F51B5, // indigo
    0xFF2196F3, // blue
    0xFF009688, // teal
    0xFF4CAF50, // green
    0xFFFF9800, // orange
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("invalid color '{0}': expected #RRGGBB or #AARRGGBB")]
    InvalidHex(String),
}

/// Non-empty list of accent colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<u32>,
}

impl Palette {
    pub fn new(colors: Vec<u32>) -> Result<Self, ColorError> {
        if colors.is_empty() {
            return Err(ColorError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Parse a palette from hex strings (e.g. from the config file)
    pub fn parse(values: &[String]) -> Result<Self, ColorError> {
        let colors = values
            .iter()
            .map(|input| parse_hex_color(input))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Color for the n-th entry. Wraps around once the palette is exhausted.
    pub fn color_for_index(&self, n: usize) -> u32 {
        self.colors[n % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[u32] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_ACCENTS.to_vec(),
        }
    }
}

/// Parse `#RRGGBB` (opaque) or `#AARRGGBB`
///
/// The leading `#` is optional.
pub fn parse_hex_color(input: &str) -> Result<u32, ColorError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(input.to_string()));
    }

    let value = match digits.len() {
        6 => u32::from_str_radix(digits, 16).map(|rgb| 0xFF00_0000 | rgb),
        8 => u32::from_str_radix(digits, 16),
        _ => return Err(ColorError::InvalidHex(input.to_string())),
    };

    value.map_err(|_| ColorError::InvalidHex(input.to_string()))
}

/// Render a packed color as `#AARRGGBB`
pub fn to_hex(color: u32) -> String {
    format!("#{:08X}", color)
}
