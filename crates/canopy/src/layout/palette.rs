//! Residue colour schemes for the alignment grid.
//!
//! | Palette | Keyed by |
//! |---------|----------|
//! | `individual` | one hue per letter, A to Z |
//! | `nucleotide` | A, C, G, T/U |
//! | `chemistry` | amino acid class |
//!
//! Gap symbols (`-`, `.`, `~`, space) always resolve to [`Palette::gap_color`];
//! symbols a palette does not know resolve to [`Palette::unknown_color`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use canopy_core::color::Color;

/// One hue per letter, spread around the colour wheel so neighbours in the
/// alphabet are easy to tell apart.
const INDIVIDUAL: [(u8, u8, u8); 26] = [
    (0xe6, 0x19, 0x4b), // A
    (0x3c, 0xb4, 0x4b), // B
    (0xff, 0xe1, 0x19), // C
    (0x43, 0x63, 0xd8), // D
    (0xf5, 0x82, 0x31), // E
    (0x91, 0x1e, 0xb4), // F
    (0x46, 0xf0, 0xf0), // G
    (0xf0, 0x32, 0xe6), // H
    (0xbc, 0xf6, 0x0c), // I
    (0xfa, 0xbe, 0xbe), // J
    (0x00, 0x80, 0x80), // K
    (0xe6, 0xbe, 0xff), // L
    (0x9a, 0x63, 0x24), // M
    (0xff, 0xfa, 0xc8), // N
    (0x80, 0x00, 0x00), // O
    (0xaa, 0xff, 0xc3), // P
    (0x80, 0x80, 0x00), // Q
    (0xff, 0xd8, 0xb1), // R
    (0x00, 0x00, 0x75), // S
    (0x2f, 0x9e, 0x44), // T
    (0x6a, 0x3d, 0x9a), // U
    (0xb1, 0x59, 0x28), // V
    (0x1f, 0x78, 0xb4), // W
    (0xa6, 0xce, 0xe3), // X
    (0xfb, 0x9a, 0x99), // Y
    (0xcc, 0xeb, 0xc5), // Z
];

/// How residues are mapped to cell colours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// A distinct hue for every letter.
    #[default]
    Individual,
    /// Four colours for DNA/RNA bases.
    Nucleotide,
    /// Amino acids grouped by side-chain chemistry.
    Chemistry,
}

impl Palette {
    /// Colour reserved for gap symbols.
    pub fn gap_color() -> Color {
        Color::from_rgb8(0xf0, 0xf0, 0xf0)
    }

    /// Colour for symbols the palette does not cover.
    pub fn unknown_color() -> Color {
        Color::from_rgb8(0xbd, 0xbd, 0xbd)
    }

    /// Resolves the cell colour of a residue. Letters are case-insensitive.
    pub fn color(self, residue: char) -> Color {
        if is_gap(residue) {
            return Self::gap_color();
        }

        let residue = residue.to_ascii_uppercase();
        let resolved = match self {
            Self::Individual => individual(residue),
            Self::Nucleotide => nucleotide(residue),
            Self::Chemistry => chemistry(residue),
        };
        resolved.unwrap_or_else(Self::unknown_color)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Nucleotide => "nucleotide",
            Self::Chemistry => "chemistry",
        }
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(Self::Individual),
            "nucleotide" => Ok(Self::Nucleotide),
            "chemistry" => Ok(Self::Chemistry),
            _ => Err(format!(
                "invalid palette `{s}`, valid values: individual, nucleotide, chemistry"
            )),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `residue` marks a gap in the alignment.
pub fn is_gap(residue: char) -> bool {
    matches!(residue, '-' | '.' | '~' | ' ')
}

fn individual(residue: char) -> Option<Color> {
    if !residue.is_ascii_uppercase() {
        return None;
    }
    let (r, g, b) = INDIVIDUAL[usize::from(residue as u8 - b'A')];
    Some(Color::from_rgb8(r, g, b))
}

fn nucleotide(residue: char) -> Option<Color> {
    let (r, g, b) = match residue {
        'A' => (0x4d, 0xaf, 0x4a),
        'C' => (0x37, 0x7e, 0xb8),
        'G' => (0xff, 0x7f, 0x00),
        'T' | 'U' => (0xe4, 0x1a, 0x1c),
        _ => return None,
    };
    Some(Color::from_rgb8(r, g, b))
}

fn chemistry(residue: char) -> Option<Color> {
    let (r, g, b) = match residue {
        // Hydrophobic
        'A' | 'V' | 'L' | 'I' | 'M' | 'F' | 'W' => (0x80, 0xa0, 0xf0),
        // Polar
        'S' | 'T' | 'N' | 'Q' | 'C' | 'Y' => (0x15, 0xc0, 0x15),
        // Basic
        'K' | 'R' | 'H' => (0xf0, 0x15, 0x05),
        // Acidic
        'D' | 'E' => (0xc0, 0x48, 0xc0),
        // Special
        'G' | 'P' => (0xf0, 0x90, 0x48),
        _ => return None,
    };
    Some(Color::from_rgb8(r, g, b))
}
