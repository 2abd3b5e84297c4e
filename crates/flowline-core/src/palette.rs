//! Named flow colours.
//!
//! Each entry also carries the uppercase letter used to denote it in text
//! layouts (see [`layout`](crate::layout)).

/// A named colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Colour name, also used as the pair id of flows built from layouts.
    pub name: &'static str,
    /// Hex colour string, e.g. `#FF5252`.
    pub hex: &'static str,
    /// Uppercase layout letter.
    pub letter: char,
}

impl PaletteEntry {
    const fn new(name: &'static str, hex: &'static str, letter: char) -> Self {
        Self { name, hex, letter }
    }
}

/// All colours available to layouts.
pub const PALETTE: [PaletteEntry; 12] = [
    PaletteEntry::new("red", "#FF5252", 'R'),
    PaletteEntry::new("blue", "#448AFF", 'B'),
    PaletteEntry::new("green", "#69F0AE", 'G'),
    PaletteEntry::new("yellow", "#FFEB3B", 'Y'),
    PaletteEntry::new("orange", "#FFAB40", 'O'),
    PaletteEntry::new("purple", "#B388FF", 'P'),
    PaletteEntry::new("pink", "#FF80AB", 'K'),
    PaletteEntry::new("cyan", "#18FFFF", 'C'),
    PaletteEntry::new("lime", "#CCFF90", 'L'),
    PaletteEntry::new("brown", "#BCAAA4", 'N'),
    PaletteEntry::new("teal", "#64FFDA", 'T'),
    PaletteEntry::new("indigo", "#7986CB", 'I'),
];

/// Looks up a colour by its layout letter (either case).
#[must_use]
pub fn by_letter(letter: char) -> Option<&'static PaletteEntry> {
    let letter = letter.to_ascii_uppercase();
    PALETTE.iter().find(|entry| entry.letter == letter)
}

/// Looks up a colour by name.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static PaletteEntry> {
    PALETTE.iter().find(|entry| entry.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_names_are_unique() {
        for (i, a) in PALETTE.iter().enumerate() {
            for b in &PALETTE[i + 1..] {
                assert_ne!(a.letter, b.letter);
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(by_letter('r').map(|e| e.name), Some("red"));
        assert_eq!(by_letter('R').map(|e| e.name), Some("red"));
        assert_eq!(by_letter('x'), None);
        assert_eq!(by_name("teal").map(|e| e.letter), Some('T'));
    }
}
