//! 3×7 bitmap font for raster labels.
//!
//! Each glyph is seven rows, top to bottom; within a row bit 2 is the left
//! pixel and bit 0 the right one. Row 0 holds accents over capitals, rows
//! 1-5 the capital and digit body, rows 3-5 the lowercase x-height, row 6
//! descenders. Accented letters are composed from a base letter and a mark.

use std::collections::hash_map::{Entry, HashMap};

pub const GLYPH_WIDTH: u32 = 3;
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance per character, including one column of spacing.
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

pub type Bitmap = [u8; GLYPH_HEIGHT as usize];

/// Drawn for characters the font has no glyph for.
const UNKNOWN: Bitmap = [0b000, 0b111, 0b111, 0b111, 0b111, 0b111, 0b000];

#[derive(Debug, Clone, Copy)]
enum Mark {
    Acute,
    Grave,
    Circumflex,
    Diaeresis,
    Tilde,
    Ring,
    Caron,
    Cedilla,
}

impl Mark {
    fn bits(self) -> u8 {
        match self {
            Mark::Acute => 0b001,
            Mark::Grave => 0b100,
            Mark::Circumflex => 0b111,
            Mark::Diaeresis => 0b101,
            Mark::Tilde => 0b011,
            Mark::Ring => 0b010,
            Mark::Caron => 0b110,
            Mark::Cedilla => 0b010,
        }
    }
}

fn base_glyph(c: char) -> Option<Bitmap> {
    let bits = match c {
        '0' => [0b000, 0b111, 0b101, 0b101, 0b101, 0b111, 0b000],
        '1' => [0b000, 0b010, 0b110, 0b010, 0b010, 0b111, 0b000],
        '2' => [0b000, 0b111, 0b001, 0b111, 0b100, 0b111, 0b000],
        '3' => [0b000, 0b111, 0b001, 0b111, 0b001, 0b111, 0b000],
        '4' => [0b000, 0b101, 0b101, 0b111, 0b001, 0b001, 0b000],
        '5' => [0b000, 0b111, 0b100, 0b111, 0b001, 0b111, 0b000],
        '6' => [0b000, 0b111, 0b100, 0b111, 0b101, 0b111, 0b000],
        '7' => [0b000, 0b111, 0b001, 0b001, 0b001, 0b001, 0b000],
        '8' => [0b000, 0b111, 0b101, 0b111, 0b101, 0b111, 0b000],
        '9' => [0b000, 0b111, 0b101, 0b111, 0b001, 0b111, 0b000],
        'A' => [0b000, 0b010, 0b101, 0b111, 0b101, 0b101, 0b000],
        'B' => [0b000, 0b110, 0b101, 0b110, 0b101, 0b110, 0b000],
        'C' => [0b000, 0b011, 0b100, 0b100, 0b100, 0b011, 0b000],
        'D' => [0b000, 0b110, 0b101, 0b101, 0b101, 0b110, 0b000],
        'E' => [0b000, 0b111, 0b100, 0b110, 0b100, 0b111, 0b000],
        'F' => [0b000, 0b111, 0b100, 0b110, 0b100, 0b100, 0b000],
        'G' => [0b000, 0b011, 0b100, 0b101, 0b101, 0b011, 0b000],
        'H' => [0b000, 0b101, 0b101, 0b111, 0b101, 0b101, 0b000],
        'I' => [0b000, 0b111, 0b010, 0b010, 0b010, 0b111, 0b000],
        'J' => [0b000, 0b001, 0b001, 0b001, 0b101, 0b010, 0b000],
        'K' => [0b000, 0b101, 0b101, 0b110, 0b101, 0b101, 0b000],
        'L' => [0b000, 0b100, 0b100, 0b100, 0b100, 0b111, 0b000],
        'M' => [0b000, 0b101, 0b111, 0b111, 0b101, 0b101, 0b000],
        'N' => [0b000, 0b110, 0b101, 0b101, 0b101, 0b101, 0b000],
        'O' => [0b000, 0b010, 0b101, 0b101, 0b101, 0b010, 0b000],
        'P' => [0b000, 0b110, 0b101, 0b110, 0b100, 0b100, 0b000],
        'Q' => [0b000, 0b010, 0b101, 0b101, 0b110, 0b011, 0b000],
        'R' => [0b000, 0b110, 0b101, 0b110, 0b101, 0b101, 0b000],
        'S' => [0b000, 0b011, 0b100, 0b010, 0b001, 0b110, 0b000],
        'T' => [0b000, 0b111, 0b010, 0b010, 0b010, 0b010, 0b000],
        'U' => [0b000, 0b101, 0b101, 0b101, 0b101, 0b111, 0b000],
        'V' => [0b000, 0b101, 0b101, 0b101, 0b101, 0b010, 0b000],
        'W' => [0b000, 0b101, 0b101, 0b111, 0b111, 0b101, 0b000],
        'X' => [0b000, 0b101, 0b101, 0b010, 0b101, 0b101, 0b000],
        'Y' => [0b000, 0b101, 0b101, 0b010, 0b010, 0b010, 0b000],
        'Z' => [0b000, 0b111, 0b001, 0b010, 0b100, 0b111, 0b000],
        '-' => [0b000, 0b000, 0b000, 0b111, 0b000, 0b000, 0b000],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b000, 0b111, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b000, 0b010, 0b000],
        ':' => [0b000, 0b000, 0b010, 0b000, 0b010, 0b000, 0b000],
        '&' => [0b000, 0b010, 0b101, 0b010, 0b101, 0b011, 0b000],
        '(' => [0b000, 0b001, 0b010, 0b010, 0b010, 0b001, 0b000],
        ')' => [0b000, 0b100, 0b010, 0b010, 0b010, 0b100, 0b000],
        '/' => [0b000, 0b001, 0b001, 0b010, 0b100, 0b100, 0b000],
        '+' => [0b000, 0b000, 0b010, 0b111, 0b010, 0b000, 0b000],
        '=' => [0b000, 0b000, 0b111, 0b000, 0b111, 0b000, 0b000],
        '!' => [0b000, 0b010, 0b010, 0b010, 0b000, 0b010, 0b000],
        '?' => [0b000, 0b111, 0b001, 0b010, 0b000, 0b010, 0b000],
        '\'' => [0b000, 0b010, 0b010, 0b000, 0b000, 0b000, 0b000],
        '#' => [0b000, 0b101, 0b111, 0b101, 0b111, 0b101, 0b000],
        '%' => [0b000, 0b101, 0b001, 0b010, 0b100, 0b101, 0b000],
        '*' => [0b000, 0b101, 0b010, 0b101, 0b000, 0b000, 0b000],
        '[' => [0b000, 0b011, 0b010, 0b010, 0b010, 0b011, 0b000],
        ']' => [0b000, 0b110, 0b010, 0b010, 0b010, 0b110, 0b000],
        '<' => [0b000, 0b001, 0b010, 0b100, 0b010, 0b001, 0b000],
        '>' => [0b000, 0b100, 0b010, 0b001, 0b010, 0b100, 0b000],
        '|' => [0b000, 0b010, 0b010, 0b010, 0b010, 0b010, 0b000],
        'Ø' => [0b000, 0b011, 0b101, 0b111, 0b101, 0b110, 0b000],
        ' ' => [0b000; 7],
        ',' => [0b000, 0b000, 0b000, 0b000, 0b000, 0b010, 0b100],
        'a' => [0b000, 0b000, 0b000, 0b011, 0b101, 0b111, 0b000],
        'b' => [0b000, 0b100, 0b100, 0b110, 0b101, 0b110, 0b000],
        'c' => [0b000, 0b000, 0b000, 0b011, 0b100, 0b011, 0b000],
        'd' => [0b000, 0b001, 0b001, 0b011, 0b101, 0b011, 0b000],
        'e' => [0b000, 0b000, 0b000, 0b011, 0b110, 0b011, 0b000],
        'f' => [0b000, 0b011, 0b010, 0b111, 0b010, 0b010, 0b000],
        'g' => [0b000, 0b000, 0b000, 0b011, 0b101, 0b011, 0b110],
        'h' => [0b000, 0b100, 0b100, 0b110, 0b101, 0b101, 0b000],
        'i' => [0b000, 0b010, 0b000, 0b010, 0b010, 0b010, 0b000],
        'j' => [0b000, 0b001, 0b000, 0b001, 0b001, 0b001, 0b110],
        'k' => [0b000, 0b100, 0b100, 0b101, 0b110, 0b101, 0b000],
        'l' => [0b000, 0b110, 0b010, 0b010, 0b010, 0b111, 0b000],
        'm' => [0b000, 0b000, 0b000, 0b111, 0b111, 0b101, 0b000],
        'n' => [0b000, 0b000, 0b000, 0b110, 0b101, 0b101, 0b000],
        'o' => [0b000, 0b000, 0b000, 0b010, 0b101, 0b010, 0b000],
        'p' => [0b000, 0b000, 0b000, 0b110, 0b101, 0b110, 0b100],
        'q' => [0b000, 0b000, 0b000, 0b011, 0b101, 0b011, 0b001],
        'r' => [0b000, 0b000, 0b000, 0b011, 0b100, 0b100, 0b000],
        's' => [0b000, 0b000, 0b000, 0b011, 0b010, 0b110, 0b000],
        't' => [0b000, 0b000, 0b010, 0b111, 0b010, 0b011, 0b000],
        'u' => [0b000, 0b000, 0b000, 0b101, 0b101, 0b011, 0b000],
        'v' => [0b000, 0b000, 0b000, 0b101, 0b101, 0b010, 0b000],
        'w' => [0b000, 0b000, 0b000, 0b101, 0b111, 0b111, 0b000],
        'x' => [0b000, 0b000, 0b000, 0b101, 0b010, 0b101, 0b000],
        'y' => [0b000, 0b000, 0b000, 0b101, 0b101, 0b011, 0b110],
        'z' => [0b000, 0b000, 0b000, 0b110, 0b010, 0b011, 0b000],
        'ß' => [0b000, 0b010, 0b101, 0b110, 0b101, 0b110, 0b100],
        'ø' => [0b000, 0b000, 0b000, 0b011, 0b111, 0b110, 0b000],
        _ => return None,
    };
    Some(bits)
}

fn decompose(c: char) -> Option<(char, Mark)> {
    let parts = match c {
        'Á' => ('A', Mark::Acute),
        'É' => ('E', Mark::Acute),
        'Í' => ('I', Mark::Acute),
        'Ó' => ('O', Mark::Acute),
        'Ú' => ('U', Mark::Acute),
        'á' => ('a', Mark::Acute),
        'é' => ('e', Mark::Acute),
        'í' => ('i', Mark::Acute),
        'ó' => ('o', Mark::Acute),
        'ú' => ('u', Mark::Acute),
        'Ý' => ('Y', Mark::Acute),
        'ý' => ('y', Mark::Acute),
        'À' => ('A', Mark::Grave),
        'È' => ('E', Mark::Grave),
        'Ì' => ('I', Mark::Grave),
        'Ò' => ('O', Mark::Grave),
        'Ù' => ('U', Mark::Grave),
        'à' => ('a', Mark::Grave),
        'è' => ('e', Mark::Grave),
        'ì' => ('i', Mark::Grave),
        'ò' => ('o', Mark::Grave),
        'ù' => ('u', Mark::Grave),
        'Â' => ('A', Mark::Circumflex),
        'Ê' => ('E', Mark::Circumflex),
        'Î' => ('I', Mark::Circumflex),
        'Ô' => ('O', Mark::Circumflex),
        'Û' => ('U', Mark::Circumflex),
        'â' => ('a', Mark::Circumflex),
        'ê' => ('e', Mark::Circumflex),
        'î' => ('i', Mark::Circumflex),
        'ô' => ('o', Mark::Circumflex),
        'û' => ('u', Mark::Circumflex),
        'Ä' => ('A', Mark::Diaeresis),
        'Ë' => ('E', Mark::Diaeresis),
        'Ï' => ('I', Mark::Diaeresis),
        'Ö' => ('O', Mark::Diaeresis),
        'Ü' => ('U', Mark::Diaeresis),
        'ä' => ('a', Mark::Diaeresis),
        'ë' => ('e', Mark::Diaeresis),
        'ï' => ('i', Mark::Diaeresis),
        'ö' => ('o', Mark::Diaeresis),
        'ü' => ('u', Mark::Diaeresis),
        'ÿ' => ('y', Mark::Diaeresis),
        'Ã' => ('A', Mark::Tilde),
        'Õ' => ('O', Mark::Tilde),
        'ã' => ('a', Mark::Tilde),
        'õ' => ('o', Mark::Tilde),
        'Ñ' => ('N', Mark::Tilde),
        'ñ' => ('n', Mark::Tilde),
        'Å' => ('A', Mark::Ring),
        'å' => ('a', Mark::Ring),
        'Š' => ('S', Mark::Caron),
        'š' => ('s', Mark::Caron),
        'Č' => ('C', Mark::Caron),
        'č' => ('c', Mark::Caron),
        'Ž' => ('Z', Mark::Caron),
        'ž' => ('z', Mark::Caron),
        'Ř' => ('R', Mark::Caron),
        'ř' => ('r', Mark::Caron),
        'Ě' => ('E', Mark::Caron),
        'ě' => ('e', Mark::Caron),
        'Ç' => ('C', Mark::Cedilla),
        'ç' => ('c', Mark::Cedilla),
        _ => return None,
    };
    Some(parts)
}

/// Bitmap for `c`, or `None` when the font cannot draw it.
pub fn glyph(c: char) -> Option<Bitmap> {
    if let Some(bits) = base_glyph(c) {
        return Some(bits);
    }
    let (base, mark) = decompose(c)?;
    let mut bits = base_glyph(base)?;
    match mark {
        Mark::Cedilla => bits[6] |= mark.bits(),
        _ => {
            if matches!(base, 'i' | 'j') {
                // dotless before accenting
                bits[1] = 0;
            }
            let row = if base.is_ascii_uppercase() { 0 } else { 1 };
            bits[row] = mark.bits();
        }
    }
    Some(bits)
}

/// Characters of `text` the font cannot draw, in order of first appearance.
pub fn undrawable(text: &str) -> Vec<char> {
    let mut missing: Vec<char> = Vec::new();
    for c in text.chars() {
        if glyph(c).is_none() && !missing.contains(&c) {
            missing.push(c);
        }
    }
    missing
}

/// Pairs of distinct labels that rasterize to the same pixels.
pub fn ambiguous_labels<'a>(labels: &'a [String]) -> Vec<(&'a str, &'a str)> {
    let mut seen: HashMap<Vec<Bitmap>, &'a str> = HashMap::new();
    let mut pairs = Vec::new();
    for label in labels {
        let key: Vec<Bitmap> = label.chars().map(|c| glyph(c).unwrap_or(UNKNOWN)).collect();
        match seen.entry(key) {
            Entry::Occupied(e) => {
                let first = *e.get();
                if first != label.as_str() {
                    pairs.push((first, label.as_str()));
                }
            }
            Entry::Vacant(e) => {
                e.insert(label.as_str());
            }
        }
    }
    pairs
}

/// Width of `text` in font pixels, without trailing spacing.
pub fn text_width(text: &str) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        0
    } else {
        n * GLYPH_ADVANCE - 1
    }
}

/// Font pixels set for `text`, as `(x, y)` offsets from its top-left corner.
pub fn text_pixels(text: &str) -> impl Iterator<Item = (u32, u32)> + '_ {
    text.chars().enumerate().flat_map(|(i, c)| {
        let bits = glyph(c).unwrap_or(UNKNOWN);
        let x0 = i as u32 * GLYPH_ADVANCE;
        (0..GLYPH_HEIGHT).flat_map(move |y| {
            (0..GLYPH_WIDTH)
                .filter(move |&x| bits[y as usize] & (0b100 >> x) != 0)
                .map(move |x| (x0 + x, y))
        })
    })
}
