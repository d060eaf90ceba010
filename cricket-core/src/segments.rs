//! Seven-segment patterns for [`LedCommand::Pattern`](crate::LedCommand::Pattern)
//!
//! Each digit is one byte, one bit per segment:
//!
//! ```text
//!       bit 0
//!      -------
//!     |       |
//!   5 |       | 1
//!     |   6   |
//!      -------
//!     |       |
//!   4 |       | 2
//!     |   3   |
//!      -------  . bit 7
//! ```

pub const TOP: u8 = 1 << 0;
pub const TOP_RIGHT: u8 = 1 << 1;
pub const BOTTOM_RIGHT: u8 = 1 << 2;
pub const BOTTOM: u8 = 1 << 3;
pub const BOTTOM_LEFT: u8 = 1 << 4;
pub const TOP_LEFT: u8 = 1 << 5;
pub const MIDDLE: u8 = 1 << 6;
pub const DOT: u8 = 1 << 7;

/// Glyphs for 0-9, A-F
pub const HEX_GLYPHS: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, // 0-7
    0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71, // 8-F
];

/// Glyph for the low nibble of `value`
pub const fn hex_glyph(value: u8) -> u8 {
    HEX_GLYPHS[(value & 0x0F) as usize]
}

/// Four digit patterns spelling `value` in hex, leftmost digit first
pub fn hex_digits(value: u16) -> [u8; 4] {
    let [hi, lo] = value.to_be_bytes();
    [
        hex_glyph(hi >> 4),
        hex_glyph(hi),
        hex_glyph(lo >> 4),
        hex_glyph(lo),
    ]
}

/// The same segment lit on all four digits
pub const fn all_digits(segments: u8) -> [u8; 4] {
    [segments; 4]
}
