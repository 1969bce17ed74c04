//! Display colors for trend entries

use rand::Rng;

/// Fixed display palette, in order
pub const PALETTE: [&str; 10] = [
    "#FF6B6B", // Red
    "#4ECDC4", // Teal
    "#45B7D1", // Blue
    "#96CEB4", // Green
    "#FFEAA7", // Yellow
    "#DDA0DD", // Plum
    "#98D8C8", // Mint
    "#F7DC6F", // Light Yellow
    "#BB8FCE", // Light Purple
    "#85C1E9", // Light Blue
];

/// Pick one palette color uniformly at random
///
/// Calls are independent, so neighbouring entries may share a color.
pub fn assign_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PALETTE[rng.gen_range(0..PALETTE.len())]
}

/// Whether `color` is one of the palette tokens
pub fn is_palette_color(color: &str) -> bool {
    PALETTE.contains(&color)
}
