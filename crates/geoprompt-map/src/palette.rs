//! Layer colors, derived from position alone.

/// RGBA color as handed to the renderer
pub type Rgba = [u8; 4];

/// Base colors, cycled by layer position
pub const PALETTE: [[u8; 3]; 7] = [
    [255, 99, 71],  // tomato
    [30, 144, 255], // dodger blue
    [50, 205, 50],  // lime green
    [255, 215, 0],  // gold
    [138, 43, 226], // blue violet
    [255, 140, 0],  // dark orange
    [0, 206, 209],  // dark turquoise
];

/// Alpha of every fill color
pub const FILL_ALPHA: u8 = 160;

/// Outline channels are the fill channels scaled by this factor
pub const OUTLINE_FACTOR: f64 = 0.7;

/// Fill color for the layer at `position`
pub fn fill_color(position: usize) -> Rgba {
    let [r, g, b] = PALETTE[position % PALETTE.len()];
    [r, g, b, FILL_ALPHA]
}

/// Opaque outline color for the layer at `position`
pub fn line_color(position: usize) -> Rgba {
    let [r, g, b] = PALETTE[position % PALETTE.len()];
    let darken = |channel: u8| (f64::from(channel) * OUTLINE_FACTOR) as u8;
    [darken(r), darken(g), darken(b), u8::MAX]
}
