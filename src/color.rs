use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Per-channel balance factors from a correction color
///
/// Each channel maps 0-255 to 0.0-1.0, so `0xFFFFFF` is no correction
/// and `0xFFAA78` keeps red, scales green to 67% and blue to 47%.
pub fn balance_from_u32(color: u32) -> [f32; 3] {
    let rgb = rgb_from_u32(color);
    [
        f32::from(rgb.r) / 255.0,
        f32::from(rgb.g) / 255.0,
        f32::from(rgb.b) / 255.0,
    ]
}
