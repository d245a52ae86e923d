//! Parameter structs and backend-neutral value types.

/// Parameters for a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    /// X coordinate of the rectangle origin.
    pub x: f32,
    /// Y coordinate of the rectangle origin.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl RectParams {
    /// Rectangle covering a whole `width` x `height` surface.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
        }
    }
}

/// Byte length of `width` x `height` RGBA pixels, or `None` when it overflows `usize`.
pub(crate) fn rgba_len(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)?.checked_mul(4)
}

/// Convert one straight-alpha RGBA pixel to premultiplied alpha.
///
/// Uses `(color * alpha + 127) / 255` for proper rounding.
pub(crate) fn premultiply(pixel: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = pixel;
    match a {
        255 => pixel,
        0 => [0, 0, 0, 0],
        _ => {
            let a16 = a as u16;
            [
                ((r as u16 * a16 + 127) / 255) as u8,
                ((g as u16 * a16 + 127) / 255) as u8,
                ((b as u16 * a16 + 127) / 255) as u8,
                a,
            ]
        }
    }
}

/// Convert one premultiplied RGBA pixel back to straight alpha.
pub(crate) fn unpremultiply(pixel: [u8; 4]) -> [u8; 4] {
    let a = pixel[3];
    match a {
        255 => pixel,
        0 => [0, 0, 0, 0],
        _ => {
            let alpha_f = a as f32 / 255.0;
            [
                (pixel[0] as f32 / alpha_f).min(255.0) as u8,
                (pixel[1] as f32 / alpha_f).min(255.0) as u8,
                (pixel[2] as f32 / alpha_f).min(255.0) as u8,
                a,
            ]
        }
    }
}
