//! Pixel data and PNG output operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::{premultiply, rgba_len, unpremultiply};

impl Canvas2dContext {
    /// Create a new ImageData buffer with the specified dimensions.
    ///
    /// Returns transparent black (all zeros) RGBA data, 4 bytes per pixel.
    ///
    /// # Panics
    /// Panics if `width * height * 4` does not fit in memory.
    pub fn create_image_data(&self, width: u32, height: u32) -> Vec<u8> {
        vec![0u8; rgba_len(width, height).unwrap_or(usize::MAX)]
    }

    /// Read back a region of the surface as straight-alpha RGBA.
    ///
    /// The returned buffer always holds `width * height * 4` bytes; pixels of
    /// the requested region that fall outside the surface are transparent.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut data = self.create_image_data(width, height);
        let src = self.pixmap.data();

        for row in 0..height {
            let src_y = y + row as i32;
            if src_y < 0 || src_y >= self.height as i32 {
                continue;
            }
            for col in 0..width {
                let src_x = x + col as i32;
                if src_x < 0 || src_x >= self.width as i32 {
                    continue;
                }

                let src_idx = (src_y as usize * self.width as usize + src_x as usize) * 4;
                let dst_idx = (row as usize * width as usize + col as usize) * 4;
                let pixel = [src[src_idx], src[src_idx + 1], src[src_idx + 2], src[src_idx + 3]];
                data[dst_idx..dst_idx + 4].copy_from_slice(&unpremultiply(pixel));
            }
        }

        data
    }

    /// Write straight-alpha image data to the surface at the specified position.
    ///
    /// This bypasses compositing and writes pixels directly; pixels falling
    /// outside the surface are ignored. Fails if `data` does not hold exactly
    /// `width * height * 4` bytes.
    pub fn put_image_data(
        &mut self,
        data: &[u8],
        width: u32,
        height: u32,
        dx: i32,
        dy: i32,
    ) -> Canvas2dResult<()> {
        if rgba_len(width, height) != Some(data.len()) {
            return Err(Canvas2dError::DataLengthMismatch {
                width,
                height,
                actual: data.len(),
            });
        }
        log::debug!(target: "canvas", "putImageData {}x{} at {} {}", width, height, dx, dy);

        let surface_width = self.width as i64;
        let surface_height = self.height as i64;
        let pixmap_data = self.pixmap.data_mut();

        for (sy, row) in data.chunks_exact((width as usize * 4).max(1)).enumerate() {
            let dst_row = dy as i64 + sy as i64;
            if dst_row < 0 || dst_row >= surface_height {
                continue;
            }
            for (sx, px) in row.chunks_exact(4).enumerate() {
                let dst_col = dx as i64 + sx as i64;
                if dst_col < 0 || dst_col >= surface_width {
                    continue;
                }

                let dst_idx = (dst_row as usize * surface_width as usize + dst_col as usize) * 4;
                let pixel = [px[0], px[1], px[2], px[3]];
                pixmap_data[dst_idx..dst_idx + 4].copy_from_slice(&premultiply(pixel));
            }
        }
        Ok(())
    }

    /// Export the surface as PNG data.
    pub fn to_png(&self) -> Canvas2dResult<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header()?;
            let data = self.get_image_data(0, 0, self.width, self.height);
            writer.write_image_data(&data)?;
        }
        Ok(buf)
    }
}
