use crate::error::RenderError;

/// An RGBA pixel buffer representing a rendered image.
///
/// Row 0 is the top of the image. Alpha is always 255; it is stored so the
/// buffer can go straight to a texture upload or a PNG encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap existing RGBA data, checking that its length matches.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> crate::Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::BufferLength {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// RGB at `(x, y)`, or `None` outside the buffer.
    pub fn rgb(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }
}
