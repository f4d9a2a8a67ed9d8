use image::GrayImage;
use crate::error::{OutlineError, Result};

/// Read-only view over a single opacity channel, one `u8` sample per pixel,
/// stored row-major.
#[derive(Debug, Clone, Copy)]
pub struct AlphaMask<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> AlphaMask<'a> {
    /// Wrap a row-major opacity buffer.
    ///
    /// Fails when either dimension is zero or the buffer length does not
    /// equal `width * height`.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(OutlineError::InvalidMask(format!(
                "dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }

        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(OutlineError::InvalidMask(format!(
                "expected {} samples for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }

        Ok(Self { data, width, height })
    }

    /// View the luma channel of a grayscale image as opacity.
    pub fn from_gray(image: &'a GrayImage) -> Result<Self> {
        Self::new(image.as_raw(), image.width(), image.height())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Opacity at `(x, y)`. Callers must stay in bounds.
    #[inline]
    pub(crate) fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Opacity at a signed position, `None` outside the image.
    #[inline]
    pub fn get_checked(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.get(x as u32, y as u32))
    }

    /// Samples of row `y`, `None` past the last row
    pub fn row(&self, y: u32) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        self.data.get(start..start + self.width as usize)
    }
}
