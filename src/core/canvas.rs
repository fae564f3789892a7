use crossbeam::atomic::AtomicCell;
use image::RgbImage;

use crate::core::color::Color;

/// Presence map of sampled positions. Each pixel is a lock-free flag written through `&self`,
/// so render workers share one canvas; marking a pixel twice is the same as marking it once.
/// Colors only appear on readout: hit pixels are white, the rest black.
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<AtomicCell<bool>>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let pixels = (0..width as usize * height as usize)
            .map(|_| AtomicCell::new(false))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Marks `(x, y)` as hit. Returns `false` and leaves the canvas untouched when the
    /// position is outside of it.
    pub fn put(&self, x: i32, y: i32) -> bool {
        match self.index_of(x, y) {
            Some(index) => {
                self.pixels[index].store(true);
                true
            }
            None => false,
        }
    }

    /// Row-major copy of every pixel.
    pub fn snapshot(&self) -> Vec<Color> {
        self.pixels
            .iter()
            .map(|p| if p.load() { Color::WHITE } else { Color::BLACK })
            .collect()
    }

    pub fn count_hits(&self) -> usize {
        self.pixels.iter().filter(|p| p.load()).count()
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            None
        } else {
            Some(y as usize * self.width as usize + x as usize)
        }
    }
}

/// Image of a row-major pixel buffer as produced by [`Canvas::snapshot`].
pub fn pixels_to_image(width: u32, height: u32, pixels: &[Color]) -> RgbImage {
    let mut image = RgbImage::new(width, height);
    for (index, color) in pixels.iter().enumerate() {
        let x = (index % width as usize) as u32;
        let y = (index / width as usize) as u32;
        image.put_pixel(x, y, color.to_rgb8());
    }
    image
}
