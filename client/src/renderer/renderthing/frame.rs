pub const PIXEL_BYTES: usize = 4;

pub type Color = [u8; PIXEL_BYTES];

/// An RGBA pixel buffer borrowed for the duration of one redraw.
pub struct RenderFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub buffer: &'a mut [u8],
}

impl<'a> RenderFrame<'a> {
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.buffer.chunks_exact_mut(PIXEL_BYTES)
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let index = (x as usize + y as usize * self.width as usize) * PIXEL_BYTES;
        self.buffer.get_mut(index..index + PIXEL_BYTES)
    }

    pub fn draw_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(pixel) = self.pixel_mut(x, y) {
            pixel.copy_from_slice(&color);
        }
    }

    /// Fills a rectangle, clipping whatever falls outside the frame.
    pub fn draw_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);

        for y in y..y_end {
            for x in x..x_end {
                self.draw_pixel(x, y, color);
            }
        }
    }

    pub fn fill(&mut self, color: Color) {
        for pixel in self.pixels_mut() {
            pixel.copy_from_slice(&color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = [255, 0, 0, 255];

    #[test]
    fn when_drawing_past_the_edge_then_the_rect_is_clipped() {
        let mut buffer = vec![0; 4 * 4 * PIXEL_BYTES];
        let mut frame = RenderFrame {
            width: 4,
            height: 4,
            buffer: &mut buffer,
        };

        frame.draw_rect(2, 2, 10, 10, RED);

        assert_eq!(frame.pixel_mut(3, 3).map(|pixel| pixel.to_vec()), Some(RED.to_vec()));
        assert_eq!(frame.pixel_mut(1, 3).map(|pixel| pixel.to_vec()), Some(vec![0; 4]));
        assert!(frame.pixel_mut(4, 0).is_none());
    }

    #[test]
    fn when_filling_then_every_pixel_gets_the_color() {
        let mut buffer = vec![0; 3 * 2 * PIXEL_BYTES];
        let mut frame = RenderFrame {
            width: 3,
            height: 2,
            buffer: &mut buffer,
        };

        frame.fill(RED);

        assert!(buffer.chunks_exact(PIXEL_BYTES).all(|pixel| pixel == RED));
    }
}
