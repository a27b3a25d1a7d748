/// RGB color, drawn straight from three u8 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn blend(&self, other: &Color, alpha: f32) -> Color {
        let alpha = alpha.clamp(0.0, 1.0);
        Color {
            r: (self.r as f32 * (1.0 - alpha) + other.r as f32 * alpha).round() as u8,
            g: (self.g as f32 * (1.0 - alpha) + other.g as f32 * alpha).round() as u8,
            b: (self.b as f32 * (1.0 - alpha) + other.b as f32 * alpha).round() as u8,
        }
    }

    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BACKGROUND: Color = Color::new(236, 236, 232);
    pub const BLACK: Color = Color::new(20, 20, 20);
    pub const DEMAND: Color = Color::new(70, 130, 180);
    pub const DEMAND_UNCOVERED: Color = Color::new(200, 60, 60);
    pub const FACILITY: Color = Color::new(20, 90, 50);
    pub const BUFFER: Color = Color::new(90, 160, 250);
    pub const SPIDER: Color = Color::new(120, 120, 120);
}

/// A plain RGB raster, sized in pixels, exported to PNG via the `image`
/// crate. Drawing primitives are small and self-contained rather than
/// pulled from a vector-graphics crate, matching the hand-rolled
/// framebuffer this is adapted from.
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Canvas { width, height, pixels: vec![background; (width * height) as usize] }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        self.pixels[idx] = color;
    }

    #[inline]
    pub fn get_pixel(&self, x: i64, y: i64) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.pixels[(y as u32 * self.width + x as u32) as usize])
    }

    #[inline]
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        if let Some(existing) = self.get_pixel(x, y) {
            self.set_pixel(x, y, existing.blend(&color, alpha));
        }
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let r = radius.ceil() as i64;
        let r_sq = radius * radius;
        let (cx_i, cy_i) = (cx.round() as i64, cy.round() as i64);
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx * dx + dy * dy) as f64 <= r_sq {
                    self.set_pixel(cx_i + dx, cy_i + dy, color);
                }
            }
        }
    }

    /// Filled circle blended over the existing pixels at a fixed alpha,
    /// used for low-opacity coverage buffers.
    pub fn fill_circle_alpha(&mut self, cx: f64, cy: f64, radius: f64, color: Color, alpha: f32) {
        let r = radius.ceil() as i64;
        let r_sq = radius * radius;
        let (cx_i, cy_i) = (cx.round() as i64, cy.round() as i64);
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx * dx + dy * dy) as f64 <= r_sq {
                    self.blend_pixel(cx_i + dx, cy_i + dy, color, alpha);
                }
            }
        }
    }

    pub fn fill_square(&mut self, cx: f64, cy: f64, half_side: f64, color: Color) {
        let (cx_i, cy_i) = (cx.round() as i64, cy.round() as i64);
        let h = half_side.ceil() as i64;
        for dy in -h..=h {
            for dx in -h..=h {
                self.set_pixel(cx_i + dx, cy_i + dy, color);
            }
        }
    }

    /// Bresenham's line algorithm.
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Color) {
        let (mut x0, mut y0) = (x0.round() as i64, y0.round() as i64);
        let (x1, y1) = (x1.round() as i64, y1.round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                if x0 == x1 {
                    break;
                }
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                if y0 == y1 {
                    break;
                }
                err += dx;
                y0 += sy;
            }
        }
    }

    pub fn into_rgb_image(self) -> image::RgbImage {
        let mut img = image::RgbImage::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.pixels[(y * self.width + x) as usize];
                img.put_pixel(x, y, image::Rgb([c.r, c.g, c.b]));
            }
        }
        img
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_pixel_round_trips() {
        let mut canvas = Canvas::new(10, 10, Color::WHITE);
        canvas.set_pixel(3, 4, Color::BLACK);
        assert_eq!(canvas.get_pixel(3, 4), Some(Color::BLACK));
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut canvas = Canvas::new(4, 4, Color::WHITE);
        canvas.set_pixel(-1, 0, Color::BLACK);
        canvas.set_pixel(10, 0, Color::BLACK);
        assert!(canvas.get_pixel(-1, 0).is_none());
    }

    #[test]
    fn blend_halfway_averages_channels() {
        let blended = Color::BLACK.blend(&Color::WHITE, 0.5);
        assert_eq!(blended.r, 128);
    }
}
