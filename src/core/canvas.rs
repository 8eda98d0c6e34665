//=========================================================================
// Canvas
//=========================================================================
//
// Fixed-resolution RGBA raster that scenes paint into.
//
// Architecture:
//   Scene::render() → Canvas (scratch layer)
//                        ↓ composite(opacity)
//                     Canvas (frame) → platform surface
//
// Storage is premultiplied RGBA8, row-major, origin top-left. Every
// drawing primitive clips against the raster bounds, so scene code may
// pass coordinates that wander off-screen during walks and slides.
//
// Cleared pixels are fully transparent and present as black.
//
//=========================================================================

//=== Constants ===========================================================

/// Logical raster width all scene coordinates are authored against.
pub const LOGICAL_WIDTH: u32 = 160;

/// Logical raster height all scene coordinates are authored against.
pub const LOGICAL_HEIGHT: u32 = 144;

/// Blend weight of a fully opaque layer.
const FULL: u16 = 255;

//=== Color ===============================================================

/// Straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::hex(0x000000);
    pub const WHITE: Self = Self::hex(0xFFFFFF);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
            a: 0xFF,
        }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation between two colors, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    fn premultiplied(self) -> [u8; 4] {
        let a = u16::from(self.a);
        [scale(self.r, a), scale(self.g, a), scale(self.b, a), self.a]
    }
}

//=== Canvas ==============================================================

/// Premultiplied RGBA8 raster with clipped drawing primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    //--- Construction -----------------------------------------------------

    /// Creates a transparent canvas.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Canvas dimensions must be positive");
        Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        }
    }

    /// Creates a canvas at the logical 160×144 resolution.
    pub fn logical() -> Self {
        Self::new(LOGICAL_WIDTH, LOGICAL_HEIGHT)
    }

    //--- Accessors --------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw premultiplied RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Reads back one pixel as stored (premultiplied).
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let i = self.index(x, y)?;
        let p = &self.data[i..i + 4];
        Some(Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// Whether every pixel is fully transparent.
    pub fn is_clear(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    //--- Whole-Raster Operations ------------------------------------------

    /// Resets every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Overwrites every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        let p = color.premultiplied();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&p);
        }
    }

    /// Composites `src` over this canvas at `opacity` (clamped to [0, 1]).
    ///
    /// Both canvases must share dimensions; mismatched layers are a
    /// programming error.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn composite(&mut self, src: &Canvas, opacity: f32) {
        assert!(
            self.width == src.width && self.height == src.height,
            "Layer size mismatch: {}x{} over {}x{}",
            src.width,
            src.height,
            self.width,
            self.height
        );

        let weight = (opacity.clamp(0.0, 1.0) * 255.0).round() as u16;
        if weight == 0 {
            return;
        }

        for (d, s) in self.data.chunks_exact_mut(4).zip(src.data.chunks_exact(4)) {
            blend(d, [s[0], s[1], s[2], s[3]], weight);
        }
    }

    /// Copies the raster into an RGBA8 frame of the same size.
    ///
    /// Returns `false` without writing if the lengths differ.
    pub fn copy_into(&self, frame: &mut [u8]) -> bool {
        if frame.len() != self.data.len() {
            return false;
        }
        frame.copy_from_slice(&self.data);
        true
    }

    //--- Primitives -------------------------------------------------------

    /// Blends one pixel. Off-canvas coordinates are ignored.
    pub fn put(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.blend_at(i, color.premultiplied());
        }
    }

    /// Fills an axis-aligned rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 || color.a == 0 {
            return;
        }

        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width as i32);
        let y1 = y.saturating_add(h).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let p = color.premultiplied();
        for row in y0..y1 {
            for col in x0..x1 {
                let i = ((row as u32 * self.width + col as u32) * 4) as usize;
                self.blend_at(i, p);
            }
        }
    }

    /// Fills a rectangle given in fractional coordinates, snapping each
    /// edge to the nearest pixel.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.fill_rect(
            x.round() as i32,
            y.round() as i32,
            w.round() as i32,
            h.round() as i32,
            color,
        );
    }

    /// Rectangle with a solid border of `size` pixels drawn around it.
    pub fn outline_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        fill: Color,
        outline: Color,
        size: i32,
    ) {
        self.fill_rect(x - size, y - size, w + size * 2, h + size * 2, outline);
        self.fill_rect(x, y, w, h, fill);
    }

    /// Fills every pixel whose center lies within `radius` of `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if radius <= 0.0 || color.a == 0 {
            return;
        }

        let r2 = radius * radius;
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;
        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Fills an axis-aligned ellipse with radii `rx` and `ry`.
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: Color) {
        if rx <= 0.0 || ry <= 0.0 || color.a == 0 {
            return;
        }

        for y in (cy - ry).floor() as i32..=(cy + ry).ceil() as i32 {
            for x in (cx - rx).floor() as i32..=(cx + rx).ceil() as i32 {
                let dx = (x as f32 + 0.5 - cx) / rx;
                let dy = (y as f32 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// One-pixel Bresenham line, both endpoints included.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };

        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        loop {
            self.put(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fills the band `[y, y + h)` across the full width with a vertical
    /// gradient from `top` to `bottom`.
    pub fn vertical_gradient(&mut self, y: i32, h: i32, top: Color, bottom: Color) {
        if h <= 0 {
            return;
        }
        let span = (h - 1).max(1) as f32;
        for row in 0..h {
            let color = top.lerp(bottom, row as f32 / span);
            self.fill_rect(0, y + row, self.width as i32, 1, color);
        }
    }

    /// Fills a closed polygon using the even-odd rule, sampling pixel
    /// centers.
    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        if points.len() < 3 || color.a == 0 {
            return;
        }

        let (min_y, max_y) = points
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));

        let y0 = (min_y.floor() as i32).max(0);
        let y1 = (max_y.ceil() as i32).min(self.height as i32 - 1);
        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());

        for row in y0..=y1 {
            let sy = row as f32 + 0.5;
            crossings.clear();

            for (i, &(ax, ay)) in points.iter().enumerate() {
                let (bx, by) = points[(i + 1) % points.len()];
                if (ay <= sy && by > sy) || (by <= sy && ay > sy) {
                    crossings.push(ax + (sy - ay) / (by - ay) * (bx - ax));
                }
            }

            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let start = (pair[0] - 0.5).ceil() as i32;
                let end = (pair[1] - 0.5).floor() as i32;
                if end >= start {
                    self.fill_rect(start, row, end - start + 1, 1, color);
                }
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(((y as u32 * self.width + x as u32) * 4) as usize)
    }

    fn blend_at(&mut self, i: usize, src: [u8; 4]) {
        blend(&mut self.data[i..i + 4], src, FULL);
    }
}

//=== Compositing Math ====================================================

/// Source-over of one premultiplied pixel onto `dst`, with the source
/// scaled by `weight / 255` first.
fn blend(dst: &mut [u8], src: [u8; 4], weight: u16) {
    let alpha = scale(src[3], weight);
    if alpha == 0 {
        return;
    }
    if alpha == 255 {
        dst.copy_from_slice(&src);
        return;
    }

    let keep = FULL - u16::from(alpha);
    for (d, s) in dst.iter_mut().zip(src) {
        *d = scale(s, weight).saturating_add(scale(*d, keep));
    }
}

/// `v * by / 255`, rounded.
fn scale(v: u8, by: u16) -> u8 {
    ((u32::from(v) * u32::from(by) + 127) / 255) as u8
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::hex(0xFF0000);
    const BLUE: Color = Color::hex(0x0000FF);

    //=== Color ===========================================================

    #[test]
    fn hex_unpacks_channels() {
        assert_eq!(Color::hex(0x123456), Color::rgba(0x12, 0x34, 0x56, 0xFF));
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(RED.lerp(BLUE, 0.0), RED);
        assert_eq!(RED.lerp(BLUE, 1.0), BLUE);
        assert_eq!(RED.lerp(BLUE, 7.0), BLUE);
    }

    //=== Canvas basics ===================================================

    #[test]
    fn logical_canvas_dimensions() {
        let canvas = Canvas::logical();
        assert_eq!((canvas.width(), canvas.height()), (160, 144));
        assert_eq!(canvas.as_bytes().len(), 160 * 144 * 4);
        assert!(canvas.is_clear());
    }

    #[test]
    #[should_panic(expected = "Canvas dimensions must be positive")]
    fn zero_sized_canvas_panics() {
        Canvas::new(0, 10);
    }

    #[test]
    fn clear_removes_all_pixels() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill(RED);
        assert!(!canvas.is_clear());
        canvas.clear();
        assert!(canvas.is_clear());
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(-2, -2, 4, 4, RED);

        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn fill_rect_fully_off_canvas_is_noop() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(10, 10, 3, 3, RED);
        canvas.fill_rect(0, 0, 0, 3, RED);
        assert!(canvas.is_clear());
    }

    #[test]
    fn put_ignores_out_of_range() {
        let mut canvas = Canvas::new(2, 2);
        canvas.put(-1, 0, RED);
        canvas.put(2, 0, RED);
        assert!(canvas.is_clear());
        assert_eq!(canvas.pixel(5, 5), None);
    }

    #[test]
    fn circle_covers_center_not_corners() {
        let mut canvas = Canvas::new(9, 9);
        canvas.fill_circle(4.5, 4.5, 3.0, RED);

        assert_eq!(canvas.pixel(4, 4), Some(RED));
        assert_eq!(canvas.pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn ellipse_is_wider_than_tall() {
        let mut canvas = Canvas::new(20, 10);
        canvas.fill_ellipse(10.0, 5.0, 8.0, 3.0, RED);

        assert_eq!(canvas.pixel(10, 5), Some(RED));
        assert_eq!(canvas.pixel(4, 5), Some(RED));
        assert_eq!(canvas.pixel(10, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn line_includes_both_endpoints() {
        let mut canvas = Canvas::new(8, 8);
        canvas.line(6, 1, 1, 5, RED);

        assert_eq!(canvas.pixel(6, 1), Some(RED));
        assert_eq!(canvas.pixel(1, 5), Some(RED));
        assert_eq!(canvas.pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn line_clips_off_canvas_points() {
        let mut canvas = Canvas::new(4, 4);
        canvas.line(-3, 0, 3, 0, RED);

        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(3, 0), Some(RED));
    }

    #[test]
    fn gradient_runs_top_to_bottom() {
        let mut canvas = Canvas::new(2, 3);
        canvas.vertical_gradient(0, 3, RED, BLUE);

        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(1, 2), Some(BLUE));
    }

    #[test]
    fn polygon_fills_interior() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_polygon(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], RED);

        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(9, 9), Some(RED));
    }

    #[test]
    fn polygon_triangle_leaves_outside_empty() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_polygon(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], RED);

        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(9, 9), Some(Color::TRANSPARENT));
    }

    //=== Compositing =====================================================

    #[test]
    fn composite_full_opacity_replaces() {
        let mut dst = Canvas::new(2, 2);
        dst.fill(RED);
        let mut src = Canvas::new(2, 2);
        src.fill(BLUE);

        dst.composite(&src, 1.0);
        assert_eq!(dst.pixel(1, 1), Some(BLUE));
    }

    #[test]
    fn composite_zero_opacity_keeps_destination() {
        let mut dst = Canvas::new(2, 2);
        dst.fill(RED);
        let mut src = Canvas::new(2, 2);
        src.fill(BLUE);

        dst.composite(&src, 0.0);
        assert_eq!(dst.pixel(0, 0), Some(RED));
    }

    #[test]
    fn composite_clamps_opacity() {
        let mut dst = Canvas::new(1, 1);
        dst.fill(RED);
        let mut src = Canvas::new(1, 1);
        src.fill(BLUE);

        dst.composite(&src, 3.5);
        assert_eq!(dst.pixel(0, 0), Some(BLUE));
    }

    #[test]
    fn crossfade_midpoint_mixes_both_layers() {
        let mut frame = Canvas::new(1, 1);
        let mut a = Canvas::new(1, 1);
        a.fill(RED);
        let mut b = Canvas::new(1, 1);
        b.fill(BLUE);

        frame.composite(&a, 0.5);
        frame.composite(&b, 0.5);

        let px = frame.pixel(0, 0).unwrap();
        assert!(px.r > 0 && px.b > 0, "expected a mix, got {:?}", px);
        assert!(px.b > px.r, "incoming layer should dominate: {:?}", px);
    }

    #[test]
    fn transparent_source_pixels_do_not_overwrite() {
        let mut dst = Canvas::new(2, 1);
        dst.fill(RED);
        let mut src = Canvas::new(2, 1);
        src.put(0, 0, BLUE);

        dst.composite(&src, 1.0);
        assert_eq!(dst.pixel(0, 0), Some(BLUE));
        assert_eq!(dst.pixel(1, 0), Some(RED));
    }

    #[test]
    fn translucent_put_blends_with_destination() {
        let mut canvas = Canvas::new(1, 1);
        canvas.fill(Color::BLACK);
        canvas.put(0, 0, Color::WHITE.with_alpha(128));

        assert_eq!(canvas.pixel(0, 0), Some(Color::rgba(128, 128, 128, 255)));
    }

    #[test]
    #[should_panic(expected = "Layer size mismatch")]
    fn composite_rejects_mismatched_layers() {
        let mut dst = Canvas::new(2, 2);
        dst.composite(&Canvas::new(3, 3), 1.0);
    }

    #[test]
    fn copy_into_checks_length() {
        let mut canvas = Canvas::new(1, 1);
        canvas.fill(RED);

        let mut frame = [0u8; 4];
        assert!(canvas.copy_into(&mut frame));
        assert_eq!(frame, [0xFF, 0, 0, 0xFF]);

        let mut wrong = [0u8; 8];
        assert!(!canvas.copy_into(&mut wrong));
    }
}
