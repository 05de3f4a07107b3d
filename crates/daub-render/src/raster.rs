//! CPU rasterizer target
//!
//! Paints every live instance of a frame into an RGBA canvas. Shapes are
//! centered on the particle position, scaled to half its size in pixels
//! and rotated by its spawn angle. Blending is source-over.

use crate::error::RenderError;
use crate::frame::{FrameTarget, RenderFrame};
use crate::geometry::{Primitive, ShapeGeometry};
use daub_core::{RenderContext, Rgb};
use daub_particles::integrator::{color_at, size_at};
use daub_particles::Slot;
use glam::Vec2;
use image::{Rgba, RgbaImage};
use std::path::Path;

pub struct Rasterizer {
    ctx: RenderContext,
    canvas: RgbaImage,
    background: Rgb,
}

impl Rasterizer {
    pub fn new(ctx: &RenderContext) -> Self {
        let background = Rgb::BLACK;
        Self {
            ctx: *ctx,
            canvas: RgbaImage::from_pixel(ctx.width, ctx.height, to_rgba8(background, 1.0)),
            background,
        }
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self.clear();
        self
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn clear(&mut self) {
        let px = to_rgba8(self.background, 1.0);
        for p in self.canvas.pixels_mut() {
            *p = px;
        }
    }

    /// Write the canvas as an image; the format follows the file extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.canvas.save(path.as_ref())?;
        log::info!(
            "wrote {}x{} canvas to {}",
            self.ctx.width,
            self.ctx.height,
            path.as_ref().display()
        );
        Ok(())
    }

    fn draw_instance(&mut self, slot: &Slot, geometry: &ShapeGeometry, now: f32) {
        let [r, g, b, alpha] = color_at(slot, now);
        if alpha <= 0.0 {
            return;
        }
        let color = Rgb::new(r, g, b);
        let [x, y] = slot.position();
        let center = Vec2::from(self.ctx.to_pixels(x, y));
        let scale = size_at(slot, now) * 0.5;
        let rotation = Vec2::from_angle(slot.spawn_angle());

        // model space is y-up, the canvas is y-down
        let to_canvas = |v: [f32; 2]| {
            let p = rotation.rotate(Vec2::from(v)) * scale;
            Vec2::new(center.x + p.x, center.y - p.y)
        };
        let points: Vec<Vec2> = (0..geometry.vertex_count())
            .map(|i| to_canvas(geometry.vertex(i)))
            .collect();

        match geometry.primitive {
            Primitive::Points => self.blend(center.x, center.y, color, alpha),
            Primitive::Lines => {
                for seg in points.chunks_exact(2) {
                    self.line(seg[0], seg[1], color, alpha);
                }
            }
            Primitive::LineLoop => {
                for i in 0..points.len() {
                    self.line(points[i], points[(i + 1) % points.len()], color, alpha);
                }
            }
            Primitive::TriangleFan if geometry.shaded => self.disc(center, scale, color, alpha),
            Primitive::TriangleFan => self.fill_convex(&points, color, alpha),
        }
    }

    fn line(&mut self, a: Vec2, b: Vec2, color: Rgb, alpha: f32) {
        let d = b - a;
        let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let p = a + d * (i as f32 / steps as f32);
            self.blend(p.x, p.y, color, alpha);
        }
    }

    fn fill_convex(&mut self, points: &[Vec2], color: Rgb, alpha: f32) {
        let Some((min, max)) = self.clipped_bounds(points) else {
            return;
        };
        for py in min.1..max.1 {
            for px in min.0..max.0 {
                let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                if inside_convex(points, p) {
                    self.blend_pixel(px, py, color, alpha);
                }
            }
        }
    }

    /// Disc with alpha falling off linearly to the rim
    fn disc(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        let r = Vec2::splat(radius);
        let Some((min, max)) = self.clipped_bounds(&[center - r, center + r]) else {
            return;
        };
        for py in min.1..max.1 {
            for px in min.0..max.0 {
                let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                let falloff = 1.0 - p.distance(center) / radius;
                if falloff > 0.0 {
                    self.blend_pixel(px, py, color, alpha * falloff);
                }
            }
        }
    }

    /// Pixel bounds of `points`, clipped to the canvas, as half-open ranges
    fn clipped_bounds(&self, points: &[Vec2]) -> Option<((u32, u32), (u32, u32))> {
        let (lo, hi) = points.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(lo, hi), p| (lo.min(*p), hi.max(*p)),
        );
        let w = self.canvas.width() as f32;
        let h = self.canvas.height() as f32;
        let x0 = lo.x.floor().clamp(0.0, w) as u32;
        let y0 = lo.y.floor().clamp(0.0, h) as u32;
        let x1 = hi.x.ceil().clamp(0.0, w) as u32;
        let y1 = hi.y.ceil().clamp(0.0, h) as u32;
        (x0 < x1 && y0 < y1).then_some(((x0, y0), (x1, y1)))
    }

    fn blend(&mut self, x: f32, y: f32, color: Rgb, alpha: f32) {
        let (x, y) = (x.floor(), y.floor());
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.canvas.width() && y < self.canvas.height() {
            self.blend_pixel(x, y, color, alpha);
        }
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: Rgb, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        let dst = self.canvas.get_pixel_mut(x, y);
        let mix = |src: f32, dst: u8| {
            let d = dst as f32 / 255.0;
            (src.clamp(0.0, 1.0) * alpha + d * (1.0 - alpha)) * 255.0
        };
        let [r, g, b] = color.to_array();
        *dst = Rgba([
            mix(r, dst[0]).round() as u8,
            mix(g, dst[1]).round() as u8,
            mix(b, dst[2]).round() as u8,
            255,
        ]);
    }
}

impl FrameTarget for Rasterizer {
    fn begin_frame(&mut self) {
        self.clear();
    }

    fn draw(&mut self, frame: &RenderFrame<'_>) {
        let geometry = frame.geometry;
        for slot in frame.live_slots() {
            self.draw_instance(&slot, geometry, frame.now);
        }
    }
}

fn to_rgba8(color: Rgb, alpha: f32) -> Rgba<u8> {
    let [r, g, b] = color.to_array();
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([q(r), q(g), q(b), q(alpha)])
}

/// Winding-agnostic point-in-convex-polygon test
fn inside_convex(points: &[Vec2], p: Vec2) -> bool {
    let mut sign = 0.0f32;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        let cross = (b - a).perp_dot(p - a);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geometry;
    use daub_core::{FrameTime, ShapeKind};
    use daub_particles::{Generation, ParticleSpawn, ParticleStore};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn ctx() -> RenderContext {
        RenderContext::new(32, 32).unwrap()
    }

    fn red_at_center(size: f32) -> Slot {
        ParticleSpawn {
            birth_color: [1.0, 0.0, 0.0],
            death_color: [1.0, 0.0, 0.0],
            birth_time: 0.0,
            death_time: 1000.0,
            size,
            decay: 1.0,
            ..Default::default()
        }
        .to_slot()
    }

    fn integrated(slot: Slot) -> ParticleStore {
        let mut store = ParticleStore::new(&ctx(), 2).unwrap();
        store.write(&slot);
        store.integrate(|s, _| *s, FrameTime::new(0.0, 0.0));
        store
    }

    fn current(store: &ParticleStore) -> &Generation {
        store.current().unwrap()
    }

    fn paint(kind: ShapeKind, slot: Slot, now: f32) -> Rasterizer {
        let store = integrated(slot);
        let frame = RenderFrame::new(current(&store), kind, geometry(kind), now);
        let mut raster = Rasterizer::new(&ctx());
        raster.begin_frame();
        raster.draw(&frame);
        raster
    }

    #[test]
    fn filled_square_covers_center() {
        let raster = paint(ShapeKind::SquareFilled, red_at_center(8.0), 100.0);
        assert_eq!(*raster.canvas().get_pixel(16, 16), RED);
        assert_eq!(*raster.canvas().get_pixel(13, 18), RED);
        assert_eq!(*raster.canvas().get_pixel(0, 0), BLACK);
        assert_eq!(*raster.canvas().get_pixel(25, 16), BLACK);
    }

    #[test]
    fn stroked_square_leaves_hollow_center() {
        let raster = paint(ShapeKind::SquareStroked, red_at_center(8.0), 100.0);
        assert_eq!(*raster.canvas().get_pixel(16, 16), BLACK);
        assert_eq!(*raster.canvas().get_pixel(20, 16), RED);
        assert_eq!(*raster.canvas().get_pixel(12, 16), RED);
    }

    #[test]
    fn shaded_circle_fades_to_rim() {
        let raster = paint(ShapeKind::CircleShaded, red_at_center(16.0), 100.0);
        let near = raster.canvas().get_pixel(16, 16)[0];
        let far = raster.canvas().get_pixel(21, 16)[0];
        assert!(near > far, "{near} vs {far}");
        assert_eq!(*raster.canvas().get_pixel(16, 26), BLACK);
    }

    #[test]
    fn dead_particles_leave_canvas_untouched() {
        let raster = paint(ShapeKind::SquareFilled, red_at_center(8.0), 2000.0);
        assert!(raster.canvas().pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn begin_frame_clears_to_background() {
        let mut raster = paint(ShapeKind::SquareFilled, red_at_center(8.0), 100.0);
        raster.begin_frame();
        assert_eq!(*raster.canvas().get_pixel(16, 16), BLACK);

        let white = Rasterizer::new(&ctx()).with_background(Rgb::WHITE);
        assert_eq!(*white.canvas().get_pixel(3, 3), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn offscreen_instances_are_clipped() {
        let mut slot = red_at_center(8.0);
        slot.set_motion([3.0, -3.0], [0.0, 0.0]);
        let raster = paint(ShapeKind::HexFilled, slot, 100.0);
        assert!(raster.canvas().pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn saves_png() {
        let raster = paint(ShapeKind::TriFilled, red_at_center(8.0), 100.0);
        let path = std::env::temp_dir().join(format!("daub-raster-{}.png", std::process::id()));
        raster.save(&path).unwrap();
        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (32, 32));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn convex_test_ignores_winding() {
        let cw = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(2.0, 0.0),
        ];
        let mut ccw = cw;
        ccw.reverse();
        for poly in [cw, ccw] {
            assert!(inside_convex(&poly, Vec2::new(1.0, 1.0)));
            assert!(!inside_convex(&poly, Vec2::new(3.0, 1.0)));
        }
    }
}
