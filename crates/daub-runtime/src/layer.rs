//! One paintable layer
//!
//! Each frame a layer replays due VCR events, integrates its store, hands
//! the fresh generation to the draw target and swaps generations.

use crate::input::{PointerEvent, PointerKind};
use daub_core::{FrameTime, RenderContext, Result, Rgb};
use daub_palette::{Palette, PaletteValues, ParamEntry};
use daub_particles::integrator::step;
use daub_particles::rand::ParticleRng;
use daub_particles::{Injector, ParticleStore};
use daub_render::{FrameTarget, Renderer};
use daub_vcr::{RecordedEvent, StrokeSink, Vcr};
use glam::Vec2;

/// Lower bound of the random HSV value of a stroke color
const MIN_STROKE_VALUE: f32 = 0.75;

/// Stroke state: the injector plus the color of the stroke in progress
#[derive(Debug, Clone)]
struct Painter {
    injector: Injector,
    rng: ParticleRng,
    /// `Some` while the pointer is down
    rgb: Option<Rgb>,
}

impl Painter {
    fn fresh_color(&mut self, values: &PaletteValues) -> Rgb {
        let v = self.rng.range(MIN_STROKE_VALUE, 1.0);
        Rgb::from_hsv(values.color_hue, values.saturation, v)
    }
}

/// Replays recorded strokes with a color drawn from the live palette
struct Replay<'a> {
    painter: &'a mut Painter,
    store: &'a mut ParticleStore,
    values: PaletteValues,
    time: FrameTime,
}

impl StrokeSink for Replay<'_> {
    fn replay_stroke(&mut self, event: &RecordedEvent) {
        let color = self.painter.fresh_color(&self.values);
        self.painter
            .injector
            .inject(self.store, event.pos, color, &self.values, self.time);
    }
}

#[derive(Debug, Clone)]
pub struct Layer {
    palette: Palette,
    store: ParticleStore,
    painter: Painter,
    vcr: Vcr,
    renderer: Renderer,
    /// Time of the last frame, used for pointer events between frames
    time: FrameTime,
}

impl Layer {
    pub fn new(ctx: &RenderContext, dim: usize, palette: Palette, seed: u32) -> Result<Self> {
        let store = ParticleStore::new(ctx, dim)?;
        let renderer = Renderer::new(ctx, palette.shape());
        Ok(Self {
            palette,
            store,
            painter: Painter {
                injector: Injector::new(ctx, seed),
                rng: ParticleRng::new(seed.rotate_left(16) ^ 0x9E37_79B9),
                rgb: None,
            },
            vcr: Vcr::new(),
            renderer,
            time: FrameTime::default(),
        })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn get_param(&self, name: &str) -> Result<&ParamEntry> {
        self.palette.get_param(name)
    }

    pub fn set_value(&mut self, name: &str, value: f32) -> Result<()> {
        self.palette.set_value(name, value)
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn vcr(&self) -> &Vcr {
        &self.vcr
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn time(&self) -> FrameTime {
        self.time
    }

    pub fn set_context(&mut self, ctx: &RenderContext) {
        self.painter.injector.set_context(ctx);
        self.renderer.set_context(ctx);
    }

    pub fn is_drawing(&self) -> bool {
        self.painter.rgb.is_some()
    }

    /// HSV color from the palette's hue and saturation, with a random value
    pub fn current_color(&mut self) -> Rgb {
        let values = self.palette.values();
        self.painter.fresh_color(&values)
    }

    pub fn set_recording(&mut self, recording: bool) {
        self.vcr.set_recording(recording);
    }

    /// Translate a pointer event into injection and recording. Returns the
    /// number of particles written.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> usize {
        let pos = event.position();
        match event.kind {
            PointerKind::Down => {
                let rgb = self.current_color();
                self.painter.rgb = Some(rgb);
                self.paint(pos, rgb)
            }
            PointerKind::Move => match self.painter.rgb {
                Some(rgb) => self.paint(pos, rgb),
                None => 0,
            },
            PointerKind::Up => {
                self.painter.rgb = None;
                self.painter.injector.end_stroke();
                0
            }
        }
    }

    fn paint(&mut self, pos: Vec2, rgb: Rgb) -> usize {
        self.vcr.record_event(pos, rgb);
        let values = self.palette.values();
        self.painter
            .injector
            .inject(&mut self.store, pos, rgb, &values, self.time)
    }

    /// Run one frame: replay, integrate, draw the current generation, swap
    pub fn step(&mut self, time: FrameTime, target: &mut dyn FrameTarget) {
        self.time = time;
        self.renderer.set_shape(self.palette.shape());

        let mut replay = Replay {
            painter: &mut self.painter,
            store: &mut self.store,
            values: self.palette.values(),
            time,
        };
        self.vcr.play(time.delta, &mut replay);

        self.store.integrate(step, time);
        self.renderer.draw(&self.store, time.now, target);
        self.store.swap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daub_core::ShapeKind;
    use daub_render::FrameStats;

    fn layer() -> Layer {
        let ctx = RenderContext::new(200, 200).unwrap();
        let mut palette = Palette::with_hue(120.0);
        palette.set_value("flow", 100.0).unwrap();
        palette.set_value("symmetry", 1.0).unwrap();
        Layer::new(&ctx, 32, palette, 7).unwrap()
    }

    fn frame(layer: &mut Layer, stats: &mut FrameStats, now: f64, delta: f64) {
        stats.begin_frame();
        layer.step(FrameTime::new(now, delta), stats);
    }

    #[test]
    fn current_color_follows_palette() {
        let mut layer = layer();
        for _ in 0..20 {
            let c = layer.current_color();
            // hue 120 at full saturation is pure green at value v
            assert_eq!(c.r, 0.0);
            assert_eq!(c.b, 0.0);
            assert!(c.g >= MIN_STROKE_VALUE && c.g <= 1.0);
        }
    }

    #[test]
    fn strokes_inject_only_while_pointer_down() {
        let mut layer = layer();
        let mut stats = FrameStats::default();
        frame(&mut layer, &mut stats, 100.0, 100.0);

        assert_eq!(layer.handle_pointer_event(PointerEvent::moved(10.0, 10.0)), 0);
        assert_eq!(layer.handle_pointer_event(PointerEvent::down(50.0, 50.0)), 10);
        assert!(layer.is_drawing());
        assert_eq!(layer.handle_pointer_event(PointerEvent::moved(60.0, 50.0)), 10);
        layer.handle_pointer_event(PointerEvent::up(60.0, 50.0));
        assert!(!layer.is_drawing());
        assert_eq!(layer.handle_pointer_event(PointerEvent::moved(70.0, 50.0)), 0);
        assert_eq!(layer.store().write_cursor(), 20);
    }

    #[test]
    fn injected_particles_render_next_frame() {
        let mut layer = layer();
        let mut stats = FrameStats::default();
        frame(&mut layer, &mut stats, 100.0, 100.0);
        assert_eq!(stats.live_instances, 0);

        layer.handle_pointer_event(PointerEvent::down(50.0, 50.0));
        frame(&mut layer, &mut stats, 200.0, 100.0);
        assert_eq!(stats.live_instances, 10);
    }

    #[test]
    fn recorded_stroke_replays_on_loop() {
        let mut layer = layer();
        let mut stats = FrameStats::default();
        frame(&mut layer, &mut stats, 100.0, 100.0);

        layer.set_recording(true);
        layer.handle_pointer_event(PointerEvent::down(50.0, 50.0));
        frame(&mut layer, &mut stats, 200.0, 100.0);
        layer.handle_pointer_event(PointerEvent::up(50.0, 50.0));
        layer.set_recording(false);
        assert_eq!(layer.vcr().events().len(), 1);
        assert_eq!(layer.vcr().duration(), 100.0);

        let before = layer.store().write_cursor();
        frame(&mut layer, &mut stats, 300.0, 100.0);
        assert_eq!(layer.store().write_cursor(), before + 10);
        frame(&mut layer, &mut stats, 400.0, 100.0);
        assert_eq!(layer.store().write_cursor(), before + 20);
    }

    #[test]
    fn palette_shape_reaches_renderer() {
        let mut layer = layer();
        let mut stats = FrameStats::default();
        layer.palette_mut().set_shape(ShapeKind::Lines);
        frame(&mut layer, &mut stats, 100.0, 100.0);
        assert_eq!(layer.renderer().shape(), ShapeKind::Lines);
    }
}
