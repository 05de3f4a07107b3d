use crate::clock::FrameClock;
use crate::config::StudioConfig;
use crate::input::{KeyAction, KeyEvent, PointerEvent};
use crate::layer::Layer;
use daub_core::{DaubError, RenderContext, Result};
use daub_palette::{Palette, ParamEntry, PresetBook};
use daub_particles::rand::ParticleRng;
use daub_render::FrameTarget;

/// Key held to record on the active layer
pub const RECORD_KEY: char = 'r';

/// Ordered layers with one active layer receiving input
pub struct Studio {
    config: StudioConfig,
    ctx: RenderContext,
    layers: Vec<Layer>,
    active: usize,
    presets: PresetBook,
    clock: FrameClock,
    rng: ParticleRng,
}

impl Studio {
    /// Build a studio with one layer
    pub fn new(config: StudioConfig) -> Result<Self> {
        config.validate()?;
        let ctx = config.render_context()?;
        let mut rng = ParticleRng::new(config.seed);
        let presets = config.preset_book(|| rng.range(0.0, 360.0))?;
        let mut studio = Self {
            clock: FrameClock::with_fps_limit(config.fps_limit),
            rng,
            config,
            ctx,
            layers: Vec::new(),
            active: 0,
            presets,
        };
        studio.add_layer()?;
        log::info!(
            "studio ready: {}x{} canvas, {} slots per layer, {} presets",
            ctx.width,
            ctx.height,
            studio.config.dim * studio.config.dim,
            studio.presets.len()
        );
        Ok(studio)
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_layer(&self) -> &Layer {
        &self.layers[self.active]
    }

    pub fn active_layer_mut(&mut self) -> &mut Layer {
        &mut self.layers[self.active]
    }

    /// Append a layer with a fresh random hue and make it active
    pub fn add_layer(&mut self) -> Result<usize> {
        let hue = self.rng.range(0.0, 360.0);
        let palette = self.config.palette_with_hue(hue)?;
        let seed = self.rng.next_u32();
        let layer = Layer::new(&self.ctx, self.config.dim, palette, seed)?;
        self.layers.push(layer);
        self.active = self.layers.len() - 1;
        log::debug!("added layer {}", self.active);
        Ok(self.active)
    }

    pub fn select_layer(&mut self, index: usize) -> Result<()> {
        if index >= self.layers.len() {
            return Err(DaubError::LayerNotFound {
                index,
                count: self.layers.len(),
            });
        }
        self.active = index;
        log::debug!("selected layer {index}");
        Ok(())
    }

    /// Canvas resized: strokes and rendering map through the new size
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let ctx = RenderContext::new(width, height)?
            .with_max_row_texels(self.ctx.max_row_texels)?;
        self.ctx = ctx;
        for layer in &mut self.layers {
            layer.set_context(&ctx);
        }
        Ok(())
    }

    pub fn get_param(&self, name: &str) -> Result<&ParamEntry> {
        self.active_layer().get_param(name)
    }

    pub fn get_value(&self, name: &str) -> Result<f32> {
        self.active_layer().palette().get_value(name)
    }

    pub fn set_value(&mut self, name: &str, value: f32) -> Result<()> {
        self.active_layer_mut().set_value(name, value)
    }

    pub fn presets(&self) -> &PresetBook {
        &self.presets
    }

    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.names()
    }

    pub fn check_preset_name(&self, name: &str) -> Result<()> {
        self.presets.check_name(name)
    }

    /// Save the active layer's palette under `name`
    pub fn add_preset(&mut self, name: &str) -> Result<()> {
        let palette = self.active_layer().palette().clone();
        self.presets.add(name, palette)
    }

    /// Replace the active layer's palette with preset `name`
    pub fn set_preset(&mut self, name: &str) -> Result<()> {
        let palette: Palette = self.presets.get(name)?.clone();
        self.active_layer_mut().set_palette(palette);
        log::debug!("layer {} now uses preset '{name}'", self.active);
        Ok(())
    }

    /// Pointer input goes to the active layer
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> usize {
        self.active_layer_mut().handle_pointer_event(event)
    }

    pub fn handle_key_event(&mut self, event: KeyEvent) {
        if event.key == RECORD_KEY {
            let recording = event.action == KeyAction::Down;
            self.active_layer_mut().set_recording(recording);
        }
    }

    /// Host callback at `now` ms since start. Steps every layer in order
    /// when the frame limiter lets the frame through; returns whether it did.
    pub fn update(&mut self, now: f64, target: &mut dyn FrameTarget) -> bool {
        let Some(time) = self.clock.tick(now) else {
            return false;
        };
        target.begin_frame();
        for layer in &mut self.layers {
            layer.step(time, target);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daub_render::FrameStats;
    use daub_vcr::VcrState;

    fn studio() -> Studio {
        let config = StudioConfig::from_toml_str(
            r#"
            dim = 16
            width = 200
            height = 200

            [palette]
            flow = 100
            symmetry = 2

            [presets.sparse]
            flow = 10
            "#,
        )
        .unwrap();
        Studio::new(config).unwrap()
    }

    #[test]
    fn test_starts_with_one_active_layer() {
        let studio = studio();
        assert_eq!(studio.layers().len(), 1);
        assert_eq!(studio.active_index(), 0);
        assert_eq!(studio.get_value("flow").unwrap(), 100.0);
        assert_eq!(studio.active_layer().store().capacity(), 256);
    }

    #[test]
    fn test_presets_draw_hues_from_the_seed() {
        let config = StudioConfig::from_toml_str(
            r#"
            dim = 4
            seed = 7

            [presets.a]
            flow = 20

            [presets.b]
            flow = 30
            "#,
        )
        .unwrap();
        let studio = Studio::new(config).unwrap();

        let mut rng = ParticleRng::new(7);
        let a = studio.presets().get("a").unwrap().get_value("colorHue").unwrap();
        let b = studio.presets().get("b").unwrap().get_value("colorHue").unwrap();
        assert_eq!(a, rng.range(0.0, 360.0));
        assert_eq!(b, rng.range(0.0, 360.0));
        assert_ne!(a, b);
        assert!((0.0..360.0).contains(&a) && (0.0..360.0).contains(&b));

        // the first layer's hue follows the preset draws
        let layer_hue = studio.get_value("colorHue").unwrap();
        assert_eq!(layer_hue, rng.range(0.0, 360.0));
    }

    #[test]
    fn test_layers_add_and_select() {
        let mut studio = studio();
        assert_eq!(studio.add_layer().unwrap(), 1);
        assert_eq!(studio.active_index(), 1);
        studio.select_layer(0).unwrap();
        assert_eq!(studio.active_index(), 0);
        assert!(matches!(
            studio.select_layer(5),
            Err(DaubError::LayerNotFound { index: 5, count: 2 })
        ));
        assert_eq!(studio.active_index(), 0);
    }

    #[test]
    fn test_params_target_active_layer() {
        let mut studio = studio();
        studio.add_layer().unwrap();
        studio.set_value("size", 50.0).unwrap();
        assert!(studio.set_value("size", 500.0).is_err());
        assert!(studio.set_value("wobble", 1.0).is_err());
        studio.select_layer(0).unwrap();
        assert_eq!(studio.get_value("size").unwrap(), 25.0);
        assert_eq!(studio.get_param("size").unwrap().max, 100.0);
    }

    #[test]
    fn test_presets() {
        let mut studio = studio();
        assert_eq!(studio.preset_names().collect::<Vec<_>>(), vec!["sparse"]);
        assert!(studio.check_preset_name("sparse").is_err());
        assert!(studio.check_preset_name("").is_err());
        assert!(studio.check_preset_name("bold").is_ok());

        studio.set_value("size", 80.0).unwrap();
        studio.add_preset("bold").unwrap();
        studio.set_preset("sparse").unwrap();
        assert_eq!(studio.get_value("flow").unwrap(), 10.0);
        assert_eq!(studio.get_value("size").unwrap(), 25.0);
        studio.set_preset("bold").unwrap();
        assert_eq!(studio.get_value("size").unwrap(), 80.0);
        assert!(matches!(
            studio.set_preset("missing"),
            Err(DaubError::PresetNotFound(_))
        ));
    }

    #[test]
    fn test_record_key_toggles_active_layer() {
        let mut studio = studio();
        studio.handle_key_event(KeyEvent::down('r'));
        assert_eq!(studio.active_layer().vcr().state(), VcrState::Recording);
        studio.handle_key_event(KeyEvent::up('x'));
        assert!(studio.active_layer().vcr().is_recording());
        studio.handle_key_event(KeyEvent::up('r'));
        assert!(!studio.active_layer().vcr().is_recording());
    }

    #[test]
    fn test_update_is_frame_limited() {
        let mut studio = studio();
        studio.add_layer().unwrap();
        let mut stats = FrameStats::default();
        assert!(!studio.update(10.0, &mut stats));
        assert!(studio.update(40.0, &mut stats));
        assert!(!studio.update(50.0, &mut stats));
        assert_eq!(stats.frames, 1);
        assert_eq!(stats.draws, 2);
    }

    #[test]
    fn test_pointer_paints_active_layer_only() {
        let mut studio = studio();
        studio.add_layer().unwrap();
        let mut stats = FrameStats::default();
        studio.update(100.0, &mut stats);

        // flow 100 over a 100 ms frame, 2 symmetries
        assert_eq!(studio.handle_pointer_event(PointerEvent::down(20.0, 30.0)), 20);
        studio.update(200.0, &mut stats);
        assert_eq!(stats.live_instances, 20);
        assert_eq!(studio.layers()[0].store().write_cursor(), 0);
        assert_eq!(studio.layers()[1].store().write_cursor(), 20);
    }

    #[test]
    fn test_resize_updates_context() {
        let mut studio = studio();
        studio.resize(640, 480).unwrap();
        assert_eq!(studio.context().width, 640);
        assert_eq!(studio.active_layer().renderer().context().height, 480);
        assert!(studio.resize(0, 480).is_err());
    }
}
