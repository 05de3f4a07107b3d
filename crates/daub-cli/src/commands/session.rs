//! Scripted painting session shared by `simulate` and `render`

use anyhow::{bail, Context, Result};
use daub_render::FrameTarget;
use daub_runtime::{KeyEvent, PointerEvent, Studio, StudioConfig};
use serde::Serialize;
use std::f32::consts::TAU;

#[derive(clap::Args, Debug, Clone)]
pub struct SessionArgs {
    /// Studio config file (TOML)
    #[arg(long)]
    pub config: Option<String>,

    /// Simulation frames to run
    #[arg(long, default_value = "90")]
    pub frames: u64,

    /// Frames the pointer stays down (default: a third of --frames)
    #[arg(long)]
    pub stroke_frames: Option<u64>,

    /// Hold record while stroking so the stroke loops afterwards
    #[arg(long)]
    pub record: bool,

    /// Preset to apply to the painting layer
    #[arg(long)]
    pub preset: Option<String>,

    /// Number of layers; the stroke paints the last one
    #[arg(long, default_value = "1")]
    pub layers: usize,

    /// Host callbacks per second, before the frame limiter
    #[arg(long, default_value = "60")]
    pub host_rate: f64,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    #[arg(long)]
    pub dim: Option<usize>,

    #[arg(long)]
    pub seed: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct LayerReport {
    pub index: usize,
    pub capacity: usize,
    pub write_cursor: usize,
    pub recorded_events: usize,
    pub loop_duration_ms: f64,
    pub vcr_state: String,
}

#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub frames: u64,
    pub host_callbacks: u64,
    pub elapsed_ms: f64,
    pub stroke_events: usize,
    pub particles_painted: usize,
    pub layers: Vec<LayerReport>,
}

/// Config file (or defaults) with command-line overrides applied
pub fn load_config(args: &SessionArgs) -> Result<StudioConfig> {
    let mut config = match &args.config {
        Some(path) => StudioConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path))?,
        None => StudioConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(dim) = args.dim {
        config.dim = dim;
        config.max_row_texels = config.max_row_texels.map(|m| m.min(dim));
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate().context("Invalid studio config")?;
    Ok(config)
}

/// Run the scripted stroke: pointer down on the first frame, a full circle
/// around the canvas center over the stroke frames, then release and let
/// the particles (and any recording) play out.
pub fn run(args: &SessionArgs, target: &mut dyn FrameTarget) -> Result<(Studio, SessionReport)> {
    if !args.host_rate.is_finite() || args.host_rate <= 0.0 {
        bail!("--host-rate must be positive, got {}", args.host_rate);
    }
    if args.layers == 0 {
        bail!("--layers must be at least 1");
    }

    let config = load_config(args)?;
    let mut studio = Studio::new(config).context("Failed to create studio")?;
    for _ in 1..args.layers {
        studio.add_layer()?;
    }
    if let Some(preset) = &args.preset {
        studio
            .set_preset(preset)
            .with_context(|| format!("Failed to apply preset '{}'", preset))?;
    }

    let stroke_frames = args.stroke_frames.unwrap_or(args.frames / 3).max(1);
    let ctx = *studio.context();
    let [cx, cy] = ctx.center();
    let radius = ctx.width.min(ctx.height) as f32 * 0.3;
    let at = |frame: u64| {
        let angle = frame as f32 / stroke_frames as f32 * TAU;
        (cx + radius * angle.cos(), cy + radius * angle.sin())
    };

    let host_interval = 1000.0 / args.host_rate;
    let mut now = 0.0;
    let mut frames = 0;
    let mut host_callbacks = 0;
    let mut stroke_events = 0;
    let mut painted = 0;

    while frames < args.frames {
        now += host_interval;
        host_callbacks += 1;
        if !studio.update(now, target) {
            continue;
        }
        frames += 1;

        if frames == 1 {
            if args.record {
                studio.handle_key_event(KeyEvent::down('r'));
            }
            let (x, y) = at(0);
            painted += studio.handle_pointer_event(PointerEvent::down(x, y));
            stroke_events += 1;
        } else if frames <= stroke_frames {
            let (x, y) = at(frames - 1);
            painted += studio.handle_pointer_event(PointerEvent::moved(x, y));
            stroke_events += 1;
        } else if frames == stroke_frames + 1 {
            let (x, y) = at(stroke_frames);
            studio.handle_pointer_event(PointerEvent::up(x, y));
            if args.record {
                studio.handle_key_event(KeyEvent::up('r'));
            }
        }
    }
    log::info!("{} frames over {} host callbacks", frames, host_callbacks);

    let layers = studio
        .layers()
        .iter()
        .enumerate()
        .map(|(index, layer)| LayerReport {
            index,
            capacity: layer.store().capacity(),
            write_cursor: layer.store().write_cursor(),
            recorded_events: layer.vcr().events().len(),
            loop_duration_ms: layer.vcr().duration(),
            vcr_state: format!("{:?}", layer.vcr().state()),
        })
        .collect();

    let report = SessionReport {
        frames,
        host_callbacks,
        elapsed_ms: now,
        stroke_events,
        particles_painted: painted,
        layers,
    };
    Ok((studio, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use daub_render::FrameStats;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        session: SessionArgs,
    }

    fn args(extra: &[&str]) -> SessionArgs {
        Harness::parse_from(std::iter::once("daub").chain(extra.iter().copied())).session
    }

    #[test]
    fn test_scripted_session_records_stroke() {
        let a = args(&[
            "--frames", "30", "--dim", "32", "--width", "200", "--height", "200", "--record",
        ]);
        let mut stats = FrameStats::default();
        let (studio, report) = run(&a, &mut stats).unwrap();

        assert_eq!(report.frames, 30);
        assert_eq!(stats.frames, 30);
        assert_eq!(report.stroke_events, 10);
        assert!(report.particles_painted > 0);
        assert_eq!(report.layers[0].recorded_events, 10);
        assert_eq!(report.layers[0].vcr_state, "Playing");
        assert!(report.layers[0].loop_duration_ms > 0.0);
        assert!(!studio.active_layer().is_drawing());
    }

    #[test]
    fn test_stroke_paints_last_layer() {
        let a = args(&["--frames", "12", "--dim", "16", "--layers", "2"]);
        let mut stats = FrameStats::default();
        let (_, report) = run(&a, &mut stats).unwrap();
        assert_eq!(report.layers.len(), 2);
        assert_eq!(report.layers[0].write_cursor, 0);
        assert!(report.layers[1].write_cursor > 0);
        assert_eq!(stats.draws, 24);
    }

    #[test]
    fn test_rejects_bad_overrides() {
        let mut stats = FrameStats::default();
        assert!(run(&args(&["--dim", "0"]), &mut stats).is_err());
        assert!(run(&args(&["--host-rate", "0"]), &mut stats).is_err());
        assert!(run(&args(&["--preset", "nope"]), &mut stats).is_err());
    }
}
