//! Headless session-to-PNG render command

use super::session::{self, SessionArgs};
use anyhow::{Context, Result};
use daub_render::Rasterizer;

pub fn run(args: SessionArgs, output: &str) -> Result<()> {
    let config = session::load_config(&args)?;
    let ctx = config.render_context()?;
    let mut raster = Rasterizer::new(&ctx);

    let (studio, report) = session::run(&args, &mut raster)?;
    raster
        .save(output)
        .with_context(|| format!("Failed to save image to {}", output))?;

    println!(
        "Rendered {} frames ({} layer(s), {}) at {}x{} to {}",
        report.frames,
        report.layers.len(),
        studio.active_layer().renderer().shape(),
        ctx.width,
        ctx.height,
        output
    );
    Ok(())
}
