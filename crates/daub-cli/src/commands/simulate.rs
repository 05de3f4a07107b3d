//! Headless simulation statistics command

use super::session::{self, SessionArgs};
use anyhow::Result;
use daub_render::FrameStats;

pub fn run(args: SessionArgs, format: &str) -> Result<()> {
    let mut stats = FrameStats::default();
    let (_studio, report) = session::run(&args, &mut stats)?;

    if format == "json" {
        let out = serde_json::json!({
            "session": report,
            "draws": stats.draws,
            "live_instances": stats.live_instances,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "Simulated {} frames ({} host callbacks, {:.0} ms)",
        report.frames, report.host_callbacks, report.elapsed_ms
    );
    println!(
        "Stroke: {} events, {} particles painted",
        report.stroke_events, report.particles_painted
    );
    println!("Live instances in last frame: {}", stats.live_instances);
    for layer in &report.layers {
        println!(
            "  layer {}: cursor {}/{}, vcr {} ({} events, loop {:.0} ms)",
            layer.index,
            layer.write_cursor,
            layer.capacity,
            layer.vcr_state,
            layer.recorded_events,
            layer.loop_duration_ms
        );
    }
    Ok(())
}
