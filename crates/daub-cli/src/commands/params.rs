//! Palette schema command

use anyhow::{Context, Result};
use daub_core::ShapeKind;
use daub_runtime::StudioConfig;
use std::collections::BTreeMap;

pub fn run(config: Option<&str>, format: &str) -> Result<()> {
    let config = match config {
        Some(path) => StudioConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path))?,
        None => StudioConfig::default(),
    };
    let palette = config.palette_with_hue(0.0)?;

    if format == "json" {
        let params: BTreeMap<_, _> = palette.params().collect();
        let shapes: Vec<_> = ShapeKind::ALL.iter().map(|s| s.as_str()).collect();
        let out = serde_json::json!({
            "params": params,
            "shape": palette.shape(),
            "shapes": shapes,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{:<12} {:>10} {:>10} {:>10} {:>10}", "param", "default", "min", "max", "value");
    for (name, entry) in palette.params() {
        let value = entry
            .value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12} {:>10} {:>10} {:>10} {:>10}",
            name, entry.default, entry.min, entry.max, value
        );
    }
    println!();
    println!("shape: {}", palette.shape());
    let shapes: Vec<_> = ShapeKind::ALL.iter().map(|s| s.as_str()).collect();
    println!("shapes: {}", shapes.join(", "));
    Ok(())
}
