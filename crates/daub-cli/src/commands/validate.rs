//! Studio config validation command

use anyhow::Result;
use daub_runtime::StudioConfig;

pub fn run(path: &str, format: &str) -> Result<()> {
    let result = StudioConfig::load(path).and_then(|config| {
        let presets = config.preset_book(|| 0.0)?;
        Ok((config, presets))
    });

    if format == "json" {
        let out = match &result {
            Ok((config, presets)) => serde_json::json!({
                "file": path,
                "valid": true,
                "dim": config.dim,
                "presets": presets.names().collect::<Vec<_>>(),
            }),
            Err(e) => serde_json::json!({
                "file": path,
                "valid": false,
                "error": e.to_string(),
            }),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        match &result {
            Ok((config, presets)) => {
                println!("{}: valid", path);
                println!("  {}x{} slots per layer, {} fps limit", config.dim, config.dim, config.fps_limit);
                for name in presets.names() {
                    println!("  preset: {}", name);
                }
            }
            Err(e) => println!("{}: invalid: {}", path, e),
        }
    }

    result.map(|_| ()).map_err(Into::into)
}
