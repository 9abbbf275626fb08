use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use keyplate_builder::{
    build_bottom_layer, build_closed_layer, build_open_layer, build_switch_layer,
};
use keyplate_export::{export_layer, Format};
use keyplate_layout::normalize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Generate keyboard plate and case CAD layers from a raw layout")]
struct Cli {
    /// Layout file: comma-separated rows of key cells and config objects
    #[arg(value_name = "LAYOUT")]
    layout: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    output: PathBuf,

    /// Output formats (dxf, svg, json)
    #[arg(short, long, value_delimiter = ',', default_value = "dxf")]
    formats: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.layout)
        .with_context(|| format!("Failed to read layout file: {:?}", cli.layout))?;
    // Raw layouts are bare comma-separated rows; wrap them into one array.
    let rows: Vec<serde_json::Value> = serde_json::from_str(&format!("[{text}]"))
        .with_context(|| format!("Failed to parse layout file: {:?}", cli.layout))?;

    let formats: Vec<Format> = cli
        .formats
        .iter()
        .filter_map(|name| {
            let parsed = Format::parse(name);
            if parsed.is_none() {
                warn!("unknown output format {name:?}, skipping");
            }
            parsed
        })
        .collect();

    let (layout, config) = normalize(&rows);

    let layer_names: Vec<String> = config.layers.keys().cloned().collect();
    for layer in &layer_names {
        let sketch = match layer.as_str() {
            "switch" | "reinforcing" | "top" => build_switch_layer(&config, &layout, layer).sketch,
            "bottom" => build_bottom_layer(&config, &layout.dims),
            "closed" => build_closed_layer(&config, &layout.dims, "closed"),
            "open" => build_open_layer(&config, &layout.dims),
            other => {
                warn!("unknown layer {other:?}, skipping");
                continue;
            }
        };

        for path in export_layer(&cli.output, &config, &layout.rows, layer, &sketch, &formats) {
            println!("{}", path.display());
        }
    }

    Ok(())
}
