//! Output writers: DXF and SVG vector drawings plus the JSON build-metadata
//! record.

pub mod dxf;
pub mod meta;
pub mod svg;

use std::path::{Path, PathBuf};

use keyplate_geometry::Sketch;
use keyplate_layout::{Key, KeyboardConfig};
use tracing::{error, info};

pub use dxf::dxf_from_sketch;
pub use meta::BuildMetadata;
pub use svg::{svg_from_sketch, SvgError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Dxf,
    Svg,
    /// Build metadata; only written alongside the switch layer.
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dxf" => Some(Self::Dxf),
            "svg" => Some(Self::Svg),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Dxf => "dxf",
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }
}

/// Write `layer` in every requested format under
/// `<directory>/<name>/<layer>_layer.<ext>`. A failing format is logged and
/// does not prevent the remaining formats. Returns the files written.
pub fn export_layer(
    directory: &Path,
    config: &KeyboardConfig,
    rows: &[Vec<Key>],
    layer: &str,
    sketch: &Sketch,
    formats: &[Format],
) -> Vec<PathBuf> {
    info!("exporting {layer} layer for {}", config.name);
    let dirname = directory.join(&config.name);
    if let Err(e) = std::fs::create_dir_all(&dirname) {
        error!("could not create export directory {}: {e}", dirname.display());
        return Vec::new();
    }

    let mut written = Vec::new();
    for format in formats {
        let path = dirname.join(format!("{layer}_layer.{}", format.extension()));
        let contents = match format {
            Format::Dxf => Ok(dxf_from_sketch(sketch)),
            Format::Svg => svg_from_sketch(sketch).map_err(|e| e.to_string()),
            Format::Json => {
                if layer != "switch" {
                    continue;
                }
                BuildMetadata::new(config, rows)
                    .to_json()
                    .map_err(|e| e.to_string())
            }
        };

        let contents = match contents {
            Ok(contents) => contents,
            Err(e) => {
                error!("{layer} layer {} export failed: {e}", format.extension());
                continue;
            }
        };

        match std::fs::write(&path, contents) {
            Ok(()) => {
                info!("exported {} to {}", format.extension(), path.display());
                written.push(path);
            }
            Err(e) => error!("could not write {}: {e}", path.display()),
        }
    }

    written
}
