use keyplate_layout::{CaseConfig, Key, KeyboardConfig, StabFamily, SwitchFamily};
use serde::Serialize;

/// Reproducibility record written alongside the switch layer: the normalized
/// configuration a build ran with.
#[derive(Debug, Serialize)]
pub struct BuildMetadata<'a> {
    pub plate_layout: &'a [Vec<Key>],
    pub switch_type: SwitchFamily,
    pub stabilizer_type: StabFamily,
    pub case_type_and_holes: &'a CaseConfig,
    pub width_padding: f64,
    pub height_padding: f64,
    pub pcb_width_padding: f64,
    pub pcb_height_padding: f64,
    pub plate_corners: f64,
    pub kerf: f64,
}

impl<'a> BuildMetadata<'a> {
    pub fn new(config: &'a KeyboardConfig, rows: &'a [Vec<Key>]) -> Self {
        Self {
            plate_layout: rows,
            switch_type: config.switch,
            stabilizer_type: config.stabilizer,
            case_type_and_holes: &config.case,
            width_padding: config.x_pad,
            height_padding: config.y_pad,
            pcb_width_padding: config.x_pcb_pad,
            pcb_height_padding: config.y_pcb_pad,
            plate_corners: config.corner_radius,
            kerf: config.kerf,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
