use indexmap::IndexMap;
use serde::Serialize;

/// Mechanical keyswitch footprint standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SwitchFamily {
    #[serde(rename = "mx")]
    Mx,
    #[serde(rename = "alpsmx")]
    AlpsMx,
    #[serde(rename = "mx-open")]
    MxOpen,
    #[serde(rename = "mx-open-rotatable")]
    MxOpenRotatable,
    #[serde(rename = "alps")]
    Alps,
}

impl SwitchFamily {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mx" => Some(Self::Mx),
            "alpsmx" => Some(Self::AlpsMx),
            "mx-open" => Some(Self::MxOpen),
            "mx-open-rotatable" => Some(Self::MxOpenRotatable),
            "alps" => Some(Self::Alps),
            _ => None,
        }
    }
}

/// Stabilizer mechanism under wide keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StabFamily {
    #[serde(rename = "cherry")]
    Cherry,
    #[serde(rename = "cherry-costar")]
    CherryCostar,
    #[serde(rename = "costar")]
    Costar,
    #[serde(rename = "matias")]
    Matias,
    #[serde(rename = "alps")]
    Alps,
}

impl StabFamily {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cherry" => Some(Self::Cherry),
            "cherry-costar" => Some(Self::CherryCostar),
            "costar" => Some(Self::Costar),
            "matias" => Some(Self::Matias),
            "alps" => Some(Self::Alps),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseType {
    #[default]
    None,
    Poker,
    Sandwich,
    /// A bare reinforcing plate: no mounting geometry at all.
    Reinforcing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CornerStyle {
    #[default]
    None,
    Round,
    Bevel,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CaseConfig {
    #[serde(rename = "type")]
    pub case_type: CaseType,
    pub screw_size: f64,
    pub screw_count: u32,
    /// False when the sandwich screw count failed validation; the mounting
    /// ring is skipped for the whole build.
    #[serde(skip)]
    pub sandwich_holes: bool,
}

impl Default for CaseConfig {
    fn default() -> Self {
        Self {
            case_type: CaseType::None,
            screw_size: 0.0,
            screw_count: 0,
            sandwich_holes: false,
        }
    }
}

/// USB opening geometry: a trapezoid from the case edge (outer width) down to
/// the PCB opening (inner width).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UsbCutout {
    pub inner_width: f64,
    pub outer_width: f64,
    pub height: f64,
    pub offset: f64,
}

impl Default for UsbCutout {
    fn default() -> Self {
        Self {
            inner_width: 10.0,
            outer_width: 15.0,
            height: 5.0,
            offset: 0.0,
        }
    }
}

/// Growth applied to the cutout dimension set on the reinforcing layer, so its
/// openings clear the switch housing. The exact constants drifted across
/// historical plate revisions, so they stay configurable.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReinforcingOffsets {
    pub grow: f64,
    /// Floor for the stabilizer top edge growth.
    pub stab_top_min: f64,
    /// Floor for the stabilizer bottom edge growth.
    pub stab_bottom_min: f64,
}

impl Default for ReinforcingOffsets {
    fn default() -> Self {
        Self {
            grow: 1.0,
            stab_top_min: 2.5,
            stab_bottom_min: 4.3,
        }
    }
}

/// Per-layer overrides.
#[derive(Debug, Clone, Serialize)]
pub struct LayerOptions {
    pub inset: bool,
    pub oversize: f64,
    pub thickness: f64,
    pub holes: Vec<(f64, f64, f64)>,
    pub polygons: Vec<Vec<(f64, f64)>>,
    pub include_usb_cutout: bool,
    pub key_spacing: Option<f64>,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            inset: false,
            oversize: 0.0,
            thickness: 1.5,
            holes: Vec::new(),
            polygons: Vec::new(),
            include_usb_cutout: false,
            key_spacing: None,
        }
    }
}

/// Whole-keyboard settings extracted from the layout's configuration rows.
/// Built once during normalization, immutable afterwards.
#[derive(Debug, Clone)]
pub struct KeyboardConfig {
    pub name: String,
    pub case: CaseConfig,
    pub corner_style: CornerStyle,
    pub corner_radius: f64,
    pub feet: Vec<(f64, f64)>,
    pub foot_hole_diameter: f64,
    pub foot_hole_square: f64,
    pub foot_pitch: f64,
    /// Half-kerf: cuts are offset by this amount on each side of the line.
    pub kerf: f64,
    pub key_spacing: f64,
    pub switch: SwitchFamily,
    pub stabilizer: StabFamily,
    pub usb: UsbCutout,
    pub x_pad: f64,
    pub y_pad: f64,
    pub x_pcb_pad: f64,
    pub y_pcb_pad: f64,
    pub grow_x: f64,
    pub grow_y: f64,
    pub reinforcing: ReinforcingOffsets,
    pub layers: IndexMap<String, LayerOptions>,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        let mut layers = IndexMap::new();
        layers.insert("switch".to_string(), LayerOptions::default());
        Self {
            name: String::new(),
            case: CaseConfig::default(),
            corner_style: CornerStyle::None,
            corner_radius: 0.0,
            feet: Vec::new(),
            foot_hole_diameter: 3.0,
            foot_hole_square: 9.0,
            foot_pitch: 15.0,
            kerf: 0.0,
            key_spacing: 19.05,
            switch: SwitchFamily::Mx,
            stabilizer: StabFamily::Cherry,
            usb: UsbCutout::default(),
            x_pad: 0.0,
            y_pad: 0.0,
            x_pcb_pad: 0.0,
            y_pcb_pad: 0.0,
            grow_x: 0.0,
            grow_y: 0.0,
            reinforcing: ReinforcingOffsets::default(),
            layers,
        }
    }
}

impl KeyboardConfig {
    /// Options for `layer`, falling back to defaults for unconfigured layers.
    pub fn layer_options(&self, layer: &str) -> LayerOptions {
        self.layers.get(layer).cloned().unwrap_or_default()
    }
}

/// One key cell of the normalized layout. A descriptor cell in the raw stream
/// attaches these attributes to the key it emits.
#[derive(Debug, Clone, Serialize)]
pub struct Key {
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch: Option<SwitchFamily>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stabilizer: Option<StabFamily>,
    /// Full kerf override; halved at use like the plate kerf.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kerf: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_stab: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_offset: Option<f64>,
}

impl Default for Key {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            x: None,
            y: None,
            switch: None,
            stabilizer: None,
            kerf: None,
            rotate: None,
            rotate_stab: None,
            center_offset: None,
        }
    }
}

/// Plate envelope, derived once from the normalized layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateDimensions {
    pub width: f64,
    pub height: f64,
    pub inside_width: f64,
    pub inside_height: f64,
    pub horizontal_edge: f64,
    pub vertical_edge: f64,
}
