use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::smoother::DEFAULT_TOLERANCE;

/// Environment variable naming a JSON config file to load at startup
pub const CONFIG_ENV_VAR: &str = "INKINK_CONFIG";

const DEFAULT_PALETTE: [&str; 12] = [
    "#FF660000", "#FFFF0000", "#FFFF6600", "#FFFFCC00", "#FF009900", "#FF009999",
    "#FF0000FF", "#FF990099", "#FFFF6666", "#FFFFFFFF", "#FF787878", "#FF000000",
];

/// Brush width presets offered by the size chooser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushSize {
    Small,
    Medium,
    Large,
}

impl BrushSize {
    pub fn all() -> &'static [BrushSize] {
        &[BrushSize::Small, BrushSize::Medium, BrushSize::Large]
    }

    pub fn label(&self) -> &'static str {
        match self {
            BrushSize::Small => "Small",
            BrushSize::Medium => "Medium",
            BrushSize::Large => "Large",
        }
    }
}

/// Tunables of the drawing surface and its shell.
///
/// Missing fields fall back to their defaults when deserializing, so config
/// files from older versions keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Per-axis distance a sample must travel before the curve is extended
    pub smoothing_tolerance: f32,
    pub small_brush: f32,
    pub medium_brush: f32,
    pub large_brush: f32,
    /// Color of the first stroke
    pub initial_color: Color32,
    /// Palette entries as `#RRGGBB` or `#AARRGGBB`
    pub palette: Vec<String>,
    /// Where saved drawings are written
    pub save_directory: PathBuf,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            smoothing_tolerance: DEFAULT_TOLERANCE,
            small_brush: 10.0,
            medium_brush: 20.0,
            large_brush: 30.0,
            initial_color: Color32::from_rgb(0x66, 0x00, 0x00),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            save_directory: PathBuf::from("."),
        }
    }
}

impl SurfaceConfig {
    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load the file named by `INKINK_CONFIG`, if set. Unreadable or invalid
    /// files are logged and treated as absent.
    pub fn from_env() -> Option<Self> {
        let path = std::env::var_os(CONFIG_ENV_VAR)?;
        match Self::load(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded config from {}", Path::new(&path).display());
                Some(config)
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {}", Path::new(&path).display(), err);
                None
            }
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let positive = |name: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
            }
        };
        positive("smoothing_tolerance", self.smoothing_tolerance)?;
        positive("small_brush", self.small_brush)?;
        positive("medium_brush", self.medium_brush)?;
        positive("large_brush", self.large_brush)?;
        Ok(())
    }

    pub fn brush_width(&self, size: BrushSize) -> f32 {
        match size {
            BrushSize::Small => self.small_brush,
            BrushSize::Medium => self.medium_brush,
            BrushSize::Large => self.large_brush,
        }
    }

    /// Palette entries that parse; invalid ones are skipped with a warning
    pub fn palette_colors(&self) -> Vec<Color32> {
        self.palette
            .iter()
            .filter_map(|hex| {
                let color = parse_hex_color(hex);
                if color.is_none() {
                    log::warn!("Skipping invalid palette color: {}", hex);
                }
                color
            })
            .collect()
    }
}

/// Parse `#RRGGBB` or `#AARRGGBB` (leading `#` optional)
pub fn parse_hex_color(hex: &str) -> Option<Color32> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.is_ascii() {
        return None;
    }
    let byte = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };

    match digits.len() {
        6 => Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color32::from_rgba_unmultiplied(
            byte(2)?,
            byte(4)?,
            byte(6)?,
            byte(0)?,
        )),
        _ => None,
    }
}
