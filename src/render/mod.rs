//! UpSet plot rendering.
//!
//! A plot has three panels laid out by [`PlotLayout`]:
//!
//! - **intersection bars**: one bar per record, in the order given
//! - **matrix**: one row per set, one column per record, filled dots where
//!   the set takes part in the pattern, joined by a connector line
//! - **set sizes**: horizontal bars left of the set names
//!
//! Renderers never reorder records; the aggregator's order is the plot order.

mod glyphs;
mod layout;
mod raster;
mod svg;

pub use layout::{PlotLayout, Rect};
pub use raster::RasterRenderer;
pub use svg::SvgRenderer;

use crate::data::IntersectionSet;
use crate::error::{UpsetError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Anything that can draw an intersection set to a file.
pub trait Renderer {
    /// Render `set` and write the image to `path`.
    fn render(&self, set: &IntersectionSet, path: &Path) -> Result<()>;
}

/// Plot styling, loadable from YAML. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Optional title drawn above the plot.
    pub title: Option<String>,
    /// Width and height of one matrix cell.
    pub cell_size: u32,
    /// Height of the tallest intersection bar.
    pub bar_height: u32,
    /// Width of the widest set-size bar.
    pub set_bar_width: u32,
    /// Space reserved for set names.
    pub label_width: u32,
    /// Outer margin.
    pub margin: u32,
    /// Pixel multiplier for raster output.
    pub scale: u32,
    pub bar_color: String,
    pub dot_color: String,
    pub inactive_color: String,
    pub shade_color: String,
    pub background: String,
    /// Print counts above intersection bars.
    pub show_counts: bool,
    /// Draw the set-size panel.
    pub show_set_sizes: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: None,
            cell_size: 32,
            bar_height: 180,
            set_bar_width: 120,
            label_width: 140,
            margin: 24,
            scale: 2,
            bar_color: "#222222".to_string(),
            dot_color: "#222222".to_string(),
            inactive_color: "#d9d9d9".to_string(),
            shade_color: "#f2f2f2".to_string(),
            background: "#ffffff".to_string(),
            show_counts: true,
            show_set_sizes: true,
        }
    }
}

impl RenderConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(UpsetError::FileNotFound(path.to_path_buf()));
        }
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(UpsetError::from)
    }

    /// Check sizes and colors.
    pub fn validate(&self) -> Result<()> {
        if self.cell_size < 8 {
            return Err(UpsetError::InvalidParameter(format!(
                "cell_size must be at least 8, got {}",
                self.cell_size
            )));
        }
        if self.bar_height == 0 {
            return Err(UpsetError::InvalidParameter(
                "bar_height must be positive".to_string(),
            ));
        }
        if !(1..=16).contains(&self.scale) {
            return Err(UpsetError::InvalidParameter(format!(
                "scale must be between 1 and 16, got {}",
                self.scale
            )));
        }
        for color in [
            &self.bar_color,
            &self.dot_color,
            &self.inactive_color,
            &self.shade_color,
            &self.background,
        ] {
            parse_hex_color(color)?;
        }
        Ok(())
    }
}

/// Parse `#rrggbb` or `#rgb` into RGB bytes.
pub fn parse_hex_color(color: &str) -> Result<[u8; 3]> {
    let invalid = || UpsetError::InvalidParameter(format!("invalid color '{}'", color));
    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return Err(invalid()),
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Output path actually written for `path`: a path without an extension
/// gets `.png`.
pub fn resolve_output(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

/// Pick a renderer for `path` by its extension (`png`, `jpg`/`jpeg`, `svg`).
///
/// Paths without an extension render as PNG.
pub fn renderer_for(path: &Path, config: &RenderConfig) -> Result<Box<dyn Renderer>> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "png".to_string());
    match extension.as_str() {
        "png" => Ok(Box::new(RasterRenderer::png(config.clone())?)),
        "jpg" | "jpeg" => Ok(Box::new(RasterRenderer::jpeg(config.clone())?)),
        "svg" => Ok(Box::new(SvgRenderer::new(config.clone())?)),
        _ => Err(UpsetError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}

/// Render `set` to `path`, choosing the backend from the extension.
///
/// Returns the path written, see [`resolve_output`].
pub fn render_plot<P: AsRef<Path>>(
    set: &IntersectionSet,
    path: P,
    config: &RenderConfig,
) -> Result<PathBuf> {
    let path = resolve_output(path.as_ref());
    renderer_for(&path, config)?.render(set, &path)?;
    info!(path = %path.display(), patterns = set.len(), "rendered UpSet plot");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000").unwrap(), [255, 128, 0]);
        assert_eq!(parse_hex_color("#fff").unwrap(), [255, 255, 255]);
        assert!(parse_hex_color("ff8000").is_err());
        assert!(parse_hex_color("#ff80").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
    }

    #[test]
    fn test_config_yaml_partial() {
        let config = RenderConfig::from_yaml("title: Overlaps\ncell_size: 20\n").unwrap();

        assert_eq!(config.title.as_deref(), Some("Overlaps"));
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.bar_height, RenderConfig::default().bar_height);
    }

    #[test]
    fn test_config_yaml_roundtrip() {
        let config = RenderConfig {
            show_counts: false,
            ..RenderConfig::default()
        };
        let parsed = RenderConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_validation() {
        assert!(RenderConfig::from_yaml("scale: 0\n").is_err());
        assert!(RenderConfig::from_yaml("bar_color: red\n").is_err());
        assert!(RenderConfig::from_yaml("cell_size: 2\n").is_err());
    }

    #[test]
    fn test_renderer_for_extension() {
        let config = RenderConfig::default();
        assert!(renderer_for(Path::new("plot.png"), &config).is_ok());
        assert!(renderer_for(Path::new("plot.SVG"), &config).is_ok());
        assert!(renderer_for(Path::new("plot.jpg"), &config).is_ok());
        assert!(renderer_for(Path::new("plot.JPEG"), &config).is_ok());
        assert!(renderer_for(Path::new("plot"), &config).is_ok());
        assert!(matches!(
            renderer_for(Path::new("plot.gif"), &config),
            Err(UpsetError::UnsupportedFormat { extension, .. }) if extension == "gif"
        ));
    }

    #[test]
    fn test_resolve_output() {
        assert_eq!(resolve_output(Path::new("out/plot")), PathBuf::from("out/plot.png"));
        assert_eq!(resolve_output(Path::new("plot.svg")), PathBuf::from("plot.svg"));
        assert_eq!(resolve_output(Path::new("plot.JPG")), PathBuf::from("plot.JPG"));
    }
}
