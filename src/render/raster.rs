//! Raster output (PNG, JPEG) through the `image` crate.

use super::glyphs::{ambiguous_labels, text_pixels, text_width, undrawable, GLYPH_HEIGHT};
use super::layout::{PlotLayout, Rect};
use super::{parse_hex_color, RenderConfig, Renderer};
use crate::data::IntersectionSet;
use crate::error::Result;
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Copy)]
struct Palette {
    bar: Rgb<u8>,
    dot: Rgb<u8>,
    inactive: Rgb<u8>,
    shade: Rgb<u8>,
    background: Rgb<u8>,
}

impl Palette {
    fn from_config(config: &RenderConfig) -> Result<Self> {
        let rgb = |c: &str| parse_hex_color(c).map(Rgb);
        Ok(Self {
            bar: rgb(config.bar_color.as_str())?,
            dot: rgb(config.dot_color.as_str())?,
            inactive: rgb(config.inactive_color.as_str())?,
            shade: rgb(config.shade_color.as_str())?,
            background: rgb(config.background.as_str())?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Anchor {
    Middle,
    End,
}

/// Image plus the plot-unit → pixel scale.
struct Canvas {
    img: RgbImage,
    scale: f64,
}

impl Canvas {
    fn new(width: f64, height: f64, scale: u32, background: Rgb<u8>) -> Self {
        let scale = scale as f64;
        let w = (width * scale).ceil().max(1.0) as u32;
        let h = (height * scale).ceil().max(1.0) as u32;
        Self {
            img: RgbImage::from_pixel(w, h, background),
            scale,
        }
    }

    fn fill_rect(&mut self, r: Rect, color: Rgb<u8>) {
        let (w, h) = (self.img.width() as f64, self.img.height() as f64);
        let x0 = (r.x * self.scale).round().clamp(0.0, w) as u32;
        let x1 = (r.right() * self.scale).round().clamp(0.0, w) as u32;
        let y0 = (r.y * self.scale).round().clamp(0.0, h) as u32;
        let y1 = (r.bottom() * self.scale).round().clamp(0.0, h) as u32;
        for y in y0..y1 {
            for x in x0..x1 {
                self.img.put_pixel(x, y, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb<u8>) {
        let (cx, cy, r) = (cx * self.scale, cy * self.scale, radius * self.scale);
        let (w, h) = (self.img.width() as f64, self.img.height() as f64);
        let x0 = (cx - r).floor().clamp(0.0, w) as u32;
        let x1 = (cx + r).ceil().clamp(0.0, w) as u32;
        let y0 = (cy - r).floor().clamp(0.0, h) as u32;
        let y1 = (cy + r).ceil().clamp(0.0, h) as u32;
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.img.put_pixel(x, y, color);
                }
            }
        }
    }

    /// Draw `text` with font pixels `unit` plot units wide, vertically
    /// centred on `cy`.
    fn text(&mut self, text: &str, x: f64, cy: f64, anchor: Anchor, unit: f64, color: Rgb<u8>) {
        let width = text_width(text) as f64 * unit;
        let left = match anchor {
            Anchor::Middle => x - width / 2.0,
            Anchor::End => x - width,
        };
        let top = cy - GLYPH_HEIGHT as f64 * unit / 2.0;
        for (px, py) in text_pixels(text) {
            let r = Rect::new(left + px as f64 * unit, top + py as f64 * unit, unit, unit);
            self.fill_rect(r, color);
        }
    }
}

/// Raster renderer. Labels use a built-in bitmap font; characters it
/// cannot draw are logged and drawn as a filled box.
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    config: RenderConfig,
    palette: Palette,
    format: ImageFormat,
}

impl RasterRenderer {
    /// Create a renderer for `format`, validating the config.
    pub fn new(config: RenderConfig, format: ImageFormat) -> Result<Self> {
        config.validate()?;
        let palette = Palette::from_config(&config)?;
        Ok(Self {
            config,
            palette,
            format,
        })
    }

    /// PNG output.
    pub fn png(config: RenderConfig) -> Result<Self> {
        Self::new(config, ImageFormat::Png)
    }

    /// JPEG output.
    pub fn jpeg(config: RenderConfig) -> Result<Self> {
        Self::new(config, ImageFormat::Jpeg)
    }

    /// Encoding used when writing.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Draw the plot into an image without writing it.
    pub fn draw(&self, set: &IntersectionSet) -> RgbImage {
        check_labels(&set.set_names);
        let layout = PlotLayout::new(set, &self.config);
        let p = self.palette;
        let mut canvas = Canvas::new(layout.width, layout.height, self.config.scale, p.background);
        let unit = (layout.cell / 14.0).max(1.0);

        for row in (1..layout.n_rows()).step_by(2) {
            canvas.fill_rect(layout.row_band(row), p.shade);
        }

        if let (Some(title), Some(ty)) = (&self.config.title, layout.title_y) {
            canvas.text(title, layout.width / 2.0, ty, Anchor::Middle, unit * 1.4, p.bar);
        }

        for (col, record) in set.iter().enumerate() {
            let bar = layout.bar(col, record.count);
            canvas.fill_rect(bar, p.bar);
            if self.config.show_counts {
                let cy = bar.y - unit * 4.0;
                canvas.text(&record.count.to_string(), bar.center_x(), cy, Anchor::Middle, unit, p.bar);
            }

            if let Some(connector) = layout.connector(col, &record.mask) {
                canvas.fill_rect(connector, p.dot);
            }
            for row in 0..layout.n_rows() {
                let color = if record.contains(row) { p.dot } else { p.inactive };
                canvas.fill_circle(layout.column_x(col), layout.row_y(row), layout.dot_radius(), color);
            }
        }

        for (row, name) in set.set_names.iter().enumerate() {
            canvas.text(name, layout.labels_right - unit * 4.0, layout.row_y(row), Anchor::End, unit, p.bar);

            if self.config.show_set_sizes {
                let size = set.set_sizes.get(row).copied().unwrap_or(0);
                let bar = layout.set_bar(row, size);
                canvas.fill_rect(bar, p.bar);
                canvas.text(&size.to_string(), bar.x - unit * 2.0, layout.row_y(row), Anchor::End, unit, p.bar);
            }
        }

        canvas.img
    }
}

impl Renderer for RasterRenderer {
    fn render(&self, set: &IntersectionSet, path: &Path) -> Result<()> {
        self.draw(set).save_with_format(path, self.format)?;
        Ok(())
    }
}

fn check_labels(set_names: &[String]) {
    for name in set_names {
        let missing = undrawable(name);
        if !missing.is_empty() {
            warn!(label = %name, ?missing, "raster font cannot draw some characters; use .svg for exact labels");
        }
    }
    for (first, second) in ambiguous_labels(set_names) {
        warn!(first, second, "set labels look identical in raster output");
    }
}
