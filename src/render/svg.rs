//! Vector output as a standalone SVG document.

use super::layout::{PlotLayout, Rect};
use super::{RenderConfig, Renderer};
use crate::data::IntersectionSet;
use crate::error::Result;
use std::path::Path;

const FONT: &str = "font-family=\"sans-serif\"";

/// SVG renderer with text labels.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    config: RenderConfig,
}

impl SvgRenderer {
    /// Create a renderer, validating the config.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Build the SVG document for `set`.
    pub fn to_svg(&self, set: &IntersectionSet) -> String {
        let layout = PlotLayout::new(set, &self.config);
        let c = &self.config;
        let font_size = (layout.cell * 0.4).round();
        let mut svg = String::new();

        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.0}\" height=\"{h:.0}\" viewBox=\"0 0 {w:.2} {h:.2}\">\n",
            w = layout.width,
            h = layout.height
        ));
        svg.push_str(&rect(
            Rect::new(0.0, 0.0, layout.width, layout.height),
            &c.background,
        ));

        for row in (1..layout.n_rows()).step_by(2) {
            svg.push_str(&rect(layout.row_band(row), &c.shade_color));
        }

        if let (Some(title), Some(ty)) = (&c.title, layout.title_y) {
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" {} font-size=\"{}\" font-weight=\"bold\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>\n",
                layout.width / 2.0,
                ty,
                FONT,
                font_size * 1.4,
                escape(title)
            ));
        }

        svg.push_str("<g class=\"intersections\">\n");
        for (col, record) in set.iter().enumerate() {
            let bar = layout.bar(col, record.count);
            svg.push_str(&format!(
                "<g class=\"intersection\" data-pattern=\"{}\" data-count=\"{}\">\n",
                escape(&record.label()),
                record.count
            ));
            svg.push_str(&rect(bar, &c.bar_color));
            if c.show_counts {
                svg.push_str(&format!(
                    "<text x=\"{:.2}\" y=\"{:.2}\" {} font-size=\"{}\" text-anchor=\"middle\">{}</text>\n",
                    bar.center_x(),
                    bar.y - 4.0,
                    FONT,
                    font_size,
                    record.count
                ));
            }
            if let Some(connector) = layout.connector(col, &record.mask) {
                svg.push_str(&rect(connector, &c.dot_color));
            }
            for row in 0..layout.n_rows() {
                let fill = if record.contains(row) {
                    &c.dot_color
                } else {
                    &c.inactive_color
                };
                svg.push_str(&format!(
                    "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>\n",
                    layout.column_x(col),
                    layout.row_y(row),
                    layout.dot_radius(),
                    fill
                ));
            }
            svg.push_str("</g>\n");
        }
        svg.push_str("</g>\n");

        svg.push_str("<g class=\"sets\">\n");
        for (row, name) in set.set_names.iter().enumerate() {
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" {} font-size=\"{}\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
                layout.labels_right - 8.0,
                layout.row_y(row),
                FONT,
                font_size,
                escape(name)
            ));
            if c.show_set_sizes {
                let size = set.set_sizes.get(row).copied().unwrap_or(0);
                let bar = layout.set_bar(row, size);
                svg.push_str(&rect(bar, &c.bar_color));
                svg.push_str(&format!(
                    "<text x=\"{:.2}\" y=\"{:.2}\" {} font-size=\"{}\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
                    bar.x - 4.0,
                    layout.row_y(row),
                    FONT,
                    font_size,
                    size
                ));
            }
        }
        svg.push_str("</g>\n</svg>\n");
        svg
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, set: &IntersectionSet, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_svg(set))?;
        Ok(())
    }
}

fn rect(r: Rect, fill: &str) -> String {
    format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>\n",
        r.x, r.y, r.w, r.h, fill
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
