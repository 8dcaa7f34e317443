//! Static Chart Renderer
//! Draws a [`BarChartConfig`] into an in-memory RGB bitmap with plotters.
//!
//! Layout:
//! 1. Caption: dataset label, centered
//! 2. Y axis starting at zero, one category per fiscal year on X
//! 3. One bar per year, `barThickness` px wide, top-left corner rounded
//! 4. Raw value printed above each bar end

use crate::charts::{BarChartConfig, BarPoint, ChartError, ChartingLibrary, RenderSurface, Rgba};
use crate::data::MetricKey;
use image::RgbImage;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;

const MARGIN: u32 = 20;
const CAPTION_FONT: u32 = 20;
const AXIS_FONT: u32 = 14;
const LABEL_FONT: u32 = 14;
const LABEL_GAP: i32 = 4;
const ARC_STEPS: usize = 8;
// Headroom above the tallest bar for its data label
const Y_HEADROOM: f64 = 1.15;

/// Surface size and text switch for the plotters backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    /// Caption, axis labels and data labels. Off means no font lookups at all.
    pub draw_labels: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            draw_labels: true,
        }
    }
}

/// Bitmap produced by [`PlottersLibrary`].
#[derive(Debug)]
pub struct BitmapSurface {
    image: RgbImage,
    metric: MetricKey,
}

impl BitmapSurface {
    /// Metric the surface was drawn for.
    pub fn metric(&self) -> MetricKey {
        self.metric
    }
}

impl RenderSurface for BitmapSurface {
    fn pixels(&self) -> &RgbImage {
        &self.image
    }

    fn destroy(self) {
        tracing::debug!(metric = %self.metric, "Destroying chart surface");
    }
}

/// Charting library backed by plotters' bitmap backend.
#[derive(Debug, Clone, Default)]
pub struct PlottersLibrary {
    settings: RenderSettings,
}

impl PlottersLibrary {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }
}

impl ChartingLibrary for PlottersLibrary {
    type Surface = BitmapSurface;

    fn create(&mut self, config: &BarChartConfig) -> Result<BitmapSurface, ChartError> {
        let metric = config.metric()?;
        let points = config.dataset()?.resolve()?;
        let RenderSettings { width, height, .. } = self.settings;

        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        draw_chart(&mut buffer, &self.settings, config, &points)?;
        let image = RgbImage::from_raw(width, height, buffer).ok_or(ChartError::Buffer)?;

        tracing::debug!(%metric, width, height, bars = points.len(), "Created chart surface");
        Ok(BitmapSurface { image, metric })
    }
}

fn draw_err<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Draw(format!("{:?}", e))
}

fn to_color(color: Rgba) -> RGBAColor {
    RGBAColor(color.r, color.g, color.b, color.a as f64)
}

fn draw_chart(
    buffer: &mut [u8],
    settings: &RenderSettings,
    config: &BarChartConfig,
    points: &[BarPoint],
) -> Result<(), ChartError> {
    let dataset = config.dataset()?;
    let options = &config.options;

    let root =
        BitMapBackend::with_buffer(buffer, (settings.width, settings.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let max_value = points.iter().map(|p| p.value).fold(0.0f64, f64::max);
    let min_value = points.iter().map(|p| p.value).fold(max_value, f64::min);
    let y_max = if max_value > 0.0 {
        max_value * Y_HEADROOM
    } else {
        1.0
    };
    let y_min = if options.scales.y.begin_at_zero {
        0.0
    } else {
        min_value.min(y_max - 1.0)
    };

    let mut builder = ChartBuilder::on(&root);
    builder.margin(MARGIN);
    if settings.draw_labels {
        builder
            .caption(&dataset.label, ("sans-serif", CAPTION_FONT))
            .x_label_area_size(40)
            .y_label_area_size(70);
    }
    let mut chart = builder
        .build_cartesian_2d((0..points.len()).into_segmented(), y_min..y_max)
        .map_err(draw_err)?;

    if settings.draw_labels {
        let categories: Vec<&str> = points.iter().map(|p| p.category.as_str()).collect();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(points.len())
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) => categories
                    .get(*i)
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|v| format!("{:.0}", v))
            .label_style(("sans-serif", AXIS_FONT))
            .draw()
            .map_err(draw_err)?;
    }

    let (x_range, _) = chart.plotting_area().get_pixel_range();
    let band = (x_range.end - x_range.start) / points.len().max(1) as i32;
    let thickness = options.bar_thickness.min(options.max_bar_thickness) as i32;
    let bar_width = thickness.min(band * 9 / 10).max(1);
    let label_style = ("sans-serif", f64::from(LABEL_FONT))
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    for (index, point) in points.iter().enumerate() {
        let (center, top) = chart.backend_coord(&(SegmentValue::CenterOf(index), point.value));
        let (_, base) = chart.backend_coord(&(SegmentValue::CenterOf(index), y_min));
        let left = center - bar_width / 2;
        let outline = rounded_bar(
            left,
            left + bar_width,
            top,
            base,
            dataset.border_radius.top_left as i32,
        );

        root.draw(&Polygon::new(outline.clone(), to_color(point.fill).filled()))
            .map_err(draw_err)?;
        if dataset.border_width > 0 {
            let mut closed = outline;
            if let Some(first) = closed.first().copied() {
                closed.push(first);
            }
            root.draw(&PathElement::new(
                closed,
                to_color(point.border).stroke_width(dataset.border_width),
            ))
            .map_err(draw_err)?;
        }

        if settings.draw_labels {
            root.draw(&Text::new(
                point.label.clone(),
                (center, top - LABEL_GAP),
                label_style.clone(),
            ))
            .map_err(draw_err)?;
        }
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Outline of a bar whose top-left corner is rounded by `radius` px.
/// Screen coordinates: `top` is above `base`.
fn rounded_bar(left: i32, right: i32, top: i32, base: i32, radius: i32) -> Vec<(i32, i32)> {
    let height = (base - top).max(0);
    let r = radius.min((right - left) / 2).min(height).max(0);

    let mut outline = vec![(left, base), (left, top + r)];
    if r > 0 {
        let (cx, cy) = ((left + r) as f64, (top + r) as f64);
        for step in 1..ARC_STEPS {
            let theta = PI + (step as f64 / ARC_STEPS as f64) * (PI / 2.0);
            outline.push((
                (cx + r as f64 * theta.cos()).round() as i32,
                (cy + r as f64 * theta.sin()).round() as i32,
            ));
        }
        outline.push((left + r, top));
    }
    outline.push((right, top));
    outline.push((right, base));
    outline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_bar_without_radius() {
        assert_eq!(
            rounded_bar(10, 20, 5, 50, 0),
            vec![(10, 50), (10, 5), (20, 5), (20, 50)]
        );
    }

    #[test]
    fn rounded_corner_stays_inside_bar() {
        let outline = rounded_bar(100, 172, 40, 300, 25);
        assert_eq!(outline.first(), Some(&(100, 300)));
        assert_eq!(outline[1], (100, 65));
        assert!(outline.contains(&(125, 40)));
        assert!(outline
            .iter()
            .all(|&(x, y)| (100..=172).contains(&x) && (40..=300).contains(&y)));
    }

    #[test]
    fn radius_is_clamped_to_short_bars() {
        let outline = rounded_bar(0, 72, 295, 300, 25);
        assert_eq!(outline[1], (0, 300));
        assert!(outline.iter().all(|&(_, y)| (295..=300).contains(&y)));
    }
}
