//! Bar Chart Configuration
//! Describes one bar chart in the chart-library configuration shape:
//! `{ type, data: { datasets }, options }`. Serializes to the same JSON keys.

use crate::charts::ChartError;
use crate::data::{FinancialRecord, MetricKey};
use serde::{Serialize, Serializer};
use std::fmt;

/// Caption of the single dataset.
pub const DATASET_LABEL: &str = "Constant financial growth over the years";

/// Latest fiscal year.
pub const HIGHLIGHT_COLOR: Rgba = Rgba::new(92, 196, 188, 1.0);
/// Every earlier fiscal year.
pub const MUTED_COLOR: Rgba = Rgba::new(202, 232, 229, 1.0);

const BAR_THICKNESS: u32 = 72;
const BORDER_WIDTH: u32 = 1;
const TOP_LEFT_RADIUS: u32 = 25;
const CATEGORY_KEY: &str = "year";

/// CSS-style colour; serializes as `rgba(r, g, b, a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<FinancialRecord>,
    pub background_color: Vec<Rgba>,
    pub border_color: Vec<Rgba>,
    pub border_width: u32,
    pub border_radius: BorderRadius,
    pub parsing: Parsing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderRadius {
    pub top_left: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parsing {
    pub x_axis_key: String,
    pub y_axis_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub scales: Scales,
    pub plugins: Plugins,
    pub bar_thickness: u32,
    pub max_bar_thickness: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scales {
    pub y: LinearScale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearScale {
    pub begin_at_zero: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Plugins {
    pub datalabels: DataLabels,
}

/// Where the per-bar value label sits relative to the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataLabels {
    pub anchor: LabelPosition,
    pub align: LabelPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Start,
    Center,
    End,
}

/// One bar after the dataset's parsing keys have been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub category: String,
    pub value: f64,
    pub label: String,
    pub fill: Rgba,
    pub border: Rgba,
}

impl BarChartConfig {
    /// Build the configuration plotting `financials.<metric>` per year.
    /// The last record is highlighted; every other record is muted.
    pub fn for_metric(records: &[FinancialRecord], metric: MetricKey) -> Self {
        let colors: Vec<Rgba> = (0..records.len())
            .map(|index| {
                if index + 1 == records.len() {
                    HIGHLIGHT_COLOR
                } else {
                    MUTED_COLOR
                }
            })
            .collect();

        let dataset = Dataset {
            label: DATASET_LABEL.to_string(),
            data: records.to_vec(),
            background_color: colors.clone(),
            border_color: colors,
            border_width: BORDER_WIDTH,
            border_radius: BorderRadius {
                top_left: TOP_LEFT_RADIUS,
            },
            parsing: Parsing {
                x_axis_key: CATEGORY_KEY.to_string(),
                y_axis_key: metric.axis_key(),
            },
        };

        Self {
            kind: ChartKind::Bar,
            data: ChartData {
                datasets: vec![dataset],
            },
            options: ChartOptions {
                scales: Scales {
                    y: LinearScale {
                        begin_at_zero: true,
                    },
                },
                plugins: Plugins {
                    datalabels: DataLabels {
                        anchor: LabelPosition::End,
                        align: LabelPosition::End,
                    },
                },
                bar_thickness: BAR_THICKNESS,
                max_bar_thickness: BAR_THICKNESS,
            },
        }
    }

    /// The dataset driving the chart.
    pub fn dataset(&self) -> Result<&Dataset, ChartError> {
        self.data.datasets.first().ok_or(ChartError::EmptyDataset)
    }

    /// Metric named by the value-axis parsing key.
    pub fn metric(&self) -> Result<MetricKey, ChartError> {
        let key = &self.dataset()?.parsing.y_axis_key;
        MetricKey::from_axis_key(key).map_err(|_| ChartError::UnknownAxisKey(key.clone()))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Dataset {
    /// Apply `parsing` to every record.
    pub fn resolve(&self) -> Result<Vec<BarPoint>, ChartError> {
        if self.parsing.x_axis_key != CATEGORY_KEY {
            return Err(ChartError::UnknownAxisKey(self.parsing.x_axis_key.clone()));
        }
        let metric = MetricKey::from_axis_key(&self.parsing.y_axis_key)
            .map_err(|_| ChartError::UnknownAxisKey(self.parsing.y_axis_key.clone()))?;

        Ok(self
            .data
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let value = record.value(metric);
                BarPoint {
                    category: record.year.to_string(),
                    value,
                    label: format_value(value),
                    fill: self.background_color.get(index).copied().unwrap_or(MUTED_COLOR),
                    border: self.border_color.get(index).copied().unwrap_or(MUTED_COLOR),
                }
            })
            .collect())
    }
}

/// Data-label text: the raw number, without a trailing `.0`.
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}
