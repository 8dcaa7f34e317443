//! Financial Dataset Module
//! Five fiscal years of reported figures and the metric keys used to chart them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown metric key: {0}")]
pub struct ParseMetricError(pub String);

/// One of the six selectable financial fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKey {
    #[default]
    Sale,
    Profit,
    Patax,
    Eps,
    Dpshare,
    Capex,
}

impl MetricKey {
    /// All keys in tab order.
    pub const ALL: [MetricKey; 6] = [
        MetricKey::Sale,
        MetricKey::Profit,
        MetricKey::Patax,
        MetricKey::Eps,
        MetricKey::Dpshare,
        MetricKey::Capex,
    ];

    /// Wire name, as used in parsing paths.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKey::Sale => "sale",
            MetricKey::Profit => "profit",
            MetricKey::Patax => "patax",
            MetricKey::Eps => "eps",
            MetricKey::Dpshare => "dpshare",
            MetricKey::Capex => "capex",
        }
    }

    /// Tab button caption.
    pub fn label(self) -> &'static str {
        match self {
            MetricKey::Sale => "Sales",
            MetricKey::Profit => "Profit from operations",
            MetricKey::Patax => "Profit after tax",
            MetricKey::Eps => "Eps",
            MetricKey::Dpshare => "Dividend per Share",
            MetricKey::Capex => "Capex",
        }
    }

    /// Value-axis parsing path, e.g. `financials.eps`.
    pub fn axis_key(self) -> String {
        format!("{}.{}", FINANCIALS_PREFIX, self.as_str())
    }

    /// Inverse of [`MetricKey::axis_key`].
    pub fn from_axis_key(path: &str) -> Result<Self, ParseMetricError> {
        path.strip_prefix(FINANCIALS_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
            .ok_or_else(|| ParseMetricError(path.to_string()))?
            .parse()
            .map_err(|_| ParseMetricError(path.to_string()))
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseMetricError(s.to_string()))
    }
}

const FINANCIALS_PREFIX: &str = "financials";

/// Reported figures for a single fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Financials {
    pub sale: f64,
    pub profit: f64,
    pub patax: f64,
    pub eps: f64,
    pub dpshare: f64,
    pub capex: f64,
}

impl Financials {
    pub fn get(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::Sale => self.sale,
            MetricKey::Profit => self.profit,
            MetricKey::Patax => self.patax,
            MetricKey::Eps => self.eps,
            MetricKey::Dpshare => self.dpshare,
            MetricKey::Capex => self.capex,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialRecord {
    pub year: &'static str,
    pub financials: Financials,
}

impl FinancialRecord {
    const fn new(
        year: &'static str,
        sale: f64,
        profit: f64,
        patax: f64,
        eps: f64,
        dpshare: f64,
        capex: f64,
    ) -> Self {
        Self {
            year,
            financials: Financials {
                sale,
                profit,
                patax,
                eps,
                dpshare,
                capex,
            },
        }
    }

    pub fn value(&self, key: MetricKey) -> f64 {
        self.financials.get(key)
    }
}

/// The charted fiscal years, oldest first.
pub const FINANCIALS: [FinancialRecord; 5] = [
    FinancialRecord::new("FY 19-20", 122953.0, 25940.0, 19684.0, 204.2, 342.6, 1522.0),
    FinancialRecord::new("FY 20-21", 132902.0, 28775.0, 20824.0, 216.0, 200.0, 4741.0),
    FinancialRecord::new("FY 21-22", 146649.0, 32288.0, 21184.0, 219.7, 200.0, 7308.0),
    FinancialRecord::new("FY 22-23", 167895.0, 33659.0, 23905.0, 247.9, 220.0, 5407.0),
    FinancialRecord::new("FY 23-24", 191141.0, 37789.0, 25708.0, 263.5, 240.0, 6104.0),
];
