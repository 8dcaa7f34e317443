//! Data module - Static financial dataset

mod financials;

pub use financials::{FinancialRecord, Financials, MetricKey, ParseMetricError, FINANCIALS};
