//! FinChart - Financial metrics bar chart
//!
//! Five fiscal years of figures, one metric at a time, exportable as PNG or JPEG.

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
