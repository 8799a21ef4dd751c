//! Seaview - interactive statistical plot dashboard
//!
//! Pick one of four canned plot types over the bundled example datasets
//! and view the resulting charts.

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gallery;
pub mod gui;
pub mod stats;
