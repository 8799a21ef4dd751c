#![allow(dead_code)]

//! Shared fixtures: small in-memory stand-ins for the example datasets.

use polars::prelude::*;
use seaview::data::{DatasetName, DatasetSource, LoaderError};
use std::cell::Cell;
use std::collections::HashMap;
use std::path::PathBuf;

pub const CUTS: [&str; 5] = ["Ideal", "Premium", "Very Good", "Good", "Fair"];
pub const CLARITIES: [&str; 8] = ["IF", "VVS1", "VVS2", "VS1", "VS2", "SI1", "SI2", "I1"];
pub const DIAMOND_ROWS: usize = 16;

/// In-memory dataset source that counts fetches.
#[derive(Default)]
pub struct FrameSource {
    frames: HashMap<DatasetName, DataFrame>,
    fetches: Cell<usize>,
}

impl FrameSource {
    pub fn with_all() -> Self {
        let mut source = Self::default();
        source.frames.insert(DatasetName::Diamonds, diamonds());
        source.frames.insert(DatasetName::Fmri, fmri());
        source.frames.insert(DatasetName::Tips, tips());
        source
    }

    pub fn fetches(&self) -> usize {
        self.fetches.get()
    }
}

impl DatasetSource for FrameSource {
    fn fetch(&self, name: DatasetName) -> Result<DataFrame, LoaderError> {
        self.fetches.set(self.fetches.get() + 1);
        self.frames
            .get(&name)
            .cloned()
            .ok_or_else(|| LoaderError::NotFound {
                name,
                path: PathBuf::from(name.file_name()),
            })
    }
}

pub fn diamonds() -> DataFrame {
    let n = DIAMOND_ROWS;
    let cut: Vec<&str> = (0..n).map(|i| CUTS[i % CUTS.len()]).collect();
    let clarity: Vec<&str> = (0..n).map(|i| CLARITIES[i % CLARITIES.len()]).collect();
    let color: Vec<&str> = (0..n).map(|i| ["D", "E", "F"][i % 3]).collect();
    let carat: Vec<f64> = (0..n).map(|i| 0.2 + 0.1 * i as f64).collect();
    let depth: Vec<f64> = (0..n).map(|i| 58.0 + i as f64).collect();
    let price: Vec<i64> = (0..n).map(|i| 300 * (i as i64 + 1)).collect();

    DataFrame::new(vec![
        Column::new("carat".into(), carat),
        Column::new("cut".into(), cut),
        Column::new("color".into(), color),
        Column::new("clarity".into(), clarity),
        Column::new("depth".into(), depth),
        Column::new("price".into(), price),
    ])
    .unwrap()
}

pub fn fmri() -> DataFrame {
    let mut subject = Vec::new();
    let mut timepoint = Vec::new();
    let mut event = Vec::new();
    let mut region = Vec::new();
    let mut signal = Vec::new();

    for s in 0..3 {
        for t in 0..4 {
            for (e, ev) in ["stim", "cue"].iter().enumerate() {
                for (r, reg) in ["parietal", "frontal"].iter().enumerate() {
                    subject.push(format!("s{s}"));
                    timepoint.push(t as i64);
                    event.push(*ev);
                    region.push(*reg);
                    signal.push(0.01 * (t as f64) + 0.05 * e as f64 - 0.02 * r as f64 + 0.003 * s as f64);
                }
            }
        }
    }

    DataFrame::new(vec![
        Column::new("subject".into(), subject),
        Column::new("timepoint".into(), timepoint),
        Column::new("event".into(), event),
        Column::new("region".into(), region),
        Column::new("signal".into(), signal),
    ])
    .unwrap()
}

pub fn tips() -> DataFrame {
    let mut total_bill = Vec::new();
    let mut smoker = Vec::new();
    let mut day = Vec::new();

    // Listed out of calendar order on purpose.
    for (d, name) in ["Sun", "Sat", "Thur", "Fri"].iter().enumerate() {
        for (s, flag) in ["No", "Yes"].iter().enumerate() {
            for k in 0..3 {
                total_bill.push(10.0 + 5.0 * d as f64 + 2.0 * s as f64 + k as f64);
                smoker.push(*flag);
                day.push(*name);
            }
        }
    }

    DataFrame::new(vec![
        Column::new("total_bill".into(), total_bill),
        Column::new("smoker".into(), smoker),
        Column::new("day".into(), day),
    ])
    .unwrap()
}
