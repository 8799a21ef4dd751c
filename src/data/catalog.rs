//! Example Dataset Catalog
//! Names, required columns and categorical level orders of the bundled datasets.

use std::fmt;

/// Canonical clarity ranking, lowest grade first.
pub const CLARITY_RANKING: [&str; 8] = ["I1", "SI2", "SI1", "VS2", "VS1", "VVS2", "VVS1", "IF"];

/// One of the bundled example datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetName {
    Diamonds,
    Fmri,
    Tips,
}

impl DatasetName {
    pub const ALL: [DatasetName; 3] = [DatasetName::Diamonds, DatasetName::Fmri, DatasetName::Tips];

    /// Exact fetch key as used by the example-data repository.
    pub fn key(self) -> &'static str {
        match self {
            DatasetName::Diamonds => "diamonds",
            DatasetName::Fmri => "fmri",
            DatasetName::Tips => "tips",
        }
    }

    /// Columns every plot branch relies on.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            DatasetName::Diamonds => &["cut", "price", "carat", "clarity", "depth"],
            DatasetName::Fmri => &["timepoint", "signal", "region", "event"],
            DatasetName::Tips => &["day", "total_bill", "smoker"],
        }
    }

    /// Categorical columns and their level order, as applied on load.
    pub fn categories(self) -> &'static [(&'static str, &'static [&'static str])] {
        match self {
            DatasetName::Diamonds => &[
                ("cut", &["Ideal", "Premium", "Very Good", "Good", "Fair"]),
                ("color", &["D", "E", "F", "G", "H", "I", "J"]),
                (
                    "clarity",
                    &["IF", "VVS1", "VVS2", "VS1", "VS2", "SI1", "SI2", "I1"],
                ),
            ],
            DatasetName::Fmri => &[],
            DatasetName::Tips => &[
                ("sex", &["Male", "Female"]),
                ("smoker", &["Yes", "No"]),
                ("day", &["Thur", "Fri", "Sat", "Sun"]),
                ("time", &["Lunch", "Dinner"]),
            ],
        }
    }

    /// Level order of a categorical column, if the column is categorical.
    pub fn category_levels(self, column: &str) -> Option<&'static [&'static str]> {
        self.categories()
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, levels)| *levels)
    }

    /// File name inside a dataset directory.
    pub fn file_name(self) -> String {
        format!("{}.csv", self.key())
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
