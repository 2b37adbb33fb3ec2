pub mod csv;
pub mod dataset;
pub mod split;

pub use csv::{load_csv, parse_csv, LabelMode};
pub use dataset::Dataset;
pub use split::{train_test_split, Split};
