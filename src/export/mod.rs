//! Budget summary export in machine-readable formats

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_summary_csv;
pub use self::json::export_summary_json;
pub use self::yaml::export_summary_yaml;
