//! Market salary validation
//!
//! OEWS wage statistics client, percentile estimation, and threshold-based
//! salary classification for budget personnel.

pub mod codes;
pub mod oews;
pub mod validator;

pub use codes::{resolve_area_code, resolve_occupation_code};
pub use oews::{estimate_percentile, OewsClient, WageData, WageDataProvider};
pub use validator::{SalaryValidationResult, SalaryValidator};
