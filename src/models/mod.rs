//! Core data models for grantplan
//!
//! Input models (budget specification, grant metadata) and derived outputs
//! (category totals, budget summary) used across the toolkit.

pub mod budget;
pub mod grant;
pub mod money;
pub mod totals;
pub mod years;

pub use budget::{
    BudgetSpecification, FringeSpec, IndirectSpec, LineItem, PersonnelItem, PersonnelSpec,
    RecordedSummary, RecordedYearTotals, TravelSpec,
};
pub use grant::{CapConstraint, GrantMetadata, ResearchGovInfo};
pub use money::Dollars;
pub use totals::{BudgetSummary, CategoryTotals};
pub use years::YearAmounts;
