//! Budget calculation from a budget specification
//!
//! Turns a `BudgetSpecification` into per-category rollups, an MTDC-based
//! indirect cost calculation, and a grand total, with cap validation and an
//! internal consistency check.
//!
//! Dollar amounts are truncated toward zero at each rollup stage; per-year
//! values are stored truncated while category totals accumulate the raw sums
//! and truncate once at the end.

use std::path::Path;

use crate::error::{GrantError, GrantResult};
use crate::models::{
    BudgetSpecification, BudgetSummary, CapConstraint, CategoryTotals, Dollars, LineItem,
    PersonnelItem,
};

/// Calculates budget totals from a budget specification
pub struct BudgetCalculator {
    spec: BudgetSpecification,
}

impl BudgetCalculator {
    /// Create a calculator over an already-loaded specification
    pub fn new(spec: BudgetSpecification) -> Self {
        Self { spec }
    }

    /// Load a budget.yaml file and create a calculator for it
    pub fn from_path(path: impl AsRef<Path>) -> GrantResult<Self> {
        Ok(Self::new(BudgetSpecification::from_path(path)?))
    }

    /// The underlying specification
    pub fn spec(&self) -> &BudgetSpecification {
        &self.spec
    }

    /// Number of budget years
    pub fn years(&self) -> usize {
        self.spec.years_in_budget
    }

    /// Senior personnel totals per year
    pub fn senior_personnel(&self) -> CategoryTotals {
        self.rollup_personnel(&self.spec.personnel.senior)
    }

    /// Other personnel totals per year
    pub fn other_personnel(&self) -> CategoryTotals {
        self.rollup_personnel(&self.spec.personnel.other)
    }

    /// Fringe benefit totals per year
    ///
    /// Precedence is per-year independent: an explicit `year_N` override wins;
    /// otherwise the configured rate is applied to that year's total salaries;
    /// otherwise zero.
    pub fn fringe_benefits(&self) -> CategoryTotals {
        let senior = self.senior_personnel();
        let other = self.other_personnel();
        let fringe = &self.spec.fringe_benefits;
        let rate = fringe.rate.unwrap_or(0.0);

        let mut years = Vec::with_capacity(self.years());
        let mut raw_total = 0.0;

        for year in 1..=self.years() {
            let amount = match fringe.years.get(year) {
                Some(explicit) => explicit,
                None if rate > 0.0 => {
                    let salaries = senior.year(year) + other.year(year);
                    Dollars::truncate(rate * salaries.as_f64()).as_f64()
                }
                None => 0.0,
            };
            years.push(Dollars::truncate(amount));
            raw_total += amount;
        }

        CategoryTotals::with_rate(years, Dollars::truncate(raw_total), rate)
    }

    /// Equipment totals per year
    pub fn equipment(&self) -> CategoryTotals {
        self.rollup_items(&self.spec.equipment)
    }

    /// Travel totals per year (domestic + foreign combined)
    pub fn travel(&self) -> CategoryTotals {
        let mut years = Vec::with_capacity(self.years());
        let mut raw_total = 0.0;

        for year in 1..=self.years() {
            let year_total: f64 = self
                .spec
                .travel
                .domestic
                .iter()
                .chain(self.spec.travel.foreign.iter())
                .map(|item| item.amount_for_year(year))
                .sum();
            years.push(Dollars::truncate(year_total));
            raw_total += year_total;
        }

        CategoryTotals::new(years, Dollars::truncate(raw_total))
    }

    /// Participant support totals per year
    pub fn participant_support(&self) -> CategoryTotals {
        self.rollup_items(&self.spec.participant_support)
    }

    /// Other direct cost totals per year
    pub fn other_direct_costs(&self) -> CategoryTotals {
        self.rollup_items(&self.spec.other_direct_costs)
    }

    /// Total direct costs: every direct category summed per year
    pub fn total_direct_costs(&self) -> CategoryTotals {
        let categories = [
            self.senior_personnel(),
            self.other_personnel(),
            self.fringe_benefits(),
            self.equipment(),
            self.travel(),
            self.participant_support(),
            self.other_direct_costs(),
        ];

        let mut years = Vec::with_capacity(self.years());
        let mut total = Dollars::zero();

        for year in 1..=self.years() {
            let year_total: Dollars = categories.iter().map(|c| c.year(year)).sum();
            years.push(year_total);
            total += year_total;
        }

        CategoryTotals::new(years, total)
    }

    /// Indirect cost totals based on the MTDC base
    ///
    /// MTDC = total direct costs minus equipment and participant support.
    /// The exclusion is fixed funder policy, not configurable.
    pub fn indirect_costs(&self) -> CategoryTotals {
        let rate = self.spec.indirect_costs.rate;
        let direct = self.total_direct_costs();
        let equipment = self.equipment();
        let participant = self.participant_support();

        let mut years = Vec::with_capacity(self.years());
        let mut total = Dollars::zero();

        for year in 1..=self.years() {
            let mtdc = direct.year(year) - equipment.year(year) - participant.year(year);
            let indirect = Dollars::truncate(mtdc.as_f64() * rate);
            years.push(indirect);
            total += indirect;
        }

        CategoryTotals::with_rate(years, total, rate)
    }

    /// Grand total: total direct costs plus indirect costs
    pub fn grand_total(&self) -> Dollars {
        self.total_direct_costs().total() + self.indirect_costs().total()
    }

    /// Complete budget summary across all categories
    pub fn summary(&self) -> BudgetSummary {
        BudgetSummary {
            senior_personnel: self.senior_personnel(),
            other_personnel: self.other_personnel(),
            fringe_benefits: self.fringe_benefits(),
            equipment: self.equipment(),
            travel: self.travel(),
            participant_support: self.participant_support(),
            other_direct_costs: self.other_direct_costs(),
            total_direct_costs: self.total_direct_costs(),
            indirect_costs: self.indirect_costs(),
            grand_total: self.grand_total(),
        }
    }

    /// Check the specification for internal inconsistencies
    ///
    /// Returns warnings, never errors: stale hand-edited fringe numbers after
    /// a rate or salary change, recorded indirect totals that no longer match
    /// the MTDC recalculation, and an unsupported indirect cost base.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.spec.indirect_costs.base.eq_ignore_ascii_case("mtdc") {
            warnings.push(format!(
                "Indirect cost base '{}' is not supported; MTDC is applied",
                self.spec.indirect_costs.base
            ));
        }

        // Explicit fringe overrides checked against the rate calculation
        let fringe = &self.spec.fringe_benefits;
        if let Some(rate) = fringe.rate.filter(|r| *r > 0.0) {
            let senior = self.senior_personnel();
            let other = self.other_personnel();

            for (year, explicit) in fringe.years.iter() {
                if year > self.years() {
                    continue;
                }
                let salaries = senior.year(year) + other.year(year);
                let expected = Dollars::truncate(rate * salaries.as_f64());
                let actual = Dollars::truncate(explicit);

                if expected.abs_diff(actual) > 1 {
                    warnings.push(format!(
                        "Fringe mismatch year_{}: expected {} (rate {} * {}), got {}",
                        year, expected, rate, salaries, actual
                    ));
                }
            }
        }

        // Recorded indirect totals checked against the MTDC recalculation
        if self.spec.indirect_costs.rate > 0.0 && !self.spec.summary.is_empty() {
            let calculated = self.indirect_costs();

            for year in 1..=self.years() {
                let recorded = self
                    .spec
                    .summary
                    .year(year)
                    .and_then(|totals| totals.indirect);

                if let Some(recorded) = recorded {
                    let expected = calculated.year(year);
                    let actual = Dollars::truncate(recorded);

                    if expected.abs_diff(actual) > 1 {
                        warnings.push(format!(
                            "Indirect mismatch year_{}: expected {}, got {}",
                            year, expected, actual
                        ));
                    }
                }
            }
        }

        warnings
    }

    /// Check computed totals against declared caps
    ///
    /// Collects every violation rather than stopping at the first: one
    /// message when the grand total exceeds the overall cap, and one per year
    /// whose direct+indirect sum exceeds the annual cap. An empty result
    /// means the budget fits.
    pub fn validate_against_caps(&self, caps: &CapConstraint) -> Vec<String> {
        let mut violations = Vec::new();

        if caps.is_empty() {
            return violations;
        }

        let grand_total = self.grand_total();

        if let Some(cap) = caps.budget_cap {
            if grand_total.as_f64() > cap {
                violations.push(format!(
                    "Grand total {} exceeds total cap {}",
                    grand_total,
                    Dollars::truncate(cap)
                ));
            }
        }

        if let Some(cap) = caps.annual_budget_cap {
            let direct = self.total_direct_costs();
            let indirect = self.indirect_costs();

            for year in 1..=self.years() {
                let year_total = direct.year(year) + indirect.year(year);
                if year_total.as_f64() > cap {
                    violations.push(format!(
                        "Year {} total {} exceeds annual cap {}",
                        year,
                        year_total,
                        Dollars::truncate(cap)
                    ));
                }
            }
        }

        violations
    }
}

/// Raising variant of cap validation
///
/// Loads both files, validates, and returns `GrantError::CapExceeded`
/// aggregating every violation when any cap is exceeded. Callers that only
/// want detection use [`BudgetCalculator::validate_against_caps`].
pub fn check_budget_caps(
    budget_path: impl AsRef<Path>,
    grant_path: impl AsRef<Path>,
) -> GrantResult<()> {
    let calc = BudgetCalculator::from_path(budget_path)?;
    let caps = CapConstraint::from_path(grant_path)?;

    let violations = calc.validate_against_caps(&caps);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(GrantError::CapExceeded { violations })
    }
}

impl BudgetCalculator {
    /// Uniform rollup: per year, each item contributes its explicit `year_N`
    /// value, else its `funds_per_year` default, else zero
    fn rollup_items(&self, items: &[LineItem]) -> CategoryTotals {
        let mut years = Vec::with_capacity(self.years());
        let mut raw_total = 0.0;

        for year in 1..=self.years() {
            let year_total: f64 = items.iter().map(|item| item.amount_for_year(year)).sum();
            years.push(Dollars::truncate(year_total));
            raw_total += year_total;
        }

        CategoryTotals::new(years, Dollars::truncate(raw_total))
    }

    /// Personnel rollup: explicit `year_N` amounts only, no per-year default
    fn rollup_personnel(&self, items: &[PersonnelItem]) -> CategoryTotals {
        let mut years = Vec::with_capacity(self.years());
        let mut raw_total = 0.0;

        for year in 1..=self.years() {
            let year_total: f64 = items
                .iter()
                .map(|person| person.years.get(year).unwrap_or(0.0))
                .sum();
            years.push(Dollars::truncate(year_total));
            raw_total += year_total;
        }

        CategoryTotals::new(years, Dollars::truncate(raw_total))
    }
}
