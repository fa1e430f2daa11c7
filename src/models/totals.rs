//! Derived budget totals
//!
//! `CategoryTotals` and `BudgetSummary` are recomputed from the budget
//! specification on every access and never persisted as authoritative data.
//! They serialize in the funder-familiar `year_1..year_N` + `total` shape.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::money::Dollars;

/// Per-year totals for one budget category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotals {
    /// One amount per budget year, index 0 = year 1
    years: Vec<Dollars>,

    /// Cross-year total
    total: Dollars,

    /// The rate used, for rate-derived categories (fringe, indirect)
    rate: Option<f64>,
}

impl CategoryTotals {
    /// Build from per-year amounts and a separately accumulated total
    pub fn new(years: Vec<Dollars>, total: Dollars) -> Self {
        Self {
            years,
            total,
            rate: None,
        }
    }

    /// Build with the rate that produced these amounts
    pub fn with_rate(years: Vec<Dollars>, total: Dollars, rate: f64) -> Self {
        Self {
            years,
            total,
            rate: Some(rate),
        }
    }

    /// Amount for a 1-based year; zero for years outside the budget period
    pub fn year(&self, year: usize) -> Dollars {
        year.checked_sub(1)
            .and_then(|i| self.years.get(i))
            .copied()
            .unwrap_or_default()
    }

    /// Cross-year total
    pub fn total(&self) -> Dollars {
        self.total
    }

    /// Rate used to derive these amounts, if any
    pub fn rate(&self) -> Option<f64> {
        self.rate
    }

    /// Number of budget years covered
    pub fn year_count(&self) -> usize {
        self.years.len()
    }

    /// Iterate amounts in year order
    pub fn iter_years(&self) -> impl Iterator<Item = (usize, Dollars)> + '_ {
        self.years.iter().enumerate().map(|(i, d)| (i + 1, *d))
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = if self.rate.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(self.years.len() + extra))?;
        if let Some(rate) = self.rate {
            map.serialize_entry("rate", &rate)?;
        }
        for (year, amount) in self.iter_years() {
            map.serialize_entry(&format!("year_{}", year), &amount)?;
        }
        map.serialize_entry("total", &self.total)?;
        map.end()
    }
}

/// Complete derived budget: every category plus direct, indirect, and grand total
#[derive(Debug, Clone, Serialize)]
pub struct BudgetSummary {
    pub senior_personnel: CategoryTotals,
    pub other_personnel: CategoryTotals,
    pub fringe_benefits: CategoryTotals,
    pub equipment: CategoryTotals,
    pub travel: CategoryTotals,
    pub participant_support: CategoryTotals,
    pub other_direct_costs: CategoryTotals,
    pub total_direct_costs: CategoryTotals,
    pub indirect_costs: CategoryTotals,
    pub grand_total: Dollars,
}

impl BudgetSummary {
    /// Direct + indirect for a single year
    pub fn year_total(&self, year: usize) -> Dollars {
        self.total_direct_costs.year(year) + self.indirect_costs.year(year)
    }

    /// Number of budget years
    pub fn year_count(&self) -> usize {
        self.total_direct_costs.year_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(amounts: &[i64]) -> CategoryTotals {
        let years: Vec<Dollars> = amounts.iter().map(|a| Dollars::new(*a)).collect();
        let total = years.iter().copied().sum();
        CategoryTotals::new(years, total)
    }

    #[test]
    fn test_year_indexing() {
        let t = totals(&[100, 200, 300]);
        assert_eq!(t.year(1).amount(), 100);
        assert_eq!(t.year(3).amount(), 300);
        assert_eq!(t.year(4).amount(), 0);
        assert_eq!(t.year(0).amount(), 0);
        assert_eq!(t.total().amount(), 600);
    }

    #[test]
    fn test_serializes_year_keys() {
        let t = CategoryTotals::with_rate(
            vec![Dollars::new(20250), Dollars::new(12375)],
            Dollars::new(32625),
            0.30,
        );
        let json = serde_json::to_value(&t).unwrap();

        assert_eq!(json["year_1"], 20250);
        assert_eq!(json["year_2"], 12375);
        assert_eq!(json["total"], 32625);
        assert_eq!(json["rate"], 0.30);
    }

    #[test]
    fn test_no_rate_key_when_absent() {
        let json = serde_json::to_value(totals(&[100])).unwrap();
        assert!(json.get("rate").is_none());
    }
}
