//! Sparse per-year dollar amounts
//!
//! Budget records carry amounts keyed `year_1`, `year_2`, ... with most
//! records specifying only some years. `YearAmounts` collects those keys into
//! a typed map so rollup code indexes by year number instead of formatting
//! string keys. It deserializes from the flattened remainder of a record,
//! silently skipping keys that are not of the form `year_N`.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sparse mapping from 1-based year number to a dollar amount
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearAmounts(BTreeMap<usize, f64>);

impl YearAmounts {
    /// Create an empty map
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Get the amount for a year, if explicitly specified
    pub fn get(&self, year: usize) -> Option<f64> {
        self.0.get(&year).copied()
    }

    /// Set the amount for a year
    pub fn set(&mut self, year: usize, amount: f64) {
        self.0.insert(year, amount);
    }

    /// Check whether any year is specified
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (year, amount) pairs in year order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().map(|(y, a)| (*y, *a))
    }
}

impl Serialize for YearAmounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (year, amount) in &self.0 {
            let key = format!("year_{}", year);
            // Whole-dollar values round-trip as integers
            if amount.fract() == 0.0 && amount.abs() < i64::MAX as f64 {
                map.serialize_entry(&key, &(*amount as i64))?;
            } else {
                map.serialize_entry(&key, amount)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for YearAmounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct YearVisitor;

        impl<'de> Visitor<'de> for YearVisitor {
            type Value = YearAmounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map with year_N keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut amounts = BTreeMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    match parse_year_key(&key) {
                        Some(year) => {
                            let amount: f64 = map.next_value()?;
                            amounts.insert(year, amount);
                        }
                        None => {
                            // Not a year_N key; discard the value
                            let _: IgnoredAny = map.next_value()?;
                        }
                    }
                }
                Ok(YearAmounts(amounts))
            }
        }

        deserializer.deserialize_map(YearVisitor)
    }
}

/// Parse a `year_N` key into its 1-based year number
fn parse_year_key(key: &str) -> Option<usize> {
    let suffix = key.strip_prefix("year_")?;
    match suffix.parse::<usize>() {
        Ok(year) if year >= 1 => Some(year),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Record {
        name: String,
        #[serde(default)]
        funds_per_year: Option<f64>,
        #[serde(flatten)]
        years: YearAmounts,
    }

    #[test]
    fn test_parse_year_key() {
        assert_eq!(parse_year_key("year_1"), Some(1));
        assert_eq!(parse_year_key("year_10"), Some(10));
        assert_eq!(parse_year_key("year_0"), None);
        assert_eq!(parse_year_key("year_x"), None);
        assert_eq!(parse_year_key("base_salary"), None);
    }

    #[test]
    fn test_deserialize_from_flattened_record() {
        let yaml = "name: PI\nrole: lead\nbase_salary: 180000\nyear_1: 30000\nyear_3: 15000\n";
        let record: Record = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(record.name, "PI");
        assert_eq!(record.funds_per_year, None);
        assert_eq!(record.years.get(1), Some(30000.0));
        assert_eq!(record.years.get(2), None);
        assert_eq!(record.years.get(3), Some(15000.0));
    }

    #[test]
    fn test_deserialize_with_funds_per_year() {
        let yaml = "name: Conference travel\nfunds_per_year: 2000\n";
        let record: Record = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(record.funds_per_year, Some(2000.0));
        assert!(record.years.is_empty());
    }

    #[test]
    fn test_serialize_whole_dollars_as_integers() {
        let mut years = YearAmounts::new();
        years.set(1, 30000.0);
        years.set(2, 22500.0);

        let yaml = serde_yaml::to_string(&years).unwrap();
        assert!(yaml.contains("year_1: 30000"));
        assert!(yaml.contains("year_2: 22500"));
        assert!(!yaml.contains("30000.0"));
    }

    #[test]
    fn test_iter_in_year_order() {
        let mut years = YearAmounts::new();
        years.set(3, 3.0);
        years.set(1, 1.0);
        years.set(2, 2.0);

        let collected: Vec<_> = years.iter().collect();
        assert_eq!(collected, vec![(1, 1.0), (2, 2.0), (3, 3.0)]);
    }
}
