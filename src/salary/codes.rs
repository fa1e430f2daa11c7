//! Static occupation and metro area lookup tables
//!
//! Read-only reference data mapping human-readable aliases to BLS codes.
//! Unrecognized strings pass through unchanged on the assumption they are
//! already valid codes.

/// Common academic/research occupation aliases to SOC occupation codes
pub const ACADEMIC_OCCUPATION_CODES: &[(&str, &str)] = &[
    // Computer and mathematical occupations
    ("computer_scientist", "15-1221"),
    ("software_developer", "15-1252"),
    ("data_scientist", "15-2051"),
    ("statistician", "15-2041"),
    ("mathematician", "15-2021"),
    // Life, physical, and social science occupations
    ("economist", "19-3011"),
    ("political_scientist", "19-3094"),
    ("sociologist", "19-3041"),
    ("environmental_scientist", "19-2041"),
    ("chemist", "19-2031"),
    ("physicist", "19-2012"),
    ("biologist", "19-1029"),
    // Engineering
    ("engineer", "17-2199"),
    ("electrical_engineer", "17-2071"),
    ("mechanical_engineer", "17-2141"),
    ("civil_engineer", "17-2051"),
    // Education and training
    ("postsecondary_teacher", "25-1000"),
    ("cs_professor", "25-1021"),
    ("engineering_professor", "25-1032"),
    ("math_professor", "25-1022"),
    ("economics_professor", "25-1063"),
    // Research positions
    ("research_assistant", "19-4099"),
    ("postdoc", "19-1099"),
];

/// Metro area aliases to BLS area codes
pub const METRO_AREA_CODES: &[(&str, &str)] = &[
    // California
    ("san_francisco", "41860"),
    ("los_angeles", "31080"),
    ("san_diego", "41740"),
    ("san_jose", "41940"),
    // Northeast
    ("new_york", "35620"),
    ("boston", "14460"),
    ("philadelphia", "37980"),
    ("washington_dc", "47900"),
    // Midwest
    ("chicago", "16980"),
    ("detroit", "19820"),
    ("minneapolis", "33460"),
    // South
    ("atlanta", "12060"),
    ("dallas", "19100"),
    ("houston", "26420"),
    ("austin", "12420"),
    ("miami", "33100"),
    // West
    ("seattle", "42660"),
    ("denver", "19740"),
    ("phoenix", "38060"),
    ("portland", "38900"),
    // National
    ("national", "0000000"),
];

/// Resolve an occupation alias to its SOC code; codes pass through unchanged
pub fn resolve_occupation_code(occupation: &str) -> String {
    ACADEMIC_OCCUPATION_CODES
        .iter()
        .find(|(alias, _)| *alias == occupation)
        .map(|(_, code)| (*code).to_string())
        .unwrap_or_else(|| occupation.to_string())
}

/// Resolve a metro alias to its BLS area code, zero-padded to 7 digits
pub fn resolve_area_code(area: &str) -> String {
    let code = METRO_AREA_CODES
        .iter()
        .find(|(alias, _)| *alias == area)
        .map(|(_, code)| *code)
        .unwrap_or(area);
    format!("{:0>7}", code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupation_aliases() {
        assert_eq!(resolve_occupation_code("software_developer"), "15-1252");
        assert_eq!(resolve_occupation_code("cs_professor"), "25-1021");
        assert_eq!(resolve_occupation_code("economist"), "19-3011");
        assert_eq!(resolve_occupation_code("postdoc"), "19-1099");
    }

    #[test]
    fn test_unknown_occupation_passes_through() {
        assert_eq!(resolve_occupation_code("15-1252"), "15-1252");
        assert_eq!(resolve_occupation_code("99-9999"), "99-9999");
    }

    #[test]
    fn test_area_aliases_padded() {
        assert_eq!(resolve_area_code("national"), "0000000");
        assert_eq!(resolve_area_code("san_francisco"), "0041860");
        assert_eq!(resolve_area_code("boston"), "0014460");
    }

    #[test]
    fn test_raw_area_code_padded() {
        assert_eq!(resolve_area_code("41860"), "0041860");
        assert_eq!(resolve_area_code("0000000"), "0000000");
    }
}
