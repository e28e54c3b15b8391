//! # Region Name Resolution
//!
//! Resolves an ISO 3166-1 alpha-2 country code to a human-readable display
//! name. Resolution is a collaborator concern — a deployment may plug in a
//! locale-aware resolver — so the seam is a trait. [`StaticRegionNames`] is
//! the bundled English-language table covering the countries that issue the
//! certificates this stack evaluates.

/// Resolves country codes to display names.
pub trait RegionNameResolver: Send + Sync {
    /// The display name for `country_code`, or `None` if unknown.
    fn display_name(&self, country_code: &str) -> Option<String>;

    /// The display name, falling back to the uppercased code itself so a
    /// certificate from an unknown country still renders something.
    fn display_name_or_code(&self, country_code: &str) -> String {
        self.display_name(country_code)
            .unwrap_or_else(|| country_code.trim().to_ascii_uppercase())
    }
}

/// Bundled English display names for certificate-issuing countries.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRegionNames;

impl RegionNameResolver for StaticRegionNames {
    fn display_name(&self, country_code: &str) -> Option<String> {
        let name = match country_code.trim().to_ascii_uppercase().as_str() {
            "AT" => "Austria",
            "BE" => "Belgium",
            "BG" => "Bulgaria",
            "CH" => "Switzerland",
            "CY" => "Cyprus",
            "CZ" => "Czechia",
            "DE" => "Germany",
            "DK" => "Denmark",
            "EE" => "Estonia",
            "ES" => "Spain",
            "FI" => "Finland",
            "FR" => "France",
            "GB" => "United Kingdom",
            "GR" => "Greece",
            "HR" => "Croatia",
            "HU" => "Hungary",
            "IE" => "Ireland",
            "IS" => "Iceland",
            "IT" => "Italy",
            "LI" => "Liechtenstein",
            "LT" => "Lithuania",
            "LU" => "Luxembourg",
            "LV" => "Latvia",
            "MT" => "Malta",
            "NL" => "Netherlands",
            "NO" => "Norway",
            "PL" => "Poland",
            "PT" => "Portugal",
            "RO" => "Romania",
            "SE" => "Sweden",
            "SI" => "Slovenia",
            "SK" => "Slovakia",
            _ => return None,
        };
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_codes() {
        let r = StaticRegionNames;
        assert_eq!(r.display_name("CH").as_deref(), Some("Switzerland"));
        assert_eq!(r.display_name("at").as_deref(), Some("Austria"));
    }

    #[test]
    fn unknown_code_falls_back_to_code() {
        let r = StaticRegionNames;
        assert_eq!(r.display_name("ZZ"), None);
        assert_eq!(r.display_name_or_code("zz"), "ZZ");
    }
}
