//! Descriptive labels with fallback chains.

use vaxholm_data::Fundamentals;

/// Label used when neither sector nor industry is known.
pub const UNKNOWN_SECTOR: &str = "Unknown";

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

/// Sector, falling back to industry, then [`UNKNOWN_SECTOR`].
pub fn sector(fundamentals: &Fundamentals) -> String {
    non_empty(fundamentals.sector.as_ref())
        .or_else(|| non_empty(fundamentals.industry.as_ref()))
        .unwrap_or(UNKNOWN_SECTOR)
        .to_string()
}

/// Short name, falling back to the long name, then the raw ticker.
pub fn display_name(fundamentals: &Fundamentals, ticker: &str) -> String {
    non_empty(fundamentals.short_name.as_ref())
        .or_else(|| non_empty(fundamentals.long_name.as_ref()))
        .unwrap_or(ticker)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_fallbacks() {
        let mut data = Fundamentals::empty("X.ST");
        assert_eq!(sector(&data), "Unknown");

        data.industry = Some("Banks".to_string());
        assert_eq!(sector(&data), "Banks");

        data.sector = Some("Financial Services".to_string());
        assert_eq!(sector(&data), "Financial Services");

        data.sector = Some("  ".to_string());
        assert_eq!(sector(&data), "Banks");
    }

    #[test]
    fn test_name_fallbacks() {
        let mut data = Fundamentals::empty("INVE-B.ST");
        assert_eq!(display_name(&data, "INVE-B.ST"), "INVE-B.ST");

        data.long_name = Some("Investor AB (publ)".to_string());
        assert_eq!(display_name(&data, "INVE-B.ST"), "Investor AB (publ)");

        data.short_name = Some("Investor AB ser. B".to_string());
        assert_eq!(display_name(&data, "INVE-B.ST"), "Investor AB ser. B");
    }
}
