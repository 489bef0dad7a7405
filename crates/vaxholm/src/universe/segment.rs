//! Nasdaq Nordic market-cap segments.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Market-cap segment of a Stockholm listing.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarketSegment {
    /// Large Cap, market value above 1B EUR
    #[display("Large Cap")]
    #[serde(rename = "large")]
    LargeCap,

    /// Mid Cap, 150M to 1B EUR
    #[display("Mid Cap")]
    #[serde(rename = "mid")]
    MidCap,

    /// Small Cap, below 150M EUR
    #[display("Small Cap")]
    #[serde(rename = "small")]
    SmallCap,
}

/// Unknown segment name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown market segment '{0}', expected one of: large, mid, small")]
pub struct ParseSegmentError(String);

impl MarketSegment {
    /// Returns all segments, largest first.
    pub const fn all() -> [Self; 3] {
        [Self::LargeCap, Self::MidCap, Self::SmallCap]
    }

    /// Short name used on the command line.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::LargeCap => "large",
            Self::MidCap => "mid",
            Self::SmallCap => "small",
        }
    }
}

impl FromStr for MarketSegment {
    type Err = ParseSegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "large" | "largecap" => Ok(Self::LargeCap),
            "mid" | "midcap" => Ok(Self::MidCap),
            "small" | "smallcap" => Ok(Self::SmallCap),
            _ => Err(ParseSegmentError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_display() {
        assert_eq!(MarketSegment::LargeCap.to_string(), "Large Cap");
        assert_eq!(MarketSegment::SmallCap.to_string(), "Small Cap");
    }

    #[rstest]
    #[case("large", MarketSegment::LargeCap)]
    #[case("Mid", MarketSegment::MidCap)]
    #[case("small-cap", MarketSegment::SmallCap)]
    #[case(" Large Cap ", MarketSegment::LargeCap)]
    fn test_parse(#[case] input: &str, #[case] expected: MarketSegment) {
        assert_eq!(input.parse::<MarketSegment>(), Ok(expected));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "micro".parse::<MarketSegment>().unwrap_err();
        assert!(err.to_string().contains("micro"));
    }

    #[test]
    fn test_key_round_trip() {
        for segment in MarketSegment::all() {
            assert_eq!(segment.key().parse::<MarketSegment>(), Ok(segment));
        }
    }

    #[test]
    fn test_serde_uses_keys() {
        let json = serde_json::to_string(&MarketSegment::MidCap).unwrap();
        assert_eq!(json, "\"mid\"");
    }
}
