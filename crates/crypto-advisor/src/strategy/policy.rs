//! Risk Tier Policies
//!
//! Pure mappings from a risk level to the assets it admits. Both policies are
//! defined for levels 1-5 only; anything else is a configuration error.

use crate::error::{AdvisorError, Result};
use crate::model::Asset;

/// Market-cap-rank band: `min_rank < rank <= max_rank`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankBand {
    /// Exclusive lower bound (0 admits rank 1)
    pub min_rank: u32,

    /// Inclusive upper bound; `None` is unbounded
    pub max_rank: Option<u32>,
}

impl RankBand {
    pub fn for_level(level: u8) -> Result<Self> {
        let (min_rank, max_rank) = match level {
            1 => (0, Some(10)),
            2 => (10, Some(30)),
            3 => (30, Some(70)),
            4 => (70, Some(150)),
            5 => (150, None),
            other => return Err(AdvisorError::PolicyConfiguration(other)),
        };
        Ok(Self { min_rank, max_rank })
    }

    pub fn contains(&self, rank: u32) -> bool {
        rank > self.min_rank && self.max_rank.is_none_or(|max| rank <= max)
    }

    /// Unranked assets never match
    pub fn admits(&self, asset: &Asset) -> bool {
        asset.market_cap_rank.is_some_and(|rank| self.contains(rank))
    }
}

/// Rank ceiling plus minimum average news sentiment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SentimentFilter {
    /// Inclusive rank ceiling; `None` is unbounded
    pub max_rank: Option<u32>,

    /// Inclusive sentiment floor
    pub min_sentiment: f64,
}

impl SentimentFilter {
    pub fn for_level(level: u8) -> Result<Self> {
        let (max_rank, min_sentiment) = match level {
            1 => (Some(10), 0.5),
            2 => (Some(20), 0.3),
            3 => (Some(100), 0.0),
            4 => (None, -0.2),
            5 => (None, -0.5),
            other => return Err(AdvisorError::PolicyConfiguration(other)),
        };
        Ok(Self {
            max_rank,
            min_sentiment,
        })
    }

    /// With a ceiling, unranked assets fail; without one only sentiment counts
    pub fn admits(&self, asset: &Asset, sentiment: f64) -> bool {
        let within_ceiling = match (self.max_rank, asset.market_cap_rank) {
            (None, _) => true,
            (Some(max), Some(rank)) => rank <= max,
            (Some(_), None) => false,
        };
        within_ceiling && sentiment >= self.min_sentiment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_bands_partition_ranks() {
        let bands: Vec<RankBand> = (1..=5).map(|l| RankBand::for_level(l).unwrap()).collect();

        for rank in 1..=400 {
            let matching = bands.iter().filter(|b| b.contains(rank)).count();
            assert_eq!(matching, 1, "rank {rank} matched {matching} bands");
        }
    }

    #[test]
    fn test_band_edges() {
        let conservative = RankBand::for_level(1).unwrap();
        assert!(conservative.contains(10));
        assert!(!conservative.contains(11));

        let moderate = RankBand::for_level(3).unwrap();
        assert!(!moderate.contains(30));
        assert!(moderate.contains(31));
        assert!(moderate.contains(70));

        let aggressive = RankBand::for_level(5).unwrap();
        assert!(!aggressive.contains(150));
        assert!(aggressive.contains(151));
        assert!(aggressive.contains(10_000));
    }

    #[test]
    fn test_unranked_assets_match_no_band() {
        let unranked = Asset::new("Mystery");
        for level in 1..=5 {
            assert!(!RankBand::for_level(level).unwrap().admits(&unranked));
        }
    }

    #[test]
    fn test_policies_reject_out_of_range_levels() {
        for level in [0, 6, 255] {
            assert!(matches!(
                RankBand::for_level(level),
                Err(AdvisorError::PolicyConfiguration(l)) if l == level
            ));
            assert!(matches!(
                SentimentFilter::for_level(level),
                Err(AdvisorError::PolicyConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_sentiment_filter_conservative() {
        let filter = SentimentFilter::for_level(1).unwrap();
        let top = Asset::new("Top").with_rank(10);
        let outside = Asset::new("Outside").with_rank(11);

        assert!(filter.admits(&top, 0.5));
        assert!(!filter.admits(&top, 0.49));
        assert!(!filter.admits(&outside, 0.9));
        assert!(!filter.admits(&Asset::new("Unranked"), 0.9));
    }

    #[test]
    fn test_sentiment_filter_aggressive_has_no_ceiling() {
        let filter = SentimentFilter::for_level(5).unwrap();

        assert!(filter.admits(&Asset::new("Deep").with_rank(4000), -0.5));
        assert!(filter.admits(&Asset::new("Unranked"), 0.0));
        assert!(!filter.admits(&Asset::new("Gloomy").with_rank(3), -0.51));
    }

    #[test]
    fn test_sentiment_filter_moderate() {
        let filter = SentimentFilter::for_level(3).unwrap();
        let asset = Asset::new("Mid").with_rank(50);

        assert!(filter.admits(&asset, 0.1));
        assert!(filter.admits(&asset, 0.0));
        assert!(!filter.admits(&asset, -0.1));
        assert!(!filter.admits(&Asset::new("Tail").with_rank(101), 0.8));
    }
}
