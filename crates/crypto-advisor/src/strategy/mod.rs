//! Recommendation Strategies
//!
//! Risk tier policies and the scoring rules layered on top of them.

mod momentum;
mod policy;

pub use momentum::{momentum_score, rank_by_momentum};
pub use policy::{RankBand, SentimentFilter};

/// The two recommendation pipelines exposed by the engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Rank-band tiering scored by market cap and 24h momentum
    MomentumRank,

    /// Rank ceiling plus news-sentiment floor, snapshot order preserved
    SentimentFiltered,
}

impl Strategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MomentumRank => "momentum_rank",
            Self::SentimentFiltered => "sentiment_filtered",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
