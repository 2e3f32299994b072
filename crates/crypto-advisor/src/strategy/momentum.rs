//! Momentum-Rank Scoring
//!
//! `score = market_cap / 1e9 + momentum`, where momentum is the raw 24h change
//! for aggressive levels and minus its magnitude otherwise.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::model::{Asset, RiskLevel, ScoredAsset};

const BILLION: Decimal = dec!(1000000000);

pub fn momentum_score(asset: &Asset, level: RiskLevel) -> Decimal {
    let change = asset.price_change_percentage_24h;
    let momentum = if level.rewards_momentum() {
        change
    } else {
        -change.abs()
    };

    asset.market_cap / BILLION + momentum
}

/// Score and sort descending; equal scores keep input order
pub fn rank_by_momentum(assets: Vec<Asset>, level: RiskLevel) -> Vec<ScoredAsset> {
    let mut scored: Vec<ScoredAsset> = assets
        .into_iter()
        .map(|asset| ScoredAsset {
            score: momentum_score(&asset, level),
            asset,
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}
