//! Shopping CPC suggestions derived from a target CPA.

use sem_core::config::PlannerConfig;
use sem_core::types::{round_cents, KeywordIdea, ShoppingBid, ShoppingBids};

/// Target CPA and expected conversion rate used to derive a target CPC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BidPolicy {
    pub target_cpa: f64,
    pub conversion_rate: f64,
}

impl Default for BidPolicy {
    fn default() -> Self {
        Self {
            target_cpa: 45.0,
            conversion_rate: 0.025,
        }
    }
}

impl From<&PlannerConfig> for BidPolicy {
    fn from(config: &PlannerConfig) -> Self {
        Self {
            target_cpa: config.target_cpa,
            conversion_rate: config.conversion_rate,
        }
    }
}

impl BidPolicy {
    /// Unrounded target CPC (1.125 with the default policy).
    pub fn target_cpc(&self) -> f64 {
        self.target_cpa * self.conversion_rate
    }

    /// Pull the target CPC into `[low, high]`, then round to cents.
    ///
    /// Computed as `max(low, min(target, high))`, so an inverted range
    /// (`low > high`) yields `low`. `f64::clamp` is avoided because it
    /// panics on that input.
    pub fn suggested_cpc(&self, low: f64, high: f64) -> f64 {
        round_cents(self.target_cpc().min(high).max(low))
    }

    pub fn bid_for(&self, keyword: &KeywordIdea) -> ShoppingBid {
        let low = keyword.top_of_page_bid_low;
        let high = keyword.top_of_page_bid_high;
        ShoppingBid {
            text: keyword.text.clone(),
            avg_monthly_searches: keyword.avg_monthly_searches,
            suggested_cpc: self.suggested_cpc(low, high),
            bid_range: [low, high],
            competition: keyword.competition,
        }
    }

    pub fn shopping_bids(&self, keywords: &[KeywordIdea]) -> ShoppingBids {
        ShoppingBids {
            target_cpc: round_cents(self.target_cpc()),
            bids: keywords.iter().map(|k| self.bid_for(k)).collect(),
        }
    }
}
