//! Derived views for the keyword-research and campaign-structure steps.

use sem_core::types::{round_cents, Competition, KeywordIdea, ShoppingBid, ShoppingBids};
use serde::{Deserialize, Serialize};

/// Keywords listed per ad group before "view all".
pub const AD_GROUP_PREVIEW: usize = 5;
/// Keywords listed per PMax theme before "+N more".
pub const THEME_PREVIEW: usize = 8;
/// Shopping bid rows shown in the campaign summary.
pub const SHOPPING_PREVIEW: usize = 10;

/// Markup applied to a suggested CPC for the upper end of its display range.
const DISPLAY_RANGE_MARKUP: f64 = 1.5;

// ─── Keyword filter ─────────────────────────────────────────────────────────

/// Volume and competition filter on the keyword-research table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordFilter {
    pub min_volume: u64,
    /// `None` shows every competition level.
    pub competition: Option<Competition>,
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self {
            min_volume: 500,
            competition: None,
        }
    }
}

impl KeywordFilter {
    pub fn matches(&self, keyword: &KeywordIdea) -> bool {
        keyword.avg_monthly_searches >= self.min_volume
            && self.competition.map_or(true, |c| keyword.competition == c)
    }

    pub fn apply<'a>(
        &self,
        keywords: impl IntoIterator<Item = &'a KeywordIdea>,
    ) -> Vec<&'a KeywordIdea> {
        keywords.into_iter().filter(|k| self.matches(k)).collect()
    }
}

// ─── Shopping overview ──────────────────────────────────────────────────────

/// Headline numbers above the Shopping bid table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingOverview {
    pub keyword_count: usize,
    /// Mean suggested CPC in cents precision; 0 when there are no bids.
    pub avg_suggested_cpc: f64,
    pub total_volume: u64,
}

impl ShoppingOverview {
    pub fn from_bids(bids: &ShoppingBids) -> Self {
        let keyword_count = bids.bids.len();
        let total_volume = bids.bids.iter().map(|b| b.avg_monthly_searches).sum();
        let avg_suggested_cpc = if keyword_count == 0 {
            0.0
        } else {
            let sum: f64 = bids.bids.iter().map(|b| b.suggested_cpc).sum();
            round_cents(sum / keyword_count as f64)
        };

        Self {
            keyword_count,
            avg_suggested_cpc,
            total_volume,
        }
    }
}

/// Bid range shown next to a suggestion: suggested CPC up to 1.5x of it.
pub fn display_range(bid: &ShoppingBid) -> (f64, f64) {
    (
        bid.suggested_cpc,
        round_cents(bid.suggested_cpc * DISPLAY_RANGE_MARKUP),
    )
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Newline-separated keyword texts, as copied from an ad group.
pub fn copy_keywords(keywords: &[KeywordIdea]) -> String {
    keywords
        .iter()
        .map(|k| k.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// First `limit` items and how many were left out.
pub fn preview<T>(items: &[T], limit: usize) -> (&[T], usize) {
    let shown = items.len().min(limit);
    (&items[..shown], items.len() - shown)
}
