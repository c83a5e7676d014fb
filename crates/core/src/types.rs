use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Average CPC shown when there is nothing to average over.
pub const DEFAULT_AVG_CPC: f64 = 1.50;

/// Round a monetary amount to whole cents, halves away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Advertiser competition level reported for a keyword.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
pub enum Competition {
    Low,
    #[default]
    Medium,
    High,
}

impl Competition {
    pub fn label(&self) -> &'static str {
        match self {
            Competition::Low => "Low",
            Competition::Medium => "Medium",
            Competition::High => "High",
        }
    }

    /// Case-insensitive parse; anything unrecognised is `None`.
    pub fn parse_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Competition::Low),
            "medium" => Some(Competition::Medium),
            "high" => Some(Competition::High),
            _ => None,
        }
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Google Ads keyword match type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
pub enum MatchType {
    Exact,
    Phrase,
    Broad,
}

impl MatchType {
    pub fn label(&self) -> &'static str {
        match self {
            MatchType::Exact => "Exact",
            MatchType::Phrase => "Phrase",
            MatchType::Broad => "Broad",
        }
    }
}

/// A single keyword-research row. Never mutated after generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordIdea {
    pub text: String,
    pub avg_monthly_searches: u64,
    pub top_of_page_bid_low: f64,
    pub top_of_page_bid_high: f64,
    pub competition: Competition,
    pub intent: String,
    pub match_type_suggestion: Vec<MatchType>,
    /// 1 when the idea matched one of the seed keywords, otherwise 0.
    pub seed_match_score: u8,
    /// Lower-cased location this keyword was synthesized for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl KeywordIdea {
    pub fn lowercase_text(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn bid_midpoint(&self) -> f64 {
        (self.top_of_page_bid_low + self.top_of_page_bid_high) / 2.0
    }
}

/// A named search ad group. Insertion order is classification order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdGroupBucket {
    pub name: String,
    pub keywords: Vec<KeywordIdea>,
}

/// Performance Max theme categories offered on the setup form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThemeCategory {
    #[serde(rename = "Product Category")]
    ProductCategory,
    #[serde(rename = "Use-case Based")]
    UseCaseBased,
    #[serde(rename = "Demographic")]
    Demographic,
    #[serde(rename = "Seasonal/Event-Based")]
    SeasonalEventBased,
}

impl ThemeCategory {
    /// Canonical order used for theme output.
    pub const ALL: [ThemeCategory; 4] = [
        ThemeCategory::ProductCategory,
        ThemeCategory::UseCaseBased,
        ThemeCategory::Demographic,
        ThemeCategory::SeasonalEventBased,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ThemeCategory::ProductCategory => "Product Category",
            ThemeCategory::UseCaseBased => "Use-case Based",
            ThemeCategory::Demographic => "Demographic",
            ThemeCategory::SeasonalEventBased => "Seasonal/Event-Based",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for ThemeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A Performance Max asset-group theme. Keywords may appear in several themes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Theme {
    pub name: String,
    pub category: ThemeCategory,
    pub keywords: Vec<KeywordIdea>,
    pub total_volume: u64,
}

/// Suggested Shopping CPC for one keyword.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingBid {
    pub text: String,
    pub avg_monthly_searches: u64,
    pub suggested_cpc: f64,
    pub bid_range: [f64; 2],
    pub competition: Competition,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShoppingBids {
    pub target_cpc: f64,
    pub bids: Vec<ShoppingBid>,
}

/// Monthly spend per campaign type. The three amounts are independent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BudgetAllocation {
    pub shopping: f64,
    pub search: f64,
    pub pmax: f64,
}

impl BudgetAllocation {
    pub fn new(shopping: f64, search: f64, pmax: f64) -> Self {
        Self {
            shopping,
            search,
            pmax,
        }
    }

    pub fn total(&self) -> f64 {
        self.shopping + self.search + self.pmax
    }
}

/// Headline figures for the keyword-research step.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    pub total_keywords: usize,
    pub total_volume: u64,
    pub avg_cpc: f64,
}

impl PlanSummary {
    /// Count, summed volume and mean bid-range midpoint (cents precision).
    pub fn from_keywords<'a>(keywords: impl IntoIterator<Item = &'a KeywordIdea>) -> Self {
        let mut total_keywords = 0usize;
        let mut total_volume = 0u64;
        let mut midpoint_sum = 0.0;
        for keyword in keywords {
            total_keywords += 1;
            total_volume = total_volume.saturating_add(keyword.avg_monthly_searches);
            midpoint_sum += keyword.bid_midpoint();
        }

        let avg_cpc = if total_keywords == 0 {
            DEFAULT_AVG_CPC
        } else {
            round_cents(midpoint_sum / total_keywords as f64)
        };

        Self {
            total_keywords,
            total_volume,
            avg_cpc,
        }
    }
}

/// Everything one plan generation needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanRequest {
    pub brand_url: String,
    pub competitor_url: Option<String>,
    pub locations: Vec<String>,
    pub budgets: BudgetAllocation,
    /// Empty means every category.
    #[serde(default)]
    pub theme_categories: Vec<ThemeCategory>,
    #[serde(default)]
    pub seed_themes: Vec<String>,
}

/// Aggregate result of one form submission. Replaced wholesale on resubmit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SemPlanResult {
    pub seed_keywords: Vec<String>,
    pub keyword_ideas: Vec<KeywordIdea>,
    pub search_ad_groups: Vec<AdGroupBucket>,
    pub pmax_themes: Vec<Theme>,
    pub shopping_bids: ShoppingBids,
    pub budgets: BudgetAllocation,
    pub summary: PlanSummary,
}

impl SemPlanResult {
    /// Every keyword across the search ad groups, bucket by bucket.
    pub fn grouped_keywords(&self) -> impl Iterator<Item = &KeywordIdea> {
        self.search_ad_groups
            .iter()
            .flat_map(|group| group.keywords.iter())
    }

    pub fn ad_group(&self, name: &str) -> Option<&AdGroupBucket> {
        self.search_ad_groups.iter().find(|group| group.name == name)
    }
}
