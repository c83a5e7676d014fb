//! Search ad-group classification.
//!
//! Every keyword lands in exactly one bucket. Rules are tried in priority
//! order and the first substring hit wins; unmatched keywords fall back to
//! the category bucket.

use sem_core::types::{AdGroupBucket, KeywordIdea};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Ad groups
// ---------------------------------------------------------------------------

/// The five search ad groups, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdGroup {
    BrandProduct,
    Category,
    CompetitorComparison,
    Informational,
    LocationBased,
}

impl AdGroup {
    pub const DISPLAY_ORDER: [AdGroup; 5] = [
        AdGroup::BrandProduct,
        AdGroup::Category,
        AdGroup::CompetitorComparison,
        AdGroup::Informational,
        AdGroup::LocationBased,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AdGroup::BrandProduct => "Brand & Product Terms",
            AdGroup::Category => "Category Terms",
            AdGroup::CompetitorComparison => "Competitor Comparison",
            AdGroup::Informational => "Informational Queries",
            AdGroup::LocationBased => "Location-based Queries",
        }
    }

    fn index(&self) -> usize {
        match self {
            AdGroup::BrandProduct => 0,
            AdGroup::Category => 1,
            AdGroup::CompetitorComparison => 2,
            AdGroup::Informational => 3,
            AdGroup::LocationBased => 4,
        }
    }
}

const BRAND_TRIGGERS: &[&str] = &["buy", "subscription", "online"];
const INFORMATIONAL_TRIGGERS: &[&str] = &["reviews", "comparison", "side effects", "recipes"];
const COMPETITOR_TRIGGERS: &[&str] = &["vs", "compare"];

fn contains_any(text: &str, triggers: &[&str]) -> bool {
    triggers.iter().any(|t| text.contains(t))
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Classifier bound to the locations present in one keyword set.
pub struct KeywordClassifier {
    locations: Vec<String>,
}

impl KeywordClassifier {
    /// Collect every location associated with any keyword in `keywords`.
    pub fn for_keywords(keywords: &[KeywordIdea]) -> Self {
        let locations: BTreeSet<String> = keywords
            .iter()
            .filter_map(|k| k.location.as_deref())
            .map(str::to_lowercase)
            .filter(|l| !l.is_empty())
            .collect();
        Self {
            locations: locations.into_iter().collect(),
        }
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Decide the ad group for one keyword.
    pub fn group_for(&self, keyword: &KeywordIdea) -> AdGroup {
        let text = keyword.lowercase_text();

        if contains_any(&text, BRAND_TRIGGERS) {
            AdGroup::BrandProduct
        } else if contains_any(&text, INFORMATIONAL_TRIGGERS) {
            AdGroup::Informational
        } else if contains_any(&text, COMPETITOR_TRIGGERS) {
            AdGroup::CompetitorComparison
        } else if self.locations.iter().any(|l| text.contains(l.as_str())) {
            AdGroup::LocationBased
        } else {
            AdGroup::Category
        }
    }

    /// Partition `keywords` into the five buckets, preserving input order.
    pub fn classify(&self, keywords: &[KeywordIdea]) -> Vec<AdGroupBucket> {
        let mut buckets: Vec<AdGroupBucket> = AdGroup::DISPLAY_ORDER
            .iter()
            .map(|group| AdGroupBucket {
                name: group.name().to_string(),
                keywords: Vec::new(),
            })
            .collect();

        for keyword in keywords {
            let group = self.group_for(keyword);
            buckets[group.index()].keywords.push(keyword.clone());
        }

        buckets
    }
}

/// Classify a keyword set using the locations it carries.
pub fn classify(keywords: &[KeywordIdea]) -> Vec<AdGroupBucket> {
    KeywordClassifier::for_keywords(keywords).classify(keywords)
}
