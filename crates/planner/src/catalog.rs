//! Static keyword-research catalog and location keyword synthesis.

use sem_core::types::{Competition, KeywordIdea, MatchType};

/// Seed keywords the research is expanded from.
pub const SEED_KEYWORDS: [&str; 10] = [
    "organic protein powder",
    "whey protein supplement",
    "plant based protein",
    "post workout nutrition",
    "fitness supplements",
    "protein shake mix",
    "muscle building protein",
    "vegan protein powder",
    "premium protein blend",
    "sports nutrition",
];

struct CatalogEntry {
    text: &'static str,
    volume: u64,
    low: f64,
    high: f64,
    competition: Competition,
    intent: &'static str,
    match_types: &'static [MatchType],
    seed_match_score: u8,
}

const EXACT_PHRASE: &[MatchType] = &[MatchType::Exact, MatchType::Phrase];
const PHRASE_BROAD: &[MatchType] = &[MatchType::Phrase, MatchType::Broad];
const BROAD: &[MatchType] = &[MatchType::Broad];

const CATALOG: [CatalogEntry; 15] = [
    CatalogEntry {
        text: "organic whey protein powder",
        volume: 8900,
        low: 1.2,
        high: 2.8,
        competition: Competition::High,
        intent: "Commercial",
        match_types: EXACT_PHRASE,
        seed_match_score: 1,
    },
    CatalogEntry {
        text: "best protein powder for weight loss",
        volume: 12000,
        low: 1.5,
        high: 3.2,
        competition: Competition::High,
        intent: "Commercial",
        match_types: PHRASE_BROAD,
        seed_match_score: 1,
    },
    CatalogEntry {
        text: "vegan protein powder reviews",
        volume: 3400,
        low: 0.8,
        high: 2.1,
        competition: Competition::Medium,
        intent: "Informational",
        match_types: PHRASE_BROAD,
        seed_match_score: 1,
    },
    CatalogEntry {
        text: "plant based protein powder",
        volume: 6700,
        low: 1.1,
        high: 2.5,
        competition: Competition::Medium,
        intent: "Commercial",
        match_types: EXACT_PHRASE,
        seed_match_score: 1,
    },
    CatalogEntry {
        text: "protein powder price comparison",
        volume: 2100,
        low: 0.6,
        high: 1.8,
        competition: Competition::Low,
        intent: "Commercial",
        match_types: PHRASE_BROAD,
        seed_match_score: 0,
    },
    CatalogEntry {
        text: "buy protein powder online",
        volume: 15600,
        low: 1.8,
        high: 4.2,
        competition: Competition::High,
        intent: "Transactional",
        match_types: EXACT_PHRASE,
        seed_match_score: 1,
    },
    CatalogEntry {
        text: "protein powder for women",
        volume: 9300,
        low: 1.3,
        high: 2.9,
        competition: Competition::High,
        intent: "Commercial",
        match_types: EXACT_PHRASE,
        seed_match_score: 1,
    },
    CatalogEntry {
        text: "casein protein powder",
        volume: 4200,
        low: 1.0,
        high: 2.4,
        competition: Competition::Medium,
        intent: "Commercial",
        match_types: EXACT_PHRASE,
        seed_match_score: 1,
    },
    CatalogEntry {
        text: "protein powder recipes",
        volume: 7800,
        low: 0.4,
        high: 1.2,
        competition: Competition::Low,
        intent: "Informational",
        match_types: PHRASE_BROAD,
        seed_match_score: 1,
    },
    CatalogEntry {
        text: "protein powder side effects",
        volume: 2800,
        low: 0.3,
        high: 0.9,
        competition: Competition::Low,
        intent: "Informational",
        match_types: BROAD,
        seed_match_score: 1,
    },
    CatalogEntry {
        text: "grass fed whey protein",
        volume: 5100,
        low: 1.4,
        high: 3.1,
        competition: Competition::Medium,
        intent: "Commercial",
        match_types: EXACT_PHRASE,
        seed_match_score: 1,
    },
    CatalogEntry {
        text: "protein powder subscription",
        volume: 1900,
        low: 2.1,
        high: 4.8,
        competition: Competition::High,
        intent: "Transactional",
        match_types: EXACT_PHRASE,
        seed_match_score: 1,
    },
    CatalogEntry {
        text: "chocolate protein powder",
        volume: 8600,
        low: 1.0,
        high: 2.3,
        competition: Competition::Medium,
        intent: "Commercial",
        match_types: PHRASE_BROAD,
        seed_match_score: 1,
    },
    CatalogEntry {
        text: "protein powder without artificial sweeteners",
        volume: 3700,
        low: 1.2,
        high: 2.7,
        competition: Competition::Medium,
        intent: "Commercial",
        match_types: PHRASE_BROAD,
        seed_match_score: 1,
    },
    CatalogEntry {
        text: "bulk protein powder",
        volume: 4800,
        low: 1.1,
        high: 2.6,
        competition: Competition::Medium,
        intent: "Commercial",
        match_types: EXACT_PHRASE,
        seed_match_score: 1,
    },
];

impl CatalogEntry {
    fn to_idea(&self) -> KeywordIdea {
        KeywordIdea {
            text: self.text.to_string(),
            avg_monthly_searches: self.volume,
            top_of_page_bid_low: self.low,
            top_of_page_bid_high: self.high,
            competition: self.competition,
            intent: self.intent.to_string(),
            match_type_suggestion: self.match_types.to_vec(),
            seed_match_score: self.seed_match_score,
            location: None,
        }
    }
}

pub fn seed_keywords() -> Vec<String> {
    SEED_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

/// The fixed 15-entry keyword-idea table, in catalog order.
pub fn keyword_ideas() -> Vec<KeywordIdea> {
    CATALOG.iter().map(CatalogEntry::to_idea).collect()
}

/// Two local keywords per location: a generic term and a transactional one.
pub fn location_keywords(locations: &[String]) -> Vec<KeywordIdea> {
    locations
        .iter()
        .flat_map(|location| {
            let location = location.to_lowercase();
            [
                KeywordIdea {
                    text: format!("protein powder {location}"),
                    avg_monthly_searches: 890,
                    top_of_page_bid_low: 0.8,
                    top_of_page_bid_high: 2.2,
                    competition: Competition::Medium,
                    intent: "Local Commercial".to_string(),
                    match_type_suggestion: PHRASE_BROAD.to_vec(),
                    seed_match_score: 1,
                    location: Some(location.clone()),
                },
                KeywordIdea {
                    text: format!("buy protein powder in {location}"),
                    avg_monthly_searches: 450,
                    top_of_page_bid_low: 1.2,
                    top_of_page_bid_high: 3.0,
                    competition: Competition::High,
                    intent: "Local Transactional".to_string(),
                    match_type_suggestion: EXACT_PHRASE.to_vec(),
                    seed_match_score: 1,
                    location: Some(location),
                },
            ]
        })
        .collect()
}
