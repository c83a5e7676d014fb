//! JSON contract of the remote plan-generation service.
//!
//! Requests are strict; responses are decoded without schema validation.
//! Any missing or mistyped response field falls back to a display default
//! instead of failing the decode.

use crate::types::{Competition, KeywordIdea, MatchType, SemPlanResult};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Path of the generation endpoint, relative to the service base URL.
pub const GENERATE_SEM_PLAN_PATH: &str = "/generate_sem_plan/";

/// Bid range assumed for a keyword row that carries none.
pub const DEFAULT_BID_RANGE: [f64; 2] = [0.50, 2.00];

/// Split a comma-separated location list, trimming and dropping blanks.
pub fn split_locations(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Budget split as the service names it: `cap` = shopping, `bud` = search.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct BudgetAllocations {
    #[serde(default)]
    pub cap: f64,
    #[serde(default)]
    pub bud: f64,
    #[serde(default)]
    pub pmax: f64,
}

/// Body of `POST /generate_sem_plan/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct GenerateSemPlanRequest {
    pub brand_website: String,
    #[serde(default)]
    pub competitor_website: String,
    /// Comma-joined location list.
    pub target_locations: String,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub budget_allocations: BudgetAllocations,
}

impl GenerateSemPlanRequest {
    pub fn locations(&self) -> Vec<String> {
        split_locations(&self.target_locations)
    }
}

// ─── Response ───────────────────────────────────────────────────────────────

/// A keyword row inside `searchAdGroups`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(from = "Value")]
pub struct KeywordRow {
    pub text: String,
    pub avg_monthly_searches: u64,
    pub competition: Competition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_of_page_bid_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_of_page_bid_high: Option<f64>,
    pub match_type_suggestion: Vec<MatchType>,
    pub intent: String,
    /// Preformatted range label, when the service sends one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpc_range: Option<String>,
}

impl KeywordRow {
    pub fn bid_range(&self) -> [f64; 2] {
        [
            self.top_of_page_bid_low.unwrap_or(DEFAULT_BID_RANGE[0]),
            self.top_of_page_bid_high.unwrap_or(DEFAULT_BID_RANGE[1]),
        ]
    }

    pub fn cpc_range_label(&self) -> String {
        if let Some(label) = &self.cpc_range {
            return label.clone();
        }
        let [low, high] = self.bid_range();
        format!("${low:.2} - ${high:.2}")
    }
}

impl From<Value> for KeywordRow {
    fn from(value: Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);

        let match_type_suggestion = obj
            .get("match_type_suggestion")
            .and_then(Value::as_array)
            .map(|types| {
                types
                    .iter()
                    .filter_map(|t| serde_json::from_value::<MatchType>(t.clone()).ok())
                    .collect::<Vec<_>>()
            })
            .filter(|types| !types.is_empty())
            .unwrap_or_else(|| vec![MatchType::Broad, MatchType::Phrase]);

        Self {
            text: first_str(obj, &["keyword_text", "name", "keyword", "text"])
                .unwrap_or("Unknown")
                .to_string(),
            avg_monthly_searches: first_volume(
                obj,
                &["search_volume", "avg_monthly_searches", "monthly_searches"],
            ),
            competition: competition_field(obj),
            top_of_page_bid_low: obj.get("top_of_page_bid_low").and_then(Value::as_f64),
            top_of_page_bid_high: obj.get("top_of_page_bid_high").and_then(Value::as_f64),
            match_type_suggestion,
            intent: first_str(obj, &["intent"]).unwrap_or("Commercial").to_string(),
            cpc_range: first_str(obj, &["cpc_range"]).map(str::to_string),
        }
    }
}

/// A Performance Max theme inside `pmaxThemes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(from = "Value")]
pub struct PmaxThemeEntry {
    pub keywords: Vec<String>,
    pub total_volume: u64,
}

impl From<Value> for PmaxThemeEntry {
    fn from(value: Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);
        let keywords = obj
            .get("keywords")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        Value::Object(o) => {
                            first_str(o, &["text", "keyword"]).map(str::to_string)
                        }
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            keywords,
            total_volume: first_volume(obj, &["total_volume"]),
        }
    }
}

/// A row inside `shoppingCPC`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(from = "Value")]
pub struct ShoppingCpcRow {
    pub text: String,
    pub search_volume: u64,
    pub suggested_cpc: f64,
    pub competition: Competition,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<f64>>)]
    pub bid_range: Option<[f64; 2]>,
}

impl From<Value> for ShoppingCpcRow {
    fn from(value: Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);
        let bid_range = obj
            .get("bid_range")
            .and_then(Value::as_array)
            .and_then(|range| match range.as_slice() {
                [low, high] => Some([low.as_f64()?, high.as_f64()?]),
                _ => None,
            });

        Self {
            text: first_str(obj, &["text", "keyword_text", "keyword", "name"])
                .unwrap_or("Unknown")
                .to_string(),
            search_volume: first_volume(obj, &["search_volume", "avg_monthly_searches"]),
            suggested_cpc: obj
                .get("suggested_cpc")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
            competition: competition_field(obj),
            bid_range,
        }
    }
}

/// Response of `POST /generate_sem_plan/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(from = "Value")]
pub struct SemPlanResponse {
    pub budget_allocations: BudgetAllocations,
    #[serde(rename = "searchAdGroups", serialize_with = "serialize_ordered")]
    #[schema(value_type = Object)]
    pub search_ad_groups: Vec<(String, Vec<KeywordRow>)>,
    #[serde(rename = "pmaxThemes", serialize_with = "serialize_ordered")]
    #[schema(value_type = Object)]
    pub pmax_themes: Vec<(String, PmaxThemeEntry)>,
    #[serde(rename = "shoppingCPC")]
    pub shopping_cpc: Vec<ShoppingCpcRow>,
    pub total_keywords: u64,
    pub total_volume: u64,
    pub avg_cpc: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_cpc: Option<f64>,
    pub themes: Vec<String>,
}

impl From<Value> for SemPlanResponse {
    fn from(value: Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);

        let budget_allocations = obj
            .get("budget_allocations")
            .and_then(Value::as_object)
            .map(|b| BudgetAllocations {
                cap: b.get("cap").and_then(Value::as_f64).unwrap_or(0.0),
                bud: b.get("bud").and_then(Value::as_f64).unwrap_or(0.0),
                pmax: b.get("pmax").and_then(Value::as_f64).unwrap_or(0.0),
            })
            .unwrap_or_default();

        let search_ad_groups = ordered_entries(obj.get("searchAdGroups"), |v| {
            v.as_array()
                .map(|rows| rows.iter().cloned().map(KeywordRow::from).collect())
                .unwrap_or_default()
        });
        let pmax_themes =
            ordered_entries(obj.get("pmaxThemes"), |v| PmaxThemeEntry::from(v.clone()));

        let shopping_cpc = obj
            .get("shoppingCPC")
            .and_then(Value::as_array)
            .map(|rows| rows.iter().cloned().map(ShoppingCpcRow::from).collect())
            .unwrap_or_default();

        let themes = obj
            .get("themes")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            budget_allocations,
            search_ad_groups,
            pmax_themes,
            shopping_cpc,
            total_keywords: first_volume(obj, &["total_keywords"]),
            total_volume: first_volume(obj, &["total_volume"]),
            avg_cpc: obj.get("avg_cpc").and_then(Value::as_f64).unwrap_or(0.0),
            target_cpc: obj.get("target_cpc").and_then(Value::as_f64),
            themes,
        }
    }
}

// ─── Plan → response ────────────────────────────────────────────────────────

impl From<&KeywordIdea> for KeywordRow {
    fn from(idea: &KeywordIdea) -> Self {
        Self {
            text: idea.text.clone(),
            avg_monthly_searches: idea.avg_monthly_searches,
            competition: idea.competition,
            top_of_page_bid_low: Some(idea.top_of_page_bid_low),
            top_of_page_bid_high: Some(idea.top_of_page_bid_high),
            match_type_suggestion: idea.match_type_suggestion.clone(),
            intent: idea.intent.clone(),
            cpc_range: None,
        }
    }
}

impl From<&SemPlanResult> for SemPlanResponse {
    fn from(plan: &SemPlanResult) -> Self {
        let search_ad_groups = plan
            .search_ad_groups
            .iter()
            .map(|group| {
                (
                    group.name.clone(),
                    group.keywords.iter().map(KeywordRow::from).collect(),
                )
            })
            .collect();

        let pmax_themes = plan
            .pmax_themes
            .iter()
            .map(|theme| {
                (
                    theme.name.clone(),
                    PmaxThemeEntry {
                        keywords: theme.keywords.iter().map(|k| k.text.clone()).collect(),
                        total_volume: theme.total_volume,
                    },
                )
            })
            .collect();

        let shopping_cpc = plan
            .shopping_bids
            .bids
            .iter()
            .map(|bid| ShoppingCpcRow {
                text: bid.text.clone(),
                search_volume: bid.avg_monthly_searches,
                suggested_cpc: bid.suggested_cpc,
                competition: bid.competition,
                bid_range: Some(bid.bid_range),
            })
            .collect();

        Self {
            budget_allocations: BudgetAllocations {
                cap: plan.budgets.shopping,
                bud: plan.budgets.search,
                pmax: plan.budgets.pmax,
            },
            search_ad_groups,
            pmax_themes,
            shopping_cpc,
            total_keywords: plan.summary.total_keywords as u64,
            total_volume: plan.summary.total_volume,
            avg_cpc: plan.summary.avg_cpc,
            target_cpc: Some(plan.shopping_bids.target_cpc),
            themes: plan.pmax_themes.iter().map(|t| t.name.clone()).collect(),
        }
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn first_str<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// First positive numeric field; zero and absent fields fall through.
fn first_volume(obj: &Map<String, Value>, keys: &[&str]) -> u64 {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .filter_map(|v| {
            v.as_u64()
                .or_else(|| v.as_f64().filter(|f| *f > 0.0).map(|f| f.round() as u64))
        })
        .find(|n| *n > 0)
        .unwrap_or(0)
}

fn competition_field(obj: &Map<String, Value>) -> Competition {
    first_str(obj, &["competition"])
        .and_then(Competition::parse_label)
        .unwrap_or_default()
}

/// Object entries in document order; anything but an object is empty.
fn ordered_entries<T>(value: Option<&Value>, convert: impl Fn(&Value) -> T) -> Vec<(String, T)> {
    match value {
        Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), convert(v))).collect(),
        _ => Vec::new(),
    }
}

fn serialize_ordered<S, T>(entries: &[(String, T)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (key, value) in entries {
        map.serialize_entry(key, value)?;
    }
    map.end()
}
