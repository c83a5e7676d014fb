//! Plan sources: the in-process mock generator and the remote
//! `generate_sem_plan` service.

use sem_core::config::{AppConfig, PlannerConfig, RemoteConfig};
use sem_core::types::{
    round_cents, AdGroupBucket, BudgetAllocation, Competition, KeywordIdea, MatchType,
    DEFAULT_AVG_CPC,
    PlanRequest, PlanSummary, SemPlanResult, ShoppingBid, ShoppingBids, Theme, ThemeCategory,
};
use sem_core::wire::{KeywordRow, SemPlanResponse, DEFAULT_BID_RANGE, GENERATE_SEM_PLAN_PATH};
use sem_core::{SemError, SemResult};
use sem_planner::bids::BidPolicy;
use sem_planner::themes;
use sem_planner::PlanGenerator;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::form::wire_request;

/// Where a submitted form gets turned into a plan.
#[allow(async_fn_in_trait)]
pub trait PlanSource {
    async fn generate(&self, request: &PlanRequest) -> SemResult<SemPlanResult>;

    /// Description of the notification raised after a successful generation.
    fn success_description(&self, plan: &SemPlanResult) -> String;
}

// ─── Mock ───────────────────────────────────────────────────────────────────

/// Runs the local generator after a fixed delay. The delay is not
/// cancellable and carries no meaning beyond pacing.
#[derive(Debug, Clone, Copy)]
pub struct MockPlanSource {
    generator: PlanGenerator,
    delay: Duration,
}

impl Default for MockPlanSource {
    fn default() -> Self {
        Self::from_config(&PlannerConfig::default())
    }
}

impl MockPlanSource {
    pub fn new(generator: PlanGenerator, delay: Duration) -> Self {
        Self { generator, delay }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(
            PlanGenerator::from_config(config),
            Duration::from_millis(config.mock_delay_ms),
        )
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl PlanSource for MockPlanSource {
    async fn generate(&self, request: &PlanRequest) -> SemResult<SemPlanResult> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.generator.generate(request))
    }

    fn success_description(&self, plan: &SemPlanResult) -> String {
        format!(
            "Generated {} keyword ideas and campaign recommendations",
            plan.keyword_ideas.len()
        )
    }
}

// ─── Remote ─────────────────────────────────────────────────────────────────

/// Client for `POST {base_url}/generate_sem_plan/`. No retries.
#[derive(Debug, Clone)]
pub struct RemotePlanSource {
    client: reqwest::Client,
    endpoint: String,
    policy: BidPolicy,
}

impl RemotePlanSource {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, BidPolicy::default())
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, policy: BidPolicy) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), GENERATE_SEM_PLAN_PATH),
            policy,
        }
    }

    pub fn from_config(remote: &RemoteConfig, planner: &PlannerConfig) -> SemResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = remote.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| SemError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(
            client,
            &remote.base_url,
            BidPolicy::from(planner),
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PlanSource for RemotePlanSource {
    async fn generate(&self, request: &PlanRequest) -> SemResult<SemPlanResult> {
        let body = wire_request(request);
        debug!(endpoint = %self.endpoint, locations = %body.target_locations, "Requesting SEM plan");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| SemError::Generation(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, endpoint = %self.endpoint, "SEM plan service returned an error");
            return Err(SemError::Generation(format!(
                "service responded with {status}"
            )));
        }

        let decoded: SemPlanResponse = response
            .json()
            .await
            .map_err(|e| SemError::Generation(format!("unreadable response: {e}")))?;

        Ok(plan_from_response(decoded, request, &self.policy))
    }

    fn success_description(&self, _plan: &SemPlanResult) -> String {
        "Successfully generated SEM plan and recommendations".to_string()
    }
}

// ─── Backend selection ──────────────────────────────────────────────────────

/// Either source, picked at startup.
#[derive(Debug, Clone)]
pub enum PlanBackend {
    Mock(MockPlanSource),
    Remote(RemotePlanSource),
}

impl PlanBackend {
    pub fn from_config(config: &AppConfig, remote: bool) -> SemResult<Self> {
        if remote {
            Ok(PlanBackend::Remote(RemotePlanSource::from_config(
                &config.remote,
                &config.planner,
            )?))
        } else {
            Ok(PlanBackend::Mock(MockPlanSource::from_config(&config.planner)))
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlanBackend::Mock(_) => "mock",
            PlanBackend::Remote(_) => "remote",
        }
    }
}

impl PlanSource for PlanBackend {
    async fn generate(&self, request: &PlanRequest) -> SemResult<SemPlanResult> {
        match self {
            PlanBackend::Mock(source) => source.generate(request).await,
            PlanBackend::Remote(source) => source.generate(request).await,
        }
    }

    fn success_description(&self, plan: &SemPlanResult) -> String {
        match self {
            PlanBackend::Mock(source) => source.success_description(plan),
            PlanBackend::Remote(source) => source.success_description(plan),
        }
    }
}

// ─── Response → plan ────────────────────────────────────────────────────────

/// Rebuild a plan from a leniently decoded service response.
///
/// Theme keywords are matched to ad-group rows by text; unmatched ones get
/// placeholder metrics. Theme names we don't know are filed under
/// Product Category. Zero totals fall back to values derived from the
/// keywords.
pub fn plan_from_response(
    response: SemPlanResponse,
    request: &PlanRequest,
    policy: &BidPolicy,
) -> SemPlanResult {
    let search_ad_groups: Vec<AdGroupBucket> = response
        .search_ad_groups
        .iter()
        .map(|(name, rows)| AdGroupBucket {
            name: name.clone(),
            keywords: rows.iter().map(idea_from_row).collect(),
        })
        .collect();

    let mut keyword_ideas: Vec<KeywordIdea> = Vec::new();
    let mut by_text: HashMap<String, usize> = HashMap::new();
    for idea in search_ad_groups.iter().flat_map(|g| g.keywords.iter()) {
        if let Entry::Vacant(slot) = by_text.entry(idea.text.clone()) {
            slot.insert(keyword_ideas.len());
            keyword_ideas.push(idea.clone());
        }
    }

    let pmax_themes = response
        .pmax_themes
        .iter()
        .map(|(name, entry)| {
            let keywords: Vec<KeywordIdea> = entry
                .keywords
                .iter()
                .map(|text| match by_text.get(text) {
                    Some(&i) => keyword_ideas[i].clone(),
                    None => placeholder_idea(text),
                })
                .collect();
            let total_volume = if entry.total_volume > 0 {
                entry.total_volume
            } else {
                keywords.iter().map(|k| k.avg_monthly_searches).sum()
            };
            Theme {
                name: name.clone(),
                category: themes::category_of(name).unwrap_or(ThemeCategory::ProductCategory),
                keywords,
                total_volume,
            }
        })
        .collect();

    let shopping_bids = ShoppingBids {
        target_cpc: response
            .target_cpc
            .unwrap_or_else(|| round_cents(policy.target_cpc())),
        bids: response
            .shopping_cpc
            .iter()
            .map(|row| ShoppingBid {
                text: row.text.clone(),
                avg_monthly_searches: row.search_volume,
                suggested_cpc: row.suggested_cpc,
                bid_range: row.bid_range.unwrap_or(DEFAULT_BID_RANGE),
                competition: row.competition,
            })
            .collect(),
    };

    let derived = PlanSummary::from_keywords(&keyword_ideas);
    let summary = PlanSummary {
        total_keywords: if response.total_keywords > 0 {
            response.total_keywords as usize
        } else {
            derived.total_keywords
        },
        total_volume: if response.total_volume > 0 {
            response.total_volume
        } else {
            derived.total_volume
        },
        avg_cpc: if response.avg_cpc > 0.0 {
            response.avg_cpc
        } else {
            DEFAULT_AVG_CPC
        },
    };

    let allocations = response.budget_allocations;
    SemPlanResult {
        seed_keywords: request.seed_themes.clone(),
        keyword_ideas,
        search_ad_groups,
        pmax_themes,
        shopping_bids,
        budgets: BudgetAllocation::new(allocations.cap, allocations.bud, allocations.pmax),
        summary,
    }
}

fn idea_from_row(row: &KeywordRow) -> KeywordIdea {
    let [low, high] = row.bid_range();
    KeywordIdea {
        text: row.text.clone(),
        avg_monthly_searches: row.avg_monthly_searches,
        top_of_page_bid_low: low,
        top_of_page_bid_high: high,
        competition: row.competition,
        intent: row.intent.clone(),
        match_type_suggestion: row.match_type_suggestion.clone(),
        seed_match_score: 0,
        location: None,
    }
}

fn placeholder_idea(text: &str) -> KeywordIdea {
    KeywordIdea {
        text: text.to_string(),
        avg_monthly_searches: 0,
        top_of_page_bid_low: DEFAULT_BID_RANGE[0],
        top_of_page_bid_high: DEFAULT_BID_RANGE[1],
        competition: Competition::default(),
        intent: "Commercial".to_string(),
        match_type_suggestion: vec![MatchType::Broad, MatchType::Phrase],
        seed_match_score: 0,
        location: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sem_api::rest::AppState;
    use sem_api::server;
    use serde_json::json;

    fn request() -> PlanRequest {
        PlanRequest {
            brand_url: "https://brand.example".to_string(),
            competitor_url: None,
            locations: vec!["Mumbai".to_string()],
            budgets: BudgetAllocation::new(1000.0, 2000.0, 1500.0),
            theme_categories: Vec::new(),
            seed_themes: vec!["protein powder".to_string()],
        }
    }

    /// Serve the plan router on an ephemeral port and return its base URL.
    async fn spawn_service() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = server::router(AppState::new(PlanGenerator::default(), "test"));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_mock_source_matches_generator() {
        let source = MockPlanSource::default().with_delay(Duration::ZERO);
        let plan = source.generate(&request()).await.unwrap();
        assert_eq!(plan, PlanGenerator::default().generate(&request()));
        assert_eq!(
            source.success_description(&plan),
            "Generated 17 keyword ideas and campaign recommendations"
        );
    }

    #[tokio::test]
    async fn test_mock_source_waits_for_delay() {
        assert_eq!(MockPlanSource::default().delay(), Duration::from_millis(2000));

        let source = MockPlanSource::default().with_delay(Duration::from_millis(50));
        let started = tokio::time::Instant::now();
        source.generate(&request()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_remote_endpoint_joins_path() {
        assert_eq!(
            RemotePlanSource::new("http://127.0.0.1:8000/").endpoint(),
            "http://127.0.0.1:8000/generate_sem_plan/"
        );
        let remote = RemotePlanSource::from_config(&RemoteConfig::default(), &PlannerConfig::default())
            .unwrap();
        assert_eq!(remote.endpoint(), "http://127.0.0.1:8000/generate_sem_plan/");
    }

    #[tokio::test]
    async fn test_remote_source_against_service() {
        let base = spawn_service().await;
        let source = RemotePlanSource::new(&base);
        let plan = source.generate(&request()).await.unwrap();

        let local = PlanGenerator::default().generate(&request());
        assert_eq!(plan.budgets, local.budgets);
        assert_eq!(plan.summary, local.summary);
        let names = |p: &SemPlanResult| -> Vec<(String, Vec<String>)> {
            p.search_ad_groups
                .iter()
                .map(|g| (g.name.clone(), g.keywords.iter().map(|k| k.text.clone()).collect()))
                .collect()
        };
        assert_eq!(names(&plan), names(&local));
        assert_eq!(plan.keyword_ideas.len(), 17);

        let theme_names: Vec<_> = plan.pmax_themes.iter().map(|t| (&t.name, t.category)).collect();
        let local_names: Vec<_> = local.pmax_themes.iter().map(|t| (&t.name, t.category)).collect();
        assert_eq!(theme_names, local_names);
        assert_eq!(plan.shopping_bids, local.shopping_bids);
        assert_eq!(plan.seed_keywords, vec!["protein powder"]);
    }

    #[tokio::test]
    async fn test_remote_source_reports_http_errors() {
        let base = spawn_service().await;
        let source = RemotePlanSource::new(&base);
        let mut bad = request();
        bad.locations.clear();
        assert!(matches!(
            source.generate(&bad).await,
            Err(SemError::Generation(_))
        ));
    }

    #[tokio::test]
    async fn test_remote_source_reports_connection_errors() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = RemotePlanSource::new(&format!("http://{addr}"));
        assert!(matches!(
            source.generate(&request()).await,
            Err(SemError::Generation(_))
        ));
    }

    #[test]
    fn test_plan_from_sparse_response() {
        let response: SemPlanResponse = serde_json::from_value(json!({
            "searchAdGroups": {
                "Brand Terms": [
                    {"keyword": "whey isolate", "search_volume": 1200, "competition": "High"},
                    {"name": "casein"}
                ]
            },
            "pmaxThemes": {
                "Women's Fitness Nutrition": {"keywords": ["whey isolate", "mystery"]},
                "Night Recovery": {"keywords": ["casein"], "total_volume": 50}
            },
            "shoppingCPC": [{"text": "whey isolate", "suggested_cpc": 1.4}]
        }))
        .unwrap();

        let plan = plan_from_response(response, &request(), &BidPolicy::default());

        assert_eq!(plan.keyword_ideas.len(), 2);
        assert_eq!(plan.keyword_ideas[1].top_of_page_bid_low, 0.5);
        assert_eq!(plan.summary.total_keywords, 2);
        assert_eq!(plan.summary.total_volume, 1200);
        assert_eq!(plan.summary.avg_cpc, DEFAULT_AVG_CPC);

        assert_eq!(plan.pmax_themes[0].category, ThemeCategory::Demographic);
        assert_eq!(plan.pmax_themes[1].category, ThemeCategory::ProductCategory);
        assert_eq!(plan.pmax_themes[0].total_volume, 1200);
        assert_eq!(plan.pmax_themes[0].keywords[1].avg_monthly_searches, 0);
        assert_eq!(plan.pmax_themes[1].total_volume, 50);

        assert_eq!(plan.shopping_bids.target_cpc, 1.13);
        assert_eq!(plan.shopping_bids.bids[0].bid_range, DEFAULT_BID_RANGE);
        assert_eq!(plan.budgets, BudgetAllocation::default());
    }

    #[test]
    fn test_avg_cpc_defaults_when_service_omits_it() {
        let response: SemPlanResponse = serde_json::from_value(json!({
            "searchAdGroups": {
                "Brand Terms": [
                    {"text": "whey isolate", "top_of_page_bid_low": 3.0, "top_of_page_bid_high": 5.0}
                ]
            }
        }))
        .unwrap();

        let plan = plan_from_response(response, &request(), &BidPolicy::default());
        assert_eq!(plan.keyword_ideas[0].top_of_page_bid_high, 5.0);
        assert_eq!(plan.summary.avg_cpc, 1.5);

        let response: SemPlanResponse = serde_json::from_value(json!({
            "searchAdGroups": {"Brand Terms": [{"text": "whey isolate"}]},
            "avg_cpc": 2.75
        }))
        .unwrap();
        let plan = plan_from_response(response, &request(), &BidPolicy::default());
        assert_eq!(plan.summary.avg_cpc, 2.75);
    }

    #[test]
    fn test_plan_from_empty_response() {
        let plan = plan_from_response(SemPlanResponse::default(), &request(), &BidPolicy::default());
        assert!(plan.search_ad_groups.is_empty());
        assert_eq!(plan.summary.total_keywords, 0);
        assert_eq!(plan.summary.avg_cpc, 1.5);
    }
}
