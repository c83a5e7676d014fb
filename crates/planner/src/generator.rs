//! Mock plan generator. Catalog and location keywords are classified,
//! themed and bid, then packaged into one `SemPlanResult`.

use crate::bids::BidPolicy;
use crate::{catalog, classifier, themes};
use sem_core::config::PlannerConfig;
use sem_core::types::{PlanRequest, PlanSummary, SemPlanResult};
use tracing::debug;

/// Deterministic plan generator. Identical requests give identical plans.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanGenerator {
    policy: BidPolicy,
}

impl PlanGenerator {
    pub fn new(policy: BidPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(BidPolicy::from(config))
    }

    pub fn policy(&self) -> BidPolicy {
        self.policy
    }

    /// Build a complete plan. Brand and competitor URLs are carried for
    /// display only and do not influence the result.
    pub fn generate(&self, request: &PlanRequest) -> SemPlanResult {
        let mut keyword_ideas = catalog::keyword_ideas();
        keyword_ideas.extend(catalog::location_keywords(&request.locations));

        let search_ad_groups = classifier::classify(&keyword_ideas);
        let pmax_themes = themes::aggregate(&keyword_ideas, &request.theme_categories);
        let shopping_bids = self.policy.shopping_bids(&keyword_ideas);
        let summary = PlanSummary::from_keywords(&keyword_ideas);

        debug!(
            brand = %request.brand_url,
            locations = request.locations.len(),
            keywords = keyword_ideas.len(),
            themes = pmax_themes.len(),
            "Generated SEM plan"
        );

        SemPlanResult {
            seed_keywords: catalog::seed_keywords(),
            keyword_ideas,
            search_ad_groups,
            pmax_themes,
            shopping_bids,
            budgets: request.budgets,
            summary,
        }
    }
}

/// Generate a plan with the default bid policy.
pub fn generate(request: &PlanRequest) -> SemPlanResult {
    PlanGenerator::default().generate(request)
}
