//! Terminal and JSON rendering of a wizard's result.

use anyhow::Context;
use sem_core::types::{AdGroupBucket, KeywordIdea, PlanSummary, SemPlanResult, ShoppingBids, Theme};
use sem_planner::budget::CampaignChannel;
use sem_planner::research::{
    self, display_range, AD_GROUP_PREVIEW, SHOPPING_PREVIEW, THEME_PREVIEW,
};
use sem_planner::{BudgetBreakdown, KeywordFilter, ShoppingOverview};
use sem_wizard::{Wizard, WizardStep};
use serde::Serialize;
use std::fmt::Write;
use uuid::Uuid;

/// Machine-readable report of one wizard run.
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub wizard_id: Uuid,
    pub step: WizardStep,
    pub summary: PlanSummary,
    pub keywords: Vec<&'a KeywordIdea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaigns: Option<CampaignReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CampaignReport<'a> {
    pub search_ad_groups: &'a [AdGroupBucket],
    pub pmax_themes: &'a [Theme],
    pub shopping_bids: &'a ShoppingBids,
    pub shopping_overview: ShoppingOverview,
    pub budget: BudgetBreakdown,
}

impl<'a> PlanReport<'a> {
    pub fn new(wizard: &'a Wizard, filter: &KeywordFilter) -> anyhow::Result<Self> {
        let plan = plan_of(wizard)?;
        let campaigns = (wizard.step() == WizardStep::CampaignStructure).then(|| CampaignReport {
            search_ad_groups: &plan.search_ad_groups,
            pmax_themes: &plan.pmax_themes,
            shopping_bids: &plan.shopping_bids,
            shopping_overview: ShoppingOverview::from_bids(&plan.shopping_bids),
            budget: BudgetBreakdown::from_allocation(&plan.budgets),
        });

        Ok(Self {
            wizard_id: wizard.id(),
            step: wizard.step(),
            summary: plan.summary,
            keywords: filter.apply(plan.grouped_keywords()),
            campaigns,
        })
    }
}

pub fn plan_of(wizard: &Wizard) -> anyhow::Result<&SemPlanResult> {
    wizard.result().context("wizard finished without a plan")
}

/// One line per step, marking the current one.
pub fn stepper(current: WizardStep) -> String {
    let mut out = String::new();
    for step in WizardStep::ALL {
        let marker = if step == current {
            ">"
        } else if step.number() < current.number() {
            "x"
        } else {
            " "
        };
        let _ = writeln!(out, "[{marker}] {}. {}", step.number(), step.label());
    }
    out.push('\n');
    out
}

// ─── Keyword research ───────────────────────────────────────────────────────

pub fn keyword_research(plan: &SemPlanResult, filter: &KeywordFilter) -> String {
    let mut out = String::new();
    let summary = &plan.summary;

    let _ = writeln!(out, "== {} ==", WizardStep::KeywordResearch.label());
    let _ = writeln!(out, "Total keywords:      {}", summary.total_keywords);
    let _ = writeln!(out, "Total search volume: {}", summary.total_volume);
    let _ = writeln!(out, "Avg CPC:             ${:.2}", summary.avg_cpc);

    let competition = filter.competition.map_or("All", |c| c.label());
    let rows = filter.apply(plan.grouped_keywords());
    let _ = writeln!(
        out,
        "\nMin volume {} | Competition {} | {} keywords shown",
        filter.min_volume,
        competition,
        rows.len()
    );

    for keyword in rows {
        let _ = writeln!(out, "  {}", keyword_row(keyword));
    }
    out.push('\n');
    out
}

fn keyword_row(keyword: &KeywordIdea) -> String {
    let match_types: Vec<_> = keyword
        .match_type_suggestion
        .iter()
        .map(|m| m.label())
        .collect();
    format!(
        "{:<40} {:>7}  {:<6}  ${:.2} - ${:.2}  {:<20} {}",
        keyword.text,
        keyword.avg_monthly_searches,
        keyword.competition.label(),
        keyword.top_of_page_bid_low,
        keyword.top_of_page_bid_high,
        keyword.intent,
        match_types.join(", ")
    )
}

// ─── Campaign structure ─────────────────────────────────────────────────────

pub fn campaign_structure(plan: &SemPlanResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", WizardStep::CampaignStructure.label());

    let _ = writeln!(out, "\nSearch ad groups");
    for group in &plan.search_ad_groups {
        let _ = writeln!(out, "  {} ({} keywords)", group.name, group.keywords.len());
        let (shown, hidden) = research::preview(&group.keywords, AD_GROUP_PREVIEW);
        for keyword in shown {
            let _ = writeln!(out, "    - {}", keyword.text);
        }
        if hidden > 0 {
            let _ = writeln!(out, "    ... and {hidden} more");
        }
    }

    let _ = writeln!(out, "\nPerformance Max themes");
    for theme in &plan.pmax_themes {
        let (shown, hidden) = research::preview(&theme.keywords, THEME_PREVIEW);
        let texts: Vec<_> = shown.iter().map(|k| k.text.as_str()).collect();
        let _ = writeln!(
            out,
            "  {} [{}] volume {}",
            theme.name, theme.category, theme.total_volume
        );
        let more = if hidden > 0 {
            format!(" +{hidden} more")
        } else {
            String::new()
        };
        let _ = writeln!(out, "    {}{more}", texts.join(", "));
    }

    let overview = ShoppingOverview::from_bids(&plan.shopping_bids);
    let _ = writeln!(out, "\nShopping bids");
    let _ = writeln!(
        out,
        "  Target CPC ${:.2} | {} keywords | avg suggested ${:.2} | volume {}",
        plan.shopping_bids.target_cpc,
        overview.keyword_count,
        overview.avg_suggested_cpc,
        overview.total_volume
    );
    let (shown, hidden) = research::preview(&plan.shopping_bids.bids, SHOPPING_PREVIEW);
    for bid in shown {
        let (low, high) = display_range(bid);
        let _ = writeln!(
            out,
            "    {:<40} ${:.2}  (${low:.2} - ${high:.2})  {}",
            bid.text,
            bid.suggested_cpc,
            bid.competition.label()
        );
    }
    if hidden > 0 {
        let _ = writeln!(out, "    ... and {hidden} more");
    }

    let breakdown = BudgetBreakdown::from_allocation(&plan.budgets);
    let _ = writeln!(out, "\nBudget (total ${:.2})", breakdown.total);
    for channel in CampaignChannel::ALL {
        if let Some(share) = breakdown.share(channel) {
            let (min, max) = channel.recommended_share();
            let flag = if share.within_recommendation { "ok" } else { "review" };
            let _ = writeln!(
                out,
                "  {:<16} ${:>10.2}  {:>5.1}%  recommended {min:.0}-{max:.0}%  {flag}",
                channel.display_name(),
                share.amount,
                share.percentage
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sem_wizard::{MockPlanSource, RecordingNotifier, SetupForm};
    use std::time::Duration;

    async fn finished_wizard(proceed: bool) -> Wizard {
        let form = SetupForm {
            brand_website: "https://brand.example".to_string(),
            target_locations: "Mumbai".to_string(),
            ..Default::default()
        };
        let source = MockPlanSource::default().with_delay(Duration::ZERO);
        let mut wizard = Wizard::new();
        wizard
            .submit(&form, &source, &RecordingNotifier::new())
            .await
            .unwrap();
        if proceed {
            wizard.proceed().unwrap();
        }
        wizard
    }

    #[test]
    fn test_stepper_marks_progress() {
        let out = stepper(WizardStep::KeywordResearch);
        assert!(out.contains("[x] 1. Setup & Analysis"));
        assert!(out.contains("[>] 2. Keyword Research"));
        assert!(out.contains("[ ] 3. Campaign Structure"));
    }

    #[tokio::test]
    async fn test_keyword_research_applies_filter() {
        let wizard = finished_wizard(false).await;
        let plan = plan_of(&wizard).unwrap();
        let out = keyword_research(plan, &KeywordFilter::default());
        assert!(out.contains("Total keywords:      17"));
        assert!(out.contains("16 keywords shown"));
        assert!(!out.contains("buy protein powder in mumbai"));
    }

    #[tokio::test]
    async fn test_campaign_structure_previews() {
        let wizard = finished_wizard(true).await;
        let out = campaign_structure(plan_of(&wizard).unwrap());
        assert!(out.contains("Category Terms (9 keywords)"));
        assert!(out.contains("... and 4 more"));
        assert!(out.contains("Target CPC $1.13"));
        assert!(out.contains("... and 7 more"));
        assert!(out.contains("Performance Max"));
    }

    #[tokio::test]
    async fn test_json_report_by_step() {
        let wizard = finished_wizard(false).await;
        let report = PlanReport::new(&wizard, &KeywordFilter::default()).unwrap();
        assert!(report.campaigns.is_none());
        assert_eq!(report.keywords.len(), 16);

        let wizard = finished_wizard(true).await;
        let report = PlanReport::new(&wizard, &KeywordFilter::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["step"], "CampaignStructure");
        assert_eq!(json["campaigns"]["budget"]["total"], 4500.0);
    }

    #[test]
    fn test_plan_of_requires_result() {
        assert!(plan_of(&Wizard::new()).is_err());
    }
}
