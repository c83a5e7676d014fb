//! Budget split per campaign type and how it compares with the
//! recommended mix.

use sem_core::types::BudgetAllocation;
use serde::{Deserialize, Serialize};

/// Campaign types a budget is split across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignChannel {
    Shopping,
    Search,
    PerformanceMax,
}

impl CampaignChannel {
    pub const ALL: [CampaignChannel; 3] = [
        CampaignChannel::Shopping,
        CampaignChannel::Search,
        CampaignChannel::PerformanceMax,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CampaignChannel::Shopping => "Shopping",
            CampaignChannel::Search => "Search",
            CampaignChannel::PerformanceMax => "Performance Max",
        }
    }

    /// Recommended share of the total budget, in percent (inclusive).
    pub fn recommended_share(&self) -> (f64, f64) {
        match self {
            CampaignChannel::Search => (40.0, 50.0),
            CampaignChannel::Shopping => (30.0, 40.0),
            CampaignChannel::PerformanceMax => (20.0, 30.0),
        }
    }

    fn amount(&self, budgets: &BudgetAllocation) -> f64 {
        match self {
            CampaignChannel::Shopping => budgets.shopping,
            CampaignChannel::Search => budgets.search,
            CampaignChannel::PerformanceMax => budgets.pmax,
        }
    }
}

/// One row of the budget breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelShare {
    pub channel: CampaignChannel,
    pub amount: f64,
    pub percentage: f64,
    pub within_recommendation: bool,
}

/// Budget split with per-channel percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub total: f64,
    pub shares: Vec<ChannelShare>,
}

impl BudgetBreakdown {
    /// Percentages are 0 when the total is 0. Negative amounts are not
    /// rejected and flow through the arithmetic as-is.
    pub fn from_allocation(budgets: &BudgetAllocation) -> Self {
        let total = budgets.total();
        let shares = CampaignChannel::ALL
            .iter()
            .map(|channel| {
                let amount = channel.amount(budgets);
                let percentage = if total == 0.0 {
                    0.0
                } else {
                    amount / total * 100.0
                };
                let (min, max) = channel.recommended_share();
                ChannelShare {
                    channel: *channel,
                    amount,
                    percentage,
                    within_recommendation: (min..=max).contains(&percentage),
                }
            })
            .collect();

        Self { total, shares }
    }

    pub fn share(&self, channel: CampaignChannel) -> Option<&ChannelShare> {
        self.shares.iter().find(|s| s.channel == channel)
    }
}
