//! The wizard state machine.
//!
//! Setup → KeywordResearch happens only when a generation succeeds;
//! KeywordResearch → CampaignStructure only on an explicit `proceed`.
//! CampaignStructure is terminal.

use crate::form::SetupForm;
use crate::notify::{Notification, Notifier};
use crate::source::PlanSource;
use sem_core::types::{PlanRequest, SemPlanResult};
use sem_core::{SemError, SemResult};
use sem_planner::research;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};
use uuid::Uuid;

pub const FAILURE_TITLE: &str = "Error";
pub const FAILURE_DESCRIPTION: &str = "Failed to generate SEM plan. Please try again.";
pub const SUCCESS_TITLE: &str = "Analysis Complete";

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    Setup,
    KeywordResearch,
    CampaignStructure,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::Setup,
        WizardStep::KeywordResearch,
        WizardStep::CampaignStructure,
    ];

    /// 1-based position shown in the stepper.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Setup => 1,
            WizardStep::KeywordResearch => 2,
            WizardStep::CampaignStructure => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Setup => "Setup & Analysis",
            WizardStep::KeywordResearch => "Keyword Research",
            WizardStep::CampaignStructure => "Campaign Structure",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Something that moves the wizard forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardAction {
    /// Setup -> KeywordResearch, after a successful generation
    Submit,
    /// KeywordResearch -> CampaignStructure
    Proceed,
}

impl fmt::Display for WizardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardAction::Submit => f.write_str("submit"),
            WizardAction::Proceed => f.write_str("proceed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

/// One wizard session. The plan result lives only as long as the session.
#[derive(Debug, Clone)]
pub struct Wizard {
    id: Uuid,
    step: WizardStep,
    result: Option<SemPlanResult>,
    pending: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            step: WizardStep::Setup,
            result: None,
            pending: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn result(&self) -> Option<&SemPlanResult> {
        self.result.as_ref()
    }

    /// True while a generation is in flight; the submit action is disabled.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Validate the form and mark a generation as in flight.
    ///
    /// Fails with `SubmissionPending` if one already is. Callers that drive
    /// the source themselves must hand the outcome to [`Wizard::finish_submit`].
    pub fn begin_submit(&mut self, form: &SetupForm) -> SemResult<PlanRequest> {
        Self::validate_transition(self.step, WizardAction::Submit)?;
        if self.pending {
            return Err(SemError::SubmissionPending);
        }
        form.validate()?;

        self.pending = true;
        Ok(form.to_request())
    }

    /// Apply a generation outcome. Success replaces any previous result
    /// and advances; failure keeps the wizard on Setup for a retry.
    pub fn finish_submit(
        &mut self,
        outcome: SemResult<SemPlanResult>,
        source: &impl PlanSource,
        notifier: &impl Notifier,
    ) -> SemResult<&SemPlanResult> {
        self.pending = false;

        match outcome {
            Ok(plan) => {
                let next = Self::validate_transition(self.step, WizardAction::Submit)?;
                notifier.notify(Notification::info(
                    SUCCESS_TITLE,
                    source.success_description(&plan),
                ));
                info!(
                    wizard_id = %self.id,
                    keywords = plan.keyword_ideas.len(),
                    ad_groups = plan.search_ad_groups.len(),
                    "SEM plan ready"
                );
                self.step = next;
                Ok(&*self.result.insert(plan))
            }
            Err(e) => {
                warn!(wizard_id = %self.id, error = %e, "SEM plan generation failed");
                notifier.notify(Notification::error(FAILURE_TITLE, FAILURE_DESCRIPTION));
                Err(e)
            }
        }
    }

    /// Validate, generate and apply in one go.
    pub async fn submit(
        &mut self,
        form: &SetupForm,
        source: &impl PlanSource,
        notifier: &impl Notifier,
    ) -> SemResult<&SemPlanResult> {
        let request = self.begin_submit(form)?;
        let outcome = source.generate(&request).await;
        self.finish_submit(outcome, source, notifier)
    }

    /// Move from keyword research to the campaign structure.
    pub fn proceed(&mut self) -> SemResult<WizardStep> {
        self.step = Self::validate_transition(self.step, WizardAction::Proceed)?;
        Ok(self.step)
    }

    /// Copy one ad group's keywords, newline separated.
    pub fn copy_ad_group(&self, name: &str, notifier: &impl Notifier) -> SemResult<String> {
        let plan = self
            .result
            .as_ref()
            .ok_or_else(|| SemError::Validation("no plan has been generated yet".to_string()))?;
        let group = plan
            .ad_group(name)
            .ok_or_else(|| SemError::Validation(format!("unknown ad group: {name}")))?;

        notifier.notify(Notification::info(
            "Copied to clipboard",
            format!("{} keywords copied successfully", group.keywords.len()),
        ));
        Ok(research::copy_keywords(&group.keywords))
    }

    /// Validate that `action` is allowed from `current` and return the target step.
    fn validate_transition(current: WizardStep, action: WizardAction) -> SemResult<WizardStep> {
        match (current, action) {
            (WizardStep::Setup, WizardAction::Submit) => Ok(WizardStep::KeywordResearch),
            (WizardStep::KeywordResearch, WizardAction::Proceed) => {
                Ok(WizardStep::CampaignStructure)
            }
            _ => Err(SemError::InvalidTransition {
                from: current.label().to_string(),
                action: action.to_string(),
            }),
        }
    }
}
