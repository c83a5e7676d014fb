//! Setup-step form model and validation.

use sem_core::types::{BudgetAllocation, PlanRequest, ThemeCategory};
use sem_core::wire::{split_locations, BudgetAllocations, GenerateSemPlanRequest};
use sem_core::{SemError, SemResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// Inputs collected on the setup step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupForm {
    pub brand_website: String,
    pub competitor_website: String,
    /// Comma-separated, as typed.
    pub target_locations: String,
    /// Free-form seed themes sent to the remote service.
    pub seed_themes: Vec<String>,
    /// Empty means every category.
    pub theme_categories: Vec<ThemeCategory>,
    pub budgets: BudgetAllocation,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            brand_website: String::new(),
            competitor_website: String::new(),
            target_locations: "Mumbai, Delhi".to_string(),
            seed_themes: vec!["protein powder".to_string(), "fitness supplements".to_string()],
            theme_categories: Vec::new(),
            budgets: BudgetAllocation::new(1000.0, 2000.0, 1500.0),
        }
    }
}

impl SetupForm {
    pub fn locations(&self) -> Vec<String> {
        split_locations(&self.target_locations)
    }

    /// Check or uncheck a theme category. Re-checking is a no-op.
    pub fn toggle_category(&mut self, category: ThemeCategory, checked: bool) {
        if checked {
            if !self.theme_categories.contains(&category) {
                self.theme_categories.push(category);
            }
        } else {
            self.theme_categories.retain(|c| *c != category);
        }
    }

    /// The submit action is available once a brand URL and at least one
    /// location are present.
    pub fn can_submit(&self) -> bool {
        !self.brand_website.trim().is_empty() && !self.locations().is_empty()
    }

    pub fn validate(&self) -> SemResult<()> {
        let brand = self.brand_website.trim();
        if brand.is_empty() {
            return Err(SemError::Validation("brand website URL is required".to_string()));
        }
        parse_web_url(brand, "brand website")?;

        let competitor = self.competitor_website.trim();
        if !competitor.is_empty() {
            parse_web_url(competitor, "competitor website")?;
        }

        if self.locations().is_empty() {
            return Err(SemError::Validation(
                "at least one target location is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_request(&self) -> PlanRequest {
        let competitor = self.competitor_website.trim();
        PlanRequest {
            brand_url: self.brand_website.trim().to_string(),
            competitor_url: (!competitor.is_empty()).then(|| competitor.to_string()),
            locations: self.locations(),
            budgets: self.budgets,
            theme_categories: self.theme_categories.clone(),
            seed_themes: self.seed_themes.clone(),
        }
    }

    pub fn to_wire(&self) -> GenerateSemPlanRequest {
        wire_request(&self.to_request())
    }
}

/// Remote request body for a plan request.
pub fn wire_request(request: &PlanRequest) -> GenerateSemPlanRequest {
    GenerateSemPlanRequest {
        brand_website: request.brand_url.clone(),
        competitor_website: request.competitor_url.clone().unwrap_or_default(),
        target_locations: request.locations.join(", "),
        themes: request.seed_themes.clone(),
        budget_allocations: BudgetAllocations {
            cap: request.budgets.shopping,
            bud: request.budgets.search,
            pmax: request.budgets.pmax,
        },
    }
}

fn parse_web_url(raw: &str, field: &str) -> SemResult<Url> {
    let url = Url::parse(raw)
        .map_err(|e| SemError::Validation(format!("{field} is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SemError::Validation(format!(
            "{field} must use http or https, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SetupForm {
        SetupForm {
            brand_website: "https://brand.example".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let form = SetupForm::default();
        assert_eq!(form.locations(), vec!["Mumbai", "Delhi"]);
        assert_eq!(form.budgets.total(), 4500.0);
        assert!(!form.can_submit());
    }

    #[test]
    fn test_validate_requires_brand_and_locations() {
        assert!(matches!(
            SetupForm::default().validate(),
            Err(SemError::Validation(_))
        ));

        let mut form = filled();
        assert!(form.validate().is_ok());

        form.target_locations = " , ".to_string();
        assert!(!form.can_submit());
        assert!(matches!(form.validate(), Err(SemError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut form = filled();
        form.brand_website = "not a url".to_string();
        assert!(form.validate().is_err());

        form.brand_website = "ftp://brand.example".to_string();
        assert!(form.validate().is_err());

        form.brand_website = "https://brand.example".to_string();
        form.competitor_website = "rival".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_toggle_category() {
        let mut form = filled();
        form.toggle_category(ThemeCategory::Demographic, true);
        form.toggle_category(ThemeCategory::Demographic, true);
        form.toggle_category(ThemeCategory::SeasonalEventBased, false);
        assert_eq!(form.theme_categories, vec![ThemeCategory::Demographic]);

        form.toggle_category(ThemeCategory::Demographic, false);
        assert!(form.theme_categories.is_empty());
    }

    #[test]
    fn test_to_request_and_wire() {
        let mut form = filled();
        form.target_locations = "Mumbai,  Pune".to_string();
        form.competitor_website = "  ".to_string();
        let request = form.to_request();
        assert_eq!(request.locations, vec!["Mumbai", "Pune"]);
        assert_eq!(request.competitor_url, None);

        let wire = form.to_wire();
        assert_eq!(wire, wire_request(&request));
        assert_eq!(wire.target_locations, "Mumbai, Pune");
        assert_eq!(wire.competitor_website, "");
        assert_eq!(wire.budget_allocations.cap, 1000.0);
        assert_eq!(wire.budget_allocations.bud, 2000.0);
        assert_eq!(wire.themes, vec!["protein powder", "fitness supplements"]);
    }
}
