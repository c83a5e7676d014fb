//! Performance Max theme aggregation.
//!
//! Unlike ad-group classification, themes may share keywords.

use sem_core::types::{KeywordIdea, Theme, ThemeCategory};

/// A named theme and the substrings that pull a keyword into it.
#[derive(Debug, Clone, Copy)]
pub struct ThemeDefinition {
    pub name: &'static str,
    pub category: ThemeCategory,
    pub triggers: &'static [&'static str],
}

impl ThemeDefinition {
    pub fn matches(&self, lowercase_text: &str) -> bool {
        self.triggers.iter().any(|t| lowercase_text.contains(t))
    }
}

/// All theme definitions, grouped by category in canonical order.
pub const THEME_DEFINITIONS: [ThemeDefinition; 12] = [
    ThemeDefinition {
        name: "Vegan Protein Powder",
        category: ThemeCategory::ProductCategory,
        triggers: &["vegan", "plant", "plant based"],
    },
    ThemeDefinition {
        name: "Whey Protein Supplements",
        category: ThemeCategory::ProductCategory,
        triggers: &["whey", "casein", "isolate"],
    },
    ThemeDefinition {
        name: "Organic & Natural Products",
        category: ThemeCategory::ProductCategory,
        triggers: &["organic", "natural", "grass fed"],
    },
    ThemeDefinition {
        name: "Post-Workout Recovery Drinks",
        category: ThemeCategory::UseCaseBased,
        triggers: &["post workout", "recovery", "after gym"],
    },
    ThemeDefinition {
        name: "Weight Management Solutions",
        category: ThemeCategory::UseCaseBased,
        triggers: &["weight", "lean", "fat loss"],
    },
    ThemeDefinition {
        name: "Muscle Building Nutrition",
        category: ThemeCategory::UseCaseBased,
        triggers: &["muscle", "mass", "strength"],
    },
    ThemeDefinition {
        name: "For Busy Professionals",
        category: ThemeCategory::Demographic,
        triggers: &["quick", "convenient", "on the go"],
    },
    ThemeDefinition {
        name: "Women's Fitness Nutrition",
        category: ThemeCategory::Demographic,
        triggers: &["women", "female", "lady"],
    },
    ThemeDefinition {
        name: "Senior Health & Wellness",
        category: ThemeCategory::Demographic,
        triggers: &["senior", "elderly", "age"],
    },
    ThemeDefinition {
        name: "Back to School Wellness",
        category: ThemeCategory::SeasonalEventBased,
        triggers: &["student", "school", "college"],
    },
    ThemeDefinition {
        name: "New Year Fitness Goals",
        category: ThemeCategory::SeasonalEventBased,
        triggers: &["resolution", "new year", "goal"],
    },
    ThemeDefinition {
        name: "Summer Body Preparation",
        category: ThemeCategory::SeasonalEventBased,
        triggers: &["summer", "beach", "vacation"],
    },
];

/// Category a theme name belongs to, if it is one of ours.
pub fn category_of(theme_name: &str) -> Option<ThemeCategory> {
    THEME_DEFINITIONS
        .iter()
        .find(|d| d.name == theme_name)
        .map(|d| d.category)
}

/// Build themes for the selected categories (all of them when `selected`
/// is empty). Themes without keywords are dropped.
pub fn aggregate(keywords: &[KeywordIdea], selected: &[ThemeCategory]) -> Vec<Theme> {
    let lowered: Vec<String> = keywords.iter().map(KeywordIdea::lowercase_text).collect();

    THEME_DEFINITIONS
        .iter()
        .filter(|d| selected.is_empty() || selected.contains(&d.category))
        .filter_map(|definition| {
            let matched: Vec<KeywordIdea> = keywords
                .iter()
                .zip(&lowered)
                .filter(|(_, text)| definition.matches(text))
                .map(|(k, _)| k.clone())
                .collect();

            if matched.is_empty() {
                return None;
            }

            let total_volume = matched.iter().map(|k| k.avg_monthly_searches).sum();
            Some(Theme {
                name: definition.name.to_string(),
                category: definition.category,
                keywords: matched,
                total_volume,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use proptest::prelude::*;
    use sem_core::types::{Competition, MatchType};

    fn idea(text: &str, volume: u64) -> KeywordIdea {
        KeywordIdea {
            text: text.to_string(),
            avg_monthly_searches: volume,
            top_of_page_bid_low: 0.5,
            top_of_page_bid_high: 1.5,
            competition: Competition::Low,
            intent: "Commercial".to_string(),
            match_type_suggestion: vec![MatchType::Phrase],
            seed_match_score: 1,
            location: None,
        }
    }

    fn names(themes: &[Theme]) -> Vec<&str> {
        themes.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_all_categories_when_selection_empty() {
        let themes = aggregate(&catalog::keyword_ideas(), &[]);
        assert_eq!(
            names(&themes),
            vec![
                "Vegan Protein Powder",
                "Whey Protein Supplements",
                "Organic & Natural Products",
                "Weight Management Solutions",
                "Women's Fitness Nutrition",
            ]
        );

        let whey = &themes[1];
        assert_eq!(whey.keywords.len(), 3);
        assert_eq!(whey.total_volume, 8900 + 4200 + 5100);
    }

    #[test]
    fn test_demographic_only() {
        let themes = aggregate(&catalog::keyword_ideas(), &[ThemeCategory::Demographic]);
        assert_eq!(names(&themes), vec!["Women's Fitness Nutrition"]);
        assert!(themes.iter().all(|t| t.category == ThemeCategory::Demographic));
        assert_eq!(themes[0].total_volume, 9300);
    }

    #[test]
    fn test_selection_order_does_not_change_output_order() {
        let keywords = catalog::keyword_ideas();
        let a = aggregate(
            &keywords,
            &[ThemeCategory::Demographic, ThemeCategory::ProductCategory],
        );
        let b = aggregate(
            &keywords,
            &[ThemeCategory::ProductCategory, ThemeCategory::Demographic],
        );
        assert_eq!(a, b);
        assert_eq!(a.last().map(|t| t.name.as_str()), Some("Women's Fitness Nutrition"));
    }

    #[test]
    fn test_keyword_can_join_several_themes() {
        let keywords = vec![idea("organic whey for women", 100)];
        let themes = aggregate(&keywords, &[]);
        assert_eq!(
            names(&themes),
            vec![
                "Whey Protein Supplements",
                "Organic & Natural Products",
                "Women's Fitness Nutrition",
            ]
        );
    }

    #[test]
    fn test_age_trigger_is_a_plain_substring() {
        let themes = aggregate(&[idea("protein powder storage", 50)], &[]);
        assert_eq!(names(&themes), vec!["Senior Health & Wellness"]);
    }

    #[test]
    fn test_seasonal_only_empty_for_catalog() {
        let themes = aggregate(
            &catalog::keyword_ideas(),
            &[ThemeCategory::SeasonalEventBased],
        );
        assert!(themes.is_empty());
    }

    #[test]
    fn test_category_of() {
        assert_eq!(
            category_of("Summer Body Preparation"),
            Some(ThemeCategory::SeasonalEventBased)
        );
        assert_eq!(category_of("Unknown Theme"), None);
    }

    proptest! {
        #[test]
        fn no_theme_is_ever_empty(
            texts in prop::collection::vec("[a-z ]{0,30}", 0..30),
            mask in 0u8..16,
        ) {
            let keywords: Vec<KeywordIdea> =
                texts.iter().map(|t| idea(t, 10)).collect();
            let selected: Vec<ThemeCategory> = ThemeCategory::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, c)| c)
                .collect();

            for theme in aggregate(&keywords, &selected) {
                prop_assert!(!theme.keywords.is_empty());
                prop_assert_eq!(theme.total_volume, theme.keywords.len() as u64 * 10);
                prop_assert!(selected.is_empty() || selected.contains(&theme.category));
            }
        }
    }
}
