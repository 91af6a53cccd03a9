//! Prompt templates for the text-generation service
//!
//! Templates live in a [`PromptRegistry`] under `estate.*` names. The
//! functions here turn scored locations into the variables those templates
//! expect; only the rendered text ever leaves the crate.

mod facts;
mod templates;

pub use facts::location_facts;
pub use templates::*;

use crate::error::{AnalysisError, Result};
use crate::model::ScoredLocation;
use estate_prompt::PromptRegistry;
use serde_json::{Value, json};
use std::fmt;

/// Register all location prompts with the given registry
pub fn register_prompts(registry: &PromptRegistry) -> estate_prompt::Result<()> {
    registry.register(system_prompt()?);
    registry.register(detailed_analysis_prompt()?);
    registry.register(investment_focus_prompt()?);
    registry.register(family_focus_prompt()?);
    registry.register(custom_focus_prompt()?);
    registry.register(comparative_prompt()?);
    registry.register(market_insights_prompt()?);
    registry.register(investment_strategy_prompt()?);
    Ok(())
}

/// A registry holding every location prompt
pub fn default_registry() -> estate_prompt::Result<PromptRegistry> {
    let registry = PromptRegistry::new();
    register_prompts(&registry)?;
    Ok(registry)
}

/// Which single-location analysis to ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    DetailedAnalysis,
    InvestmentFocus,
    FamilyFocus,
    /// Free-form focus supplied by the caller
    Custom(String),
}

impl PromptKind {
    /// Parse an analysis type name; unknown names fall back to a detailed analysis
    pub fn parse(kind: &str) -> Self {
        match kind.trim().to_ascii_lowercase().as_str() {
            "investment" | "investment_focus" => Self::InvestmentFocus,
            "family" | "family_focus" => Self::FamilyFocus,
            _ => Self::DetailedAnalysis,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::DetailedAnalysis => "detailed_analysis",
            Self::InvestmentFocus => "investment_focus",
            Self::FamilyFocus => "family_focus",
            Self::Custom(_) => "custom_focus",
        }
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            Self::DetailedAnalysis => DETAILED_ANALYSIS,
            Self::InvestmentFocus => INVESTMENT_FOCUS,
            Self::FamilyFocus => FAMILY_FOCUS,
            Self::Custom(_) => CUSTOM_FOCUS,
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Template variables for a single-location prompt
pub fn location_context(location: &ScoredLocation, kind: &PromptKind) -> Value {
    let r = &location.record;
    let mut vars = json!({
        "location": r.location,
        "facts": location_facts(location),
        "investment_score": r.investment_score,
        "price": r.avg_price_per_sqft,
        "rental_yield": r.rental_yield,
        "appreciation_rate": r.appreciation_rate,
        "future_growth": r.future_growth.as_str(),
        "connectivity_score": r.connectivity_score,
        "safety_score": r.safety_score,
        "schools": r.schools,
        "hospitals": r.hospitals,
        "traffic_score": r.traffic_score,
        "environment_score": r.environment_score,
        "lifestyle_score": r.lifestyle_score,
    });
    if let PromptKind::Custom(focus) = kind {
        vars["focus"] = Value::String(focus.trim().to_string());
    }
    vars
}

pub fn render_location(
    registry: &PromptRegistry,
    location: &ScoredLocation,
    kind: &PromptKind,
) -> Result<String> {
    if let PromptKind::Custom(focus) = kind {
        if focus.trim().is_empty() {
            return Err(AnalysisError::InvalidFilter(
                "custom focus must not be blank".to_string(),
            ));
        }
    }
    Ok(registry.render(kind.template_name(), &location_context(location, kind))?)
}

/// Comparison prompt over two or more locations
pub fn render_comparative(registry: &PromptRegistry, locations: &[&ScoredLocation]) -> Result<String> {
    if locations.len() < 2 {
        return Err(AnalysisError::InsufficientInputs {
            resolved: locations.len(),
            unresolved: Vec::new(),
        });
    }

    let entries: Vec<Value> = locations
        .iter()
        .map(|l| {
            json!({
                "location": l.record.location,
                "safety_score": l.record.safety_score,
                "price": l.record.avg_price_per_sqft,
                "investment_score": l.record.investment_score,
                "future_growth": l.record.future_growth.as_str(),
                "schools": l.record.schools,
                "connectivity_score": l.record.connectivity_score,
            })
        })
        .collect();

    Ok(registry.render(COMPARATIVE, &json!({ "locations": entries }))?)
}

pub fn render_market_insights(registry: &PromptRegistry, city: Option<&str>) -> Result<String> {
    let city = city.map(str::trim).filter(|c| !c.is_empty());
    Ok(registry.render(MARKET_INSIGHTS, &json!({ "city": city }))?)
}

/// Investor tier by budget in rupees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetCategory {
    High,
    Medium,
    EntryLevel,
}

impl BudgetCategory {
    pub fn from_budget(budget: f64) -> Self {
        if budget > 50_000_000.0 {
            Self::High
        } else if budget > 20_000_000.0 {
            Self::Medium
        } else {
            Self::EntryLevel
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::EntryLevel => "Entry Level",
        }
    }
}

pub fn render_investment_strategy(
    registry: &PromptRegistry,
    budget: f64,
    goals: &str,
) -> Result<String> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(AnalysisError::InvalidFilter(format!(
            "budget must be positive, got {budget}"
        )));
    }
    let goals = match goals.trim() {
        "" => "balanced growth",
        g => g,
    };

    Ok(registry.render(
        INVESTMENT_STRATEGY,
        &json!({
            "budget": budget.round(),
            "budget_category": BudgetCategory::from_budget(budget).as_str(),
            "goals": goals,
        }),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn registry() -> PromptRegistry {
        default_registry().unwrap()
    }

    #[test]
    fn test_register_all_prompts() {
        let registry = registry();
        assert_eq!(registry.len(), 8);
        for name in [
            SYSTEM,
            DETAILED_ANALYSIS,
            INVESTMENT_FOCUS,
            FAMILY_FOCUS,
            CUSTOM_FOCUS,
            COMPARATIVE,
            MARKET_INSIGHTS,
            INVESTMENT_STRATEGY,
        ] {
            assert!(registry.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_detailed_analysis_prompt() {
        let store = fixtures::store();
        let satellite = store.get("Satellite, Ahmedabad").unwrap();
        let prompt = render_location(&registry(), satellite, &PromptKind::DetailedAnalysis).unwrap();

        assert!(prompt.starts_with(
            "As a real estate expert and urban planner, provide a comprehensive analysis of Satellite, Ahmedabad."
        ));
        assert!(prompt.contains("Location Data:\n• City: Ahmedabad\n• Area: Satellite\n"));
        assert!(prompt.contains("• Average Price per Sq Ft: ₹7,200\n"));
        assert!(prompt.contains("7. **Actionable Recommendations**"));
    }

    #[test]
    fn test_focused_prompts() {
        let store = fixtures::store();
        let gift = store.get("Gift City, Gandhinagar").unwrap();
        let registry = registry();

        let investment = render_location(&registry, gift, &PromptKind::InvestmentFocus).unwrap();
        assert!(investment.contains("• Current Price: ₹9,500/sq ft"));
        assert!(investment.contains("• Growth Potential: High"));

        let family = render_location(&registry, gift, &PromptKind::FamilyFocus).unwrap();
        assert!(family.contains("• Number of Schools: 6"));
        assert!(family.contains("(lower is better)"));

        let custom = PromptKind::Custom("rental demand from IT workers".to_string());
        let text = render_location(&registry, gift, &custom).unwrap();
        assert!(text.starts_with(
            "As a real estate expert, analyze Gift City, Gandhinagar with focus on: rental demand from IT workers"
        ));

        let blank = PromptKind::Custom("  ".to_string());
        assert!(matches!(
            render_location(&registry, gift, &blank),
            Err(AnalysisError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_prompt_kind_parse() {
        assert_eq!(PromptKind::parse("investment_focus"), PromptKind::InvestmentFocus);
        assert_eq!(PromptKind::parse("Family"), PromptKind::FamilyFocus);
        assert_eq!(PromptKind::parse("whatever"), PromptKind::DetailedAnalysis);
    }

    #[test]
    fn test_comparative_prompt() {
        let store = fixtures::store();
        let picks: Vec<&ScoredLocation> = ["Bopal, Ahmedabad", "Sector 21, Gandhinagar"]
            .iter()
            .map(|n| store.get(n).unwrap())
            .collect();
        let prompt = render_comparative(&registry(), &picks).unwrap();

        assert!(prompt.contains("comparison of these 2 locations"));
        assert!(prompt.contains("**Bopal, Ahmedabad:**\n• Safety: 8.0/10\n• Price: ₹4,800/sq ft"));
        assert!(prompt.contains("**Sector 21, Gandhinagar:**"));

        assert!(matches!(
            render_comparative(&registry(), &picks[..1]),
            Err(AnalysisError::InsufficientInputs { resolved: 1, .. })
        ));
    }

    #[test]
    fn test_market_and_strategy_prompts() {
        let registry = registry();
        let default = render_market_insights(&registry, None).unwrap();
        assert!(default.contains("about the Ahmedabad and Gandhinagar real estate markets:"));
        let city = render_market_insights(&registry, Some("Gandhinagar")).unwrap();
        assert!(city.contains("about the Gandhinagar real estate market:"));

        let strategy = render_investment_strategy(&registry, 25_000_000.0, "").unwrap();
        assert!(strategy.contains("• Budget: ₹25,000,000 (Medium investor)"));
        assert!(strategy.contains("• Goals: balanced growth"));
        assert!(render_investment_strategy(&registry, 0.0, "growth").is_err());
    }

    #[test]
    fn test_budget_tiers() {
        assert_eq!(BudgetCategory::from_budget(50_000_001.0), BudgetCategory::High);
        assert_eq!(BudgetCategory::from_budget(50_000_000.0), BudgetCategory::Medium);
        assert_eq!(BudgetCategory::from_budget(20_000_000.0), BudgetCategory::EntryLevel);
    }
}
