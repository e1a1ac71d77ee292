use anyhow::{Context, Result};
use marginalia_config::{Config, Enrich, LayoutSettings, RuleSettings};
use marginalia_engine::highlight::presets;
use marginalia_engine::{Enrichment, LayoutConfig, Pipeline, Rule};

/// Builds the highlighter from configured rules, falling back to the
/// built-in recipe preset when no rules are configured.
pub fn build_pipeline(config: Option<&Config>) -> Result<Pipeline> {
    let rules = config.map(|c| c.rules.as_slice()).unwrap_or_default();
    if rules.is_empty() {
        log::info!("No rules configured, using the recipe preset");
        return Ok(presets::recipe()?);
    }

    let mut pipeline = Pipeline::new();
    for settings in rules {
        let rule = to_rule(settings)?;
        pipeline
            .register(rule)
            .with_context(|| format!("Invalid rule '{}'", settings.id()))?;
    }
    Ok(pipeline)
}

fn to_rule(settings: &RuleSettings) -> Result<Rule> {
    let rule = match settings {
        RuleSettings::List { id, .. } => Rule::list(id.as_str(), settings.list_terms()?),
        RuleSettings::Pattern {
            id,
            pattern,
            enrich,
        } => {
            let rule = Rule::pattern(id.as_str(), pattern);
            match enrich {
                Some(Enrich::Quantity) => rule.with_enrichment(Enrichment::Quantity),
                Some(Enrich::Captures) => rule.with_enrichment(Enrichment::Captures),
                None => rule,
            }
        }
        RuleSettings::Proximity {
            id,
            first,
            second,
            max_distance,
        } => Rule::proximity(id.as_str(), first.as_str(), second.as_str(), *max_distance),
        RuleSettings::CoOccurrence { id, rules } => {
            Rule::co_occurrence(id.as_str(), rules.iter().map(String::as_str))
        }
    };
    Ok(rule)
}

pub fn layout(settings: &LayoutSettings) -> LayoutConfig {
    LayoutConfig {
        token_width: settings.token_width,
        token_height: settings.token_height,
        token_gap: settings.token_gap,
        group_width: settings.group_width,
        collapsed_stack_height: settings.collapsed_stack_height,
    }
}
