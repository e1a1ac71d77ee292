use super::rules::{Rule, RuleKind};
use super::types::{Highlight, HighlightSet, RuleId};
use crate::text::TextIndex;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("Rule '{rule}' references unknown rule '{missing}'")]
    UnknownRuleReference { rule: RuleId, missing: RuleId },
    #[error("Rule '{0}' is already registered")]
    DuplicateRule(RuleId),
    #[error("Rule '{0}' joins rule '{1}' with itself")]
    SelfJoin(RuleId, RuleId),
}

/// Ordered registry of rules.
///
/// Rules run in registration order and each one sees every highlight produced
/// before it. Join rules can therefore only reference rules registered
/// earlier, which is checked on [`Pipeline::register`].
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    rules: Vec<Rule>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, rule: Rule) -> Result<(), PipelineError> {
        if self.contains(rule.id.as_str()) {
            return Err(PipelineError::DuplicateRule(rule.id));
        }
        if let RuleKind::Proximity { first, second, .. } = &rule.kind
            && first == second
        {
            return Err(PipelineError::SelfJoin(rule.id.clone(), first.clone()));
        }
        if let Some(missing) = rule
            .upstream()
            .into_iter()
            .find(|upstream| !self.contains(upstream.as_str()))
        {
            return Err(PipelineError::UnknownRuleReference {
                rule: rule.id.clone(),
                missing: missing.clone(),
            });
        }

        log::debug!("Registered rule '{}'", rule.id);
        self.rules.push(rule);
        Ok(())
    }

    /// Builder-style [`Pipeline::register`].
    pub fn with_rule(mut self, rule: Rule) -> Result<Self, PipelineError> {
        self.register(rule)?;
        Ok(self)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn contains(&self, rule: &str) -> bool {
        self.rules.iter().any(|r| r.id.as_str() == rule)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule over `text` from scratch.
    pub fn run(&self, text: &str) -> HighlightSet {
        let index = TextIndex::new(text);
        let mut highlights: Vec<Highlight> = Vec::new();

        for rule in &self.rules {
            let produced = rule.run(&index, &highlights);
            log::debug!("Rule '{}' produced {} highlights", rule.id, produced.len());
            highlights.extend(produced);
        }

        HighlightSet::from(highlights)
    }
}
