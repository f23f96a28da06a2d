//! Rule service: use-cases for managing AC rules.

use acrules_domain::defaults::{default_rules, rule_template};
use acrules_domain::error::{AcRulesError, NotFoundError, ValidationError};
use acrules_domain::id::RuleId;
use acrules_domain::rule::{NewRule, Rule, RulePatch};

use crate::ports::RuleRepository;

/// How many rules the store holds unless configured otherwise.
pub const DEFAULT_MAX_RULES: usize = 10;

/// Application service for rule CRUD operations.
pub struct RuleService<R> {
    repo: R,
    max_rules: usize,
}

impl<R: RuleRepository> RuleService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            max_rules: DEFAULT_MAX_RULES,
        }
    }

    /// Override the maximum number of stored rules.
    #[must_use]
    pub fn with_max_rules(mut self, max_rules: usize) -> Self {
        self.max_rules = max_rules;
        self
    }

    /// Borrow the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Create a new rule after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AcRulesError::Validation`] if invariants fail or the rule
    /// limit is reached, or a storage error propagated from the repository.
    #[tracing::instrument(skip(self, rule), fields(rule_name = %rule.name))]
    pub async fn create_rule(&self, rule: NewRule) -> Result<Rule, AcRulesError> {
        rule.validate()?;
        let Some(created) = self.repo.create_within_limit(rule, self.max_rules).await? else {
            return Err(ValidationError::RuleLimitReached {
                max: self.max_rules,
            }
            .into());
        };
        tracing::info!(rule_id = %created.id, "rule created");
        Ok(created)
    }

    /// Create a blank, disabled rule for the editor to fill in.
    ///
    /// # Errors
    ///
    /// Same as [`create_rule`](Self::create_rule).
    pub async fn create_from_template(&self) -> Result<Rule, AcRulesError> {
        self.create_rule(rule_template()).await
    }

    /// Look up a rule by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`AcRulesError::NotFound`] when no rule with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_rule(&self, id: RuleId) -> Result<Rule, AcRulesError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// List all rules in priority (id) order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rules(&self) -> Result<Vec<Rule>, AcRulesError> {
        self.repo.get_all().await
    }

    /// Replace an existing rule.
    ///
    /// # Errors
    ///
    /// Returns [`AcRulesError::Validation`] if invariants fail,
    /// [`AcRulesError::NotFound`] if the rule does not exist, or a storage error.
    #[tracing::instrument(skip(self, rule), fields(rule_id = %rule.id))]
    pub async fn update_rule(&self, rule: Rule) -> Result<Rule, AcRulesError> {
        rule.validate()?;
        self.get_rule(rule.id).await?;
        let updated = self.repo.update(rule).await?;
        tracing::info!("rule updated");
        Ok(updated)
    }

    /// Apply a partial update to an existing rule.
    ///
    /// # Errors
    ///
    /// Returns [`AcRulesError::NotFound`] if the rule does not exist,
    /// [`AcRulesError::Validation`] if the patched rule is invalid, or a
    /// storage error.
    #[tracing::instrument(skip(self, patch))]
    pub async fn patch_rule(&self, id: RuleId, patch: RulePatch) -> Result<Rule, AcRulesError> {
        let mut rule = self.get_rule(id).await?;
        patch.apply(&mut rule)?;
        let updated = self.repo.update(rule).await?;
        tracing::info!(enabled = updated.enabled, "rule patched");
        Ok(updated)
    }

    /// Delete a rule by id.
    ///
    /// # Errors
    ///
    /// Returns [`AcRulesError::NotFound`] if the rule does not exist, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_rule(&self, id: RuleId) -> Result<(), AcRulesError> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!("rule deleted");
        Ok(())
    }

    /// Insert the built-in starter rules when the store is empty.
    ///
    /// Returns how many rules were inserted.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn seed_defaults(&self) -> Result<usize, AcRulesError> {
        if self.repo.count().await? > 0 {
            return Ok(0);
        }
        let defaults = default_rules();
        let inserted = defaults.len();
        for rule in defaults {
            self.repo.create(rule).await?;
        }
        tracing::info!(count = inserted, "seeded default rules");
        Ok(inserted)
    }
}

fn not_found(id: RuleId) -> AcRulesError {
    NotFoundError {
        entity: "Rule",
        id: id.to_string(),
    }
    .into()
}
