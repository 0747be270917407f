//! Widget configuration surface.
//!
//! # Design
//! - Every field has a serde default so hosts only spell out what they change.
//! - Validation runs once after parsing; widgets assume validated input.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::poll::{PollOption, PollTally};

/// How wizard progress is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStyle {
    /// Single filled bar.
    #[default]
    Line,
    /// One segment per step with its label underneath.
    Dots,
}

/// Presentation options for the multi-step form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Heading shown above the progress indicator.
    pub heading: String,
    /// Label of the advance button.
    pub continue_label: String,
    /// Label of the retreat button.
    pub back_label: String,
    /// Label of the final button.
    pub submit_label: String,
    /// Progress indicator style.
    pub progress_style: ProgressStyle,
    /// Whether the progress indicator is drawn at all.
    pub show_progress: bool,
    /// Disable every navigation button.
    pub read_only: bool,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            heading: String::new(),
            continue_label: "Continue".to_string(),
            back_label: "Back".to_string(),
            submit_label: "Submit".to_string(),
            progress_style: ProgressStyle::Line,
            show_progress: true,
            read_only: false,
        }
    }
}

/// One option entry in a poll definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOptionConfig {
    /// Option identifier.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Starting count.
    #[serde(default)]
    pub votes: u64,
}

/// Poll definition supplied by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Poll identifier; also namespaces the persisted snapshot.
    pub id: String,
    /// Optional question or heading.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional supporting text.
    #[serde(default)]
    pub description: Option<String>,
    /// Options in display order.
    pub options: Vec<PollOptionConfig>,
    /// Allow additional votes after the first.
    #[serde(default)]
    pub allow_revote: bool,
    /// Show percentages before voting.
    #[serde(default)]
    pub show_results_before_vote: bool,
    /// Ignore every vote.
    #[serde(default)]
    pub read_only: bool,
}

impl PollConfig {
    /// Parse and validate a JSON poll definition.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidField`] when validation fails.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Check identifiers and option uniqueness.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidField`] naming the first failing field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.id.trim().is_empty() {
            return Err(invalid("id", "must not be empty", None));
        }
        if self.options.is_empty() {
            return Err(invalid("options", "at least one option is required", None));
        }
        let mut seen = HashSet::new();
        for option in &self.options {
            if option.id.trim().is_empty() {
                return Err(invalid("options.id", "must not be empty", None));
            }
            if !seen.insert(option.id.as_str()) {
                return Err(invalid(
                    "options.id",
                    "must be unique",
                    Some(option.id.clone()),
                ));
            }
        }
        Ok(())
    }

    /// Build a tally carrying this definition's options and flags.
    #[must_use]
    pub fn build_tally(&self) -> PollTally {
        let options = self
            .options
            .iter()
            .map(|option| PollOption::new(option.id.clone(), option.label.clone(), option.votes))
            .collect();
        PollTally::new(self.id.clone(), options)
            .with_revote(self.allow_revote)
            .with_results_before_vote(self.show_results_before_vote)
            .with_read_only(self.read_only)
    }
}

fn invalid(field: &'static str, reason: &'static str, value: Option<String>) -> ConfigError {
    ConfigError::InvalidField {
        field,
        reason,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wizard_defaults_match_button_labels() -> anyhow::Result<()> {
        let config: WizardConfig = serde_json::from_str(r#"{"progress_style":"dots"}"#)?;
        assert_eq!(config.continue_label, "Continue");
        assert_eq!(config.back_label, "Back");
        assert_eq!(config.submit_label, "Submit");
        assert_eq!(config.progress_style, ProgressStyle::Dots);
        assert!(config.show_progress);
        Ok(())
    }

    #[test]
    fn poll_config_builds_tally() -> anyhow::Result<()> {
        let config = PollConfig::from_json_str(
            r#"{"id":"demo","options":[{"id":"a","label":"A","votes":3},{"id":"b","label":"B"}],"allow_revote":true}"#,
        )?;
        let tally = config.build_tally();
        assert_eq!(tally.total(), 3);
        assert!(tally.allows_revote());
        assert!(!tally.is_read_only());
        Ok(())
    }

    #[test]
    fn duplicate_option_ids_are_rejected() {
        let err = PollConfig::from_json_str(
            r#"{"id":"demo","options":[{"id":"a","label":"A"},{"id":"a","label":"B"}]}"#,
        )
        .expect_err("duplicate ids");
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "options.id",
                reason: "must be unique",
                ..
            }
        ));
    }

    #[test]
    fn empty_poll_is_rejected() {
        let config = PollConfig {
            id: "demo".to_string(),
            title: None,
            description: None,
            options: Vec::new(),
            allow_revote: false,
            show_results_before_vote: false,
            read_only: false,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidField {
                field: "options",
                ..
            })
        ));
    }

    #[test]
    fn negative_counts_fail_to_parse() {
        let err = PollConfig::from_json_str(
            r#"{"id":"demo","options":[{"id":"a","label":"A","votes":-1}]}"#,
        )
        .expect_err("negative count");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
