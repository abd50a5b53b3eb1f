//! Construct catalog and scoring configuration.
//!
//! Construct membership is researcher-supplied configuration, not something
//! this pipeline infers: the item lists come out of an exploratory factor
//! analysis that lives outside this system and may change between analysis
//! revisions. Everything here is deserialized from a JSON config file and
//! validated against the table schema before any computation runs.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoreError};

/// A named set of item columns believed to measure one latent concept.
///
/// The composite score for a construct is the per-row mean over whichever
/// of its items are present for that row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Construct {
    /// Construct name; also the name of the appended composite column.
    pub name: String,
    /// Item column names. A single-item construct forwards that item.
    pub items: Vec<String>,
}

impl Construct {
    pub fn new(name: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }
}

/// The experimental condition column and its declared level labels.
///
/// Dummy coding appends one 0/1 indicator per non-reference level; the first
/// declared level is the reference. The motivating study uses a three-level
/// vignette condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSpec {
    /// Column holding the condition label for each respondent.
    pub column: String,
    /// Ordered level labels; `levels[0]` is the reference level.
    pub levels: Vec<String>,
}

impl ConditionSpec {
    /// Indicator column name for a level, e.g. `condition_blame`.
    pub fn indicator_name(&self, level: &str) -> String {
        format!("{}_{}", self.column, level)
    }

    /// Levels that receive an indicator column (all but the reference).
    pub fn coded_levels(&self) -> &[String] {
        if self.levels.is_empty() {
            &[]
        } else {
            &self.levels[1..]
        }
    }
}

/// Declared ordinal bounds for item responses (e.g. a 1-6 Likert range).
///
/// Used only by validation; scoring itself takes values as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl ScaleBounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Full scoring configuration for one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Constructs to score, in output order.
    pub constructs: Vec<Construct>,
    /// Columns to mean-impute before scoring. Only the scale the analysis
    /// explicitly chose to impute belongs here; everything else scores off
    /// the raw data.
    #[serde(default)]
    pub impute: Vec<String>,
    /// Experimental condition to dummy-code, if any.
    #[serde(default)]
    pub condition: Option<ConditionSpec>,
    /// Declared response bounds for item range validation.
    #[serde(default)]
    pub scale_bounds: Option<ScaleBounds>,
}

impl ScoringConfig {
    /// Check internal consistency: non-empty item lists, no duplicate
    /// construct names, no construct name colliding with its own items.
    ///
    /// Schema checks against an actual table happen in the validate crate;
    /// this only catches configs that are malformed on their own.
    pub fn check(&self) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        for construct in &self.constructs {
            if construct.name.trim().is_empty() {
                return Err(ScoreError::Config("construct with empty name".into()));
            }
            if construct.items.is_empty() {
                return Err(ScoreError::Config(format!(
                    "construct {} has no items",
                    construct.name
                )));
            }
            if !seen.insert(construct.name.as_str()) {
                return Err(ScoreError::Config(format!(
                    "duplicate construct name: {}",
                    construct.name
                )));
            }
        }
        if let Some(condition) = &self.condition {
            if condition.levels.len() < 2 {
                return Err(ScoreError::Config(format!(
                    "condition {} needs at least two levels",
                    condition.column
                )));
            }
        }
        if let Some(bounds) = &self.scale_bounds
            && bounds.min > bounds.max
        {
            return Err(ScoreError::Config(format!(
                "scale bounds inverted: min {} > max {}",
                bounds.min, bounds.max
            )));
        }
        Ok(())
    }

    /// Every column name the config references, deduplicated.
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut names = std::collections::BTreeSet::new();
        for construct in &self.constructs {
            for item in &construct.items {
                names.insert(item.as_str());
            }
        }
        for column in &self.impute {
            names.insert(column.as_str());
        }
        if let Some(condition) = &self.condition {
            names.insert(condition.column.as_str());
        }
        names.into_iter().collect()
    }
}
