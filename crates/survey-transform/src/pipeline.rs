//! Explicit stage pipeline for one scoring run.
//!
//! The analysis this system replaces rebound a single shared dataset across
//! many in-place mutation steps. Here each stage takes a frame value and
//! returns a new one, so ordering is explicit: imputation runs first (and
//! only for the columns the config lists), then condition dummy coding,
//! then one scoring stage per construct. Composites are therefore computed
//! from raw data except where imputation was explicitly requested, and no
//! column is ever imputed twice.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use survey_model::{Construct, Result, ScoringConfig};

use crate::dummy::dummy_code;
use crate::frame::SurveyFrame;
use crate::impute::{ColumnImputation, impute_mean};
use crate::score::append_composite;

/// A single pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stage {
    /// Mean-impute the listed columns.
    Impute { columns: Vec<String> },
    /// Dummy-code the experimental condition.
    DummyCode,
    /// Append the composite column for one construct.
    Score { construct: Construct },
}

impl Stage {
    /// Human-readable stage name for logs and summaries.
    pub fn display_name(&self) -> String {
        match self {
            Self::Impute { columns } => format!("impute {} column(s)", columns.len()),
            Self::DummyCode => "dummy-code condition".to_string(),
            Self::Score { construct } => format!("score {}", construct.name),
        }
    }
}

/// Audit trail produced by one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineAudit {
    /// Per-column imputation records.
    pub imputations: Vec<ColumnImputation>,
    /// Names of appended indicator columns.
    pub indicators: Vec<String>,
    /// Names of appended composite columns, in output order.
    pub composites: Vec<String>,
}

/// Ordered stage list derived from a scoring configuration.
#[derive(Debug, Clone)]
pub struct ScoringPipeline {
    config: ScoringConfig,
    stages: Vec<Stage>,
}

impl ScoringPipeline {
    /// Derive the stage list from a config.
    ///
    /// The config must already pass [`ScoringConfig::check`]; schema checks
    /// against the actual frame belong to the validate crate and run before
    /// this pipeline executes.
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        config.check()?;
        let mut stages = Vec::new();
        if !config.impute.is_empty() {
            stages.push(Stage::Impute {
                columns: config.impute.clone(),
            });
        }
        if config.condition.is_some() {
            stages.push(Stage::DummyCode);
        }
        for construct in &config.constructs {
            stages.push(Stage::Score {
                construct: construct.clone(),
            });
        }
        Ok(Self {
            config: config.clone(),
            stages,
        })
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run all stages, threading the frame through as a value.
    pub fn execute(&self, frame: &SurveyFrame) -> Result<(SurveyFrame, PipelineAudit)> {
        let mut current = frame.clone();
        let mut audit = PipelineAudit::default();
        for stage in &self.stages {
            debug!(stage = %stage.display_name(), "running stage");
            match stage {
                Stage::Impute { columns } => {
                    let (data, imputations) = impute_mean(&current.data, columns)?;
                    audit.imputations = imputations;
                    current = current.with_data(data);
                }
                Stage::DummyCode => {
                    // from_config only emits this stage when a condition is set
                    let condition = self.config.condition.as_ref().ok_or_else(|| {
                        survey_model::ScoreError::Config(
                            "dummy-code stage without condition".into(),
                        )
                    })?;
                    let (data, indicators) = dummy_code(&current.data, condition)?;
                    audit.indicators = indicators;
                    current = current.with_data(data);
                }
                Stage::Score { construct } => {
                    let data = append_composite(&current.data, construct)?;
                    audit.composites.push(construct.name.clone());
                    current = current.with_data(data);
                }
            }
        }
        info!(
            dataset = %current.dataset_name,
            records = current.record_count(),
            composites = audit.composites.len(),
            indicators = audit.indicators.len(),
            imputed_columns = audit.imputations.len(),
            "scoring pipeline complete"
        );
        Ok((current, audit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{DataFrame, NamedFrom, Series};
    use survey_model::ConditionSpec;

    fn config() -> ScoringConfig {
        ScoringConfig {
            constructs: vec![
                Construct::new("support", vec!["item1".into(), "item2".into()]),
                Construct::new("efficacy", vec!["item3".into()]),
            ],
            impute: vec!["item1".into()],
            condition: Some(ConditionSpec {
                column: "vignette".into(),
                levels: vec!["control".into(), "internal".into(), "external".into()],
            }),
            scale_bounds: None,
        }
    }

    fn frame() -> SurveyFrame {
        let df = DataFrame::new(vec![
            Series::new("item1".into(), vec![Some(2.0), None, Some(4.0)]).into(),
            Series::new("item2".into(), vec![Some(4.0), Some(6.0), None]).into(),
            Series::new("item3".into(), vec![Some(1.0), Some(2.0), Some(3.0)]).into(),
            Series::new(
                "vignette".into(),
                vec![Some("control"), Some("internal"), Some("external")],
            )
            .into(),
        ])
        .unwrap();
        SurveyFrame::new("survey", df)
    }

    #[test]
    fn stage_order_is_impute_dummy_score() {
        let pipeline = ScoringPipeline::from_config(&config()).unwrap();
        let names: Vec<String> = pipeline
            .stages()
            .iter()
            .map(Stage::display_name)
            .collect();
        assert_eq!(
            names,
            vec![
                "impute 1 column(s)",
                "dummy-code condition",
                "score support",
                "score efficacy"
            ]
        );
    }

    #[test]
    fn execute_appends_all_derived_columns() {
        let pipeline = ScoringPipeline::from_config(&config()).unwrap();
        let input = frame();
        let (out, audit) = pipeline.execute(&input).unwrap();

        // Input frame is untouched; output only appends.
        assert_eq!(input.data.width(), 4);
        assert_eq!(out.data.width(), 4 + 2 + 2);
        assert_eq!(out.record_count(), input.record_count());
        assert_eq!(audit.composites, vec!["support", "efficacy"]);
        assert_eq!(
            audit.indicators,
            vec!["vignette_internal", "vignette_external"]
        );
        assert_eq!(audit.imputations.len(), 1);
        assert_eq!(audit.imputations[0].filled, 1);
        assert_eq!(audit.imputations[0].mean, 3.0);

        // Composite over the imputed item1: row 1 uses the fill value 3.
        let support = out.data.column("support").unwrap().f64().unwrap();
        assert_eq!(support.get(0), Some(3.0));
        assert_eq!(support.get(1), Some(4.5));
        assert_eq!(support.get(2), Some(4.0));
    }

    #[test]
    fn execute_without_impute_scores_raw_data() {
        let mut cfg = config();
        cfg.impute.clear();
        let pipeline = ScoringPipeline::from_config(&cfg).unwrap();
        let (out, audit) = pipeline.execute(&frame()).unwrap();
        assert!(audit.imputations.is_empty());

        // Row 1 scores from item2 alone; item1 stays missing.
        let support = out.data.column("support").unwrap().f64().unwrap();
        assert_eq!(support.get(1), Some(6.0));
        assert_eq!(out.data.column("item1").unwrap().null_count(), 1);
    }

    #[test]
    fn rerunning_imputer_on_imputed_frame_is_noop() {
        let columns = vec!["item1".to_string()];
        let input = frame();
        let (once, _) = impute_mean(&input.data, &columns).unwrap();
        let (twice, audit) = impute_mean(&once, &columns).unwrap();
        assert_eq!(audit[0].filled, 0);
        assert!(once.equals_missing(&twice));
    }
}
