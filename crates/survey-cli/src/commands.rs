use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use survey_ingest::{IngestOptions, build_column_profiles, read_survey_table_with_options, to_data_frame};
use survey_model::ScoringConfig;
use survey_report::{construct_summaries, write_frame_csv};
use survey_transform::{PipelineAudit, ScoringPipeline, SurveyFrame};
use survey_validate::Validator;

use crate::cli::{ConstructsArgs, ScoreArgs};
use crate::summary::apply_table_style;
use crate::types::ScoreResult;

pub fn run_constructs(args: &ConstructsArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let mut table = Table::new();
    table.set_header(vec!["Construct", "Items", "Item columns"]);
    apply_table_style(&mut table);
    for construct in &config.constructs {
        table.add_row(vec![
            construct.name.clone(),
            construct.items.len().to_string(),
            construct.items.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_score(args: &ScoreArgs) -> Result<ScoreResult> {
    let dataset = dataset_name(&args.data);
    let score_span = info_span!("score", dataset = %dataset);
    let _score_guard = score_span.enter();

    let config = load_config(&args.config)?;

    // ========================================================================
    // Stage 0: ingest
    // ========================================================================
    let mut options = IngestOptions::default();
    options
        .missing_tokens
        .extend(args.missing_tokens.iter().cloned());
    let table = read_survey_table_with_options(&args.data, &options)?;
    let profiles = build_column_profiles(&table);
    let numeric = profiles.values().filter(|profile| profile.is_numeric).count();
    info!(
        rows = table.row_count(),
        columns = table.headers.len(),
        numeric_columns = numeric,
        "ingested dataset"
    );
    let df = to_data_frame(&table)?;
    let frame = SurveyFrame::new(dataset.clone(), df).with_source_file(args.data.clone());

    // ========================================================================
    // Stage 1: eager validation, before any per-row work
    // ========================================================================
    let validation = Validator::new().validate(&dataset, &config, &frame.data);
    if validation.has_errors() {
        warn!(
            errors = validation.error_count(),
            "validation failed; skipping scoring"
        );
        return Ok(ScoreResult {
            dataset,
            records: frame.record_count(),
            validation,
            summaries: Vec::new(),
            audit: PipelineAudit::default(),
            output: None,
            has_errors: true,
        });
    }

    // ========================================================================
    // Stage 2: impute -> dummy-code -> score
    // ========================================================================
    let pipeline = ScoringPipeline::from_config(&config)?;
    let (scored, audit) = pipeline.execute(&frame)?;
    let summaries = construct_summaries(&scored.data, &config)?;

    // ========================================================================
    // Stage 3: output
    // ========================================================================
    let output = if args.dry_run {
        info!("dry run; not writing output");
        None
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.data));
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output dir: {}", parent.display()))?;
        }
        write_frame_csv(&scored.data, &path)?;
        Some(path)
    };

    Ok(ScoreResult {
        dataset,
        records: scored.record_count(),
        validation,
        summaries,
        audit,
        output,
        has_errors: false,
    })
}

fn load_config(path: &Path) -> Result<ScoringConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read scoring config: {}", path.display()))?;
    let config: ScoringConfig = serde_json::from_str(&contents)
        .with_context(|| format!("parse scoring config: {}", path.display()))?;
    config.check()?;
    Ok(config)
}

fn dataset_name(data: &Path) -> String {
    data.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "survey".to_string())
}

fn default_output_path(data: &Path) -> PathBuf {
    let stem = dataset_name(data);
    data.with_file_name(format!("{stem}_scored.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_path_appends_scored_suffix() {
        let path = default_output_path(Path::new("data/survey.csv"));
        assert_eq!(path, Path::new("data/survey_scored.csv"));
    }

    #[test]
    fn dataset_name_falls_back_for_odd_paths() {
        assert_eq!(dataset_name(Path::new("a/b/responses.csv")), "responses");
        assert_eq!(dataset_name(Path::new("/")), "survey");
    }
}
