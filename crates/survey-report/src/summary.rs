//! Per-construct descriptive summaries.

use anyhow::{Result, anyhow};
use polars::prelude::DataFrame;

use survey_model::{ConstructSummary, ScoringConfig};
use survey_transform::column_mean;

/// Compute n / missing / mean / sd / min / max for every composite column.
///
/// Expects the scored frame, i.e. one column per construct named after it.
/// `sd` is the sample standard deviation (n-1 denominator), `None` when
/// fewer than two values are present.
pub fn construct_summaries(df: &DataFrame, config: &ScoringConfig) -> Result<Vec<ConstructSummary>> {
    let mut summaries = Vec::with_capacity(config.constructs.len());
    for construct in &config.constructs {
        let column = df
            .column(&construct.name)
            .map_err(|_| anyhow!("composite column {} not in scored frame", construct.name))?;
        let ca = column
            .f64()
            .map_err(|_| anyhow!("composite column {} is not numeric", construct.name))?;
        let values: Vec<f64> = ca.into_iter().flatten().collect();
        let n = values.len();
        let missing = df.height() - n;
        let mean = column_mean(ca);
        let sd = match (mean, n) {
            (Some(mean), n) if n >= 2 => {
                let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
                Some((ss / (n - 1) as f64).sqrt())
            }
            _ => None,
        };
        let min = values.iter().copied().fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.min(v)))
        });
        let max = values.iter().copied().fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.max(v)))
        });
        summaries.push(ConstructSummary {
            construct: construct.name.clone(),
            items: construct.items.len(),
            n,
            missing,
            mean,
            sd,
            min,
            max,
        });
    }
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};
    use survey_model::Construct;

    #[test]
    fn summary_reports_descriptives_and_missing() {
        let df = DataFrame::new(vec![
            Series::new("support".into(), vec![Some(2.0), Some(4.0), None]).into(),
        ])
        .unwrap();
        let config = ScoringConfig {
            constructs: vec![Construct::new("support", vec!["a".into(), "b".into()])],
            ..ScoringConfig::default()
        };
        let summaries = construct_summaries(&df, &config).unwrap();
        let s = &summaries[0];
        assert_eq!(s.n, 2);
        assert_eq!(s.missing, 1);
        assert_eq!(s.mean, Some(3.0));
        assert_eq!(s.min, Some(2.0));
        assert_eq!(s.max, Some(4.0));
        let sd = s.sd.unwrap();
        assert!((sd - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn single_value_has_no_sd() {
        let df = DataFrame::new(vec![
            Series::new("support".into(), vec![Some(2.0), None]).into(),
        ])
        .unwrap();
        let config = ScoringConfig {
            constructs: vec![Construct::new("support", vec!["a".into()])],
            ..ScoringConfig::default()
        };
        let summaries = construct_summaries(&df, &config).unwrap();
        assert_eq!(summaries[0].sd, None);
        assert_eq!(summaries[0].mean, Some(2.0));
    }

    #[test]
    fn missing_composite_column_is_an_error() {
        let df = DataFrame::new(vec![
            Series::new("other".into(), vec![Some(1.0)]).into(),
        ])
        .unwrap();
        let config = ScoringConfig {
            constructs: vec![Construct::new("support", vec!["a".into()])],
            ..ScoringConfig::default()
        };
        assert!(construct_summaries(&df, &config).is_err());
    }
}
