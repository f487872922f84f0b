//! Subcommand implementations: load observations, transform, write.

use crate::output::{write_comparison, write_series, write_table, write_years, OutputArgs};
use crate::source::SourceArgs;
use anyhow::anyhow;
use chrono::NaiveDate;
use log::{info, warn};
use spx_data::{
    align_by_day, available_years, comparison_series, default_visible_years, group_by_year,
    normalize, year_to_date_change, DataPoint, YearMap,
};
use spx_fred::query::{Frequency, ObservationQuery};

async fn load_series(
    source: &SourceArgs,
    query: &ObservationQuery,
) -> anyhow::Result<Vec<DataPoint>> {
    let observations = source.load(query).await?;
    let series = normalize(&observations);
    info!(
        "{} of {} observations usable",
        series.len(),
        observations.len()
    );
    Ok(series)
}

/// Write the chronological series.
///
/// By default this is the ten-year monthly overview; `full_history` asks for
/// everything since 1950 instead, and `since` moves the start date.
pub async fn run_series(
    source: &SourceArgs,
    frequency: Frequency,
    limit: u32,
    full_history: bool,
    since: Option<NaiveDate>,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    let mut query = if full_history {
        ObservationQuery::full_history(source.series.as_str())
    } else {
        ObservationQuery::overview(source.series.as_str()).limit(limit)
    };
    query = query.frequency(frequency);
    if since.is_some() {
        query = query.observation_start(since);
    }
    let series = load_series(source, &query).await?;
    write_series(output.writer()?, &series, output.format)
}

/// Write the years that have data, most recent first.
pub async fn run_years(source: &SourceArgs, limit: u32, output: &OutputArgs) -> anyhow::Result<()> {
    let query = ObservationQuery::year_comparison(source.series.as_str()).limit(limit);
    let series = load_series(source, &query).await?;
    write_years(output.writer()?, &available_years(&series), output.format)
}

/// Options of the `compare` subcommand.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Years to include; empty means the `count` most recent
    pub years: Vec<String>,
    pub count: usize,
    pub max_day: u32,
    pub wide: bool,
    pub limit: u32,
}

/// Write year-to-date ratio series for the selected years.
pub async fn run_compare(
    source: &SourceArgs,
    options: &CompareOptions,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    let query = ObservationQuery::year_comparison(source.series.as_str()).limit(options.limit);
    let series = load_series(source, &query).await?;
    let comparison = comparison_series(&group_by_year(&series));

    let years = if options.years.is_empty() {
        default_visible_years(&available_years(&series), options.count)
    } else {
        options.years.clone()
    };
    for year in &years {
        if comparison.get(year).is_none() {
            warn!("No observations for {year}");
        }
    }
    info!("Comparing {}", years.join(", "));

    if options.wide {
        let table = align_by_day(&comparison, &years, options.max_day);
        write_table(output.writer()?, &table, output.format)
    } else {
        let selected = YearMap(
            years
                .iter()
                .filter_map(|year| {
                    comparison
                        .get(year)
                        .map(|points| (year.clone(), points.to_vec()))
                })
                .collect(),
        );
        write_comparison(output.writer()?, &selected, output.format)
    }
}

/// Write one year's percentage change from its first reading.
pub async fn run_ytd(
    source: &SourceArgs,
    year: &str,
    limit: u32,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    let query = ObservationQuery::year_comparison(source.series.as_str()).limit(limit);
    let series = load_series(source, &query).await?;
    let grouped = group_by_year(&series);
    let points = grouped
        .get(year)
        .ok_or_else(|| anyhow!("No observations for {year}"))?;
    write_series(output.writer()?, &year_to_date_change(points), output.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    // newest first, as the year comparison query asks for
    const RESPONSE: &str = r#"{"sort_order":"desc","count":9,"observations":[
{"date":"2024-01-03","value":"4704.81"},
{"date":"2024-01-02","value":"4742.83"},
{"date":"2024-01-01","value":"."},
{"date":"2023-01-04","value":"3852.97"},
{"date":"2023-01-03","value":"3824.14"},
{"date":"2023-01-02","value":"."},
{"date":"2022-01-04","value":"4793.54"},
{"date":"2022-01-03","value":"4796.56"},
{"date":"2021-01-04","value":"3700.65"}
]}"#;

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let dir = std::env::temp_dir().join(format!("spx-cmd-{}-{}-{}", name, std::process::id(), nanos));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn offline_source(dir: &std::path::Path) -> SourceArgs {
        let input = dir.join("response.json");
        std::fs::write(&input, RESPONSE).unwrap();
        SourceArgs {
            api_key: None,
            series: "SP500".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            cache_dir: None,
            max_age_secs: 0,
            input: Some(input),
        }
    }

    fn csv_output(dir: &std::path::Path, name: &str) -> OutputArgs {
        OutputArgs {
            format: OutputFormat::Csv,
            output: Some(dir.join(name)),
        }
    }

    #[tokio::test]
    async fn test_run_years() {
        let dir = scratch_dir("years");
        let source = offline_source(&dir);
        let output = csv_output(&dir, "years.csv");
        run_years(&source, 5000, &output).await.unwrap();
        let written = std::fs::read_to_string(dir.join("years.csv")).unwrap();
        assert_eq!(written, "year\n2024\n2023\n2022\n2021\n");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_run_compare_defaults_to_three_recent_years() {
        let dir = scratch_dir("compare");
        let source = offline_source(&dir);
        let output = csv_output(&dir, "compare.csv");
        let options = CompareOptions {
            years: Vec::new(),
            count: 3,
            max_day: 400,
            wide: false,
            limit: 5000,
        };
        run_compare(&source, &options, &output).await.unwrap();
        let written = std::fs::read_to_string(dir.join("compare.csv")).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "year,day,value");
        assert_eq!(lines[1], "2024,1,1.0");
        assert!(lines[2].starts_with("2024,2,0.99"));
        assert_eq!(lines[3], "2023,2,1.0");
        assert!(lines.iter().all(|line| !line.starts_with("2021")));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_run_compare_wide() {
        let dir = scratch_dir("wide");
        let source = offline_source(&dir);
        let output = csv_output(&dir, "wide.csv");
        let options = CompareOptions {
            years: vec!["2022".to_string(), "2021".to_string()],
            count: 3,
            max_day: 3,
            wide: true,
            limit: 5000,
        };
        run_compare(&source, &options, &output).await.unwrap();
        let written = std::fs::read_to_string(dir.join("wide.csv")).unwrap();
        assert!(written.starts_with("day,2022,2021\n0,,\n1,,\n2,1.0,\n3,0.99"));
        assert!(written.ends_with(",1.0\n"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_run_ytd() {
        let dir = scratch_dir("ytd");
        let source = offline_source(&dir);
        let output = csv_output(&dir, "ytd.csv");
        run_ytd(&source, "2023", 5000, &output).await.unwrap();
        let written = std::fs::read_to_string(dir.join("ytd.csv")).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "date,value");
        assert_eq!(lines[1], "2023-01-03,0.0");
        assert!(lines[2].starts_with("2023-01-04,0.75"));

        assert!(run_ytd(&source, "1999", 5000, &output).await.is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let source = SourceArgs {
            api_key: None,
            series: "SP500".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            cache_dir: None,
            max_age_secs: 0,
            input: None,
        };
        let err = source
            .load(&ObservationQuery::overview("SP500"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("API key is missing"));
    }
}
