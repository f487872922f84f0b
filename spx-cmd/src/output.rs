//! Writing transformed series as CSV or JSON.

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde::Serialize;
use spx_data::{ComparisonSeries, DataPoint, DayAlignedTable};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

/// Where and how a command writes its result.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Output path (stdout when omitted)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    pub fn writer(&self) -> anyhow::Result<Box<dyn Write>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(io::stdout().lock())),
        }
    }
}

#[derive(Serialize)]
struct YearRow<'a> {
    year: &'a str,
}

#[derive(Serialize)]
struct ComparisonRow<'a> {
    year: &'a str,
    day: u32,
    value: f64,
}

/// `date,value` rows.
pub fn write_series<W: Write>(
    writer: W,
    series: &[DataPoint],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => write_csv_rows(writer, series.iter()),
        OutputFormat::Json => write_json(writer, &series),
    }
}

/// One `year` per row, as given.
pub fn write_years<W: Write>(
    writer: W,
    years: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => write_csv_rows(writer, years.iter().map(|year| YearRow { year })),
        OutputFormat::Json => write_json(writer, &years),
    }
}

/// Long form `year,day,value` rows, or a year → points object in JSON.
pub fn write_comparison<W: Write>(
    writer: W,
    comparison: &ComparisonSeries,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => write_csv_rows(
            writer,
            comparison.iter().flat_map(|(year, points)| {
                points.iter().map(move |point| ComparisonRow {
                    year,
                    day: point.day,
                    value: point.value,
                })
            }),
        ),
        OutputFormat::Json => write_json(writer, comparison),
    }
}

/// `day,<year>...` grid with empty cells where a year has no reading.
pub fn write_table<W: Write>(
    writer: W,
    table: &DayAlignedTable,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(writer);
            let mut header = vec!["day".to_string()];
            header.extend(table.years.iter().cloned());
            wtr.write_record(&header)?;
            for row in &table.rows {
                let mut record = vec![row.day.to_string()];
                record.extend(
                    row.values
                        .iter()
                        .map(|value| value.map(format_cell).unwrap_or_default()),
                );
                wtr.write_record(&record)?;
            }
            wtr.flush()?;
            Ok(())
        }
        OutputFormat::Json => write_json(writer, table),
    }
}

// same spelling the csv serializer gives a float: whole numbers keep ".0"
fn format_cell(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn write_csv_rows<W, I, T>(writer: W, rows: I) -> anyhow::Result<()>
where
    W: Write,
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spx_data::{align_by_day, ComparisonPoint, YearMap};

    fn as_string(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_series_csv() {
        let series = vec![
            DataPoint::new("2023-01-03", 3824.14),
            DataPoint::new("2023-01-04", 3852.97),
        ];
        let mut buf = Vec::new();
        write_series(&mut buf, &series, OutputFormat::Csv).unwrap();
        assert_eq!(
            as_string(buf),
            "date,value\n2023-01-03,3824.14\n2023-01-04,3852.97\n"
        );
    }

    #[test]
    fn test_write_series_json() {
        let series = vec![DataPoint::new("2023-01-03", 3824.14)];
        let mut buf = Vec::new();
        write_series(&mut buf, &series, OutputFormat::Json).unwrap();
        let parsed: Vec<DataPoint> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, series);
    }

    #[test]
    fn test_write_years_csv() {
        let years = vec!["2024".to_string(), "2023".to_string()];
        let mut buf = Vec::new();
        write_years(&mut buf, &years, OutputFormat::Csv).unwrap();
        assert_eq!(as_string(buf), "year\n2024\n2023\n");
    }

    #[test]
    fn test_write_comparison_csv() {
        let comparison = YearMap(vec![(
            "2023".to_string(),
            vec![
                ComparisonPoint { day: 2, value: 1.0 },
                ComparisonPoint { day: 3, value: 1.5 },
            ],
        )]);
        let mut buf = Vec::new();
        write_comparison(&mut buf, &comparison, OutputFormat::Csv).unwrap();
        assert_eq!(as_string(buf), "year,day,value\n2023,2,1.0\n2023,3,1.5\n");
    }

    #[test]
    fn test_write_table_csv() {
        let comparison = YearMap(vec![
            ("2024".to_string(), vec![ComparisonPoint { day: 1, value: 1.0 }]),
            ("2023".to_string(), vec![ComparisonPoint { day: 2, value: 1.25 }]),
        ]);
        let years = vec!["2024".to_string(), "2023".to_string()];
        let table = align_by_day(&comparison, &years, 2);
        let mut buf = Vec::new();
        write_table(&mut buf, &table, OutputFormat::Csv).unwrap();
        assert_eq!(as_string(buf), "day,2024,2023\n0,,\n1,1.0,\n2,,1.25\n");
    }
}
