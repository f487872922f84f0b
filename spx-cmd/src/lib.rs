//! Command implementations for SPX CLI.
//!
//! Provides subcommands that fetch S&P 500 observations from FRED and write
//! the chronological, per-year and year-comparison series, with support for
//! caching responses between runs.

use chrono::NaiveDate;
use clap::Subcommand;
use spx_data::{DEFAULT_MAX_DAY, DEFAULT_VISIBLE_YEARS};
use spx_fred::query::Frequency;

pub mod cache;
pub mod output;
pub mod query;
pub mod source;

use output::OutputArgs;
use query::CompareOptions;
use source::SourceArgs;

#[derive(Subcommand)]
pub enum Command {
    /// Write the chronological series (ten years of monthly readings by default)
    Series {
        /// Observation frequency: d, w, m, q or a
        #[arg(long, default_value = "m")]
        frequency: Frequency,

        /// Number of most recent observations to request
        #[arg(long, default_value_t = 120)]
        limit: u32,

        /// Request every observation since 1950 instead of the most recent ones
        #[arg(long)]
        full_history: bool,

        /// First date to request (YYYY-MM-DD)
        #[arg(long)]
        since: Option<NaiveDate>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the years that have observations, most recent first
    Years {
        /// Number of most recent daily observations to request
        #[arg(long, default_value_t = 5000)]
        limit: u32,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write year-to-date ratio series aligned by day of year
    Compare {
        /// Years to compare, comma separated (default: the most recent --count years)
        #[arg(long, value_delimiter = ',')]
        years: Vec<String>,

        /// How many recent years to compare when --years is not given
        #[arg(long, default_value_t = DEFAULT_VISIBLE_YEARS)]
        count: usize,

        /// Last day of the grid written by --wide
        #[arg(long, default_value_t = DEFAULT_MAX_DAY)]
        max_day: u32,

        /// Write one column per year on a shared day grid
        #[arg(long)]
        wide: bool,

        /// Number of most recent daily observations to request
        #[arg(long, default_value_t = 5000)]
        limit: u32,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write one year's percentage change from its first reading
    Ytd {
        /// Year to report (YYYY)
        #[arg(long)]
        year: String,

        /// Number of most recent daily observations to request
        #[arg(long, default_value_t = 5000)]
        limit: u32,

        #[command(flatten)]
        output: OutputArgs,
    },
}

pub async fn run(source: &SourceArgs, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Series {
            frequency,
            limit,
            full_history,
            since,
            output,
        } => query::run_series(source, frequency, limit, full_history, since, &output).await,
        Command::Years { limit, output } => query::run_years(source, limit, &output).await,
        Command::Compare {
            years,
            count,
            max_day,
            wide,
            limit,
            output,
        } => {
            let options = CompareOptions {
                years,
                count,
                max_day,
                wide,
                limit,
            };
            query::run_compare(source, &options, &output).await
        }
        Command::Ytd {
            year,
            limit,
            output,
        } => query::run_ytd(source, &year, limit, &output).await,
    }
}
