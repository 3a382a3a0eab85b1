//! Viewer configuration

use std::path::PathBuf;

use clap::Parser;
use rating_charts::runtime::DEFAULT_LOG_FILTER;

/// Browse scraped rating distributions and their percentile history
#[derive(Parser, Clone, Debug)]
#[command(name = "ratings-viewer")]
#[command(about = "Charts rating distribution snapshots and percentile history")]
pub struct Config {
    /// JSON dump of distribution snapshots (`[{ distribution, date, perf_type }]`)
    #[arg(short, long)]
    pub dataset: PathBuf,

    /// Perf type shown first
    #[arg(short, long, default_value = "blitz")]
    pub perf_type: String,

    /// Width of both charts in pixels
    #[arg(short, long, default_value = "1100")]
    pub width: f32,

    /// `tracing` filter directives
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_dataset_given() {
        let config = Config::try_parse_from(["ratings-viewer", "--dataset", "dump.json"]).unwrap();
        assert_eq!(config.dataset, PathBuf::from("dump.json"));
        assert_eq!(config.perf_type, "blitz");
        assert_eq!(config.width, 1100.0);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn dataset_is_required() {
        assert!(Config::try_parse_from(["ratings-viewer"]).is_err());
    }

    #[test]
    fn short_flags() {
        let config =
            Config::try_parse_from(["ratings-viewer", "-d", "x.json", "-p", "bullet", "-w", "900"])
                .unwrap();
        assert_eq!(config.perf_type, "bullet");
        assert_eq!(config.width, 900.0);
    }
}
