//! Payloads handed to the charts by their caller.

use crate::core::{PercentileSeries, RatingBucketCounts, validate_series};
use crate::{ChartError, Result};
use chrono::NaiveDateTime;
use error_stack::ResultExt;
use serde::{Deserialize, Serialize};

/// Compact `ddmmyyHH` timestamps, e.g. `19032114` for 2021-03-19 14:00.
///
/// Deserialization also takes the RFC 1123 form Flask's `jsonify` gives
/// datetimes (`Fri, 19 Mar 2021 14:00:00 GMT`); serialization always writes
/// the compact form.
pub mod compact_timestamp {
    use crate::{ChartError, Result};
    use chrono::{NaiveDate, NaiveDateTime};
    use error_stack::Report;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub const FORMAT: &str = "%d%m%y%H";
    pub const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

    pub fn parse(raw: &str) -> Result<NaiveDateTime> {
        let bad = || Report::new(ChartError::Timestamp(raw.to_owned()));
        if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        // chrono will not build a datetime without minutes, so split the hour off
        let date = NaiveDate::parse_from_str(&raw[..6], "%d%m%y").map_err(|_| bad())?;
        let hour: u32 = raw[6..].parse().map_err(|_| bad())?;
        date.and_hms_opt(hour, 0, 0).ok_or_else(bad)
    }

    /// Either the compact form or an HTTP date.
    pub fn parse_lenient(raw: &str) -> Result<NaiveDateTime> {
        parse(raw).or_else(|report| {
            NaiveDateTime::parse_from_str(raw, HTTP_DATE).map_err(|_| report)
        })
    }

    pub fn format(date: &NaiveDateTime) -> String {
        date.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(
        date: &NaiveDateTime,
        s: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        s.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> std::result::Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse_lenient(&raw).map_err(|e| de::Error::custom(e.current_context()))
    }
}

/// One scraped rating distribution, as stored by the scraper. Dates may be
/// compact (as the reporter's page embeds them) or HTTP dates (as its
/// `/download` route returns them).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionSnapshot {
    pub distribution: Vec<u64>,
    #[serde(with = "compact_timestamp")]
    pub date: NaiveDateTime,
    pub perf_type: String,
}

impl DistributionSnapshot {
    pub fn counts(&self) -> Result<RatingBucketCounts> {
        RatingBucketCounts::new(self.distribution.clone())
    }
}

pub fn parse_snapshots(json: &str) -> Result<Vec<DistributionSnapshot>> {
    serde_json::from_str(json).change_context(ChartError::Payload)
}

/// Snapshots of one perf type, oldest first.
pub fn snapshots_for(snapshots: &[DistributionSnapshot], perf_type: &str) -> Vec<DistributionSnapshot> {
    let mut selected: Vec<DistributionSnapshot> = snapshots
        .iter()
        .filter(|s| s.perf_type == perf_type)
        .cloned()
        .collect();
    selected.sort_by_key(|s| s.date);
    selected
}

/// Distinct perf types in first-seen order.
pub fn perf_types(snapshots: &[DistributionSnapshot]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for s in snapshots {
        if !seen.contains(&s.perf_type) {
            seen.push(s.perf_type.clone());
        }
    }
    seen
}

/// Bare JSON array of bucket counts.
pub fn parse_counts(json: &str) -> Result<RatingBucketCounts> {
    let counts: Vec<u64> = serde_json::from_str(json).change_context(ChartError::Payload)?;
    RatingBucketCounts::new(counts)
}

/// `[{ "percentile": 50, "line": [{ "date": "ddmmyyHH", "rating": 1500.0 }] }]`
pub fn parse_percentile_records(json: &str) -> Result<Vec<PercentileSeries>> {
    let series: Vec<PercentileSeries> =
        serde_json::from_str(json).change_context(ChartError::Payload)?;
    validate_series(&series)?;
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn compact_timestamp_reads_day_month_year_hour() {
        let t = compact_timestamp::parse("19032114").unwrap();
        assert_eq!((t.day(), t.month(), t.year(), t.hour()), (19, 3, 2021, 14));
        assert_eq!(compact_timestamp::format(&t), "19032114");
    }

    #[test]
    fn download_dates_are_accepted() {
        let json = r#"[
            {"distribution": [1], "date": "Fri, 19 Mar 2021 14:00:00 GMT", "perf_type": "blitz"}
        ]"#;
        let all = parse_snapshots(json).unwrap();
        assert_eq!(compact_timestamp::format(&all[0].date), "19032114");
        let err = compact_timestamp::parse_lenient("Fri, 19 Mar 2021").unwrap_err();
        assert_eq!(
            err.current_context(),
            &ChartError::Timestamp("Fri, 19 Mar 2021".to_owned())
        );
    }

    #[test]
    fn compact_timestamp_rejects_garbage() {
        for raw in ["", "1903211", "190321145", "32032114", "19032125", "19a32114"] {
            let err = compact_timestamp::parse(raw).unwrap_err();
            assert_eq!(err.current_context(), &ChartError::Timestamp(raw.to_owned()));
        }
    }

    #[test]
    fn percentile_records_deserialize() {
        let json = r#"[
            {"percentile": 95, "line": [{"date": "01032100", "rating": 2100.5}]},
            {"percentile": 5, "line": [
                {"date": "01032100", "rating": 1010},
                {"date": "02032100", "rating": 1012}
            ]}
        ]"#;
        let series = parse_percentile_records(json).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].percentile, 95);
        assert_eq!(series[1].line[1].rating, 1012.0);
    }

    #[test]
    fn percentile_records_with_duplicates_fail() {
        let json = r#"[{"percentile": 50, "line": []}, {"percentile": 50, "line": []}]"#;
        let err = parse_percentile_records(json).unwrap_err();
        assert_eq!(err.current_context(), &ChartError::DuplicatePercentile(50));
    }

    #[test]
    fn bad_date_is_a_payload_error() {
        let json = r#"[{"percentile": 50, "line": [{"date": "2021-03-01", "rating": 1}]}]"#;
        let err = parse_percentile_records(json).unwrap_err();
        assert_eq!(err.current_context(), &ChartError::Payload);
    }

    #[test]
    fn snapshots_are_filtered_and_sorted() {
        let json = r#"[
            {"distribution": [1], "date": "03032112", "perf_type": "blitz"},
            {"distribution": [2], "date": "01032112", "perf_type": "bullet"},
            {"distribution": [3], "date": "02032112", "perf_type": "blitz"}
        ]"#;
        let all = parse_snapshots(json).unwrap();
        assert_eq!(perf_types(&all), vec!["blitz", "bullet"]);
        let blitz = snapshots_for(&all, "blitz");
        let firsts: Vec<u64> = blitz.iter().map(|s| s.distribution[0]).collect();
        assert_eq!(firsts, vec![3, 1]);
        // too short for the default layout
        assert!(blitz[0].counts().is_err());
    }

    #[test]
    fn counts_payload_is_length_checked() {
        let json = serde_json::to_string(&vec![1u64; 80]).unwrap();
        assert_eq!(parse_counts(&json).unwrap().total(), 80);
        let err = parse_counts("[1, 2, 3]").unwrap_err();
        assert!(matches!(err.current_context(), ChartError::BucketCount { actual: 3, .. }));
    }
}
