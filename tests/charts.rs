use chrono::NaiveDate;
use rating_charts::prelude::*;

fn snapshot_dump() -> String {
    let counts = |shift: usize| -> Vec<u64> {
        (0..80)
            .map(|i| if (30 + shift..50 + shift).contains(&i) { 100 } else { 0 })
            .collect()
    };
    let records: Vec<DistributionSnapshot> = (0..4)
        .map(|day| DistributionSnapshot {
            distribution: counts(day),
            date: NaiveDate::from_ymd_opt(2021, 3, 1 + day as u32)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            perf_type: "blitz".to_string(),
        })
        .collect();
    serde_json::to_string(&records).unwrap()
}

#[test]
fn distribution_chart_follows_each_update() {
    let mount = Mount::new("distribution", 1000.0);
    let first = RatingBucketCounts::new(vec![50; 80]).unwrap();
    let mut chart = DistributionChart::initialize(&first, &mount).unwrap();
    assert_eq!(chart.cumulative_y().domain, [0.0, 4000.0]);

    let second = RatingBucketCounts::new((0..80).map(|i| i as u64).collect()).unwrap();
    chart.update(&second).unwrap();

    let players = chart.players_y();
    for (i, point) in chart.paths().players_line.points.iter().enumerate() {
        assert_eq!(point.y, players.apply(i as f64));
        assert_eq!(point.x, chart.bucket_x(i));
    }
    assert_eq!(chart.cumulative_y().domain, [0.0, 3160.0]);
    let cumulative = &chart.paths().cumulative;
    assert!(cumulative.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(cumulative.last(), Some(&3160.0));
}

#[test]
fn snapshots_become_a_percentile_chart() {
    let snapshots = parse_snapshots(&snapshot_dump()).unwrap();
    let blitz = snapshots_for(&snapshots, "blitz");
    let series = percentile_series(&blitz, &DEFAULT_PERCENTILES).unwrap();
    assert_eq!(series.len(), 5);

    // the populated band moves up by one bucket a day
    let median = series.iter().find(|s| s.percentile == 50).unwrap();
    let ratings: Vec<f64> = median.line.iter().map(|p| p.rating).collect();
    assert!(ratings.windows(2).all(|w| (w[1] - w[0] - 25.0).abs() < 1e-9));

    let chart = PercentileChart::initialize(&series, &Mount::new("percentiles", 1040.0)).unwrap();
    let legend: Vec<&str> = chart
        .decoration()
        .legend
        .iter()
        .map(|e| e.label.as_str())
        .collect();
    assert_eq!(legend, vec!["95th", "75th", "50th", "25th", "5th"]);

    let line = chart.line(50).unwrap();
    assert_eq!(line.path.points.first().map(|p| p.x), Some(0.0));
    assert_eq!(line.path.points.last().map(|p| p.x), Some(chart.frame().width));
}

#[test]
fn reordered_update_keeps_line_colours() {
    let snapshots = parse_snapshots(&snapshot_dump()).unwrap();
    let series = percentile_series(&snapshots, &[25, 50, 75]).unwrap();
    let mut chart = PercentileChart::initialize(&series, &Mount::new("p", 1040.0)).unwrap();
    let colour = chart.line(75).unwrap().color;

    let mut reversed = series.clone();
    reversed.reverse();
    let join = chart.update(&reversed).unwrap();

    assert!(join.entered.is_empty() && join.exited.is_empty());
    assert_eq!(chart.line(75).unwrap().color, colour);
    assert_eq!(chart.decoration().legend.len(), 3);
}

#[test]
fn percentile_payload_round_trips_through_json() {
    let json = r#"[
        { "percentile": 50, "line": [
            { "date": "01032112", "rating": 1500.0 },
            { "date": "02032112", "rating": 1510.0 }
        ] }
    ]"#;
    let series = parse_percentile_records(json).unwrap();
    assert_eq!(series[0].line.len(), 2);
    let again = serde_json::to_string(&series).unwrap();
    assert!(again.contains("\"01032112\""));
    assert_eq!(parse_percentile_records(&again).unwrap(), series);
}

#[test]
fn invalid_inputs_are_reported() {
    let short = parse_counts("[1, 2, 3]").unwrap_err();
    assert_eq!(
        short.current_context(),
        &ChartError::BucketCount {
            expected: 80,
            actual: 3
        }
    );

    let empty = PercentileChart::initialize(&[], &Mount::new("p", 1040.0)).unwrap_err();
    assert_eq!(empty.current_context(), &ChartError::EmptySeries);

    let bad_date = parse_percentile_records(
        r#"[{ "percentile": 5, "line": [{ "date": "2021-03-01", "rating": 1.0 }] }]"#,
    )
    .unwrap_err();
    assert_eq!(bad_date.current_context(), &ChartError::Payload);
}
