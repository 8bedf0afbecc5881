#![allow(clippy::tests_outside_test_module)]

use chrono::NaiveDate;
use paperfeed_config::StatsSettings;
use paperfeed_feed::parse_data_file;
use paperfeed_stats::{StatsEngine, titles_from};

const DAY_ONE: &str = r#"{"id":"1","title":"Robust Neural Networks","authors":["A"],"categories":["cs.LG"],"summary":"s","abs":"https://arxiv.org/abs/1"}
{"id":"2","title":"Sparse Retrieval Agents","authors":["B"],"categories":["cs.IR"],"summary":"s","abs":"https://arxiv.org/abs/2"}
"#;

const DAY_TWO: &str = r#"{"id":"3","title":"Robust under Distribution Shift","authors":["C"],"categories":["cs.AI"],"summary":"s","abs":"https://arxiv.org/abs/3"}
"#;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

#[test]
fn robust_counts_across_dates() {
    let (mut papers, _) = parse_data_file(DAY_ONE, date(1));
    let (second, _) = parse_data_file(DAY_TWO, date(2));
    papers.merge(second);

    let titles = titles_from(&papers);
    assert_eq!(titles.len(), 3);

    let report = StatsEngine::new(&StatsSettings::default()).compute(&titles, &[date(1), date(2)]);
    let robust = report.keyword("robust").unwrap();
    assert_eq!(robust.frequency, 2);
    assert_eq!(robust.per_date.get(&date(1)), Some(&1));
    assert_eq!(robust.per_date.get(&date(2)), Some(&1));

    let trend = report.trends.iter().find(|t| t.term == "robust").unwrap();
    let counts: Vec<_> = trend.points.iter().map(|p| p.count).collect();
    assert_eq!(counts, vec![1, 1]);
    assert_eq!(report.axis.labels, vec!["01", "02"]);
}

#[test]
fn report_serializes() {
    let (papers, _) = parse_data_file(DAY_ONE, date(1));
    let report = StatsEngine::new(&StatsSettings::default()).compute(&titles_from(&papers), &[]);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["titles"], 2);
    assert_eq!(json["dates"][0], "2025-03-01");
    assert!(json["cloud"].as_array().unwrap().is_empty());
}
