use std::collections::HashMap;
use std::fs;

use chrono::{Duration, NaiveDate};

use player_dataset::StageError;
use player_dataset::config::MarketValueConfig;
use player_dataset::market_value::{ValuePolicy, join_market_values, run, season_values};
use player_dataset::records::{MarketValueRecord, PositionedPerformance, ValuedPerformance};
use player_dataset::season::season_for_date;
use player_dataset::table::{read_records, write_records};

fn positioned(player_id: u32, season: &str) -> PositionedPerformance {
    PositionedPerformance {
        player_id,
        season_name: season.to_string(),
        competition_id: "L1".to_string(),
        competition_name: "Bundesliga".to_string(),
        team_id: 27,
        team_name: "Bayern Munich".to_string(),
        nb_in_group: Some(30),
        nb_on_pitch: Some(28),
        goals: Some(2),
        assists: Some(1),
        own_goals: Some(0),
        subed_in: Some(3),
        subed_out: Some(5),
        yellow_cards: Some(4),
        second_yellow_cards: Some(0),
        direct_red_cards: Some(0),
        penalty_goals: Some(0),
        minutes_played: Some(2400),
        goals_conceded: Some(25),
        clean_sheets: Some(10),
        main_position: "Defender".to_string(),
    }
}

fn valuation(player_id: u32, date: &str, value: Option<f64>) -> MarketValueRecord {
    MarketValueRecord {
        player_id,
        date_unix: date.to_string(),
        value,
    }
}

#[test]
fn every_day_of_a_season_maps_to_its_label() {
    for start in [1998, 1999, 2009, 2023, 2025] {
        let expected = format!("{:02}/{:02}", start % 100, (start + 1) % 100);
        let first = NaiveDate::from_ymd_opt(start, 7, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(start + 1, 6, 30).unwrap();
        let mut day = first;
        while day <= last {
            assert_eq!(season_for_date(day), expected, "{day}");
            day += Duration::days(1);
        }
        assert_ne!(season_for_date(first - Duration::days(1)), expected);
        assert_ne!(season_for_date(last + Duration::days(1)), expected);
    }
}

#[test]
fn valuations_in_one_season_collapse_to_one() {
    let records = vec![
        valuation(5, "2023-09-01", Some(30.0)),
        valuation(5, "2024-03-01", Some(40.0)),
        valuation(5, "2024-06-30", None),
        valuation(5, "2024-07-01", Some(50.0)),
    ];

    let mean = season_values(records.clone(), ValuePolicy::Mean).unwrap();
    assert_eq!(mean.len(), 2);
    assert_eq!(mean[&(5, "23/24".to_string())], 35.0);
    assert_eq!(mean[&(5, "24/25".to_string())], 50.0);

    let latest = season_values(records, ValuePolicy::Latest).unwrap();
    assert_eq!(latest[&(5, "23/24".to_string())], 40.0);
}

#[test]
fn join_never_duplicates_rows_and_drops_unvalued() {
    let rows = vec![
        positioned(5, "23/24"),
        positioned(6, "23/24"),
        positioned(5, "22/23"),
    ];
    let values = HashMap::from([
        ((5, "23/24".to_string()), 35.0),
        ((5, "22/23".to_string()), 25.0),
        ((6, "22/23".to_string()), 1.0),
    ]);

    let joined = join_market_values(rows, &values);
    assert_eq!(
        joined
            .iter()
            .map(|r| (r.player_id, r.season_name.as_str(), r.value))
            .collect::<Vec<_>>(),
        vec![(5, "23/24", 35.0), (5, "22/23", 25.0)]
    );
}

#[test]
fn unparseable_date_fails_the_stage() {
    let err = season_values(vec![valuation(1, "last spring", Some(1.0))], ValuePolicy::Mean)
        .unwrap_err();
    assert!(err.to_string().contains("last spring"));
}

#[test]
fn blank_date_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = MarketValueConfig {
        performances: dir.path().join("defenders.csv"),
        market_values: dir.path().join("values.csv"),
        output: dir.path().join("valued.csv"),
        policy: ValuePolicy::Mean,
    };
    write_records(&cfg.performances, &[positioned(5, "23/24")]).unwrap();
    fs::write(
        &cfg.market_values,
        "player_id,date_unix,value\n5,2023-09-01,30000000\n6,,1000\n",
    )
    .unwrap();

    let summary = run(&cfg).unwrap();
    assert_eq!(summary.valuations, 2);
    assert_eq!(summary.undated, 1);
    assert_eq!(summary.season_values, 1);

    let out: Vec<ValuedPerformance> = read_records(&cfg.output).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].value, 30_000_000.0);
}

#[test]
fn run_writes_value_column_last() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = MarketValueConfig {
        performances: dir.path().join("defenders.csv"),
        market_values: dir.path().join("values.csv"),
        output: dir.path().join("valued.csv"),
        policy: ValuePolicy::Mean,
    };
    write_records(
        &cfg.performances,
        &[positioned(5, "23/24"), positioned(10, "23/24")],
    )
    .unwrap();
    fs::write(
        &cfg.market_values,
        "player_id,date_unix,value\n5,2023-09-01,30000000\n5,2024-03-01,40000000\n10,2021-05-01,1000000\n",
    )
    .unwrap();

    let summary = run(&cfg).unwrap();
    assert_eq!(summary.valuations, 3);
    assert_eq!(summary.season_values, 2);
    assert_eq!(summary.rows_before_drop, 2);
    assert_eq!(summary.rows_after_drop, 1);
    assert_eq!(summary.dropped(), 1);

    let out: Vec<ValuedPerformance> = read_records(&cfg.output).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].value, 35_000_000.0);

    let text = fs::read_to_string(&cfg.output).unwrap();
    let header = text.trim_start_matches('\u{feff}').lines().next().unwrap();
    assert!(header.ends_with(",clean_sheets,main_position,value"));
}

#[test]
fn missing_value_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = MarketValueConfig {
        performances: dir.path().join("defenders.csv"),
        market_values: dir.path().join("values.csv"),
        output: dir.path().join("valued.csv"),
        policy: ValuePolicy::Latest,
    };
    write_records(&cfg.performances, &[positioned(5, "23/24")]).unwrap();
    fs::write(&cfg.market_values, "player_id,date_unix\n5,2023-09-01\n").unwrap();

    match run(&cfg) {
        Err(StageError::MissingColumn { column, path }) => {
            assert_eq!(column, "value");
            assert_eq!(path, cfg.market_values);
        }
        other => panic!("expected missing column, got {other:?}"),
    }
    assert!(!cfg.output.exists());
}
