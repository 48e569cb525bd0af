use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chrono::{Duration, NaiveDate};

use player_dataset::injury_totals::aggregate_injuries;
use player_dataset::market_value::{ValuePolicy, season_values};
use player_dataset::player_age::age_for_season;
use player_dataset::records::{InjuryRecord, MarketValueRecord};
use player_dataset::season::season_for_date;

fn sample_valuations(players: u32) -> Vec<MarketValueRecord> {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let mut out = Vec::new();
    for player_id in 1..=players {
        for step in 0..24 {
            let date = start + Duration::days(i64::from(step) * 97 + i64::from(player_id % 31));
            out.push(MarketValueRecord {
                player_id,
                date_unix: date.format("%Y-%m-%d").to_string(),
                value: Some(f64::from(player_id * 1_000 + step)),
            });
        }
    }
    out
}

fn sample_injuries(players: u32) -> Vec<InjuryRecord> {
    let seasons = ["21/22", "22/23", "23/24", "24/25"];
    let mut out = Vec::new();
    for player_id in 1..=players {
        for (idx, season) in seasons.iter().enumerate() {
            out.push(InjuryRecord {
                player_id,
                season_name: season.to_string(),
                days_missed: Some(idx as f64 * 3.0),
                games_missed: (idx % 2 == 0).then_some(1.0),
            });
        }
    }
    out
}

fn bench_season_mapping(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let dates = (0..3650)
        .map(|d| start + Duration::days(d))
        .collect::<Vec<_>>();
    c.bench_function("season_for_date", |b| {
        b.iter(|| {
            for date in &dates {
                black_box(season_for_date(black_box(*date)));
            }
        })
    });
}

fn bench_season_values(c: &mut Criterion) {
    let records = sample_valuations(2_000);
    c.bench_function("season_values_mean", |b| {
        b.iter(|| {
            let values = season_values(black_box(records.clone()), ValuePolicy::Mean).unwrap();
            black_box(values.len());
        })
    });
}

fn bench_injury_aggregation(c: &mut Criterion) {
    let records = sample_injuries(5_000);
    c.bench_function("aggregate_injuries", |b| {
        b.iter(|| {
            let totals = aggregate_injuries(black_box(records.clone()));
            black_box(totals.len());
        })
    });
}

fn bench_age(c: &mut Criterion) {
    c.bench_function("age_for_season", |b| {
        b.iter(|| black_box(age_for_season(black_box("23/24"), Some("May 15, 2000"))))
    });
}

criterion_group!(
    perf,
    bench_season_mapping,
    bench_season_values,
    bench_injury_aggregation,
    bench_age
);
criterion_main!(perf);
