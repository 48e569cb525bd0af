use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::market_value::ValuePolicy;
use crate::position::Position;

pub const DEFAULT_LEAGUES: &[&str] = &[
    "Bundesliga",
    "Premier League",
    "LaLiga",
    "Serie A",
    "Ligue 1",
];
pub const DEFAULT_SEASONS: &[&str] = &["21/22", "22/23", "23/24", "24/25", "25/26"];

pub const PERFORMANCES_FILE: &str = "player_performances.csv";
pub const FILTERED_FILE: &str = "output_leagues_seasons.csv";
pub const PROFILES_FILE: &str = "player_profiles.csv";
pub const MARKET_VALUES_FILE: &str = "player_market_value.csv";
pub const INJURIES_FILE: &str = "player_injuries.csv";
pub const SPLIT_PREFIX: &str = "performances_main_pos_";

const ENV_DATA_DIR: &str = "PLAYER_DATASET_DIR";
const ENV_POSITION: &str = "PLAYER_DATASET_POSITION";
const ENV_VALUE_POLICY: &str = "PLAYER_DATASET_VALUE_POLICY";
const ENV_LEAGUES: &str = "PLAYER_DATASET_LEAGUES";
const ENV_SEASONS: &str = "PLAYER_DATASET_SEASONS";

/// Command-line flags, each taking one value.
const FLAGS: &[&str] = &["data-dir", "position", "value-policy"];

#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub leagues: Vec<String>,
    pub seasons: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub performances: PathBuf,
    pub profiles: PathBuf,
    pub output_dir: PathBuf,
    pub output_prefix: String,
    pub positions: Vec<Position>,
}

impl SplitConfig {
    pub fn output_path(&self, position: Position) -> PathBuf {
        split_file(&self.output_dir, &self.output_prefix, position)
    }
}

#[derive(Debug, Clone)]
pub struct MarketValueConfig {
    pub performances: PathBuf,
    pub market_values: PathBuf,
    pub output: PathBuf,
    pub policy: ValuePolicy,
}

#[derive(Debug, Clone)]
pub struct InjuryConfig {
    pub performances: PathBuf,
    pub injuries: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AgeConfig {
    pub input: PathBuf,
    pub profiles: PathBuf,
    pub output: PathBuf,
}

/// File layout and allow-lists for all five stages.
///
/// Each stage's default output is the next stage's default input.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub position: Position,
    pub filter: FilterConfig,
    pub split: SplitConfig,
    pub market_value: MarketValueConfig,
    pub injury: InjuryConfig,
    pub age: AgeConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(Path::new("."), Position::Defender)
    }
}

impl PipelineConfig {
    pub fn new(data_dir: &Path, position: Position) -> Self {
        let dir = data_dir.to_path_buf();
        let stem = position.file_stem();
        let valued = dir.join(format!("{stem}_performances_with_value.csv"));
        let final_analysis = dir.join(format!("{stem}_final_analysis_data.csv"));

        Self {
            data_dir: dir.clone(),
            position,
            filter: FilterConfig {
                input: dir.join(PERFORMANCES_FILE),
                output: dir.join(FILTERED_FILE),
                leagues: DEFAULT_LEAGUES.iter().map(|s| s.to_string()).collect(),
                seasons: DEFAULT_SEASONS.iter().map(|s| s.to_string()).collect(),
            },
            split: SplitConfig {
                performances: dir.join(FILTERED_FILE),
                profiles: dir.join(PROFILES_FILE),
                output_dir: dir.clone(),
                output_prefix: SPLIT_PREFIX.to_string(),
                positions: Position::ALL.to_vec(),
            },
            market_value: MarketValueConfig {
                performances: split_file(&dir, SPLIT_PREFIX, position),
                market_values: dir.join(MARKET_VALUES_FILE),
                output: valued.clone(),
                policy: ValuePolicy::default(),
            },
            injury: InjuryConfig {
                performances: valued,
                injuries: dir.join(INJURIES_FILE),
                output: final_analysis.clone(),
            },
            age: AgeConfig {
                input: final_analysis,
                profiles: dir.join(PROFILES_FILE),
                output: dir.join(format!("{stem}_dataset_with_age.csv")),
            },
        }
    }

    /// Loads `.env` files, then reads overrides from the process environment
    /// and command line.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        let args = std::env::args().skip(1).collect::<Vec<_>>();
        Self::from_sources(&args, |key| std::env::var(key).ok())
    }

    /// Command-line flags win over environment values, which win over
    /// defaults.
    pub fn from_sources(args: &[String], env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let flags = parse_flags(args)?;
        let setting = |flag: &str, key: &str| {
            flags
                .get(flag)
                .cloned()
                .or_else(|| env(key).filter(|v| !v.trim().is_empty()))
        };

        let data_dir = setting("data-dir", ENV_DATA_DIR)
            .map(|raw| PathBuf::from(raw.trim()))
            .unwrap_or_else(|| PathBuf::from("."));
        let position = match setting("position", ENV_POSITION) {
            Some(raw) => raw.parse::<Position>().context("invalid position setting")?,
            None => Position::Defender,
        };

        let mut cfg = Self::new(&data_dir, position);
        if let Some(raw) = setting("value-policy", ENV_VALUE_POLICY) {
            cfg.market_value.policy = raw
                .parse::<ValuePolicy>()
                .context("invalid value policy setting")?;
        }
        if let Some(leagues) = env(ENV_LEAGUES).map(|raw| parse_list(&raw))
            && !leagues.is_empty()
        {
            cfg.filter.leagues = leagues;
        }
        if let Some(seasons) = env(ENV_SEASONS).map(|raw| parse_list(&raw))
            && !seasons.is_empty()
        {
            cfg.filter.seasons = seasons;
        }
        Ok(cfg)
    }
}

fn split_file(dir: &Path, prefix: &str, position: Position) -> PathBuf {
    dir.join(format!("{prefix}{}.csv", position.as_str()))
}

/// Reads `--name=value` and `--name value` pairs; a repeated flag keeps its
/// last value.
fn parse_flags(args: &[String]) -> Result<HashMap<&'static str, String>> {
    let mut flags = HashMap::new();
    let mut rest = args.iter();
    while let Some(arg) = rest.next() {
        let Some(body) = arg.strip_prefix("--") else {
            bail!("unexpected argument `{arg}`");
        };
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (body, None),
        };
        let Some(&known) = FLAGS.iter().find(|flag| **flag == name) else {
            bail!("unknown flag `--{name}` (expected one of --{})", FLAGS.join(", --"));
        };
        let value = match inline {
            Some(value) => value,
            None => match rest.next() {
                Some(next) if !next.starts_with("--") => next.clone(),
                _ => bail!("flag `--{known}` needs a value"),
            },
        };
        let value = value.trim();
        if value.is_empty() {
            bail!("flag `--{known}` needs a value");
        }
        flags.insert(known, value.to_string());
    }
    Ok(flags)
}

/// Splits a `,` or `;` separated list, dropping blanks and repeats.
fn parse_list(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_string()))
        .map(str::to_string)
        .collect()
}
