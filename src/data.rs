//! Schemas and loaders for the JSON inputs supplied by the upstream data-fetching
//! layer: team lists, league coefficients, boosters, statistics sources in both
//! upstream schemas, head-to-head aggregates and fixture lists.
//!
//! Loading is tolerant by policy: a source file that is missing or fails to parse
//! contributes nothing and emits a warning, leaving the remaining sources intact.

use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::Fixture;

/// Reads a JSON-encoded type from a given file `path`.
pub fn read_json<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D, io::Error> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

/// JSON-encodes the `value` in pretty-printed form and writes it to a given `path`.
pub fn write_json(path: impl AsRef<Path>, value: &impl serde::Serialize) -> Result<(), io::Error> {
    let file = File::create(path)?;
    Ok(serde_json::to_writer_pretty(file, value)?)
}

/// Reads a JSON-encoded type, degrading to `D::default()` with a warning if the file
/// is absent or malformed.
fn read_json_or_default<D: DeserializeOwned + Default>(path: impl AsRef<Path>) -> D {
    let path = path.as_ref();
    match read_json(path) {
        Ok(value) => value,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug!("no source at {path:?}; continuing without it");
            D::default()
        }
        Err(error) => {
            warn!("discarding malformed source {path:?}: {error}");
            D::default()
        }
    }
}

/// One row of the upstream team list.
#[derive(Clone, Debug, Deserialize)]
pub struct TeamEntry {
    pub id: u32,
    pub name: String,
    pub league: String,
}

pub fn load_teams(path: impl AsRef<Path>) -> FxHashMap<u32, TeamEntry> {
    let rows: Vec<TeamEntry> = read_json_or_default(path);
    rows.into_iter().map(|row| (row.id, row)).collect()
}

/// League key → positive strength multiplier. Leagues absent from the table resolve
/// to a neutral `1.0`.
#[derive(Clone, Debug, Default)]
pub struct LeagueCoefficients {
    coefficients: FxHashMap<String, f64>,
}
impl LeagueCoefficients {
    pub fn get(&self, league: &str) -> f64 {
        self.coefficients.get(league).copied().unwrap_or(1.0)
    }

    pub fn load(path: impl AsRef<Path>) -> Self {
        Self {
            coefficients: read_json_or_default(path),
        }
    }
}
impl<const N: usize> From<[(&str, f64); N]> for LeagueCoefficients {
    fn from(entries: [(&str, f64); N]) -> Self {
        Self {
            coefficients: entries
                .into_iter()
                .map(|(league, coefficient)| (league.into(), coefficient))
                .collect(),
        }
    }
}

/// Team id → manual multiplicative override. Teams absent from the table resolve to
/// a neutral `1.0`. The upstream file keys team ids as strings.
#[derive(Clone, Debug, Default)]
pub struct Boosters {
    boosters: FxHashMap<u32, f64>,
}
impl Boosters {
    pub fn get(&self, team_id: u32) -> f64 {
        self.boosters.get(&team_id).copied().unwrap_or(1.0)
    }

    pub fn load(path: impl AsRef<Path>) -> Self {
        let raw: FxHashMap<String, f64> = read_json_or_default(path);
        Self::from_raw(raw)
    }

    fn from_raw(raw: FxHashMap<String, f64>) -> Self {
        let mut boosters = FxHashMap::default();
        for (key, multiplier) in raw {
            match key.parse::<u32>() {
                Ok(team_id) => {
                    boosters.insert(team_id, multiplier);
                }
                Err(_) => warn!("discarding booster with unparseable team id {key:?}"),
            }
        }
        Self { boosters }
    }
}
impl<const N: usize> From<[(u32, f64); N]> for Boosters {
    fn from(entries: [(u32, f64); N]) -> Self {
        Self {
            boosters: entries.into_iter().collect(),
        }
    }
}

/// Aggregated head-to-head history for an ordered (home, away) pair: average goals
/// scored by each side across up to the last N meetings, and how many meetings
/// contributed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct H2hRecord {
    pub avg_home: f64,
    pub avg_away: f64,
    pub matches: u32,
}
impl H2hRecord {
    /// The same history viewed from the opposite venue assignment.
    pub fn flip(&self) -> H2hRecord {
        H2hRecord {
            avg_home: self.avg_away,
            avg_away: self.avg_home,
            matches: self.matches,
        }
    }
}

/// One entry of the upstream head-to-head file as written: the averages are `null`
/// for pairings with no recorded history, and odds fields ride alongside in the
/// same object (ignored here).
#[derive(Clone, Copy, Debug, Deserialize)]
struct RawH2hRecord {
    #[serde(default)]
    avg_home: Option<f64>,
    #[serde(default)]
    avg_away: Option<f64>,
    #[serde(default, rename = "num_matches")]
    matches: u32,
}

/// Head-to-head table keyed by ordered (home, away) team-id pairs. The upstream file
/// keys entries as `"home_<hid>_<aid>"`.
#[derive(Clone, Debug, Default)]
pub struct H2hTable {
    records: FxHashMap<(u32, u32), H2hRecord>,
}
impl H2hTable {
    /// Looks up the history for the given pairing. A record stored under the reverse
    /// pairing is flipped before being returned.
    pub fn get(&self, home_id: u32, away_id: u32) -> Option<H2hRecord> {
        self.records.get(&(home_id, away_id)).copied().or_else(|| {
            self.records
                .get(&(away_id, home_id))
                .map(H2hRecord::flip)
        })
    }

    pub fn insert(&mut self, home_id: u32, away_id: u32, record: H2hRecord) {
        self.records.insert((home_id, away_id), record);
    }

    pub fn load(path: impl AsRef<Path>) -> Self {
        let raw: FxHashMap<String, RawH2hRecord> = read_json_or_default(path);
        Self::from_raw(raw)
    }

    fn from_raw(raw: FxHashMap<String, RawH2hRecord>) -> Self {
        let mut table = Self::default();
        for (key, record) in raw {
            let Some((home_id, away_id)) = parse_h2h_key(&key) else {
                warn!("discarding head-to-head entry with unparseable key {key:?}");
                continue;
            };
            // Null averages mark a pairing the upstream found no history for.
            let (Some(avg_home), Some(avg_away)) = (record.avg_home, record.avg_away) else {
                debug!("no head-to-head history behind {key:?}");
                continue;
            };
            table.insert(
                home_id,
                away_id,
                H2hRecord {
                    avg_home,
                    avg_away,
                    matches: record.matches,
                },
            );
        }
        table
    }
}

fn parse_h2h_key(key: &str) -> Option<(u32, u32)> {
    let mut parts = key.strip_prefix("home_")?.splitn(2, '_');
    let home_id = parts.next()?.parse().ok()?;
    let away_id = parts.next()?.parse().ok()?;
    Some((home_id, away_id))
}

/// Raw totals for one venue in the split ("API") schema.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct VenueTotals {
    #[serde(default)]
    pub matches: u32,
    #[serde(default)]
    pub goals_for: f64,
    #[serde(default)]
    pub goals_against: f64,
}

/// One per-team file in the split schema: raw goal totals and match counts, nested
/// by venue. Rates are derived later by the profile store.
#[derive(Clone, Debug, Deserialize)]
pub struct SplitStats {
    pub team_id: u32,
    #[serde(default)]
    pub league_id: Option<u32>,
    #[serde(default)]
    pub home: VenueTotals,
    #[serde(default)]
    pub away: VenueTotals,
}

/// One row of a manual per-league file in the overall schema: a single
/// rate-per-match for each field, applied to both venues. Goals use the
/// `scored`/`conceded` pair; corners and shots carry their own for/against pairs.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OverallRow {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub scored: Option<f64>,
    #[serde(default)]
    pub conceded: Option<f64>,
    #[serde(default)]
    pub corners: Option<f64>,
    #[serde(default)]
    pub corners_conceded: Option<f64>,
    #[serde(default)]
    pub shots: Option<f64>,
    #[serde(default)]
    pub shots_conceded: Option<f64>,
}

/// Loads every split-schema file (one team per file) in a directory.
pub fn load_split_dir(dir: impl AsRef<Path>) -> FxHashMap<u32, SplitStats> {
    let mut stats = FxHashMap::default();
    for path in json_files(dir.as_ref()) {
        match read_json::<SplitStats>(&path) {
            Ok(team) => {
                stats.insert(team.team_id, team);
            }
            Err(error) => warn!("discarding malformed source {path:?}: {error}"),
        }
    }
    stats
}

/// Loads every manual per-league file (an array of team rows per file) in a
/// directory.
pub fn load_manual_dir(dir: impl AsRef<Path>) -> FxHashMap<u32, OverallRow> {
    let mut rows = FxHashMap::default();
    for path in json_files(dir.as_ref()) {
        match read_json::<Vec<OverallRow>>(&path) {
            Ok(teams) => {
                for team in teams {
                    rows.insert(team.id, team);
                }
            }
            Err(error) => warn!("discarding malformed source {path:?}: {error}"),
        }
    }
    rows
}

pub fn load_fixtures(path: impl AsRef<Path>) -> Result<Vec<Fixture>, io::Error> {
    read_json(path)
}

fn json_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) => {
            debug!("no source directory at {dir:?}: {error}");
            return vec![];
        }
    };
    let mut files: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|extension| extension == "json"))
        .collect();
    files.sort();
    files
}
