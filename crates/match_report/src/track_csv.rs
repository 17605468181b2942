//! Team track CSV loader
//!
//! Expected columns (any order, extra columns ignored):
//! - `Time`, `IdPeriod`, `MatchId`: sample key
//! - `ball_x`, `ball_y`: ball position in centimeters
//! - `<team>_<number>_x`, `<team>_<number>_y`: one pair per tracked player
//!
//! Empty player cells mean the player is untracked at that sample. Rows
//! without a ball position cannot be aligned and are skipped.

use anyhow::{Context, Result};
use possession_core::{AnalysisError, Axis, ColumnKey, EntityId, Point, Team, Track, TrackSample};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const TIME: &str = "Time";
const PERIOD: &str = "IdPeriod";
const MATCH_ID: &str = "MatchId";
const BALL_X: &str = "ball_x";
const BALL_Y: &str = "ball_y";

/// Column indices resolved once from the header row.
#[derive(Debug)]
struct HeaderLayout {
    time: usize,
    period: usize,
    match_id: usize,
    ball_x: usize,
    ball_y: usize,
    /// Sorted by entity; `(entity, x column, y column)`
    players: Vec<(EntityId, usize, usize)>,
}

impl HeaderLayout {
    fn parse(headers: &csv::StringRecord, team: Team) -> std::result::Result<Self, AnalysisError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| AnalysisError::unsupported(format!("missing column '{}'", name)))
        };

        let mut axes: BTreeMap<EntityId, (Option<usize>, Option<usize>)> = BTreeMap::new();
        for (idx, header) in headers.iter().enumerate() {
            let Some(key) = ColumnKey::parse(header) else {
                if ![TIME, PERIOD, MATCH_ID, BALL_X, BALL_Y].contains(&header.trim()) {
                    debug!(column = header, "ignoring column");
                }
                continue;
            };
            if key.entity.team != team {
                warn!(column = %key, track = %team, "skipping column of the other team");
                continue;
            }
            let slot = axes.entry(key.entity).or_default();
            match key.axis {
                Axis::X => slot.0 = Some(idx),
                Axis::Y => slot.1 = Some(idx),
            }
        }

        let mut players = Vec::with_capacity(axes.len());
        for (entity, cols) in axes {
            match cols {
                (Some(x), Some(y)) => players.push((entity, x, y)),
                (Some(_), None) => {
                    return Err(AnalysisError::unsupported(format!(
                        "column {}_x has no matching {}_y",
                        entity, entity
                    )))
                }
                _ => {
                    return Err(AnalysisError::unsupported(format!(
                        "column {}_y has no matching {}_x",
                        entity, entity
                    )))
                }
            }
        }

        Ok(Self {
            time: find(TIME)?,
            period: find(PERIOD)?,
            match_id: find(MATCH_ID)?,
            ball_x: find(BALL_X)?,
            ball_y: find(BALL_Y)?,
            players,
        })
    }

    fn roster(&self) -> Vec<EntityId> {
        self.players.iter().map(|(e, _, _)| *e).collect()
    }
}

/// Integer cell; spreadsheet exports sometimes write `10.0` for `10`.
fn parse_int(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    cell.parse::<i64>().ok().or_else(|| {
        let v = cell.parse::<f64>().ok()?;
        (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
    })
}

/// Coordinate cell; empty or non-finite means "no position".
fn parse_coord(cell: &str) -> Result<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    let v: f64 = cell
        .parse()
        .with_context(|| format!("invalid coordinate '{}'", cell))?;
    Ok(v.is_finite().then_some(v))
}

fn parse_point(x: &str, y: &str) -> Result<Option<Point>> {
    Ok(match (parse_coord(x)?, parse_coord(y)?) {
        (Some(x), Some(y)) => Some(Point::new(x, y)),
        _ => None,
    })
}

/// Read one team's track from CSV data.
pub fn read_track<R: Read>(reader: R, team: Team) -> Result<Track> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let layout = HeaderLayout::parse(&headers, team)?;

    let mut samples = Vec::new();
    let mut skipped = 0usize;
    for (row, result) in reader.records().enumerate() {
        // 1-based data line, after the header
        let line = row + 2;
        let record = result.with_context(|| format!("Failed to read CSV line {}", line))?;

        let int_cell = |idx: usize, name: &str| {
            parse_int(&record[idx]).with_context(|| {
                format!("line {}: invalid {} value '{}'", line, name, &record[idx])
            })
        };
        let time = int_cell(layout.time, TIME)?;
        let period = u32::try_from(int_cell(layout.period, PERIOD)?)
            .with_context(|| format!("line {}: negative {}", line, PERIOD))?;
        let match_id = u64::try_from(int_cell(layout.match_id, MATCH_ID)?)
            .with_context(|| format!("line {}: negative {}", line, MATCH_ID))?;

        let Some(ball) = parse_point(&record[layout.ball_x], &record[layout.ball_y])
            .with_context(|| format!("line {}: invalid ball position", line))?
        else {
            skipped += 1;
            continue;
        };

        let positions = layout
            .players
            .iter()
            .map(|&(entity, x, y)| {
                parse_point(&record[x], &record[y])
                    .with_context(|| format!("line {}: invalid position for {}", line, entity))
            })
            .collect::<Result<Vec<_>>>()?;

        samples.push(TrackSample {
            time,
            period,
            match_id,
            ball,
            positions,
        });
    }

    if skipped > 0 {
        warn!(track = %team, skipped, "rows without ball position skipped");
    }
    debug!(
        track = %team,
        rows = samples.len(),
        players = layout.players.len(),
        "track loaded"
    );

    Ok(Track::new(team, layout.roster(), samples)?)
}

/// Load one team's track from a CSV file.
pub fn load_track_csv(path: &Path, team: Team) -> Result<Track> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    read_track(file, team).with_context(|| format!("Failed to load track: {}", path.display()))
}
