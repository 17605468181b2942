//! Typed entity identifiers.
//!
//! Player columns arrive as `<team>_<number>_<axis>` headers. They are parsed
//! exactly once into a [`ColumnKey`]; nothing downstream looks at strings.
//!
//! `EntityId` ordering (team first, Home before Away, then shirt number) is the
//! tie-break order used wherever two entities are equally close to the ball.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

/// Team side of a tracked player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    Home,
    Away,
}

impl Team {
    /// Lower-case prefix used in track column headers.
    pub fn column_prefix(self) -> &'static str {
        match self {
            Team::Home => "home",
            Team::Away => "away",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Team::Home => "Home",
            Team::Away => "Away",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Team {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(Team::Home),
            "away" => Ok(Team::Away),
            other => Err(AnalysisError::unsupported(format!(
                "unknown team '{}', expected Home or Away",
                other
            ))),
        }
    }
}

/// A tracked player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId {
    pub team: Team,
    pub number: u32,
}

impl EntityId {
    pub fn new(team: Team, number: u32) -> Self {
        Self { team, number }
    }

    pub fn is_teammate_of(&self, other: &EntityId) -> bool {
        self.team == other.team && self.number != other.number
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_{}", self.team.column_prefix(), self.number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Parsed `<team>_<number>_<axis>` column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnKey {
    pub entity: EntityId,
    pub axis: Axis,
}

impl ColumnKey {
    /// Parse a player column header.
    ///
    /// Returns `None` for anything that is not a player coordinate column
    /// (`Time`, `ball_x`, vendor extras), so callers can skip those.
    pub fn parse(header: &str) -> Option<ColumnKey> {
        let mut parts = header.trim().split('_');
        let team = match parts.next()?.to_ascii_lowercase().as_str() {
            "home" => Team::Home,
            "away" => Team::Away,
            _ => return None,
        };
        let number = parts.next()?.parse::<u32>().ok()?;
        let axis = match parts.next()? {
            "x" | "X" => Axis::X,
            "y" | "Y" => Axis::Y,
            _ => return None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(ColumnKey {
            entity: EntityId::new(team, number),
            axis,
        })
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let axis = match self.axis {
            Axis::X => "x",
            Axis::Y => "y",
        };
        write!(f, "{}_{}", self.entity, axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_columns() {
        let key = ColumnKey::parse("home_23_x").unwrap();
        assert_eq!(key.entity, EntityId::new(Team::Home, 23));
        assert_eq!(key.axis, Axis::X);

        let key = ColumnKey::parse("Away_4_y").unwrap();
        assert_eq!(key.entity, EntityId::new(Team::Away, 4));
        assert_eq!(key.axis, Axis::Y);
        assert_eq!(key.to_string(), "away_4_y");
    }

    #[test]
    fn test_parse_rejects_non_player_columns() {
        assert_eq!(ColumnKey::parse("ball_x"), None);
        assert_eq!(ColumnKey::parse("Time"), None);
        assert_eq!(ColumnKey::parse("home_x"), None);
        assert_eq!(ColumnKey::parse("home_7_z"), None);
        assert_eq!(ColumnKey::parse("home_7_x_smoothed"), None);
    }

    #[test]
    fn test_entity_order_is_team_then_number() {
        let mut ids = vec![
            EntityId::new(Team::Away, 1),
            EntityId::new(Team::Home, 10),
            EntityId::new(Team::Home, 2),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                EntityId::new(Team::Home, 2),
                EntityId::new(Team::Home, 10),
                EntityId::new(Team::Away, 1),
            ]
        );
    }

    #[test]
    fn test_teammate() {
        let a = EntityId::new(Team::Home, 7);
        assert!(a.is_teammate_of(&EntityId::new(Team::Home, 8)));
        assert!(!a.is_teammate_of(&a));
        assert!(!a.is_teammate_of(&EntityId::new(Team::Away, 8)));
    }

    #[test]
    fn test_team_from_str() {
        assert_eq!("Home".parse::<Team>().unwrap(), Team::Home);
        assert_eq!("away".parse::<Team>().unwrap(), Team::Away);
        assert!("Visitors".parse::<Team>().is_err());
    }
}
