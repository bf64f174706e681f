//! Elementary fixture vocabulary shared by every pipeline stage.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter};

/// One of the two teams contesting a fixture.
#[derive(Clone, Copy, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}
impl Side {
    pub fn flip(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// The three statistic axes carried through the pipeline. Each is modelled as an
/// independent Poisson process per side.
#[derive(
    Clone, Copy, Debug, Display, EnumCount, EnumIter, Hash, PartialEq, Eq, PartialOrd, Ord,
)]
pub enum Stat {
    Goals,
    Corners,
    Shots,
}

/// A scalar per statistic axis, indexable by [`Stat`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PerStat {
    pub goals: f64,
    pub corners: f64,
    pub shots: f64,
}
impl Index<Stat> for PerStat {
    type Output = f64;

    fn index(&self, stat: Stat) -> &f64 {
        match stat {
            Stat::Goals => &self.goals,
            Stat::Corners => &self.corners,
            Stat::Shots => &self.shots,
        }
    }
}
impl IndexMut<Stat> for PerStat {
    fn index_mut(&mut self, stat: Stat) -> &mut f64 {
        match stat {
            Stat::Goals => &mut self.goals,
            Stat::Corners => &mut self.corners,
            Stat::Shots => &mut self.shots,
        }
    }
}

/// A fixture to be projected: two team ids and an optional upstream fixture id used
/// for deterministic seeding of the simulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub fixture_id: Option<u64>,
    pub home_id: u32,
    pub away_id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn side_flip() {
        assert_eq!(Side::Away, Side::Home.flip());
        assert_eq!(Side::Home, Side::Away.flip());
    }

    #[test]
    fn per_stat_indexing() {
        let mut per_stat = PerStat::default();
        for (ordinal, stat) in Stat::iter().enumerate() {
            per_stat[stat] = ordinal as f64;
        }
        assert_eq!(0.0, per_stat.goals);
        assert_eq!(1.0, per_stat.corners);
        assert_eq!(2.0, per_stat.shots);
    }

    #[test]
    fn fixture_deserialises_without_id() {
        let fixture: Fixture = serde_json::from_str(r#"{"home_id": 33, "away_id": 40}"#).unwrap();
        assert_eq!(None, fixture.fixture_id);
        assert_eq!(33, fixture.home_id);
    }
}
