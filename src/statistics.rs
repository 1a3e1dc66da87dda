//! Opt-in run diagnostics in the teacher's own style: counts and
//! timings gathered around the engine without influencing its
//! behavior, printed to stderr when `--verbose` is given (§9.5).
use custom_debug_derive::Debug;
use std::time::{Duration, Instant};

use crate::debug::opt_fmt;
use crate::prefix::Level;

/// Per-level view of the engine's own stat_gen/stat_can/stat_out
/// counters, snapshotted for reporting.
#[derive(Debug)]
pub struct LevelStatistics {
    pub level: usize,
    pub generated: u64,
    pub canonical: u64,
    pub emitted: u64,
}

impl LevelStatistics {
    pub fn from_levels(levels: &[Level]) -> Vec<Self> {
        levels
            .iter()
            .enumerate()
            .map(|(level, l)| LevelStatistics {
                level,
                generated: l.stat_gen,
                canonical: l.stat_can,
                emitted: l.stat_out,
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct Statistics {
    #[debug(skip)]
    start_time: Instant,
    #[debug(with = "opt_fmt")]
    end_time: Option<Duration>,
    total_emissions: u64,
    levels: Vec<LevelStatistics>,
}

impl Statistics {
    pub fn start() -> Self {
        Statistics {
            start_time: Instant::now(),
            end_time: None,
            total_emissions: 0,
            levels: Vec::new(),
        }
    }

    pub fn log_emission(&mut self) {
        self.total_emissions += 1;
    }

    pub fn finish(&mut self, levels: &[Level]) {
        self.end_time = Some(self.start_time.elapsed());
        self.levels = LevelStatistics::from_levels(levels);
    }

    pub fn report(&self) {
        eprintln!("{:#?}", self);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::transversal::Traversal;

    fn empty_level() -> Level {
        Level {
            prefix_vertex: 0,
            traversal: Traversal { elements: vec![0], permutations: vec![crate::permutation::Permutation::identity(1)] },
            trav_ind: vec![true],
            orbit: vec![true],
            seed_min: vec![true],
            stat_gen: 0,
            stat_can: 0,
            stat_out: 0,
        }
    }

    #[test]
    fn log_emission_increments_total() {
        let mut stats = Statistics::start();
        stats.log_emission();
        stats.log_emission();
        assert_eq!(stats.total_emissions, 2);
    }

    #[test]
    fn finish_snapshots_level_counters() {
        let mut stats = Statistics::start();
        let mut level = empty_level();
        level.stat_gen = 5;
        level.stat_can = 3;
        level.stat_out = 1;
        stats.finish(&[level]);
        assert_eq!(stats.levels.len(), 1);
        assert_eq!(stats.levels[0].generated, 5);
        assert_eq!(stats.levels[0].canonical, 3);
        assert_eq!(stats.levels[0].emitted, 1);
    }
}
