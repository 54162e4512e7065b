use crate::region::RegionGraph;
use serde::{Deserialize, Serialize};

/// Rounded counts for one region on one day.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RegionCounts {
    pub name: String,
    pub susceptible: u64,
    pub infected: u64,
}

/// What displays receive after each simulated day. `day` is 1-indexed: the first simulated
/// day is day 1. Regions are in the graph's order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DaySnapshot {
    pub day: usize,
    pub regions: Vec<RegionCounts>,
}

impl DaySnapshot {
    /// Rounds the current state of every region in `graph`.
    pub fn from_graph(day: usize, graph: &RegionGraph) -> Self {
        let regions = graph
            .regions()
            .map(|region| {
                let (susceptible, infected) = region.state().rounded();
                RegionCounts {
                    name: region.name().to_string(),
                    susceptible,
                    infected,
                }
            })
            .collect();
        DaySnapshot { day, regions }
    }

    pub fn get(&self, name: &str) -> Option<&RegionCounts> {
        self.regions.iter().find(|counts| counts.name == name)
    }

    /// `(name, infected)` for every region, the input of `SimulationDisplay::render`.
    pub fn infected_counts(&self) -> Vec<(&str, u64)> {
        self.regions
            .iter()
            .map(|counts| (counts.name.as_str(), counts.infected))
            .collect()
    }

    pub fn total_infected(&self) -> u64 {
        self.regions.iter().map(|counts| counts.infected).sum()
    }
}
