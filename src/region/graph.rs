use crate::{
    error::SpreadError,
    HashMap,
    HashSet,
};
use serde::{Deserialize, Serialize};

/// Dense index of a region in its graph, in the order the regions were defined.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct RegionId(pub(crate) usize);

impl RegionId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A latitude/longitude pair. Only displays use it.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// The definition of one region, as authored in a configuration file.
///
/// `population` is signed so that a negative value in a file is reported as an
/// `InvalidPopulation` error rather than as a parse failure.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RegionSpec {
    pub name: String,
    pub population: i64,
    pub coords: Coordinates,
    #[serde(default)]
    pub neighbors: Vec<String>,
    #[serde(default)]
    pub infected: f64,
}

impl RegionSpec {
    pub fn new(name: impl Into<String>, population: i64, lat: f64, lng: f64) -> Self {
        RegionSpec {
            name: name.into(),
            population,
            coords: Coordinates { lat, lng },
            neighbors: vec![],
            infected: 0.0,
        }
    }

    #[must_use]
    pub fn neighbors<S: Into<String>>(mut self, neighbors: impl IntoIterator<Item = S>) -> Self {
        self.neighbors = neighbors.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn infected(mut self, infected: f64) -> Self {
        self.infected = infected;
        self
    }
}

/// The `(susceptible, infected)` pair of one region on one day. Values are real numbers; they
/// are only rounded for display.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RegionState {
    pub susceptible: f64,
    pub infected: f64,
}

impl RegionState {
    /// Nearest-integer `(susceptible, infected)`, halves rounded up.
    pub fn rounded(&self) -> (u64, u64) {
        (self.susceptible.round() as u64, self.infected.round() as u64)
    }
}

#[derive(Clone, Debug)]
pub struct Region {
    name: String,
    population: u64,
    coords: Coordinates,
    neighbors: Vec<RegionId>,
    initial_infected: f64,
    state: RegionState,
}

impl Region {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn coords(&self) -> Coordinates {
        self.coords
    }

    /// Declared neighbors in authored order. Adjacency is not symmetrized.
    pub fn neighbors(&self) -> &[RegionId] {
        &self.neighbors
    }

    pub fn initial_infected(&self) -> f64 {
        self.initial_infected
    }

    pub fn state(&self) -> RegionState {
        self.state
    }

    pub fn susceptible(&self) -> f64 {
        self.state.susceptible
    }

    pub fn infected(&self) -> f64 {
        self.state.infected
    }

    fn seed(&mut self, infected: f64) {
        self.state = RegionState {
            susceptible: self.population as f64 - infected,
            infected,
        };
    }
}

/// The set of regions in a simulation. Populations, coordinates and adjacency are fixed at
/// construction; only each region's [`RegionState`] changes.
#[derive(Clone, Debug, Default)]
pub struct RegionGraph {
    regions: Vec<Region>,
    ids_by_name: HashMap<String, RegionId>,
    population_max: u64,
}

impl RegionGraph {
    /// Builds and validates a graph. Regions keep the order of `specs`.
    pub fn from_specs(specs: impl IntoIterator<Item = RegionSpec>) -> Result<Self, SpreadError> {
        let specs: Vec<RegionSpec> = specs.into_iter().collect();
        if specs.is_empty() {
            return Err(SpreadError::EmptyGraph);
        }

        let mut ids_by_name = HashMap::default();
        for (idx, spec) in specs.iter().enumerate() {
            if spec.population <= 0 {
                return Err(SpreadError::InvalidPopulation {
                    name: spec.name.clone(),
                    population: spec.population,
                });
            }
            let infected = spec.infected;
            if !infected.is_finite() || infected < 0.0 || infected > spec.population as f64 {
                return Err(SpreadError::InvalidSeed {
                    name: spec.name.clone(),
                    infected: spec.infected,
                });
            }
            if ids_by_name.insert(spec.name.clone(), RegionId(idx)).is_some() {
                return Err(SpreadError::DuplicateRegion { name: spec.name.clone() });
            }
        }

        let mut regions = Vec::with_capacity(specs.len());
        for (idx, spec) in specs.into_iter().enumerate() {
            let mut neighbors = Vec::with_capacity(spec.neighbors.len());
            for neighbor in &spec.neighbors {
                let neighbor_id = *ids_by_name
                    .get(neighbor)
                    .ok_or_else(|| SpreadError::UnknownRegion { name: neighbor.clone() })?;
                if neighbor_id == RegionId(idx) {
                    return Err(SpreadError::SelfNeighbor { name: spec.name });
                }
                neighbors.push(neighbor_id);
            }

            let mut region = Region {
                population: spec.population as u64,
                coords: spec.coords,
                neighbors,
                initial_infected: spec.infected,
                state: RegionState { susceptible: 0.0, infected: 0.0 },
                name: spec.name,
            };
            region.seed(region.initial_infected);
            regions.push(region);
        }

        let population_max = regions.iter().map(Region::population).max().unwrap_or_default();

        Ok(RegionGraph {
            regions,
            ids_by_name,
            population_max,
        })
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The largest population of any region. Used to normalize the inter-district term.
    pub fn population_max(&self) -> u64 {
        self.population_max
    }

    pub fn region_ids(&self) -> impl Iterator<Item = RegionId> + use<> {
        (0..self.regions.len()).map(RegionId)
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Panics if `region_id` did not come from this graph.
    pub fn get_region(&self, region_id: RegionId) -> &Region {
        &self.regions[region_id.0]
    }

    pub fn lookup(&self, name: &str) -> Result<RegionId, SpreadError> {
        self.ids_by_name
            .get(name)
            .copied()
            .ok_or_else(|| SpreadError::UnknownRegion { name: name.to_string() })
    }

    pub fn region_by_name(&self, name: &str) -> Result<&Region, SpreadError> {
        self.lookup(name).map(|region_id| self.get_region(region_id))
    }

    pub fn is_neighbor(&self, region_id: RegionId, other: RegionId) -> bool {
        self.get_region(region_id).neighbors.contains(&other)
    }

    /// Every ordered pair `(i, k)` with `k != i` and `k` not a declared neighbor of `i`,
    /// ascending by `i` then `k`.
    pub fn non_neighbor_pairs(&self) -> Vec<(RegionId, RegionId)> {
        let mut pairs = Vec::new();
        for region_id in self.region_ids() {
            let neighbors: HashSet<RegionId> =
                self.get_region(region_id).neighbors.iter().copied().collect();
            pairs.extend(
                self.region_ids()
                    .filter(|other| *other != region_id && !neighbors.contains(other))
                    .map(|other| (region_id, other)),
            );
        }
        pairs
    }

    /// Replaces the state of every region at once. `states` is indexed by `RegionId`.
    pub(crate) fn commit(&mut self, states: Vec<RegionState>) {
        assert_eq!(states.len(), self.regions.len(), "one staged state per region");
        for (region, state) in self.regions.iter_mut().zip(states) {
            region.state = state;
        }
    }

    /// Clears every infection: `infected = 0`, `susceptible = population`.
    pub fn reset(&mut self) {
        for region in &mut self.regions {
            region.seed(0.0);
        }
    }

    /// Puts every region back to its configured initial infected count.
    pub fn restore_seeding(&mut self) {
        for region in &mut self.regions {
            region.seed(region.initial_infected);
        }
    }
}
