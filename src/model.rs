/*!

The daily state transition of the epidemic.

For a region `i` with susceptible `S_i`, infected `I_i` and population `N_i`, one day adds

 - `beta_intra * S_i * I_i / N_i` from transmission inside the region,
 - `theta * (N_j / N_max)^beta_exponent * (I_j / N_j) * S_i` for every declared neighbor `j`,
 - the same term for every non-neighbor `k` that had a long-range contact with `i` that day,

capped at `S_i`. `N_max` is the largest population in the graph. A long-range contact happens
independently for every ordered pair of non-neighbors with probability
`non_neighbor_transmission_chance`, and is re-drawn every day.

Every region's next state is computed from the previous day's values of all regions into a
staging buffer, which is committed in one step. The order in which regions are visited
therefore cannot change the result.

*/

use crate::{
    context::Context,
    define_rng,
    log::{debug, trace},
    parameters::{ContextParametersExt, Parameters},
    random::ContextRandomExt,
    region::{ContextRegionExtInternal, RegionGraph, RegionId, RegionState},
    report::DaySnapshot,
};
use rand::Rng;

define_rng!(LongRangeContactRng);

/// Draws the long-range contacts of one day from `candidates` (ordered non-neighbor pairs,
/// see [`RegionGraph::non_neighbor_pairs`]). A returned pair `(i, k)` means `k` may infect `i`
/// today. Candidates are tried in order, one draw each; nothing is drawn if `chance` is 0.
pub fn sample_long_range_contacts<R: Rng + ?Sized>(
    candidates: &[(RegionId, RegionId)],
    chance: f64,
    rng: &mut R,
) -> Vec<(RegionId, RegionId)> {
    if chance <= 0.0 {
        return Vec::new();
    }
    candidates
        .iter()
        .copied()
        .filter(|_| rng.random_bool(chance))
        .collect()
}

/// Per-susceptible infection pressure that `source` exerts on another region.
fn inter_district_pressure(graph: &RegionGraph, parameters: &Parameters, source: RegionId) -> f64 {
    let region = graph.get_region(source);
    let population = region.population() as f64;
    let relative_size = population / graph.population_max() as f64;

    let prevalence = region.infected() / population;
    parameters.theta * relative_size.powf(parameters.beta_exponent) * prevalence
}

/// Computes the next state of every region without touching `graph`. The result is indexed
/// by `RegionId`.
pub fn compute_next_day(
    graph: &RegionGraph,
    parameters: &Parameters,
    contacts: &[(RegionId, RegionId)],
) -> Vec<RegionState> {
    let mut contacts_by_target: Vec<Vec<RegionId>> = vec![Vec::new(); graph.len()];
    for &(target, source) in contacts {
        contacts_by_target[target.index()].push(source);
    }

    graph
        .region_ids()
        .map(|region_id| {
            let region = graph.get_region(region_id);
            let susceptible = region.susceptible();
            let infected = region.infected();
            let population = region.population() as f64;

            let intra = parameters.beta_intra * susceptible * infected / population;

            let mut inter = 0.0;
            for &neighbor in region.neighbors() {
                inter += inter_district_pressure(graph, parameters, neighbor) * susceptible;
            }
            for &source in &contacts_by_target[region_id.index()] {
                inter += inter_district_pressure(graph, parameters, source) * susceptible;
            }

            let new_infections = (intra + inter).min(susceptible);
            RegionState {
                susceptible: susceptible - new_infections,
                infected: infected + new_infections,
            }
        })
        .collect()
}

/// Advances `graph` by one day, drawing long-range contacts from `rng`.
pub fn advance_graph<R: Rng + ?Sized>(
    graph: &mut RegionGraph,
    parameters: &Parameters,
    rng: &mut R,
) {
    let candidates = if parameters.non_neighbor_transmission_chance > 0.0 {
        graph.non_neighbor_pairs()
    } else {
        Vec::new()
    };
    let contacts =
        sample_long_range_contacts(&candidates, parameters.non_neighbor_transmission_chance, rng);
    let next = compute_next_day(graph, parameters, &contacts);
    graph.commit(next);
}

pub trait ContextModelExt {
    /// Advances the installed region graph by one day, using the context's parameters and its
    /// `LongRangeContactRng`, and returns the rounded snapshot tagged with `day`.
    fn advance_day(&mut self, day: usize) -> DaySnapshot;
}

impl ContextModelExt for Context {
    fn advance_day(&mut self, day: usize) -> DaySnapshot {
        let parameters = self.get_parameters_or_default().clone();
        let chance = parameters.non_neighbor_transmission_chance;
        let contacts = if chance > 0.0 {
            let candidates = self.get_region_graph_mut().non_neighbor_pairs();
            self.sample::<LongRangeContactRng, _>(|rng| {
                sample_long_range_contacts(&candidates, chance, rng)
            })
        } else {
            Vec::new()
        };
        trace!("day {day}: {} long-range contacts", contacts.len());

        let graph = self.get_region_graph_mut();
        let next = compute_next_day(graph, &parameters, &contacts);
        graph.commit(next);

        let snapshot = DaySnapshot::from_graph(day, graph);
        for region in graph.regions() {
            debug!(
                "day {day} {}: susceptible {:.3}, infected {:.3}",
                region.name(),
                region.susceptible(),
                region.infected()
            );
        }
        snapshot
    }
}
