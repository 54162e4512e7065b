use crate::{
    context::Context,
    error::SpreadError,
    log::{debug, info},
    new_trait::New,
    region::{RegionGraph, RegionId, RegionSpec, RegionState},
};

/// Holds the simulation's one `RegionGraph`. Empty until regions are installed.
#[derive(Default)]
pub(crate) struct RegionData {
    pub(crate) graph: RegionGraph,
}

impl New for RegionData {
    const new: &'static dyn Fn() -> Self = &RegionData::default;
}

pub trait ContextRegionExt {
    /// Builds a graph from `specs` and installs it, replacing any previous graph.
    fn add_regions(
        &mut self,
        specs: impl IntoIterator<Item = RegionSpec>,
    ) -> Result<(), SpreadError>;

    /// The installed graph, or `None` before `add_regions` succeeds.
    fn get_region_graph(&self) -> Option<&RegionGraph>;

    fn lookup_region(&self, name: &str) -> Result<RegionId, SpreadError>;

    fn get_region_state(&self, name: &str) -> Result<RegionState, SpreadError>;

    /// Sets every region to `infected = 0`, `susceptible = population`.
    fn reset_regions(&mut self);

    /// Sets every region back to its configured initial infected count.
    fn restore_region_seeding(&mut self);
}

pub(crate) trait ContextRegionExtInternal {
    fn get_region_graph_mut(&mut self) -> &mut RegionGraph;
}

impl ContextRegionExt for Context {
    fn add_regions(
        &mut self,
        specs: impl IntoIterator<Item = RegionSpec>,
    ) -> Result<(), SpreadError> {
        let graph = RegionGraph::from_specs(specs)?;
        info!(
            "installed {} regions, largest population {}",
            graph.len(),
            graph.population_max()
        );
        self.get_data_container_mut::<RegionData>().graph = graph;
        Ok(())
    }

    fn get_region_graph(&self) -> Option<&RegionGraph> {
        self.get_data_container::<RegionData>()
            .map(|region_data| &region_data.graph)
    }

    fn lookup_region(&self, name: &str) -> Result<RegionId, SpreadError> {
        match self.get_region_graph() {
            Some(graph) => graph.lookup(name),
            None => Err(SpreadError::UnknownRegion { name: name.to_string() }),
        }
    }

    fn get_region_state(&self, name: &str) -> Result<RegionState, SpreadError> {
        match self.get_region_graph() {
            Some(graph) => graph.region_by_name(name).map(|region| region.state()),
            None => Err(SpreadError::UnknownRegion { name: name.to_string() }),
        }
    }

    fn reset_regions(&mut self) {
        debug!("clearing infections in every region");
        self.get_region_graph_mut().reset();
    }

    fn restore_region_seeding(&mut self) {
        debug!("restoring initial infections");
        self.get_region_graph_mut().restore_seeding();
    }
}

impl ContextRegionExtInternal for Context {
    fn get_region_graph_mut(&mut self) -> &mut RegionGraph {
        &mut self.get_data_container_mut::<RegionData>().graph
    }
}
