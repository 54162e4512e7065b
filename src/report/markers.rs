/*!

The map overlay: a cloud of markers per region whose size tracks the region's infected count.
Placement is purely cosmetic. Each marker is the region's coordinates plus independent normal
jitter in latitude and longitude, drawn from the layer's own seeded generator.

*/

use crate::{
    error::SpreadError,
    hashing::HashMap,
    log::trace,
    region::{Coordinates, RegionGraph},
    report::{DaySnapshot, SimulationDisplay},
};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::{cell::RefCell, rc::Rc};

/// Infected people represented by one marker.
pub const DEFAULT_PEOPLE_PER_MARKER: u64 = 10;
/// Standard deviation of the jitter, in degrees.
pub const DEFAULT_JITTER: f64 = 0.02;

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub region: String,
    pub position: Coordinates,
}

/// A read handle on the markers of a [`MarkerLayer`], valid after the layer has been moved
/// into a `Context`.
#[derive(Clone, Default)]
pub struct MarkerView(Rc<RefCell<Vec<Marker>>>);

impl MarkerView {
    pub fn markers(&self) -> Vec<Marker> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn count_for(&self, region: &str) -> usize {
        self.0.borrow().iter().filter(|marker| marker.region == region).count()
    }
}

pub struct MarkerLayer {
    origins: HashMap<String, Coordinates>,
    people_per_marker: u64,
    jitter: Normal<f64>,
    rng: StdRng,
    markers: MarkerView,
}

impl MarkerLayer {
    pub fn new(graph: &RegionGraph, seed: u64) -> Result<Self, SpreadError> {
        Self::with_settings(graph, seed, DEFAULT_PEOPLE_PER_MARKER, DEFAULT_JITTER)
    }

    pub fn with_settings(
        graph: &RegionGraph,
        seed: u64,
        people_per_marker: u64,
        jitter: f64,
    ) -> Result<Self, SpreadError> {
        if people_per_marker == 0 {
            return Err(SpreadError::InvalidParameter {
                name: "people_per_marker",
                value: 0.0,
            });
        }
        // `Normal` accepts a negative standard deviation and mirrors the distribution.
        if !jitter.is_finite() || jitter < 0.0 {
            return Err(SpreadError::InvalidParameter {
                name: "marker_jitter",
                value: jitter,
            });
        }
        let jitter = Normal::new(0.0, jitter).map_err(|_| SpreadError::InvalidParameter {
            name: "marker_jitter",
            value: jitter,
        })?;
        let origins = graph
            .regions()
            .map(|region| (region.name().to_string(), region.coords()))
            .collect();

        Ok(MarkerLayer {
            origins,
            people_per_marker,
            jitter,
            rng: StdRng::seed_from_u64(seed),
            markers: MarkerView::default(),
        })
    }

    pub fn view(&self) -> MarkerView {
        self.markers.clone()
    }
}

impl SimulationDisplay for MarkerLayer {
    fn publish(&mut self, _snapshot: &DaySnapshot) -> Result<(), SpreadError> {
        Ok(())
    }

    fn render(&mut self, infected: &[(&str, u64)]) -> Result<(), SpreadError> {
        let mut markers = Vec::new();
        for &(name, count) in infected {
            let origin = *self
                .origins
                .get(name)
                .ok_or_else(|| SpreadError::UnknownRegion { name: name.to_string() })?;
            for _ in 0..count / self.people_per_marker {
                markers.push(Marker {
                    region: name.to_string(),
                    position: Coordinates {
                        lat: origin.lat + self.jitter.sample(&mut self.rng),
                        lng: origin.lng + self.jitter.sample(&mut self.rng),
                    },
                });
            }
        }
        trace!("placed {} markers", markers.len());
        *self.markers.0.borrow_mut() = markers;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SpreadError> {
        self.markers.0.borrow_mut().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::reference_districts;

    fn graph() -> RegionGraph {
        RegionGraph::from_specs(reference_districts()).unwrap()
    }

    #[test]
    fn one_marker_per_ten_infected() {
        let mut layer = MarkerLayer::new(&graph(), 1).unwrap();
        let view = layer.view();

        layer.render(&[("Tachov", 129), ("Domažlice", 9), ("Klatovy", 20)]).unwrap();
        assert_eq!(view.count_for("Tachov"), 12);
        assert_eq!(view.count_for("Domažlice"), 0);
        assert_eq!(view.count_for("Klatovy"), 2);
        assert_eq!(view.len(), 14);
    }

    #[test]
    fn markers_stay_near_their_region() {
        let mut layer = MarkerLayer::new(&graph(), 2).unwrap();
        let view = layer.view();
        layer.render(&[("Tachov", 1_000)]).unwrap();

        for marker in view.markers() {
            assert!((marker.position.lat - 49.7956).abs() < 0.2);
            assert!((marker.position.lng - 12.6309).abs() < 0.2);
        }
    }

    #[test]
    fn render_replaces_and_clear_empties() {
        let mut layer = MarkerLayer::new(&graph(), 3).unwrap();
        let view = layer.view();

        layer.render(&[("Tachov", 50)]).unwrap();
        layer.render(&[("Tachov", 20)]).unwrap();
        assert_eq!(view.len(), 2);

        layer.clear().unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn unknown_regions_and_bad_settings_are_errors() {
        let mut layer = MarkerLayer::new(&graph(), 4).unwrap();
        assert!(matches!(layer.render(&[("Praha", 100)]), Err(SpreadError::UnknownRegion { .. })));

        assert!(MarkerLayer::with_settings(&graph(), 4, 0, DEFAULT_JITTER).is_err());
        assert!(MarkerLayer::with_settings(&graph(), 4, 10, -1.0).is_err());
    }

    #[test]
    fn jitter_must_be_a_finite_non_negative_spread() {
        for jitter in [-1.0, -0.001, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    MarkerLayer::with_settings(&graph(), 5, 10, jitter),
                    Err(SpreadError::InvalidParameter { name: "marker_jitter", .. })
                ),
                "jitter {jitter} was accepted"
            );
        }

        let mut layer = MarkerLayer::with_settings(&graph(), 5, 10, 0.0).unwrap();
        let view = layer.view();
        layer.render(&[("Tachov", 30)]).unwrap();
        assert!(view.markers().iter().all(|marker| marker.position.lat == 49.7956));
    }
}
