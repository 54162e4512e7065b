/*!

Run configuration. [`Parameters`] carries the transmission coefficients of the model plus the
driver's horizon and cadence. It deserializes from JSON with every field optional; missing
fields take the values of the reference Plzeň run.

```json
{
  "beta_intra": 0.3,
  "theta": 0.05,
  "beta_exponent": 1.0,
  "non_neighbor_transmission_chance": 0.01,
  "num_days": 50,
  "tick_interval": 1.0,
  "seed": 0
}
```

*/

use crate::{
    context::Context,
    error::SpreadError,
    new_trait::New,
};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    /// Intra-district (mass-action) transmission coefficient.
    pub beta_intra: f64,
    /// Inter-district transmission coefficient.
    pub theta: f64,
    /// Exponent applied to a source region's population relative to the largest region.
    pub beta_exponent: f64,
    /// Per-day probability of a long-range contact between an ordered pair of regions that
    /// are not neighbors.
    pub non_neighbor_transmission_chance: f64,
    /// Number of days the driver simulates before finishing.
    pub num_days: usize,
    /// Simulated time between two ticks of the driver.
    pub tick_interval: f64,
    /// Base seed for every random number generator in the run.
    pub seed: u64,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            beta_intra: 0.3,
            theta: 0.05,
            beta_exponent: 1.0,
            non_neighbor_transmission_chance: 0.01,
            num_days: 50,
            tick_interval: 1.0,
            seed: 0,
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> Result<(), SpreadError> {
        let non_negative = [
            ("beta_intra", self.beta_intra),
            ("theta", self.theta),
            ("beta_exponent", self.beta_exponent),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SpreadError::InvalidParameter { name, value });
            }
        }

        let chance = self.non_neighbor_transmission_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(SpreadError::InvalidParameter {
                name: "non_neighbor_transmission_chance",
                value: chance,
            });
        }

        if !self.tick_interval.is_finite() || self.tick_interval <= 0.0 {
            return Err(SpreadError::InvalidParameter {
                name: "tick_interval",
                value: self.tick_interval,
            });
        }

        Ok(())
    }
}

/// Reads and validates parameters from a JSON file.
pub fn load_parameters_from_json(path: impl AsRef<Path>) -> Result<Parameters, SpreadError> {
    let reader = BufReader::new(File::open(path)?);
    let parameters: Parameters = serde_json::from_reader(reader)?;
    parameters.validate()?;
    Ok(parameters)
}

struct ParametersPlugin {
    parameters: Parameters,
}

impl New for ParametersPlugin {
    const new: &'static dyn Fn() -> Self = &|| ParametersPlugin {
        parameters: Parameters::default(),
    };
}

pub trait ContextParametersExt {
    /// Validates and stores the parameters for this run.
    fn set_parameters(&mut self, parameters: Parameters) -> Result<(), SpreadError>;

    /// The parameters of this run, or `None` if none were set.
    fn get_parameters(&self) -> Option<&Parameters>;

    /// The parameters of this run, installing the defaults if none were set.
    fn get_parameters_or_default(&mut self) -> &Parameters;
}

impl ContextParametersExt for Context {
    fn set_parameters(&mut self, parameters: Parameters) -> Result<(), SpreadError> {
        parameters.validate()?;
        self.get_data_container_mut::<ParametersPlugin>().parameters = parameters;
        Ok(())
    }

    fn get_parameters(&self) -> Option<&Parameters> {
        self.get_data_container::<ParametersPlugin>()
            .map(|plugin| &plugin.parameters)
    }

    fn get_parameters_or_default(&mut self) -> &Parameters {
        &self.get_data_container_mut::<ParametersPlugin>().parameters
    }
}
