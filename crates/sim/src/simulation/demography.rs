//! Demographic model: populations and split events.
//!
//! Time runs backwards from the present (generation 0). A split at time `t`
//! means that, going back in time, every lineage still in one of the derived
//! populations moves into the ancestral population at `t`.

use crate::errors::DemographyError;
use serde::{Deserialize, Serialize};

/// Index of a population within a [`Demography`].
pub type PopulationId = usize;

/// A single panmictic population with constant size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    /// Population name (unique within a demography)
    pub name: String,
    /// Effective population size (diploid individuals)
    pub initial_size: f64,
    /// Whether lineages can be sampled from / live in this population at time zero
    pub initially_active: bool,
}

/// Mass movement of lineages from derived populations into an ancestor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSplit {
    /// Generations before present
    pub time: f64,
    pub derived: Vec<PopulationId>,
    pub ancestral: PopulationId,
}

/// Collection of populations and the split events connecting them.
///
/// # Examples
///
/// ```
/// use popsplit_sim::simulation::Demography;
///
/// let mut demography = Demography::new();
/// demography.add_population("N1", 90_000.0).unwrap();
/// demography.add_population("N2", 3_000.0).unwrap();
/// demography.add_population("ANC", 7_000_000.0).unwrap();
/// demography
///     .add_population_split(6000.0, &["N1", "N2"], "ANC")
///     .unwrap();
///
/// assert_eq!(demography.population_id("N2"), Some(1));
/// assert!(!demography.populations()[2].initially_active);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Demography {
    populations: Vec<Population>,
    splits: Vec<PopulationSplit>,
}

impl Demography {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two derived populations splitting from one ancestor.
    pub fn isolated_split(
        derived: [(&str, f64); 2],
        ancestral: (&str, f64),
        split_time: f64,
    ) -> Result<Self, DemographyError> {
        let mut demography = Self::new();
        for (name, size) in derived {
            demography.add_population(name, size)?;
        }
        demography.add_population(ancestral.0, ancestral.1)?;
        demography.add_population_split(split_time, &[derived[0].0, derived[1].0], ancestral.0)?;
        Ok(demography)
    }

    /// Declare a population. Returns its id.
    pub fn add_population(
        &mut self,
        name: &str,
        initial_size: f64,
    ) -> Result<PopulationId, DemographyError> {
        if name.is_empty() {
            return Err(DemographyError::EmptyName);
        }
        if self.population_id(name).is_some() {
            return Err(DemographyError::DuplicatePopulation(name.to_string()));
        }
        if !initial_size.is_finite() || initial_size <= 0.0 {
            return Err(DemographyError::InvalidSize {
                name: name.to_string(),
                size: initial_size,
            });
        }
        self.populations.push(Population {
            name: name.to_string(),
            initial_size,
            initially_active: true,
        });
        Ok(self.populations.len() - 1)
    }

    /// Record a split at `time`. The ancestral population becomes inactive
    /// until the split, so it cannot be sampled at time zero.
    pub fn add_population_split(
        &mut self,
        time: f64,
        derived: &[&str],
        ancestral: &str,
    ) -> Result<(), DemographyError> {
        if !time.is_finite() || time < 0.0 {
            return Err(DemographyError::InvalidTime(time));
        }
        if derived.is_empty() {
            return Err(DemographyError::NoDerivedPopulations);
        }
        let ancestral_id = self.require(ancestral)?;
        let mut derived_ids = Vec::with_capacity(derived.len());
        for name in derived {
            let id = self.require(name)?;
            if id == ancestral_id {
                return Err(DemographyError::SelfSplit(ancestral.to_string()));
            }
            derived_ids.push(id);
        }

        self.populations[ancestral_id].initially_active = false;
        self.splits.push(PopulationSplit {
            time,
            derived: derived_ids,
            ancestral: ancestral_id,
        });
        // Events are applied in time order
        self.splits.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(())
    }

    pub fn population_id(&self, name: &str) -> Option<PopulationId> {
        self.populations.iter().position(|p| p.name == name)
    }

    pub fn populations(&self) -> &[Population] {
        &self.populations
    }

    /// Split events sorted by time.
    pub fn splits(&self) -> &[PopulationSplit] {
        &self.splits
    }

    pub fn num_populations(&self) -> usize {
        self.populations.len()
    }

    fn require(&self, name: &str) -> Result<PopulationId, DemographyError> {
        self.population_id(name)
            .ok_or_else(|| DemographyError::UnknownPopulation(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_population_assigns_sequential_ids() {
        let mut d = Demography::new();
        assert_eq!(d.add_population("A", 10.0).unwrap(), 0);
        assert_eq!(d.add_population("B", 10.0).unwrap(), 1);
        assert_eq!(d.num_populations(), 2);
    }

    #[test]
    fn test_add_population_rejects_bad_sizes() {
        let mut d = Demography::new();
        assert!(matches!(
            d.add_population("A", 0.0),
            Err(DemographyError::InvalidSize { .. })
        ));
        assert!(matches!(
            d.add_population("A", -5.0),
            Err(DemographyError::InvalidSize { .. })
        ));
        assert!(matches!(
            d.add_population("A", f64::NAN),
            Err(DemographyError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_duplicate_and_empty_names() {
        let mut d = Demography::new();
        d.add_population("A", 1.0).unwrap();
        assert_eq!(
            d.add_population("A", 2.0),
            Err(DemographyError::DuplicatePopulation("A".into()))
        );
        assert_eq!(d.add_population("", 2.0), Err(DemographyError::EmptyName));
    }

    #[test]
    fn test_split_requires_declared_populations() {
        let mut d = Demography::new();
        d.add_population("N1", 100.0).unwrap();
        d.add_population("ANC", 100.0).unwrap();
        assert_eq!(
            d.add_population_split(10.0, &["N1", "N2"], "ANC"),
            Err(DemographyError::UnknownPopulation("N2".into()))
        );
        assert_eq!(
            d.add_population_split(10.0, &["N1"], "OUT"),
            Err(DemographyError::UnknownPopulation("OUT".into()))
        );
    }

    #[test]
    fn test_split_rejects_negative_time_and_self_split() {
        let mut d = Demography::new();
        d.add_population("N1", 100.0).unwrap();
        d.add_population("ANC", 100.0).unwrap();
        assert_eq!(
            d.add_population_split(-1.0, &["N1"], "ANC"),
            Err(DemographyError::InvalidTime(-1.0))
        );
        assert_eq!(
            d.add_population_split(1.0, &["ANC"], "ANC"),
            Err(DemographyError::SelfSplit("ANC".into()))
        );
        assert_eq!(
            d.add_population_split(1.0, &[], "ANC"),
            Err(DemographyError::NoDerivedPopulations)
        );
    }

    #[test]
    fn test_isolated_split_marks_ancestor_inactive() {
        let d = Demography::isolated_split([("N1", 90_000.0), ("N2", 3_000.0)], ("ANC", 7e6), 6000.0)
            .unwrap();
        assert!(d.populations()[0].initially_active);
        assert!(d.populations()[1].initially_active);
        assert!(!d.populations()[2].initially_active);
        assert_eq!(d.splits().len(), 1);
        assert_eq!(d.splits()[0].derived, vec![0, 1]);
        assert_eq!(d.splits()[0].ancestral, 2);
    }

    #[test]
    fn test_split_at_time_zero_is_allowed() {
        assert!(Demography::isolated_split([("A", 1.0), ("B", 1.0)], ("C", 1.0), 0.0).is_ok());
    }

    #[test]
    fn test_demography_serde_round_trip() {
        let d = Demography::isolated_split([("N1", 10.0), ("N2", 20.0)], ("ANC", 30.0), 5.0)
            .unwrap();
        let json = serde_json::to_string(&d).unwrap();
        let back: Demography = serde_json::from_str(&json).unwrap();
        assert_eq!(d, back);
    }
}
