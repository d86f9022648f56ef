//! # PES surface
//!
//! ## Purpose
//! Species energies and the connectivity list of one potential energy surface, the input of
//! the plot order heuristic and the energy diagram renderer.
//!
//! ## Input file
//! ```text
//! ENERGIES
//! {
//!   "W1": -10.0,
//!   "B1": {"energy": 5.0, "kind": "barrier"},
//!   "INT2": {"energy": -2.0, "kind": "well"}
//! }
//! CONNECTIONS
//! [["W1", "B1"], ["B1", "INT2"]]
//! ```
//! A bare number gives the energy only; the kind is then guessed from the name
//! (see [`SpeciesKind::from_name`]).
use crate::PESplot::plot_errors::PlotError;
use crate::Utils::load_from_file::SectionDocument;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

pub const ENERGIES_HEADERS: [&str; 2] = ["ENERGIES", "ENERGY"];
pub const CONNECTIONS_HEADERS: [&str; 2] = ["CONNECTIONS", "CONNECTIVITY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeciesKind {
    Well,
    Barrier,
    Product,
}

impl SpeciesKind {
    /// naming convention: `W` anywhere marks a well, a leading `B` or `TS` marks a barrier,
    /// everything else is a product
    pub fn from_name(name: &str) -> Self {
        if name.contains('W') {
            SpeciesKind::Well
        } else if name.starts_with('B') || name.starts_with("TS") {
            SpeciesKind::Barrier
        } else {
            SpeciesKind::Product
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceSpecies {
    pub energy: f64,
    pub kind: SpeciesKind,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EnergyEntry {
    Plain(f64),
    Detailed {
        energy: f64,
        kind: Option<SpeciesKind>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct PesSurface {
    pub species: BTreeMap<String, SurfaceSpecies>,
    pub connections: Vec<(String, String)>,
}

impl PesSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// kind `None` falls back to the naming convention
    pub fn add_species(&mut self, name: &str, energy: f64, kind: Option<SpeciesKind>) {
        let kind = kind.unwrap_or_else(|| SpeciesKind::from_name(name));
        self.species
            .insert(name.to_string(), SurfaceSpecies { energy, kind });
    }

    pub fn connect(&mut self, first: &str, second: &str) {
        self.connections
            .push((first.to_string(), second.to_string()));
    }

    pub fn from_energies(energies: &[(&str, f64)], connections: &[(&str, &str)]) -> Self {
        let mut surface = Self::new();
        for (name, energy) in energies {
            surface.add_species(name, *energy, None);
        }
        for (first, second) in connections {
            surface.connect(first, second);
        }
        surface
    }

    pub fn from_document(doc: &SectionDocument) -> Result<Self, PlotError> {
        let energies: BTreeMap<String, EnergyEntry> = doc.parse_json_section(&ENERGIES_HEADERS)?;
        let mut surface = Self::new();
        for (name, entry) in energies {
            match entry {
                EnergyEntry::Plain(energy) => surface.add_species(&name, energy, None),
                EnergyEntry::Detailed { energy, kind } => surface.add_species(&name, energy, kind),
            }
        }
        // a surface without barriers may come without connections
        if doc.has_section(&CONNECTIONS_HEADERS) {
            let raw: Vec<Value> = doc.parse_json_section(&CONNECTIONS_HEADERS)?;
            for (index, entry) in raw.iter().enumerate() {
                let (first, second) = parse_connection(index, entry)?;
                surface.connections.push((first, second));
            }
        }
        surface.validate()?;
        info!(
            "surface from '{}': {} species, {} connections",
            doc.source,
            surface.species.len(),
            surface.connections.len()
        );
        Ok(surface)
    }

    pub fn from_file(path: &Path) -> Result<Self, PlotError> {
        let doc = SectionDocument::from_file(path)?;
        Self::from_document(&doc)
    }

    pub fn energy(&self, name: &str) -> Option<f64> {
        self.species.get(name).map(|s| s.energy)
    }

    pub fn kind(&self, name: &str) -> Option<SpeciesKind> {
        self.species.get(name).map(|s| s.kind)
    }

    pub fn is_well(&self, name: &str) -> bool {
        self.kind(name) == Some(SpeciesKind::Well)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Checks that every connection links two distinct species with known energies
    pub fn validate(&self) -> Result<(), PlotError> {
        if self.species.is_empty() {
            return Err(PlotError::EmptySurface);
        }
        if let Some((name, _)) = self.species.iter().find(|(_, s)| !s.energy.is_finite()) {
            return Err(PlotError::NonFiniteEnergy(name.clone()));
        }
        for (index, (first, second)) in self.connections.iter().enumerate() {
            if first == second {
                return Err(PlotError::MalformedConnection {
                    index,
                    first: first.clone(),
                    second: second.clone(),
                    reason: "species is connected to itself".to_string(),
                });
            }
            for species in [first, second] {
                if !self.species.contains_key(species) {
                    return Err(PlotError::UnknownSpecies {
                        index,
                        species: species.clone(),
                        first: first.clone(),
                        second: second.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Partners of every species in connectivity order, each partner listed once
    pub fn adjacency(&self) -> HashMap<&str, Vec<&str>> {
        let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
        for (first, second) in &self.connections {
            for (a, b) in [(first, second), (second, first)] {
                let partners = adj.entry(a.as_str()).or_default();
                if !partners.contains(&b.as_str()) {
                    partners.push(b.as_str());
                }
            }
        }
        debug!("adjacency of {} species built", adj.len());
        adj
    }
}

fn parse_connection(index: usize, entry: &Value) -> Result<(String, String), PlotError> {
    let malformed = |reason: &str| PlotError::MalformedConnection {
        index,
        first: entry.to_string(),
        second: String::new(),
        reason: reason.to_string(),
    };
    let pair = entry
        .as_array()
        .ok_or_else(|| malformed("expected a pair of species names"))?;
    if pair.len() != 2 {
        return Err(malformed(&format!("expected 2 species, found {}", pair.len())));
    }
    match (pair[0].as_str(), pair[1].as_str()) {
        (Some(first), Some(second)) => Ok((first.to_string(), second.to_string())),
        _ => Err(malformed("species names must be strings")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(SpeciesKind::from_name("W1"), SpeciesKind::Well);
        assert_eq!(SpeciesKind::from_name("B12"), SpeciesKind::Barrier);
        assert_eq!(SpeciesKind::from_name("TS3"), SpeciesKind::Barrier);
        assert_eq!(SpeciesKind::from_name("P1"), SpeciesKind::Product);
        assert_eq!(SpeciesKind::from_name("CH3+OH"), SpeciesKind::Product);
    }

    #[test]
    fn test_surface_from_document() {
        let doc = SectionDocument::from_text(
            "ENERGIES\n\
             {\"W1\": -10.0, \"B1\": 5.0, \"INT2\": {\"energy\": -2.0, \"kind\": \"well\"}, \"P1\": {\"energy\": 1.0}}\n\
             CONNECTIONS\n\
             [[\"W1\", \"B1\"], [\"B1\", \"INT2\"], [\"INT2\", \"P1\"]]\n",
        );
        let surface = PesSurface::from_document(&doc).unwrap();
        assert_eq!(surface.len(), 4);
        assert_eq!(surface.energy("INT2"), Some(-2.0));
        assert!(surface.is_well("INT2"));
        assert_eq!(surface.kind("B1"), Some(SpeciesKind::Barrier));
        assert_eq!(surface.kind("P1"), Some(SpeciesKind::Product));
        assert_eq!(surface.connections.len(), 3);
    }

    #[test]
    fn test_surface_without_connections() {
        let doc = SectionDocument::from_text("ENERGIES\n{\"W1\": -1.0}\n");
        let surface = PesSurface::from_document(&doc).unwrap();
        assert!(surface.connections.is_empty());
    }

    #[test]
    fn test_unknown_species_names_connection() {
        let surface = PesSurface::from_energies(&[("W1", -10.0), ("B1", 5.0)], &[("W1", "B1"), ("B1", "W9")]);
        match surface.validate() {
            Err(PlotError::UnknownSpecies { index, species, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(species, "W9");
            }
            other => panic!("expected unknown species, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_connections() {
        let surface = PesSurface::from_energies(&[("W1", -10.0)], &[("W1", "W1")]);
        assert!(matches!(
            surface.validate(),
            Err(PlotError::MalformedConnection { index: 0, .. })
        ));
        let doc = SectionDocument::from_text(
            "ENERGIES\n{\"W1\": -1.0, \"B1\": 2.0}\nCONNECTIONS\n[[\"W1\", \"B1\"], [\"W1\"]]\n",
        );
        assert!(matches!(
            PesSurface::from_document(&doc),
            Err(PlotError::MalformedConnection { index: 1, .. })
        ));
    }

    #[test]
    fn test_non_finite_energy() {
        let surface = PesSurface::from_energies(&[("W1", -10.0), ("B1", f64::NAN)], &[("W1", "B1")]);
        match surface.validate() {
            Err(PlotError::NonFiniteEnergy(name)) => assert_eq!(name, "B1"),
            other => panic!("expected non-finite energy, got {:?}", other),
        }
        let surface = PesSurface::from_energies(&[("W1", f64::INFINITY)], &[]);
        assert!(matches!(surface.validate(), Err(PlotError::NonFiniteEnergy(_))));
    }

    #[test]
    fn test_connection_names_must_be_strings() {
        let doc = SectionDocument::from_text(
            "ENERGIES\n{\"W1\": -1.0, \"B1\": 2.0}\nCONNECTIONS\n[[\"W1\", \"B1\"], [\"W1\", 3]]\n",
        );
        match PesSurface::from_document(&doc) {
            Err(PlotError::MalformedConnection { index, reason, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(reason, "species names must be strings");
            }
            other => panic!("expected malformed connection, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_surface() {
        assert!(matches!(PesSurface::new().validate(), Err(PlotError::EmptySurface)));
    }

    #[test]
    fn test_adjacency_keeps_order_without_repeats() {
        let surface = PesSurface::from_energies(
            &[("W1", -10.0), ("B1", 5.0), ("B2", 3.0)],
            &[("W1", "B1"), ("B2", "W1"), ("B1", "W1")],
        );
        let adj = surface.adjacency();
        assert_eq!(adj["W1"], vec!["B1", "B2"]);
        assert_eq!(adj["B1"], vec!["W1"]);
    }
}
