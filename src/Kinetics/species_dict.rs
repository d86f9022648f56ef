//! # Species Dictionary
//!
//! Maps mechanism species names to chemical formulas. The dictionary is read from a CSV
//! file with a header row; only the `name` and `formula` columns are used, any other
//! columns (`smiles`, `inchi`, `mult`, `charge`, ...) are ignored.
//!
//! ```text
//! name,formula,mult
//! CH3OH,CH4O,1
//! W1,C2H5O,2
//! ```
//! Species that are not in the dictionary fall back to their own name parsed as a formula,
//! so mechanisms written with formula-like names (`H2O`, `CH4`) need no dictionary at all.
use crate::Kinetics::mech_errors::MechanismError;
use crate::Kinetics::molmass::{Composition, parse_formula};
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SpeciesRecord {
    name: String,
    formula: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SpeciesDict {
    formulas: HashMap<String, String>, // {'species name': 'formula'}
}

impl SpeciesDict {
    pub fn new() -> Self {
        Self {
            formulas: HashMap::new(),
        }
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, MechanismError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .comment(Some(b'!'))
            .from_reader(reader);
        let mut dict = SpeciesDict::new();
        for record in csv_reader.deserialize::<SpeciesRecord>() {
            let record = record?;
            match record.formula {
                Some(formula) if !formula.is_empty() => dict.insert(&record.name, &formula),
                _ => warn!(
                    "species '{}' has no formula in the dictionary, its name will be parsed instead",
                    record.name
                ),
            }
        }
        Ok(dict)
    }

    pub fn from_csv_file(path: &Path) -> Result<Self, MechanismError> {
        let file = File::open(path)?;
        let dict = Self::from_csv_reader(file)?;
        info!(
            "loaded {} species from dictionary '{}'",
            dict.len(),
            path.display()
        );
        Ok(dict)
    }

    pub fn insert(&mut self, name: &str, formula: &str) {
        self.formulas.insert(name.to_string(), formula.to_string());
    }

    pub fn formula_of(&self, name: &str) -> Option<&str> {
        self.formulas.get(name).map(|f| f.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formulas.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Atomic composition of a species: dictionary formula first, the name itself otherwise
    pub fn composition_of(&self, name: &str) -> Result<Composition, MechanismError> {
        match self.formula_of(name) {
            Some(formula) => parse_formula(formula),
            None => {
                debug!("species '{}' not in dictionary, parsing its name", name);
                parse_formula(name)
            }
        }
    }
}
