//! # PES Analysis
//!
//! Ties the mechanism reader, the formula grouper and the connected-channel partitioner
//! together. `PesAnalysis` is what the command line front end works with.
//!
//! ```rust,no_run
//! use KiPES::Kinetics::pes_analysis::PesAnalysis;
//! use KiPES::Kinetics::mechanism_parser::MechanismFormat;
//! use std::path::Path;
//! let analysis = PesAnalysis::from_files(
//!     Path::new("mechanism.inp"),
//!     Some(Path::new("species.csv")),
//!     &MechanismFormat::Chemkin,
//!     false,
//! )
//! .unwrap();
//! analysis.print_summary();
//! ```
use crate::Kinetics::mech_errors::MechanismError;
use crate::Kinetics::mechanism_parser::{
    MechanismFormat, read_mechanism, read_mechanism_file, split_reactions,
};
use crate::Kinetics::mechanism_writer::write_mechanism_file;
use crate::Kinetics::pes::{PesDict, Reaction, build_pes_dct};
use crate::Kinetics::pes_summary::print_pes_summary;
use crate::Kinetics::species_dict::SpeciesDict;
use crate::Kinetics::subpes::{SubPesMap, connected_channels_dct};
use log::info;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct PesAnalysis {
    pub reactions: Vec<Reaction>,
    pub pes_dct: PesDict,
    pub conn_chn_dct: HashMap<String, SubPesMap>, // {formula: {sub-PES: [channels]}}
}

impl PesAnalysis {
    pub fn from_reactions(reactions: Vec<Reaction>) -> Result<Self, MechanismError> {
        let (formulas, rct_names, prd_names, rxn_names) = split_reactions(&reactions);
        let pes_dct = build_pes_dct(&formulas, &rct_names, &prd_names, &rxn_names)?;
        let conn_chn_dct = connected_channels_dct(&pes_dct);
        let n_subpes: usize = conn_chn_dct.values().map(|s| s.len()).sum();
        info!(
            "{} reactions grouped into {} PES and {} sub-PES",
            reactions.len(),
            pes_dct.len(),
            n_subpes
        );
        Ok(Self {
            reactions,
            pes_dct,
            conn_chn_dct,
        })
    }

    pub fn from_mechanism_str(
        mech_str: &str,
        mech_type: &MechanismFormat,
        spc_dct: &SpeciesDict,
        sort_rxns: bool,
    ) -> Result<Self, MechanismError> {
        let reactions = read_mechanism(mech_str, mech_type, spc_dct, sort_rxns)?;
        Self::from_reactions(reactions)
    }

    /// species dictionary is optional: without it every species name is parsed as a formula
    pub fn from_files(
        mech_path: &Path,
        species_path: Option<&Path>,
        mech_type: &MechanismFormat,
        sort_rxns: bool,
    ) -> Result<Self, MechanismError> {
        let spc_dct = match species_path {
            Some(path) => SpeciesDict::from_csv_file(path)?,
            None => SpeciesDict::new(),
        };
        let reactions = read_mechanism_file(mech_path, mech_type, &spc_dct, sort_rxns)?;
        Self::from_reactions(reactions)
    }

    pub fn subpes_of(&self, formula: &str) -> Option<&SubPesMap> {
        self.conn_chn_dct.get(formula)
    }

    /// reaction names of one sub-PES
    pub fn subpes_reactions(&self, formula: &str, subpes_idx: usize) -> Vec<&str> {
        let (Some(channels), Some(subpes)) = (self.pes_dct.get(formula), self.subpes_of(formula))
        else {
            return Vec::new();
        };
        subpes
            .get(&subpes_idx)
            .map(|idxs| {
                idxs.iter()
                    .filter_map(|&i| channels.rxn_name_lst.get(i).map(|s| s.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn print_summary(&self) {
        print_pes_summary(&self.pes_dct, &self.conn_chn_dct);
    }

    pub fn write_mechanism(&self, path: &Path, with_subpes: bool) -> Result<(), MechanismError> {
        let conn = if with_subpes {
            Some(&self.conn_chn_dct)
        } else {
            None
        };
        write_mechanism_file(&self.pes_dct, conn, path)
    }
}
