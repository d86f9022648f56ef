//! # Potential Energy Surfaces
//!
//! ## Purpose
//! Groups the reactions of a mechanism into potential energy surfaces (PES): all reactions
//! whose reactants share one molecular formula belong to the same surface.
//!
//! ## Main Data Structures
//! - `Reaction`: one channel, i.e. reactant names, product names, label and formula tag
//! - `PesChannels`: three parallel lists (reactants, products, names) for one formula
//! - `PesDict`: formula -> `PesChannels`, iterated in the order formulas were first met
//!
//! ## Grouping rule
//! Every entry goes to the bucket of its formula, wherever it stands in the input, so
//! `["CH4", "C2H6", "CH4"]` gives two surfaces and `CH4` holds entries 0 and 2.
use crate::Kinetics::mech_errors::MechanismError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single reaction channel. The formula tag is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    name: String,
    formula: String,
    reactants: Vec<String>,
    products: Vec<String>,
}

impl Reaction {
    pub fn new(name: &str, formula: &str, reactants: Vec<String>, products: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            formula: formula.to_string(),
            reactants,
            products,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn formula(&self) -> &str {
        &self.formula
    }
    pub fn reactants(&self) -> &[String] {
        &self.reactants
    }
    pub fn products(&self) -> &[String] {
        &self.products
    }
    /// equation in CHEMKIN notation: A + B = C + D
    pub fn equation(&self) -> String {
        format!("{} = {}", self.reactants.join(" + "), self.products.join(" + "))
    }
}

/// reactions of one surface stored as parallel lists, the index of a channel is its position
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PesChannels {
    pub rct_names_lst: Vec<Vec<String>>,
    pub prd_names_lst: Vec<Vec<String>>,
    pub rxn_name_lst: Vec<String>,
}

impl PesChannels {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, reactants: Vec<String>, products: Vec<String>, name: String) {
        self.rct_names_lst.push(reactants);
        self.prd_names_lst.push(products);
        self.rxn_name_lst.push(name);
    }
    pub fn len(&self) -> usize {
        self.rxn_name_lst.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rxn_name_lst.is_empty()
    }
    /// (reactants, products, name) of channel `idx`
    pub fn channel(&self, idx: usize) -> Option<(&[String], &[String], &str)> {
        Some((
            self.rct_names_lst.get(idx)?.as_slice(),
            self.prd_names_lst.get(idx)?.as_slice(),
            self.rxn_name_lst.get(idx)?.as_str(),
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PesDict {
    order: Vec<String>,
    surfaces: HashMap<String, PesChannels>,
}

impl PesDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// append a channel to the surface of `formula`, opening the surface if needed
    pub fn push(&mut self, formula: &str, reactants: Vec<String>, products: Vec<String>, name: String) {
        if !self.surfaces.contains_key(formula) {
            self.order.push(formula.to_string());
        }
        self.surfaces
            .entry(formula.to_string())
            .or_default()
            .push(reactants, products, name);
    }

    pub fn from_reactions(reactions: &[Reaction]) -> Self {
        let mut pes_dct = PesDict::new();
        for reaction in reactions {
            pes_dct.push(
                reaction.formula(),
                reaction.reactants().to_vec(),
                reaction.products().to_vec(),
                reaction.name().to_string(),
            );
        }
        pes_dct
    }

    /// formulas in the order they were first met
    pub fn formulas(&self) -> &[String] {
        &self.order
    }
    pub fn get(&self, formula: &str) -> Option<&PesChannels> {
        self.surfaces.get(formula)
    }
    pub fn get_mut(&mut self, formula: &str) -> Option<&mut PesChannels> {
        self.surfaces.get_mut(formula)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PesChannels)> {
        self.order
            .iter()
            .filter_map(|f| self.surfaces.get(f).map(|channels| (f.as_str(), channels)))
    }
    pub fn len(&self) -> usize {
        self.order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
    /// total number of channels over all surfaces
    pub fn channel_count(&self) -> usize {
        self.surfaces.values().map(|c| c.len()).sum()
    }
}

/// Build the PES dictionary from the four parallel lists produced by the mechanism reader.
pub fn build_pes_dct(
    formula_str_lst: &[String],
    rct_names_lst: &[Vec<String>],
    prd_names_lst: &[Vec<String>],
    rxn_name_lst: &[String],
) -> Result<PesDict, MechanismError> {
    let n = formula_str_lst.len();
    if rct_names_lst.len() != n || prd_names_lst.len() != n || rxn_name_lst.len() != n {
        return Err(MechanismError::LengthMismatch(format!(
            "{} formulas, {} reactant sets, {} product sets, {} names",
            n,
            rct_names_lst.len(),
            prd_names_lst.len(),
            rxn_name_lst.len()
        )));
    }
    let mut pes_dct = PesDict::new();
    for (fidx, formula) in formula_str_lst.iter().enumerate() {
        pes_dct.push(
            formula,
            rct_names_lst[fidx].clone(),
            prd_names_lst[fidx].clone(),
            rxn_name_lst[fidx].clone(),
        );
    }
    Ok(pes_dct)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn sides(n: usize) -> Vec<Vec<String>> {
        (0..n).map(|i| vec![format!("S{}", i)]).collect()
    }

    #[test]
    fn test_sorted_input_grouping() {
        let formulas = names(&["CH4", "CH4", "C2H6"]);
        let rxn_names = names(&["r0", "r1", "r2"]);
        let pes = build_pes_dct(&formulas, &sides(3), &sides(3), &rxn_names).unwrap();
        assert_eq!(pes.len(), 2);
        assert_eq!(pes.formulas(), &names(&["CH4", "C2H6"])[..]);
        assert_eq!(pes.get("CH4").unwrap().rxn_name_lst, names(&["r0", "r1"]));
        assert_eq!(pes.get("C2H6").unwrap().rxn_name_lst, names(&["r2"]));
    }

    #[test]
    fn test_unsorted_input_is_merged_by_formula() {
        let formulas = names(&["CH4", "C2H6", "CH4"]);
        let rxn_names = names(&["r0", "r1", "r2"]);
        let pes = build_pes_dct(&formulas, &sides(3), &sides(3), &rxn_names).unwrap();
        assert_eq!(pes.len(), 2);
        let ch4 = pes.get("CH4").unwrap();
        assert_eq!(ch4.rxn_name_lst, names(&["r0", "r2"]));
        assert_eq!(ch4.rct_names_lst, vec![names(&["S0"]), names(&["S2"])]);
        assert_eq!(pes.get("C2H6").unwrap().rxn_name_lst, names(&["r1"]));
        assert_eq!(pes.channel_count(), 3);
    }

    #[test]
    fn test_length_mismatch() {
        let formulas = names(&["CH4", "CH4"]);
        let result = build_pes_dct(&formulas, &sides(2), &sides(1), &names(&["r0", "r1"]));
        assert!(matches!(result, Err(MechanismError::LengthMismatch(_))));
    }

    #[test]
    fn test_from_reactions() {
        let reactions = vec![
            Reaction::new("W1=W2", "C2H5O", names(&["W1"]), names(&["W2"])),
            Reaction::new("H2+O=OH+H", "H2O", names(&["H2", "O"]), names(&["OH", "H"])),
            Reaction::new("W2=P1+P2", "C2H5O", names(&["W2"]), names(&["P1", "P2"])),
        ];
        let pes = PesDict::from_reactions(&reactions);
        let iterated: Vec<(&str, usize)> = pes.iter().map(|(f, c)| (f, c.len())).collect();
        assert_eq!(iterated, vec![("C2H5O", 2), ("H2O", 1)]);
        let (rct, prd, name) = pes.get("C2H5O").unwrap().channel(1).unwrap();
        assert_eq!(rct, &names(&["W2"])[..]);
        assert_eq!(prd, &names(&["P1", "P2"])[..]);
        assert_eq!(name, "W2=P1+P2");
        assert_eq!(reactions[1].equation(), "H2 + O = OH + H");
    }
}
