//! # Mechanism Reader
//!
//! ## Purpose
//! Reads the reaction block of a mechanism file and turns every reaction into a `Reaction`
//! carrying reactant names, product names, a label and the formula of the surface it lives on.
//!
//! ## Supported format
//! Only CHEMKIN is supported. The text between `REACTIONS` (units may follow on the same
//! line) and `END` is scanned line by line:
//! - everything after `!` is a comment
//! - a reaction line is `lhs (<=> | => | =) rhs  A  n  Ea`
//! - `(+M)`, `(+AR)` falloff partners and `+ M` third bodies are dropped from the sides
//! - stoichiometric prefixes are expanded: `2OH` becomes `OH + OH`
//! - auxiliary lines (`DUPLICATE`, `LOW /.../`, `TROE`, `PLOG`, efficiencies `H2/2.5/`) are skipped
//!
//! ## Formula tag
//! The formula of a reaction is the Hill formula of the summed reactant composition.
//! A product composition that differs is reported as an unbalanced reaction and the
//! reactant formula is kept.
use crate::Kinetics::mech_errors::MechanismError;
use crate::Kinetics::molmass::{Composition, add_compositions, hill_formula};
use crate::Kinetics::pes::Reaction;
use crate::Kinetics::species_dict::SpeciesDict;
use log::{debug, info, warn};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// mechanism file formats; anything but CHEMKIN is rejected when reading
#[derive(Debug, Clone, PartialEq)]
pub enum MechanismFormat {
    Chemkin,
    Unsupported(String),
}

impl FromStr for MechanismFormat {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "chemkin" | "ckin" | "inp" => MechanismFormat::Chemkin,
            other => MechanismFormat::Unsupported(other.to_string()),
        })
    }
}

/// Read the reactions of a mechanism given as text.
pub fn read_mechanism(
    mech_str: &str,
    mech_type: &MechanismFormat,
    spc_dct: &SpeciesDict,
    sort_rxns: bool,
) -> Result<Vec<Reaction>, MechanismError> {
    match mech_type {
        MechanismFormat::Chemkin => parse_chemkin(mech_str, spc_dct, sort_rxns),
        MechanismFormat::Unsupported(name) => Err(MechanismError::UnsupportedFormat(name.clone())),
    }
}

/// Read the reactions of a mechanism file.
pub fn read_mechanism_file(
    path: &Path,
    mech_type: &MechanismFormat,
    spc_dct: &SpeciesDict,
    sort_rxns: bool,
) -> Result<Vec<Reaction>, MechanismError> {
    if let MechanismFormat::Unsupported(name) = mech_type {
        return Err(MechanismError::UnsupportedFormat(name.clone()));
    }
    let mech_str = fs::read_to_string(path)?;
    let reactions = read_mechanism(&mech_str, mech_type, spc_dct, sort_rxns)?;
    info!("read {} reactions from '{}'", reactions.len(), path.display());
    Ok(reactions)
}

/// Split a reaction list into the four parallel lists (formulas, reactants, products, names)
pub fn split_reactions(
    reactions: &[Reaction],
) -> (Vec<String>, Vec<Vec<String>>, Vec<Vec<String>>, Vec<String>) {
    let mut formulas = Vec::with_capacity(reactions.len());
    let mut rct_names = Vec::with_capacity(reactions.len());
    let mut prd_names = Vec::with_capacity(reactions.len());
    let mut rxn_names = Vec::with_capacity(reactions.len());
    for reaction in reactions {
        formulas.push(reaction.formula().to_string());
        rct_names.push(reaction.reactants().to_vec());
        prd_names.push(reaction.products().to_vec());
        rxn_names.push(reaction.name().to_string());
    }
    (formulas, rct_names, prd_names, rxn_names)
}

/// (line number starting from 1, line without comment) for every line of the reaction block
fn reactions_block(mech_str: &str) -> Result<Vec<(usize, &str)>, MechanismError> {
    let mut in_block = false;
    let mut found = false;
    let mut block = Vec::new();
    for (i, raw_line) in mech_str.lines().enumerate() {
        let line = raw_line.split('!').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let keyword = line
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_uppercase();
        if !in_block {
            if keyword == "REACTIONS" || keyword == "REAC" {
                in_block = true;
                found = true;
            }
            continue;
        }
        if keyword == "END" {
            in_block = false;
            continue;
        }
        block.push((i + 1, line));
    }
    if !found {
        return Err(MechanismError::NoReactionsBlock);
    }
    Ok(block)
}

struct ReactionLineParser {
    reaction_re: Regex,
    falloff_re: Regex,
    stoich_re: Regex,
}

impl ReactionLineParser {
    fn new() -> Self {
        Self {
            reaction_re: Regex::new(
                r"^(?P<lhs>.+?)\s*(?:<=>|=>|=)\s*(?P<rhs>.+?)\s+(?P<a>\S+)\s+(?P<n>\S+)\s+(?P<ea>\S+)$",
            )
            .unwrap(),
            falloff_re: Regex::new(r"\(\s*\+\s*[A-Za-z0-9]+\s*\)").unwrap(),
            stoich_re: Regex::new(r"^(?P<count>\d+)(?P<name>[A-Za-z(\[].*)$").unwrap(),
        }
    }

    /// None for auxiliary lines, Some((reactants, products)) for reactions
    fn parse(
        &self,
        line_no: usize,
        line: &str,
    ) -> Result<Option<(Vec<String>, Vec<String>)>, MechanismError> {
        if !line.contains('=') {
            debug!("line {}: skipping auxiliary line '{}'", line_no, line);
            return Ok(None);
        }
        let malformed = |reason: &str| MechanismError::MalformedReaction {
            line: line_no,
            text: line.to_string(),
            reason: reason.to_string(),
        };
        let caps = self
            .reaction_re
            .captures(line)
            .ok_or_else(|| malformed("expected 'reactants = products A n Ea'"))?;
        for key in ["a", "n", "ea"] {
            if caps[key].parse::<f64>().is_err() {
                return Err(malformed("Arrhenius parameters are not numbers"));
            }
        }
        let reactants = self
            .parse_side(&caps["lhs"])
            .map_err(|reason| malformed(&reason))?;
        let products = self
            .parse_side(&caps["rhs"])
            .map_err(|reason| malformed(&reason))?;
        Ok(Some((reactants, products)))
    }

    fn parse_side(&self, side: &str) -> Result<Vec<String>, String> {
        let side = self.falloff_re.replace_all(side, "");
        let mut species = Vec::new();
        for term in side.split('+') {
            let term: String = term.chars().filter(|c| !c.is_whitespace()).collect();
            if term.is_empty() {
                return Err("empty species term".to_string());
            }
            if term.eq_ignore_ascii_case("M") {
                continue;
            }
            match self.stoich_re.captures(&term) {
                Some(caps) => {
                    let count: usize = caps["count"]
                        .parse()
                        .map_err(|_| format!("bad stoichiometric coefficient in '{}'", term))?;
                    for _ in 0..count {
                        species.push(caps["name"].to_string());
                    }
                }
                None => species.push(term),
            }
        }
        if species.is_empty() {
            return Err("side without species".to_string());
        }
        Ok(species)
    }
}

fn side_composition(
    line_no: usize,
    side: &[String],
    spc_dct: &SpeciesDict,
) -> Result<Composition, MechanismError> {
    let mut compositions = Vec::with_capacity(side.len());
    for name in side {
        let composition = spc_dct.composition_of(name).map_err(|err| {
            if spc_dct.contains(name) {
                // the dictionary knows the species, its formula is broken
                err
            } else {
                MechanismError::UnknownSpecies {
                    line: line_no,
                    species: name.clone(),
                }
            }
        })?;
        compositions.push(composition);
    }
    add_compositions(compositions.iter())
}

fn parse_chemkin(
    mech_str: &str,
    spc_dct: &SpeciesDict,
    sort_rxns: bool,
) -> Result<Vec<Reaction>, MechanismError> {
    let parser = ReactionLineParser::new();
    let mut reactions = Vec::new();
    let mut seen: HashSet<(Vec<String>, Vec<String>)> = HashSet::new();
    for (line_no, line) in reactions_block(mech_str)? {
        let Some((reactants, products)) = parser.parse(line_no, line)? else {
            continue;
        };
        let rct_composition = side_composition(line_no, &reactants, spc_dct)?;
        let prd_composition = side_composition(line_no, &products, spc_dct)?;
        let formula = hill_formula(&rct_composition);
        if rct_composition != prd_composition {
            warn!(
                "line {}: reaction '{}' is unbalanced ({} -> {}), keeping reactant formula",
                line_no,
                line,
                formula,
                hill_formula(&prd_composition)
            );
        }
        if !seen.insert((reactants.clone(), products.clone())) {
            warn!("line {}: duplicate reaction '{}' skipped", line_no, line);
            continue;
        }
        let name = format!("{}={}", reactants.join("+"), products.join("+"));
        debug!("line {}: reaction {} on PES {}", line_no, name, formula);
        reactions.push(Reaction::new(&name, &formula, reactants, products));
    }
    if sort_rxns {
        reactions.sort_by(|a, b| a.formula().cmp(b.formula()));
    }
    Ok(reactions)
}
