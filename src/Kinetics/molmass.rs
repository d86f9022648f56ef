//! Module to calculate the atomic composition of a chemical formula and to build
//! canonical (Hill) formula strings used as PES keys
//!
use crate::Kinetics::mech_errors::MechanismError;
use log::debug;
use nalgebra::DMatrix;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// atomic composition of a substance {"element": number of atoms}
pub type Composition = HashMap<String, usize>;

// Element symbols recognised by the formula parser
const ELEMENTS: &[&str] = &[
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "Pt", "Au", "Hg", "Pb", "D",
];

fn filter_phases_marks(formula: &str) -> &str {
    let phases = ["(C)", "(c)", "(L)", "(l)", "(G)", "(g)", "(S)", "(s)"];
    for phase in phases {
        if let Some(stripped) = formula.strip_suffix(phase) {
            return stripped;
        }
    }
    formula
}

fn read_count(
    formula: &str,
    chars: &[char],
    pos: &mut usize,
) -> Result<Option<usize>, MechanismError> {
    let start = *pos;
    while *pos < chars.len() && chars[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if start == *pos {
        return Ok(None);
    }
    let digits: String = chars[start..*pos].iter().collect();
    digits
        .parse()
        .map(Some)
        .map_err(|_| MechanismError::formula(formula, "count too large"))
}

fn add_count(
    counts: &mut Composition,
    formula: &str,
    element: String,
    n: usize,
) -> Result<(), MechanismError> {
    let entry = counts.entry(element).or_insert(0);
    *entry = entry
        .checked_add(n)
        .ok_or_else(|| MechanismError::formula(formula, "count too large"))?;
    Ok(())
}

// recursive descent over one bracket level; returns when the matching ')' is reached
fn parse_group(
    formula: &str,
    chars: &[char],
    pos: &mut usize,
    depth: usize,
) -> Result<Composition, MechanismError> {
    let mut counts = Composition::new();
    while *pos < chars.len() {
        let c = chars[*pos];
        if c == '(' || c == '[' {
            *pos += 1;
            let inner = parse_group(formula, chars, pos, depth + 1)?;
            if *pos >= chars.len() {
                return Err(MechanismError::formula(formula, "unclosed bracket"));
            }
            // skip the closing bracket
            *pos += 1;
            let multiplier = read_count(formula, chars, pos)?.unwrap_or(1);
            for (element, n) in inner {
                let n = n
                    .checked_mul(multiplier)
                    .ok_or_else(|| MechanismError::formula(formula, "count too large"))?;
                add_count(&mut counts, formula, element, n)?;
            }
        } else if c == ')' || c == ']' {
            if depth == 0 {
                return Err(MechanismError::formula(formula, "unbalanced closing bracket"));
            }
            return Ok(counts);
        } else if c.is_ascii_uppercase() {
            let mut symbol = c.to_string();
            *pos += 1;
            if *pos < chars.len() && chars[*pos].is_ascii_lowercase() {
                symbol.push(chars[*pos]);
                *pos += 1;
            }
            if !ELEMENTS.contains(&symbol.as_str()) {
                return Err(MechanismError::formula(
                    formula,
                    format!("unknown element '{}'", symbol),
                ));
            }
            let count = read_count(formula, chars, pos)?.unwrap_or(1);
            add_count(&mut counts, formula, symbol, count)?;
        } else {
            return Err(MechanismError::formula(
                formula,
                format!("unexpected character '{}' at position {}", c, *pos),
            ));
        }
    }
    if depth > 0 {
        return Err(MechanismError::formula(formula, "unclosed bracket"));
    }
    Ok(counts)
}

/// Parse a chemical formula into a map of elements and their counts.
/// Brackets with multipliers are expanded (`Ca(NO3)2`), trailing phase marks (`H2O(g)`) are ignored.
pub fn parse_formula(formula: &str) -> Result<Composition, MechanismError> {
    let cleaned: String = formula.chars().filter(|c| !c.is_whitespace()).collect();
    let cleaned = filter_phases_marks(&cleaned);
    if cleaned.is_empty() {
        return Err(MechanismError::formula(formula, "empty formula"));
    }
    let chars: Vec<char> = cleaned.chars().collect();
    let mut pos = 0;
    let counts = parse_group(formula, &chars, &mut pos, 0)?;
    debug!("formula {} parsed into {:?}", formula, counts);
    Ok(counts)
}

/// Sum of several compositions, e.g. all reactants of a reaction
pub fn add_compositions<'a, I>(compositions: I) -> Result<Composition, MechanismError>
where
    I: IntoIterator<Item = &'a Composition>,
{
    let mut total = Composition::new();
    for composition in compositions {
        for (element, n) in composition {
            add_count(&mut total, "sum of compositions", element.clone(), *n)?;
        }
    }
    total.retain(|_, n| *n > 0);
    Ok(total)
}

/// Hill notation: carbon first, hydrogen second, the rest alphabetically.
/// Without carbon every element (hydrogen included) goes alphabetically.
pub fn hill_formula(composition: &Composition) -> String {
    let sorted: BTreeMap<&str, usize> = composition
        .iter()
        .filter(|(_, n)| **n > 0)
        .map(|(e, n)| (e.as_str(), *n))
        .collect();
    let mut ordered: Vec<(&str, usize)> = Vec::with_capacity(sorted.len());
    if let Some(&c) = sorted.get("C") {
        ordered.push(("C", c));
        if let Some(&h) = sorted.get("H") {
            ordered.push(("H", h));
        }
        ordered.extend(
            sorted
                .iter()
                .filter(|(e, _)| **e != "C" && **e != "H")
                .map(|(e, n)| (*e, *n)),
        );
    } else {
        ordered.extend(sorted.iter().map(|(e, n)| (*e, *n)));
    }
    ordered
        .into_iter()
        .map(|(e, n)| if n == 1 { e.to_string() } else { format!("{}{}", e, n) })
        .collect()
}

/// Matrix of atomic compositions: one row per substance, one column per element.
/// Elements are returned in alphabetical order so the layout is reproducible.
pub fn create_elem_composition_matrix(
    vec_of_formulae: &[&str],
) -> Result<(DMatrix<f64>, Vec<String>), MechanismError> {
    let mut compositions = Vec::with_capacity(vec_of_formulae.len());
    let mut elements: BTreeSet<String> = BTreeSet::new();
    for formula in vec_of_formulae {
        let counts = parse_formula(formula)?;
        elements.extend(counts.keys().cloned());
        compositions.push(counts);
    }
    let elements: Vec<String> = elements.into_iter().collect();
    let mut matrix = DMatrix::zeros(compositions.len(), elements.len());
    for (i, counts) in compositions.iter().enumerate() {
        for (j, element) in elements.iter().enumerate() {
            if let Some(n) = counts.get(element) {
                matrix[(i, j)] = *n as f64;
            }
        }
    }
    Ok((matrix, elements))
}
