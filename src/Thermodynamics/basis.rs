//! # Thermochemical basis
//!
//! Helpers for expressing a species as a linear combination of reference (basis) species,
//! the usual first step of a heat-of-formation estimate from reaction energies:
//! `CH3OH = CH4 + H2O - H2`.
//!
//! - `reduced_basis`: drops basis species that contain an element the target lacks
//! - `basis_coefficients`: solves the element balance for the coefficients
use crate::Kinetics::mech_errors::MechanismError;
use crate::Kinetics::molmass::{create_elem_composition_matrix, parse_formula};
use log::debug;
use nalgebra::{DMatrix, DVector};
use thiserror::Error;

const SPAN_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Error)]
pub enum BasisError {
    #[error(transparent)]
    Formula(#[from] MechanismError),
    #[error("basis is empty")]
    EmptyBasis,
    #[error("basis does not span the elements of '{species}' (residual {residual:.3e})")]
    DoesNotSpan { species: String, residual: f64 },
    #[error("linear solve failed: {0}")]
    Solver(String),
}

/// basis species (formulas) whose elements all occur in the target species
pub fn reduced_basis(basis: &[String], species_formula: &str) -> Result<Vec<String>, BasisError> {
    let species = parse_formula(species_formula)?;
    let mut reduced = Vec::new();
    for basis_formula in basis {
        let composition = parse_formula(basis_formula)?;
        if composition.keys().all(|element| species.contains_key(element)) {
            reduced.push(basis_formula.clone());
        }
    }
    debug!("reduced basis for {}: {:?}", species_formula, reduced);
    Ok(reduced)
}

/// Coefficients c with sum_i c_i * composition(basis_i) = composition(species).
/// Solved by SVD in the least squares sense; a residual above tolerance means the basis
/// cannot build the species.
pub fn basis_coefficients(basis: &[String], species_formula: &str) -> Result<DVector<f64>, BasisError> {
    if basis.is_empty() {
        return Err(BasisError::EmptyBasis);
    }
    let basis_refs: Vec<&str> = basis.iter().map(|s| s.as_str()).collect();
    // rows: basis species, columns: elements
    let (basis_mat, elements) = create_elem_composition_matrix(&basis_refs)?;
    let species = parse_formula(species_formula)?;
    if let Some(missing) = species.keys().find(|e| !elements.contains(e)) {
        debug!("element {} of {} is not in the basis", missing, species_formula);
        return Err(BasisError::DoesNotSpan {
            species: species_formula.to_string(),
            residual: f64::INFINITY,
        });
    }
    let target = DVector::from_iterator(
        elements.len(),
        elements
            .iter()
            .map(|e| species.get(e).copied().unwrap_or(0) as f64),
    );
    let a: DMatrix<f64> = basis_mat.transpose();
    let coefficients = a
        .clone()
        .svd(true, true)
        .solve(&target, 1e-12)
        .map_err(|e| BasisError::Solver(e.to_string()))?;
    let residual = (&a * &coefficients - &target).norm();
    if residual > SPAN_TOLERANCE {
        return Err(BasisError::DoesNotSpan {
            species: species_formula.to_string(),
            residual,
        });
    }
    Ok(coefficients)
}
