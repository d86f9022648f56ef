/// linear combinations of basis species for thermochemistry
/// # Examples
/// ```
/// use KiPES::Thermodynamics::basis::{basis_coefficients, reduced_basis};
/// let basis: Vec<String> = ["CH4", "H2", "H2O", "NH3"].iter().map(|s| s.to_string()).collect();
/// let reduced = reduced_basis(&basis, "CH3OH").unwrap();
/// assert_eq!(reduced.len(), 3);
/// let coeffs = basis_coefficients(&reduced, "CH3OH").unwrap();
/// assert!((coeffs[1] + 1.0).abs() < 1e-9);
/// ```
pub mod basis;
