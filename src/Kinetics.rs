/// Module to calculate the atomic composition of a chemical formula and its Hill notation
///
///  # Examples
/// ```
/// use KiPES::Kinetics::molmass::{parse_formula, hill_formula};
/// let composition = parse_formula("CH3CH2OH").unwrap();
/// assert_eq!(hill_formula(&composition), "C2H6O");
/// ```
pub mod molmass;
/// error type shared by the mechanism reader, grouper and writer
pub mod mech_errors;
/// species name -> formula dictionary read from CSV
pub mod species_dict;
/// eng
/// The module takes as input the text of a mechanism in CHEMKIN format and produces
/// for every reaction: the formula of its potential energy surface, the names of reactants,
/// the names of products and the reaction label.
/// Any other mechanism format is rejected.
/// # Examples
/// ```
/// use KiPES::Kinetics::mechanism_parser::{MechanismFormat, read_mechanism};
/// use KiPES::Kinetics::species_dict::SpeciesDict;
/// let mech = "REACTIONS\nH + O2 (+M) = HO2 (+M)  4.65E+12 0.44 0.0\nEND\n";
/// let reactions = read_mechanism(mech, &MechanismFormat::Chemkin, &SpeciesDict::new(), false).unwrap();
/// assert_eq!(reactions[0].formula(), "HO2");
/// ```
pub mod mechanism_parser;
/// grouping of reactions into potential energy surfaces by formula
pub mod pes;
/// splitting of every potential energy surface into connected sub-surfaces
///
/// # Examples
/// ```
/// use KiPES::Kinetics::subpes::connected_channels;
/// let s = |v: &[&str]| v.iter().map(|x| x.to_string()).collect::<Vec<String>>();
/// let rcts = vec![s(&["W1"]), s(&["W2"]), s(&["Q1"])];
/// let prds = vec![s(&["W2"]), s(&["P1", "P2"]), s(&["Q2"])];
/// let subpes = connected_channels(&rcts, &prds);
/// assert_eq!(subpes[&0], vec![0, 1]);
/// assert_eq!(subpes[&1], vec![2]);
/// ```
pub mod subpes;
/// tests
pub mod subpes_tests;
/// CHEMKIN writer for PES dictionaries
pub mod mechanism_writer;
/// tables with PES and sub-PES
pub mod pes_summary;
/// reading, grouping and partitioning under one hood
pub mod pes_analysis;
