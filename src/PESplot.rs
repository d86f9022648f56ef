/// errors of the surface reader, the plot order heuristic and the renderer
pub mod plot_errors;
/// species energies, species kinds and the connectivity list of one PES
pub mod surface;
/// left-to-right order of species for the energy diagram
///
/// # Examples
/// ```
/// use KiPES::PESplot::surface::PesSurface;
/// use KiPES::PESplot::plot_order::resort_names;
/// let surface = PesSurface::from_energies(
///     &[("W1", -10.0), ("B1", 5.0), ("P1", 2.0)],
///     &[("W1", "B1"), ("B1", "P1")],
/// );
/// let order = resort_names(&surface).unwrap();
/// assert_eq!(order.names(), vec!["W1", "B1", "P1"]);
/// ```
pub mod plot_order;
/// rendering constants stored as JSON
pub mod plot_settings;
pub mod svg_elements;
/// SVG energy diagram
pub mod pes_plotter;
