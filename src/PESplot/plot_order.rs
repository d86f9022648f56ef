//! # Plot order
//!
//! Linearizes a branching reaction network into the left-to-right sequence of species used by
//! the energy diagram.
//!
//! 1. The deepest well is the anchor (ties go to the alphabetically first name). Without any
//!    well the lowest species of any kind is used.
//! 2. The partners of the anchor are dealt to the right and to the left side in turn, the first
//!    one going right. A chain `W1 - W2 - W3` anchored at `W1` is therefore drawn as
//!    `W1 W2 W3` and not mirrored; sending every partner of the anchor to the left instead
//!    would put the anchor at the right edge of such a chain.
//! 3. Each side grows outward: a partner is put at the outer end followed by its own unplaced
//!    partners, then the outermost well of the side that still has unplaced partners is
//!    expanded the same way. The left side is grown first.
//! 4. Species that cannot be reached from the anchor end up at the right end, sorted by energy.
use crate::PESplot::plot_errors::PlotError;
use crate::PESplot::surface::PesSurface;
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Clone, PartialEq)]
pub struct PlotOrder {
    pub anchor: String,
    /// species and their energies, left to right
    pub entries: Vec<(String, f64)>,
    /// species not connected to the anchor; they are the tail of `entries`
    pub unreachable: Vec<String>,
}

impl PlotOrder {
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn find_anchor(surface: &PesSurface) -> Result<String, PlotError> {
    let lowest = |wells_only: bool| {
        let mut best: Option<(&String, f64)> = None;
        // BTreeMap iteration is alphabetical, strict `<` keeps the first name on ties
        for (name, spc) in &surface.species {
            if wells_only && !surface.is_well(name) {
                continue;
            }
            if best.is_none_or(|(_, e)| spc.energy < e) {
                best = Some((name, spc.energy));
            }
        }
        best.map(|(name, _)| name.clone())
    };
    if let Some(well) = lowest(true) {
        return Ok(well);
    }
    let fallback = lowest(false).ok_or(PlotError::EmptySurface)?;
    warn!(
        "no well on the surface, the lowest species '{}' is used as anchor",
        fallback
    );
    Ok(fallback)
}

fn unplaced_partners<'a>(
    adj: &HashMap<&'a str, Vec<&'a str>>,
    placed: &HashSet<&'a str>,
    spc: &str,
) -> Vec<&'a str> {
    adj.get(spc)
        .map(|partners| {
            partners
                .iter()
                .copied()
                .filter(|p| !placed.contains(p))
                .collect()
        })
        .unwrap_or_default()
}

/// Grows one side. `side` is ordered from the anchor outward.
fn grow_side<'a>(
    surface: &PesSurface,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    placed: &mut HashSet<&'a str>,
    side: &mut Vec<&'a str>,
    mut pending: Vec<&'a str>,
) {
    loop {
        for spc in pending {
            if !placed.insert(spc) {
                continue;
            }
            side.push(spc);
            for spc2 in unplaced_partners(adj, placed, spc) {
                if placed.insert(spc2) {
                    side.push(spc2);
                }
            }
        }
        let frontier = side
            .iter()
            .rev()
            .find(|name| surface.is_well(name) && !unplaced_partners(adj, placed, name).is_empty());
        match frontier {
            Some(well) => {
                debug!("expanding well {}", well);
                pending = unplaced_partners(adj, placed, well);
            }
            None => break,
        }
    }
}

/// Orders the species of a surface for plotting
pub fn resort_names(surface: &PesSurface) -> Result<PlotOrder, PlotError> {
    surface.validate()?;
    let anchor = find_anchor(surface)?;
    let adj = surface.adjacency();

    let mut placed: HashSet<&str> = HashSet::new();
    placed.insert(anchor.as_str());

    let mut right_pending = Vec::new();
    let mut left_pending = Vec::new();
    for (i, partner) in unplaced_partners(&adj, &placed, &anchor)
        .into_iter()
        .enumerate()
    {
        if i % 2 == 0 {
            right_pending.push(partner);
        } else {
            left_pending.push(partner);
        }
    }

    let mut left = Vec::new();
    let mut right = Vec::new();
    grow_side(surface, &adj, &mut placed, &mut left, left_pending);
    grow_side(surface, &adj, &mut placed, &mut right, right_pending);

    let mut order: VecDeque<&str> = VecDeque::with_capacity(surface.len());
    order.push_back(anchor.as_str());
    for name in &left {
        order.push_front(name);
    }
    for name in &right {
        order.push_back(name);
    }

    let mut remainder: Vec<(&String, f64)> = surface
        .species
        .iter()
        .filter(|(name, _)| !placed.contains(name.as_str()))
        .map(|(name, spc)| (name, spc.energy))
        .collect();
    remainder.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    let unreachable: Vec<String> = remainder.iter().map(|(name, _)| (*name).clone()).collect();
    if !unreachable.is_empty() {
        warn!(
            "species not connected to the anchor '{}' are placed at the right end: {:?}",
            anchor, unreachable
        );
    }

    let mut entries = Vec::with_capacity(surface.len());
    for name in order.iter().copied().chain(unreachable.iter().map(|s| s.as_str())) {
        // every name comes from the surface itself
        let energy = surface.energy(name).ok_or(PlotError::EmptySurface)?;
        entries.push((name.to_string(), energy));
    }
    info!("plot order anchored at {}: {:?}", anchor, order);
    Ok(PlotOrder {
        anchor,
        entries,
        unreachable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PESplot::surface::SpeciesKind;

    fn branched_surface() -> PesSurface {
        PesSurface::from_energies(
            &[
                ("W1", -10.0),
                ("B1", 5.0),
                ("W2", -2.0),
                ("B2", 8.0),
                ("P1", 3.0),
                ("B3", 6.0),
                ("P2", 1.0),
            ],
            &[
                ("W1", "B1"),
                ("B1", "W2"),
                ("W1", "B2"),
                ("B2", "P1"),
                ("W2", "B3"),
                ("B3", "P2"),
            ],
        )
    }

    #[test]
    fn test_anchor_is_deepest_well() {
        let surface = PesSurface::from_energies(
            &[("W1", -10.0), ("W2", -5.0), ("W3", 0.0)],
            &[("W1", "W2"), ("W2", "W3")],
        );
        assert_eq!(find_anchor(&surface).unwrap(), "W1");
        let order = resort_names(&surface).unwrap();
        assert_eq!(order.anchor, "W1");
        assert_eq!(order.names(), vec!["W1", "W2", "W3"]);
        assert!(order.unreachable.is_empty());
    }

    #[test]
    fn test_anchor_tie_breaks_by_name() {
        let surface = PesSurface::from_energies(&[("W2", -10.0), ("W1", -10.0), ("P1", -20.0)], &[]);
        assert_eq!(find_anchor(&surface).unwrap(), "W1");
    }

    #[test]
    fn test_anchor_without_wells() {
        let surface = PesSurface::from_energies(
            &[("B1", 5.0), ("P1", -3.0), ("P2", 1.0)],
            &[("P1", "B1"), ("B1", "P2")],
        );
        let order = resort_names(&surface).unwrap();
        assert_eq!(order.anchor, "P1");
        assert_eq!(order.names(), vec!["P1", "B1", "P2"]);
    }

    #[test]
    fn test_branched_order() {
        let order = resort_names(&branched_surface()).unwrap();
        assert_eq!(
            order.names(),
            vec!["P1", "B2", "W1", "B1", "W2", "B3", "P2"]
        );
        assert_eq!(order.entries[2], ("W1".to_string(), -10.0));
    }

    #[test]
    fn test_resort_is_idempotent() {
        let surface = branched_surface();
        let first = resort_names(&surface).unwrap();
        let second = resort_names(&surface).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_species_placed_once() {
        let mut surface = branched_surface();
        // a second branch hanging off W2 and a cycle back to the anchor
        surface.add_species("B4", 4.0, None);
        surface.add_species("W3", -4.0, None);
        surface.connect("W2", "B4");
        surface.connect("B4", "W3");
        surface.connect("W3", "B2");
        let order = resort_names(&surface).unwrap();
        assert_eq!(order.len(), surface.len());
        let unique: HashSet<&str> = order.names().into_iter().collect();
        assert_eq!(unique.len(), surface.len());
    }

    #[test]
    fn test_unreachable_species_go_to_remainder() {
        let mut surface = branched_surface();
        surface.add_species("W9", 2.0, None);
        surface.add_species("P9", -1.0, None);
        let order = resort_names(&surface).unwrap();
        assert_eq!(order.unreachable, vec!["P9".to_string(), "W9".to_string()]);
        let names = order.names();
        assert_eq!(&names[names.len() - 2..], &["P9", "W9"]);
        assert_eq!(order.len(), surface.len());
    }

    #[test]
    fn test_no_connections_at_all() {
        let surface = PesSurface::from_energies(&[("W1", -10.0), ("W2", -5.0), ("W3", 0.0)], &[]);
        let order = resort_names(&surface).unwrap();
        assert_eq!(order.names(), vec!["W1", "W2", "W3"]);
        assert_eq!(order.unreachable, vec!["W2".to_string(), "W3".to_string()]);
    }

    #[test]
    fn test_explicit_kind_overrides_name() {
        let mut surface = PesSurface::new();
        surface.add_species("INT1", -20.0, Some(SpeciesKind::Well));
        surface.add_species("W1", -10.0, None);
        surface.add_species("TS1", 3.0, None);
        surface.connect("INT1", "TS1");
        surface.connect("TS1", "W1");
        let order = resort_names(&surface).unwrap();
        assert_eq!(order.anchor, "INT1");
        assert_eq!(order.names(), vec!["INT1", "TS1", "W1"]);
    }

    #[test]
    fn test_invalid_connection_is_reported() {
        let surface = PesSurface::from_energies(&[("W1", -10.0)], &[("W1", "B7")]);
        assert!(matches!(
            resort_names(&surface),
            Err(PlotError::UnknownSpecies { index: 0, .. })
        ));
    }
}
