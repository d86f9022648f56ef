//! # Connected channels (sub-PES)
//!
//! Splits every potential energy surface into sub-surfaces of connected channels.
//! Two channels are connected when they pass through a common well, i.e. one side of each
//! channel (the full reactant set or the full product set) is the same single species.
//! Bimolecular sides never connect channels: `A + B = C` and `A + D = E` stay apart even
//! though they share `A`. Connection is transitive.
//!
//! Output for one surface: {sub-PES index: [channel indices]}, sub-PES indices are 0-based
//! and numbered by the lowest channel index of each component, channel indices ascend.
use crate::Kinetics::pes::PesDict;
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// {sub-PES index: [channel indices]}
pub type SubPesMap = BTreeMap<usize, Vec<usize>>;

/// disjoint-set forest with union by rank and path compression
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// returns false if `a` and `b` were already in one set
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }

    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

/// the well of a reaction side, if the side is a single species
fn single_species(side: &[String]) -> Option<&str> {
    match side {
        [well] => Some(well.as_str()),
        _ => None,
    }
}

/// Connected channels of one surface given its parallel reactant and product lists.
/// Channels beyond the shorter of the two lists are ignored.
pub fn connected_channels(rct_names_lst: &[Vec<String>], prd_names_lst: &[Vec<String>]) -> SubPesMap {
    let n = rct_names_lst.len().min(prd_names_lst.len());
    let mut sets = DisjointSet::new(n);
    // well name -> first channel that went through it
    let mut well_owner: HashMap<&str, usize> = HashMap::new();
    for (chnl_idx, (rcts, prds)) in rct_names_lst.iter().zip(prd_names_lst).enumerate() {
        for side in [rcts.as_slice(), prds.as_slice()] {
            if let Some(well) = single_species(side) {
                match well_owner.entry(well) {
                    Entry::Occupied(owner) => {
                        if sets.union(*owner.get(), chnl_idx) {
                            debug!("channel {} joined to channel {} through {}", chnl_idx, owner.get(), well);
                        }
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(chnl_idx);
                    }
                }
            }
        }
    }

    let mut root_to_subpes: HashMap<usize, usize> = HashMap::new();
    let mut subpes = SubPesMap::new();
    for chnl_idx in 0..n {
        let root = sets.find(chnl_idx);
        let next_idx = root_to_subpes.len();
        let subpes_idx = *root_to_subpes.entry(root).or_insert(next_idx);
        subpes.entry(subpes_idx).or_default().push(chnl_idx);
    }
    subpes
}

/// Connected channels for every surface of the mechanism: {formula: {sub-PES: [channels]}}
pub fn connected_channels_dct(pes_dct: &PesDict) -> HashMap<String, SubPesMap> {
    pes_dct
        .iter()
        .map(|(formula, channels)| {
            let subpes = connected_channels(&channels.rct_names_lst, &channels.prd_names_lst);
            debug!("PES {}: {} channels in {} sub-PES", formula, channels.len(), subpes.len());
            (formula.to_string(), subpes)
        })
        .collect()
}
