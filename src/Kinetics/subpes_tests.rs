/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Kinetics::pes::{PesDict, Reaction};
    use crate::Kinetics::subpes::{SubPesMap, connected_channels, connected_channels_dct};
    use std::collections::HashSet;

    fn side(species: &[&str]) -> Vec<String> {
        species.iter().map(|s| s.to_string()).collect()
    }

    fn ch(rcts: &[&str], prds: &[&str]) -> (Vec<String>, Vec<String>) {
        (side(rcts), side(prds))
    }

    fn channels(eqs: Vec<(Vec<String>, Vec<String>)>) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
        eqs.into_iter().unzip()
    }

    fn assert_is_partition(subpes: &SubPesMap, n: usize) {
        let mut seen = HashSet::new();
        for idxs in subpes.values() {
            for idx in idxs {
                assert!(seen.insert(*idx), "channel {} appears twice", idx);
            }
        }
        assert_eq!(seen, (0..n).collect::<HashSet<usize>>());
    }

    #[test]
    fn test_two_separate_subpes() {
        // R0: W1 -> W2, R1: W2 -> P1, R2: Q1 -> Q2
        let (rcts, prds) = channels(vec![
            ch(&["W1"], &["W2"]),
            ch(&["W2"], &["P1"]),
            ch(&["Q1"], &["Q2"]),
        ]);
        let subpes = connected_channels(&rcts, &prds);
        assert_eq!(subpes.len(), 2);
        assert_eq!(subpes[&0], vec![0, 1]);
        assert_eq!(subpes[&1], vec![2]);
        assert_is_partition(&subpes, 3);
    }

    #[test]
    fn test_transitive_merge() {
        // A and C share no well, both share one with B which comes last
        let (rcts, prds) = channels(vec![
            ch(&["W1"], &["P1", "P2"]), // A
            ch(&["W3"], &["P3", "P4"]), // C
            ch(&["W1"], &["W3"]),       // B
        ]);
        let subpes = connected_channels(&rcts, &prds);
        assert_eq!(subpes.len(), 1);
        assert_eq!(subpes[&0], vec![0, 1, 2]);
    }

    #[test]
    fn test_bimolecular_sides_do_not_connect() {
        let (rcts, prds) = channels(vec![
            ch(&["A", "B"], &["W1"]),
            ch(&["A", "B"], &["W2"]),
            ch(&["A", "D"], &["W3"]),
        ]);
        let subpes = connected_channels(&rcts, &prds);
        assert_eq!(subpes.len(), 3);
        assert_is_partition(&subpes, 3);
    }

    #[test]
    fn test_well_on_either_side_connects() {
        // W2 is a product of channel 0 and the reactant of channel 2
        let (rcts, prds) = channels(vec![
            ch(&["R1", "R2"], &["W2"]),
            ch(&["X1"], &["X2"]),
            ch(&["W2"], &["P1", "P2"]),
        ]);
        let subpes = connected_channels(&rcts, &prds);
        assert_eq!(subpes[&0], vec![0, 2]);
        assert_eq!(subpes[&1], vec![1]);
    }

    #[test]
    fn test_bridge_joins_many_components() {
        let (rcts, prds) = channels(vec![
            ch(&["W1"], &["P1", "P2"]),
            ch(&["W2"], &["P3", "P4"]),
            ch(&["W3"], &["P5", "P6"]),
            ch(&["Q1"], &["Q2"]),
            ch(&["W1"], &["W2"]),
            ch(&["W2"], &["W3"]),
        ]);
        let subpes = connected_channels(&rcts, &prds);
        assert_eq!(subpes.len(), 2);
        assert_eq!(subpes[&0], vec![0, 1, 2, 4, 5]);
        assert_eq!(subpes[&1], vec![3]);
        assert_is_partition(&subpes, 6);
    }

    #[test]
    fn test_partition_over_larger_surface() {
        // ring of wells W0..W9 with one link missing plus isolated bimolecular channels
        let mut eqs: Vec<(Vec<String>, Vec<String>)> = Vec::new();
        for i in 0..10 {
            if i == 4 {
                continue;
            }
            eqs.push((side(&[format!("W{}", i).as_str()]), side(&[format!("W{}", (i + 1) % 10).as_str()])));
        }
        for i in 0..5 {
            eqs.push((side(&[format!("A{}", i).as_str(), "B"]), side(&[format!("C{}", i).as_str(), "D"])));
        }
        let rcts: Vec<Vec<String>> = eqs.iter().map(|(r, _)| r.clone()).collect();
        let prds: Vec<Vec<String>> = eqs.iter().map(|(_, p)| p.clone()).collect();
        let subpes = connected_channels(&rcts, &prds);
        // with W4 -> W5 removed the ring is a single chain W5..W9,W0..W4
        assert_eq!(subpes.len(), 1 + 5);
        assert_eq!(subpes[&0].len(), 9);
        assert_is_partition(&subpes, eqs.len());
    }

    #[test]
    fn test_connected_channels_dct() {
        let reactions = vec![
            Reaction::new("r0", "C2H5O", side(&["W1"]), side(&["W2"])),
            Reaction::new("r1", "CH4", side(&["CH3", "H"]), side(&["CH4"])),
            Reaction::new("r2", "C2H5O", side(&["Q1"]), side(&["Q2"])),
            Reaction::new("r3", "C2H5O", side(&["W2"]), side(&["P1", "P2"])),
        ];
        let pes = PesDict::from_reactions(&reactions);
        let conn = connected_channels_dct(&pes);
        assert_eq!(conn.len(), 2);
        let c2h5o = &conn["C2H5O"];
        assert_eq!(c2h5o[&0], vec![0, 2]);
        assert_eq!(c2h5o[&1], vec![1]);
        assert_eq!(conn["CH4"][&0], vec![0]);
    }
}
