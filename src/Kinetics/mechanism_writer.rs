//! Writes a PES dictionary back to CHEMKIN text. Every surface gets a `! PES:` comment, and when
//! the connected channels are known every sub-surface gets a `! SUB-PES:` comment as well.
//! Kinetic parameters are not kept in the PES dictionary, so each channel is written with
//! placeholder Arrhenius parameters `1.0 0.0 0.0`.
use crate::Kinetics::mech_errors::MechanismError;
use crate::Kinetics::pes::{PesChannels, PesDict};
use crate::Kinetics::subpes::SubPesMap;
use log::{info, warn};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const PLACEHOLDER_RATE: &str = "1.0 0.0 0.0";

fn channel_line(channels: &PesChannels, formula: &str, chn_idx: usize) -> String {
    match channels.channel(chn_idx) {
        Some((rcts, prds, _)) => format!(
            "  {} = {}   {}\n",
            rcts.join(" + "),
            prds.join(" + "),
            PLACEHOLDER_RATE
        ),
        None => {
            warn!("PES {} has no channel {}, skipped", formula, chn_idx);
            String::new()
        }
    }
}

pub fn write_mechanism_string(
    pes_dct: &PesDict,
    conn_chn_dct: Option<&HashMap<String, SubPesMap>>,
) -> String {
    let mut mech_str = String::from("REACTIONS\n");
    for (pes_idx, (formula, channels)) in pes_dct.iter().enumerate() {
        let _ = writeln!(mech_str, "! PES: {} {}", pes_idx + 1, formula);
        match conn_chn_dct.and_then(|dct| dct.get(formula)) {
            Some(subpes) => {
                for (subpes_idx, chn_idxs) in subpes {
                    let _ = writeln!(mech_str, "! SUB-PES: {}", subpes_idx + 1);
                    for &chn_idx in chn_idxs {
                        mech_str.push_str(&channel_line(channels, formula, chn_idx));
                    }
                }
            }
            None => {
                for chn_idx in 0..channels.len() {
                    mech_str.push_str(&channel_line(channels, formula, chn_idx));
                }
            }
        }
    }
    mech_str.push_str("END\n");
    mech_str
}

/// Write the mechanism file from a PES dictionary
pub fn write_mechanism_file(
    pes_dct: &PesDict,
    conn_chn_dct: Option<&HashMap<String, SubPesMap>>,
    path: &Path,
) -> Result<(), MechanismError> {
    let mech_str = write_mechanism_string(pes_dct, conn_chn_dct);
    fs::write(path, mech_str)?;
    info!(
        "mechanism with {} PES written to '{}'",
        pes_dct.len(),
        path.display()
    );
    Ok(())
}
