use crate::Kinetics::pes::{PesChannels, PesDict};
use crate::Kinetics::subpes::SubPesMap;
use prettytable::{Cell, Row, Table};
use std::collections::HashMap;

/// one row per PES: index, formula, number of channels, number of sub-PES
pub fn pes_overview_table(pes_dct: &PesDict, conn_chn_dct: &HashMap<String, SubPesMap>) -> Table {
    let mut table = Table::new();
    table.set_titles(Row::new(vec![
        Cell::new("PES"),
        Cell::new("formula"),
        Cell::new("channels"),
        Cell::new("sub-PES"),
    ]));
    for (pes_idx, (formula, channels)) in pes_dct.iter().enumerate() {
        let n_subpes = conn_chn_dct.get(formula).map(|s| s.len()).unwrap_or(0);
        table.add_row(Row::new(vec![
            Cell::new(&(pes_idx + 1).to_string()),
            Cell::new(formula),
            Cell::new(&channels.len().to_string()),
            Cell::new(&n_subpes.to_string()),
        ]));
    }
    table
}

/// channels of one PES listed by sub-PES
pub fn subpes_table(channels: &PesChannels, subpes: &SubPesMap) -> Table {
    let mut table = Table::new();
    table.set_titles(Row::new(vec![
        Cell::new("sub-PES"),
        Cell::new("channel"),
        Cell::new("reaction"),
    ]));
    for (subpes_idx, chn_idxs) in subpes {
        for &chn_idx in chn_idxs {
            let name = channels
                .rxn_name_lst
                .get(chn_idx)
                .map(|s| s.as_str())
                .unwrap_or("?");
            table.add_row(Row::new(vec![
                Cell::new(&(subpes_idx + 1).to_string()),
                Cell::new(&chn_idx.to_string()),
                Cell::new(name),
            ]));
        }
    }
    table
}

pub fn print_pes_summary(pes_dct: &PesDict, conn_chn_dct: &HashMap<String, SubPesMap>) {
    pes_overview_table(pes_dct, conn_chn_dct).printstd();
    for (pes_idx, (formula, channels)) in pes_dct.iter().enumerate() {
        if let Some(subpes) = conn_chn_dct.get(formula) {
            println!("\nPES {}: {}", pes_idx + 1, formula);
            subpes_table(channels, subpes).printstd();
        }
    }
}
