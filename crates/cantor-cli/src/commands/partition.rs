use crate::support::{LoadedFixture, load_fixture_or_exit, mask_labels, render_mask};
use cantor_kernel::{CellAddress, PartitionTower, extent};
use serde_json::json;

pub fn run(fixture: String, depth: Option<u32>, slots: bool, json_output: bool) {
    let LoadedFixture { cuts, labels } = load_fixture_or_exit(&fixture);
    let depth = depth.unwrap_or_else(|| cuts.full_depth());

    let mut tower = PartitionTower::new(&cuts);
    let level = tower.level(depth);
    let fingerprint = level.fingerprint();
    let slot_count = level.len();

    let cells: Vec<(CellAddress, u64)> = level
        .cells()
        .iter()
        .map(|cell| (cell.clone(), extent(&cuts, cell)))
        .filter(|(_, mask)| slots || *mask != 0)
        .collect();
    let nonempty = cells.iter().filter(|(_, mask)| *mask != 0).count();

    if json_output {
        let payload = json!({
            "fixture": fixture,
            "points": cuts.space().size(),
            "cutCount": cuts.len(),
            "depth": depth,
            "slotCount": slot_count,
            "nonemptyCount": nonempty,
            "cells": cells
                .iter()
                .map(|(cell, mask)| json!({
                    "address": cell.bit_string(),
                    "extent": mask,
                    "points": mask_labels(*mask, &labels),
                }))
                .collect::<Vec<_>>(),
            "fingerprint": fingerprint.0,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!("cantor partition {fixture} --depth {depth}");
        println!("  Space: {} points", cuts.space().size());
        println!("  Cuts: {} listed", cuts.len());
        println!("  Level {depth}: {nonempty} nonempty cells of {slot_count} slots");
        for (cell, mask) in &cells {
            println!("    {cell} → {}", render_mask(*mask, &labels));
        }
        println!("  Fingerprint: {fingerprint}");
    }
}
