use crate::support::{LoadedFixture, load_fixture_or_exit};
use cantor_kernel::separation_report;
use serde_json::json;

pub fn run(fixture: String, depth: Option<u32>, json_output: bool) {
    let LoadedFixture { cuts, labels } = load_fixture_or_exit(&fixture);
    let depth = depth.unwrap_or_else(|| cuts.full_depth());

    let sample: Vec<u32> = cuts.space().points().collect();
    let report = separation_report(&cuts, &sample, depth);

    if json_output {
        let collision_labels: Vec<String> = report
            .collisions
            .iter()
            .map(|c| format!("{} ~ {}", labels[c.left], labels[c.right]))
            .collect();
        let payload = json!({
            "fixture": fixture,
            "separating": report.is_separating(),
            "report": &report,
            "collisionLabels": collision_labels,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!("cantor separation {fixture} --depth {depth}");
        println!("  Pairs checked: {}", report.pairs_checked);
        println!(
            "  Separating: {}",
            if report.is_separating() { "yes" } else { "no" }
        );
        for collision in &report.collisions {
            println!(
                "    {} ~ {} agree on every consulted cut",
                labels[collision.left], labels[collision.right]
            );
        }
    }
}
