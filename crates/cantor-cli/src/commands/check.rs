use crate::support::{LoadedFixture, load_fixture_or_exit};
use cantor_kernel::run_audit;
use serde_json::json;

pub fn run(fixture: String, depth: Option<u32>, json_output: bool) {
    let LoadedFixture { cuts, .. } = load_fixture_or_exit(&fixture);
    let depth = depth.unwrap_or_else(|| cuts.full_depth());

    let report = run_audit(&cuts, depth);

    if json_output {
        let payload = json!({
            "fixture": fixture,
            "report": &report,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!("cantor check {fixture} --depth {depth}");
        println!(
            "  Result: {}",
            if report.is_accepted() {
                "accepted"
            } else {
                "rejected"
            }
        );
        println!("  Fingerprint: {}", report.level_fingerprint);
        for failure in &report.failures {
            println!("    [{}] {}", failure.class, failure.message);
        }
    }

    if !report.is_accepted() {
        std::process::exit(1);
    }
}
