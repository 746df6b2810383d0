use crate::support::{LoadedFixture, load_fixture_or_exit, points_or_exit};
use cantor_kernel::encode;
use serde_json::json;

pub fn run(fixture: String, depth: Option<u32>, points: Vec<u32>, json_output: bool) {
    let LoadedFixture { cuts, labels } = load_fixture_or_exit(&fixture);
    let depth = depth.unwrap_or(cuts.len() as u32);
    let points = points_or_exit(&points, &cuts);

    let codes: Vec<(u32, String)> = points
        .iter()
        .map(|point| (*point, encode(&cuts, point).prefix(depth).bit_string()))
        .collect();

    if json_output {
        let payload = json!({
            "fixture": fixture,
            "depth": depth,
            "codes": codes
                .iter()
                .map(|(point, bits)| json!({
                    "point": point,
                    "label": labels[*point as usize],
                    "bits": bits,
                }))
                .collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!("cantor encode {fixture} --depth {depth}");
        for (point, bits) in &codes {
            println!("  {} → {bits}", labels[*point as usize]);
        }
    }
}
