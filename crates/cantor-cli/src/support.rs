use cantor_kernel::{CantorError, FiniteSpace, MaskCuts};
use serde::Deserialize;
use std::fs;

/// A space fixture: a finite space plus its listed cut masks.
///
/// ```json
/// { "points": 3, "cuts": [0, 1, 3], "labels": ["a", "b", "c"] }
/// ```
///
/// Masks are little-endian over point indices; `labels` is optional
/// and defaults to `p0`, `p1`, ….
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SpaceFixture {
    pub points: u32,
    pub cuts: Vec<u64>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

/// A fixture resolved into kernel values.
pub struct LoadedFixture {
    pub cuts: MaskCuts,
    pub labels: Vec<String>,
}

pub fn load_fixture_or_exit(path: &str) -> LoadedFixture {
    load_fixture(path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

fn load_fixture(path: &str) -> Result<LoadedFixture, CantorError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| CantorError::Fixture(format!("{path}: {e}")))?;
    let fixture: SpaceFixture = serde_json::from_str(&raw)
        .map_err(|e| CantorError::Fixture(format!("{path}: {e}")))?;

    let space = FiniteSpace::new(fixture.points)?;
    let cuts = MaskCuts::new(space, fixture.cuts)?;

    let labels = match fixture.labels {
        Some(labels) => {
            if labels.len() != fixture.points as usize {
                return Err(CantorError::Fixture(format!(
                    "{path}: {} labels for {} points",
                    labels.len(),
                    fixture.points
                )));
            }
            labels
        }
        None => space.points().map(|p| format!("p{p}")).collect(),
    };

    Ok(LoadedFixture { cuts, labels })
}

/// Validate `--point` arguments against the space.
pub fn points_or_exit(requested: &[u32], cuts: &MaskCuts) -> Vec<u32> {
    if requested.is_empty() {
        return cuts.space().points().collect();
    }
    for point in requested {
        if !cuts.space().contains(*point) {
            let err = CantorError::PointOutOfSpace {
                point: *point,
                size: cuts.space().size(),
            };
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
    requested.to_vec()
}

/// The labels of the points in a mask.
pub fn mask_labels(mask: u64, labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .enumerate()
        .filter(|(p, _)| (mask >> p) & 1 == 1)
        .map(|(_, label)| label.clone())
        .collect()
}

/// Render a mask as a point-label set, `∅` when empty.
pub fn render_mask(mask: u64, labels: &[String]) -> String {
    if mask == 0 {
        return "∅".to_string();
    }
    let names: Vec<&str> = labels
        .iter()
        .enumerate()
        .filter(|(p, _)| (mask >> p) & 1 == 1)
        .map(|(_, label)| label.as_str())
        .collect();
    format!("{{{}}}", names.join(", "))
}
