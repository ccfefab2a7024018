//! Shared fixtures: synthetic catalogs written with the crate's own encoder.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::Rng;
use starmap::{encode_catalog, StarKey, StarRecord, Vector3};

const NAME_PARTS: [&str; 8] = ["Alpha", "Vega", "Ærø", "天狼", "Ω-Centauri", "Kepler", "🌟", "Nova"];

/// Random catalog of `n` stars spread over `[-extent, extent]²`.
///
/// Names are unique, mix ASCII and non-ASCII text, and never collide with
/// the reference landmark names.
pub fn synthetic_catalog(rng: &mut StdRng, n: usize, extent: f32) -> Vec<StarRecord> {
    (0..n)
        .map(|i| {
            let part = NAME_PARTS[rng.random_range(0..NAME_PARTS.len())];
            StarRecord {
                key: StarKey(rng.random()),
                name: format!("{}-{}", part, i),
                aux: rng.random(),
                flags: rng.random(),
                position: Vector3::new(
                    rng.random_range(-extent..extent),
                    rng.random_range(-extent..extent),
                    rng.random_range(-50.0..50.0),
                ),
                star_type: rng.random_range(0..15),
                planet_count: rng.random(),
            }
        })
        .collect()
}

/// Star with the given name at `(x, y)`, otherwise neutral fields.
pub fn named_star(name: &str, x: f32, y: f32) -> StarRecord {
    StarRecord {
        key: StarKey(*b"LMRK"),
        name: name.to_string(),
        aux: [0; 4],
        flags: 0,
        position: Vector3::new(x, y, 0.0),
        star_type: 1,
        planet_count: 0,
    }
}

/// Encode `stars` to `dir/name` and return the path.
pub fn write_catalog(dir: &Path, name: &str, stars: &[StarRecord]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode_catalog(stars))
        .unwrap_or_else(|e| panic!("Failed to write {:?}: {}", path, e));
    path
}
