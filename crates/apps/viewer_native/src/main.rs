use std::env;
use std::fs;

use catalog::{LoaderConfig, load_catalog};
use rand::SeedableRng;
use rand::rngs::StdRng;
use starfield::{GlobeConfig, PointField, PointMaterial, Projector};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Runs the full load -> project -> pack pipeline against a catalog file and
/// reports what the web viewer would upload, without a GPU in sight.
fn real_main() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let mut catalog_path: Option<String> = None;
    let mut variant = "night".to_string();
    let mut seed: u64 = 0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--variant" => {
                i += 1;
                if i >= args.len() {
                    return Err("--variant requires a value".to_string());
                }
                variant = args[i].clone();
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    return Err("--seed requires a value".to_string());
                }
                seed = args[i]
                    .parse::<u64>()
                    .map_err(|_| "--seed must be an integer".to_string())?;
            }
            s if s.starts_with('-') => {
                return Err(format!("unknown arg: {s}\n\n{}", usage()));
            }
            _ => {
                catalog_path = Some(args[i].clone());
            }
        }
        i += 1;
    }

    let catalog_path = catalog_path.ok_or_else(usage)?;
    let config = match variant.as_str() {
        "night" => GlobeConfig::night(),
        "paper" => GlobeConfig::paper(),
        other => return Err(format!("unknown variant: {other}\n\n{}", usage())),
    };

    let text =
        fs::read_to_string(&catalog_path).map_err(|e| format!("read {catalog_path}: {e}"))?;

    let loader = LoaderConfig::default();
    let loaded = load_catalog(&text, &loader);
    info!(
        "catalog parsed: {} rows scanned, {} valid, {} skipped, {} highlights",
        loaded.rows_scanned,
        loaded.bulk_len(),
        loaded.rows_skipped,
        loaded.highlight_len()
    );
    if loaded.bulk_len() == 0 {
        warn!("no valid bulk rows; only the highlight stars would render");
    }

    let projector = Projector::new(&config, loader.range);
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<_> = loaded
        .records
        .iter()
        .map(|r| projector.project(r, &mut rng))
        .collect();
    let field = PointField::pack(&points);

    let mut min_size = f32::INFINITY;
    let mut max_size = f32::NEG_INFINITY;
    for &s in &field.sizes {
        min_size = min_size.min(s);
        max_size = max_size.max(s);
    }

    let material = PointMaterial::from_config(&config);
    info!(
        "point field packed: {} stars, sizes {:.2}..{:.2} (inflated max {:.2}), {} buffer floats",
        field.len(),
        min_size,
        max_size,
        material.inflated_size(max_size),
        field.positions.len() + field.colors.len() + field.sizes.len()
    );

    Ok(())
}

fn usage() -> String {
    let exe = env::args().next().unwrap_or_else(|| "viewer_native".to_string());
    format!(
        "Usage:\n  {exe} <catalog.csv> [--variant night|paper] [--seed N]\n\nNotes:\n- Runs the catalog through the same projection pipeline as the web viewer.\n- --seed fixes the color-bucket randomness for reproducible runs.\n"
    )
}
