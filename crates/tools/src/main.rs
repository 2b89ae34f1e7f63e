use std::env;
use std::fs;

use catalog::{ChunkedParser, LoaderConfig, MagnitudeRange, parse_row};
use serde::Serialize;

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "stats" => cmd_stats(args),
        "validate" => cmd_validate(args),
        _ => Err(usage()),
    }
}

#[derive(Debug, Serialize)]
struct CatalogStats {
    rows_scanned: usize,
    rows_valid: usize,
    rows_skipped: usize,
    magnitude_min: Option<f64>,
    magnitude_max: Option<f64>,
    bright_count: usize,
    faint_count: usize,
}

fn cmd_stats(args: Vec<String>) -> Result<(), String> {
    // starcat stats <catalog.csv> [--min-mag M] [--max-mag M]
    if args.is_empty() {
        return Err(usage());
    }

    let path = args[0].clone();
    let mut range = MagnitudeRange::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--min-mag" => {
                i += 1;
                if i >= args.len() {
                    return Err("--min-mag requires a value".to_string());
                }
                range.min = args[i]
                    .parse::<f64>()
                    .map_err(|_| "--min-mag must be a number".to_string())?;
            }
            "--max-mag" => {
                i += 1;
                if i >= args.len() {
                    return Err("--max-mag requires a value".to_string());
                }
                range.max = args[i]
                    .parse::<f64>()
                    .map_err(|_| "--max-mag must be a number".to_string())?;
            }
            other => {
                return Err(format!("unknown arg: {other}\n\n{}", usage()));
            }
        }
        i += 1;
    }

    let text = fs::read_to_string(&path).map_err(|e| format!("read {path}: {e}"))?;

    let mut stats = CatalogStats {
        rows_scanned: 0,
        rows_valid: 0,
        rows_skipped: 0,
        magnitude_min: None,
        magnitude_max: None,
        bright_count: 0,
        faint_count: 0,
    };

    for batch in ChunkedParser::new(&text, range, LoaderConfig::default().chunk_rows) {
        stats.rows_scanned = batch.rows_scanned;
        for rec in &batch.records {
            stats.rows_valid += 1;
            stats.magnitude_min = Some(match stats.magnitude_min {
                Some(m) => m.min(rec.magnitude),
                None => rec.magnitude,
            });
            stats.magnitude_max = Some(match stats.magnitude_max {
                Some(m) => m.max(rec.magnitude),
                None => rec.magnitude,
            });
            if rec.magnitude < 2.0 {
                stats.bright_count += 1;
            }
            if rec.magnitude > 5.0 {
                stats.faint_count += 1;
            }
        }
    }
    stats.rows_skipped = stats.rows_scanned - stats.rows_valid;

    let payload = serde_json::to_string_pretty(&stats).map_err(|e| format!("json: {e}"))?;
    println!("{payload}");
    Ok(())
}

fn cmd_validate(args: Vec<String>) -> Result<(), String> {
    // starcat validate <catalog.csv> [--strict]
    if args.is_empty() {
        return Err(usage());
    }

    let path = args[0].clone();
    let mut strict = false;

    for arg in &args[1..] {
        match arg.as_str() {
            "--strict" => strict = true,
            other => return Err(format!("unknown arg: {other}\n\n{}", usage())),
        }
    }

    let text = fs::read_to_string(&path).map_err(|e| format!("read {path}: {e}"))?;
    let range = MagnitudeRange::default();

    const MAX_REPORTED: usize = 20;
    let mut bad_lines: Vec<usize> = Vec::new();
    let mut total_bad = 0usize;
    let mut total = 0usize;

    // Line 1 is the header; data rows start at line 2.
    for (idx, line) in text.lines().enumerate().skip(1) {
        total += 1;
        if parse_row(line, &range).is_none() {
            total_bad += 1;
            if bad_lines.len() < MAX_REPORTED {
                bad_lines.push(idx + 1);
            }
        }
    }

    if total_bad == 0 {
        eprintln!("{path}: {total} rows, all valid");
        return Ok(());
    }

    eprintln!("{path}: {total_bad} of {total} rows invalid");
    for line_no in &bad_lines {
        eprintln!("  line {line_no}");
    }
    if total_bad > bad_lines.len() {
        eprintln!("  ... and {} more", total_bad - bad_lines.len());
    }

    if strict {
        Err(format!("{total_bad} invalid rows"))
    } else {
        Ok(())
    }
}

fn usage() -> String {
    let exe = env::args().next().unwrap_or_else(|| "starcat".to_string());
    format!(
        "Usage:\n  {exe} stats <catalog.csv> [--min-mag M] [--max-mag M]\n  {exe} validate <catalog.csv> [--strict]\n\nNotes:\n- Rows are valid when all four numeric fields parse and the magnitude is in range.\n- `stats` prints a JSON summary to stdout.\n- `validate` exits non-zero under --strict when any row is invalid.\n"
    )
}
