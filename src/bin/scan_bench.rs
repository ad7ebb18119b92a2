use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use treemirror::config::ScanMode;
use treemirror::scanner::{scan_pair, ScanOptions};
use treemirror::{Config, FileTree};

#[derive(Debug)]
struct BenchResult {
    sequential: Vec<Duration>,
    concurrent: Vec<Duration>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let (source, destination) = match (args.next(), args.next()) {
        (Some(src), Some(dst)) => (PathBuf::from(src), PathBuf::from(dst)),
        _ => {
            eprintln!("Usage: cargo run --bin scan_bench -- <source> <destination> [runs]");
            std::process::exit(2);
        }
    };

    let runs: usize = args.next().and_then(|v| v.parse().ok()).unwrap_or(5);

    let config = Config {
        source: source.clone(),
        destination: destination.clone(),
        ..Config::default()
    };
    let options = ScanOptions::from(&config);

    println!(
        "Benchmarking scans of {} and {}\nRuns: {}",
        source.display(),
        destination.display(),
        runs
    );

    // Warm the page cache once so the first timed run is not an outlier.
    let seq = scan_pair(&source, &destination, &options, ScanMode::Sequential, None)?;
    let con = scan_pair(&source, &destination, &options, ScanMode::Concurrent, None)?;
    assert_parity(&seq, &con)?;

    let mut result = BenchResult {
        sequential: Vec::with_capacity(runs),
        concurrent: Vec::with_capacity(runs),
    };

    for i in 0..runs {
        let seq_start = Instant::now();
        let seq = scan_pair(&source, &destination, &options, ScanMode::Sequential, None)?;
        let seq_elapsed = seq_start.elapsed();

        let con_start = Instant::now();
        let con = scan_pair(&source, &destination, &options, ScanMode::Concurrent, None)?;
        let con_elapsed = con_start.elapsed();

        assert_parity(&seq, &con)?;

        result.sequential.push(seq_elapsed);
        result.concurrent.push(con_elapsed);

        println!(
            "run {:>2}: seq={:>8.3} ms  con={:>8.3} ms",
            i + 1,
            seq_elapsed.as_secs_f64() * 1000.0,
            con_elapsed.as_secs_f64() * 1000.0
        );
    }

    let seq_avg = average_ms(&result.sequential);
    let con_avg = average_ms(&result.concurrent);
    let speedup = if con_avg > 0.0 { seq_avg / con_avg } else { 0.0 };

    println!("\nSummary");
    println!("  sequential avg: {:>8.3} ms", seq_avg);
    println!("  concurrent avg: {:>8.3} ms", con_avg);
    println!("  speedup       : {:>8.2}x", speedup);

    Ok(())
}

fn average_ms(values: &[Duration]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum_ms: f64 = values.iter().map(|d| d.as_secs_f64() * 1000.0).sum();
    sum_ms / values.len() as f64
}

fn assert_parity(seq: &(FileTree, FileTree), con: &(FileTree, FileTree)) -> Result<(), String> {
    for (name, a, b) in [("source", &seq.0, &con.0), ("destination", &seq.1, &con.1)] {
        if a.entries() != b.entries() {
            return Err(format!(
                "{} tree mismatch: sequential={} files, concurrent={} files",
                name,
                a.len(),
                b.len()
            ));
        }
    }
    Ok(())
}
