use std::path::Path;
use std::process::ExitCode;

use filigree::aggregate::Aggregate;
use filigree::emit::emit;
use filigree::model::Database;
use filigree::walk::{walk_tree, TreeState};
use filigree::wireframe::{DisplayConfig, WireframeCollector};

fn main() -> ExitCode {
    // Default: WARN for everything, INFO for filigree.
    // Override with RUST_LOG (e.g. RUST_LOG=filigree=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("filigree=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        let program = args.first().map_or("filigree", String::as_str);
        eprintln!("Usage: {program} model-file objects...");
        return ExitCode::from(1);
    }

    let database = match Database::open(Path::new(&args[1])) {
        Ok(database) => database,
        Err(err) => {
            eprintln!("building the database directory for [{}] failed: {err}", args[1]);
            return ExitCode::from(2);
        }
    };

    let names: Vec<&str> = args[2..].iter().map(String::as_str).collect();
    let mut collector = WireframeCollector::new(DisplayConfig::default());
    match walk_tree(&database, &names, &TreeState::default(), &mut collector) {
        Ok(stats) => tracing::info!(
            new_solids = stats.new_solids,
            duplicates = stats.duplicates,
            failures = stats.failures,
            "walk complete"
        ),
        // Emission still runs: print whatever was gathered.
        Err(err) => tracing::warn!("{err}"),
    }

    let registry = collector.into_registry();
    let aggregate = Aggregate::compute(&registry);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = emit(&mut out, database.title(), &registry, &aggregate) {
        eprintln!("writing wireframe data failed: {err}");
        return ExitCode::from(2);
    }
    ExitCode::SUCCESS
}
