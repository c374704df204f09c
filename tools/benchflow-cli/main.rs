use benchflow::config::EngineConfig;
use benchflow::decomposer::uncovered_nodes;
use benchflow::prelude::*;
use benchflow::readiness::ReadinessReport;
use benchflow::validator::illegal_edges;
use clap::{Parser, Subcommand};
use std::fs;
use tracing_subscriber::EnvFilter;

/// Inspect and convert lab workflow canvases
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the catalog JSON (`{"services": [...], "bundles": [...]}`)
    #[arg(short, long)]
    catalog: String,

    /// Optional path to an engine config JSON file
    #[arg(long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the workflows a canvas decomposes into, with readiness
    Decompose {
        /// Path to the canvas JSON (`{"nodes": [...], "edges": [...]}`)
        canvas: String,
    },
    /// List illegal connections, dangling edges and nodes left out of every workflow
    Validate { canvas: String },
    /// Print one submission payload per workflow as JSON
    Submit {
        canvas: String,
        /// Name of the submission
        #[arg(short, long, default_value = "Untitled workflow")]
        name: String,
    },
    /// Seed an empty canvas from a catalog bundle and print it as JSON
    Bundle { bundle_id: String },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("benchflow=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog_json = fs::read_to_string(&cli.catalog).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read catalog file '{}': {}",
            &cli.catalog, e
        ))
    });
    let catalog = Catalog::from_json(&catalog_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load catalog: {}", e)));
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Decompose { canvas } => run_decompose(&catalog, &load_canvas(&canvas, &config)),
        Command::Validate { canvas } => run_validate(&catalog, &load_canvas(&canvas, &config)),
        Command::Submit { canvas, name } => run_submit(&load_canvas(&canvas, &config), &name),
        Command::Bundle { bundle_id } => run_bundle(catalog, config, &bundle_id),
    }
}

fn load_canvas(path: &str, config: &EngineConfig) -> Canvas {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read canvas file '{}': {}", path, e))
    });
    let data: CanvasData = serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse canvas JSON: {}", e)));
    Canvas::from_data(data, config.id_scheme)
}

fn run_decompose(catalog: &Catalog, canvas: &Canvas) {
    let workflows = decompose(canvas.nodes(), canvas.edges());
    println!(
        "{} node(s), {} edge(s) -> {} workflow(s)",
        canvas.nodes().len(),
        canvas.edges().len(),
        workflows.len()
    );
    for (i, workflow) in workflows.iter().enumerate() {
        println!(
            "  {}. {}",
            i + 1,
            WorkflowFormatter::format_with_catalog(workflow, catalog)
        );
    }

    let report = ReadinessReport::for_canvas(canvas.nodes(), &workflows);
    if report.is_ready() {
        println!("All nodes are filled in.");
    } else {
        println!(
            "{} node(s) have missing parameters (marked with *).",
            report.unfilled_count()
        );
    }
}

fn run_validate(catalog: &Catalog, canvas: &Canvas) {
    let mut problems = 0;

    for (edge, err) in illegal_edges(catalog, canvas.nodes(), canvas.edges()) {
        println!("  [connection] edge '{}': {}", edge.id, err);
        problems += 1;
    }
    if let Err(e) = decompose_strict(canvas.nodes(), canvas.edges()) {
        println!("  [integrity] {}", e);
        problems += 1;
    }
    for node in uncovered_nodes(canvas.nodes(), canvas.edges()) {
        println!(
            "  [coverage] node '{}' ({}) is in no workflow",
            node.id, node.service_id
        );
        problems += 1;
    }

    if problems == 0 {
        println!("Canvas is valid.");
    } else {
        println!("{} problem(s) found.", problems);
        std::process::exit(2);
    }
}

fn run_submit(canvas: &Canvas, name: &str) {
    let submissions = benchflow::serializer::workflow_submissions(canvas.nodes(), canvas.edges(), name);
    let json = serde_json::to_string_pretty(&submissions)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize submissions: {}", e)));
    println!("{}", json);
}

fn run_bundle(catalog: Catalog, config: EngineConfig, bundle_id: &str) {
    let mut session = CanvasSession::new(catalog, config);
    session
        .add_bundle(bundle_id)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to seed bundle: {}", e)));
    let json = serde_json::to_string_pretty(&session.canvas().to_data())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize canvas: {}", e)));
    println!("{}", json);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
