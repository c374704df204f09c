use benchflow::catalog::{CatalogPayload, DataType, ParameterDefinition, ParameterKind, ServiceDefinition};
use benchflow::graph::{CanvasData, Edge, Node, Position};
use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;

/// A CLI tool to generate random catalogs and canvases for benchflow
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated catalog to
    #[arg(long, default_value = "generated_catalog.json")]
    catalog: String,

    /// The path to write the generated canvas to
    #[arg(long, default_value = "generated_canvas.json")]
    canvas: String,

    /// Number of independent chains on the canvas
    #[arg(long, default_value_t = 3)]
    chains: usize,

    /// Maximum number of nodes per chain
    #[arg(long, default_value_t = 5)]
    max_len: usize,

    /// Number of isolated nodes to add
    #[arg(long, default_value_t = 1)]
    isolated: usize,
}

const SERVICES: [(&str, &str); 6] = [
    ("pcr", "PCR"),
    ("dpn1", "DpnI Digest"),
    ("run-gel", "Run Gel"),
    ("gel-extraction", "Gel Extraction"),
    ("ligation", "Ligation"),
    ("sequencing", "Sanger Sequencing"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.max_len == 0 {
        eprintln!("Error: --max-len must be at least 1");
        std::process::exit(1);
    }

    let catalog = generate_catalog();
    let canvas = generate_canvas(&mut rng, cli.chains, cli.max_len, cli.isolated);

    fs::write(&cli.catalog, serde_json::to_string_pretty(&catalog)?)?;
    fs::write(&cli.canvas, serde_json::to_string_pretty(&canvas)?)?;

    println!(
        "Wrote {} service(s) to '{}' and {} node(s) / {} edge(s) to '{}'",
        catalog.services.len(),
        cli.catalog,
        canvas.nodes.len(),
        canvas.edges.len(),
        cli.canvas
    );
    Ok(())
}

/// Services connect to the ones after them in `SERVICES`.
fn generate_catalog() -> CatalogPayload {
    let services = SERVICES
        .iter()
        .enumerate()
        .map(|(i, (id, name))| ServiceDefinition {
            id: id.to_string(),
            name: name.to_string(),
            parameters: vec![
                ParameterDefinition {
                    id: "sample".to_string(),
                    name: "Sample".to_string(),
                    kind: if i == 0 {
                        ParameterKind::Input
                    } else {
                        ParameterKind::Result
                    },
                    data_type: DataType::String,
                    options: None,
                    required: true,
                },
                ParameterDefinition {
                    id: "volume".to_string(),
                    name: "Volume (uL)".to_string(),
                    kind: ParameterKind::Input,
                    data_type: DataType::Number,
                    options: None,
                    required: false,
                },
            ],
            allowed_connections: SERVICES[i + 1..]
                .iter()
                .map(|(id, _)| id.to_string())
                .collect(),
            description: None,
            icon: None,
        })
        .collect();

    CatalogPayload {
        services,
        bundles: Vec::new(),
    }
}

fn generate_canvas(rng: &mut ThreadRng, chains: usize, max_len: usize, isolated: usize) -> CanvasData {
    let mut data = CanvasData::default();
    let mut next_id = 0;

    for chain in 0..chains {
        let len = rng.random_range(1..=max_len.min(SERVICES.len()));
        let mut service = rng.random_range(0..=SERVICES.len() - len);
        let mut previous: Option<String> = None;
        for step in 0..len {
            next_id += 1;
            let id = format!("node-{}", next_id);
            data.nodes.push(random_node(
                &id,
                service,
                Position::new(chain as f64 * 300.0, step as f64 * 150.0),
            ));
            if let Some(source) = previous {
                data.edges
                    .push(Edge::new(format!("edge-{}", next_id), source, id.clone()));
            }
            previous = Some(id);
            service += 1;
        }
    }

    for i in 0..isolated {
        next_id += 1;
        let service = rng.random_range(0..SERVICES.len());
        data.nodes.push(random_node(
            &format!("node-{}", next_id),
            service,
            Position::new(chains as f64 * 300.0, i as f64 * 150.0),
        ));
    }

    data
}

fn random_node(id: &str, service: usize, position: Position) -> Node {
    let (service_id, label) = SERVICES[service];
    Node {
        id: id.to_string(),
        service_id: service_id.to_string(),
        label: label.to_string(),
        position,
        form_data: Vec::new(),
        additional_instructions: None,
    }
}
