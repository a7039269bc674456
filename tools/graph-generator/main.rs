use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use reqgraph::graph::{
    DependencyEdgeDefinition, GraphDefinition, RequestContent, RequestNodeDefinition,
};
use std::fs;

/// A CLI tool to generate random request graphs for exercising the traversal engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_graph.json")]
    output: String,

    /// The number of requests to generate
    #[arg(short, long, default_value_t = 12)]
    nodes: usize,

    /// The probability of a dependency between any earlier and later request
    #[arg(short, long, default_value_t = 0.2)]
    edge_probability: f64,

    /// Also add back edges, producing cycles
    #[arg(long)]
    cycles: bool,
}

const METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];
const RESOURCES: [&str; 6] = ["session", "users", "orders", "items", "cart", "invoices"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if !(0.0..=1.0).contains(&cli.edge_probability) {
        eprintln!(
            "Error: --edge-probability ({}) must be between 0 and 1",
            cli.edge_probability
        );
        std::process::exit(1);
    }

    println!(
        "Generating request graph ({} nodes, edge probability {})...",
        cli.nodes, cli.edge_probability
    );

    let nodes: Vec<RequestNodeDefinition> =
        (0..cli.nodes).map(|i| generate_node(&mut rng, i)).collect();
    let edges = generate_edges(&mut rng, cli.nodes, cli.edge_probability, cli.cycles);
    println!("-> Generated {} edge(s).", edges.len());

    let graph = GraphDefinition { nodes, edges };
    let json_output = serde_json::to_string_pretty(&graph)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved request graph to '{}'",
        cli.output
    );

    Ok(())
}

fn generate_node(rng: &mut ThreadRng, index: usize) -> RequestNodeDefinition {
    let method = METHODS[rng.random_range(0..METHODS.len())];
    let resource = RESOURCES[rng.random_range(0..RESOURCES.len())];
    let id_param = format!("{}_id", resource.trim_end_matches('s'));

    let node_type = if index == 0 { "master" } else { "request" };
    let input_variables = if rng.random_bool(0.2) {
        vec!["search_term".to_string()]
    } else {
        vec![]
    };

    RequestNodeDefinition {
        id: format!("node-{:03}", index),
        node_type: node_type.to_string(),
        content: RequestContent {
            key: format!(
                "curl -X {} 'https://api.example.com/{}/{{{}}}' -H 'accept: application/json'",
                method, resource, id_param
            ),
            value: format!(
                "{{\"{}\": {}}}",
                id_param,
                rng.random_range(1000..9999)
            ),
        },
        dynamic_parts: vec![id_param.clone()],
        extracted_parts: vec![id_param],
        input_variables,
    }
}

/// Forward edges only go from lower to higher index, so the graph is acyclic unless
/// `cycles` adds back edges.
fn generate_edges(
    rng: &mut ThreadRng,
    count: usize,
    probability: f64,
    cycles: bool,
) -> Vec<DependencyEdgeDefinition> {
    let mut edges = Vec::new();
    for source in 0..count {
        for target in (source + 1)..count {
            if rng.random_bool(probability) {
                edges.push(edge(source, target));
            }
            if cycles && rng.random_bool(probability / 4.0) {
                edges.push(edge(target, source));
            }
        }
    }
    edges
}

fn edge(source: usize, target: usize) -> DependencyEdgeDefinition {
    DependencyEdgeDefinition {
        source: format!("node-{:03}", source),
        target: format!("node-{:03}", target),
        label: None,
    }
}
