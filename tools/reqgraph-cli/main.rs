use clap::{Parser, ValueEnum};
use reqgraph::prelude::*;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// CLI-specific enum for the edge direction.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionCli {
    Downstream,
    Upstream,
}

/// Which diagnostic tree to print.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TreeCli {
    Forward,
    Reverse,
    None,
}

/// Walks a captured-request dependency graph and emits replay code in dependency order
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the request graph JSON file
    graph_path: String,

    /// Optional JSON run configuration; flags below override it
    #[arg(short, long)]
    config: Option<String>,

    /// Stop descending below this depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Which neighbours count as a request's children
    #[arg(long, value_enum)]
    direction: Option<DirectionCli>,

    /// The diagnostic tree to print
    #[arg(long, value_enum, default_value_t = TreeCli::Reverse)]
    tree: TreeCli,

    /// Start node for the forward tree (defaults to the first source)
    #[arg(long)]
    start: Option<String>,

    /// Show the label of each followed edge in the forward tree
    #[arg(long)]
    edge_labels: bool,

    /// Synthesize code for every request and write the artifact
    #[arg(short, long)]
    generate: bool,

    /// Write the prompts instead of invoking a model
    #[arg(long)]
    dry_run: bool,

    /// Program (and arguments) that reads a prompt on stdin and prints code
    #[arg(long, num_args = 1.., allow_hyphen_values = true)]
    model_command: Option<Vec<String>>,

    /// Path of the generated code artifact
    #[arg(short, long)]
    output: Option<String>,

    /// Leave responses longer than this many characters out of prompts
    #[arg(long)]
    response_limit: Option<usize>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "reqgraph=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli);

    let load_start = Instant::now();
    let graph = RequestGraph::from_file(&cli.graph_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load graph '{}': {}",
            cli.graph_path, e
        ))
    });
    tracing::info!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        elapsed = ?load_start.elapsed(),
        "graph loaded"
    );

    print_tree(&cli, &config, &graph);

    if cli.generate {
        run_generation(&cli, &config, &graph);
    }
}

/// Merges the optional config file with command line overrides.
fn resolve_config(cli: &Cli) -> RunConfig {
    let mut config = match &cli.config {
        Some(path) => RunConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => RunConfig::default(),
    };

    if let Some(depth) = cli.max_depth {
        config = config.with_max_depth(depth);
    }
    if let Some(direction) = cli.direction {
        config = config.with_direction(match direction {
            DirectionCli::Downstream => Direction::Downstream,
            DirectionCli::Upstream => Direction::Upstream,
        });
    }
    if let Some(output) = &cli.output {
        config = config.with_artifact_path(output.clone());
    }
    if let Some(limit) = cli.response_limit {
        config = config.with_response_limit(limit);
    }
    if let Some(command) = &cli.model_command {
        config = config.with_model_command(command.clone());
    }
    config
}

fn print_tree(cli: &Cli, config: &RunConfig, graph: &RequestGraph) {
    match cli.tree {
        TreeCli::Forward => {
            let start = cli
                .start
                .clone()
                .or_else(|| config.direction.sources(graph).into_iter().next())
                .or_else(|| graph.nodes().first().cloned())
                .unwrap_or_else(|| exit_with_error("The graph has no nodes to start from."));
            print!(
                "{}",
                ForwardTree {
                    graph,
                    start: &start,
                    max_depth: config.max_depth,
                    direction: config.direction,
                    edge_labels: cli.edge_labels,
                }
            );
        }
        TreeCli::Reverse => {
            print!(
                "{}",
                PostOrderTree {
                    graph,
                    max_depth: config.max_depth,
                    direction: config.direction,
                }
            );
        }
        TreeCli::None => {}
    }
}

fn run_generation(cli: &Cli, config: &RunConfig, graph: &RequestGraph) {
    let driver = EmissionDriver::builder(graph)
        .max_depth(config.max_depth)
        .direction(config.direction)
        .build();
    let prompt = CodePrompt::new(config.response_limit).with_language(config.language.clone());

    let emit_start = Instant::now();
    let result = match (&config.model_command, cli.dry_run) {
        (Some(command), false) => {
            let model = CommandModel::from_command_line(command)
                .unwrap_or_else(|| exit_with_error("The model command is empty."));
            driver.emit(&mut PromptSynthesizer::new(model).with_prompt(prompt))
        }
        _ => {
            if !cli.dry_run {
                println!("No model command configured. Writing prompts instead of code.");
            }
            driver.emit(&mut PromptSynthesizer::new(EchoModel).with_prompt(prompt))
        }
    };
    let code = result.unwrap_or_else(|e| exit_with_error(&format!("Code generation failed: {}", e)));

    code.save(&config.artifact_path)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    println!(
        "Generated code for {} request(s) in {:?} has been saved to '{}'",
        code.len(),
        emit_start.elapsed(),
        config.artifact_path
    );
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
