use anyhow::Result;
use clap::{Parser, Subcommand};
use courier_route::parse::load_network;
use courier_route::route::{reconstruct, summarize_all, RouteSummary};
use courier_route::{shortest_paths, Network, ShortestPaths};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "courier-route")]
#[command(about = "Least-cost delivery routing with query-time road conditions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan least-cost routes from a start node
    Plan {
        /// Network description file (JSON)
        network: PathBuf,
        /// Start node name
        #[arg(long)]
        from: String,
        /// Destination node name; all reachable destinations when omitted
        #[arg(long)]
        to: Option<String>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print network statistics
    Inspect {
        /// Network description file (JSON)
        network: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            network,
            from,
            to,
            json,
        } => run_plan(&network, &from, to.as_deref(), json),
        Commands::Inspect { network } => run_inspect(&network),
    }
}

fn run_plan(path: &Path, from: &str, to: Option<&str>, json: bool) -> Result<()> {
    let (network, conditions) = load_network(path)?;
    let start = network.require_node(from)?;

    let paths = shortest_paths(&network, &conditions, start)?;
    report_skipped(&network, &paths);

    match to {
        Some(name) => {
            let target = network.require_node(name)?;
            match reconstruct(&network, &paths, target)? {
                Some(route) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&route.summary(&network))?);
                    } else {
                        print_summary(&route.summary(&network));
                    }
                }
                None => println!("No route from {from} to {name}"),
            }
        }
        None => {
            let summaries = summarize_all(&network, &paths)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                println!("Routes from {from}:");
                for summary in &summaries {
                    print_summary(summary);
                }
            }
        }
    }
    Ok(())
}

fn run_inspect(path: &Path) -> Result<()> {
    let (network, conditions) = load_network(path)?;
    println!(
        "Network: {} nodes, {} edges, {} conditions",
        network.node_count(),
        network.edge_count(),
        conditions.len()
    );
    let tolled = network.edges().filter(|(_, e)| e.toll.is_some()).count();
    println!("Toll edges: {tolled}");
    Ok(())
}

fn print_summary(summary: &RouteSummary) {
    println!(
        "Route: {} - cost: {:.2} (travel {:.2}, tolls {:.2})",
        summary.stops.join(" -> "),
        summary.total_cost,
        summary.travel_cost,
        summary.toll_cost
    );
}

fn report_skipped(network: &Network, paths: &ShortestPaths) {
    for (edge, kind) in paths.diagnostics().skipped() {
        log::warn!(
            "ignored unrecognized condition '{}' on {}",
            kind,
            network.edge_label(*edge)
        );
    }
}
