use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use roadslot::api::booking_dto::BookingRequestDto;
use roadslot::config::EngineConfig;
use roadslot::domain::booking::store::InMemoryBookingStore;
use roadslot::domain::clock::WallClock;
use roadslot::domain::oracle::adapter::SpeedOracle;
use roadslot::domain::oracle::heuristic::HeuristicOracle;
use roadslot::domain::oracle::subprocess::SubprocessOracle;
use roadslot::domain::principal::Principal;
use roadslot::loader::{generator, parser};
use roadslot::logger;

#[derive(Parser)]
#[command(name = "roadslot", about = "Capacity-aware route booking over a road network")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a random connected road network file.
    Generate {
        #[arg(long, default_value_t = 67)]
        nodes: usize,
        #[arg(long, default_value = "graph.json")]
        out: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Book a travel slot on a road network file.
    Book {
        #[arg(long)]
        roads: PathBuf,
        #[arg(long)]
        source: String,
        #[arg(long)]
        destination: String,
        /// ISO-8601 timestamp of the desired slot.
        #[arg(long)]
        slot: String,
        #[arg(long, default_value = "demo-user")]
        user: String,
        /// Optional engine tunables file (JSON); defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// External predictor command, e.g. "python3 predict.py". The built-in
        /// heuristic is used when omitted.
        #[arg(long)]
        oracle: Option<String>,
    },
}

fn main() {
    logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { nodes, out, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let network = generator::generate(nodes, &mut rng);

            let json = match serde_json::to_string_pretty(&network) {
                Ok(json) => json,
                Err(e) => {
                    log::error!("Failed to serialize generated network: {}", e);
                    std::process::exit(1);
                }
            };
            if let Err(e) = fs::write(&out, json) {
                log::error!("Failed to write '{}': {}", out.display(), e);
                std::process::exit(1);
            }
            log::info!("Wrote {} with {} nodes and {} edges.", out.display(), network.nodes.len(), network.edges.len());
        }
        Command::Book { roads, source, destination, slot, user, config, oracle } => {
            let config: EngineConfig = match config {
                Some(path) => match parser::parse_json_file(&path) {
                    Ok(config) => config,
                    Err(e) => {
                        log::error!("Failed to load engine config '{}': {}", path.display(), e);
                        std::process::exit(1);
                    }
                },
                None => EngineConfig::default(),
            };

            let backend: Arc<dyn SpeedOracle> = match oracle {
                Some(command) => {
                    let mut parts = command.split_whitespace().map(str::to_string);
                    match parts.next() {
                        Some(program) => Arc::new(SubprocessOracle::new(program, parts.collect())),
                        None => {
                            log::error!("--oracle must name a command to run.");
                            std::process::exit(1);
                        }
                    }
                }
                None => Arc::new(HeuristicOracle),
            };

            let engine = match roadslot::build_engine_with(
                &roads,
                config,
                Arc::new(WallClock),
                backend,
                Arc::new(InMemoryBookingStore::new()),
            ) {
                Ok(engine) => engine,
                Err(e) => {
                    log::error!("Failed to load road network '{}': {}", roads.display(), e);
                    std::process::exit(1);
                }
            };

            let principal = Principal::user(user);
            let request = BookingRequestDto { source, destination, slot };

            match engine.book(&principal, &request) {
                Ok(booking) => {
                    let response = booking.to_response_dto();
                    println!("Booked {}: path {:?} at recommended speed {}.", response.id, response.path, response.recommended_speed);
                }
                Err(e) => {
                    log::error!("Booking failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
