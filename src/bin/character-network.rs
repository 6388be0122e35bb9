//! Character Network CLI: relationship graphs and the interactive dashboard.
//!
//! Usage:
//!   character-network serve --data episodes.csv [--config path] [--host h] [--port p]
//!   character-network render --data episodes.csv --min 1 --max 50 [--out graph.html]
//!   character-network arcs --data episodes.csv [--no-filler]

use character_network::dashboard::{self, AppState};
use character_network::render::{render_pane, NO_RELATIONSHIPS};
use character_network::{
    build_graph, extract_relationships, ArcIndex, Config, Dashboard, EpisodeRange, EpisodeTable,
    ExtractionQuery, GraphPane,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "character-network",
    version,
    about = "Character co-occurrence networks from episode transcripts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive dashboard
    Serve {
        /// Episode table (CSV)
        #[arg(long)]
        data: PathBuf,
        /// Listen address (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Listen port (overrides config)
        #[arg(long)]
        port: Option<u16>,
        /// Sentences per co-occurrence window (overrides config)
        #[arg(long)]
        window: Option<usize>,
    },
    /// Render one graph document for an episode range
    Render {
        /// Episode table (CSV)
        #[arg(long)]
        data: PathBuf,
        /// First episode (inclusive)
        #[arg(long)]
        min: u32,
        /// Last episode (inclusive)
        #[arg(long)]
        max: u32,
        /// Exclude filler episodes
        #[arg(long)]
        no_filler: bool,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
        /// Sentences per co-occurrence window (overrides config)
        #[arg(long)]
        window: Option<usize>,
    },
    /// List story arcs and their episodes
    Arcs {
        /// Episode table (CSV)
        #[arg(long)]
        data: PathBuf,
        /// Hide all-filler arcs
        #[arg(long)]
        no_filler: bool,
    },
}

fn load_config(path: Option<&Path>, window: Option<usize>) -> Result<Config, String> {
    let mut config = Config::load(path).map_err(|e| format!("Failed to load config: {}", e))?;
    if let Some(window) = window {
        config.network.window = window;
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn load_table(path: &Path) -> Result<EpisodeTable, String> {
    EpisodeTable::from_csv_path(path)
        .map_err(|e| format!("Failed to load {}: {}", path.display(), e))
}

fn cmd_serve(
    data: &Path,
    config: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
    window: Option<usize>,
) -> i32 {
    let mut config = match load_config(config, window) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let table = match load_table(data) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let frame_height = config.render.frame_height();
    let dashboard = match Dashboard::new(table, config.network, Box::new(config.render)) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let state = Arc::new(AppState::new(dashboard, frame_height));
    let addr = config.server.addr();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            return 1;
        }
    };
    match rt.block_on(dashboard::serve(&addr, state)) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_render(
    data: &Path,
    config: Option<&Path>,
    range: EpisodeRange,
    include_filler: bool,
    out: Option<&Path>,
    window: Option<usize>,
) -> i32 {
    let config = match load_config(config, window) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let table = match load_table(data) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let query = ExtractionQuery::new(range, include_filler).with_window(config.network.window);
    let pairs = extract_relationships(table.episodes(), &query);
    let outcome = build_graph(&pairs, &config.network.graph_options());

    let document = match render_pane(&outcome, &config.render) {
        Ok(GraphPane::Document(doc)) => doc,
        Ok(GraphPane::Placeholder) => {
            println!("{}", NO_RELATIONSHIPS);
            return 0;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    match out {
        Some(path) => match std::fs::write(path, document) {
            Ok(()) => {
                info!(path = %path.display(), pairs = pairs.len(), "wrote graph document");
                println!("Wrote {}", path.display());
                0
            }
            Err(e) => {
                eprintln!("Error: cannot write {}: {}", path.display(), e);
                1
            }
        },
        None => {
            println!("{}", document);
            0
        }
    }
}

fn cmd_arcs(data: &Path, include_filler: bool) -> i32 {
    let table = match load_table(data) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let index = ArcIndex::build(&table);
    let full = match (table.min_episode(), table.max_episode()) {
        (Some(min), Some(max)) => EpisodeRange::new(min, max),
        _ => {
            println!("No episodes loaded.");
            return 0;
        }
    };
    let rebind = match index.rebind(include_filler, full) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    println!("{:<40}  {}", "ARC NAME", "EPISODES");
    println!("{}", "-".repeat(72));
    for row in &rebind.arcs {
        println!("{:<40}  {}", row.arc_name, row.episodes);
    }
    println!();
    println!("Valid range: {} - {}", full.min, rebind.valid_max);
    0
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                "character_network=info"
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
            ),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let code = match cli.command {
        Commands::Serve {
            data,
            host,
            port,
            window,
        } => cmd_serve(&data, config, host, port, window),
        Commands::Render {
            data,
            min,
            max,
            no_filler,
            out,
            window,
        } => cmd_render(
            &data,
            config,
            EpisodeRange::new(min, max),
            !no_filler,
            out.as_deref(),
            window,
        ),
        Commands::Arcs { data, no_filler } => cmd_arcs(&data, !no_filler),
    };
    std::process::exit(code);
}
