use clap::{Parser, Subcommand};
use dotenv::dotenv;
use obi_graph::config::Config;
use obi_graph::obi::{DialogLoader, Transformer};
use obi_graph::server;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the graph of a dialog file as JSON
    Graph {
        /// Path to the dialog file
        #[arg(short, long)]
        file: PathBuf,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Print which strategy a dialog file is transformed with
    Strategy {
        /// Path to the dialog file
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Serve graphs over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding dialog files
        #[arg(short, long)]
        dialog_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    let loader = DialogLoader::new();
    let transformer = Transformer::new();

    match args.command {
        Commands::Graph { file, pretty } => {
            let doc = loader.load_dialog(&file)?;
            let graph = transformer.to_graph_schema(Some(&doc))?;

            log::info!("Built graph with {} nodes from {}", graph.len(), file.display());

            let output = if pretty || config.pretty {
                serde_json::to_string_pretty(&graph)?
            } else {
                serde_json::to_string(&graph)?
            };
            println!("{}", output);
        }
        Commands::Strategy { file } => {
            let doc = loader.load_dialog(&file)?;
            match transformer.choose_strategy(Some(&doc)) {
                Some(strategy) => println!("{}", strategy.kind()),
                None => println!("none"),
            }
        }
        Commands::Serve { port, dialog_dir } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(dir) = dialog_dir {
                config.dialog_dir = dir;
            }
            server::serve(&config).await?;
        }
    }

    Ok(())
}
