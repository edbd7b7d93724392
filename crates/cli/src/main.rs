use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use llm::SuggestionClient;
use storage::LocalStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ui::{AppContext, DashboardApp, Suggester};

/// Painel pessoal de bem-estar no terminal.
#[derive(Parser, Debug)]
#[command(name = "pequenos-passos", version, about)]
struct Args {
    /// Página inicial (ex.: tarefas, fisica, planejamento-diario)
    #[arg(short, long, default_value = "inicio")]
    page: String,

    /// Arquivo de dados; padrão: ~/.pequenos-passos/dados.db
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Roda sem gravar nada em disco
    #[arg(long)]
    ephemeral: bool,

    /// Arquivo de log; padrão: ~/.pequenos-passos/app.log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn app_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let dir = home.join(".pequenos-passos");
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data directory {}", dir.display()))?;
    Ok(dir)
}

/// Logs go to a file: stdout belongs to the TUI.
fn init_logging(path: PathBuf) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let dir = app_dir()?;
    init_logging(args.log_file.clone().unwrap_or_else(|| dir.join("app.log")))?;

    let store = if args.ephemeral {
        LocalStore::open_in_memory()?
    } else {
        let path = args.data_file.clone().unwrap_or_else(|| dir.join("dados.db"));
        info!(path = %path.display(), "opening data file");
        LocalStore::open(path)?
    };

    let client = match SuggestionClient::from_env() {
        Ok(client) => {
            if client.is_none() {
                info!("suggestion service not configured, AI features disabled");
            }
            client
        }
        Err(err) => {
            warn!(%err, "suggestion service misconfigured, AI features disabled");
            None
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let events = ui::event_pump();
    let suggester = Suggester::new(client, runtime.handle().clone(), events.sender());
    let ctx = AppContext::new(store, suggester);

    let mut app = DashboardApp::new(events, ctx)?;
    app.run(&args.page)
}
