use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use workshop_core::tools::file::delete_file::DeleteFileTool;
use workshop_core::tools::file::list_files::ListFilesTool;
use workshop_core::tools::file::read_file::ReadFileTool;
use workshop_core::tools::file::write_file::WriteFileTool;
use workshop_core::tools::r#trait::SharedTool;
use workshop_core::tools::run_build_test::RunBuildTestTool;
use workshop_core::{FileManager, PathAuthority, Settings, ToolRegistry};

mod serve;

#[derive(Parser, Debug)]
#[command(name = "workshop")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Workshop - sandboxed file and build automation over stdio")]
struct Args {
    /// Base directory that every file and command operation is confined to
    root: PathBuf,

    /// Load settings from a TOML file instead of defaults
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Log filter, e.g. "info" or "workshop_core=debug"
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing(&args.log)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let local = tokio::task::LocalSet::new();
        local.run_until(async_main(args)).await
    })
}

async fn async_main(args: Args) -> Result<()> {
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::new(args.root.clone()),
    };

    info!(
        base_directory = %settings.base_directory.display(),
        "Starting workshop server"
    );

    let authority = Arc::new(PathAuthority::new(&settings.base_directory)?);
    let file_manager = FileManager::new(authority.clone());

    let tools: Vec<SharedTool> = vec![
        Arc::new(ReadFileTool::new(file_manager.clone())),
        Arc::new(WriteFileTool::new(file_manager.clone())),
        Arc::new(DeleteFileTool::new(file_manager.clone())),
        Arc::new(ListFilesTool::new(
            file_manager.clone(),
            settings.max_listing_entries,
        )),
        Arc::new(RunBuildTestTool::new(authority)),
    ];
    let registry = ToolRegistry::new(tools);

    serve::run(registry, settings).await
}

/// Logs go to stderr: stdout carries the wire protocol.
fn setup_tracing(filter: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(filter)?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}
