use bldr::{
    commands::{
        blocks,
        config::{self, ConfigAction},
        hook,
    },
    errors::CliError,
    logger, GlobalOpts,
};
use bldr_config::HostConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bldr")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Block manifest hook",
    long_about = "bldr keeps the block manifest in sync with the packages the package manager installs, updates and removes."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle one package lifecycle event (JSON from FILE or stdin)
    Hook {
        /// Event file; reads stdin when omitted or `-`
        file: Option<PathBuf>,
    },
    /// Register a package's block class in the manifest
    Register {
        /// Package name, e.g. `acme/lint-block`
        package: String,
        /// Block class the package provides
        #[arg(long)]
        block_class: String,
    },
    /// Remove a package's block class from the manifest
    Unregister {
        package: String,
        #[arg(long)]
        block_class: String,
    },
    /// List registered block classes in load order
    List,
    /// Print the resolved block manifest path
    Path,
    /// Configure the hook
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let verbosity = cli.global.verbosity_level();

    logger::init_tracing(verbosity);

    // A broken config surfaces again in the command itself; here it only
    // decides where the log file goes.
    let host_config = HostConfig::load().unwrap_or_default();
    if let Err(e) = logger::init_with_verbosity(verbosity, cli.global.log_file(&host_config)) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let result: Result<(), CliError> = match cli.command {
        Commands::Hook { file } => hook::handle_hook(file, &cli.global),
        Commands::Register {
            package,
            block_class,
        } => blocks::register_block(package, block_class, &cli.global),
        Commands::Unregister {
            package,
            block_class,
        } => blocks::unregister_block(package, block_class, &cli.global),
        Commands::List => blocks::list_blocks(&cli.global),
        Commands::Path => blocks::show_manifest_path(&cli.global),
        Commands::Config { action } => config::handle_config(action, &cli.global),
    };

    if let Err(e) = result {
        logger::error(&e.to_string());
        std::process::exit(1);
    }
}
