use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vaultline::cli::{handle_vault_command, Session, VaultCommands};
use vaultline::config::{Settings, VaultPaths};

#[derive(Parser)]
#[command(
    name = "vaultline",
    version,
    about = "Encrypted line-oriented password vaults",
    long_about = "Vaultline stores password-manager entries as a text file with one \
                  encrypted chunk per line. Every chunk is sealed with a key derived \
                  from your passphrase and a fresh random salt."
)]
struct Cli {
    /// Vault passphrase (prompted for when omitted)
    #[arg(long, global = true, env = "VAULTLINE_PASSPHRASE", hide_env_values = true)]
    passphrase: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Vault(VaultCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = VaultPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let paths = settings.resolve_paths(paths);
    paths.ensure_directories()?;

    match cli.command {
        Some(Commands::Vault(cmd)) => {
            let session = Session::new(paths, settings);
            handle_vault_command(&session, cli.passphrase, cmd)?;
        }
        Some(Commands::Config) => {
            let pipeline = &settings.pipeline;
            println!("Vaultline Configuration");
            println!("=======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Vault directory: {}", paths.vault_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Log file:        {}", paths.log_file().display());
            println!();
            println!("Pipeline:");
            println!("  Algorithm:        {}", pipeline.algorithm);
            println!("  Storage ordering: {}", pipeline.storage_ordering);
            println!("  Worker pool:      {}", pipeline.effective_pool_size());
            println!("  Logging:          {}", if pipeline.logging { "on" } else { "off" });
        }
        None => {
            println!("Vaultline - encrypted line-oriented password vaults");
            println!();
            println!("Run 'vaultline --help' for usage information.");
        }
    }

    Ok(())
}
