//! Vault CLI commands
//!
//! Each command loads a vault file, decodes it with the supplied passphrase,
//! and (for mutating commands) re-encodes and saves it.

use clap::Subcommand;

use crate::audit::AuditLogger;
use crate::codec::{ChunkCodec, Decoded};
use crate::config::{Settings, VaultPaths};
use crate::crypto::Passphrase;
use crate::error::{VaultError, VaultResult};
use crate::models::SecretEntry;
use crate::storage::RawContainer;
use crate::store::{CollectionStore, ListStore};

/// Vault subcommands
#[derive(Subcommand)]
pub enum VaultCommands {
    /// Add an entry to a vault (created if missing)
    Add {
        /// Vault name
        vault: String,
        /// Entry title
        #[arg(short, long)]
        title: String,
        /// Login name
        #[arg(short, long)]
        username: String,
        /// Secret value; prompted for when omitted
        #[arg(long, env = "VAULTLINE_SECRET", hide_env_values = true)]
        secret: Option<String>,
        /// Service URL
        #[arg(long)]
        url: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Save even if some existing chunks could not be decoded (they are dropped)
        #[arg(long)]
        force: bool,
    },
    /// List entries (secrets hidden)
    List {
        /// Vault name
        vault: String,
    },
    /// Show one entry including its secret
    Show {
        /// Vault name
        vault: String,
        /// Entry position as shown by `list`
        index: usize,
    },
    /// Remove an entry
    Remove {
        /// Vault name
        vault: String,
        /// Entry position as shown by `list`
        index: usize,
        /// Save even if some existing chunks could not be decoded (they are dropped)
        #[arg(long)]
        force: bool,
    },
    /// Check a vault file's structure without decrypting it
    Check {
        /// Vault name
        vault: String,
    },
}

/// Everything a command needs to reach the pipeline
pub struct Session {
    pub paths: VaultPaths,
    pub settings: Settings,
    pub logger: AuditLogger,
}

impl Session {
    pub fn new(paths: VaultPaths, settings: Settings) -> Self {
        let mut logger = AuditLogger::with_file(paths.log_file());
        logger.set_enabled(settings.pipeline.logging);
        Self {
            paths,
            settings,
            logger,
        }
    }

    fn codec(&self) -> ChunkCodec {
        ChunkCodec::new(
            self.settings.pipeline,
            self.paths.vault_dir(),
            self.logger.clone(),
        )
    }

    fn container(&self, vault: &str) -> RawContainer {
        RawContainer::named(self.paths.vault_dir(), vault, self.logger.clone())
    }
}

/// Handle vault commands
pub fn handle_vault_command(
    session: &Session,
    passphrase: Option<String>,
    cmd: VaultCommands,
) -> VaultResult<()> {
    match cmd {
        VaultCommands::Add {
            vault,
            title,
            username,
            secret,
            url,
            notes,
            force,
        } => {
            let passphrase = resolve_passphrase(passphrase)?;
            let secret = match secret {
                Some(secret) => secret,
                None => prompt_secret("Secret: ")?,
            };

            let mut entry = SecretEntry::new(title, username, secret);
            entry.url = url;
            entry.notes = notes.unwrap_or_default();
            entry.validate().map_err(VaultError::Config)?;

            let mut records = open_for_update(session, &vault, &passphrase, force)?;
            println!("Added: {}", entry);
            records.create(entry);
            save_vault(session, &records, &passphrase)
        }
        VaultCommands::List { vault } => {
            let passphrase = resolve_passphrase(passphrase)?;
            let decoded = open_vault(session, &vault, &passphrase)?;
            let entries = decoded.store.to_vec();
            print!("{}", format_entry_list(&entries));
            if !decoded.report.is_clean() {
                println!();
                println!("Warning: {} chunk(s) could not be decoded.", decoded.report.failed());
            }
            Ok(())
        }
        VaultCommands::Show { vault, index } => {
            let passphrase = resolve_passphrase(passphrase)?;
            let decoded = open_vault(session, &vault, &passphrase)?;
            let entry = decoded.store.get_by_index(index)?;
            print!("{}", format_entry_details(entry));
            Ok(())
        }
        VaultCommands::Remove {
            vault,
            index,
            force,
        } => {
            let passphrase = resolve_passphrase(passphrase)?;
            let mut records = open_for_update(session, &vault, &passphrase, force)?;
            let removed = records.remove(index)?;
            println!("Removed: {}", removed);

            // Empty collections are never encoded, so drop the file instead
            if records.is_empty() {
                let path = session.container(&vault).path()?;
                std::fs::remove_file(&path)?;
                println!("Vault '{}' is now empty; removed {}", vault, path.display());
                return Ok(());
            }
            save_vault(session, &records, &passphrase)
        }
        VaultCommands::Check { vault } => check_vault(session, &vault),
    }
}

/// Load and decode a vault that must exist
fn open_vault(
    session: &Session,
    vault: &str,
    passphrase: &Passphrase,
) -> VaultResult<Decoded<SecretEntry>> {
    let mut container = session.container(vault);
    container.load()?;
    container.check_data()?;

    let decoded = session
        .codec()
        .decode_collection::<SecretEntry>(&container, Some(passphrase))
        .ok_or_else(|| VaultError::Config(format!("Vault '{}' could not be decoded", vault)))?;

    if decoded.report.looks_like_wrong_passphrase() {
        return Err(VaultError::BadKey("Wrong passphrase".to_string()));
    }

    Ok(decoded)
}

/// Load a vault for modification; a missing vault starts empty
fn open_for_update(
    session: &Session,
    vault: &str,
    passphrase: &Passphrase,
    force: bool,
) -> VaultResult<ListStore<SecretEntry>> {
    let container = session.container(vault);
    if !container.path()?.exists() {
        return Ok(ListStore::with_records(vault, Vec::new()));
    }

    let decoded = open_vault(session, vault, passphrase)?;
    if !decoded.report.is_clean() && !force {
        return Err(VaultError::Deserialization(format!(
            "{} chunk(s) could not be decoded; saving would drop them (use --force to proceed)",
            decoded.report.failed()
        )));
    }

    Ok(ListStore::with_records(vault, decoded.store.to_vec()))
}

fn save_vault(
    session: &Session,
    records: &ListStore<SecretEntry>,
    passphrase: &Passphrase,
) -> VaultResult<()> {
    let encoded = session
        .codec()
        .encode_collection(Some(records), passphrase)
        .ok_or_else(|| VaultError::Config("Nothing to save".to_string()))?;

    if !encoded.report.is_clean() {
        return Err(VaultError::Encryption(format!(
            "Encoding incomplete: {}",
            encoded.report
        )));
    }

    encoded.container.save()?;
    println!(
        "Saved {} entr{} to {}",
        encoded.container.len(),
        if encoded.container.len() == 1 { "y" } else { "ies" },
        encoded.container.path()?.display()
    );
    Ok(())
}

fn check_vault(session: &Session, vault: &str) -> VaultResult<()> {
    let mut container = session.container(vault);
    container.load()?;

    println!("Vault:     {}", container.name());
    println!("File:      {}", container.path()?.display());
    println!("Chunks:    {}", container.len());
    match container.check_data() {
        Ok(()) => println!("Integrity: OK"),
        Err(e) => println!("Integrity: FAILED ({})", e),
    }
    Ok(())
}

/// Format entries as a table without secrets
pub fn format_entry_list(entries: &[SecretEntry]) -> String {
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let title_width = entries.iter().map(|e| e.title.len()).max().unwrap_or(5).max(5);
    let user_width = entries.iter().map(|e| e.username.len()).max().unwrap_or(8).max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>3}  {:<title_width$}  {:<user_width$}  {}\n",
        "#",
        "Title",
        "Username",
        "URL",
        title_width = title_width,
        user_width = user_width,
    ));
    output.push_str(&format!(
        "{:->3}  {:-<title_width$}  {:-<user_width$}  {:-<10}\n",
        "",
        "",
        "",
        "",
        title_width = title_width,
        user_width = user_width,
    ));

    for (i, entry) in entries.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}  {:<title_width$}  {:<user_width$}  {}\n",
            i,
            entry.title,
            entry.username,
            entry.url.as_deref().unwrap_or(""),
            title_width = title_width,
            user_width = user_width,
        ));
    }

    output
}

/// Format one entry, secret included
pub fn format_entry_details(entry: &SecretEntry) -> String {
    let mut output = String::new();
    output.push_str(&format!("Title:    {}\n", entry.title));
    output.push_str(&format!("Username: {}\n", entry.username));
    output.push_str(&format!("Secret:   {}\n", entry.secret));
    if let Some(url) = &entry.url {
        output.push_str(&format!("URL:      {}\n", url));
    }
    if !entry.notes.is_empty() {
        output.push_str(&format!("Notes:    {}\n", entry.notes));
    }
    output.push_str(&format!("ID:       {}\n", entry.id));
    output.push_str(&format!(
        "Updated:  {}\n",
        entry.updated_at.format("%Y-%m-%d %H:%M")
    ));
    output
}

fn resolve_passphrase(supplied: Option<String>) -> VaultResult<Passphrase> {
    let passphrase = match supplied {
        Some(p) => Passphrase::new(p),
        None => Passphrase::new(
            rpassword::prompt_password("Passphrase: ")
                .map_err(|e| VaultError::Io(format!("Failed to read passphrase: {}", e)))?,
        ),
    };

    if passphrase.is_empty() {
        return Err(VaultError::Config("Passphrase cannot be empty".to_string()));
    }
    Ok(passphrase)
}

fn prompt_secret(prompt: &str) -> VaultResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| VaultError::Io(format!("Failed to read secret: {}", e)))
}
