// adbook CLI - headless record keeping for an advertising agency
//
// Every user action (save, edit, delete, list, search, import, export) is
// one subcommand that runs to completion before the process exits; the
// store connection is opened once and shared across the action.

mod exit_codes;
mod records;
mod transfer;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use adbook_config::Settings;
use adbook_io::import::ImportError;
use adbook_store::{RecordStore, StoreError};

use exit_codes::{EXIT_ERROR, EXIT_IO, EXIT_PARSE, EXIT_SUCCESS, EXIT_USAGE, EXIT_VALIDATION};

#[derive(Parser)]
#[command(name = "adbook")]
#[command(about = "Advertising agency records (CLI mode, headless)")]
#[command(version)]
struct Cli {
    /// Database file (defaults to the configured store path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Uploads directory for attachments and logos
    #[arg(long, global = true)]
    uploads: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage advertiser companies
    Company {
        #[command(subcommand)]
        cmd: records::CompanyCommands,
    },

    /// Manage clients
    Client {
        #[command(subcommand)]
        cmd: records::ClientCommands,
    },

    /// Manage ad bookings
    Ad {
        #[command(subcommand)]
        cmd: records::AdCommands,
    },

    /// Manage contracts
    Contract {
        #[command(subcommand)]
        cmd: records::ContractCommands,
    },

    /// Bulk-load ads or contracts from a spreadsheet/CSV file
    #[command(after_help = "\
The file extension selects the parser (.csv, .xlsx, .xls, .xlsb, .ods).
Ad rows missing their name or date are skipped silently; the printed
count covers inserted rows only.

Examples:
  adbook import bookings.xlsx --kind ads
  adbook import contracts.csv --kind contracts")]
    Import(transfer::ImportArgs),

    /// Export a styled spreadsheet report
    Export {
        #[command(subcommand)]
        cmd: transfer::ExportCommands,
    },

    /// Write the blank ads import template
    Template(transfer::TemplateArgs),

    /// Copy a file into the uploads directory and print its stored name
    Attach(transfer::AttachArgs),
}

pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        let code = match &err {
            StoreError::Validation { .. } => EXIT_VALIDATION,
            StoreError::Sqlite(_) => EXIT_ERROR,
            StoreError::Io(_) => EXIT_IO,
        };
        let hint = match &err {
            StoreError::Validation { .. } => {
                Some("nothing was saved; supply a non-empty name".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}

impl From<ImportError> for CliError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::UnsupportedExtension(_) => Self {
                code: EXIT_USAGE,
                message: err.to_string(),
                hint: Some("supported formats: .csv .xlsx .xls .xlsb .ods".to_string()),
            },
            ImportError::Parse(_) => {
                Self { code: EXIT_PARSE, message: err.to_string(), hint: None }
            }
            ImportError::Store(store_err) => store_err.into(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = &err.hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load();
    let db_path = cli.db.unwrap_or(settings.db_path);
    let uploads_dir = cli.uploads.unwrap_or(settings.uploads_dir);

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CliError::io(format!("cannot create {}: {e}", parent.display())))?;
        }
    }

    let store = RecordStore::open(&db_path)?;

    match cli.command {
        Commands::Company { cmd } => records::cmd_company(&store, &uploads_dir, cmd),
        Commands::Client { cmd } => records::cmd_client(&store, cmd),
        Commands::Ad { cmd } => records::cmd_ad(&store, &uploads_dir, cmd),
        Commands::Contract { cmd } => records::cmd_contract(&store, &uploads_dir, cmd),
        Commands::Import(args) => transfer::cmd_import(&store, args),
        Commands::Export { cmd } => transfer::cmd_export(&store, cmd),
        Commands::Template(args) => transfer::cmd_template(args),
        Commands::Attach(args) => transfer::cmd_attach(&uploads_dir, args),
    }
}
