//! `adbook import` / `adbook export` / `adbook template` / `adbook attach`
//! — the bulk spreadsheet surface.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use adbook_io::import::{import_file, ImportKind};
use adbook_io::report::{ads_report, blank_template, contracts_report, render, RenderedReport};
use adbook_io::XLSX_MIME;
use adbook_store::{files, AdFilter, ContractFilter, RecordStore};

use crate::CliError;

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Ads,
    Contracts,
}

impl KindArg {
    fn import_kind(self) -> ImportKind {
        match self {
            KindArg::Ads => ImportKind::Ads,
            KindArg::Contracts => ImportKind::Contracts,
        }
    }
}

#[derive(Args)]
pub struct ImportArgs {
    /// Spreadsheet or CSV file to load
    pub file: PathBuf,

    /// Target table
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// Quiet mode (print the inserted count only)
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

pub fn cmd_import(store: &RecordStore, args: ImportArgs) -> Result<(), CliError> {
    let kind = args.kind.import_kind();
    let count = import_file(store, &args.file, kind)?;

    if !args.quiet {
        eprintln!(
            "import: inserted {count} {} row{} from {}",
            kind.as_str(),
            if count == 1 { "" } else { "s" },
            args.file.display()
        );
    }
    println!("{count}");
    Ok(())
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Styled ads report with a trailing total
    #[command(after_help = "\
Examples:
  adbook export ads --out ads_report.xlsx
  adbook export ads --status done --from 2025-01-01 --to 2025-12-31
  adbook export ads --company Acme --subtitle Acme")]
    Ads {
        /// Earliest date to include (ISO)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Latest date to include (ISO)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// pending, done or cancelled
        #[arg(long)]
        status: Option<String>,

        /// Company substring match
        #[arg(long)]
        company: Option<String>,

        /// Free-text match over name/location/notes
        #[arg(long)]
        query: Option<String>,

        #[arg(long, default_value = "Ads Report")]
        title: String,

        /// Title qualifier; "all" means none (defaults to --company)
        #[arg(long)]
        subtitle: Option<String>,

        /// Output file (defaults to the suggested report name)
        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Styled contracts report with a trailing total
    Contracts {
        /// Earliest start date to include (ISO)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Latest start date to include (ISO)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Company substring match
        #[arg(long)]
        company: Option<String>,

        /// Free-text match over name/location/notes
        #[arg(long)]
        query: Option<String>,

        #[arg(long, default_value = "Contracts Report")]
        title: String,

        /// Title qualifier; "all" means none (defaults to --company)
        #[arg(long)]
        subtitle: Option<String>,

        /// Output file (defaults to the suggested report name)
        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

pub fn cmd_export(store: &RecordStore, cmd: ExportCommands) -> Result<(), CliError> {
    match cmd {
        ExportCommands::Ads { from, to, status, company, query, title, subtitle, out, quiet } => {
            let filter = AdFilter {
                date_from: from,
                date_to: to,
                status,
                company: company.clone(),
                query,
            };
            let ads = store.ads_matching(&filter)?;

            // The selected company doubles as the title qualifier unless
            // one was given explicitly
            let subtitle = subtitle.or(company);
            let rendered = render(&ads_report(&ads, &title, subtitle.as_deref()))
                .map_err(CliError::error)?;

            write_report(&rendered, out, ads.len(), "ads", quiet)
        }
        ExportCommands::Contracts { from, to, company, query, title, subtitle, out, quiet } => {
            let filter = ContractFilter {
                date_from: from,
                date_to: to,
                company: company.clone(),
                query,
            };
            let contracts = store.contracts_matching(&filter)?;

            let subtitle = subtitle.or(company);
            let rendered = render(&contracts_report(&contracts, &title, subtitle.as_deref()))
                .map_err(CliError::error)?;

            write_report(&rendered, out, contracts.len(), "contracts", quiet)
        }
    }
}

fn write_report(
    rendered: &RenderedReport,
    out: Option<PathBuf>,
    record_count: usize,
    subject: &str,
    quiet: bool,
) -> Result<(), CliError> {
    let path = out.unwrap_or_else(|| PathBuf::from(&rendered.file_name));
    std::fs::write(&path, &rendered.bytes)
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;

    if !quiet {
        eprintln!("export: wrote {record_count} {subject} to {}", path.display());
        eprintln!("  content type: {XLSX_MIME}");
    }
    Ok(())
}

#[derive(Args)]
pub struct TemplateArgs {
    /// Output file (defaults to ads_template.xlsx)
    #[arg(long)]
    pub out: Option<PathBuf>,

    #[arg(long, short = 'q')]
    pub quiet: bool,
}

pub fn cmd_template(args: TemplateArgs) -> Result<(), CliError> {
    let rendered = blank_template().map_err(CliError::error)?;
    let path = args.out.unwrap_or_else(|| PathBuf::from(&rendered.file_name));
    std::fs::write(&path, &rendered.bytes)
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;

    if !args.quiet {
        eprintln!("template: wrote {}", path.display());
    }
    Ok(())
}

#[derive(Args)]
pub struct AttachArgs {
    /// File to copy into the uploads directory
    pub file: PathBuf,
}

pub fn cmd_attach(uploads_dir: &Path, args: AttachArgs) -> Result<(), CliError> {
    let bytes = std::fs::read(&args.file)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", args.file.display())))?;
    let name = args.file.file_name().and_then(|n| n.to_str()).unwrap_or("file");
    let stored = files::store_attachment(uploads_dir, name, &bytes)?;
    println!("{stored}");
    Ok(())
}
