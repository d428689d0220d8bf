//! Record CRUD subcommands: companies, clients, ads, contracts.
//!
//! Each action is a single save/edit/delete/list against the store; a
//! validation failure (blank required name) aborts the action with nothing
//! written.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Subcommand;

use adbook_core::{Ad, AdStatus, Client, Company, Contract, PartyRef};
use adbook_store::{files, RecordStore};

use crate::CliError;

#[derive(Subcommand)]
pub enum CompanyCommands {
    /// Save a new company
    Add {
        /// Company name (required, non-empty)
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        address: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        notes: String,

        /// Logo image to copy into the uploads directory
        #[arg(long)]
        logo: Option<PathBuf>,
    },

    /// List companies, newest first
    List {
        #[arg(long)]
        json: bool,
    },

    /// Edit an existing company in place
    Edit {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a company (references from ads/contracts are left behind)
    Delete {
        #[arg(long)]
        id: i64,
    },
}

pub fn cmd_company(
    store: &RecordStore,
    uploads_dir: &Path,
    cmd: CompanyCommands,
) -> Result<(), CliError> {
    match cmd {
        CompanyCommands::Add { name, address, phone, notes, logo } => {
            let logo = logo.map(|path| attach_file(uploads_dir, &path)).transpose()?;
            let id = store.save_company(&Company {
                id: 0,
                name,
                address,
                phone,
                notes,
                logo,
            })?;
            println!("{id}");
            Ok(())
        }
        CompanyCommands::List { json } => {
            let companies = store.list_companies()?;
            if json {
                print_json(&companies)
            } else {
                for c in &companies {
                    println!("{:>4}  {:<24}  {:<16}  {}", c.id, c.name, c.phone, c.address);
                }
                Ok(())
            }
        }
        CompanyCommands::Edit { id, name, address, phone, notes } => {
            let mut company = store
                .get_company(id)?
                .ok_or_else(|| CliError::error(format!("company {id} not found")))?;
            if let Some(name) = name {
                company.name = name;
            }
            if let Some(address) = address {
                company.address = address;
            }
            if let Some(phone) = phone {
                company.phone = phone;
            }
            if let Some(notes) = notes {
                company.notes = notes;
            }
            store.update_company(&company)?;
            Ok(())
        }
        CompanyCommands::Delete { id } => {
            store.delete_company(id)?;
            Ok(())
        }
    }
}

#[derive(Subcommand)]
pub enum ClientCommands {
    /// Save a new client
    Add {
        /// Client name (required, non-empty)
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        bank_number: String,

        #[arg(long, default_value = "")]
        check_name: String,
    },

    /// List clients, newest first
    List {
        #[arg(long)]
        json: bool,
    },

    /// Name substring search
    Search {
        query: String,

        #[arg(long)]
        json: bool,
    },

    /// Edit an existing client in place
    Edit {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        bank_number: Option<String>,

        #[arg(long)]
        check_name: Option<String>,
    },
}

pub fn cmd_client(store: &RecordStore, cmd: ClientCommands) -> Result<(), CliError> {
    match cmd {
        ClientCommands::Add { name, location, phone, bank_number, check_name } => {
            let id = store.save_client(&Client {
                id: 0,
                name,
                location,
                phone,
                bank_number,
                check_name,
            })?;
            println!("{id}");
            Ok(())
        }
        ClientCommands::List { json } => print_clients(&store.list_clients()?, json),
        ClientCommands::Search { query, json } => print_clients(&store.search_clients(&query)?, json),
        ClientCommands::Edit { id, name, location, phone, bank_number, check_name } => {
            let mut client = store
                .get_client(id)?
                .ok_or_else(|| CliError::error(format!("client {id} not found")))?;
            if let Some(name) = name {
                client.name = name;
            }
            if let Some(location) = location {
                client.location = location;
            }
            if let Some(phone) = phone {
                client.phone = phone;
            }
            if let Some(bank_number) = bank_number {
                client.bank_number = bank_number;
            }
            if let Some(check_name) = check_name {
                client.check_name = check_name;
            }
            store.update_client(&client)?;
            Ok(())
        }
    }
}

fn print_clients(clients: &[Client], json: bool) -> Result<(), CliError> {
    if json {
        return print_json(clients);
    }
    for c in clients {
        println!("{:>4}  {:<24}  {:<16}  {}", c.id, c.name, c.phone, c.location);
    }
    Ok(())
}

#[derive(Subcommand)]
pub enum AdCommands {
    /// Save a new ad booking
    Add {
        /// Company display text
        #[arg(long, default_value = "")]
        company: String,

        /// Link to a company record; its stored name wins over --company
        #[arg(long)]
        company_id: Option<i64>,

        /// Client display text (the booking's name field)
        #[arg(long, default_value = "")]
        client: String,

        /// Link to a client record; its stored name wins over --client
        #[arg(long)]
        client_id: Option<i64>,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long, default_value = "")]
        bank_number: String,

        #[arg(long, default_value = "")]
        check_name: String,

        /// pending, done or cancelled
        #[arg(long, default_value = "pending")]
        status: String,

        /// ISO date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long, default_value_t = 0.0)]
        amount: f64,

        #[arg(long, default_value = "")]
        notes: String,

        /// File to copy into the uploads directory
        #[arg(long)]
        attachment: Option<PathBuf>,
    },

    /// List ads, newest first
    List {
        #[arg(long)]
        json: bool,
    },

    /// Edit an existing ad in place
    Edit {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        client: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        bank_number: Option<String>,

        #[arg(long)]
        check_name: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        amount: Option<f64>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete an ad
    Delete {
        #[arg(long)]
        id: i64,
    },
}

pub fn cmd_ad(store: &RecordStore, uploads_dir: &Path, cmd: AdCommands) -> Result<(), CliError> {
    match cmd {
        AdCommands::Add {
            company,
            company_id,
            client,
            client_id,
            location,
            bank_number,
            check_name,
            status,
            date,
            amount,
            notes,
            attachment,
        } => {
            let attachment = attachment.map(|path| attach_file(uploads_dir, &path)).transpose()?;
            let ad = Ad {
                id: 0,
                company: company_ref(store, company_id, company)?,
                client: client_ref(store, client_id, client)?,
                location,
                bank_number,
                check_name,
                status: parse_status(&status)?,
                date,
                amount: parse_amount(amount)?,
                notes,
                attachment,
            };
            let id = store.save_ad(&ad)?;
            println!("{id}");
            Ok(())
        }
        AdCommands::List { json } => {
            let ads = store.list_ads()?;
            if json {
                return print_json(&ads);
            }
            for ad in &ads {
                println!(
                    "{:>4}  {}  {:<20}  {:<20}  {:<9}  {:>10.2}",
                    ad.id,
                    ad.date.map(|d| d.to_string()).unwrap_or_else(|| "-".repeat(10)),
                    ad.client.display(),
                    ad.company.display(),
                    ad.status,
                    ad.amount,
                );
            }
            Ok(())
        }
        AdCommands::Edit {
            id,
            company,
            client,
            location,
            bank_number,
            check_name,
            status,
            date,
            amount,
            notes,
        } => {
            let mut ad = store
                .get_ad(id)?
                .ok_or_else(|| CliError::error(format!("ad {id} not found")))?;
            if let Some(company) = company {
                ad.company = PartyRef::Unlinked(company);
            }
            if let Some(client) = client {
                ad.client = PartyRef::Unlinked(client);
            }
            if let Some(location) = location {
                ad.location = location;
            }
            if let Some(bank_number) = bank_number {
                ad.bank_number = bank_number;
            }
            if let Some(check_name) = check_name {
                ad.check_name = check_name;
            }
            if let Some(status) = status {
                ad.status = parse_status(&status)?;
            }
            if let Some(date) = date {
                ad.date = Some(date);
            }
            if let Some(amount) = amount {
                ad.amount = parse_amount(amount)?;
            }
            if let Some(notes) = notes {
                ad.notes = notes;
            }
            store.update_ad(&ad)?;
            Ok(())
        }
        AdCommands::Delete { id } => {
            store.delete_ad(id)?;
            Ok(())
        }
    }
}

#[derive(Subcommand)]
pub enum ContractCommands {
    /// Save a new contract
    Add {
        /// Invoice number; defaults to the max+1 suggestion
        #[arg(long)]
        number: Option<i64>,

        #[arg(long, default_value = "")]
        company: String,

        #[arg(long)]
        company_id: Option<i64>,

        /// Client display text (the contract's name field)
        #[arg(long, default_value = "")]
        client: String,

        #[arg(long)]
        client_id: Option<i64>,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long, default_value = "")]
        bank_number: String,

        #[arg(long, default_value = "")]
        check_name: String,

        /// ISO date (YYYY-MM-DD)
        #[arg(long)]
        date_start: Option<NaiveDate>,

        /// ISO date (YYYY-MM-DD)
        #[arg(long)]
        date_finish: Option<NaiveDate>,

        #[arg(long, default_value_t = 0.0)]
        amount: f64,

        #[arg(long, default_value = "")]
        notes: String,

        /// File to copy into the uploads directory
        #[arg(long)]
        attachment: Option<PathBuf>,
    },

    /// List contracts, newest first
    List {
        #[arg(long)]
        json: bool,
    },

    /// Print the suggested next invoice number (max + 1, or 1)
    NextNumber,

    /// Edit an existing contract in place
    Edit {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        number: Option<i64>,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        client: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        bank_number: Option<String>,

        #[arg(long)]
        check_name: Option<String>,

        #[arg(long)]
        date_start: Option<NaiveDate>,

        #[arg(long)]
        date_finish: Option<NaiveDate>,

        #[arg(long)]
        amount: Option<f64>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a contract
    Delete {
        #[arg(long)]
        id: i64,
    },
}

pub fn cmd_contract(
    store: &RecordStore,
    uploads_dir: &Path,
    cmd: ContractCommands,
) -> Result<(), CliError> {
    match cmd {
        ContractCommands::Add {
            number,
            company,
            company_id,
            client,
            client_id,
            location,
            bank_number,
            check_name,
            date_start,
            date_finish,
            amount,
            notes,
            attachment,
        } => {
            let invoke_number = match number {
                Some(n) => n,
                None => store.next_contract_number()?,
            };
            let attachment = attachment.map(|path| attach_file(uploads_dir, &path)).transpose()?;
            let contract = Contract {
                id: 0,
                invoke_number,
                company: company_ref(store, company_id, company)?,
                client: client_ref(store, client_id, client)?,
                location,
                bank_number,
                check_name,
                date_start,
                date_finish,
                amount: parse_amount(amount)?,
                notes,
                attachment,
            };
            let id = store.save_contract(&contract)?;
            println!("{id}");
            Ok(())
        }
        ContractCommands::List { json } => {
            let contracts = store.list_contracts()?;
            if json {
                return print_json(&contracts);
            }
            for c in &contracts {
                println!(
                    "{:>4}  #{:<6}  {:<20}  {:<20}  {}..{}  {:>10.2}",
                    c.id,
                    c.invoke_number,
                    c.client.display(),
                    c.company.display(),
                    c.date_start.map(|d| d.to_string()).unwrap_or_else(|| "-".repeat(10)),
                    c.date_finish.map(|d| d.to_string()).unwrap_or_else(|| "-".repeat(10)),
                    c.amount,
                );
            }
            Ok(())
        }
        ContractCommands::NextNumber => {
            println!("{}", store.next_contract_number()?);
            Ok(())
        }
        ContractCommands::Edit {
            id,
            number,
            company,
            client,
            location,
            bank_number,
            check_name,
            date_start,
            date_finish,
            amount,
            notes,
        } => {
            let mut contract = store
                .get_contract(id)?
                .ok_or_else(|| CliError::error(format!("contract {id} not found")))?;
            if let Some(number) = number {
                contract.invoke_number = number;
            }
            if let Some(company) = company {
                contract.company = PartyRef::Unlinked(company);
            }
            if let Some(client) = client {
                contract.client = PartyRef::Unlinked(client);
            }
            if let Some(location) = location {
                contract.location = location;
            }
            if let Some(bank_number) = bank_number {
                contract.bank_number = bank_number;
            }
            if let Some(check_name) = check_name {
                contract.check_name = check_name;
            }
            if let Some(date_start) = date_start {
                contract.date_start = Some(date_start);
            }
            if let Some(date_finish) = date_finish {
                contract.date_finish = Some(date_finish);
            }
            if let Some(amount) = amount {
                contract.amount = parse_amount(amount)?;
            }
            if let Some(notes) = notes {
                contract.notes = notes;
            }
            store.update_contract(&contract)?;
            Ok(())
        }
        ContractCommands::Delete { id } => {
            store.delete_contract(id)?;
            Ok(())
        }
    }
}

// ── Shared helpers ──────────────────────────────────────────────────

/// Resolve the company reference for a save action. A given id links the
/// record and captures the company's stored name; without one the text
/// stays unlinked.
fn company_ref(
    store: &RecordStore,
    id: Option<i64>,
    text: String,
) -> Result<PartyRef, CliError> {
    match id {
        Some(id) => {
            let name = store.get_company(id)?.map(|c| c.name).unwrap_or(text);
            Ok(PartyRef::Linked { id, name })
        }
        None => Ok(PartyRef::Unlinked(text)),
    }
}

fn client_ref(store: &RecordStore, id: Option<i64>, text: String) -> Result<PartyRef, CliError> {
    match id {
        Some(id) => {
            let name = store.get_client(id)?.map(|c| c.name).unwrap_or(text);
            Ok(PartyRef::Linked { id, name })
        }
        None => Ok(PartyRef::Unlinked(text)),
    }
}

fn parse_status(status: &str) -> Result<String, CliError> {
    AdStatus::parse(status)
        .map(|s| s.as_str().to_string())
        .ok_or_else(|| {
            CliError::usage(format!("unknown status '{status}'"))
                .with_hint("expected one of: pending, done, cancelled")
        })
}

fn parse_amount(amount: f64) -> Result<f64, CliError> {
    if amount < 0.0 {
        return Err(CliError::usage(format!("amount must be non-negative, got {amount}")));
    }
    Ok(amount)
}

fn attach_file(uploads_dir: &Path, path: &Path) -> Result<String, CliError> {
    let bytes = std::fs::read(path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", path.display())))?;
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("file");
    Ok(files::store_attachment(uploads_dir, name, &bytes)?)
}

fn print_json<T: serde::Serialize>(records: &[T]) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(records)
        .map_err(|e| CliError::error(format!("JSON error: {e}")))?;
    println!("{out}");
    Ok(())
}
