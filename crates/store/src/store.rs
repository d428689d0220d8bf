// Entity tables over SQLite

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use adbook_core::{Ad, Client, Company, Contract, PartyRef};

use crate::error::StoreError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS companies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    address TEXT NOT NULL DEFAULT '',
    phone TEXT NOT NULL DEFAULT '',
    notes TEXT NOT NULL DEFAULT '',
    logo TEXT
);

CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    location TEXT NOT NULL DEFAULT '',
    phone TEXT NOT NULL DEFAULT '',
    bank_number TEXT NOT NULL DEFAULT '',
    check_name TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS ads (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_id INTEGER,
    client_id INTEGER,
    company TEXT NOT NULL DEFAULT '',
    name TEXT NOT NULL DEFAULT '',
    location TEXT NOT NULL DEFAULT '',
    bank_number TEXT NOT NULL DEFAULT '',
    check_name TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT '',
    date TEXT,
    money REAL NOT NULL DEFAULT 0,
    notes TEXT NOT NULL DEFAULT '',
    attachment TEXT
);

CREATE TABLE IF NOT EXISTS contracts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    invoke_number INTEGER NOT NULL DEFAULT 0,
    company_id INTEGER,
    client_id INTEGER,
    company TEXT NOT NULL DEFAULT '',
    name TEXT NOT NULL DEFAULT '',
    location TEXT NOT NULL DEFAULT '',
    bank_number TEXT NOT NULL DEFAULT '',
    check_name TEXT NOT NULL DEFAULT '',
    date_start TEXT,
    date_finish TEXT,
    money REAL NOT NULL DEFAULT 0,
    notes TEXT NOT NULL DEFAULT '',
    attachment TEXT
);
"#;

/// Optional filter over the ads table. Unset fields do not constrain the
/// query; the date range compares ISO date text lexicographically.
#[derive(Debug, Clone, Default)]
pub struct AdFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub status: Option<String>,
    pub company: Option<String>,
    pub query: Option<String>,
}

/// Optional filter over the contracts table (date range applies to
/// `date_start`).
#[derive(Debug, Clone, Default)]
pub struct ContractFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub company: Option<String>,
    pub query: Option<String>,
}

/// The record store: one long-lived SQLite connection, injected into every
/// caller. Access must be serialized by the host; there is no internal
/// locking and at most one in-flight mutation is assumed.
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Open (or create) the store at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    // -----------------------------------------------------------------------
    // Companies
    // -----------------------------------------------------------------------

    pub fn save_company(&self, company: &Company) -> Result<i64, StoreError> {
        require_name("company", &company.name)?;
        self.conn.execute(
            "INSERT INTO companies (name, address, phone, notes, logo) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![company.name, company.address, company.phone, company.notes, company.logo],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_company(&self, company: &Company) -> Result<(), StoreError> {
        require_name("company", &company.name)?;
        self.conn.execute(
            "UPDATE companies SET name = ?1, address = ?2, phone = ?3, notes = ?4, logo = ?5 WHERE id = ?6",
            params![company.name, company.address, company.phone, company.notes, company.logo, company.id],
        )?;
        Ok(())
    }

    pub fn delete_company(&self, id: i64) -> Result<(), StoreError> {
        // No cascade: ads/contracts keep their captured company text.
        self.conn.execute("DELETE FROM companies WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub fn get_company(&self, id: i64) -> Result<Option<Company>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, address, phone, notes, logo FROM companies WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], company_from_row)?;
        rows.next().transpose().map_err(Into::into)
    }

    pub fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, address, phone, notes, logo FROM companies ORDER BY id DESC",
        )?;
        let rows = stmt.query_map([], company_from_row)?;
        rows.collect::<Result<_, _>>().map_err(Into::into)
    }

    // -----------------------------------------------------------------------
    // Clients
    // -----------------------------------------------------------------------

    pub fn save_client(&self, client: &Client) -> Result<i64, StoreError> {
        require_name("client", &client.name)?;
        self.conn.execute(
            "INSERT INTO clients (name, location, phone, bank_number, check_name) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![client.name, client.location, client.phone, client.bank_number, client.check_name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_client(&self, client: &Client) -> Result<(), StoreError> {
        require_name("client", &client.name)?;
        self.conn.execute(
            "UPDATE clients SET name = ?1, location = ?2, phone = ?3, bank_number = ?4, check_name = ?5 WHERE id = ?6",
            params![client.name, client.location, client.phone, client.bank_number, client.check_name, client.id],
        )?;
        Ok(())
    }

    pub fn get_client(&self, id: i64) -> Result<Option<Client>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, location, phone, bank_number, check_name FROM clients WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], client_from_row)?;
        rows.next().transpose().map_err(Into::into)
    }

    pub fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, location, phone, bank_number, check_name FROM clients ORDER BY id DESC",
        )?;
        let rows = stmt.query_map([], client_from_row)?;
        rows.collect::<Result<_, _>>().map_err(Into::into)
    }

    /// Name substring search, as the search screen runs it.
    pub fn search_clients(&self, name: &str) -> Result<Vec<Client>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, location, phone, bank_number, check_name FROM clients
             WHERE name LIKE '%' || ?1 || '%' ORDER BY id DESC",
        )?;
        let rows = stmt.query_map(params![name], client_from_row)?;
        rows.collect::<Result<_, _>>().map_err(Into::into)
    }

    // -----------------------------------------------------------------------
    // Ads
    // -----------------------------------------------------------------------

    pub fn save_ad(&self, ad: &Ad) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO ads (company_id, client_id, company, name, location, bank_number, check_name, status, date, money, notes, attachment)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                ad.company.id(),
                ad.client.id(),
                ad.company.display(),
                ad.client.display(),
                ad.location,
                ad.bank_number,
                ad.check_name,
                ad.status,
                date_to_sql(ad.date),
                ad.amount,
                ad.notes,
                ad.attachment,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_ad(&self, ad: &Ad) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE ads SET company_id = ?1, client_id = ?2, company = ?3, name = ?4, location = ?5,
                    bank_number = ?6, check_name = ?7, status = ?8, date = ?9, money = ?10,
                    notes = ?11, attachment = ?12
             WHERE id = ?13",
            params![
                ad.company.id(),
                ad.client.id(),
                ad.company.display(),
                ad.client.display(),
                ad.location,
                ad.bank_number,
                ad.check_name,
                ad.status,
                date_to_sql(ad.date),
                ad.amount,
                ad.notes,
                ad.attachment,
                ad.id,
            ],
        )?;
        Ok(())
    }

    pub fn delete_ad(&self, id: i64) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM ads WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub fn get_ad(&self, id: i64) -> Result<Option<Ad>, StoreError> {
        let mut stmt = self.conn.prepare(&format!("{AD_SELECT} WHERE id = ?1"))?;
        let mut rows = stmt.query_map(params![id], ad_from_row)?;
        rows.next().transpose().map_err(Into::into)
    }

    pub fn list_ads(&self) -> Result<Vec<Ad>, StoreError> {
        self.ads_matching(&AdFilter::default())
    }

    /// Ads matching `filter`, newest first (the order the report screens
    /// render).
    pub fn ads_matching(&self, filter: &AdFilter) -> Result<Vec<Ad>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "{AD_SELECT}
             WHERE (?1 IS NULL OR date >= ?1)
               AND (?2 IS NULL OR date <= ?2)
               AND (?3 IS NULL OR status = ?3)
               AND (?4 IS NULL OR company LIKE '%' || ?4 || '%')
               AND (?5 IS NULL OR name LIKE '%' || ?5 || '%'
                    OR location LIKE '%' || ?5 || '%'
                    OR notes LIKE '%' || ?5 || '%')
             ORDER BY id DESC"
        ))?;
        let rows = stmt.query_map(
            params![
                date_to_sql(filter.date_from),
                date_to_sql(filter.date_to),
                filter.status,
                filter.company,
                filter.query,
            ],
            ad_from_row,
        )?;
        rows.collect::<Result<_, _>>().map_err(Into::into)
    }

    // -----------------------------------------------------------------------
    // Contracts
    // -----------------------------------------------------------------------

    pub fn save_contract(&self, contract: &Contract) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO contracts (invoke_number, company_id, client_id, company, name, location,
                    bank_number, check_name, date_start, date_finish, money, notes, attachment)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                contract.invoke_number,
                contract.company.id(),
                contract.client.id(),
                contract.company.display(),
                contract.client.display(),
                contract.location,
                contract.bank_number,
                contract.check_name,
                date_to_sql(contract.date_start),
                date_to_sql(contract.date_finish),
                contract.amount,
                contract.notes,
                contract.attachment,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_contract(&self, contract: &Contract) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE contracts SET invoke_number = ?1, company_id = ?2, client_id = ?3, company = ?4,
                    name = ?5, location = ?6, bank_number = ?7, check_name = ?8, date_start = ?9,
                    date_finish = ?10, money = ?11, notes = ?12, attachment = ?13
             WHERE id = ?14",
            params![
                contract.invoke_number,
                contract.company.id(),
                contract.client.id(),
                contract.company.display(),
                contract.client.display(),
                contract.location,
                contract.bank_number,
                contract.check_name,
                date_to_sql(contract.date_start),
                date_to_sql(contract.date_finish),
                contract.amount,
                contract.notes,
                contract.attachment,
                contract.id,
            ],
        )?;
        Ok(())
    }

    pub fn delete_contract(&self, id: i64) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM contracts WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub fn get_contract(&self, id: i64) -> Result<Option<Contract>, StoreError> {
        let mut stmt = self.conn.prepare(&format!("{CONTRACT_SELECT} WHERE id = ?1"))?;
        let mut rows = stmt.query_map(params![id], contract_from_row)?;
        rows.next().transpose().map_err(Into::into)
    }

    pub fn list_contracts(&self) -> Result<Vec<Contract>, StoreError> {
        self.contracts_matching(&ContractFilter::default())
    }

    /// Contracts matching `filter`, newest first.
    pub fn contracts_matching(&self, filter: &ContractFilter) -> Result<Vec<Contract>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTRACT_SELECT}
             WHERE (?1 IS NULL OR date_start >= ?1)
               AND (?2 IS NULL OR date_start <= ?2)
               AND (?3 IS NULL OR company LIKE '%' || ?3 || '%')
               AND (?4 IS NULL OR name LIKE '%' || ?4 || '%'
                    OR location LIKE '%' || ?4 || '%'
                    OR notes LIKE '%' || ?4 || '%')
             ORDER BY id DESC"
        ))?;
        let rows = stmt.query_map(
            params![
                date_to_sql(filter.date_from),
                date_to_sql(filter.date_to),
                filter.company,
                filter.query,
            ],
            contract_from_row,
        )?;
        rows.collect::<Result<_, _>>().map_err(Into::into)
    }

    /// Suggested invoice number for a new contract form: current maximum
    /// plus one, or 1 for an empty table. Computed at call time, so two
    /// concurrent callers can receive the same suggestion — an accepted
    /// weakness, not an invariant.
    pub fn next_contract_number(&self) -> Result<i64, StoreError> {
        let n: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(invoke_number), 0) + 1 FROM contracts",
            [],
            |row| row.get(0),
        )?;
        Ok(n)
    }
}

const AD_SELECT: &str = "SELECT id, company_id, client_id, company, name, location, bank_number,
        check_name, status, date, money, notes, attachment FROM ads";

const CONTRACT_SELECT: &str = "SELECT id, invoke_number, company_id, client_id, company, name,
        location, bank_number, check_name, date_start, date_finish, money, notes, attachment
        FROM contracts";

fn require_name(entity: &'static str, name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation { entity, field: "name" });
    }
    Ok(())
}

fn date_to_sql(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

fn date_from_sql(text: Option<String>) -> Option<NaiveDate> {
    text.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
}

fn company_from_row(row: &Row<'_>) -> rusqlite::Result<Company> {
    Ok(Company {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        phone: row.get(3)?,
        notes: row.get(4)?,
        logo: row.get(5)?,
    })
}

fn client_from_row(row: &Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        phone: row.get(3)?,
        bank_number: row.get(4)?,
        check_name: row.get(5)?,
    })
}

fn ad_from_row(row: &Row<'_>) -> rusqlite::Result<Ad> {
    Ok(Ad {
        id: row.get(0)?,
        company: PartyRef::from_columns(row.get(1)?, row.get(3)?),
        client: PartyRef::from_columns(row.get(2)?, row.get(4)?),
        location: row.get(5)?,
        bank_number: row.get(6)?,
        check_name: row.get(7)?,
        status: row.get(8)?,
        date: date_from_sql(row.get(9)?),
        amount: row.get(10)?,
        notes: row.get(11)?,
        attachment: row.get(12)?,
    })
}

fn contract_from_row(row: &Row<'_>) -> rusqlite::Result<Contract> {
    Ok(Contract {
        id: row.get(0)?,
        invoke_number: row.get(1)?,
        company: PartyRef::from_columns(row.get(2)?, row.get(4)?),
        client: PartyRef::from_columns(row.get(3)?, row.get(5)?),
        location: row.get(6)?,
        bank_number: row.get(7)?,
        check_name: row.get(8)?,
        date_start: date_from_sql(row.get(9)?),
        date_finish: date_from_sql(row.get(10)?),
        amount: row.get(11)?,
        notes: row.get(12)?,
        attachment: row.get(13)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        RecordStore::open_in_memory().unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn company_crud() {
        let store = store();
        let id = store
            .save_company(&Company { name: "Acme".into(), phone: "555".into(), ..Default::default() })
            .unwrap();

        let mut loaded = store.get_company(id).unwrap().unwrap();
        assert_eq!(loaded.name, "Acme");
        assert_eq!(loaded.phone, "555");

        loaded.address = "Main St".into();
        store.update_company(&loaded).unwrap();
        assert_eq!(store.get_company(id).unwrap().unwrap().address, "Main St");

        store.delete_company(id).unwrap();
        assert!(store.get_company(id).unwrap().is_none());
    }

    #[test]
    fn blank_company_name_is_rejected() {
        let store = store();
        let err = store.save_company(&Company { name: "  ".into(), ..Default::default() });
        assert!(matches!(err, Err(StoreError::Validation { entity: "company", field: "name" })));
        assert!(store.list_companies().unwrap().is_empty());
    }

    #[test]
    fn blank_client_name_is_rejected_without_partial_write() {
        let store = store();
        store.save_client(&Client { name: "Kept".into(), ..Default::default() }).unwrap();

        let err = store.save_client(&Client { name: "".into(), phone: "123".into(), ..Default::default() });
        assert!(matches!(err, Err(StoreError::Validation { .. })));

        // Existing client count unchanged
        assert_eq!(store.list_clients().unwrap().len(), 1);
    }

    #[test]
    fn client_search_matches_substring() {
        let store = store();
        store.save_client(&Client { name: "Jane Doe".into(), ..Default::default() }).unwrap();
        store.save_client(&Client { name: "John Roe".into(), ..Default::default() }).unwrap();

        let hits = store.search_clients("Doe").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Jane Doe");
        assert_eq!(store.search_clients("o").unwrap().len(), 2);
    }

    #[test]
    fn ad_roundtrip_preserves_party_refs() {
        let store = store();
        let ad = Ad {
            company: PartyRef::Linked { id: 3, name: "Acme".into() },
            client: PartyRef::Unlinked("Jane".into()),
            status: "pending".into(),
            date: Some(date("2025-06-01")),
            amount: 150.5,
            notes: "front page".into(),
            ..Default::default()
        };
        let id = store.save_ad(&ad).unwrap();

        let loaded = store.get_ad(id).unwrap().unwrap();
        assert_eq!(loaded.company, PartyRef::Linked { id: 3, name: "Acme".into() });
        assert_eq!(loaded.client, PartyRef::Unlinked("Jane".into()));
        assert_eq!(loaded.date, Some(date("2025-06-01")));
        assert_eq!(loaded.amount, 150.5);
    }

    #[test]
    fn ad_update_mutates_in_place() {
        let store = store();
        let id = store
            .save_ad(&Ad { client: PartyRef::Unlinked("Jane".into()), ..Default::default() })
            .unwrap();

        let mut ad = store.get_ad(id).unwrap().unwrap();
        ad.status = "done".into();
        ad.amount = 99.0;
        store.update_ad(&ad).unwrap();

        let loaded = store.get_ad(id).unwrap().unwrap();
        assert_eq!(loaded.id, id);
        assert_eq!(loaded.status, "done");
        assert_eq!(loaded.amount, 99.0);
    }

    #[test]
    fn ad_filters() {
        let store = store();
        for (client, status, day, company) in [
            ("a", "pending", "2025-01-10", "Acme"),
            ("b", "done", "2025-02-10", "Acme"),
            ("c", "done", "2025-03-10", "Globex"),
        ] {
            store
                .save_ad(&Ad {
                    client: PartyRef::Unlinked(client.into()),
                    company: PartyRef::Unlinked(company.into()),
                    status: status.into(),
                    date: Some(date(day)),
                    ..Default::default()
                })
                .unwrap();
        }

        let done = store
            .ads_matching(&AdFilter { status: Some("done".into()), ..Default::default() })
            .unwrap();
        assert_eq!(done.len(), 2);

        let feb_on = store
            .ads_matching(&AdFilter { date_from: Some(date("2025-02-01")), ..Default::default() })
            .unwrap();
        assert_eq!(feb_on.len(), 2);

        let acme_done = store
            .ads_matching(&AdFilter {
                status: Some("done".into()),
                company: Some("Acme".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(acme_done.len(), 1);
        assert_eq!(acme_done[0].client.display(), "b");
    }

    #[test]
    fn list_order_is_newest_first() {
        let store = store();
        for name in ["first", "second", "third"] {
            store.save_ad(&Ad { client: PartyRef::Unlinked(name.into()), ..Default::default() }).unwrap();
        }
        let names: Vec<_> =
            store.list_ads().unwrap().iter().map(|a| a.client.display().to_string()).collect();
        assert_eq!(names, ["third", "second", "first"]);
    }

    #[test]
    fn contract_roundtrip() {
        let store = store();
        let contract = Contract {
            invoke_number: 12,
            company: PartyRef::Unlinked("Acme".into()),
            client: PartyRef::Unlinked("Jane".into()),
            date_start: Some(date("2025-01-01")),
            date_finish: Some(date("2025-12-31")),
            amount: 1200.0,
            ..Default::default()
        };
        let id = store.save_contract(&contract).unwrap();

        let loaded = store.get_contract(id).unwrap().unwrap();
        assert_eq!(loaded.invoke_number, 12);
        assert_eq!(loaded.date_finish, Some(date("2025-12-31")));

        store.delete_contract(id).unwrap();
        assert!(store.get_contract(id).unwrap().is_none());
    }

    #[test]
    fn next_contract_number_is_max_plus_one() {
        let store = store();
        assert_eq!(store.next_contract_number().unwrap(), 1);

        store.save_contract(&Contract { invoke_number: 4, ..Default::default() }).unwrap();
        store.save_contract(&Contract { invoke_number: 9, ..Default::default() }).unwrap();
        assert_eq!(store.next_contract_number().unwrap(), 10);
    }

    #[test]
    fn contract_date_filter_uses_start_date() {
        let store = store();
        for (n, start) in [(1, "2025-01-15"), (2, "2025-06-15")] {
            store
                .save_contract(&Contract {
                    invoke_number: n,
                    date_start: Some(date(start)),
                    ..Default::default()
                })
                .unwrap();
        }
        let hits = store
            .contracts_matching(&ContractFilter {
                date_from: Some(date("2025-03-01")),
                date_to: Some(date("2025-12-31")),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].invoke_number, 2);
    }

    #[test]
    fn orphaned_company_reference_is_tolerated() {
        let store = store();
        let company_id = store
            .save_company(&Company { name: "Acme".into(), ..Default::default() })
            .unwrap();
        let ad_id = store
            .save_ad(&Ad {
                company: PartyRef::Linked { id: company_id, name: "Acme".into() },
                client: PartyRef::Unlinked("Jane".into()),
                ..Default::default()
            })
            .unwrap();

        store.delete_company(company_id).unwrap();

        // The ad still loads with its captured text and stale id.
        let ad = store.get_ad(ad_id).unwrap().unwrap();
        assert_eq!(ad.company, PartyRef::Linked { id: company_id, name: "Acme".into() });
    }
}
