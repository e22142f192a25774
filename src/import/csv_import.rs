use crate::service::AccountService;
use crate::storage::TransactionManager;
use crate::types::Monetary;
use anyhow::Context;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::{error, info};

/// One `account_number,balance` row of a seed file.
#[derive(Debug, Deserialize)]
struct SeedRecord {
    account_number: String,
    balance: String
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: usize,
    pub rejected: usize
}

/// Opens one account per CSV row through the service.
///
/// Rows that fail to parse or that the service rejects are logged and skipped.
pub fn import_accounts<S, R>(service: &AccountService<S>, source: R) -> ImportSummary
where
    S: TransactionManager,
    R: Read
{
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source);

    let mut summary = ImportSummary::default();

    for result in reader.deserialize::<SeedRecord>() {
        let record = match result {
            Ok(record) => record,
            Err(error) => {
                error!("CSV deserialization error: {error}");
                summary.rejected += 1;
                continue;
            }
        };

        let balance = match Monetary::from_str(&record.balance) {
            Ok(balance) => balance,
            Err(error) => {
                error!("Seed account [{}] has an invalid balance: {error}", record.account_number);
                summary.rejected += 1;
                continue;
            }
        };

        match service.create_account(&record.account_number, balance) {
            Ok(_) => summary.created += 1,
            Err(error) => {
                error!("Seed account [{}] was not created: {error}", record.account_number);
                summary.rejected += 1;
            }
        }
    }

    info!("Seeded {} accounts, rejected {} rows", summary.created, summary.rejected);

    summary
}

pub fn import_file<S: TransactionManager>(service: &AccountService<S>, path: &Path) -> anyhow::Result<ImportSummary> {
    let file = File::open(path)
        .with_context(|| format!("Error opening seed CSV at path: {}", path.display()))?;

    Ok(import_accounts(service, BufReader::new(file)))
}
