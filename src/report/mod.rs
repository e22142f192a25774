
use std::io::Write;

use chrono::NaiveDate;
use csv::Writer;
use serde::Serialize;

use crate::storage::Storage;
use crate::types::{AccountId, Monetary};

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    id: AccountId,
    account_number: &'a str,
    balance: Monetary,
    created_on: NaiveDate
}

/// Writes every stored account as `id,account_number,balance,created_on` CSV rows.
pub fn write_report<S, W>(storage: &S, output: W) -> anyhow::Result<()>
where
    S: Storage + ?Sized,
    W: Write
{
    let mut writer = Writer::from_writer(output);
    let accounts = storage.find_all()?;

    if accounts.is_empty() {
        writer.write_record(["id", "account_number", "balance", "created_on"])?;
    }

    for account in &accounts {
        writer.serialize(ReportRow {
            id: account.id().unwrap_or_default(),
            account_number: account.account_number(),
            balance: account.balance(),
            created_on: account.created_on()
        })?;
    }

    writer.flush()?;

    Ok(())
}
