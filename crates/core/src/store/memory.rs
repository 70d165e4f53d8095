use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::forex::{ForexOperation, NewForexOperation};
use crate::models::investment::{InvestmentOperation, NewInvestment};
use crate::models::transaction::{NewTransaction, Transaction};
use crate::models::transfer::{NewTransfer, Transfer};
use super::{Store, StoreConnector};

#[derive(Default)]
struct Tables {
    transactions: Vec<Transaction>,
    investments: Vec<InvestmentOperation>,
    forex: Vec<ForexOperation>,
    transfers: Vec<Transfer>,
}

/// In-process store for tests and offline demos.
///
/// Every token sees the same data. Rows are kept sorted by date, with
/// same-day rows in insertion order, matching `order=date.asc` on the backend.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_tables<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut tables)
    }
}

/// Insert after every row dated on or before `record`'s date.
fn insert_by_date<T: Clone>(rows: &mut Vec<T>, record: T, date_of: impl Fn(&T) -> NaiveDate) -> T {
    let date = date_of(&record);
    let pos = rows.partition_point(|r| date_of(r) <= date);
    rows.insert(pos, record.clone());
    record
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        Ok(self.with_tables(|t| t.transactions.clone()))
    }

    async fn insert_transaction(&self, new: NewTransaction) -> Result<Transaction, CoreError> {
        let record = new.into_record(Uuid::new_v4());
        Ok(self.with_tables(|t| insert_by_date(&mut t.transactions, record, |r| r.date)))
    }

    async fn list_investments(&self) -> Result<Vec<InvestmentOperation>, CoreError> {
        Ok(self.with_tables(|t| t.investments.clone()))
    }

    async fn insert_investment(&self, new: NewInvestment) -> Result<InvestmentOperation, CoreError> {
        let record = new.into_record(Uuid::new_v4());
        Ok(self.with_tables(|t| insert_by_date(&mut t.investments, record, |r| r.date)))
    }

    async fn list_forex(&self) -> Result<Vec<ForexOperation>, CoreError> {
        Ok(self.with_tables(|t| t.forex.clone()))
    }

    async fn insert_forex(&self, new: NewForexOperation) -> Result<ForexOperation, CoreError> {
        let record = new.into_record(Uuid::new_v4());
        Ok(self.with_tables(|t| insert_by_date(&mut t.forex, record, |r| r.date)))
    }

    async fn list_transfers(&self) -> Result<Vec<Transfer>, CoreError> {
        Ok(self.with_tables(|t| t.transfers.clone()))
    }

    async fn insert_transfer(&self, new: NewTransfer) -> Result<Transfer, CoreError> {
        let record = new.into_record(Uuid::new_v4());
        Ok(self.with_tables(|t| insert_by_date(&mut t.transfers, record, |r| r.date)))
    }
}

impl StoreConnector for MemoryStore {
    fn connect(&self, _access_token: &str) -> Arc<dyn Store> {
        Arc::new(self.clone())
    }
}
