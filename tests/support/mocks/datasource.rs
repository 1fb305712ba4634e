// tests/support/mocks/datasource.rs
use async_trait::async_trait;
use realworld_store::domain::errors::{DomainError, DomainResult};
use realworld_store::infrastructure::datasource::{Association, Datasource, Filter, Table};
use realworld_store::infrastructure::mapper::Row;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One recorded datasource invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FindOne(Table, Filter),
    FindMany(Table, Filter),
    Count(Table, Filter),
    LoadAssociation(Association),
    Insert(Table, Row),
    Update(Table, Filter, Row),
    Delete(Table, Filter),
}

/// Scripted datasource: every method pops the next queued response for that
/// method and panics when none is left, so an unexpected query fails the test.
#[derive(Default)]
pub struct MockDatasource {
    find_one: Mutex<VecDeque<DomainResult<Row>>>,
    find_many: Mutex<VecDeque<DomainResult<Vec<Row>>>>,
    count: Mutex<VecDeque<DomainResult<i64>>>,
    associations: Mutex<VecDeque<DomainResult<Vec<Row>>>>,
    insert: Mutex<VecDeque<DomainResult<i64>>>,
    update: Mutex<VecDeque<DomainResult<u64>>>,
    delete: Mutex<VecDeque<DomainResult<u64>>>,
    calls: Mutex<Vec<Call>>,
}

fn push<T>(queue: &Mutex<VecDeque<DomainResult<T>>>, response: DomainResult<T>) {
    queue.lock().unwrap().push_back(response);
}

fn next<T>(queue: &Mutex<VecDeque<DomainResult<T>>>, method: &str) -> DomainResult<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| panic!("unexpected {method} call"))
}

pub fn fault(message: &str) -> DomainError {
    DomainError::Persistence(message.to_string())
}

pub fn missing() -> DomainError {
    DomainError::NotFound("record not found".to_string())
}

impl MockDatasource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_find_one(self, response: DomainResult<Row>) -> Self {
        push(&self.find_one, response);
        self
    }

    pub fn expect_find_many(self, response: DomainResult<Vec<Row>>) -> Self {
        push(&self.find_many, response);
        self
    }

    pub fn expect_count(self, response: DomainResult<i64>) -> Self {
        push(&self.count, response);
        self
    }

    pub fn expect_association(self, response: DomainResult<Vec<Row>>) -> Self {
        push(&self.associations, response);
        self
    }

    pub fn expect_insert(self, response: DomainResult<i64>) -> Self {
        push(&self.insert, response);
        self
    }

    pub fn expect_update(self, response: DomainResult<u64>) -> Self {
        push(&self.update, response);
        self
    }

    pub fn expect_delete(self, response: DomainResult<u64>) -> Self {
        push(&self.delete, response);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Datasource for MockDatasource {
    async fn find_one(&self, table: Table, filter: &Filter) -> DomainResult<Row> {
        self.record(Call::FindOne(table, filter.clone()));
        next(&self.find_one, "find_one")
    }

    async fn find_many(&self, table: Table, filter: &Filter) -> DomainResult<Vec<Row>> {
        self.record(Call::FindMany(table, filter.clone()));
        next(&self.find_many, "find_many")
    }

    async fn count(&self, table: Table, filter: &Filter) -> DomainResult<i64> {
        self.record(Call::Count(table, filter.clone()));
        next(&self.count, "count")
    }

    async fn load_association(
        &self,
        _owner: &Row,
        association: Association,
    ) -> DomainResult<Vec<Row>> {
        self.record(Call::LoadAssociation(association));
        next(&self.associations, "load_association")
    }

    async fn insert(&self, table: Table, row: Row) -> DomainResult<i64> {
        self.record(Call::Insert(table, row));
        next(&self.insert, "insert")
    }

    async fn update(&self, table: Table, filter: &Filter, changes: Row) -> DomainResult<u64> {
        self.record(Call::Update(table, filter.clone(), changes));
        next(&self.update, "update")
    }

    async fn delete(&self, table: Table, filter: &Filter) -> DomainResult<u64> {
        self.record(Call::Delete(table, filter.clone()));
        next(&self.delete, "delete")
    }
}
