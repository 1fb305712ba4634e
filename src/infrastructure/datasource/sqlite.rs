// src/infrastructure/datasource/sqlite.rs
use super::error::map_sqlx;
use super::{Association, ColumnKind, Datasource, Filter, Table};
use crate::domain::errors::{DomainError, DomainResult};
use crate::infrastructure::mapper::{Row, Value};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row as _, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct SqliteDatasource {
    pool: Arc<SqlitePool>,
}

impl SqliteDatasource {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

fn failure(operation: &'static str, table: Table) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |err| {
        let err = map_sqlx(err);
        warn!(operation, table = %table, error = %err, "datasource call failed");
        err
    }
}

fn push_select(builder: &mut QueryBuilder<'static, Sqlite>, table: Table) {
    builder.push("SELECT ");
    for (index, column) in table.columns().iter().enumerate() {
        if index > 0 {
            builder.push(", ");
        }
        builder.push(format!("{t}.{c} AS {c}", t = table.name(), c = column.name));
    }
    builder.push(" FROM ");
    builder.push(table.name());
}

fn push_value(builder: &mut QueryBuilder<'static, Sqlite>, value: &Value) {
    match value {
        Value::Null => builder.push_bind(None::<i64>),
        Value::Integer(v) => builder.push_bind(*v),
        Value::Text(v) => builder.push_bind(v.clone()),
        Value::Timestamp(v) => builder.push_bind(*v),
    };
}

fn push_where(builder: &mut QueryBuilder<'static, Sqlite>, table: Table, filter: &Filter) {
    let mut keyword = " WHERE ";
    for (column, value) in filter.conditions() {
        builder.push(keyword);
        builder.push(format!("{}.{}", table.name(), column));
        if *value == Value::Null {
            builder.push(" IS NULL");
        } else {
            builder.push(" = ");
            push_value(builder, value);
        }
        keyword = " AND ";
    }

    if table.is_soft_deleted() && !filter.includes_deleted() {
        builder.push(keyword);
        builder.push(format!("{}.deleted_at IS NULL", table.name()));
    }
}

fn push_order(builder: &mut QueryBuilder<'static, Sqlite>, table: Table) {
    if table.columns().iter().any(|column| column.name == "id") {
        builder.push(format!(" ORDER BY {}.id", table.name()));
    }
}

fn decode_row(row: &SqliteRow, table: Table) -> Result<Row, sqlx::Error> {
    let mut decoded = Row::new();
    for column in table.columns() {
        let value = match column.kind {
            ColumnKind::Integer => Value::from(row.try_get::<Option<i64>, _>(column.name)?),
            ColumnKind::Text => Value::from(row.try_get::<Option<String>, _>(column.name)?),
            ColumnKind::Timestamp => {
                Value::from(row.try_get::<Option<DateTime<Utc>>, _>(column.name)?)
            }
        };
        decoded.set(column.name, value);
    }
    Ok(decoded)
}

impl SqliteDatasource {
    async fn fetch_rows(
        &self,
        operation: &'static str,
        table: Table,
        mut builder: QueryBuilder<'static, Sqlite>,
    ) -> DomainResult<Vec<Row>> {
        debug!(operation, table = %table, sql = builder.sql(), "query");
        let rows = builder
            .build()
            .fetch_all(&*self.pool)
            .await
            .map_err(failure(operation, table))?;

        rows.iter()
            .map(|row| decode_row(row, table))
            .collect::<Result<Vec<_>, _>>()
            .map_err(failure(operation, table))
    }
}

#[async_trait]
impl Datasource for SqliteDatasource {
    async fn find_one(&self, table: Table, filter: &Filter) -> DomainResult<Row> {
        let mut builder = QueryBuilder::new("");
        push_select(&mut builder, table);
        push_where(&mut builder, table, filter);
        push_order(&mut builder, table);
        builder.push(" LIMIT 1");

        self.fetch_rows("find_one", table, builder)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::NotFound(format!("{table} record not found")))
    }

    async fn find_many(&self, table: Table, filter: &Filter) -> DomainResult<Vec<Row>> {
        let mut builder = QueryBuilder::new("");
        push_select(&mut builder, table);
        push_where(&mut builder, table, filter);
        push_order(&mut builder, table);

        self.fetch_rows("find_many", table, builder).await
    }

    async fn count(&self, table: Table, filter: &Filter) -> DomainResult<i64> {
        let mut builder = QueryBuilder::new(format!("SELECT COUNT(1) FROM {}", table.name()));
        push_where(&mut builder, table, filter);
        debug!(table = %table, sql = builder.sql(), "count");

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&*self.pool)
            .await
            .map_err(failure("count", table))
    }

    async fn load_association(
        &self,
        owner: &Row,
        association: Association,
    ) -> DomainResult<Vec<Row>> {
        match association {
            Association::Tags => {
                let mut builder = QueryBuilder::new("");
                push_select(&mut builder, Table::Tags);
                builder.push(
                    " INNER JOIN article_tags ON article_tags.tag_id = tags.id \
                     WHERE article_tags.article_id = ",
                );
                builder.push_bind(owner.int("id"));
                builder.push(" AND tags.deleted_at IS NULL ORDER BY tags.id");

                self.fetch_rows("load_association", Table::Tags, builder)
                    .await
            }
            Association::Author => {
                let filter = Filter::new().eq("id", owner.int("author_id"));
                self.find_many(Table::Users, &filter).await
            }
        }
    }

    async fn insert(&self, table: Table, row: Row) -> DomainResult<i64> {
        if row.is_empty() {
            return Err(DomainError::Persistence(format!(
                "insert into {table} without columns"
            )));
        }

        let verb = if table.is_soft_deleted() {
            "INSERT INTO "
        } else {
            "INSERT OR IGNORE INTO "
        };
        let mut builder = QueryBuilder::new(verb);
        builder.push(table.name());
        builder.push(" (");
        for (index, (column, _)) in row.columns().enumerate() {
            if index > 0 {
                builder.push(", ");
            }
            builder.push(column);
        }
        builder.push(") VALUES (");
        for (index, (_, value)) in row.columns().enumerate() {
            if index > 0 {
                builder.push(", ");
            }
            push_value(&mut builder, value);
        }
        builder.push(")");
        debug!(table = %table, sql = builder.sql(), "insert");

        let result = builder
            .build()
            .execute(&*self.pool)
            .await
            .map_err(failure("insert", table))?;

        if result.rows_affected() == 0 {
            Ok(0)
        } else {
            Ok(result.last_insert_rowid())
        }
    }

    async fn update(&self, table: Table, filter: &Filter, changes: Row) -> DomainResult<u64> {
        if changes.is_empty() {
            return Err(DomainError::Persistence(format!(
                "update of {table} without columns"
            )));
        }

        let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", table.name()));
        for (index, (column, value)) in changes.columns().enumerate() {
            if index > 0 {
                builder.push(", ");
            }
            builder.push(column);
            builder.push(" = ");
            push_value(&mut builder, value);
        }
        push_where(&mut builder, table, filter);
        debug!(table = %table, sql = builder.sql(), "update");

        builder
            .build()
            .execute(&*self.pool)
            .await
            .map(|result| result.rows_affected())
            .map_err(failure("update", table))
    }

    async fn delete(&self, table: Table, filter: &Filter) -> DomainResult<u64> {
        if table.is_soft_deleted() {
            return Err(DomainError::Persistence(format!(
                "{table} rows are soft-deleted, not removed"
            )));
        }
        if filter.is_empty() {
            return Err(DomainError::Persistence(format!(
                "unfiltered delete from {table}"
            )));
        }

        let mut builder = QueryBuilder::new(format!("DELETE FROM {}", table.name()));
        push_where(&mut builder, table, filter);
        debug!(table = %table, sql = builder.sql(), "delete");

        builder
            .build()
            .execute(&*self.pool)
            .await
            .map(|result| result.rows_affected())
            .map_err(failure("delete", table))
    }
}
