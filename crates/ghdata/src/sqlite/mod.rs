use std::path::Path;
use std::time::Instant;

use rusqlite::functions::{Context as FunctionContext, FunctionFlags};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, trace};

use crate::error::{GhDataError, Result};
use crate::models::{Cell, Granularity, ResultTable};
use crate::utils::time::parse_calendar_date;

/// Read-only SQL execution against a GHTorrent-shaped database.
///
/// Parameter names are given without the leading `:`. Every parameter the
/// statement references must be bound, and every bound parameter must be
/// referenced.
pub trait DataStore {
    fn execute(&self, sql: &str, params: &[(&str, SqlParam<'_>)]) -> Result<ResultTable>;
}

impl<T: DataStore + ?Sized> DataStore for &T {
    fn execute(&self, sql: &str, params: &[(&str, SqlParam<'_>)]) -> Result<ResultTable> {
        (**self).execute(sql, params)
    }
}

/// Value bound to a named statement parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SqlParam<'a> {
    Integer(i64),
    Text(&'a str),
}

impl From<i64> for SqlParam<'_> {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl<'a> From<&'a str> for SqlParam<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

/// [`DataStore`] over a rusqlite connection with the bucket functions
/// registered.
#[derive(Debug)]
pub struct SqliteStore {
    connection: Connection,
}

impl SqliteStore {
    /// Open an existing database file read-only.
    pub fn open(path: &Path) -> Result<Self> {
        let connection = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(GhDataError::store("open sqlite database"))?;
        debug!(path = %path.display(), "opened sqlite store");
        Self::from_connection(connection)
    }

    /// Wrap a connection the caller already configured.
    pub fn from_connection(connection: Connection) -> Result<Self> {
        register_bucket_functions(&connection)?;
        Ok(Self { connection })
    }

    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}

impl DataStore for SqliteStore {
    fn execute(&self, sql: &str, params: &[(&str, SqlParam<'_>)]) -> Result<ResultTable> {
        let started = Instant::now();
        let mut statement = self
            .connection
            .prepare(sql)
            .map_err(GhDataError::store("prepare query"))?;

        bind_named_params(&mut statement, params)?;

        let mut table = ResultTable::new(statement.column_names());
        let column_count = table.columns().len();
        let mut rows = statement.raw_query();
        while let Some(row) = rows.next().map_err(GhDataError::store("fetch query row"))? {
            let mut cells = Vec::with_capacity(column_count);
            for index in 0..column_count {
                let value = row
                    .get_ref(index)
                    .map_err(GhDataError::store("decode query column"))?;
                cells.push(cell_from_sql(value));
            }
            table.push_row(cells);
        }

        trace!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            row_count = table.len(),
            params = params.len(),
            "executed query"
        );
        Ok(table)
    }
}

fn bind_named_params(
    statement: &mut rusqlite::Statement<'_>,
    params: &[(&str, SqlParam<'_>)],
) -> Result<()> {
    let mut bound = vec![false; statement.parameter_count()];
    for (name, value) in params {
        let key = format!(":{name}");
        let index = statement
            .parameter_index(&key)
            .map_err(GhDataError::store("resolve query parameter"))?
            .ok_or_else(|| GhDataError::Store {
                operation: "bind query parameter",
                source: rusqlite::Error::InvalidParameterName(key.clone()),
            })?;
        match value {
            SqlParam::Integer(value) => statement.raw_bind_parameter(index, *value),
            SqlParam::Text(value) => statement.raw_bind_parameter(index, *value),
        }
        .map_err(GhDataError::store("bind query parameter"))?;
        bound[index - 1] = true;
    }

    if let Some(position) = bound.iter().position(|is_bound| !is_bound) {
        let name = statement
            .parameter_name(position + 1)
            .map(|name| name.trim_start_matches(':').to_string())
            .unwrap_or_else(|| format!("?{}", position + 1));
        return Err(GhDataError::UnboundParameter(name));
    }
    Ok(())
}

fn cell_from_sql(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null => Cell::Null,
        ValueRef::Integer(value) => Cell::Integer(value),
        ValueRef::Real(value) => Cell::Real(value),
        ValueRef::Text(bytes) => Cell::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Cell::Text(encode_blob_hex(bytes)),
    }
}

fn encode_blob_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        output.push(HEX[(byte >> 4) as usize] as char);
        output.push(HEX[(byte & 0x0f) as usize] as char);
    }
    output
}

/// Registers `DAY`, `WEEK`, `MONTH` and `YEAR` as one-argument scalar
/// functions mapping a timestamp to its bucket key (`NULL` when the input is
/// not a date).
pub fn register_bucket_functions(connection: &Connection) -> Result<()> {
    for granularity in Granularity::ALL {
        connection
            .create_scalar_function(
                granularity.keyword(),
                1,
                FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
                move |ctx| bucket_key_for(ctx, granularity),
            )
            .map_err(GhDataError::store("register bucket sql function"))?;
    }
    Ok(())
}

fn bucket_key_for(ctx: &FunctionContext<'_>, granularity: Granularity) -> rusqlite::Result<Option<String>> {
    let key = match ctx.get_raw(0) {
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(parse_calendar_date)
            .map(|date| granularity.bucket_key(date)),
        _ => None,
    };
    Ok(key)
}
