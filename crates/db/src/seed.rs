//! Incremental CSV snapshot loader.
//!
//! Each table is reconciled against its CSV file by primary key: rows whose `id`
//! is already stored are left untouched and only unseen ids are inserted. Loading
//! the same snapshot twice is a no-op the second time.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::{info, warn};

use crate::{migrations, DbPool};

const TRUTHY_VALUES: [&str; 3] = ["true", "1", "yes"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedTable {
    Users,
    Products,
    Orders,
    Messages,
}

#[derive(Clone, Copy, Debug)]
enum ColumnKind {
    Text,
    Bool,
    /// Finite and non-negative; these columns hold quantities.
    Float,
}

/// A seeded column and the value stored when the CSV cell is empty.
#[derive(Clone, Copy, Debug)]
struct ColumnSpec {
    name: &'static str,
    kind: ColumnKind,
    default: Option<ColumnDefault>,
}

#[derive(Clone, Copy, Debug)]
enum ColumnDefault {
    Text(&'static str),
    Bool(bool),
    Float(f64),
}

const fn text(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, kind: ColumnKind::Text, default: None }
}

const USER_COLUMNS: &[ColumnSpec] = &[
    text("id"),
    text("email"),
    text("first_name"),
    text("last_name"),
    text("username"),
    ColumnSpec {
        name: "is_active",
        kind: ColumnKind::Bool,
        default: Some(ColumnDefault::Bool(true)),
    },
];

const PRODUCT_COLUMNS: &[ColumnSpec] = &[
    text("id"),
    text("name"),
    text("main_product_code"),
    text("description"),
    ColumnSpec {
        name: "included_tonnage_quantity",
        kind: ColumnKind::Float,
        default: Some(ColumnDefault::Float(0.0)),
    },
];

const ORDER_COLUMNS: &[ColumnSpec] = &[
    text("id"),
    text("user_id"),
    text("conversation_id"),
    text("code"),
    text("start_date"),
    text("end_date"),
    text("status"),
    text("waste_type_id"),
    ColumnSpec {
        name: "access_details",
        kind: ColumnKind::Text,
        default: Some(ColumnDefault::Text("")),
    },
    ColumnSpec {
        name: "is_deleted",
        kind: ColumnKind::Bool,
        default: Some(ColumnDefault::Bool(false)),
    },
];

const MESSAGE_COLUMNS: &[ColumnSpec] = &[
    text("id"),
    text("conversation_id"),
    text("user_id"),
    text("message"),
    text("sentiment_label"),
    text("created_on"),
    ColumnSpec {
        name: "is_deleted",
        kind: ColumnKind::Bool,
        default: Some(ColumnDefault::Bool(false)),
    },
];

impl SeedTable {
    /// Parents before children.
    pub const LOAD_ORDER: [SeedTable; 4] =
        [Self::Users, Self::Products, Self::Orders, Self::Messages];

    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Messages => "messages",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Users => "users.csv",
            Self::Products => "products.csv",
            Self::Orders => "orders.csv",
            Self::Messages => "messages.csv",
        }
    }

    fn columns(&self) -> &'static [ColumnSpec] {
        match self {
            Self::Users => USER_COLUMNS,
            Self::Products => PRODUCT_COLUMNS,
            Self::Orders => ORDER_COLUMNS,
            Self::Messages => MESSAGE_COLUMNS,
        }
    }

    fn insert_sql(&self) -> String {
        let columns = self.columns();
        let names: Vec<&str> = columns.iter().map(|column| column.name).collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            self.table_name(),
            names.join(", ")
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeedStatus {
    Inserted { rows: usize },
    UpToDate,
    MissingFile { path: PathBuf },
}

impl fmt::Display for SeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inserted { rows } => write!(f, "inserted {rows}"),
            Self::UpToDate => f.write_str("up to date"),
            Self::MissingFile { path } => write!(f, "missing file {}", path.display()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableSeedOutcome {
    pub table: SeedTable,
    #[serde(flatten)]
    pub status: SeedStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SeedReport {
    pub tables: Vec<TableSeedOutcome>,
}

impl SeedReport {
    pub fn status(&self, table: SeedTable) -> Option<&SeedStatus> {
        self.tables.iter().find(|outcome| outcome.table == table).map(|outcome| &outcome.status)
    }

    pub fn inserted_total(&self) -> usize {
        self.tables
            .iter()
            .map(|outcome| match outcome.status {
                SeedStatus::Inserted { rows } => rows,
                _ => 0,
            })
            .sum()
    }

    /// One-line summary such as `users: inserted 3, products: up to date`.
    pub fn summary(&self) -> String {
        self.tables
            .iter()
            .map(|outcome| format!("{}: {}", outcome.table.table_name(), outcome.status))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("could not open `{}`: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("malformed CSV in `{}`: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("`{}` has no `id` column", path.display())]
    MissingIdColumn { path: PathBuf },
    #[error("{table} line {line}: column `{column}` value `{value}` is not a number")]
    Coercion { table: &'static str, line: u64, column: &'static str, value: String },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] MigrateError),
}

#[derive(Clone, Debug, PartialEq)]
enum SeedValue {
    Null,
    Text(String),
    Bool(bool),
    Float(f64),
}

impl From<ColumnDefault> for SeedValue {
    fn from(value: ColumnDefault) -> Self {
        match value {
            ColumnDefault::Text(text) => Self::Text(text.to_string()),
            ColumnDefault::Bool(flag) => Self::Bool(flag),
            ColumnDefault::Float(number) => Self::Float(number),
        }
    }
}

pub fn parse_bool(raw: &str) -> bool {
    let normalized = raw.trim().to_ascii_lowercase();
    TRUTHY_VALUES.contains(&normalized.as_str())
}

/// Applies pending migrations, then loads every known CSV file found in
/// `data_dir`.
pub async fn seed_directory(pool: &DbPool, data_dir: &Path) -> Result<SeedReport, SeedError> {
    migrations::run_pending(pool).await?;

    let mut report = SeedReport::default();
    for table in SeedTable::LOAD_ORDER {
        let status = seed_table(pool, table, data_dir).await?;
        match &status {
            SeedStatus::Inserted { rows } => info!(
                event_name = "seed.table.inserted",
                table = table.table_name(),
                rows = *rows,
                "seeded new rows"
            ),
            SeedStatus::UpToDate => info!(
                event_name = "seed.table.up_to_date",
                table = table.table_name(),
                "table already up to date"
            ),
            SeedStatus::MissingFile { path } => warn!(
                event_name = "seed.table.missing_file",
                table = table.table_name(),
                path = %path.display(),
                "CSV file not found, skipping"
            ),
        }
        report.tables.push(TableSeedOutcome { table, status });
    }

    Ok(report)
}

async fn seed_table(
    pool: &DbPool,
    table: SeedTable,
    data_dir: &Path,
) -> Result<SeedStatus, SeedError> {
    let path = data_dir.join(table.file_name());
    if !path.is_file() {
        return Ok(SeedStatus::MissingFile { path });
    }

    let existing = existing_ids(pool, table).await?;
    let staged = stage_rows(table, &path, &existing)?;
    if staged.is_empty() {
        return Ok(SeedStatus::UpToDate);
    }

    let sql = table.insert_sql();
    let mut tx = pool.begin().await?;
    for row in &staged {
        let mut query = sqlx::query(&sql);
        for value in row {
            query = match value {
                SeedValue::Null => query.bind(None::<String>),
                SeedValue::Text(text) => query.bind(text.as_str()),
                SeedValue::Bool(flag) => query.bind(*flag),
                SeedValue::Float(number) => query.bind(*number),
            };
        }
        query.execute(&mut *tx).await?;
    }
    tx.commit().await?;

    Ok(SeedStatus::Inserted { rows: staged.len() })
}

async fn existing_ids(pool: &DbPool, table: SeedTable) -> Result<HashSet<String>, SeedError> {
    let sql = format!("SELECT id FROM {}", table.table_name());
    let ids: Vec<String> = sqlx::query_scalar(&sql).fetch_all(pool).await?;
    Ok(ids.into_iter().collect())
}

/// Reads the file and returns coerced rows for ids not in `existing`, each
/// aligned with the table's column list.
fn stage_rows(
    table: SeedTable,
    path: &Path,
    existing: &HashSet<String>,
) -> Result<Vec<Vec<SeedValue>>, SeedError> {
    let file =
        File::open(path).map_err(|source| SeedError::Io { path: path.to_path_buf(), source })?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| SeedError::Csv { path: path.to_path_buf(), source })?
        .clone();
    let column_index = |name: &str| headers.iter().position(|header| header.trim() == name);
    let id_index =
        column_index("id").ok_or_else(|| SeedError::MissingIdColumn { path: path.to_path_buf() })?;
    let positions: Vec<Option<usize>> =
        table.columns().iter().map(|column| column_index(column.name)).collect();

    let mut staged_ids = HashSet::new();
    let mut staged = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| SeedError::Csv { path: path.to_path_buf(), source })?;
        let line = record.position().map(|position| position.line()).unwrap_or_default();

        let id = record.get(id_index).unwrap_or_default();
        if id.is_empty() {
            warn!(table = table.table_name(), line, "skipping CSV row without an id");
            continue;
        }
        if existing.contains(id) {
            continue;
        }
        if !staged_ids.insert(id.to_string()) {
            warn!(table = table.table_name(), line, id, "skipping repeated id in CSV file");
            continue;
        }

        let mut values = Vec::with_capacity(positions.len());
        for (column, position) in table.columns().iter().zip(&positions) {
            let raw = position.and_then(|index| record.get(index)).unwrap_or_default();
            values.push(coerce(table, line, column, raw)?);
        }
        staged.push(values);
    }

    Ok(staged)
}

fn coerce(
    table: SeedTable,
    line: u64,
    column: &ColumnSpec,
    raw: &str,
) -> Result<SeedValue, SeedError> {
    if raw.is_empty() {
        return Ok(column.default.map(SeedValue::from).unwrap_or(SeedValue::Null));
    }

    match column.kind {
        ColumnKind::Text => Ok(SeedValue::Text(raw.to_string())),
        ColumnKind::Bool => Ok(SeedValue::Bool(parse_bool(raw))),
        ColumnKind::Float => match raw.trim().parse::<f64>() {
            Ok(quantity) if quantity.is_finite() && quantity >= 0.0 => {
                Ok(SeedValue::Float(quantity))
            }
            _ => Err(SeedError::Coercion {
                table: table.table_name(),
                line,
                column: column.name,
                value: raw.to_string(),
            }),
        },
    }
}
