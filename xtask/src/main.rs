// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Project automation for the Reelbase workspace.
//!
//! - `cargo xtask ci` runs lint, build and the `SQLite` test suite.
//! - `cargo xtask test-mariadb` runs the `#[ignore]`d persistence tests
//!   against a throwaway `MariaDB` container.
//! - `cargo xtask verify-migrations` applies both migration trees and fails
//!   if the resulting schemas differ.
//!
//! Plain `cargo test` never needs external services.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::process::Output;
use std::thread::sleep;
use std::time::Duration;

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context, eyre::eyre};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const SQLITE_MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");
const MYSQL_MIGRATIONS: EmbeddedMigrations =
    embed_migrations!("../crates/persistence/migrations_mysql");

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Lint formatting, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run the `SQLite` test suite
    #[command(visible_alias = "t")]
    Test,

    /// Run `MariaDB` backend validation tests
    #[command(visible_alias = "tm")]
    TestMariadb,

    /// Verify schema parity between `SQLite` and `MySQL` migrations
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestMariadb => test_mariadb(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks (lint, build, test)
fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Lint formatting, clippy, and docs
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without warnings for every default member
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            ["doc", "--no-deps", "--package", package.name.as_str()],
        )
        .env_remove("CARGO")
        .env("RUSTDOCFLAGS", "-D warnings")
        .run_with_trace()?;
    }
    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo(vec!["fmt", "--all"])
}

/// Run every non-ignored test against `SQLite`
fn test() -> Result<()> {
    run_cargo(vec!["test", "--all-targets"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// A `MariaDB` 11 container that is removed when dropped.
struct MariaDb {
    container: &'static str,
    database: &'static str,
    port: u16,
}

impl MariaDb {
    const USER: &'static str = "reelbase";
    const PASSWORD: &'static str = "reelbase_password";
    const READY_ATTEMPTS: u32 = 30;

    /// Starts the container and waits until it accepts queries.
    fn start(container: &'static str, database: &'static str, port: u16) -> Result<Self> {
        cmd!("docker", "--version")
            .run_with_trace()
            .wrap_err("Docker is not available. Please install Docker.")?;

        // A container left over from an interrupted run would hold the port.
        remove_container(container);

        tracing::info!("Starting MariaDB container: {container}");
        cmd!(
            "docker",
            "run",
            "--name",
            container,
            "-e",
            format!("MARIADB_DATABASE={database}"),
            "-e",
            format!("MARIADB_USER={}", Self::USER),
            "-e",
            format!("MARIADB_PASSWORD={}", Self::PASSWORD),
            "-e",
            "MARIADB_ROOT_PASSWORD=root_password",
            "-p",
            format!("{port}:3306"),
            "-d",
            "mariadb:11"
        )
        .run_with_trace()
        .wrap_err("Failed to start MariaDB container")?;

        let instance = Self {
            container,
            database,
            port,
        };
        instance.wait_until_ready()?;
        Ok(instance)
    }

    fn wait_until_ready(&self) -> Result<()> {
        tracing::info!("Waiting for MariaDB to be ready...");
        for attempt in 1..=Self::READY_ATTEMPTS {
            sleep(Duration::from_secs(1));
            tracing::debug!("Connection attempt {attempt}/{}", Self::READY_ATTEMPTS);

            let probe = cmd!(
                "docker",
                "exec",
                self.container,
                "mariadb",
                "-u",
                Self::USER,
                format!("-p{}", Self::PASSWORD),
                "-e",
                "SELECT 1"
            )
            .stdout_null()
            .stderr_null()
            .run();

            if probe.is_ok() {
                tracing::info!("MariaDB is ready");
                return Ok(());
            }
        }
        Err(eyre!("MariaDB did not become ready within timeout"))
    }

    fn url(&self) -> String {
        format!(
            "mysql://{}:{}@127.0.0.1:{}/{}",
            Self::USER,
            Self::PASSWORD,
            self.port,
            self.database
        )
    }
}

impl Drop for MariaDb {
    fn drop(&mut self) {
        tracing::info!("Stopping MariaDB container");
        remove_container(self.container);
    }
}

fn remove_container(container: &str) {
    let _ = cmd!("docker", "stop", container)
        .stdout_null()
        .stderr_null()
        .unchecked()
        .run();
    let _ = cmd!("docker", "rm", container)
        .stdout_null()
        .stderr_null()
        .unchecked()
        .run();
}

/// Run `MariaDB` backend validation tests
///
/// Starts a `MariaDB` container on port 3307, then runs the ignored tests of
/// `reelbase-persistence` with the `mysql` feature and these variables set:
///
/// - `DATABASE_URL`: connection string for the container
/// - `REELBASE_TEST_BACKEND`: `mariadb`
///
/// The container is removed whether or not the tests pass.
fn test_mariadb() -> Result<()> {
    tracing::info!("Starting MariaDB backend validation");
    let mariadb = MariaDb::start("reelbase-test-mariadb", "reelbase_test", 3307)?;

    cmd!(
        "cargo",
        "test",
        "--package",
        "reelbase-persistence",
        "--features",
        "mysql",
        "backend_validation_tests",
        "--",
        "--ignored",
        "--test-threads=1"
    )
    .env("DATABASE_URL", mariadb.url())
    .env("REELBASE_TEST_BACKEND", "mariadb")
    .run_with_trace()
    .wrap_err("MariaDB backend validation tests failed")?;

    tracing::info!("MariaDB backend validation completed successfully");
    Ok(())
}

/// Verify schema parity between `SQLite` and `MySQL` migrations
///
/// Applies `migrations/` to an in-memory `SQLite` database and
/// `migrations_mysql/` to a `MariaDB` container on port 3308, introspects
/// both, and fails on the first structural difference.
fn verify_migrations() -> Result<()> {
    tracing::info!("Starting schema parity verification");
    let mariadb = MariaDb::start("reelbase-verify-migrations", "reelbase_verify", 3308)?;

    tracing::info!("Applying SQLite migrations");
    let mut sqlite = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut sqlite)
        .wrap_err("Failed to enable foreign keys on SQLite")?;
    sqlite
        .run_pending_migrations(SQLITE_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply SQLite migrations: {e}"))?;

    tracing::info!("Applying MySQL migrations");
    let mut mysql =
        MysqlConnection::establish(&mariadb.url()).wrap_err("Failed to connect to MariaDB")?;
    mysql
        .run_pending_migrations(MYSQL_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply MySQL migrations: {e}"))?;

    let sqlite_schema = introspect_sqlite_schema(&mut sqlite)?;
    let mysql_schema = introspect_mysql_schema(&mut mysql, mariadb.database)?;
    compare_schemas(&sqlite_schema, &mysql_schema)?;

    tracing::info!("Schema parity verification passed");
    Ok(())
}

/// Backend-neutral view of a schema.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Table {
    /// Column name to (normalized type, nullable).
    columns: BTreeMap<String, (String, bool)>,
    primary_key: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_constraints: BTreeSet<Vec<String>>,
    /// Non-unique indexes, by column list.
    indexes: BTreeSet<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    column: String,
    references_table: String,
    references_column: String,
}

#[derive(QueryableByName)]
struct NameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct ColumnRow {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyRow {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexRow {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        origin: String,
    }

    tracing::info!("Introspecting SQLite schema");
    let mut schema = Schema::default();

    let tables: Vec<NameRow> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'table' \
         AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name",
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for NameRow { name: table_name } in tables {
        let mut table = Table::default();

        let columns: Vec<ColumnRow> =
            diesel::sql_query(format!("PRAGMA table_info({table_name})"))
                .load(conn)
                .wrap_err_with(|| format!("Failed to get columns for table {table_name}"))?;
        for column in columns {
            if column.pk > 0 {
                table.primary_key.insert(column.name.clone());
            }
            table.columns.insert(
                column.name,
                (normalize_sqlite_type(&column.r#type), column.notnull == 0),
            );
        }

        let foreign_keys: Vec<ForeignKeyRow> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({table_name})"))
                .load(conn)
                .wrap_err_with(|| format!("Failed to get foreign keys for table {table_name}"))?;
        table
            .foreign_keys
            .extend(foreign_keys.into_iter().map(|fk| ForeignKey {
                column: fk.from,
                references_table: fk.table,
                references_column: fk.to,
            }));

        let indexes: Vec<IndexRow> =
            diesel::sql_query(format!("PRAGMA index_list({table_name})"))
                .load(conn)
                .wrap_err_with(|| format!("Failed to get indexes for table {table_name}"))?;
        for index in indexes {
            // Primary-key autoindexes are covered by `primary_key`.
            if index.origin == "pk" {
                continue;
            }
            let columns: Vec<String> =
                diesel::sql_query(format!("PRAGMA index_info({})", index.name))
                    .load::<NameRow>(conn)
                    .wrap_err_with(|| format!("Failed to get index columns for {}", index.name))?
                    .into_iter()
                    .map(|row| row.name)
                    .collect();

            if index.origin == "u" {
                table.unique_constraints.insert(columns);
            } else {
                table.indexes.insert(columns);
            }
        }

        schema.tables.insert(table_name, table);
    }

    Ok(schema)
}

fn introspect_mysql_schema(conn: &mut MysqlConnection, database: &str) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct ColumnRow {
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        data_type: String,
        #[diesel(sql_type = Text)]
        is_nullable: String,
        #[diesel(sql_type = Text)]
        column_key: String,
    }

    #[derive(QueryableByName)]
    #[allow(clippy::struct_field_names)]
    struct ForeignKeyRow {
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        referenced_table_name: String,
        #[diesel(sql_type = Text)]
        referenced_column_name: String,
    }

    #[derive(QueryableByName)]
    struct IndexRow {
        #[diesel(sql_type = Text)]
        index_name: String,
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Integer)]
        non_unique: i32,
    }

    tracing::info!("Introspecting MySQL schema");
    let mut schema = Schema::default();

    let tables: Vec<NameRow> = diesel::sql_query(
        "SELECT table_name AS name FROM information_schema.tables \
         WHERE table_schema = ? AND table_name != '__diesel_schema_migrations' ORDER BY table_name",
    )
    .bind::<Text, _>(database)
    .load(conn)
    .wrap_err("Failed to query MySQL tables")?;

    for NameRow { name: table_name } in tables {
        let mut table = Table::default();

        let columns: Vec<ColumnRow> = diesel::sql_query(
            "SELECT column_name, data_type, is_nullable, column_key FROM information_schema.columns \
             WHERE table_schema = ? AND table_name = ? ORDER BY ordinal_position",
        )
        .bind::<Text, _>(database)
        .bind::<Text, _>(&table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to get columns for table {table_name}"))?;
        for column in columns {
            if column.column_key == "PRI" {
                table.primary_key.insert(column.column_name.clone());
            }
            table.columns.insert(
                column.column_name,
                (
                    normalize_mysql_type(&column.data_type),
                    column.is_nullable == "YES",
                ),
            );
        }

        let foreign_keys: Vec<ForeignKeyRow> = diesel::sql_query(
            "SELECT column_name, referenced_table_name, referenced_column_name \
             FROM information_schema.key_column_usage \
             WHERE table_schema = ? AND table_name = ? AND referenced_table_name IS NOT NULL",
        )
        .bind::<Text, _>(database)
        .bind::<Text, _>(&table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to get foreign keys for table {table_name}"))?;
        table
            .foreign_keys
            .extend(foreign_keys.into_iter().map(|fk| ForeignKey {
                column: fk.column_name,
                references_table: fk.referenced_table_name,
                references_column: fk.referenced_column_name,
            }));

        let index_rows: Vec<IndexRow> = diesel::sql_query(
            "SELECT index_name, column_name, non_unique FROM information_schema.statistics \
             WHERE table_schema = ? AND table_name = ? AND index_name != 'PRIMARY' \
             ORDER BY index_name, seq_in_index",
        )
        .bind::<Text, _>(database)
        .bind::<Text, _>(&table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to get indexes for table {table_name}"))?;

        let mut unique: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut plain: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for row in index_rows {
            let group = if row.non_unique == 0 {
                &mut unique
            } else {
                &mut plain
            };
            group.entry(row.index_name).or_default().push(row.column_name);
        }
        table.unique_constraints.extend(unique.into_values());
        table.indexes.extend(plain.into_values());

        schema.tables.insert(table_name, table);
    }

    Ok(schema)
}

fn normalize_sqlite_type(sqlite_type: &str) -> String {
    let upper = sqlite_type.to_uppercase();
    let normalized = if upper.contains("INT") {
        "integer"
    } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
        "real"
    } else if upper.contains("BLOB") {
        "blob"
    } else {
        "text"
    };
    normalized.to_string()
}

fn normalize_mysql_type(mysql_type: &str) -> String {
    let normalized = match mysql_type.to_uppercase().as_str() {
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => "integer",
        "DECIMAL" | "NUMERIC" | "FLOAT" | "DOUBLE" | "REAL" => "real",
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => "blob",
        _ => "text",
    };
    normalized.to_string()
}

/// Fails on the first difference between the two schemas.
///
/// `InnoDB` creates an index for a foreign-key column that no existing
/// index leads with, so `MySQL` may carry extra single-column indexes on
/// foreign-key columns.
fn compare_schemas(sqlite: &Schema, mysql: &Schema) -> Result<()> {
    let sqlite_tables: BTreeSet<&String> = sqlite.tables.keys().collect();
    let mysql_tables: BTreeSet<&String> = mysql.tables.keys().collect();
    if sqlite_tables != mysql_tables {
        return Err(eyre!(
            "Schema parity check FAILED: table mismatch\n  only in SQLite: {:?}\n  only in MySQL: {:?}",
            sqlite_tables.difference(&mysql_tables).collect::<Vec<_>>(),
            mysql_tables.difference(&sqlite_tables).collect::<Vec<_>>()
        ));
    }

    for (name, lite) in &sqlite.tables {
        let Some(my) = mysql.tables.get(name) else {
            continue;
        };

        ensure_same(name, "columns", &lite.columns, &my.columns)?;
        ensure_same(name, "primary key", &lite.primary_key, &my.primary_key)?;
        ensure_same(name, "foreign keys", &lite.foreign_keys, &my.foreign_keys)?;
        ensure_same(
            name,
            "unique constraints",
            &lite.unique_constraints,
            &my.unique_constraints,
        )?;

        let fk_columns: BTreeSet<&String> = my.foreign_keys.iter().map(|fk| &fk.column).collect();
        let mysql_indexes: BTreeSet<&Vec<String>> = my
            .indexes
            .iter()
            .filter(|columns| {
                lite.indexes.contains(*columns)
                    || !(columns.len() == 1 && fk_columns.contains(&&columns[0]))
            })
            .collect();
        let sqlite_indexes: BTreeSet<&Vec<String>> = lite.indexes.iter().collect();
        ensure_same(name, "indexes", &sqlite_indexes, &mysql_indexes)?;
    }

    Ok(())
}

fn ensure_same<T: PartialEq + std::fmt::Debug>(
    table: &str,
    what: &str,
    sqlite: &T,
    mysql: &T,
) -> Result<()> {
    if sqlite == mysql {
        return Ok(());
    }
    Err(eyre!(
        "Schema parity check FAILED: {what} differ in table '{table}'\n  SQLite: {sqlite:?}\n  MySQL: {mysql:?}"
    ))
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
