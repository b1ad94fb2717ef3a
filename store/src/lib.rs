//! Question persistence for the interview generator.
//!
//! ## Backends
//!
//! [`QuestionStore`] is the single contract every front end depends on. Two
//! backends implement it:
//!
//! | Type | Engine | Duplicate (skill, text) |
//! |------|--------|-------------------------|
//! | [`SqliteStore`] | embedded single file | accepted as a new row |
//! | [`PostgresStore`] | client/server | skipped via `ON CONFLICT DO NOTHING` |
//!
//! [`AnyStore`] picks one of the two at construction time from an
//! [`AppConfig`], so binaries never branch on the backend kind themselves.
//!
//! Every operation opens its own connection, runs its statements, and closes
//! the connection again. There is no pool and no cached state between calls.
//!
//! ## Migration
//!
//! [`generate_migration`] reads a SQLite file directly and writes a script of
//! `INSERT ... ON CONFLICT DO NOTHING` statements that recreates its rows in
//! the PostgreSQL schema.

pub mod any;
pub mod config;
pub mod error;
pub mod migration;
pub mod model;
pub mod postgres;
pub(crate) mod sql;
pub mod sqlite;
pub mod traits;

pub use any::AnyStore;
pub use config::{AppConfig, BackendKind, PostgresConfig};
pub use error::StoreError;
pub use migration::{generate_migration, source_statistics, MigrationReport, SourceStatistics};
pub use model::{
    NewQuestion, OverallStatistics, Question, QuestionPatch, SearchHit, SkillCount,
    SkillStatistics, StoreSummary, DEFAULT_CATEGORY, DEFAULT_KIND, DEFAULT_LEVEL, LEVELS,
};
pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;
pub use traits::QuestionStore;
