//! The interview question catalog and everything built directly on it:
//! seeding a store, importing and exporting catalog documents, and turning
//! a selection of skills into a rendered question set.

mod catalog;
mod data;
mod error;
pub mod question_set;
pub mod seed;

pub use catalog::{
    classify, document_questions, parse_document, Catalog, CatalogDocument, CatalogStatistics, DocumentMetadata,
    LevelMap, SkillBreakdown, SkillMap, ValidationReport,
};
pub use error::CatalogError;
pub use question_set::{
    fallback_questions, generate_question_set, render, set_statistics, ExportFormat, QuestionSet,
    RenderedExport, SetStatistics,
};
pub use seed::{import_questions, load_initial, LoadReport};
