//! propscan: component metadata extraction for React/TypeScript source trees
//!
//! The pipeline runs in four stages:
//! 1. **Classify** - confidence-scored heuristics decide whether a file is a
//!    UI component at all ([`classify`]).
//! 2. **Extract** - a tree-sitter parser pulls typed prop schemas and doc
//!    comments; a regex cascade recovers what the parser misses
//!    ([`extract`]).
//! 3. **Merge** - the two extraction layers are reconciled under a
//!    provenance tag ([`extract::merge`]).
//! 4. **Aggregate** - records are deduplicated, sorted, and written to a
//!    write-once JSON document store ([`scan`]).

pub mod classify;
pub mod cli;
pub mod commands;
pub mod error;
pub mod extract;
pub mod lang;
pub mod scan;
pub mod schema;

pub use classify::{classify as classify_source, DetectionResult, SCORE_THRESHOLD};
pub use cli::{Cli, Commands, OutputFormat};
pub use error::{PropscanError, Result};
pub use extract::{extract_file, ComponentParser, ProjectDescriptor, TreeSitterParser};
pub use lang::Lang;
pub use scan::{ScanOptions, ScanOutcome};
pub use schema::{
    ComponentRecord, ComponentType, DocumentStore, ExtractionMethod, Feature, PropSpec,
    RunSummary, STORE_VERSION,
};
