//! `clip-filter` reads a CSV export of media clips, classifies every record against an ordered
//! list of rejection rules, and writes the ids of valid and invalid clips to two CSV files.
//!
//! The primary entrypoint is [`pipeline::run_from_path`]. The pieces it is built from are
//! usable on their own:
//!
//! - [`rules::Rule`]: one predicate (`attribute operator operand`), evaluated with explicit
//!   coercion rules (see [`rules::compare`])
//! - [`rules::FieldAccessors`]: per-attribute value resolution, e.g. the clip `title` compares
//!   by its length
//! - [`processing::classify`]: first-match rule evaluation for one record
//! - [`processing::partition`]: split records into valid/invalid in one pass
//! - [`output::write_partition`]: write the two id-only outputs
//!
//! ## Built-in clip rules
//!
//! A clip is rejected if any of these hold:
//!
//! - `privacy` is not exactly `anybody`
//! - `total_likes` ≤ 10
//! - `total_plays` ≤ 200
//! - the `title` is 30 or more characters long
//!
//! ## Quick example
//!
//! ```rust
//! use clip_filter::pipeline::{run_on_reader, RunOptions};
//!
//! let input = "id,privacy,total_likes,total_plays,title\n\
//!              1,anybody,50,500,short\n\
//!              2,friends,50,500,short\n";
//! let mut valid = Vec::new();
//! let mut invalid = Vec::new();
//! let stats = run_on_reader(input.as_bytes(), &mut valid, &mut invalid, &RunOptions::default()).unwrap();
//!
//! assert_eq!((stats.valid, stats.invalid), (1, 1));
//! assert_eq!(String::from_utf8(valid).unwrap().lines().collect::<Vec<_>>(), vec!["id", "1"]);
//! assert_eq!(String::from_utf8(invalid).unwrap().lines().collect::<Vec<_>>(), vec!["id", "2"]);
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema, record and value types
//! - [`rules`]: rules, operators, comparison semantics, accessors, rule-list loading
//! - [`processing`]: classification and partitioning
//! - [`ingestion`]: input checks and CSV parsing
//! - [`output`]: output writing
//! - [`pipeline`]: run configuration and end-to-end entrypoints
//! - [`observability`]: run observers
//! - [`error`]: the crate error type

pub mod error;
pub mod ingestion;
pub mod observability;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod rules;
pub mod types;

pub use error::{FilterError, FilterResult};
