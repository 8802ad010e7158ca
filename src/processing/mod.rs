//! Classification and partitioning of records.
//!
//! - [`classify()`]: evaluate an ordered rule list against one record, stopping at the first
//!   rule that holds
//! - [`partition()`]: split a record sequence into valid and invalid lists in one pass
//! - [`FilterStream`]: lazy valid-record iterator that collects rejected records on the side
//!
//! ## Example: classify → partition
//!
//! ```rust
//! use clip_filter::processing::{partition, Classification, Classifier};
//! use clip_filter::types::Record;
//!
//! let clip = |id: &'static str, likes: &'static str| {
//!     Record::from_pairs([
//!         ("id", id),
//!         ("privacy", "anybody"),
//!         ("total_likes", likes),
//!         ("total_plays", "500"),
//!         ("title", "short"),
//!     ])
//! };
//!
//! let classifier = Classifier::clips();
//! assert_eq!(classifier.classify(&clip("1", "50")).unwrap(), Classification::Valid);
//! assert_eq!(classifier.classify(&clip("2", "3")).unwrap(), Classification::Invalid);
//!
//! let p = partition(vec![clip("1", "50"), clip("2", "3")], &classifier).unwrap();
//! assert_eq!(p.valid.len(), 1);
//! assert_eq!(p.invalid[0].id().unwrap(), "2");
//! ```

pub mod classify;
pub mod filter;

pub use classify::{Classification, Classifier, classify};
pub use filter::{FilterStream, Partition, partition};
