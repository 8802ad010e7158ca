//! Splitting a record sequence into valid and rejected records.
//!
//! Two forms are provided:
//!
//! - [`partition`]: one eager pass producing an explicit [`Partition`]. This is what the run
//!   pipeline uses.
//! - [`FilterStream`]: a lazy iterator over valid records that collects rejected records as a
//!   side effect. The rejected list is only complete once the stream is exhausted.

use crate::error::FilterResult;
use crate::types::Record;

use super::classify::{Classification, Classifier};

/// Valid and invalid records, each in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub valid: Vec<Record>,
    pub invalid: Vec<Record>,
}

impl Partition {
    /// Total number of records partitioned.
    pub fn len(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify every record once and split them, preserving order within each side.
///
/// The first classification error aborts the pass.
pub fn partition<I>(records: I, classifier: &Classifier) -> FilterResult<Partition>
where
    I: IntoIterator<Item = Record>,
{
    records
        .into_iter()
        .try_fold(Partition::default(), |mut acc, record| {
            match classifier.classify(&record)? {
                Classification::Valid => acc.valid.push(record),
                Classification::Invalid => acc.invalid.push(record),
            }
            Ok(acc)
        })
}

/// Forward-only iterator over the valid records of `inner`.
///
/// Each call to `next` classifies input records until a valid one is found; rejected records
/// met on the way are appended to [`FilterStream::rejected`]. After an error the stream yields
/// nothing more.
///
/// ```rust
/// use clip_filter::processing::{Classifier, FilterStream};
/// use clip_filter::types::Record;
///
/// let records = vec![
///     Record::from_pairs([("id", "1"), ("privacy", "anybody"), ("total_likes", "50"),
///                         ("total_plays", "500"), ("title", "ok")]),
///     Record::from_pairs([("id", "2"), ("privacy", "friends"), ("total_likes", "50"),
///                         ("total_plays", "500"), ("title", "ok")]),
/// ];
/// let classifier = Classifier::clips();
/// let mut stream = FilterStream::new(records, &classifier);
///
/// let valid: Vec<Record> = stream.by_ref().collect::<Result<_, _>>().unwrap();
/// assert_eq!(valid.len(), 1);
/// assert!(stream.is_exhausted());
/// assert_eq!(stream.rejected()[0].id().unwrap(), "2");
/// ```
pub struct FilterStream<'c, I> {
    inner: I,
    classifier: &'c Classifier,
    rejected: Vec<Record>,
    exhausted: bool,
    failed: bool,
}

impl<'c, I> FilterStream<'c, I>
where
    I: Iterator<Item = Record>,
{
    pub fn new<T>(records: T, classifier: &'c Classifier) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            inner: records.into_iter(),
            classifier,
            rejected: Vec::new(),
            exhausted: false,
            failed: false,
        }
    }

    /// Rejected records seen so far. Partial until [`Self::is_exhausted`] returns `true`.
    pub fn rejected(&self) -> &[Record] {
        &self.rejected
    }

    /// Consume the stream and return the rejected records seen so far.
    pub fn into_rejected(self) -> Vec<Record> {
        self.rejected
    }

    /// Whether the underlying sequence has been fully traversed without error.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl<I> Iterator for FilterStream<'_, I>
where
    I: Iterator<Item = Record>,
{
    type Item = FilterResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.exhausted {
            return None;
        }
        loop {
            let Some(record) = self.inner.next() else {
                self.exhausted = true;
                return None;
            };
            match self.classifier.classify(&record) {
                Ok(Classification::Valid) => return Some(Ok(record)),
                Ok(Classification::Invalid) => self.rejected.push(record),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
