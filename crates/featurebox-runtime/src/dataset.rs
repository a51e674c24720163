//! Training set datasets
//!
//! A [`Dataset`] owns the materialized rows and a list of stages
//! (`repeat`, `shuffle`). Stages are only recorded when called and run
//! lazily each time the dataset is iterated, so every `iter()` starts from
//! the beginning and yields the same sequence.
//!
//! `repeat` replays the stages below it once per epoch. `shuffle` permutes
//! consecutive windows of as many positions as the dataset has rows, so it
//! never buffers more than one pass over the rows.

use crate::error::{Result, RuntimeError};
use featurebox_core::Value;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::ops::Range;
use std::sync::Arc;

/// One training example: feature values in declared order plus the label
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRow {
    features: Vec<Value>,
    label: Value,
}

impl TrainingRow {
    pub fn new(features: Vec<Value>, label: Value) -> Self {
        Self { features, label }
    }

    pub fn features(&self) -> &[Value] {
        &self.features
    }

    pub fn label(&self) -> &Value {
        &self.label
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Repeat(usize),
    Shuffle(u64),
}

/// Replayable sequence of training rows
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Arc<[TrainingRow]>,
    stages: Vec<Stage>,
}

impl Dataset {
    pub fn from_rows(rows: Vec<TrainingRow>) -> Self {
        Self {
            rows: rows.into(),
            stages: Vec::new(),
        }
    }

    /// Concatenate the sequence with itself `times` more times
    pub fn repeat(mut self, times: usize) -> Self {
        self.stages.push(Stage::Repeat(times));
        self
    }

    /// Permute the sequence. The same seed always gives the same order.
    pub fn shuffle(mut self, seed: u64) -> Self {
        self.stages.push(Stage::Shuffle(seed));
        self
    }

    /// Group the sequence into chunks of `size` rows; the last may be shorter
    pub fn batch(self, size: usize) -> Result<BatchedDataset> {
        if size == 0 {
            return Err(RuntimeError::InvalidBatchSize(size));
        }
        Ok(BatchedDataset {
            dataset: self,
            size,
        })
    }

    /// Number of rows one iteration yields, saturating at `usize::MAX`
    pub fn len(&self) -> usize {
        self.exact_len().unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> DatasetIter<'_> {
        DatasetIter {
            rows: &self.rows,
            cursor: Cursor::new(self.rows.len(), &self.stages),
            remaining: self.exact_len(),
        }
    }

    fn exact_len(&self) -> Option<usize> {
        self.stages
            .iter()
            .try_fold(self.rows.len(), |n, stage| match stage {
                Stage::Repeat(times) => times.checked_add(1).and_then(|t| n.checked_mul(t)),
                Stage::Shuffle(_) => Some(n),
            })
    }
}

/// Lazy row-index sequence for a stack of stages
#[derive(Debug)]
enum Cursor {
    Rows(Range<usize>),
    Repeat {
        rows: usize,
        below: Vec<Stage>,
        epochs_left: usize,
        yielded: bool,
        current: Box<Cursor>,
    },
    Shuffle {
        inner: Box<Cursor>,
        rng: StdRng,
        window: usize,
        buffer: std::vec::IntoIter<usize>,
    },
}

impl Cursor {
    fn new(rows: usize, stages: &[Stage]) -> Self {
        match stages.split_last() {
            None => Cursor::Rows(0..rows),
            Some((Stage::Repeat(times), below)) => Cursor::Repeat {
                rows,
                below: below.to_vec(),
                epochs_left: *times,
                yielded: false,
                current: Box::new(Cursor::new(rows, below)),
            },
            Some((Stage::Shuffle(seed), below)) => Cursor::Shuffle {
                inner: Box::new(Cursor::new(rows, below)),
                rng: StdRng::seed_from_u64(*seed),
                window: rows.max(1),
                buffer: Vec::new().into_iter(),
            },
        }
    }
}

impl Iterator for Cursor {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            Cursor::Rows(range) => range.next(),
            Cursor::Repeat {
                rows,
                below,
                epochs_left,
                yielded,
                current,
            } => loop {
                if let Some(i) = current.next() {
                    *yielded = true;
                    return Some(i);
                }
                // An empty epoch means every later one is empty too
                if *epochs_left == 0 || !*yielded {
                    return None;
                }
                *epochs_left -= 1;
                *yielded = false;
                **current = Cursor::new(*rows, below);
            },
            Cursor::Shuffle {
                inner,
                rng,
                window,
                buffer,
            } => {
                if let Some(i) = buffer.next() {
                    return Some(i);
                }
                let mut chunk: Vec<usize> = inner.by_ref().take(*window).collect();
                if chunk.is_empty() {
                    return None;
                }
                chunk.shuffle(rng);
                *buffer = chunk.into_iter();
                buffer.next()
            }
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a TrainingRow;
    type IntoIter = DatasetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a dataset's rows
#[derive(Debug)]
pub struct DatasetIter<'a> {
    rows: &'a [TrainingRow],
    cursor: Cursor,
    remaining: Option<usize>,
}

impl<'a> Iterator for DatasetIter<'a> {
    type Item = &'a TrainingRow;

    fn next(&mut self) -> Option<Self::Item> {
        let rows = self.rows;
        let i = self.cursor.next()?;
        if let Some(n) = self.remaining.as_mut() {
            *n = n.saturating_sub(1);
        }
        Some(&rows[i])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

/// A dataset yielding fixed-size batches
#[derive(Debug, Clone)]
pub struct BatchedDataset {
    dataset: Dataset,
    size: usize,
}

impl BatchedDataset {
    pub fn batch_size(&self) -> usize {
        self.size
    }

    /// Number of batches one iteration yields
    pub fn len(&self) -> usize {
        self.dataset.len().div_ceil(self.size)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> BatchIter<'_> {
        BatchIter {
            rows: self.dataset.iter(),
            size: self.size,
        }
    }
}

impl<'a> IntoIterator for &'a BatchedDataset {
    type Item = Batch<'a>;
    type IntoIter = BatchIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over batches
#[derive(Debug)]
pub struct BatchIter<'a> {
    rows: DatasetIter<'a>,
    size: usize,
}

impl<'a> Iterator for BatchIter<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rows: Vec<&'a TrainingRow> = self.rows.by_ref().take(self.size).collect();
        if rows.is_empty() {
            None
        } else {
            Some(Batch { rows })
        }
    }
}

/// A chunk of consecutive rows
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<'a> {
    rows: Vec<&'a TrainingRow>,
}

impl<'a> Batch<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[&'a TrainingRow] {
        &self.rows
    }

    pub fn features(&self) -> Vec<&'a [Value]> {
        self.rows.iter().map(|&row| row.features()).collect()
    }

    pub fn labels(&self) -> Vec<&'a Value> {
        self.rows.iter().map(|&row| row.label()).collect()
    }
}

impl<'b, 'a> IntoIterator for &'b Batch<'a> {
    type Item = &'a TrainingRow;
    type IntoIter = std::iter::Copied<std::slice::Iter<'b, &'a TrainingRow>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter().copied()
    }
}
