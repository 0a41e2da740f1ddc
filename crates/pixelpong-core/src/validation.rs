//! Color uniqueness validation
//!
//! Checks that every colored cell of a finished run received a distinct color.
//! Grids above [`SamplingPolicy::exhaustive_limit`] cells are checked on a
//! deterministic prefix of the snapshot (row-major order) instead of in full,
//! and the result says so through [`ApproximationNotice`].

use crate::data::{CellColor, Coord, GridConfig};
use crate::store::Snapshot;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Grid size above which only a prefix of the snapshot is validated
pub const DEFAULT_EXHAUSTIVE_LIMIT: u64 = 100_000;

/// Number of cells examined when sampling
pub const DEFAULT_SAMPLE_SIZE: usize = 10_000;

/// How much of a snapshot gets validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingPolicy {
    /// Grids with at most this many cells are validated exhaustively
    pub exhaustive_limit: u64,
    /// Prefix length examined for larger grids
    pub sample_size: usize,
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self {
            exhaustive_limit: DEFAULT_EXHAUSTIVE_LIMIT,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl SamplingPolicy {
    /// Whether a grid of this size is sampled rather than fully validated
    pub fn samples(&self, config: GridConfig) -> bool {
        config.cell_count() > self.exhaustive_limit
    }
}

/// Disclosure that a validation result only covers part of the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproximationNotice {
    /// Cells that were examined
    pub examined: usize,
    /// Cells present in the snapshot
    pub available: usize,
}

impl fmt::Display for ApproximationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sample of {}/{} pixels", self.examined, self.available)
    }
}

/// Outcome of a uniqueness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// True when no color appears twice among the examined cells
    pub is_valid: bool,
    /// Cells that were examined
    pub examined: usize,
    /// Cells present in the snapshot
    pub available: usize,
    /// Whether only a prefix was examined
    pub sampled: bool,
    /// Canonical strings of every color seen more than once
    pub duplicate_colors: BTreeSet<String>,
}

impl ValidationResult {
    /// Present when the result was computed on a sample
    pub fn approximation(&self) -> Option<ApproximationNotice> {
        self.sampled.then_some(ApproximationNotice {
            examined: self.examined,
            available: self.available,
        })
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            write!(f, "All pixels have unique colors")?;
        } else {
            write!(
                f,
                "Found {} duplicate colors",
                self.duplicate_colors.len()
            )?;
        }
        if let Some(notice) = self.approximation() {
            write!(f, " ({})", notice)?;
        }
        Ok(())
    }
}

/// Checks that colored cells carry pairwise distinct colors
#[derive(Debug, Clone, Copy, Default)]
pub struct UniquenessValidator {
    policy: SamplingPolicy,
}

impl UniquenessValidator {
    /// Create a validator with the given sampling policy
    pub fn new(policy: SamplingPolicy) -> Self {
        Self { policy }
    }

    /// The active sampling policy
    pub fn policy(&self) -> SamplingPolicy {
        self.policy
    }

    /// Validate `snapshot` taken from a grid of size `config`
    ///
    /// Groups examined cells by color in a single pass; any color bucket with
    /// more than one coordinate is reported once.
    pub fn validate(&self, snapshot: &Snapshot, config: GridConfig) -> ValidationResult {
        let available = snapshot.len();
        let sampled = self.policy.samples(config);
        let limit = if sampled {
            self.policy.sample_size.min(available)
        } else {
            available
        };

        let mut groups: HashMap<CellColor, Vec<Coord>> = HashMap::with_capacity(limit);
        for cell in snapshot.iter().take(limit) {
            groups.entry(cell.color).or_default().push(cell.coord());
        }

        let mut duplicate_colors = BTreeSet::new();
        for (color, coords) in &groups {
            if coords.len() > 1 {
                tracing::debug!(
                    "Color {} shared by {} cells, first at {}",
                    color,
                    coords.len(),
                    coords[0]
                );
                duplicate_colors.insert(color.canonical());
            }
        }

        if sampled {
            tracing::info!(
                "Validated sample of {}/{} pixels on {} grid",
                limit,
                available,
                config
            );
        }

        ValidationResult {
            is_valid: duplicate_colors.is_empty(),
            examined: limit,
            available,
            sampled,
            duplicate_colors,
        }
    }
}
