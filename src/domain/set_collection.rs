// Set collection: labeled sets over a shared universe of elements

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Errors raised while validating caller input, before anything is encoded
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("Set collection must contain at least one set")]
    EmptyCollection,

    #[error("Duplicate set label: {0}")]
    DuplicateLabel(Scalar),

    #[error("Set labels mix integers and strings")]
    MixedLabelTypes,

    #[error("Set elements mix integers and strings")]
    MixedElementTypes,

    #[error("Unsupported value {0}: labels and elements must be integers or strings")]
    UnsupportedValue(String),

    #[error("Budget k must be non-negative, got {0}")]
    NegativeBudget(i64),

    #[error("Variant '{0}' requires an explicit budget k")]
    MissingBudget(String),

    #[error("Unknown variant '{0}', expected one of: strict, relaxed, transpose")]
    UnknownVariant(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

/// Scalar used for both set labels and elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Str(String),
}

/// Which scalar type a collection uses for its labels or elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Int,
    Str,
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Str(_) => ScalarKind::Str,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Str(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v.into())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

/// A non-empty collection of uniquely labeled sets.
///
/// Sets keep their insertion order and so does the universe (order of first
/// appearance), which fixes the column and row order of every encoding.
#[derive(Debug, Clone)]
pub struct SetCollection {
    labels: Vec<Scalar>,
    sets: Vec<IndexSet<Scalar>>,
    universe: IndexSet<Scalar>,
    /// For each universe element, indices of the sets containing it
    covering: Vec<Vec<usize>>,
    element_kind: Option<ScalarKind>,
}

impl SetCollection {
    pub fn new<I, L, S, E>(entries: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (L, S)>,
        L: Into<Scalar>,
        S: IntoIterator<Item = E>,
        E: Into<Scalar>,
    {
        let mut seen_labels: IndexSet<Scalar> = IndexSet::new();
        let mut sets = Vec::new();
        let mut label_kind: Option<ScalarKind> = None;
        let mut element_kind: Option<ScalarKind> = None;

        for (label, members) in entries {
            let label = label.into();
            match label_kind {
                None => label_kind = Some(label.kind()),
                Some(kind) if kind != label.kind() => return Err(InputError::MixedLabelTypes),
                Some(_) => {}
            }
            if seen_labels.contains(&label) {
                return Err(InputError::DuplicateLabel(label));
            }

            let mut set = IndexSet::new();
            for element in members {
                let element = element.into();
                match element_kind {
                    None => element_kind = Some(element.kind()),
                    Some(kind) if kind != element.kind() => {
                        return Err(InputError::MixedElementTypes)
                    }
                    Some(_) => {}
                }
                set.insert(element);
            }

            seen_labels.insert(label);
            sets.push(set);
        }

        if sets.is_empty() {
            return Err(InputError::EmptyCollection);
        }

        let mut universe: IndexSet<Scalar> = IndexSet::new();
        for set in &sets {
            universe.extend(set.iter().cloned());
        }

        let mut covering = vec![Vec::new(); universe.len()];
        for (set_idx, set) in sets.iter().enumerate() {
            for element in set {
                if let Some(elem_idx) = universe.get_index_of(element) {
                    covering[elem_idx].push(set_idx);
                }
            }
        }

        Ok(Self {
            labels: seen_labels.into_iter().collect(),
            sets,
            universe,
            covering,
            element_kind,
        })
    }

    pub fn labels(&self) -> &[Scalar] {
        &self.labels
    }

    pub fn set(&self, set_idx: usize) -> &IndexSet<Scalar> {
        &self.sets[set_idx]
    }

    pub fn universe(&self) -> &IndexSet<Scalar> {
        &self.universe
    }

    /// Number of sets (never zero)
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    pub fn num_elements(&self) -> usize {
        self.universe.len()
    }

    /// Indices of the sets containing the `elem_idx`-th universe element
    pub fn covering_sets(&self, elem_idx: usize) -> &[usize] {
        &self.covering[elem_idx]
    }

    /// Element type, or `None` when every set is empty
    pub fn element_kind(&self) -> Option<ScalarKind> {
        self.element_kind
    }

    /// Universe elements not contained in any of the given sets, in universe order
    pub fn uncovered_by(&self, set_indices: &[usize]) -> Vec<Scalar> {
        (0..self.universe.len())
            .filter(|&elem_idx| {
                !self.covering[elem_idx]
                    .iter()
                    .any(|set_idx| set_indices.contains(set_idx))
            })
            .filter_map(|elem_idx| self.universe.get_index(elem_idx).cloned())
            .collect()
    }
}
