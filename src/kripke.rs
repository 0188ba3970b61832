//! Labeled transition systems with identity-based states.
//!
//! A [`Kripke`] structure is an immutable value: a set of [`State`]s, a
//! subset marked initial, an ordered label sequence per state, and a list of
//! directed [`Edge`]s. Every operation that looks mutating (`add_labels`,
//! `add_edge`, `join`) returns a new structure and leaves the receiver
//! untouched, so shared references can be read from several threads without
//! synchronization.
//!
//! States are pure identities with no payload. Equality is identity
//! equality: two independently created states are never equal, and an
//! identity is never reused or reconstructible from external input. This is
//! what lets [`Kripke::join`] detect aliasing between its operands and keep
//! the result's state set genuinely disjoint.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use thiserror::Error;

/// Error for operations handed a state that is not a member of the
/// structure. Indicates a foreign or stale [`State`] reference, i.e. a
/// caller bug; never silently ignored.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum KripkeError {
    #[error("state {0} is not a member of the Kripke structure")]
    ForeignState(State),
}

static NEXT_STATE_ID: AtomicU64 = AtomicU64::new(0);

/// An opaque, globally unique state identity.
///
/// # Invariants
///
/// - Identities are drawn from a process-wide monotone counter and are
///   never reused.
/// - Equality and hashing are identity-based; a `State` carries no payload.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct State(u64);

impl State {
    /// Allocates a fresh identity, distinct from every other `State` ever
    /// created in this process.
    pub fn fresh() -> Self {
        State(NEXT_STATE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A directed edge between two states.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Edge {
    source: State,
    target: State,
}

impl Edge {
    pub fn new(source: State, target: State) -> Self {
        Self { source, target }
    }

    pub fn source(&self) -> State {
        self.source
    }

    pub fn target(&self) -> State {
        self.target
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// An immutable labeled transition system.
///
/// # Invariants
///
/// - `initial` and `labels` are total over `states` (absent entries are
///   normalized to `false` / empty at construction).
/// - Every edge's endpoints are members of `states`.
/// - `states` keeps a stable enumeration order for reproducible output.
#[derive(Debug, Clone)]
pub struct Kripke<L> {
    pub(crate) states: Vec<State>,
    pub(crate) initial: HashMap<State, bool>,
    pub(crate) labels: HashMap<State, Vec<L>>,
    pub(crate) edges: Vec<Edge>,
}

impl<L: Clone> Kripke<L> {
    /// Creates a structure from its parts, totalizing `initial` and
    /// `labels` over `states`.
    ///
    /// # Panics
    ///
    /// Panics if an edge endpoint is not a member of `states`.
    pub fn new(
        states: Vec<State>,
        initial: HashMap<State, bool>,
        labels: HashMap<State, Vec<L>>,
        edges: Vec<Edge>,
    ) -> Self {
        let members: HashSet<State> = states.iter().copied().collect();
        for edge in &edges {
            assert!(
                members.contains(&edge.source) && members.contains(&edge.target),
                "Edge {} endpoints must be members of the state set",
                edge
            );
        }

        let initial = states
            .iter()
            .map(|&s| (s, initial.get(&s).copied().unwrap_or(false)))
            .collect();
        let labels = states
            .iter()
            .map(|&s| (s, labels.get(&s).cloned().unwrap_or_default()))
            .collect();

        Self {
            states,
            initial,
            labels,
            edges,
        }
    }

    /// A structure with a single fresh initial state carrying exactly
    /// `labels`, and no edges.
    pub fn singleton(labels: Vec<L>) -> Self {
        let state = State::fresh();
        Self {
            states: vec![state],
            initial: HashMap::from([(state, true)]),
            labels: HashMap::from([(state, labels)]),
            edges: Vec::new(),
        }
    }

    /// All states, in stable enumeration order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// The states marked initial, in enumeration order.
    pub fn initial_states(&self) -> Vec<State> {
        self.states
            .iter()
            .copied()
            .filter(|s| self.initial[s])
            .collect()
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Whether `state` is a member of this structure.
    pub fn contains(&self, state: State) -> bool {
        self.initial.contains_key(&state)
    }

    /// The label sequence of a member state.
    pub fn labels_for(&self, state: State) -> Result<&[L], KripkeError> {
        self.labels
            .get(&state)
            .map(Vec::as_slice)
            .ok_or(KripkeError::ForeignState(state))
    }

    /// The direct successors of a member state, plus the state itself
    /// (self-reachability by definition; no transitive closure).
    pub fn states_from(&self, state: State) -> Result<Vec<State>, KripkeError> {
        if !self.contains(state) {
            return Err(KripkeError::ForeignState(state));
        }

        let mut reachable: Vec<State> = self
            .edges
            .iter()
            .filter(|edge| edge.source == state)
            .map(|edge| edge.target)
            .collect();
        reachable.push(state);
        Ok(reachable)
    }

    /// Returns a new structure with `labels` appended to every state's
    /// label sequence (existing labels first). States, initial flags, and
    /// edges are unchanged.
    pub fn add_labels(&self, labels: &[L]) -> Self {
        let labels = self
            .states
            .iter()
            .map(|&s| {
                let mut extended = self.labels[&s].clone();
                extended.extend_from_slice(labels);
                (s, extended)
            })
            .collect();

        Self {
            states: self.states.clone(),
            initial: self.initial.clone(),
            labels,
            edges: self.edges.clone(),
        }
    }

    /// Returns a new structure with one additional directed edge. Both
    /// endpoints must be members.
    pub fn add_edge(&self, source: State, target: State) -> Result<Self, KripkeError> {
        if !self.contains(source) {
            return Err(KripkeError::ForeignState(source));
        }
        if !self.contains(target) {
            return Err(KripkeError::ForeignState(target));
        }

        let mut edges = self.edges.clone();
        edges.push(Edge::new(source, target));
        Ok(Self {
            states: self.states.clone(),
            initial: self.initial.clone(),
            labels: self.labels.clone(),
            edges,
        })
    }

    /// Composes two structures into one over the disjoint union of their
    /// state sets.
    ///
    /// The receiver's states survive by identity, untouched. Any state of
    /// `other` whose identity collides with a receiver state is renamed to
    /// a fresh identity, and `other`'s initial flags, labels, and edges are
    /// rewritten through that renaming, so the operands never alias states
    /// in the result (a self-join renames every state).
    ///
    /// After renaming, the two state sets are fully cross-connected: for
    /// every receiver state `s1` and (renamed) other state `s2`, both
    /// `s1 -> s2` and `s2 -> s1` are added on top of both operands' own
    /// edges. Either branch's exit states can therefore transition into
    /// either branch's entry states.
    ///
    /// The result has `|self| + |other|` states and
    /// `|self.edges| + |other.edges| + 2 * |self| * |other|` edges.
    pub fn join(&self, other: &Self) -> Self {
        let renamed = other.replace_duplicates(&self.states);

        let cross = 2 * self.states.len() * renamed.states.len();
        let mut edges = Vec::with_capacity(renamed.edges.len() + self.edges.len() + cross);
        edges.extend(renamed.edges.iter().copied());
        edges.extend(self.edges.iter().copied());
        for &s1 in &self.states {
            for &s2 in &renamed.states {
                edges.push(Edge::new(s1, s2));
                edges.push(Edge::new(s2, s1));
            }
        }

        let mut states = renamed.states;
        states.extend(self.states.iter().copied());
        let mut initial = renamed.initial;
        initial.extend(self.initial.iter().map(|(&s, &flag)| (s, flag)));
        let mut labels = renamed.labels;
        labels.extend(self.labels.iter().map(|(&s, ls)| (s, ls.clone())));

        Self {
            states,
            initial,
            labels,
            edges,
        }
    }

    /// Rewrites this structure so that none of its states collide with
    /// `taken`, allocating fresh identities for the collisions.
    fn replace_duplicates(&self, taken: &[State]) -> Self {
        let taken: HashSet<State> = taken.iter().copied().collect();
        let mut renaming: HashMap<State, State> = HashMap::new();

        for &state in &self.states {
            if taken.contains(&state) {
                let fresh = State::fresh();
                debug!("join: renaming colliding state {} to {}", state, fresh);
                renaming.insert(state, fresh);
            }
        }

        let rename = |state: State| renaming.get(&state).copied().unwrap_or(state);

        let states = self.states.iter().map(|&s| rename(s)).collect();
        let initial = self
            .states
            .iter()
            .map(|&s| (rename(s), self.initial[&s]))
            .collect();
        let labels = self
            .states
            .iter()
            .map(|&s| (rename(s), self.labels[&s].clone()))
            .collect();
        let edges = self
            .edges
            .iter()
            .map(|edge| Edge::new(rename(edge.source), rename(edge.target)))
            .collect();

        Self {
            states,
            initial,
            labels,
            edges,
        }
    }
}
