//! Deterministic finite automaton definition and evaluation.
//!
//! An automaton is built once from its five components and is read-only
//! afterwards. Construction never fails: dangling labels (an initial state
//! that is not declared, transition targets outside the state set, ...) are
//! only discovered when a query walks over them. See [`crate::lint`] for an
//! up-front report of such issues.
//!
//! ```
//! use afdsim_core::{Automaton, State, Symbol, TransitionSpec};
//!
//! let afd = Automaton::new(
//!     ["par", "impar"],
//!     ["a", "b"],
//!     "par",
//!     ["par"],
//!     TransitionSpec::from_triples([
//!         ("par", "a", "impar"),
//!         ("par", "b", "par"),
//!         ("impar", "a", "par"),
//!         ("impar", "b", "impar"),
//!     ]),
//! );
//!
//! assert!(afd.accepted(&State::from("par"), &Symbol::chars("aab"), None));
//! ```

use crate::error::CoreError;
use crate::label::{State, Symbol};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered set of states, in declaration order.
pub type StateSet = IndexSet<State>;

/// Ordered set of symbols, in declaration order.
pub type Alphabet = IndexSet<Symbol>;

/// Partial transition function, indexed by source state then symbol.
type TransitionTable = IndexMap<State, IndexMap<Symbol, State>>;

/// Transition function as supplied by a caller.
///
/// Both shapes normalize to the same partial mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionSpec {
    /// Explicit mapping keyed by `(state, symbol)`.
    Map(IndexMap<(State, Symbol), State>),
    /// Ordered `(from, symbol, to)` triples. A later triple for an already
    /// seen `(from, symbol)` pair replaces the earlier one.
    Triples(Vec<(State, Symbol, State)>),
}

impl TransitionSpec {
    /// Builds the triple form from anything label-like.
    pub fn from_triples<I, F, A, T>(triples: I) -> Self
    where
        I: IntoIterator<Item = (F, A, T)>,
        F: Into<State>,
        A: Into<Symbol>,
        T: Into<State>,
    {
        Self::Triples(
            triples
                .into_iter()
                .map(|(from, symbol, to)| (from.into(), symbol.into(), to.into()))
                .collect(),
        )
    }

    /// Builds the pair-keyed form from anything label-like.
    pub fn from_pairs<I, F, A, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = ((F, A), T)>,
        F: Into<State>,
        A: Into<Symbol>,
        T: Into<State>,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|((from, symbol), to)| ((from.into(), symbol.into()), to.into()))
                .collect(),
        )
    }

    fn into_table(self) -> TransitionTable {
        let mut table = TransitionTable::new();
        match self {
            TransitionSpec::Map(map) => {
                for ((from, symbol), to) in map {
                    table.entry(from).or_default().insert(symbol, to);
                }
            }
            TransitionSpec::Triples(triples) => {
                for (from, symbol, to) in triples {
                    table.entry(from).or_default().insert(symbol, to);
                }
            }
        }
        table
    }
}

impl From<Vec<(State, Symbol, State)>> for TransitionSpec {
    fn from(triples: Vec<(State, Symbol, State)>) -> Self {
        Self::Triples(triples)
    }
}

impl From<IndexMap<(State, Symbol), State>> for TransitionSpec {
    fn from(map: IndexMap<(State, Symbol), State>) -> Self {
        Self::Map(map)
    }
}

/// One step of a derivation: `δ(from, symbol) = to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub from: State,
    pub symbol: Symbol,
    pub to: State,
}

impl Step {
    pub fn new(from: impl Into<State>, symbol: impl Into<Symbol>, to: impl Into<State>) -> Self {
        Self {
            from: from.into(),
            symbol: symbol.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.from, self.symbol, self.to)
    }
}

/// Full result of walking a word: trace, final state and verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub steps: Vec<Step>,
    pub final_state: State,
    pub accepted: bool,
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", step)?;
        }
        let verdict = if self.accepted { "accepted" } else { "rejected" };
        write!(f, "] -> {} ({})", self.final_state, verdict)
    }
}

/// A deterministic finite automaton.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Automaton {
    states: StateSet,
    alphabet: Alphabet,
    initial_state: State,
    accepting_states: StateSet,
    transitions: TransitionTable,
}

impl Automaton {
    /// Creates an automaton from its five components.
    ///
    /// Duplicate labels collapse into one. Nothing is validated here.
    pub fn new<Q, S, F>(
        states: Q,
        alphabet: S,
        initial_state: impl Into<State>,
        accepting_states: F,
        transitions: impl Into<TransitionSpec>,
    ) -> Self
    where
        Q: IntoIterator,
        Q::Item: Into<State>,
        S: IntoIterator,
        S::Item: Into<Symbol>,
        F: IntoIterator,
        F::Item: Into<State>,
    {
        Self {
            states: states.into_iter().map(Into::into).collect(),
            alphabet: alphabet.into_iter().map(Into::into).collect(),
            initial_state: initial_state.into(),
            accepting_states: accepting_states.into_iter().map(Into::into).collect(),
            transitions: transitions.into().into_table(),
        }
    }

    /// Returns the declared states.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// Returns the declared alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the initial state label, declared or not.
    pub fn initial_state(&self) -> &State {
        &self.initial_state
    }

    /// Returns the initial state if it is a declared state.
    pub fn initial_state_checked(&self) -> Result<&State, CoreError> {
        if self.states.contains(&self.initial_state) {
            Ok(&self.initial_state)
        } else {
            Err(CoreError::UnknownInitialState {
                state: self.initial_state.0.clone(),
            })
        }
    }

    /// Returns the accepting states.
    pub fn accepting_states(&self) -> &StateSet {
        &self.accepting_states
    }

    /// Returns true if `state` is one of the automaton's own accepting states.
    pub fn is_accepting(&self, state: &State) -> bool {
        self.accepting_states.contains(state)
    }

    /// Iterates over all transitions as `(from, symbol, to)` in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = (&State, &Symbol, &State)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(from, row)| row.iter().map(move |(symbol, to)| (from, symbol, to)))
    }

    /// Returns the number of defined transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(IndexMap::len).sum()
    }

    /// Single transition lookup. `None` means the pair has no transition.
    pub fn step(&self, state: &State, symbol: &Symbol) -> Option<&State> {
        self.transitions.get(state)?.get(symbol)
    }

    /// Returns the state reached from `start` after consuming `symbols`.
    pub fn final_state<'a>(
        &'a self,
        start: &'a State,
        symbols: &[Symbol],
    ) -> Result<&'a State, CoreError> {
        self.walk(start, symbols, |_, _, _| {})
    }

    /// Returns every step taken from `start` while consuming `symbols`.
    ///
    /// On error no partial trace is returned.
    pub fn derivation(&self, start: &State, symbols: &[Symbol]) -> Result<Vec<Step>, CoreError> {
        let mut steps = Vec::with_capacity(symbols.len());
        self.walk(start, symbols, |from, symbol, to| {
            steps.push(Step::new(from.clone(), symbol.clone(), to.clone()));
        })?;
        Ok(steps)
    }

    /// Returns whether `symbols` leads from `start` to an accepting state.
    ///
    /// `accepting` replaces the automaton's accepting set for this query
    /// only. Any evaluation error counts as rejection.
    pub fn accepted(
        &self,
        start: &State,
        symbols: &[Symbol],
        accepting: Option<&StateSet>,
    ) -> bool {
        let accepting = accepting.unwrap_or(&self.accepting_states);
        match self.final_state(start, symbols) {
            Ok(state) => accepting.contains(state),
            Err(e) => {
                tracing::debug!("word rejected from '{}': {}", start, e);
                false
            }
        }
    }

    /// Walks `symbols` once and returns trace, final state and verdict.
    pub fn evaluate(
        &self,
        start: &State,
        symbols: &[Symbol],
        accepting: Option<&StateSet>,
    ) -> Result<Run, CoreError> {
        let steps = self.derivation(start, symbols)?;
        let final_state = steps.last().map_or_else(|| start.clone(), |s| s.to.clone());
        let accepted = accepting
            .unwrap_or(&self.accepting_states)
            .contains(&final_state);
        Ok(Run {
            steps,
            final_state,
            accepted,
        })
    }

    /// Like [`Automaton::final_state`], starting from the declared initial state.
    pub fn final_state_from_initial(&self, symbols: &[Symbol]) -> Result<&State, CoreError> {
        self.final_state(self.initial_state_checked()?, symbols)
    }

    /// Like [`Automaton::derivation`], starting from the declared initial state.
    pub fn derivation_from_initial(&self, symbols: &[Symbol]) -> Result<Vec<Step>, CoreError> {
        self.derivation(self.initial_state_checked()?, symbols)
    }

    /// Like [`Automaton::evaluate`], starting from the declared initial state.
    pub fn evaluate_from_initial(
        &self,
        symbols: &[Symbol],
        accepting: Option<&StateSet>,
    ) -> Result<Run, CoreError> {
        self.evaluate(self.initial_state_checked()?, symbols, accepting)
    }

    /// Returns whether the automaton accepts `symbols` from its initial state.
    pub fn accepts(&self, symbols: &[Symbol]) -> bool {
        match self.initial_state_checked() {
            Ok(initial) => self.accepted(initial, symbols, None),
            Err(_) => false,
        }
    }

    fn walk<'a>(
        &'a self,
        start: &'a State,
        symbols: &[Symbol],
        mut on_step: impl FnMut(&'a State, &Symbol, &'a State),
    ) -> Result<&'a State, CoreError> {
        let mut current = start;
        for (position, symbol) in symbols.iter().enumerate() {
            // Alphabet membership is checked before the table, even if the
            // raw table happens to map this symbol.
            if !self.alphabet.contains(symbol) {
                return Err(CoreError::SymbolNotInAlphabet {
                    symbol: symbol.0.clone(),
                    position,
                });
            }
            let next =
                self.step(current, symbol)
                    .ok_or_else(|| CoreError::UndefinedTransition {
                        state: current.0.clone(),
                        symbol: symbol.0.clone(),
                        position,
                    })?;
            tracing::trace!("δ({}, {}) = {}", current, symbol, next);
            on_step(current, symbol, next);
            current = next;
        }
        Ok(current)
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AFD:")?;
        writeln!(f, "  States (Q): {}", braced(self.states.iter()))?;
        writeln!(f, "  Alphabet (Σ): {}", braced(self.alphabet.iter()))?;
        writeln!(f, "  Initial state (q0): {}", self.initial_state)?;
        writeln!(
            f,
            "  Accepting states (F): {}",
            braced(self.accepting_states.iter())
        )?;
        write!(f, "  Transitions (δ):")?;
        if self.transitions.is_empty() {
            write!(f, " none")?;
        }
        for (from, symbol, to) in self.transitions() {
            write!(f, "\n    δ({}, {}) = {}", from, symbol, to)?;
        }
        Ok(())
    }
}

fn braced<T: fmt::Display>(items: impl Iterator<Item = T>) -> String {
    let inner: Vec<String> = items.map(|i| i.to_string()).collect();
    format!("{{{}}}", inner.join(", "))
}

/// Incremental construction, for callers that collect components one at a
/// time.
#[derive(Debug, Clone)]
pub struct AutomatonBuilder {
    states: StateSet,
    alphabet: Alphabet,
    initial_state: State,
    accepting_states: StateSet,
    transitions: TransitionTable,
}

impl AutomatonBuilder {
    pub fn new(initial_state: impl Into<State>) -> Self {
        Self {
            states: StateSet::new(),
            alphabet: Alphabet::new(),
            initial_state: initial_state.into(),
            accepting_states: StateSet::new(),
            transitions: TransitionTable::new(),
        }
    }

    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<State>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn symbols<I>(mut self, symbols: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        self.alphabet.extend(symbols.into_iter().map(Into::into));
        self
    }

    pub fn accepting(mut self, state: impl Into<State>) -> Self {
        self.accepting_states.insert(state.into());
        self
    }

    /// Adds a transition and returns the target it replaced, if any.
    pub fn add_transition(
        &mut self,
        from: impl Into<State>,
        symbol: impl Into<Symbol>,
        to: impl Into<State>,
    ) -> Option<State> {
        self.transitions
            .entry(from.into())
            .or_default()
            .insert(symbol.into(), to.into())
    }

    /// Returns true if `(from, symbol)` already has a transition.
    pub fn has_transition(&self, from: &State, symbol: &Symbol) -> bool {
        self.transitions
            .get(from)
            .is_some_and(|row| row.contains_key(symbol))
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(IndexMap::len).sum()
    }

    pub fn build(self) -> Automaton {
        Automaton {
            states: self.states,
            alphabet: self.alphabet,
            initial_state: self.initial_state,
            accepting_states: self.accepting_states,
            transitions: self.transitions,
        }
    }
}
