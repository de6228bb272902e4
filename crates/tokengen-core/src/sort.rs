//! Depth-first topological ordering of tokens.
//!
//! A key is marked `Visited` before its dependencies are explored. A key
//! that depends on an unknown or skipped key is itself skipped, and so is
//! everything that depends on it. Keys on a cycle see their ancestor as
//! already visited and stop there: every member of the cycle is emitted once,
//! in depth-first discovery order, and no error is raised.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::deps::DependencyGraph;
use crate::loader::{Token, TokenSet};

/// Per-key state for one sort invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    Pending,
    Visited,
    Skipped,
}

/// Why a key was left out of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The named dependency is not a known token.
    MissingDependency(String),
    /// The named dependency was itself skipped.
    SkippedDependency(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingDependency(dep) => write!(f, "unknown dependency `{dep}`"),
            SkipReason::SkippedDependency(dep) => write!(f, "dependency `{dep}` was skipped"),
        }
    }
}

/// Keys in dependency order plus the keys that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopoOrder {
    pub order: Vec<String>,
    pub skipped: Vec<(String, SkipReason)>,
}

/// Sorted tokens, borrowed from the [`TokenSet`] they came from.
#[derive(Debug, Clone)]
pub struct SortOutcome<'a> {
    pub ordered: Vec<&'a Token>,
    pub skipped: Vec<(String, SkipReason)>,
}

/// Order `tokens` so each follows every dependency it could resolve.
pub fn sort(tokens: &TokenSet) -> SortOutcome<'_> {
    let graph = DependencyGraph::build(tokens);
    let TopoOrder { order, skipped } = topological_order(&graph);
    let ordered = order.iter().filter_map(|key| tokens.get(key)).collect();
    SortOutcome { ordered, skipped }
}

/// Depth-first topological order over `graph`, visiting roots in graph order.
pub fn topological_order(graph: &DependencyGraph) -> TopoOrder {
    let mut sorter = Sorter {
        graph,
        state: graph.keys().map(|k| (k, VisitState::Pending)).collect(),
        order: Vec::with_capacity(graph.len()),
        skipped: Vec::new(),
    };

    for key in graph.keys() {
        if sorter.state.get(key) == Some(&VisitState::Pending) {
            sorter.visit(key);
        }
    }

    TopoOrder {
        order: sorter.order.into_iter().map(str::to_string).collect(),
        skipped: sorter.skipped,
    }
}

struct Sorter<'g> {
    graph: &'g DependencyGraph,
    state: HashMap<&'g str, VisitState>,
    order: Vec<&'g str>,
    skipped: Vec<(String, SkipReason)>,
}

impl<'g> Sorter<'g> {
    fn visit(&mut self, key: &'g str) {
        self.state.insert(key, VisitState::Visited);

        let graph = self.graph;
        for dep in graph.dependencies(key) {
            let dep = dep.as_str();
            match self.state.get(dep).copied() {
                None => {
                    self.skip(key, SkipReason::MissingDependency(dep.to_string()));
                    return;
                }
                Some(VisitState::Skipped) => {
                    self.skip(key, SkipReason::SkippedDependency(dep.to_string()));
                    return;
                }
                Some(VisitState::Pending) => {
                    self.visit(dep);
                    if self.state.get(dep) == Some(&VisitState::Skipped) {
                        self.skip(key, SkipReason::SkippedDependency(dep.to_string()));
                        return;
                    }
                }
                // On the current path (a cycle) or already emitted.
                Some(VisitState::Visited) => {}
            }
        }

        self.order.push(key);
    }

    fn skip(&mut self, key: &'g str, reason: SkipReason) {
        debug!(key, %reason, "skipping token");
        self.state.insert(key, VisitState::Skipped);
        self.skipped.push((key.to_string(), reason));
    }
}
