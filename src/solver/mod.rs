//! Binary subset optimization.
//!
//! The resource selector needs one capability: maximize a linear
//! objective over binary choices subject to a total-weight window and an
//! item-count window. That capability lives behind [`SubsetSolver`] so a
//! different solver can be swapped in without touching selection logic;
//! [`BranchAndBoundSolver`] is the bundled exact implementation.
//!
//! # Reference
//! Martello & Toth (1990), "Knapsack Problems", Ch. 2 (branch and bound)

/// One selectable item: its objective contribution and its weight.
#[derive(Debug, Clone, Copy)]
pub struct SubsetItem {
    /// Objective value gained by selecting the item (may be negative).
    pub value: f64,
    /// Weight consumed by the item (>= 0).
    pub weight: f64,
}

impl SubsetItem {
    /// Creates an item.
    pub fn new(value: f64, weight: f64) -> Self {
        Self { value, weight }
    }
}

/// Feasibility window for a subset.
#[derive(Debug, Clone, Copy)]
pub struct SubsetConstraints {
    /// Minimum total weight (inclusive).
    pub min_weight: f64,
    /// Maximum total weight (inclusive).
    pub max_weight: f64,
    /// Minimum number of items.
    pub min_items: usize,
    /// Maximum number of items.
    pub max_items: usize,
}

impl SubsetConstraints {
    /// Window around a target weight: `[target·(1−tolerance),
    /// target·(1+tolerance)]` with the given item-count bounds.
    pub fn around(target: f64, tolerance: f64, min_items: usize, max_items: usize) -> Self {
        Self {
            min_weight: target * (1.0 - tolerance),
            max_weight: target * (1.0 + tolerance),
            min_items,
            max_items,
        }
    }

    fn admits(&self, weight: f64, items: usize) -> bool {
        weight >= self.min_weight
            && weight <= self.max_weight
            && items >= self.min_items
            && items <= self.max_items
    }
}

/// Maximizes a linear objective over binary item choices.
///
/// Returns the selected item indices (best found first by exploration
/// order), or `None` when no feasible subset exists — callers fall back
/// to a greedy path in that case. Implementations may also return
/// `None` when an internal work budget is exhausted before any feasible
/// subset is found; timeouts around long solves are the caller's
/// concern.
pub trait SubsetSolver {
    fn solve(&self, items: &[SubsetItem], constraints: &SubsetConstraints) -> Option<Vec<usize>>;
}

/// Exact depth-first branch and bound.
///
/// Items are explored in descending value order; branches are pruned
/// when the running weight exceeds the window, the item count exceeds
/// its cap, or an optimistic bound (current value plus all remaining
/// positive values) cannot beat the incumbent.
#[derive(Debug, Clone)]
pub struct BranchAndBoundSolver {
    node_budget: usize,
}

impl BranchAndBoundSolver {
    /// Creates a solver with the default node budget.
    pub fn new() -> Self {
        Self {
            node_budget: 200_000,
        }
    }

    /// Caps the number of explored nodes; the best incumbent found
    /// within the budget is returned, `None` if none was found.
    pub fn with_node_budget(mut self, node_budget: usize) -> Self {
        self.node_budget = node_budget;
        self
    }
}

impl Default for BranchAndBoundSolver {
    fn default() -> Self {
        Self::new()
    }
}

struct Search<'a> {
    items: &'a [SubsetItem],
    order: Vec<usize>,
    // suffix_positive[k] = sum of positive values of order[k..]
    suffix_positive: Vec<f64>,
    constraints: &'a SubsetConstraints,
    nodes_left: usize,
    best_value: f64,
    best: Option<Vec<usize>>,
    chosen: Vec<usize>,
}

impl Search<'_> {
    fn run(&mut self, depth: usize, value: f64, weight: f64) {
        if self.nodes_left == 0 {
            return;
        }
        self.nodes_left -= 1;

        if self.constraints.admits(weight, self.chosen.len())
            && (self.best.is_none() || value > self.best_value)
        {
            self.best_value = value;
            self.best = Some(self.chosen.clone());
        }

        if depth == self.order.len() {
            return;
        }

        // Optimistic bound: everything positive downstream gets taken.
        if self.best.is_some() && value + self.suffix_positive[depth] <= self.best_value {
            return;
        }

        let idx = self.order[depth];
        let item = self.items[idx];

        // Include branch.
        if weight + item.weight <= self.constraints.max_weight
            && self.chosen.len() < self.constraints.max_items
        {
            self.chosen.push(idx);
            self.run(depth + 1, value + item.value, weight + item.weight);
            self.chosen.pop();
        }

        // Exclude branch.
        self.run(depth + 1, value, weight);
    }
}

impl SubsetSolver for BranchAndBoundSolver {
    fn solve(&self, items: &[SubsetItem], constraints: &SubsetConstraints) -> Option<Vec<usize>> {
        if items.is_empty() {
            return None;
        }

        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&a, &b| {
            items[b]
                .value
                .partial_cmp(&items[a].value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut suffix_positive = vec![0.0; order.len() + 1];
        for k in (0..order.len()).rev() {
            suffix_positive[k] = suffix_positive[k + 1] + items[order[k]].value.max(0.0);
        }

        let mut search = Search {
            items,
            order,
            suffix_positive,
            constraints,
            nodes_left: self.node_budget,
            best_value: f64::NEG_INFINITY,
            best: None,
            chosen: Vec::new(),
        };
        search.run(0, 0.0, 0.0);
        search.best
    }
}
