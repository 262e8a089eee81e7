//! Prerequisite graph and association map.
//!
//! Builds the run's dependency structures from raw relationship records:
//! a weighted digraph of prerequisites (edge `a → b` = learn `a` before
//! `b`) and a symmetric association-weight map used for module grouping.
//! Both are restricted to edges whose endpoints are in the run's skill
//! set; everything else in the dataset is noise for this run.
//!
//! Cycle breaking and ordering are pure: they return new structures and
//! never mutate shared state.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22
//! (strongly connected components, topological sort)

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

use crate::models::{RelationKind, RelationshipRecord};

/// An edge removed during cycle breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Weighted digraph of prerequisite relationships over skill keys.
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteGraph {
    graph: DiGraph<String, f64>,
    indices: HashMap<String, NodeIndex>,
}

impl PrerequisiteGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a prerequisite edge (source before target), inserting nodes
    /// as needed. Skill names are lowercased on insertion.
    pub fn add_edge(&mut self, source: &str, target: &str, weight: f64) {
        let s = self.node(&source.to_lowercase());
        let t = self.node(&target.to_lowercase());
        self.graph.add_edge(s, t, weight);
    }

    fn node(&mut self, key: &str) -> NodeIndex {
        if let Some(&idx) = self.indices.get(key) {
            return idx;
        }
        let idx = self.graph.add_node(key.to_string());
        self.indices.insert(key.to_string(), idx);
        idx
    }

    /// Whether the skill appears in the graph.
    pub fn contains(&self, skill: &str) -> bool {
        self.indices.contains_key(&skill.to_lowercase())
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Direct prerequisites of a skill (sources of incoming edges).
    pub fn prerequisites_of(&self, skill: &str) -> Vec<String> {
        let Some(&idx) = self.indices.get(&skill.to_lowercase()) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| self.graph[e.source()].clone())
            .collect()
    }

    /// Average weight of a skill's incoming edges (0 if it has none).
    ///
    /// Skills whose prerequisites are few and weak score low and are
    /// surfaced earlier in the study order.
    pub fn avg_incoming_weight(&self, skill: &str) -> f64 {
        let Some(&idx) = self.indices.get(&skill.to_lowercase()) else {
            return 0.0;
        };
        let weights: Vec<f64> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| *e.weight())
            .collect();
        if weights.is_empty() {
            0.0
        } else {
            weights.iter().sum::<f64>() / weights.len() as f64
        }
    }

    /// Returns an acyclic copy of the graph plus the removed edges.
    ///
    /// Repeatedly finds a strongly connected component with more than
    /// one node (every edge inside it lies on some cycle), removes the
    /// lowest-weight edge within it, and repeats until no cycle remains.
    /// Self-loops are removed outright. Ties break on discovery order.
    pub fn break_cycles(&self) -> (Self, Vec<RemovedEdge>) {
        let mut acyclic = self.clone();
        let mut removed = Vec::new();

        // Self-loops first; SCC detection treats them as singletons.
        while let Some(edge) = acyclic
            .graph
            .edge_indices()
            .find(|&e| {
                let (s, t) = acyclic.graph.edge_endpoints(e).expect("edge exists");
                s == t
            })
        {
            let (s, _) = acyclic.graph.edge_endpoints(edge).expect("edge exists");
            removed.push(RemovedEdge {
                source: acyclic.graph[s].clone(),
                target: acyclic.graph[s].clone(),
                weight: acyclic.graph[edge],
            });
            acyclic.graph.remove_edge(edge);
        }

        loop {
            let sccs = tarjan_scc(&acyclic.graph);
            let Some(component) = sccs.into_iter().find(|c| c.len() > 1) else {
                break;
            };
            let members: HashSet<NodeIndex> = component.into_iter().collect();

            // Lowest-weight edge inside the component.
            let mut weakest: Option<(petgraph::graph::EdgeIndex, f64)> = None;
            for edge in acyclic.graph.edge_indices() {
                let (s, t) = acyclic.graph.edge_endpoints(edge).expect("edge exists");
                if !members.contains(&s) || !members.contains(&t) {
                    continue;
                }
                let w = acyclic.graph[edge];
                if weakest.map_or(true, |(_, best)| w < best) {
                    weakest = Some((edge, w));
                }
            }

            let (edge, weight) = weakest.expect("non-trivial SCC has internal edges");
            let (s, t) = acyclic.graph.edge_endpoints(edge).expect("edge exists");
            removed.push(RemovedEdge {
                source: acyclic.graph[s].clone(),
                target: acyclic.graph[t].clone(),
                weight,
            });
            acyclic.graph.remove_edge(edge);
        }

        // Removing edges never drops nodes, so the index map stays valid.
        (acyclic, removed)
    }

    /// Whether the graph currently contains a cycle.
    pub fn is_cyclic(&self) -> bool {
        petgraph::algo::is_cyclic_directed(&self.graph)
    }

    /// Prerequisite-respecting study order, cheapest prerequisites first.
    ///
    /// Kahn's algorithm where the ready node with the lowest average
    /// incoming-edge weight is emitted next (name ascending on ties), so
    /// the refined order is topologically valid by construction. Skills
    /// from `all_skills` that have no edges at all are appended at the
    /// end in input order. If the graph is unexpectedly still cyclic,
    /// the stranded nodes are appended in arbitrary order.
    pub fn priority_topo_order(&self, all_skills: &[String]) -> Vec<String> {
        let mut in_degree: HashMap<NodeIndex, usize> = HashMap::new();
        for idx in self.graph.node_indices() {
            in_degree.insert(
                idx,
                self.graph
                    .edges_directed(idx, Direction::Incoming)
                    .count(),
            );
        }

        let mut ready: Vec<NodeIndex> = in_degree
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(idx, _)| *idx)
            .collect();
        let mut order = Vec::with_capacity(self.graph.node_count());

        while !ready.is_empty() {
            let pick = ready
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    let wa = self.avg_incoming_weight(&self.graph[**a]);
                    let wb = self.avg_incoming_weight(&self.graph[**b]);
                    wa.partial_cmp(&wb)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then_with(|| self.graph[**a].cmp(&self.graph[**b]))
                })
                .map(|(i, _)| i)
                .expect("ready set is non-empty");
            let idx = ready.swap_remove(pick);
            order.push(self.graph[idx].clone());

            for edge in self.graph.edges_directed(idx, Direction::Outgoing) {
                let next = edge.target();
                let degree = in_degree.get_mut(&next).expect("node has a degree entry");
                *degree -= 1;
                if *degree == 0 {
                    ready.push(next);
                }
            }
        }

        // Defensive: stranded nodes mean a cycle survived.
        if order.len() < self.graph.node_count() {
            let placed: HashSet<&String> = order.iter().collect();
            let stranded: Vec<String> = self
                .graph
                .node_indices()
                .map(|i| self.graph[i].clone())
                .filter(|n| !placed.contains(n))
                .collect();
            order.extend(stranded);
        }

        let placed: HashSet<String> = order.iter().cloned().collect();
        for skill in all_skills {
            let key = skill.to_lowercase();
            if !placed.contains(&key) {
                order.push(key);
            }
        }

        order
    }
}

/// Symmetric skill-pair affinity weights.
#[derive(Debug, Clone, Default)]
pub struct AssociationMap {
    weights: HashMap<(String, String), f64>,
}

impl AssociationMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an association weight for an unordered skill pair.
    /// Self-pairs are ignored; a skill has no affinity with itself.
    pub fn insert(&mut self, a: &str, b: &str, weight: f64) {
        let (a, b) = (a.to_lowercase(), b.to_lowercase());
        if a == b {
            return;
        }
        self.weights.insert((a.clone(), b.clone()), weight);
        self.weights.insert((b, a), weight);
    }

    /// Affinity weight for a pair (0 if none recorded).
    pub fn weight(&self, a: &str, b: &str) -> f64 {
        self.weights
            .get(&(a.to_lowercase(), b.to_lowercase()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of stored pairs (each unordered pair counts once).
    pub fn len(&self) -> usize {
        self.weights.len() / 2
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Builds the prerequisite graph and association map from relationship
/// records, keeping only edges whose endpoints are both in the skill set.
///
/// `skill_keys` must hold lowercased skill names.
pub fn build_graphs(
    records: &[RelationshipRecord],
    skill_keys: &HashSet<String>,
) -> (PrerequisiteGraph, AssociationMap) {
    let mut prereq = PrerequisiteGraph::new();
    let mut assoc = AssociationMap::new();

    for record in records {
        let src = record.source.to_lowercase();
        let tgt = record.target.to_lowercase();
        if !skill_keys.contains(&src) || !skill_keys.contains(&tgt) {
            continue;
        }
        match record.kind {
            RelationKind::Prerequisite => prereq.add_edge(&src, &tgt, record.weight),
            RelationKind::Association => assoc.insert(&src, &tgt, record.weight),
        }
    }

    (prereq, assoc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_lowercase()).collect()
    }

    #[test]
    fn test_build_graphs_restricted_to_skill_set() {
        let records = vec![
            RelationshipRecord::prerequisite("python", "pandas", 0.9),
            RelationshipRecord::prerequisite("python", "rust", 0.5), // rust not in set
            RelationshipRecord::association("python", "sql", 0.4),
            RelationshipRecord::association("go", "sql", 0.4), // go not in set
        ];
        let (prereq, assoc) = build_graphs(&records, &keys(&["python", "pandas", "sql"]));

        assert_eq!(prereq.edge_count(), 1);
        assert!(prereq.contains("python"));
        assert!(!prereq.contains("rust"));
        assert!((assoc.weight("sql", "python") - 0.4).abs() < 1e-10);
        assert!((assoc.weight("sql", "go") - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_association_symmetric() {
        let mut assoc = AssociationMap::new();
        assoc.insert("A", "b", 0.7);
        assert!((assoc.weight("a", "B") - 0.7).abs() < 1e-10);
        assert!((assoc.weight("b", "a") - 0.7).abs() < 1e-10);
        assert_eq!(assoc.len(), 1);
    }

    #[test]
    fn test_self_association_ignored() {
        let mut assoc = AssociationMap::new();
        assoc.insert("a", "A", 0.9);
        assoc.insert("a", "b", 0.4);

        assert!((assoc.weight("a", "a") - 0.0).abs() < 1e-10);
        assert_eq!(assoc.len(), 1);
    }

    #[test]
    fn test_break_cycles_removes_weakest() {
        // A→B (0.5), B→C (0.9), C→A (0.2): the 0.2 edge goes.
        let mut g = PrerequisiteGraph::new();
        g.add_edge("a", "b", 0.5);
        g.add_edge("b", "c", 0.9);
        g.add_edge("c", "a", 0.2);

        let (acyclic, removed) = g.break_cycles();
        assert!(!acyclic.is_cyclic());
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].source, "c");
        assert_eq!(removed[0].target, "a");
        assert!((removed[0].weight - 0.2).abs() < 1e-10);
        // Original graph untouched.
        assert_eq!(g.edge_count(), 3);
        assert!(g.is_cyclic());
    }

    #[test]
    fn test_break_cycles_nested() {
        // Two overlapping cycles sharing node b.
        let mut g = PrerequisiteGraph::new();
        g.add_edge("a", "b", 0.8);
        g.add_edge("b", "a", 0.3);
        g.add_edge("b", "c", 0.7);
        g.add_edge("c", "b", 0.1);

        let (acyclic, removed) = g.break_cycles();
        assert!(!acyclic.is_cyclic());
        assert_eq!(removed.len(), 2);
        let removed_weights: Vec<f64> = removed.iter().map(|e| e.weight).collect();
        assert!(removed_weights.contains(&0.1));
        assert!(removed_weights.contains(&0.3));
    }

    #[test]
    fn test_break_cycles_self_loop() {
        let mut g = PrerequisiteGraph::new();
        g.add_edge("a", "a", 0.5);
        g.add_edge("a", "b", 0.9);

        let (acyclic, removed) = g.break_cycles();
        assert!(!acyclic.is_cyclic());
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].source, "a");
        assert_eq!(removed[0].target, "a");
        assert_eq!(acyclic.edge_count(), 1);
    }

    #[test]
    fn test_priority_topo_order_respects_prerequisites() {
        let mut g = PrerequisiteGraph::new();
        g.add_edge("python", "pandas", 0.9);
        g.add_edge("python", "numpy", 0.8);
        g.add_edge("numpy", "pandas", 0.7);

        let order = g.priority_topo_order(&[]);
        let pos = |s: &str| order.iter().position(|x| x == s).unwrap();
        assert!(pos("python") < pos("numpy"));
        assert!(pos("numpy") < pos("pandas"));
    }

    #[test]
    fn test_priority_topo_order_cheap_first() {
        // Both b and c depend only on a; b's prerequisite edge is
        // weaker, so b surfaces before c.
        let mut g = PrerequisiteGraph::new();
        g.add_edge("a", "b", 0.1);
        g.add_edge("a", "c", 0.9);

        let order = g.priority_topo_order(&[]);
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_priority_topo_order_appends_isolated_skills() {
        let mut g = PrerequisiteGraph::new();
        g.add_edge("a", "b", 0.5);

        let order = g.priority_topo_order(&["Docker".into(), "a".into(), "linux".into()]);
        assert_eq!(order, vec!["a", "b", "docker", "linux"]);
    }

    #[test]
    fn test_prerequisites_of() {
        let mut g = PrerequisiteGraph::new();
        g.add_edge("a", "c", 0.5);
        g.add_edge("b", "c", 0.6);

        let mut prereqs = g.prerequisites_of("C");
        prereqs.sort();
        assert_eq!(prereqs, vec!["a", "b"]);
        assert!(g.prerequisites_of("missing").is_empty());
    }

    #[test]
    fn test_avg_incoming_weight() {
        let mut g = PrerequisiteGraph::new();
        g.add_edge("a", "c", 0.4);
        g.add_edge("b", "c", 0.8);

        assert!((g.avg_incoming_weight("c") - 0.6).abs() < 1e-10);
        assert!((g.avg_incoming_weight("a") - 0.0).abs() < 1e-10);
    }
}
