use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// A small directed graph over copyable node ids.
///
/// This is all the graph machinery ranked pairs needs: node and edge
/// insertion, a reachability query to detect would-be cycles, and the
/// extraction of sources (nodes with no incoming edge).
#[derive(Debug, Clone)]
pub(crate) struct Digraph<N> {
    succ: HashMap<N, HashSet<N>>,
    in_degree: HashMap<N, u32>,
}

impl<N: Copy + Eq + Hash> Digraph<N> {
    pub fn new() -> Digraph<N> {
        Digraph {
            succ: HashMap::new(),
            in_degree: HashMap::new(),
        }
    }

    pub fn add_node(&mut self, n: N) {
        self.succ.entry(n).or_default();
        self.in_degree.entry(n).or_insert(0);
    }

    /// Inserts the edge `from -> to`. Both endpoints must already be nodes.
    /// Inserting an edge twice has no further effect.
    pub fn add_edge(&mut self, from: N, to: N) {
        debug_assert!(self.succ.contains_key(&from) && self.succ.contains_key(&to));
        let inserted = self.succ.entry(from).or_default().insert(to);
        if inserted {
            *self.in_degree.entry(to).or_insert(0) += 1;
        }
    }

    /// True when `to` can be reached from `from` by following edges,
    /// including the trivial case `from == to`.
    pub fn can_reach(&self, from: N, to: N) -> bool {
        let mut seen: HashSet<N> = HashSet::new();
        let mut stack: Vec<N> = vec![from];
        while let Some(n) = stack.pop() {
            if n == to {
                return true;
            }
            if !seen.insert(n) {
                continue;
            }
            if let Some(nexts) = self.succ.get(&n) {
                stack.extend(nexts.iter().copied());
            }
        }
        false
    }

    /// The nodes with no incoming edge. Non-empty whenever the graph is
    /// non-empty and acyclic.
    pub fn sources(&self) -> Vec<N> {
        self.in_degree
            .iter()
            .filter_map(|(n, d)| if *d == 0 { Some(*n) } else { None })
            .collect()
    }

    #[cfg(test)]
    pub fn is_acyclic(&self) -> bool {
        self.succ
            .iter()
            .all(|(&n, nexts)| !nexts.iter().any(|&m| self.can_reach(m, n)))
    }
}

#[cfg(test)]
mod tests {
    use super::Digraph;

    fn diamond() -> Digraph<u32> {
        // 1 -> 2 -> 4, 1 -> 3 -> 4
        let mut g = Digraph::new();
        for n in 1..=4 {
            g.add_node(n);
        }
        g.add_edge(1, 2);
        g.add_edge(1, 3);
        g.add_edge(2, 4);
        g.add_edge(3, 4);
        g
    }

    #[test]
    fn reachability() {
        let g = diamond();
        assert!(g.can_reach(1, 4));
        assert!(g.can_reach(2, 4));
        assert!(g.can_reach(3, 3));
        assert!(!g.can_reach(4, 1));
        assert!(!g.can_reach(2, 3));
    }

    #[test]
    fn sources_of_diamond() {
        let g = diamond();
        assert_eq!(g.sources(), vec![1]);
    }

    #[test]
    fn isolated_nodes_are_sources() {
        let mut g: Digraph<u32> = Digraph::new();
        g.add_node(1);
        g.add_node(2);
        g.add_edge(1, 2);
        g.add_node(7);
        let mut sources = g.sources();
        sources.sort();
        assert_eq!(sources, vec![1, 7]);
    }

    #[test]
    fn duplicate_edges_do_not_inflate_degrees() {
        let mut g: Digraph<u32> = Digraph::new();
        g.add_node(1);
        g.add_node(2);
        g.add_edge(1, 2);
        g.add_edge(1, 2);
        assert_eq!(g.sources(), vec![1]);
    }

    #[test]
    fn acyclicity_check() {
        let mut g = diamond();
        assert!(g.is_acyclic());
        g.add_edge(4, 1);
        assert!(!g.is_acyclic());
    }
}
