use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

/// Where an import edge points.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum DependencyTarget {
    /// A file of the scanned project, by relative path
    Internal(String),
    /// The sink for imports that resolve to no project file
    External,
}

impl DependencyTarget {
    pub fn internal_path(&self) -> Option<&str> {
        match self {
            DependencyTarget::Internal(path) => Some(path),
            DependencyTarget::External => None,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, DependencyTarget::External)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: DependencyTarget,
    /// Import identifier as written in the importing file
    pub import: String,
}

/// Directed multigraph of file-to-file imports. Cycles are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    nodes: Vec<String>,
    edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    pub fn new(nodes: Vec<String>) -> Self {
        Self {
            nodes,
            edges: Vec::new(),
        }
    }

    pub(crate) fn add_edge(&mut self, from: &str, to: DependencyTarget, import: &str) {
        self.edges.push(DependencyEdge {
            from: from.to_string(),
            to,
            import: import.to_string(),
        });
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn internal_edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.edges.iter().filter(|e| !e.to.is_external())
    }

    pub fn external_edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.edges.iter().filter(|e| e.to.is_external())
    }

    /// Project files imported by `path`, without duplicates, in edge order.
    pub fn dependencies_of(&self, path: &str) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.edges
            .iter()
            .filter(|e| e.from == path)
            .filter_map(|e| e.to.internal_path())
            .filter(|target| seen.insert(*target))
            .collect()
    }

    /// Project files that import `path`, without duplicates, in edge order.
    pub fn dependents_of(&self, path: &str) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.edges
            .iter()
            .filter(|e| e.to.internal_path() == Some(path))
            .map(|e| e.from.as_str())
            .filter(|from| seen.insert(*from))
            .collect()
    }

    /// Every project file transitively imported by `path`, breadth-first.
    /// `path` itself is included only when it sits on a cycle.
    pub fn reachable_from(&self, path: &str) -> Vec<&str> {
        let mut visited: BTreeSet<&str> = BTreeSet::new();
        let mut order = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::from([path]);

        while let Some(current) = queue.pop_front() {
            for next in self.dependencies_of(current) {
                if visited.insert(next) {
                    order.push(next);
                    queue.push_back(next);
                }
            }
        }
        order
    }

    pub fn has_external_dependencies(&self, path: &str) -> bool {
        self.external_edges().any(|e| e.from == path)
    }
}
