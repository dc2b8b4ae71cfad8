//! The transitive dependency graph of a package.
//!
//! Nodes are project signatures, edges mean "depends on". The graph is built
//! by reading dependency descriptors out of the repository, depth-first in
//! declared order. A project is visited once regardless of which version the
//! different paths reference; the first reference wins. A dependency that
//! names no version stands for the latest one stored.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::core::{ProjectSignature, Repository};
use crate::resolver::errors::ResolveError;

type ProjectKey = (String, String);

fn key_of(sig: &ProjectSignature) -> ProjectKey {
    (sig.publisher.clone(), sig.project.clone())
}

/// Replace an empty dependency version with the latest stored one.
fn pin_version(repo: &Repository, dep: &ProjectSignature) -> ProjectSignature {
    if dep.version.any() {
        return dep.clone();
    }
    match repo.latest_signature(&dep.publisher, &dep.project) {
        Some(latest) => {
            tracing::debug!("{} has no version, using {}", dep, latest);
            latest
        }
        None => dep.clone(),
    }
}

/// The resolved dependency graph rooted at one package.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<ProjectSignature, ()>,

    /// Map from (publisher, project) to node index
    nodes: HashMap<ProjectKey, NodeIndex>,

    root: NodeIndex,

    /// Non-root nodes in discovery order
    order: Vec<NodeIndex>,
}

impl DependencyGraph {
    /// Resolve the dependency graph of `root` whose direct dependencies are
    /// `direct`.
    ///
    /// A dependency without a readable descriptor is a leaf. Reaching a
    /// project that is already on the current path is a cycle.
    pub fn resolve(
        repo: &Repository,
        root: &ProjectSignature,
        direct: &[ProjectSignature],
    ) -> Result<Self, ResolveError> {
        let mut graph = DiGraph::new();
        let root_node = graph.add_node(root.clone());
        let mut nodes = HashMap::new();
        nodes.insert(key_of(root), root_node);

        let mut resolver = DependencyGraph {
            graph,
            nodes,
            root: root_node,
            order: Vec::new(),
        };

        let mut path = vec![root.clone()];
        resolver.visit(repo, root_node, direct, &mut path)?;

        debug_assert!(!petgraph::algo::is_cyclic_directed(&resolver.graph));
        Ok(resolver)
    }

    fn visit(
        &mut self,
        repo: &Repository,
        from: NodeIndex,
        deps: &[ProjectSignature],
        path: &mut Vec<ProjectSignature>,
    ) -> Result<(), ResolveError> {
        for dep in deps {
            let dep = &pin_version(repo, dep);
            if path.iter().any(|p| p.is_project(&dep.publisher, &dep.project)) {
                let mut packages: Vec<String> = path.iter().map(|p| p.to_string()).collect();
                packages.push(dep.to_string());
                return Err(ResolveError::CycleDetected { packages });
            }

            if let Some(&node) = self.nodes.get(&key_of(dep)) {
                self.add_edge(from, node);
                continue;
            }

            let node = self.graph.add_node(dep.clone());
            self.nodes.insert(key_of(dep), node);
            self.order.push(node);
            self.add_edge(from, node);

            let children = match repo.descriptor(&dep.publisher, &dep.project, &dep.version) {
                Some(descriptor) => descriptor.dependencies().to_vec(),
                None => {
                    tracing::debug!("no descriptor for {}, treating it as a leaf", dep);
                    Vec::new()
                }
            };

            path.push(dep.clone());
            self.visit(repo, node, &children, path)?;
            path.pop();
        }

        Ok(())
    }

    fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if !self.graph.contains_edge(from, to) {
            self.graph.add_edge(from, to, ());
        }
    }

    /// The root package.
    pub fn root(&self) -> &ProjectSignature {
        &self.graph[self.root]
    }

    /// The transitive closure in classpath order, root excluded.
    pub fn closure(&self) -> Vec<ProjectSignature> {
        self.order.iter().map(|&n| self.graph[n].clone()).collect()
    }

    /// Number of resolved dependencies, root excluded.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the root has no dependencies.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Direct dependencies of a resolved package, in declared order.
    pub fn deps(&self, sig: &ProjectSignature) -> Vec<&ProjectSignature> {
        let Some(&node) = self.nodes.get(&key_of(sig)) else {
            return Vec::new();
        };

        // petgraph yields neighbors most-recent edge first.
        let mut deps: Vec<&ProjectSignature> =
            self.graph.neighbors(node).map(|n| &self.graph[n]).collect();
        deps.reverse();
        deps
    }
}
