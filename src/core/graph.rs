//! The `dependencies` graph between submodules.
//!
//! By default the declared dependencies are informational and targets keep
//! the input order. With [`TargetOrder::Dependencies`] the graph is built
//! once at load time, cycles are rejected, and targets are emitted in a
//! stable topological order (dependencies first, ties broken by input order).

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::core::descriptor::DependencyDescriptor;
use crate::core::errors::DescriptorError;

/// How targets are ordered in the generated Makefile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetOrder {
    /// Keep the order of the configuration file
    #[default]
    Input,
    /// Dependencies before dependents; targets also require their dependencies
    Dependencies,
}

/// Dependency graph over a descriptor list.
///
/// Nodes hold indices into the descriptor slice. An edge `a -> b` means
/// `a` depends on `b`.
#[derive(Debug, Clone)]
pub struct SubmoduleGraph {
    graph: DiGraph<usize, ()>,
    nodes: Vec<NodeIndex>,
}

impl SubmoduleGraph {
    /// Build the graph, ignoring references to unknown submodules.
    pub fn new(descriptors: &[DependencyDescriptor]) -> Self {
        let mut graph = DiGraph::new();
        let nodes: Vec<NodeIndex> = (0..descriptors.len()).map(|i| graph.add_node(i)).collect();

        let by_name: HashMap<&str, usize> = descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name(), i))
            .collect();

        for (i, desc) in descriptors.iter().enumerate() {
            for dep in desc.depends_on() {
                match by_name.get(dep.as_str()) {
                    Some(&j) => {
                        if !graph.contains_edge(nodes[i], nodes[j]) {
                            graph.add_edge(nodes[i], nodes[j], ());
                        }
                    }
                    None => tracing::warn!(
                        "submodule `{}` depends on unknown submodule `{}`, ignoring",
                        desc.name(),
                        dep
                    ),
                }
            }
        }

        SubmoduleGraph { graph, nodes }
    }

    /// Fail if any submodules depend on each other in a cycle.
    pub fn check_acyclic(&self, descriptors: &[DependencyDescriptor]) -> Result<(), DescriptorError> {
        for component in tarjan_scc(&self.graph) {
            let is_cycle = component.len() > 1
                || self.graph.contains_edge(component[0], component[0]);
            if !is_cycle {
                continue;
            }

            let mut indices: Vec<usize> = component.iter().map(|&n| self.graph[n]).collect();
            indices.sort_unstable();
            let mut members: Vec<String> = indices
                .iter()
                .map(|&i| descriptors[i].name().to_string())
                .collect();
            members.push(members[0].clone());

            return Err(DescriptorError::DependencyCycle { members });
        }
        Ok(())
    }

    /// Descriptor indices with dependencies first, ties broken by input order.
    ///
    /// Must only be called on an acyclic graph; nodes on a cycle are dropped.
    pub fn topological_order(&self) -> Vec<usize> {
        let mut pending: Vec<usize> = self
            .nodes
            .iter()
            .map(|&n| self.graph.neighbors_directed(n, Direction::Outgoing).count())
            .collect();

        let mut ready: BinaryHeap<Reverse<usize>> = pending
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count == 0)
            .map(|(i, _)| Reverse(i))
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(Reverse(i)) = ready.pop() {
            order.push(i);
            for dependent in self.graph.neighbors_directed(self.nodes[i], Direction::Incoming) {
                let j = self.graph[dependent];
                pending[j] -= 1;
                if pending[j] == 0 {
                    ready.push(Reverse(j));
                }
            }
        }
        order
    }
}

/// Names of the direct dependencies of `desc` that exist in `descriptors`,
/// in declaration order without repeats.
pub fn known_dependencies<'a>(
    desc: &'a DependencyDescriptor,
    descriptors: &[DependencyDescriptor],
) -> Vec<&'a str> {
    let mut deps: Vec<&str> = Vec::new();
    for name in desc.depends_on() {
        let known = descriptors.iter().any(|d| d.name() == name);
        if known && !deps.contains(&name.as_str()) {
            deps.push(name);
        }
    }
    deps
}

/// Order descriptors for emission.
///
/// [`TargetOrder::Input`] returns the list unchanged. [`TargetOrder::Dependencies`]
/// rejects cycles and sorts topologically.
pub fn order_descriptors(
    descriptors: &[DependencyDescriptor],
    order: TargetOrder,
) -> Result<Vec<DependencyDescriptor>, DescriptorError> {
    match order {
        TargetOrder::Input => Ok(descriptors.to_vec()),
        TargetOrder::Dependencies => {
            let graph = SubmoduleGraph::new(descriptors);
            graph.check_acyclic(descriptors)?;
            Ok(graph
                .topological_order()
                .into_iter()
                .map(|i| descriptors[i].clone())
                .collect())
        }
    }
}
