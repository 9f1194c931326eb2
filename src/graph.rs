//! The conversion graph. Every direct conversion the crate knows is an [`Edge`](struct.Edge.html)
//! from one [`ColorSpace`](../colors/enum.ColorSpace.html) to another, and a
//! [`ConversionRegistry`](struct.ConversionRegistry.html) holds the edges in the order they were
//! registered. Converting between two spaces with no direct edge means finding a chain of edges,
//! which is a breadth-first search: every edge costs the same, so the shortest chain is the one
//! with the fewest hops, and ties go to whichever edge was registered first. The search therefore
//! gives the same answer every time for the same registry.
//!
//! All RGB profiles share the single `RGB` node. The profile itself travels in the conversion
//! context and the color values, not in the graph.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use crate::colors::{ColorSpace, ColorValue};
use crate::convert::ConversionContext;
use crate::error::{ColorError, Result};

/// A direct conversion: takes a value of the edge's source space, returns one of its target space.
/// It receives the whole conversion context and ignores whatever it doesn't need.
pub type Primitive = fn(&ColorValue, &ConversionContext) -> Result<ColorValue>;

/// One registered conversion.
#[derive(Copy, Clone)]
pub struct Edge {
    /// The space the primitive takes.
    pub source: ColorSpace,
    /// The space the primitive returns.
    pub target: ColorSpace,
    /// A short name for diagnostics, e.g. `"xyz_to_lab"`.
    pub name: &'static str,
    /// The conversion itself.
    pub func: Primitive,
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({} -> {})", self.name, self.source, self.target)
    }
}

impl PartialEq for Edge {
    // primitives are compared by name: function pointer equality is not reliable across codegen
    // units
    fn eq(&self, other: &Edge) -> bool {
        self.source == other.source && self.target == other.target && self.name == other.name
    }
}

/// A directed graph of conversions between color spaces.
#[derive(Debug, Clone, Default)]
pub struct ConversionRegistry {
    edges: Vec<Edge>,
}

impl ConversionRegistry {
    /// An empty registry, with no conversions at all.
    pub fn new() -> ConversionRegistry {
        ConversionRegistry { edges: vec![] }
    }

    /// Records a direct conversion. Registering the same (source, target) pair again replaces the
    /// primitive but keeps the edge's original place in the search order.
    pub fn register(
        &mut self,
        source: ColorSpace,
        target: ColorSpace,
        name: &'static str,
        func: Primitive,
    ) {
        let edge = Edge {
            source,
            target,
            name,
            func,
        };
        match self
            .edges
            .iter_mut()
            .find(|e| e.source == source && e.target == target)
        {
            Some(existing) => *existing = edge,
            None => self.edges.push(edge),
        }
    }

    /// Every edge, in registration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The direct conversion between two spaces, if one is registered.
    pub fn edge(&self, source: ColorSpace, target: ColorSpace) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }

    /// Finds the shortest chain of conversions from one space to another. Converting a space to
    /// itself is the empty chain. Fails with `UndefinedConversion` if the target can't be reached.
    pub fn resolve(&self, source: ColorSpace, target: ColorSpace) -> Result<Vec<Edge>> {
        if source == target {
            return Ok(vec![]);
        }

        // the edge that first reached each space
        let mut reached_by: HashMap<ColorSpace, usize> = HashMap::new();
        let mut queue = VecDeque::new();
        queue.push_back(source);

        while let Some(space) = queue.pop_front() {
            if space == target {
                break;
            }
            for (i, edge) in self.edges.iter().enumerate() {
                if edge.source != space
                    || edge.target == source
                    || reached_by.contains_key(&edge.target)
                {
                    continue;
                }
                reached_by.insert(edge.target, i);
                queue.push_back(edge.target);
            }
        }

        if !reached_by.contains_key(&target) {
            return Err(ColorError::UndefinedConversion {
                from: source,
                to: target,
            });
        }

        // walk back from the target
        let mut path = vec![];
        let mut space = target;
        while space != source {
            let edge = self.edges[reached_by[&space]];
            path.push(edge);
            space = edge.source;
        }
        path.reverse();
        Ok(path)
    }
}
