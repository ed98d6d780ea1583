//! Graph export of search trees.
//!
//! A [`TreeGraph`] is a bounded depth-first walk from one node of a tree, flattened
//! into node and edge descriptors. It prints as Graphviz DOT text or renders to an
//! image through the `dot` executable.

mod dot;
mod graph;


pub use dot::RenderError;
pub use graph::{EdgeDescriptor, ExportOptions, NodeDescriptor, NodeShape, TreeGraph};
