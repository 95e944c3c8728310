//! topology-core: layout engine for the infrastructure topology view.
//!
//! Takes a nested resource snapshot (VPCs, subnets, gateways, compute and
//! database resources) and produces parent-relative nodes plus routing edges
//! for a node-graph canvas. Compiled to WebAssembly for the React frontend;
//! see `wasm` for the exported functions.

pub mod api;
pub mod details;
pub mod error;
pub mod layout;
pub mod output;
pub mod snapshot;
mod wasm;

pub use error::{Error, Result};
pub use layout::{build_edges, layout_topology, CollapseSet, LayoutConfig, TopologyLayout};
pub use output::{LayoutEdge, LayoutNode, NodeData, NodeKind, TopologyOutput};
pub use snapshot::ResourceSnapshot;
