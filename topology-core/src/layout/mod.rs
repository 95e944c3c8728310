// Topology layouter for resource snapshots.
//
// Goals:
// - Deterministic: ordering comes from input order only
// - Parent-relative: every nested node is positioned inside its parent container
// - Collapse is a visibility toggle: collapsed subtrees keep their positions
// - Total: malformed-but-typed input never panics
//
// Submodules:
// - dimensions: subnet and subnet-row sizing
// - vpc: one VPC subtree (gateway, rows of subnets)
// - subnet: one subnet and its resource grid
// - edges: routing edges between gateways and subnets
// - collapse: caller-owned collapse set
//
// Output:
// - TopologyLayout with nodes (parents before children) and edges.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::output::{LayoutEdge, LayoutNode};
use crate::snapshot::ResourceSnapshot;

pub mod collapse;
pub mod dimensions;
pub mod edges;
mod subnet;
mod vpc;

pub use collapse::CollapseSet;
pub use dimensions::{subnet_dimensions, subnet_row_dimensions, RowDimensions};
pub use edges::build_edges;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointI {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeI {
    #[serde(rename = "width")]
    pub w: i32,
    #[serde(rename = "height")]
    pub h: i32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct RectI {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl RectI {
    pub fn new(origin: PointI, size: SizeI) -> Self {
        Self { x: origin.x, y: origin.y, w: size.w, h: size.h }
    }

    pub fn right(&self) -> i32 { self.x + self.w }
    pub fn bottom(&self) -> i32 { self.y + self.h }

    pub fn contains(&self, other: &RectI) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Presentation constants. Any field missing from a JSON override keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Padding inside VPC containers.
    pub vpc_padding: i32,
    /// Space reserved for the VPC title bar.
    pub vpc_header_height: i32,
    /// Horizontal gap between sibling VPCs.
    pub vpc_gap: i32,
    /// Minimum interior width, so empty VPCs stay readable.
    pub vpc_min_content_width: i32,
    /// Vertical gap between the gateway and subnet rows.
    pub row_gap: i32,
    pub igw_size: SizeI,
    /// Padding inside subnet containers.
    pub subnet_padding: i32,
    pub subnet_header_height: i32,
    /// Horizontal gap between subnets in one row.
    pub subnet_gap: i32,
    /// Footprint of a subnet with no resources.
    pub subnet_min_size: SizeI,
    pub resource_size: SizeI,
    pub resource_gap_x: i32,
    pub resource_gap_y: i32,
    pub resources_per_row: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            vpc_padding: 40,
            vpc_header_height: 60,
            vpc_gap: 100,
            vpc_min_content_width: 400,
            row_gap: 40,
            igw_size: SizeI { w: 180, h: 70 },
            subnet_padding: 20,
            subnet_header_height: 50,
            subnet_gap: 40,
            subnet_min_size: SizeI { w: 280, h: 120 },
            resource_size: SizeI { w: 180, h: 80 },
            resource_gap_x: 20,
            resource_gap_y: 20,
            resources_per_row: 2,
        }
    }
}

/// Upper bound for `resources_per_row`; wider grids are clamped.
pub const MAX_RESOURCES_PER_ROW: usize = 64;

impl LayoutConfig {
    /// Grid columns inside a subnet, in `1..=MAX_RESOURCES_PER_ROW`.
    pub fn columns(&self) -> usize {
        self.resources_per_row.clamp(1, MAX_RESOURCES_PER_ROW)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopologyLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

/// Collects emitted nodes and drops any whose id was already taken.
#[derive(Debug, Default)]
pub(crate) struct NodeSink {
    nodes: Vec<LayoutNode>,
    seen: HashSet<String>,
}

impl NodeSink {
    /// Returns false (and discards the node) on a duplicate id.
    pub(crate) fn push(&mut self, node: LayoutNode) -> bool {
        if !self.seen.insert(node.id.clone()) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub(crate) fn into_nodes(self) -> Vec<LayoutNode> {
        self.nodes
    }
}

/// Lay out every VPC left to right and derive the routing edges.
pub fn layout_topology(
    snapshot: &ResourceSnapshot,
    collapsed: &CollapseSet,
    cfg: &LayoutConfig,
) -> TopologyLayout {
    let nodes = emit_nodes(snapshot, collapsed, cfg);
    let edges = edges::route_edges(&nodes);
    TopologyLayout { nodes, edges }
}

/// Node pass only: every VPC subtree, duplicates dropped, parents first.
pub(crate) fn emit_nodes(
    snapshot: &ResourceSnapshot,
    collapsed: &CollapseSet,
    cfg: &LayoutConfig,
) -> Vec<LayoutNode> {
    let mut sink = NodeSink::default();
    let mut x_offset: i32 = 0;

    for v in &snapshot.vpcs {
        if let Some(size) = vpc::layout_vpc(v, x_offset, collapsed, cfg, &mut sink) {
            x_offset = x_offset.saturating_add(size.w).saturating_add(cfg.vpc_gap);
        }
    }

    sink.into_nodes()
}
