//! JSON-level entry points used by the WASM bindings.
//!
//! Kept free of `wasm-bindgen` so it can be exercised by native tests.

use crate::details::{self, NodeDetails};
use crate::error::{Error, Result};
use crate::layout::{self, CollapseSet, LayoutConfig, TopologyLayout};
use crate::output::{LayoutEdge, NodeKind};
use crate::snapshot::{self, ResourceSnapshot, TerraformCoverage};

pub fn decode_snapshot(json: &str) -> Result<ResourceSnapshot> {
    serde_json::from_str(json).map_err(Error::Snapshot)
}

/// An empty string means nothing is collapsed.
pub fn decode_collapsed(json: &str) -> Result<CollapseSet> {
    if json.trim().is_empty() {
        return Ok(CollapseSet::new());
    }
    serde_json::from_str(json).map_err(Error::CollapseSet)
}

/// An empty string means the default configuration.
pub fn decode_config(json: &str) -> Result<LayoutConfig> {
    if json.trim().is_empty() {
        return Ok(LayoutConfig::default());
    }
    serde_json::from_str(json).map_err(Error::Config)
}

pub fn compute_layout(snapshot_json: &str, collapsed_json: &str, config_json: &str) -> Result<TopologyLayout> {
    let snapshot = decode_snapshot(snapshot_json)?;
    let collapsed = decode_collapsed(collapsed_json)?;
    let cfg = decode_config(config_json)?;
    Ok(layout::layout_topology(&snapshot, &collapsed, &cfg))
}

pub fn compute_edges(snapshot_json: &str, collapsed_json: &str) -> Result<Vec<LayoutEdge>> {
    let snapshot = decode_snapshot(snapshot_json)?;
    let collapsed = decode_collapsed(collapsed_json)?;
    Ok(layout::build_edges(&snapshot, &collapsed))
}

pub fn node_details(snapshot_json: &str, node_id: &str) -> Result<Option<NodeDetails>> {
    let snapshot = decode_snapshot(snapshot_json)?;
    Ok(details::node_details(&snapshot, node_id))
}

pub fn terraform_coverage(snapshot_json: &str) -> Result<TerraformCoverage> {
    let snapshot = decode_snapshot(snapshot_json)?;
    Ok(snapshot::terraform_coverage(&snapshot))
}

/// Flip a container's collapse state. Ids that do not name a VPC or subnet
/// leave the set unchanged.
pub fn toggle_collapsed(collapsed_json: &str, node_id: &str) -> Result<CollapseSet> {
    let mut collapsed = decode_collapsed(collapsed_json)?;
    if NodeKind::parse_node_id(node_id).is_some_and(|(kind, _)| kind.is_container()) {
        collapsed.toggle(node_id);
    }
    Ok(collapsed)
}
