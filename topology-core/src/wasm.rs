//! WASM bindings for the topology-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Inputs and outputs are JSON strings.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::api;
use crate::error::Error;
use crate::output::{ErrorInfo, TopologyOutput};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

fn to_json<T: Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        console_error(&format!("Error serializing output: {}", e));
        fallback.to_string()
    })
}

fn layout_output(result: Result<crate::layout::TopologyLayout, Error>) -> String {
    let output = match result {
        Ok(layout) => TopologyOutput { nodes: layout.nodes, edges: layout.edges, error: None },
        Err(e) => {
            console_error(&format!("Error computing layout: {}", e));
            TopologyOutput { nodes: vec![], edges: vec![], error: Some(ErrorInfo::from(&e)) }
        }
    };
    to_json(&output, r#"{"nodes":[],"edges":[]}"#)
}

/// Lay out a snapshot with the default configuration.
/// `collapsed_json` is an array of container node ids (empty string for none).
#[wasm_bindgen]
pub fn compute_layout(snapshot_json: &str, collapsed_json: &str) -> String {
    layout_output(api::compute_layout(snapshot_json, collapsed_json, ""))
}

/// Lay out a snapshot with a partial `LayoutConfig` override.
#[wasm_bindgen]
pub fn compute_layout_with_config(snapshot_json: &str, collapsed_json: &str, config_json: &str) -> String {
    layout_output(api::compute_layout(snapshot_json, collapsed_json, config_json))
}

/// Only the routing edges, as a JSON array.
#[wasm_bindgen]
pub fn compute_edges(snapshot_json: &str, collapsed_json: &str) -> String {
    match api::compute_edges(snapshot_json, collapsed_json) {
        Ok(edges) => to_json(&edges, "[]"),
        Err(e) => {
            console_error(&format!("Error computing edges: {}", e));
            "[]".to_string()
        }
    }
}

/// Detail panel content for a clicked node, or `null`.
#[wasm_bindgen]
pub fn node_details(snapshot_json: &str, node_id: &str) -> String {
    match api::node_details(snapshot_json, node_id) {
        Ok(Some(details)) => to_json(&details, "null"),
        Ok(None) => {
            console_error(&format!("Node '{}' not found", node_id));
            "null".to_string()
        }
        Err(e) => {
            console_error(&format!("Error reading snapshot: {}", e));
            "null".to_string()
        }
    }
}

#[wasm_bindgen]
pub fn terraform_coverage(snapshot_json: &str) -> String {
    match api::terraform_coverage(snapshot_json) {
        Ok(cov) => to_json(&cov, "null"),
        Err(e) => {
            console_error(&format!("Error reading snapshot: {}", e));
            "null".to_string()
        }
    }
}

/// Toggle a container in the collapse set and return the new set.
/// Returns the input unchanged if it cannot be parsed.
#[wasm_bindgen]
pub fn toggle_collapsed(collapsed_json: &str, node_id: &str) -> String {
    match api::toggle_collapsed(collapsed_json, node_id) {
        Ok(set) => {
            console_log(&format!(
                "{} '{}'",
                if set.is_collapsed(node_id) { "Collapsed" } else { "Expanded" },
                node_id
            ));
            to_json(&set, collapsed_json)
        }
        Err(e) => {
            console_error(&format!("Error toggling '{}': {}", node_id, e));
            collapsed_json.to_string()
        }
    }
}
