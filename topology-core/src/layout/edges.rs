//! Routing edges between gateways and subnets.
//!
//! Edges are derived from the emitted node list, never from node positions:
//! - Internet Gateway -> every public subnet of its VPC
//! - NAT Gateway (in a public subnet) -> every private subnet of the same VPC
//!
//! Only visible nodes take part, so an edge never ends at a hidden node or at
//! a fragment that was skipped as a duplicate. Membership follows `parent_id`,
//! which keeps every edge inside the VPC that emitted both endpoints.

use std::collections::HashMap;

use crate::layout::{emit_nodes, CollapseSet, LayoutConfig};
use crate::output::{LayoutEdge, LayoutNode, NodeData, NodeKind};
use crate::snapshot::{ResourceSnapshot, SubnetType};

/// Edges for `snapshot` under `collapsed`. Geometry does not affect edges, so
/// the default config is used for the node pass.
pub fn build_edges(snapshot: &ResourceSnapshot, collapsed: &CollapseSet) -> Vec<LayoutEdge> {
    let nodes = emit_nodes(snapshot, collapsed, &LayoutConfig::default());
    route_edges(&nodes)
}

pub(crate) fn route_edges(nodes: &[LayoutNode]) -> Vec<LayoutEdge> {
    let mut children: HashMap<&str, Vec<&LayoutNode>> = HashMap::new();
    for n in nodes.iter().filter(|n| !n.hidden) {
        if let Some(parent) = n.parent_id.as_deref() {
            children.entry(parent).or_default().push(n);
        }
    }

    let mut edges = Vec::new();
    for vpc in nodes.iter().filter(|n| n.kind == NodeKind::Vpc && !n.hidden) {
        let subnets = children_of(&children, &vpc.id, NodeKind::Subnet);
        let public: Vec<&LayoutNode> = of_type(&subnets, SubnetType::Public).collect();
        let private: Vec<&LayoutNode> = of_type(&subnets, SubnetType::Private).collect();

        for igw in children_of(&children, &vpc.id, NodeKind::InternetGateway) {
            for s in &public {
                edges.push(LayoutEdge::internet_route(igw.data.resource_id(), s.data.resource_id()));
            }
        }

        for s in &public {
            for nat in children_of(&children, &s.id, NodeKind::NatGateway) {
                for p in &private {
                    edges.push(LayoutEdge::nat_route(nat.data.resource_id(), p.data.resource_id()));
                }
            }
        }
    }

    edges
}

/// Visible children of `id` with the given kind, in emission order.
fn children_of<'a>(
    children: &HashMap<&str, Vec<&'a LayoutNode>>,
    id: &str,
    kind: NodeKind,
) -> Vec<&'a LayoutNode> {
    children
        .get(id)
        .map(|c| c.iter().copied().filter(|n| n.kind == kind).collect())
        .unwrap_or_default()
}

fn of_type<'a>(
    subnets: &'a [&'a LayoutNode],
    ty: SubnetType,
) -> impl Iterator<Item = &'a LayoutNode> + 'a {
    subnets
        .iter()
        .copied()
        .filter(move |n| matches!(&n.data, NodeData::Subnet(d) if d.subnet_type == ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fixtures::*;
    use crate::layout::{layout_topology, TopologyLayout};
    use crate::snapshot::Vpc;

    fn ids(edges: &[LayoutEdge]) -> Vec<&str> {
        edges.iter().map(|e| e.id.as_str()).collect()
    }

    fn routed_vpc() -> Vpc {
        let mut pub_a = subnet("pa", SubnetType::Public);
        pub_a.nat_gateway = Some(nat("n1"));
        let mut v = vpc(
            "v",
            vec![
                pub_a,
                subnet("pb", SubnetType::Public),
                subnet("qa", SubnetType::Private),
                subnet("qb", SubnetType::Private),
                subnet("u", SubnetType::Unknown),
            ],
        );
        v.internet_gateway = Some(igw("g"));
        v
    }

    #[test]
    fn test_igw_edges_only_to_public_subnets() {
        let mut v = vpc(
            "v",
            vec![
                subnet("a", SubnetType::Public),
                subnet("b", SubnetType::Public),
                subnet("c", SubnetType::Private),
            ],
        );
        v.internet_gateway = Some(igw("g"));
        let edges = build_edges(&ResourceSnapshot::new(vec![v]), &CollapseSet::new());

        assert_eq!(ids(&edges), vec!["edge-igw-g-subnet-a", "edge-igw-g-subnet-b"]);
        assert!(edges.iter().all(|e| e.source == "igw-g"));
        assert!(edges.iter().all(|e| e.target != "subnet-c"));
    }

    #[test]
    fn test_nat_fans_out_to_private_subnets() {
        let mut public = subnet("p", SubnetType::Public);
        public.nat_gateway = Some(nat("n"));
        let v = vpc(
            "v",
            vec![public, subnet("x", SubnetType::Private), subnet("y", SubnetType::Private)],
        );
        let edges = build_edges(&ResourceSnapshot::new(vec![v]), &CollapseSet::new());

        assert_eq!(ids(&edges), vec!["edge-nat-n-subnet-x", "edge-nat-n-subnet-y"]);
        assert!(edges.iter().all(|e| e.source == "nat-n" && e.dashed));
    }

    #[test]
    fn test_nat_in_private_subnet_has_no_edges() {
        let mut private = subnet("q", SubnetType::Private);
        private.nat_gateway = Some(nat("n"));
        let v = vpc("v", vec![private, subnet("r", SubnetType::Private)]);
        assert!(build_edges(&ResourceSnapshot::new(vec![v]), &CollapseSet::new()).is_empty());
    }

    #[test]
    fn test_edges_stay_within_vpc() {
        let mut other = vpc("w", vec![subnet("wq", SubnetType::Private)]);
        other.internet_gateway = Some(igw("h"));
        let edges = build_edges(&ResourceSnapshot::new(vec![routed_vpc(), other]), &CollapseSet::new());
        assert_eq!(
            ids(&edges),
            vec![
                "edge-igw-g-subnet-pa",
                "edge-igw-g-subnet-pb",
                "edge-nat-n1-subnet-qa",
                "edge-nat-n1-subnet-qb",
            ]
        );
    }

    #[test]
    fn test_collapsed_vpc_suppresses_all_edges() {
        let collapsed: CollapseSet = ["vpc-v"].into_iter().collect();
        assert!(build_edges(&ResourceSnapshot::new(vec![routed_vpc()]), &collapsed).is_empty());
    }

    #[test]
    fn test_collapsed_subnet_suppresses_nat_edges() {
        let collapsed: CollapseSet = ["subnet-pa"].into_iter().collect();
        let edges = build_edges(&ResourceSnapshot::new(vec![routed_vpc()]), &collapsed);
        assert_eq!(ids(&edges), vec!["edge-igw-g-subnet-pa", "edge-igw-g-subnet-pb"]);
    }

    fn vpc_of<'a>(layout: &'a TopologyLayout, id: &'a str) -> &'a str {
        let mut current = id;
        while let Some(n) = layout.nodes.iter().find(|n| n.id == current) {
            match n.parent_id.as_deref() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    fn assert_edges_match_nodes(layout: &TopologyLayout) {
        for e in &layout.edges {
            for end in [&e.source, &e.target] {
                let Some(n) = layout.nodes.iter().find(|n| &n.id == end) else {
                    panic!("edge {} references missing {}", e.id, end);
                };
                assert!(!n.hidden, "edge {} references hidden {}", e.id, end);
            }
            assert_eq!(vpc_of(layout, &e.source), vpc_of(layout, &e.target), "edge {}", e.id);
        }
    }

    /// VPC `a` holds private subnet `s`; VPC `b` holds a NAT and reuses id `s`.
    fn shared_subnet_id() -> ResourceSnapshot {
        let mut public = subnet("p", SubnetType::Public);
        public.nat_gateway = Some(nat("n"));
        let a = vpc("a", vec![subnet("s", SubnetType::Private)]);
        let b = vpc(
            "b",
            vec![public, subnet("s", SubnetType::Private), subnet("t", SubnetType::Private)],
        );
        ResourceSnapshot::new(vec![a, b])
    }

    #[test]
    fn test_edges_never_touch_hidden_nodes() {
        let snapshot = ResourceSnapshot::new(vec![routed_vpc()]);
        for set in [vec![], vec!["subnet-pa"], vec!["subnet-qa"], vec!["vpc-v"]] {
            let collapsed: CollapseSet = set.into_iter().collect();
            assert_edges_match_nodes(&layout_topology(&snapshot, &collapsed, &LayoutConfig::default()));
        }
    }

    #[test]
    fn test_duplicate_subnet_id_does_not_cross_vpcs() {
        let snapshot = shared_subnet_id();
        for set in [vec![], vec!["vpc-a"], vec!["subnet-p"]] {
            let collapsed: CollapseSet = set.clone().into_iter().collect();
            let layout = layout_topology(&snapshot, &collapsed, &LayoutConfig::default());
            assert_edges_match_nodes(&layout);
            assert!(ids(&layout.edges).iter().all(|id| *id != "edge-nat-n-subnet-s"), "{set:?}");
        }

        let collapsed: CollapseSet = ["vpc-a"].into_iter().collect();
        let layout = layout_topology(&snapshot, &collapsed, &LayoutConfig::default());
        let s = layout.nodes.iter().find(|n| n.id == "subnet-s").unwrap();
        assert_eq!(s.parent_id.as_deref(), Some("vpc-a"));
        assert!(s.hidden);
        assert_eq!(ids(&layout.edges), vec!["edge-nat-n-subnet-t"]);
    }

    #[test]
    fn test_skipped_duplicate_vpc_adds_no_edges() {
        let mut second = vpc("v", vec![subnet("q", SubnetType::Public)]);
        second.internet_gateway = Some(igw("g"));
        let snapshot = ResourceSnapshot::new(vec![vpc("v", vec![]), second]);
        let layout = layout_topology(&snapshot, &CollapseSet::new(), &LayoutConfig::default());

        let node_ids: Vec<&str> = layout.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(node_ids, vec!["vpc-v"]);
        assert!(layout.edges.is_empty());
        assert!(build_edges(&snapshot, &CollapseSet::new()).is_empty());
    }

    #[test]
    fn test_build_edges_matches_layout_edges() {
        let snapshots = [
            ResourceSnapshot::new(vec![routed_vpc()]),
            shared_subnet_id(),
            ResourceSnapshot::new(vec![routed_vpc(), routed_vpc()]),
        ];
        let cfg = LayoutConfig { resources_per_row: 5, ..LayoutConfig::default() };
        for snapshot in &snapshots {
            for set in [vec![], vec!["vpc-a"], vec!["subnet-pa"]] {
                let collapsed: CollapseSet = set.into_iter().collect();
                assert_eq!(
                    build_edges(snapshot, &collapsed),
                    layout_topology(snapshot, &collapsed, &cfg).edges
                );
            }
        }
    }

    #[test]
    fn test_edges_are_stable() {
        let snapshot = ResourceSnapshot::new(vec![routed_vpc()]);
        assert_eq!(
            build_edges(&snapshot, &CollapseSet::new()),
            build_edges(&snapshot, &CollapseSet::new())
        );
    }
}
