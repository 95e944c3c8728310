// Subnet layout: the subnet container plus a fixed-column grid of its
// resources. Grid order is NAT gateway, EC2, RDS, then ECS containers, each in
// input order.

use crate::layout::collapse::{CollapseSet, Visibility};
use crate::layout::dimensions::saturating_i32;
use crate::layout::{LayoutConfig, NodeSink, PointI, SizeI};
use crate::output::{
    Ec2Data, EcsContainerData, LayoutNode, NatGatewayData, NodeData, NodeKind, RdsData,
    SubnetData, SubnetSummary,
};
use crate::snapshot::{display_label, or_dash, Subnet};

/// Position of the `index`-th resource relative to its subnet.
pub(crate) fn grid_position(index: usize, cfg: &LayoutConfig) -> PointI {
    let cols = cfg.columns();
    let col = saturating_i32(index % cols);
    let row = saturating_i32(index / cols);
    let step_x = cfg.resource_size.w.saturating_add(cfg.resource_gap_x);
    let step_y = cfg.resource_size.h.saturating_add(cfg.resource_gap_y);
    PointI {
        x: cfg.subnet_padding.saturating_add(col.saturating_mul(step_x)),
        y: cfg
            .subnet_header_height
            .saturating_add(cfg.subnet_padding)
            .saturating_add(row.saturating_mul(step_y)),
    }
}

pub(crate) fn summarize_subnet(subnet: &Subnet) -> SubnetSummary {
    SubnetSummary {
        ec2_count: subnet.ec2_instances.len(),
        rds_count: subnet.rds_instances.len(),
        ecs_count: subnet.ecs_containers.len(),
        nat_count: usize::from(subnet.nat_gateway.is_some()),
    }
}

/// Node payloads for a subnet's resources, in grid order.
pub(crate) fn resource_payloads(subnet: &Subnet) -> Vec<NodeData> {
    let mut out = Vec::with_capacity(subnet.resource_count());

    if let Some(nat) = &subnet.nat_gateway {
        out.push(NodeData::NatGateway(NatGatewayData {
            resource_id: nat.id.clone(),
            label: display_label(nat.name.as_deref(), &nat.id),
            status: nat.status,
            terraform: nat.terraform.clone(),
            public_ip: or_dash(nat.public_ip.as_deref()),
            private_ip: or_dash(nat.private_ip.as_deref()),
        }));
    }

    out.extend(subnet.ec2_instances.iter().map(|i| {
        NodeData::Ec2(Ec2Data {
            resource_id: i.id.clone(),
            label: display_label(i.name.as_deref(), &i.id),
            status: i.status,
            terraform: i.terraform.clone(),
            instance_type: i.instance_type.clone(),
            private_ip: or_dash(i.private_ip.as_deref()),
            public_ip: or_dash(i.public_ip.as_deref()),
        })
    }));

    out.extend(subnet.rds_instances.iter().map(|db| {
        NodeData::Rds(RdsData {
            resource_id: db.id.clone(),
            label: display_label(db.name.as_deref(), &db.id),
            status: db.status,
            terraform: db.terraform.clone(),
            engine: db.engine.clone(),
            engine_version: db.engine_version.clone(),
            instance_class: db.instance_class.clone(),
            endpoint: or_dash(db.endpoint.as_deref()),
            port: db.port,
            multi_az: db.multi_az,
        })
    }));

    out.extend(subnet.ecs_containers.iter().map(|c| {
        NodeData::EcsContainer(EcsContainerData {
            resource_id: c.task_id.clone(),
            label: display_label(c.name.as_deref(), &c.task_id),
            status: c.status,
            terraform: c.terraform.clone(),
            cluster_name: c.cluster_name.clone(),
            service_name: or_dash(c.service_name.as_deref()),
            launch_type: or_dash(c.launch_type.as_deref()),
            cpu: c.cpu,
            memory: c.memory,
            private_ip: or_dash(c.private_ip.as_deref()),
        })
    }));

    out
}

/// Emit a subnet node at `position` (relative to its VPC) and its resources.
#[allow(clippy::too_many_arguments)]
pub(crate) fn layout_subnet(
    subnet: &Subnet,
    vpc_node_id: &str,
    position: PointI,
    size: SizeI,
    hidden: bool,
    collapsed: &CollapseSet,
    cfg: &LayoutConfig,
    sink: &mut NodeSink,
) {
    let subnet_node_id = NodeKind::Subnet.node_id(&subnet.id);
    let vis = Visibility::of(collapsed, &subnet_node_id, hidden);

    let data = NodeData::Subnet(SubnetData {
        resource_id: subnet.id.clone(),
        label: display_label(subnet.name.as_deref(), &subnet.id),
        cidr_block: subnet.cidr_block.clone(),
        availability_zone: subnet.availability_zone.clone(),
        subnet_type: subnet.subnet_type,
        status: subnet.status,
        terraform: subnet.terraform.clone(),
        child_summary: summarize_subnet(subnet),
        collapsed: vis.collapsed,
        collapsible: true,
    });
    let node = LayoutNode::new(data, position)
        .with_parent(vpc_node_id)
        .with_size(size)
        .with_hidden(vis.hidden);
    if !sink.push(node) {
        return;
    }

    let children_hidden = vis.children_hidden();
    for (index, data) in resource_payloads(subnet).into_iter().enumerate() {
        sink.push(
            LayoutNode::new(data, grid_position(index, cfg))
                .with_parent(&subnet_node_id)
                .with_hidden(children_hidden),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::dimensions::subnet_dimensions;
    use crate::layout::fixtures::*;
    use crate::layout::{RectI, MAX_RESOURCES_PER_ROW};
    use crate::snapshot::SubnetType;

    fn run(subnet: &Subnet, hidden: bool, collapsed: &CollapseSet) -> Vec<LayoutNode> {
        let cfg = LayoutConfig::default();
        let mut sink = NodeSink::default();
        let size = subnet_dimensions(subnet, &cfg);
        layout_subnet(subnet, "vpc-v", PointI { x: 40, y: 100 }, size, hidden, collapsed, &cfg, &mut sink);
        sink.into_nodes()
    }

    fn full_subnet() -> Subnet {
        let mut s = subnet("s", SubnetType::Public);
        s.ecs_containers = vec![ecs("t1")];
        s.rds_instances = vec![rds("db1")];
        s.ec2_instances = vec![ec2("i1"), ec2("i2")];
        s.nat_gateway = Some(nat("n1"));
        s
    }

    #[test]
    fn test_resource_order() {
        let nodes = run(&full_subnet(), false, &CollapseSet::new());
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["subnet-s", "nat-n1", "ec2-i1", "ec2-i2", "rds-db1", "ecs-t1"]);
        assert_eq!(nodes[1].kind, NodeKind::NatGateway);
        assert_eq!(nodes[5].kind, NodeKind::EcsContainer);
    }

    #[test]
    fn test_grid_wraps_after_two_columns() {
        let mut s = subnet("s", SubnetType::Private);
        s.ec2_instances = vec![ec2("a"), ec2("b"), ec2("c")];
        let nodes = run(&s, false, &CollapseSet::new());

        let (a, b, c) = (nodes[1].position, nodes[2].position, nodes[3].position);
        assert_eq!(a.y, b.y);
        assert!(b.x > a.x);
        assert!(c.y > a.y);
        assert_eq!(c.x, a.x);
    }

    #[test]
    fn test_grid_position_with_clamped_columns() {
        let cfg = LayoutConfig { resources_per_row: usize::MAX, ..LayoutConfig::default() };
        let last = grid_position(MAX_RESOURCES_PER_ROW - 1, &cfg);
        let wrapped = grid_position(MAX_RESOURCES_PER_ROW, &cfg);
        assert_eq!(last.y, wrapped.y - (80 + 20));
        assert_eq!(wrapped.x, cfg.subnet_padding);
        assert_eq!(grid_position(usize::MAX, &cfg).y, i32::MAX);
    }

    #[test]
    fn test_resources_fit_inside_subnet() {
        let s = full_subnet();
        let cfg = LayoutConfig::default();
        let bounds = RectI::new(PointI::default(), subnet_dimensions(&s, &cfg));
        for n in run(&s, false, &CollapseSet::new()).iter().skip(1) {
            assert!(bounds.contains(&RectI::new(n.position, cfg.resource_size)), "{}", n.id);
        }
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let mut s = subnet("s", SubnetType::Private);
        let mut named = ec2("i-named");
        named.name = Some("web".into());
        let mut blank = ec2("i-blank");
        blank.name = Some(String::new());
        s.ec2_instances = vec![ec2("i-none"), named, blank];

        let nodes = run(&s, false, &CollapseSet::new());
        let labels: Vec<&str> = nodes.iter().map(|n| n.data.label()).collect();
        assert_eq!(labels, vec!["s", "i-none", "web", "i-blank"]);
    }

    #[test]
    fn test_missing_ip_renders_dash() {
        let mut s = subnet("s", SubnetType::Private);
        s.ec2_instances = vec![ec2("i")];
        let nodes = run(&s, false, &CollapseSet::new());
        let NodeData::Ec2(data) = &nodes[1].data else { panic!("expected ec2 payload") };
        assert_eq!(data.private_ip, "-");
        assert_eq!(data.public_ip, "-");
    }

    #[test]
    fn test_collapsed_subnet_hides_resources() {
        let collapsed: CollapseSet = ["subnet-s"].into_iter().collect();
        let nodes = run(&full_subnet(), false, &collapsed);
        assert!(!nodes[0].hidden);
        assert_eq!(nodes[0].data.collapsed(), Some(true));
        assert!(nodes[1..].iter().all(|n| n.hidden));
    }

    #[test]
    fn test_hidden_subnet_cascades() {
        let nodes = run(&full_subnet(), true, &CollapseSet::new());
        assert!(nodes.iter().all(|n| n.hidden));
        assert_eq!(nodes[0].data.collapsed(), Some(false));
    }

    #[test]
    fn test_summary() {
        let nodes = run(&full_subnet(), false, &CollapseSet::new());
        let NodeData::Subnet(data) = &nodes[0].data else { panic!("expected subnet payload") };
        assert_eq!(
            data.child_summary,
            SubnetSummary { ec2_count: 2, rds_count: 1, ecs_count: 1, nat_count: 1 }
        );
    }
}
