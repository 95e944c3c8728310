// VPC layout: header, optional Internet Gateway, then one centered row of
// subnets per subnet type (public, private, unknown), stacked top to bottom.
// All child positions are relative to the VPC node.

use crate::layout::collapse::{CollapseSet, Visibility};
use crate::layout::dimensions::{subnet_row_dimensions, RowDimensions};
use crate::layout::subnet::layout_subnet;
use crate::layout::{LayoutConfig, NodeSink, PointI, SizeI};
use crate::output::{InternetGatewayData, LayoutNode, NodeData, NodeKind, VpcData, VpcSummary};
use crate::snapshot::{display_label, Subnet, SubnetType, Vpc};

/// Row stacking order inside a VPC.
const ROW_ORDER: [SubnetType; 3] = [SubnetType::Public, SubnetType::Private, SubnetType::Unknown];

struct SubnetRow<'a> {
    subnets: Vec<&'a Subnet>,
    dims: RowDimensions,
}

fn partition_rows<'a>(vpc: &'a Vpc, cfg: &LayoutConfig) -> Vec<SubnetRow<'a>> {
    ROW_ORDER
        .iter()
        .map(|&ty| {
            let subnets: Vec<&Subnet> = vpc.subnets.iter().filter(|s| s.subnet_type == ty).collect();
            let dims = subnet_row_dimensions(&subnets, cfg);
            SubnetRow { subnets, dims }
        })
        .collect()
}

pub(crate) fn summarize_vpc(vpc: &Vpc) -> VpcSummary {
    let mut summary = VpcSummary {
        subnet_count: vpc.subnets.len(),
        igw_count: usize::from(vpc.internet_gateway.is_some()),
        elastic_ip_count: vpc.elastic_ips.len(),
        ..VpcSummary::default()
    };
    for s in &vpc.subnets {
        match s.subnet_type {
            SubnetType::Public => summary.public_subnet_count += 1,
            SubnetType::Private => summary.private_subnet_count += 1,
            SubnetType::Unknown => summary.unknown_subnet_count += 1,
        }
        summary.ec2_count += s.ec2_instances.len();
        summary.rds_count += s.rds_instances.len();
        summary.ecs_count += s.ecs_containers.len();
        summary.nat_count += usize::from(s.nat_gateway.is_some());
    }
    summary
}

/// Emit the VPC node and its subtree at `x_offset`. Returns the VPC size, or
/// None when the VPC's node id was already emitted.
pub(crate) fn layout_vpc(
    vpc: &Vpc,
    x_offset: i32,
    collapsed: &CollapseSet,
    cfg: &LayoutConfig,
    sink: &mut NodeSink,
) -> Option<SizeI> {
    let vpc_node_id = NodeKind::Vpc.node_id(&vpc.id);
    let vis = Visibility::of(collapsed, &vpc_node_id, false);
    let rows = partition_rows(vpc, cfg);

    let content_w = rows
        .iter()
        .map(|r| r.dims.width)
        .fold(cfg.vpc_min_content_width, i32::max);

    // Vertical stacking inside the VPC.
    let mut y = cfg.vpc_padding + cfg.vpc_header_height;
    let mut stacked = false;
    let igw_y = vpc.internet_gateway.as_ref().map(|_| {
        let at = y;
        y += cfg.igw_size.h + cfg.row_gap;
        stacked = true;
        at
    });
    let mut row_ys = Vec::with_capacity(rows.len());
    for row in &rows {
        if row.dims.is_empty() {
            row_ys.push(None);
            continue;
        }
        row_ys.push(Some(y));
        y += row.dims.height + cfg.row_gap;
        stacked = true;
    }
    if stacked {
        y -= cfg.row_gap;
    }

    let size = SizeI { w: content_w + 2 * cfg.vpc_padding, h: y + cfg.vpc_padding };

    let data = NodeData::Vpc(VpcData {
        resource_id: vpc.id.clone(),
        label: display_label(vpc.name.as_deref(), &vpc.id),
        cidr_block: vpc.cidr_block.clone(),
        status: vpc.status,
        terraform: vpc.terraform.clone(),
        child_summary: summarize_vpc(vpc),
        collapsed: vis.collapsed,
        collapsible: true,
    });
    let node = LayoutNode::new(data, PointI { x: x_offset, y: 0 })
        .with_size(size)
        .with_hidden(vis.hidden);
    if !sink.push(node) {
        return None;
    }

    let children_hidden = vis.children_hidden();

    if let (Some(igw), Some(igw_y)) = (&vpc.internet_gateway, igw_y) {
        let data = NodeData::InternetGateway(InternetGatewayData {
            resource_id: igw.id.clone(),
            label: display_label(igw.name.as_deref(), &igw.id),
            status: igw.status,
            terraform: igw.terraform.clone(),
        });
        let pos = PointI {
            x: cfg.vpc_padding + (content_w - cfg.igw_size.w) / 2,
            y: igw_y,
        };
        sink.push(
            LayoutNode::new(data, pos)
                .with_parent(&vpc_node_id)
                .with_hidden(children_hidden),
        );
    }

    for (row, row_y) in rows.iter().zip(row_ys) {
        let Some(row_y) = row_y else { continue };
        let mut x = cfg.vpc_padding + (content_w - row.dims.width) / 2;
        for (subnet, &w) in row.subnets.iter().zip(&row.dims.subnet_widths) {
            layout_subnet(
                subnet,
                &vpc_node_id,
                PointI { x, y: row_y },
                SizeI { w, h: row.dims.height },
                children_hidden,
                collapsed,
                cfg,
                sink,
            );
            x += w + cfg.subnet_gap;
        }
    }

    Some(size)
}
