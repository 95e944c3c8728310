//! Detail panel content for a clicked node.
//!
//! The canvas reports clicks by node id; this module resolves the id back to
//! the resource in the snapshot and renders labelled rows for it.

use serde::Serialize;

use crate::output::NodeKind;
use crate::snapshot::{
    display_label, or_dash, Ec2Instance, EcsContainer, InternetGateway, NatGateway, RdsInstance,
    ResourceSnapshot, ResourceStatus, Subnet, SubnetType, TerraformInfo, Vpc,
};

/// A resource located by node id, with its owning containers.
#[derive(Debug, Clone, Copy)]
pub enum ResourceRef<'a> {
    Vpc(&'a Vpc),
    Subnet(&'a Vpc, &'a Subnet),
    InternetGateway(&'a Vpc, &'a InternetGateway),
    NatGateway(&'a Vpc, &'a Subnet, &'a NatGateway),
    Ec2(&'a Vpc, &'a Subnet, &'a Ec2Instance),
    Rds(&'a Vpc, &'a Subnet, &'a RdsInstance),
    EcsContainer(&'a Vpc, &'a Subnet, &'a EcsContainer),
}

impl<'a> ResourceRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            ResourceRef::Vpc(..) => NodeKind::Vpc,
            ResourceRef::Subnet(..) => NodeKind::Subnet,
            ResourceRef::InternetGateway(..) => NodeKind::InternetGateway,
            ResourceRef::NatGateway(..) => NodeKind::NatGateway,
            ResourceRef::Ec2(..) => NodeKind::Ec2,
            ResourceRef::Rds(..) => NodeKind::Rds,
            ResourceRef::EcsContainer(..) => NodeKind::EcsContainer,
        }
    }

    pub fn resource_id(&self) -> &'a str {
        match *self {
            ResourceRef::Vpc(v) => &v.id,
            ResourceRef::Subnet(_, s) => &s.id,
            ResourceRef::InternetGateway(_, g) => &g.id,
            ResourceRef::NatGateway(_, _, n) => &n.id,
            ResourceRef::Ec2(_, _, i) => &i.id,
            ResourceRef::Rds(_, _, db) => &db.id,
            ResourceRef::EcsContainer(_, _, c) => &c.task_id,
        }
    }

    /// Node id of the container this node is nested in.
    pub fn parent_node_id(&self) -> Option<String> {
        match *self {
            ResourceRef::Vpc(_) => None,
            ResourceRef::Subnet(v, _) | ResourceRef::InternetGateway(v, _) => {
                Some(NodeKind::Vpc.node_id(&v.id))
            }
            ResourceRef::NatGateway(_, s, _)
            | ResourceRef::Ec2(_, s, _)
            | ResourceRef::Rds(_, s, _)
            | ResourceRef::EcsContainer(_, s, _) => Some(NodeKind::Subnet.node_id(&s.id)),
        }
    }

    fn name(&self) -> Option<&'a str> {
        match *self {
            ResourceRef::Vpc(v) => v.name.as_deref(),
            ResourceRef::Subnet(_, s) => s.name.as_deref(),
            ResourceRef::InternetGateway(_, g) => g.name.as_deref(),
            ResourceRef::NatGateway(_, _, n) => n.name.as_deref(),
            ResourceRef::Ec2(_, _, i) => i.name.as_deref(),
            ResourceRef::Rds(_, _, db) => db.name.as_deref(),
            ResourceRef::EcsContainer(_, _, c) => c.name.as_deref(),
        }
    }

    fn status(&self) -> ResourceStatus {
        match *self {
            ResourceRef::Vpc(v) => v.status,
            ResourceRef::Subnet(_, s) => s.status,
            ResourceRef::InternetGateway(_, g) => g.status,
            ResourceRef::NatGateway(_, _, n) => n.status,
            ResourceRef::Ec2(_, _, i) => i.status,
            ResourceRef::Rds(_, _, db) => db.status,
            ResourceRef::EcsContainer(_, _, c) => c.status,
        }
    }

    fn terraform(&self) -> &'a TerraformInfo {
        match *self {
            ResourceRef::Vpc(v) => &v.terraform,
            ResourceRef::Subnet(_, s) => &s.terraform,
            ResourceRef::InternetGateway(_, g) => &g.terraform,
            ResourceRef::NatGateway(_, _, n) => &n.terraform,
            ResourceRef::Ec2(_, _, i) => &i.terraform,
            ResourceRef::Rds(_, _, db) => &db.terraform,
            ResourceRef::EcsContainer(_, _, c) => &c.terraform,
        }
    }

    fn rows(&self) -> Vec<DetailRow> {
        match *self {
            ResourceRef::Vpc(v) => {
                let eips: Vec<&str> = v.elastic_ips.iter().map(|e| e.public_ip.as_str()).collect();
                vec![
                    DetailRow::new("VPC ID", &v.id),
                    DetailRow::new("CIDR Block", or_dash(Some(v.cidr_block.as_str()))),
                    DetailRow::new("Subnets", v.subnets.len().to_string()),
                    DetailRow::new(
                        "Internet Gateway",
                        or_dash(v.internet_gateway.as_ref().map(|g| g.id.as_str())),
                    ),
                    DetailRow::new("Elastic IPs", or_dash(Some(eips.join(", ").as_str()))),
                ]
            }
            ResourceRef::Subnet(_, s) => vec![
                DetailRow::new("Subnet ID", &s.id),
                DetailRow::new("CIDR Block", or_dash(Some(s.cidr_block.as_str()))),
                DetailRow::new("Availability Zone", or_dash(Some(s.availability_zone.as_str()))),
                DetailRow::new("Type", subnet_type_label(s.subnet_type)),
                DetailRow::new(
                    "NAT Gateway",
                    or_dash(s.nat_gateway.as_ref().map(|n| n.id.as_str())),
                ),
                DetailRow::new("Resources", s.resource_count().to_string()),
            ],
            ResourceRef::InternetGateway(v, g) => vec![
                DetailRow::new("Gateway ID", &g.id),
                DetailRow::new("VPC", &v.id),
            ],
            ResourceRef::NatGateway(_, s, n) => vec![
                DetailRow::new("NAT Gateway ID", &n.id),
                DetailRow::new("Public IP", or_dash(n.public_ip.as_deref())),
                DetailRow::new("Private IP", or_dash(n.private_ip.as_deref())),
                DetailRow::new("Subnet", &s.id),
            ],
            ResourceRef::Ec2(v, _, i) => {
                let eip = v
                    .elastic_ips
                    .iter()
                    .find(|e| e.associated_instance_id.as_deref() == Some(i.id.as_str()))
                    .map(|e| e.public_ip.as_str());
                vec![
                    DetailRow::new("Instance ID", &i.id),
                    DetailRow::new("Instance Type", or_dash(Some(i.instance_type.as_str()))),
                    DetailRow::new("Private IP", or_dash(i.private_ip.as_deref())),
                    DetailRow::new("Public IP", or_dash(i.public_ip.as_deref())),
                    DetailRow::new("Elastic IP", or_dash(eip)),
                ]
            }
            ResourceRef::Rds(_, _, db) => {
                let engine = match &db.engine_version {
                    Some(ver) if !ver.is_empty() => format!("{} {}", db.engine, ver),
                    _ => db.engine.clone(),
                };
                let endpoint = match (&db.endpoint, db.port) {
                    (Some(host), Some(port)) => format!("{host}:{port}"),
                    (host, _) => or_dash(host.as_deref()),
                };
                vec![
                    DetailRow::new("DB Identifier", &db.id),
                    DetailRow::new("Engine", or_dash(Some(engine.as_str()))),
                    DetailRow::new("Instance Class", or_dash(Some(db.instance_class.as_str()))),
                    DetailRow::new("Endpoint", endpoint),
                    DetailRow::new("Multi-AZ", if db.multi_az { "Yes" } else { "No" }),
                ]
            }
            ResourceRef::EcsContainer(_, _, c) => vec![
                DetailRow::new("Task ID", &c.task_id),
                DetailRow::new("Cluster", or_dash(Some(c.cluster_name.as_str()))),
                DetailRow::new("Service", or_dash(c.service_name.as_deref())),
                DetailRow::new("Launch Type", or_dash(c.launch_type.as_deref())),
                DetailRow::new("CPU", or_dash(c.cpu.map(|v| v.to_string()).as_deref())),
                DetailRow::new("Memory", or_dash(c.memory.map(|v| format!("{v} MiB")).as_deref())),
                DetailRow::new("Private IP", or_dash(c.private_ip.as_deref())),
            ],
        }
    }
}

fn subnet_type_label(ty: SubnetType) -> &'static str {
    match ty {
        SubnetType::Public => "Public",
        SubnetType::Private => "Private",
        SubnetType::Unknown => "Unknown",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

impl DetailRow {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetails {
    pub node_id: String,
    pub kind: NodeKind,
    pub title: String,
    pub status: ResourceStatus,
    pub terraform: TerraformInfo,
    pub parent_id: Option<String>,
    pub rows: Vec<DetailRow>,
}

/// Resolve a node id (as emitted by the layout) back to its resource.
pub fn find_resource<'a>(snapshot: &'a ResourceSnapshot, node_id: &str) -> Option<ResourceRef<'a>> {
    let (kind, id) = NodeKind::parse_node_id(node_id)?;

    for v in &snapshot.vpcs {
        let found = match kind {
            NodeKind::Vpc => (v.id == id).then_some(ResourceRef::Vpc(v)),
            NodeKind::InternetGateway => v
                .internet_gateway
                .as_ref()
                .filter(|g| g.id == id)
                .map(|g| ResourceRef::InternetGateway(v, g)),
            _ => v.subnets.iter().find_map(|s| find_in_subnet(v, s, kind, id)),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

fn find_in_subnet<'a>(
    v: &'a Vpc,
    s: &'a Subnet,
    kind: NodeKind,
    id: &str,
) -> Option<ResourceRef<'a>> {
    match kind {
        NodeKind::Subnet => (s.id == id).then_some(ResourceRef::Subnet(v, s)),
        NodeKind::NatGateway => s
            .nat_gateway
            .as_ref()
            .filter(|n| n.id == id)
            .map(|n| ResourceRef::NatGateway(v, s, n)),
        NodeKind::Ec2 => s.ec2_instances.iter().find(|i| i.id == id).map(|i| ResourceRef::Ec2(v, s, i)),
        NodeKind::Rds => s.rds_instances.iter().find(|d| d.id == id).map(|d| ResourceRef::Rds(v, s, d)),
        NodeKind::EcsContainer => s
            .ecs_containers
            .iter()
            .find(|c| c.task_id == id)
            .map(|c| ResourceRef::EcsContainer(v, s, c)),
        NodeKind::Vpc | NodeKind::InternetGateway => None,
    }
}

pub fn node_details(snapshot: &ResourceSnapshot, node_id: &str) -> Option<NodeDetails> {
    let r = find_resource(snapshot, node_id)?;
    Some(NodeDetails {
        node_id: node_id.to_string(),
        kind: r.kind(),
        title: display_label(r.name(), r.resource_id()),
        status: r.status(),
        terraform: r.terraform().clone(),
        parent_id: r.parent_node_id(),
        rows: r.rows(),
    })
}
