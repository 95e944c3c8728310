//! Output types for React frontend consumption.
//!
//! These structs are serialized to JSON in the shape the node-graph canvas
//! expects: parent-relative positions, `parentId` nesting and a typed `data`
//! payload per node kind.

use serde::Serialize;

use crate::layout::{PointI, SizeI};
use crate::snapshot::{ResourceStatus, SubnetType, TerraformInfo};

/// Node kind, serialized as the canvas node `type`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Vpc,
    Subnet,
    InternetGateway,
    NatGateway,
    Ec2,
    Rds,
    EcsContainer,
}

impl NodeKind {
    pub const ALL: [NodeKind; 7] = [
        NodeKind::Vpc,
        NodeKind::Subnet,
        NodeKind::InternetGateway,
        NodeKind::NatGateway,
        NodeKind::Ec2,
        NodeKind::Rds,
        NodeKind::EcsContainer,
    ];

    /// Prefix used when deriving node ids from resource ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            NodeKind::Vpc => "vpc",
            NodeKind::Subnet => "subnet",
            NodeKind::InternetGateway => "igw",
            NodeKind::NatGateway => "nat",
            NodeKind::Ec2 => "ec2",
            NodeKind::Rds => "rds",
            NodeKind::EcsContainer => "ecs",
        }
    }

    pub fn node_id(self, resource_id: &str) -> String {
        format!("{}-{}", self.id_prefix(), resource_id)
    }

    /// Split a node id back into its kind and resource id.
    pub fn parse_node_id(node_id: &str) -> Option<(NodeKind, &str)> {
        Self::ALL.into_iter().find_map(|kind| {
            node_id
                .strip_prefix(kind.id_prefix())
                .and_then(|rest| rest.strip_prefix('-'))
                .map(|resource_id| (kind, resource_id))
        })
    }

    /// Containers can be collapsed by the canvas.
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Vpc | NodeKind::Subnet)
    }
}

/// Resource counts shown on a collapsed VPC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VpcSummary {
    pub subnet_count: usize,
    pub public_subnet_count: usize,
    pub private_subnet_count: usize,
    pub unknown_subnet_count: usize,
    pub ec2_count: usize,
    pub rds_count: usize,
    pub ecs_count: usize,
    pub nat_count: usize,
    pub igw_count: usize,
    pub elastic_ip_count: usize,
}

/// Resource counts shown on a collapsed subnet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetSummary {
    pub ec2_count: usize,
    pub rds_count: usize,
    pub ecs_count: usize,
    pub nat_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VpcData {
    pub resource_id: String,
    pub label: String,
    pub cidr_block: String,
    pub status: ResourceStatus,
    pub terraform: TerraformInfo,
    pub child_summary: VpcSummary,
    pub collapsed: bool,
    pub collapsible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetData {
    pub resource_id: String,
    pub label: String,
    pub cidr_block: String,
    pub availability_zone: String,
    pub subnet_type: SubnetType,
    pub status: ResourceStatus,
    pub terraform: TerraformInfo,
    pub child_summary: SubnetSummary,
    pub collapsed: bool,
    pub collapsible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternetGatewayData {
    pub resource_id: String,
    pub label: String,
    pub status: ResourceStatus,
    pub terraform: TerraformInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NatGatewayData {
    pub resource_id: String,
    pub label: String,
    pub status: ResourceStatus,
    pub terraform: TerraformInfo,
    pub public_ip: String,
    pub private_ip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ec2Data {
    pub resource_id: String,
    pub label: String,
    pub status: ResourceStatus,
    pub terraform: TerraformInfo,
    pub instance_type: String,
    pub private_ip: String,
    pub public_ip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RdsData {
    pub resource_id: String,
    pub label: String,
    pub status: ResourceStatus,
    pub terraform: TerraformInfo,
    pub engine: String,
    pub engine_version: Option<String>,
    pub instance_class: String,
    pub endpoint: String,
    pub port: Option<u16>,
    pub multi_az: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EcsContainerData {
    pub resource_id: String,
    pub label: String,
    pub status: ResourceStatus,
    pub terraform: TerraformInfo,
    pub cluster_name: String,
    pub service_name: String,
    pub launch_type: String,
    pub cpu: Option<u32>,
    pub memory: Option<u32>,
    pub private_ip: String,
}

/// Typed node payload. The node kind is derived from the variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeData {
    Vpc(VpcData),
    Subnet(SubnetData),
    InternetGateway(InternetGatewayData),
    NatGateway(NatGatewayData),
    Ec2(Ec2Data),
    Rds(RdsData),
    EcsContainer(EcsContainerData),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Vpc(_) => NodeKind::Vpc,
            NodeData::Subnet(_) => NodeKind::Subnet,
            NodeData::InternetGateway(_) => NodeKind::InternetGateway,
            NodeData::NatGateway(_) => NodeKind::NatGateway,
            NodeData::Ec2(_) => NodeKind::Ec2,
            NodeData::Rds(_) => NodeKind::Rds,
            NodeData::EcsContainer(_) => NodeKind::EcsContainer,
        }
    }

    pub fn resource_id(&self) -> &str {
        match self {
            NodeData::Vpc(d) => &d.resource_id,
            NodeData::Subnet(d) => &d.resource_id,
            NodeData::InternetGateway(d) => &d.resource_id,
            NodeData::NatGateway(d) => &d.resource_id,
            NodeData::Ec2(d) => &d.resource_id,
            NodeData::Rds(d) => &d.resource_id,
            NodeData::EcsContainer(d) => &d.resource_id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NodeData::Vpc(d) => &d.label,
            NodeData::Subnet(d) => &d.label,
            NodeData::InternetGateway(d) => &d.label,
            NodeData::NatGateway(d) => &d.label,
            NodeData::Ec2(d) => &d.label,
            NodeData::Rds(d) => &d.label,
            NodeData::EcsContainer(d) => &d.label,
        }
    }

    /// `Some(collapsed)` for container payloads.
    pub fn collapsed(&self) -> Option<bool> {
        match self {
            NodeData::Vpc(d) => Some(d.collapsed),
            NodeData::Subnet(d) => Some(d.collapsed),
            _ => None,
        }
    }

    pub fn node_id(&self) -> String {
        self.kind().node_id(self.resource_id())
    }
}

/// A positioned node ready for the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Relative to the parent node when `parent_id` is set.
    pub position: PointI,
    #[serde(rename = "style", skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeI>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<&'static str>,
    pub hidden: bool,
    pub data: NodeData,
}

impl LayoutNode {
    pub fn new(data: NodeData, position: PointI) -> Self {
        Self {
            id: data.node_id(),
            kind: data.kind(),
            position,
            size: None,
            parent_id: None,
            extent: None,
            hidden: false,
            data,
        }
    }

    pub fn with_parent(mut self, parent_id: &str) -> Self {
        self.parent_id = Some(parent_id.to_string());
        self.extent = Some("parent");
        self
    }

    pub fn with_size(mut self, size: SizeI) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// Internet Gateway to a public subnet.
    InternetRoute,
    /// NAT Gateway to a private subnet.
    NatRoute,
}

/// An edge between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub animated: bool,
    pub dashed: bool,
}

impl LayoutEdge {
    pub fn internet_route(igw_id: &str, subnet_id: &str) -> Self {
        Self {
            id: format!("edge-igw-{igw_id}-subnet-{subnet_id}"),
            source: NodeKind::InternetGateway.node_id(igw_id),
            target: NodeKind::Subnet.node_id(subnet_id),
            kind: EdgeKind::InternetRoute,
            animated: true,
            dashed: false,
        }
    }

    pub fn nat_route(nat_id: &str, subnet_id: &str) -> Self {
        Self {
            id: format!("edge-nat-{nat_id}-subnet-{subnet_id}"),
            source: NodeKind::NatGateway.node_id(nat_id),
            target: NodeKind::Subnet.node_id(subnet_id),
            kind: EdgeKind::NatRoute,
            animated: false,
            dashed: true,
        }
    }
}

/// Decode error details for the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    pub line: usize,   // 1-based, 0 when unknown
    pub column: usize, // 1-based, 0 when unknown
}

impl From<&crate::error::Error> for ErrorInfo {
    fn from(err: &crate::error::Error) -> Self {
        Self { message: err.to_string(), line: err.line(), column: err.column() }
    }
}

/// The combined output sent to React
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyOutput {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}
