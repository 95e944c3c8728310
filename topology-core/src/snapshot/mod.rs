//! Input data model: the resource snapshot supplied by the backend.
//!
//! The snapshot is deserialized from the backend's camelCase JSON and treated
//! as immutable by the layout engine. Optional collections default to empty so
//! partially populated payloads still lay out.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

pub mod coverage;

pub use coverage::{terraform_coverage, KindCoverage, TerraformCoverage};

/// Full resource snapshot. Accepts either `{ "vpcs": [...] }` or a bare array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceSnapshot {
    pub vpcs: Vec<Vpc>,
}

impl<'de> Deserialize<'de> for ResourceSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = ResourceSnapshot;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object with a `vpcs` array, or an array of VPCs")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut vpcs = Vec::new();
                while let Some(vpc) = seq.next_element()? {
                    vpcs.push(vpc);
                }
                Ok(ResourceSnapshot { vpcs })
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut vpcs: Option<Vec<Vpc>> = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key == "vpcs" {
                        vpcs = map.next_value()?;
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(ResourceSnapshot { vpcs: vpcs.unwrap_or_default() })
            }
        }

        deserializer.deserialize_any(SnapshotVisitor)
    }
}

impl ResourceSnapshot {
    pub fn new(vpcs: Vec<Vpc>) -> Self {
        Self { vpcs }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Active,
    Inactive,
    Transitioning,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubnetType {
    Public,
    Private,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Terraform management state shared by every resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerraformInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub terraform_managed: bool,
    #[serde(default)]
    pub tf_resource_address: Option<String>,
}

impl TerraformInfo {
    pub fn managed(address: impl Into<String>) -> Self {
        Self { terraform_managed: true, tf_resource_address: Some(address.into()) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vpc {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cidr_block: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ResourceStatus,
    #[serde(flatten)]
    pub terraform: TerraformInfo,
    #[serde(default)]
    pub internet_gateway: Option<InternetGateway>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subnets: Vec<Subnet>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub elastic_ips: Vec<ElasticIp>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subnet {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cidr_block: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub availability_zone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subnet_type: SubnetType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ResourceStatus,
    #[serde(flatten)]
    pub terraform: TerraformInfo,
    #[serde(default)]
    pub nat_gateway: Option<NatGateway>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ec2_instances: Vec<Ec2Instance>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rds_instances: Vec<RdsInstance>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ecs_containers: Vec<EcsContainer>,
}

impl Subnet {
    /// Number of leaf resources placed in this subnet's grid.
    pub fn resource_count(&self) -> usize {
        self.ec2_instances.len()
            + self.rds_instances.len()
            + self.ecs_containers.len()
            + usize::from(self.nat_gateway.is_some())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternetGateway {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ResourceStatus,
    #[serde(flatten)]
    pub terraform: TerraformInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatGateway {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ResourceStatus,
    #[serde(flatten)]
    pub terraform: TerraformInfo,
    #[serde(default)]
    pub public_ip: Option<String>,
    #[serde(default)]
    pub private_ip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ec2Instance {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ResourceStatus,
    #[serde(flatten)]
    pub terraform: TerraformInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instance_type: String,
    #[serde(default)]
    pub private_ip: Option<String>,
    #[serde(default)]
    pub public_ip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdsInstance {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ResourceStatus,
    #[serde(flatten)]
    pub terraform: TerraformInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub engine: String,
    #[serde(default)]
    pub engine_version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instance_class: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub multi_az: bool,
}

/// A running ECS task. The task id doubles as the resource id.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcsContainer {
    #[serde(alias = "id")]
    pub task_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ResourceStatus,
    #[serde(flatten)]
    pub terraform: TerraformInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cluster_name: String,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub launch_type: Option<String>,
    #[serde(default)]
    pub cpu: Option<u32>,
    #[serde(default)]
    pub memory: Option<u32>,
    #[serde(default)]
    pub private_ip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticIp {
    pub allocation_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_ip: String,
    #[serde(default)]
    pub associated_instance_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ResourceStatus,
    #[serde(flatten)]
    pub terraform: TerraformInfo,
}

/// Field decoder that reads an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Display label: the name when it has visible text, the id otherwise.
pub fn display_label(name: Option<&str>, id: &str) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => id.to_string(),
    }
}

/// Display value for optional text fields.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_wrapped_snapshot() {
        let value = json!({
            "vpcs": [{
                "id": "vpc-1",
                "name": "main",
                "cidrBlock": "10.0.0.0/16",
                "status": "active",
                "terraformManaged": true,
                "tfResourceAddress": "aws_vpc.main",
                "subnets": [{
                    "id": "sn-1",
                    "subnetType": "public",
                    "ec2Instances": [{ "id": "i-1", "instanceType": "t3.micro" }],
                    "ecsContainers": [{ "taskId": "task-1", "clusterName": "c" }]
                }]
            }]
        });
        let snapshot: ResourceSnapshot = serde_json::from_value(value).unwrap();
        let vpc = &snapshot.vpcs[0];
        assert_eq!(vpc.status, ResourceStatus::Active);
        assert!(vpc.terraform.terraform_managed);
        assert_eq!(vpc.terraform.tf_resource_address.as_deref(), Some("aws_vpc.main"));
        assert_eq!(vpc.subnets[0].subnet_type, SubnetType::Public);
        assert_eq!(vpc.subnets[0].resource_count(), 2);
        assert_eq!(vpc.subnets[0].ecs_containers[0].task_id, "task-1");
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let value = json!({
            "vpcs": [
                {
                    "id": "v1",
                    "cidrBlock": null,
                    "status": null,
                    "terraformManaged": null,
                    "elasticIps": null,
                    "subnets": [{
                        "id": "s1",
                        "subnetType": null,
                        "ec2Instances": null,
                        "rdsInstances": [{ "id": "db", "engine": null, "multiAz": null }],
                        "ecsContainers": null
                    }]
                },
                { "id": "v2", "subnets": null }
            ]
        });
        let snapshot: ResourceSnapshot = serde_json::from_value(value).unwrap();
        let v1 = &snapshot.vpcs[0];
        assert_eq!(v1.cidr_block, "");
        assert_eq!(v1.status, ResourceStatus::Unknown);
        assert!(!v1.terraform.terraform_managed);
        assert!(v1.elastic_ips.is_empty());
        let s1 = &v1.subnets[0];
        assert_eq!(s1.subnet_type, SubnetType::Unknown);
        assert!(s1.ec2_instances.is_empty());
        assert!(s1.ecs_containers.is_empty());
        assert_eq!(s1.rds_instances[0].engine, "");
        assert!(!s1.rds_instances[0].multi_az);
        assert!(snapshot.vpcs[1].subnets.is_empty());

        let snapshot: ResourceSnapshot = serde_json::from_str(r#"{ "vpcs": null }"#).unwrap();
        assert!(snapshot.vpcs.is_empty());
    }

    #[test]
    fn test_deserialize_bare_array() {
        let snapshot: ResourceSnapshot =
            serde_json::from_value(json!([{ "id": "vpc-1" }, { "id": "vpc-2" }])).unwrap();
        assert_eq!(snapshot.vpcs.len(), 2);
        assert!(snapshot.vpcs[1].subnets.is_empty());
    }

    #[test]
    fn test_deserialize_empty_object() {
        let snapshot: ResourceSnapshot = serde_json::from_str(r#"{ "generatedAt": "now" }"#).unwrap();
        assert!(snapshot.vpcs.is_empty());
        assert!(serde_json::from_str::<ResourceSnapshot>("42").is_err());
    }

    #[test]
    fn test_unrecognized_status_is_unknown() {
        let subnet: Subnet =
            serde_json::from_value(json!({ "id": "s", "status": "available", "subnetType": "isolated" }))
                .unwrap();
        assert_eq!(subnet.status, ResourceStatus::Unknown);
        assert_eq!(subnet.subnet_type, SubnetType::Unknown);
    }

    #[test]
    fn test_display_label_fallback() {
        assert_eq!(display_label(None, "i-1"), "i-1");
        assert_eq!(display_label(Some(""), "i-1"), "i-1");
        assert_eq!(display_label(Some("  "), "i-1"), "i-1");
        assert_eq!(display_label(Some("web"), "i-1"), "web");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("10.0.0.1")), "10.0.0.1");
    }
}
