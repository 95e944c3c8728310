//! Terraform coverage: how much of a snapshot is managed as code.

use serde::Serialize;

use super::{ResourceSnapshot, TerraformInfo};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KindCoverage {
    pub total: usize,
    pub managed: usize,
}

impl KindCoverage {
    fn record(&mut self, tf: &TerraformInfo) {
        self.total += 1;
        if tf.terraform_managed {
            self.managed += 1;
        }
    }

    pub fn unmanaged(&self) -> usize {
        self.total - self.managed
    }

    fn add(&mut self, other: KindCoverage) {
        self.total += other.total;
        self.managed += other.managed;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerraformCoverage {
    pub vpc: KindCoverage,
    pub subnet: KindCoverage,
    pub ec2: KindCoverage,
    pub rds: KindCoverage,
    pub ecs: KindCoverage,
    pub nat_gateway: KindCoverage,
    pub internet_gateway: KindCoverage,
    pub elastic_ip: KindCoverage,
    pub overall: KindCoverage,
    pub managed_percent: f64,
}

impl TerraformCoverage {
    fn kinds(&self) -> [KindCoverage; 8] {
        [
            self.vpc,
            self.subnet,
            self.ec2,
            self.rds,
            self.ecs,
            self.nat_gateway,
            self.internet_gateway,
            self.elastic_ip,
        ]
    }
}

/// Count managed vs. total resources per kind.
pub fn terraform_coverage(snapshot: &ResourceSnapshot) -> TerraformCoverage {
    let mut cov = TerraformCoverage::default();

    for vpc in &snapshot.vpcs {
        cov.vpc.record(&vpc.terraform);
        if let Some(igw) = &vpc.internet_gateway {
            cov.internet_gateway.record(&igw.terraform);
        }
        for eip in &vpc.elastic_ips {
            cov.elastic_ip.record(&eip.terraform);
        }
        for subnet in &vpc.subnets {
            cov.subnet.record(&subnet.terraform);
            if let Some(nat) = &subnet.nat_gateway {
                cov.nat_gateway.record(&nat.terraform);
            }
            subnet.ec2_instances.iter().for_each(|r| cov.ec2.record(&r.terraform));
            subnet.rds_instances.iter().for_each(|r| cov.rds.record(&r.terraform));
            subnet.ecs_containers.iter().for_each(|r| cov.ecs.record(&r.terraform));
        }
    }

    let mut overall = KindCoverage::default();
    for kind in cov.kinds() {
        overall.add(kind);
    }
    cov.overall = overall;
    cov.managed_percent = if overall.total == 0 {
        0.0
    } else {
        overall.managed as f64 * 100.0 / overall.total as f64
    };
    cov
}
