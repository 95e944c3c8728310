//! Container sizing for subnets and rows of subnets.

use crate::layout::{LayoutConfig, SizeI};
use crate::snapshot::Subnet;

/// Size of one row of same-type subnets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowDimensions {
    pub width: i32,
    /// Tallest subnet in the row; every subnet in the row is drawn at this height.
    pub height: i32,
    /// Per-subnet widths, in input order.
    pub subnet_widths: Vec<i32>,
}

impl RowDimensions {
    pub fn is_empty(&self) -> bool {
        self.subnet_widths.is_empty()
    }
}

/// Size a subnet needs to hold its resources in a fixed-column grid.
pub fn subnet_dimensions(subnet: &Subnet, cfg: &LayoutConfig) -> SizeI {
    let count = subnet.resource_count();
    if count == 0 {
        return cfg.subnet_min_size;
    }

    let cols = cfg.columns();
    let rows = saturating_i32(count.div_ceil(cols));
    let cols = saturating_i32(cols);
    let res = cfg.resource_size;
    let padding = cfg.subnet_padding.saturating_mul(2);

    SizeI {
        w: span(cols, res.w, cfg.resource_gap_x).saturating_add(padding),
        h: span(rows, res.h, cfg.resource_gap_y)
            .saturating_add(cfg.subnet_header_height)
            .saturating_add(padding),
    }
}

/// Extent of `n` cells of `size` separated by `gap`.
fn span(n: i32, size: i32, gap: i32) -> i32 {
    n.saturating_mul(size.saturating_add(gap)).saturating_sub(gap)
}

pub(crate) fn saturating_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Size of a left-to-right row of subnets.
pub fn subnet_row_dimensions(subnets: &[&Subnet], cfg: &LayoutConfig) -> RowDimensions {
    if subnets.is_empty() {
        return RowDimensions::default();
    }

    let sizes: Vec<SizeI> = subnets.iter().map(|s| subnet_dimensions(s, cfg)).collect();
    let gaps = saturating_i32(sizes.len() - 1).saturating_mul(cfg.subnet_gap);

    RowDimensions {
        width: sizes.iter().fold(gaps, |acc, s| acc.saturating_add(s.w)),
        height: sizes.iter().map(|s| s.h).max().unwrap_or(0),
        subnet_widths: sizes.iter().map(|s| s.w).collect(),
    }
}
