//! Hexagonal binning of 2-D points.
//!
//! Pointy-top hexagons of a fixed radius tile the plane starting at the
//! lower-left corner of the points' extent. Odd lattice rows are shifted
//! by half a column.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::domain::table::HexBin;

/// A numeric pair together with the raw cells it was parsed from
#[derive(Debug, Clone, Copy)]
pub struct PairPoint<'a> {
    pub x: f64,
    pub y: f64,
    pub raw_x: &'a str,
    pub raw_y: &'a str,
}

pub struct HexBinner {
    dx: f64,
    dy: f64,
}

impl HexBinner {
    pub fn new(radius: f64) -> Self {
        Self {
            dx: radius * 2.0 * (PI / 3.0).sin(),
            dy: radius * 1.5,
        }
    }

    /// Bins ordered by lattice row, then column
    pub fn bin(&self, points: &[PairPoint<'_>]) -> Vec<HexBin> {
        let Some(first) = points.first() else {
            return Vec::new();
        };
        let origin = points.iter().fold((first.x, first.y), |(ox, oy), p| {
            (ox.min(p.x), oy.min(p.y))
        });

        let mut cells: BTreeMap<(i64, i64), HexBin> = BTreeMap::new();
        for point in points {
            let (i, j) = self.cell(point.x - origin.0, point.y - origin.1);
            let bin = cells.entry((j, i)).or_insert_with(|| HexBin {
                center_x: origin.0 + (i as f64 + row_shift(j)) * self.dx,
                center_y: origin.1 + j as f64 * self.dy,
                count: 0,
                points: Vec::new(),
            });
            bin.count += 1;
            bin.points
                .push((point.raw_x.to_string(), point.raw_y.to_string()));
        }

        cells.into_values().collect()
    }

    /// Lattice cell (column, row) whose center is nearest to `(x, y)`
    fn cell(&self, x: f64, y: f64) -> (i64, i64) {
        let py = y / self.dy;
        let mut pj = round_half_up(py);
        let px = x / self.dx - row_shift(pj as i64);
        let mut pi = round_half_up(px);
        let py1 = py - pj;

        // Near a row boundary the neighbouring row may hold the closer center
        if py1.abs() * 3.0 > 1.0 {
            let px1 = px - pi;
            let pi2 = pi + if px < pi { -0.5 } else { 0.5 };
            let pj2 = pj + if py < pj { -1.0 } else { 1.0 };
            let px2 = px - pi2;
            let py2 = py - pj2;

            if px1 * px1 + py1 * py1 > px2 * px2 + py2 * py2 {
                pi = pi2 + if row_shift(pj as i64) > 0.0 { 0.5 } else { -0.5 };
                pj = pj2;
            }
        }

        (pi as i64, pj as i64)
    }
}

fn row_shift(row: i64) -> f64 {
    row.rem_euclid(2) as f64 / 2.0
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
