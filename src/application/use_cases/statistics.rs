//! Numeric helpers shared by the summarizers.
//!
//! Inputs are finite values produced by coercion; none of these functions
//! check for NaN.

use std::cmp::Ordering;

use crate::domain::table::Quartiles;

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sort ascending using total ordering
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// `p`-th quantile of pre-sorted data, R-7 linear interpolation.
///
/// With `h = (n - 1) * p`, `j = floor(h)` and `g = h - j` the result is
/// `(1 - g) * x[j] + g * x[j + 1]`.
pub fn quantile_sorted(sorted_data: &[f64], p: f64) -> Option<f64> {
    let n = sorted_data.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted_data[0]);
    }

    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        Some(sorted_data[n - 1])
    } else {
        Some((1.0 - g) * sorted_data[j] + g * sorted_data[j + 1])
    }
}

/// Q1, median, Q3 and the `multiplier`-scaled IQR fence
pub fn quartiles(sorted_data: &[f64], multiplier: f64) -> Option<Quartiles> {
    let q1 = quantile_sorted(sorted_data, 0.25)?;
    let median = quantile_sorted(sorted_data, 0.5)?;
    let q3 = quantile_sorted(sorted_data, 0.75)?;
    let iqr = q3 - q1;

    Some(Quartiles {
        q1,
        median,
        q3,
        iqr,
        lower_fence: q1 - multiplier * iqr,
        upper_fence: q3 + multiplier * iqr,
    })
}

/// Pearson sample correlation.
///
/// `None` for mismatched lengths, fewer than two pairs or zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = covariance / (var_x.sqrt() * var_y.sqrt());
    Some(r.clamp(-1.0, 1.0))
}
