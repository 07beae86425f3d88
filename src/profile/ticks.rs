//! Axis ceilings aligned to "nice" tick steps.
//!
//! Tick placement follows the usual max-n-locator heuristic of plotting libraries: at most nine
//! bins, step sizes from `{1, 2, 2.5, 5, 10}` scaled to the decade of the data range, and at
//! least two visible ticks.

const NBINS: f64 = 9.0;
const MIN_N_TICKS: usize = 2;
const EXTENDED_STEPS: [f64; 10] =
    [0.1, 0.2, 0.25, 0.5, 1.0, 2.0, 2.5, 5.0, 10.0, 20.0];

/// Returns the tick locations covering `[vmin, vmax]`.
pub fn tick_values(vmin: f64, vmax: f64) -> Vec<f64> {
    let (vmin, vmax) = nonsingular(vmin, vmax);
    let (scale, offset) = scale_range(vmin, vmax, NBINS);
    let (vmin, vmax) = (vmin - offset, vmax - offset);
    let raw_step = (vmax - vmin) / NBINS;
    let steps = EXTENDED_STEPS.iter().map(|s| s * scale).collect::<Vec<_>>();
    let istep = steps
        .iter()
        .position(|&step| step >= raw_step)
        .unwrap_or(steps.len() - 1);

    let mut ticks = Vec::new();
    // Start with the smallest step above the raw step and fall back to smaller ones until
    // enough ticks are visible.
    for &step in steps[..=istep].iter().rev() {
        let edge = Edge { step, offset };
        let best_vmin = divmod(vmin, step).0 * step;
        let low = edge.le(vmin - best_vmin) as i64;
        let high = edge.ge(vmax - best_vmin) as i64;
        ticks = (low..=high)
            .map(|i| i as f64 * step + best_vmin)
            .collect();
        let nticks = ticks
            .iter()
            .filter(|&&tick| tick <= vmax && tick >= vmin)
            .count();
        if nticks >= MIN_N_TICKS {
            break;
        }
    }
    ticks.into_iter().map(|tick| tick + offset).collect()
}

/// One major tick step past the last tick covering `max_value`.
///
/// A maximum of 0 yields 1.0. E.g. a maximum of 5 has ticks `0, 1, .., 5` and yields 6.
pub fn extended_limit(max_value: f64) -> f64 {
    if max_value == 0.0 {
        return 1.0;
    }
    let ticks = tick_values(0.0, max_value);
    if ticks.len() < 2 {
        return max_value * 1.1;
    }
    let step = ticks[1] - ticks[0];
    let mut last_tick = ticks[ticks.len() - 1];
    while last_tick < max_value {
        last_tick += step;
    }
    last_tick + step
}

fn nonsingular(vmin: f64, vmax: f64) -> (f64, f64) {
    const EXPANDER: f64 = 1e-13;
    const TINY: f64 = 1e-14;
    if !vmin.is_finite() || !vmax.is_finite() {
        return (-EXPANDER, EXPANDER);
    }
    let (vmin, vmax) = if vmax < vmin { (vmax, vmin) } else { (vmin, vmax) };
    let maxabs = vmin.abs().max(vmax.abs());
    if maxabs < (1e6 / TINY) * f64::MIN_POSITIVE {
        (-EXPANDER, EXPANDER)
    } else if vmax - vmin <= maxabs * TINY {
        if vmax == 0.0 && vmin == 0.0 {
            (-EXPANDER, EXPANDER)
        } else {
            (vmin - EXPANDER * vmin.abs(), vmax + EXPANDER * vmax.abs())
        }
    } else {
        (vmin, vmax)
    }
}

fn scale_range(vmin: f64, vmax: f64, n: f64) -> (f64, f64) {
    let dv = (vmax - vmin).abs();
    let meanv = (vmax + vmin) / 2.0;
    let offset = if meanv.abs() / dv < 100.0 {
        0.0
    } else {
        10f64.powf(meanv.abs().log10().floor()).copysign(meanv)
    };
    let scale = 10f64.powf((dv / n).log10().floor());
    (scale, offset)
}

/// Floor division with a non-negative remainder, `step` must be positive.
fn divmod(x: f64, step: f64) -> (f64, f64) {
    let m = x.rem_euclid(step);
    let div = (x - m) / step;
    let mut d = div.floor();
    if div - d > 0.5 {
        d += 1.0;
    }
    (d, m)
}

/// Tick edge arithmetic tolerant to the precision lost for large offsets.
struct Edge {
    step: f64,
    offset: f64,
}

impl Edge {
    fn closeto(&self, ms: f64, edge: f64) -> bool {
        let tol = if self.offset > 0.0 {
            let digits = (self.offset / self.step).log10();
            1e-10f64.max(10f64.powf(digits - 12.0)).min(0.4999)
        } else {
            1e-10
        };
        (ms - edge).abs() < tol
    }

    fn le(&self, x: f64) -> f64 {
        let (d, m) = divmod(x, self.step);
        if self.closeto(m / self.step, 1.0) {
            d + 1.0
        } else {
            d
        }
    }

    fn ge(&self, x: f64) -> f64 {
        let (d, m) = divmod(x, self.step);
        if self.closeto(m / self.step, 0.0) {
            d
        } else {
            d + 1.0
        }
    }
}
