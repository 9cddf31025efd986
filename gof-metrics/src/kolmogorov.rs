//! Null distribution of the two-sided one-sample Kolmogorov-Smirnov statistic.
//!
//! Small and medium samples use the exact method of Marsaglia, Tsang and Wang
//! (2003), "Evaluating Kolmogorov's Distribution", Journal of Statistical
//! Software 8(18). Larger samples fall back to the limiting Kolmogorov
//! distribution of `sqrt(n) * D`.

use std::f64::consts::PI;

const SCALE_UP: f64 = 1e140;
const SCALE_DOWN: f64 = 1e-140;
const SCALE_EXP: i32 = 140;

/// P(D_n < d) for a sample of size `n`.
pub fn exact_cdf(n: u64, d: f64) -> f64 {
    if n == 0 || d.is_nan() {
        return f64::NAN;
    }
    let nf = n as f64;
    // D_n is never below 1/(2n) and never above 1.
    if d <= 0.5 / nf {
        return 0.0;
    }
    if d >= 1.0 {
        return 1.0;
    }

    let s = d * d * nf;
    if s > 7.24 || (s > 3.76 && n > 99) {
        return 1.0 - 2.0 * (-(2.000071 + 0.331 / nf.sqrt() + 1.409 / nf) * s).exp();
    }

    let k = (nf * d) as usize + 1;
    let m = 2 * k - 1;
    let h = k as f64 - nf * d;

    let mut matrix = vec![0.0; m * m];
    for i in 0..m {
        for j in 0..m {
            if i + 1 >= j {
                matrix[i * m + j] = 1.0;
            }
        }
    }
    for i in 0..m {
        matrix[i * m] -= h.powi(i as i32 + 1);
        matrix[(m - 1) * m + i] -= h.powi((m - i) as i32);
    }
    if 2.0 * h - 1.0 > 0.0 {
        matrix[(m - 1) * m] += (2.0 * h - 1.0).powi(m as i32);
    }
    for i in 0..m {
        for j in 0..m {
            if i + 1 > j {
                for g in 1..=(i + 1 - j) {
                    matrix[i * m + j] /= g as f64;
                }
            }
        }
    }

    let (power, mut exponent) = matrix_power(&matrix, m, n);
    let mut value = power[(k - 1) * m + k - 1];
    for i in 1..=n {
        value = value * i as f64 / nf;
        if value < SCALE_DOWN {
            value *= SCALE_UP;
            exponent -= SCALE_EXP;
        }
    }

    (value * 10_f64.powi(exponent)).clamp(0.0, 1.0)
}

/// Survival function of the limiting Kolmogorov distribution, P(K > x).
pub fn asymptotic_sf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 1.0;
    }

    if x < 1.0 {
        // Jacobi theta form converges quickly for small x.
        let factor = (2.0 * PI).sqrt() / x;
        let w = -PI * PI / (8.0 * x * x);
        let cdf: f64 = (1..=20)
            .map(|k| {
                let odd = (2 * k - 1) as f64;
                (odd * odd * w).exp()
            })
            .sum::<f64>()
            * factor;
        return (1.0 - cdf).clamp(0.0, 1.0);
    }

    let mut sum = 0.0;
    for k in 1..=100 {
        let kf = k as f64;
        let term = (-2.0 * kf * kf * x * x).exp();
        if k % 2 == 1 {
            sum += term;
        } else {
            sum -= term;
        }
        if term < 1e-16 {
            break;
        }
    }
    (2.0 * sum).clamp(0.0, 1.0)
}

/// Two-sided p-value for statistic `d` on a sample of size `n`.
pub fn p_value(n: u64, d: f64, exact_max_sample: u64) -> f64 {
    if n <= exact_max_sample {
        (1.0 - exact_cdf(n, d)).clamp(0.0, 1.0)
    } else {
        asymptotic_sf(d * (n as f64).sqrt())
    }
}

fn matrix_multiply(a: &[f64], b: &[f64], m: usize) -> Vec<f64> {
    let mut c = vec![0.0; m * m];
    for i in 0..m {
        for k in 0..m {
            let aik = a[i * m + k];
            if aik == 0.0 {
                continue;
            }
            for j in 0..m {
                c[i * m + j] += aik * b[k * m + j];
            }
        }
    }
    c
}

/// `a^n` with a base-10 exponent carried separately to avoid overflow.
fn matrix_power(a: &[f64], m: usize, n: u64) -> (Vec<f64>, i32) {
    if n == 1 {
        return (a.to_vec(), 0);
    }

    let (half, half_exp) = matrix_power(a, m, n / 2);
    let squared = matrix_multiply(&half, &half, m);
    let mut exponent = 2 * half_exp;
    let mut result = if n % 2 == 0 {
        squared
    } else {
        matrix_multiply(a, &squared, m)
    };

    let centre = (m / 2) * m + m / 2;
    if result[centre] > SCALE_UP {
        for value in result.iter_mut() {
            *value *= SCALE_DOWN;
        }
        exponent += SCALE_EXP;
    }

    (result, exponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_observation_is_uniform_on_half_to_one() {
        // For n = 1, D = max(U, 1 - U), so P(D < d) = 2d - 1.
        assert_abs_diff_eq!(exact_cdf(1, 0.75), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(exact_cdf(1, 0.6), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(exact_cdf(10, 0.01), 0.0);
        assert_eq!(exact_cdf(10, 1.0), 1.0);
        assert_eq!(p_value(10, 0.0, 100), 1.0);
    }

    #[test]
    fn test_exact_matches_published_value() {
        // Marsaglia, Tsang & Wang (2003): K(10, 0.274) = 0.6284796154565043
        assert_abs_diff_eq!(exact_cdf(10, 0.274), 0.628_479_615_456_504_3, epsilon = 1e-9);
    }

    #[test]
    fn test_asymptotic_series_agree_at_switch() {
        let below = asymptotic_sf(1.0 - 1e-9);
        let above = asymptotic_sf(1.0);
        assert_abs_diff_eq!(below, above, epsilon = 1e-8);
        // Kolmogorov distribution: P(K > 1.36) is about 0.05
        assert_abs_diff_eq!(asymptotic_sf(1.358_1), 0.05, epsilon = 1e-3);
    }

    #[test]
    fn test_exact_approaches_asymptotic_for_large_n() {
        let n = 2_000;
        let d = 1.0 / (n as f64).sqrt();
        let exact = 1.0 - exact_cdf(n, d);
        let asymptotic = asymptotic_sf(1.0);
        assert_abs_diff_eq!(exact, asymptotic, epsilon = 0.01);
    }

    #[test]
    fn test_p_value_decreases_with_statistic() {
        let small = p_value(100, 0.05, 10_000);
        let large = p_value(100, 0.2, 10_000);
        assert!(small > large);
    }
}
