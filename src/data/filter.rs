// ---------------------------------------------------------------------------
// Moving-average filter (full convolution with a uniform kernel)
// ---------------------------------------------------------------------------

/// Convolve `samples` with a kernel of `width` weights of `1 / width`.
///
/// Full mode: the output has `samples.len() + width - 1` points, the first
/// and last `width - 1` of which only partially overlap the input. Those edge
/// points are the window sum divided by `width`. Full windows are averaged as
/// offsets from their first sample, so a constant input comes back bit-exact
/// wherever the window lies fully inside it.
///
/// A `width` of zero is treated as one (identity filter).
pub fn moving_average(samples: &[f64], width: usize) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }
    let width = width.max(1);
    let last = samples.len() - 1;
    let scale = width as f64;

    (0..samples.len() + width - 1)
        .map(|n| {
            let lo = n.saturating_sub(width - 1);
            let hi = n.min(last);
            let window = &samples[lo..=hi];
            if window.len() == width {
                let anchor = window[0];
                anchor + window.iter().map(|x| x - anchor).sum::<f64>() / scale
            } else {
                window.iter().sum::<f64>() / scale
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::moving_average;

    #[test]
    fn output_length_is_full_convolution() {
        let out = moving_average(&[0.0; 500], 10);
        assert_eq!(out.len(), 509);
    }

    #[test]
    fn constant_input_is_preserved_inside_window() {
        let constants = [
            1.0, -2.5, 0.0, 1024.0, 0.1, 0.3, 1e-3, 3.7, 4.99, -0.7, 1e-6, 1.3e-6, 7.77e-7,
        ];
        for v in constants {
            let out = moving_average(&vec![v; 50], 10);
            for (i, &o) in out[9..50].iter().enumerate() {
                assert_eq!(o.to_bits(), v.to_bits(), "constant {v}, index {}", i + 9);
            }
        }
    }

    #[test]
    fn constant_drain_currents_are_preserved_for_many_values() {
        for k in 1..2000 {
            let v = k as f64 * 1e-6 / 7.0;
            let out = moving_average(&vec![v; 30], 10);
            assert!(out[9..30].iter().all(|&o| o == v), "constant {v}");
        }
    }

    #[test]
    fn edges_ramp_up_and_down() {
        let out = moving_average(&[4.0, 4.0, 4.0, 4.0], 2);
        assert_eq!(out, vec![2.0, 4.0, 4.0, 4.0, 2.0]);
    }

    #[test]
    fn matches_direct_convolution() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let out = moving_average(&x, 3);
        let expected = [1.0 / 3.0, 1.0, 2.0, 3.0, 4.0, 3.0, 5.0 / 3.0];
        assert_eq!(out.len(), expected.len());
        for (o, e) in out.iter().zip(expected.iter()) {
            assert!((o - e).abs() < 1e-12, "{o} vs {e}");
        }
    }

    #[test]
    fn no_nan_for_finite_input() {
        let x: Vec<f64> = (0..500).map(|i| (i as f64 * 0.01).sin()).collect();
        assert!(moving_average(&x, 10).iter().all(|v| v.is_finite()));
    }

    #[test]
    fn empty_and_zero_width() {
        assert!(moving_average(&[], 10).is_empty());
        assert_eq!(moving_average(&[1.0, 2.0], 0), vec![1.0, 2.0]);
    }
}
