//! Volume Weighted Average Price.
//!
//! VWAP[i] = Σ(TP[j] * V[j]) / Σ V[j] for j in 0..=i, TP = (H + L + C) / 3.
//! Running average from the first sample, so there is no warm-up and the
//! output is as long as the input. While cumulative volume is still zero the
//! bar's own typical price is reported.

use crate::domain::error::IndicatorError;
use crate::domain::indicator::{IndicatorKind, require_aligned, require_len};

pub fn calculate_vwap(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    volumes: &[f64],
) -> Result<Vec<f64>, IndicatorError> {
    require_aligned("highs", highs.len(), closes.len())?;
    require_aligned("lows", lows.len(), closes.len())?;
    require_aligned("volumes", volumes.len(), closes.len())?;
    require_len(IndicatorKind::Vwap, closes.len(), 1)?;

    let mut cum_tp_vol = 0.0;
    let mut cum_vol = 0.0;

    Ok((0..closes.len())
        .map(|i| {
            let typical = (highs[i] + lows[i] + closes[i]) / 3.0;
            cum_tp_vol += typical * volumes[i];
            cum_vol += volumes[i];

            if cum_vol > 0.0 {
                cum_tp_vol / cum_vol
            } else {
                typical
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn vwap_output_length_matches_input() {
        let closes = [10.0, 11.0, 12.0];
        let values = calculate_vwap(&closes, &closes, &closes, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn vwap_weights_by_volume() {
        let highs = [12.0, 22.0];
        let lows = [8.0, 18.0];
        let closes = [10.0, 20.0];
        let values = calculate_vwap(&highs, &lows, &closes, &[100.0, 300.0]).unwrap();

        assert_relative_eq!(values[0], 10.0);
        assert_relative_eq!(values[1], (10.0 * 100.0 + 20.0 * 300.0) / 400.0);
    }

    #[test]
    fn vwap_zero_volume_uses_typical_price() {
        let highs = [12.0, 22.0];
        let lows = [9.0, 18.0];
        let closes = [9.0, 20.0];
        let values = calculate_vwap(&highs, &lows, &closes, &[0.0, 0.0]).unwrap();

        assert_relative_eq!(values[0], 10.0);
        assert_relative_eq!(values[1], 20.0);
    }

    #[test]
    fn vwap_misaligned_volumes() {
        let closes = [10.0, 11.0];
        let err = calculate_vwap(&closes, &closes, &closes, &[1.0]).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::MisalignedInput {
                series: "volumes",
                len: 1,
                expected: 2,
            }
        );
    }

    #[test]
    fn vwap_empty_input() {
        assert!(matches!(
            calculate_vwap(&[], &[], &[], &[]),
            Err(IndicatorError::InsufficientData { need: 1, .. })
        ));
    }

    proptest! {
        #[test]
        fn vwap_constant_volume_is_running_mean_of_typical_price(
            closes in prop::collection::vec(1.0f64..500.0, 1..60),
            volume in 1.0f64..10_000.0,
        ) {
            let highs: Vec<f64> = closes.iter().map(|c| c + 2.0).collect();
            let lows: Vec<f64> = closes.iter().map(|c| c - 1.0).collect();
            let volumes = vec![volume; closes.len()];

            let values = calculate_vwap(&highs, &lows, &closes, &volumes).unwrap();

            let mut sum = 0.0;
            for (i, value) in values.iter().enumerate() {
                sum += (highs[i] + lows[i] + closes[i]) / 3.0;
                let mean = sum / (i + 1) as f64;
                prop_assert!((value - mean).abs() < 1e-6 * mean.max(1.0));
            }
        }
    }
}
