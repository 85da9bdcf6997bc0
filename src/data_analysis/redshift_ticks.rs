// src/data_analysis/redshift_ticks.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt;

use crate::constants::MAX_REDSHIFT_TICKS;
use crate::data_input::LightCone;

/// Integer redshifts spanned by `redshifts`, thinned so that at most
/// `MAX_REDSHIFT_TICKS` remain.
pub fn redshift_ticks(redshifts: &Array1<f64>) -> Vec<i64> {
    let z_min = *redshifts.min_skipnan();
    let z_max = *redshifts.max_skipnan();
    if !z_min.is_finite() || !z_max.is_finite() {
        return Vec::new();
    }

    let first = z_min.ceil() as i64;
    let last = z_max.trunc() as i64;
    if last < first {
        return Vec::new();
    }

    let count = (last - first + 1) as usize;
    let n_sep = count / MAX_REDSHIFT_TICKS + 1;
    (first..=last).step_by(n_sep).collect()
}

/// Tick positions along the line of sight of `lightcone`, as
/// (distance from the near edge in Mpc, redshift label).
pub fn redshift_tick_positions(lightcone: &LightCone) -> Vec<(f64, String)> {
    let origin = lightcone.lightcone_distances.first().copied().unwrap_or(0.0);
    redshift_ticks(&lightcone.lightcone_redshifts)
        .into_iter()
        .map(|z| {
            let d = lightcone.cosmo_params.comoving_distance(z as f64) - origin;
            (d, z.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::{CosmoParams, UserParams};
    use ndarray::array;

    #[test]
    fn test_ticks_cover_integer_range() {
        let z = Array1::linspace(6.2, 9.8, 50);
        assert_eq!(redshift_ticks(&z), vec![7, 8, 9]);
    }

    #[test]
    fn test_ticks_are_thinned_to_at_most_eight() {
        for top in 6..80 {
            let z = Array1::linspace(5.0, top as f64 + 0.5, 200);
            let ticks = redshift_ticks(&z);
            assert!(!ticks.is_empty());
            assert!(ticks.len() <= MAX_REDSHIFT_TICKS, "{} ticks for top={top}", ticks.len());
            assert_eq!(ticks[0], 5);
            assert!(*ticks.last().unwrap() <= top);
        }
    }

    #[test]
    fn test_sixteen_integers_take_every_third() {
        let z = array![5.0, 9.3, 14.7, 20.0];
        assert_eq!(redshift_ticks(&z), vec![5, 8, 11, 14, 17, 20]);
    }

    #[test]
    fn test_no_integer_inside_range() {
        assert!(redshift_ticks(&array![6.1, 6.5, 6.9]).is_empty());
        assert!(redshift_ticks(&Array1::<f64>::zeros(0)).is_empty());
    }

    #[test]
    fn test_tick_positions_are_offset_distances() {
        let cosmo = CosmoParams::default();
        let lc = LightCone::new(UserParams::default(), cosmo.clone(), Array1::linspace(6.0, 8.5, 30));
        let ticks = redshift_tick_positions(&lc);
        let labels: Vec<&str> = ticks.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(labels, vec!["6", "7", "8"]);
        assert!(ticks[0].0.abs() < 1e-6);
        let expected = cosmo.comoving_distance(8.0) - cosmo.comoving_distance(6.0);
        assert!((ticks[2].0 - expected).abs() < 1e-6);
    }
}
