// src/data_analysis/cosmology.rs

use crate::constants::{COMOVING_DISTANCE_STEPS_PER_UNIT_Z, SPEED_OF_LIGHT_KM_S};

/// Dimensionless Hubble rate E(z) of a flat matter + Lambda universe.
pub fn hubble_efunc(omega_m: f64, z: f64) -> f64 {
    let a_inv = 1.0 + z;
    (omega_m * a_inv * a_inv * a_inv + (1.0 - omega_m)).sqrt()
}

/// Line-of-sight comoving distance in Mpc for a flat Lambda-CDM cosmology.
///
/// Integrates c/H0 * 1/E(z') from 0 to `z` with composite Simpson's rule.
/// Negative redshifts yield negative distances.
pub fn comoving_distance(h0: f64, omega_m: f64, z: f64) -> f64 {
    if z == 0.0 || !z.is_finite() || h0 <= 0.0 {
        return 0.0;
    }
    let hubble_distance = SPEED_OF_LIGHT_KM_S / h0;

    // Simpson needs an even number of intervals
    let mut n = ((z.abs() * COMOVING_DISTANCE_STEPS_PER_UNIT_Z as f64).ceil() as usize).max(2);
    if n % 2 == 1 {
        n += 1;
    }
    let h = z / n as f64;
    let f = |zp: f64| 1.0 / hubble_efunc(omega_m, zp);

    let mut sum = f(0.0) + f(z);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(i as f64 * h);
    }
    hubble_distance * sum * h / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_redshift_is_zero_distance() {
        assert_eq!(comoving_distance(67.66, 0.31, 0.0), 0.0);
    }

    #[test]
    fn test_einstein_de_sitter_closed_form() {
        // Omega_m = 1: D_C = 2c/H0 * (1 - 1/sqrt(1+z))
        let h0 = 70.0;
        let z = 3.0;
        let expected = 2.0 * SPEED_OF_LIGHT_KM_S / h0 * (1.0 - 1.0 / (1.0f64 + z).sqrt());
        let got = comoving_distance(h0, 1.0, z);
        assert!((got - expected).abs() / expected < 1e-6, "{got} vs {expected}");
    }

    #[test]
    fn test_planck_like_distance_to_z7() {
        // Flat LCDM with h=0.6766, Om=0.3096 gives roughly 8.8 Gpc to z=7.
        let d = comoving_distance(67.66, 0.30964144154550644, 7.0);
        assert!(d > 8600.0 && d < 9000.0, "distance {d}");
    }

    #[test]
    fn test_monotonic_in_redshift() {
        let mut prev = 0.0;
        for i in 1..40 {
            let d = comoving_distance(67.66, 0.31, i as f64 * 0.5);
            assert!(d > prev);
            prev = d;
        }
    }
}
