// src/data_input/params.rs

use serde::{Deserialize, Serialize};

use crate::data_analysis::cosmology;

/// Box geometry shared by every simulation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
#[serde(default)]
pub struct UserParams {
    /// Side length of the simulation box in Mpc.
    pub BOX_LEN: f64,
    /// Cells per side of the low-resolution grid.
    pub HII_DIM: usize,
}

impl Default for UserParams {
    fn default() -> Self {
        Self {
            BOX_LEN: 300.0,
            HII_DIM: 200,
        }
    }
}

/// Flat Lambda-CDM cosmology (Planck 2018 defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
#[serde(default)]
pub struct CosmoParams {
    pub SIGMA_8: f64,
    pub hlittle: f64,
    pub OMm: f64,
    pub OMb: f64,
    pub POWER_INDEX: f64,
}

impl Default for CosmoParams {
    fn default() -> Self {
        Self {
            SIGMA_8: 0.8102,
            hlittle: 0.6766,
            OMm: 0.30964144154550644,
            OMb: 0.04897468161869667,
            POWER_INDEX: 0.9665,
        }
    }
}

impl CosmoParams {
    /// Hubble constant in km/s/Mpc.
    pub fn h0(&self) -> f64 {
        100.0 * self.hlittle
    }

    /// Line-of-sight comoving distance to redshift `z`, in Mpc.
    pub fn comoving_distance(&self, z: f64) -> f64 {
        cosmology::comoving_distance(self.h0(), self.OMm, z)
    }
}
