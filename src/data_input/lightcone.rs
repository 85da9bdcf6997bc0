// src/data_input/lightcone.rs

use ndarray::{Array1, Array3, ArrayView3};

use crate::data_input::fields::{find_field, upsert_field, Field};
use crate::data_input::params::{CosmoParams, UserParams};
use crate::error::{PlotError, Result};

/// Prefix of the named global-history attributes.
pub const GLOBAL_PREFIX: &str = "global_";

/// Global histories exposed as named `global_*` attributes.
#[derive(Debug, Clone, Default)]
#[allow(non_snake_case)]
pub struct GlobalAttributes {
    pub global_xH: Option<Array1<f64>>,
    pub global_brightness_temp: Option<Array1<f64>>,
    pub global_Ts: Option<Array1<f64>>,
    pub global_density: Option<Array1<f64>>,
}

impl GlobalAttributes {
    /// Resolve a full `global_*` attribute name.
    pub fn by_name(&self, name: &str) -> Option<&Array1<f64>> {
        match name {
            "global_xH" => self.global_xH.as_ref(),
            "global_brightness_temp" => self.global_brightness_temp.as_ref(),
            "global_Ts" => self.global_Ts.as_ref(),
            "global_density" => self.global_density.as_ref(),
            _ => None,
        }
    }
}

/// Line-of-sight stack of coeval slices. The redshift axis is the last array axis.
#[derive(Debug, Clone)]
pub struct LightCone {
    pub user_params: UserParams,
    pub cosmo_params: CosmoParams,
    /// Redshift of every line-of-sight cell.
    pub lightcone_redshifts: Array1<f64>,
    /// Comoving distance (Mpc) of every line-of-sight cell.
    pub lightcone_distances: Array1<f64>,
    /// Redshifts at which the global quantities were evaluated.
    pub node_redshifts: Array1<f64>,
    pub global_attributes: GlobalAttributes,
    quantities: Vec<(Field, Array3<f32>)>,
    global_quantities: Vec<(String, Array1<f64>)>,
}

impl LightCone {
    /// Build a lightcone whose cell distances follow from `cosmo_params`.
    pub fn new(
        user_params: UserParams,
        cosmo_params: CosmoParams,
        lightcone_redshifts: Array1<f64>,
    ) -> Self {
        let lightcone_distances = lightcone_redshifts.mapv(|z| cosmo_params.comoving_distance(z));
        Self {
            user_params,
            cosmo_params,
            lightcone_redshifts,
            lightcone_distances,
            node_redshifts: Array1::zeros(0),
            global_attributes: GlobalAttributes::default(),
            quantities: Vec::new(),
            global_quantities: Vec::new(),
        }
    }

    pub fn with_distances(mut self, lightcone_distances: Array1<f64>) -> Self {
        self.lightcone_distances = lightcone_distances;
        self
    }

    pub fn with_node_redshifts(mut self, node_redshifts: Array1<f64>) -> Self {
        self.node_redshifts = node_redshifts;
        self
    }

    pub fn with_quantity(mut self, kind: Field, cube: Array3<f32>) -> Self {
        upsert_field(&mut self.quantities, kind, cube);
        self
    }

    pub fn with_global_quantity(mut self, name: impl Into<String>, series: Array1<f64>) -> Self {
        let name = name.into();
        match self.global_quantities.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = series,
            None => self.global_quantities.push((name, series)),
        }
        self
    }

    pub fn with_global_attributes(mut self, attrs: GlobalAttributes) -> Self {
        self.global_attributes = attrs;
        self
    }

    /// Registered quantities in declaration order.
    pub fn quantities(&self) -> Vec<Field> {
        self.quantities.iter().map(|(f, _)| *f).collect()
    }

    pub fn quantity(&self, kind: Field) -> Option<ArrayView3<'_, f32>> {
        find_field(&self.quantities, kind)
    }

    pub fn require_quantity(&self, kind: Field) -> Result<ArrayView3<'_, f32>> {
        self.quantity(kind).ok_or_else(|| PlotError::MissingField {
            kind: kind.name().to_string(),
            source_name: "LightCone".to_string(),
        })
    }

    /// Names of the global quantities in declaration order.
    pub fn global_quantity_names(&self) -> Vec<&str> {
        self.global_quantities.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn global_quantity(&self, name: &str) -> Option<&Array1<f64>> {
        self.global_quantities
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, series)| series)
    }

    /// Shape of the first registered quantity, `(HII_DIM, HII_DIM, n_los)` by convention.
    pub fn shape(&self) -> Option<[usize; 3]> {
        self.quantities.first().map(|(_, cube)| {
            let s = cube.shape();
            [s[0], s[1], s[2]]
        })
    }

    /// Comoving distances measured from the near edge of the lightcone.
    pub fn lightcone_coords(&self) -> Array1<f64> {
        let origin = self.lightcone_distances.first().copied().unwrap_or(0.0);
        self.lightcone_distances.mapv(|d| d - origin)
    }
}
