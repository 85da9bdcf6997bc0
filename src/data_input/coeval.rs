// src/data_input/coeval.rs

use ndarray::{Array3, ArrayView3};

use crate::data_input::fields::{find_field, upsert_field, Field};
use crate::data_input::params::UserParams;
use crate::error::{PlotError, Result};

/// Anything a coeval slice plot can read a 3D field from.
pub trait SliceSource {
    /// Name used in error messages ("IonizedBox", "Coeval", ...).
    fn source_name(&self) -> &str;
    fn user_params(&self) -> &UserParams;
    /// Field plotted when the caller does not name one.
    fn default_field(&self) -> Option<Field>;
    fn field(&self, kind: Field) -> Option<ArrayView3<'_, f32>>;
    fn field_names(&self) -> Vec<Field>;

    fn box_len(&self) -> f64 {
        self.user_params().BOX_LEN
    }

    /// Look up `kind`, failing with `MissingField` when it is absent.
    fn require_field(&self, kind: Field) -> Result<ArrayView3<'_, f32>> {
        self.field(kind).ok_or_else(|| PlotError::MissingField {
            kind: kind.name().to_string(),
            source_name: self.source_name().to_string(),
        })
    }
}

/// A single simulation output holding one family of fields, in declaration order.
#[derive(Debug, Clone)]
pub struct OutputStruct {
    pub name: String,
    pub redshift: f64,
    pub user_params: UserParams,
    fields: Vec<(Field, Array3<f32>)>,
}

impl OutputStruct {
    pub fn new(name: impl Into<String>, redshift: f64, user_params: UserParams) -> Self {
        Self {
            name: name.into(),
            redshift,
            user_params,
            fields: Vec::new(),
        }
    }

    /// Add (or replace) a field; new fields keep declaration order.
    pub fn with_field(mut self, kind: Field, cube: Array3<f32>) -> Self {
        upsert_field(&mut self.fields, kind, cube);
        self
    }
}

impl SliceSource for OutputStruct {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn user_params(&self) -> &UserParams {
        &self.user_params
    }

    fn default_field(&self) -> Option<Field> {
        self.fields.first().map(|(f, _)| *f)
    }

    fn field(&self, kind: Field) -> Option<ArrayView3<'_, f32>> {
        find_field(&self.fields, kind)
    }

    fn field_names(&self) -> Vec<Field> {
        self.fields.iter().map(|(f, _)| *f).collect()
    }
}

/// All boxes of a run at a single redshift.
#[derive(Debug, Clone)]
pub struct Coeval {
    pub redshift: f64,
    pub user_params: UserParams,
    fields: Vec<(Field, Array3<f32>)>,
}

impl Coeval {
    pub fn new(redshift: f64, user_params: UserParams) -> Self {
        Self {
            redshift,
            user_params,
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, kind: Field, cube: Array3<f32>) -> Self {
        upsert_field(&mut self.fields, kind, cube);
        self
    }
}

impl SliceSource for Coeval {
    fn source_name(&self) -> &str {
        "Coeval"
    }

    fn user_params(&self) -> &UserParams {
        &self.user_params
    }

    fn default_field(&self) -> Option<Field> {
        Some(Field::BrightnessTemp)
    }

    fn field(&self, kind: Field) -> Option<ArrayView3<'_, f32>> {
        find_field(&self.fields, kind)
    }

    fn field_names(&self) -> Vec<Field> {
        self.fields.iter().map(|(f, _)| *f).collect()
    }
}
