// src/data_input/fields.rs

use std::fmt;
use std::str::FromStr;

use ndarray::{Array3, ArrayView3};
use serde::{Deserialize, Serialize};

use crate::colormap::Colormap;
use crate::constants::{
    BRIGHTNESS_TEMP_CBAR_LABEL, IONIZED_FRACTION_CBAR_LABEL, NEUTRAL_FRACTION_CBAR_LABEL,
};
use crate::error::PlotError;

/// Named 3D quantities a snapshot or lightcone can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "brightness_temp")]
    BrightnessTemp,
    #[serde(rename = "xH_box")]
    XhBox,
    #[serde(rename = "Ts_box")]
    TsBox,
    #[serde(rename = "dNrec_box")]
    DNrecBox,
    #[serde(rename = "z_re_box")]
    ZReBox,
    #[serde(rename = "Gamma12_box")]
    Gamma12Box,
    #[serde(rename = "density")]
    Density,
    #[serde(rename = "velocity")]
    Velocity,
    #[serde(rename = "Nion_box")]
    NionBox,
    #[serde(rename = "Fcoll")]
    Fcoll,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::BrightnessTemp,
        Field::XhBox,
        Field::TsBox,
        Field::DNrecBox,
        Field::ZReBox,
        Field::Gamma12Box,
        Field::Density,
        Field::Velocity,
        Field::NionBox,
        Field::Fcoll,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::BrightnessTemp => "brightness_temp",
            Field::XhBox => "xH_box",
            Field::TsBox => "Ts_box",
            Field::DNrecBox => "dNrec_box",
            Field::ZReBox => "z_re_box",
            Field::Gamma12Box => "Gamma12_box",
            Field::Density => "density",
            Field::Velocity => "velocity",
            Field::NionBox => "Nion_box",
            Field::Fcoll => "Fcoll",
        }
    }

    /// Colour map used for this field in multi-panel lightcone plots.
    pub fn panel_colormap(&self) -> Colormap {
        match self {
            Field::BrightnessTemp => Colormap::Eor,
            Field::TsBox => Colormap::Reds,
            Field::XhBox | Field::DNrecBox | Field::ZReBox => Colormap::Magma,
            Field::Gamma12Box => Colormap::Cubehelix,
            _ => Colormap::Viridis,
        }
    }

    /// Default colourbar label on a coeval slice.
    pub fn coeval_cbar_label(&self) -> Option<&'static str> {
        match self {
            Field::BrightnessTemp => Some(BRIGHTNESS_TEMP_CBAR_LABEL),
            Field::XhBox => Some(IONIZED_FRACTION_CBAR_LABEL),
            _ => None,
        }
    }

    /// Default colourbar label on a lightcone slice.
    pub fn lightcone_cbar_label(&self) -> Option<&'static str> {
        match self {
            Field::BrightnessTemp => Some(BRIGHTNESS_TEMP_CBAR_LABEL),
            Field::XhBox => Some(NEUTRAL_FRACTION_CBAR_LABEL),
            _ => None,
        }
    }

    /// Parse a field name, reporting it as missing from `source_name` when unknown.
    pub fn lookup(kind: &str, source_name: &str) -> Result<Field, PlotError> {
        kind.parse().map_err(|_| PlotError::MissingField {
            kind: kind.to_string(),
            source_name: source_name.to_string(),
        })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| format!("unknown field '{s}'"))
    }
}

/// Insert `cube` under `kind`, replacing an existing entry in place so
/// declaration order is kept.
pub(crate) fn upsert_field(fields: &mut Vec<(Field, Array3<f32>)>, kind: Field, cube: Array3<f32>) {
    match fields.iter_mut().find(|(f, _)| *f == kind) {
        Some(slot) => slot.1 = cube,
        None => fields.push((kind, cube)),
    }
}

pub(crate) fn find_field(fields: &[(Field, Array3<f32>)], kind: Field) -> Option<ArrayView3<'_, f32>> {
    fields
        .iter()
        .find(|(f, _)| *f == kind)
        .map(|(_, cube)| cube.view())
}
