// src/plot_functions/plot_global_history.rs

use log::{debug, warn};
use ndarray::Array1;

use crate::constants::{COLOR_LINE_MAIN, GLOBAL_HISTORY_FIGSIZE_IN, LINE_WIDTH_PLOT, REDSHIFT_LABEL};
use crate::data_input::{LightCone, GLOBAL_PREFIX};
use crate::error::{PlotError, Result};
use crate::plot_framework::{AxesId, Figure, FigureOptions, PlotSeries};

/// Find the global series called `kind`.
///
/// Checked in order: the lightcone's global quantities, then the `global_*`
/// attribute named `kind` (when it already carries the prefix) or `global_{kind}`.
pub fn resolve_global_quantity<'a>(lightcone: &'a LightCone, kind: &str) -> Result<&'a Array1<f64>> {
    if let Some(series) = lightcone.global_quantity(kind) {
        return Ok(series);
    }
    let attrs = &lightcone.global_attributes;
    let found = if kind.starts_with(GLOBAL_PREFIX) {
        attrs.by_name(kind)
    } else {
        attrs.by_name(&format!("{GLOBAL_PREFIX}{kind}"))
    };
    found.ok_or_else(|| PlotError::UnresolvedGlobalQuantity(kind.to_string()))
}

/// Plot a global history against node redshift on a new 4x7 inch figure.
pub fn plot_global_history(
    lightcone: &LightCone,
    kind: Option<&str>,
    ylabel: Option<&str>,
) -> Result<(Figure, AxesId)> {
    let (w, h) = GLOBAL_HISTORY_FIGSIZE_IN;
    let (mut fig, ax) = Figure::new(FigureOptions::from_inches(w, h));
    plot_global_history_on(&mut fig, ax, lightcone, kind, ylabel)?;
    Ok((fig, ax))
}

/// Plot a global history onto an existing panel.
///
/// `kind` defaults to the first global quantity. `ylabel` defaults to `kind`;
/// `Some("")` hides it.
pub fn plot_global_history_on(
    fig: &mut Figure,
    ax: AxesId,
    lightcone: &LightCone,
    kind: Option<&str>,
    ylabel: Option<&str>,
) -> Result<()> {
    let kind = match kind {
        Some(kind) => kind,
        None => lightcone
            .global_quantity_names()
            .first()
            .copied()
            .ok_or_else(|| PlotError::UnresolvedGlobalQuantity("<first global quantity>".to_string()))?,
    };
    let series = resolve_global_quantity(lightcone, kind)?;

    let redshifts = &lightcone.node_redshifts;
    if redshifts.len() != series.len() {
        warn!(
            "Global quantity {kind} has {} values but there are {} node redshifts; plotting the overlap",
            series.len(),
            redshifts.len()
        );
    }
    let data: Vec<(f64, f64)> = redshifts.iter().copied().zip(series.iter().copied()).collect();

    let axes = fig.axes_mut(ax)?;
    axes.plot(PlotSeries {
        data,
        label: kind.to_string(),
        color: COLOR_LINE_MAIN,
        stroke_width: LINE_WIDTH_PLOT,
    });
    axes.set_xlabel(REDSHIFT_LABEL);
    match ylabel.unwrap_or(kind) {
        "" => axes.y_label = None,
        label => axes.set_ylabel(label),
    }

    debug!("Composed global history of {kind} ({} points)", series.len().min(redshifts.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::{CosmoParams, GlobalAttributes, UserParams};
    use ndarray::array;

    fn lightcone() -> LightCone {
        LightCone::new(UserParams::default(), CosmoParams::default(), array![6.0, 7.0])
            .with_node_redshifts(array![12.0, 10.0, 8.0, 6.0])
            .with_global_quantity("xH", array![1.0, 0.9, 0.5, 0.1])
            .with_global_quantity("brightness_temp", array![-100.0, -50.0, -10.0, 0.0])
            .with_global_attributes(GlobalAttributes {
                global_Ts: Some(array![20.0, 40.0, 80.0, 160.0]),
                global_xH: Some(array![9.0, 9.0, 9.0, 9.0]),
                ..Default::default()
            })
    }

    #[test]
    fn test_direct_key_wins() {
        let lc = lightcone();
        assert_eq!(resolve_global_quantity(&lc, "xH").unwrap(), &array![1.0, 0.9, 0.5, 0.1]);
    }

    #[test]
    fn test_prefixed_attribute_fallback() {
        let lc = lightcone();
        let ts = array![20.0, 40.0, 80.0, 160.0];
        assert_eq!(resolve_global_quantity(&lc, "Ts").unwrap(), &ts);
        assert_eq!(resolve_global_quantity(&lc, "global_Ts").unwrap(), &ts);
        assert_eq!(resolve_global_quantity(&lc, "global_xH").unwrap(), &array![9.0, 9.0, 9.0, 9.0]);
    }

    #[test]
    fn test_unresolvable_kind() {
        let lc = lightcone();
        for kind in ["density", "global_density", "Gamma12"] {
            assert!(matches!(
                plot_global_history(&lc, Some(kind), None),
                Err(PlotError::UnresolvedGlobalQuantity(k)) if k == kind
            ));
        }
    }

    #[test]
    fn test_default_kind_is_first_global_quantity() {
        let (fig, ax) = plot_global_history(&lightcone(), None, None).unwrap();
        let axes = fig.axes(ax).unwrap();
        assert_eq!(axes.series.len(), 1);
        assert_eq!(axes.series[0].label, "xH");
        assert_eq!(axes.series[0].data[1], (10.0, 0.9));
        assert_eq!(axes.x_label.as_deref(), Some("Redshift"));
        assert_eq!(axes.y_label.as_deref(), Some("xH"));
        assert_eq!(fig.size(), (400, 700));
    }

    #[test]
    fn test_ylabel_override() {
        let lc = lightcone();
        let (fig, ax) = plot_global_history(&lc, Some("brightness_temp"), Some("dT_b [mK]")).unwrap();
        assert_eq!(fig.axes(ax).unwrap().y_label.as_deref(), Some("dT_b [mK]"));
        let (fig, ax) = plot_global_history(&lc, Some("brightness_temp"), Some("")).unwrap();
        assert_eq!(fig.axes(ax).unwrap().y_label, None);
    }

    #[test]
    fn test_no_global_quantities() {
        let lc = LightCone::new(UserParams::default(), CosmoParams::default(), array![6.0, 7.0]);
        assert!(matches!(
            plot_global_history(&lc, None, None),
            Err(PlotError::UnresolvedGlobalQuantity(_))
        ));
    }

    #[test]
    fn test_length_mismatch_plots_overlap() {
        let lc = LightCone::new(UserParams::default(), CosmoParams::default(), array![6.0, 7.0])
            .with_node_redshifts(array![10.0, 8.0, 6.0])
            .with_global_quantity("xH", array![1.0, 0.5]);
        let (fig, ax) = plot_global_history(&lc, None, None).unwrap();
        assert_eq!(fig.axes(ax).unwrap().series[0].data, vec![(10.0, 1.0), (8.0, 0.5)]);
    }
}
