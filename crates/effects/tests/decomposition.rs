use approx::assert_relative_eq;
use slr_effects::{
    Adjustment, Correction, EffectError, Scenario, corrected_series, counterfactual_design,
    predict_scenario, term_effect, tide_effect, wind_effect_and_anomaly,
};
use slr_fit::{CovType, FitResult, FitSpec};
use slr_series::Observations;
use slr_terms::{NODAL_PERIOD, Term, TermConfig, TrendShape, build_design};

fn station() -> Observations {
    let years: Vec<f64> = (1900..2000).map(|y| y as f64).collect();
    let u2: Vec<f64> = (0..100).map(|i| ((i * 17) % 23) as f64 - 11.0).collect();
    let v2: Vec<f64> = (0..100).map(|i| ((i * 29) % 19) as f64 - 9.0).collect();
    let height: Vec<f64> = years
        .iter()
        .zip(u2.iter().zip(&v2))
        .enumerate()
        .map(|(i, (y, (u, v)))| {
            let t = y - 1970.0;
            let nodal = 12.0 * (2.0 * std::f64::consts::PI * t / NODAL_PERIOD).cos();
            7000.0 + 1.9 * t + nodal + 3.0 * u - 1.5 * v + ((i * 7) % 5) as f64
        })
        .collect();
    Observations::new(years)
        .unwrap()
        .with_column("height", height)
        .unwrap()
        .with_column("u2", u2)
        .unwrap()
        .with_column("v2", v2)
        .unwrap()
}

fn fit(with_wind: bool) -> FitResult {
    let cfg = TermConfig::new(TrendShape::Linear { epoch: 1970 }).with_wind(with_wind);
    let dm = build_design(&station(), &cfg).unwrap();
    FitSpec::ols(CovType::Hc0).fit(&dm).unwrap()
}

#[test]
fn tide_effect_is_bit_identical_across_calls() {
    let fit = fit(true);
    let a = tide_effect(&fit).unwrap();
    let b = tide_effect(&fit).unwrap();
    assert_eq!(a.len(), 100);
    assert!(
        a.iter()
            .zip(b.iter())
            .all(|(x, y)| x.to_bits() == y.to_bits())
    );
}

#[test]
fn tide_effect_is_weighted_nodal_columns() {
    let fit = fit(true);
    let effect = tide_effect(&fit).unwrap();
    let bu = fit.param(Term::NodalU).unwrap();
    let bv = fit.param(Term::NodalV).unwrap();
    let cu = fit.design().column(Term::NodalU).unwrap();
    let cv = fit.design().column(Term::NodalV).unwrap();
    for i in 0..effect.len() {
        assert_relative_eq!(effect[i], bu * cu[i] + bv * cv[i], epsilon = 1e-12);
    }
    // the injected cycle is a pure cosine with amplitude 12
    assert_relative_eq!(bu, 12.0, epsilon = 1.0);
}

#[test]
fn wind_anomaly_has_zero_mean() {
    let fit = fit(true);
    let wind = wind_effect_and_anomaly(&fit).unwrap();
    assert_relative_eq!(wind.anomaly.mean().unwrap(), 0.0, epsilon = 1e-9);
    let shift = wind.effect[0] - wind.anomaly[0];
    for i in 0..wind.effect.len() {
        assert_relative_eq!(wind.effect[i] - wind.anomaly[i], shift, epsilon = 1e-9);
    }
    assert_relative_eq!(fit.param(Term::WindU2).unwrap(), 3.0, epsilon = 0.2);
    assert_relative_eq!(fit.param(Term::WindV2).unwrap(), -1.5, epsilon = 0.2);
}

#[test]
fn wind_decomposition_without_wind_terms_is_missing_term() {
    let fit = fit(false);
    let err = wind_effect_and_anomaly(&fit).unwrap_err();
    assert_eq!(
        err,
        EffectError::MissingTerm {
            term: "Wind u²".to_string()
        }
    );
    assert!(matches!(
        predict_scenario(&fit, &Scenario::mean_wind()),
        Err(EffectError::MissingTerm { .. })
    ));
}

#[test]
fn missing_term_uses_generic_name() {
    let fit = fit(false);
    let err = term_effect(&fit, &[Term::TrendChange]).unwrap_err();
    assert_eq!(err.to_string(), "model has no '+trend' term");
    let scenario = Scenario::new().with(Term::TrendChange, Adjustment::Zero);
    assert_eq!(
        counterfactual_design(&fit, &scenario).unwrap_err(),
        EffectError::MissingTerm {
            term: "+trend".to_string()
        }
    );
}

#[test]
fn generic_term_effect_matches_presets() {
    let fit = fit(true);
    let nodal = term_effect(&fit, &[Term::NodalU, Term::NodalV]).unwrap();
    assert_eq!(nodal, tide_effect(&fit).unwrap());
    let empty = term_effect(&fit, &[]).unwrap();
    assert!(empty.iter().all(|&v| v == 0.0));
}

#[test]
fn zero_tide_prediction_removes_tide_effect() {
    let fit = fit(true);
    let pred = predict_scenario(&fit, &Scenario::zero_tide()).unwrap();
    let tide = tide_effect(&fit).unwrap();
    for i in 0..pred.len() {
        assert_relative_eq!(
            pred.mean()[i],
            fit.fitted()[i] - tide[i],
            epsilon = 1e-9
        );
    }
}

#[test]
fn mean_wind_design_has_constant_wind_columns() {
    let fit = fit(true);
    let exog = counterfactual_design(&fit, &Scenario::mean_wind_zero_tide()).unwrap();
    let design = fit.design();
    let ju = design.index_of(Term::WindU2).unwrap();
    let jn = design.index_of(Term::NodalV).unwrap();
    let jt = design.index_of(Term::Trend).unwrap();
    let mean_u = design.column_mean(Term::WindU2).unwrap();
    assert!(exog.column(ju).iter().all(|&v| v == mean_u));
    assert!(exog.column(jn).iter().all(|&v| v == 0.0));
    assert_eq!(exog.column(jt), design.exog().column(jt));
}

#[test]
fn mean_wind_prediction_differs_by_wind_anomaly() {
    let fit = fit(true);
    let pred = predict_scenario(&fit, &Scenario::mean_wind()).unwrap();
    let wind = wind_effect_and_anomaly(&fit).unwrap();
    for i in 0..pred.len() {
        assert_relative_eq!(
            pred.mean()[i],
            fit.fitted()[i] - wind.anomaly[i],
            epsilon = 1e-8
        );
    }
}

#[test]
fn explicit_value_adjustment() {
    let fit = fit(true);
    let scenario = Scenario::new().with(Term::Trend, Adjustment::Value(0.0));
    let exog = counterfactual_design(&fit, &scenario).unwrap();
    let j = fit.design().index_of(Term::Trend).unwrap();
    assert!(exog.column(j).iter().all(|&v| v == 0.0));
}

#[test]
fn corrected_series_removes_contributions() {
    let fit = fit(true);
    let endog = fit.design().endog();
    let tide = tide_effect(&fit).unwrap();
    let corrected = corrected_series(&fit, Correction::Tide).unwrap();
    for i in 0..corrected.len() {
        assert_relative_eq!(corrected[i], endog[i] - tide[i], epsilon = 1e-12);
    }
    let wind = wind_effect_and_anomaly(&fit).unwrap();
    let no_anomaly = corrected_series(&fit, Correction::WindAnomaly).unwrap();
    let no_wind = corrected_series(&fit, Correction::Wind).unwrap();
    let offset = wind.effect[0] - wind.anomaly[0];
    assert_relative_eq!(no_anomaly[0] - no_wind[0], offset, epsilon = 1e-9);
}
