use approx::assert_relative_eq;
use slr_forcing::{
    ForcingError, SurgeSeries, WindSeries, annual_means, attach_surge, attach_wind,
    combine_linear_scaling, signed_square,
};
use slr_series::Observations;

fn base(y: f64) -> f64 {
    (y * 0.7).sin() * 3.0 + 0.1 * (y - 2000.0)
}

fn monthly_axis(first: i32, last: i32) -> Vec<f64> {
    (first..=last)
        .flat_map(|y| (1..=12).map(move |m| y as f64 + (m as f64 - 0.5) / 12.0))
        .collect()
}

#[test]
fn older_product_is_rescaled_onto_newer() {
    let newer_years: Vec<f64> = (2000..=2010).map(|y| y as f64).collect();
    let older_years: Vec<f64> = (1990..=2005).map(|y| y as f64).collect();
    let newer = WindSeries::new(
        newer_years.clone(),
        newer_years.iter().map(|&y| base(y)).collect(),
        newer_years.iter().map(|&y| -base(y)).collect(),
    )
    .unwrap();
    let older = WindSeries::new(
        older_years.clone(),
        older_years.iter().map(|&y| 2.0 * base(y) + 1.0).collect(),
        older_years.iter().map(|&y| -0.5 * base(y) - 4.0).collect(),
    )
    .unwrap();

    let combined = combine_linear_scaling(&older, &newer).unwrap();
    assert_eq!(combined.len(), 21);
    assert_eq!(combined.years()[0], 1990.0);
    assert_eq!(combined.years()[10], 2000.0);
    for (i, &y) in combined.years().iter().enumerate() {
        assert_relative_eq!(combined.u()[i], base(y), epsilon = 1e-9);
        assert_relative_eq!(combined.v()[i], -base(y), epsilon = 1e-9);
    }
}

#[test]
fn disjoint_products_do_not_combine() {
    let older = WindSeries::new(vec![1990.0, 1991.0], vec![1.0, 2.0], vec![1.0, 2.0]).unwrap();
    let newer = WindSeries::new(vec![2000.0, 2001.0], vec![1.0, 2.0], vec![1.0, 2.0]).unwrap();
    assert_eq!(
        combine_linear_scaling(&older, &newer).unwrap_err(),
        ForcingError::NoOverlap { rows: 0 }
    );
    let empty = WindSeries::new(vec![], vec![], vec![]).unwrap();
    assert!(matches!(
        combine_linear_scaling(&empty, &newer),
        Err(ForcingError::EmptySeries { .. })
    ));
}

#[test]
fn monthly_wind_averaged_per_calendar_year() {
    let years = monthly_axis(2000, 2001);
    let u: Vec<f64> = (0..24).map(|i| if i < 12 { 1.0 } else { 3.0 }).collect();
    let v: Vec<f64> = (0..24).map(|i| i as f64).collect();
    let wind = WindSeries::new(years, u, v).unwrap();
    let annual = annual_means(&wind).unwrap();
    assert_eq!(annual.years(), &[2000.0, 2001.0]);
    assert_eq!(annual.u(), &[1.0, 3.0]);
    assert_relative_eq!(annual.v()[0], 5.5);
    assert_relative_eq!(annual.v()[1], 17.5);
}

#[test]
fn annual_observations_receive_annual_wind() {
    let wind_years = monthly_axis(2000, 2002);
    let u: Vec<f64> = wind_years.iter().map(|y| y.floor() - 2000.0 - 1.0).collect();
    let v = vec![2.0; wind_years.len()];
    let wind = WindSeries::new(wind_years, u, v).unwrap();

    let obs = Observations::new(vec![2000.0, 2001.0, 2002.0, 2003.0])
        .unwrap()
        .with_column("height", vec![1.0, 2.0, 3.0, 4.0])
        .unwrap();
    let joined = attach_wind(&obs, &wind).unwrap();

    let u2 = joined.column("u2").unwrap();
    assert_relative_eq!(u2[0], signed_square(-1.0));
    assert_relative_eq!(u2[1], 0.0);
    assert_relative_eq!(u2[2], 1.0);
    // 2003 has no wind: filled with the mean of the matched rows
    assert_relative_eq!(u2[3], 0.0);
    assert_eq!(joined.column("v2").unwrap(), &[4.0; 4]);
    assert_eq!(joined.column("height").unwrap(), obs.column("height").unwrap());
}

#[test]
fn monthly_observations_join_month_by_month() {
    let years = monthly_axis(2000, 2000);
    let u: Vec<f64> = (1..=12).map(|m| m as f64).collect();
    let wind = WindSeries::new(years.clone(), u.clone(), vec![0.0; 12]).unwrap();
    let obs = Observations::new(years[3..6].to_vec()).unwrap();
    let joined = attach_wind(&obs, &wind).unwrap();
    assert_eq!(joined.column("u").unwrap(), &[4.0, 5.0, 6.0]);
    assert_eq!(joined.column("u2").unwrap(), &[16.0, 25.0, 36.0]);
}

#[test]
fn surge_corrections() {
    let obs = Observations::new(vec![2000.0, 2001.0, 2002.0])
        .unwrap()
        .with_column("height", vec![100.0, 110.0, 120.0])
        .unwrap();
    let surge = SurgeSeries::new(vec![2000.0, 2001.0], vec![0.01, 0.03]).unwrap();
    let out = attach_surge(&obs, &surge, "height").unwrap();

    let s = out.column("surge").unwrap();
    assert_relative_eq!(s[0], 10.0, epsilon = 1e-9);
    assert_relative_eq!(s[1], 30.0, epsilon = 1e-9);
    assert_relative_eq!(s[2], 20.0, epsilon = 1e-9);

    let corrected = out.column("height - surge").unwrap();
    assert_relative_eq!(corrected[0], 90.0, epsilon = 1e-9);
    let anomaly = out.column("height - surge anomaly").unwrap();
    assert_relative_eq!(anomaly[0], 110.0, epsilon = 1e-9);
    assert_relative_eq!(anomaly[2], 120.0, epsilon = 1e-9);
}

#[test]
fn surge_requires_quantity_column() {
    let obs = Observations::new(vec![2000.0]).unwrap();
    let surge = SurgeSeries::new(vec![2000.0], vec![0.0]).unwrap();
    assert!(matches!(
        attach_surge(&obs, &surge, "height"),
        Err(ForcingError::Series(_))
    ));
}

#[test]
fn annual_forcing_rejected_for_monthly_observations() {
    let months = monthly_axis(2000, 2001);
    let obs = Observations::new(months.clone())
        .unwrap()
        .with_column("height", vec![0.0; months.len()])
        .unwrap();

    let wind = WindSeries::new(vec![2000.0, 2001.0], vec![1.0, 3.0], vec![0.0, 0.0]).unwrap();
    assert_eq!(
        attach_wind(&obs, &wind),
        Err(ForcingError::ResolutionMismatch { what: "wind" })
    );

    let surge = SurgeSeries::new(vec![2000.0, 2001.0], vec![0.01, 0.03]).unwrap();
    assert_eq!(
        attach_surge(&obs, &surge, "height"),
        Err(ForcingError::ResolutionMismatch { what: "surge" })
    );
}
