use slr_series::Observations;
use slr_terms::{Term, TermConfig, TrendShape, build_design};

fn station(n: usize) -> Observations {
    let years: Vec<f64> = (0..n).map(|i| 1900.0 + i as f64).collect();
    let height: Vec<f64> = years.iter().map(|y| 7000.0 + 1.5 * (y - 1970.0)).collect();
    let u2: Vec<f64> = (0..n).map(|i| ((i * 7) % 11) as f64 - 5.0).collect();
    let v2: Vec<f64> = (0..n).map(|i| ((i * 5) % 13) as f64 - 6.0).collect();
    Observations::new(years)
        .unwrap()
        .with_column("height", height)
        .unwrap()
        .with_column("u2", u2)
        .unwrap()
        .with_column("v2", v2)
        .unwrap()
}

fn all_shapes() -> Vec<TrendShape> {
    vec![
        TrendShape::Linear { epoch: 1970 },
        TrendShape::Quadratic { epoch: 1970 },
        TrendShape::BrokenLinear {
            epoch: 1970,
            break_year: 1993,
        },
        TrendShape::BrokenQuadratic {
            start_acceleration: 1960,
        },
    ]
}

#[test]
fn names_index_columns_order_for_order() {
    let obs = station(120);
    for shape in all_shapes() {
        for (nodal, wind) in [(true, true), (true, false), (false, true), (false, false)] {
            let cfg = TermConfig::new(shape).with_nodal(nodal).with_wind(wind);
            let dm = build_design(&obs, &cfg).unwrap();
            let names = dm.names();
            assert_eq!(names.len(), dm.exog().ncols());
            assert_eq!(names[0], shape.constant_label());
            for (j, term) in dm.terms().into_iter().enumerate() {
                assert_eq!(dm.index_of(term), Some(j));
                assert_eq!(dm.index_of_name(names[j]), Some(j));
                assert_eq!(dm.column(term).unwrap(), dm.exog().column(j));
            }
            assert_eq!(dm.contains(Term::NodalU), nodal);
            assert_eq!(dm.contains(Term::WindU2), wind);
        }
    }
}

#[test]
fn constant_column_is_ones() {
    let obs = station(30);
    let cfg = TermConfig::new(TrendShape::Quadratic { epoch: 1970 });
    let dm = build_design(&obs, &cfg).unwrap();
    assert!(dm.column(Term::Constant).unwrap().iter().all(|&x| x == 1.0));
}

#[test]
fn wind_columns_are_copied_verbatim() {
    let obs = station(40);
    let cfg = TermConfig::new(TrendShape::Linear { epoch: 1970 });
    let dm = build_design(&obs, &cfg).unwrap();
    assert_eq!(
        dm.column(Term::WindU2).unwrap().to_vec(),
        obs.column("u2").unwrap().to_vec()
    );
    assert_eq!(dm.endog().to_vec(), obs.column("height").unwrap().to_vec());
}
