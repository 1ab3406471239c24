//! Property checks for the reference CPA score on random series.

use approx::assert_relative_eq;
use cpa_stats::{Cpa, Statistic, StatisticError, cpa};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_series(rng: &mut StdRng, n: usize) -> Vec<f64> {
    // Rounded so that ties occur, as in daily rainfall.
    (0..n).map(|_| (rng.random_range(0.0..5.0_f64)).round()).collect()
}

#[test]
fn cpa_is_bounded() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let y = random_series(&mut rng, 40);
        let x: Vec<f64> = (0..40).map(|_| rng.random_range(-1.0..1.0)).collect();
        match cpa(&y, &x) {
            Ok(score) => assert!((0.0..=1.0).contains(&score), "score {score}"),
            Err(e) => assert_eq!(e, StatisticError::ConstantResponse),
        }
    }
}

#[test]
fn negated_predictor_mirrors_score() {
    let mut rng = StdRng::seed_from_u64(11);
    let y = random_series(&mut rng, 60);
    let x: Vec<f64> = (0..60).map(|_| rng.random_range(0.0..10.0)).collect();
    let neg: Vec<f64> = x.iter().map(|v| -v).collect();

    let a = cpa(&y, &x).unwrap();
    let b = cpa(&y, &neg).unwrap();
    assert_relative_eq!(a + b, 1.0, epsilon = 1e-12);
}

#[test]
fn identical_series_with_ties_score_one() {
    let mut rng = StdRng::seed_from_u64(3);
    let y = random_series(&mut rng, 30);
    assert_relative_eq!(Cpa.evaluate(&y, &y).unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn deterministic_for_identical_inputs() {
    let mut rng = StdRng::seed_from_u64(5);
    let y = random_series(&mut rng, 25);
    let x = random_series(&mut rng, 25);
    assert_eq!(cpa(&y, &x), cpa(&y, &x));
}

#[test]
fn rejects_nan_response() {
    assert_eq!(
        cpa(&[1.0, f64::NAN], &[1.0, 2.0]),
        Err(StatisticError::NonFiniteInput { input: "response" })
    );
}
