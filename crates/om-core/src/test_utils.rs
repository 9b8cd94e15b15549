/// Default tolerance for coordinate comparisons (precision-5 polylines round to 1e-5)
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Assert that two floating-point numbers are approximately equal
pub fn assert_approx_eq(actual: f64, expected: f64, tolerance: f64) {
  assert!(
    (actual - expected).abs() < tolerance,
    "Values not approximately equal:\n  actual:   {}\n  expected: {}\n  diff:     {}\n  tolerance: {}",
    actual,
    expected,
    (actual - expected).abs(),
    tolerance
  );
}

/// Assert that two sequences of (latitude, longitude) pairs match point for point
pub fn assert_lat_longs_eq(actual: &[(f64, f64)], expected: &[(f64, f64)]) {
  assert_eq!(actual.len(), expected.len(), "point counts differ");
  for (a, e) in actual.iter().zip(expected) {
    assert_approx_eq(a.0, e.0, DEFAULT_TOLERANCE);
    assert_approx_eq(a.1, e.1, DEFAULT_TOLERANCE);
  }
}
