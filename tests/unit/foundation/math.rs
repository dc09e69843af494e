use super::*;

#[test]
fn percent_guards_zero_totals() {
    assert_eq!(percent(3.0, 0.0), 0.0);
    assert_eq!(percent(0.0, 0.0), 0.0);
    assert_eq!(round_percent(5, 0), 0);
}

#[test]
fn percent_rounds_and_clamps() {
    assert_eq!(round_percent(2, 3), 67);
    assert_eq!(round_percent(1, 3), 33);
    assert_eq!(percent(9.0, 3.0), 100.0);
    assert_eq!(clamp_percent(f64::NAN), 0.0);
    assert_eq!(clamp_percent(-4.0), 0.0);
}
