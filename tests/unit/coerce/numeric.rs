use super::*;

#[test]
fn residual_goes_to_first_maximal_value() {
    assert_eq!(
        normalize_percentages(&[20.0, 20.0, 20.0, 20.0, 10.0]),
        vec![23, 22, 22, 22, 11]
    );
}

#[test]
fn exact_sets_are_untouched() {
    assert_eq!(normalize_percentages(&[50.0, 30.0, 20.0]), vec![50, 30, 20]);
}

#[test]
fn small_values_keep_a_visible_share() {
    let out = normalize_percentages(&[0.0, 50.0, 25.0]);
    assert_eq!(out, vec![1, 66, 33]);
    assert_eq!(out.iter().sum::<u32>(), 100);
}

#[test]
fn all_zero_sets_are_split_evenly() {
    assert_eq!(normalize_percentages(&[0.0, 0.0, 0.0]), vec![34, 33, 33]);
    assert_eq!(normalize_percentages(&[-5.0, 0.0]), vec![50, 50]);
}

#[test]
fn halves_round_to_even() {
    // 1/8 of 100 is 12.5 for every element.
    let out = normalize_percentages(&[1.0; 8]);
    assert_eq!(out, vec![16, 12, 12, 12, 12, 12, 12, 12]);
}

#[test]
fn sums_are_always_one_hundred() {
    let cases: &[&[f64]] = &[
        &[1.0, 1.0, 1.0],
        &[7.0, 13.0, 29.0, 3.0],
        &[1000.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        &[33.3, 33.3, 33.3],
        &[0.2, 0.3, 0.5],
    ];
    for raw in cases {
        let out = normalize_percentages(raw);
        assert_eq!(out.len(), raw.len());
        assert_eq!(out.iter().sum::<u32>(), 100, "{raw:?} -> {out:?}");
    }
}

#[test]
fn extreme_magnitudes_still_sum_to_one_hundred() {
    assert_eq!(normalize_percentages(&[1e307, 1.0, 1.0]), vec![98, 1, 1]);
    assert_eq!(normalize_percentages(&[f64::MAX, f64::MAX]), vec![50, 50]);
    assert_eq!(
        normalize_percentages(&[f64::MAX, f64::MAX, f64::MAX]),
        vec![34, 33, 33]
    );
    assert_eq!(
        normalize_percentages(&[1e-300, 1e-300, 3e-300]),
        vec![20, 20, 60]
    );
}

#[test]
fn overshoot_is_spread_over_the_largest_values() {
    // 60 equal shares of 1.67 round up to 2 and overshoot by 20.
    let out = normalize_percentages(&[2.0; 60]);
    assert_eq!(out.iter().sum::<u32>(), 100);
    assert!(out.iter().all(|v| (1..=2).contains(v)), "{out:?}");
    assert_eq!(out.iter().filter(|v| **v == 1).count(), 20);
}

#[test]
fn more_than_one_hundred_values_sum_to_one_hundred() {
    let out = normalize_percentages(&[1.0; 150]);
    assert_eq!(out.len(), 150);
    assert_eq!(out.iter().sum::<u32>(), 100);
    assert!(out.iter().all(|v| *v <= 1), "{out:?}");

    let zeros = normalize_percentages(&[0.0; 150]);
    assert_eq!(zeros.iter().sum::<u32>(), 100);
    assert_eq!(zeros[0], 100);
}

#[test]
fn empty_input_stays_empty() {
    assert!(normalize_percentages(&[]).is_empty());
}

#[test]
fn unit_reading_accepts_percent_strings() {
    assert_eq!(unit_reading(&serde_json::json!("75%")), Some(0.75));
    assert_eq!(unit_reading(&serde_json::json!("0.3")), Some(0.3));
    assert_eq!(unit_reading(&serde_json::json!(true)), None);
}
