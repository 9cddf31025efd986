use gof_core::*;
use proptest::prelude::*;
use rstest::rstest;
use test_case::test_case;

// ===== Kind Parsing Tests =====

#[rstest]
#[case("poisson", DistributionKind::Poisson, "Poisson")]
#[case("normal", DistributionKind::Normal, "Normal")]
fn test_distribution_kind_parsing(
    #[case] raw: &str,
    #[case] expected: DistributionKind,
    #[case] display: &str,
) {
    let kind: DistributionKind = raw.parse().unwrap();
    assert_eq!(kind, expected);
    assert_eq!(kind.display_name(), display);
    assert_eq!(kind.to_string(), raw);
}

#[test_case("binomial" ; "unknown family")]
#[test_case("Poisson" ; "wrong case")]
#[test_case("" ; "empty")]
fn test_distribution_kind_rejects_unknown(raw: &str) {
    let err = raw.parse::<DistributionKind>().unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedType(_)));
}

#[rstest]
#[case("chi_square", TestKind::ChiSquare)]
#[case("kolmogorov_smirnov", TestKind::KolmogorovSmirnov)]
fn test_test_kind_parsing(#[case] raw: &str, #[case] expected: TestKind) {
    assert_eq!(raw.parse::<TestKind>().unwrap(), expected);
    assert_eq!(expected.as_str(), raw);
}

#[test]
fn test_test_kind_rejects_unknown() {
    assert!(matches!(
        "anderson_darling".parse::<TestKind>(),
        Err(CoreError::UnsupportedType(_))
    ));
}

// ===== DistributionSpec Tests =====

#[test]
fn test_poisson_spec_valid() {
    let spec = DistributionSpec::poisson(2.5).unwrap();
    assert_eq!(spec.kind(), DistributionKind::Poisson);
    assert_eq!(spec.display_name(), "Poisson");
}

#[rstest]
#[case(0.0)]
#[case(-1.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn test_poisson_spec_invalid_lambda(#[case] lambda: f64) {
    let err = DistributionSpec::poisson(lambda).unwrap_err();
    match err {
        CoreError::InvalidParameter { distribution, .. } => assert_eq!(distribution, "Poisson"),
        other => panic!("Expected InvalidParameter, got {:?}", other),
    }
}

#[rstest]
#[case(0.0, 0.0)]
#[case(0.0, -2.0)]
#[case(f64::NAN, 1.0)]
#[case(1.0, f64::INFINITY)]
fn test_normal_spec_invalid(#[case] mean: f64, #[case] std_dev: f64) {
    assert!(matches!(
        DistributionSpec::normal(mean, std_dev),
        Err(CoreError::InvalidParameter { .. })
    ));
}

#[test]
fn test_parameters_resolve_poisson() {
    let params = DistributionParameters::poisson(2.5);
    let spec = params.resolve(DistributionKind::Poisson).unwrap();
    assert_eq!(spec, DistributionSpec::Poisson { lambda: 2.5 });
}

#[test]
fn test_parameters_resolve_numeric_strings() {
    let params = DistributionParameters::normal("3", " 1.5 ");
    let spec = params.resolve(DistributionKind::Normal).unwrap();
    assert_eq!(spec, DistributionSpec::Normal { mean: 3.0, std_dev: 1.5 });
}

#[test]
fn test_parameters_missing_lambda() {
    let params = DistributionParameters::normal(0.0, 1.0);
    let err = params.resolve(DistributionKind::Poisson).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid Poisson parameters: lambda was not provided"
    );
}

#[test]
fn test_parameters_non_numeric_std_dev() {
    let params = DistributionParameters::normal(0.0, "wide");
    let err = params.resolve(DistributionKind::Normal).unwrap_err();
    assert_eq!(err.to_string(), "Invalid Normal parameters: stdDev is not a number");
}

// ===== ObservedSeries Tests =====

#[test]
fn test_observed_series_basics() {
    let series = ObservedSeries::new(vec![3, 0, 2]).unwrap();
    assert_eq!(series.num_bins(), 3);
    assert_eq!(series.total(), 5);
    assert_eq!(series.bins().collect::<Vec<_>>(), vec![(1, 3), (2, 0), (3, 2)]);
}

#[test]
fn test_observed_series_rejects_empty() {
    assert!(matches!(ObservedSeries::new(vec![]), Err(CoreError::Validation(_))));
}

#[test]
fn test_observed_series_rejects_negative() {
    let err = ObservedSeries::from_signed(&[4, -1, 2]).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn test_observed_series_rejects_overflowing_total() {
    let err = ObservedSeries::from_signed(&[i64::MAX, i64::MAX, 2]).unwrap_err();
    assert_eq!(err, CoreError::Validation(TOTAL_TOO_LARGE.to_string()));

    let err = ObservedSeries::new(vec![u64::MAX, 1]).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn test_observed_series_total_at_u64_limit() {
    let series = ObservedSeries::new(vec![u64::MAX - 1, 1]).unwrap();
    assert_eq!(series.total(), u64::MAX);
}

#[test]
fn test_observed_series_zero_total_allowed() {
    let series = ObservedSeries::from_signed(&[0, 0, 0]).unwrap();
    assert_eq!(series.total(), 0);
}

// ===== PoissonBinOrigin Tests =====

#[rstest]
#[case(PoissonBinOrigin::One, 1, 1)]
#[case(PoissonBinOrigin::One, 10, 10)]
#[case(PoissonBinOrigin::Zero, 1, 0)]
#[case(PoissonBinOrigin::Zero, 10, 9)]
fn test_bin_origin_event_count(
    #[case] origin: PoissonBinOrigin,
    #[case] bin: usize,
    #[case] count: u64,
) {
    assert_eq!(origin.event_count(bin), count);
}

// ===== GroupedCategories Tests =====

#[test]
fn test_grouped_categories_totals() {
    let mut grouped = GroupedCategories::default();
    assert!(grouped.is_empty());

    grouped.push(10, 12.5);
    grouped.push(3, 4.0);

    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped.total_observed(), 13);
    assert!((grouped.total_expected() - 16.5).abs() < 1e-12);
    assert_eq!(grouped.below_threshold(5.0), 1);
}

// ===== TestResult Tests =====

#[test]
fn test_result_defaults_to_failure_shape() {
    let result = TestResult::new(Some("chi_square".into()), None);
    assert!(!result.is_computed());
    assert_eq!(result.conclusion, DEFAULT_CONCLUSION);
    assert!(result.details.is_empty());
}

#[test]
fn test_result_record_rounds_to_four_decimals() {
    let mut result = TestResult::new(None, None);
    result.record(12.345_678, 0.000_049);

    assert_eq!(result.statistic, Some(12.3457));
    assert_eq!(result.p_value, Some(0.0));
    assert!(result.is_computed());
}

#[test]
fn test_round_to() {
    assert_eq!(round_to(0.123_45, 2), 0.12);
    assert_eq!(round_to(1.0 / 3.0, 4), 0.3333);
}

// ===== Settings Tests =====

#[test]
fn test_default_settings_are_valid() {
    let settings = AnalysisSettings::default().validated().unwrap();
    assert_eq!(settings.significance_level, 0.05);
    assert_eq!(settings.min_expected_frequency, 5.0);
    assert_eq!(settings.poisson_bin_origin, PoissonBinOrigin::One);
}

#[test]
fn test_settings_reject_bad_alpha() {
    let settings = AnalysisSettings {
        significance_level: 1.5,
        ..AnalysisSettings::default()
    };
    assert!(matches!(settings.validated(), Err(CoreError::Validation(_))));
}

// ===== Property-based Tests =====

proptest! {
    #[test]
    fn test_series_total_matches_sum(counts in prop::collection::vec(0u64..10_000, 1..20)) {
        let expected: u64 = counts.iter().sum();
        let series = ObservedSeries::new(counts).unwrap();
        prop_assert_eq!(series.total(), expected);
    }

    #[test]
    fn test_positive_lambda_always_valid(lambda in 1e-6f64..1e6) {
        prop_assert!(DistributionSpec::poisson(lambda).is_ok());
    }
}
