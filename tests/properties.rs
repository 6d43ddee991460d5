//! Property tests over the pure metric step of each analyzer.

use proptest::prelude::*;

use tabular_analytics::analyzers::{
    Analyzer, DescriptiveStatsAnalyzer, DistributionAnalyzer, DistributionState, PearsonAnalyzer,
    PearsonState, StatsState,
};

fn finite_values(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6f64..1.0e6, 1..max_len)
}

proptest! {
    #[test]
    fn mean_lies_within_min_and_max(values in finite_values(64)) {
        let analyzer = DescriptiveStatsAnalyzer::new(0);
        let state = StatsState { values };
        let stats = analyzer.compute_metric_from_state(&state).unwrap().unwrap();

        prop_assert!(stats.mean >= stats.min - 1e-9);
        prop_assert!(stats.mean <= stats.max + 1e-9);
        prop_assert!(stats.q1 <= stats.median + 1e-9);
        prop_assert!(stats.median <= stats.q3 + 1e-9);
        prop_assert!(stats.std >= 0.0);
    }

    #[test]
    fn statistics_never_produce_non_finite_values(values in finite_values(64)) {
        let analyzer = DescriptiveStatsAnalyzer::new(0);
        let state = StatsState { values };
        let stats = analyzer.compute_metric_from_state(&state).unwrap().unwrap();

        for v in [stats.mean, stats.std, stats.min, stats.q1, stats.median, stats.q3, stats.max, stats.mode] {
            prop_assert!(v.is_finite());
        }
    }

    #[test]
    fn histogram_counts_always_sum_to_input_length(values in finite_values(64)) {
        let analyzer = DistributionAnalyzer::new(0);
        let cells: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let state = DistributionState { cells };
        let distribution = analyzer.compute_metric_from_state(&state).unwrap();

        prop_assert_eq!(distribution.total_count() as usize, values.len());
        // Never more than the fixed bin count.
        prop_assert!(distribution.bucket_count() <= 10);
    }

    #[test]
    fn pearson_coefficient_stays_in_unit_interval(
        pairs in prop::collection::vec((-1.0e6f64..1.0e6, -1.0e6f64..1.0e6), 2..64)
    ) {
        let analyzer = PearsonAnalyzer::new(0, 1);
        let state = PearsonState::from_pairs(&pairs);
        if let Some(coefficient) = analyzer.compute_metric_from_state(&state).unwrap() {
            prop_assert!((-1.0..=1.0).contains(&coefficient));
            prop_assert!(coefficient.is_finite());
        }
    }

    #[test]
    fn pearson_is_invariant_under_argument_swap(
        pairs in prop::collection::vec((-1.0e3f64..1.0e3, -1.0e3f64..1.0e3), 2..32)
    ) {
        let analyzer = PearsonAnalyzer::new(0, 1);
        let swapped: Vec<(f64, f64)> = pairs.iter().map(|&(x, y)| (y, x)).collect();

        let forward = analyzer
            .compute_metric_from_state(&PearsonState::from_pairs(&pairs))
            .unwrap();
        let backward = analyzer
            .compute_metric_from_state(&PearsonState::from_pairs(&swapped))
            .unwrap();

        match (forward, backward) {
            (Some(a), Some(b)) => prop_assert!((a - b).abs() < 1e-9),
            (None, None) => {}
            other => prop_assert!(false, "asymmetric definedness: {:?}", other),
        }
    }
}
