//! End-to-end tests for recomputed analytics reports.

use tabular_analytics::analyzers::Distribution;
use tabular_analytics::prelude::*;

async fn recompute(csv: &str) -> AnalyticsReport {
    let table = Table::parse(csv).unwrap();
    TabularAnalytics::new().recompute(&table).await.unwrap()
}

#[tokio::test]
async fn statistics_absent_iff_no_numeric_cells() {
    let report = recompute("num,text,mixed\n1,a,1\n2,b,x\n3,c,3\n").await;

    // "num" is all numeric, "mixed" has two numeric cells, "text" has none.
    let columns: Vec<&str> = report
        .statistics
        .iter()
        .map(|cs| cs.column.as_str())
        .collect();
    assert_eq!(columns, vec!["num", "mixed"]);

    let mixed = &report.statistics[1].statistics;
    assert_eq!(mixed.count, 2);
    assert_eq!(mixed.mean, 2.0);
}

#[tokio::test]
async fn mean_lies_within_min_max_and_median_matches_fixture() {
    let report = recompute("v\n10\n2\n8\n4\n6\n").await;
    let stats = &report.statistics[0].statistics;

    assert!(stats.mean >= stats.min && stats.mean <= stats.max);
    // Sorted: [2, 4, 6, 8, 10], odd count, exact central element.
    assert_eq!(stats.median, 6.0);
    assert_eq!(stats.q1, 4.0);
    assert_eq!(stats.q3, 8.0);
}

#[tokio::test]
async fn mode_tie_break_takes_first_to_reach_max_count() {
    let report = recompute("v\n1\n1\n2\n3\n").await;
    assert_eq!(report.statistics[0].statistics.mode, 1.0);

    let report = recompute("v\n1\n2\n2\n3\n").await;
    assert_eq!(report.statistics[0].statistics.mode, 2.0);
}

#[tokio::test]
async fn population_std_uses_count_divisor() {
    let report = recompute("v\n1\n2\n3\n4\n").await;
    let stats = &report.statistics[0].statistics;
    // Population variance of [1,2,3,4] is 1.25, sample variance would be 5/3.
    assert!((stats.std - 1.25f64.sqrt()).abs() < 1e-12);
}

#[tokio::test]
async fn histogram_one_to_ten_fills_ten_bins() {
    let rows: String = (1..=10).map(|v| format!("{v}\n")).collect();
    let report = recompute(&format!("v\n{rows}")).await;

    match &report.distributions[0].distribution {
        Distribution::Numeric(buckets) => {
            assert_eq!(buckets.len(), 10);
            for bucket in buckets {
                assert_eq!(bucket.count, 1);
            }
            // The maximum stays inside the last bin.
            assert_eq!(buckets[9].upper_bound, 10.0);
        }
        other => panic!("expected a numeric distribution, got {other:?}"),
    }
}

#[tokio::test]
async fn zero_range_column_lands_in_a_single_bucket() {
    let report = recompute("v\n5\n5\n5\n").await;

    match &report.distributions[0].distribution {
        Distribution::Numeric(buckets) => {
            assert_eq!(buckets.len(), 1);
            assert_eq!(buckets[0].count, 3);
            assert_eq!(buckets[0].lower_bound, 5.0);
            assert_eq!(buckets[0].upper_bound, 5.0);
        }
        other => panic!("expected a numeric distribution, got {other:?}"),
    }
}

#[tokio::test]
async fn categorical_distribution_counts_distinct_values() {
    let report = recompute("a,b\n1,x\n2,y\n").await;

    assert_eq!(report.distributions.len(), 2);
    match &report.distributions[1].distribution {
        Distribution::Categorical(buckets) => {
            assert_eq!(buckets.len(), 2);
            assert_eq!(buckets[0].value, "x");
            assert_eq!(buckets[0].count, 1);
            assert_eq!(buckets[1].value, "y");
            assert_eq!(buckets[1].count, 1);
        }
        other => panic!("expected a categorical distribution, got {other:?}"),
    }
    // Column "a" classifies numeric in the same report.
    assert!(matches!(
        report.distributions[0].distribution,
        Distribution::Numeric(_)
    ));
}

#[tokio::test]
async fn one_bad_cell_demotes_the_whole_column() {
    let report = recompute("v\n1\n2\noops\n").await;
    assert!(matches!(
        report.distributions[0].distribution,
        Distribution::Categorical(_)
    ));
    // The column still gets statistics over its two numeric cells.
    assert_eq!(report.statistics[0].statistics.count, 2);
    // But it is excluded from the correlation matrix.
    assert!(report.correlation.is_empty());
}

#[tokio::test]
async fn correlation_of_identical_and_reversed_columns() {
    let report = recompute("x,y,z\n1,1,3\n2,2,2\n3,3,1\n").await;
    let matrix = &report.correlation;

    assert_eq!(
        matrix.columns,
        vec!["x".to_string(), "y".to_string(), "z".to_string()]
    );
    assert_eq!(matrix.get(0, 1), Some(Some(1.0)));
    assert_eq!(matrix.get(0, 2), Some(Some(-1.0)));

    // Diagonal is exactly 1 for every column.
    for i in 0..matrix.len() {
        assert_eq!(matrix.get(i, i), Some(Some(1.0)));
    }
}

#[tokio::test]
async fn correlation_matrix_is_exactly_symmetric() {
    let report = recompute("a,b,c\n1,9,2\n4,3,8\n2,7,5\n6,1,3\n").await;
    let matrix = &report.correlation;

    for i in 0..matrix.len() {
        for j in 0..matrix.len() {
            assert_eq!(matrix.get(i, j), Some(matrix.get(j, i).unwrap()));
        }
    }
}

#[tokio::test]
async fn zero_variance_column_reports_absent_coefficients() {
    let report = recompute("flat,v\n5,1\n5,2\n5,3\n").await;
    let matrix = &report.correlation;

    assert_eq!(matrix.len(), 2);
    // Self-correlation stays 1 even for a zero-variance column.
    assert_eq!(matrix.get(0, 0), Some(Some(1.0)));
    // The off-diagonal coefficient is undefined, reported as absent.
    assert_eq!(matrix.get(0, 1), Some(None));
    assert_eq!(matrix.get(1, 0), Some(None));
}

#[tokio::test]
async fn report_rounds_only_at_the_presentation_boundary() {
    let report = recompute("v\n1\n2\n4\n").await;
    let stats = &report.statistics[0].statistics;

    // Full precision internally: mean of [1,2,4] is 7/3.
    assert!((stats.mean - 7.0 / 3.0).abs() < 1e-12);

    let rounded = report.rounded();
    assert_eq!(rounded.statistics[0].statistics.mean, 2.33);
}

#[tokio::test]
async fn report_serializes_to_json() {
    let report = recompute("a,b\n1,x\n2,y\n").await;
    let json = report.to_json().unwrap();
    assert!(json.contains("\"statistics\""));
    assert!(json.contains("\"correlation\""));
}

#[tokio::test]
async fn header_only_table_yields_empty_views() {
    let report = recompute("a,b\n").await;
    assert!(report.statistics.is_empty());
    assert_eq!(report.distributions.len(), 2);
    assert_eq!(report.distributions[0].distribution.bucket_count(), 0);
    assert!(report.correlation.is_empty());
}

#[tokio::test]
async fn session_recompute_round_trip() {
    let mut session = AnalyticsSession::new();
    let token = session.begin_load();
    session.complete_load(token, "v\n1\n2\n3\n").unwrap();

    let engine = TabularAnalytics::new();
    let report = engine.recompute(session.table().unwrap()).await.unwrap();
    assert_eq!(report.statistics[0].statistics.count, 3);

    // A new upload replaces the table wholesale; recompute reflects it.
    let token = session.begin_load();
    session.complete_load(token, "v\n10\n20\n").unwrap();
    let report = engine.recompute(session.table().unwrap()).await.unwrap();
    assert_eq!(report.statistics[0].statistics.count, 2);
    assert_eq!(report.statistics[0].statistics.mean, 15.0);
}
