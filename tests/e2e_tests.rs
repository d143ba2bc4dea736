//! End-to-end integration tests
//!
//! These tests validate the complete attribution pipeline using predefined
//! CSV fixtures. Each fixture directory under tests/fixtures/ holds:
//! - exposures.csv - the ad exposure source
//! - sales.csv - the sale source
//! - expected.csv - the summary the run must produce (success fixtures only)
//!
//! Success fixtures cover last-touch basics, same-timestamp ties, repeat
//! purchasers, empty exposure values, decimal precision and unsorted input.
//! Failure fixtures check that the run aborts with the right error and that
//! no summary file is left behind.

#[cfg(test)]
mod tests {
    use last_touch_attribution::pipeline::{run, RunConfig};
    use last_touch_attribution::types::AttributionError;
    use rstest::rstest;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Build a run configuration reading from a fixture and writing into `out_dir`
    fn fixture_config(fixture_name: &str, out_dir: &Path, include_unattributed: bool) -> RunConfig {
        let fixture_dir = PathBuf::from(format!("tests/fixtures/{}", fixture_name));
        let config = RunConfig {
            exposures_path: fixture_dir.join("exposures.csv"),
            sales_path: fixture_dir.join("sales.csv"),
            output_path: out_dir.join("summary.csv"),
            include_unattributed,
        };

        assert!(
            config.exposures_path.exists(),
            "Exposure file not found: {}",
            config.exposures_path.display()
        );
        assert!(
            config.sales_path.exists(),
            "Sales file not found: {}",
            config.sales_path.display()
        );
        config
    }

    /// Run a fixture and compare the written summary with an expected file
    fn run_test_fixture(fixture_name: &str, expected_file: &str, include_unattributed: bool) {
        let out_dir = TempDir::new().expect("Failed to create temp dir");
        let config = fixture_config(fixture_name, out_dir.path(), include_unattributed);

        run(&config).unwrap_or_else(|e| panic!("Failed to run fixture {}: {}", fixture_name, e));

        let actual_output = fs::read_to_string(&config.output_path)
            .unwrap_or_else(|e| panic!("Failed to read summary: {}", e));

        let expected_path = format!("tests/fixtures/{}/{}", fixture_name, expected_file);
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {}\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("last_touch_basic")]
    #[case("same_timestamp_tie")]
    #[case("repeat_purchasers")]
    #[case("empty_exposure_value")]
    #[case("precision")]
    #[case("unordered_input")]
    #[case("no_sales")]
    fn test_fixtures(#[case] fixture: &str) {
        run_test_fixture(fixture, "expected.csv", false);
    }

    #[test]
    fn test_fixture_with_unattributed_row() {
        run_test_fixture("last_touch_basic", "expected_unattributed.csv", true);
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let out_dir = TempDir::new().expect("Failed to create temp dir");
        let config = fixture_config("unordered_input", out_dir.path(), false);

        run(&config).unwrap();
        let first = fs::read(&config.output_path).unwrap();
        run(&config).unwrap();
        let second = fs::read(&config.output_path).unwrap();

        assert_eq!(first, second);
    }

    fn is_malformed(error: &AttributionError) -> bool {
        matches!(error, AttributionError::MalformedInput { .. })
    }

    fn is_invalid_amount(error: &AttributionError) -> bool {
        matches!(error, AttributionError::InvalidAmount { .. })
    }

    /// Failing fixtures abort with the expected error kind and write nothing
    #[rstest]
    #[case::malformed_exposure_row("malformed_exposure_row", is_malformed as fn(&AttributionError) -> bool)]
    #[case::malformed_sale_row("malformed_sale_row", is_malformed as fn(&AttributionError) -> bool)]
    #[case::bad_timestamp("bad_timestamp", is_malformed as fn(&AttributionError) -> bool)]
    #[case::invalid_amount("invalid_amount", is_invalid_amount as fn(&AttributionError) -> bool)]
    #[case::negative_amount("negative_amount", is_invalid_amount as fn(&AttributionError) -> bool)]
    fn test_failing_fixtures(#[case] fixture: &str, #[case] expected: fn(&AttributionError) -> bool) {
        let out_dir = TempDir::new().expect("Failed to create temp dir");
        let config = fixture_config(fixture, out_dir.path(), false);

        let error = run(&config).expect_err("Run should have failed");

        assert!(expected(&error), "Unexpected error for {}: {:?}", fixture, error);
        assert!(
            !config.output_path.exists(),
            "Summary must not be written for fixture {}",
            fixture
        );
        assert_eq!(fs::read_dir(out_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_malformed_row_reports_source_and_line() {
        let out_dir = TempDir::new().expect("Failed to create temp dir");
        let config = fixture_config("malformed_exposure_row", out_dir.path(), false);

        match run(&config).unwrap_err() {
            AttributionError::MalformedInput {
                source_name, line, ..
            } => {
                assert!(source_name.ends_with("exposures.csv"));
                assert_eq!(line, Some(3));
            }
            other => panic!("Expected MalformedInput, got {:?}", other),
        }
    }
}
