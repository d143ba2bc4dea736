use crate::pipeline::{RunConfig, DEFAULT_EXPOSURES_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_SALES_PATH};
use clap::Parser;
use std::path::PathBuf;

/// Attribute sales to each user's most recent ad exposure
#[derive(Parser, Debug)]
#[command(name = "last-touch-attribution")]
#[command(about = "Attribute sales to each user's most recent ad exposure", long_about = None)]
pub struct CliArgs {
    /// Exposure CSV file path (user_id, timestamp, exposure_value)
    #[arg(
        long = "exposures",
        value_name = "PATH",
        env = "ATTRIBUTION_EXPOSURES",
        default_value = DEFAULT_EXPOSURES_PATH
    )]
    pub exposures: PathBuf,

    /// Sales CSV file path (user_id, timestamp, sale_amount)
    #[arg(
        long = "sales",
        value_name = "PATH",
        env = "ATTRIBUTION_SALES",
        default_value = DEFAULT_SALES_PATH
    )]
    pub sales: PathBuf,

    /// Summary CSV output path
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        env = "ATTRIBUTION_OUTPUT",
        default_value = DEFAULT_OUTPUT_PATH
    )]
    pub output: PathBuf,

    /// Append an `unattributed` row for sales with no qualifying exposure
    #[arg(long = "include-unattributed")]
    pub include_unattributed: bool,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Create a RunConfig from CLI arguments
    pub fn to_run_config(&self) -> RunConfig {
        RunConfig {
            exposures_path: self.exposures.clone(),
            sales_path: self.sales.clone(),
            output_path: self.output.clone(),
            include_unattributed: self.include_unattributed,
        }
    }

    /// Default log filter directive for the selected verbosity
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let parsed = CliArgs::try_parse_from(["program"]).unwrap();
        assert_eq!(parsed.to_run_config(), RunConfig::default());
        assert_eq!(parsed.log_filter(), "info");
    }

    #[rstest]
    #[case::exposures(&["program", "--exposures", "in/exp.csv"], "in/exp.csv", "sales_data.csv", "summary.csv")]
    #[case::sales(&["program", "--sales", "in/sales.csv"], "ad_exposures.csv", "in/sales.csv", "summary.csv")]
    #[case::output_short(&["program", "-o", "out.csv"], "ad_exposures.csv", "sales_data.csv", "out.csv")]
    #[case::all(
        &["program", "--exposures", "e.csv", "--sales", "s.csv", "--output", "o.csv"],
        "e.csv",
        "s.csv",
        "o.csv"
    )]
    fn test_path_options(
        #[case] args: &[&str],
        #[case] exposures: &str,
        #[case] sales: &str,
        #[case] output: &str,
    ) {
        let config = CliArgs::try_parse_from(args).unwrap().to_run_config();
        assert_eq!(config.exposures_path, PathBuf::from(exposures));
        assert_eq!(config.sales_path, PathBuf::from(sales));
        assert_eq!(config.output_path, PathBuf::from(output));
    }

    #[rstest]
    #[case::include_unattributed(&["program", "--include-unattributed"], true, false)]
    #[case::verbose_long(&["program", "--verbose"], false, true)]
    #[case::verbose_short(&["program", "-v"], false, true)]
    fn test_flags(#[case] args: &[&str], #[case] include_unattributed: bool, #[case] verbose: bool) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.include_unattributed, include_unattributed);
        assert_eq!(parsed.verbose, verbose);
        assert_eq!(parsed.log_filter(), if verbose { "debug" } else { "info" });
    }

    #[rstest]
    #[case::unknown_flag(&["program", "--format", "json"])]
    #[case::missing_value(&["program", "--output"])]
    #[case::positional(&["program", "input.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
