//! Command line interface.

use std::{fmt::Write as _, fs, path::PathBuf};

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use quota_space_use::{
    RegionSizeSample, ReportBuilder, SpaceUseArgs, SpaceUseReport, SpaceUseSummary,
};
use tracing::info;

use crate::{logging::LogArgs, snapshot_file::parse_snapshot};

/// Build and inspect region space-use reports.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct SpaceReportCli {
    /// Logging configuration (applies to all subcommands).
    #[command(flatten)]
    pub(crate) logs: LogArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub(crate) command: SpaceReportCommands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum SpaceReportCommands {
    /// Build a report from a TOML snapshot file.
    Build(BuildArgs),
    /// Decode a report and list its regions.
    Decode(DecodeArgs),
}

#[derive(Debug, clap::Args)]
pub(crate) struct BuildArgs {
    /// Snapshot file describing region sizes.
    #[arg(long, short, value_name = "FILE")]
    input: PathBuf,

    /// Where to write the encoded report. Prints hex to stdout when omitted.
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(flatten)]
    space_use: SpaceUseArgs,
}

#[derive(Debug, clap::Args)]
pub(crate) struct DecodeArgs {
    /// Encoded report, as written by `build`.
    #[arg(long, short, value_name = "FILE")]
    input: PathBuf,
}

pub(crate) fn run(command: SpaceReportCommands) -> Result<()> {
    match command {
        SpaceReportCommands::Build(args) => build(args),
        SpaceReportCommands::Decode(args) => decode(args),
    }
}

fn build(args: BuildArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.input)
        .wrap_err_with(|| format!("failed to read {}", args.input.display()))?;
    let snapshot = parse_snapshot(&contents)?;

    let report = ReportBuilder::new(&args.space_use)
        .build(Some(&snapshot))
        .wrap_err("snapshot cannot be reported")?;
    let bytes = report.to_bytes()?;

    match &args.output {
        Some(path) => {
            fs::write(path, &bytes)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            info!(
                regions = report.len(),
                bytes = bytes.len(),
                path = %path.display(),
                "Wrote space use report"
            );
        }
        None => println!("{}", hex::encode(&bytes)),
    }
    Ok(())
}

fn decode(args: DecodeArgs) -> Result<()> {
    let bytes = fs::read(&args.input)
        .wrap_err_with(|| format!("failed to read {}", args.input.display()))?;
    let report = SpaceUseReport::from_bytes(&bytes).wrap_err("not a space use report")?;
    let samples = report.decode().wrap_err("report carries a malformed entry")?;
    print!("{}", render(&samples)?);
    Ok(())
}

/// One line per region followed by per-table totals.
fn render(samples: &[RegionSizeSample]) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    for sample in samples {
        writeln!(
            out,
            "{}\t[{}, {})\t{}",
            sample.region,
            sample.region.start_key().escape_ascii(),
            sample.region.end_key().escape_ascii(),
            sample.size
        )?;
    }

    let summary = SpaceUseSummary::from_samples(samples);
    for (table, usage) in summary.tables() {
        writeln!(
            out,
            "table {table}: {} bytes in {} regions",
            usage.size, usage.regions
        )?;
    }
    writeln!(
        out,
        "total: {} bytes in {} regions",
        summary.total_size(),
        summary.region_count()
    )?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quota_space_use::RegionInfo;

    #[test]
    fn test_render() {
        let samples = vec![
            RegionSizeSample::new(
                RegionInfo::builder("table1".parse().unwrap())
                    .with_start_key(&b"a"[..])
                    .with_end_key(&b"b"[..])
                    .build(),
                1024,
            ),
            RegionSizeSample::new(
                RegionInfo::builder("table1".parse().unwrap())
                    .with_start_key(&b"b"[..])
                    .build(),
                0,
            ),
        ];

        assert_eq!(
            render(&samples).unwrap(),
            "table1,a,0\t[a, b)\t1024\n\
             table1,b,0\t[b, )\t0\n\
             table table1: 1024 bytes in 2 regions\n\
             total: 1024 bytes in 2 regions\n"
        );
    }

    #[test]
    fn test_cli_parses_build() {
        let cli = SpaceReportCli::parse_from([
            "space-report",
            "-v",
            "build",
            "--input",
            "sizes.toml",
            "--space-use.parallel-threshold",
            "16",
        ]);
        assert_eq!(cli.logs.verbosity, 1);
        match cli.command {
            SpaceReportCommands::Build(args) => {
                assert_eq!(args.input, PathBuf::from("sizes.toml"));
                assert!(args.output.is_none());
                assert_eq!(args.space_use.parallel_threshold, 16);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
