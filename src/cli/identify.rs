use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mztarget::matcher::MatchStrategy;
use mztarget::output::{render_table, summary_line, write_report, OutputFormat};
use mztarget::pipeline::IdentificationContext;

use super::config::{Config, OutputSection};
use super::InputArgs;

/// Identify target compounds and print (and optionally write) the result table
pub fn run(
    inputs: InputArgs,
    strategy: Option<MatchStrategy>,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<()> {
    inputs.check_exist()?;

    let config = Config::load(inputs.config.as_deref())?;
    let tolerance = config.resolve_tolerance(inputs.mass_tolerance, inputs.time_tolerance);
    let strategy = strategy.or(config.matching.strategy).unwrap_or_default();
    let output = resolve_output(output, format, config.output);

    info!("mztarget - LC-MS target compound identification");
    info!("================================================");
    info!("Peak list:       {}", inputs.peaklist_file.display());
    info!("Target database: {}", inputs.database_file.display());
    info!("m/z tolerance:   {} Da", tolerance.mass_tolerance);
    info!("RT tolerance:    {} min (default)", tolerance.default_retime_tolerance);
    info!("Strategy:        {}", strategy);

    let context = IdentificationContext::new(tolerance)
        .context("Invalid tolerance configuration")?
        .with_strategy(strategy);

    let report = context
        .identify_files(&inputs.peaklist_file, &inputs.database_file)
        .map_err(|e| {
            let kind = e.kind();
            anyhow::Error::new(e).context(format!(
                "{} for peak list {} and target database {}",
                kind,
                inputs.peaklist_file.display(),
                inputs.database_file.display()
            ))
        })?;

    let rows = report.rows();
    print!("{}", render_table(&rows));
    println!();
    println!("{}", summary_line(rows.len()));

    if let Some((output, format)) = output {
        write_report(&report, &output, format)
            .with_context(|| format!("Failed to write results to {}", output.display()))?;
        info!("Results written to {} ({})", output.display(), format);
    }

    Ok(())
}

/// Result path and format.
///
/// An explicit `-o` path decides the format by its extension unless `--format`
/// is given; the config file only fills in what the command line leaves open.
fn resolve_output(
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
    config: OutputSection,
) -> Option<(PathBuf, OutputFormat)> {
    let (path, format) = match output {
        Some(path) => {
            let format = format
                .or_else(|| OutputFormat::from_path(&path))
                .or(config.format);
            (path, format)
        }
        None => {
            let path = config.path?;
            let format = format
                .or(config.format)
                .or_else(|| OutputFormat::from_path(&path));
            (path, format)
        }
    };
    Some((path, format.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(format: Option<OutputFormat>, path: Option<&str>) -> OutputSection {
        OutputSection {
            format,
            path: path.map(PathBuf::from),
        }
    }

    #[test]
    fn test_output_extension_beats_config_format() {
        let resolved = resolve_output(
            Some(PathBuf::from("out.csv")),
            None,
            section(Some(OutputFormat::Parquet), None),
        );
        assert_eq!(resolved, Some((PathBuf::from("out.csv"), OutputFormat::Csv)));
    }

    #[test]
    fn test_format_flag_beats_extension() {
        let resolved = resolve_output(
            Some(PathBuf::from("out.csv")),
            Some(OutputFormat::Json),
            section(None, None),
        );
        assert_eq!(resolved, Some((PathBuf::from("out.csv"), OutputFormat::Json)));
    }

    #[test]
    fn test_config_format_for_unknown_extension() {
        let resolved = resolve_output(
            Some(PathBuf::from("results.out")),
            None,
            section(Some(OutputFormat::Parquet), None),
        );
        assert_eq!(resolved, Some((PathBuf::from("results.out"), OutputFormat::Parquet)));
    }

    #[test]
    fn test_config_path_and_format() {
        let resolved = resolve_output(None, None, section(Some(OutputFormat::Json), Some("run.dat")));
        assert_eq!(resolved, Some((PathBuf::from("run.dat"), OutputFormat::Json)));

        let resolved = resolve_output(None, None, section(None, Some("run.parquet")));
        assert_eq!(resolved, Some((PathBuf::from("run.parquet"), OutputFormat::Parquet)));
    }

    #[test]
    fn test_no_output_requested() {
        assert_eq!(resolve_output(None, Some(OutputFormat::Csv), section(Some(OutputFormat::Json), None)), None);
    }
}
