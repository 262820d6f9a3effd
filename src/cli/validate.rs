use anyhow::Result;
use log::info;

use mztarget::validate::validate_inputs;

use super::config::Config;
use super::InputArgs;

/// Validate a peak list and target database without running identification
pub fn run(inputs: InputArgs) -> Result<()> {
    let config = Config::load(inputs.config.as_deref())?;
    let tolerance = config.resolve_tolerance(inputs.mass_tolerance, inputs.time_tolerance);

    info!("mztarget Input Validator");
    info!("========================");
    info!("Peaks:   {}", inputs.peaklist_file.display());
    info!("Targets: {}", inputs.database_file.display());
    info!("");

    let report = validate_inputs(&inputs.peaklist_file, &inputs.database_file, &tolerance);

    // Use colorized output if available
    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    // Exit with error code if validation failed
    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
