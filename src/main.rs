//! CLI entry point for huepick.

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;

use huepick::cli::{Cli, RenderFormat, format_color};
use huepick::config::PickerConfig;
use huepick::logging::init_logging;
use huepick::render::{PickerSnapshot, render_markup};
use huepick::{ColorPicker, tui};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "huepick", &mut std::io::stdout());
        return Ok(());
    }

    // The converter stays quiet unless a log file is requested
    let _guard = (cli.interactive || cli.log_file.is_some())
        .then(|| init_logging(cli.log_file.as_deref(), Some(&cli.log_level)));

    let config = PickerConfig::layered(cli.config.as_deref(), &cli.to_config_overrides())
        .wrap_err("Failed to load configuration")?;

    if let Some(ref path) = cli.save_config {
        config
            .save(path)
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Saved configuration to {}", path.display());
    }

    if cli.interactive {
        return tui::run(config, cli.save_config.clone());
    }

    let options = config
        .to_picker_options()
        .wrap_err("Invalid picker configuration")?;
    let color = options
        .selected_color
        .ok_or_else(|| eyre!("A color is required (positional argument or [picker] selected_color)"))?;
    info!(color = %color, "converting");

    match config.output.render {
        Some(format) => {
            let picker = ColorPicker::new(options);
            let text = match format {
                RenderFormat::Html => render_markup(&picker),
                RenderFormat::Json => {
                    let mut json = PickerSnapshot::of(&picker)
                        .to_json()
                        .wrap_err("Failed to serialize picker state to JSON")?;
                    json.push('\n');
                    json
                }
                RenderFormat::Yaml => PickerSnapshot::of(&picker)
                    .to_yaml()
                    .wrap_err("Failed to serialize picker state to YAML")?,
            };
            print!("{text}");
        }
        None => println!("{}", format_color(&color, config.output.to)),
    }

    Ok(())
}
