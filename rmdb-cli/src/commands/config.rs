use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::{self, Settings, SettingsFile};

/// Show resolved settings and where each value came from.
pub(crate) fn run_config_show(settings: &Settings) {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "rmdb Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let fields = [
        (
            "database",
            settings.database.value.display().to_string(),
            &settings.database.source,
        ),
        (
            "api_url",
            settings.api_url.value.clone(),
            &settings.api_url.source,
        ),
        (
            "timeout",
            format!("{}s", settings.timeout.value.as_secs()),
            &settings.timeout.source,
        ),
    ];

    for (name, value, source) in &fields {
        let source_str = format!("({})", source);
        log::info!(
            "  {} {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            value,
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings::settings_path().display());
}

/// Write a settings file holding the default values.
pub(crate) fn run_config_init(force: bool) -> Result<(), CliError> {
    let path = settings::settings_path();
    settings::write_settings_file(&path, &SettingsFile::defaults(), force)?;
    log::info!(
        "{} Wrote {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}
