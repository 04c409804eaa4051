use anyhow::Context;
use inquire::{Confirm, Password, PasswordDisplayMode, Text};
use weather_core::{Config, PermissionPrompt};

/// Asks on the terminal before the location is used.
#[derive(Debug, Clone, Copy)]
pub struct InquireConsent {
    preapproved: bool,
}

impl InquireConsent {
    pub fn new(preapproved: bool) -> Self {
        Self { preapproved }
    }
}

impl PermissionPrompt for InquireConsent {
    fn allow_location(&self) -> bool {
        if self.preapproved {
            return true;
        }

        // A prompt that cannot be shown (no TTY, Ctrl-C) counts as a refusal.
        match Confirm::new("Allow weather to use your approximate location?")
            .with_default(false)
            .with_help_message("Your position is derived from your public IP address")
            .prompt()
        {
            Ok(answer) => answer,
            Err(err) => {
                tracing::debug!(error = %err, "location prompt unavailable");
                false
            }
        }
    }
}

/// Interactive edit of the stored configuration.
pub fn configure(config: &mut Config) -> anyhow::Result<()> {
    let help = match config.api_key() {
        Some(_) => "Leave empty to keep the current key",
        None => "Get one at https://home.openweathermap.org/api_keys",
    };

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message(help)
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key);
    }

    let lang = Text::new("Response language:")
        .with_default(&config.lang)
        .prompt()
        .context("Failed to read language")?;

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;

    let location_enabled = Confirm::new("Enable location lookups (`weather here`)?")
        .with_default(config.location.enabled)
        .prompt()
        .context("Failed to read location preference")?;

    config.lang = lang;
    config.default_city = default_city;
    config.location.enabled = location_enabled;

    Ok(())
}
