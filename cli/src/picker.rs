//! Interactive language picker for `quire add` without a language argument.

use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use quire_types::{COMMON_LANGUAGES, LanguageKey, LanguageKeyError};

const CUSTOM_LABEL: &str = "Custom...";

/// Picker entries: the common languages, then the custom entry.
fn labels() -> Vec<String> {
    COMMON_LANGUAGES
        .iter()
        .map(|(id, display)| format!("{display} ({id})"))
        .chain([CUSTOM_LABEL.to_string()])
        .collect()
}

/// The common language at picker entry `index`, or `None` for the custom entry.
fn common_language(index: usize) -> Option<Result<LanguageKey, LanguageKeyError>> {
    COMMON_LANGUAGES
        .get(index)
        .map(|(id, _)| LanguageKey::new(*id))
}

fn validate_custom(input: &str) -> Result<(), LanguageKeyError> {
    LanguageKey::new(input).map(|_| ())
}

/// Ask the user to choose a language on the terminal.
///
/// Escape or `q` in the list cancels with `Ok(None)`. The custom entry
/// prompts for a free-form identifier until it is a valid language key.
pub fn pick_language() -> Result<Option<LanguageKey>> {
    let theme = ColorfulTheme::default();
    let Some(choice) = Select::with_theme(&theme)
        .with_prompt("Select a language")
        .default(0)
        .items(&labels())
        .interact_opt()
        .context("language picker needs a terminal; pass a language instead")?
    else {
        return Ok(None);
    };

    if let Some(language) = common_language(choice) {
        return Ok(Some(language?));
    }

    let custom = Input::<String>::with_theme(&theme)
        .with_prompt("Language identifier")
        .validate_with(|input: &String| validate_custom(input))
        .interact_text()
        .context("failed to read language identifier")?;
    Ok(Some(LanguageKey::new(custom)?))
}
