use color_eyre::Result;
use dialoguer::{Input, Password};

/// Yes/no questions asked before destructive or spoiler-revealing actions
pub trait Confirm {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Asks on the terminal
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
    }
}

/// `--yes`: every question is answered with yes
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        tracing::debug!(prompt = %prompt, "Confirmation assumed");
        Ok(true)
    }
}

pub fn confirmer(assume_yes: bool) -> Box<dyn Confirm> {
    if assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirm)
    }
}

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(default_value) = default {
        input = input.default(default_value.to_string());
    }
    input
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Masked input for API keys
pub fn prompt_secret(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assume_yes_always_confirms() {
        let confirm = confirmer(true);
        assert!(confirm.confirm("Clear everything?", false).unwrap());
    }
}
