use super::prompts;
use super::spinner::Spinner;
use crate::app::App;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use nextwatch_config::Config;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn mask_string(s: &str) -> String {
    if s.is_empty() || s == "YOUR_API_KEY" {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

fn check(enabled: bool) -> String {
    if enabled {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

fn section(title: &str) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)]);
    table
}

fn save_config(app: &App, config: &Config) -> Result<()> {
    let config_file = app.paths.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))
}

pub fn show_config(app: &App, full: bool) -> Result<()> {
    let config = &app.config;
    let config_file = app.paths.config_file();
    let stored_key = app.store.api_key().unwrap_or_default();
    let mask = |s: &str| if full { s.to_string() } else { mask_string(s) };
    let validation = config.validate();

    if !app.output.is_human() {
        app.output.data(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "store_dir": app.paths.store_dir().display().to_string(),
            "omdb": {
                "base_url": config.omdb.base_url,
                "api_key": mask(&config.omdb.api_key),
            },
            "gemini": {
                "base_url": config.gemini.base_url,
                "model": config.gemini.model,
                "max_output_tokens": config.gemini.max_output_tokens,
                "temperature": config.gemini.temperature,
                "stored_api_key": mask(&stored_key),
                "default_api_key": config.gemini.default_api_key.is_some(),
            },
            "recommendations": {
                "genre": config.recommendations.genre,
                "count": config.recommendations.count,
                "request_delay_ms": config.recommendations.request_delay_ms,
            },
            "dark_mode": app.store.dark_mode(),
            "valid": validation.is_ok(),
        }));
        return Ok(());
    }

    if app.output.is_quiet() {
        return Ok(());
    }

    let mut files = section("Files");
    files.add_row(vec![Cell::new("Config file"), Cell::new(config_file.display())]);
    files.add_row(vec![Cell::new("Exists"), Cell::new(check(config_file.exists()))]);
    files.add_row(vec![Cell::new("Store"), Cell::new(app.paths.store_dir().display())]);
    println!("{}\n", files);

    let mut omdb = section("OMDb");
    omdb.add_row(vec![Cell::new("Base URL"), Cell::new(&config.omdb.base_url)]);
    omdb.add_row(vec![Cell::new("API key"), Cell::new(mask(&config.omdb.api_key))]);
    println!("{}\n", omdb);

    let mut gemini = section("Gemini");
    gemini.add_row(vec![Cell::new("Model"), Cell::new(&config.gemini.model)]);
    gemini.add_row(vec![Cell::new("Max output tokens"), Cell::new(config.gemini.max_output_tokens)]);
    gemini.add_row(vec![Cell::new("Temperature"), Cell::new(config.gemini.temperature)]);
    gemini.add_row(vec![Cell::new("Your API key"), Cell::new(mask(&stored_key))]);
    gemini.add_row(vec![
        Cell::new("Default API key"),
        Cell::new(check(config.gemini.default_api_key.is_some())),
    ]);
    println!("{}\n", gemini);

    let mut recommendations = section("Recommendations");
    recommendations.add_row(vec![Cell::new("Genre"), Cell::new(&config.recommendations.genre)]);
    recommendations.add_row(vec![Cell::new("Count"), Cell::new(config.recommendations.count)]);
    recommendations.add_row(vec![
        Cell::new("Request delay"),
        Cell::new(format!("{} ms", config.recommendations.request_delay_ms)),
    ]);
    recommendations.add_row(vec![Cell::new("Dark mode"), Cell::new(check(app.store.dark_mode()))]);
    println!("{}\n", recommendations);

    if let Err(e) = validation {
        app.output.warn(format!("Configuration incomplete: {}", e));
    }
    Ok(())
}

pub async fn configure_gemini(app: &App, api_key: Option<String>) -> Result<()> {
    let api_key = match api_key {
        Some(key) => key,
        None => {
            app.output
                .info("Get a free key at https://aistudio.google.com/app/apikey");
            prompts::prompt_secret("Gemini API key")?
        }
    };
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(color_eyre::eyre::eyre!("API key is required"));
    }

    let spinner = Spinner::start("Validating API key...", &app.output);
    let valid = app.gemini.validate_key(api_key).await;
    spinner.finish();

    if !valid {
        return Err(color_eyre::eyre::eyre!("The API key was rejected. Please check it and try again."));
    }

    if !app.store.save_api_key(api_key) {
        return Err(color_eyre::eyre::eyre!("Failed to save the API key"));
    }
    // Recommendations made with another key are regenerated on next request
    app.store.clear_recommendations();
    app.output.success("Gemini API key saved");
    Ok(())
}

pub fn configure_omdb(app: &App, api_key: Option<String>) -> Result<()> {
    let api_key = match api_key {
        Some(key) => key,
        None => {
            app.output.info("Get a key at https://www.omdbapi.com/apikey.aspx");
            prompts::prompt_string("OMDb API key", None)?
        }
    };
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(color_eyre::eyre::eyre!("API key is required"));
    }

    let mut config = Config::load_or_default(&app.paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config: {}", e))?;
    config.omdb.api_key = api_key.to_string();
    save_config(app, &config)?;

    app.output.success(format!(
        "OMDb API key saved to {}",
        app.paths.config_file().display()
    ));
    Ok(())
}

pub fn set_dark_mode(app: &App, enabled: bool) -> Result<()> {
    if !app.store.save_dark_mode(enabled) {
        return Err(color_eyre::eyre::eyre!("Failed to save dark mode preference"));
    }
    app.output
        .success(format!("Dark mode {}", if enabled { "enabled" } else { "disabled" }));
    Ok(())
}

/// Write a config file with every default spelled out
pub fn init_config(app: &App) -> Result<()> {
    let config_file = app.paths.config_file();
    if config_file.exists()
        && !app.confirm.confirm(
            &format!("{} already exists. Overwrite it with defaults?", config_file.display()),
            false,
        )?
    {
        app.output.info("Cancelled");
        return Ok(());
    }

    let mut config = Config::default();
    // Keep a key the user already configured
    config.omdb.api_key = app.config.omdb.api_key.clone();
    save_config(app, &config)?;

    app.output
        .success(format!("Wrote default configuration to {}", config_file.display()));
    if !config.is_omdb_configured() {
        app.output
            .info("Next: `nextwatch config omdb --api-key <KEY>` and `nextwatch config gemini`.");
    }
    Ok(())
}
