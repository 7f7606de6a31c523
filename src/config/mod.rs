use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    currency::{format_currency, CurrencyCode, LocaleConfig},
    errors::{ForecastError, Result},
    ledger::recurrence::MAX_CATCH_UP_STEPS,
};

const APP_DIR: &str = "budget_forecast";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Tunables for forecast assembly plus display preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastConfig {
    /// Share of discretionary money suggested as a monthly contribution to every goal.
    #[serde(default = "ForecastConfig::default_goal_contribution_rate")]
    pub goal_contribution_rate: f64,
    #[serde(default = "ForecastConfig::default_max_catch_up_steps")]
    pub max_catch_up_steps: usize,
    /// Number of pay periods listed by the period planner.
    #[serde(default = "ForecastConfig::default_pay_period_horizon")]
    pub pay_period_horizon: usize,
    pub currency: String,
    pub locale: String,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            goal_contribution_rate: Self::default_goal_contribution_rate(),
            max_catch_up_steps: Self::default_max_catch_up_steps(),
            pay_period_horizon: Self::default_pay_period_horizon(),
            currency: "USD".into(),
            locale: "en-US".into(),
        }
    }
}

impl ForecastConfig {
    pub fn default_goal_contribution_rate() -> f64 {
        0.10
    }

    pub fn default_max_catch_up_steps() -> usize {
        MAX_CATCH_UP_STEPS
    }

    pub fn default_pay_period_horizon() -> usize {
        3
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.goal_contribution_rate) {
            return Err(ForecastError::Config(format!(
                "goal contribution rate must be within 0..=1, got {}",
                self.goal_contribution_rate
            )));
        }
        if self.max_catch_up_steps == 0 {
            return Err(ForecastError::Config(
                "max catch-up steps must be at least 1".into(),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(ForecastError::Config("currency code is empty".into()));
        }
        Ok(())
    }

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(self.currency.trim())
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::from_tag(self.locale.trim())
    }

    /// Formats `amount` in the configured currency and locale.
    pub fn format_amount(&self, amount: f64) -> String {
        format_currency(amount, &self.currency_code(), &self.locale_config())
    }
}

/// Loads and persists [`ForecastConfig`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses the platform config directory, falling back to home, then the working directory.
    pub fn new() -> Result<Self> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::with_base_dir(base.join(APP_DIR))
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<ForecastConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(ForecastConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: ForecastConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &ForecastConfig) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "forecast config saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
