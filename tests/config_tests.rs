use budget_forecast::config::{ConfigManager, ForecastConfig};
use budget_forecast::errors::ForecastError;
use tempfile::tempdir;

#[test]
fn default_config_matches_engine_defaults() {
    let cfg = ForecastConfig::default();

    assert_eq!(cfg.goal_contribution_rate, 0.10);
    assert_eq!(cfg.pay_period_horizon, 3);
    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
    cfg.validate().expect("defaults are valid");
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().join("nested")).expect("manager");

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded, ForecastConfig::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let cfg = ForecastConfig {
        goal_contribution_rate: 0.2,
        currency: "EUR".into(),
        locale: "de-DE".into(),
        ..ForecastConfig::default()
    };

    manager.save(&cfg).expect("save config");
    assert!(manager.path().exists());
    assert!(!manager.path().with_extension("json.tmp").exists());

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded, cfg);
}

#[test]
fn invalid_config_is_not_saved() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    let cfg = ForecastConfig {
        max_catch_up_steps: 0,
        ..ForecastConfig::default()
    };

    assert!(matches!(manager.save(&cfg), Err(ForecastError::Config(_))));
    assert!(!manager.path().exists());
}

#[test]
fn corrupt_file_reports_config_error() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    std::fs::write(manager.path(), "{ not json").expect("write");

    assert!(matches!(manager.load(), Err(ForecastError::Config(_))));
}
