use color_eyre::Result;
use vgdrill::config::ConfigManager;
use vgdrill::{AppConfig, ImputeBounds};

#[test]
fn write_default_config_creates_parseable_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let manager = ConfigManager::with_dir(dir.path().join("vgdrill"));

    let path = manager.write_default_config(false)?;
    assert!(path.exists());

    let config = AppConfig::load_from_path(&path)?;
    assert!(config.validate().is_ok());
    assert_eq!(ImputeBounds::from(&config.imputation), ImputeBounds::default());
    Ok(())
}

#[test]
fn write_default_config_refuses_overwrite_without_force() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let manager = ConfigManager::with_dir(dir.path().to_path_buf());

    manager.write_default_config(false)?;
    assert!(manager.write_default_config(false).is_err());
    assert!(manager.write_default_config(true).is_ok());
    Ok(())
}

#[test]
fn user_config_overrides_imputation_bounds() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[imputation]
critic_score_min = 2.0
critic_score_max = 9.0
total_sales_min = 0.5
total_sales_max = 3.0
decimals = 1
"#,
    )?;

    let user = AppConfig::load_from_path(&path)?;
    let mut config = AppConfig::default();
    config.merge(user);

    let bounds = ImputeBounds::from(&config.imputation);
    assert_eq!(bounds.critic_score_min, 2.0);
    assert_eq!(bounds.critic_score_max, 9.0);
    assert_eq!(bounds.decimals, 1);
    Ok(())
}

#[test]
fn missing_config_file_falls_back_to_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = AppConfig::load_from_path(&dir.path().join("nope.toml"))?;
    assert_eq!(ImputeBounds::from(&config.imputation), ImputeBounds::default());
    Ok(())
}

#[test]
fn file_loading_overrides_merge_over_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[file_loading]
delimiter = 59
has_header = false
"#,
    )?;

    let user = AppConfig::load_from_path(&path)?;
    let mut config = AppConfig::default();
    config.merge(user);

    assert_eq!(config.file_loading.delimiter, Some(b';'));
    assert_eq!(config.file_loading.has_header, Some(false));
    Ok(())
}
