use anyhow::Result;
use cas_synthesis::utils::validation::Validate;
use cas_synthesis::{SynthesisError, TomlConfig};
use tempfile::TempDir;

#[test]
fn test_load_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("synthesis.toml");

    std::env::set_var("CAS_SYNTHESIS_FILE_TEST_KEY", "pplx-file-test");
    std::fs::write(
        &config_path,
        r#"
[server]
host = "127.0.0.1"
port = 8081

[upstream]
endpoint = "https://example.com/chat/completions"
api_key = "${CAS_SYNTHESIS_FILE_TEST_KEY}"
model = "sonar-pro"
timeout_seconds = 45
"#,
    )?;

    let config = TomlConfig::from_file(&config_path)?.into_service_config()?;
    config.validate()?;

    assert_eq!(config.bind_addr()?.to_string(), "127.0.0.1:8081");
    assert_eq!(config.upstream.model, "sonar-pro");
    assert_eq!(config.upstream.search_filter, "academic");
    assert_eq!(config.upstream.timeout_seconds, 45);
    Ok(())
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = TomlConfig::from_file(temp_dir.path().join("absent.toml"));
    assert!(matches!(result, Err(SynthesisError::IoError(_))));
}

#[test]
fn test_rejects_non_http_endpoint() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[upstream]
endpoint = "ftp://example.com"
api_key = "pplx-test"
"#,
    )?
    .into_service_config()?;

    assert!(matches!(
        config.validate(),
        Err(SynthesisError::InvalidConfigValueError { .. })
    ));
    Ok(())
}
