//! Algorithm selection from configuration files.

use pqchain::config::load_config;
use pqchain::crypto::{Algorithm, SignatureBackend};
use pqchain::ChainError;
use std::io::Write;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn write_config(dir: &TempDir, contents: &str) -> Result<std::path::PathBuf, std::io::Error> {
    let path = dir.path().join("pqchain.toml");
    let mut file = std::fs::File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

#[test]
fn test_backend_from_config_file() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        r#"
        [algorithm]
        family = "ML-DSA"
        variant = "65"
        "#,
    )?;

    let config = load_config(&path)?;
    let backend = SignatureBackend::from_config(&config.algorithm)?;
    assert_eq!(backend.algorithm(), Algorithm::MlDsa65);
    assert_eq!(backend.public_key_size(), 1952);
    Ok(())
}

#[test]
fn test_missing_file_selects_falcon_512() -> TestResult {
    let dir = TempDir::new()?;
    let config = load_config(dir.path().join("absent.toml"))?;
    let backend = SignatureBackend::from_config(&config.algorithm)?;
    assert_eq!(backend.algorithm(), Algorithm::Falcon512);
    Ok(())
}

#[test]
fn test_unknown_variant_fails_fast() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        r#"
        [algorithm]
        family = "falcon"
        variant = "768"
        "#,
    )?;

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ChainError::UnsupportedAlgorithm { .. }));
    assert!(err.is_configuration());
    Ok(())
}

#[test]
fn test_hawk_config_needs_an_injected_oracle() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        r#"
        [algorithm]
        family = "hawk"
        variant = "512"
        "#,
    )?;

    let config = load_config(&path)?;
    assert_eq!(config.algorithm.resolve()?, Algorithm::Hawk512);
    assert!(matches!(
        SignatureBackend::from_config(&config.algorithm),
        Err(ChainError::OracleUnavailable(_))
    ));
    Ok(())
}
