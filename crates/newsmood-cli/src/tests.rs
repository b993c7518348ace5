use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["newsmood"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["newsmood", "collect"]).is_err());
}

#[test]
fn missing_api_key_gets_setup_hint() {
    let err = describe_config_error(ConfigError::MissingEnvVar("NEWSAPI_KEY".to_string()));
    assert!(err.to_string().starts_with("API key not found"), "{err}");
}

#[test]
fn other_config_errors_pass_through() {
    let err = describe_config_error(ConfigError::InvalidEnvVar {
        var: "NEWSMOOD_LOOKBACK_DAYS".to_string(),
        reason: "must be at least 1".to_string(),
    });
    assert_eq!(
        err.to_string(),
        "invalid value for NEWSMOOD_LOOKBACK_DAYS: must be at least 1"
    );
}
