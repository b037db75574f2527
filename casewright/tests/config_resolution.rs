use std::time::Duration;

use casewright::{AppConfig, ConfigArgs, ProviderErrorKind, ProviderId, build_runtime};
use clap::Parser;

#[derive(Debug, Parser)]
struct TestCli {
    #[command(flatten)]
    config: ConfigArgs,
}

fn resolve(args: &[&str], env: &[(&str, &str)]) -> Result<AppConfig, casewright::ProviderError> {
    let cli = TestCli::try_parse_from(std::iter::once("casewright").chain(args.iter().copied()))
        .expect("flags should parse");
    AppConfig::from_args(cli.config, |name| {
        env.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    })
}

#[test]
fn flags_override_defaults() {
    let config = resolve(
        &[
            "--provider",
            "openai",
            "--api-key",
            "sk-test",
            "--model",
            "gpt-4o",
            "--temperature",
            "0.7",
            "--max-tokens",
            "1024",
            "--timeout-secs",
            "15",
        ],
        &[],
    )
    .expect("config should resolve");

    assert_eq!(config.provider, ProviderId::OpenAi);
    assert_eq!(config.model, "gpt-4o");
    assert_eq!(config.temperature, 0.7);
    assert_eq!(config.max_tokens, 1024);
    assert_eq!(config.timeout, Duration::from_secs(15));
}

#[test]
fn groq_key_falls_back_to_conventional_variable() {
    let config = resolve(&[], &[("GROQ_API_KEY", "gsk_from_env")]).expect("config");
    assert_eq!(config.provider, ProviderId::Groq);
    assert_eq!(config.api_key.as_deref(), Some("gsk_from_env"));
}

#[test]
fn missing_hosted_key_is_a_credential_error() {
    let error = resolve(&["--provider", "groq"], &[]).expect_err("no key");
    assert_eq!(error.kind, ProviderErrorKind::Authentication);
    assert!(error.message.contains("GROQ_API_KEY"));
}

#[test]
fn out_of_range_temperature_is_rejected() {
    let error = resolve(&["--api-key", "gsk_x", "--temperature", "3.5"], &[]).expect_err("range");
    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
}

#[test]
fn unknown_provider_is_rejected() {
    let error = resolve(&["--provider", "bard"], &[]).expect_err("unknown provider");
    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
}

#[cfg(feature = "provider-ollama")]
#[test]
fn local_provider_builds_without_a_key() {
    let config = resolve(
        &["--provider", "ollama", "--base-url", "http://127.0.0.1:9/v1"],
        &[],
    )
    .expect("config");
    let runtime = build_runtime(&config, true).expect("runtime should build");

    assert_eq!(runtime.provider_id(), ProviderId::Ollama);
    assert!(!runtime.client.is_validated());
}

#[cfg(feature = "provider-groq")]
#[test]
fn rejected_key_prefix_fails_before_any_call() {
    let config = AppConfig::new(ProviderId::Groq).with_api_key("not-a-groq-key");
    let error = build_runtime(&config, false).err().expect("bad prefix");
    assert!(error.is_credential_error());
}
