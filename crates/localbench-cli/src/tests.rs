use super::*;

#[test]
fn parses_prompt_with_profile_file() {
    let cli = Cli::try_parse_from(["localbench", "prompt", "--profile", "bakery.yaml"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Prompt {
            profile: ProfileArgs {
                profile_file: Some(ref path),
                ..
            }
        } if path.to_str() == Some("bakery.yaml")
    ));
}

#[test]
fn parses_analyze_field_flags() {
    let cli = Cli::try_parse_from([
        "localbench",
        "analyze",
        "--name",
        "Padaria Central",
        "--address",
        "Rua Augusta 100",
        "--segment",
        "bakery",
        "--radius",
        "5km",
        "--listing-link",
        "https://maps.google.com/?cid=123",
        "--social-handle",
        "@padariacentral",
    ])
    .expect("expected valid cli args");

    let Commands::Analyze { profile, json } = cli.command else {
        panic!("expected analyze command");
    };
    assert!(!json);
    assert_eq!(profile.name.as_deref(), Some("Padaria Central"));
    assert_eq!(profile.radius.as_deref(), Some("5km"));
    assert_eq!(
        profile.listing_link.as_deref(),
        Some("https://maps.google.com/?cid=123")
    );
    assert_eq!(profile.social_handle.as_deref(), Some("@padariacentral"));
    assert!(profile.differentiators.is_none());
}

#[test]
fn parses_analyze_json_flag() {
    let cli = Cli::try_parse_from(["localbench", "analyze", "--json"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Analyze { json: true, .. }));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["localbench"]).is_err());
}

#[test]
fn rejects_unknown_flag() {
    assert!(Cli::try_parse_from(["localbench", "prompt", "--colour", "red"]).is_err());
}
