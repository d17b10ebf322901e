use super::*;

#[test]
fn test_defaults_are_standard_chess() {
    let config = RulesConfig::default();
    assert!(config.castling);
    assert!(config.en_passant);
    assert!(config.fifty_move_rule);
    assert!(config.threefold_repetition);
    assert!(config.insufficient_material);
    assert_eq!(config.auto_promotion, None);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = RulesConfig::from_toml_str("en_passant = false\nauto_promotion = \"queen\"\n")
        .unwrap();
    assert!(!config.en_passant);
    assert!(config.castling);
    assert_eq!(config.auto_promotion, Some(PieceKind::Queen));
}

#[test]
fn test_empty_toml_is_default() {
    assert_eq!(RulesConfig::from_toml_str("").unwrap(), RulesConfig::default());
}

#[test]
fn test_rejects_king_promotion() {
    let err = RulesConfig::from_toml_str("auto_promotion = \"king\"").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPromotion(PieceKind::King)));
    assert!(RulesConfig::default()
        .with_auto_promotion(PieceKind::Pawn)
        .is_err());
}

#[test]
fn test_rejects_unknown_kind() {
    let err = RulesConfig::from_toml_str("auto_promotion = \"dragon\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_toml_roundtrip() {
    let config = RulesConfig::minimal()
        .with_auto_promotion(PieceKind::Knight)
        .unwrap();
    let text = config.to_toml_string().unwrap();
    assert_eq!(RulesConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_save_and_load() {
    let path = std::env::temp_dir().join(format!("chess_rules_{}.toml", std::process::id()));
    let config = RulesConfig {
        threefold_repetition: false,
        ..RulesConfig::default()
    };
    config.save(&path).unwrap();
    let loaded = RulesConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_missing_file() {
    let err = RulesConfig::load(std::path::Path::new("/nonexistent/rules.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
