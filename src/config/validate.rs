use anyhow::{Result, bail};

use super::{AppConfig, defaults};

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if cfg.database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    }

    if cfg.database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if cfg.database.min_idle > cfg.database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            cfg.database.min_idle, cfg.database.max_connections
        ));
    }

    if cfg.auth.jwt_secret.trim().is_empty() {
        errors.push("auth.jwt_secret must not be empty".to_string());
    } else if !cfg!(debug_assertions) && cfg.auth.jwt_secret == defaults::DEFAULT_JWT_SECRET {
        errors.push("auth.jwt_secret must be set in release builds".to_string());
    }

    if cfg.auth.access_token_ttl_minutes == 0 {
        errors.push("auth.access_token_ttl_minutes must be > 0".to_string());
    }

    if cfg.auth.refresh_token_ttl_days <= 0 {
        errors.push("auth.refresh_token_ttl_days must be > 0".to_string());
    }

    if cfg.limits.max_boards_per_user == 0 {
        errors.push("limits.max_boards_per_user must be > 0".to_string());
    }

    if cfg.limits.max_cards_per_board == 0 {
        errors.push("limits.max_cards_per_board must be > 0".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::config::AppConfig;

    #[test]
    fn defaults_are_valid() {
        validate(&AppConfig::default()).expect("default config should validate");
    }

    #[test]
    fn collects_every_violation() {
        let mut cfg = AppConfig::default();
        cfg.general.host = "  ".to_string();
        cfg.database.min_idle = 50;
        cfg.limits.max_boards_per_user = 0;

        let message = validate(&cfg).expect_err("config should be rejected").to_string();
        assert!(message.contains("general.host"));
        assert!(message.contains("database.min_idle (50)"));
        assert!(message.contains("limits.max_boards_per_user"));
    }
}
