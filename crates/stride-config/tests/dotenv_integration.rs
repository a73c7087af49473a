//! `.env` values flow through the figment env provider.
//!
//! dotenvy writes the process environment, so these tests live in their own
//! binary and never set the general section.

use figment::Jail;
use stride_config::StrideConfig;

#[test]
fn dotenv_file_feeds_env_provider() {
    Jail::expect_with(|jail| {
        jail.create_file(
            ".env",
            "STRIDE_DATABASE__PATH=dotenv.db\nSTRIDE_SITE__FRONTEND_URL=https://dotenv.example\n",
        )?;

        let config = StrideConfig::load_with_dotenv().map_err(|e| e.to_string())?;
        assert_eq!(config.database.path, "dotenv.db");
        assert_eq!(config.site.frontend_url, "https://dotenv.example");
        Ok(())
    });
}

#[test]
fn missing_dotenv_is_not_an_error() {
    Jail::expect_with(|_jail| {
        let config = StrideConfig::load_with_dotenv().map_err(|e| e.to_string())?;
        assert_eq!(config.general.default_limit, 20);
        Ok(())
    });
}
