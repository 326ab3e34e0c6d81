use std::env;

pub const DEFAULT_ANALYSIS_PROCEDURE: &str = "pkg_funcao2_validacao.analisar_startup";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Database function called by the startup analysis bridge
    pub analysis_procedure: String,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://nebulohub.db?mode=rwc".to_string()),
            analysis_procedure: env::var("ANALYSIS_PROCEDURE")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ANALYSIS_PROCEDURE.to_string()),
            seed_demo: env::var("SEED_DEMO")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(false),
        }
    }
}
