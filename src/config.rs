use std::env;

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    /// Spreadsheet webhook URL. `None` disables the mirror entirely.
    pub mirror_url: Option<String>,
    pub mirror_timeout_secs: u64,
    pub gemini_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "./data".to_string()),
            mirror_url: env::var("SHEET_WEBHOOK_URL").ok().filter(|s| !s.is_empty()),
            mirror_timeout_secs: env::var("MIRROR_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty()),
        })
    }
}
