use std::env;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_origins(
            &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "http://localhost:4200".to_string()),
        )
    }

    pub fn from_origins(origins: &str) -> Self {
        let allowed_origins = origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origins_are_trimmed_and_empty_entries_dropped() {
        let config = CorsConfig::from_origins(" http://localhost:4200 , ,https://studio.example ");
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:4200", "https://studio.example"]
        );
    }
}
