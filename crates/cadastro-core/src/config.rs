use serde::Deserialize;

/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize`; field names map to upper-cased
/// variable names (`database_url` <- `DATABASE_URL`). Use `#[serde(default)]`
/// for optional settings.
pub trait Config: Sized + serde::de::DeserializeOwned {
    /// Load from the process environment.
    fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from an explicit set of variables. Used by tests.
    fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}

/// Output format of the tracing subscriber. Env var: `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}
