/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize`; field `foo_bar` is read from
/// `FOO_BAR`. Use `#[serde(default = "...")]` for optional settings.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn load() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from the process environment.
    ///
    /// # Panics
    ///
    /// Panics if any required env var is missing or cannot be deserialized.
    fn from_env() -> Self {
        Self::load().unwrap_or_else(|e| panic!("failed to load config from environment: {e}"))
    }
}

/// Deserialize from an explicit key/value list instead of the process environment.
pub fn from_pairs<C, I>(pairs: I) -> Result<C, envy::Error>
where
    C: Config,
    I: IntoIterator<Item = (String, String)>,
{
    envy::from_iter(pairs)
}
