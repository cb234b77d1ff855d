use crate::settings::error::SettingsError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Environment variables from the process, optionally overlaid by a `.env` file.
#[derive(Debug, Clone, Default)]
pub struct EnvManager {
    vars: HashMap<String, String>,
}

impl EnvManager {
    /// Snapshot of the process environment.
    pub fn new() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load variables from a .env file. Entries in the file win over the
    /// process environment.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SettingsError::EnvFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let loaded = self.parse_env_content(&content).map_err(|reason| SettingsError::EnvFile {
            path: path.display().to_string(),
            reason,
        })?;
        debug!("Loaded {} variables from {}", loaded, path.display());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.vars.insert(key.to_string(), value.into());
    }

    fn parse_env_content(&mut self, content: &str) -> Result<usize, String> {
        let mut loaded = 0;
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);
            let Some((key, value)) = line.split_once('=') else {
                return Err(format!(
                    "malformed line {} (expected KEY=VALUE)",
                    line_num + 1
                ));
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(format!("empty key at line {}", line_num + 1));
            }

            self.vars
                .insert(key.to_string(), Self::unquote_value(value));
            loaded += 1;
        }

        Ok(loaded)
    }

    fn unquote_value(value: &str) -> String {
        let value = value.trim();

        for quote in ['"', '\''] {
            if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
                return value[1..value.len() - 1].to_string();
            }
        }

        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn empty() -> EnvManager {
        EnvManager::from_vars(Vec::<(String, String)>::new())
    }

    #[test]
    fn test_parse_basic_env() {
        let mut env = empty();
        let content = r#"
# Comment
KEY1=value1
export KEY2 = value2
        "#;

        env.parse_env_content(content).unwrap();
        assert_eq!(env.get("KEY1"), Some("value1"));
        assert_eq!(env.get("KEY2"), Some("value2"));
    }

    #[test]
    fn test_parse_quoted_values() {
        let mut env = empty();
        let content = r#"
QUOTED="value with spaces"
SINGLE='single quoted'
EQUALS=a=b
        "#;

        env.parse_env_content(content).unwrap();
        assert_eq!(env.get("QUOTED"), Some("value with spaces"));
        assert_eq!(env.get("SINGLE"), Some("single quoted"));
        assert_eq!(env.get("EQUALS"), Some("a=b"));
    }

    #[test]
    fn test_invalid_env_format() {
        let mut env = empty();
        assert!(env.parse_env_content("INVALID LINE WITHOUT EQUALS").is_err());
        assert!(env.parse_env_content("=value").is_err());
    }

    #[test]
    fn test_file_overrides_process_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "SALESLOAD_DB_HOST=db.from.file").unwrap();

        let mut env = EnvManager::from_vars([("SALESLOAD_DB_HOST", "localhost")]);
        env.load_from_file(file.path()).unwrap();
        assert_eq!(env.get("SALESLOAD_DB_HOST"), Some("db.from.file"));
    }

    #[test]
    fn test_missing_file() {
        let err = empty().load_from_file("/no/such/.env").unwrap_err();
        assert!(matches!(err, SettingsError::EnvFile { .. }));
    }

    #[test]
    fn test_blank_value_reads_as_unset() {
        let env = EnvManager::from_vars([("SALESLOAD_DB_USER", "  ")]);
        assert_eq!(env.get("SALESLOAD_DB_USER"), None);
    }
}
