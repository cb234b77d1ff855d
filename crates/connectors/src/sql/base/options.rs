use serde::Serialize;
use std::fmt;

/// How the PostgreSQL connector negotiates TLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TlsMode {
    Disable,
    #[default]
    Prefer,
    Require,
}

/// Everything an adapter needs to open a connection.
#[derive(Clone, Serialize)]
pub struct ConnectOptions {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip)]
    pub password: String,
    pub database: String,
    pub tls: TlsMode,
}

impl fmt::Debug for ConnectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectOptions")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("tls", &self.tls)
            .finish()
    }
}

impl fmt::Display for ConnectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_never_printed() {
        let opts = ConnectOptions {
            host: "db".into(),
            port: 3306,
            user: "loader".into(),
            password: "s3cret".into(),
            database: "shop".into(),
            tls: TlsMode::Prefer,
        };
        assert!(!format!("{opts:?}").contains("s3cret"));
        assert_eq!(opts.to_string(), "loader@db:3306/shop");
    }
}
