use anyhow::{Context as _, anyhow};
use url::Url;

/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`, or assembled from the
    /// `SIB_API_DB_*` variables when unset.
    pub database_url: String,
    /// HMAC secret for signing and verifying bearer tokens. Env var: `SIB_API_JWT_SECRET`.
    pub jwt_secret: String,
    /// Interface to bind (default "0.0.0.0"). Env var: `SIB_API_HOST`.
    pub host: String,
    /// TCP port to listen on (default 8080). Env var: `SIB_API_PORT`.
    pub port: u16,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = var("SIB_API_JWT_SECRET")
            .filter(|s| !s.is_empty())
            .context("SIB_API_JWT_SECRET must be set")?;

        let database_url = match var("DATABASE_URL") {
            Some(url) => url,
            None => postgres_url(&var)?,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            host: var("SIB_API_HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: var("SIB_API_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}

fn postgres_url<F>(var: &F) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let password =
        var("SIB_API_DB_PASS").context("SIB_API_DB_PASS or DATABASE_URL must be set")?;
    let user = var("SIB_API_DB_USER").unwrap_or_else(|| "erik".to_owned());
    let host = var("SIB_API_DB_HOST").unwrap_or_else(|| "localhost".to_owned());
    let name = var("SIB_API_DB_NAME").unwrap_or_else(|| "sib".to_owned());

    let mut url = Url::parse(&format!("postgres://{host}")).context("invalid SIB_API_DB_HOST")?;
    url.set_username(&user)
        .map_err(|()| anyhow!("invalid SIB_API_DB_USER"))?;
    url.set_password(Some(&password))
        .map_err(|()| anyhow!("invalid SIB_API_DB_PASS"))?;
    if let Some(port) = var("SIB_API_DB_PORT") {
        let port: u16 = port.parse().context("SIB_API_DB_PORT must be a port number")?;
        url.set_port(Some(port))
            .map_err(|()| anyhow!("invalid SIB_API_DB_PORT"))?;
    }
    url.set_path(&name);
    url.query_pairs_mut().append_pair("sslmode", "disable");
    Ok(url.into())
}
