use chrono_tz::Tz;
use tracing::warn;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEZONE: Tz = Tz::UTC;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Address of the petcare api, without a trailing slash
    pub base_url: String,
    /// Time zone event dates are typed in and shown in
    pub timezone: Tz,
}

impl Config {
    pub fn new() -> Self {
        let base_url = match std::env::var("PETCARE_API_BASE_URL") {
            Ok(url) => match parse_base_url(&url) {
                Ok(url) => url,
                Err(e) => {
                    warn!(
                        "The given PETCARE_API_BASE_URL is not valid: {}, falling back to the default: {}.",
                        e, DEFAULT_BASE_URL
                    );
                    DEFAULT_BASE_URL.into()
                }
            },
            Err(_) => DEFAULT_BASE_URL.into(),
        };
        let timezone = match std::env::var("PETCARE_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given PETCARE_TIMEZONE: {} is not valid, falling back to the default time zone: {}.",
                        tz,
                        DEFAULT_TIMEZONE.name()
                    );
                    DEFAULT_TIMEZONE
                }
            },
            Err(_) => DEFAULT_TIMEZONE,
        };
        Self { base_url, timezone }
    }

    /// Values given on the command line take precedence over the environment.
    /// Unlike the environment, invalid values given there are an error.
    pub fn with_overrides(
        mut self,
        base_url: Option<&str>,
        timezone: Option<&str>,
    ) -> anyhow::Result<Self> {
        if let Some(url) = base_url {
            self.base_url = parse_base_url(url)?;
        }
        if let Some(tz) = timezone {
            self.timezone = tz
                .parse::<Tz>()
                .map_err(|_| anyhow::anyhow!("Unknown time zone: {}", tz))?;
        }
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_base_url(url: &str) -> anyhow::Result<String> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("{} is not an http(s) address", url);
    }
    Ok(url.to_string())
}
