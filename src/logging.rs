use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Pipeline events at debug; HTTP client internals stay quiet unless asked for.
pub const DEFAULT_FILTER: &str = "info,napkin_backend=debug,reqwest=warn,hyper=warn,hyper_util=warn";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub loki_enabled: bool,
    pub loki_url: Option<String>,
    pub service_name: String,
    pub environment: String,
    pub log_filter: String,
    /// Exchange whose filings this instance scrapes; attached as a Loki label
    pub market: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            loki_enabled: lookup("LOKI_ENABLED").is_some_and(|v| parse_flag(&v)),
            loki_url: lookup("LOKI_URL").filter(|url| !url.trim().is_empty()),
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| "napkin-backend".to_string()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            market: "ngx".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.loki_enabled && self.loki_url.is_none() {
            return Err("LOKI_ENABLED is true but LOKI_URL is not set".to_string());
        }
        Ok(())
    }

    /// `RUST_LOG` directives, or the default filter when they do not parse.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_filter).unwrap_or_else(|e| {
            eprintln!("Ignoring invalid RUST_LOG {:?}: {}", self.log_filter, e);
            EnvFilter::new(DEFAULT_FILTER)
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    config.validate()?;

    #[cfg(feature = "loki")]
    let loki = loki_layer(&config)?;
    #[cfg(not(feature = "loki"))]
    let loki: Option<tracing_subscriber::layer::Identity> = None;

    let shipping = loki.is_some();

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(loki)
        .try_init()?;

    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        market = %config.market,
        loki = shipping,
        "Logging initialized"
    );
    Ok(())
}

#[cfg(feature = "loki")]
fn loki_layer(
    config: &LoggingConfig,
) -> Result<Option<tracing_loki::Layer>, Box<dyn std::error::Error + Send + Sync>> {
    let Some(loki_url) = config.loki_url.as_deref().filter(|_| config.loki_enabled) else {
        return Ok(None);
    };

    let (layer, task) = tracing_loki::builder()
        .label("service", &config.service_name)?
        .label("environment", &config.environment)?
        .label("market", &config.market)?
        .build_url(url::Url::parse(loki_url)?)?;

    // ships buffered log lines to Loki
    tokio::spawn(task);
    Ok(Some(layer))
}
