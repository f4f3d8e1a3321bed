use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use crate::projection::CanvasConfig;

/// Complete application configuration, loaded from environment variables or default values.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub projection: ProjectionConfig,
}

impl AppConfig {
    /// Creates a configuration from the currently available environment variables.
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            projection: ProjectionConfig::from_env(),
        }
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    bind_ip: IpAddr,
    display_host: String,
    port: u16,
}

impl ApiConfig {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 8080;
    const HOST_VAR: &'static str = "LOAD_PLANNER_API_HOST";
    const PORT_VAR: &'static str = "LOAD_PLANNER_API_PORT";

    fn from_env() -> Self {
        let (bind_ip, display_host) = parse_host(env_string(Self::HOST_VAR));
        let port = parse_port(env_string(Self::PORT_VAR));
        Self {
            bind_ip,
            display_host,
            port,
        }
    }

    /// Socket address to bind the server to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    /// Visible hostname for logging and hints.
    pub fn display_host(&self) -> &str {
        &self.display_host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Indicates whether binding to all interfaces.
    pub fn binds_to_all_interfaces(&self) -> bool {
        match self.bind_ip {
            IpAddr::V4(addr) => addr == Ipv4Addr::UNSPECIFIED,
            IpAddr::V6(addr) => addr == Ipv6Addr::UNSPECIFIED,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_ip: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            display_host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
        }
    }
}

fn parse_host(raw: Option<String>) -> (IpAddr, String) {
    let Some(host_value) = raw else {
        return (
            IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            ApiConfig::DEFAULT_HOST.to_string(),
        );
    };
    match host_value.parse::<IpAddr>() {
        Ok(ip) => (ip, host_value),
        Err(err) => {
            tracing::warn!(
                var = ApiConfig::HOST_VAR,
                value = %host_value,
                error = %err,
                fallback = ApiConfig::DEFAULT_HOST,
                "could not parse host, using default"
            );
            (
                IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                ApiConfig::DEFAULT_HOST.to_string(),
            )
        }
    }
}

fn parse_port(raw: Option<String>) -> u16 {
    let Some(raw) = raw else {
        return ApiConfig::DEFAULT_PORT;
    };
    match raw.parse::<u16>() {
        Ok(value) if value != 0 => value,
        Ok(_) => {
            tracing::warn!(
                var = ApiConfig::PORT_VAR,
                fallback = ApiConfig::DEFAULT_PORT,
                "port must not be 0, using default"
            );
            ApiConfig::DEFAULT_PORT
        }
        Err(err) => {
            tracing::warn!(
                var = ApiConfig::PORT_VAR,
                value = %raw,
                error = %err,
                fallback = ApiConfig::DEFAULT_PORT,
                "could not parse port, using default"
            );
            ApiConfig::DEFAULT_PORT
        }
    }
}

/// Configuration for the view projections.
#[derive(Clone, Debug, Default)]
pub struct ProjectionConfig {
    canvas: CanvasConfig,
}

impl ProjectionConfig {
    const CANVAS_SPAN_VAR: &'static str = "LOAD_PLANNER_CANVAS_SPAN";
    const CANVAS_PADDING_VAR: &'static str = "LOAD_PLANNER_CANVAS_PADDING";
    const MIN_CONTAINER_SPAN_VAR: &'static str = "LOAD_PLANNER_MIN_CONTAINER_SPAN";

    fn from_env() -> Self {
        let target_span = load_f64_with_warning(
            Self::CANVAS_SPAN_VAR,
            CanvasConfig::DEFAULT_TARGET_SPAN,
            |value| value > 0.0,
            "must be greater than 0",
        );

        let padding = load_f64_with_warning(
            Self::CANVAS_PADDING_VAR,
            CanvasConfig::DEFAULT_PADDING,
            |value| value >= 0.0,
            "must not be negative",
        );

        let min_container_span = load_f64_with_warning(
            Self::MIN_CONTAINER_SPAN_VAR,
            CanvasConfig::DEFAULT_MIN_CONTAINER_SPAN,
            |value| value > 0.0,
            "must be greater than 0",
        );

        let canvas = CanvasConfig::builder()
            .target_span(target_span)
            .padding(padding)
            .min_container_span(min_container_span)
            .build();

        Self { canvas }
    }

    /// Returns the configured canvas settings.
    pub fn canvas_config(&self) -> CanvasConfig {
        self.canvas
    }
}

fn env_string(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            tracing::warn!(var = name, error = %err, "environment access failed, using default");
            None
        }
    }
}

fn parse_f64_value(
    var_name: &str,
    raw: Option<String>,
    default: f64,
    validator: impl Fn(f64) -> bool,
    invalid_hint: &str,
) -> f64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && validator(value) => {
            if (value - default).abs() > default.abs().max(1.0) * 1e-9 {
                tracing::info!(var = var_name, value, "using non-default projection setting");
            }
            value
        }
        Ok(_) => {
            tracing::warn!(
                var = var_name,
                value = %raw,
                hint = invalid_hint,
                fallback = default,
                "invalid value, using default"
            );
            default
        }
        Err(err) => {
            tracing::warn!(
                var = var_name,
                value = %raw,
                error = %err,
                fallback = default,
                "could not parse number, using default"
            );
            default
        }
    }
}

fn load_f64_with_warning(
    var_name: &str,
    default: f64,
    validator: impl Fn(f64) -> bool,
    invalid_hint: &str,
) -> f64 {
    parse_f64_value(var_name, env_string(var_name), default, validator, invalid_hint)
}
