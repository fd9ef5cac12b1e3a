use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 生产环境禁止使用的默认密钥
const DEFAULT_JWT_SECRET: &str = "change-me-in-production";
/// 支持的缓存后端
const CACHE_BACKENDS: &[&str] = &["moka", "redis"];

impl AppConfig {
    /// 加载配置
    ///
    /// 优先级从低到高：`config.toml`、`config.{APP_ENV}.toml`、`LMS_` 前缀环境变量、
    /// 常用的独立环境变量。
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{app_env}")).required(false))
            .add_source(
                Environment::with_prefix("LMS")
                    .separator("_")
                    .try_parsing(true),
            );

        Self::from_builder(Self::with_env_overrides(builder)?)
    }

    fn with_env_overrides(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let env = |name: &str| std::env::var(name).ok();
        builder
            .set_override_option("app.environment", env("APP_ENV"))?
            .set_override_option("app.log_level", env("RUST_LOG"))?
            .set_override_option("server.host", env("SERVER_HOST"))?
            .set_override_option("server.port", env("SERVER_PORT"))?
            .set_override_option("server.unix_socket_path", env("UNIX_SOCKET"))?
            .set_override_option("server.workers", env("CPU_COUNT"))?
            .set_override_option("jwt.secret", env("JWT_SECRET"))?
            .set_override_option("jwt.issuer", env("JWT_ISSUER"))?
            .set_override_option("database.url", env("DATABASE_URL"))?
            .set_override_option("cache.redis.url", env("REDIS_URL"))?
            .set_override_option("cache.redis.key_prefix", env("REDIS_KEY_PREFIX"))
    }

    /// 反序列化、补全默认值并校验
    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;
        app_config.normalize();
        app_config.validate()?;
        Ok(app_config)
    }

    fn normalize(&mut self) {
        // 工作线程数为 0 时按 CPU 数量决定
        if self.server.workers == 0 {
            self.server.workers = num_cpus::get().min(self.server.max_workers).max(1);
        }
        self.cache.cache_type = self.cache.cache_type.trim().to_lowercase();
    }

    /// 检查配置是否可用于启动
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".into()));
        }
        if self.is_production() && self.jwt.secret == DEFAULT_JWT_SECRET {
            return Err(ConfigError::Message(
                "jwt.secret still uses the default value in production".into(),
            ));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Message("database.url must not be empty".into()));
        }
        if !CACHE_BACKENDS.contains(&self.cache.cache_type.as_str()) {
            return Err(ConfigError::Message(format!(
                "cache.type '{}' is not supported (expected one of: {})",
                self.cache.cache_type,
                CACHE_BACKENDS.join(", ")
            )));
        }
        Ok(())
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    const BASE: &str = r#"
        [app]
        system_name = "LMS"
        environment = "development"
        log_level = "info"

        [server]
        host = "127.0.0.1"
        port = 8080
        unix_socket_path = ""
        workers = 0
        max_workers = 4

        [server.timeouts]
        client_request = 5000
        client_disconnect = 1000
        keep_alive = 75

        [server.limits]
        max_payload_size = 1048576

        [jwt]
        secret = "change-me-in-production"
        issuer = "lms-identity"
        leeway = 30

        [database]
        url = "lms.db"
        pool_size = 8
        timeout = 10

        [cache]
        type = " Moka "
        default_ttl = 300

        [cache.redis]
        url = "redis://127.0.0.1:6379"
        key_prefix = "lms:"
        pool_size = 8

        [cache.memory]
        max_capacity = 1000

        [cors]
        allowed_origins = ["*"]
        allowed_methods = ["GET"]
        allowed_headers = ["Authorization"]
        max_age = 600

        [grading]
        list_cache_ttl = 120
    "#;

    fn builder() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(BASE, FileFormat::Toml))
    }

    #[test]
    fn test_defaults_normalized() {
        let config = AppConfig::from_builder(builder()).unwrap();
        assert!(config.server.workers >= 1 && config.server.workers <= 4);
        assert_eq!(config.cache.cache_type, "moka");
        assert_eq!(config.grading.list_cache_ttl, 120);
        assert_eq!(config.server_bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_default_secret_rejected_in_production() {
        let prod = builder()
            .set_override("app.environment", "production")
            .unwrap();
        assert!(AppConfig::from_builder(prod).is_err());

        let prod = builder()
            .set_override("app.environment", "production")
            .unwrap()
            .set_override("jwt.secret", "a-real-secret")
            .unwrap();
        assert!(AppConfig::from_builder(prod).unwrap().is_production());
    }

    #[test]
    fn test_unknown_cache_backend_rejected() {
        let b = builder().set_override("cache.type", "memcached").unwrap();
        let err = AppConfig::from_builder(b).unwrap_err();
        assert!(err.to_string().contains("memcached"));
    }
}
