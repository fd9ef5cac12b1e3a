use crate::cache::ObjectCache;
use crate::errors::{LmsError, Result};
use crate::models::system::entities::KnownSettingKey;
use crate::services::system::DynamicConfig;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 初始化动态配置缓存
/// 从数据库加载配置并初始化全局缓存
async fn init_dynamic_config(storage: &Arc<dyn Storage>) {
    match storage.list_all_settings().await {
        Ok(settings) => {
            let settings_vec: Vec<(String, String)> =
                settings.into_iter().map(|s| (s.key, s.value)).collect();
            DynamicConfig::init(settings_vec).await;
        }
        Err(e) => {
            warn!(
                "Failed to load dynamic config from database: {}, using defaults",
                e
            );
            // 使用空配置初始化，DynamicConfig 会回退到 AppConfig
            DynamicConfig::init(vec![]).await;
        }
    }

    match DynamicConfig::grade_ranges().await {
        Some(table) => {
            let letters: Vec<&str> = table.ranges().iter().map(|r| r.letter.as_str()).collect();
            info!("Grade ranges loaded: {}", letters.join(" > "));
        }
        None => warn!(
            "Setting '{}' is missing or invalid, course finalization is disabled until an admin fixes it",
            KnownSettingKey::GradeRanges.as_str()
        ),
    }
}

/// 准备服务器启动的上下文
/// 包括存储、动态配置和缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| LmsError::configuration("Failed to install rustls crypto provider"))?;

    let storage = crate::storage::create_storage().await?;
    info!("Storage backend initialized and migrations completed");

    // 初始化动态配置缓存
    init_dynamic_config(&storage).await;

    // 创建缓存实例
    let cache = crate::cache::create_object_cache().await?;
    info!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
