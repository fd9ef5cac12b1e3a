//! 对象缓存
//!
//! 缓存后端以插件形式注册（`moka` 内存缓存、`redis`），启动时按配置选择；
//! Redis 不可用时回退到 Moka。值统一以 JSON 字符串保存。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::{LmsError, Result};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue, // 后端出错，视为未命中
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// `ttl` 为 0 时使用后端默认 TTL（秒）
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 读取并反序列化缓存值，解析失败时删除该键
pub async fn get_json<T: DeserializeOwned>(cache: &dyn ObjectCache, key: &str) -> Option<T> {
    match cache.get_raw(key).await {
        CacheResult::Found(json) => match serde_json::from_str::<T>(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Failed to deserialize cached value for {}: {}", key, e);
                cache.remove(key).await;
                None
            }
        },
        _ => None,
    }
}

/// 序列化后写入缓存
pub async fn insert_json<T: Serialize>(cache: &dyn ObjectCache, key: &str, value: &T, ttl: u64) {
    match serde_json::to_string(value) {
        Ok(json) => cache.insert_raw(key.to_string(), json, ttl).await,
        Err(e) => warn!("Failed to serialize value for cache key {}: {}", key, e),
    }
}

/// 注册缓存插件
///
/// 目标类型需要提供 `async fn connect() -> crate::errors::Result<Self>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        let cache = <$ty>::connect().await?;
                        Ok::<Box<dyn $crate::cache::ObjectCache>, $crate::errors::LmsError>(
                            Box::new(cache),
                        )
                    })
                }),
            );
        }
    };
}

async fn build_plugin(name: &str) -> Result<Box<dyn ObjectCache>> {
    let constructor = register::get_object_cache_plugin(name)
        .ok_or_else(|| {
            LmsError::cache_plugin_not_found(format!(
                "未注册的缓存插件: {name}，可用: {}",
                register::registered_plugin_names().join(", ")
            ))
        })?;
    constructor().await
}

/// 按配置创建缓存后端
pub async fn create_object_cache() -> Result<Arc<dyn ObjectCache>> {
    register::debug_object_cache_registry();

    let cache_type = AppConfig::get().cache.cache_type.as_str();
    match build_plugin(cache_type).await {
        Ok(cache) => {
            info!("缓存后端已启用: {}", cache_type);
            Ok(Arc::from(cache))
        }
        Err(e) if cache_type != "moka" => {
            warn!("缓存后端 {} 初始化失败，回退到 moka: {}", cache_type, e);
            Ok(Arc::from(build_plugin("moka").await?))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_cache::moka::MokaCacheWrapper;

    #[tokio::test]
    async fn test_json_helpers() {
        let cache = MokaCacheWrapper::with_settings(100, 60);
        insert_json(&cache, "numbers", &vec![1, 2, 3], 0).await;
        let value: Option<Vec<i32>> = get_json(&cache, "numbers").await;
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_bad_json_is_evicted() {
        let cache = MokaCacheWrapper::with_settings(100, 60);
        cache
            .insert_raw("broken".to_string(), "{not json".to_string(), 0)
            .await;
        let value: Option<Vec<i32>> = get_json(&cache, "broken").await;
        assert!(value.is_none());
        assert_eq!(cache.get_raw("broken").await, CacheResult::NotFound);
    }

    #[test]
    fn test_plugins_registered() {
        assert!(register::get_object_cache_plugin("moka").is_some());
        assert!(register::get_object_cache_plugin("redis").is_some());
        assert!(register::get_object_cache_plugin("memcached").is_none());
    }
}
