use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ParishError, Result};
use crate::swipe::DEFAULT_THRESHOLD_RATIO;

/// 应用配置 (~/.config/parish/config.toml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub carousel: CarouselConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// 主循环刷新间隔（毫秒）
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// 拖拽提交阈值，占卡片宽度的比例
    #[serde(default = "default_threshold_ratio")]
    pub threshold_ratio: f32,

    /// 见证轮播自动切换间隔（秒），0 表示关闭
    #[serde(default)]
    pub auto_advance_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing 过滤规则，RUST_LOG 优先
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_threshold_ratio() -> f32 {
    DEFAULT_THRESHOLD_RATIO
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            threshold_ratio: default_threshold_ratio(),
            auto_advance_secs: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// 默认配置文件路径
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or(ParishError::NoDir("config"))?
            .join("parish")
            .join("config.toml"))
    }

    /// 加载配置，文件不存在时使用默认值
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|source| ParishError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms.max(16))
    }

    pub fn auto_advance(&self) -> Option<Duration> {
        match self.carousel.auto_advance_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
