use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::mesh::CHECKPOINT_TOLERANCE;
use crate::pose::VISIBILITY_THRESHOLD;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScoringConfig {
    /// チェックポイント探索の許容差（秒）
    #[serde(default = "default_checkpoint_tolerance")]
    pub checkpoint_tolerance: f32,
    /// 加点後に再採点しない時間（秒）
    #[serde(default = "default_debounce_window")]
    pub debounce_window: f32,
    /// 人物検出とみなす主要関節の可視割合
    #[serde(default = "default_presence_ratio")]
    pub presence_ratio: f32,
    /// 人物検出判定で関節を可視とみなす visibility
    #[serde(default = "default_presence_visibility")]
    pub presence_visibility: f32,
}

fn default_checkpoint_tolerance() -> f32 { CHECKPOINT_TOLERANCE }
fn default_debounce_window() -> f32 { 0.4 }
fn default_presence_ratio() -> f32 { 0.2 }
fn default_presence_visibility() -> f32 { VISIBILITY_THRESHOLD }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            checkpoint_tolerance: default_checkpoint_tolerance(),
            debounce_window: default_debounce_window(),
            presence_ratio: default_presence_ratio(),
            presence_visibility: default_presence_visibility(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayConfig {
    /// アクションメッシュJSONのパス
    #[serde(default = "default_mesh_path")]
    pub mesh_path: String,
    /// 観測ログ（JSON Lines）のパス
    #[serde(default = "default_observations_path")]
    pub observations_path: String,
}

fn default_mesh_path() -> String { "action_mesh.json".to_string() }
fn default_observations_path() -> String { "observations.jsonl".to_string() }

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            mesh_path: default_mesh_path(),
            observations_path: default_observations_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// RUST_LOG 未設定時のフィルタ
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String { "info".to_string() }

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LogConfig {
    /// env_logger を初期化する。RUST_LOG があればそちらを優先
    pub fn init(&self) {
        let env = env_logger::Env::default().default_filter_or(self.level.as_str());
        // テストなどで二重初期化されても無視する
        let _ = env_logger::Builder::from_env(env).try_init();
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// 読み込みに失敗した場合はデフォルト設定
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{:#}; using default config", e);
                Self::default()
            }
        }
    }
}
