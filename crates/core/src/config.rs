//! 설정 관리 -- cairn.toml 파싱 및 런타임 설정
//!
//! [`CairnConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`CAIRN_CATALOG_WORKERS=8` 형식)
//! 3. 설정 파일 (`cairn.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), cairn_core::error::CairnError> {
//! use cairn_core::config::CairnConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = CairnConfig::load("cairn.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = CairnConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CairnError, ConfigError};

/// 허용되는 로그 레벨
pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 허용되는 로그 형식
pub const VALID_LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// 허용되는 SBOM 출력 형식
pub const VALID_OUTPUT_FORMATS: [&str; 2] = ["cyclonedx", "spdx"];

const MAX_WORKERS: usize = 256;
const MAX_PACKAGES_LIMIT: usize = 1_000_000;
const MAX_CHANNEL_CAPACITY: usize = 1_000_000;

/// Cairn 통합 설정
///
/// `cairn.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CairnConfig {
    /// 일반 설정 (로깅)
    #[serde(default)]
    pub general: GeneralConfig,
    /// 카탈로그 설정
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CairnConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용한 뒤 검증합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CairnError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값에서 시작하는 [`load`](Self::load) 변형입니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, CairnError> {
        let config = Self::load_layers(path).await?;
        config.validate()?;
        Ok(config)
    }

    /// 기본값, 설정 파일, 환경변수를 차례로 쌓되 검증은 하지 않습니다.
    ///
    /// 파일이 없으면 기본값에서 시작합니다. 호출자가 CLI 오버라이드까지 적용한 뒤
    /// [`validate`](Self::validate)를 한 번 호출해야 합니다. 그래야 상위 계층이
    /// 하위 계층의 잘못된 값을 바로잡을 수 있습니다.
    pub async fn load_layers(path: impl AsRef<Path>) -> Result<Self, CairnError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(CairnError::Config(ConfigError::FileNotFound { .. })) => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// TOML 파일을 파싱만 합니다 (환경변수 오버라이드, 검증 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, CairnError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CairnError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                CairnError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, CairnError> {
        toml::from_str(toml_str).map_err(|e| {
            CairnError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `CAIRN_{SECTION}_{FIELD}`
    /// 예: `CAIRN_GENERAL_LOG_LEVEL=debug`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "CAIRN_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "CAIRN_GENERAL_LOG_FORMAT");
        override_string(&mut self.general.log_file, "CAIRN_GENERAL_LOG_FILE");
        override_bool(&mut self.general.quiet, "CAIRN_GENERAL_QUIET");

        // Catalog
        override_usize(&mut self.catalog.workers, "CAIRN_CATALOG_WORKERS");
        override_usize(&mut self.catalog.max_packages, "CAIRN_CATALOG_MAX_PACKAGES");
        override_string(
            &mut self.catalog.output_format,
            "CAIRN_CATALOG_OUTPUT_FORMAT",
        );
        override_bool(
            &mut self.catalog.include_files,
            "CAIRN_CATALOG_INCLUDE_FILES",
        );
        override_usize(
            &mut self.catalog.event_channel_capacity,
            "CAIRN_CATALOG_EVENT_CHANNEL_CAPACITY",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), CairnError> {
        if !VALID_LOG_LEVELS.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", VALID_LOG_LEVELS.join(", ")),
            }
            .into());
        }

        if !VALID_LOG_FORMATS.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", VALID_LOG_FORMATS.join(", ")),
            }
            .into());
        }

        if self.catalog.workers == 0 || self.catalog.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidValue {
                field: "catalog.workers".to_owned(),
                reason: format!("must be 1-{MAX_WORKERS}"),
            }
            .into());
        }

        if self.catalog.max_packages == 0 || self.catalog.max_packages > MAX_PACKAGES_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "catalog.max_packages".to_owned(),
                reason: format!("must be 1-{MAX_PACKAGES_LIMIT}"),
            }
            .into());
        }

        if !VALID_OUTPUT_FORMATS.contains(&self.catalog.output_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "catalog.output_format".to_owned(),
                reason: format!("must be one of: {}", VALID_OUTPUT_FORMATS.join(", ")),
            }
            .into());
        }

        if self.catalog.event_channel_capacity == 0
            || self.catalog.event_channel_capacity > MAX_CHANNEL_CAPACITY
        {
            return Err(ConfigError::InvalidValue {
                field: "catalog.event_channel_capacity".to_owned(),
                reason: format!("must be 1-{MAX_CHANNEL_CAPACITY}"),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
    /// 로그 파일 경로 (빈 문자열이면 콘솔 출력만)
    pub log_file: String,
    /// 콘솔 로그 억제
    pub quiet: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
            log_file: String::new(),
            quiet: false,
        }
    }
}

/// 카탈로그 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// 병렬 워커 태스크 수
    pub workers: usize,
    /// 한 번에 처리할 수 있는 최대 패키지 수
    pub max_packages: usize,
    /// SBOM 출력 형식 (cyclonedx, spdx)
    pub output_format: String,
    /// SBOM에 소유 파일 목록 포함 여부
    pub include_files: bool,
    /// 카탈로그 이벤트 채널 용량
    pub event_channel_capacity: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            max_packages: 100_000,
            output_format: "cyclonedx".to_owned(),
            include_files: true,
            event_channel_capacity: 1024,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
