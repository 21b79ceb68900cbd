//! 카탈로거 설정
//!
//! [`CatalogerConfig`]는 core의 [`CatalogConfig`](cairn_core::config::CatalogConfig)에서
//! 파생되며, 문자열로 적힌 출력 형식을 [`SbomFormat`]으로 해석한 값을 보관합니다.
//!
//! # 사용 예시
//!
//! ```
//! use cairn_catalog::{CatalogerConfig, CatalogerConfigBuilder, SbomFormat};
//!
//! // 기본값으로 생성
//! let config = CatalogerConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! let config = CatalogerConfigBuilder::new()
//!     .workers(8)
//!     .output_format(SbomFormat::Spdx)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.workers, 8);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CatalogerError;
use crate::types::SbomFormat;

/// 설정 상한값 상수
const MAX_WORKERS: usize = 256;
const MAX_PACKAGES_LIMIT: usize = 1_000_000;
const MAX_CHANNEL_CAPACITY: usize = 1_000_000;

/// 카탈로거 설정
///
/// # 필드
///
/// - **workers**: 배치를 나눠 처리할 워커 태스크 수
/// - **max_packages**: 한 배치에 허용되는 최대 패키지 수
/// - **output_format**: SBOM 출력 형식 (CycloneDX / SPDX)
/// - **include_files**: SBOM에 소유 파일 목록 포함 여부
/// - **event_channel_capacity**: 빌더가 만드는 이벤트 채널 용량
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogerConfig {
    /// 워커 태스크 수
    pub workers: usize,
    /// 최대 허용 패키지 수
    pub max_packages: usize,
    /// SBOM 출력 형식
    pub output_format: SbomFormat,
    /// SBOM 소유 파일 포함 여부
    pub include_files: bool,
    /// 이벤트 채널 용량
    pub event_channel_capacity: usize,
}

impl Default for CatalogerConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            max_packages: 100_000,
            output_format: SbomFormat::CycloneDx,
            include_files: true,
            event_channel_capacity: 1024,
        }
    }
}

impl CatalogerConfig {
    /// core의 `CatalogConfig`에서 카탈로거 설정을 생성합니다.
    ///
    /// 알 수 없는 출력 형식은 CycloneDX로 대체됩니다.
    pub fn from_core(core: &cairn_core::config::CatalogConfig) -> Self {
        let output_format =
            SbomFormat::from_str_loose(&core.output_format).unwrap_or(SbomFormat::CycloneDx);

        Self {
            workers: core.workers,
            max_packages: core.max_packages,
            output_format,
            include_files: core.include_files,
            event_channel_capacity: core.event_channel_capacity,
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `workers`: 1-256
    /// - `max_packages`: 1-1000000
    /// - `event_channel_capacity`: 1-1000000
    pub fn validate(&self) -> Result<(), CatalogerError> {
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(CatalogerError::Config {
                field: "workers".to_owned(),
                reason: format!("must be 1-{MAX_WORKERS}"),
            });
        }

        if self.max_packages == 0 || self.max_packages > MAX_PACKAGES_LIMIT {
            return Err(CatalogerError::Config {
                field: "max_packages".to_owned(),
                reason: format!("must be 1-{MAX_PACKAGES_LIMIT}"),
            });
        }

        if self.event_channel_capacity == 0 || self.event_channel_capacity > MAX_CHANNEL_CAPACITY
        {
            return Err(CatalogerError::Config {
                field: "event_channel_capacity".to_owned(),
                reason: format!("must be 1-{MAX_CHANNEL_CAPACITY}"),
            });
        }

        Ok(())
    }
}

/// [`CatalogerConfig`] 빌더
///
/// 빌드 시 유효성 검증을 수행합니다.
#[derive(Default)]
pub struct CatalogerConfigBuilder {
    config: CatalogerConfig,
}

impl CatalogerConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 워커 수를 설정합니다.
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// 최대 패키지 수를 설정합니다.
    pub fn max_packages(mut self, max: usize) -> Self {
        self.config.max_packages = max;
        self
    }

    /// SBOM 출력 형식을 설정합니다.
    pub fn output_format(mut self, format: SbomFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// SBOM 소유 파일 포함 여부를 설정합니다.
    pub fn include_files(mut self, include: bool) -> Self {
        self.config.include_files = include;
        self
    }

    /// 이벤트 채널 용량을 설정합니다.
    pub fn event_channel_capacity(mut self, capacity: usize) -> Self {
        self.config.event_channel_capacity = capacity;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `CatalogerError::Config` 반환
    pub fn build(self) -> Result<CatalogerConfig, CatalogerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
