//! 카탈로그 에러 타입
//!
//! [`CatalogerError`]는 카탈로그 모듈 내에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<CatalogerError> for CairnError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.
//!
//! purl 생성과 소유 파일 계산은 실패하지 않으므로 여기에 해당하는 변형이 없습니다.
//! 실패할 수 있는 것은 purl 파싱, 배치 실행, SBOM 직렬화, 설정 검증뿐입니다.

use cairn_core::error::{CairnError, CatalogError, ConfigError, PipelineError};

use crate::purl::PurlError;

/// 카탈로그 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum CatalogerError {
    /// Package URL 파싱 실패
    #[error("purl error: {0}")]
    Purl(#[from] PurlError),

    /// 배치 크기가 설정된 상한을 초과
    #[error("too many packages: {count} (max: {max})")]
    TooManyPackages {
        /// 요청된 패키지 수
        count: usize,
        /// 허용 최대치
        max: usize,
    },

    /// 워커 태스크 실패 (panic, 취소)
    #[error("worker task failed: {0}")]
    Task(String),

    /// SBOM 문서 생성 실패
    #[error("sbom generation error: {0}")]
    SbomGeneration(String),

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl From<CatalogerError> for CairnError {
    fn from(err: CatalogerError) -> Self {
        match err {
            CatalogerError::Purl(e) => CairnError::Catalog(CatalogError::InvalidPurl(e.to_string())),
            CatalogerError::TooManyPackages { count, max } => {
                CairnError::Catalog(CatalogError::TooManyPackages { count, max })
            }
            CatalogerError::Task(msg) => CairnError::Pipeline(PipelineError::TaskFailed(msg)),
            CatalogerError::SbomGeneration(msg) => {
                CairnError::Catalog(CatalogError::ReportFailed(msg))
            }
            CatalogerError::Config { field, reason } => {
                CairnError::Config(ConfigError::InvalidValue { field, reason })
            }
        }
    }
}

impl From<PurlError> for CairnError {
    fn from(err: PurlError) -> Self {
        CairnError::Catalog(CatalogError::InvalidPurl(err.to_string()))
    }
}
