//! 에러 타입 -- 도메인별 에러 정의

/// Cairn 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum CairnError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 파이프라인(워커) 처리 에러
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// 카탈로그 생성 에러
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 파이프라인 처리 에러
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// 워커 태스크 실패 (panic, 취소)
    #[error("worker task failed: {0}")]
    TaskFailed(String),
}

/// 카탈로그 에러
///
/// `cairn-catalog`의 도메인 에러가 최상위로 전파될 때 사용하는 분류입니다.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Package URL 파싱 실패
    #[error("invalid package url: {0}")]
    InvalidPurl(String),

    /// 배치 크기 초과
    #[error("too many packages: {count} (max: {max})")]
    TooManyPackages { count: usize, max: usize },

    /// SBOM 문서 생성 실패
    #[error("report generation failed: {0}")]
    ReportFailed(String),
}
