//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()`, `metrics::histogram!()`
//! 매크로를 호출합니다. 레코더가 설치되지 않았다면 기록은 no-op입니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `cairn_`
//! - 모듈명: `catalog_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(cairn_core::metrics::CATALOG_PACKAGES_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 에코시스템 레이블 키 (alpine)
pub const LABEL_ECOSYSTEM: &str = "ecosystem";

/// 결과 레이블 키 (success, failure)
pub const LABEL_RESULT: &str = "result";

// ─── Catalog 메트릭 ─────────────────────────────────────────────────

/// Catalog: 카탈로그된 패키지 수 (counter, label: ecosystem)
pub const CATALOG_PACKAGES_TOTAL: &str = "cairn_catalog_packages_total";

/// Catalog: 소유 파일로 집계된 경로 수 (counter, label: ecosystem)
pub const CATALOG_OWNED_FILES_TOTAL: &str = "cairn_catalog_owned_files_total";

/// Catalog: 배치 실행 수 (counter, label: result)
pub const CATALOG_RUNS_TOTAL: &str = "cairn_catalog_runs_total";

/// Catalog: 이벤트 채널 전송 실패 수 (counter)
pub const CATALOG_EVENTS_DROPPED_TOTAL: &str = "cairn_catalog_events_dropped_total";

/// Catalog: 배치 처리 시간 (histogram, 초)
pub const CATALOG_RUN_DURATION_SECONDS: &str = "cairn_catalog_run_duration_seconds";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(
        CATALOG_PACKAGES_TOTAL,
        "Total number of packages turned into catalog entries"
    );
    describe_counter!(
        CATALOG_OWNED_FILES_TOTAL,
        "Total number of owned file paths reported across all packages"
    );
    describe_counter!(
        CATALOG_RUNS_TOTAL,
        "Total number of catalog batch runs by result"
    );
    describe_counter!(
        CATALOG_EVENTS_DROPPED_TOTAL,
        "Catalog events that could not be delivered (channel full or closed)"
    );
    describe_histogram!(
        CATALOG_RUN_DURATION_SECONDS,
        "Wall-clock duration of a catalog batch run in seconds"
    );
}
