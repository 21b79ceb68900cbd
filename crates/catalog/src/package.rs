//! 에코시스템 공통 패키지 식별 인터페이스
//!
//! [`PackageIdentity`] trait은 에코시스템마다 다른 식별 규칙을 같은 형태로 노출합니다.
//! [`PackageMetadata`]는 에코시스템별 메타데이터를 태그로 감싼 열거형이며,
//! 카탈로거는 이 타입만 다룹니다.
//!
//! 새 에코시스템을 추가하려면 전용 모듈에 메타데이터 타입과 `PackageIdentity` 구현을
//! 두고, 여기에 변형을 하나 추가합니다.

use serde::{Deserialize, Serialize};

use crate::apk::ApkMetadata;
use crate::types::Ecosystem;

/// 패키지 식별 trait
///
/// 모든 메서드는 순수 함수이며 I/O를 하지 않습니다.
/// 같은 값에 대해 몇 번을 호출하든 같은 결과를 돌려줍니다.
pub trait PackageIdentity: Send + Sync {
    /// 패키지 에코시스템
    fn ecosystem(&self) -> Ecosystem;

    /// 패키지 이름
    fn name(&self) -> &str;

    /// 패키지 버전
    fn version(&self) -> &str;

    /// 정규화된 Package URL 문자열
    fn package_url(&self) -> String;

    /// 소유 파일 경로 (빈 경로 제외, 중복 제거, 바이트 순 정렬)
    fn owned_files(&self) -> Vec<String>;
}

/// 에코시스템 태그가 붙은 패키지 메타데이터
///
/// JSON에서는 `ecosystem` 필드로 변형을 구분합니다.
///
/// ```json
/// {"ecosystem": "alpine", "name": "musl", "version": "1.2.4-r2", "architecture": "x86_64"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ecosystem")]
pub enum PackageMetadata {
    /// Alpine (apk) 패키지
    #[serde(rename = "alpine", alias = "apk")]
    Apk(ApkMetadata),
}

impl PackageMetadata {
    /// 내부 메타데이터를 trait 객체로 반환합니다.
    fn identity(&self) -> &dyn PackageIdentity {
        match self {
            Self::Apk(meta) => meta,
        }
    }
}

impl From<ApkMetadata> for PackageMetadata {
    fn from(meta: ApkMetadata) -> Self {
        Self::Apk(meta)
    }
}

impl PackageIdentity for PackageMetadata {
    fn ecosystem(&self) -> Ecosystem {
        self.identity().ecosystem()
    }

    fn name(&self) -> &str {
        self.identity().name()
    }

    fn version(&self) -> &str {
        self.identity().version()
    }

    fn package_url(&self) -> String {
        self.identity().package_url()
    }

    fn owned_files(&self) -> Vec<String> {
        self.identity().owned_files()
    }
}
