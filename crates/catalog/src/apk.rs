//! Alpine (apk) 패키지 메타데이터
//!
//! 상위 리더가 `lib/apk/db/installed`에서 읽어낸 패키지 한 건을 표현합니다.
//! 이 모듈은 파싱을 하지 않으며, 이미 채워진 값에서 식별자(purl)와 소유 파일을
//! 계산하는 규칙만 담당합니다.
//!
//! # purl 형식
//!
//! ```text
//! pkg:alpine/<name>@<version>?arch=<architecture>
//! ```
//!
//! name과 version은 경로 세그먼트 규칙으로 인코딩되어 `+`가 보존되고
//! 공백은 `%20`이 됩니다. 자세한 규칙은 [`crate::purl`]을 참고하세요.

use serde::{Deserialize, Serialize};

use crate::ownership::owned_paths;
use crate::package::PackageIdentity;
use crate::purl::{PackageUrl, QualifierKey};
use crate::types::Ecosystem;

/// apk 매니페스트의 파일 항목
///
/// `path`가 빈 문자열이면 연결된 경로가 없다는 뜻이며, 소유 파일 계산에서 제외됩니다.
/// 나머지 필드는 보고용이며 식별자 계산에 영향을 주지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApkFileRecord {
    /// 파일 경로 (빈 문자열 허용)
    #[serde(default)]
    pub path: String,
    /// 소유자 UID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_uid: Option<String>,
    /// 소유자 GID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_gid: Option<String>,
    /// 8진수 권한 문자열 (예: "0755")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    /// apk 체크섬 (`Q1` 접두어의 base64 SHA-1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl ApkFileRecord {
    /// 경로만 가진 파일 항목을 생성합니다.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Alpine 패키지 메타데이터
///
/// 모든 필드는 비어 있을 수 있으며, 식별자 계산은 어떤 조합에서도 실패하지 않습니다.
/// `files`는 파싱 순서 그대로이며 중복을 포함할 수 있습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApkMetadata {
    /// 패키지 이름 (`P:`)
    #[serde(default)]
    pub name: String,
    /// 패키지 버전 (`V:`)
    #[serde(default)]
    pub version: String,
    /// 아키텍처 (`A:`)
    #[serde(default)]
    pub architecture: String,
    /// 파일 항목 목록
    #[serde(default)]
    pub files: Vec<ApkFileRecord>,

    /// 원본 패키지 (`o:`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_package: Option<String>,
    /// 메인테이너 (`m:`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainer: Option<String>,
    /// 라이선스 표현식 (`L:`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// 프로젝트 URL (`U:`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// 설명 (`T:`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 설치 크기, 바이트 (`I:`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_size: Option<u64>,
}

impl ApkMetadata {
    /// 이름, 버전, 아키텍처로 메타데이터를 생성합니다.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        architecture: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            architecture: architecture.into(),
            ..Self::default()
        }
    }

    /// 경로 목록으로 파일 항목을 추가합니다.
    pub fn with_files<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(paths.into_iter().map(ApkFileRecord::new));
        self
    }

    /// 파일 항목 하나를 추가합니다.
    pub fn with_file(mut self, record: ApkFileRecord) -> Self {
        self.files.push(record);
        self
    }

    /// 구조화된 Package URL을 반환합니다.
    pub fn purl(&self) -> PackageUrl {
        PackageUrl::new(Ecosystem::Alpine.purl_type(), &self.name)
            .with_version(&self.version)
            .with_qualifier(QualifierKey::ARCH, &self.architecture)
    }
}

impl PackageIdentity for ApkMetadata {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Alpine
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn package_url(&self) -> String {
        self.purl().to_string()
    }

    fn owned_files(&self) -> Vec<String> {
        owned_paths(self.files.iter().map(|f| f.path.as_str()))
    }
}
