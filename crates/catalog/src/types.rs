//! 도메인 타입 -- 카탈로그 전용 데이터 구조
//!
//! 에코시스템 태그, 카탈로그 결과, SBOM 형식 등 공통 타입을 정의합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 패키지 에코시스템
///
/// 패키지 메타데이터가 어느 패키지 관리자에서 왔는지를 나타내는 태그입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// Alpine Linux (apk)
    Alpine,
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alpine => write!(f, "alpine"),
        }
    }
}

impl Ecosystem {
    /// 에코시스템에 대응하는 Package URL 타입을 반환합니다.
    ///
    /// purl 사양에 등록된 소문자 리터럴입니다. 예: Alpine -> "alpine"
    pub fn purl_type(&self) -> &'static str {
        match self {
            Self::Alpine => "alpine",
        }
    }

    /// 문자열에서 에코시스템을 파싱합니다 (대소문자 구분 없음).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "alpine" | "apk" => Some(Self::Alpine),
            _ => None,
        }
    }
}

/// 카탈로그 결과 한 건
///
/// 패키지 하나에 대해 계산된 식별자와 소유 파일 목록입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// 패키지 에코시스템
    pub ecosystem: Ecosystem,
    /// 패키지 이름
    pub name: String,
    /// 패키지 버전
    pub version: String,
    /// Package URL (예: `pkg:alpine/musl@1.2.4-r2?arch=x86_64`)
    pub purl: String,
    /// 소유 파일 경로 (중복 제거, 바이트 순 정렬)
    pub owned_files: Vec<String>,
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.purl)
    }
}

/// SBOM 출력 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SbomFormat {
    /// CycloneDX 1.5 JSON
    CycloneDx,
    /// SPDX 2.3 JSON
    Spdx,
}

impl fmt::Display for SbomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycloneDx => write!(f, "cyclonedx"),
            Self::Spdx => write!(f, "spdx"),
        }
    }
}

impl SbomFormat {
    /// 문자열에서 SBOM 형식을 파싱합니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cyclonedx" | "cdx" => Some(Self::CycloneDx),
            "spdx" => Some(Self::Spdx),
            _ => None,
        }
    }
}

/// SBOM 문서
///
/// 생성된 SBOM의 형식과 내용을 담습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SbomDocument {
    /// SBOM 형식
    pub format: SbomFormat,
    /// JSON 문자열 내용
    pub content: String,
    /// 포함된 컴포넌트 수
    pub component_count: usize,
}

impl fmt::Display for SbomDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SbomDocument(format={}, components={})",
            self.format, self.component_count,
        )
    }
}
