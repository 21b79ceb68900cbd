//! SBOM 문서 생성
//!
//! [`SbomGenerator`]는 카탈로그 항목 목록을 CycloneDX 1.5 또는 SPDX 2.3 JSON으로 변환합니다.
//!
//! 같은 입력과 같은 생성 시각이면 항상 같은 문서를 만듭니다.
//! 컴포넌트는 purl 순으로 정렬되고, 생성 시각은 호출자가 넘깁니다.

mod cyclonedx;
mod spdx;
mod util;

use std::time::SystemTime;

use tracing::debug;

use crate::error::CatalogerError;
use crate::types::{CatalogEntry, SbomDocument, SbomFormat};

/// SBOM 생성기 이름 (문서의 tool/creator 항목)
const TOOL_NAME: &str = "cairn";

/// SBOM 생성기
#[derive(Debug, Clone, Copy)]
pub struct SbomGenerator {
    format: SbomFormat,
    include_files: bool,
}

impl SbomGenerator {
    /// 지정된 형식의 생성기를 만듭니다. 소유 파일은 기본으로 포함됩니다.
    pub fn new(format: SbomFormat) -> Self {
        Self {
            format,
            include_files: true,
        }
    }

    /// 소유 파일 목록을 문서에 포함할지 설정합니다.
    pub fn include_files(mut self, include: bool) -> Self {
        self.include_files = include;
        self
    }

    /// 출력 형식
    pub fn format(&self) -> SbomFormat {
        self.format
    }

    /// 카탈로그 항목에서 SBOM 문서를 생성합니다.
    ///
    /// # Errors
    ///
    /// JSON 직렬화 실패 시 `CatalogerError::SbomGeneration` 반환
    pub fn generate(
        &self,
        entries: &[CatalogEntry],
        created: SystemTime,
    ) -> Result<SbomDocument, CatalogerError> {
        let mut sorted: Vec<&CatalogEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| a.purl.cmp(&b.purl));

        let timestamp = util::rfc3339(created);
        debug!(
            format = %self.format,
            components = sorted.len(),
            include_files = self.include_files,
            "generating sbom"
        );

        match self.format {
            SbomFormat::CycloneDx => cyclonedx::generate(&sorted, &timestamp, self.include_files),
            SbomFormat::Spdx => spdx::generate(&sorted, &timestamp, self.include_files),
        }
    }
}
