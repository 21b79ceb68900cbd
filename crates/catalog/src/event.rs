//! 카탈로그 진행 이벤트
//!
//! [`CatalogEvent`]는 카탈로거가 패키지 하나를 처리하거나 배치를 마칠 때 내보내는 이벤트입니다.
//! core의 [`Event`] trait을 구현하여 `tokio::mpsc` 채널로 전송할 수 있습니다.
//! 같은 배치에서 나온 이벤트는 같은 trace_id를 공유합니다.

use std::fmt;

use cairn_core::event::{
    EVENT_TYPE_CATALOG_COMPLETED, EVENT_TYPE_PACKAGE_CATALOGED, Event, EventMetadata,
    MODULE_CATALOG,
};

use crate::types::CatalogEntry;

/// 이벤트 내용
#[derive(Debug, Clone)]
pub enum CatalogEventKind {
    /// 패키지 하나의 카탈로그 결과
    PackageCataloged {
        /// 계산된 카탈로그 항목
        entry: CatalogEntry,
    },
    /// 배치 완료
    Completed {
        /// 처리한 패키지 수
        total: usize,
        /// 소유 파일 경로 합계
        files: usize,
    },
}

/// 카탈로그 이벤트
#[derive(Debug, Clone)]
pub struct CatalogEvent {
    /// 이벤트 고유 ID
    pub id: String,
    /// 이벤트 메타데이터
    pub metadata: EventMetadata,
    /// 이벤트 내용
    pub kind: CatalogEventKind,
}

impl CatalogEvent {
    /// 기존 trace에 연결된 패키지 카탈로그 이벤트를 생성합니다.
    pub fn package_cataloged(entry: CatalogEntry, trace_id: impl Into<String>) -> Self {
        Self::with_trace(CatalogEventKind::PackageCataloged { entry }, trace_id)
    }

    /// 기존 trace에 연결된 배치 완료 이벤트를 생성합니다.
    pub fn completed(total: usize, files: usize, trace_id: impl Into<String>) -> Self {
        Self::with_trace(CatalogEventKind::Completed { total, files }, trace_id)
    }

    fn with_trace(kind: CatalogEventKind, trace_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            metadata: EventMetadata::new(MODULE_CATALOG, trace_id),
            kind,
        }
    }
}

impl Event for CatalogEvent {
    fn event_id(&self) -> &str {
        &self.id
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    fn event_type(&self) -> &str {
        match self.kind {
            CatalogEventKind::PackageCataloged { .. } => EVENT_TYPE_PACKAGE_CATALOGED,
            CatalogEventKind::Completed { .. } => EVENT_TYPE_CATALOG_COMPLETED,
        }
    }
}

impl fmt::Display for CatalogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short_id = &self.id[..8.min(self.id.len())];
        match &self.kind {
            CatalogEventKind::PackageCataloged { entry } => write!(
                f,
                "CatalogEvent[{short_id}] purl={} files={}",
                entry.purl,
                entry.owned_files.len(),
            ),
            CatalogEventKind::Completed { total, files } => write!(
                f,
                "CatalogEvent[{short_id}] completed packages={total} files={files}",
            ),
        }
    }
}
