//! 카탈로거 -- 패키지 배치를 카탈로그 항목으로 변환
//!
//! [`Cataloger`]는 패키지 메타데이터 배치를 받아 패키지마다 purl과 소유 파일을 계산합니다.
//!
//! # 처리 흐름
//!
//! ```text
//! Vec<PackageMetadata>
//!     -> 크기 검증 (max_packages)
//!     -> workers 개의 청크로 분할 -> JoinSet (spawn_blocking)
//!     -> 청크 순서대로 병합 (입력 순서 보존)
//!     -> CatalogEvent 전송 (try_send) + 메트릭 기록
//!     -> Vec<CatalogEntry>
//! ```
//!
//! 각 항목의 계산은 순수 함수이므로 워커 스케줄링과 무관하게 결과가 같습니다.
//! 이벤트 채널이 가득 찼거나 닫혀 있어도 카탈로그 실행은 실패하지 않습니다.

use std::time::Instant;

use metrics::{counter, histogram};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use cairn_core::event::new_trace_id;
use cairn_core::metrics as m;

use crate::config::CatalogerConfig;
use crate::error::CatalogerError;
use crate::event::CatalogEvent;
use crate::package::{PackageIdentity, PackageMetadata};
use crate::types::CatalogEntry;

/// 패키지 카탈로거
///
/// `CatalogerBuilder`로 생성하며, 생성 이후 상태를 바꾸지 않으므로
/// 여러 배치를 연속으로 처리할 수 있습니다.
pub struct Cataloger {
    config: CatalogerConfig,
    event_tx: mpsc::Sender<CatalogEvent>,
}

impl Cataloger {
    /// 카탈로거 설정을 반환합니다.
    pub fn config(&self) -> &CatalogerConfig {
        &self.config
    }

    /// 패키지 하나를 카탈로그 항목으로 변환합니다.
    ///
    /// 이벤트나 메트릭을 남기지 않는 순수 변환입니다.
    pub fn catalog_one(&self, package: &PackageMetadata) -> CatalogEntry {
        entry_for(package)
    }

    /// 패키지 배치를 카탈로그합니다.
    ///
    /// 반환되는 항목의 순서는 입력 순서와 같습니다.
    ///
    /// # Errors
    ///
    /// - `CatalogerError::TooManyPackages`: 배치 크기가 `max_packages` 초과
    /// - `CatalogerError::Task`: 워커 태스크가 panic 또는 취소됨
    pub async fn catalog(
        &self,
        packages: Vec<PackageMetadata>,
    ) -> Result<Vec<CatalogEntry>, CatalogerError> {
        let count = packages.len();
        let max = self.config.max_packages;
        if count > max {
            warn!(count, max, "batch exceeds max_packages, rejecting");
            counter!(m::CATALOG_RUNS_TOTAL, m::LABEL_RESULT => "failure").increment(1);
            return Err(CatalogerError::TooManyPackages { count, max });
        }

        let started = Instant::now();
        let trace_id = new_trace_id();
        info!(
            packages = count,
            workers = self.config.workers,
            trace_id = %trace_id,
            "catalog run started"
        );

        let entries = match self.run_workers(packages).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, trace_id = %trace_id, "catalog run failed");
                counter!(m::CATALOG_RUNS_TOTAL, m::LABEL_RESULT => "failure").increment(1);
                return Err(e);
            }
        };

        let mut files = 0usize;
        for entry in &entries {
            files += entry.owned_files.len();
            counter!(m::CATALOG_PACKAGES_TOTAL, m::LABEL_ECOSYSTEM => entry.ecosystem.purl_type())
                .increment(1);
            counter!(m::CATALOG_OWNED_FILES_TOTAL, m::LABEL_ECOSYSTEM => entry.ecosystem.purl_type())
                .increment(entry.owned_files.len() as u64);
        }

        let events_dropped = self.emit_events(&entries, files, &trace_id);

        counter!(m::CATALOG_RUNS_TOTAL, m::LABEL_RESULT => "success").increment(1);
        histogram!(m::CATALOG_RUN_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

        info!(
            packages = entries.len(),
            files,
            events_dropped,
            elapsed_ms = started.elapsed().as_millis() as u64,
            trace_id = %trace_id,
            "catalog run completed"
        );

        Ok(entries)
    }

    /// 배치를 청크로 나눠 워커에서 계산하고, 청크 순서대로 다시 합칩니다.
    async fn run_workers(
        &self,
        packages: Vec<PackageMetadata>,
    ) -> Result<Vec<CatalogEntry>, CatalogerError> {
        let chunk_size = packages.len().div_ceil(self.config.workers).max(1);

        let mut tasks = JoinSet::new();
        let mut remaining = packages.into_iter();
        let mut index = 0usize;
        loop {
            let chunk: Vec<PackageMetadata> = remaining.by_ref().take(chunk_size).collect();
            if chunk.is_empty() {
                break;
            }
            debug!(chunk = index, size = chunk.len(), "dispatching chunk");
            tasks.spawn_blocking(move || (index, chunk.iter().map(entry_for).collect::<Vec<_>>()));
            index += 1;
        }

        let mut chunks = Vec::with_capacity(index);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(chunk) => chunks.push(chunk),
                Err(e) => {
                    tasks.abort_all();
                    return Err(CatalogerError::Task(e.to_string()));
                }
            }
        }

        chunks.sort_unstable_by_key(|(index, _)| *index);
        Ok(chunks
            .into_iter()
            .flat_map(|(_, entries)| entries)
            .collect())
    }

    /// 항목별 이벤트와 완료 이벤트를 보내고, 전달하지 못한 이벤트 수를 반환합니다.
    pub(crate) fn emit_events(
        &self,
        entries: &[CatalogEntry],
        files: usize,
        trace_id: &str,
    ) -> u64 {
        let mut dropped = 0u64;
        for entry in entries {
            let event = CatalogEvent::package_cataloged(entry.clone(), trace_id);
            if self.event_tx.try_send(event).is_err() {
                dropped += 1;
            }
        }

        let completed = CatalogEvent::completed(entries.len(), files, trace_id);
        if self.event_tx.try_send(completed).is_err() {
            dropped += 1;
        }

        if dropped > 0 {
            warn!(dropped, trace_id, "catalog events dropped (channel full or closed)");
            counter!(m::CATALOG_EVENTS_DROPPED_TOTAL).increment(dropped);
        }
        dropped
    }
}

fn entry_for(package: &PackageMetadata) -> CatalogEntry {
    CatalogEntry {
        ecosystem: package.ecosystem(),
        name: package.name().to_owned(),
        version: package.version().to_owned(),
        purl: package.package_url(),
        owned_files: package.owned_files(),
    }
}

/// [`Cataloger`] 빌더
///
/// 이벤트 송신자를 지정하지 않으면 `event_channel_capacity` 용량의 채널을 새로 만들고
/// 수신자를 함께 반환합니다.
pub struct CatalogerBuilder {
    config: CatalogerConfig,
    event_tx: Option<mpsc::Sender<CatalogEvent>>,
}

impl CatalogerBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: CatalogerConfig::default(),
            event_tx: None,
        }
    }

    /// 카탈로거 설정을 지정합니다.
    pub fn config(mut self, config: CatalogerConfig) -> Self {
        self.config = config;
        self
    }

    /// 외부 이벤트 전송 채널을 설정합니다.
    pub fn event_sender(mut self, tx: mpsc::Sender<CatalogEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// 카탈로거를 빌드합니다.
    ///
    /// # Returns
    ///
    /// - `Cataloger`: 카탈로거 인스턴스
    /// - `Option<mpsc::Receiver<CatalogEvent>>`: 이벤트 수신 채널
    ///   (외부 event_sender를 설정한 경우 None)
    pub fn build(
        self,
    ) -> Result<(Cataloger, Option<mpsc::Receiver<CatalogEvent>>), CatalogerError> {
        self.config.validate()?;

        let (event_tx, event_rx) = match self.event_tx {
            Some(tx) => (tx, None),
            None => {
                let (tx, rx) = mpsc::channel(self.config.event_channel_capacity);
                (tx, Some(rx))
            }
        };

        let cataloger = Cataloger {
            config: self.config,
            event_tx,
        };

        Ok((cataloger, event_rx))
    }
}

impl Default for CatalogerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
