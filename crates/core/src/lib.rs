#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod event;
pub mod metrics;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{CairnError, CatalogError, ConfigError, PipelineError};

// 설정
pub use config::CairnConfig;

// 이벤트
pub use event::{Event, EventMetadata};
