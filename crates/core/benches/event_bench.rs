//! 이벤트 메타데이터 벤치마크
//!
//! 추적 ID 생성과 메타데이터 생성 비용을 측정합니다.

use cairn_core::event::{EventMetadata, MODULE_CATALOG, new_trace_id};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_event_metadata(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_metadata");

    group.bench_function("new_trace_id", |b| b.iter(|| black_box(new_trace_id())));

    group.bench_function("with_new_trace", |b| {
        b.iter(|| black_box(EventMetadata::with_new_trace(black_box(MODULE_CATALOG))))
    });

    let trace_id = new_trace_id();
    group.bench_function("with_existing_trace", |b| {
        b.iter(|| black_box(EventMetadata::new(MODULE_CATALOG, trace_id.as_str())))
    });

    group.finish();
}

criterion_group!(benches, bench_event_metadata);
criterion_main!(benches);
