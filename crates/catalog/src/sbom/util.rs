//! SBOM 생성 유틸리티

use std::time::{SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: u64 = 86_400;

/// 시각을 RFC 3339 UTC 문자열(`YYYY-MM-DDTHH:MM:SSZ`)로 변환합니다.
///
/// epoch 이전 시각은 epoch로 고정됩니다.
pub fn rfc3339(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let (year, month, day) = civil_from_days(secs / SECONDS_PER_DAY);
    let rem = secs % SECONDS_PER_DAY;

    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        rem / 3600,
        rem % 3600 / 60,
        rem % 60,
    )
}

/// epoch 이후 일수를 그레고리력 (연, 월, 일)로 변환합니다.
///
/// 400년 주기(146097일)를 기준으로 3월 시작 연도를 계산한 뒤 1월 시작으로 보정합니다.
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    // 0000-03-01부터의 일수
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z % 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;

    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = era * 400 + yoe + u64::from(month <= 2);

    (year, month, day)
}
