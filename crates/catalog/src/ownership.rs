//! 소유 파일 계산
//!
//! 패키지 매니페스트의 파일 경로 목록에서 빈 경로를 버리고, 중복을 제거한 뒤
//! 바이트 순으로 정렬합니다. 결과는 입력 순서와 무관하게 항상 같습니다.

use std::collections::BTreeSet;

/// 경로 목록을 소유 파일 집합으로 정규화합니다.
///
/// 빈 문자열은 "경로 없음" 표식이므로 결과에 포함되지 않습니다.
/// 경로 문자열은 정규화하지 않으며 (`/a/../b`도 그대로) 정확히 같은 문자열만
/// 중복으로 취급합니다.
pub fn owned_paths<'a, I>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    paths
        .into_iter()
        .filter(|path| !path.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_paths() {
        assert_eq!(owned_paths(["/somewhere", "/else"]), vec!["/else", "/somewhere"]);
    }

    #[test]
    fn drops_empty_paths() {
        assert_eq!(owned_paths(["/somewhere", ""]), vec!["/somewhere"]);
        assert!(owned_paths(["", ""]).is_empty());
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(owned_paths(std::iter::empty()).is_empty());
    }

    #[test]
    fn removes_exact_duplicates_only() {
        assert_eq!(
            owned_paths(["/usr/bin/a", "/usr/bin/a", "/usr/bin/a/", "/usr/bin/./a"]),
            vec!["/usr/bin/./a", "/usr/bin/a", "/usr/bin/a/"]
        );
    }

    #[test]
    fn orders_by_raw_bytes() {
        // 대문자(0x41..)가 소문자(0x61..)보다 앞, 비 ASCII는 맨 뒤
        assert_eq!(
            owned_paths(["/b", "/\u{e9}", "/B", "/a"]),
            vec!["/B", "/a", "/b", "/\u{e9}"]
        );
    }
}
