//! Package URL (purl) 값 타입 -- 생성, 인코딩, 파싱
//!
//! [`PackageUrl`]은 `pkg:<type>/<namespace>/<name>@<version>?<qualifiers>#<subpath>`
//! 형식의 식별자를 구성요소 단위로 보관하고, `Display`로 정규 문자열을 만들며,
//! `FromStr`로 다시 구성요소를 복원합니다.
//!
//! # 인코딩 규칙
//!
//! - namespace, name, version, subpath 세그먼트: 경로 세그먼트 규칙.
//!   `/ ? # @ %`, 공백, 제어 문자, 비 ASCII 바이트는 퍼센트 인코딩되고
//!   `+`를 포함한 sub-delimiter(`+ $ & = : ! * ' ( ) , ;`)는 그대로 둡니다.
//!   `g++`가 `g%2B%2B`로 바뀌면 식별자가 달라지므로 `+`는 절대 인코딩하지 않습니다.
//! - qualifier 값: 쿼리 규칙. unreserved 문자(`A-Z a-z 0-9 - . _ ~`)만 그대로 두고
//!   나머지는 모두 인코딩합니다. `+`도 `%2B`가 되므로 form 디코더로 읽어도 값이 보존됩니다.
//! - qualifier 키: 소문자 ASCII이며 인코딩하지 않습니다. 키 순서대로 출력합니다.
//! - 값이 빈 qualifier와 빈 version은 출력하지 않습니다.
//!
//! # 사용 예시
//!
//! ```
//! use cairn_catalog::purl::{PackageUrl, QualifierKey};
//!
//! let purl = PackageUrl::new("alpine", "g++")
//!     .with_version("v84")
//!     .with_qualifier(QualifierKey::ARCH, "am86");
//! assert_eq!(purl.to_string(), "pkg:alpine/g++@v84?arch=am86");
//!
//! let parsed: PackageUrl = "pkg:alpine/g%20plus%20plus@v84?arch=am86".parse().unwrap();
//! assert_eq!(parsed.name(), "g plus plus");
//! assert_eq!(parsed.qualifier("arch"), Some("am86"));
//! ```

use std::borrow::{Borrow, Cow};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// purl 스킴
const SCHEME: &str = "pkg";

/// 경로 세그먼트 인코딩 집합 (namespace, name, version, subpath)
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'+')
    .remove(b'$')
    .remove(b'&')
    .remove(b'=')
    .remove(b':')
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b',')
    .remove(b';');

/// qualifier 값 인코딩 집합 (unreserved 외 전부)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// purl 파싱 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PurlError {
    /// `pkg:` 스킴 없음
    #[error("purl must start with the 'pkg:' scheme")]
    MissingScheme,

    /// 타입 없음
    #[error("purl is missing a package type")]
    MissingType,

    /// 타입에 허용되지 않는 문자
    #[error("invalid purl type: '{0}'")]
    InvalidType(String),

    /// 이름 없음
    #[error("purl is missing a package name")]
    MissingName,

    /// qualifier 키에 허용되지 않는 문자
    #[error("invalid qualifier key: '{0}'")]
    InvalidQualifierKey(String),

    /// 디코딩 결과가 UTF-8이 아님
    #[error("invalid percent-encoding in '{0}'")]
    InvalidPercentEncoding(String),
}

/// qualifier 키
///
/// 소문자 ASCII 문자, 숫자, `.`, `-`, `_`로 구성되며 숫자로 시작하지 않습니다.
/// 생성 시점에 검증되므로 출력 단계에서는 인코딩하지 않아도 안전합니다.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifierKey(Cow<'static, str>);

impl QualifierKey {
    /// 아키텍처 qualifier (`arch`)
    pub const ARCH: Self = Self(Cow::Borrowed("arch"));

    /// 키 문자열을 검증하여 생성합니다. 대문자는 소문자로 정규화됩니다.
    pub fn new(key: &str) -> Result<Self, PurlError> {
        let key = key.to_ascii_lowercase();
        if is_valid_qualifier_key(&key) {
            Ok(Self(Cow::Owned(key)))
        } else {
            Err(PurlError::InvalidQualifierKey(key))
        }
    }

    /// 키 문자열을 반환합니다.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for QualifierKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QualifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Package URL
///
/// 구성요소는 디코딩된 원본 값으로 보관합니다. 인코딩은 `Display` 시점에만 일어나므로
/// `to_string()` 후 `parse()`하면 같은 값이 돌아옵니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageUrl {
    ty: String,
    namespace: Option<String>,
    name: String,
    version: Option<String>,
    qualifiers: BTreeMap<QualifierKey, String>,
    subpath: Option<String>,
}

impl PackageUrl {
    /// 타입과 이름으로 purl을 생성합니다. 타입은 소문자로 정규화됩니다.
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into().to_ascii_lowercase(),
            namespace: None,
            name: name.into(),
            version: None,
            qualifiers: BTreeMap::new(),
            subpath: None,
        }
    }

    /// namespace를 설정합니다. `/`로 여러 세그먼트를 구분합니다.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = non_empty(namespace.into());
        self
    }

    /// version을 설정합니다. 빈 문자열이면 version 없음으로 취급합니다.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = non_empty(version.into());
        self
    }

    /// qualifier를 설정합니다. 빈 값이면 해당 키를 제거합니다.
    pub fn with_qualifier(mut self, key: QualifierKey, value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            self.qualifiers.remove(&key);
        } else {
            self.qualifiers.insert(key, value);
        }
        self
    }

    /// subpath를 설정합니다.
    pub fn with_subpath(mut self, subpath: impl Into<String>) -> Self {
        self.subpath = non_empty(subpath.into());
        self
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// 키 순으로 정렬된 qualifier 전체를 반환합니다.
    pub fn qualifiers(&self) -> &BTreeMap<QualifierKey, String> {
        &self.qualifiers
    }

    /// 키로 qualifier 값을 조회합니다. 키는 소문자로 전달해야 합니다.
    pub fn qualifier(&self, key: &str) -> Option<&str> {
        self.qualifiers.get(key).map(String::as_str)
    }

    pub fn subpath(&self) -> Option<&str> {
        self.subpath.as_deref()
    }
}

impl fmt::Display for PackageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}:{}/", self.ty)?;

        if let Some(namespace) = &self.namespace {
            for segment in namespace.split('/').filter(|s| !s.is_empty()) {
                write!(f, "{}/", utf8_percent_encode(segment, PATH_SEGMENT))?;
            }
        }

        write!(f, "{}", utf8_percent_encode(&self.name, PATH_SEGMENT))?;

        if let Some(version) = &self.version {
            write!(f, "@{}", utf8_percent_encode(version, PATH_SEGMENT))?;
        }

        let mut separator = '?';
        for (key, value) in &self.qualifiers {
            write!(
                f,
                "{separator}{key}={}",
                utf8_percent_encode(value, QUERY_VALUE)
            )?;
            separator = '&';
        }

        if let Some(subpath) = &self.subpath {
            let mut separator = '#';
            for segment in subpath.split('/').filter(|s| is_kept_subpath_segment(s)) {
                write!(
                    f,
                    "{separator}{}",
                    utf8_percent_encode(segment, PATH_SEGMENT)
                )?;
                separator = '/';
            }
        }

        Ok(())
    }
}

impl FromStr for PackageUrl {
    type Err = PurlError;

    /// purl 문자열을 파싱합니다.
    ///
    /// 오른쪽에서부터 `#`(subpath), `?`(qualifiers)를 떼어낸 뒤,
    /// `pkg:` 스킴, 타입, 가장 오른쪽 `@`(version), 마지막 `/`(name) 순으로 분리합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rest, subpath) = match s.rsplit_once('#') {
            Some((rest, raw)) => (rest, parse_subpath(raw)?),
            None => (s, None),
        };

        let (rest, qualifiers) = match rest.rsplit_once('?') {
            Some((rest, raw)) => (rest, parse_qualifiers(raw)?),
            None => (rest, BTreeMap::new()),
        };

        let (scheme, rest) = rest.split_once(':').ok_or(PurlError::MissingScheme)?;
        if !scheme.eq_ignore_ascii_case(SCHEME) {
            return Err(PurlError::MissingScheme);
        }

        let rest = rest.trim_start_matches('/');
        let (ty, rest) = rest.split_once('/').unwrap_or((rest, ""));
        if ty.is_empty() {
            return Err(PurlError::MissingType);
        }
        let ty = ty.to_ascii_lowercase();
        if !is_valid_type(&ty) {
            return Err(PurlError::InvalidType(ty));
        }

        let rest = rest.trim_matches('/');
        let (rest, version) = match rest.rsplit_once('@') {
            Some((rest, raw)) => (rest, non_empty(decode(raw)?)),
            None => (rest, None),
        };

        let (raw_namespace, raw_name) = match rest.rsplit_once('/') {
            Some((namespace, name)) => (Some(namespace), name),
            None => (None, rest),
        };

        let name = decode(raw_name)?;
        if name.is_empty() {
            return Err(PurlError::MissingName);
        }

        let namespace = match raw_namespace {
            Some(raw) => {
                let segments = raw
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .map(decode)
                    .collect::<Result<Vec<_>, _>>()?;
                non_empty(segments.join("/"))
            }
            None => None,
        };

        Ok(Self {
            ty,
            namespace,
            name,
            version,
            qualifiers,
            subpath,
        })
    }
}

fn parse_qualifiers(raw: &str) -> Result<BTreeMap<QualifierKey, String>, PurlError> {
    let mut qualifiers = BTreeMap::new();
    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = QualifierKey::new(key)?;
        let value = decode(value)?;
        if !value.is_empty() {
            qualifiers.insert(key, value);
        }
    }
    Ok(qualifiers)
}

fn parse_subpath(raw: &str) -> Result<Option<String>, PurlError> {
    let segments = raw
        .split('/')
        .filter(|s| is_kept_subpath_segment(s))
        .map(decode)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(non_empty(segments.join("/")))
}

fn decode(raw: &str) -> Result<String, PurlError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| PurlError::InvalidPercentEncoding(raw.to_owned()))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn is_kept_subpath_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".."
}

fn is_valid_type(ty: &str) -> bool {
    let mut chars = ty.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'))
}

fn is_valid_qualifier_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || matches!(c, '.' | '-' | '_') => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '-' | '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> QualifierKey {
        QualifierKey::new(k).unwrap()
    }

    #[test]
    fn display_minimal() {
        let purl = PackageUrl::new("alpine", "p")
            .with_version("v")
            .with_qualifier(QualifierKey::ARCH, "a");
        assert_eq!(purl.to_string(), "pkg:alpine/p@v?arch=a");
    }

    #[test]
    fn plus_is_never_encoded_in_path_segments() {
        let purl = PackageUrl::new("alpine", "g++").with_version("1.0+git20230101");
        assert_eq!(purl.to_string(), "pkg:alpine/g++@1.0+git20230101");
    }

    #[test]
    fn space_is_percent_encoded_in_name() {
        let purl = PackageUrl::new("alpine", "g plus plus").with_version("v84");
        assert_eq!(purl.to_string(), "pkg:alpine/g%20plus%20plus@v84");
    }

    #[test]
    fn separators_are_encoded_in_name_and_version() {
        let purl = PackageUrl::new("generic", "a/b?c#d@e%f").with_version("1@2");
        assert_eq!(
            purl.to_string(),
            "pkg:generic/a%2Fb%3Fc%23d%40e%25f@1%402"
        );
    }

    #[test]
    fn non_ascii_is_encoded_as_utf8_bytes() {
        let purl = PackageUrl::new("generic", "caf\u{e9}");
        assert_eq!(purl.to_string(), "pkg:generic/caf%C3%A9");
    }

    #[test]
    fn qualifier_value_uses_query_encoding() {
        let purl =
            PackageUrl::new("alpine", "musl").with_qualifier(QualifierKey::ARCH, "x86 64+&=");
        assert_eq!(purl.to_string(), "pkg:alpine/musl?arch=x86%2064%2B%26%3D");
    }

    #[test]
    fn qualifiers_are_emitted_in_sorted_key_order() {
        let purl = PackageUrl::new("maven", "batik-anim")
            .with_namespace("org.apache.xmlgraphics")
            .with_version("1.9.1")
            .with_qualifier(key("repository_url"), "repo.spring.io")
            .with_qualifier(key("classifier"), "sources")
            .with_qualifier(QualifierKey::ARCH, "noarch");
        assert_eq!(
            purl.to_string(),
            "pkg:maven/org.apache.xmlgraphics/batik-anim@1.9.1\
             ?arch=noarch&classifier=sources&repository_url=repo.spring.io"
        );
    }

    #[test]
    fn empty_qualifier_value_removes_key() {
        let purl = PackageUrl::new("alpine", "musl")
            .with_qualifier(QualifierKey::ARCH, "x86_64")
            .with_qualifier(QualifierKey::ARCH, "");
        assert!(purl.qualifiers().is_empty());
        assert_eq!(purl.to_string(), "pkg:alpine/musl");
    }

    #[test]
    fn empty_version_is_omitted() {
        let purl = PackageUrl::new("alpine", "musl").with_version("");
        assert_eq!(purl.version(), None);
        assert_eq!(purl.to_string(), "pkg:alpine/musl");
    }

    #[test]
    fn namespace_segments_are_encoded_individually() {
        let purl = PackageUrl::new("npm", "animation")
            .with_namespace("@angular")
            .with_version("12.3.1");
        assert_eq!(purl.to_string(), "pkg:npm/%40angular/animation@12.3.1");
    }

    #[test]
    fn subpath_drops_dot_segments() {
        let purl = PackageUrl::new("golang", "googleapis")
            .with_namespace("google.golang.org/genproto")
            .with_subpath("/./googleapis/../api/annotations/");
        assert_eq!(
            purl.to_string(),
            "pkg:golang/google.golang.org/genproto/googleapis#googleapis/api/annotations"
        );
    }

    #[test]
    fn type_is_lowercased() {
        let purl = PackageUrl::new("Alpine", "musl");
        assert_eq!(purl.ty(), "alpine");
    }

    #[test]
    fn parse_full_purl() {
        let purl: PackageUrl =
            "pkg:maven/org.apache.xmlgraphics/batik-anim@1.9.1?classifier=sources&packaging=jar#src/main"
                .parse()
                .unwrap();
        assert_eq!(purl.ty(), "maven");
        assert_eq!(purl.namespace(), Some("org.apache.xmlgraphics"));
        assert_eq!(purl.name(), "batik-anim");
        assert_eq!(purl.version(), Some("1.9.1"));
        assert_eq!(purl.qualifier("classifier"), Some("sources"));
        assert_eq!(purl.qualifier("packaging"), Some("jar"));
        assert_eq!(purl.subpath(), Some("src/main"));
    }

    #[test]
    fn parse_decodes_components() {
        let purl: PackageUrl = "pkg:alpine/g%20plus%20plus@v84?arch=am86".parse().unwrap();
        assert_eq!(purl.name(), "g plus plus");
        assert_eq!(purl.version(), Some("v84"));
        assert_eq!(purl.qualifier("arch"), Some("am86"));
    }

    #[test]
    fn parse_keeps_literal_plus() {
        let purl: PackageUrl = "pkg:alpine/g++@v84?arch=am86".parse().unwrap();
        assert_eq!(purl.name(), "g++");
    }

    #[test]
    fn parse_uses_rightmost_at_for_version() {
        let purl: PackageUrl = "pkg:npm/%40angular/core@1.0.0".parse().unwrap();
        assert_eq!(purl.namespace(), Some("@angular"));
        assert_eq!(purl.name(), "core");
        assert_eq!(purl.version(), Some("1.0.0"));
    }

    #[test]
    fn parse_normalizes_scheme_type_and_keys() {
        let purl: PackageUrl = "PKG:Alpine/musl?ARCH=x86_64&empty=".parse().unwrap();
        assert_eq!(purl.ty(), "alpine");
        assert_eq!(purl.qualifier("arch"), Some("x86_64"));
        assert_eq!(purl.qualifiers().len(), 1);
    }

    #[test]
    fn parse_tolerates_slashes_after_scheme() {
        let purl: PackageUrl = "pkg://alpine/musl/".parse().unwrap();
        assert_eq!(purl.ty(), "alpine");
        assert_eq!(purl.name(), "musl");
        assert_eq!(purl.namespace(), None);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "alpine/musl".parse::<PackageUrl>(),
            Err(PurlError::MissingScheme)
        );
        assert_eq!(
            "http:alpine/musl".parse::<PackageUrl>(),
            Err(PurlError::MissingScheme)
        );
        assert_eq!("pkg:".parse::<PackageUrl>(), Err(PurlError::MissingType));
        assert_eq!(
            "pkg:alpine".parse::<PackageUrl>(),
            Err(PurlError::MissingName)
        );
        assert_eq!(
            "pkg:alpine/@1.0".parse::<PackageUrl>(),
            Err(PurlError::MissingName)
        );
        assert_eq!(
            "pkg:9lives/x".parse::<PackageUrl>(),
            Err(PurlError::InvalidType("9lives".to_owned()))
        );
        assert_eq!(
            "pkg:alpine/x?a%20b=c".parse::<PackageUrl>(),
            Err(PurlError::InvalidQualifierKey("a%20b".to_owned()))
        );
        assert_eq!(
            "pkg:alpine/%FF".parse::<PackageUrl>(),
            Err(PurlError::InvalidPercentEncoding("%FF".to_owned()))
        );
    }

    #[test]
    fn qualifier_key_validation() {
        assert_eq!(QualifierKey::new("Arch").unwrap(), QualifierKey::ARCH);
        assert!(QualifierKey::new("repository_url").is_ok());
        assert!(QualifierKey::new("").is_err());
        assert!(QualifierKey::new("1st").is_err());
        assert!(QualifierKey::new("a=b").is_err());
    }

    #[test]
    fn display_then_parse_is_identity() {
        let original = PackageUrl::new("alpine", "name with spaces/and slash")
            .with_namespace("a b/c")
            .with_version("1.0 rc@1")
            .with_qualifier(QualifierKey::ARCH, "x86_64 & more")
            .with_qualifier(key("distro"), "alpine-3.18")
            .with_subpath("docs/read me");
        let parsed: PackageUrl = original.to_string().parse().unwrap();
        assert_eq!(parsed, original);
    }
}
