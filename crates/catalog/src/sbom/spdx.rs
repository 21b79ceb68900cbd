//! SPDX 2.3 JSON SBOM 생성
//!
//! [SPDX](https://spdx.dev/) 2.3 사양에 따른 JSON SBOM 문서를 생성합니다.
//!
//! 모든 식별자는 입력에서 결정론적으로 만들어집니다.
//! - 패키지 ID: purl을 SPDX ID 문자 집합으로 치환 (`SPDXRef-Package-...`)
//! - 파일 ID: 패키지 순번과 파일 순번 (`SPDXRef-File-<pkg>-<file>`)
//! - 문서 namespace: 전체 purl 목록으로 만든 UUID v5

use std::collections::HashMap;

use serde::Serialize;

use super::TOOL_NAME;
use crate::error::CatalogerError;
use crate::types::{CatalogEntry, SbomDocument, SbomFormat};

const NOASSERTION: &str = "NOASSERTION";
const DOCUMENT_ID: &str = "SPDXRef-DOCUMENT";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpdxDocument<'a> {
    spdx_version: &'static str,
    #[serde(rename = "SPDXID")]
    spdx_id: &'static str,
    name: String,
    data_license: &'static str,
    document_namespace: String,
    creation_info: SpdxCreationInfo<'a>,
    packages: Vec<SpdxPackage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    files: Vec<SpdxFile<'a>>,
    relationships: Vec<SpdxRelationship>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpdxCreationInfo<'a> {
    created: &'a str,
    creators: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpdxPackage<'a> {
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    name: &'a str,
    version_info: &'a str,
    download_location: &'static str,
    files_analyzed: bool,
    external_refs: Vec<SpdxExternalRef<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    has_files: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpdxExternalRef<'a> {
    reference_category: &'static str,
    reference_type: &'static str,
    reference_locator: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpdxFile<'a> {
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    file_name: &'a str,
    license_concluded: &'static str,
    copyright_text: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpdxRelationship {
    spdx_element_id: String,
    relationship_type: &'static str,
    related_spdx_element: String,
}

/// 정렬된 카탈로그 항목에서 SPDX 2.3 JSON SBOM을 생성합니다.
pub(super) fn generate(
    entries: &[&CatalogEntry],
    timestamp: &str,
    include_files: bool,
) -> Result<SbomDocument, CatalogerError> {
    let mut seen_ids: HashMap<String, usize> = HashMap::new();
    let mut packages = Vec::with_capacity(entries.len());
    let mut files = Vec::new();
    let mut relationships = Vec::with_capacity(entries.len());

    for (pkg_index, entry) in entries.iter().enumerate() {
        let spdx_id = unique_id(package_id(&entry.purl), &mut seen_ids);

        let mut has_files = Vec::new();
        if include_files {
            for (file_index, path) in entry.owned_files.iter().enumerate() {
                let file_id = format!("SPDXRef-File-{pkg_index}-{file_index}");
                has_files.push(file_id.clone());
                files.push(SpdxFile {
                    spdx_id: file_id,
                    file_name: path,
                    license_concluded: NOASSERTION,
                    copyright_text: NOASSERTION,
                });
            }
        }

        relationships.push(SpdxRelationship {
            spdx_element_id: DOCUMENT_ID.to_owned(),
            relationship_type: "DESCRIBES",
            related_spdx_element: spdx_id.clone(),
        });

        packages.push(SpdxPackage {
            spdx_id,
            name: &entry.name,
            version_info: &entry.version,
            download_location: NOASSERTION,
            files_analyzed: include_files,
            external_refs: vec![SpdxExternalRef {
                reference_category: "PACKAGE-MANAGER",
                reference_type: "purl",
                reference_locator: &entry.purl,
            }],
            has_files,
        });
    }

    let component_count = packages.len();

    let doc = SpdxDocument {
        spdx_version: "SPDX-2.3",
        spdx_id: DOCUMENT_ID,
        name: format!("{TOOL_NAME}-catalog"),
        data_license: "CC0-1.0",
        document_namespace: document_namespace(entries),
        creation_info: SpdxCreationInfo {
            created: timestamp,
            creators: vec![format!("Tool: {TOOL_NAME}-{}", env!("CARGO_PKG_VERSION"))],
        },
        packages,
        files,
        relationships,
    };

    let content = serde_json::to_string_pretty(&doc)
        .map_err(|e| CatalogerError::SbomGeneration(format!("SPDX serialization failed: {e}")))?;

    Ok(SbomDocument {
        format: SbomFormat::Spdx,
        content,
        component_count,
    })
}

/// purl에서 SPDX 패키지 ID를 만듭니다. 허용 문자는 `[A-Za-z0-9.-]`입니다.
fn package_id(purl: &str) -> String {
    let body = purl.strip_prefix("pkg:").unwrap_or(purl);
    let sanitized: String = body
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("SPDXRef-Package-{sanitized}")
}

/// 치환으로 충돌한 ID에 순번 접미어를 붙입니다.
fn unique_id(id: String, seen: &mut HashMap<String, usize>) -> String {
    let count = seen.entry(id.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        id
    } else {
        format!("{id}-{count}")
    }
}

fn document_namespace(entries: &[&CatalogEntry]) -> String {
    let joined = entries
        .iter()
        .map(|e| e.purl.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let id = uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_URL, joined.as_bytes());
    format!("https://spdx.org/spdxdocs/{TOOL_NAME}-{id}")
}
