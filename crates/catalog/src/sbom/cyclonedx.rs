//! CycloneDX 1.5 JSON SBOM 생성
//!
//! [CycloneDX](https://cyclonedx.org/) 1.5 사양에 따른 JSON SBOM 문서를 생성합니다.
//! 컴포넌트의 `bom-ref`는 purl이며, 에코시스템과 소유 파일은 `cairn:` 접두어
//! property로 기록합니다.

use serde::Serialize;

use super::TOOL_NAME;
use crate::error::CatalogerError;
use crate::types::{CatalogEntry, SbomDocument, SbomFormat};

const PROPERTY_ECOSYSTEM: &str = "cairn:ecosystem";
const PROPERTY_FILE: &str = "cairn:file";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CycloneDxBom<'a> {
    bom_format: &'static str,
    spec_version: &'static str,
    version: u32,
    metadata: CycloneDxMetadata<'a>,
    components: Vec<CycloneDxComponent<'a>>,
}

#[derive(Serialize)]
struct CycloneDxMetadata<'a> {
    timestamp: &'a str,
    tools: Vec<CycloneDxTool>,
}

#[derive(Serialize)]
struct CycloneDxTool {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct CycloneDxComponent<'a> {
    #[serde(rename = "bom-ref")]
    bom_ref: &'a str,
    #[serde(rename = "type")]
    component_type: &'static str,
    name: &'a str,
    version: &'a str,
    purl: &'a str,
    properties: Vec<CycloneDxProperty<'a>>,
}

#[derive(Serialize)]
struct CycloneDxProperty<'a> {
    name: &'static str,
    value: &'a str,
}

/// 정렬된 카탈로그 항목에서 CycloneDX 1.5 JSON SBOM을 생성합니다.
pub(super) fn generate(
    entries: &[&CatalogEntry],
    timestamp: &str,
    include_files: bool,
) -> Result<SbomDocument, CatalogerError> {
    let components: Vec<CycloneDxComponent<'_>> = entries
        .iter()
        .map(|entry| {
            let mut properties = vec![CycloneDxProperty {
                name: PROPERTY_ECOSYSTEM,
                value: entry.ecosystem.purl_type(),
            }];
            if include_files {
                properties.extend(entry.owned_files.iter().map(|path| CycloneDxProperty {
                    name: PROPERTY_FILE,
                    value: path,
                }));
            }

            CycloneDxComponent {
                bom_ref: &entry.purl,
                component_type: "library",
                name: &entry.name,
                version: &entry.version,
                purl: &entry.purl,
                properties,
            }
        })
        .collect();

    let component_count = components.len();

    let bom = CycloneDxBom {
        bom_format: "CycloneDX",
        spec_version: "1.5",
        version: 1,
        metadata: CycloneDxMetadata {
            timestamp,
            tools: vec![CycloneDxTool {
                name: TOOL_NAME,
                version: env!("CARGO_PKG_VERSION"),
            }],
        },
        components,
    };

    let content = serde_json::to_string_pretty(&bom).map_err(|e| {
        CatalogerError::SbomGeneration(format!("CycloneDX serialization failed: {e}"))
    })?;

    Ok(SbomDocument {
        format: SbomFormat::CycloneDx,
        content,
        component_count,
    })
}
