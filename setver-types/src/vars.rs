use serde::Deserialize;

/// The configuration record parsed from `variables.toml`.
///
/// All fields are required strings; a missing section or field is a parse
/// error, not a default.
#[derive(Debug, Clone, Deserialize)]
pub struct Variables {
    pub version: VersionSection,
    pub openapi: OpenapiSection,
}

/// `[version]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionSection {
    /// Project version, conventionally dotted-numeric (`"2.3.1"`).
    pub version: String,
}

/// `[openapi]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenapiSection {
    /// Version of the OpenAPI generator tool pinned in the generator scripts.
    #[serde(rename = "oapigen-version")]
    pub oapigen_version: String,

    /// Location of the OpenAPI specification the generator scripts consume.
    #[serde(rename = "oapi-spec")]
    pub oapi_spec: String,
}
