use serde::Serialize;

/// `sci:*` collection fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScientificFields {
    #[serde(rename = "sci:citation", skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(rename = "sci:doi", skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
}

impl ScientificFields {
    pub fn new(citation: &str, doi: &str) -> Self {
        Self {
            citation: Some(citation.to_string()),
            doi: Some(doi.to_string()),
        }
    }

    /// `https://doi.org/<doi>`, the target of a `cite-as` link.
    pub fn doi_url(&self) -> Option<String> {
        self.doi.as_ref().map(|doi| format!("https://doi.org/{doi}"))
    }
}
