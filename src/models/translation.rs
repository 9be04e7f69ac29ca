use serde::{Deserialize, Serialize};

use super::competence::Competence;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub language_id: i32,
    pub language_name: String,
}

/// A display string for one competence in one language. Consumers index
/// these by `competence.competence_id`; positions in the fetched list carry
/// no meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetenceTranslation {
    pub translation: String,
    pub competence: Competence,
}
