use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::{
    api::{bearer, ApiClient},
    auth::Session,
    models::{Competence, CompetenceTranslation, Language},
    ClientResult,
};

/// GET /translation/getStandardCompetences
pub async fn get_standard_competences(
    client: &ApiClient,
    session: &Session,
) -> ClientResult<Vec<Competence>> {
    let request = bearer(client.get("/translation/getStandardCompetences"), session);
    let response = client.send("translation_competences", request).await?;

    let competences: Vec<Competence> = response.json().await?;
    tracing::debug!(count = competences.len(), "Fetched standard competences");
    Ok(competences)
}

/// GET /translation/getLanguages. No credential required.
pub async fn get_languages(client: &ApiClient) -> ClientResult<Vec<Language>> {
    let request = client.get("/translation/getLanguages");
    let response = client.send("translation_languages", request).await?;

    let languages: Vec<Language> = response.json().await?;
    tracing::debug!(count = languages.len(), "Fetched languages");
    Ok(languages)
}

/// GET /translation/getCompetenceTranslation?language=. No credential
/// required.
pub async fn get_competence_translation(
    client: &ApiClient,
    language: &str,
) -> ClientResult<Vec<CompetenceTranslation>> {
    let request = client
        .get("/translation/getCompetenceTranslation")
        .query(&[("language", language)]);
    let response = client.send("translation_competence", request).await?;

    let translations: Vec<CompetenceTranslation> = response.json().await?;
    tracing::debug!(
        language,
        count = translations.len(),
        "Fetched competence translations"
    );
    Ok(translations)
}

/// Per-language cache of competence display strings, keyed by competence id.
///
/// Owned by the flow that created it; a cache miss triggers one fetch and
/// the indexed result is shared via `Arc` until the TTL lapses.
pub struct TranslationCache {
    cache: Cache<String, Arc<HashMap<i32, String>>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(3600)) // 1 hour TTL
            .build();

        Self { cache }
    }

    /// Translations for `language`, indexed by competence id.
    pub async fn get(
        &self,
        client: &ApiClient,
        language: &str,
    ) -> ClientResult<Arc<HashMap<i32, String>>> {
        if let Some(translations) = self.cache.get(language).await {
            tracing::debug!(language, "Translations served from cache");
            return Ok(translations);
        }

        let fetched = get_competence_translation(client, language).await?;
        let indexed: HashMap<i32, String> = fetched
            .into_iter()
            .map(|entry| (entry.competence.competence_id, entry.translation))
            .collect();

        let indexed = Arc::new(indexed);
        self.cache
            .insert(language.to_string(), indexed.clone())
            .await;

        Ok(indexed)
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}
