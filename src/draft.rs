use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    api::{self, ApiClient, TranslationCache},
    auth::SessionStore,
    lookup::PersonLookup,
    models::{
        ApplicationSubmission, AvailabilityPeriod, Competence, CompetenceProfile, Language, Person,
    },
    selection::SelectionSet,
    ClientError, ClientResult,
};

/// Language applied when none has been chosen yet.
pub const DEFAULT_LANGUAGE: &str = "english";

/// Proof that a fetch was issued for a given person under a given epoch.
///
/// Every person change bumps the epoch, so a response that comes back after
/// the person changed again carries a stale ticket and is discarded instead
/// of overwriting newer data (last request wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonTicket {
    person_id: i32,
    epoch: u64,
}

impl PersonTicket {
    pub fn person_id(&self) -> i32 {
        self.person_id
    }
}

/// Same scheme for language-keyed translation fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTicket {
    language: String,
    epoch: u64,
}

impl LanguageTicket {
    pub fn language(&self) -> &str {
        &self.language
    }
}

/// The assembly state of a job application: candidate lists fetched from
/// the backend, the two selection sets the applicant toggles over them, and
/// the epoch counters that keep interleaved fetch completions consistent.
///
/// This type is pure state and never touches the network. The async
/// sequencing lives in [`ApplicationFlow`].
#[derive(Debug, Default)]
pub struct ApplicationDraft {
    person_id: Option<i32>,
    person_epoch: u64,
    language: Option<String>,
    language_epoch: u64,

    competences: Vec<Competence>,
    languages: Vec<Language>,
    translations: Arc<HashMap<i32, String>>,
    profiles: Vec<CompetenceProfile>,
    availability: Vec<AvailabilityPeriod>,

    selected_profiles: SelectionSet,
    selected_availability: SelectionSet,
}

impl ApplicationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn person_id(&self) -> Option<i32> {
        self.person_id
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn competences(&self) -> &[Competence] {
        &self.competences
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn profiles(&self) -> &[CompetenceProfile] {
        &self.profiles
    }

    pub fn availability(&self) -> &[AvailabilityPeriod] {
        &self.availability
    }

    /// Display string for a competence in the selected language.
    pub fn competence_name(&self, competence_id: i32) -> Option<&str> {
        self.translations.get(&competence_id).map(String::as_str)
    }

    /// Record a person change. Returns a ticket when the change requires
    /// refetching that person's candidate lists: empty to value, or value to
    /// a different value. Setting the same person again is a no-op; clearing
    /// the person suppresses fetching but still invalidates anything in
    /// flight.
    pub fn set_person(&mut self, person_id: Option<i32>) -> Option<PersonTicket> {
        if person_id == self.person_id {
            return None;
        }

        self.person_id = person_id;
        self.person_epoch += 1;

        person_id.map(|person_id| PersonTicket {
            person_id,
            epoch: self.person_epoch,
        })
    }

    /// Ticket for the person currently shown, used to refetch lists after a
    /// creation without changing person.
    pub fn current_person_ticket(&self) -> Option<PersonTicket> {
        self.person_id.map(|person_id| PersonTicket {
            person_id,
            epoch: self.person_epoch,
        })
    }

    /// Record a language change; same no-op/ticket rules as `set_person`.
    pub fn set_language(&mut self, language: &str) -> Option<LanguageTicket> {
        if self.language.as_deref() == Some(language) {
            return None;
        }

        self.language = Some(language.to_string());
        self.language_epoch += 1;

        Some(LanguageTicket {
            language: language.to_string(),
            epoch: self.language_epoch,
        })
    }

    pub fn apply_competences(&mut self, competences: Vec<Competence>) {
        self.competences = competences;
    }

    pub fn apply_languages(&mut self, languages: Vec<Language>) {
        self.languages = languages;
    }

    /// Replace the competence-profile list in full, dropping selections
    /// whose backing record is gone. A stale ticket leaves everything
    /// untouched and returns `false`.
    pub fn apply_profiles(
        &mut self,
        ticket: &PersonTicket,
        profiles: Vec<CompetenceProfile>,
    ) -> bool {
        if ticket.epoch != self.person_epoch {
            tracing::debug!(
                person_id = ticket.person_id,
                "Ignoring superseded competence profile response"
            );
            return false;
        }

        self.profiles = profiles;
        let known: Vec<i32> = self
            .profiles
            .iter()
            .map(|profile| profile.competence_profile_id)
            .collect();
        self.selected_profiles.retain(|id| known.contains(&id));
        true
    }

    /// Replace the availability list in full; same ticket rules as
    /// `apply_profiles`.
    pub fn apply_availability(
        &mut self,
        ticket: &PersonTicket,
        availability: Vec<AvailabilityPeriod>,
    ) -> bool {
        if ticket.epoch != self.person_epoch {
            tracing::debug!(
                person_id = ticket.person_id,
                "Ignoring superseded availability response"
            );
            return false;
        }

        self.availability = availability;
        let known: Vec<i32> = self
            .availability
            .iter()
            .map(|period| period.availability_id)
            .collect();
        self.selected_availability.retain(|id| known.contains(&id));
        true
    }

    pub fn apply_translations(
        &mut self,
        ticket: &LanguageTicket,
        translations: Arc<HashMap<i32, String>>,
    ) -> bool {
        if ticket.epoch != self.language_epoch {
            tracing::debug!(
                language = %ticket.language,
                "Ignoring superseded translation response"
            );
            return false;
        }

        self.translations = translations;
        true
    }

    /// Flip selection of a competence profile. The id must name a profile
    /// in the live candidate list; anything else is an error and leaves the
    /// selection untouched. Returns whether the id is selected afterwards.
    pub fn toggle_profile(&mut self, competence_profile_id: i32) -> ClientResult<bool> {
        let known = self
            .profiles
            .iter()
            .any(|profile| profile.competence_profile_id == competence_profile_id);
        if !known {
            return Err(ClientError::NotFound(format!(
                "Competence profile {competence_profile_id} is not in the fetched list"
            )));
        }

        Ok(self.selected_profiles.toggle(competence_profile_id))
    }

    /// Flip selection of an availability period; same rules as
    /// `toggle_profile`.
    pub fn toggle_availability(&mut self, availability_id: i32) -> ClientResult<bool> {
        let known = self
            .availability
            .iter()
            .any(|period| period.availability_id == availability_id);
        if !known {
            return Err(ClientError::NotFound(format!(
                "Availability period {availability_id} is not in the fetched list"
            )));
        }

        Ok(self.selected_availability.toggle(availability_id))
    }

    pub fn is_profile_selected(&self, competence_profile_id: i32) -> bool {
        self.selected_profiles.contains(competence_profile_id)
    }

    pub fn is_availability_selected(&self, availability_id: i32) -> bool {
        self.selected_availability.contains(availability_id)
    }

    pub fn selected_profile_ids(&self) -> &[i32] {
        self.selected_profiles.ids()
    }

    pub fn selected_availability_ids(&self) -> &[i32] {
        self.selected_availability.ids()
    }

    /// Assemble the submission payload. Requires a person id and at least
    /// one selected profile and one selected period, not merely non-empty
    /// candidate lists.
    pub fn submission(&self) -> ClientResult<ApplicationSubmission> {
        let person_id = self.person_id.ok_or_else(|| {
            ClientError::Validation("Set a person before submitting an application".to_string())
        })?;

        if self.selected_profiles.is_empty() {
            return Err(ClientError::Validation(
                "Select at least one competence profile".to_string(),
            ));
        }
        if self.selected_availability.is_empty() {
            return Err(ClientError::Validation(
                "Select at least one availability period".to_string(),
            ));
        }

        Ok(ApplicationSubmission {
            person_id,
            availability_ids: self.selected_availability.ids().to_vec(),
            competence_profile_ids: self.selected_profiles.ids().to_vec(),
        })
    }
}

/// Sequences the asynchronous work around an [`ApplicationDraft`]: the
/// mount-time reference fetches, the person- and language-keyed refetches,
/// creations with their follow-up refetch, and the final submission. Every
/// authenticated step runs the session guard first and aborts on expiry.
pub struct ApplicationFlow {
    client: ApiClient,
    store: Arc<SessionStore>,
    translations: TranslationCache,
    draft: ApplicationDraft,
}

impl ApplicationFlow {
    pub fn new(client: ApiClient, store: Arc<SessionStore>) -> Self {
        Self {
            client,
            store,
            translations: TranslationCache::new(),
            draft: ApplicationDraft::new(),
        }
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    /// Initial load: competences and languages are fetched unconditionally
    /// and concurrently, the default language is applied, and the person id
    /// restored from session storage (if any) triggers the person-keyed
    /// fetches.
    pub async fn mount(&mut self) -> ClientResult<()> {
        let session = self.store.ensure_active()?;

        let (competences, languages) = tokio::join!(
            api::translation::get_standard_competences(&self.client, &session),
            api::translation::get_languages(&self.client),
        );

        let mut first_error = None;
        match competences {
            Ok(list) => self.draft.apply_competences(list),
            Err(e) => first_error = Some(e),
        }
        match languages {
            Ok(list) => self.draft.apply_languages(list),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }

        self.change_language(DEFAULT_LANGUAGE).await?;
        self.change_person(self.store.person_id()).await
    }

    /// Classify a free-text search term, resolve it to a person and make
    /// that person current (storing the id and refetching their lists).
    pub async fn resolve_person(&mut self, term: &str) -> ClientResult<Person> {
        let session = self.store.ensure_active()?;

        let lookup = PersonLookup::classify(term);
        let person = api::person::find_person(&self.client, &session, &lookup).await?;

        self.store.set_person_id(Some(person.id));
        self.change_person(Some(person.id)).await?;
        Ok(person)
    }

    /// React to a person change: no-op when unchanged, suppressed when
    /// empty, otherwise both person-keyed lists are refetched concurrently
    /// and applied independently: one failing fetch leaves the other's
    /// result in place and the failed list at its previous value.
    pub async fn change_person(&mut self, person_id: Option<i32>) -> ClientResult<()> {
        let Some(ticket) = self.draft.set_person(person_id) else {
            return Ok(());
        };
        let session = self.store.ensure_active()?;

        let (profiles, availability) = tokio::join!(
            api::application::get_all_competence_profiles(
                &self.client,
                &session,
                ticket.person_id()
            ),
            api::application::get_all_availability(&self.client, &session, ticket.person_id()),
        );

        let mut first_error = None;
        match profiles {
            Ok(list) => {
                self.draft.apply_profiles(&ticket, list);
            }
            Err(e) => first_error = Some(e),
        }
        match availability {
            Ok(list) => {
                self.draft.apply_availability(&ticket, list);
            }
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// React to a language change; the previous translation map stays in
    /// place when the fetch fails.
    pub async fn change_language(&mut self, language: &str) -> ClientResult<()> {
        let Some(ticket) = self.draft.set_language(language) else {
            return Ok(());
        };

        let translations = self.translations.get(&self.client, language).await?;
        self.draft.apply_translations(&ticket, translations);
        Ok(())
    }

    /// Create a competence profile for the current person, then refetch the
    /// profile list so the local cache reflects the backend.
    pub async fn create_profile(
        &mut self,
        competence_id: i32,
        years_of_experience: f64,
    ) -> ClientResult<CompetenceProfile> {
        let session = self.store.ensure_active()?;
        let ticket = self.draft.current_person_ticket().ok_or_else(|| {
            ClientError::Validation(
                "Set a person before creating a competence profile".to_string(),
            )
        })?;

        let profile = api::application::create_competence_profile(
            &self.client,
            &session,
            ticket.person_id(),
            competence_id,
            years_of_experience,
        )
        .await?;

        match api::application::get_all_competence_profiles(
            &self.client,
            &session,
            ticket.person_id(),
        )
        .await
        {
            Ok(list) => {
                self.draft.apply_profiles(&ticket, list);
            }
            // The creation stands; the cached list stays at its previous
            // value until the next successful refetch.
            Err(e) => tracing::error!(error = %e, "Refetch after profile creation failed"),
        }

        Ok(profile)
    }

    /// Create an availability period for the current person, then refetch
    /// the availability list.
    pub async fn create_availability(
        &mut self,
        from_date: chrono::NaiveDate,
        to_date: chrono::NaiveDate,
    ) -> ClientResult<AvailabilityPeriod> {
        let session = self.store.ensure_active()?;
        let ticket = self.draft.current_person_ticket().ok_or_else(|| {
            ClientError::Validation(
                "Set a person before creating an availability period".to_string(),
            )
        })?;

        let period = api::application::create_availability(
            &self.client,
            &session,
            ticket.person_id(),
            from_date,
            to_date,
        )
        .await?;

        match api::application::get_all_availability(&self.client, &session, ticket.person_id())
            .await
        {
            Ok(list) => {
                self.draft.apply_availability(&ticket, list);
            }
            Err(e) => tracing::error!(error = %e, "Refetch after availability creation failed"),
        }

        Ok(period)
    }

    pub fn toggle_profile(&mut self, competence_profile_id: i32) -> ClientResult<bool> {
        self.draft.toggle_profile(competence_profile_id)
    }

    pub fn toggle_availability(&mut self, availability_id: i32) -> ClientResult<bool> {
        self.draft.toggle_availability(availability_id)
    }

    /// Validate and submit the assembled application. Local state is left
    /// unchanged on both outcomes; the backend is the sole authority on
    /// whether a submission exists.
    pub async fn submit(&mut self) -> ClientResult<crate::models::Application> {
        let session = self.store.ensure_active()?;
        let submission = self.draft.submission()?;

        api::application::submit_application(&self.client, &session, &submission).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn profile(id: i32) -> CompetenceProfile {
        CompetenceProfile {
            competence_profile_id: id,
            competence: Competence {
                competence_id: 1,
                name: "ticket sales".to_string(),
            },
            years_of_experience: 2.0,
        }
    }

    fn period(id: i32) -> AvailabilityPeriod {
        AvailabilityPeriod {
            availability_id: id,
            from_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
        }
    }

    #[test]
    fn person_transitions_issue_tickets_only_when_needed() {
        let mut draft = ApplicationDraft::new();

        // empty -> value
        let ticket = draft.set_person(Some(4)).unwrap();
        assert_eq!(ticket.person_id(), 4);

        // same value: no refetch
        assert!(draft.set_person(Some(4)).is_none());

        // value -> different value
        assert!(draft.set_person(Some(5)).is_some());

        // value -> empty: suppressed
        assert!(draft.set_person(None).is_none());
        assert_eq!(draft.person_id(), None);
    }

    #[test]
    fn stale_person_responses_are_ignored() {
        let mut draft = ApplicationDraft::new();

        let first = draft.set_person(Some(4)).unwrap();
        let second = draft.set_person(Some(5)).unwrap();

        // The response for person 4 lands after the switch to person 5
        assert!(!draft.apply_profiles(&first, vec![profile(1)]));
        assert!(draft.profiles().is_empty());

        assert!(draft.apply_profiles(&second, vec![profile(2)]));
        assert_eq!(draft.profiles().len(), 1);
        assert_eq!(draft.profiles()[0].competence_profile_id, 2);
    }

    #[test]
    fn clearing_the_person_invalidates_in_flight_fetches() {
        let mut draft = ApplicationDraft::new();

        let ticket = draft.set_person(Some(4)).unwrap();
        draft.set_person(None);

        assert!(!draft.apply_availability(&ticket, vec![period(1)]));
        assert!(draft.availability().is_empty());
    }

    #[test]
    fn toggling_an_unknown_id_fails_and_leaves_the_selection_alone() {
        let mut draft = ApplicationDraft::new();
        let ticket = draft.set_person(Some(4)).unwrap();
        draft.apply_profiles(&ticket, vec![profile(1)]);

        assert!(matches!(
            draft.toggle_profile(99),
            Err(ClientError::NotFound(_))
        ));
        assert!(draft.selected_profile_ids().is_empty());
    }

    #[test]
    fn toggling_twice_round_trips_membership() {
        let mut draft = ApplicationDraft::new();
        let ticket = draft.set_person(Some(4)).unwrap();
        draft.apply_profiles(&ticket, vec![profile(1)]);

        assert!(draft.toggle_profile(1).unwrap());
        assert!(draft.is_profile_selected(1));
        assert!(!draft.toggle_profile(1).unwrap());
        assert!(!draft.is_profile_selected(1));
    }

    #[test]
    fn refreshed_lists_drop_vanished_selections() {
        let mut draft = ApplicationDraft::new();
        let ticket = draft.set_person(Some(4)).unwrap();
        draft.apply_profiles(&ticket, vec![profile(1), profile(2)]);

        draft.toggle_profile(1).unwrap();
        draft.toggle_profile(2).unwrap();

        // Profile 1 disappeared server-side
        draft.apply_profiles(&ticket, vec![profile(2)]);
        assert_eq!(draft.selected_profile_ids(), &[2]);
    }

    #[test]
    fn submission_requires_a_person() {
        let draft = ApplicationDraft::new();
        assert!(matches!(
            draft.submission(),
            Err(ClientError::Validation(_))
        ));

        // Even with selections still recorded, clearing the person fails
        // the precondition
        let mut draft = ApplicationDraft::new();
        let ticket = draft.set_person(Some(4)).unwrap();
        draft.apply_profiles(&ticket, vec![profile(1)]);
        draft.apply_availability(&ticket, vec![period(1)]);
        draft.toggle_profile(1).unwrap();
        draft.toggle_availability(1).unwrap();
        draft.set_person(None);
        assert!(matches!(
            draft.submission(),
            Err(ClientError::Validation(_))
        ));
    }

    #[test]
    fn submission_requires_non_empty_selections_not_just_lists() {
        let mut draft = ApplicationDraft::new();
        let ticket = draft.set_person(Some(4)).unwrap();
        draft.apply_profiles(&ticket, vec![profile(1)]);
        draft.apply_availability(&ticket, vec![period(1)]);

        // Candidate lists are non-empty but nothing is selected
        assert!(matches!(
            draft.submission(),
            Err(ClientError::Validation(_))
        ));
    }

    #[test]
    fn submission_carries_the_selections_in_insertion_order() {
        let mut draft = ApplicationDraft::new();
        let ticket = draft.set_person(Some(4)).unwrap();
        draft.apply_profiles(&ticket, vec![profile(1)]);
        draft.apply_availability(&ticket, vec![period(1)]);

        draft.toggle_profile(1).unwrap();
        draft.toggle_availability(1).unwrap();

        let submission = draft.submission().unwrap();
        assert_eq!(submission.person_id, 4);
        assert_eq!(submission.competence_profile_ids, vec![1]);
        assert_eq!(submission.availability_ids, vec![1]);
    }

    #[test]
    fn language_changes_follow_the_same_ticket_rules() {
        let mut draft = ApplicationDraft::new();

        let first = draft.set_language("english").unwrap();
        assert!(draft.set_language("english").is_none());
        let second = draft.set_language("swedish").unwrap();

        let english: Arc<HashMap<i32, String>> =
            Arc::new([(1, "ticket sales".to_string())].into_iter().collect());
        let swedish: Arc<HashMap<i32, String>> =
            Arc::new([(1, "biljettförsäljning".to_string())].into_iter().collect());

        assert!(!draft.apply_translations(&first, english));
        assert!(draft.apply_translations(&second, swedish));
        assert_eq!(draft.competence_name(1), Some("biljettförsäljning"));
        assert_eq!(draft.competence_name(2), None);
    }

    // Requires a running backend with a signed-in applicant; drives the
    // whole assembly flow end to end.
    #[tokio::test]
    #[ignore]
    async fn full_assembly_round_trip_against_live_backend() {
        let config = crate::ClientConfig::from_env().unwrap();
        let client = ApiClient::new(&config);
        let store = Arc::new(SessionStore::new());
        store.sign_in(std::env::var("TEST_TOKEN").unwrap(), None);

        let mut flow = ApplicationFlow::new(client, store);
        flow.mount().await.unwrap();
        assert!(!flow.draft().competences().is_empty());
        assert!(!flow.draft().languages().is_empty());
    }
}
