//! Owned state of the therapist search: the committed filter criteria, the
//! visible result set, the request bookkeeping that gates the form, and the
//! local text of the two price inputs.
//!
//! Only one filter search is authoritative at a time. Every dispatch is
//! stamped with a generation; a response carrying any other generation is
//! discarded, so the last request wins regardless of arrival order.

use chrono::{DateTime, Utc};
use common::{
    filter_criteria::{FacetChange, FilterCriteria, FilterUpdate, PriceFacet, format_price_input, parse_price_input},
    therapist::{TherapistSearchResponse, TherapistSummary},
};
use dioxus::logger::tracing::{debug, info, warn};
use tokio_util::sync::CancellationToken;

/// One dispatched filter search.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    generation: u64,
    criteria: FilterCriteria,
    issued_at: DateTime<Utc>,
    cancel: CancellationToken,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Full normalized criteria to send to the backend.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Cancelled as soon as a newer result set supersedes this request.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// Results replaced the visible set.
    Applied,
    /// The search failed; the previous results stay visible.
    Failed,
    /// The request was superseded; nothing changed.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct RequestState {
    last_request_time: Option<DateTime<Utc>>,
    request_count: u64,
    in_flight: Option<RequestTicket>,
    chat_in_flight: bool,
}

impl RequestState {
    pub fn last_request_time(&self) -> Option<DateTime<Utc>> {
        self.last_request_time
    }

    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_chat_loading(&self) -> bool {
        self.chat_in_flight
    }

    pub fn is_form_disabled(&self) -> bool {
        self.is_loading() || self.chat_in_flight
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct PriceInputs {
    initial: String,
    subsequent: String,
}

impl PriceInputs {
    fn get(&self, facet: PriceFacet) -> &str {
        match facet {
            PriceFacet::Initial => &self.initial,
            PriceFacet::Subsequent => &self.subsequent,
        }
    }

    fn get_mut(&mut self, facet: PriceFacet) -> &mut String {
        match facet {
            PriceFacet::Initial => &mut self.initial,
            PriceFacet::Subsequent => &mut self.subsequent,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TherapistSearchState {
    criteria: FilterCriteria,
    therapists: Vec<TherapistSummary>,
    error: Option<String>,
    request: RequestState,
    price_inputs: PriceInputs,
}

impl TherapistSearchState {
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn therapists(&self) -> &[TherapistSummary] {
        &self.therapists
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    pub fn is_form_disabled(&self) -> bool {
        self.request.is_form_disabled()
    }

    /// Text currently shown in a price input, committed or not.
    pub fn price_input(&self, facet: PriceFacet) -> &str {
        self.price_inputs.get(facet)
    }

    /// Merge or replace into the criteria and dispatch a search for the
    /// result. Returns `None` without touching anything while the form is
    /// disabled.
    pub fn update_filters(&mut self, update: FilterUpdate, now: DateTime<Utc>) -> Option<RequestTicket> {
        if self.is_form_disabled() {
            debug!("filter update ignored while a request is outstanding: {:?}", update);
            return None;
        }
        let criteria = self.criteria.merged(update);
        self.set_criteria(criteria.clone());
        Some(self.dispatch(criteria, now))
    }

    fn dispatch(&mut self, criteria: FilterCriteria, now: DateTime<Utc>) -> RequestTicket {
        self.supersede_in_flight();
        self.request.request_count += 1;
        self.request.last_request_time = Some(now);
        let ticket = RequestTicket {
            generation: self.request.request_count,
            criteria,
            issued_at: now,
            cancel: CancellationToken::new(),
        };
        self.request.in_flight = Some(ticket.clone());
        info!("dispatching therapist search #{}", ticket.generation);
        ticket
    }

    fn supersede_in_flight(&mut self) {
        if let Some(previous) = self.request.in_flight.take() {
            debug!("therapist search #{} superseded", previous.generation);
            previous.cancel.cancel();
        }
    }

    fn set_criteria(&mut self, criteria: FilterCriteria) {
        for facet in PriceFacet::ALL {
            if self.criteria.max_price(facet) != criteria.max_price(facet) {
                *self.price_inputs.get_mut(facet) = format_price_input(criteria.max_price(facet));
            }
        }
        self.criteria = criteria;
    }

    /// Deliver the outcome of a dispatched search.
    pub fn complete<E: std::fmt::Display>(
        &mut self,
        ticket: &RequestTicket,
        result: Result<TherapistSearchResponse, E>,
    ) -> ResponseOutcome {
        let is_current = self
            .request
            .in_flight
            .as_ref()
            .is_some_and(|current| current.generation == ticket.generation);
        if !is_current {
            debug!(
                "discarding stale response for search #{} (current #{})",
                ticket.generation, self.request.request_count
            );
            return ResponseOutcome::Stale;
        }
        self.request.in_flight = None;

        match result {
            Ok(response) if response.success => {
                info!("search #{} returned {} therapists", ticket.generation, response.therapists.len());
                self.therapists = response.therapists;
                self.error = None;
                ResponseOutcome::Applied
            }
            Ok(response) => {
                let message = response.error.unwrap_or_else(|| "Search failed".to_string());
                warn!("search #{} failed: {}", ticket.generation, message);
                self.error = Some(message);
                ResponseOutcome::Failed
            }
            Err(e) => {
                warn!("search #{} failed: {}", ticket.generation, e);
                self.error = Some(e.to_string());
                ResponseOutcome::Failed
            }
        }
    }

    /// Keystroke-level edit of a price input. Never dispatches.
    pub fn edit_price(&mut self, facet: PriceFacet, text: impl Into<String>) {
        *self.price_inputs.get_mut(facet) = text.into();
    }

    /// Commit the local price text (on blur). Blank text commits as "no
    /// limit". A value equal to the committed one does not dispatch.
    pub fn commit_price(&mut self, facet: PriceFacet, now: DateTime<Utc>) -> Option<RequestTicket> {
        let value = parse_price_input(self.price_inputs.get(facet));
        if value == self.criteria.max_price(facet) {
            if !self.is_form_disabled() {
                *self.price_inputs.get_mut(facet) = format_price_input(value);
            }
            return None;
        }
        self.update_filters(FacetChange::MaxPrice(facet, value).into(), now)
    }

    /// Clear criteria and results. Rejected while the form is disabled.
    pub fn reset(&mut self) -> bool {
        if self.is_form_disabled() {
            debug!("reset ignored while a request is outstanding");
            return false;
        }
        self.criteria = FilterCriteria::default();
        self.price_inputs = PriceInputs::default();
        self.therapists.clear();
        self.error = None;
        true
    }

    /// Mark a chat request as outstanding. Only one chat request runs at a
    /// time.
    pub fn begin_chat(&mut self) -> bool {
        if self.request.chat_in_flight {
            return false;
        }
        self.request.chat_in_flight = true;
        true
    }

    /// A chat reply arrived (or failed). Therapists found by the assistant
    /// replace the visible set and supersede any filter search in flight.
    pub fn finish_chat(&mut self, results: Option<Vec<TherapistSummary>>) {
        self.request.chat_in_flight = false;
        let Some(results) = results else {
            return;
        };
        self.supersede_in_flight();
        self.request.request_count += 1;
        info!("chat reply supplied {} therapists", results.len());
        self.therapists = results;
        self.error = None;
    }
}


#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::TimeZone;
    use common::filter_criteria::{Availability, Gender, TagFacet};

    use super::*;

    fn at(second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, second).unwrap()
    }

    fn therapist(id: &str) -> TherapistSummary {
        TherapistSummary {
            id: id.to_string(),
            name: format!("Therapist {id}"),
            ..Default::default()
        }
    }

    fn ok(ids: &[&str]) -> Result<TherapistSearchResponse, String> {
        Ok(TherapistSearchResponse {
            success: true,
            therapists: ids.iter().map(|id| therapist(id)).collect(),
            ..Default::default()
        })
    }

    fn ids(state: &TherapistSearchState) -> Vec<String> {
        state.therapists().iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn dispatch_disables_form_until_response() {
        let mut state = TherapistSearchState::default();
        let ticket = state
            .update_filters(FacetChange::Gender(Some(Gender::Female)).into(), at(0))
            .unwrap();
        assert_eq!(ticket.generation(), 1);
        assert_eq!(ticket.criteria().gender, Some(Gender::Female));
        assert_eq!(state.request().last_request_time(), Some(at(0)));
        assert!(state.is_loading());
        assert!(state.is_form_disabled());

        assert_eq!(state.complete(&ticket, ok(&["a", "b"])), ResponseOutcome::Applied);
        assert!(!state.is_form_disabled());
        assert_eq!(ids(&state), vec!["a", "b"]);
    }

    #[test]
    fn updates_are_rejected_while_busy() {
        let mut state = TherapistSearchState::default();
        let ticket = state
            .update_filters(FacetChange::Availability(Some(Availability::Online)).into(), at(0))
            .unwrap();
        let before = state.criteria().clone();

        assert!(state.update_filters(FacetChange::Gender(Some(Gender::Male)).into(), at(1)).is_none());
        assert!(!state.reset());
        assert_eq!(state.criteria(), &before);
        assert_eq!(state.request().request_count(), 1);
        assert_eq!(state.request().last_request_time(), Some(at(0)));

        state.complete(&ticket, ok(&[]));
        assert!(state.update_filters(FacetChange::Gender(Some(Gender::Male)).into(), at(2)).is_some());
    }

    #[test]
    fn merge_keeps_other_facets_and_replace_does_not() {
        let mut state = TherapistSearchState::default();
        let t = state.update_filters(FacetChange::Gender(Some(Gender::NonBinary)).into(), at(0)).unwrap();
        state.complete(&t, ok(&[]));
        let change = state.criteria().toggle_tag(TagFacet::Faith, "Jewish");
        let t = state.update_filters(change.into(), at(1)).unwrap();
        assert_eq!(t.criteria().gender, Some(Gender::NonBinary));
        assert!(t.criteria().has_tag(TagFacet::Faith, "Jewish"));
        state.complete(&t, ok(&[]));

        let t = state
            .update_filters(FilterUpdate::Replace(FilterCriteria::default()), at(2))
            .unwrap();
        assert!(t.criteria().is_empty());
    }

    #[test]
    fn stale_response_never_touches_results() {
        let mut state = TherapistSearchState::default();
        let a = state
            .update_filters(FacetChange::Gender(Some(Gender::Female)).into(), at(0))
            .unwrap();
        assert!(state.begin_chat());

        // B: the assistant's results land while A is still outstanding
        state.finish_chat(Some(vec![therapist("from-chat")]));
        assert!(a.is_cancelled());
        assert!(!state.is_form_disabled());

        assert_eq!(state.complete(&a, ok(&["from-filter"])), ResponseOutcome::Stale);
        assert_eq!(ids(&state), vec!["from-chat"]);
    }

    #[test]
    fn duplicate_delivery_is_stale() {
        let mut state = TherapistSearchState::default();
        let a = state.update_filters(FacetChange::Gender(Some(Gender::Male)).into(), at(0)).unwrap();
        assert_eq!(state.complete(&a, ok(&["1"])), ResponseOutcome::Applied);
        let b = state.update_filters(FacetChange::Gender(None).into(), at(1)).unwrap();
        assert_eq!(state.complete(&a, ok(&["late"])), ResponseOutcome::Stale);
        assert!(state.is_loading());
        assert_eq!(state.complete(&b, ok(&["2"])), ResponseOutcome::Applied);
        assert_eq!(ids(&state), vec!["2"]);
    }

    #[test]
    fn failure_keeps_last_good_results() {
        let mut state = TherapistSearchState::default();
        let t = state.update_filters(FacetChange::Gender(Some(Gender::Male)).into(), at(0)).unwrap();
        state.complete(&t, ok(&["kept"]));

        let t = state.update_filters(FacetChange::Gender(Some(Gender::Female)).into(), at(1)).unwrap();
        assert_eq!(state.complete(&t, Err("connection refused")), ResponseOutcome::Failed);
        assert_eq!(ids(&state), vec!["kept"]);
        assert_eq!(state.error(), Some("connection refused"));
        assert!(!state.is_form_disabled());

        let t = state.update_filters(FacetChange::Gender(None).into(), at(2)).unwrap();
        let unsuccessful = Ok::<_, String>(TherapistSearchResponse {
            success: false,
            error: Some("bad filter".to_string()),
            ..Default::default()
        });
        assert_eq!(state.complete(&t, unsuccessful), ResponseOutcome::Failed);
        assert_eq!(ids(&state), vec!["kept"]);
        assert_eq!(state.error(), Some("bad filter"));
    }

    #[test]
    fn tag_toggles_follow_symmetric_difference() {
        let sequences: &[&[&str]] = &[
            &["Anxiety"],
            &["Anxiety", "Anxiety"],
            &["Anxiety", "Grief", "Anxiety"],
            &["Grief", "Trauma", "Grief", "Trauma"],
            &["ADHD", "Stress", "Career", "Stress", "ADHD", "LGBTQ"],
        ];
        for sequence in sequences {
            let mut state = TherapistSearchState::default();
            let mut expected = BTreeSet::new();
            for tag in *sequence {
                if !expected.remove(*tag) {
                    expected.insert(tag.to_string());
                }
                let change = state.criteria().toggle_tag(TagFacet::AreasOfFocus, tag);
                let t = state.update_filters(change.into(), at(0)).unwrap();
                state.complete(&t, ok(&[]));
            }
            let expected = if expected.is_empty() { None } else { Some(expected) };
            assert_eq!(state.criteria().areas_of_focus, expected, "sequence {sequence:?}");
        }
    }

    #[test]
    fn single_valued_toggles_clear_or_replace() {
        let mut state = TherapistSearchState::default();
        for (gender, expected) in [
            (Gender::Male, Some(Gender::Male)),
            (Gender::Female, Some(Gender::Female)),
            (Gender::Female, None),
            (Gender::NonBinary, Some(Gender::NonBinary)),
        ] {
            let change = state.criteria().toggle_gender(gender);
            let t = state.update_filters(change.into(), at(0)).unwrap();
            state.complete(&t, ok(&[]));
            assert_eq!(state.criteria().gender, expected);
        }

        let change = state.criteria().toggle_availability(Availability::InPerson);
        let t = state.update_filters(change.into(), at(1)).unwrap();
        state.complete(&t, ok(&[]));
        let change = state.criteria().toggle_availability(Availability::InPerson);
        let t = state.update_filters(change.into(), at(2)).unwrap();
        assert_eq!(t.criteria().availability, None);
    }

    #[test]
    fn price_commit_dispatches_merged_value_then_null() {
        let mut state = TherapistSearchState::default();
        let t = state.update_filters(FacetChange::Gender(Some(Gender::Female)).into(), at(0)).unwrap();
        state.complete(&t, ok(&[]));

        state.edit_price(PriceFacet::Initial, "1");
        state.edit_price(PriceFacet::Initial, "10");
        state.edit_price(PriceFacet::Initial, "100");
        assert_eq!(state.request().request_count(), 1);
        assert_eq!(state.criteria().max_price_initial, None);

        let t = state.commit_price(PriceFacet::Initial, at(1)).unwrap();
        assert_eq!(t.criteria().max_price_initial, Some(100.0));
        assert_eq!(t.criteria().gender, Some(Gender::Female));
        state.complete(&t, ok(&[]));

        state.edit_price(PriceFacet::Initial, "");
        let t = state.commit_price(PriceFacet::Initial, at(2)).unwrap();
        assert_eq!(t.criteria().max_price_initial, None);
        assert_eq!(t.criteria().gender, Some(Gender::Female));
    }

    #[test]
    fn unchanged_price_commit_is_idempotent() {
        let mut state = TherapistSearchState::default();
        state.edit_price(PriceFacet::Subsequent, "120");
        let t = state.commit_price(PriceFacet::Subsequent, at(0)).unwrap();
        state.complete(&t, ok(&[]));
        let committed = state.criteria().clone();

        assert!(state.commit_price(PriceFacet::Subsequent, at(1)).is_none());
        state.edit_price(PriceFacet::Subsequent, "120.0");
        assert!(state.commit_price(PriceFacet::Subsequent, at(2)).is_none());
        assert_eq!(state.price_input(PriceFacet::Subsequent), "120");
        assert_eq!(state.criteria(), &committed);
        assert_eq!(state.request().request_count(), 1);

        // blank when already unlimited
        state.edit_price(PriceFacet::Initial, "  ");
        assert!(state.commit_price(PriceFacet::Initial, at(3)).is_none());
    }

    #[test]
    fn price_text_resyncs_only_when_committed_price_changes() {
        let mut state = TherapistSearchState::default();
        state.edit_price(PriceFacet::Initial, "8");
        let t = state
            .update_filters(FacetChange::Gender(Some(Gender::Male)).into(), at(0))
            .unwrap();
        assert_eq!(state.price_input(PriceFacet::Initial), "8");
        state.complete(&t, ok(&[]));

        let replacement = FilterCriteria {
            max_price_initial: Some(90.0),
            ..Default::default()
        };
        let t = state.update_filters(FilterUpdate::Replace(replacement), at(1)).unwrap();
        assert_eq!(state.price_input(PriceFacet::Initial), "90");
        state.complete(&t, ok(&["x"]));

        assert!(state.reset());
        assert_eq!(state.price_input(PriceFacet::Initial), "");
        assert!(state.criteria().is_empty());
        assert!(state.therapists().is_empty());
    }

    #[test]
    fn chat_disables_form_and_failed_chat_keeps_results() {
        let mut state = TherapistSearchState::default();
        let t = state.update_filters(FacetChange::Gender(Some(Gender::Male)).into(), at(0)).unwrap();
        state.complete(&t, ok(&["kept"]));

        assert!(state.begin_chat());
        assert!(!state.begin_chat());
        assert!(state.is_form_disabled());
        assert!(state.update_filters(FacetChange::Gender(None).into(), at(1)).is_none());

        state.finish_chat(None);
        assert!(!state.is_form_disabled());
        assert_eq!(ids(&state), vec!["kept"]);
        assert_eq!(state.request().request_count(), 1);
    }
}
