use chrono::Utc;
use dioxus::logger::tracing;
use dioxus::prelude::*;
use futures_util::future::{Either, select};

use common::filter_criteria::{FilterUpdate, PriceFacet};
use crate::{
    api::therapist_api::search_therapists,
    components::{chat_panel::ChatDrawer, filter_panel::FilterColumn, therapist_results_panel::TherapistResultsPanel},
    data_definitions::therapist_search_state::{RequestTicket, TherapistSearchState},
};

/// Handle to the page's search state, provided as context to the panels.
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct TherapistSearchControl {
    pub state: Signal<TherapistSearchState>,
    pub update_filters: Callback<FilterUpdate>,
    pub edit_price: Callback<(PriceFacet, String)>,
    pub commit_price: Callback<PriceFacet>,
    pub reset: Callback<()>,
}

/// Run a dispatched search and hand its outcome back to the state. A
/// superseded request is abandoned as soon as its token is cancelled.
fn run_search(mut state: Signal<TherapistSearchState>, ticket: RequestTicket) {
    spawn(async move {
        let token = ticket.cancellation_token().clone();
        let cancelled = std::pin::pin!(token.cancelled());
        let search = std::pin::pin!(search_therapists(ticket.criteria().clone()));
        match select(cancelled, search).await {
            Either::Left(_) => {
                tracing::debug!("search #{} abandoned", ticket.generation());
            }
            Either::Right((result, _)) => {
                let outcome = state.write().complete(&ticket, result);
                tracing::debug!("search #{} finished: {:?}", ticket.generation(), outcome);
            }
        }
    });
}

/// Home page
#[component]
pub fn HomePage() -> Element {
    let mut state = use_signal(TherapistSearchState::default);

    use_context_provider(move || TherapistSearchControl {
        state,
        update_filters: Callback::new(move |update: FilterUpdate| {
            let ticket = state.write().update_filters(update, Utc::now());
            if let Some(ticket) = ticket {
                run_search(state, ticket);
            }
        }),
        edit_price: Callback::new(move |(facet, text): (PriceFacet, String)| {
            state.write().edit_price(facet, text);
        }),
        commit_price: Callback::new(move |facet: PriceFacet| {
            let ticket = state.write().commit_price(facet, Utc::now());
            if let Some(ticket) = ticket {
                run_search(state, ticket);
            }
        }),
        reset: Callback::new(move |_: ()| {
            state.write().reset();
        }),
    });

    rsx! {
        Title { "Matchya - Find a therapist" }
        div {
            id: "x-home-container",
            style: "
                display: flex;
                flex-direction: row;
                width: 100%;
                height: 100%;
                background: #F5F3EE;
                box-sizing: border-box;
            ",
            FilterColumn {}
            div {
                id: "x-home-results",
                style: "
                    flex-grow: 1;
                    min-width: 300px;
                    height: 100%;
                    overflow-y: auto;
                ",
                TherapistResultsPanel {}
            }
            ChatDrawer {}
        }
    }
}
