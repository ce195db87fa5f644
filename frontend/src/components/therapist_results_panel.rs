//! Result list and therapist cards.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_communication_icons::MdLocationOn, md_social_icons::MdPerson}};

use common::therapist::TherapistSummary;
use crate::{
    components::suspend_boundary::LoadingIndicator,
    pages::home_page::TherapistSearchControl,
    routes::Route,
};

fn format_fee(fee: Option<f64>) -> String {
    match fee {
        Some(fee) => format!("${fee:.0}"),
        None => "N/A".to_string(),
    }
}

#[component]
pub fn TherapistResultsPanel() -> Element {
    let control = use_context::<TherapistSearchControl>();
    let state = control.state;
    let is_loading = state.read().is_loading();
    let therapists = state.read().therapists().to_vec();
    let opacity = if is_loading { "0.6" } else { "1" };

    if therapists.is_empty() {
        return rsx! {
            div {
                style: "
                    width: 100%;
                    height: 100%;
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    color: #6B6B6B;
                    font-size: 18px;
                    text-align: center;
                    padding: 20px;
                    box-sizing: border-box;
                ",
                if is_loading {
                    LoadingIndicator {}
                } else {
                    "Use the filters or chat with Matchya to find therapists."
                }
            }
        };
    }

    rsx! {
        ul {
            id: "x-therapist-results",
            style: "
                width: 100%;
                list-style: none;
                padding: 16px;
                margin: 0px;
                box-sizing: border-box;
                display: flex;
                flex-direction: column;
                gap: 12px;
                opacity: {opacity};
            ",
            for therapist in therapists {
                li {
                    key: "{therapist.id}",
                    TherapistCard { therapist }
                }
            }
        }
    }
}

#[component]
fn TherapistCard(therapist: TherapistSummary) -> Element {
    let slug = therapist.profile_slug();
    let session_types = therapist.session_types().join(" · ");
    let areas = therapist.areas_of_focus.join(", ");
    let fee_initial = format_fee(therapist.fee_initial);
    let fee_subsequent = format_fee(therapist.fee_subsequent);

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                gap: 16px;
                background: white;
                border: 1px solid #E4DED2;
                border-radius: 10px;
                padding: 14px 16px;
            ",
            if let Some(image) = therapist.profile_image_url.clone() {
                img { src: "{image}", alt: "{therapist.name}", style: "width: 72px; height: 72px; border-radius: 50%; object-fit: cover;" }
            } else {
                div {
                    style: "width: 72px; height: 72px; border-radius: 50%; background: #EEE9DF; display: flex; align-items: center; justify-content: center; flex-shrink: 0;",
                    Icon { icon: MdPerson, style: "width: 40px; height: 40px; color: #9C9484;" }
                }
            }
            div {
                style: "display: flex; flex-direction: column; gap: 4px; min-width: 0; flex-grow: 1;",
                span {
                    style: "font-size: 20px; font-weight: 500; color: #1F2A1C;",
                    Link { to: Route::TherapistProfilePage { slug }, "{therapist.name}" }
                }
                if let Some(title) = therapist.title.clone() {
                    span { style: "color: #6B6B6B;", "{title}" }
                }
                if let Some(location) = therapist.location.clone() {
                    span {
                        style: "display: flex; align-items: center; gap: 4px; color: #6B6B6B;",
                        Icon { icon: MdLocationOn, style: "width: 16px; height: 16px;" }
                        "{location}"
                    }
                }
                if !session_types.is_empty() {
                    span { style: "font-size: 14px;", "{session_types}" }
                }
                if !areas.is_empty() {
                    span { style: "font-size: 14px; color: #4A4A4A;", "Focus: {areas}" }
                }
                if let Some(summary) = therapist.short_summary.clone() {
                    p { style: "font-size: 14px; margin: 4px 0px 0px 0px;", "{summary}" }
                }
            }
            div {
                style: "display: flex; flex-direction: column; align-items: flex-end; gap: 4px; flex-shrink: 0; font-size: 14px;",
                span { "Initial: {fee_initial}" }
                span { "Subsequent: {fee_subsequent}" }
            }
        }
    }
}
