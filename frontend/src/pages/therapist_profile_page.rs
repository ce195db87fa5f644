//! Therapist profile page, fetched by slug.

use dioxus::logger::tracing;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_communication_icons::MdLocationOn, md_editor_icons::MdInsertLink, md_social_icons::MdPerson}};

use common::{slug::name_from_slug, therapist::{Qualification, TherapistProfile}};
use crate::{
    api::therapist_api::get_therapist_profile,
    components::{error_boundary::ComponentErrorDisplay, suspend_boundary::SuspendWrapper},
    routes::Route,
};

#[component]
pub fn TherapistProfilePage(slug: String) -> Element {
    let title_name = name_from_slug(&slug);
    rsx! {
        Title { "{title_name} - Matchya" }
        div {
            id: "x-profile-page",
            style: "width: 100%; height: 100%; overflow-y: auto; padding: 24px; box-sizing: border-box;",
            div {
                style: "max-width: 860px; margin: 0px auto; display: flex; flex-direction: column; gap: 16px;",
                Link { to: Route::HomePage {}, "← Back to search" }
                SuspendWrapper {
                    TherapistProfileLoader { slug }
                }
            }
        }
    }
}

#[component]
fn TherapistProfileLoader(slug: ReadSignal<String>) -> Element {
    let profile = use_resource(move || {
        let slug = slug.read().clone();
        get_therapist_profile(slug)
    })
    .suspend()?
    .cloned();

    let searched_name = name_from_slug(&slug.read());
    match profile {
        Err(e) => rsx! { ComponentErrorDisplay { error_txt: format!("{:#?}", e) } },
        Ok(None) => rsx! {
            div {
                style: "padding: 40px; text-align: center; color: #6B6B6B;",
                h2 { "Therapist not found" }
                p { "No profile matches \"{searched_name}\"." }
            }
        },
        Ok(Some(profile)) => rsx! { TherapistProfileView { profile } },
    }
}

#[component]
fn TherapistProfileView(profile: TherapistProfile) -> Element {
    let summary = profile.summary.clone();
    let qualifications = profile.qualifications.iter().map(|q| Qualification::parse(q)).collect::<Vec<_>>();
    let session_types = summary.session_types().join(" · ");
    let fee_initial = summary.fee_initial.map(|f| format!("${f:.0}")).unwrap_or("N/A".to_string());
    let fee_subsequent = summary.fee_subsequent.map(|f| format!("${f:.0}")).unwrap_or("N/A".to_string());
    let insurance = profile.insurance_providers.join(", ");

    let copy_link = move |_: Event<MouseData>| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(url) = window.location().href() else {
            return;
        };
        let _promise = window.navigator().clipboard().write_text(&url);
        tracing::info!("profile link copied to clipboard: {}", url);
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: row; gap: 20px; align-items: center; background: white; border: 1px solid #E4DED2; border-radius: 12px; padding: 20px;",
            if let Some(image) = summary.profile_image_url.clone() {
                img { src: "{image}", alt: "{summary.name}", style: "width: 120px; height: 120px; border-radius: 50%; object-fit: cover;" }
            } else {
                div {
                    style: "width: 120px; height: 120px; border-radius: 50%; background: #EEE9DF; display: flex; align-items: center; justify-content: center;",
                    Icon { icon: MdPerson, style: "width: 64px; height: 64px; color: #9C9484;" }
                }
            }
            div {
                style: "display: flex; flex-direction: column; gap: 6px; flex-grow: 1;",
                h1 { style: "margin: 0px; font-size: 30px;", "{summary.name}" }
                if let Some(title) = summary.title.clone() {
                    span { style: "color: #6B6B6B;", "{title}" }
                }
                if let Some(location) = summary.location.clone() {
                    span {
                        style: "display: flex; align-items: center; gap: 4px;",
                        Icon { icon: MdLocationOn, style: "width: 18px; height: 18px;" }
                        "{location}"
                        if let Some(clinic) = profile.clinic.clone() {
                            " · {clinic}"
                        }
                    }
                }
                if !session_types.is_empty() {
                    span { "{session_types}" }
                }
            }
            div {
                style: "display: flex; flex-direction: column; gap: 8px; align-items: flex-end;",
                if let Some(link) = profile.booking_link.clone() {
                    a {
                        href: "{link}",
                        target: "_blank",
                        style: "background: #3F4A3C; color: white; padding: 10px 18px; border-radius: 9999px; text-decoration: none;",
                        "Book a session"
                    }
                }
                button {
                    style: "display: flex; align-items: center; gap: 4px; cursor: pointer; border: 1px solid #CFC8B8; background: white; border-radius: 9999px; padding: 6px 12px;",
                    onclick: copy_link,
                    Icon { icon: MdInsertLink, style: "width: 18px; height: 18px;" }
                    "Copy link"
                }
            }
        }

        ProfileSection { title: "Fees",
            p { "Initial session: {fee_initial} · Subsequent sessions: {fee_subsequent}" }
            if profile.sliding_scale {
                p { "Sliding scale available." }
            }
            if !insurance.is_empty() {
                p { "Insurance: {insurance}" }
            }
        }
        if !profile.bio.is_empty() {
            ProfileSection { title: "About",
                p { style: "white-space: pre-wrap; line-height: 1.6;", "{profile.bio}" }
                if let Some(link) = profile.bio_link.clone() {
                    a { href: "{link}", target: "_blank", "Read more" }
                }
            }
        }
        if !summary.areas_of_focus.is_empty() {
            ProfileSection { title: "Areas of focus", TagList { tags: summary.areas_of_focus.clone() } }
        }
        if !profile.approaches.is_empty() {
            ProfileSection { title: "Approaches", TagList { tags: profile.approaches.clone() } }
        }
        if !profile.languages.is_empty() {
            ProfileSection { title: "Languages", TagList { tags: profile.languages.clone() } }
        }
        if !qualifications.is_empty() {
            ProfileSection { title: "Qualifications",
                ul {
                    style: "margin: 0px; padding-left: 20px;",
                    for (index, q) in qualifications.into_iter().enumerate() {
                        li {
                            key: "{index}",
                            strong { "{q.degree}" }
                            if let Some(institution) = q.institution {
                                ", {institution}"
                            }
                            if let Some(year) = q.year {
                                " ({year})"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ProfileSection(title: String, children: Element) -> Element {
    rsx! {
        div {
            style: "background: white; border: 1px solid #E4DED2; border-radius: 12px; padding: 16px 20px;",
            h2 { style: "margin: 0px 0px 10px 0px; font-size: 18px;", "{title}" }
            {children}
        }
    }
}

#[component]
fn TagList(tags: Vec<String>) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 6px;",
            for tag in tags {
                span {
                    key: "{tag}",
                    style: "background: #EEE9DF; border-radius: 9999px; padding: 4px 10px; font-size: 14px;",
                    "{tag}"
                }
            }
        }
    }
}
