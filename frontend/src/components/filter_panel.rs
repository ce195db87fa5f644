//! Filter controls: price caps, gender, session type and the tag facets.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_content_icons::MdFilterList, md_navigation_icons::{MdChevronLeft, MdChevronRight}, md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank}}};

use common::filter_criteria::{Availability, FilterCriteria, FilterUpdate, Gender, PriceFacet, TagFacet};
use crate::{
    data_definitions::drawer_state::{FilterPanelMode, FilterPanelState},
    pages::home_page::TherapistSearchControl,
};

const FORMAT_OPTIONS: &[&str] = &["individual", "couples", "family"];
const AREAS_OF_FOCUS_OPTIONS: &[&str] = &[
    "Anxiety", "Depression", "ADHD", "Trauma", "Relationships", "Addiction", "Grief",
    "Stress", "Self-esteem", "Family", "Anger", "Career", "Sexuality", "LGBTQ",
];
const ETHNICITY_OPTIONS: &[&str] = &["asian", "black", "indigenous", "latino", "middle_eastern", "white"];
const SEXUALITY_OPTIONS: &[&str] = &["straight", "gay", "lesbian", "bisexual", "queer", "asexual"];
const FAITH_OPTIONS: &[&str] = &["christian", "muslim", "jewish", "hindu", "buddhist", "sikh", "atheist"];

fn tag_options(facet: TagFacet) -> &'static [&'static str] {
    match facet {
        TagFacet::Format => FORMAT_OPTIONS,
        TagFacet::AreasOfFocus => AREAS_OF_FOCUS_OPTIONS,
        TagFacet::Ethnicity => ETHNICITY_OPTIONS,
        TagFacet::Sexuality => SEXUALITY_OPTIONS,
        TagFacet::Faith => FAITH_OPTIONS,
    }
}

/// "middle_eastern" -> "Middle eastern"
fn option_label(value: &str) -> String {
    let value = value.replace('_', " ");
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Desktop column holding the filter panel, collapsible to a narrow strip.
#[component]
pub fn FilterColumn() -> Element {
    let mut panel = use_signal(FilterPanelState::default);
    let mode = panel.read().mode();
    let width = match mode {
        FilterPanelMode::Collapsed => "56px",
        FilterPanelMode::Peeking => "96px",
        FilterPanelMode::Expanded => "360px",
    };

    rsx! {
        div {
            id: "x-filter-column",
            style: "
                height: 100%;
                width: {width};
                flex-shrink: 0;
                background-color: #FBFAF7;
                border-right: 1px solid #E4DED2;
                transition: width 0.3s ease-in-out;
                overflow: hidden;
                display: flex;
                flex-direction: column;
            ",
            onmouseenter: move |_| panel.write().hover_enter(),
            onmouseleave: move |_| panel.write().hover_leave(),
            button {
                style: "
                    border: none;
                    background: none;
                    cursor: pointer;
                    display: flex;
                    align-items: center;
                    gap: 8px;
                    padding: 16px;
                ",
                onclick: move |_| panel.write().toggle_expanded(),
                Icon { icon: MdFilterList, style: "width: 24px; height: 24px; color: #3F4A3C;" }
                if mode == FilterPanelMode::Expanded {
                    span { style: "font-size: 18px; font-weight: 500;", "Filters" }
                    div { style: "flex: 1 1 auto;" }
                    Icon { icon: MdChevronLeft, style: "width: 24px; height: 24px;" }
                } else {
                    Icon { icon: MdChevronRight, style: "width: 24px; height: 24px;" }
                }
            }
            if mode == FilterPanelMode::Expanded {
                div {
                    style: "flex-grow: 1; overflow-y: auto; padding: 0px 16px 16px 16px;",
                    FilterPanel {}
                }
            }
        }
    }
}

#[component]
pub fn FilterPanel() -> Element {
    let control = use_context::<TherapistSearchControl>();
    let state = control.state;
    let is_form_disabled = state.read().is_form_disabled();
    let error = state.read().error().map(|e| e.to_string());

    rsx! {
        div {
            id: "x-filter-panel",
            style: "
                position: relative;
                display: flex;
                flex-direction: column;
                gap: 20px;
            ",
            if is_form_disabled {
                div {
                    style: "
                        position: absolute;
                        inset: 0px;
                        background: rgba(255, 255, 255, 0.5);
                        z-index: 10;
                        display: flex;
                        align-items: flex-start;
                        justify-content: center;
                        padding-top: 40px;
                    ",
                    div {
                        style: "background: white; padding: 12px; border-radius: 8px; box-shadow: 0 0 10px 0 rgba(0, 0, 0, 0.1);",
                        "Updating results..."
                    }
                }
            }
            if let Some(error) = error {
                div {
                    style: "color: darkred; border: 1px solid red; padding: 8px; border-radius: 5px;",
                    "{error}"
                }
            }

            FilterSection { title: "Maximum price",
                PriceInput { facet: PriceFacet::Initial, label: "Initial session" }
                PriceInput { facet: PriceFacet::Subsequent, label: "Subsequent sessions" }
            }
            FilterSection { title: "Gender",
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 8px;",
                    for gender in Gender::ALL {
                        GenderButton { key: "{gender.as_str()}", gender }
                    }
                }
            }
            FilterSection { title: "Session type",
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 8px;",
                    for availability in Availability::ALL {
                        AvailabilityButton { key: "{availability.as_str()}", availability }
                    }
                }
            }
            for facet in TagFacet::ALL {
                TagFacetSection { key: "{facet.field_name()}", facet }
            }

            button {
                style: "
                    cursor: pointer;
                    border: 1px solid #3F4A3C;
                    border-radius: 8px;
                    background: white;
                    padding: 8px;
                    font-size: 15px;
                ",
                disabled: is_form_disabled,
                onclick: move |_| control.reset.call(()),
                "Reset filters"
            }
        }
    }
}

#[component]
fn FilterSection(title: String, children: Element) -> Element {
    rsx! {
        div {
            h3 { style: "font-size: 14px; font-weight: 500; color: #6B6B6B; margin-bottom: 10px;", "{title}" }
            {children}
        }
    }
}

#[component]
fn PriceInput(facet: PriceFacet, label: String) -> Element {
    let control = use_context::<TherapistSearchControl>();
    let state = control.state;
    let text = state.read().price_input(facet).to_string();
    let is_form_disabled = state.read().is_form_disabled();

    rsx! {
        label {
            style: "display: flex; flex-direction: row; align-items: center; gap: 8px; margin-bottom: 8px;",
            span { style: "flex: 1 1 auto;", "{label}" }
            span { "$" }
            input {
                r#type: "number",
                min: "0",
                placeholder: "No limit",
                style: "width: 100px; padding: 4px 8px; border: 1px solid #CFC8B8; border-radius: 6px;",
                disabled: is_form_disabled,
                value: "{text}",
                oninput: move |event: Event<FormData>| control.edit_price.call((facet, event.value())),
                onblur: move |_| control.commit_price.call(facet),
                onkeydown: move |event: Event<KeyboardData>| {
                    if event.key() == Key::Enter {
                        control.commit_price.call(facet);
                    }
                },
            }
        }
    }
}

#[component]
fn ChoiceButton(label: String, selected: bool, disabled: bool, onclick: Callback<()>) -> Element {
    let border = if selected { "2px solid #6C8C64" } else { "1px solid #CFC8B8" };
    let background = if selected { "white" } else { "transparent" };
    rsx! {
        button {
            style: "
                cursor: pointer;
                padding: 4px 8px;
                border-radius: 6px;
                border: {border};
                background: {background};
                color: #4A4A4A;
                font-size: 14px;
            ",
            disabled,
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}

#[component]
fn GenderButton(gender: Gender) -> Element {
    let control = use_context::<TherapistSearchControl>();
    let state = control.state;
    let selected = state.read().criteria().gender == Some(gender);
    let disabled = state.read().is_form_disabled();
    rsx! {
        ChoiceButton {
            label: gender.display_name().to_string(),
            selected,
            disabled,
            onclick: move |_| {
                let change = state.read().criteria().toggle_gender(gender);
                control.update_filters.call(change.into());
            },
        }
    }
}

#[component]
fn AvailabilityButton(availability: Availability) -> Element {
    let control = use_context::<TherapistSearchControl>();
    let state = control.state;
    let selected = state.read().criteria().availability == Some(availability);
    let disabled = state.read().is_form_disabled();
    rsx! {
        ChoiceButton {
            label: availability.display_name().to_string(),
            selected,
            disabled,
            onclick: move |_| {
                let change = state.read().criteria().toggle_availability(availability);
                control.update_filters.call(change.into());
            },
        }
    }
}

#[component]
fn TagFacetSection(facet: TagFacet) -> Element {
    let control = use_context::<TherapistSearchControl>();
    let state = control.state;
    let has_any = state.read().criteria().tags(facet).is_some();
    let disabled = state.read().is_form_disabled();

    rsx! {
        FilterSection { title: facet.display_name().to_string(),
            div {
                style: "display: flex; flex-direction: column; gap: 2px;",
                for tag in tag_options(facet).iter().copied() {
                    TagCheckbox { key: "{tag}", facet, tag: tag.to_string() }
                }
            }
            if has_any {
                button {
                    style: "border: none; background: none; color: #3B82F6; cursor: pointer; font-size: 13px; margin-top: 6px; padding: 0px;",
                    disabled,
                    onclick: move |_| control.update_filters.call(FilterCriteria::clear_tags(facet).into()),
                    "Clear {facet.display_name().to_lowercase()}"
                }
            }
        }
    }
}

#[component]
fn TagCheckbox(facet: TagFacet, tag: String) -> Element {
    let control = use_context::<TherapistSearchControl>();
    let state = control.state;
    let is_checked = state.read().criteria().has_tag(facet, &tag);
    let label = option_label(&tag);

    rsx! {
        div {
            class: "x-facet-list-item",
            style: "
                display: flex;
                flex-direction: row;
                gap: 10px;
                cursor: pointer;
                padding: 4px;
                align-items: center;
            ",
            onclick: move |_e| {
                let change = state.read().criteria().toggle_tag(facet, &tag);
                control.update_filters.call(FilterUpdate::from(change));
            },
            if is_checked {
                Icon { icon: MdCheckBox, style: "width: 22px; height: 22px; color: #3F4A3C; flex-shrink: 0;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px; color: black; flex-shrink: 0;" }
            }
            div {
                style: "font-size: 15px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; min-width: 0;",
                "{label}"
            }
        }
    }
}
