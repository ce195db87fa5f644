//! Chat with the assistant, in a drawer that can be closed, minimized,
//! opened, or dragged to a custom height.

use chrono::Utc;
use dioxus::logger::tracing;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_communication_icons::MdChat, md_content_icons::MdSend, md_navigation_icons::MdClose}};

use common::chat::{ChatMessage, ChatRequest, ChatRole};
use crate::{
    api::therapist_api::send_chat_message,
    data_definitions::drawer_state::{ChatDrawerMode, ChatDrawerState},
    pages::home_page::TherapistSearchControl,
};

const MINIMIZED_HEIGHT: f64 = 200.0;
const FALLBACK_VIEWPORT_HEIGHT: f64 = 800.0;

fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|window| window.inner_height().ok())
        .and_then(|height| height.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_HEIGHT)
}

fn drawer_height(drawer: &ChatDrawerState) -> String {
    match (drawer.custom_height(), drawer.mode()) {
        (Some(height), _) => format!("{height}px"),
        (None, ChatDrawerMode::Open) => "70vh".to_string(),
        (None, _) => format!("{MINIMIZED_HEIGHT}px"),
    }
}

#[component]
pub fn ChatDrawer() -> Element {
    let mut drawer = use_signal(ChatDrawerState::default);
    let mode = drawer.read().mode();
    let height = drawer_height(&drawer.read());
    let is_dragging = drawer.read().is_dragging();

    if mode == ChatDrawerMode::Closed {
        return rsx! {
            button {
                style: "
                    position: fixed;
                    right: 24px;
                    bottom: 24px;
                    width: 56px;
                    height: 56px;
                    border-radius: 50%;
                    border: none;
                    background: #3F4A3C;
                    color: white;
                    cursor: pointer;
                    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.2);
                    z-index: 50;
                ",
                onclick: move |_| drawer.write().toggle(),
                Icon { icon: MdChat, style: "width: 26px; height: 26px;" }
            }
        };
    }

    rsx! {
        if is_dragging {
            // captures pointer movement anywhere on the page while dragging
            div {
                style: "position: fixed; inset: 0px; z-index: 60; cursor: ns-resize;",
                onmousemove: move |event: Event<MouseData>| {
                    let y = event.client_coordinates().y;
                    drawer.write().drag_to(y, viewport_height());
                },
                onmouseup: move |_| drawer.write().end_drag(),
                onmouseleave: move |_| drawer.write().end_drag(),
            }
        }
        div {
            id: "x-chat-drawer",
            style: "
                position: fixed;
                right: 24px;
                bottom: 0px;
                width: min(440px, calc(100vw - 48px));
                height: {height};
                background: white;
                border: 1px solid #E4DED2;
                border-radius: 12px 12px 0px 0px;
                box-shadow: 0 -4px 16px rgba(0, 0, 0, 0.1);
                display: flex;
                flex-direction: column;
                z-index: 50;
            ",
            div {
                style: "height: 14px; display: flex; align-items: center; justify-content: center; cursor: ns-resize; flex-shrink: 0;",
                onclick: move |_| {
                    if !drawer.read().is_dragging() {
                        drawer.write().toggle();
                    }
                },
                onmousedown: move |event: Event<MouseData>| {
                    let y = event.client_coordinates().y;
                    let current = drawer.read().custom_height().unwrap_or(MINIMIZED_HEIGHT);
                    drawer.write().begin_drag(y, current);
                },
                div { style: "width: 40px; height: 3px; border-radius: 2px; background: #CFC8B8;" }
            }
            div {
                style: "height: 44px; display: flex; align-items: center; justify-content: space-between; padding: 0px 16px; flex-shrink: 0; border-bottom: 1px solid #EEE9DF;",
                span { style: "font-weight: 500;", "Chat with Matchya" }
                button {
                    style: "border: none; background: none; cursor: pointer;",
                    onclick: move |event: Event<MouseData>| {
                        event.stop_propagation();
                        drawer.write().header_button();
                    },
                    Icon { icon: MdClose, style: "width: 18px; height: 18px; color: #6B6B6B;" }
                }
            }
            div {
                style: "flex-grow: 1; min-height: 0;",
                ChatPanel {}
            }
        }
    }
}

#[component]
pub fn ChatPanel() -> Element {
    let control = use_context::<TherapistSearchControl>();
    let mut state = control.state;
    let chat_id = use_signal(|| format!("chat-{}", Utc::now().timestamp_millis()));
    let mut messages = use_signal(Vec::<ChatMessage>::new);
    let mut draft = use_signal(String::new);
    let is_chat_loading = state.read().request().is_chat_loading();

    let mut send = move || {
        let message = draft.read().trim().to_string();
        if message.is_empty() || !state.write().begin_chat() {
            return;
        }
        draft.set(String::new());
        messages.write().push(ChatMessage {
            role: ChatRole::User,
            content: message.clone(),
            timestamp: Utc::now().timestamp(),
        });
        let request = ChatRequest {
            message,
            chat_id: chat_id.read().clone(),
        };
        spawn(async move {
            match send_chat_message(request).await {
                Ok(reply) => {
                    let results = reply.therapist_results();
                    messages.write().push(ChatMessage {
                        role: reply.role,
                        content: reply.content,
                        timestamp: reply.timestamp,
                    });
                    state.write().finish_chat(results);
                }
                Err(e) => {
                    tracing::error!("chat request failed: {e}");
                    messages.write().push(ChatMessage {
                        role: ChatRole::Assistant,
                        content: "Sorry, something went wrong. Please try again.".to_string(),
                        timestamp: Utc::now().timestamp(),
                    });
                    state.write().finish_chat(None);
                }
            }
        });
    };

    rsx! {
        div {
            style: "height: 100%; display: flex; flex-direction: column;",
            ul {
                style: "flex-grow: 1; overflow-y: auto; list-style: none; margin: 0px; padding: 12px; display: flex; flex-direction: column; gap: 8px;",
                for (index, message) in messages.read().iter().enumerate() {
                    li {
                        key: "{index}",
                        ChatBubble { message: message.clone() }
                    }
                }
                if is_chat_loading {
                    li { style: "color: #6B6B6B; font-style: italic;", "Matchya is typing..." }
                }
            }
            div {
                style: "display: flex; flex-direction: row; gap: 8px; padding: 10px; border-top: 1px solid #EEE9DF;",
                input {
                    r#type: "text",
                    placeholder: "Describe what you are looking for",
                    style: "flex: 1; border: 1px solid #CFC8B8; border-radius: 9999px; padding: 8px 14px; outline: none;",
                    value: "{draft}",
                    oninput: move |event: Event<FormData>| draft.set(event.value()),
                    onkeydown: move |event: Event<KeyboardData>| {
                        if event.key() == Key::Enter {
                            send();
                        }
                    },
                }
                button {
                    style: "border: none; background: #3F4A3C; color: white; border-radius: 50%; width: 38px; height: 38px; cursor: pointer;",
                    disabled: is_chat_loading,
                    onclick: move |_| send(),
                    Icon { icon: MdSend, style: "width: 18px; height: 18px;" }
                }
            }
        }
    }
}

#[component]
fn ChatBubble(message: ChatMessage) -> Element {
    let (align, background) = match message.role {
        ChatRole::User => ("flex-end", "#E7EFE4"),
        ChatRole::Assistant => ("flex-start", "#F5F3EE"),
    };
    rsx! {
        div {
            style: "display: flex; justify-content: {align};",
            div {
                style: "max-width: 80%; background: {background}; border-radius: 12px; padding: 8px 12px; white-space: pre-wrap;",
                "{message.content}"
            }
        }
    }
}
