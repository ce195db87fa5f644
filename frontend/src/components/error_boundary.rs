//! Error boundaries for rendering failures.

use dioxus::prelude::*;

use crate::routes::Route;

/// Page-level boundary: shows the error and a way back to the search.
#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                dioxus::logger::tracing::error!("render error in {}: {:?}", boundary_name, err);
                rsx! {
                    div {
                        style: "display: flex; flex-direction: column; gap: 12px; padding: 32px; max-width: 720px;",
                        h1 { style: "color: #8B1E1E; font-size: 32px;", "Something went wrong" }
                        p { style: "color: #6B6B6B;", "Section: {boundary_name}" }
                        Link { to: Route::HomePage {}, "Back to therapist search" }
                        pre {
                            style: "color: black; border: 1px solid #E4B4B4; padding: 10px; border-radius: 6px; text-wrap: auto;",
                            "{err:#?}"
                        }
                    }
                }
            },
            children
        }
    }
}

/// Component-level boundary with a retry button.
#[component]
pub fn ComponentErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: |err: ErrorContext| {
                let error_txt = match err.error() {
                    Some(e) => format!("{:#?}", e.0),
                    None => "Unknown error".to_string(),
                };
                rsx! {
                    ComponentErrorDisplay {
                        error_txt,
                        button {
                            style: "cursor: pointer; border: 1px solid #3F4A3C; background: white; padding: 8px 16px; border-radius: 6px;",
                            onclick: move |_| err.clear_errors(),
                            "Try again"
                        }
                    }
                }
            },
            {children}
        }
    }
}

#[component]
pub fn ComponentErrorDisplay(error_txt: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        div {
            style: "
                width: 100%;
                display: flex;
                flex-direction: column;
                align-items: center;
                justify-content: center;
                gap: 8px;
                padding: 24px;
                box-sizing: border-box;
            ",
            h2 { style: "color: #8B1E1E; font-size: 22px;", "Could not load this section" }
            pre {
                style: "color: #5C1A1A; border: 1px solid #E4B4B4; padding: 10px; border-radius: 6px; text-wrap: auto; max-width: 500px; max-height: 300px; overflow-y: auto;",
                "{error_txt}"
            }
            {children}
        }
    }
}
