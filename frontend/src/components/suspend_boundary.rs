use dioxus::prelude::*;

use crate::components::error_boundary::ComponentErrorBoundary;

/// Loading placeholder while suspended children resolve, inside an error
/// boundary.
#[component]
pub fn SuspendWrapper(children: Element) -> Element {
    rsx! {
        SuspenseBoundary {
            fallback: |_s: SuspenseContext| rsx! {
                div {
                    width: "100%",
                    display: "flex",
                    align_items: "center",
                    justify_content: "center",
                    padding: "40px 0px",
                    LoadingIndicator {}
                }
            },
            ComponentErrorBoundary {
                children
            }
        }
    }
}

#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div {
            style: "color: #3F4A3C; font-size: 18px; padding: 10px 16px; border-radius: 9999px; background: #EEE9DF;",
            "Loading..."
        }
    }
}
