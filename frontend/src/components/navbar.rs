//! Top bar shared by all pages.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_action_icons::MdSearch};

use crate::components::error_boundary::GlobalErrorBoundary;
use crate::routes::Route;

#[component]
pub fn Navbar() -> Element {
    rsx! {
        div {
            id: "x-nav-container",
            style: "
                display: flex;
                flex-direction: column;
                width: 100%;
                height: 100%;
            ",
            div {
                id: "x-nav-topbar",
                style: "
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 16px;
                    height: 56px;
                    padding: 0px 20px;
                    flex-shrink: 0;
                    background-color: #FBFAF7;
                    border-bottom: 1px solid #E4DED2;
                ",
                Link {
                    to: Route::HomePage {},
                    span {
                        style: "display: flex; align-items: center; gap: 8px; text-decoration: none;",
                        img { src: asset!("/assets/favicon.svg"), style: "width: 30px; height: 30px;" }
                        span { style: "font-size: 22px; font-weight: 600;", "matchya" }
                    }
                }
                div { style: "flex-grow: 1;" }
                Link {
                    to: Route::HomePage {},
                    span {
                        style: "display: flex; align-items: center; gap: 4px;",
                        Icon { icon: MdSearch, style: "width: 22px; height: 22px;" }
                        "Find a therapist"
                    }
                }
            }
            div {
                id: "x-page-container",
                style: "flex-grow: 1; min-height: 0;",
                GlobalErrorBoundary {
                    boundary_name: "Navbar".to_string(),
                    Outlet::<Route> {}
                }
            }
        }
    }
}
