use dioxus::prelude::*;

use crate::components::navbar::Navbar;
use crate::pages::home_page::HomePage;
use crate::pages::therapist_profile_page::TherapistProfilePage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]

    #[route("/")]
    HomePage {},

    #[route("/therapists/:slug")]
    TherapistProfilePage { slug: String },
}
