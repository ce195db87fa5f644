pub mod home_page;
pub mod therapist_profile_page;
