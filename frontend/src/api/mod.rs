pub mod therapist_api;
