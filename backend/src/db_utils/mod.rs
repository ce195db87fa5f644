pub mod supabase_utils;
pub mod therapist_record;
