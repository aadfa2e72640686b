//! The caller's own profile, as stored in the managed database.
//!
//! Only the LinkedIn URL is read; it seeds the recommendation pipeline.

pub mod directory;
pub mod supabase;

pub use directory::{InMemoryProfileDirectory, ProfileDirectory, ProfileError};
pub use supabase::SupabaseProfileDirectory;
