// Chapter reader services
// Preference state, scroll persistence, progress, layout and timing.

pub mod nav_layout;
pub mod reading_progress;
pub mod scheduler;
pub mod scroll_position;
pub mod settings_engine;
pub mod style_state;
pub mod theme_engine;
