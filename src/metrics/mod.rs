//! Render-scoped values derived from the records (activity map, streak, life progress).

pub mod derive;
