//! Local-calendar date math for the grids.

pub mod calendar;
