//! The preference data model.
//!
//! A [`Theme`] is what the user said: an [`Accent`] plus a [`Mode`]. What the
//! document renders is an [`Appearance`], which is the mode with `System`
//! replaced by the operating system's answer. Appearance is recomputed every
//! time and never stored.
//!
//! Raw strings only enter through two doors, [`DefaultTheme`] (host
//! configuration) and [`ThemePatch::from_raw`] (untyped callers). Both validate
//! each field on its own and substitute the default for anything unknown, so
//! the typed model never holds a value outside its enumeration.

mod accent;
mod mode;
#[allow(clippy::module_inception)]
mod theme;

pub use accent::Accent;
pub use mode::{Appearance, Mode};
pub use theme::{DefaultTheme, Theme, ThemePatch};
