//! Instrumentation adapter between an alpha-beta search and a [`SearchTree`].
//!
//! An engine exposes up to four evaluation slots through [`SearchEngine`] and makes
//! every recursive call through the [`Search`] handle it is given. Handing it a
//! [`Direct`] handle runs it untouched; handing it an [`Instrumented`] handle records
//! each evaluation into a tree owned by the caller and annotates the tree when the
//! top-level entry point returns.
//!
//! [`SearchTree`]: crate::search_tree::SearchTree

mod engine;
mod recorder;


pub use engine::{Direct, Search, SearchEngine, Window};
pub use recorder::{Instrumented, ScorePerspective};
