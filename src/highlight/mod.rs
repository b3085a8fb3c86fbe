//! Evidence highlighter for Arbiter Core.
//!
//! Re-locates model-quoted evidence inside the original field text, even
//! when the quote and source differ in case, accents, quote glyphs,
//! character width, or whitespace, and renders the field as an ordered
//! sequence of plain and highlighted segments.

mod highlighter;
mod matcher;
mod normalize;

pub use highlighter::{highlight, Segment};
