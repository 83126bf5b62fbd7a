//! # Entity → Dto pipeline
//!
//! A partial class marked `[Dto<TEntity>]` (or `[Dto(typeof(TEntity))]`)
//! receives one generated property per entity property, except those:
//!
//! - listed in `IgnoredProperties`
//! - already written by hand on the target class
//! - generated by the compiler for record equality
//! - carrying an annotation listed in `IgnoredAttributes`, or derived from one
//!
//! Hand-written members always win: the generated half of the partial class
//! never repeats a name the hand-written half declares.

mod resolve;
mod synth;

pub use resolve::*;
pub use synth::*;
