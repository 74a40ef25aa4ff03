/// Parley-backed shaping bound to one caption font.
pub mod engine;
/// Text metrics abstraction.
pub mod measure;
/// Caption layout and the outlined-text overlay renderer.
pub mod overlay;
/// Greedy word wrap.
pub mod wrap;
