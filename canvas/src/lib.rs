//! Obstacle map engine: grid-snapped polygon obstacles for arena layouts.
//!
//! The crate owns the whole editing model: shape generation from canonical
//! fields, the ordered obstacle store with its selection, hit-testing, the
//! drag and nudge transforms, and the JSON map codec. It never draws. A host
//! layer (browser canvas, CLI, test harness) feeds commands into
//! [`engine::EngineCore`] and reacts to the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Command surface and [`engine::EngineCore`] state |
//! | [`doc`] | Obstacle type and the ordered obstacle store |
//! | [`shape`] | Archetypes, anchor tags, and vertex generation |
//! | [`geometry`] | Points, rotation, reflection, point-in-polygon |
//! | [`grid`] | Grid extent, snapping, and world bounds |
//! | [`hit`] | Hit-testing against obstacles |
//! | [`input`] | Nudge directions and the drag state machine |
//! | [`viewport`] | Client-to-world pointer mapping |
//! | [`codec`] | Map document encode / decode |
//! | [`consts`] | Shared numeric constants (grid defaults, shape sizes) |

pub mod codec;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod grid;
pub mod hit;
pub mod input;
pub mod shape;
pub mod viewport;
