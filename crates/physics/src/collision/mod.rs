//! Collision detection between the drone and the world.
//!
//! The drone is always represented by an axis-aligned box ([`Aabb`]) that is
//! rebuilt for every proposed position. Obstacles are analytic primitives
//! ([`Solid`]) and the ground is a value-noise height field
//! ([`TerrainField`]) clipped to a rectangular field ([`FieldBounds`]).
//!
//! # Key Types
//!
//! - [`Aabb`]: the drone's bounding interval on all three axes
//! - [`TiltLevel`]: how many control axes are deflected, shapes the box height
//! - [`Solid`]: cube, prism, cylinder or cone obstacle part
//! - [`TerrainField`]: seeded terrain that the drone must clear
//!
//! Every predicate here is pure: geometric values in, verdict out.

mod shapes;
mod terrain;
mod volume;

pub use shapes::{
    cone_collides, cube_collides, cylinder_collides, footprint_within_square, prism_collides,
    taper, Solid,
};
pub use terrain::{FieldBounds, GroundContact, TerrainField};
pub use volume::{vehicle_aabb, Aabb, Payload, TiltLevel};
