pub mod geom;
pub mod map;
pub mod places;
pub mod trip;
