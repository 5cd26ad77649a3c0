pub mod dto;
pub mod places;
pub mod trip;
