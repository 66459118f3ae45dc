pub mod api_utils;
pub mod clock;
pub mod icons;
