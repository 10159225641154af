pub mod api_utils;
pub mod file_utils;
pub mod icons;
