//! Widget trees and backdrops for each route.

pub mod landing;
pub mod resume;
