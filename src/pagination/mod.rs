pub mod cursor;
pub mod paginated;
