pub mod channels;
pub mod schema;
pub mod validate;
