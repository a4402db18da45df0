pub mod input;
pub mod model;
pub mod reliability;
pub mod util;
