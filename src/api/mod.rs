pub mod spa;
pub mod swagger_main;
pub mod todo;
