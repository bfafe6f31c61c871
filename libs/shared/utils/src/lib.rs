pub mod interaction;
pub mod markup;
pub mod test_utils;
pub mod token;
