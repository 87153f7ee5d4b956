pub mod types;
pub mod constants;
pub mod form;
pub mod normalize;

pub use types::*;
pub use form::FormState;
