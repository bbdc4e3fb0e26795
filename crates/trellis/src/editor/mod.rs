//! Value editors and input validation.

mod spin_box;
mod validator;

pub use spin_box::NullableSpinBox;
pub use validator::{NullableDoubleValidator, ValidationState, Validator};
