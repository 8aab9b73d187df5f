//! Field arithmetic substrate for the accumulator.
//! All hash inputs and outputs are canonical BN254 scalar field elements.

pub mod prime_field;

pub use prime_field::{
    FieldDeserializeError, FieldElement, FieldElementOps, FIELD_ELEMENT_BYTES, MODULUS_BE_BYTES,
};
