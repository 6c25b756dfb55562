//! Contains constraints, enumerations and other custom types.

mod constraint;
mod enums;

pub use constraint::{
    ClientConstraints, ConstraintCategory, ConstraintViolation, FormConstraints,
    FormTechnicianConstraints, MemberConstraints, UserConstraints,
};
pub use enums::ClientType;
