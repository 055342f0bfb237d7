//! The seam between a compiled profile and a concrete record type.
//!
//! Runtime reflection is replaced by an explicit registration surface: a
//! record declares its argument fields as [`FieldSpec`]s (by hand or through
//! `#[derive(Command)]`) and exposes typed assignment by [`FieldId`].

use crate::{FieldId, FieldSpec, FieldValue};

/// Typed field assignment for one record instance.
///
/// Implementations accept a [`FieldValue`] whose kind matches the declared
/// field type and report `false` instead of raising on any mismatch; nothing
/// in the engine panics across this boundary.
pub trait BindTarget {
    /// Assign a value to the field identified by `field`.
    ///
    /// # Returns
    /// * `bool` - true if the value was assigned, false otherwise
    fn set_field(&mut self, field: FieldId, value: FieldValue) -> bool;

    /// Append one element to the collection field identified by `field`.
    ///
    /// Only list-receptor fields accept appends.
    ///
    /// # Returns
    /// * `bool` - true if the element was appended, false otherwise
    fn append_field(&mut self, field: FieldId, value: FieldValue) -> bool;
}

/// A record type that can be compiled into a command profile.
///
/// `field_specs` returns the argument fields in declaration order; a spec's
/// position in that list is its [`FieldId`], and `set_field`/`append_field`
/// must resolve the same ids.
pub trait CommandRecord: BindTarget + Default {
    /// The record's declared identifier, e.g. `"LaundryCommand"`.
    fn declared_name() -> &'static str;

    /// Explicit command name, overriding the declared identifier.
    fn command_name() -> Option<&'static str> {
        None
    }

    /// Documentation text for the command itself.
    fn doc() -> &'static str {
        ""
    }

    /// Declared argument fields, in declaration order.
    fn field_specs() -> Vec<FieldSpec>;
}
