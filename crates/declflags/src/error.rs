use std::ffi::OsString;

use thiserror::Error;

use crate::ty::Ty;

/// Mistakes in wiring up the command line surface.
///
/// These are programmer errors: the registry that produced one should not be
/// used to resolve anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("A {kind} option needs a name")]
    MissingName { kind: &'static str },

    #[error("An options flag needs a commands list")]
    MissingCommands,

    #[error("A value option needs a prefix. Otherwise, use a positional option")]
    MissingPrefixes,

    #[error("A value option needs a type list")]
    MissingTypes,

    #[error("A group option needs a value")]
    MissingGroupValue,

    #[error("Child options of a group can't have a name or required field")]
    GroupChildNamed,

    #[error("Nested group options are not supported")]
    NestedGroup,

    #[error("A group option needs a list of options: `{name}`")]
    EmptyGroup { name: String },

    #[error("Unknown option type: `{0}`")]
    UnknownType(String),

    #[error("Option registered more than once: `{0}`")]
    DuplicateName(String),
}

/// A problem with the arguments the user passed.
///
/// These are collected by [`Registry::resolve`](crate::Registry::resolve)
/// rather than returned early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Invalid {name} argument `{token}`: expected a {ty}")]
    TypeMismatch { name: String, token: String, ty: Ty },

    #[error("A {name} argument is required")]
    MissingRequired { name: String },

    #[error("Invalid argument, invalid utf8: {0:?}")]
    InvalidUtf8(OsString),
}
