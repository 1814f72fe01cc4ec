//! Declarative command line arguments resolver.
//!
//! Options are registered up front into a [`Registry`], which then resolves
//! argument vectors against them and renders usage text:
//!
//! ```
//! use declflags::{FlagConfig, HelpConfig, Outcome, PositionalConfig, Registry};
//!
//! let mut registry = Registry::new();
//! registry.help(HelpConfig { commands: &["--help", "-h"], name: "blossom", ..Default::default() });
//! registry.positional(PositionalConfig {
//!     name: Some("program_file"),
//!     ty: Some("FILE"),
//!     required: true,
//!     ..Default::default()
//! })?;
//! registry.flag(FlagConfig {
//!     name: Some("verbose"),
//!     commands: &["--verbose"],
//!     switch: Some('v'),
//!     ..Default::default()
//! })?;
//!
//! let mut args = vec!["-v".to_string(), "run.blsm".to_string()];
//! match registry.resolve(&mut args) {
//!     Outcome::Resolved(res) => {
//!         assert!(res.errors.is_empty());
//!         assert!(res.options.flag("verbose"));
//!         assert_eq!(res.options.text("program_file"), Some("run.blsm"));
//!     }
//!     Outcome::Help => unreachable!(),
//! }
//! assert!(args.is_empty());
//! # Ok::<(), declflags::RegistrationError>(())
//! ```
//!
//! Resolution runs a fixed sequence of passes: bundled switches, required
//! flags and values, optional ones, required positionals, positionals of
//! required groups, and finally optional positionals. Each pass removes the
//! tokens it claims, so later passes only see what is left.

mod args;
mod descriptor;
mod error;
mod registry;
mod resolve;
mod ty;
mod usage;

pub use crate::{
    error::{RegistrationError, ResolveError},
    registry::{
        FlagConfig, FlagId, GroupConfig, GroupId, HelpConfig, PositionalConfig, PositionalId,
        Registry, ValueConfig, ValueId,
    },
    resolve::{Options, Outcome, Resolution, Val},
    ty::{is_type, Ty},
};

pub type Result<T, E = RegistrationError> = std::result::Result<T, E>;

/// Exit code for arguments that failed to resolve, `EINVAL`.
pub const EXIT_INVALID_ARGUMENT: i32 = 22;
