use std::{ffi::OsString, fmt};

use crate::{
    args::{self, Found, Mismatch, Switches},
    descriptor::{Descriptor, Kind},
    Registry, ResolveError, EXIT_INVALID_ARGUMENT,
};

/// A resolved option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Val {
    Bool(bool),
    Text(String),
    /// Values capturing several tokens keep them in order.
    List(Vec<String>),
}

impl From<bool> for Val {
    fn from(it: bool) -> Val {
        Val::Bool(it)
    }
}

impl From<&str> for Val {
    fn from(it: &str) -> Val {
        Val::Text(it.to_string())
    }
}

/// Option names mapped to their values, in registration order.
///
/// Group children have no entry of their own, the group carries the value of
/// whichever child matched.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Options {
    entries: Vec<(&'static str, Option<Val>)>,
}

impl Options {
    pub fn get(&self, name: &str) -> Option<&Val> {
        self.entries.iter().find(|(it, _)| *it == name).and_then(|(_, val)| val.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(it, _)| *it == name)
    }

    /// `true` only for a `Bool(true)` value.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(Val::Bool(true)))
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Val::Text(it) => Some(it),
            _ => None,
        }
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.get(name)? {
            Val::List(it) => Some(it),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&Val>)> + '_ {
        self.entries.iter().map(|(name, val)| (*name, val.as_ref()))
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter().map(|(k, v)| (k, v))).finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub options: Options,
    /// Deduplicated, in the order they were found.
    pub errors: Vec<ResolveError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A help command was among the arguments.
    Help,
    Resolved(Resolution),
}

impl Registry {
    /// Resolves `args` against the registered options.
    ///
    /// Matched tokens are removed from `args`; whatever is left afterwards was
    /// not claimed by any option. Errors do not stop resolution, they are all
    /// collected into the returned [`Resolution`].
    pub fn resolve(&self, args: &mut Vec<String>) -> Outcome {
        if let Some(cmd) = args.iter().find(|arg| self.help.commands.contains(&arg.as_str())) {
            tracing::debug!(%cmd, "help requested");
            return Outcome::Help;
        }

        let mut r = Resolver {
            registry: self,
            args,
            slots: vec![Slot::default(); self.descriptors.len()],
            errors: Vec::new(),
        };
        r.switches();
        r.required_literals();
        r.optional_literals();
        r.required_positionals();
        r.grouped_positionals();
        r.optional_positionals();
        r.incomplete_groups();
        Outcome::Resolved(r.finish())
    }

    /// Resolves `args`, printing usage or errors and exiting when needed.
    pub fn resolve_or_exit(&self, mut args: Vec<String>) -> Options {
        match self.resolve(&mut args) {
            Outcome::Help => {
                println!("{}", self.usage(true));
                std::process::exit(0)
            }
            Outcome::Resolved(Resolution { errors, .. }) if !errors.is_empty() => {
                for err in errors {
                    eprintln!("{err}");
                }
                std::process::exit(EXIT_INVALID_ARGUMENT)
            }
            Outcome::Resolved(res) => res.options,
        }
    }

    pub fn resolve_env_or_exit(&self) -> Options {
        match utf8_args(std::env::args_os().skip(1)) {
            Ok(args) => self.resolve_or_exit(args),
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(EXIT_INVALID_ARGUMENT)
            }
        }
    }
}

/// Arguments are only ever matched as text, a token that is not valid UTF-8
/// is rejected rather than patched up.
pub(crate) fn utf8_args(
    args: impl IntoIterator<Item = OsString>,
) -> Result<Vec<String>, ResolveError> {
    args.into_iter().map(|it| it.into_string().map_err(ResolveError::InvalidUtf8)).collect()
}

#[derive(Debug, Clone, Default)]
struct Slot {
    present: bool,
    value: Option<Val>,
}

struct Resolver<'a> {
    registry: &'a Registry,
    args: &'a mut Vec<String>,
    slots: Vec<Slot>,
    errors: Vec<ResolveError>,
}

impl Resolver<'_> {
    /// Bundled switches go first: `-vt` must not be left around for literal
    /// or positional matching.
    fn switches(&mut self) {
        let mut switches = Switches::collect(self.args.as_slice());
        if switches.is_empty() {
            return;
        }
        let registry = self.registry;
        for (idx, descriptor) in registry.descriptors.iter().enumerate() {
            if let Kind::Flag(flag) = &descriptor.kind {
                if self.slots[idx].present || self.group_taken(idx) {
                    continue;
                }
                if let Some(val) = flag.find_switch(&mut switches) {
                    tracing::trace!(name = registry.name_of(idx), "matched switch");
                    self.set(idx, val);
                }
            }
        }
        let swept = switches.sweep(self.args);
        tracing::debug!(swept, remaining = self.args.len(), "switch pass done");
    }

    fn required_literals(&mut self) {
        for idx in self.indices(|d| d.required && !d.is_positional() && !d.is_group()) {
            if self.slots[idx].present {
                continue;
            }
            match self.find(idx) {
                Ok(true) => (),
                Ok(false) => self.missing(idx),
                Err(mismatch) => self.mismatch(idx, mismatch),
            }
        }
        tracing::debug!(remaining = self.args.len(), "required literal pass done");
    }

    fn optional_literals(&mut self) {
        for idx in self.indices(|d| !d.required && !d.is_positional() && !d.is_group()) {
            if let Err(mismatch) = self.find(idx) {
                self.mismatch(idx, mismatch)
            }
        }
        tracing::debug!(remaining = self.args.len(), "optional literal pass done");
    }

    fn required_positionals(&mut self) {
        for idx in self.indices(|d| d.required && d.is_positional()) {
            match self.find(idx) {
                Ok(true) => (),
                Ok(false) => self.missing(idx),
                Err(mismatch) => self.mismatch(idx, mismatch),
            }
        }
        tracing::debug!(remaining = self.args.len(), "required positional pass done");
    }

    /// Positionals of required groups that no literal satisfied. A miss here
    /// is reported once, by [`Resolver::incomplete_groups`].
    fn grouped_positionals(&mut self) {
        let descriptors = &self.registry.descriptors;
        let grouped = self.indices(|d| {
            d.is_positional() && d.group.map_or(false, |g| descriptors[g].required)
        });
        for idx in grouped {
            let _ = self.find(idx);
        }
        tracing::debug!(remaining = self.args.len(), "grouped positional pass done");
    }

    fn optional_positionals(&mut self) {
        let descriptors = &self.registry.descriptors;
        let optional = self.indices(|d| {
            d.is_positional()
                && !d.required
                && d.group.map_or(true, |g| !descriptors[g].required)
        });
        for idx in optional {
            let _ = self.find(idx);
        }
        tracing::debug!(remaining = self.args.len(), "optional positional pass done");
    }

    fn incomplete_groups(&mut self) {
        for idx in self.indices(|d| d.required && d.is_group()) {
            if self.slots[idx].value.is_none() {
                self.missing(idx);
            }
        }
    }

    fn finish(self) -> Resolution {
        let mut errors: Vec<ResolveError> = Vec::with_capacity(self.errors.len());
        for err in self.errors {
            if !errors.contains(&err) {
                errors.push(err);
            }
        }

        let mut entries = Vec::new();
        for (idx, descriptor) in self.registry.descriptors.iter().enumerate() {
            if descriptor.group.is_some() {
                continue;
            }
            let value = self.slots[idx].value.clone().or_else(|| descriptor.default.clone());
            let value = match (&descriptor.kind, value) {
                (Kind::Flag(_), None) => Some(Val::Bool(false)),
                (_, value) => value,
            };
            entries.push((self.registry.name_of(idx), value));
        }

        tracing::debug!(errors = errors.len(), unclaimed = self.args.len(), "resolved");
        Resolution { options: Options { entries }, errors }
    }

    fn indices(&self, pred: impl Fn(&Descriptor) -> bool) -> Vec<usize> {
        let descriptors = self.registry.descriptors.iter().enumerate();
        descriptors.filter(|(_, d)| pred(d)).map(|(idx, _)| idx).collect()
    }

    /// Whether a sibling already decided this option's group.
    fn group_taken(&self, idx: usize) -> bool {
        match self.registry.descriptors[idx].group {
            Some(group) => self.slots[group].value.is_some(),
            None => false,
        }
    }

    fn find(&mut self, idx: usize) -> Result<bool, Mismatch> {
        if self.group_taken(idx) {
            return Ok(false);
        }
        let registry = self.registry;
        let args = self.args.as_slice();
        let found = match &registry.descriptors[idx].kind {
            Kind::Positional(positional) => positional.find(args)?,
            Kind::Flag(flag) => flag.find(args),
            Kind::Value(value) => value.find(args)?,
            Kind::Group(_) => None,
        };
        match found {
            Some(found) => {
                self.take(idx, found);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn take(&mut self, idx: usize, found: Found) {
        tracing::trace!(
            name = self.registry.name_of(idx),
            tokens = ?&self.args[found.take.clone()],
            "matched"
        );
        args::take(self.args, &found);
        self.set(idx, found.val);
    }

    fn set(&mut self, idx: usize, val: Val) {
        self.slots[idx].present = true;
        let slot = match self.registry.descriptors[idx].group {
            Some(group) => {
                self.slots[group].present = true;
                group
            }
            None => idx,
        };
        self.slots[slot].value = Some(val);
    }

    fn missing(&mut self, idx: usize) {
        let name = self.registry.name_of(idx).to_string();
        self.errors.push(ResolveError::MissingRequired { name });
    }

    fn mismatch(&mut self, idx: usize, mismatch: Mismatch) {
        let name = self.registry.name_of(idx).to_string();
        let Mismatch { token, ty } = mismatch;
        self.errors.push(ResolveError::TypeMismatch { name, token, ty });
    }
}
