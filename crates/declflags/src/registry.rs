use std::cell::OnceCell;

use crate::{
    descriptor::{self, Descriptor, Kind},
    ty, RegistrationError, Result, Val,
};

/// Help commands and the text framing the usage message.
#[derive(Debug, Clone, Default)]
pub struct HelpConfig {
    pub commands: &'static [&'static str],
    pub header: &'static str,
    pub footer: &'static str,
    /// Program name shown at the start of the usage summary.
    pub name: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct PositionalConfig {
    pub name: Option<&'static str>,
    pub ty: Option<&'static str>,
    pub required: bool,
    pub description: &'static str,
    pub hint: Option<&'static str>,
}

#[derive(Debug, Clone, Default)]
pub struct FlagConfig {
    pub name: Option<&'static str>,
    pub commands: &'static [&'static str],
    pub required: bool,
    pub default: Option<Val>,
    pub switch: Option<char>,
    pub description: &'static str,
    pub hint: Option<&'static str>,
    /// Written on activation instead of `true`. Mandatory inside a group.
    pub value: Option<Val>,
}

#[derive(Debug, Clone, Default)]
pub struct ValueConfig {
    pub name: Option<&'static str>,
    pub prefixes: &'static [&'static str],
    pub types: &'static [&'static str],
    pub required: bool,
    pub default: Option<Val>,
    pub description: &'static str,
    pub hint: Option<&'static str>,
}

#[derive(Debug, Clone, Default)]
pub struct GroupConfig {
    pub name: Option<&'static str>,
    pub required: bool,
    pub default: Option<Val>,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionalId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupId(pub(crate) usize);

/// An ordered set of parameter descriptors.
///
/// Descriptors are resolved and rendered in registration order. Children of a
/// group are registered inside [`Registry::group`], which is the only way to
/// open a group, so the open-group slot is never left dangling.
pub struct Registry {
    pub(crate) help: HelpConfig,
    pub(crate) descriptors: Vec<Descriptor>,
    open_group: Option<usize>,
    pub(crate) width: Box<dyn Fn() -> usize>,
    /// Rendered usage, summary and detailed.
    pub(crate) usage: [OnceCell<String>; 2],
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl Registry {
    pub fn new() -> Registry {
        Registry {
            help: HelpConfig::default(),
            descriptors: Vec::new(),
            open_group: None,
            width: Box::new(|| 80),
            usage: Default::default(),
        }
    }

    /// Sets where the usage renderer gets the line width from.
    pub fn with_width(mut self, width: impl Fn() -> usize + 'static) -> Registry {
        self.width = Box::new(width);
        self.changed();
        self
    }

    pub fn help(&mut self, config: HelpConfig) {
        tracing::debug!(commands = ?config.commands, "registered help");
        self.help = config;
        self.changed();
    }

    pub fn positional(&mut self, config: PositionalConfig) -> Result<PositionalId> {
        let ty = config.ty.map(str::parse::<ty::Ty>).transpose()?;
        let idx = self.push(
            "positional",
            config.name,
            config.required,
            None,
            config.description,
            config.hint,
            Kind::Positional(descriptor::Positional { ty }),
        )?;
        Ok(PositionalId(idx))
    }

    pub fn flag(&mut self, config: FlagConfig) -> Result<FlagId> {
        if config.commands.is_empty() {
            return Err(RegistrationError::MissingCommands);
        }
        let value = match (self.open_group, config.value) {
            (Some(_), None) => return Err(RegistrationError::MissingGroupValue),
            (_, Some(value)) => value,
            (None, None) => Val::Bool(true),
        };
        let flag = descriptor::Flag { commands: config.commands, switch: config.switch, value };
        let idx = self.push(
            "flag",
            config.name,
            config.required,
            config.default,
            config.description,
            config.hint,
            Kind::Flag(flag),
        )?;
        Ok(FlagId(idx))
    }

    pub fn value(&mut self, config: ValueConfig) -> Result<ValueId> {
        if config.types.is_empty() {
            return Err(RegistrationError::MissingTypes);
        }
        if config.prefixes.is_empty() {
            return Err(RegistrationError::MissingPrefixes);
        }
        let types = ty::parse_all(config.types)?;
        let value = descriptor::Value { prefixes: config.prefixes, types };
        let idx = self.push(
            "value",
            config.name,
            config.required,
            config.default,
            config.description,
            config.hint,
            Kind::Value(value),
        )?;
        Ok(ValueId(idx))
    }

    /// Registers a group of mutually exclusive options.
    ///
    /// Everything `children` registers belongs to the group. Children have no
    /// name and are never required on their own; flags among them carry the
    /// value the group takes when they match.
    pub fn group<F>(&mut self, config: GroupConfig, children: F) -> Result<GroupId>
    where
        F: FnOnce(&mut Registry) -> Result<()>,
    {
        if self.open_group.is_some() {
            return Err(RegistrationError::NestedGroup);
        }
        let name = config.name.ok_or(RegistrationError::MissingName { kind: "group" })?;
        self.check_unique(name)?;

        let idx = self.descriptors.len();
        self.descriptors.push(Descriptor {
            name: Some(name),
            required: config.required,
            description: config.description,
            hint: None,
            default: config.default,
            group: None,
            kind: Kind::Group(descriptor::Group::default()),
        });
        self.open_group = Some(idx);
        let res = children(self);
        self.open_group = None;

        let registered = res.and_then(|()| match &self.descriptors[idx].kind {
            Kind::Group(group) if group.children.is_empty() => {
                Err(RegistrationError::EmptyGroup { name: name.to_string() })
            }
            _ => Ok(()),
        });
        if let Err(err) = registered {
            self.descriptors.truncate(idx);
            self.changed();
            return Err(err);
        }

        tracing::debug!(name, required = config.required, "registered group");
        self.changed();
        Ok(GroupId(idx))
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        kind_name: &'static str,
        name: Option<&'static str>,
        required: bool,
        default: Option<Val>,
        description: &'static str,
        hint: Option<&'static str>,
        kind: Kind,
    ) -> Result<usize> {
        let idx = self.descriptors.len();
        match self.open_group {
            Some(group) => {
                if name.is_some() || required {
                    return Err(RegistrationError::GroupChildNamed);
                }
                if let Kind::Group(it) = &mut self.descriptors[group].kind {
                    it.children.push(idx);
                }
            }
            None => {
                let name = name.ok_or(RegistrationError::MissingName { kind: kind_name })?;
                self.check_unique(name)?;
            }
        }
        tracing::debug!(kind = kind_name, name = ?name, group = ?self.open_group, "registered option");
        self.descriptors.push(Descriptor {
            name,
            required,
            description,
            hint,
            default,
            group: self.open_group,
            kind,
        });
        self.changed();
        Ok(idx)
    }

    fn check_unique(&self, name: &'static str) -> Result<()> {
        if self.descriptors.iter().any(|it| it.name == Some(name)) {
            return Err(RegistrationError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn changed(&mut self) {
        self.usage = Default::default();
    }

    /// Name errors and results are reported under.
    pub(crate) fn name_of(&self, idx: usize) -> &'static str {
        let descriptor = &self.descriptors[idx];
        match descriptor.group {
            Some(group) => self.name_of(group),
            None => descriptor.name.unwrap_or_default(),
        }
    }
}
