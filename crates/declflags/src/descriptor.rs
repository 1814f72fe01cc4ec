use crate::{
    args::{Found, Mismatch, Switches},
    ty::{self, Ty},
    Val,
};

/// One registered parameter.
///
/// Fields common to every kind live here, the kind-specific matching rules
/// live in [`Kind`].
#[derive(Debug)]
pub(crate) struct Descriptor {
    /// `None` for group children, which report under the group's name.
    pub(crate) name: Option<&'static str>,
    pub(crate) required: bool,
    pub(crate) description: &'static str,
    pub(crate) hint: Option<&'static str>,
    pub(crate) default: Option<Val>,
    /// Index of the owning group in the registry.
    pub(crate) group: Option<usize>,
    pub(crate) kind: Kind,
}

#[derive(Debug)]
pub(crate) enum Kind {
    Positional(Positional),
    Flag(Flag),
    Value(Value),
    Group(Group),
}

#[derive(Debug)]
pub(crate) struct Positional {
    pub(crate) ty: Option<Ty>,
}

#[derive(Debug)]
pub(crate) struct Flag {
    pub(crate) commands: &'static [&'static str],
    pub(crate) switch: Option<char>,
    /// What activation writes: `true`, or the fixed value of a group child.
    pub(crate) value: Val,
}

#[derive(Debug)]
pub(crate) struct Value {
    pub(crate) prefixes: &'static [&'static str],
    pub(crate) types: Vec<Ty>,
}

#[derive(Debug, Default)]
pub(crate) struct Group {
    pub(crate) children: Vec<usize>,
}

impl Positional {
    /// The first token of the right type, or the very first token when
    /// untyped.
    pub(crate) fn find(&self, args: &[String]) -> Result<Option<Found>, Mismatch> {
        let first = match args.first() {
            Some(it) => it,
            None => return Ok(None),
        };
        match args.iter().position(|arg| ty::is_type(arg, self.ty)) {
            Some(i) => Ok(Some(Found { take: i..i + 1, val: Val::Text(args[i].clone()) })),
            None => Err(Mismatch {
                token: first.clone(),
                ty: self.ty.unwrap_or(Ty::String),
            }),
        }
    }
}

impl Flag {
    pub(crate) fn find(&self, args: &[String]) -> Option<Found> {
        let i = args.iter().position(|arg| self.commands.contains(&arg.as_str()))?;
        Some(Found { take: i..i + 1, val: self.value.clone() })
    }

    pub(crate) fn find_switch(&self, switches: &mut Switches) -> Option<Val> {
        let switch = self.switch?;
        if switches.claim(switch) {
            Some(self.value.clone())
        } else {
            None
        }
    }
}

impl Value {
    /// A prefix followed by one token per type.
    ///
    /// A prefix too close to the end of the input to carry all its tokens is
    /// not a match.
    pub(crate) fn find(&self, args: &[String]) -> Result<Option<Found>, Mismatch> {
        let arity = self.types.len();
        for (i, arg) in args.iter().enumerate() {
            if !self.prefixes.contains(&arg.as_str()) || i + arity >= args.len() {
                continue;
            }
            let captured = &args[i + 1..=i + arity];
            for (token, &ty) in captured.iter().zip(&self.types) {
                if !ty.accepts(token) {
                    return Err(Mismatch { token: token.clone(), ty });
                }
            }
            let val = match captured {
                [single] => Val::Text(single.clone()),
                _ => Val::List(captured.to_vec()),
            };
            return Ok(Some(Found { take: i..i + 1 + arity, val }));
        }
        Ok(None)
    }

    fn prefix_form(&self) -> String {
        match self.prefixes {
            [single] => single.to_string(),
            many => format!("{{{}}}", many.join("|")),
        }
    }
}

impl Descriptor {
    /// Hint rendered between angle brackets.
    fn hint(&self) -> String {
        if let Some(hint) = self.hint {
            return hint.to_string();
        }
        match &self.kind {
            Kind::Value(value) => {
                value.types.iter().map(|it| it.name()).collect::<Vec<_>>().join("> <")
            }
            Kind::Positional(positional) => match (self.name, positional.ty) {
                (Some(name), _) => name.to_string(),
                (None, Some(ty)) => ty.name().to_string(),
                (None, None) => "arg".to_string(),
            },
            Kind::Flag(_) | Kind::Group(_) => self.name.unwrap_or_default().to_string(),
        }
    }

    /// How the descriptor shows up in the usage summary, without brackets.
    pub(crate) fn summary(&self) -> String {
        match &self.kind {
            Kind::Positional(_) => format!("<{}>", self.hint()),
            Kind::Flag(flag) => {
                let switch = flag.switch.map(|it| format!("-{it}|")).unwrap_or_default();
                format!("{switch}{}", flag.commands.join("|"))
            }
            Kind::Value(value) => format!("{} <{}>", value.prefix_form(), self.hint()),
            Kind::Group(_) => self.name.unwrap_or_default().to_string(),
        }
    }

    /// Left column of the detailed usage table, flags and values only.
    pub(crate) fn literal_form(&self) -> Option<String> {
        match &self.kind {
            Kind::Flag(flag) => {
                let switch = flag.switch.map(|it| format!("-{it}, ")).unwrap_or_default();
                Some(format!("{switch}{}", flag.commands.join(", ")))
            }
            Kind::Value(value) => {
                Some(format!("{} <{}>", value.prefixes.join(", "), self.hint()))
            }
            Kind::Positional(_) | Kind::Group(_) => None,
        }
    }

    pub(crate) fn is_positional(&self) -> bool {
        matches!(self.kind, Kind::Positional(_))
    }

    pub(crate) fn is_group(&self) -> bool {
        matches!(self.kind, Kind::Group(_))
    }
}
