use std::{fmt, str::FromStr};

use crate::RegistrationError;

/// Semantic type of a captured token.
///
/// The check is purely syntactic, nothing here touches the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ty {
    File,
    Dir,
    Path,
    String,
}

impl Ty {
    pub fn name(self) -> &'static str {
        match self {
            Ty::File => "FILE",
            Ty::Dir => "DIR",
            Ty::Path => "PATH",
            Ty::String => "STRING",
        }
    }

    pub fn accepts(self, token: &str) -> bool {
        match self {
            Ty::File => is_path_like(token) && has_extension(token),
            Ty::Dir | Ty::Path => is_path_like(token),
            Ty::String => !token.is_empty(),
        }
    }
}

/// An untyped slot accepts anything.
pub fn is_type(token: &str, ty: Option<Ty>) -> bool {
    ty.map_or(true, |ty| ty.accepts(token))
}

fn is_path_like(token: &str) -> bool {
    !token.is_empty() && !token.starts_with('-') && !token.chars().any(char::is_control)
}

fn has_extension(token: &str) -> bool {
    let file_name = token.rsplit(['/', '\\']).next().unwrap_or(token);
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => !stem.is_empty() && !ext.is_empty(),
        None => false,
    }
}

impl FromStr for Ty {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Ty, RegistrationError> {
        let res = match s {
            "FILE" => Ty::File,
            "DIR" => Ty::Dir,
            "PATH" => Ty::Path,
            "STRING" => Ty::String,
            _ => return Err(RegistrationError::UnknownType(s.to_string())),
        };
        Ok(res)
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) fn parse_all(names: &[&str]) -> Result<Vec<Ty>, RegistrationError> {
    names.iter().map(|it| it.parse()).collect()
}
