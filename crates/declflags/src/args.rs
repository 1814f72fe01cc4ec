//! The raw argument vector, as seen by the resolver.
//!
//! Descriptors only ever look at an immutable snapshot (`&[String]`) and
//! report what they would take. Removal happens afterwards, in one step per
//! match, so no pass deletes from a vector it is iterating over.

use std::ops::Range;

use crate::Val;

/// Tokens a descriptor claimed, and the value they produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Found {
    pub(crate) take: Range<usize>,
    pub(crate) val: Val,
}

/// A token that failed its type check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Mismatch {
    pub(crate) token: String,
    pub(crate) ty: crate::Ty,
}

pub(crate) fn take(args: &mut Vec<String>, found: &Found) {
    args.drain(found.take.clone());
}

/// `-` followed by one or more letters, e.g. `-vt`.
///
/// The whole token has to match, so `--verbose`, `a-b` and `-v1` are not
/// bundles.
pub(crate) fn is_switch_bundle(token: &str) -> bool {
    match token.strip_prefix('-') {
        Some(letters) => !letters.is_empty() && letters.chars().all(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}

#[derive(Debug)]
struct Letter {
    token: usize,
    ch: char,
    claimed: bool,
}

/// Every switch letter found in the arguments, in order of appearance.
#[derive(Debug, Default)]
pub(crate) struct Switches {
    letters: Vec<Letter>,
}

impl Switches {
    pub(crate) fn collect(args: &[String]) -> Switches {
        let letters = args
            .iter()
            .enumerate()
            .filter(|(_, arg)| is_switch_bundle(arg))
            .flat_map(|(token, arg)| {
                arg[1..].chars().map(move |ch| Letter { token, ch, claimed: false })
            })
            .collect();
        Switches { letters }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Claims the first unclaimed occurrence of `ch`.
    pub(crate) fn claim(&mut self, ch: char) -> bool {
        match self.letters.iter_mut().find(|it| !it.claimed && it.ch == ch) {
            Some(letter) => {
                letter.claimed = true;
                true
            }
            None => false,
        }
    }

    /// Strips claimed letters out of their bundles.
    ///
    /// A bundle left with no letters is removed, otherwise it is rewritten to
    /// its unclaimed letters (`-vq` with `v` claimed becomes `-q`). Returns the
    /// number of removed tokens.
    pub(crate) fn sweep(&self, args: &mut Vec<String>) -> usize {
        let mut touched = vec![false; args.len()];
        let mut rest = vec![String::new(); args.len()];
        for letter in &self.letters {
            if letter.claimed {
                touched[letter.token] = true;
            } else {
                rest[letter.token].push(letter.ch);
            }
        }

        let before = args.len();
        let mut idx = 0;
        args.retain_mut(|arg| {
            let token = idx;
            idx += 1;
            if !touched[token] {
                return true;
            }
            if rest[token].is_empty() {
                return false;
            }
            *arg = format!("-{}", rest[token]);
            true
        });
        before - args.len()
    }
}
