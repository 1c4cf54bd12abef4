//! Duplicate-name resolution.
//!
//! When an entity lands next to others with the same base name it gets a
//! suffix: `Orc #1`, `Goblin A`, or a caller-supplied token. Numeric
//! suffixes treat the bare name as `#0`, so the first duplicate of `Orc`
//! is `Orc #1`; alphabetic and custom progressions start at their first
//! token, so the first duplicate of `Goblin` is `Goblin A`.

/// How duplicate names are suffixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuffixStrategy {
    /// `#1`, `#2`, ... never exhausted.
    Numeric,
    /// `A` through `Z`, then `AA` through `ZZ`.
    Alpha,
    /// A fixed progression of tokens.
    Custom(Vec<String>),
}

impl Default for SuffixStrategy {
    fn default() -> Self {
        Self::Numeric
    }
}

impl SuffixStrategy {
    fn suffix(&self, index: u64) -> Option<String> {
        match self {
            Self::Numeric => Some(format!("#{index}")),
            Self::Alpha => alpha_suffix(index),
            Self::Custom(list) => list.get(usize::try_from(index).ok()?).cloned(),
        }
    }
}

/// A resolved rename: the suffix chosen and the full new name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub suffix: String,
    pub name: String,
    strategy: SuffixStrategy,
}

impl Renamed {
    /// Rename another entity with the chosen suffix, replacing any suffix
    /// it already carries. Used to rename a group of related entities
    /// consistently, e.g. a token and the auras anchored to it.
    pub fn apply(&self, name: &str) -> String {
        let (base, _) = split_suffix(name, &self.strategy);
        format!("{} {}", base, self.suffix)
    }
}

/// Pick a fresh name for `name` against the `existing` names.
///
/// Names sharing a case-insensitive base participate regardless of their
/// suffix; the result is one past the highest suffix index already in use.
/// An unsuffixed name contributes no index (under `Numeric` it counts as
/// `#0`). Returns `None` when no existing name shares the base (no rename
/// needed) or when a finite progression is exhausted.
pub fn rename_duplicate<'a, I>(
    name: &str,
    existing: I,
    strategy: &SuffixStrategy,
) -> Option<Renamed>
where
    I: IntoIterator<Item = &'a str>,
{
    let (base, _) = split_suffix(name, strategy);

    let mut conflict = false;
    let mut max_used: Option<u64> = None;
    for other in existing {
        let (other_base, index) = split_suffix(other, strategy);
        if !other_base.eq_ignore_ascii_case(base) {
            continue;
        }
        conflict = true;
        let index = match index {
            Some(index) => Some(index),
            // a bare name occupies #0, so its first duplicate is #1
            None if matches!(strategy, SuffixStrategy::Numeric) => Some(0),
            None => None,
        };
        if let Some(index) = index {
            max_used = Some(max_used.map_or(index, |m| m.max(index)));
        }
    }
    if !conflict {
        return None;
    }

    let next = max_used.map_or(0, |m| m + 1);
    let suffix = strategy.suffix(next)?;
    Some(Renamed {
        name: format!("{base} {suffix}"),
        suffix,
        strategy: strategy.clone(),
    })
}

/// Split a name into its base and the progression index of its suffix.
/// A name with no recognizable suffix is all base.
fn split_suffix<'a>(name: &'a str, strategy: &SuffixStrategy) -> (&'a str, Option<u64>) {
    let trimmed = name.trim_end();
    let Some((base, token)) = trimmed.rsplit_once(char::is_whitespace) else {
        return (trimmed, None);
    };

    let index = match strategy {
        SuffixStrategy::Numeric => token.strip_prefix('#').and_then(|digits| {
            (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
                .then(|| digits.parse().ok())
                .flatten()
        }),
        SuffixStrategy::Alpha => alpha_index(token),
        SuffixStrategy::Custom(list) => list
            .iter()
            .position(|s| s.eq_ignore_ascii_case(token))
            .map(|p| p as u64),
    };

    match index {
        Some(index) => (base.trim_end(), Some(index)),
        None => (trimmed, None),
    }
}

fn alpha_index(token: &str) -> Option<u64> {
    match token.as_bytes() {
        [a] if a.is_ascii_uppercase() => Some(u64::from(a - b'A')),
        [a, b] if a.is_ascii_uppercase() && b.is_ascii_uppercase() => {
            Some(26 + u64::from(a - b'A') * 26 + u64::from(b - b'A'))
        }
        _ => None,
    }
}

fn alpha_suffix(index: u64) -> Option<String> {
    if index < 26 {
        Some(char::from(b'A' + index as u8).to_string())
    } else if index < 26 + 26 * 26 {
        let n = index - 26;
        let first = char::from(b'A' + (n / 26) as u8);
        let second = char::from(b'A' + (n % 26) as u8);
        Some(format!("{first}{second}"))
    } else {
        None
    }
}
