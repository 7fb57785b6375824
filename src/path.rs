use std::path::{Path, PathBuf};

/// Ordered directory prefixes searched for external commands.
///
/// Order is lookup order and duplicates are kept. The table is only ever
/// replaced as a whole, by the `path` builtin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTable {
    prefixes: Vec<String>,
}

impl PathTable {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Replace every prefix with `prefixes`, in the order given.
    pub fn replace<I, S>(&mut self, prefixes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self = Self::new(prefixes);
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Every location `name` would be looked up at, in search order.
    pub fn candidates<'a>(&'a self, name: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        self.prefixes
            .iter()
            .map(move |prefix| Path::new(prefix).join(name))
    }
}
