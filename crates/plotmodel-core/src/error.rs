use std::{collections::BTreeMap, fmt};

///
/// ErrorTree
///
/// Route-keyed accumulator for declaration problems.
/// Lets a schema build report every bad name or default at once instead of
/// stopping at the first.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    /// Record a message at the root of this tree.
    pub fn add(&mut self, message: impl fmt::Display) {
        self.messages.push(message.to_string());
    }

    /// Record a message under a child route.
    pub fn add_for(&mut self, route: impl Into<String>, message: impl fmt::Display) {
        self.children
            .entry(route.into())
            .or_default()
            .add(message);
    }

    /// Record the error side of a result, if any.
    pub fn add_result<E: fmt::Display>(&mut self, result: Result<(), E>) {
        if let Err(e) = result {
            self.add(e);
        }
    }

    /// Merge another tree under a child route.
    pub fn merge_for(&mut self, route: impl Into<String>, other: Self) {
        if other.is_empty() {
            return;
        }

        let child = self.children.entry(route.into()).or_default();
        child.messages.extend(other.messages);
        for (key, tree) in other.children {
            child.merge_for(key, tree);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    /// Total number of messages in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// Flatten into `(route, message)` pairs, depth-first, routes dot-joined.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);

        out
    }

    fn flatten_into(&self, route: &str, out: &mut Vec<(String, String)>) {
        for msg in &self.messages {
            out.push((route.to_string(), msg.clone()));
        }
        for (key, child) in &self.children {
            let next = if route.is_empty() {
                key.clone()
            } else {
                format!("{route}.{key}")
            };
            child.flatten_into(&next, out);
        }
    }

    /// `Ok(())` when empty, otherwise the tree itself.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (route, msg)) in self.flatten().into_iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            if route.is_empty() {
                write!(f, "{msg}")?;
            } else {
                write!(f, "{route}: {msg}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

/// Push a formatted message onto an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

///
/// ErrorClass
/// Stable error taxonomy for callers that branch on failure category.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Conflict,
    Declaration,
    NotFound,
    Restore,
    Serialize,
    Validation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Conflict => "conflict",
            Self::Declaration => "declaration",
            Self::NotFound => "not_found",
            Self::Restore => "restore",
            Self::Serialize => "serialize",
            Self::Validation => "validation",
        };
        write!(f, "{label}")
    }
}
