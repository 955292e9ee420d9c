//! Git data structures

/// What `HEAD` points at in a checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadRef {
    /// Checked out on a named branch
    Branch(String),
    /// Detached HEAD (`rev-parse --abbrev-ref HEAD` printed `HEAD`)
    Detached,
}

impl HeadRef {
    /// Branch name, if any
    pub fn branch(&self) -> Option<&str> {
        match self {
            HeadRef::Branch(name) => Some(name),
            HeadRef::Detached => None,
        }
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, HeadRef::Detached)
    }

    /// Name as git prints it
    pub fn as_str(&self) -> &str {
        match self {
            HeadRef::Branch(name) => name,
            HeadRef::Detached => "HEAD",
        }
    }
}

/// Git commit identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId {
    hash: String,
}

impl CommitId {
    /// Create a new CommitId
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the full commit hash
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hash)
    }
}

impl From<String> for CommitId {
    fn from(hash: String) -> Self {
        Self::new(hash)
    }
}
