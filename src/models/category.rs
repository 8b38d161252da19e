/// Closed set of expense categories shared by the whole household.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Healthcare,
    Education,
    Shopping,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }

    /// Parse a stored cell value. Anything unrecognized or empty falls
    /// back to `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "food" => Self::Food,
            "transport" => Self::Transport,
            "entertainment" => Self::Entertainment,
            "utilities" => Self::Utilities,
            "healthcare" => Self::Healthcare,
            "education" => Self::Education,
            "shopping" => Self::Shopping,
            _ => Self::Other,
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Entertainment,
            Self::Utilities,
            Self::Healthcare,
            Self::Education,
            Self::Shopping,
            Self::Other,
        ]
    }

    /// `true` only for exact canonical names. Input validation wants the
    /// strict check; `parse` is the forgiving read-side one.
    pub fn is_known(s: &str) -> bool {
        Self::all().iter().any(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
