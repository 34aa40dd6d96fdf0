use std::fmt;

/// Output of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Element {
    /// Renders nothing.
    #[default]
    Empty,
    /// A run of text.
    Text(String),
    /// Children rendered in order.
    Group(Vec<Element>),
}

impl Element {
    /// Text element.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Group of `children`, skipping empty ones.
    pub fn group(children: impl IntoIterator<Item = Self>) -> Self {
        Self::Group(children.into_iter().filter(|c| !c.is_empty()).collect())
    }

    /// Whether the element renders nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(_) => false,
            Self::Group(children) => children.iter().all(Self::is_empty),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Group(children) => {
                let mut first = true;
                for child in children.iter().filter(|c| !c.is_empty()) {
                    if !first {
                        writeln!(f)?;
                    }
                    write!(f, "{child}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}
