use core::fmt;

/// An attribute on a start tag token.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
///
/// Names are kept exactly as written (case-sensitive, colon-qualified names
/// stay literal); values are entity-decoded at tokenization time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: String,
    /// "and a value"
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// The token stream produced by the tokenizer.
///
/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "The output of the tokenization step is a series of zero or more of the
/// following tokens: DOCTYPE, start tag, end tag, comment, character."
///
/// Character data is carried as whole runs rather than one token per
/// character; a run covers the maximal stretch of input between two pieces
/// of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A `<!doctype …>` declaration, recognized case-insensitively.
    Doctype {
        /// The doctype name (`html` for the standard doctype), lowercased.
        name: Option<String>,
    },

    /// "Start and end tag tokens have a tag name, a self-closing flag, and a
    /// list of attributes."
    StartTag {
        /// "a tag name" — lowercased; the tree stores it uppercased.
        name: String,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes"
        attributes: Vec<Attribute>,
    },

    /// An end tag. Attributes written on an end tag are dropped during
    /// scanning, so only the name survives.
    EndTag {
        /// "a tag name" — lowercased.
        name: String,
    },

    /// "Comment and character tokens have data."
    Comment {
        /// "data" — everything between `<!--` and `-->`, verbatim.
        data: String,
    },

    /// A run of character data with entities already decoded.
    Text {
        /// "data"
        data: String,
    },
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype { name } => {
                write!(f, "DOCTYPE")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                Ok(())
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => {
                write!(f, "</{name}>")
            }
            Self::Comment { data } => {
                write!(f, "<!--{data}-->")
            }
            Self::Text { data } => {
                write!(f, "Text({data:?})")
            }
        }
    }
}
