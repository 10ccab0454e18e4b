use std::fmt;

/// Parsed shape of a monkeyId string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonkeyId {
    /// `*`
    Wildcard,
    /// `#n`
    Ordinal(usize),
    /// `base(n)` with n >= 2
    Suffixed { base: String, ordinal: usize },
    /// Anything else, used verbatim
    Plain(String),
}

impl MonkeyId {
    pub fn parse(raw: &str) -> Self {
        if raw == "*" {
            return MonkeyId::Wildcard;
        }

        if let Some(n) = raw.strip_prefix('#').and_then(|n| n.parse::<usize>().ok()) {
            if n >= 1 {
                return MonkeyId::Ordinal(n);
            }
        }

        if let Some(stripped) = raw.strip_suffix(')') {
            if let Some(open) = stripped.rfind('(') {
                let base = &stripped[..open];
                let digits = &stripped[open + 1..];
                if !base.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                    if let Ok(ordinal) = digits.parse::<usize>() {
                        if ordinal >= 2 {
                            return MonkeyId::Suffixed {
                                base: base.to_string(),
                                ordinal,
                            };
                        }
                    }
                }
            }
        }

        MonkeyId::Plain(raw.to_string())
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, MonkeyId::Wildcard)
    }
}

impl fmt::Display for MonkeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonkeyId::Wildcard => write!(f, "*"),
            MonkeyId::Ordinal(n) => write!(f, "#{}", n),
            MonkeyId::Suffixed { base, ordinal } => write!(f, "{}({})", base, ordinal),
            MonkeyId::Plain(s) => write!(f, "{}", s),
        }
    }
}
