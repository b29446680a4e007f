use std::fmt;

/// Which reply a recognized command asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    All,
    Feed,
    Deadline,
    Gcf,
    Indie,
    Renewables,
}

/// Every accepted comment body. Matching is exact and case-sensitive.
pub const COMMANDS: &[(&str, ReplyKind)] = &[
    ("!climateclock all", ReplyKind::All),
    ("!climateclock feed", ReplyKind::Feed),
    ("!climateclock newsfeed", ReplyKind::Feed),
    ("!climateclock news", ReplyKind::Feed),
    ("!climateclock", ReplyKind::Deadline),
    ("!climateclock deadline", ReplyKind::Deadline),
    ("!climateclock gcf", ReplyKind::Gcf),
    ("!climateclock green climate fund", ReplyKind::Gcf),
    ("!climateclock climate fund", ReplyKind::Gcf),
    ("!climateclock indigenous", ReplyKind::Indie),
    ("!climateclock indie", ReplyKind::Indie),
    ("!climateclock renewables", ReplyKind::Renewables),
    ("!climateclock renewable", ReplyKind::Renewables),
];

impl ReplyKind {
    pub fn from_command(body: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|(command, _)| *command == body)
            .map(|(_, kind)| *kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyKind::All => "all",
            ReplyKind::Feed => "feed",
            ReplyKind::Deadline => "deadline",
            ReplyKind::Gcf => "gcf",
            ReplyKind::Indie => "indie",
            ReplyKind::Renewables => "renewables",
        }
    }
}

impl fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
