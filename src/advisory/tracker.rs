use std::collections::HashMap;
use std::fmt;

/// Display slot an advisory reply lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdviceKind {
    SetupReview,
    Psychology,
    JournalInsight,
}

impl fmt::Display for AdviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdviceKind::SetupReview => write!(f, "Coach Feedback"),
            AdviceKind::Psychology => write!(f, "Mindset Check"),
            AdviceKind::JournalInsight => write!(f, "Journal Insight"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub kind: AdviceKind,
    pub seq: u64,
}

/// Latest-request-wins guard: a reply is shown only if no newer request of
/// the same kind was issued after it.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next_seq: u64,
    latest: HashMap<AdviceKind, u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, kind: AdviceKind) -> RequestTicket {
        self.next_seq += 1;
        self.latest.insert(kind, self.next_seq);
        RequestTicket {
            kind,
            seq: self.next_seq,
        }
    }

    /// True for the newest ticket of its kind; the slot is then cleared so a
    /// duplicate delivery is rejected.
    pub fn accept(&mut self, ticket: RequestTicket) -> bool {
        if self.latest.get(&ticket.kind) == Some(&ticket.seq) {
            self.latest.remove(&ticket.kind);
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self, kind: AdviceKind) -> bool {
        self.latest.contains_key(&kind)
    }
}
