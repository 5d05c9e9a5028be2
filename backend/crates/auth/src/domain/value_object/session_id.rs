use kernel::id::{Id, markers};

pub type SessionId = Id<markers::Session>;
