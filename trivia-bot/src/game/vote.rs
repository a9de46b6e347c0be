//! Vote-to-skip bookkeeping for the current question.

/// Distinct votes needed to skip a question.
pub const VOTES_TO_SKIP: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    AlreadyVoted,
    /// Vote counted; this many more are needed.
    Counted { remaining: usize },
    /// Quorum reached. Votes have been reset.
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct VoteState {
    voters: Vec<String>,
}

impl VoteState {
    pub fn count(&self) -> usize {
        self.voters.len()
    }

    pub fn reset(&mut self) {
        self.voters.clear();
    }

    pub fn cast(&mut self, voter: &str) -> VoteOutcome {
        if self.voters.iter().any(|v| v == voter) {
            return VoteOutcome::AlreadyVoted;
        }
        if self.voters.len() + 1 < VOTES_TO_SKIP {
            self.voters.push(voter.to_string());
            return VoteOutcome::Counted {
                remaining: VOTES_TO_SKIP - self.voters.len(),
            };
        }
        self.reset();
        VoteOutcome::Skip
    }
}
