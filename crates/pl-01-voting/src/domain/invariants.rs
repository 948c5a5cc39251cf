//! # Domain Invariants
//!
//! Business rules checked before any write is staged.

use super::entities::Poll;
use super::errors::{UnixTimestamp, VotingError};
use super::value_objects::{Identity, PollPhase};

/// Invariant: a poll window is non-empty.
///
/// `start_time` must be strictly less than `end_time`.
pub fn invariant_time_range(
    start_time: UnixTimestamp,
    end_time: UnixTimestamp,
) -> Result<(), VotingError> {
    if start_time >= end_time {
        return Err(VotingError::InvalidTimeRange {
            start_time,
            end_time,
        });
    }
    Ok(())
}

/// Invariant: poll descriptions are bounded.
pub fn invariant_description_len(description: &str, max: usize) -> Result<(), VotingError> {
    if description.len() > max {
        return Err(VotingError::DescriptionTooLong {
            len: description.len(),
            max,
        });
    }
    Ok(())
}

/// Invariant: candidate names are bounded.
pub fn invariant_candidate_name_len(name: &str, max: usize) -> Result<(), VotingError> {
    if name.len() > max {
        return Err(VotingError::CandidateNameTooLong {
            len: name.len(),
            max,
        });
    }
    Ok(())
}

/// Invariant: only the poll admin adds candidates.
pub fn invariant_poll_admin(poll: &Poll, requester: &Identity) -> Result<(), VotingError> {
    if !poll.is_admin(requester) {
        return Err(VotingError::Unauthorized);
    }
    Ok(())
}

/// Invariant: votes land inside `[start_time, end_time)`.
pub fn invariant_poll_active(poll: &Poll, now: UnixTimestamp) -> Result<(), VotingError> {
    match poll.phase_at(now) {
        PollPhase::Pending => Err(VotingError::PollNotStarted),
        PollPhase::Closed => Err(VotingError::PollEnded),
        PollPhase::Active => Ok(()),
    }
}
