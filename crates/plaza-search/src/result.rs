// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::stats::SolverStatistics;
use plaza_model::allocation::Allocation;
use std::collections::BTreeSet;

/// The answer to "is there a safe allocation?".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchResult {
    /// A safe allocation of every event.
    Safe(Allocation),
    /// The search space was exhausted without finding a safe allocation.
    NoSafeAllocation,
    /// The search stopped before finding a safe allocation and before
    /// exhausting the search space.
    Unknown,
}

impl SearchResult {
    /// Returns `true` if this result carries a safe allocation.
    #[inline]
    pub fn is_safe(&self) -> bool {
        matches!(self, SearchResult::Safe(_))
    }

    /// Returns `true` if no safe allocation exists.
    #[inline]
    pub fn is_no_safe_allocation(&self) -> bool {
        matches!(self, SearchResult::NoSafeAllocation)
    }

    /// Returns `true` if the search was inconclusive.
    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self, SearchResult::Unknown)
    }

    /// Returns the allocation, if any.
    #[inline]
    pub fn allocation(&self) -> Option<&Allocation> {
        match self {
            SearchResult::Safe(allocation) => Some(allocation),
            _ => None,
        }
    }

    /// Consumes the result and returns the allocation, if any.
    #[inline]
    pub fn into_allocation(self) -> Option<Allocation> {
        match self {
            SearchResult::Safe(allocation) => Some(allocation),
            _ => None,
        }
    }
}

impl std::fmt::Display for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchResult::Safe(allocation) => {
                write!(f, "Safe(events={})", allocation.num_events())
            }
            SearchResult::NoSafeAllocation => write!(f, "NoSafeAllocation"),
            SearchResult::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Why a search stopped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// A safe allocation was found and the search stopped on it.
    SolutionFound,
    /// The whole search space was enumerated and at least one safe
    /// allocation was found.
    SearchExhausted,
    /// The whole search space was enumerated without a safe allocation.
    InfeasibilityProven,
    /// The search was stopped by a monitor (time limit, solution limit,
    /// interrupt). The string describes why.
    Aborted(String),
}

impl TerminationReason {
    /// Returns `true` if the search was cut short by a monitor.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self, TerminationReason::Aborted(_))
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::SolutionFound => write!(f, "Solution Found"),
            TerminationReason::SearchExhausted => write!(f, "Search Exhausted"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// The outcome of searching for a single safe allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome {
    pub result: SearchResult,
    pub reason: TerminationReason,
    pub statistics: SolverStatistics,
}

impl SolverOutcome {
    #[inline]
    pub fn new(result: SearchResult, reason: TerminationReason, statistics: SolverStatistics) -> Self {
        Self {
            result,
            reason,
            statistics,
        }
    }

    #[inline]
    pub fn has_allocation(&self) -> bool {
        self.result.is_safe()
    }
}

impl std::fmt::Display for SolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        writeln!(f, "Termination: {}", self.reason)?;
        write!(f, "{}", self.statistics)
    }
}

/// The outcome of enumerating safe allocations.
///
/// When `reason` is `Aborted`, `allocations` holds the allocations found
/// before the search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverEnumerationOutcome {
    pub allocations: BTreeSet<Allocation>,
    pub reason: TerminationReason,
    pub statistics: SolverStatistics,
}

impl SolverEnumerationOutcome {
    #[inline]
    pub fn new(
        allocations: BTreeSet<Allocation>,
        reason: TerminationReason,
        statistics: SolverStatistics,
    ) -> Self {
        Self {
            allocations,
            reason,
            statistics,
        }
    }

    /// Returns `true` if every safe allocation is in `allocations`.
    #[inline]
    pub fn is_complete(&self) -> bool {
        !self.reason.is_aborted()
    }
}

impl std::fmt::Display for SolverEnumerationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Allocations: {}", self.allocations.len())?;
        writeln!(f, "Termination: {}", self.reason)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_model::index::VenueIndex;

    #[test]
    fn test_search_result_accessors() {
        let allocation = Allocation::new(vec![VenueIndex::new(1)]);
        let safe = SearchResult::Safe(allocation.clone());
        assert!(safe.is_safe());
        assert_eq!(safe.allocation(), Some(&allocation));
        assert_eq!(safe.clone().into_allocation(), Some(allocation));
        assert_eq!(format!("{}", safe), "Safe(events=1)");

        assert!(SearchResult::NoSafeAllocation.is_no_safe_allocation());
        assert!(SearchResult::NoSafeAllocation.allocation().is_none());
        assert!(SearchResult::Unknown.is_unknown());
        assert_eq!(SearchResult::Unknown.into_allocation(), None);
    }

    #[test]
    fn test_termination_reason_display() {
        assert_eq!(TerminationReason::SolutionFound.to_string(), "Solution Found");
        assert_eq!(
            TerminationReason::InfeasibilityProven.to_string(),
            "Infeasibility Proven"
        );
        assert_eq!(
            TerminationReason::Aborted("time limit reached".to_string()).to_string(),
            "Aborted: time limit reached"
        );
        assert!(TerminationReason::Aborted(String::new()).is_aborted());
        assert!(!TerminationReason::SearchExhausted.is_aborted());
    }

    #[test]
    fn test_enumeration_outcome_completeness() {
        let complete = SolverEnumerationOutcome::new(
            BTreeSet::new(),
            TerminationReason::InfeasibilityProven,
            SolverStatistics::default(),
        );
        assert!(complete.is_complete());

        let partial = SolverEnumerationOutcome::new(
            BTreeSet::new(),
            TerminationReason::Aborted("interrupted".to_string()),
            SolverStatistics::default(),
        );
        assert!(!partial.is_complete());
    }

    #[test]
    fn test_outcome_display_lists_result_and_reason() {
        let outcome = SolverOutcome::new(
            SearchResult::NoSafeAllocation,
            TerminationReason::InfeasibilityProven,
            SolverStatistics::default(),
        );
        let rendered = outcome.to_string();
        assert!(rendered.starts_with("Result: NoSafeAllocation\nTermination: Infeasibility Proven\n"));
        assert!(!outcome.has_allocation());
    }
}
