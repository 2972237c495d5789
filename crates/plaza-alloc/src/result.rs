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

use crate::stats::EngineStatistics;
use plaza_model::allocation::Allocation;
use plaza_search::result::{SearchResult, TerminationReason};
use std::collections::BTreeSet;

/// Result of one `AllocationEngine::allocate` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome {
    result: SearchResult,
    termination_reason: TerminationReason,
    statistics: EngineStatistics,
}

impl AllocationOutcome {
    #[inline]
    pub fn found(allocation: Allocation, statistics: EngineStatistics) -> Self {
        Self {
            result: SearchResult::Safe(allocation),
            termination_reason: TerminationReason::SolutionFound,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: EngineStatistics) -> Self {
        Self {
            result: SearchResult::NoSafeAllocation,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(reason: R, statistics: EngineStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            result: SearchResult::Unknown,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    #[inline]
    pub fn result(&self) -> &SearchResult {
        &self.result
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn statistics(&self) -> &EngineStatistics {
        &self.statistics
    }

    #[inline]
    pub fn into_parts(self) -> (SearchResult, TerminationReason, EngineStatistics) {
        (self.result, self.termination_reason, self.statistics)
    }
}

/// Result of one `AllocationEngine::allocate_all` run.
///
/// An aborted run carries the allocations found before it stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationOutcome {
    allocations: BTreeSet<Allocation>,
    termination_reason: TerminationReason,
    statistics: EngineStatistics,
}

impl EnumerationOutcome {
    /// Builds the outcome of a run that explored the whole tree.
    #[inline]
    pub fn exhausted(allocations: BTreeSet<Allocation>, statistics: EngineStatistics) -> Self {
        let termination_reason = if allocations.is_empty() {
            TerminationReason::InfeasibilityProven
        } else {
            TerminationReason::SearchExhausted
        };
        Self {
            allocations,
            termination_reason,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(
        allocations: BTreeSet<Allocation>,
        reason: R,
        statistics: EngineStatistics,
    ) -> Self
    where
        R: Into<String>,
    {
        Self {
            allocations,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    #[inline]
    pub fn allocations(&self) -> &BTreeSet<Allocation> {
        &self.allocations
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn statistics(&self) -> &EngineStatistics {
        &self.statistics
    }

    /// Returns `true` if `allocations` holds every safe allocation.
    #[inline]
    pub fn is_complete(&self) -> bool {
        !self.termination_reason.is_aborted()
    }

    #[inline]
    pub fn into_parts(self) -> (BTreeSet<Allocation>, TerminationReason, EngineStatistics) {
        (self.allocations, self.termination_reason, self.statistics)
    }
}
