// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pawhaven_domain::{HealthStatus, PassingInfo};

/// A command represents caretaker or system intent as data only.
///
/// Commands are the only way to request lifecycle transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Open a new adoption evaluation for a (dog, adoptee) pair.
    OpenAdoption {
        /// Free-text caretaker notes for the new process.
        notes: String,
    },
    /// Approve the active adoption process: the dog is placed with the
    /// adoptee.
    ApproveAdoption {
        /// Replacement notes for the record, if any.
        notes: Option<String>,
    },
    /// Reject the active adoption process: both parties return to the
    /// pool.
    RejectAdoption {
        /// Replacement notes for the record, if any.
        notes: Option<String>,
    },
    /// Update a dog's health status.
    ///
    /// A transition to `PassedAway` requires passing details and
    /// force-closes every active adoption process on the dog.
    UpdateHealth {
        /// The new health status.
        status: HealthStatus,
        /// Passing details; required iff `status` is `PassedAway`.
        passing: Option<PassingInfo>,
    },
}
