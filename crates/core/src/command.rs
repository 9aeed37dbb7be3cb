// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pdr_domain::{Behavior, Goal, PdrAction, PdrStatus};

/// A command represents user intent as data only.
///
/// Commands are the only way to request changes to a PDR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move the PDR to a new status via a named action.
    Transition {
        /// The requested status.
        target: PdrStatus,
        /// The action performing the change.
        action: PdrAction,
    },
    /// Replace the employee's goals.
    ///
    /// CEO comments already recorded on a goal at the same position are kept.
    /// A goal carrying CEO comments must keep its position and title unless
    /// the actor may edit CEO fields.
    ReviseGoals {
        /// The new goal list.
        goals: Vec<Goal>,
    },
    /// Replace the employee's behavior entries.
    ///
    /// CEO comments already recorded at the same position are kept. A
    /// commented behavior must keep its position and description unless the
    /// actor may edit CEO fields.
    ReviseBehaviors {
        /// The new behavior list.
        behaviors: Vec<Behavior>,
    },
    /// Record or clear CEO feedback on one goal.
    RecordGoalFeedback {
        /// Position of the goal.
        goal_index: usize,
        /// The feedback, or `None` to clear it.
        comments: Option<String>,
    },
    /// Record or clear CEO feedback on one behavior.
    RecordBehaviorFeedback {
        /// Position of the behavior.
        behavior_index: usize,
        /// The feedback, or `None` to clear it.
        comments: Option<String>,
    },
}

/// Audit action names of the commands that write CEO feedback.
pub const FEEDBACK_COMMANDS: [&str; 2] = ["RecordGoalFeedback", "RecordBehaviorFeedback"];

impl Command {
    /// Returns the name recorded in audit events for this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Transition { action, .. } => action.as_str(),
            Self::ReviseGoals { .. } => "ReviseGoals",
            Self::ReviseBehaviors { .. } => "ReviseBehaviors",
            Self::RecordGoalFeedback { .. } => "RecordGoalFeedback",
            Self::RecordBehaviorFeedback { .. } => "RecordBehaviorFeedback",
        }
    }

    /// Returns true if the command writes CEO feedback.
    #[must_use]
    pub const fn is_feedback(&self) -> bool {
        matches!(
            self,
            Self::RecordGoalFeedback { .. } | Self::RecordBehaviorFeedback { .. }
        )
    }
}
