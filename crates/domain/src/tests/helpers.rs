// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for domain tests.

use crate::{Behavior, Goal, PdrData};

pub fn create_complete_goal() -> Goal {
    Goal::new("Ship onboarding flow", "Deliver the new onboarding flow by Q3")
}

pub fn create_complete_behavior() -> Behavior {
    Behavior {
        description: String::from("Communicates openly with the team"),
        self_assessment: Some(String::from("Mostly there")),
        ceo_comments: None,
    }
}

pub fn create_complete_data() -> PdrData {
    PdrData::new(vec![create_complete_goal()], vec![create_complete_behavior()])
}

pub fn create_reviewed_data() -> PdrData {
    let mut data: PdrData = create_complete_data();
    data.behaviors[0].ceo_comments = Some(String::from("Great collaboration this year"));
    data
}
