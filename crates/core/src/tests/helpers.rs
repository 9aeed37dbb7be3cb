// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pdr_audit::{Actor, Cause};
use pdr_domain::{Behavior, Goal, PdrData, PdrStatus, UserRole};

use crate::Pdr;

pub const OWNER_ID: i64 = 10;
pub const OTHER_EMPLOYEE_ID: i64 = 11;
pub const CEO_ID: i64 = 1;

pub fn create_test_owner() -> Actor {
    Actor::new(OWNER_ID, UserRole::Employee, String::from("Alex Owner"))
}

pub fn create_test_other_employee() -> Actor {
    Actor::new(
        OTHER_EMPLOYEE_ID,
        UserRole::Employee,
        String::from("Sam Other"),
    )
}

pub fn create_test_ceo() -> Actor {
    Actor::new(CEO_ID, UserRole::Ceo, String::from("Dana Chief"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test request"))
}

pub fn create_complete_data() -> PdrData {
    PdrData::new(
        vec![Goal::new("Grow the team", "Hire two engineers")],
        vec![Behavior::new("Gives candid feedback")],
    )
}

pub fn create_test_pdr(status: PdrStatus) -> Pdr {
    let mut pdr: Pdr = Pdr::new(100, OWNER_ID, 2026);
    pdr.status = status;
    pdr.data = create_complete_data();
    pdr
}
