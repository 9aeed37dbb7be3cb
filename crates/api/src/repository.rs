// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage boundary for PDRs, their audit trail and notifications.

use std::collections::{BTreeMap, btree_map::Entry};

use pdr::Pdr;
use pdr_audit::AuditEvent;
use pdr_domain::{Notification, PdrStatus};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by a [`PdrRepository`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No PDR with this ID is stored.
    #[error("PDR {0} not found")]
    PdrNotFound(i64),
    /// The stored status moved since the caller read the PDR.
    #[error("PDR {pdr_id} changed underneath this request: expected {expected}, found {actual}")]
    StaleStatus {
        /// The PDR being saved.
        pdr_id: i64,
        /// The status the caller read.
        expected: PdrStatus,
        /// The status currently stored.
        actual: PdrStatus,
    },
    /// The owner already has a PDR for the year.
    #[error("User {owner_id} already has a PDR for {year}")]
    DuplicatePdr {
        /// The owning user.
        owner_id: i64,
        /// The review year.
        year: u16,
    },
}

/// A stored notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationRecord {
    /// Assigned on storage.
    pub notification_id: i64,
    /// The notification payload.
    #[serde(flatten)]
    pub notification: Notification,
    /// RFC 3339 creation time.
    pub created_at: String,
}

/// Persistence operations the API handlers rely on.
pub trait PdrRepository {
    /// Stores a new PDR in `CREATED` and returns it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DuplicatePdr` if the owner already has a PDR
    /// for the year.
    fn insert_pdr(&mut self, owner_id: i64, year: u16) -> Result<Pdr, RepositoryError>;

    /// Loads one PDR.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::PdrNotFound` if the ID is unknown.
    fn get_pdr(&self, pdr_id: i64) -> Result<Pdr, RepositoryError>;

    /// Lists every stored PDR ordered by ID.
    fn list_pdrs(&self) -> Vec<Pdr>;

    /// Replaces a stored PDR if its status still matches `expected_status`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The PDR does not exist
    /// - The stored status differs from `expected_status`
    fn save_pdr(&mut self, pdr: &Pdr, expected_status: PdrStatus) -> Result<(), RepositoryError>;

    /// Removes a PDR and returns it.
    ///
    /// Its audit trail is kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::PdrNotFound` if the ID is unknown.
    fn delete_pdr(&mut self, pdr_id: i64) -> Result<Pdr, RepositoryError>;

    /// Stores an audit event and returns it stamped with its ID and time.
    fn append_audit_event(&mut self, event: AuditEvent, recorded_at: String) -> AuditEvent;

    /// Returns a PDR's audit events in the order they were recorded.
    fn audit_events(&self, pdr_id: i64) -> Vec<AuditEvent>;

    /// Stores a notification for later delivery.
    fn push_notification(
        &mut self,
        notification: Notification,
        created_at: String,
    ) -> NotificationRecord;

    /// Returns the notifications addressed to a user, oldest first.
    fn notifications_for(&self, user_id: i64) -> Vec<NotificationRecord>;
}

/// A [`PdrRepository`] held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryPdrRepository {
    pdrs: BTreeMap<i64, Pdr>,
    audit_events: BTreeMap<i64, AuditEvent>,
    notifications: BTreeMap<i64, NotificationRecord>,
    next_pdr_id: i64,
    next_event_id: i64,
    next_notification_id: i64,
}

impl InMemoryPdrRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }
}

impl PdrRepository for InMemoryPdrRepository {
    fn insert_pdr(&mut self, owner_id: i64, year: u16) -> Result<Pdr, RepositoryError> {
        if self
            .pdrs
            .values()
            .any(|pdr| pdr.owner_id == owner_id && pdr.year == year)
        {
            return Err(RepositoryError::DuplicatePdr { owner_id, year });
        }

        let pdr_id: i64 = Self::allocate(&mut self.next_pdr_id);
        let pdr: Pdr = Pdr::new(pdr_id, owner_id, year);
        self.pdrs.insert(pdr_id, pdr.clone());
        Ok(pdr)
    }

    fn get_pdr(&self, pdr_id: i64) -> Result<Pdr, RepositoryError> {
        self.pdrs
            .get(&pdr_id)
            .cloned()
            .ok_or(RepositoryError::PdrNotFound(pdr_id))
    }

    fn list_pdrs(&self) -> Vec<Pdr> {
        self.pdrs.values().cloned().collect()
    }

    fn save_pdr(&mut self, pdr: &Pdr, expected_status: PdrStatus) -> Result<(), RepositoryError> {
        match self.pdrs.entry(pdr.pdr_id) {
            Entry::Vacant(_) => Err(RepositoryError::PdrNotFound(pdr.pdr_id)),
            Entry::Occupied(mut entry) => {
                let actual: PdrStatus = entry.get().status;
                if actual != expected_status {
                    return Err(RepositoryError::StaleStatus {
                        pdr_id: pdr.pdr_id,
                        expected: expected_status,
                        actual,
                    });
                }
                entry.insert(pdr.clone());
                Ok(())
            }
        }
    }

    fn delete_pdr(&mut self, pdr_id: i64) -> Result<Pdr, RepositoryError> {
        self.pdrs
            .remove(&pdr_id)
            .ok_or(RepositoryError::PdrNotFound(pdr_id))
    }

    fn append_audit_event(&mut self, event: AuditEvent, recorded_at: String) -> AuditEvent {
        let event_id: i64 = Self::allocate(&mut self.next_event_id);
        let event: AuditEvent = event.persisted(event_id, recorded_at);
        self.audit_events.insert(event_id, event.clone());
        event
    }

    fn audit_events(&self, pdr_id: i64) -> Vec<AuditEvent> {
        self.audit_events
            .values()
            .filter(|event| event.pdr_id == pdr_id)
            .cloned()
            .collect()
    }

    fn push_notification(
        &mut self,
        notification: Notification,
        created_at: String,
    ) -> NotificationRecord {
        let notification_id: i64 = Self::allocate(&mut self.next_notification_id);
        let record: NotificationRecord = NotificationRecord {
            notification_id,
            notification,
            created_at,
        };
        self.notifications.insert(notification_id, record.clone());
        record
    }

    fn notifications_for(&self, user_id: i64) -> Vec<NotificationRecord> {
        self.notifications
            .values()
            .filter(|record| record.notification.user_id == user_id)
            .cloned()
            .collect()
    }
}
