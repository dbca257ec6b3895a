//! Read-only view over node liveness timestamps.
//! The tracker that computes the times lives elsewhere; this only snapshots
//! and routes requests.

use serde::Serialize;
use std::collections::BTreeMap;

pub type NodeId = String;

/// Source of last-seen times (Unix seconds) per node.
pub trait LastSeenTracker {
    fn last_seen_times(&self) -> BTreeMap<NodeId, i64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Head,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LastSeenSnapshot(pub BTreeMap<NodeId, i64>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusResponse {
    Ok(LastSeenSnapshot),
    MethodNotAllowed,
    NotFound,
}

pub struct LastSeenView<'a, T: LastSeenTracker + ?Sized> {
    tracker: &'a T,
}

impl<'a, T: LastSeenTracker + ?Sized> LastSeenView<'a, T> {
    pub fn new(tracker: &'a T) -> Self {
        Self { tracker }
    }

    pub fn root(&self) -> LastSeenSnapshot {
        LastSeenSnapshot(self.tracker.last_seen_times())
    }

    /// Only `GET /` is served.
    pub fn handle(&self, method: Method, resource: &str) -> StatusResponse {
        if method != Method::Get {
            return StatusResponse::MethodNotAllowed;
        }
        if resource != "/" {
            return StatusResponse::NotFound;
        }
        StatusResponse::Ok(self.root())
    }
}
