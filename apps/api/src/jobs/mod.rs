//! Job posting storage.
//!
//! Relational persistence is deliberately out of this service; postings live
//! in a process-wide in-memory store, the same place they end up when the
//! upstream database is unavailable. Categorized keywords are stored
//! alongside each posting so readers always see the five-key shape.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::analysis::categorize::RequirementCategories;

pub mod handlers;

#[derive(Debug, Clone, Serialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub job_title: String,
    pub company: Option<String>,
    pub full_description: String,
    pub keywords: RequirementCategories,
    pub created_at: DateTime<Utc>,
}

/// Process-wide posting store. Reads come back newest first.
#[derive(Clone, Default)]
pub struct JobStore {
    postings: Arc<RwLock<Vec<JobPosting>>>,
}

impl JobStore {
    pub async fn insert(&self, posting: JobPosting) {
        self.postings.write().await.push(posting);
    }

    pub async fn list(&self) -> Vec<JobPosting> {
        let mut postings = self.postings.read().await.clone();
        postings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        postings
    }
}
