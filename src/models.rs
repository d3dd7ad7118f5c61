// src/models.rs

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: i64,
    pub timestamp: String, // stored as "DD/MM/YYYY HH:MM:SS" local time
    pub content: String,
}
