//! Unit tests for the query caches
