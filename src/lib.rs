// SYNOID Shorts Library
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod agent;
pub mod config;
