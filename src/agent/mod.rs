// SYNOID Shorts Agent Modules
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod content_requester;
pub mod fonts;
pub mod frame_composer;
pub mod gemini_bridge;
pub mod health;
pub mod io_shield;
pub mod production_tools;
pub mod prompt;
pub mod publisher;
pub mod record;
pub mod response_parser;
pub mod themes;

pub mod core; // Exposed Core Logic
