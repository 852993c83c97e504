// SYNOID Shorts Response Parser
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Reads the model's labelled free text into a ContentRecord. The parser is a
// small state machine: a recognised prefix moves it into that field's state,
// and only the DESCRIPTION state accepts continuation lines. Fields that are
// never entered keep whatever the seed record held.

use crate::agent::record::{derive_tags, ContentRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    Unset,
    Hook,
    Body,
    Title,
    Description,
    Tags,
}

const PREFIXES: [(&str, ParserState); 5] = [
    ("HOOK:", ParserState::Hook),
    ("BODY:", ParserState::Body),
    ("TITLE:", ParserState::Title),
    ("DESCRIPTION:", ParserState::Description),
    ("TAGS:", ParserState::Tags),
];

pub struct ResponseParser {
    state: ParserState,
    record: ContentRecord,
}

impl ResponseParser {
    pub fn new(seed: ContentRecord) -> Self {
        Self {
            state: ParserState::Unset,
            record: seed,
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn feed_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        for (prefix, state) in PREFIXES {
            if let Some(rest) = line.strip_prefix(prefix) {
                self.state = state;
                self.assign(state, rest.trim());
                return;
            }
        }

        if self.state == ParserState::Description {
            self.record.description.push('\n');
            self.record.description.push_str(line);
        }
    }

    pub fn finish(self) -> ContentRecord {
        self.record
    }

    fn assign(&mut self, state: ParserState, value: &str) {
        match state {
            ParserState::Hook => self.record.hook = value.to_string(),
            ParserState::Body => self.record.body = value.to_string(),
            ParserState::Title => self.record.title = value.replace('"', ""),
            ParserState::Description => self.record.description = value.to_string(),
            ParserState::Tags => self.record.tags = derive_tags(value),
            ParserState::Unset => {}
        }
    }
}

/// Parse a whole response on top of `seed`.
pub fn parse_response(text: &str, seed: ContentRecord) -> ContentRecord {
    let mut parser = ResponseParser::new(seed);
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}
