// SYNOID Shorts Prompt Templates
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::agent::themes::Theme;
use crate::config::PromptVoice;

const OUTPUT_FORMAT: &str = "### OUTPUT FORMAT (Strictly 5 parts):
HOOK: [Max 7 words. Simple English. End with \"...\"]
BODY: [Max 12 words. Harsh truth. Simple words.]
TITLE: [Clickbait Title, max 60 chars, 1 emoji, NO hashtags]
DESCRIPTION: [2 lines explaining the lesson. Add 5-6 hashtags.]
TAGS: [20 high-traffic keywords: money, business, sigma, rich, motivation]";

/// Prompt wording with `{theme}` and `{category}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub persona: String,
    pub guidance: String,
    pub output_format: String,
}

impl PromptTemplate {
    /// Blunt mentor voice with simple street English.
    pub fn ruthless_mentor() -> Self {
        Self {
            persona: "You are a Ruthless Billionaire Mentor.".to_string(),
            guidance: "### CRITICAL RULE (LANGUAGE):
NO BIG WORDS (e.g., Masquerading, Inevitable, Masquerade).
USE SIMPLE STREET ENGLISH (e.g., Faking, Real, Trap, Lie).
Make it punchy. A 10-year-old should feel the pain of the truth.

### THE FLOW (Cliffhanger + Slap):
HOOK: A suspended sentence. Make them curious. (e.g., \"The bank is lying...\", \"Stop being kind...\")
BODY: The brutal punchline.

### EXAMPLES (Simple English):
(Wealth):
Hook: You will stay poor if...
Body: You keep buying things to impress people.

(Wealth):
Hook: A salary is just a bribe...
Body: To make you forget your dreams.

(Dark Truth):
Hook: People don't respect kindness...
Body: They respect power and money."
                .to_string(),
            output_format: OUTPUT_FORMAT.to_string(),
        }
    }

    /// Calmer stoic voice for the single-pool variant.
    pub fn stoic_mentor() -> Self {
        Self {
            persona: "You are a calm Stoic mentor who speaks in short, heavy sentences."
                .to_string(),
            guidance: "### STYLE:
Plain words only. No jargon. Every line must sting a little.

### THE FLOW (Pause + Truth):
HOOK: An unfinished thought that makes people stop scrolling.
BODY: The quiet truth that completes it.

### EXAMPLE:
Hook: Nobody is coming to save you...
Body: So stop waiting and start building."
                .to_string(),
            output_format: OUTPUT_FORMAT.to_string(),
        }
    }

    pub fn for_voice(voice: PromptVoice) -> Self {
        match voice {
            PromptVoice::RuthlessMentor => Self::ruthless_mentor(),
            PromptVoice::StoicMentor => Self::stoic_mentor(),
        }
    }

    pub fn render(&self, theme: &Theme) -> String {
        format!(
            "{}\nTheme: {}\nCategory: {}\n\n{}\n\n{}\n",
            self.persona, theme.name, theme.category, self.guidance, self.output_format
        )
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::ruthless_mentor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_theme_and_format() {
        let prompt = PromptTemplate::ruthless_mentor().render(&Theme::new("Salary is a Trap", "WEALTH"));
        assert!(prompt.contains("Theme: Salary is a Trap"));
        assert!(prompt.contains("Category: WEALTH"));
        for label in ["HOOK:", "BODY:", "TITLE:", "DESCRIPTION:", "TAGS:"] {
            assert!(prompt.contains(label), "missing {}", label);
        }
    }

    #[test]
    fn test_variants_share_output_format() {
        let a = PromptTemplate::ruthless_mentor();
        let b = PromptTemplate::stoic_mentor();
        assert_eq!(a.output_format, b.output_format);
        assert_ne!(a.persona, b.persona);
    }
}
