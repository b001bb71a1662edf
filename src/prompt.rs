//! Prompt templating for lyrics generation
//!
//! The model was fine-tuned on prompts of the exact shape produced here, so
//! the wording and the `[Verse 1]` header are part of the checkpoint
//! contract, not a style choice.

/// Artist used when the request leaves the field out
pub const DEFAULT_ARTIST: &str = "a pop artist";

/// Topic used when the request leaves the field out
pub const DEFAULT_DESCRIPTION: &str = "love and life";

/// Lyrics prompt for a single generation
#[derive(Debug, Clone)]
pub struct LyricsPrompt {
    artist: String,
    description: String,
}

impl LyricsPrompt {
    /// Build a prompt, falling back to the stock artist/topic for empty or
    /// missing fields
    pub fn new(artist: Option<&str>, description: Option<&str>) -> Self {
        let pick = |value: Option<&str>, fallback: &str| match value {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => fallback.to_string(),
        };

        Self {
            artist: pick(artist, DEFAULT_ARTIST),
            description: pick(description, DEFAULT_DESCRIPTION),
        }
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Render the prompt fed to the model
    pub fn render(&self) -> String {
        format!(
            "Write a song in the style of {} about {}.\n\n[Verse 1]\n",
            self.artist, self.description
        )
    }
}

/// Clean up raw model output before it goes on the wire.
///
/// The executor only ever returns the continuation (the prompt is not
/// echoed), so this is just whitespace trimming.
pub fn clean_output(text: &str) -> String {
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let prompt = LyricsPrompt::new(Some("Taylor Swift"), Some("a summer road trip"));
        assert_eq!(
            prompt.render(),
            "Write a song in the style of Taylor Swift about a summer road trip.\n\n[Verse 1]\n"
        );
    }

    #[test]
    fn test_defaults() {
        let prompt = LyricsPrompt::new(None, None);
        assert_eq!(prompt.artist(), DEFAULT_ARTIST);
        assert_eq!(prompt.description(), DEFAULT_DESCRIPTION);
        assert_eq!(
            prompt.render(),
            "Write a song in the style of a pop artist about love and life.\n\n[Verse 1]\n"
        );
    }

    #[test]
    fn test_blank_fields_fall_back() {
        let prompt = LyricsPrompt::new(Some("   "), Some(""));
        assert_eq!(prompt.artist(), DEFAULT_ARTIST);
        assert_eq!(prompt.description(), DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let prompt = LyricsPrompt::new(Some("  Adele "), Some(" rain \n"));
        assert_eq!(prompt.artist(), "Adele");
        assert_eq!(prompt.description(), "rain");
    }

    #[test]
    fn test_clean_output() {
        assert_eq!(clean_output("\nhello darkness\n\n"), "hello darkness");
        assert_eq!(clean_output(""), "");
    }
}
