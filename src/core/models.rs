//! Output configuration shared by the writers.

/// Controls which messages and fields the writers emit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Drop notices (system and system-like messages)
    pub skip_system: bool,
    /// Add the media handle of each attachment
    pub include_media: bool,
    /// Add an `is_self` flag to each message
    pub include_self: bool,
    /// Invert `is_self`, for chats where self-detection guessed wrong
    pub swapped: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_system(mut self) -> Self {
        self.skip_system = true;
        self
    }

    pub fn with_media(mut self) -> Self {
        self.include_media = true;
        self
    }

    pub fn with_self_flag(mut self) -> Self {
        self.include_self = true;
        self
    }

    pub fn with_swapped(mut self, swapped: bool) -> Self {
        self.swapped = swapped;
        self
    }
}
