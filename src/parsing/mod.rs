//! WhatsApp transcript parsing.
//!
//! The pipeline is line based and never fails:
//!
//! 1. [`text`] strips byte-order marks, carriage returns and invisible marks
//! 2. [`line`] recognizes message-start lines in the four export grammars
//! 3. [`timestamp`] resolves locale-ambiguous date and time tokens
//! 4. [`assembler`] folds continuation lines into complete messages
//! 5. [`attachment`] finds media references in finished bodies
//! 6. [`self_detect`] guesses which participant exported the chat

pub mod assembler;
pub mod attachment;
pub mod line;
pub mod self_detect;
pub mod text;
pub mod timestamp;

pub use assembler::{Transcript, assemble_transcript, parse_chat_text};
pub use attachment::extract_attachment;
pub use line::{LineGrammar, ParsedLine, classify_line, is_new_message_line, parse_line};
pub use self_detect::{
    DetectionContext, SelfStrategy, detect_self, most_frequent_sender, other_party_from_filename,
};
pub use text::{clean_line, strip_invisible};
pub use timestamp::{DateOrder, resolve_timestamp};
