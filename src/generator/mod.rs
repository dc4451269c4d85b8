//! The generator module enumerates DIB/VIB code space and assembles the
//! enumerated codes into framed test telegrams.

pub mod enumerator;
pub mod manual;
pub mod sequencer;
pub mod session;
pub mod template;

pub use enumerator::{enumerate_codes, CodeGroup};
pub use manual::ManualEntry;
pub use sequencer::Sequencer;
pub use session::{generate, GenerationMode, GeneratorSession, Telegram, TelegramBatch};
pub use template::FrameTemplate;
