//! Shared UI icons and emojis.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "*");

// Draft artifacts
pub static IDEA: Emoji<'_, '_> = Emoji("💡 ", "-");
pub static FILE_NEW: Emoji<'_, '_> = Emoji("📄 ", "+");
pub static FILE_MOD: Emoji<'_, '_> = Emoji("📝 ", "~");
pub static IMAGE: Emoji<'_, '_> = Emoji("🖼️  ", "[IMG]");
pub static AUDIO: Emoji<'_, '_> = Emoji("🔊 ", "[AUDIO]");
