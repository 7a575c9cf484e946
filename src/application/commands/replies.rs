//! Fixed reply texts

pub const UNKNOWN_COMMAND: &str = "🚫 Unknown command. Use /help for a list of commands.";
pub const UNAUTHORIZED: &str = "🚫 You do not have permission to use this command.";
pub const MISSING_BIN: &str = "🚫 Please provide a BIN number.\nUsage: /bin <bin-number>";
pub const MISSING_CARD: &str = "🚫 Please provide a credit card number.\nUsage: /check <card-number>";
pub const INVALID_FORMAT: &str = "🚫 Invalid card number format. Use digits only, spaces are allowed.";
pub const LOOKUP_FAILED: &str = "⚠️ BIN lookup failed. The lookup service is unavailable, please try again later.";

pub const HELP: &str = "📚 Available commands:\n\
/start - Welcome message 😊\n\
/generate - Generate a random credit card number 🎟️\n\
/bin <bin> - Lookup BIN information 🔍\n\
/check <card> - Validate a credit card number ✅\n\
/inline - Interactive buttons ✨\n\
/status - Get bot status 🟢\n\
/credits - View credits and acknowledgements 🎖️";

pub const INLINE_PROMPT: &str = "✨ Choose an option:";
