pub mod discord;
pub mod sheets;

pub use discord::DiscordExecutor;
pub use sheets::SheetsExecutor;
