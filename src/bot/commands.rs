use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::replies;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum BotCommand {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show help")]
    Help,
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: BotCommand,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match cmd {
        BotCommand::Start => {
            bot.send_message(msg.chat.id, replies::GREETING).await?;
        }
        BotCommand::Help => {
            bot.send_message(msg.chat.id, BotCommand::descriptions().to_string())
                .await?;
        }
    }

    Ok(())
}
