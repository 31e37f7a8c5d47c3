use api::proto::BotCommand;
use eyre::ensure;

/// Checks the limits setMyCommands enforces before the list is sent
pub fn verify_commands(commands: &[BotCommand]) -> eyre::Result<()> {
    ensure!(commands.len() <= 100, "at most 100 commands can be set");
    for cmd in commands {
        ensure!(
            matches!(cmd.command.len(), 1..=32),
            "command name can only contain 1-32 characters, got '{}'",
            cmd.command
        );
        ensure!(
            cmd.command
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
            "command name '{}' can only contain lowercase letters, digits and underscores",
            cmd.command
        );
        let desc_len = cmd.description.chars().count();
        ensure!(
            matches!(desc_len, 1..=256),
            "description of '{}' can only contain 1-256 characters",
            cmd.command
        );
    }
    Ok(())
}
