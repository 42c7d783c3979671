use lazy_static::lazy_static;
use regex::Regex;

use super::command::{Command, CommandName};

lazy_static! {
    static ref COMMAND_LINE: Regex =
        Regex::new(r"^/(code|continue|fix|help|review|summary)\s*(.*)$").unwrap();
}

/// Command parser.
pub struct CommandParser;

impl CommandParser {
    /// Extract the first command found in a text.
    ///
    /// Lines are scanned top to bottom and only the first matching line is used,
    /// so `/fix a` followed by `/code b` runs `fix` alone.
    pub fn extract(text: &str) -> Option<Command> {
        text.lines().find_map(Self::parse_line)
    }

    /// Parse a single line.
    pub fn parse_line(line: &str) -> Option<Command> {
        let captures = COMMAND_LINE.captures(line.trim())?;
        let name: CommandName = captures[1].parse().ok()?;

        Some(Command::new(name, captures[2].trim()))
    }

    /// Check if a login belongs to the bot itself, or to any GitHub App bot.
    ///
    /// Text posted by bots is never scanned for commands, so the bot replies
    /// (which embed AI output) cannot trigger new runs.
    pub fn is_bot_author(bot_name: &str, login: &str) -> bool {
        login.eq_ignore_ascii_case(bot_name) || login.ends_with("[bot]")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn no_command() {
        assert_eq!(CommandParser::extract(""), None);
        assert_eq!(CommandParser::extract("hello\nworld"), None);
        assert_eq!(CommandParser::extract("please /code this"), None);
        assert_eq!(CommandParser::extract("/deploy now"), None);
    }

    #[test]
    fn command_in_the_middle() {
        assert_eq!(
            CommandParser::extract("hello\n/code add a login page\nworld"),
            Some(Command::new(CommandName::Code, "add a login page"))
        );
    }

    #[test]
    fn first_command_wins() {
        assert_eq!(
            CommandParser::extract("/fix bug A\n/code feature B"),
            Some(Command::new(CommandName::Fix, "bug A"))
        );
    }

    #[test]
    fn lines_are_trimmed() {
        assert_eq!(
            CommandParser::extract("  /review   focus on errors  \r\n"),
            Some(Command::new(CommandName::Review, "focus on errors"))
        );
        assert_eq!(
            CommandParser::extract("/help"),
            Some(Command::new(CommandName::Help, ""))
        );
        assert_eq!(
            CommandParser::extract("/summary"),
            Some(Command::new(CommandName::Summary, ""))
        );
    }

    #[test]
    fn every_command_name_is_recognized() {
        for (text, name) in [
            ("/code", CommandName::Code),
            ("/continue", CommandName::Continue),
            ("/fix", CommandName::Fix),
            ("/help", CommandName::Help),
            ("/review", CommandName::Review),
            ("/summary", CommandName::Summary),
        ] {
            assert_eq!(CommandParser::parse_line(text), Some(Command::new(name, "")));
        }
    }

    #[test]
    fn bot_authors() {
        assert!(CommandParser::is_bot_author("codeagent", "codeagent"));
        assert!(CommandParser::is_bot_author("codeagent", "CodeAgent"));
        assert!(CommandParser::is_bot_author("codeagent", "dependabot[bot]"));
        assert!(!CommandParser::is_bot_author("codeagent", "octocat"));
    }

    #[test]
    fn prefix_without_separator() {
        // No word boundary after the name
        assert_eq!(
            CommandParser::extract("/codex"),
            Some(Command::new(CommandName::Code, "x"))
        );
    }
}
